//! Core library modules: the plan rules, configuration, session state and
//! terminal and file output.
//!
//! ```rust
//! use minkamp::libs::plan::{validate_plan, SubstitutionPlan};
//!
//! let plan = SubstitutionPlan::from_sequences([(1, vec![true, false]), (2, vec![true, true])]);
//! assert!(validate_plan(&plan, 2, 1, 2).is_valid());
//! ```

pub mod auth;
pub mod config;
pub mod data_storage;
pub mod export;
pub mod formation;
pub mod import;
pub mod messages;
pub mod periods;
pub mod plan;
pub mod position;
pub mod session;
pub mod view;

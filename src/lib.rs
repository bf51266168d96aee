//! # Minkamp - substitution planner for amateur football
//!
//! A command-line tool for coaches who rotate a squad through short periods
//! and want everyone to get a fair share of the match.
//!
//! ## Features
//!
//! - **Players and matches**: Keep a roster and register matches with their period layout
//! - **Squads**: Pick who is available for each match
//! - **Substitution plans**: Decide per period who is on the field, with drafts kept between runs
//! - **Validation**: On-field limits, formation minimums and playing-time balance
//! - **Playing time**: Minutes per match and across the season
//! - **Import and export**: Players from CSV, plans and statistics to CSV, JSON and Excel
//!
//! ## Usage
//!
//! ```rust,no_run
//! use minkamp::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;

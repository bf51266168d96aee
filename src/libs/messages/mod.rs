//! User-facing messages and the macros that print them.
//!
//! Outside debug mode messages go straight to the terminal. With
//! `MINKAMP_DEBUG` or `RUST_LOG` set they are routed through `tracing`.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;

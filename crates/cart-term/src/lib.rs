//! # cart-term
//!
//! Terminal host for the basket-cart widget.
//! Provides a `TextView` implementation of `CartView`, a line command
//! parser, and the interactive session loop.

pub mod command;
pub mod config;
pub mod session;
pub mod view;

pub use command::{Command, CommandError};
pub use config::TermConfig;
pub use session::{execute, run, Flow, TermWidget};
pub use view::TextView;

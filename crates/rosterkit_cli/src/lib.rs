//! `rosterkit` command-line front end.
//!
//! - `cli`     : argument/environment definitions
//! - `logging` : tracing subscriber setup

pub mod cli;
pub mod logging;

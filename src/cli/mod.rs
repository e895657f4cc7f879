//! Command-line interface.
//!
//! Argument definitions live in [`args`]; command handlers and the
//! dispatch entry point live in [`commands`].

pub mod args;
pub mod commands;

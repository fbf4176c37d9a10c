//! Command handlers.
//!
//! Each submodule implements one subcommand: translate parsed arguments into
//! core service calls and render results. No derivation logic lives here.

pub mod completions;
pub mod config;
pub mod new;
pub mod templates;

//! Utilities that are used across the `panref` subcommands.

pub mod display;

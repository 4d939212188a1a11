//! Functionality related to the `panref list` subcommand.

pub mod command;

//! Command line interface for synt.

pub mod args;
pub mod commands;

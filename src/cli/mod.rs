//! Command-line interface for building, counting and solving the state space

pub mod commands;
pub mod output;

//! Shared helpers for the CLI

pub mod terminal;

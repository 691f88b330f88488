#![deny(clippy::all)]

//! Library portion of the fmap CLI: argument definitions, configuration
//! loading, logging bootstrap, and command implementations.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logger;

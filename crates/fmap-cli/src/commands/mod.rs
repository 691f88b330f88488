//! Command implementations for the fmap CLI.

mod generate;

pub use generate::generate_execute;

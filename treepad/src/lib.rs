//! # TreePad command line host
//!
//! Opens an outline file and runs find, replace or dump against it.

pub mod args;
pub mod run;

pub use args::{parse_args, usage, CliError, CliOptions, Invocation};
pub use run::{dump, load_settings, run, RunError, RunResult};

//! Command-line interface orchestration for modforge.
//!
//! `generate` loads a JSON project configuration and prints the resulting
//! blueprint; `topology` runs a single topology algorithm and prints its
//! edges, which is handy when choosing parameters.

mod commands;
mod config;

pub use commands::{
    Cli, CliError, Command, ExecutionOutput, GenerateArgs, OutputFormat, TopologyArgs,
    render_output, run_cli,
};
pub use config::{load_config, parse_config};

//! Command-line interface for the shipping roadmap generator.
//!
//! `generate` takes every parameter as a flag; `interactive` asks for them one
//! question at a time. Both write the graph in the chosen format and report a
//! short summary.

mod commands;
mod prompt;
mod render;

pub use commands::{
    Cli, CliError, Command, DEFAULT_OUTPUT, ExecutionSummary, GenerateCommand,
    InteractiveCommand, OutputArgs, OutputTarget, render_summary, render_summary_for, run_cli,
    run_cli_with,
};
pub use prompt::{PromptError, PromptSession, SessionError};
pub use render::{OutputFormat, RenderError, write_dot, write_graph, write_text, write_trace};

#[cfg(test)]
mod test_helpers;

pub mod commands;
pub mod context;
pub mod error;
mod help;
pub mod output;
pub mod registry;
pub mod render;
mod shell;

pub use context::{CliMode, ShellContext};
pub use error::{CliError, CommandError, CommandResult};
pub use shell::{run_cli, run_script};

use std::io;

use thiserror::Error;

use spendwise_config::ConfigError;
use spendwise_core::CoreError;

use crate::errors::SpendwiseError;

/// Failures that stop the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    App(#[from] SpendwiseError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("Invalid environment: {0}")]
    InvalidEnv(String),
}

/// Failures of a single command. The shell reports them and keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    App(#[from] SpendwiseError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

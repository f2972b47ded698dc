pub(crate) use {
    crate::error::NocthubCliError,
    anyhow::Result as AnyResult,
    clap::{Args, Parser, Subcommand},
    colored::Colorize,
    std::{path::PathBuf, process::ExitCode},
};

/// Default location of the golden vector tree, relative to the working
/// directory.
pub(crate) const DEFAULT_VECTOR_DIR: &str = "golden_vectors";

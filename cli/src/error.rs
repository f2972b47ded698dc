use {
    crate::{display::*, prelude::*},
    thiserror::Error,
};

/// Custom error definitions for the NoctHub CLI. Takes care of displaying
/// a pretty summary in the console.
#[derive(Debug, Error)]
pub(crate) enum NocthubCliError {
    #[error("{error}{separator}\n{0}", error = "Syntax Error".red().bold(), separator = separator())]
    Syntax(clap::error::Error),
    #[error("{error}{separator}\n{0}", error = "IO Error".red().bold(), separator = separator())]
    Io(std::io::Error),
    #[error("{error}{separator}\n{0}", error = "Error".red().bold(), separator = separator())]
    Any(anyhow::Error),
    #[error("{error}{separator}\n{0}", error = "Verifier Error".red().bold(), separator = separator())]
    Verifier(nocthub_verifier::VerifierError),
    #[error("{error}{separator}\n{0}", error = "Vector Error".red().bold(), separator = separator())]
    Vector(nocthub_verifier::vectors::VectorError),
}

mod completion;
mod display;
mod error;
mod prelude;
mod vectors;
mod verify;

use {
    crate::prelude::*,
    clap::error::ErrorKind,
};

#[derive(Parser)]
#[command(
    name = "nocthub",
    about = "Offline verifier for NoctHub Secret Removal Proofs",
    version,
    arg_required_else_help = true
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Verify a Secret Removal Proof document")]
    Verify(verify::VerifyCommand),

    #[command(subcommand, about = "Produce or replay golden test vectors")]
    Vectors(vectors::VectorsCommand),

    #[command(about = "Generate shell completion scripts")]
    Completion(completion::CompletionCommand),
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", NocthubCliError::Syntax(e));
            return ExitCode::FAILURE;
        }
    };

    let outcome = match cli.command {
        Command::Verify(command) => verify::handle(command),
        Command::Vectors(command) => vectors::handle(command),
        Command::Completion(command) => completion::handle(command),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

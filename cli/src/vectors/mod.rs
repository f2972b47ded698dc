use {
    crate::{command_title, display::separator, prelude::*},
    nocthub_verifier::{vectors, Verifier},
};

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum VectorsCommand {
    #[command(about = "Generate the golden vector tree and its manifest")]
    Generate {
        #[arg(
            long,
            help = "Directory to write the vectors into",
            default_value = DEFAULT_VECTOR_DIR,
            value_name = "DIR"
        )]
        out: PathBuf,
    },

    #[command(about = "Replay every golden vector against this implementation")]
    Run {
        #[arg(
            long,
            help = "Directory holding the vectors and MANIFEST.json",
            default_value = DEFAULT_VECTOR_DIR,
            value_name = "DIR"
        )]
        dir: PathBuf,
    },
}

/// Handle the provided vectors command. The [VectorsCommand] instance is
/// passed from [crate::main].
pub(crate) fn handle(command: VectorsCommand) -> AnyResult<ExitCode, NocthubCliError> {
    match command {
        VectorsCommand::Generate { out } => {
            command_title!("Generating golden vectors into {}", out.display());

            let manifest = vectors::generate(&out).map_err(NocthubCliError::Vector)?;

            for (category, files) in &manifest.vectors {
                println!("  {}: {} vector(s)", category.bold(), files.len());
            }
            println!(
                "{}Wrote {} files and {}",
                separator(),
                manifest.file_count(),
                vectors::MANIFEST_FILE.bold()
            );

            Ok(ExitCode::SUCCESS)
        }

        VectorsCommand::Run { dir } => {
            command_title!("Running golden vectors from {}", dir.display());

            let verifier = Verifier::new().map_err(NocthubCliError::Verifier)?;
            let report = vectors::run(&dir, &verifier).map_err(NocthubCliError::Vector)?;

            for failure in &report.failures {
                println!(
                    "  [{}] {}/{}: {}",
                    "FAIL".red().bold(),
                    failure.category,
                    failure.filename,
                    failure.reason
                );
            }
            println!(
                "{}{}/{} vectors passed",
                separator(),
                report.passed,
                report.total
            );

            Ok(if report.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

use {
    crate::{command_title, display, prelude::*},
    nocthub_verifier::{Status, VerificationResult, Verifier},
    std::fs,
};

#[derive(Args, Clone, Debug)]
pub(crate) struct VerifyCommand {
    /// Path to the proof document to verify.
    pub(crate) proof_file: PathBuf,

    /// Emit the verification result as JSON on stdout.
    #[arg(long)]
    pub(crate) json: bool,

    /// Include per-layer diagnostic details in the report.
    #[arg(long, short)]
    pub(crate) verbose: bool,
}

/// Handle the provided verify command. Exit code 0 on VALID, 1 on INVALID
/// or ERROR.
pub(crate) fn handle(command: VerifyCommand) -> AnyResult<ExitCode, NocthubCliError> {
    if !command.json {
        command_title!("Verifying {}", command.proof_file.display());
    }

    log::debug!("verifying {}", command.proof_file.display());
    let result = run_verification(&command.proof_file);

    if command.json {
        display::json_output(&result)?;
    } else {
        display::print_result(&result, command.verbose);
    }

    Ok(match result.status {
        Status::Valid => ExitCode::SUCCESS,
        Status::Invalid | Status::Error => ExitCode::FAILURE,
    })
}

/// Run the pipeline over the file at `path`. Boundary failures (unreadable
/// file, broken ambient stack) become ERROR reports instead of INVALID
/// verdicts: the verifier could not reach a judgement.
fn run_verification(path: &std::path::Path) -> VerificationResult {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) => {
            return VerificationResult::error(
                "read",
                format!("cannot read {}: {e}", path.display()),
            )
        }
    };

    let verifier = match Verifier::new() {
        Ok(verifier) => verifier,
        Err(e) => return VerificationResult::error("startup", e.to_string()),
    };

    verifier.verify_bytes(&raw)
}

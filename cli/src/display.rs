use {
    crate::prelude::*,
    colored::ColoredString,
    nocthub_verifier::{Status, VerificationResult},
};

/// Print a grey colored line to separate sections
pub(crate) fn separator() -> ColoredString {
    "\n-=-=-=-=-=-=-=-\n".truecolor(100, 100, 100)
}

/// Print the title of the currently executed command.
#[macro_export]
macro_rules! command_title {
    ($($title:tt)*) => {
        println!(
            "{arrow} {title}{separator}",
            arrow = "▶".bold().purple(),
            title = format!($($title)*).bold(),
            separator = $crate::display::separator()
        );
    };
}

pub(crate) fn status_label(status: Status) -> ColoredString {
    match status {
        Status::Valid => "VALID".green().bold(),
        Status::Invalid => "INVALID".red().bold(),
        Status::Error => "ERROR".yellow().bold(),
    }
}

/// Render a verification report for humans: one line per executed layer,
/// then the overall verdict.
pub(crate) fn print_result(result: &VerificationResult, verbose: bool) {
    for step in &result.steps {
        println!(
            "  [{status}] {name}: {message}",
            status = status_label(step.status),
            name = step.name.bold(),
            message = step.message
        );
        if verbose {
            if let Some(details) = &step.details {
                println!("           {details}");
            }
        }
    }

    println!(
        "{separator}{status} proof {hash}",
        separator = separator(),
        status = status_label(result.status),
        hash = result.proof_hash.bold()
    );
}

/// Print any serializable value as a single JSON line on stdout.
pub(crate) fn json_output<T: serde::Serialize>(value: &T) -> AnyResult<(), NocthubCliError> {
    let json = serde_json::to_string(value)
        .map_err(|e| NocthubCliError::Any(anyhow::anyhow!("Failed to serialize output: {e}")))?;
    println!("{json}");

    Ok(())
}

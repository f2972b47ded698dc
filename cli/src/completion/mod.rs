use {
    crate::{prelude::*, Cli},
    clap::CommandFactory as _,
};

#[derive(Args, Clone, Debug)]
pub(crate) struct CompletionCommand {
    #[arg(value_enum)]
    pub(crate) shell: clap_complete::Shell,
}

pub(crate) fn handle(command: CompletionCommand) -> AnyResult<ExitCode, NocthubCliError> {
    let mut cli_command = Cli::command();
    let bin_name = std::env::args()
        .next()
        .unwrap_or(env!("CARGO_CRATE_NAME").to_string());
    clap_complete::generate(
        command.shell,
        &mut cli_command,
        bin_name,
        &mut std::io::stdout(),
    );

    Ok(ExitCode::SUCCESS)
}

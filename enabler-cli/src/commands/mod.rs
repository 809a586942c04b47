use crate::cli::{Cli, Commands, KindCommands};
use anyhow::Result;
use enabler_kind::SpinnerReporter;

pub mod stop;
pub mod version;

/// Dispatch command to appropriate handler
///
/// `spinner` is the one the logger writes around.
pub async fn dispatch(cli: Cli, spinner: SpinnerReporter) -> Result<()> {
    match cli.command {
        Commands::Kind {
            command: KindCommands::Stop(args),
        } => stop::execute(cli.kube_context, &args, spinner).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

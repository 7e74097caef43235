//! Command execution: settings, credentials, wiring, dispatch

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{resolve_token, Reporter};
use crate::cli::args::Cli;
use crate::cli::output::ConsoleReporter;
use crate::cli::CliResult;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::{CredentialSource, EnvCredentialSource};

/// Run the parsed command line against the real API.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()?;
    execute_with(
        cli,
        settings,
        &EnvCredentialSource,
        |settings, token| Ok(ServiceContainer::new(&settings, token)?),
        Arc::new(ConsoleReporter),
    )
}

/// Run with injected settings, credentials and container construction.
///
/// Arguments and the token are validated before `build` is called, so no
/// provider exists (and no request is made) when either is invalid.
#[instrument(skip_all)]
pub fn execute_with<B>(
    cli: &Cli,
    settings: Settings,
    credentials: &dyn CredentialSource,
    build: B,
    reporter: Arc<dyn Reporter>,
) -> CliResult<()>
where
    B: FnOnce(Settings, &str) -> CliResult<ServiceContainer>,
{
    debug!(?settings, "settings");
    let invocation = cli.invocation(&settings)?;
    debug!(?invocation, "invocation");

    let token = resolve_token(credentials, cli.token_var(&settings))?;
    let container = build(settings, &token)?;

    container.dispatcher(reporter).dispatch(&invocation)?;
    Ok(())
}

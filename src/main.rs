use std::process;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use docli::cli::args::Cli;
use docli::cli::commands::execute_command;
use docli::cli::output;
use docli::exitcode;
use docli::util::logging::console_layer;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, on stdout
            let code = if e.use_stderr() {
                exitcode::USAGE
            } else {
                exitcode::OK
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    setup_logging(cli.debug);
    tracing::debug!(?cli, "arguments");

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        process::exit(e.exit_code());
    }
}

fn setup_logging(debug: bool) {
    tracing_subscriber::registry()
        .with(console_layer(debug, std::io::stderr))
        .init();

    if debug {
        tracing::debug!("debug logging enabled");
    }
}

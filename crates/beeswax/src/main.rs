mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = cli.global;
    match cli.command {
        // Local commands: no endpoint needed
        Command::Config(args) => commands::config_cmd::handle(args, &global),
        Command::Credentials(args) => commands::credentials::handle(args, &global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "beeswax", &mut std::io::stdout());
            Ok(())
        }

        // API-bound commands
        Command::Call(args) => {
            let cfg = config::load(&global)?;
            let format = config::output_format(&global, &cfg)?;
            let session = config::session(&global, &cfg)?;
            commands::call::handle(args, &session, format, &global).await
        }

        Command::Login(args) => {
            let cfg = config::load(&global)?;
            let format = config::output_format(&global, &cfg)?;
            let session = config::session(&global, &cfg)?;
            let chain = config::credential_chain(&global, &cfg);
            commands::login::handle(args, &session, &chain, format, &global).await
        }
    }
}

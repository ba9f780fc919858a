//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let text = toml::to_string_pretty(&cfg).map_err(|e| CliError::Config {
                message: e.to_string(),
            })?;
            if !global.quiet {
                eprintln!("# {}", beeswax_config::config_path().display());
            }
            output::print_output(text.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(
                &beeswax_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::SetEndpoint { url } => {
            // Persist only what the file holds; flags and env stay out of it.
            let mut cfg = beeswax_config::load_config()?;
            cfg.endpoint = Some(url);
            let endpoint = cfg.normalized_endpoint()?;
            cfg.endpoint = Some(endpoint.clone());
            let path = beeswax_config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Endpoint set to {endpoint} in {}", path.display());
            }
            Ok(())
        }
    }
}

//! Parsed arguments → [`Invocation`]

use crate::cli::args::{Cli, Commands, CreateArgs, DropletCommands, ImageCommands, TargetArgs};
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::{CreateParams, DropletAction, Invocation, Selector};

impl Cli {
    /// Name of the env variable holding the token: flag, then settings.
    /// An empty `--token=` counts as unset.
    pub fn token_var<'a>(&'a self, settings: &'a Settings) -> &'a str {
        self.token
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&settings.token_var)
    }

    /// Build the invocation, filling unset options from `settings`.
    pub fn invocation(&self, settings: &Settings) -> CliResult<Invocation> {
        let invocation = match &self.command {
            Commands::Droplet { command } => match command {
                DropletCommands::Create(args) => {
                    Invocation::CreateDroplets(create_params(args, settings))
                }
                DropletCommands::List => Invocation::ListDroplets,
                DropletCommands::PowerOff(t) => droplet_action(DropletAction::PowerOff, t)?,
                DropletCommands::PowerOn(t) => droplet_action(DropletAction::PowerOn, t)?,
                DropletCommands::Reboot(t) => droplet_action(DropletAction::Reboot, t)?,
                DropletCommands::Destroy(t) => droplet_action(DropletAction::Destroy, t)?,
            },
            Commands::Image { command } => match command {
                ImageCommands::List => Invocation::ListImages,
                ImageCommands::Destroy(t) => Invocation::DestroyImages {
                    selectors: selectors(t)?,
                },
            },
        };
        Ok(invocation)
    }
}

fn create_params(args: &CreateArgs, settings: &Settings) -> CreateParams {
    let defaults = &settings.droplet;
    CreateParams {
        image: args.image.clone().unwrap_or_else(|| defaults.image.clone()),
        region: args
            .region
            .clone()
            .unwrap_or_else(|| defaults.region.clone()),
        ssh_key: args.ssh.clone().unwrap_or_else(|| defaults.ssh_key.clone()),
        size: args.size.clone().unwrap_or_else(|| defaults.size.clone()),
        count: args.num,
        name_prefix: args.name.clone(),
    }
}

fn droplet_action(action: DropletAction, args: &TargetArgs) -> CliResult<Invocation> {
    Ok(Invocation::DropletAction {
        action,
        selectors: selectors(args)?,
    })
}

fn selectors(args: &TargetArgs) -> CliResult<Vec<Selector>> {
    if args.targets.is_empty() {
        return Err(CliError::InvalidArgs("missing <name>... or <id>...".into()));
    }
    Ok(args.targets.clone())
}

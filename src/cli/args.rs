//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::domain::Selector;

/// DigitalOcean command line client
#[derive(Parser, Debug)]
#[command(name = "docli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(
    after_help = "Make sure to set env variable TOKEN (or define your own name using --token) to your API token."
)]
pub struct Cli {
    /// Print diagnostic output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Name of the env variable holding the API token [default: TOKEN]
    #[arg(long, global = true, value_name = "ENV_VAR_NAME")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage droplets
    Droplet {
        #[command(subcommand)]
        command: DropletCommands,
    },

    /// Manage private images
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum DropletCommands {
    /// Create droplets with generated names
    Create(CreateArgs),

    /// List droplets
    List,

    /// Power droplets off
    #[command(name = "power_off")]
    PowerOff(TargetArgs),

    /// Power droplets on
    #[command(name = "power_on")]
    PowerOn(TargetArgs),

    /// Reboot droplets
    Reboot(TargetArgs),

    /// Destroy droplets
    Destroy(TargetArgs),
}

#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// List private images
    List,

    /// Destroy images
    Destroy(TargetArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Image slug [default: ubuntu-16-04-x64]
    #[arg(long)]
    pub image: Option<String>,

    /// Region slug [default: ams3]
    #[arg(long)]
    pub region: Option<String>,

    /// SSH public key file [default: ~/.ssh/id_rsa.pub]
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub ssh: Option<PathBuf>,

    /// Size slug [default: 512mb]
    #[arg(long)]
    pub size: Option<String>,

    /// Number of droplets
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub num: u32,

    /// Name prefix
    #[arg(long, default_value = "")]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Names or numeric IDs, processed in order
    #[arg(required = true, num_args = 1.., value_name = "NAME|ID", value_parser = parse_selector)]
    pub targets: Vec<Selector>,
}

/// Digit-only tokens are IDs; rejected here so clap reports them with usage.
fn parse_selector(raw: &str) -> Result<Selector, String> {
    Selector::parse(raw).map_err(|e| e.to_string())
}

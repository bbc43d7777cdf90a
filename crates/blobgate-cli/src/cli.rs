use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "blobgate",
    about = "Blob-storage gateway: dual-write ingestion, retrieval, and thumbnails",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the gateway server
    Serve(ServeArgs),
    /// Print the effective configuration and exit
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Path to the TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Path to the TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_parses_config_path() {
        let cli = Cli::parse_from(["blobgate", "serve", "--config", "/etc/blobgate.toml"]);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.config.unwrap(), PathBuf::from("/etc/blobgate.toml"));
            }
            _ => panic!("expected serve subcommand"),
        }
    }
}

//! CLI argument definitions using clap
//!
//! Commands:
//! - pokedex init --config <path>
//! - pokedex serve --config <path>
//! - pokedex import --config <path> --csv <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flat-file creature record service
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty collection document
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./dex.json")]
        config: PathBuf,
    },

    /// Serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./dex.json")]
        config: PathBuf,
    },

    /// Replace the collection with records built from a CSV file
    Import {
        /// Path to configuration file
        #[arg(long, default_value = "./dex.json")]
        config: PathBuf,

        /// CSV source with Name, Type1 and Type2 columns
        #[arg(long, default_value = "./pokemons.csv")]
        csv: PathBuf,

        /// First id handed out
        #[arg(long, default_value_t = 1)]
        first_id: u64,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_defaults() {
        let cli = Cli::try_parse_from(["pokedex", "import"]).unwrap();
        match cli.command {
            Command::Import { csv, first_id, .. } => {
                assert_eq!(csv, PathBuf::from("./pokemons.csv"));
                assert_eq!(first_id, 1);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_serve_with_config() {
        let cli = Cli::try_parse_from(["pokedex", "serve", "--config", "/etc/dex.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Serve { config } if config == PathBuf::from("/etc/dex.json")
        ));
    }
}

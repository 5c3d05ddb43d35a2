//! Command-line arguments
//!
//! Every option can also come from the environment; clap gives the command
//! line precedence over the environment.

use charades_common::config::Overrides;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for charades-server
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "charades-server")]
#[command(about = "Random prompt service for charades games")]
#[command(version)]
pub struct Args {
    /// Address to bind
    #[arg(long, env = "CHARADES_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CHARADES_PORT")]
    pub port: Option<u16>,

    /// Directory with movies.json, songs.json and dialogues.json
    /// (bundled dataset when unset)
    #[arg(short, long, env = "CHARADES_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// TOML config file (defaults to the platform config directory)
    #[arg(short, long, env = "CHARADES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "CHARADES_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            data_dir: self.data_dir.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

//! Command line interface.
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tokengate", version, about = "Token authentication server")]
pub struct Cli {
    /// Configuration directory holding tokengate.toml / tokengate.json
    #[arg(short = 'c', long = "config-dir", global = true, default_value = ".")]
    pub config_dir: PathBuf,

    /// Log level: trace, debug, info, warn, error (overrides the configuration)
    #[arg(short = 'o', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Bind address, overrides the configuration
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Print this program version
    Version,
    /// Read a password from stdin and print its hash for the `users` table
    HashPassword,
    /// Print a random base64 signing key for `auth.signing_key`
    GenKey,
}

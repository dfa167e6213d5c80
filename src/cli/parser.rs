//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line client for the Kodilan job board
#[derive(Parser, Debug)]
#[command(name = "kodilan", version)]
#[command(about = "Command-line client for the Kodilan job board")]
#[command(long_about = "
Browse job posts, tags and companies on Kodilan, and manage your session.
Results are printed to stdout as JSON; logs go to stderr.

EXAMPLES:
    kodilan recent --period weekly
    kodilan posts --page 2
    kodilan related senior-rust-developer
    kodilan search q=rust location=remote
    kodilan login --email ada@example.com
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (TOML); replaces layered loading from `config/`
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Do not cache GET responses
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Latest posts
    Recent {
        /// Period filter; defaults to `client.default_period`
        #[arg(long)]
        period: Option<String>,
    },

    /// Featured posts
    Featured,

    /// Paginated list of all posts
    Posts {
        #[arg(long)]
        page: Option<u32>,
    },

    /// A single post
    Post { slug: String },

    /// Posts published by a company
    Company { slug: String },

    /// Posts filed under a tag
    Tag { slug: String },

    /// Search posts with `key=value` filters
    Search {
        #[arg(value_name = "KEY=VALUE", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// All tags
    Tags,

    /// Posts related to the given post
    Related { slug: String },

    /// Locations that have posts
    Locations,

    /// The signed-in account
    Me,

    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "KODILAN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "KODILAN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Subscribe to the newsletter
    Subscribe {
        #[arg(long)]
        email: String,
    },
}

/// Parse a `key=value` pair.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

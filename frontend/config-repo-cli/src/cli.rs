use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "config-repo", about = "Load config sources and inspect the result")]
pub struct Cli {
    #[arg(long, env = "CONFIG_REPO_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print every loaded key with thunks resolved.
    Show {
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Print one key, or the default when it is missing.
    Get {
        key: String,
        #[arg(required = true)]
        files: Vec<String>,
        /// JSON value printed when the key is missing.
        #[arg(long)]
        default: Option<String>,
    },
    Has {
        key: String,
        #[arg(required = true)]
        files: Vec<String>,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Show { .. } => "show",
            Self::Get { .. } => "get",
            Self::Has { .. } => "has",
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

use clap::{Parser, Subcommand, builder::BoolishValueParser};
use leandoc_core::control::{ControlConfig, DEFAULT_MAX_RESULTS};
use leandoc_core::search::SearchScope;
use leandoc_store::schema::{DATASET_FILE_NAME, DATASET_URL};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_TRANSPORT: &str = "stdio";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 0;

#[derive(Parser, Debug)]
#[command(name = "leandoc-mcpd", version, about = "Lean Mathlib 4 doc search MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "LEANDOC_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[arg(long, env = "LEANDOC_DATASET_FILE", default_value = DATASET_FILE_NAME)]
    dataset_file: String,

    #[arg(long, env = "LEANDOC_DATASET_URL", default_value = DATASET_URL)]
    dataset_url: String,

    #[arg(long, env = "LEANDOC_MAX_RESULTS", default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,

    #[arg(
        long,
        env = "LEANDOC_FETCH_TIMEOUT_SECS",
        default_value_t = DEFAULT_FETCH_TIMEOUT_SECS
    )]
    fetch_timeout_secs: u64,

    #[arg(long, env = "LEANDOC_TRANSPORT", default_value = DEFAULT_TRANSPORT)]
    transport: String,

    #[arg(long, env = "LEANDOC_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        short = 'v',
        env = "LEANDOC_VERBOSE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

/// What the daemon should do once configured.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the MCP server on the configured transport.
    Serve,
    /// Download the declaration dataset if it is not cached yet.
    Fetch,
    /// Search the dataset locally and print the rendered results.
    Search {
        #[arg(required = true)]
        queries: Vec<String>,

        #[arg(long, default_value_t = SearchScope::Declarations)]
        scope: SearchScope,

        #[arg(long)]
        limit: Option<usize>,
    },
}

/// MCP transport the `serve` command binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http,
}

impl FromStr for Transport {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stdio" => Ok(Self::Stdio),
            "http" | "streamable-http" => Ok(Self::Http),
            _ => Err(ConfigError::InvalidSetting {
                name: "LEANDOC_TRANSPORT",
                value: value.to_string(),
            }),
        }
    }
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct LeanDocConfig {
    pub dataset_path: PathBuf,
    pub dataset_url: String,
    pub max_results: usize,
    pub fetch_timeout: Option<Duration>,
    pub transport: Transport,
    pub mcp_http_addr: SocketAddr,
    pub verbose: bool,
    pub command: Command,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl LeanDocConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    /// Settings handed to the control plane.
    pub fn control_config(&self) -> ControlConfig {
        ControlConfig::new(&self.dataset_path)
            .with_dataset_url(&self.dataset_url)
            .with_fetch_timeout(self.fetch_timeout)
            .with_max_results(self.max_results)
    }
}

impl TryFrom<CliArgs> for LeanDocConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let dataset_url = args.dataset_url.trim().to_string();
        if dataset_url.is_empty() {
            return Err(ConfigError::MissingSetting("LEANDOC_DATASET_URL"));
        }

        let dataset_file = args.dataset_file.trim();
        if dataset_file.is_empty() || dataset_file.contains(['/', '\\']) {
            return Err(ConfigError::InvalidSetting {
                name: "LEANDOC_DATASET_FILE",
                value: args.dataset_file,
            });
        }

        if args.max_results == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "LEANDOC_MAX_RESULTS",
                value: args.max_results.to_string(),
            });
        }

        let fetch_timeout = if args.fetch_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(args.fetch_timeout_secs))
        };

        Ok(Self {
            dataset_path: args.data_dir.join(dataset_file),
            dataset_url,
            max_results: args.max_results,
            fetch_timeout,
            transport: args.transport.parse()?,
            mcp_http_addr: args.mcp_http_addr,
            verbose: args.verbose,
            command: args.command.unwrap_or(Command::Serve),
        })
    }
}

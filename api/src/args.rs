use std::time::Duration;

use carbonplate_core::domain::common::{CarbonplateConfig, LLMConfig, LLMProviderKind};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "carbonplate-api", version, about = "Dish carbon footprint estimation API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LLMArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/carbon`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "metrics-enabled", env = "METRICS_ENABLED", default_value_t = true, action = clap::ArgAction::Set)]
    pub metrics_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LLMProviderArg {
    Gemini,
    Offline,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LLMArgs {
    #[arg(long = "llm-provider", env = "LLM_PROVIDER", value_enum, default_value_t = LLMProviderArg::Offline)]
    pub provider: LLMProviderArg,

    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// Used when `RUST_LOG` is not set.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for CarbonplateConfig {
    fn from(args: Args) -> Self {
        CarbonplateConfig {
            llm: LLMConfig {
                provider: match args.llm.provider {
                    LLMProviderArg::Gemini => LLMProviderKind::Gemini,
                    LLMProviderArg::Offline => LLMProviderKind::Offline,
                },
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                timeout: Duration::from_secs(args.llm.timeout_secs),
            },
        }
    }
}

use clap::{ArgAction, Parser, ValueEnum, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use usgs_water_core::client::parse_base_url;
use usgs_water_core::endpoints::{FLOOD_IMPACTS_BASE_URL, OGC_BASE_URL, WATER_SERVICES_BASE_URL};
use usgs_water_core::{BaseUrls, ClientConfig, Url};
use usgs_water_mcp::server::{DEFAULT_MCP_PATH, HttpTransportConfig, normalize_mcp_path};

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 15;
const DEFAULT_USER_AGENT: &str = concat!("usgs-water-mcp/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "usgs-water-mcpd", version, about = "USGS water MCP daemon.")]
#[allow(clippy::struct_excessive_bools)]
struct CliArgs {
    #[arg(
        long = "stdio",
        env = "USGS_ENABLE_STDIO",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "USGS_MCP_SERVE",
        default_value_t = false,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "USGS_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(long, env = "USGS_MCP_HTTP_PATH", default_value = DEFAULT_MCP_PATH)]
    mcp_http_path: String,

    #[arg(
        long,
        env = "USGS_MCP_STATELESS",
        default_value_t = false,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    mcp_stateless: bool,

    #[arg(
        long,
        env = "USGS_MCP_SSE_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_SSE_KEEP_ALIVE_SECS
    )]
    sse_keep_alive_secs: u64,

    #[arg(long, env = "USGS_WATER_SERVICES_URL", default_value = WATER_SERVICES_BASE_URL)]
    water_services_url: String,

    #[arg(long, env = "USGS_RTFI_URL", default_value = FLOOD_IMPACTS_BASE_URL)]
    rtfi_url: String,

    #[arg(long, env = "USGS_OGC_URL", default_value = OGC_BASE_URL)]
    ogc_url: String,

    #[arg(
        long,
        env = "USGS_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_HTTP_TIMEOUT_SECS
    )]
    http_timeout_secs: u64,

    #[arg(long, env = "USGS_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    #[arg(long, env = "USGS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct UsgsConfig {
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub mcp_http_path: String,
    pub mcp_stateless: bool,
    pub sse_keep_alive: Option<Duration>,
    pub bases: BaseUrls,
    pub http_timeout: Duration,
    pub user_agent: String,
    pub log_format: LogFormat,
}

#[derive(Debug)]
pub enum ConfigError {
    NoTransport,
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTransport => write!(
                f,
                "no transport enabled: set USGS_ENABLE_STDIO or USGS_MCP_SERVE"
            ),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl UsgsConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.bases.clone())
            .with_timeout(self.http_timeout)
            .with_user_agent(self.user_agent.clone())
    }

    pub fn http_server_config(&self) -> HttpTransportConfig {
        HttpTransportConfig::new(self.mcp_http_addr)
            .with_mcp_path(self.mcp_http_path.clone())
            .with_stateful_mode(!self.mcp_stateless)
            .with_sse_keep_alive(self.sse_keep_alive)
    }
}

fn base_setting(name: &'static str, value: String) -> Result<Url, ConfigError> {
    parse_base_url(&value).map_err(|_| ConfigError::InvalidSetting { name, value })
}

impl TryFrom<CliArgs> for UsgsConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::NoTransport);
        }

        if args.http_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "USGS_HTTP_TIMEOUT_SECS",
                value: args.http_timeout_secs.to_string(),
            });
        }

        let user_agent = args.user_agent.trim().to_string();
        if user_agent.is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "USGS_USER_AGENT",
                value: args.user_agent,
            });
        }

        let bases = BaseUrls {
            water_services: base_setting("USGS_WATER_SERVICES_URL", args.water_services_url)?,
            flood_impacts: base_setting("USGS_RTFI_URL", args.rtfi_url)?,
            ogc: base_setting("USGS_OGC_URL", args.ogc_url)?,
        };

        let mcp_http_path = normalize_mcp_path(&args.mcp_http_path).ok_or_else(|| {
            ConfigError::InvalidSetting {
                name: "USGS_MCP_HTTP_PATH",
                value: args.mcp_http_path.clone(),
            }
        })?;

        let sse_keep_alive = if args.sse_keep_alive_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(args.sse_keep_alive_secs))
        };

        Ok(Self {
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
            mcp_http_path,
            mcp_stateless: args.mcp_stateless,
            sse_keep_alive,
            bases,
            http_timeout: Duration::from_secs(args.http_timeout_secs),
            user_agent,
            log_format: args.log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            enable_stdio: true,
            mcp_serve: false,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            mcp_http_path: DEFAULT_MCP_PATH.to_string(),
            mcp_stateless: false,
            sse_keep_alive_secs: DEFAULT_SSE_KEEP_ALIVE_SECS,
            water_services_url: WATER_SERVICES_BASE_URL.to_string(),
            rtfi_url: FLOOD_IMPACTS_BASE_URL.to_string(),
            ogc_url: OGC_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_format: LogFormat::Compact,
        }
    }

    #[test]
    fn defaults_point_at_public_usgs_apis() {
        let config = UsgsConfig::try_from(base_args()).expect("config should parse");

        assert_eq!(config.bases, BaseUrls::default());
        assert!(config.enable_stdio);
        assert!(!config.mcp_serve);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn requires_a_transport() {
        let mut args = base_args();
        args.enable_stdio = false;
        args.mcp_serve = false;

        let err = UsgsConfig::try_from(args).expect_err("no transport");
        assert!(matches!(err, ConfigError::NoTransport));
    }

    #[test]
    fn rejects_non_http_base_urls() {
        let mut args = base_args();
        args.ogc_url = "file:///tmp/ogc".to_string();

        let err = UsgsConfig::try_from(args).expect_err("file URL");
        assert!(matches!(
            err,
            ConfigError::InvalidSetting { name: "USGS_OGC_URL", .. }
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut args = base_args();
        args.http_timeout_secs = 0;
        assert!(UsgsConfig::try_from(args).is_err());
    }

    #[test]
    fn zero_keep_alive_disables_sse_pings() {
        let mut args = base_args();
        args.sse_keep_alive_secs = 0;
        args.mcp_stateless = true;

        let config = UsgsConfig::try_from(args).expect("config should parse");
        let http = config.http_server_config();
        assert!(http.sse_keep_alive.is_none());
        assert!(!http.stateful_mode);
    }

    #[test]
    fn mcp_path_is_normalized_and_checked() {
        let mut args = base_args();
        args.mcp_http_path = "usgs/".to_string();
        let config = UsgsConfig::try_from(args).expect("config should parse");
        assert_eq!(config.http_server_config().mcp_path, "/usgs");

        let mut args = base_args();
        args.mcp_http_path = "/health".to_string();
        let err = UsgsConfig::try_from(args).expect_err("health is reserved");
        assert!(matches!(
            err,
            ConfigError::InvalidSetting { name: "USGS_MCP_HTTP_PATH", .. }
        ));
    }

    #[test]
    fn flags_take_explicit_values() {
        let args = CliArgs::try_parse_from([
            "usgs-water-mcpd",
            "--stdio",
            "false",
            "--mcp-serve",
            "yes",
        ])
        .expect("flags should parse");

        let config = UsgsConfig::try_from(args).expect("config should parse");
        assert!(!config.enable_stdio);
        assert!(config.mcp_serve);
    }
}

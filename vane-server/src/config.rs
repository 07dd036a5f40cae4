use std::net::SocketAddr;
use std::time::Duration;

use chrono_tz::Tz;
use vane::CurrencyCode;

/// Log output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Server settings; every flag can also come from the environment.
#[derive(Debug, Clone, clap::Parser)]
#[command(author, version, about = "Quote, weather, and currency proxy with source fallback")]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "VANE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "VANE_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Per-call upstream budget in milliseconds, applied to every connector.
    #[arg(long, env = "VANE_PROVIDER_TIMEOUT_MS")]
    pub provider_timeout_ms: Option<u64>,

    /// Log output style.
    #[arg(long, env = "VANE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// IANA timezone used for the `time` field of quote responses.
    #[arg(long, env = "VANE_TIMEZONE", default_value = "Asia/Shanghai", value_parser = parse_timezone)]
    pub timezone: Tz,

    /// Base currency when `/currency` is called without `base`.
    #[arg(long, env = "VANE_DEFAULT_CURRENCY", default_value = "CNY", value_parser = parse_currency)]
    pub default_currency: CurrencyCode,
}

fn parse_timezone(s: &str) -> Result<Tz, String> {
    s.parse::<Tz>().map_err(|_| format!("unknown timezone '{s}'"))
}

fn parse_currency(s: &str) -> Result<CurrencyCode, String> {
    CurrencyCode::parse(s).map_err(|e| e.to_string())
}

impl ServerConfig {
    /// Socket address from `host` and `port`.
    ///
    /// # Errors
    /// Returns the parse error when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Provider timeout override, if one was configured.
    #[must_use]
    pub fn provider_timeout(&self) -> Option<Duration> {
        self.provider_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

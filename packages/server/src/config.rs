//! Command-line and environment configuration.

use clap::Parser;

/// Relay configuration. Every flag can also be given as an environment variable.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "kyoyu-server",
    version,
    about = "Room relay for the Kyoyu collaborative code editor"
)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Origins allowed by CORS (comma-separated)
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Log level for the relay crate (overridden by RUST_LOG)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_explicit_flags() {
        // テスト項目: フラグで指定した値が設定に反映される
        // when (操作):
        let config = ServerConfig::try_parse_from([
            "kyoyu-server",
            "--host",
            "127.0.0.1",
            "--port",
            "6001",
            "--allowed-origins",
            "http://a.example,http://b.example",
            "--log-level",
            "debug",
        ])
        .unwrap();

        // then (期待する結果):
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 6001);
        assert_eq!(
            config.allowed_origins,
            vec!["http://a.example", "http://b.example"]
        );
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_parse_rejects_invalid_port() {
        // テスト項目: 数値でないポートはエラーになる
        let result = ServerConfig::try_parse_from(["kyoyu-server", "--port", "http"]);
        assert!(result.is_err());
    }
}

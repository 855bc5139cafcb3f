use std::time::Duration;

use clap::Parser;

use crate::daemon_config::ConfigOverrides;

pub const DEFAULT_ADDR: &str = "127.0.0.1:50061";

/// Catalog daemon - paged item catalog with a curated, ordered selection
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address to bind the server to
    #[arg(short, long, env = "CATALOG_DAEMON_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Comma-separated list of allowed CORS origins.
    /// Use "*" to allow all origins (not recommended for production).
    #[arg(
        long,
        env = "CATALOG_CORS_ORIGINS",
        default_value = crate::cors::DEFAULT_CORS_ORIGINS,
        value_delimiter = ','
    )]
    pub cors_origins: Vec<String>,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "CATALOG_LOG_JSON", default_value = "false")]
    pub log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "CATALOG_LOG_ROTATION", default_value = "daily")]
    pub log_rotation: String,

    /// Custom log directory (default: ~/.catalog-daemon/logs)
    #[arg(long, env = "CATALOG_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Config file (default: ~/.catalog-daemon/config.toml, optional)
    #[arg(long, env = "CATALOG_CONFIG")]
    pub config: Option<String>,

    /// Number of items seeded into the catalog at startup
    #[arg(long, env = "CATALOG_SEED_SIZE")]
    pub seed_size: Option<usize>,

    /// Flush period of the add queue, e.g. "10s"
    #[arg(long, env = "CATALOG_ADD_INTERVAL", value_parser = humantime::parse_duration)]
    pub add_interval: Option<Duration>,

    /// Flush period of the get queue, e.g. "1s"
    #[arg(long, env = "CATALOG_GET_INTERVAL", value_parser = humantime::parse_duration)]
    pub get_interval: Option<Duration>,

    /// Flush period of the update queue, e.g. "1s"
    #[arg(long, env = "CATALOG_UPDATE_INTERVAL", value_parser = humantime::parse_duration)]
    pub update_interval: Option<Duration>,

    /// Maximum distinct pending requests per queue; 0 disables the bound
    #[arg(long, env = "CATALOG_MAX_PENDING")]
    pub max_pending: Option<usize>,
}

impl Args {
    /// Command-line values that take precedence over the config file.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            seed_size: self.seed_size,
            add_interval: self.add_interval,
            get_interval: self.get_interval,
            update_interval: self.update_interval,
            max_pending: self.max_pending,
        }
    }
}

pub fn report_server_error(
    addr: std::net::SocketAddr,
    log_file: &std::path::Path,
    e: &tonic::transport::Error,
) {
    let err_string = format!("{e:?}");
    if err_string.contains("AddrInUse") {
        eprintln!();
        eprintln!("Error: Failed to start server - address {addr} is already in use");
        eprintln!();
        eprintln!("Another instance of catalog-daemon may already be running.");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  1. Stop the existing process:   pkill catalog-daemon");
        eprintln!("  2. Use a different port:        catalog-daemon --addr 127.0.0.1:50062");
        eprintln!("  3. Check what's using the port: lsof -i :{}", addr.port());
        eprintln!();
    }
    eprintln!("Error: Failed to start server: {e}");
    eprintln!();
    eprintln!("Logs: {}", log_file.display());
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["catalog-daemon"]);
        assert_eq!(args.addr, DEFAULT_ADDR);
        assert!(!args.log_json);
        assert_eq!(args.overrides(), ConfigOverrides::default());
    }

    #[test]
    fn test_interval_flags_parse_humantime() {
        let args = Args::parse_from([
            "catalog-daemon",
            "--add-interval",
            "2s",
            "--get-interval",
            "150ms",
            "--seed-size",
            "100",
        ]);
        let overrides = args.overrides();
        assert_eq!(overrides.add_interval, Some(Duration::from_secs(2)));
        assert_eq!(overrides.get_interval, Some(Duration::from_millis(150)));
        assert_eq!(overrides.seed_size, Some(100));
        assert_eq!(overrides.update_interval, None);
    }

    #[test]
    fn test_cors_origins_split_on_commas() {
        let args = Args::parse_from(["catalog-daemon", "--cors-origins", "http://a,http://b"]);
        assert_eq!(args.cors_origins, vec!["http://a", "http://b"]);
    }
}

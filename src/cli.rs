//! Command line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ProxyConfig;

const CONF_HELP: &str = r#"Location of the configuration file (JSON, or TOML with a .toml extension).
Example configuration:
{
    "ProxyRules": [
        {
            "RequestPathRegex": "^/services/SimpleStockQuoteService",
            "ForwardTo": "http://localhost:9000"
        },
        {
            "RequestPathRegex": "^/services/FastStockQuoteService",
            "ForwardTo": "http://localhost:9001"
        }
    ]
}"#;

#[derive(Debug, Parser)]
#[command(name = "rule-proxy", version)]
#[command(about = "Rule-based HTTP reverse proxy", long_about = None)]
pub struct Cli {
    /// Reverse proxy host [default: localhost]
    #[arg(long)]
    pub host: Option<String>,

    /// Reverse proxy port [default: 8080]
    #[arg(long)]
    pub port: Option<u16>,

    /// Location of the configuration file
    #[arg(long, long_help = CONF_HELP)]
    pub conf: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Command line values take precedence over the configuration file.
    pub fn apply(&self, config: &mut ProxyConfig) {
        if let Some(host) = &self.host {
            config.listener.host = host.clone();
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
    }
}

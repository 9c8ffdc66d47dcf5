use crate::dns_protocol::DnsProtocol;
use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upstream servers the forwarder tries, in order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl UpstreamConfig {
    pub fn protocols(&self) -> Result<Vec<DnsProtocol>, DomainError> {
        self.servers.iter().map(|s| s.parse()).collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_servers() -> Vec<String> {
    vec!["udp://8.8.8.8:53".to_string(), "udp://1.1.1.1:53".to_string()]
}

fn default_timeout_ms() -> u64 {
    2000
}

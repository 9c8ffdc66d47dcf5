//! no6 Domain Layer
pub mod config;
pub mod dns_protocol;
pub mod errors;
pub mod filter_rule;
pub mod filter_set;
mod suffix_trie;

pub use config::{CliOverrides, Config, ConfigError, FilterConfig, LogFormat, LoggingConfig};
pub use dns_protocol::{DnsProtocol, UpstreamAddr};
pub use errors::DomainError;
pub use filter_rule::FilterRule;
pub use filter_set::{FilterSet, FilterSetBuilder};

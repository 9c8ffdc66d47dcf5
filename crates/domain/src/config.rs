mod errors;
mod filter;
mod logging;
mod root;
mod server;
mod upstream;

pub use errors::ConfigError;
pub use filter::FilterConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

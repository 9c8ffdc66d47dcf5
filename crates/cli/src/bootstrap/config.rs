use anyhow::Context;
use no6_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Prints a short summary of a validated configuration for `--check-config`.
pub fn print_summary(config: &Config, rules: usize) {
    info!(
        listen = %config.server.listen_addr(),
        upstreams = ?config.upstream.servers,
        timeout_ms = config.upstream.timeout_ms,
        rules,
        "Configuration OK"
    );
}

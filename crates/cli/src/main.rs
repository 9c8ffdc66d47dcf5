use clap::Parser;
use no6_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "no6")]
#[command(version)]
#[command(about = "DNS forwarder that strips AAAA answers for selected domains")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'p', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream server (udp://IP:PORT, tcp://IP:PORT or IP:PORT); repeatable
    #[arg(short = 'u', long = "upstream", value_name = "ADDR")]
    upstreams: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Validate the configuration and filter rules, then exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        upstreams: cli.upstreams.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting no6 v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;

    if cli.check_config {
        bootstrap::print_summary(&config, dns_services.filters.len());
        return Ok(());
    }

    let dns_addr = config.server.listen_addr();

    tokio::select! {
        result = server::start_dns_server(dns_addr, dns_services.handler) => {
            if let Err(e) = &result {
                error!(error = %e, "DNS server error");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

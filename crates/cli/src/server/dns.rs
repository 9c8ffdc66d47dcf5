use no6_application::ports::DnsHandler;
use no6_infrastructure::dns::DnsServer;
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinSet;
use tracing::{error, info};

/// Binds UDP and TCP on `bind_addr` and serves until a listener fails.
pub async fn start_dns_server(
    bind_addr: String,
    handler: Arc<dyn DnsHandler>,
) -> anyhow::Result<()> {
    let udp_socket = UdpSocket::bind(&bind_addr).await?;
    let tcp_listener = TcpListener::bind(&bind_addr).await?;

    info!(bind_address = %bind_addr, "Starting DNS server");

    let server = Arc::new(DnsServer::new(handler));
    let mut join_set: JoinSet<()> = JoinSet::new();

    let udp_server = server.clone();
    join_set.spawn(async move {
        if let Err(e) = udp_server.serve_udp(udp_socket).await {
            error!(error = %e, "UDP DNS listener error");
        }
    });

    join_set.spawn(async move {
        if let Err(e) = server.serve_tcp(tcp_listener).await {
            error!(error = %e, "TCP DNS listener error");
        }
    });

    join_set.join_next().await;
    anyhow::bail!("DNS listener stopped")
}

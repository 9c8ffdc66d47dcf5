use crate::errors::DomainError;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

/// Upstream address. Only literal socket addresses are accepted; resolving
/// upstream hostnames would need a resolver in front of the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpstreamAddr(pub SocketAddr);

impl UpstreamAddr {
    pub fn socket_addr(&self) -> SocketAddr {
        self.0
    }
}

impl fmt::Display for UpstreamAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnsProtocol {
    Udp { addr: UpstreamAddr },
    Tcp { addr: UpstreamAddr },
}

impl DnsProtocol {
    pub fn socket_addr(&self) -> SocketAddr {
        match self {
            DnsProtocol::Udp { addr } | DnsProtocol::Tcp { addr } => addr.socket_addr(),
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            DnsProtocol::Udp { .. } => "UDP",
            DnsProtocol::Tcp { .. } => "TCP",
        }
    }

    /// Same server, reached over TCP. Used to retry truncated UDP answers.
    pub fn as_tcp(&self) -> Self {
        DnsProtocol::Tcp {
            addr: UpstreamAddr(self.socket_addr()),
        }
    }
}

fn parse_upstream_addr(addr_str: &str) -> Option<UpstreamAddr> {
    addr_str.parse::<SocketAddr>().ok().map(UpstreamAddr)
}

impl FromStr for DnsProtocol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(addr_str) = s.strip_prefix("udp://") {
            let addr = parse_upstream_addr(addr_str).ok_or_else(|| {
                DomainError::InvalidUpstream(format!("Invalid UDP address '{}'", addr_str))
            })?;
            return Ok(DnsProtocol::Udp { addr });
        }
        if let Some(addr_str) = s.strip_prefix("tcp://") {
            let addr = parse_upstream_addr(addr_str).ok_or_else(|| {
                DomainError::InvalidUpstream(format!("Invalid TCP address '{}'", addr_str))
            })?;
            return Ok(DnsProtocol::Tcp { addr });
        }
        if let Some(addr) = parse_upstream_addr(s) {
            return Ok(DnsProtocol::Udp { addr });
        }
        Err(DomainError::InvalidUpstream(format!(
            "Invalid DNS endpoint format: '{}'. Expected: udp://IP:PORT, tcp://IP:PORT, or IP:PORT",
            s
        )))
    }
}

impl fmt::Display for DnsProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DnsProtocol::Udp { addr } => write!(f, "udp://{}", addr),
            DnsProtocol::Tcp { addr } => write!(f, "tcp://{}", addr),
        }
    }
}

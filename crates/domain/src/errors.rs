use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid filter rule {0:?}: not a valid domain or domain suffix")]
    InvalidFilterRule(String),

    #[error("No answer received")]
    NoAnswerReceived,

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Invalid upstream: {0}")]
    InvalidUpstream(String),

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("All upstream servers failed")]
    AllUpstreamsFailed,

    #[error("Failed to write response: {0}")]
    ResponseWrite(String),
}

use async_trait::async_trait;
use hickory_proto::op::{Message, ResponseCode};
use no6_domain::DomainError;

/// Sink a handler writes its final response into.
#[async_trait]
pub trait ResponseWriter: Send {
    async fn write_message(&mut self, message: Message) -> Result<(), DomainError>;
}

/// Failure reported by a handler, paired with the response code the client
/// should see.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error} (rcode {rcode:?})")]
pub struct HandlerError {
    pub rcode: ResponseCode,
    #[source]
    pub error: DomainError,
}

impl HandlerError {
    pub fn new(rcode: ResponseCode, error: DomainError) -> Self {
        Self { rcode, error }
    }

    pub fn server_failure(error: DomainError) -> Self {
        Self::new(ResponseCode::ServFail, error)
    }
}

pub type HandlerResult = Result<ResponseCode, HandlerError>;

/// One link of the request handling chain.
///
/// A handler either writes a response through `writer` and returns its
/// response code, or returns a [`HandlerError`]. Decorators hold the next
/// handler and delegate to it.
#[async_trait]
pub trait DnsHandler: Send + Sync {
    async fn serve_dns(&self, request: &Message, writer: &mut dyn ResponseWriter)
        -> HandlerResult;

    fn name(&self) -> &'static str;
}

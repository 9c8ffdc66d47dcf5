use crate::dns::codec::MessageCodec;
use crate::dns::transport::{create_transport, TransportResponse};
use async_trait::async_trait;
use hickory_proto::op::Message;
use no6_application::ports::{DnsHandler, HandlerError, HandlerResult, ResponseWriter};
use no6_domain::{DnsProtocol, DomainError};
use std::time::Duration;
use tracing::{debug, warn};

/// Terminal handler that relays each request to the configured upstream
/// servers, trying them in order until one answers.
pub struct ForwardingHandler {
    upstreams: Vec<DnsProtocol>,
    timeout: Duration,
}

impl ForwardingHandler {
    pub fn new(upstreams: Vec<DnsProtocol>, timeout: Duration) -> Self {
        Self { upstreams, timeout }
    }

    pub fn upstreams(&self) -> &[DnsProtocol] {
        &self.upstreams
    }

    /// Sends `request` upstream and returns the first usable answer.
    pub async fn forward(&self, request: &Message) -> Result<Message, DomainError> {
        let request_bytes = MessageCodec::encode(request)?;

        for upstream in &self.upstreams {
            match self.query_upstream(upstream, request, &request_bytes).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(
                        id = request.id(),
                        server = %upstream,
                        error = %e,
                        "Upstream query failed, trying next server"
                    );
                }
            }
        }

        Err(DomainError::AllUpstreamsFailed)
    }

    async fn query_upstream(
        &self,
        upstream: &DnsProtocol,
        request: &Message,
        request_bytes: &[u8],
    ) -> Result<Message, DomainError> {
        let response = self.exchange(upstream, request, request_bytes).await?;

        if !response.truncated() || matches!(upstream, DnsProtocol::Tcp { .. }) {
            return Ok(response);
        }

        debug!(
            id = request.id(),
            server = %upstream,
            "Truncated UDP response, retrying over TCP"
        );

        match self.exchange(&upstream.as_tcp(), request, request_bytes).await {
            Ok(full) => Ok(full),
            Err(e) => {
                // The truncated answer is still a valid answer.
                debug!(id = request.id(), error = %e, "TCP retry failed, using truncated response");
                Ok(response)
            }
        }
    }

    async fn exchange(
        &self,
        upstream: &DnsProtocol,
        request: &Message,
        request_bytes: &[u8],
    ) -> Result<Message, DomainError> {
        let transport = create_transport(upstream);
        let TransportResponse {
            bytes,
            protocol_used,
        } = transport.send(request_bytes, self.timeout).await?;

        let response = MessageCodec::decode(&bytes)?;

        if response.id() != request.id() {
            return Err(DomainError::InvalidDnsMessage(format!(
                "Response id {} does not match request id {}",
                response.id(),
                request.id()
            )));
        }

        debug!(
            id = request.id(),
            server = %upstream,
            protocol = protocol_used,
            rcode = ?response.response_code(),
            answers = response.answers().len(),
            "Upstream answered"
        );

        Ok(response)
    }
}

#[async_trait]
impl DnsHandler for ForwardingHandler {
    async fn serve_dns(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> HandlerResult {
        let response = self
            .forward(request)
            .await
            .map_err(HandlerError::server_failure)?;

        let rcode = response.response_code();
        writer
            .write_message(response)
            .await
            .map_err(|e| HandlerError::new(rcode, e))?;

        Ok(rcode)
    }

    fn name(&self) -> &'static str {
        "forward"
    }
}

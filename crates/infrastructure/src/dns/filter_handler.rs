use super::capture::CaptureWriter;
use async_trait::async_trait;
use hickory_proto::op::{Message, ResponseCode};
use no6_application::ports::{DnsHandler, HandlerError, HandlerResult, ResponseWriter};
use no6_application::use_cases::FilterResponseUseCase;
use no6_domain::{DomainError, FilterSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Decorator that strips AAAA answers for configured names from whatever
/// the next handler responds with.
pub struct No6Handler {
    next: Arc<dyn DnsHandler>,
    use_case: FilterResponseUseCase,
}

impl No6Handler {
    pub fn new(next: Arc<dyn DnsHandler>, filters: Arc<FilterSet>) -> Self {
        Self {
            next,
            use_case: FilterResponseUseCase::new(filters),
        }
    }
}

#[async_trait]
impl DnsHandler for No6Handler {
    async fn serve_dns(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> HandlerResult {
        let mut capture = CaptureWriter::new();

        let rcode = match self.next.serve_dns(request, &mut capture).await {
            Ok(rcode) => rcode,
            Err(e) => {
                // Partial answers from a failed handler go out untouched.
                if let Some(partial) = capture.into_message() {
                    if let Err(write_err) = writer.write_message(partial).await {
                        warn!(id = request.id(), error = %write_err, "Failed to write partial response");
                    }
                }
                return Err(e);
            }
        };

        let Some(mut response) = capture.into_message() else {
            warn!(
                id = request.id(),
                next = self.next.name(),
                "Next handler reported success without an answer"
            );
            return Err(HandlerError::server_failure(DomainError::NoAnswerReceived));
        };

        if rcode == ResponseCode::NoError {
            self.use_case.execute(&mut response);
        } else {
            debug!(id = request.id(), rcode = ?rcode, "Passing through non-NOERROR response");
        }

        writer
            .write_message(response)
            .await
            .map_err(|e| HandlerError::new(rcode, e))?;

        Ok(rcode)
    }

    fn name(&self) -> &'static str {
        "no6"
    }
}

use super::builders::reply;
use async_trait::async_trait;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::Record;
use no6_application::ports::{DnsHandler, HandlerError, HandlerResult, ResponseWriter};
use no6_domain::DomainError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the mock does with the next request.
#[derive(Clone)]
pub enum MockBehavior {
    /// Reply with these answers and the given response code.
    Answer(Vec<Record>, ResponseCode),
    /// Write these answers, then report a failure.
    FailAfterWrite(Vec<Record>),
    /// Report a failure without writing anything.
    Fail,
    /// Report success without writing anything.
    SilentSuccess,
}

pub struct MockNextHandler {
    behavior: Mutex<MockBehavior>,
    calls: AtomicUsize,
}

impl MockNextHandler {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn answering(answers: Vec<Record>) -> Self {
        Self::new(MockBehavior::Answer(answers, ResponseCode::NoError))
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn upstream_error() -> HandlerError {
        HandlerError::server_failure(DomainError::TransportTimeout {
            server: "192.0.2.1:53".to_string(),
        })
    }
}

#[async_trait]
impl DnsHandler for MockNextHandler {
    async fn serve_dns(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> HandlerResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.lock().unwrap().clone();

        match behavior {
            MockBehavior::Answer(answers, rcode) => {
                let mut response = reply(request, answers);
                response.set_response_code(rcode);
                writer
                    .write_message(response)
                    .await
                    .map_err(HandlerError::server_failure)?;
                Ok(rcode)
            }
            MockBehavior::FailAfterWrite(answers) => {
                writer
                    .write_message(reply(request, answers))
                    .await
                    .map_err(HandlerError::server_failure)?;
                Err(Self::upstream_error())
            }
            MockBehavior::Fail => Err(Self::upstream_error()),
            MockBehavior::SilentSuccess => Ok(ResponseCode::NoError),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

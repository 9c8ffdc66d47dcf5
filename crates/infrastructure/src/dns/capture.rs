use async_trait::async_trait;
use hickory_proto::op::Message;
use no6_application::ports::ResponseWriter;
use no6_domain::DomainError;

/// Writer that keeps the message instead of sending it, so a decorator can
/// inspect what the next handler answered before the real write.
#[derive(Debug, Default)]
pub struct CaptureWriter {
    message: Option<Message>,
}

impl CaptureWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn into_message(self) -> Option<Message> {
        self.message
    }
}

#[async_trait]
impl ResponseWriter for CaptureWriter {
    async fn write_message(&mut self, message: Message) -> Result<(), DomainError> {
        self.message = Some(message);
        Ok(())
    }
}

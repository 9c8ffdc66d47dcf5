use crate::services::answer_filter::{filter_answers, AnswerFilterOutcome};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RecordType;
use no6_domain::FilterSet;
use std::sync::Arc;
use tracing::debug;

/// Applies the AAAA suppression policy to one response message.
///
/// Only the answer section of a NOERROR response is edited; questions,
/// authority and additional sections are left as they are.
pub struct FilterResponseUseCase {
    filters: Arc<FilterSet>,
}

impl FilterResponseUseCase {
    pub fn new(filters: Arc<FilterSet>) -> Self {
        Self { filters }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn execute(&self, message: &mut Message) -> AnswerFilterOutcome {
        if message.response_code() != ResponseCode::NoError {
            return AnswerFilterOutcome::default();
        }

        let question_aaaa = message
            .queries()
            .iter()
            .any(|q| q.query_type() == RecordType::AAAA);

        let mut answers = message.take_answers();
        let outcome = filter_answers(question_aaaa, &mut answers, &self.filters);
        message.insert_answers(answers);

        if outcome.removed > 0 {
            debug!(
                id = message.id(),
                removed = outcome.removed,
                remaining = message.answers().len(),
                question_aaaa,
                "Suppressed AAAA records"
            );
        }

        outcome
    }
}

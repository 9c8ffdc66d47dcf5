pub mod answer_filter;

pub use answer_filter::{filter_answers, owner_name, remove_indices, AnswerFilterOutcome};

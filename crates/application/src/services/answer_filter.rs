//! Dual-stack aware AAAA removal.
//!
//! AAAA records whose owner matches the filter set are dropped from an answer
//! section, but only when that still leaves the client something usable:
//! either the question asked for AAAA explicitly, or the answer also carries
//! A records.

use hickory_proto::rr::{Record, RecordType};
use no6_domain::FilterSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerFilterOutcome {
    /// Number of records removed from the answer section.
    pub removed: usize,
    /// At least one A record was present.
    pub v4_seen: bool,
    /// At least one AAAA record was present.
    pub v6_seen: bool,
    /// The dual-stack gate allowed removal.
    pub gated: bool,
}

/// Filters `answers` in place and reports what happened.
pub fn filter_answers(
    question_aaaa: bool,
    answers: &mut Vec<Record>,
    filters: &FilterSet,
) -> AnswerFilterOutcome {
    let mut v4_seen = false;
    let mut v6_seen = false;
    let mut remove = Vec::new();

    for (idx, record) in answers.iter().enumerate() {
        match record.record_type() {
            RecordType::AAAA => {
                v6_seen = true;
                if filters.matches(&owner_name(record)) {
                    remove.push(idx);
                }
            }
            RecordType::A => v4_seen = true,
            _ => {}
        }
    }

    let gated = question_aaaa || (v4_seen && v6_seen);
    let mut outcome = AnswerFilterOutcome {
        removed: 0,
        v4_seen,
        v6_seen,
        gated,
    };

    if !gated || remove.is_empty() {
        return outcome;
    }

    if remove.len() == answers.len() {
        answers.clear();
    } else {
        remove_indices(answers, &remove);
    }
    outcome.removed = remove.len();
    outcome
}

/// Owner name in the form rules are written in: ASCII wire form, lowercase,
/// no trailing root dot.
pub fn owner_name(record: &Record) -> String {
    // IDN labels stay in their xn-- form, which is what rules are written in.
    let mut name = record.name().to_ascii();
    if name.ends_with('.') {
        name.pop();
    }
    name.make_ascii_lowercase();
    name
}

/// Removes the elements at `indices` (ascending) in a single pass. Survivors
/// keep their relative order. Out-of-range and repeated indices are ignored.
pub fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) {
    debug_assert!(indices.windows(2).all(|w| w[0] <= w[1]));

    let mut pending = indices.iter().copied().peekable();
    let mut position = 0;
    items.retain(|_| {
        let current = position;
        position += 1;
        while pending.next_if(|&i| i < current).is_some() {}
        pending.next_if_eq(&current).is_none()
    });
}

mod helpers;

use helpers::{a, aaaa, filters, ResponseBuilder};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RecordType;
use no6_application::use_cases::FilterResponseUseCase;

#[test]
fn test_aaaa_question_only_aaaa_answers_becomes_empty_noerror() {
    let use_case = FilterResponseUseCase::new(filters());
    let mut message = ResponseBuilder::new("six.example.com.", RecordType::AAAA)
        .answers(vec![aaaa("six.example.com.", "::1")])
        .build();

    let outcome = use_case.execute(&mut message);

    assert_eq!(outcome.removed, 1);
    assert!(message.answers().is_empty());
    assert_eq!(message.response_code(), ResponseCode::NoError);
    assert_eq!(message.queries().len(), 1);
}

#[test]
fn test_a_question_with_only_aaaa_answers_is_kept() {
    let use_case = FilterResponseUseCase::new(filters());
    let mut message = ResponseBuilder::new("six.example.com.", RecordType::A)
        .answers(vec![aaaa("six.example.com.", "::1")])
        .build();

    let outcome = use_case.execute(&mut message);

    assert_eq!(outcome.removed, 0);
    assert_eq!(message.answers().len(), 1);
}

#[test]
fn test_any_question_dual_stack() {
    let use_case = FilterResponseUseCase::new(filters());
    let mut message = ResponseBuilder::new("six.example.com.", RecordType::ANY)
        .answers(vec![
            a("six.example.com.", "127.0.0.1"),
            aaaa("six.example.com.", "::1"),
        ])
        .build();

    use_case.execute(&mut message);

    assert_eq!(message.answers(), &[a("six.example.com.", "127.0.0.1")]);
}

#[test]
fn test_error_responses_are_not_filtered() {
    let use_case = FilterResponseUseCase::new(filters());
    let mut message = ResponseBuilder::new("six.example.com.", RecordType::AAAA)
        .rcode(ResponseCode::ServFail)
        .answers(vec![aaaa("six.example.com.", "::1")])
        .build();

    let outcome = use_case.execute(&mut message);

    assert!(!outcome.gated);
    assert_eq!(message.answers().len(), 1);
}

#[test]
fn test_additional_section_is_untouched() {
    let use_case = FilterResponseUseCase::new(filters());
    let mut message = ResponseBuilder::new("six.example.com.", RecordType::AAAA)
        .answers(vec![aaaa("six.example.com.", "::1")])
        .additionals(vec![aaaa("six.example.com.", "::2")])
        .build();

    use_case.execute(&mut message);

    assert!(message.answers().is_empty());
    assert_eq!(message.additionals().len(), 1);
}

#[test]
fn test_non_matching_response_unchanged() {
    let use_case = FilterResponseUseCase::new(filters());
    let original = ResponseBuilder::new("four.example.com.", RecordType::AAAA)
        .answers(vec![
            aaaa("four.example.com.", "::1"),
            aaaa("four.example.com.", "::2"),
        ])
        .build();
    let mut message = original.clone();

    use_case.execute(&mut message);

    assert_eq!(message.answers(), original.answers());
}

#[test]
fn test_execute_twice_is_noop() {
    let use_case = FilterResponseUseCase::new(filters());
    let mut message = ResponseBuilder::new("x.ds.example.com.", RecordType::ANY)
        .answers(vec![
            aaaa("x.ds.example.com.", "::1"),
            a("x.ds.example.com.", "10.0.0.1"),
        ])
        .build();

    use_case.execute(&mut message);
    let first = message.answers().to_vec();
    let outcome = use_case.execute(&mut message);

    assert_eq!(outcome.removed, 0);
    assert_eq!(message.answers(), first.as_slice());
}

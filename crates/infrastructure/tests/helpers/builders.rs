use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use no6_domain::FilterSet;
use std::str::FromStr;
use std::sync::Arc;

pub fn a(name: &str, ip: &str) -> Record {
    Record::from_rdata(name_of(name), 60, RData::A(A(ip.parse().unwrap())))
}

pub fn aaaa(name: &str, ip: &str) -> Record {
    Record::from_rdata(name_of(name), 60, RData::AAAA(AAAA(ip.parse().unwrap())))
}

pub fn name_of(name: &str) -> Name {
    Name::from_str(name).unwrap()
}

pub fn filters() -> Arc<FilterSet> {
    Arc::new(FilterSet::from_rules(["six.example.com", ".ds.example.com"]).unwrap())
}

pub fn query(qname: &str, qtype: RecordType) -> Message {
    let mut message = Message::new(0x4242, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(name_of(qname), qtype));
    message
}

/// Reply to `request` carrying `answers`, the way an upstream would.
pub fn reply(request: &Message, answers: Vec<Record>) -> Message {
    let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
    response.set_recursion_desired(request.recursion_desired());
    response.set_recursion_available(true);
    response.add_queries(request.queries().to_vec());
    response.add_answers(answers);
    response
}

/// Answer records rendered as `name type` pairs, sorted for comparison.
pub fn summarize(records: &[Record]) -> Vec<String> {
    let mut lines: Vec<String> = records
        .iter()
        .map(|r| format!("{} {} {:?}", r.name(), r.record_type(), r.data()))
        .collect();
    lines.sort();
    lines
}

use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME};
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

pub fn cname(name: &str, target: &str) -> Record {
    Record::from_rdata(name_of(name), 60, RData::CNAME(CNAME(name_of(target))))
}

pub fn name_of(name: &str) -> Name {
    Name::from_str(name).unwrap()
}

pub fn filters() -> Arc<FilterSet> {
    Arc::new(FilterSet::from_rules(["six.example.com", ".ds.example.com"]).unwrap())
}

pub struct ResponseBuilder {
    message: Message,
}

impl ResponseBuilder {
    pub fn new(qname: &str, qtype: RecordType) -> Self {
        let mut message = Message::new(0x2a2a, MessageType::Response, OpCode::Query);
        message.add_query(Query::query(name_of(qname), qtype));
        Self { message }
    }

    pub fn answers(mut self, answers: Vec<Record>) -> Self {
        self.message.add_answers(answers);
        self
    }

    pub fn additionals(mut self, records: Vec<Record>) -> Self {
        self.message.add_additionals(records);
        self
    }

    pub fn rcode(mut self, rcode: ResponseCode) -> Self {
        self.message.set_response_code(rcode);
        self
    }

    pub fn build(self) -> Message {
        self.message
    }
}

//! Wire encoding of DNS messages using `hickory-proto`.

use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use no6_domain::DomainError;

/// Size of the fixed DNS header.
pub const HEADER_LEN: usize = 12;

pub struct MessageCodec;

impl MessageCodec {
    /// Serialize a Message to wire format bytes
    pub fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsMessage(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }

    pub fn decode(bytes: &[u8]) -> Result<Message, DomainError> {
        Message::from_vec(bytes).map_err(|e| {
            DomainError::InvalidDnsMessage(format!("Failed to parse DNS message: {}", e))
        })
    }

    /// FORMERR reply for a packet whose header is present but whose body
    /// could not be parsed. Returns `None` when not even the header is there.
    pub fn format_error_for(bytes: &[u8]) -> Option<Message> {
        if bytes.len() < HEADER_LEN {
            return None;
        }
        let id = u16::from_be_bytes([bytes[0], bytes[1]]);
        let mut response = Message::new(id, MessageType::Response, OpCode::Query);
        response.set_response_code(ResponseCode::FormErr);
        Some(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::Query;
    use hickory_proto::rr::{Name, RecordType};
    use std::str::FromStr;

    #[test]
    fn test_encode_sets_id_and_question_count() {
        let mut message = Message::new(0xbeef, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(Query::query(
            Name::from_str("example.com.").unwrap(),
            RecordType::AAAA,
        ));

        let bytes = MessageCodec::encode(&message).unwrap();

        assert!(bytes.len() > HEADER_LEN);
        assert_eq!(u16::from_be_bytes([bytes[0], bytes[1]]), 0xbeef);
        assert_eq!(u16::from_be_bytes([bytes[4], bytes[5]]), 1);
        assert_eq!(bytes[2] & 0x01, 0x01, "RD flag should be set");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(MessageCodec::decode(&[0x00, 0x01, 0x02]).is_err());
    }

    #[test]
    fn test_format_error_needs_header() {
        assert!(MessageCodec::format_error_for(&[0xab, 0xcd]).is_none());

        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[0] = 0xab;
        bytes[1] = 0xcd;
        let response = MessageCodec::format_error_for(&bytes).unwrap();
        assert_eq!(response.id(), 0xabcd);
        assert_eq!(response.response_code(), ResponseCode::FormErr);
    }
}

mod dns_handler;

pub use dns_handler::{DnsHandler, HandlerError, HandlerResult, ResponseWriter};

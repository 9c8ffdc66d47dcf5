pub mod capture;
pub mod codec;
pub mod filter_handler;
pub mod forwarding;
pub mod server;
pub mod transport;

pub use capture::CaptureWriter;
pub use codec::MessageCodec;
pub use filter_handler::No6Handler;
pub use forwarding::ForwardingHandler;
pub use server::DnsServer;

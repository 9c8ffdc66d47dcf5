//! UDP and TCP listeners that feed decoded requests into a handler chain.

use super::codec::MessageCodec;
use super::transport::tcp::{read_with_length_prefix, send_with_length_prefix};
use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use no6_application::ports::{DnsHandler, ResponseWriter};
use no6_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tracing::{debug, error, info, warn};

const MAX_UDP_REQUEST_SIZE: usize = 4096;
const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct DnsServer {
    handler: Arc<dyn DnsHandler>,
}

impl DnsServer {
    pub fn new(handler: Arc<dyn DnsHandler>) -> Self {
        Self { handler }
    }

    /// Receives datagrams forever; each one is handled in its own task.
    pub async fn serve_udp(&self, socket: UdpSocket) -> io::Result<()> {
        let socket = Arc::new(socket);
        info!(addr = %socket.local_addr()?, chain = self.handler.name(), "UDP listener ready");

        let mut recv_buf = vec![0u8; MAX_UDP_REQUEST_SIZE];
        loop {
            let (len, peer) = match socket.recv_from(&mut recv_buf).await {
                Ok(received) => received,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    // ICMP errors from earlier sends surface here on some platforms.
                    debug!(error = %e, "UDP recv error");
                    continue;
                }
            };

            let bytes = recv_buf[..len].to_vec();
            let handler = self.handler.clone();
            let socket = socket.clone();
            tokio::spawn(async move {
                let mut writer = UdpResponseWriter::new(socket, peer);
                handle_request(handler.as_ref(), &bytes, &mut writer).await;
            });
        }
    }

    /// Accepts connections forever. Requests on one connection are answered
    /// in order; the connection is closed after an idle period.
    pub async fn serve_tcp(&self, listener: TcpListener) -> io::Result<()> {
        info!(addr = %listener.local_addr()?, chain = self.handler.name(), "TCP listener ready");

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "TCP accept error");
                    continue;
                }
            };

            let handler = self.handler.clone();
            tokio::spawn(async move {
                if let Err(e) = serve_tcp_connection(handler, stream, peer).await {
                    debug!(peer = %peer, error = %e, "TCP connection closed with error");
                }
            });
        }
    }
}

async fn serve_tcp_connection(
    handler: Arc<dyn DnsHandler>,
    mut stream: TcpStream,
    peer: SocketAddr,
) -> io::Result<()> {
    stream.set_nodelay(true)?;

    loop {
        let read = tokio::time::timeout(TCP_IDLE_TIMEOUT, read_with_length_prefix(&mut stream));
        let bytes = match read.await {
            Err(_) => {
                debug!(peer = %peer, "TCP connection idle, closing");
                return Ok(());
            }
            Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Ok(result) => result?,
        };

        let mut writer = TcpResponseWriter::new(&mut stream);
        handle_request(handler.as_ref(), &bytes, &mut writer).await;
    }
}

/// Decodes one request, runs it through `handler` and makes sure the client
/// gets an answer whenever the request could be read at all.
pub async fn handle_request(
    handler: &dyn DnsHandler,
    bytes: &[u8],
    writer: &mut dyn ResponseWriter,
) {
    let request = match MessageCodec::decode(bytes) {
        Ok(request) => request,
        Err(e) => {
            debug!(len = bytes.len(), error = %e, "Dropping undecodable request");
            if let Some(formerr) = MessageCodec::format_error_for(bytes) {
                if let Err(e) = writer.write_message(formerr).await {
                    debug!(error = %e, "Failed to write FORMERR");
                }
            }
            return;
        }
    };

    if request.message_type() != MessageType::Query {
        debug!(id = request.id(), "Ignoring message that is not a query");
        return;
    }

    let mut tracking = TrackingWriter::new(writer);
    match handler.serve_dns(&request, &mut tracking).await {
        Ok(rcode) => {
            debug!(id = request.id(), rcode = ?rcode, "Request handled");
        }
        Err(e) => {
            warn!(id = request.id(), handler = handler.name(), error = %e, "Handler failed");
            if !tracking.written {
                let response = build_error_response(&request, e.rcode);
                if let Err(write_err) = tracking.inner.write_message(response).await {
                    error!(id = request.id(), error = %write_err, "Failed to write error response");
                }
            }
        }
    }
}

/// Empty response that echoes the request id, opcode and questions.
pub fn build_error_response(request: &Message, rcode: ResponseCode) -> Message {
    let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
    response.set_recursion_desired(request.recursion_desired());
    response.set_recursion_available(true);
    response.add_queries(request.queries().to_vec());
    response.set_response_code(rcode);
    response
}

/// Records whether anything reached the wrapped writer.
struct TrackingWriter<'a> {
    inner: &'a mut dyn ResponseWriter,
    written: bool,
}

impl<'a> TrackingWriter<'a> {
    fn new(inner: &'a mut dyn ResponseWriter) -> Self {
        Self {
            inner,
            written: false,
        }
    }
}

#[async_trait]
impl ResponseWriter for TrackingWriter<'_> {
    async fn write_message(&mut self, message: Message) -> Result<(), DomainError> {
        self.written = true;
        self.inner.write_message(message).await
    }
}

pub struct UdpResponseWriter {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
}

impl UdpResponseWriter {
    pub fn new(socket: Arc<UdpSocket>, peer: SocketAddr) -> Self {
        Self { socket, peer }
    }
}

#[async_trait]
impl ResponseWriter for UdpResponseWriter {
    async fn write_message(&mut self, message: Message) -> Result<(), DomainError> {
        let bytes = MessageCodec::encode(&message)?;
        self.socket
            .send_to(&bytes, self.peer)
            .await
            .map_err(|e| DomainError::ResponseWrite(e.to_string()))?;
        Ok(())
    }
}

pub struct TcpResponseWriter<'a> {
    stream: &'a mut TcpStream,
}

impl<'a> TcpResponseWriter<'a> {
    pub fn new(stream: &'a mut TcpStream) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl ResponseWriter for TcpResponseWriter<'_> {
    async fn write_message(&mut self, message: Message) -> Result<(), DomainError> {
        let bytes = MessageCodec::encode(&message)?;
        send_with_length_prefix(&mut *self.stream, &bytes)
            .await
            .map_err(|e| DomainError::ResponseWrite(e.to_string()))
    }
}

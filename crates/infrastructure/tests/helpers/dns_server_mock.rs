use hickory_proto::op::Message;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockProtocol {
    Udp,
    Tcp,
}

pub type Responder = Arc<dyn Fn(&Message, MockProtocol) -> Option<Message> + Send + Sync>;

/// Upstream resolver on 127.0.0.1 answering over UDP and TCP on the same
/// port. Returning `None` from the responder drops the request.
pub struct MockUpstream {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUpstream {
    pub async fn start<F>(responder: F) -> Result<Self, std::io::Error>
    where
        F: Fn(&Message, MockProtocol) -> Option<Message> + Send + Sync + 'static,
    {
        let responder: Responder = Arc::new(responder);
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_count = udp_queries.clone();
        let tcp_count = tcp_queries.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        udp_count.fetch_add(1, Ordering::SeqCst);
                        if let Some(bytes) = respond(&responder, &buf[..len], MockProtocol::Udp) {
                            let _ = socket.send_to(&bytes, peer).await;
                        }
                    }
                    result = listener.accept() => {
                        let Ok((mut stream, _)) = result else { continue };
                        tcp_count.fetch_add(1, Ordering::SeqCst);
                        let responder = responder.clone();
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut request = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut request).await.is_err() {
                                return;
                            }
                            if let Some(bytes) = respond(&responder, &request, MockProtocol::Tcp) {
                                let _ = stream.write_all(&(bytes.len() as u16).to_be_bytes()).await;
                                let _ = stream.write_all(&bytes).await;
                            }
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn respond(responder: &Responder, bytes: &[u8], protocol: MockProtocol) -> Option<Vec<u8>> {
    let request = Message::from_vec(bytes).ok()?;
    let response = responder(&request, protocol)?;

    let mut buf = Vec::new();
    let mut encoder = BinEncoder::new(&mut buf);
    response.emit(&mut encoder).ok()?;
    Some(buf)
}

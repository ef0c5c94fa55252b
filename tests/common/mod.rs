//! Shared test utilities.

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use tronwatch::client::GmgnClient;
use tronwatch::config::GmgnConfig;

/// Spawns an HTTP stub that answers every incoming request with the
/// given status line and body. The raw head of the *first* request is
/// reported back through the returned channel.
pub async fn spawn_stub(
    status_line: &'static str,
    body: &'static str,
) -> (SocketAddr, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let mut first_head = Some(tx);
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };

            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.expect("read request");
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&chunk[..n]);
                if head.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            if let Some(tx) = first_head.take() {
                let _ = tx.send(String::from_utf8_lossy(&head).into_owned());
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write stub response");
            let _ = socket.shutdown().await;
        }
    });

    (addr, rx)
}

/// Builds a client pointed at the stub, with the address dump
/// redirected to `output_file`.
pub fn stub_client(addr: SocketAddr, output_file: PathBuf) -> GmgnClient {
    GmgnClient::new(GmgnConfig {
        base_url: format!("http://{addr}"),
        output_file,
    })
}

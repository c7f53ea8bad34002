//! # Feature: Keepalive
//!
//! Minimal HTTP responder so platform health checks keep the process alive.
//! Replies 200 to anything and never touches scheduling state.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: true (disabled when KEEPALIVE_ADDR is unset)

use anyhow::Result;
use log::{debug, info};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const RESPONSE: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok";

/// Bind `addr` and answer health checks until the process exits.
pub async fn serve(addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Keepalive responder listening on {addr}");
    run(listener).await
}

async fn run(listener: TcpListener) -> Result<()> {
    loop {
        let (mut stream, peer) = listener.accept().await?;
        tokio::spawn(async move {
            // Drain whatever request arrives; the reply is the same either way.
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            if let Err(e) = stream.write_all(RESPONSE).await {
                debug!("Keepalive reply to {peer} failed: {e}");
            }
        });
    }
}

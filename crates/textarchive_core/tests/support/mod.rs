//! In-process HTTP stub standing in for the chat-completions endpoint.

#![allow(dead_code)]

use std::time::Duration;
use textarchive_core::EngineConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Canned behavior of the stub endpoint.
#[derive(Clone)]
pub enum StubReply {
    /// Responds with `status` and a JSON `body`.
    Respond { status: u16, body: String },
    /// Accepts the connection and never answers.
    Hang,
}

impl StubReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::Respond {
            status: 200,
            body: body.into(),
        }
    }
}

/// Wraps assistant `content` in an OpenAI-style `message` envelope.
pub fn message_envelope(content: &str) -> String {
    serde_json::json!({
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

/// Starts a stub on an ephemeral port and returns its completions URL.
pub async fn spawn_stub(reply: StubReply) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub should bind");
    let addr = listener.local_addr().expect("stub should have an address");

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let reply = reply.clone();
            tokio::spawn(async move {
                read_request(&mut socket).await;
                match reply {
                    StubReply::Respond { status, body } => {
                        let response = format!(
                            "HTTP/1.1 {status} STUB\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                            body.len()
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    }
                    StubReply::Hang => {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    }
                }
            });
        }
    });

    format!("http://{addr}/v1/chat/completions")
}

/// Returns a URL on which nothing listens.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("probe should bind");
    let addr = listener.local_addr().expect("probe should have an address");
    drop(listener);
    format!("http://{addr}/v1/chat/completions")
}

/// Remote-enabled config pointed at `url` with a short timeout.
pub fn remote_config(url: String) -> EngineConfig {
    EngineConfig {
        llm_api_url: url,
        llm_timeout_secs: 1,
        ..EngineConfig::default()
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut received = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let Ok(read) = socket.read(&mut chunk).await else {
            return;
        };
        if read == 0 {
            return;
        }
        received.extend_from_slice(&chunk[..read]);
        if let Some(header_end) = find_header_end(&received) {
            let body_len = content_length(&received[..header_end]);
            if received.len() >= header_end + 4 + body_len {
                return;
            }
        }
    }
}

fn find_header_end(bytes: &[u8]) -> Option<usize> {
    bytes.windows(4).position(|window| window == b"\r\n\r\n")
}

fn content_length(headers: &[u8]) -> usize {
    String::from_utf8_lossy(headers)
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.trim()
                .eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse().ok())
                .flatten()
        })
        .unwrap_or(0)
}

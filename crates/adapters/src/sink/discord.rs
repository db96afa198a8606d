// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Discord Rich Presence over the local IPC socket.
//!
//! Frames are `opcode: u32 LE`, `length: u32 LE`, then `length` bytes of
//! JSON. The client handshakes with its application id and then sends
//! `SET_ACTIVITY` commands; an activity of `null` clears the presence.

use super::{PresenceSink, SinkError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use wr_core::ActivityPayload;

const OP_HANDSHAKE: u32 = 0;
const OP_FRAME: u32 = 1;
const OP_CLOSE: u32 = 2;
const OP_PING: u32 = 3;
const OP_PONG: u32 = 4;

/// Largest frame body accepted from the client.
const MAX_FRAME_LEN: usize = 64 * 1024;

#[cfg(unix)]
type IpcStream = tokio::net::UnixStream;
#[cfg(windows)]
type IpcStream = tokio::net::windows::named_pipe::NamedPipeClient;

pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// Where to find the Discord client and its web API.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    /// Application id the presence is shown under.
    pub client_id: String,
    /// Directories searched for `discord-ipc-N` sockets, in order.
    /// Unused on Windows, where the client listens on named pipes.
    pub ipc_dirs: Vec<PathBuf>,
    /// e.g. `https://discord.com/api/v10`, without trailing slash.
    pub api_base: String,
    pub timeout: Duration,
}

impl DiscordConfig {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ipc_dirs: vec![PathBuf::from("/tmp")],
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub(crate) fn assets_url(&self) -> String {
        format!(
            "{}/oauth2/applications/{}/assets",
            self.api_base.trim_end_matches('/'),
            self.client_id
        )
    }
}

/// Presence sink talking to a locally running Discord client.
pub struct DiscordIpcSink {
    config: DiscordConfig,
    pid: u32,
    conn: Option<IpcConnection<IpcStream>>,
}

impl DiscordIpcSink {
    pub fn new(config: DiscordConfig) -> Self {
        Self { config, pid: std::process::id(), conn: None }
    }

    async fn connection(&mut self) -> Result<&mut IpcConnection<IpcStream>, SinkError> {
        if self.conn.is_none() {
            let stream = open_socket(&self.config.ipc_dirs).await?;
            let mut conn = IpcConnection::new(stream);
            conn.handshake(&self.config.client_id).await?;
            tracing::info!("presence IPC connected");
            self.conn = Some(conn);
        }
        self.conn.as_mut().ok_or(SinkError::NotRunning)
    }

    async fn send_activity(&mut self, activity: Value) -> Result<(), SinkError> {
        let pid = self.pid;
        let result = match self.connection().await {
            Ok(conn) => conn.set_activity(pid, activity).await,
            Err(e) => Err(e),
        };
        if result.is_err() {
            // Reconnect on the next push.
            self.conn = None;
        }
        result
    }
}

#[async_trait]
impl PresenceSink for DiscordIpcSink {
    async fn connect(&mut self) -> Result<(), SinkError> {
        self.conn = None;
        self.connection().await.map(|_| ())
    }

    async fn set_activity(&mut self, payload: &ActivityPayload) -> Result<(), SinkError> {
        self.send_activity(activity_json(payload)).await
    }

    async fn clear_activity(&mut self) -> Result<(), SinkError> {
        self.send_activity(Value::Null).await
    }
}

/// Render a payload as a Discord activity object (timestamps in seconds).
pub fn activity_json(payload: &ActivityPayload) -> Value {
    let mut activity = json!({
        "state": payload.state,
        "details": payload.details,
        "timestamps": { "start": payload.start_ms / 1000 },
        "assets": {
            "large_image": payload.large_image,
            "large_text": payload.large_text,
            "small_image": payload.small_image,
            "small_text": payload.small_text,
        },
    });
    if let Some((current, max)) = payload.party_size {
        activity["party"] = json!({ "size": [current, max] });
    }
    activity
}

/// One handshaken IPC connection over any byte stream.
pub(crate) struct IpcConnection<S> {
    stream: S,
}

impl<S: AsyncRead + AsyncWrite + Unpin + Send> IpcConnection<S> {
    pub(crate) fn new(stream: S) -> Self {
        Self { stream }
    }

    pub(crate) async fn handshake(&mut self, client_id: &str) -> Result<(), SinkError> {
        write_frame(&mut self.stream, OP_HANDSHAKE, &json!({ "v": 1, "client_id": client_id }))
            .await?;
        let (op, body) = read_frame(&mut self.stream).await?;
        match op {
            OP_FRAME if body["evt"] == "READY" => Ok(()),
            OP_CLOSE => Err(SinkError::Handshake(error_message(&body))),
            _ => Err(SinkError::Handshake(format!("unexpected reply opcode {op}"))),
        }
    }

    pub(crate) async fn set_activity(&mut self, pid: u32, activity: Value) -> Result<(), SinkError> {
        let nonce = uuid::Uuid::new_v4().to_string();
        let command = json!({
            "cmd": "SET_ACTIVITY",
            "args": { "pid": pid, "activity": activity },
            "nonce": nonce,
        });
        write_frame(&mut self.stream, OP_FRAME, &command).await?;

        loop {
            let (op, body) = read_frame(&mut self.stream).await?;
            match op {
                OP_PING => write_frame(&mut self.stream, OP_PONG, &body).await?,
                OP_CLOSE => return Err(SinkError::Protocol(error_message(&body))),
                OP_FRAME if body["evt"] == "ERROR" => {
                    return Err(SinkError::Protocol(error_message(&body["data"])));
                }
                OP_FRAME if body["nonce"] == nonce.as_str() => return Ok(()),
                _ => tracing::trace!(op, "ignoring unrelated IPC frame"),
            }
        }
    }
}

fn error_message(body: &Value) -> String {
    body["message"].as_str().unwrap_or("no message").to_string()
}

pub(crate) async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    op: u32,
    body: &Value,
) -> Result<(), SinkError> {
    let bytes = serde_json::to_vec(body).map_err(|e| SinkError::Protocol(e.to_string()))?;
    if bytes.len() > MAX_FRAME_LEN {
        return Err(SinkError::Protocol(format!("frame of {} bytes exceeds limit", bytes.len())));
    }
    let len = u32::try_from(bytes.len())
        .map_err(|_| SinkError::Protocol(format!("frame of {} bytes is too large", bytes.len())))?;
    let mut frame = Vec::with_capacity(8 + bytes.len());
    frame.extend_from_slice(&op.to_le_bytes());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(&bytes);
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

pub(crate) async fn read_frame<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<(u32, Value), SinkError> {
    let mut header = [0u8; 8];
    reader.read_exact(&mut header).await?;
    let op = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
    if len > MAX_FRAME_LEN {
        return Err(SinkError::Protocol(format!("frame of {len} bytes exceeds limit")));
    }
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await?;
    let value = serde_json::from_slice(&body).map_err(|e| SinkError::Protocol(e.to_string()))?;
    Ok((op, value))
}

#[cfg(unix)]
async fn open_socket(dirs: &[PathBuf]) -> Result<IpcStream, SinkError> {
    for dir in dirs {
        for prefix in ["", "app/com.discordapp.Discord/", "snap.discord/"] {
            for n in 0..10 {
                let path = dir.join(format!("{prefix}discord-ipc-{n}"));
                if let Ok(stream) = tokio::net::UnixStream::connect(&path).await {
                    tracing::debug!(path = %path.display(), "found presence IPC socket");
                    return Ok(stream);
                }
            }
        }
    }
    Err(SinkError::NotRunning)
}

#[cfg(windows)]
async fn open_socket(_dirs: &[PathBuf]) -> Result<IpcStream, SinkError> {
    use tokio::net::windows::named_pipe::ClientOptions;

    for n in 0..10 {
        if let Ok(pipe) = ClientOptions::new().open(format!(r"\\?\pipe\discord-ipc-{n}")) {
            return Ok(pipe);
        }
    }
    Err(SinkError::NotRunning)
}

#[cfg(test)]
#[path = "discord_tests.rs"]
mod tests;

//! SMS delivery backends.
//!
//! The workflow hands a finished `(phone number, message)` pair to a
//! [`SmsTransport`](crate::sender::SmsTransport) and moves on; each backend
//! owns its delivery mechanics and reports its own failures.
//!
//! Two backends exist: [`OutboxTransport`] journals composed messages to a
//! JSON-lines file (the default, and what you want while setting units up),
//! and `ModemTransport` (behind the `modem` feature) pushes the message
//! through a GSM modem with text-mode AT commands.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::sender::SmsTransport;

/// One journaled message in the outbox file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub id: Uuid,
    pub queued_at: DateTime<Utc>,
    pub phone_number: String,
    pub message: String,
}

/// Appends composed messages to a JSON-lines outbox journal.
pub struct OutboxTransport {
    path: PathBuf,
}

impl OutboxTransport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn append(&self, entry: &OutboxEntry) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl SmsTransport for OutboxTransport {
    async fn send(&self, phone_number: &str, message: &str) {
        let entry = OutboxEntry {
            id: Uuid::new_v4(),
            queued_at: Utc::now(),
            phone_number: phone_number.to_string(),
            message: message.to_string(),
        };
        match self.append(&entry).await {
            Ok(()) => info!(
                "queued SMS {} for {} in {}",
                entry.id,
                phone_number,
                self.path.display()
            ),
            Err(e) => error!("failed to record SMS in outbox: {e}"),
        }
    }
}

/// Sends messages through a GSM modem using text-mode AT commands.
#[cfg(feature = "modem")]
pub struct ModemTransport {
    port: String,
    baud_rate: u32,
}

#[cfg(feature = "modem")]
impl ModemTransport {
    pub fn new(port: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port: port.into(),
            baud_rate,
        }
    }

    fn send_blocking(port_name: &str, baud_rate: u32, phone: &str, message: &str) -> anyhow::Result<()> {
        use anyhow::{bail, Context};
        use std::io::{Read, Write};
        use std::time::{Duration, Instant};

        let mut port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_millis(500))
            .open()
            .with_context(|| format!("opening modem on {port_name}"))?;

        let mut exchange = |payload: &[u8], expected: &str| -> anyhow::Result<()> {
            port.write_all(payload)?;
            port.flush()?;
            let deadline = Instant::now() + Duration::from_secs(10);
            let mut response = String::new();
            let mut buf = [0u8; 256];
            while Instant::now() < deadline {
                match port.read(&mut buf) {
                    Ok(n) if n > 0 => {
                        response.push_str(&String::from_utf8_lossy(&buf[..n]));
                        if response.contains(expected) {
                            return Ok(());
                        }
                        if response.contains("ERROR") {
                            bail!("modem answered ERROR");
                        }
                    }
                    Ok(_) => {}
                    Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => {}
                    Err(e) => return Err(e.into()),
                }
            }
            bail!("timed out waiting for '{expected}' from modem")
        };

        exchange(b"AT\r", "OK")?;
        exchange(b"AT+CMGF=1\r", "OK")?;
        exchange(format!("AT+CMGS=\"{phone}\"\r").as_bytes(), ">")?;
        // Message body is terminated with Ctrl-Z (0x1A).
        let mut body = message.as_bytes().to_vec();
        body.push(0x1A);
        exchange(&body, "OK")?;
        Ok(())
    }
}

#[cfg(feature = "modem")]
#[async_trait]
impl SmsTransport for ModemTransport {
    async fn send(&self, phone_number: &str, message: &str) {
        let port = self.port.clone();
        let baud_rate = self.baud_rate;
        let phone = phone_number.to_string();
        let body = message.to_string();
        let result = tokio::task::spawn_blocking(move || {
            Self::send_blocking(&port, baud_rate, &phone, &body)
        })
        .await;
        match result {
            Ok(Ok(())) => info!("SMS sent to {phone_number} via modem"),
            Ok(Err(e)) => error!("SMS to {phone_number} failed: {e:#}"),
            Err(e) => error!("modem send task failed: {e}"),
        }
    }
}

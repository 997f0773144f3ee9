//! Test doubles for the workflow's collaborators.
#![allow(dead_code)] // compiled standalone as its own test crate; helpers are used via `mod common`

use std::sync::Mutex;

use async_trait::async_trait;
use gpsctl::lang::Localizer;
use gpsctl::sender::{DisplayPort, SmsTransport};

/// Records every alert and confirmation request; answers confirmations with a
/// preset response.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub confirm_answer: bool,
    pub alerts: Mutex<Vec<(String, String, String)>>,
    pub confirms: Mutex<Vec<(String, String, String, String)>>,
}

impl RecordingDisplay {
    pub fn answering(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            ..Self::default()
        }
    }

    pub fn alerts(&self) -> Vec<(String, String, String)> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirm_count(&self) -> usize {
        self.confirms.lock().unwrap().len()
    }
}

#[async_trait]
impl DisplayPort for &RecordingDisplay {
    async fn alert(&self, title: &str, message: &str, dismiss: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((title.into(), message.into(), dismiss.into()));
    }

    async fn confirm(&self, title: &str, message: &str, accept: &str, decline: &str) -> bool {
        self.confirms
            .lock()
            .unwrap()
            .push((title.into(), message.into(), accept.into(), decline.into()));
        self.confirm_answer
    }
}

/// Records every (phone, message) pair handed to the transport.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsTransport for &RecordingTransport {
    async fn send(&self, phone_number: &str, message: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((phone_number.into(), message.into()));
    }
}

/// Localizer that wraps keys in `#` so tests can tell resolved text apart
/// from raw keys.
pub struct MarkerLang;

impl Localizer for MarkerLang {
    fn lookup(&self, key: &str) -> String {
        format!("#{key}#")
    }
}

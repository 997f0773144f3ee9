//! # Gpsctl - SMS control for GPS tracker units
//!
//! Gpsctl manages named "units" (remote GPS tracking devices) and sends them
//! preformatted SMS control commands: enable or disable tracking, arm alarms,
//! cut the engine relay, reboot, factory reset. Each unit profile stores the
//! tracker's phone number, its SMS password and its device family; dispatching
//! a command substitutes the password into the device's command template and
//! hands the final text to an SMS transport.
//!
//! ## Features
//!
//! - **Unit profiles**: Named tracker profiles persisted in an embedded sled store.
//! - **Command catalog**: Fixed per-device command templates for BoxTrack, Coban,
//!   Concox and Teltonika trackers.
//! - **Guarded dispatch**: Every command requires an interactive confirmation
//!   before anything leaves the machine.
//! - **Localized UI text**: Embedded English and Spanish message tables.
//! - **Pluggable transport**: An outbox journal by default; direct GSM modem
//!   delivery behind the `modem` feature.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gpsctl::lang::Messages;
//! use gpsctl::sender::{DisplayPort, SenderWorkflow};
//! use gpsctl::storage::SledStore;
//! use gpsctl::transport::OutboxTransport;
//! use gpsctl::units::UnitStore;
//! # struct NoopDisplay;
//! # #[async_trait::async_trait]
//! # impl DisplayPort for NoopDisplay {
//! #     async fn alert(&self, _: &str, _: &str, _: &str) {}
//! #     async fn confirm(&self, _: &str, _: &str, _: &str, _: &str) -> bool { false }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = SledStore::open("./data/units")?;
//!     let mut workflow = SenderWorkflow::new(
//!         UnitStore::new(store),
//!         NoopDisplay,
//!         OutboxTransport::new("./data/outbox.jsonl"),
//!         Messages::new("en"),
//!     );
//!     workflow.initialize();
//!     println!("known units: {:?}", workflow.names());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - Per-device command templates and display-label resolution
//! - [`units`] - Unit profiles and their persistence rules
//! - [`sender`] - The dispatch workflow: selection, validation, confirmation, send
//! - [`settings`] - Stored-data reset
//! - [`storage`] - Generic key/value persistence over sled
//! - [`transport`] - SMS delivery backends
//! - [`lang`] - Message localization
//! - [`config`] - Configuration management
//! - [`logutil`] - Log-line sanitizing helpers

pub mod catalog;
pub mod config;
pub mod lang;
pub mod logutil;
pub mod sender;
pub mod settings;
pub mod storage;
pub mod transport;
pub mod units;

//! # Sender Module - Command Dispatch Workflow
//!
//! The sender workflow drives everything between "the user picked a unit" and
//! "an SMS left the machine": unit selection, device selection, the command
//! list for that device, validation, confirmation and dispatch.
//!
//! ## State
//!
//! The workflow mirrors what a front-end needs to render: the current unit,
//! the list of known unit names, the selected unit and device, the command
//! list for the selected device, the pending new-unit name, and the
//! password-visibility flag.
//!
//! Selection changes cascade synchronously and explicitly: selecting a unit
//! reloads the current unit and its device, selecting a device reloads the
//! command list. Re-selecting the current value is a no-op.
//!
//! ## Validation and errors
//!
//! Validation failures (empty name, duplicate name, missing phone number,
//! operating on the placeholder unit) never escape as Rust errors: the
//! operation aborts and a localized message is surfaced through the
//! [`DisplayPort`] collaborator. The workflow stays usable afterwards. Only
//! persistence write failures propagate as [`StorageError`].
//!
//! ## Dispatch
//!
//! Every command dispatch asks the display collaborator for confirmation
//! first, destructive or not. On accept, the password placeholder in the
//! command definition is replaced with the unit's stored password and the
//! final text is handed to the [`SmsTransport`] collaborator, which owns
//! delivery and the reporting of delivery failures.

use async_trait::async_trait;
use log::{debug, info};

use crate::catalog::{self, Command, PASSWORD_PLACEHOLDER};
use crate::lang::Localizer;
use crate::logutil::escape_log;
use crate::storage::{KeyValueStore, StorageError};
use crate::units::{Unit, UnitStore, DEFAULT_UNIT_NAME};

/// User-facing alerts and confirmations.
#[async_trait]
pub trait DisplayPort {
    /// Show a dismissable notice.
    async fn alert(&self, title: &str, message: &str, dismiss: &str);

    /// Ask a yes/no question; `true` means the user accepted.
    async fn confirm(&self, title: &str, message: &str, accept: &str, decline: &str) -> bool;
}

/// Outbound SMS delivery.
///
/// Implementations own their failure handling and reporting; the workflow
/// hands over the message and does not inspect the outcome.
#[async_trait]
pub trait SmsTransport {
    async fn send(&self, phone_number: &str, message: &str);
}

/// Orchestrates unit selection, validation, confirmation and dispatch.
pub struct SenderWorkflow<S, D, T, L> {
    units: UnitStore<S>,
    display: D,
    transport: T,
    lang: L,
    unit: Unit,
    names: Vec<String>,
    selected_unit: String,
    selected_device: String,
    commands: Vec<Command>,
    new_name: String,
    password_visible: bool,
}

impl<S, D, T, L> SenderWorkflow<S, D, T, L>
where
    S: KeyValueStore,
    D: DisplayPort,
    T: SmsTransport,
    L: Localizer,
{
    pub fn new(units: UnitStore<S>, display: D, transport: T, lang: L) -> Self {
        Self {
            units,
            display,
            transport,
            lang,
            unit: Unit::new("", "", ""),
            names: Vec::new(),
            selected_unit: String::new(),
            selected_device: String::new(),
            commands: Vec::new(),
            new_name: String::new(),
            password_visible: false,
        }
    }

    /// Load all units and select the first one. On a fresh store this leaves
    /// the placeholder unit selected with the first catalog device.
    pub fn initialize(&mut self) {
        let units = self.units.list_units();
        let first = units[0].clone();
        self.names = units.into_iter().map(|u| u.name).collect();
        self.unit = first.clone();
        self.select_device(&first.device);
        self.select_unit(&first.name);
    }

    /// Switch the active unit. Reloads the unit from the store and cascades
    /// into device selection (and with it, the command list).
    pub fn select_unit(&mut self, name: &str) {
        if self.selected_unit == name {
            return;
        }
        self.selected_unit = name.to_string();
        let mut unit = self.units.get_unit(name);
        if unit.is_placeholder() {
            // A freshly added name has nothing stored yet: keep editing a
            // blank profile under the selected name instead of the sentinel.
            unit.name = name.to_string();
        }
        self.unit = unit;
        let device = self.unit.device.clone();
        self.select_device(&device);
    }

    /// Switch the active device family and reload the command list.
    pub fn select_device(&mut self, device: &str) {
        if self.selected_device == device {
            return;
        }
        self.selected_device = device.to_string();
        self.load_commands();
    }

    /// Recompute the command list for the selected device. The current unit
    /// follows the device selection.
    pub fn load_commands(&mut self) {
        self.unit.device = self.selected_device.clone();
        self.commands = catalog::resolve(&self.selected_device, &self.lang);
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    /// Stage the name for [`add_unit`](Self::add_unit).
    pub fn set_new_name(&mut self, name: &str) {
        self.new_name = name.to_string();
    }

    /// Register the staged name as a new unit and select it. Only the
    /// in-memory name list changes; the profile is persisted by
    /// [`save`](Self::save) once its fields are filled in.
    pub async fn add_unit(&mut self) {
        if self.new_name.is_empty() {
            let message = self.lang.lookup("EmptyUnit");
            self.display.alert("Error", &message, "OK").await;
            return;
        }
        if self.names.iter().any(|n| n == &self.new_name) {
            let message = self.lang.lookup("ExistingUnit");
            self.display.alert("Error", &message, "OK").await;
            return;
        }

        if self.names.len() == 1 && self.names[0] == DEFAULT_UNIT_NAME {
            self.names = vec![self.new_name.clone()];
        } else {
            self.names.push(self.new_name.clone());
        }
        let name = std::mem::take(&mut self.new_name);
        self.select_unit(&name);
        info!("unit '{}' added", escape_log(&name));

        let title = self.lang.lookup("MessageLabel");
        let message = self.lang.lookup("UnitAdded");
        self.display.alert(&title, &message, "OK").await;
    }

    /// Persist the current unit. Rejects a unit without a phone number and
    /// the placeholder selection.
    pub async fn save(&self) -> Result<(), StorageError> {
        if self.unit.phone_number.is_empty() {
            let message = self.lang.lookup("PhoneNumberMissing");
            self.display.alert("Error", &message, "OK").await;
            return Ok(());
        }
        if self.selected_unit == DEFAULT_UNIT_NAME {
            let message = self.lang.lookup("EmptyUnit");
            self.display.alert("Error", &message, "OK").await;
            return Ok(());
        }

        self.units.add_or_edit(&self.unit)?;
        info!("unit '{}' saved", escape_log(&self.unit.name));

        let title = self.lang.lookup("MessageLabel");
        let message = self.lang.lookup("UnitSaved");
        self.display.alert(&title, &message, "OK").await;
        Ok(())
    }

    /// Dispatch a command to the current unit: validate, confirm, substitute
    /// the password into the template, send. Declining the confirmation is
    /// the only cancellation path and ends this dispatch attempt.
    pub async fn select_command(&self, command: &Command) {
        if self.unit.phone_number.is_empty() {
            let message = self.lang.lookup("PhoneNumberMissing");
            self.display.alert("Error", &message, "OK").await;
            return;
        }

        let title = self.lang.lookup("ConfirmationLabel");
        let question = self.lang.lookup("ConfirmFactory");
        let yes = self.lang.lookup("YesLabel");
        let no = self.lang.lookup("NoLabel");
        if !self.display.confirm(&title, &question, &yes, &no).await {
            debug!("command {} declined", command.name);
            return;
        }

        let message = command.definition.replace(PASSWORD_PLACEHOLDER, &self.unit.password);
        info!(
            "dispatching {} to unit '{}'",
            command.name,
            escape_log(&self.unit.name)
        );
        self.transport.send(&self.unit.phone_number, &message).await;
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Mutable access for the front-end's field bindings (phone, password).
    pub fn unit_mut(&mut self) -> &mut Unit {
        &mut self.unit
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn selected_unit(&self) -> &str {
        &self.selected_unit
    }

    pub fn selected_device(&self) -> &str {
        &self.selected_device
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn new_name(&self) -> &str {
        &self.new_name
    }

    pub fn password_visible(&self) -> bool {
        self.password_visible
    }
}

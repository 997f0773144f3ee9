//! Per-device SMS command catalog.
//!
//! Every supported tracker family ships with a fixed set of control commands.
//! A template's `definition` may contain the [`PASSWORD_PLACEHOLDER`] token,
//! which is substituted with the unit's stored password right before dispatch.
//! Catalog order is significant: it is the order commands are presented in.

use crate::lang::Localizer;

/// Token in a command definition that stands in for the unit's SMS password.
pub const PASSWORD_PLACEHOLDER: &str = "******";

/// Supported tracker device families, in presentation order. The first entry
/// doubles as the device assigned to the default unit placeholder.
pub const DEVICES: [&str; 4] = ["BoxTrack", "Coban", "Concox", "Teltonika"];

/// A fixed catalog entry: the command's key (also its localization key) and
/// its raw SMS text template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTemplate {
    pub name: &'static str,
    pub definition: &'static str,
}

impl CommandTemplate {
    const fn new(name: &'static str, definition: &'static str) -> Self {
        Self { name, definition }
    }
}

/// A catalog entry resolved for display: template data plus a localized label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub definition: String,
    pub label: String,
}

const BOXTRACK: [CommandTemplate; 13] = [
    CommandTemplate::new("GoogleLink", "smslink******"),
    CommandTemplate::new("AccOff", "stop******"),
    CommandTemplate::new("AccOn", "resume******"),
    CommandTemplate::new("AccAlarmOn", "acc******"),
    CommandTemplate::new("AccAlarmOff", "noacc******"),
    CommandTemplate::new("ExtPowerAlarmOn", "extpower****** on"),
    CommandTemplate::new("ExtPowerAlarmOff", "extpower****** off"),
    CommandTemplate::new("Movement50", "move****** 0050"),
    CommandTemplate::new("Movement100", "move****** 0100"),
    CommandTemplate::new("Movement200", "move****** 0200"),
    CommandTemplate::new("MovementOff", "nomove******"),
    CommandTemplate::new("Reset", "reset******"),
    CommandTemplate::new("Factory", "begin******"),
];

const COBAN: [CommandTemplate; 2] = [
    CommandTemplate::new("Movement", "move******"),
    CommandTemplate::new("Status", "check******"),
];

// Concox firmwares authenticate by sender number, not by an inline password.
const CONCOX: [CommandTemplate; 5] = [
    CommandTemplate::new("GoogleLink", "URL#"),
    CommandTemplate::new("AccOff", "RELAY,1#"),
    CommandTemplate::new("AccOn", "RELAY,0#"),
    CommandTemplate::new("Reset", "REBOOT#"),
    CommandTemplate::new("Factory", "FACTORY#"),
];

const TELTONIKA: [CommandTemplate; 4] = [
    CommandTemplate::new("GoogleLink", "******ggps"),
    CommandTemplate::new("AccOff", "******setdigout 1"),
    CommandTemplate::new("AccOn", "******setdigout 0"),
    CommandTemplate::new("Reset", "******cpureset"),
];

/// Return the fixed command list for a device family, in catalog order.
/// Unknown device names yield an empty slice rather than an error.
pub fn commands_for(device: &str) -> &'static [CommandTemplate] {
    match device {
        "BoxTrack" => &BOXTRACK,
        "Coban" => &COBAN,
        "Concox" => &CONCOX,
        "Teltonika" => &TELTONIKA,
        _ => &[],
    }
}

/// Resolve a device's catalog for display: each template is paired with the
/// label the localizer produces for its name. Keys the localizer does not
/// know fall back to whatever its own policy returns (an echo of the key).
pub fn resolve<L: Localizer>(device: &str, lang: &L) -> Vec<Command> {
    commands_for(device)
        .iter()
        .map(|tpl| Command {
            name: tpl.name.to_string(),
            definition: tpl.definition.to_string(),
            label: lang.lookup(tpl.name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoLang;

    impl Localizer for EchoLang {
        fn lookup(&self, key: &str) -> String {
            format!("[{key}]")
        }
    }

    #[test]
    fn known_devices_have_commands_in_declared_order() {
        let commands = commands_for("BoxTrack");
        assert_eq!(commands.len(), 13);
        assert_eq!(commands[0].name, "GoogleLink");
        assert_eq!(commands[12].name, "Factory");

        // Deterministic: two lookups return the same list.
        assert_eq!(commands_for("Coban"), commands_for("Coban"));
    }

    #[test]
    fn unknown_device_yields_empty_catalog() {
        assert!(commands_for("Nonexistent").is_empty());
        assert!(commands_for("").is_empty());
        // Lookup is case-sensitive: device keys are exact.
        assert!(commands_for("boxtrack").is_empty());
    }

    #[test]
    fn every_device_constant_has_a_catalog() {
        for device in DEVICES {
            assert!(
                !commands_for(device).is_empty(),
                "device {device} has no commands"
            );
        }
    }

    #[test]
    fn resolve_attaches_localized_labels() {
        let resolved = resolve("Teltonika", &EchoLang);
        assert_eq!(resolved.len(), 4);
        assert_eq!(resolved[0].name, "GoogleLink");
        assert_eq!(resolved[0].definition, "******ggps");
        assert_eq!(resolved[0].label, "[GoogleLink]");
    }

    #[test]
    fn resolve_unknown_device_is_empty() {
        assert!(resolve("Garmin", &EchoLang).is_empty());
    }
}

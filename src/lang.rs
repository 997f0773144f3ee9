//! Message localization.
//!
//! UI text and command labels are looked up by key from per-language tables
//! embedded in the binary. The lookup is a pure function of the key: unknown
//! keys echo the key itself so a missing translation is visible instead of
//! fatal. Command label keys are the catalog command names (`AccOff`,
//! `GoogleLink`, ...); everything else uses the message keys listed in
//! `lang/en.toml`.

use std::collections::HashMap;

use log::error;

const TABLE_EN: &str = include_str!("lang/en.toml");
const TABLE_ES: &str = include_str!("lang/es.toml");

/// Pure display-text lookup.
pub trait Localizer {
    /// Resolve `key` to display text. Implementations define their own
    /// fallback for unknown keys.
    fn lookup(&self, key: &str) -> String;
}

/// Embedded message table for one language.
///
/// Languages are matched on the primary subtag, so `es-MX` selects the
/// Spanish table. Anything unrecognized falls back to English.
pub struct Messages {
    table: HashMap<String, String>,
}

impl Messages {
    pub fn new(language: &str) -> Self {
        let primary = language
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        let source = match primary.as_str() {
            "es" => TABLE_ES,
            _ => TABLE_EN,
        };
        Self {
            table: parse_table(source),
        }
    }

    /// Language from the `LANG` environment variable, English otherwise.
    pub fn from_env() -> Self {
        let lang = std::env::var("LANG").unwrap_or_default();
        Self::new(&lang)
    }
}

impl Localizer for Messages {
    fn lookup(&self, key: &str) -> String {
        self.table
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

fn parse_table(source: &str) -> HashMap<String, String> {
    match toml::from_str(source) {
        Ok(table) => table,
        Err(e) => {
            error!("embedded message table is malformed: {e}");
            HashMap::new()
        }
    }
}

//! Locale message lookup.
//!
//! Bundles are TOML files whose nested tables flatten into dotted keys
//! (`[buttons.create] text = ".."` becomes `buttons.create.text`). A guild's
//! locale falls back to the default bundle, and a missing key resolves to the
//! key itself so a gap in a translation never breaks a reply.

use crate::errors::{Error, Result};
use std::collections::HashMap;

const EN_GB: &str = include_str!("../locales/en-GB.toml");

/// All loaded locale bundles.
#[derive(Debug, Clone)]
pub struct Locales {
    default: String,
    bundles: HashMap<String, HashMap<String, String>>,
}

impl Locales {
    /// Creates an empty set of bundles with the given fallback locale.
    #[must_use]
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            bundles: HashMap::new(),
        }
    }

    /// Bundles shipped with the crate, falling back to `default`.
    pub fn builtin(default: impl Into<String>) -> Result<Self> {
        let mut locales = Self::new(default);
        locales.add_bundle("en-GB", EN_GB)?;
        Ok(locales)
    }

    /// Parses a TOML bundle and registers it under `locale`.
    pub fn add_bundle(&mut self, locale: &str, source: &str) -> Result<()> {
        let table: toml::Table = toml::from_str(source).map_err(|e| Error::Config {
            message: format!("Failed to parse locale {locale}: {e}"),
        })?;
        let mut messages = HashMap::new();
        flatten("", &table, &mut messages);
        self.bundles.insert(locale.to_string(), messages);
        Ok(())
    }

    /// Message lookup bound to one locale.
    #[must_use]
    pub fn get_locale(&self, locale: &str) -> Messages<'_> {
        Messages {
            primary: self.bundles.get(locale),
            fallback: self.bundles.get(&self.default),
        }
    }
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut HashMap<String, String>) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(inner) => flatten(&path, inner, out),
            toml::Value::String(text) => {
                out.insert(path, text.clone());
            }
            other => {
                out.insert(path, other.to_string());
            }
        }
    }
}

/// Messages for a single locale.
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    primary: Option<&'a HashMap<String, String>>,
    fallback: Option<&'a HashMap<String, String>>,
}

impl Messages<'_> {
    /// Resolves `key`, or returns the key when no bundle defines it.
    #[must_use]
    pub fn get(&self, key: &str) -> String {
        self.primary
            .and_then(|bundle| bundle.get(key))
            .or_else(|| self.fallback.and_then(|bundle| bundle.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Resolves `key` and replaces each `{name}` placeholder.
    #[must_use]
    pub fn get_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.get(key), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
    }
}

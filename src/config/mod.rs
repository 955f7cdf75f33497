use std::fmt;

use serde::{de::Deserializer, Deserialize, Serialize};

use crate::currency::Currency;

/// User preferences stored next to the ledger.
///
/// Field names follow the stored document: `currency`, `theme`,
/// `profileName`, `profileImage`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, rename = "profileName")]
    pub display_name: String,
    #[serde(default, rename = "profileImage", deserialize_with = "empty_as_none")]
    pub avatar: Option<String>,
}

impl Settings {
    /// Name used for greetings, or `None` when the user has not set one.
    pub fn display_name(&self) -> Option<&str> {
        let name = self.display_name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    fn from_value(value: Option<String>) -> Self {
        value
            .map(|v| Theme::parse_lenient(&v))
            .unwrap_or_default()
    }

    /// Unknown names fall back to [`Theme::Light`].
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Theme::from_value(value))
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

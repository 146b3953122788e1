//! # Boot Addresses
//!
//! Accepted forms:
//!
//! | Form | Example |
//! |------|---------|
//! | ENR | `enr:-Iu4QGuiaVXBEoi4kcLbsoPYX7GTK9ExOODTuqYBp9K8ke` |
//! | multiaddr | `/ip4/127.0.0.1/tcp/9000` |
//! | `host:port` | `127.0.0.1:9000` |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::BundleError;

/// A validated boot address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BootAddress(String);

impl BootAddress {
    pub fn parse(text: &str) -> Result<Self, BundleError> {
        let text = text.trim();
        let valid = if let Some(record) = text.strip_prefix("enr:") {
            !record.is_empty()
                && record
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        } else if text.starts_with('/') {
            let segments: Vec<&str> = text[1..].split('/').collect();
            segments.len() >= 2
                && segments
                    .iter()
                    .all(|s| !s.is_empty() && !s.contains(char::is_whitespace))
        } else {
            match text.rsplit_once(':') {
                Some((host, port)) => {
                    !host.is_empty()
                        && !host.contains(char::is_whitespace)
                        && matches!(port.parse::<u16>(), Ok(p) if p != 0)
                }
                None => false,
            }
        };

        if !valid {
            return Err(BundleError::InvalidInput(format!(
                "'{text}' is not an ENR, multiaddr or host:port"
            )));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BootAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BootAddress {
    type Error = BundleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BootAddress> for String {
    fn from(address: BootAddress) -> Self {
        address.0
    }
}

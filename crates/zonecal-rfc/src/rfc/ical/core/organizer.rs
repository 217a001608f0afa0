//! Event organizer (RFC 5545 §3.8.4.3).

use std::str::FromStr;

use crate::error::{RfcError, RfcResult};

/// Who organizes an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Organizer {
    /// A display name only; rendered without a `mailto:` value.
    Name(String),
    /// A display name with optional addresses.
    Contact {
        name: String,
        email: Option<String>,
        /// Overrides `email` as the `mailto:` target.
        mailto: Option<String>,
    },
}

impl Organizer {
    /// ## Summary
    /// Creates a contact organizer.
    ///
    /// ## Errors
    /// Returns `RfcError::EmptyOrganizerName` if `name` is blank.
    pub fn contact(
        name: impl Into<String>,
        email: Option<String>,
        mailto: Option<String>,
    ) -> RfcResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RfcError::EmptyOrganizerName);
        }
        Ok(Self::Contact {
            name,
            email,
            mailto,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Contact { name, .. } => name,
        }
    }
}

/// Splits `Name <address>` into its parts.
fn split_name_and_address(value: &str) -> Option<(&str, &str)> {
    let inner = value.strip_suffix('>')?;
    let open = inner.rfind('<')?;
    let name = &inner[..open];
    let address = &inner[open + 1..];

    if name.is_empty() || address.is_empty() || address.contains('>') {
        return None;
    }
    Some((name, address))
}

impl FromStr for Organizer {
    type Err = RfcError;

    /// Parses `Name <email>` or a bare address containing `@`.
    fn from_str(value: &str) -> RfcResult<Self> {
        if let Some((name, address)) = split_name_and_address(value) {
            return Self::contact(name.trim(), Some(address.trim().to_string()), None);
        }

        if value.contains('@') {
            let address = value.trim();
            return Self::contact(address, Some(address.to_string()), None);
        }

        Err(RfcError::InvalidOrganizer(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_name_and_email() {
        let organizer: Organizer = "Jane Doe <jane@example.com>".parse().unwrap();
        assert_eq!(
            organizer,
            Organizer::Contact {
                name: "Jane Doe".to_string(),
                email: Some("jane@example.com".to_string()),
                mailto: None,
            }
        );
    }

    #[test]
    fn parse_without_space_before_bracket() {
        let organizer: Organizer = "Jane<jane@example.com>".parse().unwrap();
        assert_eq!(organizer.name(), "Jane");
    }

    #[test]
    fn parse_bare_address() {
        let organizer: Organizer = " jane@example.com ".parse().unwrap();
        assert_eq!(
            organizer,
            Organizer::Contact {
                name: "jane@example.com".to_string(),
                email: Some("jane@example.com".to_string()),
                mailto: None,
            }
        );
    }

    #[test]
    fn parse_rejects_plain_words() {
        let err = "Jane Doe".parse::<Organizer>().unwrap_err();
        assert!(matches!(err, RfcError::InvalidOrganizer(ref v) if v == "Jane Doe"));
    }

    #[test]
    fn parse_rejects_blank_name() {
        let err = " <jane@example.com>".parse::<Organizer>().unwrap_err();
        assert!(matches!(err, RfcError::EmptyOrganizerName));
    }

    #[test]
    fn contact_requires_name() {
        assert!(Organizer::contact("", None, None).is_err());
    }
}

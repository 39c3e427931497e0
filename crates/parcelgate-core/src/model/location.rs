// ── Location domain type ──

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// ISO 3166-1 alpha-2 country code, always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let code = raw.trim().to_ascii_uppercase();
        if code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic()) {
            Ok(Self(code))
        } else {
            Err(CoreError::validation(
                "country",
                format!("expected a two-letter country code, got '{raw}'"),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    Residential,
    Commercial,
}

/// A shipping address.
///
/// Every field is optional because the same type describes full
/// origin/destination addresses and the partial addresses found on
/// tracking scans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub street_lines: Vec<String>,
    pub city: Option<String>,
    /// State or province code.
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<CountryCode>,
    pub phone: Option<String>,
    /// Contact person.
    pub name: Option<String>,
    pub company: Option<String>,
    /// Puerto Rico urbanization code (hold-at-location addresses only).
    pub urbanization_code: Option<String>,
    pub address_type: Option<AddressType>,
}

impl Location {
    pub fn is_residential(&self) -> bool {
        self.address_type == Some(AddressType::Residential)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn country_code_is_normalised_to_uppercase() {
        assert_eq!(CountryCode::new(" ca ").unwrap().as_str(), "CA");
    }

    #[test]
    fn country_code_rejects_names_and_alpha3() {
        assert!(CountryCode::new("CAN").is_err());
        assert!(CountryCode::new("Canada").is_err());
        assert!(CountryCode::new("C1").is_err());
        assert!(CountryCode::new("").is_err());
    }

    #[test]
    fn country_code_deserialises_through_validation() {
        let ok: CountryCode = serde_json::from_str("\"us\"").unwrap();
        assert_eq!(ok.as_str(), "US");
        assert!(serde_json::from_str::<CountryCode>("\"USA\"").is_err());
    }
}

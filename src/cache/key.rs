//! Cache Key Module
//!
//! Derives cache keys from a tracking number and an optional carrier hint.

use std::fmt;

/// Sentinel used in keys when no carrier was given.
pub const AUTO_CARRIER: &str = "auto";

// == Carrier ==
/// Carrier hint attached to a tracking request.
///
/// `Auto` lets the upstream provider detect the courier itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Carrier {
    #[default]
    Auto,
    Named(String),
}

impl Carrier {
    /// Normalizes a raw carrier value.
    ///
    /// Missing, blank and `auto` (any case) all become [`Carrier::Auto`].
    pub fn from_optional(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None => Carrier::Auto,
            Some(s) if s.is_empty() || s.eq_ignore_ascii_case(AUTO_CARRIER) => Carrier::Auto,
            Some(s) => Carrier::Named(s.to_string()),
        }
    }

    /// Courier code to send upstream, `None` for auto-detect.
    pub fn courier_code(&self) -> Option<&str> {
        match self {
            Carrier::Auto => None,
            Carrier::Named(code) => Some(code.as_str()),
        }
    }

    /// Key segment for this carrier.
    pub fn as_key_segment(&self) -> &str {
        self.courier_code().unwrap_or(AUTO_CARRIER)
    }
}

impl From<Option<String>> for Carrier {
    fn from(raw: Option<String>) -> Self {
        Carrier::from_optional(raw.as_deref())
    }
}

impl From<&str> for Carrier {
    fn from(raw: &str) -> Self {
        Carrier::from_optional(Some(raw))
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key_segment())
    }
}

// == Cache Key ==
/// Key under which one shipment's tracking result is cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds `"{tracking_number}_{carrier}"`.
    ///
    /// The tracking number is taken verbatim; an empty one still yields
    /// its own key.
    pub fn new(tracking_number: &str, carrier: &Carrier) -> Self {
        Self(format!("{}_{}", tracking_number, carrier.as_key_segment()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_with_named_carrier() {
        let key = CacheKey::new("TM123456789GB", &Carrier::from("royal-mail"));
        assert_eq!(key.as_str(), "TM123456789GB_royal-mail");
    }

    #[test]
    fn test_key_without_carrier_uses_sentinel() {
        let key = CacheKey::new("TM123456789GB", &Carrier::Auto);
        assert_eq!(key.as_str(), "TM123456789GB_auto");
    }

    #[test]
    fn test_missing_and_blank_carrier_are_auto() {
        assert_eq!(Carrier::from(None::<String>), Carrier::Auto);
        assert_eq!(Carrier::from(Some(String::new())), Carrier::Auto);
        assert_eq!(Carrier::from("   "), Carrier::Auto);
        assert_eq!(Carrier::from("AUTO"), Carrier::Auto);
    }

    #[test]
    fn test_named_carrier_is_trimmed() {
        assert_eq!(
            Carrier::from(" hermes "),
            Carrier::Named("hermes".to_string())
        );
    }

    #[test]
    fn test_auto_and_named_keys_differ() {
        let auto = CacheKey::new("H123", &Carrier::Auto);
        let hermes = CacheKey::new("H123", &Carrier::from("hermes"));
        assert_ne!(auto, hermes);
    }

    #[test]
    fn test_empty_tracking_number_is_its_own_key() {
        let key = CacheKey::new("", &Carrier::Auto);
        assert_eq!(key.as_str(), "_auto");
    }

    #[test]
    fn test_courier_code() {
        assert_eq!(Carrier::Auto.courier_code(), None);
        assert_eq!(Carrier::from("evri").courier_code(), Some("evri"));
    }
}

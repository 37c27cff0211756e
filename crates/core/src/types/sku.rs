//! Stock keeping unit: the stable key of a purchasable item.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Sku`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SkuError {
    /// The input is empty after trimming.
    #[error("sku cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("sku must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside the allowed set.
    #[error("sku contains invalid character {0:?}")]
    InvalidChar(char),
}

/// A stable item identifier.
///
/// ## Constraints
///
/// - 1-64 characters after trimming
/// - Alphanumerics (any script), `-`, `_` and `.` only
///
/// The restricted alphabet keeps skus safe to embed in element ids and
/// HTMX `hx-vals` JSON without further escaping.
///
/// ## Examples
///
/// ```
/// use kiosk_core::Sku;
///
/// assert!(Sku::parse("mango-chutney").is_ok());
/// assert!(Sku::parse("").is_err());
/// assert!(Sku::parse("no spaces").is_err());
///
/// assert_eq!(Sku::from_name("Grüner Tee  Classic").as_str(), "grüner-tee-classic");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Sku(String);

impl Sku {
    /// Maximum length of a sku.
    pub const MAX_LENGTH: usize = 64;

    /// Sku used when a name yields no usable characters.
    pub const FALLBACK: &'static str = "produkt";

    /// Parse a `Sku` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`] characters, or contains a disallowed character.
    pub fn parse(s: &str) -> Result<Self, SkuError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SkuError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(SkuError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s.chars().find(|c| !is_sku_char(*c)) {
            return Err(SkuError::InvalidChar(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Derive a sku from a display name.
    ///
    /// Lowercases the name, turns whitespace runs into `-` and drops any
    /// other disallowed character.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let mut slug = String::with_capacity(name.len());
        for word in name.split_whitespace() {
            let word: String = word
                .chars()
                .flat_map(char::to_lowercase)
                .filter(|c| is_sku_char(*c))
                .collect();
            if word.is_empty() {
                continue;
            }
            if !slug.is_empty() {
                slug.push('-');
            }
            slug.push_str(&word);
        }

        let slug: String = slug.chars().take(Self::MAX_LENGTH).collect();
        let slug = slug.trim_end_matches('-');
        if slug.is_empty() {
            Self(Self::FALLBACK.to_owned())
        } else {
            Self(slug.to_owned())
        }
    }

    /// Returns the sku as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Sku` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_sku_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.')
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Sku {
    type Err = SkuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Sku {
    type Error = SkuError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Sku> for String {
    fn from(sku: Sku) -> Self {
        sku.0
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Sku::parse("tee-01").map(Sku::into_inner), Ok("tee-01".into()));
        assert_eq!(Sku::parse("  a.b_c  ").map(Sku::into_inner), Ok("a.b_c".into()));
        assert!(Sku::parse("kräuter").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Sku::parse(""), Err(SkuError::Empty));
        assert_eq!(Sku::parse("   "), Err(SkuError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(Sku::MAX_LENGTH + 1);
        assert_eq!(
            Sku::parse(&long),
            Err(SkuError::TooLong {
                max: Sku::MAX_LENGTH
            })
        );
        assert!(Sku::parse(&"a".repeat(Sku::MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_parse_rejects_markup_and_quotes() {
        assert_eq!(Sku::parse("a\"b"), Err(SkuError::InvalidChar('"')));
        assert_eq!(Sku::parse("<b>"), Err(SkuError::InvalidChar('<')));
        assert_eq!(Sku::parse("a b"), Err(SkuError::InvalidChar(' ')));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Sku::from_name("Widget").as_str(), "widget");
        assert_eq!(Sku::from_name("Bio Kaffee  Crema").as_str(), "bio-kaffee-crema");
        assert_eq!(Sku::from_name("Tee & Honig!").as_str(), "tee-honig");
        assert_eq!(Sku::from_name("   ").as_str(), Sku::FALLBACK);
        assert_eq!(Sku::from_name("!!!").as_str(), Sku::FALLBACK);
    }

    #[test]
    fn test_from_name_is_always_parseable() {
        let long = "x".repeat(200);
        for name in ["Widget", "Äpfel 1kg", long.as_str(), "— –"] {
            let sku = Sku::from_name(name);
            assert_eq!(Sku::parse(sku.as_str()), Ok(sku.clone()));
        }
    }

    #[test]
    fn test_serde_validates() {
        assert!(serde_json::from_str::<Sku>("\"ok-1\"").is_ok());
        assert!(serde_json::from_str::<Sku>("\"bad sku\"").is_err());
    }
}

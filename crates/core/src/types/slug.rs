//! Table slugs: the public routing token behind each table's QR code.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of characters in a slug.
pub const SLUG_LENGTH: usize = 8;

/// Characters a slug is drawn from.
pub const SLUG_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input has the wrong number of characters.
    #[error("slug must be exactly {expected} characters (got {actual})")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Length of the input.
        actual: usize,
    },
    /// The input contains a character outside `[a-z0-9]`.
    #[error("slug may only contain lowercase letters and digits")]
    InvalidCharacter,
}

/// An 8-character lowercase alphanumeric table slug.
///
/// Slugs are not secret in a cryptographic sense, but knowing one is the only
/// thing that grants access to a table's ordering page, so they are random
/// rather than derived from the table number.
///
/// ## Examples
///
/// ```
/// use tableside_core::Slug;
///
/// assert!(Slug::parse("k3x9am2p").is_ok());
/// assert!(Slug::parse("short").is_err());
/// assert!(Slug::parse("UPPER123").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly [`SLUG_LENGTH`] characters
    /// from [`SLUG_ALPHABET`].
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        let actual = s.chars().count();
        if actual != SLUG_LENGTH {
            return Err(SlugError::WrongLength {
                expected: SLUG_LENGTH,
                actual,
            });
        }
        if !s.bytes().all(|b| SLUG_ALPHABET.contains(&b)) {
            return Err(SlugError::InvalidCharacter);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generate a random slug with the thread-local RNG.
///
/// Uniqueness is NOT guaranteed; see [`generate_unique_slug`].
#[must_use]
pub fn generate_slug() -> Slug {
    generate_slug_with(&mut rand::rng())
}

/// Generate a random slug from the given RNG.
#[must_use]
pub fn generate_slug_with<R: Rng>(rng: &mut R) -> Slug {
    let slug: String = (0..SLUG_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..SLUG_ALPHABET.len());
            char::from(SLUG_ALPHABET.get(idx).copied().unwrap_or(b'a'))
        })
        .collect();
    Slug(slug)
}

/// Generate slugs until one is not taken.
///
/// `is_taken` is consulted for every candidate, so callers must pass the full
/// set of slugs they know about. The loop only becomes slow when the known set
/// approaches the 36^8 slug space.
#[must_use]
pub fn generate_unique_slug(is_taken: impl Fn(&str) -> bool) -> Slug {
    let mut rng = rand::rng();
    loop {
        let candidate = generate_slug_with(&mut rng);
        if !is_taken(candidate.as_str()) {
            return candidate;
        }
    }
}

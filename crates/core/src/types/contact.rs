//! Contact fields collected by the public site.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing contact fields.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactFieldError {
    /// The email is empty or longer than the SMTP limit.
    #[error("email must be between 1 and {max} characters")]
    EmailLength {
        /// Maximum allowed length.
        max: usize,
    },
    /// The email is not `local@domain.tld`.
    #[error("email must look like name@domain.tld")]
    EmailShape,
    /// The phone number has too few or too many digits.
    #[error("phone number must have between {min} and {max} digits")]
    PhoneDigits {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
    },
}

/// An email address with light structural validation.
///
/// ```
/// use vitrine_core::Email;
///
/// assert!(Email::parse("contato@marca.com.br").is_ok());
/// assert!(Email::parse("sem-arroba").is_err());
/// assert!(Email::parse("a@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ContactFieldError`] when the address is empty, too long, or
    /// lacks a non-empty local part and a dotted domain.
    pub fn parse(s: &str) -> Result<Self, ContactFieldError> {
        let s = s.trim();
        if s.is_empty() || s.len() > Self::MAX_LENGTH {
            return Err(ContactFieldError::EmailLength {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = s.split_once('@').ok_or(ContactFieldError::EmailShape)?;
        let dotted = domain
            .split('.')
            .filter(|label| !label.is_empty())
            .count()
            >= 2;
        if local.is_empty() || domain.contains('@') || !dotted {
            return Err(ContactFieldError::EmailShape);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = ContactFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

/// A phone number reduced to its digits (country code included).
///
/// Punctuation such as `+`, spaces, dashes and parentheses is dropped so the
/// value can be placed directly into a `wa.me` link.
///
/// ```
/// use vitrine_core::PhoneNumber;
///
/// let phone = PhoneNumber::parse("+55 (11) 91234-5678").unwrap();
/// assert_eq!(phone.digits(), "5511912345678");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum number of digits accepted.
    pub const MIN_DIGITS: usize = 8;
    /// Maximum number of digits accepted (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a phone number, keeping only ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns [`ContactFieldError::PhoneDigits`] when the digit count is out of range.
    pub fn parse(s: &str) -> Result<Self, ContactFieldError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(ContactFieldError::PhoneDigits {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
            });
        }
        Ok(Self(digits))
    }

    /// The digits only.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ContactFieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

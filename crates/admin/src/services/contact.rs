//! Contact form hand-off to WhatsApp.
//!
//! A submission is stored as a pending message and turned into a `wa.me`
//! link that opens a chat with the site owner, pre-filled with the visitor's
//! details.

use serde::Deserialize;
use thiserror::Error;

use vitrine_core::{ContactFieldError, Email, MessageStatus, PhoneNumber};

use crate::models::{NewWhatsAppMessage, WhatsAppMessage};

/// Errors returned when a submission is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("name is required")]
    MissingName,

    #[error("message is required")]
    MissingMessage,

    #[error(transparent)]
    Field(#[from] ContactFieldError),
}

/// Public contact form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    pub phone: String,
    pub message: String,
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: Email,
    pub company: Option<String>,
    pub phone: PhoneNumber,
    pub message: String,
}

impl ContactSubmission {
    /// Trim fields and check them.
    ///
    /// # Errors
    ///
    /// Returns `ContactError` for a blank name or message, a malformed email,
    /// or a phone number with too few or too many digits.
    pub fn validate(self) -> Result<ValidContact, ContactError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ContactError::MissingName);
        }
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ContactError::MissingMessage);
        }

        Ok(ValidContact {
            name: name.to_owned(),
            email: Email::parse(&self.email)?,
            company: self
                .company
                .map(|c| c.trim().to_owned())
                .filter(|c| !c.is_empty()),
            phone: PhoneNumber::parse(&self.phone)?,
            message: message.to_owned(),
        })
    }
}

impl ValidContact {
    /// Chat text sent to the site owner, greeting them by `owner_name` when known.
    #[must_use]
    pub fn whatsapp_text(&self, owner_name: Option<&str>) -> String {
        let greeting = owner_name.map_or_else(|| "Olá!".to_string(), |n| format!("Olá {n}!"));
        let company = self
            .company
            .as_ref()
            .map(|c| format!(" Represento a empresa {c}."))
            .unwrap_or_default();

        format!(
            "{greeting} Me chamo {}.{company}\n\n{}\n\nMeu e-mail: {}",
            self.name, self.message, self.email
        )
    }

    /// `wa.me` link opening a chat with `owner` pre-filled with [`Self::whatsapp_text`].
    #[must_use]
    pub fn whatsapp_url(&self, owner: &PhoneNumber, owner_name: Option<&str>) -> String {
        wa_me_link(owner, &self.whatsapp_text(owner_name))
    }

    /// The message row to store, pending triage.
    #[must_use]
    pub fn into_new_message(self) -> NewWhatsAppMessage {
        NewWhatsAppMessage {
            name: self.name,
            phone: self.phone.to_string(),
            message: self.message,
            status: MessageStatus::Aguardando,
        }
    }
}

/// `wa.me` link for the operator to answer a stored message.
///
/// Returns `None` when the stored phone does not hold a usable number.
#[must_use]
pub fn reply_url(message: &WhatsAppMessage) -> Option<String> {
    let phone = PhoneNumber::parse(&message.phone).ok()?;
    let text = format!(
        "Olá {}! Obrigada pelo seu contato. Como posso ajudá-lo?",
        message.name
    );
    Some(wa_me_link(&phone, &text))
}

fn wa_me_link(phone: &PhoneNumber, text: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        phone.digits(),
        urlencoding::encode(text)
    )
}

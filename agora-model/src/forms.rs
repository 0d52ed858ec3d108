//! Public-facing form state and local validation.
//!
//! Required fields are checked here, before any remote call is made; a
//! failed validation mutates nothing and triggers no network traffic.

use crate::{Message, MessageOrigin, Participant};
use agora_types::RecordId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A locally detected invalid submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

/// The contact form of the public site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Name, email and message are all required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name".to_string());
        }
        if self.email.trim().is_empty() {
            missing.push("email".to_string());
        }
        if self.message.trim().is_empty() {
            missing.push("message".to_string());
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }

    /// Builds the inbox message a valid submission turns into.
    pub fn into_message(self) -> Result<Message, ValidationError> {
        self.validate()?;
        Ok(Message {
            origin: MessageOrigin::Contact,
            name: self.name,
            email: self.email,
            subject: self.subject,
            body: self.message,
            ..Message::default()
        })
    }
}

/// The event registration form shown on an event card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
}

impl RegistrationForm {
    /// Name and email are both required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name".to_string());
        }
        if self.email.trim().is_empty() {
            missing.push("email".to_string());
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }

    /// Builds the participant record for the given event.
    pub fn into_participant(self, event_id: &RecordId) -> Result<Participant, ValidationError> {
        self.validate()?;
        Ok(Participant {
            event_id: event_id.clone(),
            name: self.name,
            email: self.email,
            ..Participant::default()
        })
    }

    /// Builds the inbox notice that accompanies a registration.
    pub fn into_notice(&self, event_id: &RecordId) -> Message {
        Message {
            origin: MessageOrigin::Participation,
            ref_id: Some(event_id.clone()),
            name: self.name.clone(),
            email: self.email.clone(),
            subject: Some("Inscription à un événement".to_string()),
            body: format!("Inscription de {} <{}>", self.name, self.email),
            ..Message::default()
        }
    }
}

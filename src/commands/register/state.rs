//! The registration conversation as a plain state machine, kept free of I/O
//! so every transition is unit-testable.
//!
//! ChoosingMethod → EnteringCookies            (method "cookies")
//!                → EnteringEmail → EnteringPassword   (method "login")
//!
//! Unrecognized input re-prompts and stays in place; a completed field set
//! yields the credentials to authenticate and ends the conversation.

use crate::database::users::SessionFields;
use crate::gateway::AuthRequest;
use crate::ui::text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationStep {
    ChoosingMethod,
    EnteringCookies,
    EnteringEmail,
    EnteringPassword { email: String },
}

/// Outcome of feeding one message into the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Send this prompt and wait for the next message.
    Prompt(&'static str),
    /// Field set complete: authenticate, then end the conversation.
    Submit(AuthRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRegistration {
    step: RegistrationStep,
}

impl PendingRegistration {
    /// Entry point; the caller sends the returned prompt.
    pub fn start() -> (Self, &'static str) {
        (
            Self {
                step: RegistrationStep::ChoosingMethod,
            },
            text::REGISTER_PROMPT,
        )
    }

    pub fn step(&self) -> &RegistrationStep {
        &self.step
    }

    pub fn advance(&mut self, input: &str) -> Advance {
        let input = input.trim();
        match &self.step {
            RegistrationStep::ChoosingMethod => match input.to_lowercase().as_str() {
                "cookies" => {
                    self.step = RegistrationStep::EnteringCookies;
                    Advance::Prompt(text::REGISTER_COOKIES_PROMPT)
                }
                "login" => {
                    self.step = RegistrationStep::EnteringEmail;
                    Advance::Prompt(text::REGISTER_EMAIL_PROMPT)
                }
                _ => Advance::Prompt(text::REGISTER_METHOD_RETRY),
            },
            RegistrationStep::EnteringCookies => match SessionFields::parse_line(input) {
                Some(fields) => Advance::Submit(AuthRequest::Cookies(fields)),
                None => Advance::Prompt(text::REGISTER_COOKIES_RETRY),
            },
            RegistrationStep::EnteringEmail => {
                if input.is_empty() {
                    return Advance::Prompt(text::REGISTER_EMAIL_PROMPT);
                }
                self.step = RegistrationStep::EnteringPassword {
                    email: input.to_owned(),
                };
                Advance::Prompt(text::REGISTER_PASSWORD_PROMPT)
            }
            RegistrationStep::EnteringPassword { email } => {
                if input.is_empty() {
                    return Advance::Prompt(text::REGISTER_PASSWORD_PROMPT);
                }
                Advance::Submit(AuthRequest::Login {
                    email: email.clone(),
                    password: input.to_owned(),
                })
            }
        }
    }
}

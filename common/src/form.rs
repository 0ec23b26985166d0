//! Form state shared by the admin, adoption, login and signup screens.

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::model::NewPlant;

// ─── Submit state machine ────────────────────────────────────────────────────

/// `idle → submitting → success | error`; an error goes back to
/// `submitting` on the next attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

impl SubmitState {
    /// Enter `Submitting`. Returns `false` (and changes nothing) while a
    /// submission is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self = SubmitState::Submitting;
        true
    }

    /// Record the outcome of the in-flight submission.
    pub fn finish<T, E: ToString>(&mut self, outcome: &Result<T, E>) {
        *self = match outcome {
            Ok(_) => SubmitState::Success,
            Err(e) => SubmitState::Error(e.to_string()),
        };
    }

    /// Fail without having submitted (client-side validation). Ignored
    /// while a submission is in flight. Returns whether the state changed.
    pub fn reject(&mut self, message: impl Into<String>) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self = SubmitState::Error(message.into());
        true
    }

    pub fn reset(&mut self) {
        *self = SubmitState::Idle;
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitState::Submitting)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitState::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// ─── Plant creation ──────────────────────────────────────────────────────────

/// Text fields of the admin "new plant" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantForm {
    pub name: String,
    pub scientific_name: String,
    pub description: String,
    /// One characteristic per line.
    pub characteristics: String,
    pub trivia: String,
}

impl PlantForm {
    /// Set a field by its form-control name. Unknown names are ignored.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        let value = value.into();
        match field {
            "nome" => self.name = value,
            "nomeCientifico" => self.scientific_name = value,
            "descricao" => self.description = value,
            "caracteristicasTexto" => self.characteristics = value,
            "curiosidades" => self.trivia = value,
            _ => {}
        }
    }

    /// Characteristics split on newlines, trimmed, blanks dropped.
    pub fn characteristic_list(&self) -> Vec<String> {
        self.characteristics
            .lines()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::validation("Informe o nome da planta."));
        }
        if self.scientific_name.trim().is_empty() {
            return Err(ServiceError::validation("Informe o nome científico."));
        }
        Ok(())
    }

    /// Insert payload; empty optional text becomes `null`.
    pub fn to_new_plant(&self, image_url: Option<String>) -> NewPlant {
        NewPlant {
            name: self.name.trim().to_string(),
            scientific_name: self.scientific_name.trim().to_string(),
            description: non_empty(&self.description),
            image_url,
            characteristics: self.characteristic_list(),
            trivia: non_empty(&self.trivia),
        }
    }
}

// ─── Adoption ────────────────────────────────────────────────────────────────

/// Fields of the adoption form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionForm {
    pub location: String,
    pub notes: String,
}

impl AdoptionForm {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.location.trim().is_empty() {
            return Err(ServiceError::validation("Informe o local do plantio."));
        }
        Ok(())
    }

    pub fn notes(&self) -> Option<String> {
        non_empty(&self.notes)
    }
}

// ─── Accounts ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ServiceError::validation("Informe e-mail e senha."));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub admin: bool,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.password != self.confirm {
            return Err(ServiceError::validation("Senhas não coincidem"));
        }
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty()
        {
            return Err(ServiceError::validation("Preencha todos os campos."));
        }
        Ok(())
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

// ─── tests ───────────────────────────────────────────────────────────────

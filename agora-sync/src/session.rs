//! Per-entity editing sessions.
//!
//! Each admin form is an explicit state machine rather than a pair of
//! ambient `editing`/`show_modal` flags: a session is idle, holds an
//! entity being edited, or holds the entity currently being submitted.
//! Invalid transitions are errors, which makes the concurrent-edit
//! invariants checkable.

use thiserror::Error;

/// An invalid session transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no entity is being edited")]
    NotEditing,

    #[error("a submission is in flight")]
    SubmissionInFlight,
}

/// Where a form currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum EditState<T> {
    Idle,
    Editing(T),
    Submitting(T),
}

// Hand-written so `Idle` is the default for any `T`.
impl<T> Default for EditState<T> {
    fn default() -> Self {
        EditState::Idle
    }
}

/// One modal form's lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession<T: Clone> {
    state: EditState<T>,
}

impl<T: Clone> Default for EditSession<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> EditSession<T> {
    /// A fresh, idle session.
    pub fn new() -> Self {
        Self {
            state: EditState::Idle,
        }
    }

    pub fn state(&self) -> &EditState<T> {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, EditState::Idle)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, EditState::Submitting(_))
    }

    /// Opens the form on an entity. Replacing an entity already being
    /// edited is allowed (the original forms reset freely); opening over
    /// an in-flight submission is not.
    pub fn open(&mut self, entity: T) -> Result<(), SessionError> {
        if self.is_submitting() {
            return Err(SessionError::SubmissionInFlight);
        }
        self.state = EditState::Editing(entity);
        Ok(())
    }

    /// Mutates the entity under edit.
    pub fn edit(&mut self, apply: impl FnOnce(&mut T)) -> Result<(), SessionError> {
        match &mut self.state {
            EditState::Editing(entity) => {
                apply(entity);
                Ok(())
            }
            EditState::Submitting(_) => Err(SessionError::SubmissionInFlight),
            EditState::Idle => Err(SessionError::NotEditing),
        }
    }

    /// Moves to Submitting and returns the entity to send. At most one
    /// submission per session can be in flight.
    pub fn begin_submit(&mut self) -> Result<T, SessionError> {
        match std::mem::take(&mut self.state) {
            EditState::Editing(entity) => {
                self.state = EditState::Submitting(entity.clone());
                Ok(entity)
            }
            EditState::Submitting(entity) => {
                self.state = EditState::Submitting(entity);
                Err(SessionError::SubmissionInFlight)
            }
            EditState::Idle => Err(SessionError::NotEditing),
        }
    }

    /// The submission was acknowledged; the form closes.
    pub fn complete(&mut self) -> Result<(), SessionError> {
        match std::mem::take(&mut self.state) {
            EditState::Submitting(_) => Ok(()),
            other => {
                self.state = other;
                Err(SessionError::NotEditing)
            }
        }
    }

    /// The submission failed; the form stays open with its state intact
    /// so the operator can retry explicitly.
    pub fn fail(&mut self) -> Result<(), SessionError> {
        match std::mem::take(&mut self.state) {
            EditState::Submitting(entity) => {
                self.state = EditState::Editing(entity);
                Ok(())
            }
            other => {
                self.state = other;
                Err(SessionError::NotEditing)
            }
        }
    }

    /// Discards the form. An in-flight submission cannot be cancelled.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if self.is_submitting() {
            return Err(SessionError::SubmissionInFlight);
        }
        self.state = EditState::Idle;
        Ok(())
    }
}

//! Partial updates.
//!
//! A GraphQL argument can be omitted, sent as an explicit `null`, or sent with a
//! value. [`Patch`] keeps those three cases apart so an update only touches the
//! fields the caller actually supplied.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Set(T),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}` cannot be null")]
pub struct PatchError {
    pub field: &'static str,
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    /// Merge into a non-nullable field. `Null` is rejected.
    pub fn apply(self, field: &'static str, target: &mut T) -> Result<(), PatchError> {
        match self {
            Patch::Absent => Ok(()),
            Patch::Null => Err(PatchError { field }),
            Patch::Set(value) => {
                *target = value;
                Ok(())
            }
        }
    }

    /// Merge into a nullable field. `Null` clears it.
    pub fn apply_optional(self, target: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *target = None,
            Patch::Set(value) => *target = Some(value),
        }
    }

    /// Fails when the patch would null out a non-nullable field, without
    /// touching anything.
    pub fn check_required(&self, field: &'static str) -> Result<(), PatchError> {
        match self {
            Patch::Null => Err(PatchError { field }),
            _ => Ok(()),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Set(v),
            None => Patch::Null,
        }
    }
}

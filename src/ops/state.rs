use super::OperationKind;
use crate::error::{OpError, Result};
use serde::{Deserialize, Serialize};

/// Whether an operation's effect is currently in place.
///
/// Stored in records as the boolean `applied` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum ApplyState {
    /// Constructed, or undone.
    #[default]
    Pending,
    /// Effect performed and not yet undone.
    Applied,
}

impl ApplyState {
    pub fn is_applied(self) -> bool {
        self == ApplyState::Applied
    }

    /// Guard run before performing an effect.
    ///
    /// Fails if the operation is already applied.
    pub fn begin_apply(self, kind: OperationKind) -> Result<()> {
        match self {
            ApplyState::Pending => Ok(()),
            ApplyState::Applied => Err(OpError::AlreadyApplied(kind)),
        }
    }

    /// Guard run before reversing an effect.
    ///
    /// Fails if the operation was never applied, or has been undone already.
    pub fn begin_undo(self, kind: OperationKind) -> Result<()> {
        match self {
            ApplyState::Applied => Ok(()),
            ApplyState::Pending => Err(OpError::NotApplied(kind)),
        }
    }

    pub fn mark_applied(&mut self) {
        log::trace!("{:?} -> Applied", self);
        *self = ApplyState::Applied;
    }

    pub fn mark_pending(&mut self) {
        log::trace!("{:?} -> Pending", self);
        *self = ApplyState::Pending;
    }
}

impl From<bool> for ApplyState {
    fn from(applied: bool) -> Self {
        if applied {
            ApplyState::Applied
        } else {
            ApplyState::Pending
        }
    }
}

impl From<ApplyState> for bool {
    fn from(state: ApplyState) -> Self {
        state.is_applied()
    }
}

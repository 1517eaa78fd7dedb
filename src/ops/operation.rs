//! The reversible operation contract.
//!
//! A concrete operation owns its validated paths and an [`ApplyState`], and
//! implements four capabilities:
//!
//! 1. **apply**: perform the effect
//! 2. **undo**: reverse a prior apply
//! 3. **to_record**: persist every field, including the applied state
//! 4. **from_record**: rebuild from an untrusted record, re-validating paths
//!
//! ## Round-trip
//!
//! For any instance `op`, `T::from_record(&op.to_record())` must equal `op`
//! on every field, applied or not.
//!
//! ## Example
//!
//! ```
//! use ordo::{ApplyState, Operation, OperationKind, Record, Result, SafePath};
//!
//! #[derive(Debug, PartialEq)]
//! struct Touch {
//!     target: SafePath,
//!     state: ApplyState,
//! }
//!
//! impl Operation for Touch {
//!     fn record_kind() -> OperationKind {
//!         OperationKind::Copy
//!     }
//!
//!     fn kind(&self) -> OperationKind {
//!         Self::record_kind()
//!     }
//!
//!     fn state(&self) -> ApplyState {
//!         self.state
//!     }
//!
//!     fn apply(&mut self) -> Result<()> {
//!         self.state.begin_apply(self.kind())?;
//!         self.state.mark_applied();
//!         Ok(())
//!     }
//!
//!     fn undo(&mut self) -> Result<()> {
//!         self.state.begin_undo(self.kind())?;
//!         self.state.mark_pending();
//!         Ok(())
//!     }
//!
//!     fn to_record(&self) -> Record {
//!         Record::new(self.kind())
//!             .with_path("target", &self.target)
//!             .with_state(self.state)
//!     }
//!
//!     fn from_record(record: &Record) -> Result<Self> {
//!         record.expect_kind(Self::record_kind())?;
//!         Ok(Touch {
//!             target: record.path("target")?,
//!             state: record.state()?,
//!         })
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let mut op = Touch { target: SafePath::new("notes/today.md")?, state: ApplyState::Pending };
//! op.apply()?;
//! assert_eq!(Touch::from_record(&op.to_record())?, op);
//! # Ok(())
//! # }
//! ```

use super::{ApplyState, OperationKind, Record};
use crate::error::Result;
use std::fmt;

/// A single reversible filesystem mutation.
///
/// `from_record` is bound by `Self: Sized`, so the trait stays usable as
/// `Box<dyn Operation>` for heterogeneous sequences.
pub trait Operation: fmt::Debug {
    /// Type discriminator this type writes and accepts.
    ///
    /// [`Registry::register`](super::Registry::register) binds decoders under
    /// this tag.
    fn record_kind() -> OperationKind
    where
        Self: Sized;

    /// Type discriminator written under the record's `type` key.
    ///
    /// Must equal `record_kind()`.
    fn kind(&self) -> OperationKind;

    fn state(&self) -> ApplyState;

    fn is_applied(&self) -> bool {
        self.state().is_applied()
    }

    /// Performs the effect.
    ///
    /// Afterwards `state()` is [`ApplyState::Applied`]. On error the state
    /// must be left unchanged.
    fn apply(&mut self) -> Result<()>;

    /// Reverses a prior `apply`.
    ///
    /// Afterwards `state()` is [`ApplyState::Pending`]. Calling it on a
    /// pending operation fails with `NotApplied`.
    fn undo(&mut self) -> Result<()>;

    /// Persists every field needed to rebuild this instance.
    fn to_record(&self) -> Record;

    /// Rebuilds an instance from an untrusted record.
    ///
    /// Path fields go through validation again; unsafe paths fail with
    /// `InvalidPath` and shape problems with `MalformedRecord`.
    fn from_record(record: &Record) -> Result<Self>
    where
        Self: Sized;
}

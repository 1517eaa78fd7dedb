//! Concrete operations shared by the integration tests.
//!
//! These only track state; the filesystem effect of a real operation lives in
//! the crate that implements it.

#![allow(dead_code)]

use ordo::{ApplyState, OpError, Operation, OperationKind, Record, Result, SafePath};

/// Installs a test logger once per binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Moves `source` to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Relocate {
    pub source: SafePath,
    pub target: SafePath,
    pub state: ApplyState,
}

impl Relocate {
    pub fn new(source: &str, target: &str) -> Result<Self> {
        Ok(Relocate {
            source: SafePath::new(source)?,
            target: SafePath::new(target)?,
            state: ApplyState::Pending,
        })
    }
}

impl Operation for Relocate {
    fn record_kind() -> OperationKind {
        OperationKind::Move
    }

    fn kind(&self) -> OperationKind {
        Self::record_kind()
    }

    fn state(&self) -> ApplyState {
        self.state
    }

    fn apply(&mut self) -> Result<()> {
        self.state.begin_apply(self.kind())?;
        self.state.mark_applied();
        Ok(())
    }

    fn undo(&mut self) -> Result<()> {
        self.state.begin_undo(self.kind())?;
        self.state.mark_pending();
        Ok(())
    }

    fn to_record(&self) -> Record {
        Record::new(self.kind())
            .with_path("source", &self.source)
            .with_path("target", &self.target)
            .with_state(self.state)
    }

    fn from_record(record: &Record) -> Result<Self> {
        record.expect_kind(Self::record_kind())?;
        Ok(Relocate {
            source: record.path("source")?,
            target: record.path("target")?,
            state: record.state()?,
        })
    }
}

/// Deletes `target`, optionally keeping a backup copy.
///
/// Refuses to apply when `locked` is set, to exercise effect failures.
#[derive(Debug, Clone, PartialEq)]
pub struct Remove {
    pub target: SafePath,
    pub backup: Option<SafePath>,
    pub locked: bool,
    pub state: ApplyState,
}

impl Remove {
    pub fn new(target: &str, backup: Option<&str>) -> Result<Self> {
        Ok(Remove {
            target: SafePath::new(target)?,
            backup: backup.map(SafePath::new).transpose()?,
            locked: false,
            state: ApplyState::Pending,
        })
    }
}

impl Operation for Remove {
    fn record_kind() -> OperationKind {
        OperationKind::Delete
    }

    fn kind(&self) -> OperationKind {
        Self::record_kind()
    }

    fn state(&self) -> ApplyState {
        self.state
    }

    fn apply(&mut self) -> Result<()> {
        self.state.begin_apply(self.kind())?;
        if self.locked {
            return Err(OpError::Other(anyhow::anyhow!(
                "Target is locked: {}",
                self.target
            )));
        }
        self.state.mark_applied();
        Ok(())
    }

    fn undo(&mut self) -> Result<()> {
        self.state.begin_undo(self.kind())?;
        self.state.mark_pending();
        Ok(())
    }

    fn to_record(&self) -> Record {
        let record = Record::new(self.kind())
            .with_path("target", &self.target)
            .with_bool("locked", self.locked)
            .with_state(self.state);

        match &self.backup {
            Some(backup) => record.with_path("backup", backup),
            None => record.with_value("backup", serde_json::Value::Null),
        }
    }

    fn from_record(record: &Record) -> Result<Self> {
        record.expect_kind(Self::record_kind())?;
        Ok(Remove {
            target: record.path("target")?,
            backup: record.optional_path("backup")?,
            locked: record.bool("locked")?,
            state: record.state()?,
        })
    }
}

//! Reversible operations and their persisted form.

mod kind;
mod operation;
mod record;
mod registry;
mod state;

pub use kind::OperationKind;
pub use operation::Operation;
pub use record::{APPLIED_KEY, Record, TYPE_KEY};
pub use registry::Registry;
pub use state::ApplyState;

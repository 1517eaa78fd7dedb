#![doc = include_str!("../README.md")]

pub mod error;
pub mod ops;
pub mod path;

pub use error::*;
pub use ops::{ApplyState, Operation, OperationKind, Record, Registry};
pub use path::{SafePath, validate_path};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Kind-keyed decoder table for heterogeneous operations.
//!
//! Concrete operations live outside this crate, so the set of decoders stays
//! open while the tag vocabulary ([`OperationKind`]) stays closed. An
//! orchestrator registers each variant once and can then rebuild
//! `Box<dyn Operation>` values from stored records.

use super::{Operation, OperationKind, Record};
use crate::error::{OpError, Result};
use std::collections::HashMap;

type Decoder = fn(&Record) -> Result<Box<dyn Operation>>;

fn decode_as<T: Operation + 'static>(record: &Record) -> Result<Box<dyn Operation>> {
    Ok(Box::new(T::from_record(record)?))
}

#[derive(Default)]
pub struct Registry {
    decoders: HashMap<OperationKind, Decoder>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `T::record_kind()` to `T::from_record`.
    pub fn register<T: Operation + 'static>(&mut self) -> Result<()> {
        let kind = T::record_kind();
        if self.decoders.contains_key(&kind) {
            return Err(OpError::DuplicateKind(kind));
        }

        log::debug!(
            "Registered decoder for '{}': {}",
            kind,
            std::any::type_name::<T>()
        );
        self.decoders.insert(kind, decode_as::<T>);
        Ok(())
    }

    pub fn contains(&self, kind: OperationKind) -> bool {
        self.decoders.contains_key(&kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<OperationKind> {
        let mut kinds: Vec<_> = self.decoders.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Rebuilds an operation from its record.
    ///
    /// The record's `type` tag selects the decoder; the decoder re-validates
    /// every path field.
    pub fn decode(&self, record: &Record) -> Result<Box<dyn Operation>> {
        let kind = record.kind()?;
        let decoder = self
            .decoders
            .get(&kind)
            .ok_or(OpError::Unregistered(kind))?;

        log::debug!("Decoding '{}' record", kind);
        decoder(record)
    }

    /// Parses JSON text, then decodes it.
    pub fn decode_json(&self, text: &str) -> Result<Box<dyn Operation>> {
        self.decode(&Record::from_json(text)?)
    }

    /// Decodes records in order, stopping at the first failure.
    pub fn decode_all<'a, I>(&self, records: I) -> Result<Vec<Box<dyn Operation>>>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        records
            .into_iter()
            .map(|record| self.decode(record))
            .collect()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

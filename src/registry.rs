//! In-memory id → title registry
//!
//! Callers fill a [`Registry`] from parsed [`EnumEntry`] records and then look
//! titles up by registry id. Nothing here touches the filesystem; persisting
//! the registry is left to the embedding application.

use crate::parser::ast::{EntryType, EnumEntry};
use log::debug;
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("id {id} is already registered as '{existing}', cannot register '{title}'")]
    DuplicateId {
        id: u32,
        existing: String,
        title: String,
    },
}

/// Registered entries keyed by their `id:` field.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: FxHashMap<u32, EnumEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every entry, failing on the first duplicate id.
    pub fn from_entries<I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = EnumEntry>,
    {
        let mut registry = Self::new();
        for entry in entries {
            registry.insert(entry)?;
        }
        debug!("registry holds {} entries", registry.len());
        Ok(registry)
    }

    pub fn insert(&mut self, entry: EnumEntry) -> Result<(), RegistryError> {
        if let Some(existing) = self.entries.get(&entry.id) {
            return Err(RegistryError::DuplicateId {
                id: entry.id,
                existing: existing.title.clone(),
                title: entry.title,
            });
        }

        self.entries.insert(entry.id, entry);
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&EnumEntry> {
        self.entries.get(&id)
    }

    pub fn title(&self, id: u32) -> Option<&str> {
        self.get(id).map(|entry| entry.title.as_str())
    }

    /// Remove the first entry (lowest id) with the given title.
    pub fn remove_by_title(&mut self, title: &str) -> Option<EnumEntry> {
        let id = self
            .entries
            .values()
            .filter(|entry| entry.title == title)
            .map(|entry| entry.id)
            .min()?;
        self.entries.remove(&id)
    }

    /// Entries of one type, ascending by id.
    pub fn of_type(&self, entry_type: EntryType) -> Vec<&EnumEntry> {
        let mut matching: Vec<&EnumEntry> = self
            .entries
            .values()
            .filter(|entry| entry.entry_type == entry_type)
            .collect();
        matching.sort_by_key(|entry| entry.id);
        matching
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

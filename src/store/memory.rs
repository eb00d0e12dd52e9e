// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory content storage.
//!
//! Used by tests and benches, and by embedders that keep definitions somewhere other than a
//! directory tree. Writes and deletes can be made to fail per path to exercise error handling.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{ContentAccess, StorageError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEvent {
    Write(String),
    Delete(String),
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<String, Vec<u8>>,
    failing_writes: BTreeSet<String>,
    failing_deletes: BTreeSet<String>,
    events: Vec<StorageEvent>,
}

#[derive(Debug, Default)]
pub struct MemoryContentAccess {
    state: Mutex<MemoryState>,
}

impl MemoryContentAccess {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds `path` without recording an event.
    pub fn insert(&self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.state().files.insert(path.into(), contents.into());
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.state().files.get(path).cloned()
    }

    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path)
            .map(|contents| String::from_utf8_lossy(&contents).into_owned())
    }

    pub fn paths(&self) -> Vec<String> {
        self.state().files.keys().cloned().collect()
    }

    /// Writes and deletes performed through [`ContentAccess`], in order.
    pub fn events(&self) -> Vec<StorageEvent> {
        self.state().events.clone()
    }

    pub fn clear_events(&self) {
        self.state().events.clear();
    }

    pub fn fail_writes_to(&self, path: impl Into<String>) {
        self.state().failing_writes.insert(path.into());
    }

    pub fn fail_deletes_to(&self, path: impl Into<String>) {
        self.state().failing_deletes.insert(path.into());
    }

    pub fn clear_failures(&self) {
        let mut state = self.state();
        state.failing_writes.clear();
        state.failing_deletes.clear();
    }
}

impl ContentAccess for MemoryContentAccess {
    fn exists(&self, path: &str) -> bool {
        self.state().files.contains_key(path)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.state()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                path: path.to_owned(),
            })
    }

    fn write(&self, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        let mut state = self.state();
        if state.failing_writes.contains(path) {
            return Err(StorageError::Rejected {
                operation: "write",
                path: path.to_owned(),
                reason: "injected failure".to_owned(),
            });
        }

        state.files.insert(path.to_owned(), contents.to_vec());
        state.events.push(StorageEvent::Write(path.to_owned()));
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<bool, StorageError> {
        let mut state = self.state();
        if state.failing_deletes.contains(path) {
            return Err(StorageError::Rejected {
                operation: "delete",
                path: path.to_owned(),
                reason: "injected failure".to_owned(),
            });
        }

        let existed = state.files.remove(path).is_some();
        if existed {
            state.events.push(StorageEvent::Delete(path.to_owned()));
        }
        Ok(existed)
    }
}

// Copyright 2025 the Mind Canvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tracing::{debug, warn};

use crate::backend::{STORAGE_KEY, StorageBackend};
use crate::error::Result;
use crate::snapshot::CanvasSnapshot;

/// Reads and writes the canvas record through a [`StorageBackend`].
#[derive(Clone, Debug)]
pub struct CanvasStorage<B> {
    backend: B,
}

impl<B: StorageBackend> CanvasStorage<B> {
    /// Wraps `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the backend mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Writes `snapshot`, replacing the stored record.
    ///
    /// # Errors
    ///
    /// Encoding or backend failures.
    pub fn save(&mut self, snapshot: &CanvasSnapshot) -> Result<()> {
        let text = snapshot.to_json()?;
        self.backend.save(STORAGE_KEY, &text)?;
        debug!(
            elements = snapshot.elements.len(),
            bytes = text.len(),
            "canvas saved"
        );
        Ok(())
    }

    /// Reads the stored record.
    ///
    /// # Errors
    ///
    /// Backend failures, or a record that does not decode.
    pub fn try_load(&self) -> Result<Option<CanvasSnapshot>> {
        match self.backend.load(STORAGE_KEY)? {
            Some(text) => Ok(Some(CanvasSnapshot::from_json(&text)?)),
            None => Ok(None),
        }
    }

    /// Reads the stored record, treating every failure as "nothing saved".
    ///
    /// A record that does not decode is discarded so the next start does not
    /// trip over it again.
    pub fn load(&mut self) -> Option<CanvasSnapshot> {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "could not load saved canvas; starting empty");
                self.discard();
                None
            }
        }
    }

    /// Removes the stored record.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub fn clear(&mut self) -> Result<()> {
        self.backend.clear(STORAGE_KEY)
    }

    /// Removes the stored record, logging instead of failing.
    pub fn discard(&mut self) {
        if let Err(err) = self.backend.clear(STORAGE_KEY) {
            warn!(%err, "could not discard saved canvas");
        }
    }
}

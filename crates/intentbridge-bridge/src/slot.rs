// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! A process-wide, replaceable handle.
//!
//! The Android host may recreate its Activity (rotation, process restore)
//! and call `init` again. The JNI layer keeps the current Activity in a
//! [`HandleSlot`]: each registration replaces the previous handle, and a
//! launch that already cloned the old handle keeps it alive until it
//! returns.

use std::sync::{Arc, PoisonError, RwLock};

/// Holds at most one shared handle; replacing it never blocks on readers
/// beyond the swap itself.
#[derive(Debug)]
pub struct HandleSlot<T> {
    inner: RwLock<Option<Arc<T>>>,
}

impl<T> HandleSlot<T> {
    pub const fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Store `value`, returning the handle it replaced.
    ///
    /// The returned handle is dropped by the caller outside the lock.
    pub fn replace(&self, value: T) -> Option<Arc<T>> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Arc::new(value))
    }

    /// The current handle, if one has been stored.
    pub fn current(&self) -> Option<Arc<T>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T> Default for HandleSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

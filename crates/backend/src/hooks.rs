// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pre-commit hooks
//!
//! A hook runs against a batch transaction right before it commits, e.g. to
//! persist the consistent index alongside the batch.
//!
//! ## Locking
//!
//! The hook is handed `&mut Tx`. Whoever invokes it must already hold
//! exclusive access to the transaction for the whole call, so a hook never
//! takes the transaction lock itself and never races another writer.

/// Logic executed during a transaction's lifetime
pub trait Hooks<Tx: ?Sized> {
    /// Called before the transaction commits
    fn on_pre_commit(&self, tx: &mut Tx);
}

impl<Tx: ?Sized, F> Hooks<Tx> for F
where
    F: Fn(&mut Tx),
{
    fn on_pre_commit(&self, tx: &mut Tx) {
        self(tx)
    }
}

/// Named wrapper for call sites that need a concrete hook type
#[derive(Clone, Copy)]
pub struct HookFn<F>(pub F);

impl<F> HookFn<F> {
    pub fn new(on_pre_commit: F) -> Self {
        Self(on_pre_commit)
    }
}

impl<Tx: ?Sized, F> Hooks<Tx> for HookFn<F>
where
    F: Fn(&mut Tx),
{
    fn on_pre_commit(&self, tx: &mut Tx) {
        (self.0)(tx)
    }
}

/// Hooks that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<Tx: ?Sized> Hooks<Tx> for NoHooks {
    fn on_pre_commit(&self, _tx: &mut Tx) {}
}

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;

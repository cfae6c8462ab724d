// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Kintai attendance system.
//!
//! This crate provides in-memory implementations of the domain's
//! repository traits. They are the reference implementation of the storage
//! contract and back the use-case and scenario tests; a database-backed
//! implementation must honor the same rules:
//!
//! - **Uniqueness**: one attendance record and at most one correction per
//!   `(user_id, work_date)`. Saving an aggregate whose key is already held
//!   by a different aggregate id fails with
//!   [`RepositoryError::DuplicateKey`](kintai_domain::RepositoryError).
//! - **Delta-only saves**: only facts whose persistence state is
//!   `Pending` are inserted, stamped with the write time. Re-saving a
//!   loaded aggregate inserts nothing.
//! - **JSON punch column**: a correction event's punch list is stored as
//!   the JSON array produced by the domain's `encode_punches`, exactly as
//!   a relational implementation would store it in a generic JSON column.
//!
//! Stores hand out deep copies: a loaded aggregate is private to its
//! use-case invocation and never shares memory with the store.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod corrections;
mod data_models;
mod records;
mod rules;

#[cfg(test)]
mod tests;

pub use corrections::MemoryAttendanceCorrectionRepository;
pub use records::MemoryAttendanceRecordRepository;
pub use rules::MemoryAttendanceRuleRepository;

use chrono::NaiveDateTime;
use kintai_domain::RepositoryError;
use std::sync::{Mutex, MutexGuard};

/// The write timestamp stamped onto newly inserted facts.
pub(crate) fn write_time() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Locks a store, converting a poisoned mutex into a storage error.
pub(crate) fn lock_store<T>(store: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    store
        .lock()
        .map_err(|_| RepositoryError::Storage(String::from("store mutex poisoned")))
}

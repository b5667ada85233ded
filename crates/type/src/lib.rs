// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! Dynamic value model for Hostlink.
//!
//! Managed objects produce and consume [`Value`]s: a runtime-tagged union of
//! the types an external routine can exchange with the host database. The
//! temporal types carry the SQL wire codec (a Julian-day based calendar
//! transform) that the stored format depends on, bit for bit.

pub mod dispatch;
pub mod value;

pub use dispatch::{Dispatch, DispatchError, MethodId, ObjectRef};
pub use value::{Date, Decimal, Time, Timestamp, Type, Value};

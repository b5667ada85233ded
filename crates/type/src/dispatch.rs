// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! Name-only dynamic dispatch.
//!
//! A managed object is anything that can resolve a method by name and invoke
//! it with positional arguments. Lookup is by name only; overloads are not
//! distinguished.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::value::Value;

/// Opaque handle to a resolved method. Only meaningful to the [`Dispatch`]
/// implementation that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodId(pub u32);

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
	#[error("method '{name}' not found")]
	MethodNotFound {
		name: String,
	},

	#[error("invocation failed: {message}")]
	Failed {
		message: String,
	},
}

/// Dynamic-dispatch capability of a managed object.
///
/// `find_method` resolves by name only. `invoke` takes positional arguments
/// and returns a single value; a method without a result returns
/// [`Value::Undefined`].
pub trait Dispatch: Send {
	fn find_method(&self, name: &str) -> Result<MethodId, DispatchError>;

	fn invoke(&mut self, method: MethodId, args: &[Value]) -> Result<Value, DispatchError>;
}

/// Shared reference to a live managed object.
pub type ObjectRef = Arc<Mutex<dyn Dispatch + Send>>;

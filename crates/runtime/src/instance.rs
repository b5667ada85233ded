// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use hostlink_type::{DispatchError, ObjectRef, Value};
use tracing::warn;

use crate::{Result, error::HostError};

/// Invoke a named method on a live managed object.
///
/// Resolution is by name only. Invocation failures that are not resolution
/// failures degrade to the generic [`HostError::Invocation`]; the underlying
/// detail is logged and discarded.
pub fn invoke_on(object: &ObjectRef, method: &str, args: &[Value]) -> Result<Value> {
	let mut object = object.lock();

	let id = object.find_method(method)?;
	object.invoke(id, args).map_err(|err| match err {
		DispatchError::Failed {
			message,
		} => {
			warn!(method, %message, "managed invocation failed");
			HostError::Invocation
		}
		other => other.into(),
	})
}

/// A handle to one managed object living inside an execution domain.
///
/// Owned by exactly one routine adapter. Must not be used after `release`, or
/// after the domain housing it is unloaded.
pub struct ObjectInstance {
	object: Option<ObjectRef>,
}

impl ObjectInstance {
	pub(crate) fn new(object: ObjectRef) -> Self {
		Self {
			object: Some(object),
		}
	}

	pub fn is_released(&self) -> bool {
		self.object.is_none()
	}

	/// Invoke a method that takes no arguments.
	pub fn execute(&mut self, method: &str) -> Result<Value> {
		self.execute_with(method, &[])
	}

	/// Invoke a method with positional arguments.
	pub fn execute_with(&mut self, method: &str, args: &[Value]) -> Result<Value> {
		let object = self.object.as_ref().ok_or(HostError::InstanceReleased)?;
		invoke_on(object, method, args)
	}

	/// Release the wrapped handle. Idempotent.
	pub fn release(&mut self) {
		self.object = None;
	}
}

impl Drop for ObjectInstance {
	fn drop(&mut self) {
		self.release();
	}
}

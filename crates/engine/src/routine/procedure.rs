// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use hostlink_runtime::ObjectInstance;
use hostlink_type::Value;

use crate::{
	descriptor::ParamDesc,
	routine::{ExternalResultSet, convert_args},
	sink::{Encoding, ErrorSink},
};

/// An external selectable procedure. `open` calls the declared method, which
/// must return a managed row source; rows are then pulled through the
/// returned [`ExternalResultSet`].
pub struct ExternalProcedure {
	instance: ObjectInstance,
	method: String,
}

impl ExternalProcedure {
	pub(crate) fn new(instance: ObjectInstance, method: String) -> Self {
		Self {
			instance,
			method,
		}
	}

	pub fn method(&self) -> &str {
		&self.method
	}

	/// Open the procedure's cursor. Returns `None` when the call fails or the
	/// method returns anything but an object.
	pub fn open(&mut self, args: &[ParamDesc], sink: &mut dyn ErrorSink) -> Option<ExternalResultSet> {
		let values = convert_args(args, sink)?;

		match self.instance.execute_with(&self.method, &values) {
			Ok(Value::Object(object)) => Some(ExternalResultSet::new(object)),
			Ok(other) => {
				sink.add_string(
					&format!("procedure method '{}' returned a {} instead of a row source", self.method, other.get_type()),
					Encoding::Ascii,
				);
				None
			}
			Err(err) => {
				sink.add_string(&err.to_string(), Encoding::Ascii);
				None
			}
		}
	}

	/// Non-selectable execution. All work happens in `open`; this exists so
	/// the host can drive procedures uniformly.
	pub fn execute(&mut self, _args: &[ParamDesc], _sink: &mut dyn ErrorSink) -> bool {
		true
	}

	/// Drop the managed instance. Idempotent.
	pub fn release(&mut self) {
		self.instance.release();
	}
}

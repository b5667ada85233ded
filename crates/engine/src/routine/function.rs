// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use hostlink_runtime::ObjectInstance;

use crate::{
	convert::value_to_descriptor,
	descriptor::ParamDesc,
	routine::convert_args,
	sink::{Encoding, ErrorSink},
};

/// An external function: one managed instance and the method to call on it.
///
/// `execute` reports success as a boolean and failure detail through the
/// sink, never as a structured error.
pub struct ExternalFunction {
	instance: ObjectInstance,
	method: String,
}

impl ExternalFunction {
	pub(crate) fn new(instance: ObjectInstance, method: String) -> Self {
		Self {
			instance,
			method,
		}
	}

	pub fn method(&self) -> &str {
		&self.method
	}

	/// Run the function. Arguments are marshaled in, the returned value is
	/// written into `result` when one is wanted.
	pub fn execute(&mut self, args: &[ParamDesc], result: Option<&mut ParamDesc>, sink: &mut dyn ErrorSink) -> bool {
		let Some(values) = convert_args(args, sink) else {
			return false;
		};

		let returned = match self.instance.execute_with(&self.method, &values) {
			Ok(value) => value,
			Err(err) => {
				sink.add_string(&err.to_string(), Encoding::Ascii);
				return false;
			}
		};

		if let Some(result) = result {
			if let Err(err) = value_to_descriptor(&returned, result) {
				sink.add_string(&err.to_string(), Encoding::Ascii);
				return false;
			}
		}

		true
	}

	/// Drop the managed instance. Idempotent.
	pub fn release(&mut self) {
		self.instance.release();
	}
}

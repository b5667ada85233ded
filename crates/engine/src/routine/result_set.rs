// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use hostlink_runtime::invoke_on;
use hostlink_type::{ObjectRef, Value};
use tracing::warn;

use crate::{
	convert::value_to_descriptor,
	descriptor::ParamDesc,
	sink::{Encoding, ErrorSink},
};

/// Method the row source advances on. Returns a boolean: true while a row is
/// available.
pub const READ_METHOD: &str = "Read";
/// Method fetching one column of the current row, by zero-based position.
pub const GET_VALUE_METHOD: &str = "GetValue";
/// Method releasing the row source's resources.
pub const CLOSE_METHOD: &str = "Close";

/// A cursor over a managed row source, driven by the `Read` / `GetValue` /
/// `Close` convention. Closed on drop if not released explicitly.
pub struct ExternalResultSet {
	object: Option<ObjectRef>,
}

impl ExternalResultSet {
	pub(crate) fn new(object: ObjectRef) -> Self {
		Self {
			object: Some(object),
		}
	}

	pub fn is_released(&self) -> bool {
		self.object.is_none()
	}

	/// Advance to the next row. False when exhausted, released or failed;
	/// failure detail goes to the sink.
	pub fn fetch(&mut self, sink: &mut dyn ErrorSink) -> bool {
		let Some(object) = self.object.as_ref() else {
			sink.add_string("result set is already released", Encoding::Ascii);
			return false;
		};

		match invoke_on(object, READ_METHOD, &[]) {
			Ok(Value::Boolean(more)) => more,
			Ok(other) => {
				sink.add_string(
					&format!("'{}' returned a {} instead of a boolean", READ_METHOD, other.get_type()),
					Encoding::Ascii,
				);
				false
			}
			Err(err) => {
				sink.add_string(&err.to_string(), Encoding::Ascii);
				false
			}
		}
	}

	/// Fetch the column at `index` of the current row into `target`.
	pub fn get_value(&mut self, index: u16, target: &mut ParamDesc, sink: &mut dyn ErrorSink) -> bool {
		let Some(object) = self.object.as_ref() else {
			sink.add_string("result set is already released", Encoding::Ascii);
			return false;
		};

		let value = match invoke_on(object, GET_VALUE_METHOD, &[Value::int4(index as i32)]) {
			Ok(value) => value,
			Err(err) => {
				sink.add_string(&err.to_string(), Encoding::Ascii);
				return false;
			}
		};

		if let Err(err) = value_to_descriptor(&value, target) {
			sink.add_string(&err.to_string(), Encoding::Ascii);
			return false;
		}

		true
	}

	/// Close the row source and drop the handle. Idempotent.
	pub fn release(&mut self) {
		if let Some(object) = self.object.take() {
			if let Err(err) = invoke_on(&object, CLOSE_METHOD, &[]) {
				warn!(%err, "closing the row source failed");
			}
		}
	}
}

impl Drop for ExternalResultSet {
	fn drop(&mut self) {
		self.release();
	}
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! Routine adapters: the objects the host database drives per call.
//!
//! A routine is declared as `Class,Assembly::Method`. [`RoutineName`] parses
//! the declaration; the adapters own one managed instance each and marshal
//! arguments and results through [`crate::convert`].

use hostlink_runtime::{HostError, Result};
use hostlink_type::Value;

use crate::{
	convert::descriptor_to_value,
	descriptor::ParamDesc,
	sink::{Encoding, ErrorSink},
};

mod function;
mod procedure;
mod result_set;

pub use function::ExternalFunction;
pub use procedure::ExternalProcedure;
pub use result_set::{CLOSE_METHOD, ExternalResultSet, GET_VALUE_METHOD, READ_METHOD};

/// A parsed external routine declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutineName {
	pub class: String,
	pub assembly: String,
	pub method: String,
}

impl RoutineName {
	/// Parse `Class,Assembly::Method`. The class ends at the first comma and
	/// the assembly at the first `::`; all three parts must be nonempty.
	pub fn parse(name: &str) -> Result<Self> {
		let invalid = || HostError::RoutineName {
			name: name.to_string(),
		};

		let (class, rest) = name.split_once(',').ok_or_else(invalid)?;
		let (assembly, method) = rest.split_once("::").ok_or_else(invalid)?;

		if class.is_empty() || assembly.is_empty() || method.is_empty() {
			return Err(invalid());
		}

		Ok(Self {
			class: class.to_string(),
			assembly: assembly.to_string(),
			method: method.to_string(),
		})
	}
}

/// Marshal a slice of argument descriptors into dynamic values.
fn convert_args(args: &[ParamDesc], sink: &mut dyn ErrorSink) -> Option<Vec<Value>> {
	let mut values = Vec::with_capacity(args.len());
	for arg in args {
		match descriptor_to_value(arg) {
			Ok(value) => values.push(value),
			Err(err) => {
				sink.add_string(&err.to_string(), Encoding::Ascii);
				return None;
			}
		}
	}
	Some(values)
}

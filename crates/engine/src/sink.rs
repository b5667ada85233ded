// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! Error reporting toward the host database.
//!
//! Failures never cross the routine boundary structurally. Each entry point
//! takes an [`ErrorSink`] and appends human-readable messages to it; the host
//! turns them into its own status vector.

/// Text encoding the host expects for a message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
	Ascii,
	Utf8,
}

pub trait ErrorSink {
	fn add_string(&mut self, message: &str, encoding: Encoding);
}

/// Sink that keeps messages in memory, for tests and embedding.
#[derive(Default, Debug)]
pub struct CollectingSink {
	messages: Vec<String>,
}

impl CollectingSink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn messages(&self) -> &[String] {
		&self.messages
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	pub fn last(&self) -> Option<&str> {
		self.messages.last().map(String::as_str)
	}
}

impl ErrorSink for CollectingSink {
	fn add_string(&mut self, message: &str, _encoding: Encoding) {
		self.messages.push(message.to_string());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_collects_in_order() {
		let mut sink = CollectingSink::new();
		assert!(sink.is_empty());

		sink.add_string("first", Encoding::Ascii);
		sink.add_string("second", Encoding::Utf8);

		assert_eq!(sink.messages(), &["first", "second"]);
		assert_eq!(sink.last(), Some("second"));
	}
}

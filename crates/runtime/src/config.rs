// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use serde::{Deserialize, Serialize};

/// Setup configuration for an execution domain: where the domain resolves
/// assemblies from and how it identifies itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSetup {
	pub application_name: String,
	pub base_path: String,
	pub private_bin_path: String,
	pub shadow_copy: bool,
}

impl DomainSetup {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn application_name(mut self, name: impl Into<String>) -> Self {
		self.application_name = name.into();
		self
	}

	pub fn base_path(mut self, path: impl Into<String>) -> Self {
		self.base_path = path.into();
		self
	}

	pub fn private_bin_path(mut self, path: impl Into<String>) -> Self {
		self.private_bin_path = path.into();
		self
	}

	pub fn shadow_copy(mut self, enabled: bool) -> Self {
		self.shadow_copy = enabled;
		self
	}
}

/// Identity (evidence) under which an execution domain runs. May be absent
/// wherever it is accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainIdentity {
	pub name: String,
	pub token: Option<String>,
}

impl DomainIdentity {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			token: None,
		}
	}

	pub fn token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_setup_builder() {
		let setup = DomainSetup::new()
			.application_name("external-engine")
			.base_path("/opt/engine")
			.private_bin_path("bin")
			.shadow_copy(false);

		assert_eq!(setup.application_name, "external-engine");
		assert_eq!(setup.base_path, "/opt/engine");
		assert_eq!(setup.private_bin_path, "bin");
		assert!(!setup.shadow_copy);
	}

	#[test]
	fn test_setup_serde_roundtrip() {
		let setup = DomainSetup::new().application_name("x").base_path("y");
		let json = serde_json::to_string(&setup).unwrap();
		let recovered: DomainSetup = serde_json::from_str(&json).unwrap();
		assert_eq!(setup, recovered);
	}
}

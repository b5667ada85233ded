// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use tracing::debug;

use crate::{
	Result,
	config::{DomainIdentity, DomainSetup},
	error::HostError,
	instance::ObjectInstance,
	provider::RuntimeDomain,
};

/// One isolated execution domain plus its optionally-owned setup and identity
/// objects. Instances created here must not be used after the domain is
/// released.
pub struct ExecutionDomain {
	inner: Option<Box<dyn RuntimeDomain>>,
	setup: Option<DomainSetup>,
	identity: Option<DomainIdentity>,
}

impl ExecutionDomain {
	pub(crate) fn new(
		inner: Box<dyn RuntimeDomain>,
		setup: Option<DomainSetup>,
		identity: Option<DomainIdentity>,
	) -> Self {
		Self {
			inner: Some(inner),
			setup,
			identity,
		}
	}

	pub fn setup(&self) -> Option<&DomainSetup> {
		self.setup.as_ref()
	}

	pub fn identity(&self) -> Option<&DomainIdentity> {
		self.identity.as_ref()
	}

	pub fn is_released(&self) -> bool {
		self.inner.is_none()
	}

	/// Instantiate a class from an assembly inside this domain.
	pub fn create_instance(&mut self, assembly: &str, class: &str) -> Result<ObjectInstance> {
		let inner = self.inner.as_mut().ok_or(HostError::DomainReleased)?;
		let object = inner.create_instance(assembly, class)?;
		debug!(assembly, class, "object instance created");
		Ok(ObjectInstance::new(object))
	}

	/// Tear down the domain handle and owned setup/identity objects. Safe to
	/// call multiple times; references are cleared after the first release.
	pub fn release(&mut self) -> Result<()> {
		if let Some(mut inner) = self.inner.take() {
			inner.unload()?;
		}
		self.setup = None;
		self.identity = None;
		Ok(())
	}

	pub(crate) fn take_inner(&mut self) -> Option<Box<dyn RuntimeDomain>> {
		self.setup = None;
		self.identity = None;
		self.inner.take()
	}
}

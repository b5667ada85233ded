// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use tracing::debug;

use crate::{
	Result,
	config::{DomainIdentity, DomainSetup},
	domain::ExecutionDomain,
	error::HostError,
	provider::{HostedRuntime, RuntimeProvider},
};

/// Lifecycle state of the runtime host. Stopping a started host returns it to
/// `Loaded`; there is no distinct stopped state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HostState {
	Unloaded,
	Loaded,
	Started,
}

/// Owns the one hosted runtime handle of the process and enforces the
/// `Unloaded -> Loaded -> Started -> Loaded -> Unloaded` state machine.
///
/// Failures raise a [`HostError`] with a human-readable reason and are never
/// retried here; retry policy, if any, belongs to the caller.
pub struct RuntimeHost {
	provider: Box<dyn RuntimeProvider>,
	runtime: Option<Box<dyn HostedRuntime>>,
	state: HostState,
}

impl RuntimeHost {
	pub fn new(provider: Box<dyn RuntimeProvider>) -> Self {
		Self {
			provider,
			runtime: None,
			state: HostState::Unloaded,
		}
	}

	pub fn state(&self) -> HostState {
		self.state
	}

	pub fn is_loaded(&self) -> bool {
		self.state != HostState::Unloaded
	}

	pub fn is_started(&self) -> bool {
		self.state == HostState::Started
	}

	/// Bind the hosted runtime. Fails if one is already loaded.
	pub fn load(&mut self) -> Result<()> {
		if self.is_loaded() {
			return Err(HostError::AlreadyLoaded);
		}

		self.runtime = Some(self.provider.create_runtime()?);
		self.state = HostState::Loaded;
		debug!("hosted runtime loaded");
		Ok(())
	}

	pub fn start(&mut self) -> Result<()> {
		if self.state != HostState::Loaded {
			return Err(HostError::NotLoaded);
		}

		self.runtime_mut()?.start()?;
		self.state = HostState::Started;
		debug!("hosted runtime started");
		Ok(())
	}

	pub fn stop(&mut self) -> Result<()> {
		if self.state != HostState::Started {
			return Err(HostError::NotStarted);
		}

		self.runtime_mut()?.stop()?;
		self.state = HostState::Loaded;
		debug!("hosted runtime stopped");
		Ok(())
	}

	/// Stop if started, release the runtime handle and return to `Unloaded`.
	/// A no-op when nothing is loaded.
	pub fn unload(&mut self) -> Result<()> {
		if !self.is_loaded() {
			return Ok(());
		}

		if self.is_started() {
			self.stop()?;
		}

		self.runtime = None;
		self.state = HostState::Unloaded;
		debug!("hosted runtime unloaded");
		Ok(())
	}

	/// Create a domain setup configuration object. Valid only while started.
	pub fn create_domain_setup(&self) -> Result<DomainSetup> {
		self.require_started()?;
		Ok(DomainSetup::new())
	}

	/// Create a domain identity object. Valid only while started.
	pub fn create_domain_identity(&self, name: &str) -> Result<DomainIdentity> {
		self.require_started()?;
		Ok(DomainIdentity::new(name))
	}

	/// Fetch the always-present default domain.
	pub fn default_domain(&mut self) -> Result<ExecutionDomain> {
		self.require_started()?;
		let inner = self.runtime_mut()?.default_domain()?;
		Ok(ExecutionDomain::new(inner, None, None))
	}

	/// Create a named domain from an optional (setup, identity) pair.
	pub fn create_domain(
		&mut self,
		name: &str,
		setup: Option<DomainSetup>,
		identity: Option<DomainIdentity>,
	) -> Result<ExecutionDomain> {
		self.require_started()?;

		let inner = self.runtime_mut()?.create_domain(name, setup.as_ref(), identity.as_ref())?;
		debug!(domain = name, "execution domain created");
		Ok(ExecutionDomain::new(inner, setup, identity))
	}

	/// Unload a domain. The domain must still hold its handle; releasing an
	/// already-released domain is an error, not a no-op.
	pub fn unload_domain(&mut self, domain: &mut ExecutionDomain) -> Result<()> {
		self.require_started()?;

		let inner = domain.take_inner().ok_or(HostError::DomainReleased)?;
		self.runtime_mut()?.unload_domain(inner)?;
		debug!("execution domain unloaded");
		Ok(())
	}

	fn require_started(&self) -> Result<()> {
		if self.state != HostState::Started {
			return Err(HostError::NotStarted);
		}
		Ok(())
	}

	fn runtime_mut(&mut self) -> Result<&mut Box<dyn HostedRuntime>> {
		self.runtime.as_mut().ok_or(HostError::NotLoaded)
	}
}

impl Drop for RuntimeHost {
	fn drop(&mut self) {
		let _ = self.unload();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::provider::RuntimeDomain;

	struct FakeDomain;

	impl RuntimeDomain for FakeDomain {
		fn create_instance(&mut self, assembly: &str, class: &str) -> Result<hostlink_type::ObjectRef> {
			Err(HostError::CreateInstance {
				assembly: assembly.to_string(),
				class: class.to_string(),
				reason: "not supported by the fake".to_string(),
			})
		}

		fn unload(&mut self) -> Result<()> {
			Ok(())
		}
	}

	struct FakeRuntime;

	impl HostedRuntime for FakeRuntime {
		fn start(&mut self) -> Result<()> {
			Ok(())
		}

		fn stop(&mut self) -> Result<()> {
			Ok(())
		}

		fn default_domain(&mut self) -> Result<Box<dyn RuntimeDomain>> {
			Ok(Box::new(FakeDomain))
		}

		fn create_domain(
			&mut self,
			_name: &str,
			_setup: Option<&DomainSetup>,
			_identity: Option<&DomainIdentity>,
		) -> Result<Box<dyn RuntimeDomain>> {
			Ok(Box::new(FakeDomain))
		}

		fn unload_domain(&mut self, _domain: Box<dyn RuntimeDomain>) -> Result<()> {
			Ok(())
		}
	}

	struct FakeProvider;

	impl RuntimeProvider for FakeProvider {
		fn create_runtime(&self) -> Result<Box<dyn HostedRuntime>> {
			Ok(Box::new(FakeRuntime))
		}
	}

	fn host() -> RuntimeHost {
		RuntimeHost::new(Box::new(FakeProvider))
	}

	#[test]
	fn test_lifecycle_happy_path() {
		let mut host = host();
		assert_eq!(host.state(), HostState::Unloaded);

		host.load().unwrap();
		assert_eq!(host.state(), HostState::Loaded);

		host.start().unwrap();
		assert_eq!(host.state(), HostState::Started);

		host.stop().unwrap();
		assert_eq!(host.state(), HostState::Loaded);

		host.unload().unwrap();
		assert_eq!(host.state(), HostState::Unloaded);
	}

	#[test]
	fn test_start_before_load_fails() {
		let mut host = host();
		assert!(matches!(host.start(), Err(HostError::NotLoaded)));
	}

	#[test]
	fn test_double_load_fails() {
		let mut host = host();
		host.load().unwrap();
		assert!(matches!(host.load(), Err(HostError::AlreadyLoaded)));
	}

	#[test]
	fn test_stop_unless_started_fails() {
		let mut host = host();
		assert!(matches!(host.stop(), Err(HostError::NotStarted)));
		host.load().unwrap();
		assert!(matches!(host.stop(), Err(HostError::NotStarted)));
	}

	#[test]
	fn test_unload_is_idempotent() {
		let mut host = host();
		host.unload().unwrap();

		host.load().unwrap();
		host.start().unwrap();
		host.unload().unwrap();
		assert_eq!(host.state(), HostState::Unloaded);
		host.unload().unwrap();
	}

	#[test]
	fn test_create_domain_before_start_fails() {
		let mut host = host();
		host.load().unwrap();
		assert!(matches!(host.create_domain("test", None, None), Err(HostError::NotStarted)));
		assert!(matches!(host.create_domain_setup(), Err(HostError::NotStarted)));
	}

	#[test]
	fn test_unload_released_domain_fails() {
		let mut host = host();
		host.load().unwrap();
		host.start().unwrap();

		let mut domain = host.create_domain("test", None, None).unwrap();
		host.unload_domain(&mut domain).unwrap();
		assert!(matches!(host.unload_domain(&mut domain), Err(HostError::DomainReleased)));
	}

	#[test]
	fn test_default_domain_requires_started() {
		let mut host = host();
		host.load().unwrap();
		assert!(matches!(host.default_domain(), Err(HostError::NotStarted)));

		host.start().unwrap();
		assert!(host.default_domain().is_ok());
	}
}

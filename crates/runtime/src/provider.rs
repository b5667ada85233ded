// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! Boundary to the concrete hosted runtime.
//!
//! The host and domain types in this crate only ever talk to these traits.
//! The production provider binds a runtime from a shared library
//! ([`crate::loader::LibraryProvider`]); tests use an in-process stand-in.

use hostlink_type::ObjectRef;

use crate::{
	Result,
	config::{DomainIdentity, DomainSetup},
};

/// Factory for hosted runtime handles. One handle per process is the
/// intended shape; the provider itself does not enforce it.
pub trait RuntimeProvider: Send {
	fn create_runtime(&self) -> Result<Box<dyn HostedRuntime>>;
}

/// Handle to one hosted runtime.
pub trait HostedRuntime: Send {
	fn start(&mut self) -> Result<()>;

	fn stop(&mut self) -> Result<()>;

	/// The always-present default domain.
	fn default_domain(&mut self) -> Result<Box<dyn RuntimeDomain>>;

	fn create_domain(
		&mut self,
		name: &str,
		setup: Option<&DomainSetup>,
		identity: Option<&DomainIdentity>,
	) -> Result<Box<dyn RuntimeDomain>>;

	fn unload_domain(&mut self, domain: Box<dyn RuntimeDomain>) -> Result<()>;
}

/// Handle to one isolated execution domain inside the hosted runtime.
pub trait RuntimeDomain: Send {
	/// Instantiate a class from an assembly, both resolved by name.
	fn create_instance(&mut self, assembly: &str, class: &str) -> Result<ObjectRef>;

	fn unload(&mut self) -> Result<()>;
}

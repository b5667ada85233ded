// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! The engine facade the host database talks to.
//!
//! One [`ExternalEngine`] owns the runtime host and the single execution
//! domain all routines of the process run in. Routine factories report
//! failure through the caller's [`ErrorSink`] and return `None`; the host
//! treats that as a declaration error on the offending routine only.

use hostlink_runtime::{ExecutionDomain, HostError, ObjectInstance, Result, RuntimeHost, RuntimeProvider};
use tracing::{debug, warn};

use crate::{
	routine::{ExternalFunction, ExternalProcedure, RoutineName},
	sink::{Encoding, ErrorSink},
};

/// Where the engine's execution domain resolves assemblies from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
	pub domain_name: String,
	pub application_name: String,
	pub base_path: String,
	pub private_bin_path: String,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			domain_name: "external-engine".to_string(),
			application_name: "external-engine".to_string(),
			base_path: ".".to_string(),
			private_bin_path: "bin".to_string(),
		}
	}
}

impl EngineConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn domain_name(mut self, name: impl Into<String>) -> Self {
		self.domain_name = name.into();
		self
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
}

/// Owns the hosted runtime and the routine execution domain.
pub struct ExternalEngine {
	host: RuntimeHost,
	domain: Option<ExecutionDomain>,
	config: EngineConfig,
}

impl ExternalEngine {
	/// Bring the runtime all the way up: load, start, then create the routine
	/// domain from the configured assembly paths. Shadow copies are never
	/// used; routines run against the deployed assemblies directly.
	pub fn new(provider: Box<dyn RuntimeProvider>, config: EngineConfig) -> Result<Self> {
		let mut host = RuntimeHost::new(provider);
		host.load()?;
		host.start()?;

		let setup = host
			.create_domain_setup()?
			.application_name(&config.application_name)
			.base_path(&config.base_path)
			.private_bin_path(&config.private_bin_path)
			.shadow_copy(false);

		let domain = host.create_domain(&config.domain_name, Some(setup), None)?;
		debug!(domain = %config.domain_name, "external engine ready");

		Ok(Self {
			host,
			domain: Some(domain),
			config,
		})
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	/// Build the function adapter for a `Class,Assembly::Method` declaration.
	pub fn make_function(&mut self, routine: &str, sink: &mut dyn ErrorSink) -> Option<ExternalFunction> {
		match self.build_instance(routine) {
			Ok((instance, method)) => Some(ExternalFunction::new(instance, method)),
			Err(err) => {
				sink.add_string(&err.to_string(), Encoding::Ascii);
				None
			}
		}
	}

	/// Build the procedure adapter for a `Class,Assembly::Method` declaration.
	pub fn make_procedure(&mut self, routine: &str, sink: &mut dyn ErrorSink) -> Option<ExternalProcedure> {
		match self.build_instance(routine) {
			Ok((instance, method)) => Some(ExternalProcedure::new(instance, method)),
			Err(err) => {
				sink.add_string(&err.to_string(), Encoding::Ascii);
				None
			}
		}
	}

	/// Called when a worker thread enters the engine. The hosted runtime
	/// attaches threads lazily on first managed call, so this only logs.
	pub fn attach_thread(&self) {
		debug!("worker thread attached");
	}

	/// Called when a worker thread leaves the engine. Detaching never tears
	/// down the runtime; that happens in [`ExternalEngine::shutdown`] only.
	pub fn detach_thread(&self) {
		debug!("worker thread detached");
	}

	/// Tear down the domain and the runtime. Idempotent; also runs on drop.
	pub fn shutdown(&mut self) {
		if let Some(mut domain) = self.domain.take() {
			if self.host.is_started() {
				if let Err(err) = self.host.unload_domain(&mut domain) {
					warn!(%err, "unloading the routine domain failed");
				}
			} else if let Err(err) = domain.release() {
				warn!(%err, "releasing the routine domain failed");
			}
		}

		if let Err(err) = self.host.unload() {
			warn!(%err, "unloading the hosted runtime failed");
		}
	}

	fn build_instance(&mut self, routine: &str) -> Result<(ObjectInstance, String)> {
		let name = RoutineName::parse(routine)?;
		let domain = self.domain.as_mut().ok_or(HostError::DomainReleased)?;

		let instance = domain.create_instance(&name.assembly, &name.class)?;
		Ok((instance, name.method))
	}
}

impl Drop for ExternalEngine {
	fn drop(&mut self) {
		self.shutdown();
	}
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! Binding a hosted runtime from a shared library.
//!
//! The library exposes a single entry point returning a boxed
//! [`HostedRuntime`]. The library handle is kept alive for as long as any
//! runtime created from it, so the runtime's code is never unmapped under it.

use std::{ffi::OsStr, sync::Arc};

use libloading::{Library, Symbol};
use tracing::debug;

use crate::{
	Result,
	config::{DomainIdentity, DomainSetup},
	error::HostError,
	provider::{HostedRuntime, RuntimeDomain, RuntimeProvider},
};

/// Name of the entry-point symbol a runtime library must export.
pub const RUNTIME_ENTRY_SYMBOL: &[u8] = b"hostlink_runtime_entry";

/// Signature of the entry point: a factory for the library's runtime.
pub type RuntimeEntry = fn() -> Box<dyn HostedRuntime>;

/// Provider backed by a shared library.
pub struct LibraryProvider {
	library: Arc<Library>,
	path: String,
}

impl LibraryProvider {
	/// Open the runtime library. The entry symbol is resolved lazily on
	/// [`RuntimeProvider::create_runtime`].
	pub fn open(path: impl AsRef<OsStr>) -> Result<Self> {
		let display_path = path.as_ref().to_string_lossy().into_owned();

		// Loading foreign code; the library must uphold the entry contract.
		let library = unsafe { Library::new(path.as_ref()) }.map_err(|err| HostError::Load {
			reason: format!("cannot open runtime library '{}': {}", display_path, err),
		})?;

		debug!(path = %display_path, "runtime library opened");
		Ok(Self {
			library: Arc::new(library),
			path: display_path,
		})
	}

	pub fn path(&self) -> &str {
		&self.path
	}
}

impl RuntimeProvider for LibraryProvider {
	fn create_runtime(&self) -> Result<Box<dyn HostedRuntime>> {
		let entry: Symbol<RuntimeEntry> =
			unsafe { self.library.get(RUNTIME_ENTRY_SYMBOL) }.map_err(|err| HostError::Load {
				reason: format!("runtime library '{}' has no entry point: {}", self.path, err),
			})?;

		let inner = entry();
		Ok(Box::new(LoadedRuntime {
			_library: self.library.clone(),
			inner,
		}))
	}
}

/// A runtime created from a library, holding the library open alongside it.
struct LoadedRuntime {
	_library: Arc<Library>,
	inner: Box<dyn HostedRuntime>,
}

impl HostedRuntime for LoadedRuntime {
	fn start(&mut self) -> Result<()> {
		self.inner.start()
	}

	fn stop(&mut self) -> Result<()> {
		self.inner.stop()
	}

	fn default_domain(&mut self) -> Result<Box<dyn RuntimeDomain>> {
		self.inner.default_domain()
	}

	fn create_domain(
		&mut self,
		name: &str,
		setup: Option<&DomainSetup>,
		identity: Option<&DomainIdentity>,
	) -> Result<Box<dyn RuntimeDomain>> {
		self.inner.create_domain(name, setup, identity)
	}

	fn unload_domain(&mut self, domain: Box<dyn RuntimeDomain>) -> Result<()> {
		self.inner.unload_domain(domain)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_open_missing_library_fails() {
		let err = LibraryProvider::open("/nonexistent/libruntime.so").err().unwrap();
		assert!(matches!(err, HostError::Load { .. }));
		assert!(err.to_string().contains("/nonexistent/libruntime.so"));
	}
}

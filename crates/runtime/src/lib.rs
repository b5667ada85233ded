// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! Hosted managed-runtime lifecycle.
//!
//! The [`RuntimeHost`] owns exactly one hosted runtime and walks it through a
//! strict state machine (`Unloaded -> Loaded -> Started -> Loaded ->
//! Unloaded`). While started, it can create isolated [`ExecutionDomain`]s in
//! which [`ObjectInstance`]s live. Releasing a domain invalidates every
//! instance created inside it; correctness relies on call-order discipline
//! enforced by fail-fast state checks, not on locking.

pub mod config;
pub mod domain;
pub mod error;
pub mod host;
pub mod instance;
pub mod loader;
pub mod provider;

pub use config::{DomainIdentity, DomainSetup};
pub use domain::ExecutionDomain;
pub use error::HostError;
pub use host::{HostState, RuntimeHost};
pub use instance::{ObjectInstance, invoke_on};
pub use loader::{LibraryProvider, RUNTIME_ENTRY_SYMBOL, RuntimeEntry};
pub use provider::{HostedRuntime, RuntimeDomain, RuntimeProvider};

pub type Result<T> = std::result::Result<T, HostError>;

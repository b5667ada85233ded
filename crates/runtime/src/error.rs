// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use hostlink_type::DispatchError;

/// Error raised by the runtime host and everything it owns.
///
/// Every variant carries a human-readable reason; at the engine boundary the
/// message is written to the caller's error sink as text. Nothing here is
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
	#[error("the hosted runtime is already loaded")]
	AlreadyLoaded,

	#[error("the hosted runtime must be loaded first")]
	NotLoaded,

	#[error("the hosted runtime must be started first")]
	NotStarted,

	#[error("unable to load the hosted runtime: {reason}")]
	Load {
		reason: String,
	},

	#[error("cannot start the hosted runtime: {reason}")]
	Start {
		reason: String,
	},

	#[error("cannot stop the hosted runtime: {reason}")]
	Stop {
		reason: String,
	},

	#[error("unable to create the execution domain '{name}': {reason}")]
	CreateDomain {
		name: String,
		reason: String,
	},

	#[error("cannot unload the requested execution domain: {reason}")]
	UnloadDomain {
		reason: String,
	},

	#[error("a valid execution domain is required")]
	DomainReleased,

	#[error("unable to create an instance of '{class}' from assembly '{assembly}': {reason}")]
	CreateInstance {
		assembly: String,
		class: String,
		reason: String,
	},

	#[error("the object instance has already been released")]
	InstanceReleased,

	#[error("method '{name}' could not be resolved")]
	MethodNotFound {
		name: String,
	},

	#[error("error executing the external routine")]
	Invocation,

	#[error("invalid routine name '{name}': expected 'class,assembly::method'")]
	RoutineName {
		name: String,
	},
}

impl From<DispatchError> for HostError {
	fn from(err: DispatchError) -> Self {
		match err {
			DispatchError::MethodNotFound {
				name,
			} => HostError::MethodNotFound {
				name,
			},
			// The underlying detail is deliberately discarded; callers
			// only ever see the generic invocation message.
			DispatchError::Failed {
				..
			} => HostError::Invocation,
		}
	}
}

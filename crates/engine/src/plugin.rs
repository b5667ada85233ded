// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! Process-wide plugin entry point.
//!
//! The host database initializes the plugin once per process and calls into
//! it from many worker threads. The engine slot is guarded by a mutex; a
//! second initialization is a no-op rather than an error so repeated plugin
//! registration stays harmless.

use hostlink_runtime::RuntimeProvider;
use parking_lot::Mutex;
use tracing::debug;

use crate::{
	engine::{EngineConfig, ExternalEngine},
	sink::{Encoding, ErrorSink},
};

#[derive(Default)]
pub struct Plugin {
	engine: Mutex<Option<ExternalEngine>>,
}

impl Plugin {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_initialized(&self) -> bool {
		self.engine.lock().is_some()
	}

	/// Bring the engine up. True when the engine is running afterwards,
	/// including when it already was; construction failure reports through
	/// the sink and leaves the plugin uninitialized.
	pub fn initialize(&self, provider: Box<dyn RuntimeProvider>, config: EngineConfig, sink: &mut dyn ErrorSink) -> bool {
		let mut slot = self.engine.lock();
		if slot.is_some() {
			debug!("plugin already initialized");
			return true;
		}

		match ExternalEngine::new(provider, config) {
			Ok(engine) => {
				*slot = Some(engine);
				true
			}
			Err(err) => {
				sink.add_string(&err.to_string(), Encoding::Ascii);
				false
			}
		}
	}

	/// Run `f` against the engine, or return `None` before initialization
	/// and after shutdown.
	pub fn with_engine<R>(&self, f: impl FnOnce(&mut ExternalEngine) -> R) -> Option<R> {
		self.engine.lock().as_mut().map(f)
	}

	/// Tear the engine down. Idempotent.
	pub fn shutdown(&self) {
		if let Some(mut engine) = self.engine.lock().take() {
			engine.shutdown();
		}
	}
}

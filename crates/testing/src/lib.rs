// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! In-process stand-in for a hosted managed runtime.
//!
//! [`TestRuntime`] implements the provider/runtime/domain traits over a
//! registry of (assembly, class) factories, so engine tests can exercise the
//! full lifecycle and marshaling paths without a real runtime library.

use std::{
	collections::HashMap,
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
};

use hostlink_runtime::{
	DomainIdentity, DomainSetup, HostError, HostedRuntime, Result, RuntimeDomain, RuntimeProvider,
};
use hostlink_type::{Dispatch, DispatchError, MethodId, ObjectRef, Value};
use parking_lot::{Mutex, RwLock};

type Factory = Arc<dyn Fn() -> Box<dyn Dispatch + Send> + Send + Sync>;

type Registry = Arc<RwLock<HashMap<(String, String), Factory>>>;

/// Provider, runtime and domain factory in one: every runtime and domain
/// created from this provider shares its class registry.
#[derive(Clone, Default)]
pub struct TestRuntime {
	classes: Registry,
}

impl TestRuntime {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a class under (assembly, class); the factory runs once per
	/// created instance.
	pub fn register_class(
		&self,
		assembly: impl Into<String>,
		class: impl Into<String>,
		factory: impl Fn() -> Box<dyn Dispatch + Send> + Send + Sync + 'static,
	) {
		self.classes.write().insert((assembly.into(), class.into()), Arc::new(factory));
	}
}

impl RuntimeProvider for TestRuntime {
	fn create_runtime(&self) -> Result<Box<dyn HostedRuntime>> {
		Ok(Box::new(TestHostedRuntime {
			classes: self.classes.clone(),
		}))
	}
}

struct TestHostedRuntime {
	classes: Registry,
}

impl HostedRuntime for TestHostedRuntime {
	fn start(&mut self) -> Result<()> {
		Ok(())
	}

	fn stop(&mut self) -> Result<()> {
		Ok(())
	}

	fn default_domain(&mut self) -> Result<Box<dyn RuntimeDomain>> {
		Ok(Box::new(TestDomain {
			classes: self.classes.clone(),
		}))
	}

	fn create_domain(
		&mut self,
		_name: &str,
		_setup: Option<&DomainSetup>,
		_identity: Option<&DomainIdentity>,
	) -> Result<Box<dyn RuntimeDomain>> {
		Ok(Box::new(TestDomain {
			classes: self.classes.clone(),
		}))
	}

	fn unload_domain(&mut self, _domain: Box<dyn RuntimeDomain>) -> Result<()> {
		Ok(())
	}
}

struct TestDomain {
	classes: Registry,
}

impl RuntimeDomain for TestDomain {
	fn create_instance(&mut self, assembly: &str, class: &str) -> Result<ObjectRef> {
		let factory = self
			.classes
			.read()
			.get(&(assembly.to_string(), class.to_string()))
			.cloned()
			.ok_or_else(|| HostError::CreateInstance {
				assembly: assembly.to_string(),
				class: class.to_string(),
				reason: "assembly or class not found".to_string(),
			})?;

		Ok(Arc::new(Mutex::new(BoxedDispatch(factory()))))
	}

	fn unload(&mut self) -> Result<()> {
		Ok(())
	}
}

// Forwarder so a factory-produced box can live behind an ObjectRef mutex.
struct BoxedDispatch(Box<dyn Dispatch + Send>);

impl Dispatch for BoxedDispatch {
	fn find_method(&self, name: &str) -> std::result::Result<MethodId, DispatchError> {
		self.0.find_method(name)
	}

	fn invoke(&mut self, method: MethodId, args: &[Value]) -> std::result::Result<Value, DispatchError> {
		self.0.invoke(method, args)
	}
}

type Method = Box<dyn FnMut(&[Value]) -> std::result::Result<Value, DispatchError> + Send>;

/// A managed class built from named closures. Method lookup is by name only;
/// registering a second method under the same name shadows nothing and is
/// never disambiguated, matching the dispatch contract.
#[derive(Default)]
pub struct ClassObject {
	methods: Vec<(String, Method)>,
}

impl ClassObject {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn method(
		mut self,
		name: impl Into<String>,
		f: impl FnMut(&[Value]) -> std::result::Result<Value, DispatchError> + Send + 'static,
	) -> Self {
		self.methods.push((name.into(), Box::new(f)));
		self
	}
}

impl Dispatch for ClassObject {
	fn find_method(&self, name: &str) -> std::result::Result<MethodId, DispatchError> {
		self.methods
			.iter()
			.position(|(n, _)| n == name)
			.map(|idx| MethodId(idx as u32))
			.ok_or_else(|| DispatchError::MethodNotFound {
				name: name.to_string(),
			})
	}

	fn invoke(&mut self, method: MethodId, args: &[Value]) -> std::result::Result<Value, DispatchError> {
		let (_, f) = self.methods.get_mut(method.0 as usize).ok_or_else(|| DispatchError::Failed {
			message: format!("unknown method id {}", method.0),
		})?;
		f(args)
	}
}

/// A managed iterator over fixed rows, exposing the `Read` / `GetValue` /
/// `Close` convention the result-set adapter drives.
pub struct RowSet {
	rows: Vec<Vec<Value>>,
	cursor: Option<usize>,
	closed: Arc<AtomicBool>,
}

impl RowSet {
	pub fn new(rows: Vec<Vec<Value>>) -> Self {
		Self {
			rows,
			cursor: None,
			closed: Arc::new(AtomicBool::new(false)),
		}
	}

	/// Flag flipped when `Close` is invoked, for asserting teardown.
	pub fn close_flag(&self) -> Arc<AtomicBool> {
		self.closed.clone()
	}
}

impl Dispatch for RowSet {
	fn find_method(&self, name: &str) -> std::result::Result<MethodId, DispatchError> {
		match name {
			"Read" => Ok(MethodId(0)),
			"GetValue" => Ok(MethodId(1)),
			"Close" => Ok(MethodId(2)),
			_ => Err(DispatchError::MethodNotFound {
				name: name.to_string(),
			}),
		}
	}

	fn invoke(&mut self, method: MethodId, args: &[Value]) -> std::result::Result<Value, DispatchError> {
		match method {
			MethodId(0) => {
				let next = self.cursor.map_or(0, |c| c + 1);
				if next < self.rows.len() {
					self.cursor = Some(next);
					Ok(Value::bool(true))
				} else {
					self.cursor = None;
					Ok(Value::bool(false))
				}
			}
			MethodId(1) => {
				let row = self.cursor.and_then(|c| self.rows.get(c)).ok_or_else(|| {
					DispatchError::Failed {
						message: "no current row".to_string(),
					}
				})?;

				match args {
					[Value::Int4(index)] => {
						row.get(*index as usize).cloned().ok_or_else(|| DispatchError::Failed {
							message: format!("no column at position {}", index),
						})
					}
					_ => Err(DispatchError::Failed {
						message: "GetValue expects one Int4 argument".to_string(),
					}),
				}
			}
			MethodId(2) => {
				self.closed.store(true, Ordering::SeqCst);
				self.rows.clear();
				self.cursor = None;
				Ok(Value::Undefined)
			}
			_ => Err(DispatchError::Failed {
				message: format!("unknown method id {}", method.0),
			}),
		}
	}
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! Full engine flows against the in-process runtime stand-in.

use std::sync::{
	Arc,
	atomic::Ordering,
};

use hostlink_engine::{CollectingSink, EngineConfig, ExternalEngine, ParamDesc, Plugin, TypeTag};
use hostlink_testing::{ClassObject, RowSet, TestRuntime};
use hostlink_type::{DispatchError, ObjectRef, Value};
use parking_lot::Mutex;

fn math_runtime() -> TestRuntime {
	let runtime = TestRuntime::new();
	runtime.register_class("MyAssembly", "MyClass", || {
		Box::new(
			ClassObject::new()
				.method("Add", |args| match args {
					[Value::Int4(l), Value::Int4(r)] => Ok(Value::int4(l + r)),
					_ => Err(DispatchError::Failed {
						message: "Add expects two Int4 arguments".to_string(),
					}),
				})
				.method("Fail", |_| {
					Err(DispatchError::Failed {
						message: "managed exception".to_string(),
					})
				})
				.method("Describe", |_| Ok(Value::utf8("a very long description"))),
		)
	});
	runtime
}

fn engine(runtime: TestRuntime) -> ExternalEngine {
	ExternalEngine::new(Box::new(runtime), EngineConfig::new()).unwrap()
}

#[test]
fn test_function_executes_and_writes_result() {
	let mut engine = engine(math_runtime());
	let mut sink = CollectingSink::new();

	let mut function = engine.make_function("MyClass,MyAssembly::Add", &mut sink).unwrap();
	assert!(sink.is_empty());

	let args = [ParamDesc::long(1), ParamDesc::long(2)];
	let mut result = ParamDesc::new(TypeTag::Long, 4);

	assert!(function.execute(&args, Some(&mut result), &mut sink));
	assert!(sink.is_empty());
	assert_eq!(result.read_i32().unwrap(), 3);
	assert!(!result.is_null());
}

#[test]
fn test_null_argument_passes_through_as_undefined() {
	let runtime = TestRuntime::new();
	runtime.register_class("MyAssembly", "MyClass", || {
		Box::new(ClassObject::new().method("IsUnknown", |args| match args {
			[Value::Undefined] => Ok(Value::int4(1)),
			_ => Ok(Value::int4(0)),
		}))
	});

	let mut engine = engine(runtime);
	let mut sink = CollectingSink::new();
	let mut function = engine.make_function("MyClass,MyAssembly::IsUnknown", &mut sink).unwrap();

	let mut arg = ParamDesc::long(7);
	arg.set_null();
	let mut result = ParamDesc::new(TypeTag::Long, 4);

	assert!(function.execute(&[arg], Some(&mut result), &mut sink));
	assert_eq!(result.read_i32().unwrap(), 1);
}

#[test]
fn test_missing_assembly_reports_through_sink() {
	let mut engine = engine(math_runtime());
	let mut sink = CollectingSink::new();

	assert!(engine.make_function("MyClass,Unknown::Add", &mut sink).is_none());
	assert_eq!(sink.messages().len(), 1);
	assert!(sink.last().unwrap().contains("Unknown"));
}

#[test]
fn test_malformed_routine_name_reports_through_sink() {
	let mut engine = engine(math_runtime());
	let mut sink = CollectingSink::new();

	assert!(engine.make_function("NoSeparators", &mut sink).is_none());
	assert!(sink.last().unwrap().contains("NoSeparators"));
}

#[test]
fn test_managed_failure_degrades_to_generic_message() {
	let mut engine = engine(math_runtime());
	let mut sink = CollectingSink::new();

	let mut function = engine.make_function("MyClass,MyAssembly::Fail", &mut sink).unwrap();
	assert!(!function.execute(&[], None, &mut sink));

	// detail stays on the managed side; the host sees the generic text
	assert_eq!(sink.last(), Some("error executing the external routine"));
}

#[test]
fn test_oversized_string_result_nulls_the_target() {
	let mut engine = engine(math_runtime());
	let mut sink = CollectingSink::new();

	let mut function = engine.make_function("MyClass,MyAssembly::Describe", &mut sink).unwrap();
	let mut result = ParamDesc::text(4);

	assert!(function.execute(&[], Some(&mut result), &mut sink));
	assert!(result.is_null());
}

#[test]
fn test_procedure_streams_rows_and_closes() {
	let rows = RowSet::new(vec![vec![Value::int4(10)], vec![Value::int4(20)]]);
	let closed = rows.close_flag();
	let source: ObjectRef = Arc::new(Mutex::new(rows));

	let runtime = TestRuntime::new();
	let shared = source.clone();
	runtime.register_class("MyAssembly", "MyClass", move || {
		let shared = shared.clone();
		Box::new(ClassObject::new().method("GetRows", move |_| Ok(Value::object(shared.clone()))))
	});

	let mut engine = engine(runtime);
	let mut sink = CollectingSink::new();

	let mut procedure = engine.make_procedure("MyClass,MyAssembly::GetRows", &mut sink).unwrap();
	let mut cursor = procedure.open(&[], &mut sink).unwrap();
	assert!(sink.is_empty());

	let mut column = ParamDesc::new(TypeTag::Long, 4);

	assert!(cursor.fetch(&mut sink));
	assert!(cursor.get_value(0, &mut column, &mut sink));
	assert_eq!(column.read_i32().unwrap(), 10);

	assert!(cursor.fetch(&mut sink));
	assert!(cursor.get_value(0, &mut column, &mut sink));
	assert_eq!(column.read_i32().unwrap(), 20);

	assert!(!cursor.fetch(&mut sink));
	assert!(sink.is_empty());

	drop(cursor);
	assert!(closed.load(Ordering::SeqCst));
}

#[test]
fn test_procedure_returning_non_object_reports() {
	let runtime = TestRuntime::new();
	runtime.register_class("MyAssembly", "MyClass", || {
		Box::new(ClassObject::new().method("GetRows", |_| Ok(Value::int4(1))))
	});

	let mut engine = engine(runtime);
	let mut sink = CollectingSink::new();

	let mut procedure = engine.make_procedure("MyClass,MyAssembly::GetRows", &mut sink).unwrap();
	assert!(procedure.open(&[], &mut sink).is_none());
	assert!(sink.last().unwrap().contains("row source"));
}

#[test]
fn test_fetch_rejects_non_boolean_read() {
	let runtime = TestRuntime::new();
	runtime.register_class("MyAssembly", "MyClass", || {
		let source: ObjectRef = Arc::new(Mutex::new(
			ClassObject::new()
				.method("Read", |_| Ok(Value::int4(1)))
				.method("GetValue", |_| Ok(Value::Undefined))
				.method("Close", |_| Ok(Value::Undefined)),
		));
		Box::new(ClassObject::new().method("GetRows", move |_| Ok(Value::object(source.clone()))))
	});

	let mut engine = engine(runtime);
	let mut sink = CollectingSink::new();

	let mut procedure = engine.make_procedure("MyClass,MyAssembly::GetRows", &mut sink).unwrap();
	let mut cursor = procedure.open(&[], &mut sink).unwrap();

	assert!(!cursor.fetch(&mut sink));
	assert!(sink.last().unwrap().contains("boolean"));
}

#[test]
fn test_shutdown_invalidates_routine_creation() {
	let mut engine = engine(math_runtime());
	let mut sink = CollectingSink::new();

	engine.shutdown();
	engine.shutdown(); // idempotent

	assert!(engine.make_function("MyClass,MyAssembly::Add", &mut sink).is_none());
	assert!(!sink.is_empty());
}

#[test]
fn test_plugin_initializes_once() {
	let plugin = Plugin::new();
	let mut sink = CollectingSink::new();
	assert!(!plugin.is_initialized());
	assert!(plugin.with_engine(|_| ()).is_none());

	assert!(plugin.initialize(Box::new(math_runtime()), EngineConfig::new(), &mut sink));
	assert!(plugin.is_initialized());

	// second initialization is a no-op, not an error
	assert!(plugin.initialize(Box::new(math_runtime()), EngineConfig::new(), &mut sink));
	assert!(sink.is_empty());

	let executed = plugin.with_engine(|engine| {
		let mut sink = CollectingSink::new();
		let mut function = engine.make_function("MyClass,MyAssembly::Add", &mut sink).unwrap();
		let mut result = ParamDesc::new(TypeTag::Long, 4);
		function.execute(&[ParamDesc::long(20), ParamDesc::long(22)], Some(&mut result), &mut sink);
		result.read_i32().unwrap()
	});
	assert_eq!(executed, Some(42));

	plugin.shutdown();
	assert!(!plugin.is_initialized());
	plugin.shutdown();
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use std::fmt::{Debug, Display, Formatter};

use crate::dispatch::ObjectRef;

mod date;
mod decimal;
mod time;
mod timestamp;
mod r#type;

pub use date::Date;
pub use decimal::Decimal;
pub use time::Time;
pub use timestamp::Timestamp;
pub use r#type::Type;

/// A dynamic value, produced by the managed side when returning results and
/// consumed when passed as arguments.
#[derive(Clone)]
pub enum Value {
	/// Value is not set (the SQL NULL analog)
	Undefined,
	/// A boolean: true or false
	Boolean(bool),
	/// A 1-byte signed integer
	Int1(i8),
	/// A 2-byte signed integer
	Int2(i16),
	/// A 4-byte signed integer
	Int4(i32),
	/// An 8-byte signed integer
	Int8(i64),
	/// A 4-byte floating point
	Float4(f32),
	/// An 8-byte floating point
	Float8(f64),
	/// A scaled decimal (mantissa + scale)
	Decimal(Decimal),
	/// A UTF-8 encoded text
	Utf8(String),
	/// A calendar date (year, month, day)
	Date(Date),
	/// A time of day with millisecond precision
	Time(Time),
	/// A date and time value
	Timestamp(Timestamp),
	/// An opaque reference to a live managed object
	Object(ObjectRef),
}

impl Value {
	pub fn undefined() -> Self {
		Value::Undefined
	}

	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Boolean(v.into())
	}

	pub fn int1(v: impl Into<i8>) -> Self {
		Value::Int1(v.into())
	}

	pub fn int2(v: impl Into<i16>) -> Self {
		Value::Int2(v.into())
	}

	pub fn int4(v: impl Into<i32>) -> Self {
		Value::Int4(v.into())
	}

	pub fn int8(v: impl Into<i64>) -> Self {
		Value::Int8(v.into())
	}

	pub fn float4(v: impl Into<f32>) -> Self {
		Value::Float4(v.into())
	}

	pub fn float8(v: impl Into<f64>) -> Self {
		Value::Float8(v.into())
	}

	pub fn decimal(v: impl Into<Decimal>) -> Self {
		Value::Decimal(v.into())
	}

	pub fn utf8(v: impl Into<String>) -> Self {
		Value::Utf8(v.into())
	}

	pub fn date(v: impl Into<Date>) -> Self {
		Value::Date(v.into())
	}

	pub fn time(v: impl Into<Time>) -> Self {
		Value::Time(v.into())
	}

	pub fn timestamp(v: impl Into<Timestamp>) -> Self {
		Value::Timestamp(v.into())
	}

	pub fn object(v: ObjectRef) -> Self {
		Value::Object(v)
	}

	pub fn get_type(&self) -> Type {
		match self {
			Value::Undefined => Type::Undefined,
			Value::Boolean(_) => Type::Boolean,
			Value::Int1(_) => Type::Int1,
			Value::Int2(_) => Type::Int2,
			Value::Int4(_) => Type::Int4,
			Value::Int8(_) => Type::Int8,
			Value::Float4(_) => Type::Float4,
			Value::Float8(_) => Type::Float8,
			Value::Decimal(_) => Type::Decimal,
			Value::Utf8(_) => Type::Utf8,
			Value::Date(_) => Type::Date,
			Value::Time(_) => Type::Time,
			Value::Timestamp(_) => Type::Timestamp,
			Value::Object(_) => Type::Object,
		}
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, Value::Undefined)
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Undefined, Value::Undefined) => true,
			(Value::Boolean(l), Value::Boolean(r)) => l == r,
			(Value::Int1(l), Value::Int1(r)) => l == r,
			(Value::Int2(l), Value::Int2(r)) => l == r,
			(Value::Int4(l), Value::Int4(r)) => l == r,
			(Value::Int8(l), Value::Int8(r)) => l == r,
			(Value::Float4(l), Value::Float4(r)) => l == r,
			(Value::Float8(l), Value::Float8(r)) => l == r,
			(Value::Decimal(l), Value::Decimal(r)) => l == r,
			(Value::Utf8(l), Value::Utf8(r)) => l == r,
			(Value::Date(l), Value::Date(r)) => l == r,
			(Value::Time(l), Value::Time(r)) => l == r,
			(Value::Timestamp(l), Value::Timestamp(r)) => l == r,
			// Object identity, not structural equality
			(Value::Object(l), Value::Object(r)) => std::sync::Arc::ptr_eq(l, r),
			_ => false,
		}
	}
}

impl Debug for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Undefined => f.write_str("Undefined"),
			Value::Boolean(v) => f.debug_tuple("Boolean").field(v).finish(),
			Value::Int1(v) => f.debug_tuple("Int1").field(v).finish(),
			Value::Int2(v) => f.debug_tuple("Int2").field(v).finish(),
			Value::Int4(v) => f.debug_tuple("Int4").field(v).finish(),
			Value::Int8(v) => f.debug_tuple("Int8").field(v).finish(),
			Value::Float4(v) => f.debug_tuple("Float4").field(v).finish(),
			Value::Float8(v) => f.debug_tuple("Float8").field(v).finish(),
			Value::Decimal(v) => f.debug_tuple("Decimal").field(v).finish(),
			Value::Utf8(v) => f.debug_tuple("Utf8").field(v).finish(),
			Value::Date(v) => f.debug_tuple("Date").field(v).finish(),
			Value::Time(v) => f.debug_tuple("Time").field(v).finish(),
			Value::Timestamp(v) => f.debug_tuple("Timestamp").field(v).finish(),
			Value::Object(_) => f.write_str("Object(..)"),
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Boolean(true) => f.write_str("true"),
			Value::Boolean(false) => f.write_str("false"),
			Value::Int1(value) => Display::fmt(value, f),
			Value::Int2(value) => Display::fmt(value, f),
			Value::Int4(value) => Display::fmt(value, f),
			Value::Int8(value) => Display::fmt(value, f),
			Value::Float4(value) => Display::fmt(value, f),
			Value::Float8(value) => Display::fmt(value, f),
			Value::Decimal(value) => Display::fmt(value, f),
			Value::Utf8(value) => Display::fmt(value, f),
			Value::Date(value) => Display::fmt(value, f),
			Value::Time(value) => Display::fmt(value, f),
			Value::Timestamp(value) => Display::fmt(value, f),
			Value::Object(_) => f.write_str("object"),
		}
	}
}

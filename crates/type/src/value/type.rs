// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Tag of a dynamic [`Value`](crate::Value).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	Undefined,
	Boolean,
	Int1,
	Int2,
	Int4,
	Int8,
	Float4,
	Float8,
	Decimal,
	Utf8,
	Date,
	Time,
	Timestamp,
	Object,
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Undefined => f.write_str("UNDEFINED"),
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::Int1 => f.write_str("INT1"),
			Type::Int2 => f.write_str("INT2"),
			Type::Int4 => f.write_str("INT4"),
			Type::Int8 => f.write_str("INT8"),
			Type::Float4 => f.write_str("FLOAT4"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Decimal => f.write_str("DECIMAL"),
			Type::Utf8 => f.write_str("UTF8"),
			Type::Date => f.write_str("DATE"),
			Type::Time => f.write_str("TIME"),
			Type::Timestamp => f.write_str("TIMESTAMP"),
			Type::Object => f.write_str("OBJECT"),
		}
	}
}

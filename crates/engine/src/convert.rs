// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! Marshaling between value descriptors and dynamic values.
//!
//! [`descriptor_to_value`] reads a descriptor into a [`Value`] for the managed
//! side; [`value_to_descriptor`] writes a returned [`Value`] back into a
//! caller-provided descriptor. [`copy`] moves one descriptor into another of
//! the same type tag.
//!
//! A string longer than the target field's capacity never truncates; the
//! target is null-flagged instead. Integer-backed numerics with a nonzero
//! scale surface as [`Decimal`]; scale zero collapses to the plain integer.

use hostlink_type::{Date, Decimal, Time, Timestamp, Type, Value};
use tracing::warn;

use crate::descriptor::{ParamDesc, TypeTag};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConvertError {
	#[error("unknown descriptor type tag {tag}")]
	UnknownTag { tag: u8 },
	#[error("descriptor has no value storage")]
	MissingStorage,
	#[error("descriptor storage too small: need {need} bytes, have {have}")]
	ShortStorage { need: usize, have: usize },
	#[error("descriptors have different type tags: {from:?} and {target:?}")]
	TypeMismatch { from: TypeTag, target: TypeTag },
	#[error("conversion is not supported for type tag {tag:?}")]
	Unsupported { tag: TypeTag },
	#[error("cannot marshal a {value_type} value into a descriptor tagged {tag:?}")]
	ValueMismatch { value_type: Type, tag: TypeTag },
	#[error("descriptor holds an invalid {what} encoding")]
	InvalidWire { what: &'static str },
	#[error("value does not fit the target descriptor: {what}")]
	OutOfRange { what: &'static str },
}

/// Read a descriptor into a dynamic value. A set null flag yields
/// [`Value::Undefined`] regardless of the storage contents.
pub fn descriptor_to_value(desc: &ParamDesc) -> Result<Value, ConvertError> {
	if desc.is_null() {
		return Ok(Value::Undefined);
	}

	match desc.dtype {
		TypeTag::Null => Ok(Value::Undefined),
		TypeTag::Text => {
			let payload = desc.payload()?;
			let length = (desc.length as usize).min(payload.len());
			Ok(Value::utf8(String::from_utf8_lossy(&payload[..length]).into_owned()))
		}
		TypeTag::CString => {
			let payload = desc.payload()?;
			let end = payload.iter().position(|b| *b == 0).unwrap_or(payload.len());
			Ok(Value::utf8(String::from_utf8_lossy(&payload[..end]).into_owned()))
		}
		TypeTag::Varying => {
			let payload = desc.payload()?;
			if payload.len() < 2 {
				return Err(ConvertError::InvalidWire {
					what: "counted string",
				});
			}

			let count = u16::from_le_bytes([payload[0], payload[1]]) as usize;
			if payload.len() < 2 + count {
				return Err(ConvertError::InvalidWire {
					what: "counted string",
				});
			}
			Ok(Value::utf8(String::from_utf8_lossy(&payload[2..2 + count]).into_owned()))
		}
		TypeTag::Byte => Ok(Value::int1(desc.read_i8()?)),
		TypeTag::Short => {
			let value = desc.read_i16()?;
			if desc.scale != 0 {
				Ok(Value::decimal(Decimal::new(value as i64, desc.scale.unsigned_abs())))
			} else {
				Ok(Value::int2(value))
			}
		}
		TypeTag::Long => {
			let value = desc.read_i32()?;
			if desc.scale != 0 {
				Ok(Value::decimal(Decimal::new(value as i64, desc.scale.unsigned_abs())))
			} else {
				Ok(Value::int4(value))
			}
		}
		TypeTag::Int64 => {
			let value = desc.read_i64()?;
			if desc.scale != 0 {
				Ok(Value::decimal(Decimal::new(value, desc.scale.unsigned_abs())))
			} else {
				Ok(Value::int8(value))
			}
		}
		TypeTag::Real => Ok(Value::float4(desc.read_f32()?)),
		TypeTag::Double => Ok(Value::float8(desc.read_f64()?)),
		TypeTag::SqlDate => Date::from_sql_days(desc.read_i32()?).map(Value::date).ok_or(ConvertError::InvalidWire {
			what: "date",
		}),
		TypeTag::SqlTime => Time::from_sql_tenths(desc.read_i32()?).map(Value::time).ok_or(ConvertError::InvalidWire {
			what: "time",
		}),
		TypeTag::Timestamp => {
			Timestamp::from_sql_packed(desc.read_i64()?).map(Value::timestamp).ok_or(ConvertError::InvalidWire {
				what: "timestamp",
			})
		}
		TypeTag::Blob => Err(ConvertError::Unsupported {
			tag: TypeTag::Blob,
		}),
	}
}

/// Write a dynamic value into a caller-provided descriptor.
///
/// Numeric values stamp their own type tag onto the target. Temporal values
/// and strings honor the target's tag; a mismatch is an error and the target
/// is left untouched.
pub fn value_to_descriptor(value: &Value, target: &mut ParamDesc) -> Result<(), ConvertError> {
	match value {
		Value::Undefined => {
			target.set_null();
			Ok(())
		}
		Value::Utf8(text) => write_string(text, target),
		Value::Boolean(flag) => write_numeric(target, TypeTag::Byte, &[*flag as u8]),
		Value::Int1(v) => write_numeric(target, TypeTag::Byte, &v.to_le_bytes()),
		Value::Int2(v) => write_numeric(target, TypeTag::Short, &v.to_le_bytes()),
		Value::Int4(v) => write_numeric(target, TypeTag::Long, &v.to_le_bytes()),
		Value::Int8(v) => write_numeric(target, TypeTag::Int64, &v.to_le_bytes()),
		Value::Float4(v) => write_numeric(target, TypeTag::Real, &v.to_le_bytes()),
		Value::Float8(v) => write_numeric(target, TypeTag::Double, &v.to_le_bytes()),
		Value::Decimal(decimal) => write_decimal(decimal, target),
		Value::Date(date) => match target.dtype {
			TypeTag::SqlDate => {
				target.write_i32(date.to_sql_days())?;
				target.clear_null();
				Ok(())
			}
			TypeTag::Timestamp => {
				target.write_i64(Timestamp::from(*date).to_sql_packed())?;
				target.clear_null();
				Ok(())
			}
			tag => Err(ConvertError::ValueMismatch {
				value_type: Type::Date,
				tag,
			}),
		},
		Value::Time(time) => match target.dtype {
			TypeTag::SqlTime => {
				target.write_i32(time.to_sql_tenths())?;
				target.clear_null();
				Ok(())
			}
			tag => Err(ConvertError::ValueMismatch {
				value_type: Type::Time,
				tag,
			}),
		},
		Value::Timestamp(ts) => match target.dtype {
			TypeTag::Timestamp => {
				target.write_i64(ts.to_sql_packed())?;
				target.clear_null();
				Ok(())
			}
			TypeTag::SqlDate => {
				target.write_i32(ts.date().to_sql_days())?;
				target.clear_null();
				Ok(())
			}
			TypeTag::SqlTime => {
				target.write_i32(ts.time().to_sql_tenths())?;
				target.clear_null();
				Ok(())
			}
			tag => Err(ConvertError::ValueMismatch {
				value_type: Type::Timestamp,
				tag,
			}),
		},
		Value::Object(_) => Err(ConvertError::ValueMismatch {
			value_type: Type::Object,
			tag: target.dtype,
		}),
	}
}

/// Copy one descriptor into another. Both must carry the same type tag; only
/// fixed-width numeric and temporal tags are copyable. On error the target is
/// left untouched.
pub fn copy(source: &ParamDesc, target: &mut ParamDesc) -> Result<(), ConvertError> {
	if source.dtype != target.dtype {
		return Err(ConvertError::TypeMismatch {
			from: source.dtype,
			target: target.dtype,
		});
	}

	let width = source.dtype.fixed_width().ok_or(ConvertError::Unsupported {
		tag: source.dtype,
	})?;

	let payload = source.payload()?;
	if payload.len() < width {
		return Err(ConvertError::ShortStorage {
			need: width,
			have: payload.len(),
		});
	}

	let bytes = payload[..width].to_vec();
	target.write_bytes(&bytes)?;
	target.flags = source.flags;
	target.length = source.length;
	target.scale = source.scale;
	target.sub_type = source.sub_type;
	Ok(())
}

fn write_numeric(target: &mut ParamDesc, tag: TypeTag, bytes: &[u8]) -> Result<(), ConvertError> {
	// Ensure capacity before stamping the tag so a failed write leaves the
	// target untouched.
	if let Some(buffer) = target.address.as_ref() {
		if buffer.len() < bytes.len() {
			return Err(ConvertError::ShortStorage {
				need: bytes.len(),
				have: buffer.len(),
			});
		}
	}

	target.write_bytes(bytes)?;
	target.dtype = tag;
	target.length = bytes.len() as u16;
	target.clear_null();
	Ok(())
}

fn write_decimal(decimal: &Decimal, target: &mut ParamDesc) -> Result<(), ConvertError> {
	if decimal.is_integral() && target.scale != 0 {
		// The target field declares the scale; shift the mantissa into it.
		let factor = 10i64.checked_pow(target.scale.unsigned_abs() as u32).ok_or(ConvertError::OutOfRange {
			what: "decimal scale",
		})?;
		let shifted = decimal.mantissa().checked_mul(factor).ok_or(ConvertError::OutOfRange {
			what: "decimal mantissa",
		})?;

		let scale = target.scale;
		write_numeric(target, TypeTag::Int64, &shifted.to_le_bytes())?;
		target.scale = scale;
	} else {
		// The descriptor's scale field is an i8; a wider scale cannot be
		// declared and would wrap on negation.
		if decimal.scale() > i8::MAX as u8 {
			return Err(ConvertError::OutOfRange {
				what: "decimal scale",
			});
		}

		write_numeric(target, TypeTag::Int64, &decimal.mantissa().to_le_bytes())?;
		target.scale = -(decimal.scale() as i8);
	}
	Ok(())
}

fn write_string(text: &str, target: &mut ParamDesc) -> Result<(), ConvertError> {
	if !target.dtype.is_string() {
		return Err(ConvertError::ValueMismatch {
			value_type: Type::Utf8,
			tag: target.dtype,
		});
	}

	let payload = text.as_bytes();
	let capacity = target.length as usize;
	let prefix = if target.dtype == TypeTag::Varying {
		2
	} else {
		0
	};

	// A counted string whose declared capacity cannot even hold its own
	// prefix has room for nothing, not even the empty string.
	if capacity < prefix || payload.len() > capacity - prefix {
		warn!(capacity, needed = payload.len(), "string exceeds field capacity, returning null");
		target.set_null();
		return Ok(());
	}

	match target.dtype {
		TypeTag::Varying => {
			let mut buffer = vec![0u8; capacity];
			buffer[0..2].copy_from_slice(&(payload.len() as u16).to_le_bytes());
			buffer[2..2 + payload.len()].copy_from_slice(payload);
			target.address = Some(buffer);
		}
		_ => {
			// Fixed text is blank-filled, then overwritten from the start.
			let mut buffer = vec![b' '; capacity];
			buffer[..payload.len()].copy_from_slice(payload);
			target.address = Some(buffer);
		}
	}

	target.clear_null();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::descriptor::DescFlags;

	#[test]
	fn test_null_flag_wins_over_payload() {
		let mut desc = ParamDesc::long(42);
		desc.set_null();
		assert_eq!(descriptor_to_value(&desc).unwrap(), Value::Undefined);
	}

	#[test]
	fn test_integers() {
		assert_eq!(descriptor_to_value(&ParamDesc::byte(-5)).unwrap(), Value::int1(-5i8));
		assert_eq!(descriptor_to_value(&ParamDesc::short(-300)).unwrap(), Value::int2(-300i16));
		assert_eq!(descriptor_to_value(&ParamDesc::long(70_000)).unwrap(), Value::int4(70_000));
		assert_eq!(descriptor_to_value(&ParamDesc::int64(1 << 40)).unwrap(), Value::int8(1i64 << 40));
	}

	#[test]
	fn test_floats() {
		assert_eq!(descriptor_to_value(&ParamDesc::real(1.5)).unwrap(), Value::float4(1.5f32));
		assert_eq!(descriptor_to_value(&ParamDesc::double(-2.25)).unwrap(), Value::float8(-2.25));
	}

	#[test]
	fn test_scaled_integer_reads_as_decimal() {
		// 12345 at scale -2 is 123.45
		let desc = ParamDesc::long(12345).with_scale(-2);
		assert_eq!(descriptor_to_value(&desc).unwrap(), Value::decimal(Decimal::new(12345, 2)));

		// scale 0 collapses to the plain integer
		let desc = ParamDesc::long(12345);
		assert_eq!(descriptor_to_value(&desc).unwrap(), Value::int4(12345));
	}

	#[test]
	fn test_strings() {
		let desc = ParamDesc::text_value(8, "abc");
		assert_eq!(descriptor_to_value(&desc).unwrap(), Value::utf8("abc     "));

		let desc = ParamDesc::varying_value(10, "abc");
		assert_eq!(descriptor_to_value(&desc).unwrap(), Value::utf8("abc"));

		let mut desc = ParamDesc::new(TypeTag::CString, 8);
		desc.write_bytes(b"ab\0cdef\0").unwrap();
		assert_eq!(descriptor_to_value(&desc).unwrap(), Value::utf8("ab"));
	}

	#[test]
	fn test_temporal_roundtrip() {
		let date = Date::new(2000, 3, 1).unwrap();
		let desc = ParamDesc::sql_date(date.to_sql_days());
		assert_eq!(descriptor_to_value(&desc).unwrap(), Value::date(date));

		let time = Time::new(13, 30, 15, 250).unwrap();
		let desc = ParamDesc::sql_time(time.to_sql_tenths());
		assert_eq!(descriptor_to_value(&desc).unwrap(), Value::time(time));

		let ts = Timestamp::new(date, time);
		let desc = ParamDesc::timestamp(ts.to_sql_packed());
		assert_eq!(descriptor_to_value(&desc).unwrap(), Value::timestamp(ts));
	}

	#[test]
	fn test_blob_is_unsupported() {
		let desc = ParamDesc::new(TypeTag::Blob, 8);
		assert_eq!(descriptor_to_value(&desc).unwrap_err(), ConvertError::Unsupported {
			tag: TypeTag::Blob
		});
	}

	#[test]
	fn test_write_undefined_sets_null() {
		let mut target = ParamDesc::long(7);
		value_to_descriptor(&Value::Undefined, &mut target).unwrap();
		assert!(target.is_null());
		// storage is untouched
		assert_eq!(target.read_i32().unwrap(), 7);
	}

	#[test]
	fn test_write_numeric_stamps_tag_and_clears_null() {
		let mut target = ParamDesc::new(TypeTag::Int64, 8);
		target.set_null();

		value_to_descriptor(&Value::int8(99i64), &mut target).unwrap();
		assert_eq!(target.dtype, TypeTag::Int64);
		assert!(!target.is_null());
		assert_eq!(target.read_i64().unwrap(), 99);
	}

	#[test]
	fn test_write_boolean_as_byte() {
		let mut target = ParamDesc::new(TypeTag::Byte, 1);
		value_to_descriptor(&Value::bool(true), &mut target).unwrap();
		assert_eq!(target.dtype, TypeTag::Byte);
		assert_eq!(target.read_i8().unwrap(), 1);
	}

	#[test]
	fn test_write_fixed_string_blank_pads() {
		let mut target = ParamDesc::text(6);
		value_to_descriptor(&Value::utf8("ab"), &mut target).unwrap();
		assert!(!target.is_null());
		assert_eq!(target.payload().unwrap(), b"ab    ");
	}

	#[test]
	fn test_write_counted_string_sets_prefix() {
		let mut target = ParamDesc::varying(10);
		value_to_descriptor(&Value::utf8("hello"), &mut target).unwrap();

		let payload = target.payload().unwrap();
		assert_eq!(&payload[0..2], &5u16.to_le_bytes());
		assert_eq!(&payload[2..7], b"hello");
	}

	#[test]
	fn test_oversized_string_nulls_instead_of_truncating() {
		let mut target = ParamDesc::text(4);
		value_to_descriptor(&Value::utf8("too long"), &mut target).unwrap();
		assert!(target.is_null());

		// the two-byte prefix counts against a counted string's capacity
		let mut target = ParamDesc::varying(6);
		value_to_descriptor(&Value::utf8("abcde"), &mut target).unwrap();
		assert!(target.is_null());
	}

	#[test]
	fn test_counted_string_capacity_below_prefix_nulls() {
		// capacity 1 cannot hold the two-byte count, not even for ""
		let mut target = ParamDesc::varying(1);
		value_to_descriptor(&Value::utf8(""), &mut target).unwrap();
		assert!(target.is_null());

		// capacity 2 holds exactly the empty string
		let mut target = ParamDesc::varying(2);
		value_to_descriptor(&Value::utf8(""), &mut target).unwrap();
		assert!(!target.is_null());
		assert_eq!(&target.payload().unwrap()[0..2], &0u16.to_le_bytes());
	}

	#[test]
	fn test_write_string_into_numeric_fails() {
		let mut target = ParamDesc::long(1);
		let err = value_to_descriptor(&Value::utf8("x"), &mut target).unwrap_err();
		assert!(matches!(err, ConvertError::ValueMismatch { .. }));
		assert_eq!(target.read_i32().unwrap(), 1);
	}

	#[test]
	fn test_write_integral_decimal_shifts_into_scaled_field() {
		// mantissa 123, field scale -2: stored as 12300
		let mut target = ParamDesc::new(TypeTag::Int64, 8).with_scale(-2);
		value_to_descriptor(&Value::decimal(Decimal::new(123, 0)), &mut target).unwrap();
		assert_eq!(target.read_i64().unwrap(), 12300);
		assert_eq!(target.scale, -2);
	}

	#[test]
	fn test_write_scaled_decimal_keeps_mantissa() {
		let mut target = ParamDesc::new(TypeTag::Int64, 8);
		value_to_descriptor(&Value::decimal(Decimal::new(12345, 2)), &mut target).unwrap();
		assert_eq!(target.read_i64().unwrap(), 12345);
		assert_eq!(target.scale, -2);
	}

	#[test]
	fn test_decimal_scale_beyond_declarable_range_is_rejected() {
		// scale 128 has no i8 representation in the descriptor
		let mut target = ParamDesc::new(TypeTag::Int64, 8);
		let err = value_to_descriptor(&Value::decimal(Decimal::new(1, 128)), &mut target).unwrap_err();
		assert_eq!(err, ConvertError::OutOfRange {
			what: "decimal scale"
		});
	}

	#[test]
	fn test_write_temporals() {
		let date = Date::new(1999, 12, 31).unwrap();
		let time = Time::new(23, 59, 59, 0).unwrap();
		let ts = Timestamp::new(date, time);

		let mut target = ParamDesc::new(TypeTag::SqlDate, 4);
		value_to_descriptor(&Value::date(date), &mut target).unwrap();
		assert_eq!(target.read_i32().unwrap(), date.to_sql_days());

		let mut target = ParamDesc::new(TypeTag::SqlTime, 4);
		value_to_descriptor(&Value::time(time), &mut target).unwrap();
		assert_eq!(target.read_i32().unwrap(), time.to_sql_tenths());

		let mut target = ParamDesc::new(TypeTag::Timestamp, 8);
		value_to_descriptor(&Value::timestamp(ts), &mut target).unwrap();
		assert_eq!(target.read_i64().unwrap(), ts.to_sql_packed());

		// a date into a timestamp field lands at midnight
		let mut target = ParamDesc::new(TypeTag::Timestamp, 8);
		value_to_descriptor(&Value::date(date), &mut target).unwrap();
		assert_eq!(target.read_i64().unwrap(), Timestamp::from(date).to_sql_packed());

		// a timestamp into a date field keeps the date half
		let mut target = ParamDesc::new(TypeTag::SqlDate, 4);
		value_to_descriptor(&Value::timestamp(ts), &mut target).unwrap();
		assert_eq!(target.read_i32().unwrap(), date.to_sql_days());

		// a time into a date field is not meaningful
		let mut target = ParamDesc::new(TypeTag::SqlDate, 4);
		assert!(value_to_descriptor(&Value::time(time), &mut target).is_err());
	}

	#[test]
	fn test_copy_numeric() {
		let source = ParamDesc::long(77).with_scale(-1);
		let mut target = ParamDesc::long(0);

		copy(&source, &mut target).unwrap();
		assert_eq!(target.read_i32().unwrap(), 77);
		assert_eq!(target.scale, -1);
		assert_eq!(target.flags, source.flags);
	}

	#[test]
	fn test_copy_mismatched_tags_leaves_target_untouched() {
		let source = ParamDesc::long(77);
		let mut target = ParamDesc::short(5);
		let before = target.clone();

		let err = copy(&source, &mut target).unwrap_err();
		assert_eq!(err, ConvertError::TypeMismatch {
			from: TypeTag::Long,
			target: TypeTag::Short,
		});
		assert_eq!(target, before);
	}

	#[test]
	fn test_copy_string_is_unsupported() {
		let source = ParamDesc::text_value(4, "ab");
		let mut target = ParamDesc::text(4);
		assert_eq!(copy(&source, &mut target).unwrap_err(), ConvertError::Unsupported {
			tag: TypeTag::Text
		});
	}

	#[test]
	fn test_copy_preserves_null_flag() {
		let mut source = ParamDesc::long(0);
		source.flags = DescFlags::from_bits(DescFlags::NULL);

		let mut target = ParamDesc::long(9);
		copy(&source, &mut target).unwrap();
		assert!(target.is_null());
	}

	#[test]
	fn test_short_varying_payload_is_invalid() {
		let mut desc = ParamDesc::varying(4);
		// prefix claims 9 bytes, storage has 2
		desc.write_bytes(&9u16.to_le_bytes()).unwrap();
		assert_eq!(descriptor_to_value(&desc).unwrap_err(), ConvertError::InvalidWire {
			what: "counted string"
		});
	}
}

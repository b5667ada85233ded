// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! Value descriptors.
//!
//! A descriptor describes one SQL value in place: a type tag, a null flag,
//! declared byte length, decimal scale, a subtype and the value storage
//! itself. The numeric tag values and field layout follow the host database's
//! on-the-wire descriptor record; [`crate::abi`] bridges the raw form.

use crate::convert::ConvertError;

/// Descriptor type tags. The discriminants are fixed by the host database and
/// must not be renumbered.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
	Null = 0,
	/// Fixed-length character field, blank-padded to the declared length.
	Text = 1,
	/// NUL-terminated character field.
	CString = 2,
	/// Counted string: a little-endian u16 payload length, then the payload.
	Varying = 3,
	Byte = 7,
	Short = 8,
	Long = 9,
	Real = 11,
	Double = 12,
	SqlDate = 14,
	SqlTime = 15,
	Timestamp = 16,
	Blob = 17,
	Int64 = 19,
}

impl TypeTag {
	pub fn is_string(&self) -> bool {
		matches!(self, TypeTag::Text | TypeTag::CString | TypeTag::Varying)
	}

	/// Fixed payload width in bytes, `None` for strings, blobs and null.
	pub fn fixed_width(&self) -> Option<usize> {
		match self {
			TypeTag::Byte => Some(1),
			TypeTag::Short => Some(2),
			TypeTag::Long | TypeTag::Real | TypeTag::SqlDate | TypeTag::SqlTime => Some(4),
			TypeTag::Double | TypeTag::Timestamp | TypeTag::Int64 => Some(8),
			_ => None,
		}
	}
}

impl TryFrom<u8> for TypeTag {
	type Error = ConvertError;

	fn try_from(tag: u8) -> Result<Self, Self::Error> {
		match tag {
			0 => Ok(TypeTag::Null),
			1 => Ok(TypeTag::Text),
			2 => Ok(TypeTag::CString),
			3 => Ok(TypeTag::Varying),
			7 => Ok(TypeTag::Byte),
			8 => Ok(TypeTag::Short),
			9 => Ok(TypeTag::Long),
			11 => Ok(TypeTag::Real),
			12 => Ok(TypeTag::Double),
			14 => Ok(TypeTag::SqlDate),
			15 => Ok(TypeTag::SqlTime),
			16 => Ok(TypeTag::Timestamp),
			17 => Ok(TypeTag::Blob),
			19 => Ok(TypeTag::Int64),
			other => Err(ConvertError::UnknownTag {
				tag: other,
			}),
		}
	}
}

/// Descriptor flag bits. Only the null bit is interpreted here; unknown bits
/// pass through untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DescFlags(u16);

impl DescFlags {
	pub const NULL: u16 = 0x1;

	pub fn from_bits(bits: u16) -> Self {
		Self(bits)
	}

	pub fn bits(&self) -> u16 {
		self.0
	}

	pub fn is_null(&self) -> bool {
		self.0 & Self::NULL != 0
	}

	pub fn set_null(&mut self) {
		self.0 |= Self::NULL;
	}

	pub fn clear_null(&mut self) {
		self.0 &= !Self::NULL;
	}
}

/// One SQL value descriptor with owned storage.
///
/// `length` is the declared field capacity in bytes. For `Varying` the
/// capacity includes the two-byte length prefix. `scale` is the decimal scale
/// of integer-backed numerics, zero or negative.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamDesc {
	pub dtype: TypeTag,
	pub flags: DescFlags,
	pub length: u16,
	pub scale: i8,
	pub sub_type: i16,
	pub address: Option<Vec<u8>>,
}

impl ParamDesc {
	/// A descriptor of the given tag with zeroed storage of `length` bytes.
	pub fn new(dtype: TypeTag, length: u16) -> Self {
		Self {
			dtype,
			flags: DescFlags::default(),
			length,
			scale: 0,
			sub_type: 0,
			address: Some(vec![0u8; length as usize]),
		}
	}

	/// A null descriptor carrying no storage.
	pub fn null() -> Self {
		let mut flags = DescFlags::default();
		flags.set_null();
		Self {
			dtype: TypeTag::Null,
			flags,
			length: 0,
			scale: 0,
			sub_type: 0,
			address: None,
		}
	}

	pub fn with_scale(mut self, scale: i8) -> Self {
		self.scale = scale;
		self
	}

	fn with_payload(dtype: TypeTag, payload: Vec<u8>) -> Self {
		Self {
			dtype,
			flags: DescFlags::default(),
			length: payload.len() as u16,
			scale: 0,
			sub_type: 0,
			address: Some(payload),
		}
	}

	pub fn byte(value: i8) -> Self {
		Self::with_payload(TypeTag::Byte, value.to_le_bytes().to_vec())
	}

	pub fn short(value: i16) -> Self {
		Self::with_payload(TypeTag::Short, value.to_le_bytes().to_vec())
	}

	pub fn long(value: i32) -> Self {
		Self::with_payload(TypeTag::Long, value.to_le_bytes().to_vec())
	}

	pub fn int64(value: i64) -> Self {
		Self::with_payload(TypeTag::Int64, value.to_le_bytes().to_vec())
	}

	pub fn real(value: f32) -> Self {
		Self::with_payload(TypeTag::Real, value.to_le_bytes().to_vec())
	}

	pub fn double(value: f64) -> Self {
		Self::with_payload(TypeTag::Double, value.to_le_bytes().to_vec())
	}

	pub fn sql_date(days: i32) -> Self {
		Self::with_payload(TypeTag::SqlDate, days.to_le_bytes().to_vec())
	}

	pub fn sql_time(tenths: i32) -> Self {
		Self::with_payload(TypeTag::SqlTime, tenths.to_le_bytes().to_vec())
	}

	pub fn timestamp(packed: i64) -> Self {
		Self::with_payload(TypeTag::Timestamp, packed.to_le_bytes().to_vec())
	}

	/// An empty fixed-text descriptor of the given capacity, blank-filled.
	pub fn text(capacity: u16) -> Self {
		let mut desc = Self::with_payload(TypeTag::Text, vec![b' '; capacity as usize]);
		desc.length = capacity;
		desc
	}

	/// A fixed-text descriptor holding `value`, blank-padded to capacity.
	/// The value must fit the capacity.
	pub fn text_value(capacity: u16, value: &str) -> Self {
		let mut buffer = vec![b' '; capacity as usize];
		buffer[..value.len()].copy_from_slice(value.as_bytes());

		let mut desc = Self::with_payload(TypeTag::Text, buffer);
		desc.length = capacity;
		desc
	}

	/// An empty counted-string descriptor. Capacity includes the two-byte
	/// length prefix.
	pub fn varying(capacity: u16) -> Self {
		Self::new(TypeTag::Varying, capacity)
	}

	/// A counted-string descriptor holding `value`.
	pub fn varying_value(capacity: u16, value: &str) -> Self {
		let mut buffer = vec![0u8; capacity as usize];
		buffer[0..2].copy_from_slice(&(value.len() as u16).to_le_bytes());
		buffer[2..2 + value.len()].copy_from_slice(value.as_bytes());

		let mut desc = Self::with_payload(TypeTag::Varying, buffer);
		desc.length = capacity;
		desc
	}

	pub fn is_null(&self) -> bool {
		self.flags.is_null()
	}

	pub fn set_null(&mut self) {
		self.flags.set_null();
	}

	pub fn clear_null(&mut self) {
		self.flags.clear_null();
	}

	pub fn payload(&self) -> Result<&[u8], ConvertError> {
		self.address.as_deref().ok_or(ConvertError::MissingStorage)
	}

	fn read_array<const N: usize>(&self) -> Result<[u8; N], ConvertError> {
		let payload = self.payload()?;
		if payload.len() < N {
			return Err(ConvertError::ShortStorage {
				need: N,
				have: payload.len(),
			});
		}

		let mut bytes = [0u8; N];
		bytes.copy_from_slice(&payload[..N]);
		Ok(bytes)
	}

	/// Write `bytes` at the start of the storage, allocating it when absent.
	pub(crate) fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ConvertError> {
		match self.address.as_mut() {
			Some(buffer) if buffer.len() >= bytes.len() => {
				buffer[..bytes.len()].copy_from_slice(bytes);
			}
			Some(buffer) => {
				return Err(ConvertError::ShortStorage {
					need: bytes.len(),
					have: buffer.len(),
				});
			}
			None => self.address = Some(bytes.to_vec()),
		}
		Ok(())
	}

	pub fn read_i8(&self) -> Result<i8, ConvertError> {
		Ok(i8::from_le_bytes(self.read_array::<1>()?))
	}

	pub fn read_i16(&self) -> Result<i16, ConvertError> {
		Ok(i16::from_le_bytes(self.read_array::<2>()?))
	}

	pub fn read_i32(&self) -> Result<i32, ConvertError> {
		Ok(i32::from_le_bytes(self.read_array::<4>()?))
	}

	pub fn read_i64(&self) -> Result<i64, ConvertError> {
		Ok(i64::from_le_bytes(self.read_array::<8>()?))
	}

	pub fn read_f32(&self) -> Result<f32, ConvertError> {
		Ok(f32::from_le_bytes(self.read_array::<4>()?))
	}

	pub fn read_f64(&self) -> Result<f64, ConvertError> {
		Ok(f64::from_le_bytes(self.read_array::<8>()?))
	}

	pub fn write_i8(&mut self, value: i8) -> Result<(), ConvertError> {
		self.write_bytes(&value.to_le_bytes())
	}

	pub fn write_i16(&mut self, value: i16) -> Result<(), ConvertError> {
		self.write_bytes(&value.to_le_bytes())
	}

	pub fn write_i32(&mut self, value: i32) -> Result<(), ConvertError> {
		self.write_bytes(&value.to_le_bytes())
	}

	pub fn write_i64(&mut self, value: i64) -> Result<(), ConvertError> {
		self.write_bytes(&value.to_le_bytes())
	}

	pub fn write_f32(&mut self, value: f32) -> Result<(), ConvertError> {
		self.write_bytes(&value.to_le_bytes())
	}

	pub fn write_f64(&mut self, value: f64) -> Result<(), ConvertError> {
		self.write_bytes(&value.to_le_bytes())
	}
}

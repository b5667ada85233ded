// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

//! Raw descriptor records as the host database lays them out in memory.
//!
//! [`RawParamDesc`] mirrors the caller's descriptor struct field for field.
//! [`read_descriptor`] snapshots a raw record into an owned [`ParamDesc`];
//! [`write_descriptor`] flushes an owned descriptor back into caller storage.
//! The caller owns the storage behind `address` and its lifetime; both
//! functions only ever touch `length` bytes of it.

use crate::{
	convert::ConvertError,
	descriptor::{DescFlags, ParamDesc, TypeTag},
};

/// A descriptor as it crosses the foreign boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawParamDesc {
	pub dtype: u8,
	pub scale: i8,
	pub length: u16,
	pub sub_type: i16,
	pub flags: u16,
	pub address: *mut u8,
}

/// Snapshot a raw descriptor into owned form.
///
/// # Safety
///
/// When `address` is non-null it must point to readable storage of at least
/// `length` bytes that stays valid for the duration of the call.
pub unsafe fn read_descriptor(raw: &RawParamDesc) -> Result<ParamDesc, ConvertError> {
	let dtype = TypeTag::try_from(raw.dtype)?;

	let address = if raw.address.is_null() {
		None
	} else {
		let bytes = unsafe { std::slice::from_raw_parts(raw.address, raw.length as usize) };
		Some(bytes.to_vec())
	};

	Ok(ParamDesc {
		dtype,
		flags: DescFlags::from_bits(raw.flags),
		length: raw.length,
		scale: raw.scale,
		sub_type: raw.sub_type,
		address,
	})
}

/// Flush an owned descriptor back into a raw record.
///
/// Metadata fields are always written. Storage is copied only when the owned
/// descriptor holds some and the raw record points at writable memory; an
/// owned payload with nowhere to land is an error.
///
/// # Safety
///
/// When `raw.address` is non-null it must point to writable storage at least
/// as large as the owned payload.
pub unsafe fn write_descriptor(desc: &ParamDesc, raw: &mut RawParamDesc) -> Result<(), ConvertError> {
	raw.dtype = desc.dtype as u8;
	raw.scale = desc.scale;
	raw.length = desc.length;
	raw.sub_type = desc.sub_type;
	raw.flags = desc.flags.bits();

	if let Some(payload) = desc.address.as_ref() {
		if raw.address.is_null() {
			return Err(ConvertError::MissingStorage);
		}

		unsafe { std::ptr::copy_nonoverlapping(payload.as_ptr(), raw.address, payload.len()) };
	}

	Ok(())
}

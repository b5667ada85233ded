// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use std::fmt::{Display, Formatter};

use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::{self, Visitor},
};

use crate::value::{Date, Time};

/// A date and time value.
///
/// The wire format is two 32-bit halves packed into one 64-bit word: the day
/// number in the low half and tenths of milliseconds since midnight in the
/// high half.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
	date: Date,
	time: Time,
}

impl Timestamp {
	pub fn new(date: Date, time: Time) -> Self {
		Self {
			date,
			time,
		}
	}

	pub fn date(&self) -> Date {
		self.date
	}

	pub fn time(&self) -> Time {
		self.time
	}

	pub fn to_sql_parts(&self) -> (i32, i32) {
		(self.date.to_sql_days(), self.time.to_sql_tenths())
	}

	pub fn from_sql_parts(days: i32, tenths: i32) -> Option<Self> {
		Some(Self {
			date: Date::from_sql_days(days)?,
			time: Time::from_sql_tenths(tenths)?,
		})
	}

	pub fn to_sql_packed(&self) -> i64 {
		let (days, tenths) = self.to_sql_parts();
		(days as u32 as i64) | ((tenths as i64) << 32)
	}

	pub fn from_sql_packed(packed: i64) -> Option<Self> {
		Self::from_sql_parts(packed as i32, (packed >> 32) as i32)
	}
}

impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.date, self.time)
	}
}

impl From<Date> for Timestamp {
	fn from(date: Date) -> Self {
		Self {
			date,
			time: Time::default(),
		}
	}
}

impl std::str::FromStr for Timestamp {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let (date, time) = value.split_once(' ').ok_or_else(|| format!("invalid timestamp format: {}", value))?;

		Ok(Self {
			date: date.parse()?,
			time: time.parse()?,
		})
	}
}

// Serde implementation for the ISO 8601 string form
impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_string())
	}
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
	type Value = Timestamp;

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a timestamp in ISO 8601 format (YYYY-MM-DD HH:MM:SS.mmm)")
	}

	fn visit_str<E>(self, value: &str) -> Result<Timestamp, E>
	where
		E: de::Error,
	{
		value.parse().map_err(E::custom)
	}
}

impl<'de> Deserialize<'de> for Timestamp {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(TimestampVisitor)
	}
}

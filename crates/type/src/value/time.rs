// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use std::fmt::{Display, Formatter};

use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::{self, Visitor},
};

/// A time of day with millisecond precision.
///
/// The wire format is tenths of milliseconds since midnight.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Time {
	hour: u32,
	minute: u32,
	second: u32,
	millisecond: u32,
}

impl Time {
	pub fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Option<Self> {
		if hour > 23 || minute > 59 || second > 59 || millisecond > 999 {
			return None;
		}
		Some(Self {
			hour,
			minute,
			second,
			millisecond,
		})
	}

	pub fn hour(&self) -> u32 {
		self.hour
	}

	pub fn minute(&self) -> u32 {
		self.minute
	}

	pub fn second(&self) -> u32 {
		self.second
	}

	pub fn millisecond(&self) -> u32 {
		self.millisecond
	}

	/// Encode to tenths of milliseconds since midnight.
	pub fn to_sql_tenths(&self) -> i32 {
		((self.hour * 3_600_000 + self.minute * 60_000 + self.second * 1_000 + self.millisecond) * 10) as i32
	}

	/// Decode tenths of milliseconds since midnight. Sub-millisecond tenths
	/// are discarded, consistent with the encode granularity.
	pub fn from_sql_tenths(tenths: i32) -> Option<Self> {
		if tenths < 0 {
			return None;
		}

		let millis_in_day = (tenths / 10) as u32;
		let hour = millis_in_day / 3_600_000;
		let minute = (millis_in_day - hour * 3_600_000) / 60_000;
		let second = (millis_in_day - hour * 3_600_000 - minute * 60_000) / 1_000;
		let millisecond = millis_in_day - hour * 3_600_000 - minute * 60_000 - second * 1_000;

		Self::new(hour, minute, second, millisecond)
	}
}

impl Display for Time {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:02}:{:02}:{:02}.{:03}", self.hour, self.minute, self.second, self.millisecond)
	}
}

impl std::str::FromStr for Time {
	type Err = String;

	/// Parse `HH:MM:SS` or `HH:MM:SS.mmm`; a fraction shorter than three
	/// digits is right-padded (".5" is 500 milliseconds).
	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let parts: Vec<&str> = value.split(':').collect();

		if parts.len() != 3 {
			return Err(format!("invalid time format: {}", value));
		}

		let hour = parts[0].parse::<u32>().map_err(|_| format!("invalid hour: {}", parts[0]))?;
		let minute = parts[1].parse::<u32>().map_err(|_| format!("invalid minute: {}", parts[1]))?;

		let (second_digits, fraction) = parts[2].split_once('.').unwrap_or((parts[2], ""));
		let second = second_digits.parse::<u32>().map_err(|_| format!("invalid second: {}", second_digits))?;

		let millisecond = if fraction.is_empty() {
			0
		} else if fraction.len() <= 3 {
			let digits = fraction.parse::<u32>().map_err(|_| format!("invalid fraction: {}", fraction))?;
			digits * 10u32.pow(3 - fraction.len() as u32)
		} else {
			return Err(format!("invalid fraction: {}", fraction));
		};

		Self::new(hour, minute, second, millisecond).ok_or_else(|| format!("invalid time: {}", value))
	}
}

// Serde implementation for the ISO 8601 string form
impl Serialize for Time {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_string())
	}
}

struct TimeVisitor;

impl<'de> Visitor<'de> for TimeVisitor {
	type Value = Time;

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a time in ISO 8601 format (HH:MM:SS.mmm)")
	}

	fn visit_str<E>(self, value: &str) -> Result<Time, E>
	where
		E: de::Error,
	{
		value.parse().map_err(E::custom)
	}
}

impl<'de> Deserialize<'de> for Time {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(TimeVisitor)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_known_wire_values() {
		assert_eq!(Time::new(0, 0, 0, 0).unwrap().to_sql_tenths(), 0);
		assert_eq!(Time::new(0, 0, 1, 0).unwrap().to_sql_tenths(), 10_000);
		assert_eq!(Time::new(1, 0, 0, 0).unwrap().to_sql_tenths(), 36_000_000);
		assert_eq!(Time::new(23, 59, 59, 999).unwrap().to_sql_tenths(), 863_999_990);
	}

	#[test]
	fn test_roundtrip() {
		for hour in 0..24 {
			for minute in (0..60).step_by(7) {
				for second in (0..60).step_by(11) {
					for millisecond in (0..1000).step_by(37) {
						let time = Time::new(hour, minute, second, millisecond).unwrap();
						let recovered = Time::from_sql_tenths(time.to_sql_tenths()).unwrap();
						assert_eq!(time, recovered);
					}
				}
			}
		}
	}

	#[test]
	fn test_sub_millisecond_tenths_are_discarded() {
		// 10_005 tenths is 1.0005 seconds; the half tenth of a millisecond
		// cannot be represented and drops
		let time = Time::from_sql_tenths(10_005).unwrap();
		assert_eq!(time, Time::new(0, 0, 1, 0).unwrap());
	}

	#[test]
	fn test_invalid_times() {
		assert!(Time::new(24, 0, 0, 0).is_none());
		assert!(Time::new(0, 60, 0, 0).is_none());
		assert!(Time::new(0, 0, 60, 0).is_none());
		assert!(Time::new(0, 0, 0, 1000).is_none());
		assert!(Time::from_sql_tenths(-1).is_none());
	}

	#[test]
	fn test_display() {
		assert_eq!(Time::new(9, 5, 3, 7).unwrap().to_string(), "09:05:03.007");
	}

	#[test]
	fn test_parse() {
		assert_eq!("09:05:03.007".parse::<Time>().unwrap(), Time::new(9, 5, 3, 7).unwrap());
		assert_eq!("23:59:59".parse::<Time>().unwrap(), Time::new(23, 59, 59, 0).unwrap());
		assert_eq!("00:00:00.5".parse::<Time>().unwrap(), Time::new(0, 0, 0, 500).unwrap());

		assert!("12:00".parse::<Time>().is_err());
		assert!("24:00:00".parse::<Time>().is_err());
		assert!("00:00:00.0001".parse::<Time>().is_err());
	}

	#[test]
	fn test_serde_roundtrip() {
		let time = Time::new(13, 30, 15, 250).unwrap();
		let json = serde_json::to_string(&time).unwrap();
		assert_eq!(json, "\"13:30:15.250\"");

		let recovered: Time = serde_json::from_str(&json).unwrap();
		assert_eq!(time, recovered);
	}
}

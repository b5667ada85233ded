// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use std::fmt::{Display, Formatter};

use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::{self, Visitor},
};

/// Epoch offset of the SQL date wire format relative to the Julian day
/// numbering the calendar transform works in. Must never change: the stored
/// format depends on it.
const SQL_DATE_EPOCH_OFFSET: i32 = 1721119 - 2400001;

/// A calendar date (year, month, day) without time information.
///
/// The wire format used by the host database is a single day number produced
/// by a proleptic-Gregorian transform with a century/year-of-century
/// decomposition; [`Date::to_sql_days`] and [`Date::from_sql_days`] reproduce
/// it bit for bit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date {
	year: i32,
	month: u32,
	day: u32,
}

impl Default for Date {
	fn default() -> Self {
		Self {
			year: 1970,
			month: 1,
			day: 1,
		}
	}
}

// Calendar utilities
impl Date {
	#[inline]
	fn is_leap_year(year: i32) -> bool {
		(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
	}

	#[inline]
	fn days_in_month(year: i32, month: u32) -> u32 {
		match month {
			1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
			4 | 6 | 9 | 11 => 30,
			2 => {
				if Self::is_leap_year(year) {
					29
				} else {
					28
				}
			}
			_ => 0,
		}
	}
}

impl Date {
	/// Create a date, validating the calendar input. Years outside [1, 9999]
	/// are rejected; the wire transform is only exercised inside that range.
	pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
		if year < 1 || year > 9999 {
			return None;
		}
		if month < 1 || month > 12 || day < 1 || day > Self::days_in_month(year, month) {
			return None;
		}
		Some(Self {
			year,
			month,
			day,
		})
	}

	pub fn year(&self) -> i32 {
		self.year
	}

	pub fn month(&self) -> u32 {
		self.month
	}

	pub fn day(&self) -> u32 {
		self.day
	}

	/// Encode to the SQL date day number.
	///
	/// Months are shifted so March is 0 and January/February belong to the
	/// previous year, then the year splits into century and year-of-century.
	pub fn to_sql_days(&self) -> i32 {
		let day = self.day as i32;
		let mut month = self.month as i32;
		let mut year = self.year;

		if month > 2 {
			month -= 3;
		} else {
			month += 9;
			year -= 1;
		}

		let c = year / 100;
		let ya = year - 100 * c;

		(146097 * c) / 4 + (1461 * ya) / 4 + (153 * month + 2) / 5 + day + SQL_DATE_EPOCH_OFFSET
	}

	/// Decode a SQL date day number. The algebraic inverse of
	/// [`Date::to_sql_days`], including the compensating rounding terms.
	pub fn from_sql_days(days: i32) -> Option<Self> {
		let mut date = days - SQL_DATE_EPOCH_OFFSET;

		let century = (4 * date - 1) / 146097;
		date = 4 * date - 1 - 146097 * century;
		let mut day = date / 4;

		date = (4 * day + 3) / 1461;
		day = 4 * day + 3 - 1461 * date;
		day = (day + 4) / 4;

		let mut month = (5 * day - 3) / 153;
		day = 5 * day - 3 - 153 * month;
		day = (day + 5) / 5;

		let mut year = 100 * century + date;

		if month < 10 {
			month += 3;
		} else {
			month -= 9;
			year += 1;
		}

		Self::new(year, month as u32, day as u32)
	}
}

impl Display for Date {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
	}
}

impl std::str::FromStr for Date {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let parts: Vec<&str> = value.split('-').collect();

		if parts.len() != 3 {
			return Err(format!("invalid date format: {}", value));
		}

		let year = parts[0].parse::<i32>().map_err(|_| format!("invalid year: {}", parts[0]))?;
		let month = parts[1].parse::<u32>().map_err(|_| format!("invalid month: {}", parts[1]))?;
		let day = parts[2].parse::<u32>().map_err(|_| format!("invalid day: {}", parts[2]))?;

		Self::new(year, month, day).ok_or_else(|| format!("invalid date: {}-{:02}-{:02}", year, month, day))
	}
}

// Serde implementation for ISO 8601 format
impl Serialize for Date {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_string())
	}
}

struct DateVisitor;

impl<'de> Visitor<'de> for DateVisitor {
	type Value = Date;

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a date in ISO 8601 format (YYYY-MM-DD)")
	}

	fn visit_str<E>(self, value: &str) -> Result<Date, E>
	where
		E: de::Error,
	{
		value.parse().map_err(E::custom)
	}
}

impl<'de> Deserialize<'de> for Date {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(DateVisitor)
	}
}

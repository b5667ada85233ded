// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Hostlink

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A scaled decimal: `mantissa / 10^scale`.
///
/// Scale 0 is an ordinary integer; the converter collapses it to one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decimal {
	mantissa: i64,
	scale: u8,
}

impl Decimal {
	pub fn new(mantissa: i64, scale: u8) -> Self {
		Self {
			mantissa,
			scale,
		}
	}

	pub fn mantissa(&self) -> i64 {
		self.mantissa
	}

	pub fn scale(&self) -> u8 {
		self.scale
	}

	pub fn is_integral(&self) -> bool {
		self.scale == 0
	}
}

impl From<i64> for Decimal {
	fn from(mantissa: i64) -> Self {
		Self::new(mantissa, 0)
	}
}

impl Display for Decimal {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.scale == 0 {
			return Display::fmt(&self.mantissa, f);
		}

		let sign = if self.mantissa < 0 {
			"-"
		} else {
			""
		};
		let digits = self.mantissa.unsigned_abs().to_string();
		let scale = self.scale as usize;

		if digits.len() > scale {
			let (int, frac) = digits.split_at(digits.len() - scale);
			write!(f, "{}{}.{}", sign, int, frac)
		} else {
			write!(f, "{}0.{}{}", sign, "0".repeat(scale - digits.len()), digits)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display() {
		assert_eq!(Decimal::new(12345, 2).to_string(), "123.45");
		assert_eq!(Decimal::new(-12345, 2).to_string(), "-123.45");
		assert_eq!(Decimal::new(5, 3).to_string(), "0.005");
		assert_eq!(Decimal::new(42, 0).to_string(), "42");
	}

	#[test]
	fn test_integral() {
		assert!(Decimal::new(7, 0).is_integral());
		assert!(!Decimal::new(7, 1).is_integral());
	}
}

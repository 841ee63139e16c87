//! Frequency and memory size units.
//!
//! Both types parse the string notation used by gem5 parameters and render back
//! into it. Frequencies use decimal prefixes (`3GHz` = 3e9 Hz); memory sizes use
//! binary prefixes regardless of spelling (`1kB` = `1KiB` = 1024 bytes).

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::constants::TICKS_PER_SECOND;
use super::error::ConfigError;

/// A clock frequency in hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Frequency(u64);

impl Frequency {
    /// Creates a frequency from a value in hertz.
    pub const fn from_hz(hz: u64) -> Self {
        Self(hz)
    }

    /// Creates a frequency from a value in gigahertz.
    pub const fn from_ghz(ghz: u64) -> Self {
        Self(ghz * 1_000_000_000)
    }

    /// Returns the frequency in hertz.
    pub const fn hz(self) -> u64 {
        self.0
    }

    /// Returns the clock period expressed in simulator ticks.
    ///
    /// A 3 GHz clock gives `333.33..` ticks per cycle at 1 ps per tick.
    pub fn ticks_per_cycle(self) -> f64 {
        TICKS_PER_SECOND as f64 / self.0 as f64
    }
}

impl FromStr for Frequency {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ConfigError::InvalidFrequency(s.to_string());
        let trimmed = s.trim();
        let number = trimmed.strip_suffix("Hz").ok_or_else(err)?;
        let (number, scale) = match number.chars().last() {
            Some('k') => (&number[..number.len() - 1], 1e3),
            Some('M') => (&number[..number.len() - 1], 1e6),
            Some('G') => (&number[..number.len() - 1], 1e9),
            Some('T') => (&number[..number.len() - 1], 1e12),
            _ => (number, 1.0),
        };
        let value: f64 = number.trim().parse().map_err(|_| err())?;
        let hz = (value * scale).round();
        if !hz.is_finite() || hz < 1.0 || hz > u64::MAX as f64 {
            return Err(err());
        }
        Ok(Self(hz as u64))
    }
}

impl TryFrom<String> for Frequency {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNITS: [(u64, &str); 4] = [
            (1_000_000_000_000, "THz"),
            (1_000_000_000, "GHz"),
            (1_000_000, "MHz"),
            (1_000, "kHz"),
        ];
        for (scale, unit) in UNITS {
            if self.0 >= scale && self.0 % scale == 0 {
                return write!(f, "{}{}", self.0 / scale, unit);
            }
        }
        write!(f, "{}Hz", self.0)
    }
}

/// A memory or cache capacity in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct MemorySize(u64);

impl MemorySize {
    /// Creates a size from a byte count.
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Creates a size from a count of KiB.
    pub const fn from_kib(kib: u64) -> Self {
        Self(kib * 1024)
    }

    /// Creates a size from a count of GiB.
    pub const fn from_gib(gib: u64) -> Self {
        Self(gib * 1024 * 1024 * 1024)
    }

    /// Returns the size in bytes.
    pub const fn bytes(self) -> u64 {
        self.0
    }
}

impl FromStr for MemorySize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ConfigError::InvalidMemorySize(s.to_string());
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, unit) = trimmed.split_at(split);
        let value: u64 = digits.parse().map_err(|_| err())?;
        let shift = match unit.trim() {
            "" | "B" => 0,
            "k" | "kB" | "KB" | "KiB" => 10,
            "M" | "MB" | "MiB" => 20,
            "G" | "GB" | "GiB" => 30,
            "T" | "TB" | "TiB" => 40,
            _ => return Err(err()),
        };
        let bytes = value.checked_mul(1u64 << shift).ok_or_else(err)?;
        if bytes == 0 {
            return Err(err());
        }
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for MemorySize {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for MemorySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNITS: [(u32, &str); 4] = [(40, "TB"), (30, "GB"), (20, "MB"), (10, "kB")];
        for (shift, unit) in UNITS {
            let scale = 1u64 << shift;
            if self.0 >= scale && self.0 % scale == 0 {
                return write!(f, "{}{}", self.0 / scale, unit);
            }
        }
        write!(f, "{}B", self.0)
    }
}

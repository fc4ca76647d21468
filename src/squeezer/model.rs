//! Squeezer data model.
//!
//! Lemons are identified by [`LemonId`]s that are never reused for the life
//! of a store. Capacity is a function of [`CitrusSize`] alone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque lemon identifier, rendered in base 36.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LemonId(pub(crate) u64);

impl fmt::Display for LemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut n = self.0;
        let mut buf = Vec::new();
        loop {
            buf.push(DIGITS[(n % 36) as usize]);
            n /= 36;
            if n == 0 {
                break;
            }
        }
        while buf.len() < 3 {
            buf.push(b'0');
        }
        let digits: String = buf.iter().rev().map(|&b| b as char).collect();
        f.write_str(&digits)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitrusSize {
    Small,
    Medium,
    Large,
}

impl CitrusSize {
    pub const ALL: [CitrusSize; 3] = [CitrusSize::Small, CitrusSize::Medium, CitrusSize::Large];

    /// Maximum extractable juice in milliliters.
    pub fn capacity_ml(self) -> f64 {
        match self {
            CitrusSize::Small => 30.0,
            CitrusSize::Medium => 50.0,
            CitrusSize::Large => 80.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CitrusSize::Small => "Small",
            CitrusSize::Medium => "Medium",
            CitrusSize::Large => "Large",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            CitrusSize::Small => "🍋",
            CitrusSize::Medium => "🟨",
            CitrusSize::Large => "🟡",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CitrusSize::Small => "~30ml juice",
            CitrusSize::Medium => "~50ml juice",
            CitrusSize::Large => "~80ml juice",
        }
    }
}

impl fmt::Display for CitrusSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown lemon size '{0}' (expected small, medium or large)")]
pub struct UnknownSize(pub String);

impl FromStr for CitrusSize {
    type Err = UnknownSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" | "s" => Ok(CitrusSize::Small),
            "medium" | "m" => Ok(CitrusSize::Medium),
            "large" | "l" => Ok(CitrusSize::Large),
            _ => Err(UnknownSize(s.to_string())),
        }
    }
}

/// A single squeezable lemon.
#[derive(Debug, Clone, PartialEq)]
pub struct CitrusObject {
    pub id: LemonId,
    pub size: CitrusSize,
    pub capacity: f64,
    pub extracted: f64,
    pub squeezed: bool,
}

impl CitrusObject {
    pub fn new(id: LemonId, size: CitrusSize) -> Self {
        Self {
            id,
            size,
            capacity: size.capacity_ml(),
            extracted: 0.0,
            squeezed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JuiceQuality {
    Poor,
    Good,
    Excellent,
}

impl JuiceQuality {
    pub fn label(self) -> &'static str {
        match self {
            JuiceQuality::Poor => "Poor",
            JuiceQuality::Good => "Good",
            JuiceQuality::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for JuiceQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate of every completed squeeze.
#[derive(Debug, Clone, PartialEq)]
pub struct JuiceCollection {
    pub total_amount: f64,
    pub quality: JuiceQuality,
    pub lemons_used: u32,
}

impl Default for JuiceCollection {
    fn default() -> Self {
        Self {
            total_amount: 0.0,
            quality: JuiceQuality::Good,
            lemons_used: 0,
        }
    }
}

//! # OROBOROS Magnitude
//!
//! Economy numbers for idle-game scale: gold counts, damage and prestige
//! costs that outgrow `f64` long before the player stops clicking.
//!
//! ## Design Principles
//!
//! 1. **Bounded mantissa, unbounded exponent** - `mantissa × 10^exponent`, always normalized
//! 2. **Precision loss is policy** - tiny addends vanish, multiply collapses, nothing panics
//! 3. **Pure values** - every operator returns a new `Copy` value; inputs are never touched
//! 4. **External configuration** - display style loaded from TOML
//!
//! ## Precision Tiers
//!
//! - [`FloatMagnitude`]: `f64` mantissa, up to 15 integer digits, for per-frame HUD math
//! - [`DecimalMagnitude`]: `Decimal` mantissa, up to 14 integer digits, for the bank and saves
//!
//! ## Example
//!
//! ```rust,ignore
//! use oroboros_magnitude::{DecimalMagnitude, MagnitudeConfig};
//!
//! let config = MagnitudeConfig::from_toml_file("data/schemas/economy/magnitude.toml")?;
//!
//! let gold = DecimalMagnitude::parse_suffixed("13.4AA")?;
//! let income = DecimalMagnitude::parse("2.6E+94")?;
//! let total = gold + income;
//!
//! hud.set_text(total.format(&config)); // "40AA"
//! save.write(total.to_string());       // lossless
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod arithmetic;
pub mod config;
mod convert;
pub mod error;
mod format;
pub mod magnitude;
pub mod mantissa;
mod parse;
mod serialization;
pub mod suffix;

pub use arithmetic::SqrtMode;
pub use config::{FormatStyle, MagnitudeConfig};
pub use error::{MagnitudeError, MagnitudeResult};
pub use magnitude::{BigMagnitude, DecimalMagnitude, FloatMagnitude};
pub use mantissa::Mantissa;
pub use suffix::{exponent_from_suffix, group_exponent, suffix_for_exponent, suffix_for_length};

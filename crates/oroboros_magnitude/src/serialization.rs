//! # Save-Game Encoding
//!
//! Magnitudes serialize as their lossless compact string (`15000000000000E+7`)
//! so save files survive any number of load/store cycles. Deserialization
//! also takes plain and suffixed strings, integers and floats, which keeps
//! hand-written balance files readable:
//!
//! ```toml
//! starting_gold = 100
//! boss_hp = "1.5E+20"
//! prestige_cost = "2.5AA"
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::magnitude::BigMagnitude;
use crate::mantissa::Mantissa;

impl<M: Mantissa> Serialize for BigMagnitude<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct MagnitudeVisitor<M>(PhantomData<M>);

impl<'de, M: Mantissa> Visitor<'de> for MagnitudeVisitor<M> {
    type Value = BigMagnitude<M>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number or a magnitude string such as \"1.5E+20\" or \"13.4AA\"")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        BigMagnitude::parse(value)
            .or_else(|_| BigMagnitude::parse_suffixed(value))
            .map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(BigMagnitude::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        match i64::try_from(value) {
            Ok(value) => Ok(BigMagnitude::from(value)),
            Err(_) => BigMagnitude::parse(&value.to_string()).map_err(E::custom),
        }
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        BigMagnitude::try_from(value).map_err(E::custom)
    }
}

impl<'de, M: Mantissa> Deserialize<'de> for BigMagnitude<M> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MagnitudeVisitor(PhantomData))
    }
}

//! Chain and data-source identifiers.
//!
//! Both enums persist as integers, so every conversion back from storage
//! goes through `TryFrom<i32>` and fails loudly on values the code does
//! not know about.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Upstream system a pool-yield observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Unknown = 0,
    Defillama = 1,
}

impl DataSource {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for DataSource {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Defillama),
            other => Err(Error::Parse(format!("unknown data source: {other}"))),
        }
    }
}

/// Blockchain a pool lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Unknown = 0,
    Aptos = 1,
}

impl Chain {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Chain {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::Aptos),
            other => Err(Error::Parse(format!("unknown chain: {other}"))),
        }
    }
}

/// Map an aggregator chain label onto the internal enum.
///
/// Matching is case-insensitive; anything unrecognized becomes
/// [`Chain::Unknown`] rather than an error, since the aggregator lists
/// many chains this service does not track.
#[must_use]
pub fn normalize_chain(chain: &str) -> Chain {
    match chain.to_ascii_lowercase().as_str() {
        "aptos" => Chain::Aptos,
        _ => Chain::Unknown,
    }
}

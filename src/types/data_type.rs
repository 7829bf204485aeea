//! Data block types and specifications
//!
//! A data type is an 8-character id plus a 4-character origin, both ASCII and
//! padded with spaces. `********` / `***` are wildcards; a full-width `****`
//! origin is read as `***`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::InputReason;

/// Length of the data type id field
pub const DATA_TYPE_ID_LEN: usize = 8;

/// Length of the data type origin field
pub const DATA_TYPE_ORIGIN_LEN: usize = 4;

/// Bitmask or identifier describing where a data block came from
pub type Specification = u32;

/// Data block type attached to tagged trigger inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataType {
    id: [u8; DATA_TYPE_ID_LEN],
    origin: [u8; DATA_TYPE_ORIGIN_LEN],
}

const ANY_ID: [u8; DATA_TYPE_ID_LEN] = *b"********";
const ANY_ORIGIN: [u8; DATA_TYPE_ORIGIN_LEN] = *b"*** ";

impl DataType {
    /// Matches every data type
    pub const ANY: DataType = DataType {
        id: ANY_ID,
        origin: ANY_ORIGIN,
    };

    /// Build a data type from its id and origin
    pub fn new(id: &str, origin: &str) -> Result<Self, InputReason> {
        let mut origin = pad_field::<DATA_TYPE_ORIGIN_LEN>(origin)?;
        if &origin == b"****" {
            origin = ANY_ORIGIN;
        }
        Ok(Self {
            id: pad_field::<DATA_TYPE_ID_LEN>(id)?,
            origin,
        })
    }

    /// Id with padding removed
    pub fn id(&self) -> &str {
        trimmed(&self.id)
    }

    /// Origin with padding removed
    pub fn origin(&self) -> &str {
        trimmed(&self.origin)
    }

    /// Field-wise comparison honouring wildcards on either side
    pub fn matches(&self, other: &DataType) -> bool {
        let id_ok = self.id == ANY_ID || other.id == ANY_ID || self.id == other.id;
        let origin_ok =
            self.origin == ANY_ORIGIN || other.origin == ANY_ORIGIN || self.origin == other.origin;
        id_ok && origin_ok
    }
}

fn pad_field<const N: usize>(value: &str) -> Result<[u8; N], InputReason> {
    let value = value.trim();
    if value.is_empty() || value.len() > N || !value.is_ascii() || value.contains(':') {
        return Err(InputReason::R202_DATA_TYPE_INVALID);
    }
    let mut field = [b' '; N];
    field[..value.len()].copy_from_slice(value.as_bytes());
    Ok(field)
}

fn trimmed(field: &[u8]) -> &str {
    // Fields are only ever built from ASCII
    std::str::from_utf8(field).unwrap_or("").trim_end()
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.id(), self.origin())
    }
}

impl FromStr for DataType {
    type Err = InputReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, origin) = s
            .split_once(':')
            .ok_or(InputReason::R202_DATA_TYPE_INVALID)?;
        Self::new(id, origin)
    }
}

impl TryFrom<String> for DataType {
    type Error = InputReason;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        value.to_string()
    }
}

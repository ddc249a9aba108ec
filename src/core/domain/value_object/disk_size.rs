use crate::core::domain::error::ParseError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SIZE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",size=(\d+)([GM])").expect("size suffix pattern is valid"));

/// A disk size normalized to whole gigabytes.
///
/// Guest configs express sizes as `size=<integer><unit>`. Only `G` and `M`
/// are understood; megabytes are floor-divided by 1024.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiskSize(u64);

impl DiskSize {
    /// Whole gigabytes from a value and a unit already matched by `SIZE_SUFFIX`.
    fn from_unit(value: u64, unit: &str) -> Self {
        match unit {
            "M" => Self(value / 1024),
            _ => Self(value),
        }
    }

    /// Looks for a `,size=<integer><G|M>` suffix anywhere in a disk descriptor.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` if the line carries no recognized size suffix
    /// * `Ok(Some(size))` for a recognized suffix
    /// * `Err(ParseError)` if the digits do not fit in a `u64`
    pub fn from_descriptor(line: &str) -> Result<Option<Self>, ParseError> {
        let Some(caps) = SIZE_SUFFIX.captures(line) else {
            return Ok(None);
        };

        let digits = &caps[1];
        let value = digits.parse::<u64>().map_err(|_| ParseError::Field {
            field: "size".to_string(),
            value: digits.to_string(),
        })?;
        Ok(Some(Self::from_unit(value, &caps[2])))
    }

    /// Returns the size in gigabytes.
    pub fn gigabytes(&self) -> u64 {
        self.0
    }
}

use crate::core::domain::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The identifier of a guest, taken from its config file name.
///
/// `/etc/pve/qemu-server/100.conf` becomes `100`. Uniqueness within a guest
/// kind is only as strong as the filesystem's guarantee of distinct names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(String);

impl GuestId {
    /// Derives the identifier from a config file path by stripping `extension`.
    pub fn from_config_path(path: &Path, extension: &str) -> Result<Self, ParseError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ParseError::Format(format!("'{}' has no UTF-8 file name", path.display()))
            })?;
        let id = file_name.strip_suffix(extension).unwrap_or(file_name);
        validate_guest_id(id)?;
        Ok(Self(id.to_string()))
    }

    /// Creates an identifier without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Validates a guest identifier.
pub(crate) fn validate_guest_id(id: &str) -> Result<(), ParseError> {
    if id.is_empty() {
        return Err(ParseError::Field {
            field: "id".to_string(),
            value: id.to_string(),
        });
    }
    Ok(())
}

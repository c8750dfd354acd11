//! Review status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review status of a submitted document record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "document_status")]
pub enum DocumentStatus {
    /// Awaiting review. Every record starts here.
    #[default]
    Pending,
    /// Approved by a reviewer.
    Verified,
    /// Rejected by a reviewer.
    Rejected,
}

impl DocumentStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Verified, Self::Rejected];

    /// Return the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Verified => "Verified",
            Self::Rejected => "Rejected",
        }
    }

    /// Whether a reviewer has already decided on the record.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Check whether a record may move from this status to `next`.
    ///
    /// Re-applying the current status is always allowed. When reopening is
    /// disabled, decided records are terminal.
    pub fn can_transition_to(&self, next: Self, allow_reopen: bool) -> bool {
        *self == next || allow_reopen || !self.is_decided()
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = vaultdocs_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                vaultdocs_core::AppError::validation(format!(
                    "Invalid status value: '{s}'. Expected one of: Pending, Verified, Rejected"
                ))
            })
    }
}

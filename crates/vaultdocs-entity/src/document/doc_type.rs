//! Document type vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of tags a submitted file can be classified under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    /// National identity card.
    IdentityCard,
    /// Tax identification document.
    TaxId,
    /// Proof of bank account.
    BankProof,
    /// Academic transcript.
    Transcript,
    /// Passport.
    Passport,
    /// Driving license.
    DrivingLicense,
    /// Curriculum vitae.
    Resume,
    /// Anything else, and the tag used for an untagged single upload.
    Other,
}

impl DocumentType {
    /// Every tag in the vocabulary.
    pub const ALL: [Self; 8] = [
        Self::IdentityCard,
        Self::TaxId,
        Self::BankProof,
        Self::Transcript,
        Self::Passport,
        Self::DrivingLicense,
        Self::Resume,
        Self::Other,
    ];

    /// Return the kebab-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdentityCard => "identity-card",
            Self::TaxId => "tax-id",
            Self::BankProof => "bank-proof",
            Self::Transcript => "transcript",
            Self::Passport => "passport",
            Self::DrivingLicense => "driving-license",
            Self::Resume => "resume",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = vaultdocs_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                vaultdocs_core::AppError::validation(format!(
                    "Invalid document type: '{s}'. Expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}

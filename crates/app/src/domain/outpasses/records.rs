//! Out-pass Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    documents::StoredDocument, domain::students::records::StudentUuid, uuids::TypedUuid,
};

/// Out-pass UUID
pub type OutPassUuid = TypedUuid<OutPassRecord>;

/// Admin-controlled decision state of an out-pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl Display for ApprovalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown approval status: {0:?}")]
pub struct UnknownApprovalStatus(pub String);

impl FromStr for ApprovalStatus {
    type Err = UnknownApprovalStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            other => Err(UnknownApprovalStatus(other.to_string())),
        }
    }
}

/// Security-controlled gate check-out state of an out-pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutStatus {
    Pending,
    Approved,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown out-status: {0:?}")]
pub struct UnknownOutStatus(pub String);

impl OutStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
        }
    }

    /// Read a stored out-status.
    ///
    /// Records written before the out-status existed carry `NULL` or an empty
    /// string, both of which mean [`OutStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownOutStatus`] for any other unrecognised value.
    pub fn from_stored(value: Option<&str>) -> Result<Self, UnknownOutStatus> {
        match value.map(str::trim) {
            None | Some("" | "Pending") => Ok(Self::Pending),
            Some("Approved") => Ok(Self::Approved),
            Some(other) => Err(UnknownOutStatus(other.to_string())),
        }
    }
}

impl Display for OutStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutStatus {
    type Err = UnknownOutStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            other => Err(UnknownOutStatus(other.to_string())),
        }
    }
}

/// Who made a decision and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionStamp {
    pub by: String,
    pub at: Timestamp,
}

/// The approval status together with its decision metadata.
///
/// A decided record always carries exactly one stamp and an undecided one
/// carries none, so the approved and rejected pairs can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Pending,
    Approved(DecisionStamp),
    Rejected(DecisionStamp),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status} record is missing its decision metadata")]
pub struct MissingDecisionStamp {
    pub status: ApprovalStatus,
}

impl Decision {
    #[must_use]
    pub const fn status(&self) -> ApprovalStatus {
        match self {
            Self::Pending => ApprovalStatus::Pending,
            Self::Approved(_) => ApprovalStatus::Approved,
            Self::Rejected(_) => ApprovalStatus::Rejected,
        }
    }

    #[must_use]
    pub const fn stamp(&self) -> Option<&DecisionStamp> {
        match self {
            Self::Pending => None,
            Self::Approved(stamp) | Self::Rejected(stamp) => Some(stamp),
        }
    }

    #[must_use]
    pub const fn approved(&self) -> Option<&DecisionStamp> {
        match self {
            Self::Approved(stamp) => Some(stamp),
            Self::Pending | Self::Rejected(_) => None,
        }
    }

    #[must_use]
    pub const fn rejected(&self) -> Option<&DecisionStamp> {
        match self {
            Self::Rejected(stamp) => Some(stamp),
            Self::Pending | Self::Approved(_) => None,
        }
    }

    /// Resolve stored decision columns into a single decision.
    ///
    /// The generic pair wins when complete; otherwise the pair matching the
    /// status is used. Stamps stored against a pending record are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MissingDecisionStamp`] when a decided record has no usable pair.
    pub fn resolve(
        status: ApprovalStatus,
        generic: Option<DecisionStamp>,
        specific: Option<DecisionStamp>,
    ) -> Result<Self, MissingDecisionStamp> {
        let stamp = generic.or(specific);

        match (status, stamp) {
            (ApprovalStatus::Pending, _) => Ok(Self::Pending),
            (ApprovalStatus::Approved, Some(stamp)) => Ok(Self::Approved(stamp)),
            (ApprovalStatus::Rejected, Some(stamp)) => Ok(Self::Rejected(stamp)),
            (status, None) => Err(MissingDecisionStamp { status }),
        }
    }
}

/// Applicant details copied from the student profile when the out-pass was
/// created. Later profile edits never change them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub roll_number: String,
    pub department: String,
    pub year: String,
    pub section: String,
    pub contact_number: String,
}

/// Out-pass Record
#[derive(Debug, Clone, PartialEq)]
pub struct OutPassRecord {
    pub uuid: OutPassUuid,
    pub student_uuid: StudentUuid,
    pub subject: Subject,
    pub reason_type: String,
    pub reason: String,
    pub documents: Vec<StoredDocument>,
    pub decision: Decision,
    pub out_status: OutStatus,
    pub applied_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OutPassRecord {
    #[must_use]
    pub const fn approval_status(&self) -> ApprovalStatus {
        self.decision.status()
    }
}

//! Out-pass response models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use outpass_app::domain::outpasses::{
    Dashboard, DashboardCounters,
    records::{DecisionStamp, OutPassRecord},
};

/// Out-pass Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OutPassResponse {
    /// The unique identifier of the out-pass
    pub uuid: Uuid,

    /// The student who applied
    pub student_uuid: Uuid,

    /// Student details as they were when the out-pass was applied for
    pub name: String,
    pub roll_number: String,
    pub department: String,
    pub year: String,
    pub section: String,
    pub contact_number: String,

    pub reason_type: String,
    pub reason: String,

    /// Attached documents
    pub documents: Vec<DocumentResponse>,

    /// `Pending`, `Approved` or `Rejected`
    pub approval_status: String,

    /// Who made the current decision
    pub decision_by: Option<String>,

    /// When the current decision was made
    pub decision_at: Option<String>,

    pub approved_by: Option<String>,
    pub approved_at: Option<String>,
    pub rejected_by: Option<String>,
    pub rejected_at: Option<String>,

    /// `Pending` until security lets the student out, then `Approved`
    pub out_status: String,

    /// The date and time the out-pass was applied for
    pub applied_at: String,

    /// The date and time the out-pass was last updated
    pub updated_at: String,
}

impl From<OutPassRecord> for OutPassResponse {
    fn from(record: OutPassRecord) -> Self {
        let uuid = record.uuid.into_uuid();
        let stamp = record.decision.stamp();
        let approved = record.decision.approved();
        let rejected = record.decision.rejected();

        OutPassResponse {
            uuid,
            student_uuid: record.student_uuid.into_uuid(),
            approval_status: record.approval_status().to_string(),
            decision_by: stamp.map(stamp_by),
            decision_at: stamp.map(stamp_at),
            approved_by: approved.map(stamp_by),
            approved_at: approved.map(stamp_at),
            rejected_by: rejected.map(stamp_by),
            rejected_at: rejected.map(stamp_at),
            out_status: record.out_status.to_string(),
            documents: record
                .documents
                .into_iter()
                .enumerate()
                .map(|(index, document)| DocumentResponse {
                    url: format!("/outpasses/{uuid}/documents/{index}"),
                    index,
                    name: document.name,
                    media_type: document.media_type,
                    size_bytes: document.size_bytes,
                })
                .collect(),
            name: record.subject.name,
            roll_number: record.subject.roll_number,
            department: record.subject.department,
            year: record.subject.year,
            section: record.subject.section,
            contact_number: record.subject.contact_number,
            reason_type: record.reason_type,
            reason: record.reason,
            applied_at: record.applied_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

fn stamp_by(stamp: &DecisionStamp) -> String {
    stamp.by.clone()
}

fn stamp_at(stamp: &DecisionStamp) -> String {
    stamp.at.to_string()
}

/// Attached Document
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DocumentResponse {
    /// Position of the document on its out-pass
    pub index: usize,

    /// Original file name
    pub name: String,

    pub media_type: String,
    pub size_bytes: u64,

    /// Download location
    pub url: String,
}

/// Out-passes Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OutPassesResponse {
    /// The list of out-passes, newest first
    pub outpasses: Vec<OutPassResponse>,
}

impl From<Vec<OutPassRecord>> for OutPassesResponse {
    fn from(outpasses: Vec<OutPassRecord>) -> Self {
        OutPassesResponse {
            outpasses: outpasses.into_iter().map(Into::into).collect(),
        }
    }
}

/// Dashboard Counters
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CountersResponse {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
}

impl From<DashboardCounters> for CountersResponse {
    fn from(counters: DashboardCounters) -> Self {
        CountersResponse {
            total: counters.total,
            approved: counters.approved,
            pending: counters.pending,
            rejected: counters.rejected,
        }
    }
}

/// Dashboard Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DashboardResponse {
    /// Counts over exactly the listed out-passes
    pub counters: CountersResponse,

    pub outpasses: Vec<OutPassResponse>,
}

impl From<Dashboard> for DashboardResponse {
    fn from(dashboard: Dashboard) -> Self {
        DashboardResponse {
            counters: dashboard.counters.into(),
            outpasses: dashboard.outpasses.into_iter().map(Into::into).collect(),
        }
    }
}

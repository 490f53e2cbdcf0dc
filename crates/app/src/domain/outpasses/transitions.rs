//! Out-pass state transitions.
//!
//! These functions decide what a transition does without touching storage.
//! The service locks the record, asks here, and writes the answer.

use jiff::Timestamp;
use thiserror::Error;

use crate::domain::outpasses::{
    records::{ApprovalStatus, Decision, DecisionStamp, OutPassRecord, OutStatus},
    scope::{AdminScope, DayWindow, OutPassScope},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("out-pass is outside the admin's department, year or section")]
    OutOfScope,

    #[error("out-pass is not approved")]
    NotApproved,

    #[error("out-pass was not approved today")]
    NotApprovedToday,

    #[error("out-pass has already been checked out")]
    AlreadyCheckedOut,
}

/// The decision an admin's transition produces.
#[must_use]
pub fn decide(target: ApprovalStatus, actor: &str, at: Timestamp) -> Decision {
    let stamp = || DecisionStamp {
        by: actor.to_string(),
        at,
    };

    match target {
        ApprovalStatus::Pending => Decision::Pending,
        ApprovalStatus::Approved => Decision::Approved(stamp()),
        ApprovalStatus::Rejected => Decision::Rejected(stamp()),
    }
}

/// Check an admin may move `record` to `target`.
///
/// The record's own snapshot is compared with the admin's scope, whatever
/// listing the admin found it through. Once a student has left through the
/// gate the approval can no longer be withdrawn.
///
/// # Errors
///
/// Returns [`TransitionError::OutOfScope`] or [`TransitionError::AlreadyCheckedOut`].
pub fn authorize_decision(
    record: &OutPassRecord,
    scope: &AdminScope,
    target: ApprovalStatus,
) -> Result<(), TransitionError> {
    if !scope.permits(&record.subject) {
        return Err(TransitionError::OutOfScope);
    }

    if record.out_status == OutStatus::Approved && target != ApprovalStatus::Approved {
        return Err(TransitionError::AlreadyCheckedOut);
    }

    Ok(())
}

/// What an out-status request should do to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOut {
    Apply(OutStatus),
    Unchanged,
}

/// Plan an out-status change requested at the gate.
///
/// Repeating a check-out that already happened changes nothing.
///
/// # Errors
///
/// Returns [`TransitionError::NotApproved`] unless the record is approved,
/// [`TransitionError::NotApprovedToday`] when the approval falls outside
/// `today`, and [`TransitionError::AlreadyCheckedOut`] for a reversal.
pub fn check_out(
    record: &OutPassRecord,
    target: OutStatus,
    today: DayWindow,
) -> Result<CheckOut, TransitionError> {
    if record.approval_status() != ApprovalStatus::Approved {
        return Err(TransitionError::NotApproved);
    }

    if !OutPassScope::SecurityToday(today).permits(record) {
        return Err(TransitionError::NotApprovedToday);
    }

    match (record.out_status, target) {
        (OutStatus::Pending, OutStatus::Approved) => Ok(CheckOut::Apply(OutStatus::Approved)),
        (OutStatus::Pending, OutStatus::Pending) | (OutStatus::Approved, OutStatus::Approved) => {
            Ok(CheckOut::Unchanged)
        }
        (OutStatus::Approved, OutStatus::Pending) => Err(TransitionError::AlreadyCheckedOut),
    }
}

/// Column values written for a decision.
///
/// The generic pair and exactly the matching status pair are set together;
/// every other column is cleared in the same statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionColumns {
    pub approval_status: ApprovalStatus,
    pub approved_by: Option<String>,
    pub approved_at: Option<Timestamp>,
    pub rejected_by: Option<String>,
    pub rejected_at: Option<Timestamp>,
    pub decision_by: Option<String>,
    pub decision_at: Option<Timestamp>,
}

impl From<&Decision> for DecisionColumns {
    fn from(decision: &Decision) -> Self {
        let approved = decision.approved();
        let rejected = decision.rejected();
        let stamp = decision.stamp();

        Self {
            approval_status: decision.status(),
            approved_by: approved.map(|stamp| stamp.by.clone()),
            approved_at: approved.map(|stamp| stamp.at),
            rejected_by: rejected.map(|stamp| stamp.by.clone()),
            rejected_at: rejected.map(|stamp| stamp.at),
            decision_by: stamp.map(|stamp| stamp.by.clone()),
            decision_at: stamp.map(|stamp| stamp.at),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, tz::TimeZone};
    use testresult::TestResult;

    use crate::domain::{
        outpasses::records::{OutPassUuid, Subject},
        students::records::StudentUuid,
    };

    use super::*;

    const STATUSES: [ApprovalStatus; 3] = [
        ApprovalStatus::Pending,
        ApprovalStatus::Approved,
        ApprovalStatus::Rejected,
    ];

    fn now() -> TestResult<Timestamp> {
        Ok(Timestamp::from_second(1_800_000_000)?)
    }

    fn record(section: &str, decision: Decision, out_status: OutStatus) -> OutPassRecord {
        OutPassRecord {
            uuid: OutPassUuid::new(),
            student_uuid: StudentUuid::new(),
            subject: Subject {
                name: "Asha Rao".to_string(),
                roll_number: "21CS001".to_string(),
                department: "CSE".to_string(),
                year: "2".to_string(),
                section: section.to_string(),
                contact_number: String::new(),
            },
            reason_type: "Medical".to_string(),
            reason: "Dentist".to_string(),
            documents: Vec::new(),
            decision,
            out_status,
            applied_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn approved_at(at: Timestamp, out_status: OutStatus) -> OutPassRecord {
        record("A", decide(ApprovalStatus::Approved, "Dr. Meera Iyer", at), out_status)
    }

    fn today() -> TestResult<DayWindow> {
        Ok(DayWindow::containing(now()?, &TimeZone::UTC)?)
    }

    #[test]
    fn every_decision_writes_exactly_one_pair() -> TestResult {
        for target in STATUSES {
            let columns = DecisionColumns::from(&decide(target, "Dr. Meera Iyer", now()?));

            let approved = columns.approved_by.is_some() && columns.approved_at.is_some();
            let rejected = columns.rejected_by.is_some() && columns.rejected_at.is_some();

            assert_eq!(columns.approval_status, target);

            match target {
                ApprovalStatus::Pending => {
                    assert_eq!(columns.approved_by, None);
                    assert_eq!(columns.approved_at, None);
                    assert_eq!(columns.rejected_by, None);
                    assert_eq!(columns.rejected_at, None);
                    assert_eq!(columns.decision_by, None);
                    assert_eq!(columns.decision_at, None);
                }
                ApprovalStatus::Approved | ApprovalStatus::Rejected => {
                    assert!(approved != rejected, "exactly one pair for {target}");
                    assert_eq!(columns.decision_by.as_deref(), Some("Dr. Meera Iyer"));
                }
            }
        }

        Ok(())
    }

    #[test]
    fn rejecting_clears_approved_pair() -> TestResult {
        let columns = DecisionColumns::from(&decide(ApprovalStatus::Rejected, "Warden", now()?));

        assert_eq!(columns.approved_by, None);
        assert_eq!(columns.approved_at, None);
        assert_eq!(columns.rejected_by.as_deref(), Some("Warden"));
        assert_eq!(columns.rejected_at, Some(now()?));

        Ok(())
    }

    #[test]
    fn admin_outside_scope_is_refused() -> TestResult {
        let scope = AdminScope::new("CSE", "2", "A")?;

        for target in STATUSES {
            assert_eq!(
                authorize_decision(
                    &record("B", Decision::Pending, OutStatus::Pending),
                    &scope,
                    target
                ),
                Err(TransitionError::OutOfScope)
            );
        }

        assert_eq!(
            authorize_decision(
                &record("A", Decision::Pending, OutStatus::Pending),
                &scope,
                ApprovalStatus::Approved
            ),
            Ok(())
        );

        Ok(())
    }

    #[test]
    fn checked_out_approval_cannot_be_withdrawn() -> TestResult {
        let scope = AdminScope::new("CSE", "2", "A")?;
        let record = approved_at(now()?, OutStatus::Approved);

        assert_eq!(
            authorize_decision(&record, &scope, ApprovalStatus::Rejected),
            Err(TransitionError::AlreadyCheckedOut)
        );
        assert_eq!(
            authorize_decision(&record, &scope, ApprovalStatus::Pending),
            Err(TransitionError::AlreadyCheckedOut)
        );
        assert_eq!(
            authorize_decision(&record, &scope, ApprovalStatus::Approved),
            Ok(())
        );

        Ok(())
    }

    #[test]
    fn check_out_requires_approval() -> TestResult {
        let pending = record("A", Decision::Pending, OutStatus::Pending);
        let rejected = record(
            "A",
            decide(ApprovalStatus::Rejected, "Warden", now()?),
            OutStatus::Pending,
        );

        assert_eq!(
            check_out(&pending, OutStatus::Approved, today()?),
            Err(TransitionError::NotApproved)
        );
        assert_eq!(
            check_out(&rejected, OutStatus::Approved, today()?),
            Err(TransitionError::NotApproved)
        );

        Ok(())
    }

    #[test]
    fn check_out_requires_approval_today() -> TestResult {
        let yesterday = now()?.checked_sub(SignedDuration::from_hours(24))?;

        assert_eq!(
            check_out(
                &approved_at(yesterday, OutStatus::Pending),
                OutStatus::Approved,
                today()?
            ),
            Err(TransitionError::NotApprovedToday)
        );

        Ok(())
    }

    #[test]
    fn check_out_applies_once_then_is_unchanged() -> TestResult {
        assert_eq!(
            check_out(
                &approved_at(now()?, OutStatus::Pending),
                OutStatus::Approved,
                today()?
            ),
            Ok(CheckOut::Apply(OutStatus::Approved))
        );
        assert_eq!(
            check_out(
                &approved_at(now()?, OutStatus::Approved),
                OutStatus::Approved,
                today()?
            ),
            Ok(CheckOut::Unchanged)
        );

        Ok(())
    }

    #[test]
    fn check_out_cannot_be_reversed() -> TestResult {
        assert_eq!(
            check_out(
                &approved_at(now()?, OutStatus::Approved),
                OutStatus::Pending,
                today()?
            ),
            Err(TransitionError::AlreadyCheckedOut)
        );

        Ok(())
    }
}

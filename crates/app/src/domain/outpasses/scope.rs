//! Visibility scopes over out-passes.
//!
//! Every listing and every mutation goes through an [`OutPassScope`]. The
//! same scope is rendered once as a SQL filter for listings and checked
//! against a locked record before a write, so the two paths cannot drift.

use jiff::{Timestamp, tz::TimeZone};
use thiserror::Error;

use crate::{
    auth::{AdminClaims, Principal},
    domain::{
        outpasses::records::{Decision, OutPassRecord, Subject},
        students::records::StudentUuid,
    },
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// An admin claim needed for scoping is blank. Never treated as "match all".
    #[error("admin claims are missing {0}")]
    Incomplete(&'static str),

    #[error("could not compute today's window")]
    Calendar(String),
}

/// Department, year and section an admin is responsible for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminScope {
    department: String,
    year: String,
    section: String,
}

impl AdminScope {
    /// Build a scope from trimmed, non-empty parts.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Incomplete`] naming the first blank part.
    pub fn new(department: &str, year: &str, section: &str) -> Result<Self, ScopeError> {
        let required = |value: &str, name: &'static str| {
            let value = value.trim();

            if value.is_empty() {
                Err(ScopeError::Incomplete(name))
            } else {
                Ok(value.to_string())
            }
        };

        Ok(Self {
            department: required(department, "department")?,
            year: required(year, "year")?,
            section: required(section, "section")?,
        })
    }

    /// # Errors
    ///
    /// Returns [`ScopeError::Incomplete`] when any scoping claim is blank.
    pub fn from_claims(claims: &AdminClaims) -> Result<Self, ScopeError> {
        Self::new(&claims.department, &claims.year, &claims.section)
    }

    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    #[must_use]
    pub fn year(&self) -> &str {
        &self.year
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Exact, trimmed comparison against the record's own snapshot.
    #[must_use]
    pub fn permits(&self, subject: &Subject) -> bool {
        subject.department.trim() == self.department
            && subject.year.trim() == self.year
            && subject.section.trim() == self.section
    }
}

/// Half-open `[start, end)` covering one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    start: Timestamp,
    end: Timestamp,
}

impl DayWindow {
    /// The local day in `tz` containing `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Calendar`] when the day bounds fall outside the
    /// supported range.
    pub fn containing(now: Timestamp, tz: &TimeZone) -> Result<Self, ScopeError> {
        let calendar = |error: jiff::Error| ScopeError::Calendar(error.to_string());

        let today = now.to_zoned(tz.clone()).start_of_day().map_err(calendar)?;
        let tomorrow = today.tomorrow().map_err(calendar)?.start_of_day().map_err(calendar)?;

        Ok(Self {
            start: today.timestamp(),
            end: tomorrow.timestamp(),
        })
    }

    #[must_use]
    pub const fn start(&self) -> Timestamp {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Timestamp {
        self.end
    }

    #[must_use]
    pub fn contains(&self, at: Timestamp) -> bool {
        self.start <= at && at < self.end
    }
}

/// What a principal may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutPassScope {
    /// A student's own out-passes.
    Owner(StudentUuid),

    /// Out-passes whose snapshot matches an admin's department, year and section.
    Department(AdminScope),

    /// Out-passes approved inside the window, for the gate.
    SecurityToday(DayWindow),
}

impl OutPassScope {
    /// Scope for a principal, computing "today" from `now` in `tz`.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Incomplete`] for admins with blank scoping claims.
    pub fn for_principal(
        principal: &Principal,
        now: Timestamp,
        tz: &TimeZone,
    ) -> Result<Self, ScopeError> {
        match principal {
            Principal::Student { uuid, .. } => Ok(Self::Owner(*uuid)),
            Principal::Admin(claims) => Ok(Self::Department(AdminScope::from_claims(claims)?)),
            Principal::Security { .. } => Ok(Self::SecurityToday(DayWindow::containing(now, tz)?)),
        }
    }

    #[must_use]
    pub fn permits(&self, record: &OutPassRecord) -> bool {
        match self {
            Self::Owner(student) => record.student_uuid == *student,
            Self::Department(scope) => scope.permits(&record.subject),
            Self::SecurityToday(window) => match &record.decision {
                Decision::Approved(stamp) => window.contains(stamp.at),
                Decision::Pending | Decision::Rejected(_) => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, civil::date, tz::offset};
    use testresult::TestResult;

    use crate::domain::{
        admins::records::AdminUuid,
        outpasses::records::{DecisionStamp, OutPassUuid, OutStatus},
    };

    use super::*;

    fn claims(department: &str, year: &str, section: &str) -> AdminClaims {
        AdminClaims {
            uuid: AdminUuid::new(),
            name: "Dr. Meera Iyer".to_string(),
            department: department.to_string(),
            year: year.to_string(),
            section: section.to_string(),
        }
    }

    fn record(section: &str, decision: Decision) -> OutPassRecord {
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
            out_status: OutStatus::Pending,
            applied_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn blank_admin_claims_are_incomplete() {
        assert_eq!(
            AdminScope::from_claims(&claims("CSE", " ", "A")),
            Err(ScopeError::Incomplete("year"))
        );
        assert_eq!(
            AdminScope::from_claims(&claims("", "2", "")),
            Err(ScopeError::Incomplete("department"))
        );
    }

    #[test]
    fn admin_scope_trims_claims() -> TestResult {
        let scope = AdminScope::from_claims(&claims(" CSE ", "2", "A\t"))?;

        assert_eq!(
            (scope.department(), scope.year(), scope.section()),
            ("CSE", "2", "A")
        );

        Ok(())
    }

    #[test]
    fn department_scope_requires_all_three_fields() -> TestResult {
        let scope = OutPassScope::Department(AdminScope::new("CSE", "2", "A")?);

        assert!(scope.permits(&record("A", Decision::Pending)));
        assert!(!scope.permits(&record("B", Decision::Pending)));

        Ok(())
    }

    #[test]
    fn owner_scope_matches_owner_only() {
        let mine = record("A", Decision::Pending);
        let scope = OutPassScope::Owner(mine.student_uuid);

        assert!(scope.permits(&mine));
        assert!(!scope.permits(&record("A", Decision::Pending)));
    }

    #[test]
    fn day_window_is_local_calendar_day() -> TestResult {
        let tz = TimeZone::fixed(offset(5));
        let now = date(2026, 3, 14).at(23, 30, 0, 0).to_zoned(tz.clone())?.timestamp();

        let window = DayWindow::containing(now, &tz)?;

        assert_eq!(window.start(), date(2026, 3, 14).to_zoned(tz.clone())?.timestamp());
        assert_eq!(window.end(), date(2026, 3, 15).to_zoned(tz)?.timestamp());
        assert!(window.contains(now));
        assert!(!window.contains(window.end()));

        Ok(())
    }

    #[test]
    fn security_scope_excludes_yesterdays_approval() -> TestResult {
        let now = Timestamp::from_second(1_800_000_000)?;
        let window = DayWindow::containing(now, &TimeZone::UTC)?;
        let scope = OutPassScope::SecurityToday(window);

        let approved_at = |at: Timestamp| {
            record(
                "A",
                Decision::Approved(DecisionStamp {
                    by: "Dr. Meera Iyer".to_string(),
                    at,
                }),
            )
        };

        assert!(scope.permits(&approved_at(now)));
        assert!(!scope.permits(&approved_at(
            window.start().checked_sub(SignedDuration::from_secs(1))?
        )));
        assert!(!scope.permits(&record("A", Decision::Pending)));

        Ok(())
    }

    #[test]
    fn principal_scope_fails_closed_for_blank_admin() {
        let principal = Principal::Admin(claims("CSE", "2", ""));

        assert_eq!(
            OutPassScope::for_principal(&principal, Timestamp::UNIX_EPOCH, &TimeZone::UTC),
            Err(ScopeError::Incomplete("section"))
        );
    }
}

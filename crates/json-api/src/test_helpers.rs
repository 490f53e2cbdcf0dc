//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use outpass_app::{
    auth::{AdminClaims, MockAuthService, Principal},
    context::AppContext,
    documents::StoredDocument,
    domain::{
        admins::records::AdminUuid,
        guards::records::GuardUuid,
        outpasses::{
            MockOutPassesService,
            policy::AttachmentPolicy,
            records::{Decision, OutPassRecord, OutPassUuid, OutStatus, Subject},
        },
        students::records::StudentUuid,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_STUDENT_UUID: StudentUuid = StudentUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_GUARD_UUID: GuardUuid = GuardUuid::from_uuid(Uuid::max());

/// Puts a fixed principal into the depot, standing in for the auth middleware.
#[derive(Debug)]
pub(crate) struct InjectPrincipal(Principal);

#[handler]
impl InjectPrincipal {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_principal(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn student_principal() -> Principal {
    Principal::Student {
        uuid: TEST_STUDENT_UUID,
        name: "Asha Rao".to_string(),
    }
}

pub(crate) fn admin_principal(department: &str, year: &str, section: &str) -> Principal {
    Principal::Admin(AdminClaims {
        uuid: AdminUuid::from_uuid(Uuid::nil()),
        name: "Dr. Menon".to_string(),
        department: department.to_string(),
        year: year.to_string(),
        section: section.to_string(),
    })
}

pub(crate) fn guard_principal() -> Principal {
    Principal::Security {
        uuid: TEST_GUARD_UUID,
        name: "Gate 1".to_string(),
    }
}

pub(crate) fn make_outpass(uuid: OutPassUuid) -> OutPassRecord {
    OutPassRecord {
        uuid,
        student_uuid: TEST_STUDENT_UUID,
        subject: Subject {
            name: "Asha Rao".to_string(),
            roll_number: "21CS001".to_string(),
            department: "CSE".to_string(),
            year: "3".to_string(),
            section: "A".to_string(),
            contact_number: "9800000000".to_string(),
        },
        reason_type: "Medical".to_string(),
        reason: "Dentist appointment".to_string(),
        documents: vec![StoredDocument {
            name: "note.pdf".to_string(),
            path: "0190f5c2-7b3e-7cc0-a3a4-8d5c1f1e2b3c.pdf".to_string(),
            media_type: "application/pdf".to_string(),
            size_bytes: 4,
        }],
        decision: Decision::Pending,
        out_status: OutStatus::Pending,
        applied_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn state(
    auth: MockAuthService,
    outpasses: MockOutPassesService,
    attachments: AttachmentPolicy,
) -> Arc<State> {
    State::from_app_context(
        AppContext {
            auth: Arc::new(auth),
            outpasses: Arc::new(outpasses),
        },
        attachments,
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(auth, MockOutPassesService::new(), AttachmentPolicy::default())
}

/// A service whose requests arrive already authenticated as `principal`.
pub(crate) fn authenticated_service(principal: Principal, route: Router) -> Service {
    outpasses_service(principal, MockOutPassesService::new(), route)
}

pub(crate) fn outpasses_service(
    principal: Principal,
    outpasses: MockOutPassesService,
    route: Router,
) -> Service {
    outpasses_service_with_policy(principal, outpasses, AttachmentPolicy::default(), route)
}

pub(crate) fn outpasses_service_with_policy(
    principal: Principal,
    outpasses: MockOutPassesService,
    attachments: AttachmentPolicy,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(MockAuthService::new(), outpasses, attachments)))
            .hoop(InjectPrincipal(principal))
            .push(route),
    )
}

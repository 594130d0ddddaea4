//! Session-to-orchestrator glue
//!
//! The wizard session knows phases; the orchestrator knows stores. This
//! module runs one complete submission attempt: validate and lock the
//! session, derive the plan, execute it, then settle the session and fire
//! navigation if the parent is durable.

use crate::orchestrator::SubmissionOrchestrator;
use crate::outcome::PersistenceOutcome;
use crate::plan::PersistencePlan;
use crate::stores::{ActorContext, BlobStore, EntityStore, Navigator};
use onboard_schema::WizardKind;
use onboard_wizard::{WizardError, WizardSession};

fn entity_label(kind: WizardKind) -> &'static str {
    match kind {
        WizardKind::Property => "Property",
        WizardKind::Tenant => "Tenant",
    }
}

/// Run one submission attempt for the session
///
/// A durable parent counts as success even when child batches failed: the
/// session resolves as succeeded, navigation fires, and the caveats are in
/// the returned outcome. Only a lost parent (or a failed primary upload)
/// leaves the session in the failed phase, on the review step, with the
/// draft intact for a retry.
///
/// # Errors
/// Session-side rejections only (not on the review step, validation,
/// illegal phase). Store failures are never an `Err`; they are part of
/// the outcome.
pub async fn drive_submission<E, B>(
    session: &mut WizardSession,
    orchestrator: &SubmissionOrchestrator<E, B>,
    actor: &ActorContext,
    navigator: &dyn Navigator,
) -> Result<PersistenceOutcome, WizardError>
where
    E: EntityStore,
    B: BlobStore,
{
    let draft = session.begin_submit()?;
    let plan = PersistencePlan::build(session.registry(), &draft, actor);
    let outcome = orchestrator.submit(plan).await;

    if outcome.parent_persisted() {
        session.succeed_submit()?;
        navigator.navigate_to(orchestrator.config().destination(session.kind()));
    } else {
        session.fail_submit(outcome.summary(entity_label(session.kind())))?;
    }
    Ok(outcome)
}

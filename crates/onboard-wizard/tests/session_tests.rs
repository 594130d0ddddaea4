//! Session-level behavior of the onboarding wizards: validation scoping,
//! never-blocked retreat, and the estate block-seeding flow.

use onboard_schema::fields::property;
use onboard_schema::{FieldValue, WizardKind};
use onboard_wizard::{WizardError, WizardSession};
use proptest::prelude::*;

fn estate_basics(session: &mut WizardSession) {
    session
        .set_field(property::NAME, FieldValue::Text("Sunset Court".into()))
        .unwrap();
    session
        .set_field(property::STRUCTURE_TYPE, FieldValue::Choice("estate".into()))
        .unwrap();
}

fn estate_location(session: &mut WizardSession) {
    session
        .set_field(property::ADDRESS_LINE, FieldValue::Text("12 Palm Way".into()))
        .unwrap();
    session
        .set_field(property::CITY, FieldValue::Text("Lagos".into()))
        .unwrap();
    session
        .set_field(property::COUNTRY, FieldValue::Text("Nigeria".into()))
        .unwrap();
}

#[test]
fn validation_errors_scoped_to_current_step() {
    // The draft is missing required fields on several steps; advancing from
    // Basics must only report Basics fields.
    let mut session = WizardSession::create(WizardKind::Property).unwrap();

    let err = session.advance().unwrap_err();
    let step_fields = session.current_step().fields.clone();
    for field_error in err.field_errors() {
        assert!(
            step_fields.contains(&field_error.field),
            "error for {} does not belong to step '{}'",
            field_error.field,
            session.current_step().title
        );
    }
    assert_eq!(session.step_index(), 0);
}

#[test]
fn estate_block_flow_seeds_three_blocks() {
    let mut session = WizardSession::create(WizardKind::Property).unwrap();
    estate_basics(&mut session);
    session.advance().unwrap();

    estate_location(&mut session);
    session.advance().unwrap();
    assert_eq!(session.current_step().title, "Structure");

    session
        .set_field(property::HAS_BLOCKS, FieldValue::Flag(true))
        .unwrap();

    // Block count is required once the flag is set; the failure names that
    // field and nothing else.
    let err = session.advance().unwrap_err();
    let fields: Vec<_> = err.field_errors().iter().map(|e| e.field).collect();
    assert_eq!(fields, vec![property::BLOCK_COUNT]);
    assert_eq!(session.current_step().title, "Structure");

    session
        .set_field(property::BLOCK_COUNT, FieldValue::Number(3.0))
        .unwrap();
    session.advance().unwrap();
    assert_eq!(session.current_step().title, "Structural Details");

    let names: Vec<_> = session
        .draft()
        .items(property::BLOCKS)
        .iter()
        .map(|b| b.text("name").unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Block A", "Block B", "Block C"]);
}

#[test]
fn block_step_absent_without_blocks() {
    let mut session = WizardSession::create(WizardKind::Property).unwrap();
    estate_basics(&mut session);
    session.advance().unwrap();
    estate_location(&mut session);
    session.advance().unwrap();

    // No blocks: the Structural Details step is skipped entirely.
    session.advance().unwrap();
    assert_eq!(session.current_step().title, "Units");
}

#[test]
fn retreat_ignores_invalid_fields() {
    let mut session = WizardSession::create(WizardKind::Property).unwrap();
    estate_basics(&mut session);
    session.advance().unwrap();

    // Clobber an earlier step's required field, then a current one.
    session
        .set_field(property::NAME, FieldValue::Text(String::new()))
        .unwrap();
    session
        .set_field(property::CITY, FieldValue::Number(9.0))
        .unwrap();

    let step = session.retreat().unwrap();
    assert_eq!(step.title, "Basics");
}

proptest! {
    // Retreat must succeed from any step index > 0 no matter what garbage
    // the draft holds.
    #[test]
    fn prop_retreat_never_blocked(
        garbage in ".*",
        hops in 1usize..4,
    ) {
        let mut session = WizardSession::create(WizardKind::Property).unwrap();
        estate_basics(&mut session);
        session.advance().unwrap();
        estate_location(&mut session);
        for _ in 1..hops {
            if session.advance().is_err() {
                break;
            }
        }

        session.set_field(property::NAME, FieldValue::Text(garbage.clone())).unwrap();
        session.set_field(property::COUNTRY, FieldValue::Text(garbage)).unwrap();

        while session.step_index() > 0 {
            prop_assert!(session.retreat().is_ok());
        }
        prop_assert!(matches!(session.retreat(), Err(WizardError::AtFirstStep)));
    }
}

//! Step schema registry
//!
//! Defines, per wizard kind and mode, the ordered step list and the field
//! catalog backing it. Registries are pure data derived from the kind and
//! mode; only step *presence* conditions read the live draft.

use crate::condition::Condition;
use crate::error::{FieldError, SchemaError};
use crate::field::{FieldName, FieldSpec, Pattern};
use crate::fields::{property, tenant};
use crate::step::StepSpec;
use crate::validate::validate_subset;
use crate::value::{ChildDraft, EntityDraft, FieldValue};
use serde::{Deserialize, Serialize};

/// Which entity a wizard onboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardKind {
    /// Create or edit a property and its units, media, and billing setup
    Property,
    /// Create or edit a tenant and their guarantor, documents, and billing
    Tenant,
}

impl WizardKind {
    /// Backing table of the parent entity
    #[inline]
    #[must_use]
    pub fn parent_table(self) -> &'static str {
        match self {
            Self::Property => "properties",
            Self::Tenant => "tenants",
        }
    }
}

/// Whether the wizard creates a new entity or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardMode {
    /// New entity; draft starts from defaults
    Create,
    /// Existing entity; draft is pre-populated and carries its id
    Edit,
}

/// Ordered step list plus the field catalog for one wizard
#[derive(Debug, Clone)]
pub struct StepRegistry {
    kind: WizardKind,
    mode: WizardMode,
    catalog: Vec<FieldSpec>,
    steps: Vec<StepSpec>,
}

impl StepRegistry {
    /// Build the registry for a wizard kind and mode
    ///
    /// # Errors
    /// Returns a [`SchemaError`] for configuration faults (empty step list,
    /// steps referencing undeclared fields, duplicate declarations). These
    /// are programmer errors surfaced at startup, not runtime conditions.
    pub fn for_wizard(kind: WizardKind, mode: WizardMode) -> Result<Self, SchemaError> {
        let (catalog, steps) = match kind {
            WizardKind::Property => (property_catalog(), property_steps(mode)),
            WizardKind::Tenant => (tenant_catalog(), tenant_steps(mode)),
        };

        let registry = Self {
            kind,
            mode,
            catalog,
            steps,
        };
        registry.check_configuration()?;
        Ok(registry)
    }

    fn check_configuration(&self) -> Result<(), SchemaError> {
        if self.steps.is_empty() {
            return Err(SchemaError::NoSteps(self.kind));
        }

        for (i, spec) in self.catalog.iter().enumerate() {
            if self.catalog[..i].iter().any(|s| s.name == spec.name) {
                return Err(SchemaError::DuplicateField(spec.name));
            }
        }

        for step in &self.steps {
            for field in &step.fields {
                if self.field(*field).is_none() {
                    return Err(SchemaError::UnknownField {
                        step: step.title,
                        field: *field,
                    });
                }
            }
        }

        Ok(())
    }

    /// Wizard kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> WizardKind {
        self.kind
    }

    /// Wizard mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    /// Full field catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &[FieldSpec] {
        &self.catalog
    }

    /// Catalog entry for a field
    #[must_use]
    pub fn field(&self, name: FieldName) -> Option<&FieldSpec> {
        self.catalog.iter().find(|s| s.name == name)
    }

    /// All registered steps, ignoring presence conditions
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    /// Steps that are part of the flow for the given draft, in order
    #[must_use]
    pub fn visible_steps(&self, draft: &EntityDraft) -> Vec<&StepSpec> {
        self.steps.iter().filter(|s| s.is_visible(draft)).collect()
    }

    /// Union of every step's field subset, in step order (the complete
    /// schema validated on submission)
    #[must_use]
    pub fn all_fields(&self) -> Vec<FieldName> {
        let mut union = Vec::new();
        for step in &self.steps {
            for field in &step.fields {
                if !union.contains(field) {
                    union.push(*field);
                }
            }
        }
        union
    }

    /// Validate one step's field subset against the draft
    #[must_use]
    pub fn validate_step(&self, draft: &EntityDraft, step: &StepSpec) -> Vec<FieldError> {
        validate_subset(&self.catalog, draft, &step.fields)
    }

    /// Validate the complete schema against the draft
    #[must_use]
    pub fn validate_all(&self, draft: &EntityDraft) -> Vec<FieldError> {
        validate_subset(&self.catalog, draft, &self.all_fields())
    }
}

const STRUCTURE_TYPES: &[&str] = &["single_unit", "estate", "apartment_complex"];
const EMPLOYMENT_STATUSES: &[&str] =
    &["employed", "self_employed", "student", "unemployed", "retired"];

fn property_catalog() -> Vec<FieldSpec> {
    use property as f;

    vec![
        FieldSpec::text(f::NAME, "Property name").required(),
        FieldSpec::text(f::DESCRIPTION, "Description"),
        FieldSpec::choice(f::STRUCTURE_TYPE, "Structure type", STRUCTURE_TYPES).required(),
        FieldSpec::text(f::ADDRESS_LINE, "Street address").required(),
        FieldSpec::text(f::CITY, "City").required(),
        FieldSpec::text(f::STATE_REGION, "State or region"),
        FieldSpec::text(f::POSTAL_CODE, "Postal code"),
        FieldSpec::text(f::COUNTRY, "Country").required(),
        FieldSpec::flag(f::HAS_BLOCKS, "Divided into blocks"),
        FieldSpec::number(f::BLOCK_COUNT, "Number of blocks")
            .required_when(Condition::FlagSet(f::HAS_BLOCKS))
            .min(1.0)
            .max(64.0),
        FieldSpec::items(f::BLOCKS, "Blocks"),
        FieldSpec::items(f::UNITS, "Units"),
        FieldSpec::attachment(f::PRIMARY_IMAGE, "Primary image"),
        FieldSpec::items(f::MEDIA, "Photos"),
        FieldSpec::items(f::FLOOR_PLANS, "Floor plans"),
        FieldSpec::items(f::PAYMENT_METHODS, "Payment methods"),
        FieldSpec::items(f::CONTACTS, "Contacts"),
        FieldSpec::items(f::DOCUMENTS, "Documents"),
    ]
}

fn property_steps(mode: WizardMode) -> Vec<StepSpec> {
    use property as f;

    let multi_block = Condition::All(vec![
        Condition::Equals(f::STRUCTURE_TYPE, "estate"),
        Condition::FlagSet(f::HAS_BLOCKS),
    ]);

    vec![
        StepSpec::new(
            "Basics",
            "property-basics",
            vec![f::NAME, f::DESCRIPTION, f::STRUCTURE_TYPE],
        ),
        StepSpec::new(
            "Location",
            "property-location",
            vec![
                f::ADDRESS_LINE,
                f::CITY,
                f::STATE_REGION,
                f::POSTAL_CODE,
                f::COUNTRY,
            ],
        ),
        StepSpec::new(
            "Structure",
            "property-structure",
            vec![f::HAS_BLOCKS, f::BLOCK_COUNT],
        )
        .visible_when(Condition::Any(vec![
            Condition::Equals(f::STRUCTURE_TYPE, "estate"),
            Condition::Equals(f::STRUCTURE_TYPE, "apartment_complex"),
        ])),
        StepSpec::new("Structural Details", "property-blocks", vec![f::BLOCKS])
            .visible_when(multi_block)
            .seeded_by(seed_blocks),
        StepSpec::new("Units", "property-units", vec![f::UNITS]),
        StepSpec::new(
            "Media",
            "property-media",
            vec![f::PRIMARY_IMAGE, f::MEDIA, f::FLOOR_PLANS],
        ),
        StepSpec::new("Billing", "property-billing", vec![f::PAYMENT_METHODS]),
        StepSpec::new(
            "Contacts & Documents",
            "property-contacts",
            vec![f::CONTACTS, f::DOCUMENTS],
        ),
        StepSpec::new(review_title(mode), "review", vec![]),
    ]
}

fn tenant_catalog() -> Vec<FieldSpec> {
    use tenant as f;

    vec![
        FieldSpec::text(f::FIRST_NAME, "First name").required(),
        FieldSpec::text(f::LAST_NAME, "Last name").required(),
        FieldSpec::text(f::EMAIL, "Email").required().pattern(Pattern::Email),
        FieldSpec::text(f::PHONE, "Phone").pattern(Pattern::Phone),
        FieldSpec::text(f::DATE_OF_BIRTH, "Date of birth"),
        FieldSpec::choice(f::EMPLOYMENT_STATUS, "Employment status", EMPLOYMENT_STATUSES)
            .required(),
        FieldSpec::text(f::EMPLOYER_NAME, "Employer")
            .required_when(Condition::Equals(f::EMPLOYMENT_STATUS, "employed")),
        FieldSpec::number(f::MONTHLY_INCOME, "Monthly income").min(0.0),
        FieldSpec::text(f::GUARANTOR_FULL_NAME, "Guarantor full name"),
        FieldSpec::text(f::GUARANTOR_PHONE, "Guarantor phone")
            .pattern(Pattern::Phone)
            .required_when(Condition::Present(f::GUARANTOR_FULL_NAME)),
        FieldSpec::text(f::GUARANTOR_EMAIL, "Guarantor email").pattern(Pattern::Email),
        FieldSpec::attachment(f::PHOTO, "Photo"),
        FieldSpec::items(f::DOCUMENTS, "Documents"),
        FieldSpec::items(f::PAYMENT_METHODS, "Payment methods"),
    ]
}

fn tenant_steps(mode: WizardMode) -> Vec<StepSpec> {
    use tenant as f;

    vec![
        StepSpec::new(
            "Identity",
            "tenant-identity",
            vec![
                f::FIRST_NAME,
                f::LAST_NAME,
                f::EMAIL,
                f::PHONE,
                f::DATE_OF_BIRTH,
            ],
        ),
        StepSpec::new(
            "Employment",
            "tenant-employment",
            vec![f::EMPLOYMENT_STATUS, f::EMPLOYER_NAME, f::MONTHLY_INCOME],
        ),
        StepSpec::new(
            "Guarantor",
            "tenant-guarantor",
            vec![
                f::GUARANTOR_FULL_NAME,
                f::GUARANTOR_PHONE,
                f::GUARANTOR_EMAIL,
            ],
        ),
        StepSpec::new(
            "Documents & Billing",
            "tenant-documents",
            vec![f::PHOTO, f::DOCUMENTS, f::PAYMENT_METHODS],
        ),
        StepSpec::new(review_title(mode), "review", vec![]),
    ]
}

fn review_title(mode: WizardMode) -> &'static str {
    match mode {
        WizardMode::Create => "Review & Create",
        WizardMode::Edit => "Review & Save",
    }
}

/// Seed default block entries from the configured block count
///
/// Fills up to `block_count` entries named "Block A", "Block B", …; existing
/// entries are kept untouched so re-entering the step never discards input.
fn seed_blocks(draft: &mut EntityDraft) {
    let Some(count) = draft.number(property::BLOCK_COUNT) else {
        return;
    };
    if !(count.is_finite() && count >= 1.0) {
        return;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = count as usize;

    let blocks = draft.items_mut(property::BLOCKS);
    for i in blocks.len()..count {
        let block =
            ChildDraft::new().with_field("name", FieldValue::Text(default_block_name(i)));
        blocks.push(block);
    }
}

fn default_block_name(index: usize) -> String {
    if index < 26 {
        let letter = char::from(b'A' + u8::try_from(index).unwrap_or(0));
        format!("Block {letter}")
    } else {
        format!("Block {}", index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn registries_build_for_all_wizards() {
        for kind in [WizardKind::Property, WizardKind::Tenant] {
            for mode in [WizardMode::Create, WizardMode::Edit] {
                let registry = StepRegistry::for_wizard(kind, mode).unwrap();
                assert!(!registry.steps().is_empty());
                assert!(!registry.all_fields().is_empty());
            }
        }
    }

    #[test]
    fn review_title_tracks_mode() {
        let create = StepRegistry::for_wizard(WizardKind::Property, WizardMode::Create).unwrap();
        let edit = StepRegistry::for_wizard(WizardKind::Property, WizardMode::Edit).unwrap();
        assert_eq!(create.steps().last().unwrap().title, "Review & Create");
        assert_eq!(edit.steps().last().unwrap().title, "Review & Save");
    }

    #[test]
    fn structure_steps_hidden_for_single_unit() {
        let registry = StepRegistry::for_wizard(WizardKind::Property, WizardMode::Create).unwrap();

        let mut draft = EntityDraft::new();
        draft.set(
            property::STRUCTURE_TYPE,
            FieldValue::Choice("single_unit".into()),
        );
        let titles: Vec<_> = registry
            .visible_steps(&draft)
            .iter()
            .map(|s| s.title)
            .collect();
        assert!(!titles.contains(&"Structure"));
        assert!(!titles.contains(&"Structural Details"));

        draft.set(
            property::STRUCTURE_TYPE,
            FieldValue::Choice("estate".into()),
        );
        draft.set(property::HAS_BLOCKS, FieldValue::Flag(true));
        let titles: Vec<_> = registry
            .visible_steps(&draft)
            .iter()
            .map(|s| s.title)
            .collect();
        assert!(titles.contains(&"Structure"));
        assert!(titles.contains(&"Structural Details"));
    }

    #[test]
    fn all_fields_is_deduplicated_union() {
        let registry = StepRegistry::for_wizard(WizardKind::Tenant, WizardMode::Create).unwrap();
        let fields = registry.all_fields();
        let mut deduped = fields.clone();
        deduped.dedup();
        assert_eq!(fields, deduped);
        assert!(fields.contains(&tenant::GUARANTOR_FULL_NAME));
    }

    #[test]
    fn seed_blocks_fills_sequential_defaults() {
        let mut draft = EntityDraft::new();
        draft.set(property::BLOCK_COUNT, FieldValue::Number(3.0));

        seed_blocks(&mut draft);
        let names: Vec<_> = draft
            .items(property::BLOCKS)
            .iter()
            .map(|b| b.text("name").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Block A", "Block B", "Block C"]);
    }

    #[test]
    fn seed_blocks_keeps_existing_entries() {
        let mut draft = EntityDraft::new();
        draft.set(property::BLOCK_COUNT, FieldValue::Number(2.0));
        draft
            .items_mut(property::BLOCKS)
            .push(ChildDraft::new().with_field("name", FieldValue::Text("North Wing".into())));

        seed_blocks(&mut draft);
        let blocks = draft.items(property::BLOCKS);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text("name"), Some("North Wing"));
        assert_eq!(blocks[1].text("name"), Some("Block B"));
    }

    #[test]
    fn seed_blocks_without_count_is_noop() {
        let mut draft = EntityDraft::new();
        seed_blocks(&mut draft);
        assert!(draft.items(property::BLOCKS).is_empty());
    }

    #[test]
    fn block_names_past_the_alphabet() {
        assert_eq!(default_block_name(0), "Block A");
        assert_eq!(default_block_name(25), "Block Z");
        assert_eq!(default_block_name(26), "Block 27");
    }
}

//! Field name constants for the built-in wizards
//!
//! Child-collection rows are free-form; only top-level entity fields are
//! named here.

use crate::field::FieldName;

/// Durable identifier of the entity being edited; absent when creating
pub const ID: FieldName = FieldName::new("id");

/// Property wizard fields
pub mod property {
    use super::FieldName;

    pub const NAME: FieldName = FieldName::new("name");
    pub const DESCRIPTION: FieldName = FieldName::new("description");
    pub const STRUCTURE_TYPE: FieldName = FieldName::new("structure_type");
    pub const ADDRESS_LINE: FieldName = FieldName::new("address_line");
    pub const CITY: FieldName = FieldName::new("city");
    pub const STATE_REGION: FieldName = FieldName::new("state_region");
    pub const POSTAL_CODE: FieldName = FieldName::new("postal_code");
    pub const COUNTRY: FieldName = FieldName::new("country");
    pub const HAS_BLOCKS: FieldName = FieldName::new("has_blocks");
    pub const BLOCK_COUNT: FieldName = FieldName::new("block_count");
    pub const BLOCKS: FieldName = FieldName::new("blocks");
    pub const UNITS: FieldName = FieldName::new("units");
    pub const PRIMARY_IMAGE: FieldName = FieldName::new("primary_image");
    pub const MEDIA: FieldName = FieldName::new("media");
    pub const FLOOR_PLANS: FieldName = FieldName::new("floor_plans");
    pub const PAYMENT_METHODS: FieldName = FieldName::new("payment_methods");
    pub const CONTACTS: FieldName = FieldName::new("contacts");
    pub const DOCUMENTS: FieldName = FieldName::new("documents");
}

/// Tenant wizard fields
pub mod tenant {
    use super::FieldName;

    pub const FIRST_NAME: FieldName = FieldName::new("first_name");
    pub const LAST_NAME: FieldName = FieldName::new("last_name");
    pub const EMAIL: FieldName = FieldName::new("email");
    pub const PHONE: FieldName = FieldName::new("phone");
    pub const DATE_OF_BIRTH: FieldName = FieldName::new("date_of_birth");
    pub const EMPLOYMENT_STATUS: FieldName = FieldName::new("employment_status");
    pub const EMPLOYER_NAME: FieldName = FieldName::new("employer_name");
    pub const MONTHLY_INCOME: FieldName = FieldName::new("monthly_income");
    pub const GUARANTOR_FULL_NAME: FieldName = FieldName::new("guarantor_full_name");
    pub const GUARANTOR_PHONE: FieldName = FieldName::new("guarantor_phone");
    pub const GUARANTOR_EMAIL: FieldName = FieldName::new("guarantor_email");
    pub const PHOTO: FieldName = FieldName::new("photo");
    pub const DOCUMENTS: FieldName = FieldName::new("documents");
    pub const PAYMENT_METHODS: FieldName = FieldName::new("payment_methods");
}

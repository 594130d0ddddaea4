//! Submission configuration

use onboard_schema::WizardKind;
use serde::{Deserialize, Serialize};

/// Host-supplied settings for the submission path
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    /// Prefix joined onto every upload path
    pub upload_root: String,
    /// Navigation target after a durable property submission
    pub property_destination: String,
    /// Navigation target after a durable tenant submission
    pub tenant_destination: String,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            upload_root: "uploads".into(),
            property_destination: "/properties".into(),
            tenant_destination: "/tenants".into(),
        }
    }
}

impl SubmitConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the upload root
    #[must_use]
    pub fn with_upload_root(mut self, root: impl Into<String>) -> Self {
        self.upload_root = root.into();
        self
    }

    /// Override a post-submit navigation target
    #[must_use]
    pub fn with_destination(mut self, kind: WizardKind, path: impl Into<String>) -> Self {
        match kind {
            WizardKind::Property => self.property_destination = path.into(),
            WizardKind::Tenant => self.tenant_destination = path.into(),
        }
        self
    }

    /// Navigation target for a wizard kind
    #[must_use]
    pub fn destination(&self, kind: WizardKind) -> &str {
        match kind {
            WizardKind::Property => &self.property_destination,
            WizardKind::Tenant => &self.tenant_destination,
        }
    }

    /// Join a plan-relative upload path onto the configured root
    #[must_use]
    pub fn upload_path(&self, relative: &str) -> String {
        format!("{}/{relative}", self.upload_root.trim_end_matches('/'))
    }
}

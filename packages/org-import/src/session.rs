//! Caller-owned session state and submission payload assembly.
//!
//! A [`Session`] is an explicit, serializable value: the working list of
//! organizations plus the submission options. Nothing here is global, and
//! nothing is written anywhere unless the caller decides to.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::designation::DesignationSelection;
use crate::error::{ValidationError, ValidationResult};
use crate::types::OrganizationRecord;
use crate::validate::is_valid_email;

/// Options sent alongside the organization list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOptions {
    /// Where the results are delivered
    pub email: String,

    /// Include role-based contacts such as `info@`
    pub include_generic: bool,

    /// Ask the service to look up postal addresses
    pub find_address: bool,

    pub designations: DesignationSelection,
}

impl Default for SubmissionOptions {
    fn default() -> Self {
        Self {
            email: String::new(),
            include_generic: true,
            find_address: false,
            designations: DesignationSelection::All,
        }
    }
}

/// One organization as the scrape-and-send endpoint expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationEntry {
    pub organizationname: String,
    pub links: Vec<String>,
}

/// Request body for `POST /lead-generation/scrape-and-send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub email: String,
    pub data: Vec<OrganizationEntry>,
    #[serde(rename = "includeGeneric")]
    pub include_generic: bool,
    #[serde(rename = "findAddress", skip_serializing_if = "Option::is_none")]
    pub find_address: Option<bool>,
    pub designations: Vec<String>,
}

impl Submission {
    /// Drop the `findAddress` field, for deployments that do not accept it.
    pub fn without_find_address(mut self) -> Self {
        self.find_address = None;
        self
    }
}

/// Working list plus options for one session.
///
/// The list changes only through [`Session::add`], [`Session::update`],
/// [`Session::remove`], [`Session::import`] and [`Session::reset`]:
///
/// ```compile_fail
/// let mut session = org_import::Session::new();
/// session.organizations.clear();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    organizations: Vec<OrganizationRecord>,
    #[serde(default)]
    pub options: SubmissionOptions,
}

impl Session {
    /// Create an empty session with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the destination email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.options.email = email.into();
        self
    }

    /// Set the submission options.
    pub fn with_options(mut self, options: SubmissionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn len(&self) -> usize {
        self.organizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
    }

    pub fn organizations(&self) -> &[OrganizationRecord] {
        &self.organizations
    }

    /// Append a record to the working list.
    pub fn add(&mut self, record: OrganizationRecord) {
        debug!(name = %record.name, "Organization added");
        self.organizations.push(record);
    }

    /// Replace the record at `index` wholesale.
    pub fn update(&mut self, index: usize, record: OrganizationRecord) -> ValidationResult<()> {
        let len = self.organizations.len();
        let slot = self
            .organizations
            .get_mut(index)
            .ok_or(ValidationError::IndexOutOfRange { index, len })?;
        debug!(index, name = %record.name, "Organization updated");
        *slot = record;
        Ok(())
    }

    /// Remove and return the record at `index`.
    pub fn remove(&mut self, index: usize) -> ValidationResult<OrganizationRecord> {
        let len = self.organizations.len();
        if index >= len {
            return Err(ValidationError::IndexOutOfRange { index, len });
        }
        let removed = self.organizations.remove(index);
        debug!(index, name = %removed.name, "Organization removed");
        Ok(removed)
    }

    /// Append imported records. An empty import is reported, not applied.
    pub fn import(&mut self, records: Vec<OrganizationRecord>) -> ValidationResult<usize> {
        if records.is_empty() {
            return Err(ValidationError::NoValidRows);
        }
        let count = records.len();
        self.organizations.extend(records);
        info!(count, total = self.organizations.len(), "Organizations imported");
        Ok(count)
    }

    /// Validate the session and build the request body.
    ///
    /// Checks run in a fixed order: email, non-empty list, designations,
    /// eligible links. Nothing is sent from here, so an invalid session never
    /// reaches the network.
    pub fn prepare_submission(&self) -> ValidationResult<Submission> {
        let email = self.options.email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        if self.organizations.is_empty() {
            return Err(ValidationError::NoOrganizations);
        }

        if self.options.designations.is_empty() {
            return Err(ValidationError::NoDesignations);
        }

        let data: Vec<OrganizationEntry> = self
            .organizations
            .iter()
            .map(|org| OrganizationEntry {
                organizationname: org.name.trim().to_string(),
                links: org.eligible_links(),
            })
            .filter(|entry| !entry.organizationname.is_empty() && !entry.links.is_empty())
            .collect();

        if data.is_empty() {
            return Err(ValidationError::NoEligibleLinks);
        }

        let dropped = self.organizations.len() - data.len();
        if dropped > 0 {
            debug!(dropped, "Organizations without eligible links left out");
        }

        Ok(Submission {
            email: email.to_string(),
            data,
            include_generic: self.options.include_generic,
            find_address: Some(self.options.find_address),
            designations: self.options.designations.resolve(),
        })
    }

    /// Clear the list and restore default options after a successful send.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Core data types for organization lists.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validate::is_valid_link;

/// Header substrings that identify the organization name column.
pub const NAME_PATTERNS: &[&str] = &["organizationname", "name"];

/// Header substrings that identify the link column.
pub const LINK_PATTERNS: &[&str] = &["url", "link"];

/// An organization plus the URLs where it can be found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    /// Display name, also the grouping key on import
    pub name: String,

    /// URL candidates in first-seen order, without duplicates
    #[serde(default)]
    pub links: Vec<String>,
}

impl OrganizationRecord {
    /// Create a record from a name and any number of links.
    ///
    /// Duplicate links are dropped, keeping the first occurrence.
    pub fn new(name: impl Into<String>, links: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut record = Self {
            name: name.into(),
            links: Vec::new(),
        };
        for link in links {
            record.push_link(link);
        }
        record
    }

    /// Create a record holding exactly one link.
    pub fn single(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: vec![link.into()],
        }
    }

    /// Append a link unless it is already present. Returns whether it was added.
    pub fn push_link(&mut self, link: impl Into<String>) -> bool {
        let link = link.into();
        if self.links.contains(&link) {
            return false;
        }
        self.links.push(link);
        true
    }

    /// Trimmed links that pass [`is_valid_link`], in order.
    pub fn eligible_links(&self) -> Vec<String> {
        let mut eligible: Vec<String> = Vec::with_capacity(self.links.len());
        for link in self.links.iter().map(|l| l.trim()) {
            if is_valid_link(link) && !eligible.iter().any(|e| e == link) {
                eligible.push(link.to_string());
            }
        }
        eligible
    }

    /// Whether this record can be submitted as-is.
    pub fn is_eligible(&self) -> bool {
        !self.name.trim().is_empty() && !self.eligible_links().is_empty()
    }
}

/// How rows that share a name are folded into records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingPolicy {
    /// Every data row becomes its own single-link record.
    #[default]
    Separate,

    /// Rows with the same trimmed name become one record whose links are
    /// the ordered-unique union of every row's link.
    Merge,
}

impl GroupingPolicy {
    /// Pick the policy from a boolean `merge` flag.
    pub fn from_merge_flag(merge: bool) -> Self {
        if merge {
            Self::Merge
        } else {
            Self::Separate
        }
    }
}

/// The two columns the normalizer has to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Name,
    Link,
}

impl ColumnKind {
    /// Header substrings accepted for this column.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            ColumnKind::Name => NAME_PATTERNS,
            ColumnKind::Link => LINK_PATTERNS,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Name => f.write_str("name"),
            ColumnKind::Link => f.write_str("link"),
        }
    }
}

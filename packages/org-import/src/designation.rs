//! Designation selection: which job titles the scraper should look for.

use serde::{Deserialize, Serialize};

/// Sentinel sent when no designation filtering is wanted.
pub const ALL_DESIGNATIONS: &str = "all";

/// Designations offered for selection out of the box.
pub const DESIGNATION_OPTIONS: &[&str] = &[
    "Professor",
    "Associate Professor",
    "Assistant Professor",
    "Dean",
    "Head",
    "Principal",
    "HOD",
    "CEO",
    "Director",
    "Manager",
];

/// The user's designation choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DesignationSelection {
    /// No filtering.
    #[default]
    All,

    /// Explicit list: picked options plus a comma-separated custom entry.
    Selected {
        #[serde(default)]
        chosen: Vec<String>,
        #[serde(default)]
        custom: String,
    },
}

impl DesignationSelection {
    /// Build an explicit selection.
    pub fn selected(
        chosen: impl IntoIterator<Item = impl Into<String>>,
        custom: impl Into<String>,
    ) -> Self {
        Self::Selected {
            chosen: chosen.into_iter().map(Into::into).collect(),
            custom: custom.into(),
        }
    }

    /// Designations to send: `["all"]`, or the ordered-unique union of the
    /// chosen options followed by the custom entries.
    pub fn resolve(&self) -> Vec<String> {
        match self {
            Self::All => vec![ALL_DESIGNATIONS.to_string()],
            Self::Selected { chosen, custom } => {
                let mut resolved: Vec<String> = Vec::new();
                let candidates = chosen
                    .iter()
                    .map(|d| d.trim())
                    .chain(parse_custom(custom));
                for designation in candidates {
                    if !designation.is_empty() && !resolved.iter().any(|d| d == designation) {
                        resolved.push(designation.to_string());
                    }
                }
                resolved
            }
        }
    }

    /// An explicit selection with nothing in it cannot be submitted.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::All => false,
            Self::Selected { .. } => self.resolve().is_empty(),
        }
    }
}

/// Split a free-text entry on commas, trimming and dropping empties.
pub fn parse_custom(custom: &str) -> impl Iterator<Item = &str> {
    custom.split(',').map(str::trim).filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_resolves_to_sentinel() {
        assert_eq!(DesignationSelection::All.resolve(), vec!["all"]);
        assert!(!DesignationSelection::All.is_empty());
    }

    #[test]
    fn test_selected_merges_custom_in_order_without_duplicates() {
        let selection = DesignationSelection::selected(["Dean", "CEO"], " Registrar, CEO ,, Dean,Bursar ");
        assert_eq!(
            selection.resolve(),
            vec!["Dean", "CEO", "Registrar", "Bursar"]
        );
    }

    #[test]
    fn test_empty_selection() {
        let selection = DesignationSelection::selected(Vec::<String>::new(), " , ");
        assert!(selection.is_empty());
        assert!(selection.resolve().is_empty());
    }

    #[test]
    fn test_options_are_unique() {
        for (i, option) in DESIGNATION_OPTIONS.iter().enumerate() {
            assert!(!DESIGNATION_OPTIONS[i + 1..].contains(option));
        }
    }
}

//! Tabular import normalizer.
//!
//! Turns decoded rows (first row = headers) into organization records. The
//! normalizer is pure: no I/O, no shared state, the same input always yields
//! the same output.

use std::collections::HashMap;
use tracing::debug;

use crate::error::{NormalizeError, NormalizeResult};
use crate::types::{ColumnKind, GroupingPolicy, OrganizationRecord};

/// Resolved positions of the name and link columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub link: usize,
}

/// Locate the name and link columns in a header row.
///
/// Headers are compared trimmed and lowercased; the first header containing
/// any of the kind's patterns wins.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> NormalizeResult<ColumnMap> {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| h.as_ref().trim_start_matches('\u{feff}').trim().to_lowercase())
        .collect();

    let find = |kind: ColumnKind| {
        normalized
            .iter()
            .position(|h| kind.patterns().iter().any(|p| h.contains(p)))
            .ok_or(NormalizeError::MissingColumn {
                kind,
                patterns: kind.patterns(),
            })
    };

    Ok(ColumnMap {
        name: find(ColumnKind::Name)?,
        link: find(ColumnKind::Link)?,
    })
}

/// Normalize decoded rows into organization records.
///
/// Rows with an empty name or an empty link are skipped, never an error. An
/// empty result is returned as-is; reporting "no valid rows" is up to the
/// caller.
pub fn normalize(
    rows: &[Vec<String>],
    policy: GroupingPolicy,
) -> NormalizeResult<Vec<OrganizationRecord>> {
    let (headers, data) = rows.split_first().ok_or_else(|| NormalizeError::MalformedInput {
        reason: "input has no header row".into(),
    })?;
    let columns = resolve_columns(headers)?;

    let mut records: Vec<OrganizationRecord> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for (index, row) in data.iter().enumerate() {
        // Spreadsheet row numbers: header is row 1.
        let row_number = index + 2;

        let name = cell(row, columns.name).trim();
        if name.is_empty() {
            debug!(row = row_number, "Row skipped (missing organization name)");
            continue;
        }

        let link = strip_quotes(cell(row, columns.link).trim()).trim();
        if link.is_empty() {
            debug!(row = row_number, name, "Row skipped (missing URL)");
            continue;
        }

        match policy {
            GroupingPolicy::Separate => records.push(OrganizationRecord::single(name, link)),
            GroupingPolicy::Merge => match by_name.get(name) {
                Some(&at) => {
                    records[at].push_link(link);
                }
                None => {
                    by_name.insert(name.to_string(), records.len());
                    records.push(OrganizationRecord::single(name, link));
                }
            },
        }
    }

    debug!(
        data_rows = data.len(),
        records = records.len(),
        ?policy,
        "Normalized tabular import"
    );
    Ok(records)
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Remove one pair of matching surrounding quotes, if present.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LINK_PATTERNS, NAME_PATTERNS};

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_resolve_columns_is_case_insensitive_substring() {
        let columns = resolve_columns(&["  Website Link ", "Organization Name"]).unwrap();
        assert_eq!(columns, ColumnMap { name: 1, link: 0 });

        let columns = resolve_columns(&["\u{feff}OrganizationName", "URL"]).unwrap();
        assert_eq!(columns, ColumnMap { name: 0, link: 1 });
    }

    #[test]
    fn test_missing_name_column() {
        let err = resolve_columns(&["Company", "URL"]).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::MissingColumn {
                kind: ColumnKind::Name,
                patterns: NAME_PATTERNS,
            }
        );
    }

    #[test]
    fn test_missing_link_column_yields_no_records() {
        let input = rows(&[&["Name", "Website"], &["Acme", "https://acme.test"]]);
        let err = normalize(&input, GroupingPolicy::Separate).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::MissingColumn {
                kind: ColumnKind::Link,
                patterns: LINK_PATTERNS,
            }
        );
    }

    #[test]
    fn test_zero_rows_is_malformed() {
        let input: Vec<Vec<String>> = Vec::new();
        assert!(matches!(
            normalize(&input, GroupingPolicy::Separate),
            Err(NormalizeError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_header_only_returns_empty() {
        let input = rows(&[&["OrganizationName", "URL"]]);
        assert!(normalize(&input, GroupingPolicy::Merge).unwrap().is_empty());
    }

    #[test]
    fn test_skips_rows_missing_name_or_link() {
        let input = rows(&[
            &["OrganizationName", "URL"],
            &["Acme", "https://acme.test"],
            &["   ", "https://blank.test"],
            &["NoLink", "   "],
            &["Short"],
            &["Globex", "https://globex.test"],
        ]);
        let records = normalize(&input, GroupingPolicy::Separate).unwrap();
        assert_eq!(
            records,
            vec![
                OrganizationRecord::single("Acme", "https://acme.test"),
                OrganizationRecord::single("Globex", "https://globex.test"),
            ]
        );
    }

    #[test]
    fn test_trims_and_strips_surrounding_quotes() {
        let input = rows(&[
            &["name", "link"],
            &["  Acme  ", " \"https://acme.test\" "],
            &["Initech", "'https://initech.test'"],
            &["Quoted", "\"\""],
        ]);
        let records = normalize(&input, GroupingPolicy::Separate).unwrap();
        assert_eq!(
            records,
            vec![
                OrganizationRecord::single("Acme", "https://acme.test"),
                OrganizationRecord::single("Initech", "https://initech.test"),
            ]
        );
    }

    #[test]
    fn test_merge_keeps_first_seen_order_and_drops_duplicates() {
        let input = rows(&[
            &["OrganizationName", "URL"],
            &["Acme", "https://acme.test"],
            &["Globex", "https://globex.test"],
            &["Acme", "https://acme.test/other"],
            &["Acme", "https://acme.test"],
        ]);
        let records = normalize(&input, GroupingPolicy::Merge).unwrap();
        assert_eq!(
            records,
            vec![
                OrganizationRecord::new("Acme", ["https://acme.test", "https://acme.test/other"]),
                OrganizationRecord::single("Globex", "https://globex.test"),
            ]
        );
    }

    #[test]
    fn test_merge_groups_on_trimmed_name() {
        let input = rows(&[
            &["OrganizationName", "URL"],
            &["  Acme ", "https://a.test"],
            &["Acme", "https://a.test/2"],
        ]);
        let records = normalize(&input, GroupingPolicy::Merge).unwrap();
        assert_eq!(
            records,
            vec![OrganizationRecord::new("Acme", ["https://a.test", "https://a.test/2"])]
        );
    }

    #[test]
    fn test_separate_keeps_every_row() {
        let input = rows(&[
            &["OrganizationName", "URL"],
            &["Acme", "https://acme.test"],
            &["Acme", "https://acme.test"],
        ]);
        let records = normalize(&input, GroupingPolicy::Separate).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_record_count_bounds() {
        let input = rows(&[
            &["Organization Name", "URL 1"],
            &["A", "https://a.test"],
            &["B", ""],
            &["A", "https://a.test/2"],
            &["", "https://c.test"],
            &["D", "https://d.test"],
        ]);
        let data_rows = input.len() - 1;
        let complete_rows = 3;

        let separate = normalize(&input, GroupingPolicy::Separate).unwrap();
        assert_eq!(separate.len(), complete_rows);

        let merged = normalize(&input, GroupingPolicy::Merge).unwrap();
        assert!(merged.len() <= complete_rows);
        assert!(merged.len() <= data_rows);
        assert_eq!(merged.len(), 2);
    }
}

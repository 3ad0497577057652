//! Sample file and CSV export of a working list.

use csv::Writer;
use std::io::Write;

use crate::error::ImportResult;
use crate::types::OrganizationRecord;

/// Suggested file name for the sample.
pub const SAMPLE_FILE_NAME: &str = "organization_sample.csv";

/// Sample import file showing the expected columns.
pub const SAMPLE_CSV: &str = "OrganizationName,URL\n\
Example University,https://www.exampleuniversity.edu\n\
Global Tech Corp,https://www.globaltech.com";

/// Write records in the import format: one `OrganizationName,URL` row per link.
///
/// Records without links still get a row with an empty URL, so nothing the
/// user typed disappears from the export.
pub fn write_csv<W: Write>(records: &[OrganizationRecord], writer: W) -> ImportResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["OrganizationName", "URL"])?;

    for record in records {
        if record.links.is_empty() {
            wtr.write_record([record.name.as_str(), ""])?;
        }
        for link in &record.links {
            wtr.write_record([record.name.as_str(), link.as_str()])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv_one_row_per_link() {
        let records = vec![
            OrganizationRecord::new("Acme, Inc.", ["https://acme.test", "https://acme.test/b"]),
            OrganizationRecord::new("Empty", Vec::<String>::new()),
        ];
        let mut out = Vec::new();
        write_csv(&records, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "OrganizationName,URL\n\
             \"Acme, Inc.\",https://acme.test\n\
             \"Acme, Inc.\",https://acme.test/b\n\
             Empty,\n"
        );
    }
}

//! Organization list import and submission preparation.
//!
//! Turns spreadsheet files and manual entries into a list of organizations
//! (a name plus the URLs where it can be found), and validates that list into
//! the request body the lead-generation service expects.
//!
//! # Usage
//!
//! ```rust,ignore
//! use org_import::{import_file, GroupingPolicy, Session};
//!
//! let mut session = Session::new().with_email("me@example.com");
//! session.import(import_file("orgs.csv", GroupingPolicy::Merge)?)?;
//! let body = session.prepare_submission()?;
//! ```
//!
//! # Modules
//!
//! - [`normalize`] - Pure header resolution and row normalization
//! - [`decode`] - CSV / XLSX / XLS decoding into rows
//! - [`validate`] - Link, email and manual-entry rules
//! - [`designation`] - Designation selection and the `"all"` sentinel
//! - [`session`] - Caller-owned state and payload assembly
//! - [`export`] - Sample file and CSV export

pub mod decode;
pub mod designation;
pub mod error;
pub mod export;
pub mod normalize;
pub mod session;
pub mod types;
pub mod validate;

pub use decode::{decode, import_bytes, import_file, read_csv, read_spreadsheet, FileFormat};
pub use designation::{DesignationSelection, ALL_DESIGNATIONS, DESIGNATION_OPTIONS};
pub use error::{ImportError, NormalizeError, ValidationError};
pub use export::{write_csv, SAMPLE_CSV, SAMPLE_FILE_NAME};
pub use normalize::{normalize, resolve_columns, ColumnMap};
pub use session::{OrganizationEntry, Session, Submission, SubmissionOptions};
pub use types::{ColumnKind, GroupingPolicy, OrganizationRecord, LINK_PATTERNS, NAME_PATTERNS};
pub use validate::{is_valid_email, is_valid_link, validate_entry};

//! Data interchange
//!
//! Full-dataset export and import in two formats:
//! - JSON: the primary machine-readable exchange format
//! - YAML: human-readable backups

pub mod json;
pub mod yaml;

pub use json::{export_full_json, import_from_json, FullExport};
pub use yaml::{export_full_yaml, import_from_yaml};

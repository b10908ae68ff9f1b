//! YAML export
//!
//! Same interchange document as the JSON exporter, serialized to YAML
//! for human-readable backups.

use crate::error::{FintrackError, FintrackResult};
use crate::export::json::FullExport;
use crate::storage::Storage;
use std::io::Write;

/// Export the full dataset to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> FintrackResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# fintrack full data export")
        .map_err(|e| FintrackError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.export_date)
        .map_err(|e| FintrackError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FintrackError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FintrackError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export document
pub fn import_from_yaml(yaml_str: &str) -> FintrackResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| FintrackError::Import(e.to_string()))?;

    export.validate().map_err(FintrackError::Import)?;

    Ok(export)
}

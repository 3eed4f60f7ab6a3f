use std::path::{Path, PathBuf};

use chrono::Utc;
use tasknote_core::export::{render_export, suggested_export_file_name};
use tasknote_core::StoreState;

use crate::cli::ExportFormat;
use crate::error::CliError;

pub fn run_export(
    state: &StoreState,
    format: ExportFormat,
    output_path: Option<&Path>,
) -> Result<(), CliError> {
    let rendered = render_export(state, format.into())?;

    if let Some(path) = output_path {
        let path = resolve_export_path(path, format);
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

/// Directories get a generated file name inside them
pub fn resolve_export_path(path: &Path, format: ExportFormat) -> PathBuf {
    if path.is_dir() {
        path.join(suggested_export_file_name(
            format.into(),
            Utc::now().timestamp_millis(),
        ))
    } else {
        path.to_path_buf()
    }
}

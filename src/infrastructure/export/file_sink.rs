use std::path::PathBuf;

use chrono::Utc;

use crate::domain::ports::export::{ExportError, ExportSink};

/// Writes session exports as timestamped files in a target directory.
///
/// The directory is stored raw and tilde-expanded at write time; it is
/// created on first write if missing.
pub struct FileExportSink {
    output_dir: String,
}

impl FileExportSink {
    #[must_use]
    pub fn new(output_dir: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn write(&self, prefix: &str, extension: &str, content: &str) -> Result<PathBuf, ExportError> {
        if self.output_dir.trim().is_empty() {
            return Err(ExportError::NoDestination);
        }
        let dir = PathBuf::from(shellexpand::tilde(&self.output_dir).into_owned());
        std::fs::create_dir_all(&dir)
            .map_err(|e| ExportError::WriteFailed(format!("création du dossier : {e}")))?;

        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("{prefix}_{stamp}.{extension}"));
        std::fs::write(&path, content)
            .map_err(|e| ExportError::WriteFailed(format!("écriture de {} : {e}", path.display())))?;

        tracing::info!("Export écrit : {}", path.display());
        Ok(path)
    }
}

impl ExportSink for FileExportSink {
    fn write_timeseries(&self, content: &str) -> Result<PathBuf, ExportError> {
        self.write("telemetrie", "csv", content)
    }

    fn write_summary(&self, content: &str) -> Result<PathBuf, ExportError> {
        self.write("rapport", "txt", content)
    }
}

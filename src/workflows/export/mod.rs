mod domain;
mod normalizer;
mod parser;

pub use domain::{ChatExport, Message, NormalizedText, Reaction, RecentReactor, TextFragment};

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExportLoadError {
    #[error("failed to read chat export {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid chat export data: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct ChatExportLoader;

impl ChatExportLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ChatExport, ExportLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ExportLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "reading chat export");
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ChatExport, ExportLoadError> {
        let export = parser::parse_export(reader)?;
        info!(
            chat = %export.name,
            chat_id = export.id,
            messages = export.messages.len(),
            "chat export loaded"
        );
        Ok(export)
    }
}

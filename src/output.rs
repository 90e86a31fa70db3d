use std::fs;
use std::path::{Path, PathBuf};
use crate::errors::OutputError;
use crate::models::outlook::OutputDocument;

/// Saves the output document as json
///
/// The document is written to a temporary file next to the target which is then renamed,
/// so the target is either the previous document or the complete new one.
///
/// # Arguments
///
/// * 'path' - the file to write
/// * 'document' - the document to save
/// * 'pretty' - whether to indent the json
pub fn save_document(path: &str, document: &OutputDocument, pretty: bool) -> Result<(), OutputError> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };

    let target = Path::new(path);
    let tmp = tmp_path(target);

    fs::write(&tmp, json).map_err(|e| OutputError::Write(tmp.clone(), e))?;
    fs::rename(&tmp, target).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        OutputError::Write(target.to_path_buf(), e)
    })?;

    Ok(())
}

fn tmp_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

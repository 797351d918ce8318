use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::info;

use spendwise_domain::Snapshot;

use crate::errors::SpendwiseError;

/// Reads a `{"expenses": [...], "income": [...], "bills": [...]}` document.
pub fn load_snapshot_from_path(path: &Path) -> Result<Snapshot, SpendwiseError> {
    let data = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&data)?;
    info!(
        path = %path.display(),
        records = snapshot.record_count(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

/// Writes pretty JSON via a sibling temp file renamed into place.
pub fn save_snapshot_to_path(snapshot: &Snapshot, path: &Path) -> Result<(), SpendwiseError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

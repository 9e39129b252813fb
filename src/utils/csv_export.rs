use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::marker::Marker;

/// Writes the current marker set to a timestamped CSV file under `dir`.
/// Returns the path of the file written.
pub fn export_markers(dir: &str, markers: &[Marker]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = Path::new(dir).join(format!("markers_{}.csv", timestamp));

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["label", "lat", "lon", "category"])?;
    for marker in markers {
        let category = marker
            .category
            .map(|c| c.osm_tag().to_string())
            .unwrap_or_default();
        writer.write_record([
            marker.label.clone(),
            marker.position.lat.to_string(),
            marker.position.lon.to_string(),
            category,
        ])?;
    }
    writer.flush()?;
    Ok(path)
}

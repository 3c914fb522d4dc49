use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use marquee_models::ExportPayload;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// `exports/movies-20240131T120000Z.json` style path for a save made at `now`
pub fn export_path_at(exports_dir: &Path, now: DateTime<Utc>) -> PathBuf {
    exports_dir.join(format!("movies-{}.json", now.format("%Y%m%dT%H%M%SZ")))
}

pub fn default_export_path(exports_dir: &Path) -> PathBuf {
    export_path_at(exports_dir, Utc::now())
}

/// Write the payload as pretty JSON, creating parent directories as needed
pub fn write_export(path: &Path, payload: &ExportPayload) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create export directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(payload).map_err(|e| {
        warn!("Failed to serialize export: {}", e);
        anyhow!("Failed to serialize export: {}", e)
    })?;
    std::fs::write(path, json).with_context(|| format!("Failed to write export {}", path.display()))?;

    info!(path = %path.display(), records = payload.records.len(), "Export written");
    Ok(())
}

pub fn read_export(path: &Path) -> Result<ExportPayload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read export {}", path.display()))?;
    let payload: ExportPayload = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid export file", path.display()))?;

    if payload.order.len() != payload.records.len() {
        warn!(
            "Export {} lists {} ids in order but holds {} records",
            path.display(),
            payload.order.len(),
            payload.records.len()
        );
    }
    debug!(path = %path.display(), records = payload.records.len(), "Export loaded");
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use marquee_models::MovieRecord;
    use tempfile::TempDir;

    fn record(id: u64, title: &str) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            overview: String::new(),
            release_date: "1995-12-15".to_string(),
            rating: Some(8.2),
            duration_minutes: 170,
            genres: vec!["Crime".to_string()],
            actors: vec![],
            director: Some("Michael Mann".to_string()),
            poster_url: None,
            trailer_url: None,
        }
    }

    #[test]
    fn test_export_path_uses_utc_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 12, 5, 9).unwrap();
        let path = export_path_at(Path::new("/data/exports"), now);
        assert_eq!(path, PathBuf::from("/data/exports/movies-20240131T120509Z.json"));
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("list.json");
        let payload = ExportPayload::new(vec![record(949, "Heat"), record(348, "Alien")], "en-US");

        write_export(&path, &payload).unwrap();
        let loaded = read_export(&path).unwrap();

        assert_eq!(loaded, payload);
        assert_eq!(loaded.order, vec![949, 348]);
    }

    #[test]
    fn test_read_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"records\": 3}").unwrap();

        assert!(read_export(&path).is_err());
        assert!(read_export(&dir.path().join("missing.json")).is_err());
    }
}

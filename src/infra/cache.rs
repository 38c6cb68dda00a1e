//! On-disk snapshot of the driver's last load fetch.
//!
//! Lets the dashboard paint something meaningful while the first network
//! round trip is in flight. One fixed file, whole-snapshot overwrite; a
//! corrupt or unreadable file just means no snapshot.

use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::Load;

const SNAPSHOT_FILENAME: &str = "driver_loads.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverSnapshot {
    /// Unix timestamp (seconds) when this snapshot was written.
    pub cached_at: u64,
    pub loads: Vec<Load>,
}

impl DriverSnapshot {
    pub fn new(loads: Vec<Load>) -> Self {
        let cached_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self { cached_at, loads }
    }

    pub fn age(&self) -> Duration {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Duration::from_secs(now.saturating_sub(self.cached_at))
    }

    /// Human-readable age string for the "cached Xm ago" banner.
    pub fn age_string(&self) -> String {
        let secs = self.age().as_secs();
        if secs < 60 {
            format!("{secs}s")
        } else if secs < 3600 {
            format!("{}m", secs / 60)
        } else if secs < 86400 {
            format!("{}h", secs / 3600)
        } else {
            format!("{}d", secs / 86400)
        }
    }
}

fn snapshot_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("com", "LoadLink", "LoadLink")?;
    let base = dirs.data_dir();
    if fs::create_dir_all(base).is_err() {
        return None;
    }
    Some(base.join(SNAPSHOT_FILENAME))
}

pub fn load_driver_snapshot() -> Option<DriverSnapshot> {
    load_snapshot_from(&snapshot_path()?)
}

pub fn save_driver_snapshot(snapshot: &DriverSnapshot) -> Result<(), std::io::Error> {
    match snapshot_path() {
        Some(path) => save_snapshot_to(&path, snapshot),
        None => {
            println!("[cache] No data directory available, skipping snapshot save");
            Ok(())
        }
    }
}

fn load_snapshot_from(path: &Path) -> Option<DriverSnapshot> {
    if !path.exists() {
        println!("[cache] No driver snapshot at {}", path.display());
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<DriverSnapshot>(&content) {
            Ok(snapshot) => {
                println!(
                    "[cache] Loaded {} loads (age: {})",
                    snapshot.loads.len(),
                    snapshot.age_string()
                );
                Some(snapshot)
            }
            Err(e) => {
                println!("[cache] Failed to parse driver snapshot: {e}");
                None
            }
        },
        Err(e) => {
            println!("[cache] Failed to read driver snapshot: {e}");
            None
        }
    }
}

fn save_snapshot_to(path: &Path, snapshot: &DriverSnapshot) -> Result<(), std::io::Error> {
    let content = serde_json::to_string(snapshot)?;
    fs::write(path, content)?;
    println!(
        "[cache] Saved {} loads to {}",
        snapshot.loads.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LoadStatus, TruckType};
    use time::OffsetDateTime;

    fn sample_load(id: &str) -> Load {
        Load {
            id: id.to_string(),
            company_id: "co-1".to_string(),
            driver_id: Some("drv-1".to_string()),
            pickup_city: "Indore".to_string(),
            pickup_state: "Madhya Pradesh".to_string(),
            drop_city: "Bhopal".to_string(),
            drop_state: "Madhya Pradesh".to_string(),
            material: "Soybean".to_string(),
            weight: 16.0,
            truck_type: TruckType::OpenBody,
            price: 38000,
            pickup_date: None,
            status: LoadStatus::Accepted,
            created_at: OffsetDateTime::UNIX_EPOCH,
            company_name: None,
            distance_km: None,
        }
    }

    #[test]
    fn snapshot_round_trips_through_disk() {
        let dir = std::env::temp_dir().join("loadlink-cache-roundtrip");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(SNAPSHOT_FILENAME);

        let snapshot = DriverSnapshot::new(vec![sample_load("l1"), sample_load("l2")]);
        save_snapshot_to(&path, &snapshot).unwrap();

        let restored = load_snapshot_from(&path).expect("snapshot should load");
        assert_eq!(restored.loads, snapshot.loads);
        assert_eq!(restored.cached_at, snapshot.cached_at);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn newer_save_overwrites_the_previous_snapshot_wholesale() {
        let dir = std::env::temp_dir().join("loadlink-cache-overwrite");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(SNAPSHOT_FILENAME);

        save_snapshot_to(&path, &DriverSnapshot::new(vec![sample_load("old")])).unwrap();
        save_snapshot_to(&path, &DriverSnapshot::new(vec![sample_load("new")])).unwrap();

        let restored = load_snapshot_from(&path).unwrap();
        assert_eq!(restored.loads.len(), 1);
        assert_eq!(restored.loads[0].id, "new");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn corrupt_snapshot_reads_as_none() {
        let dir = std::env::temp_dir().join("loadlink-cache-corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(SNAPSHOT_FILENAME);

        fs::write(&path, "{ not json").unwrap();
        assert!(load_snapshot_from(&path).is_none());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn age_string_buckets() {
        let mut snapshot = DriverSnapshot::new(Vec::new());
        snapshot.cached_at = snapshot.cached_at.saturating_sub(90);
        assert_eq!(snapshot.age_string(), "1m");
    }
}

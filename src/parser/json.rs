//! File-based input loading, grounded on the teacher's
//! `parser/json.rs::load_input_from_dir` per-entity-file layout.

use crate::error::{Result, SchedulerError};
use crate::types::{Course, Group, Instructor, Room, ScheduleConfig, Section};
use std::fs;
use std::path::Path;

/// The five entity collections a data directory must supply, before they
/// are handed to [`crate::catalog::Catalog::build`].
#[derive(Debug, Default)]
pub struct RawCatalogInput {
    pub rooms: Vec<Room>,
    pub instructors: Vec<Instructor>,
    pub groups: Vec<Group>,
    pub sections: Vec<Section>,
    pub courses: Vec<Course>,
}

/// Load all five entity files plus the optional config from one directory.
pub fn load_input_from_dir(dir: &Path) -> Result<RawCatalogInput> {
    Ok(RawCatalogInput {
        rooms: load_rooms(&dir.join("rooms.json"))?,
        instructors: load_instructors(&dir.join("instructors.json"))?,
        groups: load_groups(&dir.join("groups.json"))?,
        sections: load_sections(&dir.join("sections.json"))?,
        courses: load_courses(&dir.join("courses.json"))?,
    })
}

pub fn load_rooms(path: &Path) -> Result<Vec<Room>> {
    load_json_file(path)
}

pub fn load_instructors(path: &Path) -> Result<Vec<Instructor>> {
    load_json_file(path)
}

pub fn load_groups(path: &Path) -> Result<Vec<Group>> {
    load_json_file(path)
}

pub fn load_sections(path: &Path) -> Result<Vec<Section>> {
    load_json_file(path)
}

pub fn load_courses(path: &Path) -> Result<Vec<Course>> {
    load_json_file(path)
}

/// Load config from TOML, falling back to defaults; unrecognized keys are
/// ignored rather than rejected.
pub fn load_config_or_default(path: &Path) -> ScheduleConfig {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => ScheduleConfig::default(),
        }
    } else {
        ScheduleConfig::default()
    }
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SchedulerError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_a_file_read_error() {
        let result = load_rooms(Path::new("/nonexistent/rooms.json"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempdir();
        let path = dir.path().join("rooms.json");
        fs::write(&path, "{ not valid json").unwrap();
        let result = load_rooms(&path);
        assert!(result.is_err());
    }

    #[test]
    fn loads_well_formed_rooms() {
        let dir = tempdir();
        let path = dir.path().join("rooms.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[{{"id":"r1","type":"classroom","capacity":40,"building":"Main"}}]"#
        )
        .unwrap();
        let rooms = load_rooms(&path).unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].capacity, 40);
    }

    /// Minimal scratch-directory helper; avoids pulling in a `tempfile`
    /// dependency the teacher's crate doesn't otherwise use.
    fn tempdir() -> TempDir {
        let path = std::env::temp_dir().join(format!(
            "timetable-scheduler-test-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        fs::create_dir_all(&path).unwrap();
        TempDir(path)
    }

    struct TempDir(std::path::PathBuf);
    impl TempDir {
        fn path(&self) -> &Path {
            &self.0
        }
    }
    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }
}

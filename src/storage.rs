use crate::model::Profile;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn open() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "bday").context("locating data directory")?;
        Ok(ProfileStore {
            path: dirs.data_dir().join("profile.yml"),
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        ProfileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // absent or unparsable file reads as no profile
    pub fn load(&self) -> Option<Profile> {
        let data = fs::read_to_string(&self.path).ok()?;
        serde_yaml::from_str(&data).ok()
    }

    pub fn save(&self, profile: &Profile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
        }
        let serialized = serde_yaml::to_string(profile).context("serializing profile")?;
        fs::write(&self.path, serialized).with_context(|| format!("writing {:?}", self.path))?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("removing {:?}", self.path))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Profile {
        Profile {
            name: Some("Ada".into()),
            birth_date: NaiveDate::from_ymd_opt(2000, 6, 15).unwrap(),
        }
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::at(dir.path().join("profile.yml"));
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));
    }

    #[test]
    fn round_trip_without_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::at(dir.path().join("profile.yml"));
        let profile = Profile {
            name: None,
            ..sample()
        };
        store.save(&profile).unwrap();
        assert_eq!(store.load(), Some(profile));
    }

    #[test]
    fn absent_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::at(dir.path().join("profile.yml"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn corrupt_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.yml");
        fs::write(&path, "{{{ not yaml").unwrap();
        assert_eq!(ProfileStore::at(&path).load(), None);
    }

    #[test]
    fn save_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::at(dir.path().join("profile.yml"));
        store.save(&sample()).unwrap();
        let newer = Profile {
            name: Some("Grace".into()),
            birth_date: NaiveDate::from_ymd_opt(1906, 12, 9).unwrap(),
        };
        store.save(&newer).unwrap();
        assert_eq!(store.load(), Some(newer));
    }

    #[test]
    fn clear_removes_record_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::at(dir.path().join("profile.yml"));
        store.save(&sample()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
        store.clear().unwrap();
    }

    #[test]
    fn save_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::at(dir.path().join("nested/data/profile.yml"));
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));
    }
}

//! Zoo state persistence.
//!
//! The on-disk format is a versioned JSON document that mirrors, but does not
//! reuse, the in-memory record types.

use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{
    models::{Animal, Species, Staff},
    zoo::Zoo,
};

/// Directory under the user's data directory holding application state.
pub const DEFAULT_DATA_DIR: &str = "zoo-keeper";
/// File name of the state file inside [`DEFAULT_DATA_DIR`].
pub const DEFAULT_STATE_FILE: &str = "zoo_data.json";
/// Schema version written by this build.
pub const SAVE_VERSION: u32 = 1;

/// Serialized representation of the state file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePayload {
    version: u32,
    saved_at: DateTime<Utc>,
    zoo: ZooRecord,
}

impl SavePayload {
    fn new(zoo: &Zoo) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            zoo: ZooRecord::from(zoo),
        }
    }

    /// Timestamp of the save.
    pub fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }

    /// Consume the payload and rebuild the zoo.
    pub fn into_zoo(self) -> Zoo {
        self.zoo.into()
    }
}

/// Persisted zoo contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZooRecord {
    name: String,
    #[serde(default)]
    animals: Vec<AnimalRecord>,
    #[serde(default)]
    staff: Vec<StaffRecord>,
}

/// Persisted animal, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AnimalRecord {
    /// A bird and its flight capability.
    Bird {
        /// Animal name.
        name: String,
        /// Animal age in years.
        age: u32,
        /// Whether the bird can fly.
        can_fly: bool,
    },
    /// A mammal.
    Mammal {
        /// Animal name.
        name: String,
        /// Animal age in years.
        age: u32,
    },
    /// A reptile.
    Reptile {
        /// Animal name.
        name: String,
        /// Animal age in years.
        age: u32,
    },
}

/// Persisted staff member, tagged by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum StaffRecord {
    /// A zookeeper.
    ZooKeeper {
        /// Staff member name.
        name: String,
    },
    /// A veterinarian.
    Veterinarian {
        /// Staff member name.
        name: String,
    },
}

impl From<&Animal> for AnimalRecord {
    fn from(animal: &Animal) -> Self {
        let name = animal.name().to_string();
        let age = animal.age();
        match animal.species() {
            Species::Bird { can_fly } => AnimalRecord::Bird { name, age, can_fly },
            Species::Mammal => AnimalRecord::Mammal { name, age },
            Species::Reptile => AnimalRecord::Reptile { name, age },
        }
    }
}

impl From<AnimalRecord> for Animal {
    fn from(record: AnimalRecord) -> Self {
        match record {
            AnimalRecord::Bird { name, age, can_fly } => Animal::bird(name, age, can_fly),
            AnimalRecord::Mammal { name, age } => Animal::mammal(name, age),
            AnimalRecord::Reptile { name, age } => Animal::reptile(name, age),
        }
    }
}

impl From<&Staff> for StaffRecord {
    fn from(member: &Staff) -> Self {
        let name = member.name().to_string();
        match member {
            Staff::ZooKeeper(_) => StaffRecord::ZooKeeper { name },
            Staff::Veterinarian(_) => StaffRecord::Veterinarian { name },
        }
    }
}

impl From<StaffRecord> for Staff {
    fn from(record: StaffRecord) -> Self {
        match record {
            StaffRecord::ZooKeeper { name } => Staff::zoo_keeper(name),
            StaffRecord::Veterinarian { name } => Staff::veterinarian(name),
        }
    }
}

impl From<&Zoo> for ZooRecord {
    fn from(zoo: &Zoo) -> Self {
        Self {
            name: zoo.name().to_string(),
            animals: zoo.animals().iter().map(AnimalRecord::from).collect(),
            staff: zoo.staff().iter().map(StaffRecord::from).collect(),
        }
    }
}

impl From<ZooRecord> for Zoo {
    fn from(record: ZooRecord) -> Self {
        Zoo::from_parts(
            record.name,
            record.animals.into_iter().map(Animal::from).collect(),
            record.staff.into_iter().map(Staff::from).collect(),
        )
    }
}

/// Summary of a completed save.
#[derive(Debug, Clone)]
pub struct SaveSummary {
    /// File the zoo was written to.
    pub path: PathBuf,
    /// Timestamp recorded in the file.
    pub saved_at: DateTime<Utc>,
    /// Number of animals written.
    pub animals: usize,
    /// Number of staff members written.
    pub staff: usize,
}

impl fmt::Display for SaveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zoo saved to {}.", self.path.display())
    }
}

/// Result of reading the state file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A zoo was restored from disk.
    Loaded(Zoo),
    /// The state file is missing or empty.
    NoPriorState,
}

/// Reads and writes the single zoo state file.
#[derive(Debug, Clone)]
pub struct ZooStore {
    path: PathBuf,
}

impl ZooStore {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the user's data directory.
    pub fn default_path() -> PathBuf {
        default_data_root().join(DEFAULT_STATE_FILE)
    }

    /// File this store reads from and writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the state file with the zoo's current contents.
    pub fn save(&self, zoo: &Zoo) -> Result<SaveSummary> {
        let payload = SavePayload::new(zoo);
        self.write_payload(&payload)?;
        info!(
            path = %self.path.display(),
            animals = zoo.animals().len(),
            staff = zoo.staff().len(),
            "zoo saved"
        );
        Ok(SaveSummary {
            path: self.path.clone(),
            saved_at: payload.saved_at,
            animals: zoo.animals().len(),
            staff: zoo.staff().len(),
        })
    }

    /// Restore the zoo, treating a missing or zero-length file as no prior state.
    pub fn load(&self) -> Result<LoadOutcome> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file");
                return Ok(LoadOutcome::NoPriorState);
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to inspect {}", self.path.display()))
            }
        };
        if metadata.len() == 0 {
            debug!(path = %self.path.display(), "state file is empty");
            return Ok(LoadOutcome::NoPriorState);
        }

        let payload = self.read_payload()?;
        info!(
            path = %self.path.display(),
            saved_at = %payload.saved_at(),
            "zoo loaded"
        );
        Ok(LoadOutcome::Loaded(payload.into_zoo()))
    }

    fn write_payload(&self, payload: &SavePayload) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

        let mut file = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
        serde_json::to_writer_pretty(&mut file, payload).context("failed to serialize zoo")?;
        file.flush()?;
        file.persist(&self.path)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    fn read_payload(&self) -> Result<SavePayload> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let payload: SavePayload = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        if payload.version != SAVE_VERSION {
            return Err(anyhow!(
                "unsupported save version {} in {}",
                payload.version,
                self.path.display()
            ));
        }
        Ok(payload)
    }
}

/// Root of the application's data directory.
pub fn default_data_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DATA_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample_zoo() -> Zoo {
        let mut zoo = Zoo::new("Sample Zoo");
        zoo.add_animal(Animal::bird("Kesha", 2, true));
        zoo.add_animal(Animal::bird("Pingu", 4, false));
        zoo.add_animal(Animal::mammal("Rex", 5));
        zoo.add_animal(Animal::reptile("Kaa", 40));
        zoo.add_staff(Staff::zoo_keeper("Anna"));
        zoo.add_staff(Staff::veterinarian("Boris"));
        zoo
    }

    #[test]
    fn save_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("nested").join("zoo.json"));
        let zoo = sample_zoo();

        let summary = store.save(&zoo)?;
        assert!(summary.path.exists());
        assert_eq!(summary.animals, 4);
        assert_eq!(summary.staff, 2);
        assert_eq!(
            summary.to_string(),
            format!("Zoo saved to {}.", store.path().display())
        );

        let LoadOutcome::Loaded(restored) = store.load()? else {
            panic!("expected a saved zoo");
        };
        assert_eq!(restored, zoo);
        assert_eq!(restored.list_animals(), zoo.list_animals());
        assert_eq!(restored.list_staff(), zoo.list_staff());
        Ok(())
    }

    #[test]
    fn save_overwrites_previous_state() -> Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("zoo.json"));
        let mut zoo = sample_zoo();
        store.save(&zoo)?;

        zoo.remove_animal("Rex");
        zoo.remove_staff("Anna");
        store.save(&zoo)?;

        assert_eq!(store.load()?, LoadOutcome::Loaded(zoo));
        Ok(())
    }

    #[test]
    fn missing_or_empty_file_is_no_prior_state() -> Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load()?, LoadOutcome::NoPriorState);

        let empty = dir.path().join("empty.json");
        fs::write(&empty, "")?;
        assert_eq!(ZooStore::new(&empty).load()?, LoadOutcome::NoPriorState);
        Ok(())
    }

    #[test]
    fn payload_is_self_describing() -> Result<()> {
        let dir = tempdir()?;
        let store = ZooStore::new(dir.path().join("zoo.json"));
        store.save(&sample_zoo())?;

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.path())?)?;
        assert_eq!(value["version"], json!(SAVE_VERSION));
        assert_eq!(value["zoo"]["name"], json!("Sample Zoo"));
        assert_eq!(
            value["zoo"]["animals"][1],
            json!({"kind": "Bird", "name": "Pingu", "age": 4, "can_fly": false})
        );
        assert_eq!(
            value["zoo"]["staff"][1],
            json!({"role": "Veterinarian", "name": "Boris"})
        );
        Ok(())
    }

    #[test]
    fn rejects_corrupt_and_unknown_versions() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("zoo.json");
        let store = ZooStore::new(&path);

        fs::write(&path, "not json")?;
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("failed to parse"));

        let future = json!({
            "version": SAVE_VERSION + 1,
            "saved_at": "2024-01-01T00:00:00Z",
            "zoo": {"name": "Future Zoo"}
        });
        fs::write(&path, future.to_string())?;
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("unsupported save version"));
        Ok(())
    }
}

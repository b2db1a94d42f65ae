#![warn(clippy::all, missing_docs)]

//! Core domain logic for the zoo keeper.
//!
//! This crate hosts the animal and staff records, the zoo registry,
//! menu input parsing, configuration handling and the persistence
//! layer used by the terminal UI.

pub mod command;
pub mod config;
pub mod models;
pub mod save;
pub mod zoo;

pub use command::{InputError, MenuChoice, RoleChoice, SpeciesChoice};
pub use crate::config::AppConfig;
pub use models::{Animal, Species, Staff, Veterinarian, ZooKeeper};
pub use save::{LoadOutcome, SaveSummary, ZooStore};
pub use zoo::{Duty, Interaction, Removal, Zoo, DEFAULT_ZOO_NAME};

#![allow(missing_docs)]

//! Parsing of menu choices and prompt answers.
//!
//! Every mismatch is reported as an [`InputError`] whose message is shown to
//! the user; none of them should end the session.

use thiserror::Error;

use crate::models::{Species, Staff};

/// Input the menu could not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid choice, try again.")]
    UnknownChoice(String),
    #[error("Unknown animal type: {0}")]
    UnknownSpecies(String),
    #[error("Unknown staff role: {0}")]
    UnknownRole(String),
    #[error("Age must be a whole non-negative number, got '{0}'")]
    InvalidAge(String),
    #[error("Name must not be empty")]
    EmptyName,
}

/// Top-level menu entries, numbered 1 to 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddAnimal,
    RemoveAnimal,
    AddStaff,
    RemoveStaff,
    ListAnimals,
    ListStaff,
    RandomFeed,
    RandomHeal,
    SaveAndExit,
}

impl MenuChoice {
    /// Entries in display order.
    pub const ALL: [MenuChoice; 9] = [
        MenuChoice::AddAnimal,
        MenuChoice::RemoveAnimal,
        MenuChoice::AddStaff,
        MenuChoice::RemoveStaff,
        MenuChoice::ListAnimals,
        MenuChoice::ListStaff,
        MenuChoice::RandomFeed,
        MenuChoice::RandomHeal,
        MenuChoice::SaveAndExit,
    ];

    /// Parse a menu number such as `"3"`.
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let trimmed = input.trim();
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| InputError::UnknownChoice(trimmed.to_string()))
    }

    /// Menu number shown next to the label.
    pub fn number(&self) -> usize {
        Self::ALL
            .iter()
            .position(|choice| choice == self)
            .map(|index| index + 1)
            .unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddAnimal => "Add an animal",
            MenuChoice::RemoveAnimal => "Remove an animal",
            MenuChoice::AddStaff => "Add a staff member",
            MenuChoice::RemoveStaff => "Remove a staff member",
            MenuChoice::ListAnimals => "Show all animals",
            MenuChoice::ListStaff => "Show all staff",
            MenuChoice::RandomFeed => "Feed a random animal",
            MenuChoice::RandomHeal => "Heal a random animal",
            MenuChoice::SaveAndExit => "Save and exit",
        }
    }
}

/// Animal type selected by the user, before any kind-specific questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesChoice {
    Bird,
    Mammal,
    Reptile,
}

impl SpeciesChoice {
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let trimmed = input.trim();
        [Self::Bird, Self::Mammal, Self::Reptile]
            .into_iter()
            .find(|choice| choice.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InputError::UnknownSpecies(trimmed.to_string()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeciesChoice::Bird => "Bird",
            SpeciesChoice::Mammal => "Mammal",
            SpeciesChoice::Reptile => "Reptile",
        }
    }

    /// Whether the flight question must be asked.
    pub fn asks_flight(&self) -> bool {
        matches!(self, SpeciesChoice::Bird)
    }

    /// Build the species; `can_fly` is ignored for non-birds.
    pub fn into_species(self, can_fly: bool) -> Species {
        match self {
            SpeciesChoice::Bird => Species::Bird { can_fly },
            SpeciesChoice::Mammal => Species::Mammal,
            SpeciesChoice::Reptile => Species::Reptile,
        }
    }
}

/// Staff role selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChoice {
    ZooKeeper,
    Veterinarian,
}

impl RoleChoice {
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let trimmed = input.trim();
        [Self::ZooKeeper, Self::Veterinarian]
            .into_iter()
            .find(|choice| choice.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InputError::UnknownRole(trimmed.to_string()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoleChoice::ZooKeeper => "ZooKeeper",
            RoleChoice::Veterinarian => "Veterinarian",
        }
    }

    pub fn into_staff(self, name: impl Into<String>) -> Staff {
        match self {
            RoleChoice::ZooKeeper => Staff::zoo_keeper(name),
            RoleChoice::Veterinarian => Staff::veterinarian(name),
        }
    }
}

/// Trimmed, non-empty record name.
pub fn parse_name(input: &str) -> Result<String, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyName);
    }
    Ok(trimmed.to_string())
}

pub fn parse_age(input: &str) -> Result<u32, InputError> {
    let trimmed = input.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| InputError::InvalidAge(trimmed.to_string()))
}

/// Anything other than `yes`/`y` counts as no.
pub fn parse_yes_no(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.eq_ignore_ascii_case("yes") || trimmed.eq_ignore_ascii_case("y")
}

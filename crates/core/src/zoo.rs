#![allow(missing_docs)]

//! The zoo registry: owner of every animal and staff record.

use std::fmt;

use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info};

use crate::models::{Animal, Staff};

/// Name given to a zoo when no saved state exists.
pub const DEFAULT_ZOO_NAME: &str = "My Awesome Zoo";

/// Result of removing a record by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal<T> {
    /// The first record with the requested name was removed.
    Removed(T),
    /// No record carried the requested name.
    NotFound(String),
}

impl<T> Removal<T> {
    /// Whether a record was actually removed.
    pub fn is_removed(&self) -> bool {
        matches!(self, Removal::Removed(_))
    }
}

impl fmt::Display for Removal<Animal> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Removal::Removed(animal) => {
                write!(f, "Animal {} was removed from the zoo.", animal.name())
            }
            Removal::NotFound(name) => write!(f, "Animal {name} was not found."),
        }
    }
}

impl fmt::Display for Removal<Staff> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Removal::Removed(member) => {
                write!(f, "Staff member {} was removed from the zoo.", member.name())
            }
            Removal::NotFound(name) => write!(f, "Staff member {name} was not found."),
        }
    }
}

/// Randomised staff duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duty {
    Feed,
    Heal,
}

impl Duty {
    fn verb(&self) -> &'static str {
        match self {
            Duty::Feed => "feed",
            Duty::Heal => "heal",
        }
    }

    fn staff_plural(&self) -> &'static str {
        match self {
            Duty::Feed => "zookeepers",
            Duty::Heal => "veterinarians",
        }
    }
}

/// Outcome of a randomised feed or heal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// The interaction ran; holds its notifications in order.
    Performed(Vec<String>),
    /// The zoo has no animals.
    NoAnimals(Duty),
    /// Nobody on staff can perform the duty.
    NoEligibleStaff(Duty),
}

impl Interaction {
    pub fn is_performed(&self) -> bool {
        matches!(self, Interaction::Performed(_))
    }

    /// Lines to present to the user.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Interaction::Performed(lines) => lines.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interaction::Performed(lines) => write!(f, "{}", lines.join("\n")),
            Interaction::NoAnimals(duty) => {
                write!(f, "There are no animals to {}.", duty.verb())
            }
            Interaction::NoEligibleStaff(duty) => write!(
                f,
                "There are no {} to {} the animals.",
                duty.staff_plural(),
                duty.verb()
            ),
        }
    }
}

/// A zoo with its animals and staff, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zoo {
    name: String,
    animals: Vec<Animal>,
    staff: Vec<Staff>,
}

impl Default for Zoo {
    fn default() -> Self {
        Self::new(DEFAULT_ZOO_NAME)
    }
}

impl Zoo {
    /// Create an empty zoo.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_parts(name, Vec::new(), Vec::new())
    }

    pub(crate) fn from_parts(
        name: impl Into<String>,
        animals: Vec<Animal>,
        staff: Vec<Staff>,
    ) -> Self {
        Self {
            name: name.into(),
            animals,
            staff,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    /// Append an animal and return the arrival notice.
    pub fn add_animal(&mut self, animal: Animal) -> String {
        info!(animal = %animal, "animal added");
        let notice = format!("{animal} has arrived at the zoo.");
        self.animals.push(animal);
        notice
    }

    /// Remove the first animal whose name matches exactly.
    pub fn remove_animal(&mut self, name: &str) -> Removal<Animal> {
        match self.animals.iter().position(|animal| animal.name() == name) {
            Some(index) => {
                let animal = self.animals.remove(index);
                info!(animal = %animal, "animal removed");
                Removal::Removed(animal)
            }
            None => {
                debug!(name, "no animal to remove");
                Removal::NotFound(name.to_string())
            }
        }
    }

    /// Append a staff member and return the hiring notice.
    pub fn add_staff(&mut self, member: Staff) -> String {
        info!(staff = %member, "staff member added");
        let notice = format!("{member} has joined the staff.");
        self.staff.push(member);
        notice
    }

    /// Remove the first staff member whose name matches exactly.
    pub fn remove_staff(&mut self, name: &str) -> Removal<Staff> {
        match self.staff.iter().position(|member| member.name() == name) {
            Some(index) => {
                let member = self.staff.remove(index);
                info!(staff = %member, "staff member removed");
                Removal::Removed(member)
            }
            None => {
                debug!(name, "no staff member to remove");
                Removal::NotFound(name.to_string())
            }
        }
    }

    pub fn list_animals(&self) -> Vec<String> {
        self.animals.iter().map(Animal::describe).collect()
    }

    pub fn list_staff(&self) -> Vec<String> {
        self.staff.iter().map(Staff::describe).collect()
    }

    /// Have a random zookeeper feed a random animal.
    pub fn random_feed(&self) -> Interaction {
        self.random_feed_with_rng(&mut rand::thread_rng())
    }

    /// Feed with a specific RNG (useful for testing).
    pub fn random_feed_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Interaction {
        let keepers: Vec<_> = self.staff.iter().filter_map(Staff::as_zoo_keeper).collect();
        let Some(animal) = self.animals.choose(rng) else {
            return Interaction::NoAnimals(Duty::Feed);
        };
        let Some(keeper) = keepers.choose(rng) else {
            return Interaction::NoEligibleStaff(Duty::Feed);
        };
        debug!(keeper = keeper.name(), animal = animal.name(), "random feed");
        Interaction::Performed(keeper.feed_animal(animal))
    }

    /// Have a random veterinarian heal a random animal.
    pub fn random_heal(&self) -> Interaction {
        self.random_heal_with_rng(&mut rand::thread_rng())
    }

    /// Heal with a specific RNG (useful for testing).
    pub fn random_heal_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Interaction {
        let vets: Vec<_> = self.staff.iter().filter_map(Staff::as_veterinarian).collect();
        let Some(animal) = self.animals.choose(rng) else {
            return Interaction::NoAnimals(Duty::Heal);
        };
        let Some(vet) = vets.choose(rng) else {
            return Interaction::NoEligibleStaff(Duty::Heal);
        };
        debug!(vet = vet.name(), animal = animal.name(), "random heal");
        Interaction::Performed(vet.heal_animal(animal))
    }
}

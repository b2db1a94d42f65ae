use std::fmt;

use super::animal::Animal;

/// Staff member responsible for feeding animals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZooKeeper {
    name: String,
}

impl ZooKeeper {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Feed the animal, returning the feeding notice followed by the animal's reaction.
    pub fn feed_animal(&self, animal: &Animal) -> Vec<String> {
        vec![
            format!("{} is feeding {}.", self.name, animal.name()),
            animal.eat(),
        ]
    }
}

/// Staff member responsible for healing animals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Veterinarian {
    name: String,
}

impl Veterinarian {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Treat the animal. No health state exists, so this only narrates.
    pub fn heal_animal(&self, animal: &Animal) -> Vec<String> {
        vec![
            format!("{} is healing {}.", self.name, animal.name()),
            animal.make_sound(),
            format!("{} thanks {}.", animal.name(), self.name),
        ]
    }
}

/// A staff record, tagged by role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staff {
    ZooKeeper(ZooKeeper),
    Veterinarian(Veterinarian),
}

impl Staff {
    pub fn zoo_keeper(name: impl Into<String>) -> Self {
        Staff::ZooKeeper(ZooKeeper::new(name))
    }

    pub fn veterinarian(name: impl Into<String>) -> Self {
        Staff::Veterinarian(Veterinarian::new(name))
    }

    pub fn name(&self) -> &str {
        match self {
            Staff::ZooKeeper(keeper) => keeper.name(),
            Staff::Veterinarian(vet) => vet.name(),
        }
    }

    /// Role label shown in descriptions.
    pub fn role_label(&self) -> &'static str {
        match self {
            Staff::ZooKeeper(_) => "Zookeeper",
            Staff::Veterinarian(_) => "Veterinarian",
        }
    }

    pub fn as_zoo_keeper(&self) -> Option<&ZooKeeper> {
        match self {
            Staff::ZooKeeper(keeper) => Some(keeper),
            Staff::Veterinarian(_) => None,
        }
    }

    pub fn as_veterinarian(&self) -> Option<&Veterinarian> {
        match self {
            Staff::Veterinarian(vet) => Some(vet),
            Staff::ZooKeeper(_) => None,
        }
    }

    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(name: {})", self.role_label(), self.name())
    }
}

impl From<ZooKeeper> for Staff {
    fn from(keeper: ZooKeeper) -> Self {
        Staff::ZooKeeper(keeper)
    }
}

impl From<Veterinarian> for Staff {
    fn from(vet: Veterinarian) -> Self {
        Staff::Veterinarian(vet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeper_feeds_then_animal_eats() {
        let keeper = ZooKeeper::new("Anna");
        let lines = keeper.feed_animal(&Animal::bird("Kesha", 2, true));
        assert_eq!(lines, vec!["Anna is feeding Kesha.", "Kesha is eating."]);
    }

    #[test]
    fn vet_heals_with_sound_and_thanks() {
        let vet = Veterinarian::new("Boris");
        let lines = vet.heal_animal(&Animal::mammal("Rex", 4));
        assert_eq!(
            lines,
            vec![
                "Boris is healing Rex.",
                "Rex: Woof-meow!",
                "Rex thanks Boris.",
            ]
        );
    }

    #[test]
    fn role_accessors_filter_by_variant() {
        let keeper = Staff::zoo_keeper("Anna");
        let vet = Staff::veterinarian("Boris");

        assert!(keeper.as_zoo_keeper().is_some());
        assert!(keeper.as_veterinarian().is_none());
        assert!(vet.as_veterinarian().is_some());
        assert_eq!(keeper.describe(), "Zookeeper(name: Anna)");
        assert_eq!(vet.describe(), "Veterinarian(name: Boris)");
        assert_eq!(Staff::from(ZooKeeper::new("Anna")), keeper);
        assert_eq!(Staff::from(Veterinarian::new("Boris")).name(), "Boris");
    }
}

use std::fmt;

/// Kind-specific payload of an animal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Species {
    /// A bird, which may or may not be able to fly.
    Bird {
        /// Whether [`Animal::fly`] reports flight.
        can_fly: bool,
    },
    /// A mammal.
    Mammal,
    /// A reptile.
    Reptile,
}

impl Species {
    /// Label used in descriptions and persisted records.
    pub fn label(&self) -> &'static str {
        match self {
            Species::Bird { .. } => "Bird",
            Species::Mammal => "Mammal",
            Species::Reptile => "Reptile",
        }
    }

    fn vocalization(&self) -> &'static str {
        match self {
            Species::Bird { .. } => "Tweet-caw-whistle!",
            Species::Mammal => "Woof-meow!",
            Species::Reptile => "Hsssssss!",
        }
    }
}

/// An animal living in the zoo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animal {
    name: String,
    age: u32,
    species: Species,
}

impl Animal {
    /// Create an animal of the given species.
    pub fn new(name: impl Into<String>, age: u32, species: Species) -> Self {
        Self {
            name: name.into(),
            age,
            species,
        }
    }

    /// Shorthand for a [`Species::Bird`].
    pub fn bird(name: impl Into<String>, age: u32, can_fly: bool) -> Self {
        Self::new(name, age, Species::Bird { can_fly })
    }

    /// Shorthand for a [`Species::Mammal`].
    pub fn mammal(name: impl Into<String>, age: u32) -> Self {
        Self::new(name, age, Species::Mammal)
    }

    /// Shorthand for a [`Species::Reptile`].
    pub fn reptile(name: impl Into<String>, age: u32) -> Self {
        Self::new(name, age, Species::Reptile)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn species(&self) -> Species {
        self.species
    }

    /// The kind-specific vocalization.
    pub fn make_sound(&self) -> String {
        format!("{}: {}", self.name, self.species.vocalization())
    }

    pub fn eat(&self) -> String {
        format!("{} is eating.", self.name)
    }

    /// Flight report for birds; `None` for every other species.
    pub fn fly(&self) -> Option<String> {
        match self.species {
            Species::Bird { can_fly: true } => Some(format!("{} is flying.", self.name)),
            Species::Bird { can_fly: false } => Some(format!("{} does not fly.", self.name)),
            Species::Mammal | Species::Reptile => None,
        }
    }

    /// Human-readable summary with kind, name and age.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(name: {}, age: {})",
            self.species.label(),
            self.name,
            self.age
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sounds_differ_by_species() {
        let bird = Animal::bird("Kesha", 2, true);
        let mammal = Animal::mammal("Rex", 5);
        let reptile = Animal::reptile("Kaa", 40);

        assert_eq!(bird.make_sound(), "Kesha: Tweet-caw-whistle!");
        assert_eq!(mammal.make_sound(), "Rex: Woof-meow!");
        assert_eq!(reptile.make_sound(), "Kaa: Hsssssss!");
        assert_eq!(reptile.eat(), "Kaa is eating.");
    }

    #[test]
    fn grounded_bird_never_flies() {
        let penguin = Animal::bird("Pingu", 3, false);
        assert_eq!(penguin.fly().as_deref(), Some("Pingu does not fly."));

        let parrot = Animal::bird("Kesha", 2, true);
        assert_eq!(parrot.fly().as_deref(), Some("Kesha is flying."));

        assert!(Animal::mammal("Rex", 5).fly().is_none());
    }

    #[test]
    fn describe_includes_kind_name_and_age() {
        assert_eq!(
            Animal::reptile("Kaa", 40).describe(),
            "Reptile(name: Kaa, age: 40)"
        );
        assert_eq!(
            Animal::bird("Kesha", 2, false).to_string(),
            "Bird(name: Kesha, age: 2)"
        );
    }
}

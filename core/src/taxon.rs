//! Taxa.

use std::fmt;

/// A taxon, identifying a row of a character matrix by name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Taxon {
    name: String,
    species: Option<String>,
}

impl Taxon {
    /// Creates a new taxon with the provided name.
    pub fn new<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            species: None,
        }
    }

    /// Returns the taxon with the provided species name.
    pub fn with_species<S>(mut self, species: S) -> Self
    where
        S: Into<String>,
    {
        self.species = Some(species.into());
        self
    }

    /// Returns the taxon name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the species name, if set.
    pub fn species(&self) -> Option<&str> {
        self.species.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl AsRef<str> for Taxon {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Taxon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Taxon {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Taxon {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

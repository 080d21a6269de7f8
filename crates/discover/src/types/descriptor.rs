//! Index generation descriptors.

use std::fmt;

/// One generation of a versioned index.
///
/// The stable alias always points to exactly one physical index named
/// `alias-version`; versions are monotonically increasing and start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    alias: String,
    version: u32,
}

impl IndexDescriptor {
    /// Creates a descriptor for one generation.
    pub fn new(alias: impl Into<String>, version: u32) -> Self {
        Self {
            alias: alias.into(),
            version,
        }
    }

    /// The stable alias name.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The generation number.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The physical index name for this generation.
    pub fn physical_name(&self) -> String {
        format!("{}-{}", self.alias, self.version)
    }

    /// The previous generation, if any.
    pub fn previous(&self) -> Option<IndexDescriptor> {
        (self.version > 1).then(|| IndexDescriptor::new(self.alias.clone(), self.version - 1))
    }
}

impl fmt::Display for IndexDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.physical_name())
    }
}

//! Operator permission sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Permission granting read access to dashboard data.
pub const READ: &str = "read";

/// Permission granting message triage and settings changes.
pub const WRITE: &str = "write";

/// A set of named permissions held by an admin account.
///
/// Serialized as a JSON array of strings. Accounts stored without any
/// permissions receive [`Permissions::default_set`] at login.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(BTreeSet<String>);

impl Permissions {
    /// The two-permission set granted when an account carries none.
    #[must_use]
    pub fn default_set() -> Self {
        [READ, WRITE].into_iter().collect()
    }

    /// Whether `name` is in the set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Number of permissions held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate permission names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Permission names as an owned vector, for storage in a text array column.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Permissions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

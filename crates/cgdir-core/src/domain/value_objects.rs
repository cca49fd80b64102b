//! Value objects: project identity and sequence/shot naming.
//!
//! Sequence and shot folders are named `seq_####` / `sh_####`: a fixed
//! prefix followed by a 1-based index zero-padded to four digits.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Prefix of every sequence folder.
pub const SEQUENCE_PREFIX: &str = "seq_";

/// Prefix of every shot folder.
pub const SHOT_PREFIX: &str = "sh_";

/// Width the index is zero-padded to.
pub const INDEX_WIDTH: usize = 4;

/// Largest index that still fits the padded width.
pub const MAX_INDEX: usize = 9999;

/// Synthesize the folder name for sequence `index` (1-based).
pub fn sequence_name(index: usize) -> String {
    format!("{SEQUENCE_PREFIX}{index:0INDEX_WIDTH$}")
}

/// Synthesize the folder name for shot `index` (1-based).
pub fn shot_name(index: usize) -> String {
    format!("{SHOT_PREFIX}{index:0INDEX_WIDTH$}")
}

/// Recover the index from a `seq_####` name.
pub fn parse_sequence_index(name: &str) -> Option<usize> {
    parse_index(name, SEQUENCE_PREFIX)
}

/// Recover the index from a `sh_####` name.
pub fn parse_shot_index(name: &str) -> Option<usize> {
    parse_index(name, SHOT_PREFIX)
}

fn parse_index(name: &str, prefix: &str) -> Option<usize> {
    let digits = name.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Project number, the first half of the on-disk folder name.
///
/// Usually an 8-digit job number, but free-form text is accepted as long as
/// it is non-empty and contains no underscore (the underscore separates the
/// number from the name when a folder is re-opened).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectNumber(String);

impl ProjectNumber {
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(DomainError::InvalidIdentity {
                field: "number",
                reason: "cannot be empty".into(),
            });
        }
        if value.contains('_') {
            return Err(DomainError::InvalidIdentity {
                field: "number",
                reason: "cannot contain '_'".into(),
            });
        }
        check_path_safe("number", value)?;
        Ok(Self(value.to_owned()))
    }

    /// Random 8-digit project number (10000000..=99999999).
    pub fn generate() -> Self {
        let entropy = Uuid::new_v4().as_u128();
        let value = 10_000_000 + (entropy % 90_000_000) as u64;
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number + name of a project. `number_name` is its folder under the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIdentity {
    number: ProjectNumber,
    name: String,
}

impl ProjectIdentity {
    pub fn new(number: ProjectNumber, name: impl AsRef<str>) -> Result<Self, DomainError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(DomainError::InvalidIdentity {
                field: "name",
                reason: "cannot be empty".into(),
            });
        }
        check_path_safe("name", name)?;
        Ok(Self {
            number,
            name: name.to_owned(),
        })
    }

    /// Re-derive number and name from an existing folder, splitting on the
    /// first underscore. Names may themselves contain underscores.
    pub fn from_folder_name(folder: &str) -> Result<Self, DomainError> {
        let (number, name) =
            folder
                .split_once('_')
                .ok_or_else(|| DomainError::InvalidProjectFolder {
                    name: folder.to_owned(),
                })?;
        Self::new(ProjectNumber::new(number)?, name)
    }

    pub fn number(&self) -> &ProjectNumber {
        &self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn folder_name(&self) -> String {
        format!("{}_{}", self.number, self.name)
    }
}

impl fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.number, self.name)
    }
}

fn check_path_safe(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.contains('/') || value.contains('\\') {
        return Err(DomainError::InvalidIdentity {
            field,
            reason: "cannot contain path separators".into(),
        });
    }
    if value == "." || value == ".." {
        return Err(DomainError::InvalidIdentity {
            field,
            reason: format!("'{value}' is not a valid folder name"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_zero_padded() {
        assert_eq!(sequence_name(1), "seq_0001");
        assert_eq!(sequence_name(42), "seq_0042");
        assert_eq!(shot_name(7), "sh_0007");
        assert_eq!(shot_name(9999), "sh_9999");
    }

    #[test]
    fn sequence_names_parse_back_to_their_index() {
        for i in 1..=MAX_INDEX {
            assert_eq!(parse_sequence_index(&sequence_name(i)), Some(i));
        }
        assert_eq!(parse_shot_index(&shot_name(120)), Some(120));
    }

    #[test]
    fn foreign_names_do_not_parse() {
        assert_eq!(parse_sequence_index("sh_0001"), None);
        assert_eq!(parse_sequence_index("seq_"), None);
        assert_eq!(parse_sequence_index("seq_00a1"), None);
        assert_eq!(parse_shot_index("notes.txt"), None);
    }

    #[test]
    fn identity_requires_non_empty_parts() {
        assert!(ProjectNumber::new("   ").is_err());
        let number = ProjectNumber::new("1234").unwrap();
        assert!(ProjectIdentity::new(number, "  ").is_err());
    }

    #[test]
    fn identity_trims_and_joins_with_underscore() {
        let number = ProjectNumber::new(" 12345678 ").unwrap();
        let identity = ProjectIdentity::new(number, " Awesome_CG ").unwrap();
        assert_eq!(identity.folder_name(), "12345678_Awesome_CG");
    }

    #[test]
    fn folder_name_splits_on_first_underscore() {
        let identity = ProjectIdentity::from_folder_name("12345678_Awesome_CG").unwrap();
        assert_eq!(identity.number().as_str(), "12345678");
        assert_eq!(identity.name(), "Awesome_CG");
    }

    #[test]
    fn folder_without_underscore_is_rejected() {
        assert!(matches!(
            ProjectIdentity::from_folder_name("scratch"),
            Err(DomainError::InvalidProjectFolder { .. })
        ));
    }

    #[test]
    fn number_rejects_underscore_and_separators() {
        assert!(ProjectNumber::new("12_34").is_err());
        assert!(ProjectNumber::new("12/34").is_err());
        let number = ProjectNumber::new("1").unwrap();
        assert!(ProjectIdentity::new(number, "..").is_err());
    }

    #[test]
    fn generated_numbers_have_eight_digits() {
        for _ in 0..100 {
            let number = ProjectNumber::generate();
            assert_eq!(number.as_str().len(), 8);
            assert!(number.as_str().bytes().all(|b| b.is_ascii_digit()));
            assert!(!number.as_str().starts_with('0'));
        }
    }
}

//! Browser profile registry access.
//!
//! Firefox keeps its profile list in `profiles.ini` inside the profiles
//! directory, one `[ProfileN]` section per profile carrying a `Name=` key.
//! Other sections (`[General]`, `[Install...]`) have no name and are skipped.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use crate::error::DirectoryReadError;

/// Registry file name inside the profiles directory.
pub const PROFILES_INI: &str = "profiles.ini";

/// Source of known profile names.
pub trait ProfileDirectory {
    /// Distinct profile names found under `profiles_dir`.
    fn list_profiles(&self, profiles_dir: &Path) -> Result<BTreeSet<String>, DirectoryReadError>;
}

/// Reads `profiles.ini` from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct IniProfileDirectory;

impl ProfileDirectory for IniProfileDirectory {
    fn list_profiles(&self, profiles_dir: &Path) -> Result<BTreeSet<String>, DirectoryReadError> {
        let path = profiles_dir.join(PROFILES_INI);
        let content = std::fs::read_to_string(&path).map_err(|source| DirectoryReadError::Io {
            path: path.clone(),
            source,
        })?;
        let names = parse_profile_names(&content)?;
        debug!(path = %path.display(), count = names.len(), "read profile registry");
        Ok(names)
    }
}

/// Collect the `name` value of every section in an INI-style registry.
///
/// Keys are matched case-insensitively. Both `=` and `:` separate keys from
/// values. `#` and `;` start comment lines; there are no inline comments, so a
/// header like `[Profile0] ; x` is `Malformed` and `Name=a ; b` keeps the
/// whole `a ; b` as the name. Firefox never writes either form.
pub fn parse_profile_names(content: &str) -> Result<BTreeSet<String>, DirectoryReadError> {
    let mut names = BTreeSet::new();
    let mut in_section = false;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let malformed = || DirectoryReadError::Malformed {
            line: idx + 1,
            content: raw.to_string(),
        };

        if line.starts_with('[') {
            if !line.ends_with(']') || line.len() < 3 {
                return Err(malformed());
            }
            in_section = true;
            continue;
        }

        let Some((key, value)) = line.split_once(['=', ':']) else {
            return Err(malformed());
        };
        if !in_section {
            return Err(malformed());
        }

        if key.trim().eq_ignore_ascii_case("name") {
            let value = value.trim();
            if !value.is_empty() {
                names.insert(value.to_string());
            }
        }
    }

    Ok(names)
}

//! Dependency update records

use super::Version;
use std::cmp::Ordering;
use std::fmt;

/// One dependency's version movement, as reported by a change request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyUpdate {
    /// Stable key, e.g. `group:artifact` or a plugin id
    pub identifier: String,
    /// Reference link rendered alongside the identifier
    pub link: String,
    /// Version before the change
    pub old_version: Version,
    /// Version after the change
    pub new_version: Version,
}

impl DependencyUpdate {
    /// Creates a new dependency update
    pub fn new(
        identifier: impl Into<String>,
        link: impl Into<String>,
        old_version: Version,
        new_version: Version,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            link: link.into(),
            old_version,
            new_version,
        }
    }

    /// Combine with another record for the same identifier.
    ///
    /// The result spans the lowest old version to the highest new version.
    /// The receiver's link is kept. Versions of equal precedence (`1.0` and
    /// `1.0.0`) are ordered by their text so the result does not depend on
    /// which record came first.
    pub fn widen(&self, other: &DependencyUpdate) -> DependencyUpdate {
        debug_assert_eq!(self.identifier, other.identifier);
        let old_version = match total_cmp(&self.old_version, &other.old_version) {
            Ordering::Greater => &other.old_version,
            _ => &self.old_version,
        };
        let new_version = match total_cmp(&self.new_version, &other.new_version) {
            Ordering::Less => &other.new_version,
            _ => &self.new_version,
        };
        DependencyUpdate {
            identifier: self.identifier.clone(),
            link: self.link.clone(),
            old_version: old_version.clone(),
            new_version: new_version.clone(),
        }
    }
}

fn total_cmp(a: &Version, b: &Version) -> Ordering {
    a.cmp(b).then_with(|| a.as_str().cmp(b.as_str()))
}

impl fmt::Display for DependencyUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.identifier, self.old_version, self.new_version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(old: &str, new: &str, link: &str) -> DependencyUpdate {
        DependencyUpdate::new("foo:bar", link, Version::parse(old), Version::parse(new))
    }

    #[test]
    fn test_widen_takes_min_old_and_max_new() {
        let merged = update("1.0.0", "1.2.0", "http://x").widen(&update("1.1.0", "1.3.0", "http://y"));
        assert_eq!(merged.old_version, Version::parse("1.0.0"));
        assert_eq!(merged.new_version, Version::parse("1.3.0"));
        assert_eq!(merged.link, "http://x");
    }

    #[test]
    fn test_widen_handles_downgrades() {
        let merged = update("2.0.0", "1.0.0", "l").widen(&update("1.5.0", "1.8.0", "l"));
        assert_eq!(merged.old_version, Version::parse("1.5.0"));
        assert_eq!(merged.new_version, Version::parse("1.8.0"));
    }

    #[test]
    fn test_widen_equal_precedence_is_symmetric() {
        let short = update("1.0", "2.0", "l");
        let long = update("1.0.0", "2.0.0", "l");

        let forward = short.widen(&long);
        let backward = long.widen(&short);
        assert_eq!(forward.to_string(), backward.to_string());
        assert_eq!(forward.old_version.as_str(), "1.0");
        assert_eq!(forward.new_version.as_str(), "2.0.0");
    }

    #[test]
    fn test_display() {
        assert_eq!(update("1.0", "1.1", "l").to_string(), "foo:bar 1.0 -> 1.1");
    }
}

//! Comparable version values
//!
//! Versions are dotted numeric strings (`major.minor.patch`) with an optional
//! pre-release or build suffix. Missing minor/patch components are padded with
//! zero, so `2.1` compares equal to `2.1.0`. Anything else collapses to the
//! `0.0.0` sentinel instead of failing.

use std::cmp::Ordering;
use std::fmt;

/// Value every unparseable version collapses to
pub const SENTINEL_VERSION: &str = "0.0.0";

/// A version with semantic-version ordering
#[derive(Debug, Clone)]
pub struct Version {
    /// The version string as written (or the sentinel on fallback)
    raw: String,
    /// Parsed value used for ordering
    semver: semver::Version,
    /// Whether parsing failed and the sentinel was substituted
    fallback: bool,
}

impl Version {
    /// Parse a version token, falling back to `0.0.0` on failure
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match parse_semver(trimmed) {
            Some(semver) => Self {
                raw: trimmed.to_string(),
                semver,
                fallback: false,
            },
            None => {
                tracing::warn!(version = %trimmed, "unparseable version, using {}", SENTINEL_VERSION);
                Self::sentinel()
            }
        }
    }

    /// The `0.0.0` sentinel
    pub fn sentinel() -> Self {
        Self {
            raw: SENTINEL_VERSION.to_string(),
            semver: semver::Version::new(0, 0, 0),
            fallback: true,
        }
    }

    /// Returns true if this value is the result of a parse failure
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// The string this version renders as
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Reads 1–3 numeric components (zero-padded ones included, e.g. `2024.02.00`)
/// and attaches any `-pre` / `+build` suffix.
fn parse_semver(input: &str) -> Option<semver::Version> {
    let input = input.strip_prefix('v').unwrap_or(input);
    let split_at = input.find(['-', '+']).unwrap_or(input.len());
    let (core, suffix) = input.split_at(split_at);

    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() > 3 {
        return None;
    }
    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }

    let mut version = semver::Version::new(numbers[0], numbers[1], numbers[2]);
    let (pre, build) = match suffix.split_once('+') {
        Some((pre, build)) => (pre, Some(build)),
        None => (suffix, None),
    };
    if let Some(pre) = pre.strip_prefix('-') {
        version.pre = semver::Prerelease::new(pre).ok()?;
    }
    if let Some(build) = build {
        version.build = semver::BuildMetadata::new(build).ok()?;
    }
    Some(version)
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Ord for Version {
    // Build metadata does not take part in precedence.
    fn cmp(&self, other: &Self) -> Ordering {
        self.semver.cmp_precedence(&other.semver)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<&str> for Version {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_version() {
        let v = Version::parse("1.2.3");
        assert!(!v.is_fallback());
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn test_parse_pads_missing_components() {
        assert_eq!(Version::parse("2.1"), Version::parse("2.1.0"));
        assert_eq!(Version::parse("7"), Version::parse("7.0.0"));
        // Display keeps the original text
        assert_eq!(Version::parse("2.1").to_string(), "2.1");
    }

    #[test]
    fn test_parse_prerelease_orders_before_release() {
        let alpha = Version::parse("1.9.0-alpha01");
        let release = Version::parse("1.9.0");
        assert!(!alpha.is_fallback());
        assert!(alpha < release);
    }

    #[test]
    fn test_build_metadata_ignored_for_ordering() {
        assert_eq!(Version::parse("1.0.0+build.1"), Version::parse("1.0.0+build.2"));
    }

    #[test]
    fn test_zero_padded_components() {
        let february = Version::parse("2024.02.00");
        let june = Version::parse("2024.06.00");
        assert!(!february.is_fallback());
        assert!(!june.is_fallback());
        assert!(february < june);
        assert_eq!(february, Version::parse("2024.2.0"));
        assert_eq!(february.to_string(), "2024.02.00");
    }

    #[test]
    fn test_prerelease_and_build_suffix() {
        let v = Version::parse("1.2.3-rc1+b7");
        assert!(!v.is_fallback());
        assert!(v < Version::parse("1.2.3"));
        assert_eq!(v, Version::parse("1.2.3-rc1+b8"));
    }

    #[test]
    fn test_leading_v_accepted() {
        assert_eq!(Version::parse("v3.4.5"), Version::parse("3.4.5"));
    }

    #[test]
    fn test_unparseable_falls_back_to_sentinel() {
        for input in ["", "latest", "1.x", "1.2.3.4", "a.b.c", "1..2"] {
            let v = Version::parse(input);
            assert!(v.is_fallback(), "expected fallback for {:?}", input);
            assert_eq!(v.to_string(), SENTINEL_VERSION);
            assert_eq!(v, Version::parse("0.0.0"));
        }
    }

    #[test]
    fn test_ordering() {
        let mut versions: Vec<Version> = ["1.10.0", "1.2.0", "0.9", "2.0.0-rc1", "2.0.0"]
            .into_iter()
            .map(Version::parse)
            .collect();
        versions.sort();
        let rendered: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, vec!["0.9", "1.2.0", "1.10.0", "2.0.0-rc1", "2.0.0"]);
    }

    #[test]
    fn test_sentinel_is_minimal_for_release_versions() {
        assert!(Version::sentinel() < Version::parse("0.0.1"));
        assert!(Version::sentinel() <= Version::parse("0.0.0"));
    }
}

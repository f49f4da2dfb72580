//! Identity normalization.
//!
//! Every comparison between a configured handle and a member name goes through
//! [`normalize`], so registry construction and member matching agree.

use serde::Serialize;
use std::fmt;

/// Normalized identity string used for all matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WatchKey(String);

impl WatchKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WatchKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalize a raw handle or display name.
///
/// Lower-cases, trims surrounding whitespace and strips leading `@` markers.
/// Stripping repeats until the value is stable, so the result never starts
/// with `@` or whitespace and `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> WatchKey {
    let lowered = raw.to_lowercase();
    let mut current = lowered.trim();
    loop {
        let next = current.trim_start_matches('@').trim_start();
        if next.len() == current.len() {
            break;
        }
        current = next;
    }
    WatchKey(current.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("@Leon3To" ; "leading at and mixed case")]
    #[test_case(" leon3to " ; "surrounding whitespace")]
    #[test_case("LEON3TO" ; "upper case")]
    #[test_case("\t@leon3to\n" ; "whitespace around at")]
    fn test_variants_share_a_key(raw: &str) {
        assert_eq!(normalize(raw).as_str(), "leon3to");
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "blank")]
    #[test_case("@" ; "lone at")]
    #[test_case("@@x" ; "double at")]
    #[test_case("@ @X " ; "spaced ats")]
    #[test_case(".Thierry." ; "punctuation kept")]
    #[test_case("ÉLODIE" ; "non ascii")]
    fn test_idempotent(raw: &str) {
        let once = normalize(raw);
        assert_eq!(normalize(once.as_str()), once);
    }

    #[test]
    fn test_degenerate_inputs_normalize_to_empty() {
        assert!(normalize("").is_empty());
        assert!(normalize("  @  ").is_empty());
    }

    #[test]
    fn test_inner_characters_preserved() {
        assert_eq!(normalize(".Thierry.").as_str(), ".thierry.");
        assert_eq!(normalize("luca@benda").as_str(), "luca@benda");
    }
}

//! Keyword dictionary for classifying material vector parameters
//!
//! Material exports store every vector parameter the same way, whether it is
//! a color, a UV offset or a channel mask. The dictionary decides which ones
//! are colors: a parameter qualifies when its lower-cased name contains one
//! of the include keywords, it is not listed verbatim in the exclude list,
//! and it does not contain one of the technical substrings in
//! [`EXCLUDED_SUBSTRINGS`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Substrings that always disqualify a parameter, regardless of dictionary.
pub const EXCLUDED_SUBSTRINGS: [&str; 2] = ["offset", "uv"];

// Bundled dictionary
const BUNDLED_KEYWORDS: &str = include_str!("keywords.json");

/// Include/exclude lists used to classify vector parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordDictionary {
    /// Lower-case substrings; a name must contain at least one.
    #[serde(default)]
    pub include_keywords: Vec<String>,
    /// Exact (case-sensitive) names that are never colors.
    #[serde(default)]
    pub exclude_exact: Vec<String>,
}

impl KeywordDictionary {
    /// The dictionary compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_KEYWORDS)
    }

    /// Load a dictionary from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::DictionaryUnavailable {
            message: format!("{}: {e}", path.display()),
        })?;
        Self::parse(&content)
    }

    /// Parse a dictionary from JSON text.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::DictionaryUnavailable {
            message: e.to_string(),
        })
    }

    /// Whether a vector parameter with this name is a color.
    pub fn classify(&self, name: &str) -> bool {
        let lower = name.to_lowercase();

        let has_include = self
            .include_keywords
            .iter()
            .any(|keyword| lower.contains(keyword.as_str()));
        let exactly_excluded = self.exclude_exact.iter().any(|excluded| excluded == name);
        let has_excluded_substring = EXCLUDED_SUBSTRINGS.iter().any(|s| lower.contains(s));

        has_include && !exactly_excluded && !has_excluded_substring
    }
}

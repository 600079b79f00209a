//! Converter configuration.
//!
//! Options are a plain struct deserializable from JSON so a host can pass
//! them across whatever boundary it likes. Option *parsing* (CLI flags,
//! config files) is out of scope.

use crate::limits;
use serde::{Deserialize, Serialize};

/// Options controlling what the converter emits.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConverterOptions {
    /// Skip members declared `private`.
    pub exclude_private: bool,
    /// Skip members declared `protected`.
    pub exclude_protected: bool,
    /// Skip declarations that carry no documentation comment.
    pub exclude_not_documented: bool,
    /// Recursion cap for type conversion. Defaults to
    /// [`limits::MAX_TYPE_CONVERSION_DEPTH`].
    pub max_type_recursion: u32,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        ConverterOptions {
            exclude_private: false,
            exclude_protected: false,
            exclude_not_documented: false,
            max_type_recursion: limits::MAX_TYPE_CONVERSION_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_json() {
        let options: ConverterOptions =
            serde_json::from_str(r#"{"excludePrivate": true, "maxTypeRecursion": 10}"#).unwrap();
        assert!(options.exclude_private);
        assert!(!options.exclude_protected);
        assert_eq!(options.max_type_recursion, 10);
    }
}

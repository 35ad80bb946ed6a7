use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Parses a validated value from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }

            /// Borrows the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

newtype!(
    TypeName,
    "Resource type name such as `article` or `blog-post` (pattern: `[A-Za-z][A-Za-z0-9_-]*`).",
    r"^[A-Za-z][A-Za-z0-9_-]*$"
);
newtype!(
    ResourceId,
    "Stable resource identifier; any string with at least one non-whitespace character.",
    r"(?s)^.*\S.*$"
);

impl TypeName {
    /// Sentinel returned when no known type matches a payload.
    pub const UNKNOWN: &'static str = "unknown";

    /// The `unknown` sentinel type.
    pub fn unknown() -> Self {
        Self::new(Self::UNKNOWN)
    }

    /// Returns true for the `unknown` sentinel.
    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }
}

impl ResourceId {
    /// Placeholder id given to a resource with no id-bearing field.
    pub const UNDEFINED: &'static str = "undefined";

    /// The `undefined` placeholder id.
    pub fn undefined() -> Self {
        Self::new(Self::UNDEFINED)
    }

    /// Returns true for the `undefined` placeholder.
    pub fn is_undefined(&self) -> bool {
        self.0 == Self::UNDEFINED
    }
}

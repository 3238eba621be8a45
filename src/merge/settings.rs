use crate::MergeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a source array is combined with a target array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrayHandling {
    /// Append every source element
    Concat,
    /// Append source elements that are not already present (deep equality)
    Union,
    /// Discard the target elements and use the source elements
    Replace,
    /// Merge elements position by position
    Merge,
}

/// Whether a null source property overwrites an existing target property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullValueHandling {
    /// Keep the existing value
    Ignore,
    /// Overwrite the existing value with null
    Merge,
}

/// How source property names are matched against target property names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyNameComparison {
    Exact,
    /// Exact match first, then the first key equal ignoring case
    CaseInsensitive,
}

impl Default for ArrayHandling {
    fn default() -> Self {
        Self::Concat
    }
}

impl Default for NullValueHandling {
    fn default() -> Self {
        Self::Ignore
    }
}

impl Default for PropertyNameComparison {
    fn default() -> Self {
        Self::Exact
    }
}

impl PropertyNameComparison {
    /// Compares two property names under this policy.
    #[must_use]
    pub fn matches(self, left: &str, right: &str) -> bool {
        match self {
            Self::Exact => left == right,
            Self::CaseInsensitive => left
                .chars()
                .flat_map(char::to_lowercase)
                .eq(right.chars().flat_map(char::to_lowercase)),
        }
    }
}

/// Policies applied by [`Document::merge_with`](crate::Document::merge_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MergeSettings {
    pub array_handling: ArrayHandling,
    pub null_value_handling: NullValueHandling,
    pub property_name_comparison: PropertyNameComparison,
}

impl MergeSettings {
    #[must_use]
    pub const fn with_array_handling(mut self, array_handling: ArrayHandling) -> Self {
        self.array_handling = array_handling;
        self
    }

    #[must_use]
    pub const fn with_null_value_handling(mut self, null_value_handling: NullValueHandling) -> Self {
        self.null_value_handling = null_value_handling;
        self
    }

    #[must_use]
    pub const fn with_property_name_comparison(
        mut self,
        property_name_comparison: PropertyNameComparison,
    ) -> Self {
        self.property_name_comparison = property_name_comparison;
        self
    }
}

impl fmt::Display for MergeSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arrays={}, nulls={}, names={}",
            self.array_handling, self.null_value_handling, self.property_name_comparison
        )
    }
}

// Kebab-case names as used in configuration files; parsing ignores ASCII case.
macro_rules! policy_names {
    ($ty:ident, $label:literal, { $($variant:ident => $name:literal),* $(,)? }) => {
        impl $ty {
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = MergeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.trim().eq_ignore_ascii_case($name) {
                        return Ok(Self::$variant);
                    }
                )*
                Err(MergeError::InvalidConfiguration(format!(
                    "unknown {} '{}'",
                    $label, s
                )))
            }
        }
    };
}

policy_names!(ArrayHandling, "array handling", {
    Concat => "concat",
    Union => "union",
    Replace => "replace",
    Merge => "merge",
});

policy_names!(NullValueHandling, "null value handling", {
    Ignore => "ignore",
    Merge => "merge",
});

policy_names!(PropertyNameComparison, "property name comparison", {
    Exact => "exact",
    CaseInsensitive => "case-insensitive",
});

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Prefixed random identifiers.

/// Define a `SmolStr` newtype ID of the form `{prefix}{nanoid}`.
///
/// With a 4 character prefix and a 19 character nanoid the ID is 23 bytes
/// and stays inline in `SmolStr`.
///
/// ```ignore
/// define_id! {
///     /// Identifies a submitted job.
///     pub struct JobId("job-");
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($prefix:literal);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(smol_str::SmolStr);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Fresh random ID.
            pub fn new() -> Self {
                Self(smol_str::format_smolstr!("{}{}", Self::PREFIX, nanoid::nanoid!(19)))
            }

            pub fn from_string(id: impl Into<smol_str::SmolStr>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The random part, without the type prefix.
            pub fn suffix(&self) -> &str {
                self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
            }

            /// First `n` characters of the suffix, for log lines.
            pub fn short(&self, n: usize) -> &str {
                let suffix = self.suffix();
                suffix.get(..n).unwrap_or(suffix)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_string(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::from_string(s)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;

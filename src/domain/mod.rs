//! Backend resources as typed values.
//!
//! Everything here mirrors the JSON the marketplace API returns (camelCase
//! keys, SCREAMING_SNAKE_CASE enum values). Invariants live on the server;
//! these types only decode and display.

/// Declares a string-valued enum as the backend sends it.
///
/// Every enum gets an `Unknown` catch-all so a single unexpected value does
/// not fail a whole list page. Matching in `FromStr` is case-insensitive and
/// accepts the listed aliases.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $wire:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire $(, alias = $alias)*)]
                $variant,
            )+
            #[serde(other)]
            Unknown,
        }

        #[allow(dead_code)]
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Unknown => "UNKNOWN",
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($wire) $(|| s.eq_ignore_ascii_case($alias))* {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!("unknown {} value: {}", stringify!($name), s))
            }
        }
    };
}

pub mod fee;
pub mod material;
pub mod order;
pub mod pagination;
pub mod product;
pub mod tax;
pub mod user;
pub mod vendor;

pub use fee::*;
pub use material::*;
pub use order::*;
pub use pagination::*;
pub use product::*;
pub use tax::*;
pub use user::*;
pub use vendor::*;

use serde::{Deserialize, Serialize};

/// Postal address as used for shipping and vendor pickup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

impl Address {
    /// One-line rendering, skipping missing parts.
    pub fn one_line(&self) -> String {
        [&self.street, &self.city, &self.state, &self.country, &self.postal_code]
            .into_iter()
            .flatten()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Audit reference to an admin: either a bare id or a populated profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdminRef {
    Id(String),
    Profile(AdminProfile),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl AdminRef {
    pub fn display_name(&self) -> String {
        match self {
            AdminRef::Id(id) => id.clone(),
            AdminRef::Profile(profile) => {
                let name = [&profile.first_name, &profile.last_name]
                    .into_iter()
                    .flatten()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(" ");
                if !name.trim().is_empty() {
                    name
                } else {
                    profile
                        .email
                        .clone()
                        .or_else(|| profile.id.clone())
                        .unwrap_or_else(|| "-".to_string())
                }
            }
        }
    }
}

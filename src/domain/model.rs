use chrono::{DateTime, Utc};

/// Server-assigned identifier, unique within one entity type.
pub type Id = u64;

/// RFC 3339 on the wire.
pub type Timestamp = DateTime<Utc>;

/// Declares a closed string enumeration: serde rejects any literal outside the
/// listed set, and `FromStr` does the same for query-string input.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $lit)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $lit,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::utils::error::SchemaError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($lit => Ok($name::$variant),)+
                    other => Err($crate::utils::error::SchemaError::InvalidEnumValue {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

pub(crate) use closed_enum;

closed_enum! {
    /// Seniority band, shared by user profiles and job postings.
    pub enum ExperienceLevel as "experience_level" {
        Intern => "intern",
        Entry => "entry",
        Associate => "associate",
        Mid => "mid",
        Senior => "senior",
        Executive => "executive",
    }
}

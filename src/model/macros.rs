//! Macros for string-backed model enumerations.

/// Generate a closed enumeration that round-trips through its wire string.
///
/// Loaders hand the model over with whatever strings they read, so every
/// generated enum carries an extra `Unknown(String)` variant that keeps an
/// out-of-domain value verbatim. Validators report `Unknown` as an
/// `Invalid` error instead of the loader failing on it.
///
/// # Example
///
/// ```
/// use statewise::model_enum;
///
/// model_enum! {
///     pub enum Color {
///         Red => "red",
///         Green => "green",
///     }
/// }
///
/// assert_eq!(Color::from("red"), Color::Red);
/// assert_eq!(Color::from("blue"), Color::Unknown("blue".to_string()));
/// assert!(!Color::from("blue").is_known());
/// assert_eq!(Color::Green.as_str(), "green");
/// ```
#[macro_export]
macro_rules! model_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
            /// A value outside the enumeration, kept as it was loaded.
            Unknown(String),
        }

        impl $name {
            /// The wire string for this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)*
                    Self::Unknown(raw) => raw,
                }
            }

            /// Whether the value belongs to the closed domain.
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Unknown(_))
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                match raw {
                    $($wire => Self::$variant,)*
                    other => Self::Unknown(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($wire => Self::$variant,)*
                    _ => Self::Unknown(raw),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unknown(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

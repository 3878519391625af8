//! Typed identifiers.
//!
//! The decision source hands back raw identifier strings. Every resource
//! identifier type implements [`ResourceId::parse_raw`] so those strings are
//! converted into typed values at compile-time-resolved call sites.

use std::fmt;

use crate::error::InvalidPredicateArgument;

/// Longest accepted raw identifier, in bytes.
pub const MAX_ID_LEN: usize = 128;

/// Identifier of one record of a resource type.
pub trait ResourceId:
    Clone + Ord + fmt::Display + fmt::Debug + Send + Sync + 'static
{
    /// Argument name reported when parsing fails (e.g. `"device_id"`).
    const KIND: &'static str;

    /// Construct from a raw string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPredicateArgument`] if `raw` is blank, padded with
    /// whitespace, longer than [`MAX_ID_LEN`] or contains control characters.
    fn parse_raw(raw: &str) -> Result<Self, InvalidPredicateArgument>;

    /// The raw form, as stored and as sent by the decision source.
    fn as_str(&self) -> &str;
}

/// Shared validation for raw identifiers.
///
/// # Errors
///
/// See [`ResourceId::parse_raw`].
pub fn validate_raw_id(field: &'static str, raw: &str) -> Result<(), InvalidPredicateArgument> {
    if raw.trim().is_empty() {
        return Err(InvalidPredicateArgument::new(field, "must not be blank"));
    }
    if raw.trim() != raw {
        return Err(InvalidPredicateArgument::new(
            field,
            "must not have leading or trailing whitespace",
        ));
    }
    if raw.len() > MAX_ID_LEN {
        return Err(InvalidPredicateArgument::new(
            field,
            format!("must be at most {MAX_ID_LEN} bytes"),
        ));
    }
    if raw.chars().any(char::is_control) {
        return Err(InvalidPredicateArgument::new(
            field,
            "must not contain control characters",
        ));
    }
    Ok(())
}

/// Define a string-backed [`ResourceId`] newtype.
///
/// The generated type serializes as a plain string and re-validates on
/// deserialization. The calling crate must depend on `serde`.
///
/// ```
/// modkit_security::resource_id! {
///     /// Sensor identifier.
///     pub struct SensorId("sensor_id");
/// }
///
/// use modkit_security::ResourceId;
/// assert_eq!(SensorId::parse_raw("s-1").unwrap().as_str(), "s-1");
/// assert!(SensorId::parse_raw("  ").is_err());
/// ```
#[macro_export]
macro_rules! resource_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident($kind:literal);) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        $vis struct $name(String);

        impl $crate::ResourceId for $name {
            const KIND: &'static str = $kind;

            fn parse_raw(raw: &str) -> Result<Self, $crate::InvalidPredicateArgument> {
                $crate::identifier::validate_raw_id($kind, raw)?;
                Ok(Self(raw.to_owned()))
            }

            fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::std::convert::TryFrom<String> for $name {
            type Error = $crate::InvalidPredicateArgument;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                $crate::identifier::validate_raw_id($kind, &raw)?;
                Ok(Self(raw))
            }
        }

        impl ::std::convert::From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::InvalidPredicateArgument;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                <Self as $crate::ResourceId>::parse_raw(raw)
            }
        }
    };
}

resource_id! {
    /// Tenant identifier (e.g. `PR-01`).
    pub struct TenantId("tenant_id");
}

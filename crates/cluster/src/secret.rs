//! Serde helpers for optional `SecretString` fields.
//!
//! Serialization includes the secret so model files can round-trip it;
//! `secrecy` only guards against accidental `Debug` output at runtime.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    secret
        .as_ref()
        .map(|s| s.expose_secret())
        .serialize(serializer)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .filter(|s| !s.is_empty())
        .map(|s| SecretString::new(s.into())))
}

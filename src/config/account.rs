use serde::{Deserialize, Deserializer};

use crate::cache::token::Credentials;
use crate::utils::constants::DEFAULT_OFFSET_SECS;

/// ================================
/// Monitored account
/// ================================
#[derive(Clone, Deserialize)]
pub struct AccountConfig {
    /// invariant: non-empty, checked by the validator
    #[serde(default, deserialize_with = "scalar_string")]
    pub username: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub password: String,
    /// Site address id used in the production URL
    #[serde(default, deserialize_with = "scalar_string")]
    pub address: String,
    /// Look-back window of the data query, in seconds
    #[serde(default = "default_offset")]
    pub offset: u64,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            address: String::new(),
            offset: default_offset(),
        }
    }
}

impl AccountConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.to_owned(), self.password.to_owned())
    }
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("address", &self.address)
            .field("offset", &self.offset)
            .finish()
    }
}

/// Unquoted YAML scalars such as `address: 123456` arrive as numbers, and
/// an unset `${VAR}` leaves a null.
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(value)) => value,
        Some(Scalar::Int(value)) => value.to_string(),
        Some(Scalar::Float(value)) => value.to_string(),
        None => String::new(),
    })
}

fn default_offset() -> u64 {
    DEFAULT_OFFSET_SECS
}

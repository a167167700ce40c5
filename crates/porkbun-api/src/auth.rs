use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};

/// Body key carrying the API key.
pub(crate) const API_KEY_FIELD: &str = "apikey";
/// Body key carrying the secret API key.
pub(crate) const SECRET_KEY_FIELD: &str = "secretapikey";

/// The API key pair for a Porkbun account.
///
/// Porkbun has no header or token auth: both keys travel inside every
/// request body. The pair is fixed for the life of a client.
#[derive(Debug, Clone)]
pub struct Credentials {
    api_key: SecretString,
    secret_api_key: SecretString,
}

impl Credentials {
    pub fn new(api_key: SecretString, secret_api_key: SecretString) -> Self {
        Self {
            api_key,
            secret_api_key,
        }
    }

    /// Write both keys into a request body, replacing any existing values.
    pub(crate) fn inject(&self, body: &mut Map<String, Value>) {
        body.insert(
            API_KEY_FIELD.to_owned(),
            Value::String(self.api_key.expose_secret().to_owned()),
        );
        body.insert(
            SECRET_KEY_FIELD.to_owned(),
            Value::String(self.secret_api_key.expose_secret().to_owned()),
        );
    }
}

impl<A: Into<String>, S: Into<String>> From<(A, S)> for Credentials {
    fn from((api_key, secret_api_key): (A, S)) -> Self {
        Self::new(
            SecretString::from(api_key.into()),
            SecretString::from(secret_api_key.into()),
        )
    }
}

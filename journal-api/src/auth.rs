use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use thiserror::Error;

/// Credentials presented on every privileged request using the `Basic` scheme.
///
/// The token is plain base64 of `username:password`. It is trivially
/// reversible (see [`Credentials::decode_authorization_header`]) and is not a
/// security boundary: anything that leaves a local dev setup needs TLS in
/// front of it, and a real deployment should move to a vetted scheme.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    token: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Missing username")]
    MissingUsername,
    #[error("Missing password")]
    MissingPassword,
    #[error("Username may not contain ':'")]
    InvalidUsername,
    #[error("Malformed authorization header")]
    MalformedHeader,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Result<Credentials, CredentialsError> {
        if username.is_empty() {
            return Err(CredentialsError::MissingUsername);
        }
        if password.is_empty() {
            return Err(CredentialsError::MissingPassword);
        }
        // The basic scheme splits on the first ':', so it cannot live in the username.
        if username.contains(':') {
            return Err(CredentialsError::InvalidUsername);
        }

        Ok(Credentials {
            username: username.to_string(),
            token: STANDARD.encode(format!("{}:{}", username, password)),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn authorization_header(&self) -> String {
        format!("Basic {}", self.token)
    }

    /// Split an `Authorization: Basic ...` value back into username and password.
    pub fn decode_authorization_header(
        value: &str,
    ) -> Result<(String, String), CredentialsError> {
        let token = value
            .strip_prefix("Basic ")
            .ok_or(CredentialsError::MalformedHeader)?;
        let raw = STANDARD
            .decode(token.trim())
            .map_err(|_| CredentialsError::MalformedHeader)?;
        let raw = String::from_utf8(raw).map_err(|_| CredentialsError::MalformedHeader)?;
        let (username, password) = raw
            .split_once(':')
            .ok_or(CredentialsError::MalformedHeader)?;

        Ok((username.to_string(), password.to_string()))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

//! HNAP request signing and the two-phase login handshake.
//!
//! # Signing
//!
//! Every request carries `HNAP_AUTH: <HEX> <timestamp>`, where `HEX` is the
//! uppercase HMAC-MD5 of `timestamp ++ namespace ++ action` keyed by the
//! current signing key. Before login the key is the public sentinel
//! `withoutloginkey`.
//!
//! # Login Flow
//!
//! 1. `Login` with `Action=request` returns `PublicKey`, `Challenge` and `Cookie`
//! 2. The signing key becomes `HMAC-MD5(PublicKey ++ password, Challenge)` and
//!    `Cookie` becomes the session id
//! 3. `Login` with `Action=login` proves the password with
//!    `LoginPassword = HMAC-MD5(signing key, Challenge)`
//!
//! The key from step 2 is stored before step 3 is confirmed, so a rejected
//! second round leaves the session holding an unverified key.

use crate::action::{Action, ActionParams, ActionResponse};
use crate::client::HnapClient;
use crate::constants::{HNAP_NAMESPACE, LOGIN_FAILED};
use crate::error::HnapError;
use crate::transport::Transport;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use md5::Md5;
use strum_macros::Display;
use tracing::{info, warn};

type HmacMd5 = Hmac<Md5>;

/// Round of the login handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LoginPhase {
    #[strum(to_string = "request")]
    Request,
    #[strum(to_string = "login")]
    Login,
}

/// Uppercase hex HMAC-MD5 of `data` keyed by `key`
pub fn hmac_md5_hex(key: &str, data: &str) -> Result<String, HnapError> {
    let mut mac =
        <HmacMd5 as KeyInit>::new_from_slice(key.as_bytes()).map_err(|e| HnapError::Key(e.to_string()))?;
    mac.update(data.as_bytes());
    Ok(hex::encode_upper(mac.finalize().into_bytes()))
}

/// `HNAP_AUTH` header value for `action` at `timestamp` (ms since epoch)
pub fn sign(private_key: &str, action: Action, timestamp: i64) -> Result<String, HnapError> {
    let data = format!("{}{}{}", timestamp, HNAP_NAMESPACE, action);
    Ok(format!("{} {}", hmac_md5_hex(private_key, &data)?, timestamp))
}

/// Signing key derived from the device's public key and the user's password
pub fn derive_private_key(public_key: &str, password: &str, challenge: &str) -> Result<String, HnapError> {
    hmac_md5_hex(&format!("{}{}", public_key, password), challenge)
}

/// Password proof sent in the second login round
pub fn login_password(private_key: &str, challenge: &str) -> Result<String, HnapError> {
    hmac_md5_hex(private_key, challenge)
}

/// Values returned by the first login round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginChallenge {
    pub public_key: String,
    pub challenge: String,
    pub cookie: String,
}

impl LoginChallenge {
    /// Missing keys are taken as empty strings
    pub fn from_response(response: &ActionResponse) -> Self {
        let field = |key: &str| response.get(key).cloned().unwrap_or_default();
        Self {
            public_key: field("PublicKey"),
            challenge: field("Challenge"),
            cookie: field("Cookie"),
        }
    }
}

/// Fails unless `LoginResult` is present and not `FAILED`
pub fn check_login_result(response: &ActionResponse, phase: LoginPhase) -> Result<(), HnapError> {
    match response.get("LoginResult") {
        Some(result) if result != LOGIN_FAILED => Ok(()),
        result => {
            warn!(%phase, ?result, "Login rejected");
            Err(HnapError::LoginFailed(phase))
        }
    }
}

fn login_params(username: &str) -> ActionParams {
    [
        ("Action", "request"),
        ("Captcha", ""),
        ("PrivateLogin", "LoginPassword"),
        ("Username", username),
        ("LoginPassword", ""),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}

impl<T: Transport> HnapClient<T> {
    /// Log in with the configured credentials.
    ///
    /// Returns the final `LoginResponse` map.
    pub fn login(&mut self) -> Result<ActionResponse, HnapError> {
        let mut params = login_params(&self.config.username);

        let response = self.call(Action::Login, Some(&params))?;
        check_login_result(&response, LoginPhase::Request)?;

        let challenge = LoginChallenge::from_response(&response);
        let private_key = derive_private_key(&challenge.public_key, &self.config.password, &challenge.challenge)?;
        self.session.set_private_key(private_key);
        self.session.set_uid(challenge.cookie);

        let password = login_password(self.session.private_key(), &challenge.challenge)?;
        params.insert("Action".to_string(), "login".to_string());
        params.insert("LoginPassword".to_string(), password);

        let response = self.call(Action::Login, Some(&params))?;
        check_login_result(&response, LoginPhase::Login)?;

        info!(address = %self.config.address, username = %self.config.username, "Logged in");
        Ok(response)
    }
}

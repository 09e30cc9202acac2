//! Session state shared across requests to one device.
//!
//! The modem tracks a login through two cookies scoped to `/`: the signing
//! key (`PrivateKey`) and the session id (`uid`). [`Session`] holds them
//! explicitly, hands out the protocol defaults while they are unset, and
//! renders the `Cookie` header a jar scoped to the HNAP endpoint would send.

use crate::constants::{COOKIE_PATH, DEFAULT_PRIVATE_KEY, DEFAULT_UID, PRIVATE_KEY_COOKIE, UID_COOKIE};
use cookie::Cookie;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionField {
    PrivateKey,
    Uid,
}

impl SessionField {
    pub const ALL: [SessionField; 2] = [SessionField::PrivateKey, SessionField::Uid];

    pub fn cookie_name(&self) -> &'static str {
        match self {
            SessionField::PrivateKey => PRIVATE_KEY_COOKIE,
            SessionField::Uid => UID_COOKIE,
        }
    }

    /// Value reported while nothing has been stored
    pub fn default_value(&self) -> &'static str {
        match self {
            SessionField::PrivateKey => DEFAULT_PRIVATE_KEY,
            SessionField::Uid => DEFAULT_UID,
        }
    }

    fn from_cookie_name(name: &str) -> Option<Self> {
        SessionField::ALL.into_iter().find(|field| field.cookie_name() == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    private_key: Option<String>,
    uid: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value for `field`, or its default when absent
    pub fn get(&self, field: SessionField) -> &str {
        self.slot(field)
            .as_deref()
            .unwrap_or_else(|| field.default_value())
    }

    pub fn set(&mut self, field: SessionField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Signing key, `withoutloginkey` until a login stores one
    pub fn private_key(&self) -> &str {
        self.get(SessionField::PrivateKey)
    }

    pub fn uid(&self) -> &str {
        self.get(SessionField::Uid)
    }

    pub fn set_private_key(&mut self, key: impl Into<String>) {
        self.set(SessionField::PrivateKey, key);
    }

    pub fn set_uid(&mut self, uid: impl Into<String>) {
        self.set(SessionField::Uid, uid);
    }

    /// Forget both values, returning to the pre-login defaults
    pub fn clear(&mut self) {
        self.private_key = None;
        self.uid = None;
    }

    /// `Cookie` header value for the stored fields, `None` if nothing is stored
    pub fn cookie_header(&self) -> Option<String> {
        let pairs: Vec<String> = SessionField::ALL
            .into_iter()
            .filter_map(|field| {
                self.slot(field)
                    .as_ref()
                    .map(|value| format!("{}={}", field.cookie_name(), value))
            })
            .collect();

        if pairs.is_empty() { None } else { Some(pairs.join("; ")) }
    }

    /// Forget one value, returning it to its default
    pub fn remove(&mut self, field: SessionField) {
        *self.slot_mut(field) = None;
    }

    /// Apply a `Set-Cookie` header value sent by the device.
    ///
    /// Only `PrivateKey` and `uid` scoped to `/` (or without a path) are
    /// kept. An expired cookie or `Max-Age=0` deletes the field. Returns
    /// whether the header applied to the session.
    pub fn absorb_set_cookie(&mut self, header: &str) -> bool {
        let Ok(cookie) = Cookie::parse(header) else {
            return false;
        };
        let Some(field) = SessionField::from_cookie_name(cookie.name()) else {
            return false;
        };
        if cookie.path().is_some_and(|path| path != COOKIE_PATH) {
            return false;
        }

        if is_expired(&cookie) {
            debug!(cookie = field.cookie_name(), "Session cookie deleted by device");
            self.remove(field);
        } else {
            debug!(cookie = field.cookie_name(), "Session cookie updated by device");
            self.set(field, cookie.value_trimmed());
        }
        true
    }

    fn slot(&self, field: SessionField) -> &Option<String> {
        match field {
            SessionField::PrivateKey => &self.private_key,
            SessionField::Uid => &self.uid,
        }
    }

    fn slot_mut(&mut self, field: SessionField) -> &mut Option<String> {
        match field {
            SessionField::PrivateKey => &mut self.private_key,
            SessionField::Uid => &mut self.uid,
        }
    }
}

fn is_expired(cookie: &Cookie<'_>) -> bool {
    let max_age_elapsed = cookie
        .max_age()
        .is_some_and(|age| age.is_zero() || age.is_negative());
    let expires_passed = cookie
        .expires_datetime()
        .is_some_and(|at| at.unix_timestamp() <= chrono::Utc::now().timestamp());
    max_age_elapsed || expires_passed
}

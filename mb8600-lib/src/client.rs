use crate::action::{Action, ActionParams, ActionResponse};
use crate::auth;
use crate::channel::{DownstreamChannel, UpstreamChannel, decode_downstream, decode_upstream};
use crate::clock::{Clock, system_clock};
use crate::constants::{
    DEFAULT_ADDRESS, DEFAULT_PASSWORD, DEFAULT_USERNAME, DOWNSTREAM_CHANNEL_KEY, HNAP_PATH, UPSTREAM_CHANNEL_KEY,
};
use crate::error::HnapError;
use crate::session::Session;
use crate::transport::{HnapRequest, HttpsTransport, Transport};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Connection settings for a modem
#[derive(Clone)]
pub struct DeviceConfig {
    /// Host (and optional port) of the modem, without scheme
    pub address: String,
    pub username: String,
    pub password: String,
    /// Per-request timeout applied by the transport; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl DeviceConfig {
    pub fn new(address: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            username: username.into(),
            password: password.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS, DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HNAP client for a single modem.
///
/// Holds the session state between calls, so one client must not be shared
/// across threads without external locking.
pub struct HnapClient<T: Transport = HttpsTransport> {
    pub(crate) config: DeviceConfig,
    pub(crate) session: Session,
    clock: Clock,
    transport: T,
}

impl HnapClient<HttpsTransport> {
    /// Create a client using the HTTPS transport and the system clock
    pub fn new(config: DeviceConfig) -> Result<Self, HnapError> {
        let transport = HttpsTransport::new(config.timeout)?;
        Ok(Self::with_parts(config, transport, system_clock()))
    }
}

impl<T: Transport> HnapClient<T> {
    pub fn with_parts(config: DeviceConfig, transport: T, clock: Clock) -> Self {
        Self {
            config,
            session: Session::new(),
            clock,
            transport,
        }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Endpoint all actions are posted to
    pub fn hnap_url(&self) -> String {
        format!("https://{}{}", self.config.address, HNAP_PATH)
    }

    /// `HNAP_AUTH` value for `action`, reading the clock exactly once
    pub fn sign(&self, action: Action) -> Result<String, HnapError> {
        let timestamp = (self.clock)();
        auth::sign(self.session.private_key(), action, timestamp)
    }

    /// Invoke an action by name.
    ///
    /// Names outside the known set fail with [`HnapError::InvalidAction`]
    /// before anything is sent.
    pub fn invoke(&mut self, action: &str, params: Option<&ActionParams>) -> Result<ActionResponse, HnapError> {
        let action: Action = action.parse()?;
        self.call(action, params)
    }

    /// Invoke `action` and unwrap its `<Action>Response` envelope
    pub fn call(&mut self, action: Action, params: Option<&ActionParams>) -> Result<ActionResponse, HnapError> {
        let empty = ActionParams::new();
        let params = params.unwrap_or(&empty);
        let body = serde_json::to_vec(&BTreeMap::from([(action.name(), params)]))?;

        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("SOAPAction".to_string(), action.soap_action()),
            ("HNAP_AUTH".to_string(), self.sign(action)?),
        ];
        if let Some(cookie) = self.session.cookie_header() {
            headers.push(("Cookie".to_string(), cookie));
        }

        let request = HnapRequest {
            url: self.hnap_url(),
            headers,
            body,
        };
        debug!(uri = %request.url, %action, headers = ?request.loggable_headers(), "Making request");

        let response = self.transport.post(request)?;
        debug!(%action, status = response.status, "Received response");

        for cookie in &response.set_cookies {
            self.session.absorb_set_cookie(cookie);
        }

        if response.status != 200 {
            return Err(HnapError::NonOkStatus {
                action: action.to_string(),
                status: response.status,
            });
        }

        unwrap_envelope(action, &response.body)
    }

    /// Downstream channel table, in the order the modem reports it
    pub fn downstream_channels(&mut self) -> Result<Vec<DownstreamChannel>, HnapError> {
        let response = self.call(Action::GetMotoStatusDownstreamChannelInfo, None)?;
        let raw = response.get(DOWNSTREAM_CHANNEL_KEY).map(String::as_str).unwrap_or_default();
        debug!(data = raw, "Got downstream channels");
        decode_downstream(raw)
    }

    /// Upstream channel table, in the order the modem reports it
    pub fn upstream_channels(&mut self) -> Result<Vec<UpstreamChannel>, HnapError> {
        let response = self.call(Action::GetMotoStatusUpstreamChannelInfo, None)?;
        let raw = response.get(UPSTREAM_CHANNEL_KEY).map(String::as_str).unwrap_or_default();
        debug!(data = raw, "Got upstream channels");
        decode_upstream(raw)
    }
}

fn unwrap_envelope(action: Action, body: &[u8]) -> Result<ActionResponse, HnapError> {
    let mut envelope: BTreeMap<String, ActionResponse> =
        serde_json::from_slice(body).map_err(|source| HnapError::MalformedResponse {
            action: action.to_string(),
            source,
        })?;

    envelope
        .remove(&action.response_key())
        .ok_or_else(|| HnapError::NoResponse(action.to_string()))
}

//! HTTPS transport used to reach the HNAP endpoint.

use crate::error::HnapError;
use reqwest::header::SET_COOKIE;
use std::time::Duration;

/// A fully prepared HNAP POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HnapRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HnapRequest {
    /// First header named `name`, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Headers safe to log; `Cookie` carries the signing key and is left out
    pub fn loggable_headers(&self) -> Vec<&(String, String)> {
        self.headers
            .iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case("Cookie"))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Raw `Set-Cookie` header values
    pub set_cookies: Vec<String>,
    pub body: Vec<u8>,
}

/// Something that can deliver an [`HnapRequest`] and hand back the reply.
pub trait Transport {
    fn post(&mut self, request: HnapRequest) -> Result<HttpResponse, HnapError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn post(&mut self, request: HnapRequest) -> Result<HttpResponse, HnapError> {
        (**self).post(request)
    }
}

/// Blocking HTTPS transport.
///
/// Certificate validation is disabled: the modem serves a self-signed
/// certificate.
pub struct HttpsTransport {
    client: reqwest::blocking::Client,
}

impl HttpsTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, HnapError> {
        let mut builder = reqwest::blocking::Client::builder().danger_accept_invalid_certs(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HnapError::Init(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for HttpsTransport {
    fn post(&mut self, request: HnapRequest) -> Result<HttpResponse, HnapError> {
        let mut builder = self.client.post(&request.url).body(request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_owned)
            .collect();
        let body = response.bytes()?.to_vec();

        Ok(HttpResponse {
            status,
            set_cookies,
            body,
        })
    }
}

pub mod action;
pub mod auth;
pub mod channel;
pub mod client;
pub mod clock;
pub mod constants;
pub mod error;
pub mod session;
pub mod transport;

#[cfg(test)]
mod tests;

// Re-export the client and its configuration for easy access
pub use action::{Action, ActionParams, ActionResponse};
pub use channel::{DownstreamChannel, UpstreamChannel};
pub use client::{DeviceConfig, HnapClient};
pub use error::HnapError;

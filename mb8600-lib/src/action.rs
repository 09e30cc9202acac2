//! The fixed set of HNAP actions the client is allowed to invoke.

use crate::constants::HNAP_NAMESPACE;
use crate::error::HnapError;
use std::collections::BTreeMap;
use std::str::FromStr;
use strum_macros::{Display, IntoStaticStr};

/// Parameters sent with an action. All values are strings on the wire.
pub type ActionParams = BTreeMap<String, String>;

/// Inner mapping of an `<Action>Response` envelope.
pub type ActionResponse = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum Action {
    Login,
    GetHomeConnection,
    GetHomeAddress,
    GetMotoStatusSoftware,
    GetMotoStatusLog,
    GetMotoLagStatus,
    GetMotoStatusConnectionInfo,
    GetMotoStatusDownstreamChannelInfo,
    GetMotoStatusStartupSequence,
    GetMotoStatusUpstreamChannelInfo,
}

impl Action {
    /// Every action the device is known to answer
    pub const ALL: [Action; 10] = [
        Action::Login,
        Action::GetHomeConnection,
        Action::GetHomeAddress,
        Action::GetMotoStatusSoftware,
        Action::GetMotoStatusLog,
        Action::GetMotoLagStatus,
        Action::GetMotoStatusConnectionInfo,
        Action::GetMotoStatusDownstreamChannelInfo,
        Action::GetMotoStatusStartupSequence,
        Action::GetMotoStatusUpstreamChannelInfo,
    ];

    /// Wire name of the action, e.g. `Login`
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Value of the `SOAPAction` header, e.g. `http://purenetworks.com/HNAP1/Login`
    pub fn soap_action(&self) -> String {
        format!("{}{}", HNAP_NAMESPACE, self.name())
    }

    /// Envelope key the device answers under, e.g. `LoginResponse`
    pub fn response_key(&self) -> String {
        format!("{}Response", self.name())
    }
}

impl FromStr for Action {
    type Err = HnapError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == name)
            .ok_or_else(|| HnapError::InvalidAction(name.to_string()))
    }
}

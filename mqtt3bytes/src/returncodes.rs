use crate::QoS;
use core::fmt;

/// Return code of a CONNACK, answering the client's CONNECT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectReturnCode {
    Accepted = 0,
    RefusedProtocolVersion,
    RefusedIdentifierRejected,
    ServerUnavailable,
    BadUsernamePassword,
    NotAuthorized,
}

impl ConnectReturnCode {
    /// Codes above 5 are reserved
    pub fn from_u8(code: u8) -> Option<ConnectReturnCode> {
        match code {
            0 => Some(ConnectReturnCode::Accepted),
            1 => Some(ConnectReturnCode::RefusedProtocolVersion),
            2 => Some(ConnectReturnCode::RefusedIdentifierRejected),
            3 => Some(ConnectReturnCode::ServerUnavailable),
            4 => Some(ConnectReturnCode::BadUsernamePassword),
            5 => Some(ConnectReturnCode::NotAuthorized),
            _ => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        *self == ConnectReturnCode::Accepted
    }

    /// Whether sending the very same CONNECT again later can succeed. Only an
    /// unavailable server is transient, every other refusal needs the client
    /// to change something first
    pub fn is_retryable(&self) -> bool {
        *self == ConnectReturnCode::ServerUnavailable
    }

    pub fn desc(&self) -> &'static str {
        match self {
            ConnectReturnCode::Accepted => "Connection accepted",
            ConnectReturnCode::RefusedProtocolVersion => {
                "The Server does not support the level of the MQTT protocol requested by the Client"
            }
            ConnectReturnCode::RefusedIdentifierRejected => {
                "The Client identifier is correct UTF-8 but not allowed by the Server"
            }
            ConnectReturnCode::ServerUnavailable => {
                "The Network Connection has been made but the MQTT service is unavailable"
            }
            ConnectReturnCode::BadUsernamePassword => "The data in the user name or password is malformed",
            ConnectReturnCode::NotAuthorized => "The Client is not authorized to connect",
        }
    }
}

impl fmt::Display for ConnectReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectReturnCode::Accepted => "Connection accepted",
            ConnectReturnCode::RefusedProtocolVersion => "Connection Refused, unacceptable protocol version",
            ConnectReturnCode::RefusedIdentifierRejected => "Connection Refused, identifier rejected",
            ConnectReturnCode::ServerUnavailable => "Connection Refused, Server unavailable",
            ConnectReturnCode::BadUsernamePassword => "Connection Refused, bad user name or password",
            ConnectReturnCode::NotAuthorized => "Connection Refused, not authorized",
        };

        f.write_str(s)
    }
}

/// One entry of a SUBACK. Granted QoS or 0x80 for a refused subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeReturnCodes {
    Success(QoS),
    Failure,
}

impl SubscribeReturnCodes {
    pub const FAILURE: u8 = 0x80;

    pub fn from_u8(code: u8) -> Option<SubscribeReturnCodes> {
        match code {
            0 => Some(SubscribeReturnCodes::Success(QoS::AtMostOnce)),
            1 => Some(SubscribeReturnCodes::Success(QoS::AtLeastOnce)),
            2 => Some(SubscribeReturnCodes::Success(QoS::ExactlyOnce)),
            SubscribeReturnCodes::FAILURE => Some(SubscribeReturnCodes::Failure),
            _ => None,
        }
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            SubscribeReturnCodes::Success(qos) => *qos as u8,
            SubscribeReturnCodes::Failure => SubscribeReturnCodes::FAILURE,
        }
    }
}

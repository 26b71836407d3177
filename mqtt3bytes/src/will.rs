use crate::QoS;
use bytes::Bytes;

/// Message the server publishes on the client's behalf when the client goes
/// away without a DISCONNECT
#[derive(Debug, Clone, PartialEq)]
pub struct LastWill {
    pub topic: Bytes,
    pub message: Bytes,
    pub qos: QoS,
    pub retain: bool,
}

impl LastWill {
    pub fn new<T: Into<Bytes>, M: Into<Bytes>>(topic: T, message: M, qos: QoS, retain: bool) -> LastWill {
        LastWill {
            topic: topic.into(),
            message: message.into(),
            qos,
            retain,
        }
    }
}

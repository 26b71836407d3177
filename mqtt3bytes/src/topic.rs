use crate::QoS;
use bytes::Bytes;

/// A topic name is valid when it isn't empty and has no wildcard characters.
/// Wildcards are only legal in the filters of SUBSCRIBE and UNSUBSCRIBE
pub fn valid_topic(topic: &[u8]) -> bool {
    !topic.is_empty() && !has_wildcards(topic)
}

pub fn has_wildcards(topic: &[u8]) -> bool {
    topic.iter().any(|c| *c == b'+' || *c == b'#')
}

/// Topic filter and the maximum QoS requested for it
#[derive(Debug, Clone, PartialEq)]
pub struct SubscribeTopic {
    pub topic_path: Bytes,
    pub qos: QoS,
}

impl SubscribeTopic {
    pub fn new<S: Into<Bytes>>(topic_path: S, qos: QoS) -> SubscribeTopic {
        SubscribeTopic {
            topic_path: topic_path.into(),
            qos,
        }
    }
}

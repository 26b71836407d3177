use crate::{
    check_capacity, qos, read_mqtt_bytes, read_u16, read_u8, write_mqtt_bytes, write_u16, write_u8, Error, ErrorKind,
    FixedHeader, PacketType, QoS, SubscribeTopic,
};
use alloc::vec;
use alloc::vec::Vec;
use bytes::Bytes;
use core::fmt;

/// Subscription request for one or more topic filters
#[derive(Clone, PartialEq)]
pub struct Subscribe {
    pub pkid: u16,
    pub topics: Vec<SubscribeTopic>,
}

impl Subscribe {
    pub fn new<S: Into<Bytes>>(topic: S, qos: QoS) -> Subscribe {
        Subscribe {
            pkid: 0,
            topics: vec![SubscribeTopic::new(topic, qos)],
        }
    }

    pub fn empty_subscribe() -> Subscribe {
        Subscribe {
            pkid: 0,
            topics: Vec::new(),
        }
    }

    /// Adds a filter. Adding a filter which is already present only updates its QoS
    pub fn add<S: Into<Bytes>>(&mut self, topic: S, qos: QoS) -> &mut Self {
        let topic = topic.into();
        match self.topics.iter_mut().find(|t| t.topic_path == topic) {
            Some(existing) => existing.qos = qos,
            None => self.topics.push(SubscribeTopic { topic_path: topic, qos }),
        }

        self
    }

    pub fn set_pkid(&mut self, pkid: u16) -> &mut Self {
        self.pkid = pkid;
        self
    }

    fn remaining_len(&self) -> usize {
        // packet identifier + (length prefix + filter + qos) per topic
        2 + self.topics.iter().map(|t| 2 + t.topic_path.len() + 1).sum::<usize>()
    }

    pub fn len(&self) -> usize {
        FixedHeader::new(PacketType::Subscribe, self.remaining_len()).frame_len()
    }

    pub fn decode(src: &Bytes) -> Result<(Subscribe, usize), Error> {
        let (fixed_header, header_len) = FixedHeader::decode_as(src, PacketType::Subscribe)?;
        let end = header_len + fixed_header.remaining_len;
        let src = src.slice(..end);

        let mut total = header_len;
        let pkid = read_u16(&src, total)?;
        if pkid == 0 {
            return Err(ErrorKind::MissingPacketIdentifier.at(total));
        }
        total += 2;

        let mut topics = Vec::new();
        while total < end {
            let (topic_path, n) = read_mqtt_bytes(&src, total)?;
            total += n;

            // upper 6 bits of the requested qos byte are reserved
            let requested_qos = read_u8(&src, total)?;
            let qos = qos(requested_qos).map_err(|e| e.at(total))?;
            total += 1;

            topics.push(SubscribeTopic { topic_path, qos });
        }

        if topics.is_empty() {
            return Err(ErrorKind::EmptyTopicList.at(total));
        }

        Ok((Subscribe { pkid, topics }, end))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        if self.pkid == 0 {
            return Err(ErrorKind::MissingPacketIdentifier.at(0));
        }

        if self.topics.is_empty() {
            return Err(ErrorKind::EmptyTopicList.at(0));
        }

        let fixed_header = FixedHeader::new(PacketType::Subscribe, self.remaining_len());
        check_capacity(dst, fixed_header.frame_len())?;

        let mut total = fixed_header.encode(dst)?;
        total += write_u16(dst, total, self.pkid)?;
        for topic in self.topics.iter() {
            total += write_mqtt_bytes(dst, total, &topic.topic_path)?;
            total += write_u8(dst, total, topic.qos as u8)?;
        }

        Ok(total)
    }
}

impl fmt::Debug for Subscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Filters = {:?}, Packet id = {:?}", self.topics, self.pkid)
    }
}

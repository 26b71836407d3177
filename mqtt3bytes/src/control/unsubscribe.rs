use crate::{
    check_capacity, read_mqtt_bytes, read_u16, write_mqtt_bytes, write_u16, Error, ErrorKind, FixedHeader,
    PacketType,
};
use alloc::vec;
use alloc::vec::Vec;
use bytes::Bytes;

/// Unsubscribe packet
#[derive(Debug, Clone, PartialEq)]
pub struct Unsubscribe {
    pub pkid: u16,
    pub topics: Vec<Bytes>,
}

impl Unsubscribe {
    pub fn new<S: Into<Bytes>>(topic: S) -> Unsubscribe {
        Unsubscribe {
            pkid: 0,
            topics: vec![topic.into()],
        }
    }

    pub fn empty_unsubscribe() -> Unsubscribe {
        Unsubscribe {
            pkid: 0,
            topics: Vec::new(),
        }
    }

    /// Adding a filter which is already in the list does nothing
    pub fn add<S: Into<Bytes>>(&mut self, topic: S) -> &mut Self {
        let topic = topic.into();
        if !self.topics.contains(&topic) {
            self.topics.push(topic);
        }

        self
    }

    pub fn set_pkid(&mut self, pkid: u16) -> &mut Self {
        self.pkid = pkid;
        self
    }

    fn remaining_len(&self) -> usize {
        2 + self.topics.iter().map(|t| 2 + t.len()).sum::<usize>()
    }

    pub fn len(&self) -> usize {
        FixedHeader::new(PacketType::Unsubscribe, self.remaining_len()).frame_len()
    }

    pub fn decode(src: &Bytes) -> Result<(Unsubscribe, usize), Error> {
        let (fixed_header, header_len) = FixedHeader::decode_as(src, PacketType::Unsubscribe)?;
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
            let (topic, n) = read_mqtt_bytes(&src, total)?;
            total += n;
            topics.push(topic);
        }

        if topics.is_empty() {
            return Err(ErrorKind::EmptyTopicList.at(total));
        }

        Ok((Unsubscribe { pkid, topics }, end))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        if self.pkid == 0 {
            return Err(ErrorKind::MissingPacketIdentifier.at(0));
        }

        if self.topics.is_empty() {
            return Err(ErrorKind::EmptyTopicList.at(0));
        }

        let fixed_header = FixedHeader::new(PacketType::Unsubscribe, self.remaining_len());
        check_capacity(dst, fixed_header.frame_len())?;

        let mut total = fixed_header.encode(dst)?;
        total += write_u16(dst, total, self.pkid)?;
        for topic in self.topics.iter() {
            total += write_mqtt_bytes(dst, total, topic)?;
        }

        Ok(total)
    }
}

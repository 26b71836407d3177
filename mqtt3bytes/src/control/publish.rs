use crate::{
    check_capacity, qos, read_mqtt_bytes, read_u16, valid_topic, write_bytes, write_mqtt_bytes, write_u16, Error,
    ErrorKind, FixedHeader, PacketType, QoS,
};
use bytes::Bytes;
use core::fmt;

/// Application message. Dup, qos and retain travel in the fixed header flags
#[derive(Clone, PartialEq)]
pub struct Publish {
    pub dup: bool,
    pub qos: QoS,
    pub retain: bool,
    pub topic: Bytes,
    pub pkid: u16,
    pub payload: Bytes,
}

impl Publish {
    pub fn new<S: Into<Bytes>, P: Into<Bytes>>(topic: S, qos: QoS, payload: P) -> Publish {
        Publish {
            dup: false,
            qos,
            retain: false,
            pkid: 0,
            topic: topic.into(),
            payload: payload.into(),
        }
    }

    pub fn set_pkid(&mut self, pkid: u16) -> &mut Self {
        self.pkid = pkid;
        self
    }

    pub fn set_retain(&mut self, retain: bool) -> &mut Self {
        self.retain = retain;
        self
    }

    pub fn set_dup(&mut self, dup: bool) -> &mut Self {
        self.dup = dup;
        self
    }

    fn flags(&self) -> u8 {
        (self.dup as u8) << 3 | (self.qos as u8) << 1 | self.retain as u8
    }

    fn remaining_len(&self) -> usize {
        let mut len = 2 + self.topic.len() + self.payload.len();
        if self.qos != QoS::AtMostOnce {
            len += 2;
        }

        len
    }

    pub fn len(&self) -> usize {
        FixedHeader::new(PacketType::Publish, self.remaining_len()).frame_len()
    }

    /// The payload has no length prefix, it is whatever is left of the
    /// remaining length after the topic and packet identifier. It may be empty
    pub fn decode(src: &Bytes) -> Result<(Publish, usize), Error> {
        let (fixed_header, header_len) = FixedHeader::decode_as(src, PacketType::Publish)?;
        let end = header_len + fixed_header.remaining_len;
        let src = src.slice(..end);

        let flags = fixed_header.flags;
        let qos = qos((flags >> 1) & 0x03).map_err(|_| ErrorKind::InvalidFlags(flags).at(0))?;
        let dup = (flags & 0b1000) != 0;
        let retain = (flags & 0b0001) != 0;

        let mut total = header_len;
        let (topic, n) = read_mqtt_bytes(&src, total)?;
        if !valid_topic(&topic) {
            return Err(ErrorKind::InvalidTopic.at(total));
        }
        total += n;

        // Packet identifier exists where QoS > 0
        let pkid = match qos {
            QoS::AtMostOnce => 0,
            QoS::AtLeastOnce | QoS::ExactlyOnce => {
                let pkid = read_u16(&src, total)?;
                if pkid == 0 {
                    return Err(ErrorKind::MissingPacketIdentifier.at(total));
                }

                total += 2;
                pkid
            }
        };

        let publish = Publish {
            dup,
            qos,
            retain,
            topic,
            pkid,
            payload: src.slice(total..end),
        };

        Ok((publish, end))
    }

    /// Empty payloads are refused here even though `decode` accepts them
    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        if !valid_topic(&self.topic) {
            return Err(ErrorKind::InvalidTopic.at(0));
        }

        if self.payload.is_empty() {
            return Err(ErrorKind::PayloadRequired.at(0));
        }

        if self.qos != QoS::AtMostOnce && self.pkid == 0 {
            return Err(ErrorKind::MissingPacketIdentifier.at(0));
        }

        // QoS 0 has no packet identifier on the wire
        if self.qos == QoS::AtMostOnce && self.pkid != 0 {
            return Err(ErrorKind::ProtocolViolation.at(0));
        }

        let fixed_header = FixedHeader::with_flags(PacketType::Publish, self.flags(), self.remaining_len());
        check_capacity(dst, fixed_header.frame_len())?;

        let mut total = fixed_header.encode(dst)?;
        total += write_mqtt_bytes(dst, total, &self.topic)?;
        if self.qos != QoS::AtMostOnce {
            total += write_u16(dst, total, self.pkid)?;
        }

        total += write_bytes(dst, total, &self.payload)?;
        Ok(total)
    }
}

impl fmt::Debug for Publish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Topic = {:?}, Qos = {:?}, Retain = {}, Dup = {}, Pkid = {:?}, Payload Size = {}",
            self.topic,
            self.qos,
            self.retain,
            self.dup,
            self.pkid,
            self.payload.len()
        )
    }
}

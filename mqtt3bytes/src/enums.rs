use crate::control::*;
use crate::ConnectReturnCode;
use core::fmt;

/// One decoded (or to be encoded) MQTT 3.1/3.1.1 control packet
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Connect(Connect),
    ConnAck(ConnAck),
    Publish(Publish),
    PubAck(PubAck),
    PubRec(PubRec),
    PubRel(PubRel),
    PubComp(PubComp),
    Subscribe(Subscribe),
    SubAck(SubAck),
    Unsubscribe(Unsubscribe),
    UnsubAck(UnsubAck),
    PingReq,
    PingResp,
    Disconnect,
}

impl Packet {
    /// Blank packet of the given type. Acts as the factory for the closed set of
    /// packet types, fields are the defaults of each packet's constructor
    pub fn new(packet_type: PacketType) -> Packet {
        match packet_type {
            PacketType::Connect => Packet::Connect(Connect::new("")),
            PacketType::ConnAck => Packet::ConnAck(ConnAck::new(ConnectReturnCode::Accepted, false)),
            PacketType::Publish => Packet::Publish(Publish::new("", QoS::AtMostOnce, "")),
            PacketType::PubAck => Packet::PubAck(PubAck::new(0)),
            PacketType::PubRec => Packet::PubRec(PubRec::new(0)),
            PacketType::PubRel => Packet::PubRel(PubRel::new(0)),
            PacketType::PubComp => Packet::PubComp(PubComp::new(0)),
            PacketType::Subscribe => Packet::Subscribe(Subscribe::empty_subscribe()),
            PacketType::SubAck => Packet::SubAck(SubAck::new(0, alloc::vec::Vec::new())),
            PacketType::Unsubscribe => Packet::Unsubscribe(Unsubscribe::empty_unsubscribe()),
            PacketType::UnsubAck => Packet::UnsubAck(UnsubAck::new(0)),
            PacketType::PingReq => Packet::PingReq,
            PacketType::PingResp => Packet::PingResp,
            PacketType::Disconnect => Packet::Disconnect,
        }
    }

    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::Connect(_) => PacketType::Connect,
            Packet::ConnAck(_) => PacketType::ConnAck,
            Packet::Publish(_) => PacketType::Publish,
            Packet::PubAck(_) => PacketType::PubAck,
            Packet::PubRec(_) => PacketType::PubRec,
            Packet::PubRel(_) => PacketType::PubRel,
            Packet::PubComp(_) => PacketType::PubComp,
            Packet::Subscribe(_) => PacketType::Subscribe,
            Packet::SubAck(_) => PacketType::SubAck,
            Packet::Unsubscribe(_) => PacketType::Unsubscribe,
            Packet::UnsubAck(_) => PacketType::UnsubAck,
            Packet::PingReq => PacketType::PingReq,
            Packet::PingResp => PacketType::PingResp,
            Packet::Disconnect => PacketType::Disconnect,
        }
    }

    pub fn name(&self) -> &'static str {
        self.packet_type().name()
    }

    pub fn desc(&self) -> &'static str {
        self.packet_type().desc()
    }

    /// Packet identifier of the packets which carry one. QoS 0 publishes don't
    pub fn pkid(&self) -> Option<u16> {
        match self {
            Packet::Publish(publish) if publish.qos != QoS::AtMostOnce => Some(publish.pkid),
            Packet::PubAck(ack) => Some(ack.pkid),
            Packet::PubRec(ack) => Some(ack.pkid),
            Packet::PubRel(ack) => Some(ack.pkid),
            Packet::PubComp(ack) => Some(ack.pkid),
            Packet::Subscribe(subscribe) => Some(subscribe.pkid),
            Packet::SubAck(suback) => Some(suback.pkid),
            Packet::Unsubscribe(unsubscribe) => Some(unsubscribe.pkid),
            Packet::UnsubAck(ack) => Some(ack.pkid),
            _ => None,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd)]
pub enum QoS {
    AtMostOnce = 0,
    AtLeastOnce = 1,
    ExactlyOnce = 2,
}

/// Protocol name and level pairs this crate speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// MQTT 3.1, protocol name "MQIsdp", level 3
    V31,
    /// MQTT 3.1.1, protocol name "MQTT", level 4
    V311,
}

impl Protocol {
    pub fn from_level(level: u8) -> Option<Protocol> {
        match level {
            3 => Some(Protocol::V31),
            4 => Some(Protocol::V311),
            _ => None,
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Protocol::V31 => 3,
            Protocol::V311 => 4,
        }
    }

    /// Protocol name which must accompany this level in a CONNECT
    pub fn name(&self) -> &'static str {
        match self {
            Protocol::V31 => "MQIsdp",
            Protocol::V311 => "MQTT",
        }
    }
}

/// ```text
///          7                          3                          0
///          +--------------------------+--------------------------+
/// byte 1   | MQTT Control Packet Type | Flags for each type      |
///          +--------------------------+--------------------------+
/// ```
///
/// Types 0 and 15 are reserved and never valid
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    Connect = 1,
    ConnAck,
    Publish,
    PubAck,
    PubRec,
    PubRel,
    PubComp,
    Subscribe,
    SubAck,
    Unsubscribe,
    UnsubAck,
    PingReq,
    PingResp,
    Disconnect,
}

impl PacketType {
    pub fn name(&self) -> &'static str {
        match self {
            PacketType::Connect => "CONNECT",
            PacketType::ConnAck => "CONNACK",
            PacketType::Publish => "PUBLISH",
            PacketType::PubAck => "PUBACK",
            PacketType::PubRec => "PUBREC",
            PacketType::PubRel => "PUBREL",
            PacketType::PubComp => "PUBCOMP",
            PacketType::Subscribe => "SUBSCRIBE",
            PacketType::SubAck => "SUBACK",
            PacketType::Unsubscribe => "UNSUBSCRIBE",
            PacketType::UnsubAck => "UNSUBACK",
            PacketType::PingReq => "PINGREQ",
            PacketType::PingResp => "PINGRESP",
            PacketType::Disconnect => "DISCONNECT",
        }
    }

    pub fn desc(&self) -> &'static str {
        match self {
            PacketType::Connect => "Client request to connect to Server",
            PacketType::ConnAck => "Connect acknowledgement",
            PacketType::Publish => "Publish message",
            PacketType::PubAck => "Publish acknowledgement",
            PacketType::PubRec => "Publish received (assured delivery part 1)",
            PacketType::PubRel => "Publish release (assured delivery part 2)",
            PacketType::PubComp => "Publish complete (assured delivery part 3)",
            PacketType::Subscribe => "Client subscribe request",
            PacketType::SubAck => "Subscribe acknowledgement",
            PacketType::Unsubscribe => "Unsubscribe request",
            PacketType::UnsubAck => "Unsubscribe acknowledgement",
            PacketType::PingReq => "PING request",
            PacketType::PingResp => "PING response",
            PacketType::Disconnect => "Client is disconnecting",
        }
    }

    /// Fixed header flags mandated for this type. PUBLISH carries dup, qos and
    /// retain in these bits instead and only defaults to 0
    pub fn default_flags(&self) -> u8 {
        match self {
            PacketType::PubRel | PacketType::Subscribe | PacketType::Unsubscribe => 0b0010,
            _ => 0,
        }
    }

    /// Whether a packet identifier always follows the fixed header. PUBLISH has
    /// one only when QoS > 0
    pub fn requires_packet_id(&self) -> bool {
        matches!(
            self,
            PacketType::PubAck
                | PacketType::PubRec
                | PacketType::PubRel
                | PacketType::PubComp
                | PacketType::Subscribe
                | PacketType::SubAck
                | PacketType::Unsubscribe
                | PacketType::UnsubAck
        )
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

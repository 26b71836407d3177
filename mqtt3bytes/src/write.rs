use crate::control::*;
use crate::enums::Packet;
use crate::Error;
use bytes::BytesMut;

impl Packet {
    /// Encoded size including the fixed header. Computed from the fields on
    /// every call
    pub fn len(&self) -> usize {
        match self {
            Packet::Connect(packet) => packet.len(),
            Packet::ConnAck(packet) => packet.len(),
            Packet::Publish(packet) => packet.len(),
            Packet::PubAck(packet) => packet.len(),
            Packet::PubRec(packet) => packet.len(),
            Packet::PubRel(packet) => packet.len(),
            Packet::PubComp(packet) => packet.len(),
            Packet::Subscribe(packet) => packet.len(),
            Packet::SubAck(packet) => packet.len(),
            Packet::Unsubscribe(packet) => packet.len(),
            Packet::UnsubAck(packet) => packet.len(),
            Packet::PingReq => PingReq.len(),
            Packet::PingResp => PingResp.len(),
            Packet::Disconnect => Disconnect.len(),
        }
    }

    /// Writes the packet at the start of `dst`. Returns the bytes written
    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        match self {
            Packet::Connect(packet) => packet.encode(dst),
            Packet::ConnAck(packet) => packet.encode(dst),
            Packet::Publish(packet) => packet.encode(dst),
            Packet::PubAck(packet) => packet.encode(dst),
            Packet::PubRec(packet) => packet.encode(dst),
            Packet::PubRel(packet) => packet.encode(dst),
            Packet::PubComp(packet) => packet.encode(dst),
            Packet::Subscribe(packet) => packet.encode(dst),
            Packet::SubAck(packet) => packet.encode(dst),
            Packet::Unsubscribe(packet) => packet.encode(dst),
            Packet::UnsubAck(packet) => packet.encode(dst),
            Packet::PingReq => PingReq.encode(dst),
            Packet::PingResp => PingResp.encode(dst),
            Packet::Disconnect => Disconnect.encode(dst),
        }
    }
}

/// Appends the encoded packet to `stream`. On failure `stream` is left as it was
pub fn mqtt_write(packet: &Packet, stream: &mut BytesMut) -> Result<usize, Error> {
    let start = stream.len();
    stream.resize(start + packet.len(), 0);

    match packet.encode(&mut stream[start..]) {
        Ok(written) => {
            trace!("Wrote {} packet. Len = {}", packet.name(), written);
            Ok(written)
        }
        Err(e) => {
            stream.truncate(start);
            Err(e)
        }
    }
}

#[cfg(test)]
mod test {
    use super::mqtt_write;
    use crate::*;
    use alloc::vec;
    use bytes::BytesMut;
    use pretty_assertions::assert_eq;

    #[test]
    fn packets_are_appended_to_the_stream() {
        let mut stream = BytesMut::new();
        let mut publish = Publish::new("a/b", QoS::AtLeastOnce, "hello");
        publish.set_pkid(1);

        let mut unsubscribe = Unsubscribe::new("a/b");
        unsubscribe.add("c/#").set_pkid(9);

        let packets = vec![
            Packet::Connect(Connect::new("test")),
            Packet::ConnAck(ConnAck::new(ConnectReturnCode::ServerUnavailable, true)),
            Packet::Publish(publish),
            Packet::PubAck(PubAck::new(1)),
            Packet::Unsubscribe(unsubscribe),
            Packet::UnsubAck(UnsubAck::new(5)),
            Packet::SubAck(SubAck::new(3, vec![SubscribeReturnCodes::Failure])),
            Packet::SubAck(SubAck::new(
                4,
                vec![
                    SubscribeReturnCodes::Success(QoS::ExactlyOnce),
                    SubscribeReturnCodes::Success(QoS::AtMostOnce),
                ],
            )),
            Packet::PingReq,
            Packet::Disconnect,
        ];

        let mut total = 0;
        for packet in packets.iter() {
            let written = mqtt_write(packet, &mut stream).unwrap();
            assert_eq!(written, packet.len());
            total += written;
        }
        assert_eq!(stream.len(), total);

        let frames = stream.clone().freeze();
        let mut at = 0;
        for packet in packets.iter() {
            let (decoded, consumed) = Packet::decode(&frames.slice(at..)).unwrap();
            assert_eq!(&decoded, packet);
            assert_eq!(consumed, packet.len());
            at += consumed;
        }
        assert_eq!(at, total);

        for packet in packets.iter() {
            assert_eq!(mqtt_read(&mut stream, 1024).unwrap().as_ref(), Some(packet));
        }
        assert!(stream.is_empty());
    }

    #[test]
    fn failed_writes_leave_the_stream_untouched() {
        let mut stream = BytesMut::from(&b"\xC0\x00"[..]);
        let packet = Packet::Publish(Publish::new("a/#", QoS::AtMostOnce, "x"));

        let err = mqtt_write(&packet, &mut stream).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTopic);
        assert_eq!(&stream[..], b"\xC0\x00");
    }
}

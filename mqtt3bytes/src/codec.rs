use crate::{mqtt_read, mqtt_write, Error, Packet, MAX_REMAINING_LENGTH};
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Mqtt = {0}")]
    Mqtt(#[from] Error),
    #[error("Io = {0}")]
    Io(#[from] std::io::Error),
}

/// Frames `Packet`s on a byte stream. Pair it with `tokio_util::codec::Framed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MqttCodec {
    max_packet_size: usize,
}

impl MqttCodec {
    /// Packets with a remaining length above `max_packet_size` are refused
    /// with `PayloadTooLarge` before their body is buffered
    pub fn new(max_packet_size: usize) -> MqttCodec {
        MqttCodec { max_packet_size }
    }

    pub fn max_packet_size(&self) -> usize {
        self.max_packet_size
    }
}

impl Default for MqttCodec {
    fn default() -> Self {
        MqttCodec::new(MAX_REMAINING_LENGTH)
    }
}

impl Decoder for MqttCodec {
    type Item = Packet;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Packet>, CodecError> {
        let packet = mqtt_read(src, self.max_packet_size)?;
        Ok(packet)
    }
}

impl Encoder<Packet> for MqttCodec {
    type Error = CodecError;

    fn encode(&mut self, packet: Packet, dst: &mut BytesMut) -> Result<(), CodecError> {
        mqtt_write(&packet, dst)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::*;
    use bytes::BytesMut;
    use pretty_assertions::assert_eq;
    use tokio_util::codec::{Decoder, Encoder};

    #[test]
    fn codec_frames_packets() {
        let mut codec = MqttCodec::default();
        assert_eq!(codec.max_packet_size(), MAX_REMAINING_LENGTH);

        let mut buf = BytesMut::new();
        let subscribe = {
            let mut subscribe = Subscribe::new("a/+", QoS::AtLeastOnce);
            subscribe.set_pkid(42);
            Packet::Subscribe(subscribe)
        };

        codec.encode(subscribe.clone(), &mut buf).unwrap();
        codec.encode(Packet::PingResp, &mut buf).unwrap();

        let mut partial = buf.split_to(3);
        assert_eq!(codec.decode(&mut partial).unwrap(), None);

        partial.unsplit(buf);
        assert_eq!(codec.decode(&mut partial).unwrap(), Some(subscribe));
        assert_eq!(codec.decode(&mut partial).unwrap(), Some(Packet::PingResp));
        assert_eq!(codec.decode(&mut partial).unwrap(), None);
    }

    #[test]
    fn codec_surfaces_decode_errors() {
        let mut codec = MqttCodec::new(16);
        let mut buf = BytesMut::from(&[0x30, 0x20][..]);
        match codec.decode(&mut buf) {
            Err(CodecError::Mqtt(e)) => assert_eq!(e.kind, ErrorKind::PayloadTooLarge),
            v => panic!("Expected payload too large. Got = {:?}", v),
        }

        let mut buf = BytesMut::from(&[0x00, 0x00][..]);
        match codec.decode(&mut buf) {
            Err(CodecError::Mqtt(e)) => assert_eq!(e.kind, ErrorKind::InvalidPacketType(0)),
            v => panic!("Expected invalid packet type. Got = {:?}", v),
        }
    }
}

use crate::{decode_packet_id_only, encode_packet_id_only, packet_id_only_len, Error, PacketType};
use bytes::Bytes;

/// Acknowledgement of an UNSUBSCRIBE
#[derive(Debug, Clone, PartialEq)]
pub struct UnsubAck {
    pub pkid: u16,
}

impl UnsubAck {
    pub fn new(pkid: u16) -> UnsubAck {
        UnsubAck { pkid }
    }

    pub fn len(&self) -> usize {
        packet_id_only_len()
    }

    pub fn decode(src: &Bytes) -> Result<(UnsubAck, usize), Error> {
        let (pkid, consumed) = decode_packet_id_only(src, PacketType::UnsubAck)?;
        Ok((UnsubAck { pkid }, consumed))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        encode_packet_id_only(PacketType::UnsubAck, self.pkid, dst)
    }
}

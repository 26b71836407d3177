use crate::{decode_packet_id_only, encode_packet_id_only, packet_id_only_len, Error, PacketType};
use bytes::Bytes;

/// Release of a QoS 2 publish, answers a PUBREC. Assured delivery part 2
#[derive(Debug, Clone, PartialEq)]
pub struct PubRel {
    pub pkid: u16,
}

impl PubRel {
    pub fn new(pkid: u16) -> PubRel {
        PubRel { pkid }
    }

    pub fn len(&self) -> usize {
        packet_id_only_len()
    }

    pub fn decode(src: &Bytes) -> Result<(PubRel, usize), Error> {
        let (pkid, consumed) = decode_packet_id_only(src, PacketType::PubRel)?;
        Ok((PubRel { pkid }, consumed))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        encode_packet_id_only(PacketType::PubRel, self.pkid, dst)
    }
}

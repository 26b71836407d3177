use crate::{decode_packet_id_only, encode_packet_id_only, packet_id_only_len, Error, PacketType};
use bytes::Bytes;

/// Completes the QoS 2 exchange, answers a PUBREL. Assured delivery part 3
#[derive(Debug, Clone, PartialEq)]
pub struct PubComp {
    pub pkid: u16,
}

impl PubComp {
    pub fn new(pkid: u16) -> PubComp {
        PubComp { pkid }
    }

    pub fn len(&self) -> usize {
        packet_id_only_len()
    }

    pub fn decode(src: &Bytes) -> Result<(PubComp, usize), Error> {
        let (pkid, consumed) = decode_packet_id_only(src, PacketType::PubComp)?;
        Ok((PubComp { pkid }, consumed))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        encode_packet_id_only(PacketType::PubComp, self.pkid, dst)
    }
}

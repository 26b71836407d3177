use crate::{decode_packet_id_only, encode_packet_id_only, packet_id_only_len, Error, PacketType};
use bytes::Bytes;

/// Received acknowledgement of a QoS 2 publish. Assured delivery part 1
#[derive(Debug, Clone, PartialEq)]
pub struct PubRec {
    pub pkid: u16,
}

impl PubRec {
    pub fn new(pkid: u16) -> PubRec {
        PubRec { pkid }
    }

    pub fn len(&self) -> usize {
        packet_id_only_len()
    }

    pub fn decode(src: &Bytes) -> Result<(PubRec, usize), Error> {
        let (pkid, consumed) = decode_packet_id_only(src, PacketType::PubRec)?;
        Ok((PubRec { pkid }, consumed))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        encode_packet_id_only(PacketType::PubRec, self.pkid, dst)
    }
}

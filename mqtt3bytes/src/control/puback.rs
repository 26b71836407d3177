use crate::{check_capacity, read_u16, write_u16, Error, ErrorKind, FixedHeader, PacketType};
use bytes::Bytes;

/// Acknowledgement of a QoS 1 publish
#[derive(Debug, Clone, PartialEq)]
pub struct PubAck {
    pub pkid: u16,
}

impl PubAck {
    pub fn new(pkid: u16) -> PubAck {
        PubAck { pkid }
    }

    pub fn len(&self) -> usize {
        packet_id_only_len()
    }

    pub fn decode(src: &Bytes) -> Result<(PubAck, usize), Error> {
        let (pkid, consumed) = decode_packet_id_only(src, PacketType::PubAck)?;
        Ok((PubAck { pkid }, consumed))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        encode_packet_id_only(PacketType::PubAck, self.pkid, dst)
    }
}

// PUBACK, PUBREC, PUBREL, PUBCOMP and UNSUBACK share this wire shape. The
// packet type alone tells them apart

pub(crate) fn packet_id_only_len() -> usize {
    4
}

pub(crate) fn decode_packet_id_only(src: &Bytes, packet_type: PacketType) -> Result<(u16, usize), Error> {
    let (fixed_header, header_len) = FixedHeader::decode_as(src, packet_type)?;
    if fixed_header.remaining_len != 2 {
        return Err(ErrorKind::IncorrectPacketFormat.at(header_len));
    }

    let pkid = read_u16(src, header_len)?;
    Ok((pkid, header_len + 2))
}

pub(crate) fn encode_packet_id_only(packet_type: PacketType, pkid: u16, dst: &mut [u8]) -> Result<usize, Error> {
    check_capacity(dst, packet_id_only_len())?;
    let fixed_header = FixedHeader::new(packet_type, 2);
    let mut total = fixed_header.encode(dst)?;
    total += write_u16(dst, total, pkid)?;
    Ok(total)
}

use crate::{check_capacity, Error, ErrorKind, FixedHeader, PacketType};
use bytes::Bytes;

/// Final packet from the client, it is disconnecting cleanly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disconnect;

impl Disconnect {
    pub fn len(&self) -> usize {
        empty_len()
    }

    pub fn decode(src: &Bytes) -> Result<(Disconnect, usize), Error> {
        let consumed = decode_empty(src, PacketType::Disconnect)?;
        Ok((Disconnect, consumed))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        encode_empty(PacketType::Disconnect, dst)
    }
}

// PINGREQ, PINGRESP and DISCONNECT are a bare fixed header with no variable
// header or payload

pub(crate) fn empty_len() -> usize {
    2
}

pub(crate) fn decode_empty(src: &Bytes, packet_type: PacketType) -> Result<usize, Error> {
    let (fixed_header, header_len) = FixedHeader::decode_as(src, packet_type)?;
    if fixed_header.remaining_len != 0 {
        return Err(ErrorKind::IncorrectPacketFormat.at(header_len));
    }

    Ok(header_len)
}

pub(crate) fn encode_empty(packet_type: PacketType, dst: &mut [u8]) -> Result<usize, Error> {
    check_capacity(dst, empty_len())?;
    FixedHeader::new(packet_type, 0).encode(dst)
}

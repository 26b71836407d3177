use crate::{decode_empty, empty_len, encode_empty, Error, PacketType};
use bytes::Bytes;

/// Keep alive ping from the client
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingReq;

impl PingReq {
    pub fn len(&self) -> usize {
        empty_len()
    }

    pub fn decode(src: &Bytes) -> Result<(PingReq, usize), Error> {
        let consumed = decode_empty(src, PacketType::PingReq)?;
        Ok((PingReq, consumed))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        encode_empty(PacketType::PingReq, dst)
    }
}

/// Server's answer to a PINGREQ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingResp;

impl PingResp {
    pub fn len(&self) -> usize {
        empty_len()
    }

    pub fn decode(src: &Bytes) -> Result<(PingResp, usize), Error> {
        let consumed = decode_empty(src, PacketType::PingResp)?;
        Ok((PingResp, consumed))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        encode_empty(PacketType::PingResp, dst)
    }
}

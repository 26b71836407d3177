use crate::control::*;
use crate::enums::Packet;
use crate::header::check_byte1;
use crate::{read_variable_length, Error, ErrorKind, FixedHeader, PacketType};
use bytes::{Bytes, BytesMut};

impl Packet {
    /// Decodes the packet at the start of `src`. The fixed header picks the
    /// body decoder. Returns the packet and the bytes it occupied, anything
    /// after that is left alone
    pub fn decode(src: &Bytes) -> Result<(Packet, usize), Error> {
        let (fixed_header, _) = FixedHeader::decode(src)?;
        let (packet, consumed) = match fixed_header.packet_type {
            PacketType::Connect => Connect::decode(src).map(|(p, n)| (Packet::Connect(p), n))?,
            PacketType::ConnAck => ConnAck::decode(src).map(|(p, n)| (Packet::ConnAck(p), n))?,
            PacketType::Publish => Publish::decode(src).map(|(p, n)| (Packet::Publish(p), n))?,
            PacketType::PubAck => PubAck::decode(src).map(|(p, n)| (Packet::PubAck(p), n))?,
            PacketType::PubRec => PubRec::decode(src).map(|(p, n)| (Packet::PubRec(p), n))?,
            PacketType::PubRel => PubRel::decode(src).map(|(p, n)| (Packet::PubRel(p), n))?,
            PacketType::PubComp => PubComp::decode(src).map(|(p, n)| (Packet::PubComp(p), n))?,
            PacketType::Subscribe => Subscribe::decode(src).map(|(p, n)| (Packet::Subscribe(p), n))?,
            PacketType::SubAck => SubAck::decode(src).map(|(p, n)| (Packet::SubAck(p), n))?,
            PacketType::Unsubscribe => Unsubscribe::decode(src).map(|(p, n)| (Packet::Unsubscribe(p), n))?,
            PacketType::UnsubAck => UnsubAck::decode(src).map(|(p, n)| (Packet::UnsubAck(p), n))?,
            PacketType::PingReq => PingReq::decode(src).map(|(_, n)| (Packet::PingReq, n))?,
            PacketType::PingResp => PingResp::decode(src).map(|(_, n)| (Packet::PingResp, n))?,
            PacketType::Disconnect => Disconnect::decode(src).map(|(_, n)| (Packet::Disconnect, n))?,
        };

        Ok((packet, consumed))
    }
}

/// Reads the next packet off a stream buffer. `Ok(None)` means the buffer
/// doesn't hold a complete packet yet and more bytes should be read into it.
/// A complete packet is split off the front of `stream` and decoded
pub fn mqtt_read(stream: &mut BytesMut, max_packet_size: usize) -> Result<Option<Packet>, Error> {
    // Read the initial bytes necessary from the stream with out mutating the stream cursor
    let (header_len, remaining_len) = match parse_fixed_header(stream)? {
        Some(v) => v,
        None => return Ok(None),
    };

    // Don't let rogue connections attack with huge payloads. Disconnect them before reading all
    // that data
    if remaining_len > max_packet_size {
        debug!(
            "Packet too large. Remaining len = {}, Max = {}",
            remaining_len, max_packet_size
        );
        return Err(ErrorKind::PayloadTooLarge.at(1));
    }

    // If the current call fails due to insufficient bytes in the stream, after calculating
    // remaining length, we extend the stream
    let len = header_len + remaining_len;
    if stream.len() < len {
        trace!("Partial packet. Need = {}, Have = {}", len, stream.len());
        stream.reserve(len - stream.len());
        return Ok(None);
    }

    let frame = stream.split_to(len).freeze();
    let (packet, _) = Packet::decode(&frame).map_err(|e| {
        debug!("Malformed {:#04x} packet. Error = {:?}", frame[0], e);
        e
    })?;

    trace!("Read {} packet. Len = {}", packet.name(), len);
    Ok(Some(packet))
}

/// Header and remaining length, once enough of the stream is in to know them.
/// The remaining length may still be short of a terminator when fewer than 4
/// of its bytes have arrived. A bad type or flags byte fails straight away
fn parse_fixed_header(stream: &[u8]) -> Result<Option<(usize, usize)>, Error> {
    let byte1 = match stream.first() {
        Some(byte1) => *byte1,
        None => return Ok(None),
    };

    check_byte1(byte1)?;

    let length_bytes = &stream[1..];
    let terminated = length_bytes.iter().take(4).any(|byte| byte & 0x80 == 0);
    if !terminated && length_bytes.len() < 4 {
        return Ok(None);
    }

    let (remaining_len, len) = read_variable_length(stream, 1)?;
    Ok(Some((1 + len, remaining_len)))
}

use crate::{
    packet_type, read_variable_length, variable_length_len, write_variable_length, Error, ErrorKind, PacketType,
    MAX_REMAINING_LENGTH,
};

/// Packet type, flags and remaining length. The first 2 - 5 bytes of every packet
///
/// ```text
///          7                          3                          0
///          +--------------------------+--------------------------+
/// byte 1   | MQTT Control Packet Type | Flags for each type      |
///          +--------------------------+--------------------------+
///          |         Remaining Bytes Len  (1 - 4 bytes)          |
///          +-----------------------------------------------------+
/// ```
///
/// http://docs.oasis-open.org/mqtt/mqtt/v3.1.1/os/mqtt-v3.1.1-os.html#_Toc398718020
///
/// A header is built fresh for every decode and encode. Packet identifiers are
/// not part of it, the packet bodies own them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHeader {
    pub packet_type: PacketType,
    pub flags: u8,
    pub remaining_len: usize,
}

impl FixedHeader {
    /// Header with the default flags of `packet_type`
    pub fn new(packet_type: PacketType, remaining_len: usize) -> FixedHeader {
        FixedHeader {
            packet_type,
            flags: packet_type.default_flags(),
            remaining_len,
        }
    }

    pub fn with_flags(packet_type: PacketType, flags: u8, remaining_len: usize) -> FixedHeader {
        FixedHeader {
            packet_type,
            flags,
            remaining_len,
        }
    }

    pub fn byte1(&self) -> u8 {
        (self.packet_type as u8) << 4 | (self.flags & 0x0F)
    }

    /// Length of the header itself
    pub fn len(&self) -> usize {
        1 + variable_length_len(self.remaining_len)
    }

    /// Length of the whole packet this header frames
    pub fn frame_len(&self) -> usize {
        self.len() + self.remaining_len
    }

    /// Decodes the header at the start of `src`. The type comes solely from the
    /// first byte. Fails when the remaining length claims more bytes than `src`
    /// holds after the header. Returns the header and its own length
    pub fn decode(src: &[u8]) -> Result<(FixedHeader, usize), Error> {
        let byte1 = match src.first() {
            Some(byte1) => *byte1,
            None => return Err(ErrorKind::TruncatedBuffer.at(0)),
        };

        let packet_type = check_byte1(byte1)?;
        let flags = byte1 & 0x0F;

        let (remaining_len, len) = read_variable_length(src, 1)?;
        let header_len = 1 + len;
        if remaining_len > src.len() - header_len {
            return Err(ErrorKind::TruncatedBuffer.at(header_len));
        }

        let header = FixedHeader {
            packet_type,
            flags,
            remaining_len,
        };

        Ok((header, header_len))
    }

    /// Decodes the header and checks it frames a packet of type `expected`
    pub(crate) fn decode_as(src: &[u8], expected: PacketType) -> Result<(FixedHeader, usize), Error> {
        let (header, header_len) = FixedHeader::decode(src)?;
        if header.packet_type != expected {
            return Err(ErrorKind::InvalidPacketType(header.packet_type as u8).at(0));
        }

        Ok((header, header_len))
    }

    /// Writes the header at the start of `dst`. Returns the bytes written
    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        check_flags(self.packet_type, self.flags).map_err(|e| e.at(0))?;
        if self.remaining_len > MAX_REMAINING_LENGTH {
            return Err(ErrorKind::MalformedLength.at(1));
        }

        let len = self.len();
        if dst.len() < len {
            return Err(ErrorKind::BufferTooSmall(len).at(0));
        }

        dst[0] = self.byte1();
        let n = write_variable_length(dst, 1, self.remaining_len)?;
        Ok(1 + n)
    }
}

/// Packet type of a header's first byte once its flags are checked against it
pub(crate) fn check_byte1(byte1: u8) -> Result<PacketType, Error> {
    let packet_type = packet_type(byte1 >> 4).map_err(|e| e.at(0))?;
    check_flags(packet_type, byte1 & 0x0F).map_err(|e| e.at(0))?;
    Ok(packet_type)
}

/// Every type but PUBLISH has fixed flags. PUBLISH flags are dup, qos and retain
/// where qos 3 is illegal
fn check_flags(packet_type: PacketType, flags: u8) -> Result<(), ErrorKind> {
    match packet_type {
        PacketType::Publish if (flags >> 1) & 0x03 == 3 => Err(ErrorKind::InvalidFlags(flags)),
        PacketType::Publish => Ok(()),
        _ if flags != packet_type.default_flags() => Err(ErrorKind::InvalidFlags(flags)),
        _ => Ok(()),
    }
}

mod connack;
mod connect;
mod disconnect;
mod ping;
mod puback;
mod pubcomp;
mod publish;
mod pubrec;
mod pubrel;
mod suback;
mod subscribe;
mod unsuback;
mod unsubscribe;

// Re-Exports
pub use self::connack::*;
pub use self::connect::*;
pub use self::disconnect::*;
pub use self::ping::*;
pub use self::puback::*;
pub use self::pubcomp::*;
pub use self::publish::*;
pub use self::pubrec::*;
pub use self::pubrel::*;
pub use self::suback::*;
pub use self::subscribe::*;
pub use self::unsuback::*;
pub use self::unsubscribe::*;

use crate::{Error, ErrorKind, QoS};
use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

/// Largest value the remaining length field can carry (256 MB)
pub const MAX_REMAINING_LENGTH: usize = 268_435_455;

/// Largest length prefixed string or binary field
pub const MAX_MQTT_BYTES_LENGTH: usize = 65_535;

pub(crate) fn qos(num: u8) -> Result<QoS, ErrorKind> {
    match num {
        0 => Ok(QoS::AtMostOnce),
        1 => Ok(QoS::AtLeastOnce),
        2 => Ok(QoS::ExactlyOnce),
        qos => Err(ErrorKind::InvalidQoS(qos)),
    }
}

/// Decodes the variable byte integer starting at `at`.
/// Returns the value and the number of bytes it occupied (1 - 4).
///
/// Each byte carries 7 bits of the value, least significant group first. The high
/// bit marks that another byte follows. A 5th byte or running out of input before
/// the terminating byte are both malformed lengths
pub fn read_variable_length(src: &[u8], at: usize) -> Result<(usize, usize), Error> {
    let mut value = 0;
    let mut shift = 0;

    for i in 0..4 {
        let byte = match src.get(at + i) {
            Some(byte) => *byte,
            None => return Err(ErrorKind::MalformedLength.at(at + i)),
        };

        value += ((byte & 0x7F) as usize) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }

        shift += 7;
    }

    Err(ErrorKind::MalformedLength.at(at + 4))
}

/// Encodes `value` as a variable byte integer at `dst[at..]`.
/// Returns the number of bytes written
pub fn write_variable_length(dst: &mut [u8], at: usize, mut value: usize) -> Result<usize, Error> {
    if value > MAX_REMAINING_LENGTH {
        return Err(ErrorKind::MalformedLength.at(at));
    }

    let len = variable_length_len(value);
    if dst.len() < at + len {
        return Err(ErrorKind::BufferTooSmall(at + len).at(at));
    }

    for slot in dst[at..at + len].iter_mut() {
        let mut byte = (value % 128) as u8;
        value /= 128;
        if value > 0 {
            byte |= 0x80;
        }

        *slot = byte;
    }

    Ok(len)
}

/// Number of bytes `value` occupies as a variable byte integer
pub fn variable_length_len(value: usize) -> usize {
    if value >= 2_097_152 {
        4
    } else if value >= 16_384 {
        3
    } else if value >= 128 {
        2
    } else {
        1
    }
}

pub(crate) fn read_u8(src: &[u8], at: usize) -> Result<u8, Error> {
    match src.get(at) {
        Some(byte) => Ok(*byte),
        None => Err(ErrorKind::TruncatedBuffer.at(at)),
    }
}

pub(crate) fn read_u16(src: &[u8], at: usize) -> Result<u16, Error> {
    match src.get(at..at + 2) {
        Some(bytes) => Ok(BigEndian::read_u16(bytes)),
        None => Err(ErrorKind::TruncatedBuffer.at(at)),
    }
}

/// Reads a 2 byte length prefix followed by that many bytes. The returned `Bytes`
/// is a view into `src`, no copy is made. Also returns the bytes consumed
/// including the prefix
pub fn read_mqtt_bytes(src: &Bytes, at: usize) -> Result<(Bytes, usize), Error> {
    let len = read_u16(src, at)? as usize;
    let start = at + 2;
    // Invalid packets which reached this point should not cause the slice to
    // cross the packet boundary
    if start + len > src.len() {
        return Err(ErrorKind::TruncatedBuffer.at(start));
    }

    Ok((src.slice(start..start + len), 2 + len))
}

pub(crate) fn write_u8(dst: &mut [u8], at: usize, value: u8) -> Result<usize, Error> {
    match dst.get_mut(at) {
        Some(slot) => {
            *slot = value;
            Ok(1)
        }
        None => Err(ErrorKind::BufferTooSmall(at + 1).at(at)),
    }
}

pub(crate) fn write_u16(dst: &mut [u8], at: usize, value: u16) -> Result<usize, Error> {
    match dst.get_mut(at..at + 2) {
        Some(slot) => {
            BigEndian::write_u16(slot, value);
            Ok(2)
        }
        None => Err(ErrorKind::BufferTooSmall(at + 2).at(at)),
    }
}

/// Writes `value` with its 2 byte big endian length prefix at `dst[at..]`.
/// Returns the number of bytes written
pub fn write_mqtt_bytes(dst: &mut [u8], at: usize, value: &[u8]) -> Result<usize, Error> {
    let len = value.len();
    if len > MAX_MQTT_BYTES_LENGTH {
        return Err(ErrorKind::PayloadTooLarge.at(at));
    }

    if dst.len() < at + 2 + len {
        return Err(ErrorKind::BufferTooSmall(at + 2 + len).at(at));
    }

    BigEndian::write_u16(&mut dst[at..at + 2], len as u16);
    dst[at + 2..at + 2 + len].copy_from_slice(value);
    Ok(2 + len)
}

/// Writes raw bytes without a length prefix
pub(crate) fn write_bytes(dst: &mut [u8], at: usize, value: &[u8]) -> Result<usize, Error> {
    match dst.get_mut(at..at + value.len()) {
        Some(slot) => {
            slot.copy_from_slice(value);
            Ok(value.len())
        }
        None => Err(ErrorKind::BufferTooSmall(at + value.len()).at(at)),
    }
}

/// Fails early with `BufferTooSmall` when `dst` can't hold `len` bytes
pub(crate) fn check_capacity(dst: &[u8], len: usize) -> Result<(), Error> {
    if dst.len() < len {
        return Err(ErrorKind::BufferTooSmall(len).at(0));
    }

    Ok(())
}

use crate::{check_capacity, read_u8, write_u8, ConnectReturnCode, Error, ErrorKind, FixedHeader, PacketType};
use bytes::Bytes;

/// Server's answer to a CONNECT. First packet the server sends
#[derive(Debug, Clone, PartialEq)]
pub struct ConnAck {
    pub session_present: bool,
    pub code: ConnectReturnCode,
}

impl ConnAck {
    pub fn new(code: ConnectReturnCode, session_present: bool) -> ConnAck {
        ConnAck { code, session_present }
    }

    pub fn len(&self) -> usize {
        4
    }

    pub fn decode(src: &Bytes) -> Result<(ConnAck, usize), Error> {
        let (fixed_header, header_len) = FixedHeader::decode_as(src, PacketType::ConnAck)?;
        if fixed_header.remaining_len != 2 {
            return Err(ErrorKind::IncorrectPacketFormat.at(header_len));
        }

        // bits 7 - 1 of the acknowledge flags are reserved
        let mut total = header_len;
        let flags = read_u8(src, total)?;
        if flags & 0xFE != 0 {
            return Err(ErrorKind::ProtocolViolation.at(total));
        }
        total += 1;

        let return_code = read_u8(src, total)?;
        let code = match ConnectReturnCode::from_u8(return_code) {
            Some(code) => code,
            None => return Err(ErrorKind::InvalidReturnCode(return_code).at(total)),
        };
        total += 1;

        let connack = ConnAck {
            session_present: flags == 0x01,
            code,
        };

        Ok((connack, total))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        check_capacity(dst, self.len())?;

        let mut total = FixedHeader::new(PacketType::ConnAck, 2).encode(dst)?;
        total += write_u8(dst, total, self.session_present as u8)?;
        total += write_u8(dst, total, self.code as u8)?;
        Ok(total)
    }
}

#[cfg(test)]
mod test {
    use crate::*;
    use bytes::{Bytes, BytesMut};
    use pretty_assertions::assert_eq;

    #[test]
    fn connack_stitching_works_correctly() {
        let mut stream = BytesMut::new();
        let packet_stream = &[
            0b0010_0000,
            0x02, // packet type, flags and remaining len
            0x01,
            0x00, // variable header. connack flags, return code
            0xDE,
            0xAD,
            0xBE,
            0xEF, // extra packets in the stream
        ];

        stream.extend_from_slice(&packet_stream[..]);
        let (packet, consumed) = ConnAck::decode(&stream.freeze()).unwrap();
        assert_eq!(consumed, 4);
        assert_eq!(
            packet,
            ConnAck {
                session_present: true,
                code: ConnectReturnCode::Accepted,
            }
        );
    }

    #[test]
    fn connack_return_code_above_5_is_rejected() {
        let stream = Bytes::from_static(&[0x20, 0x02, 0x00, 0x06]);
        let err = ConnAck::decode(&stream).unwrap_err();
        assert_eq!(err, Error::new(ErrorKind::InvalidReturnCode(6), 3));
    }

    #[test]
    fn connack_reserved_flag_bits_must_be_zero() {
        let stream = Bytes::from_static(&[0x20, 0x02, 0x02, 0x00]);
        let err = ConnAck::decode(&stream).unwrap_err();
        assert_eq!(err, Error::new(ErrorKind::ProtocolViolation, 2));
    }

    #[test]
    fn connack_is_encoded_as_expected() {
        let mut dst = [0u8; 4];
        let connack = ConnAck::new(ConnectReturnCode::NotAuthorized, false);
        assert_eq!(connack.encode(&mut dst).unwrap(), 4);
        assert_eq!(dst, [0x20, 0x02, 0x00, 0x05]);

        let (decoded, _) = ConnAck::decode(&Bytes::copy_from_slice(&dst)).unwrap();
        assert_eq!(decoded, connack);
    }
}

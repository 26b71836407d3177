use crate::{
    check_capacity, read_u16, read_u8, write_u16, write_u8, Error, ErrorKind, FixedHeader, PacketType,
    SubscribeReturnCodes,
};
use alloc::vec::Vec;
use bytes::Bytes;

/// Acknowledgement to subscribe. Return codes are in the order of the filters
/// of the SUBSCRIBE being answered
#[derive(Debug, Clone, PartialEq)]
pub struct SubAck {
    pub pkid: u16,
    pub return_codes: Vec<SubscribeReturnCodes>,
}

impl SubAck {
    pub fn new(pkid: u16, return_codes: Vec<SubscribeReturnCodes>) -> SubAck {
        SubAck { pkid, return_codes }
    }

    fn remaining_len(&self) -> usize {
        2 + self.return_codes.len()
    }

    pub fn len(&self) -> usize {
        FixedHeader::new(PacketType::SubAck, self.remaining_len()).frame_len()
    }

    pub fn decode(src: &Bytes) -> Result<(SubAck, usize), Error> {
        let (fixed_header, header_len) = FixedHeader::decode_as(src, PacketType::SubAck)?;
        if fixed_header.remaining_len < 2 {
            return Err(ErrorKind::IncorrectPacketFormat.at(header_len));
        }

        let end = header_len + fixed_header.remaining_len;
        let mut total = header_len;
        let pkid = read_u16(src, total)?;
        total += 2;

        let mut return_codes = Vec::with_capacity(end - total);
        while total < end {
            let code = read_u8(src, total)?;
            match SubscribeReturnCodes::from_u8(code) {
                Some(code) => return_codes.push(code),
                None => return Err(ErrorKind::InvalidReturnCode(code).at(total)),
            }

            total += 1;
        }

        Ok((SubAck { pkid, return_codes }, end))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        let fixed_header = FixedHeader::new(PacketType::SubAck, self.remaining_len());
        check_capacity(dst, fixed_header.frame_len())?;

        let mut total = fixed_header.encode(dst)?;
        total += write_u16(dst, total, self.pkid)?;
        for code in self.return_codes.iter() {
            total += write_u8(dst, total, code.to_u8())?;
        }

        Ok(total)
    }
}

#[cfg(test)]
mod test {
    use crate::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn suback_stitching_works_correctly() {
        let stream = &[
            0x90,
            5, // packet type, flags and remaining len
            0x00,
            0x0F, // variable header. pkid = 15
            0x00,
            0x01,
            0x80, // payload. return codes [qos 0, qos 1, failure]
            0xDE,
            0xAD,
            0xBE,
            0xEF, // extra packets in the stream
        ];
        let stream = Bytes::from(&stream[..]);

        let (packet, consumed) = SubAck::decode(&stream).unwrap();
        assert_eq!(consumed, 7);
        assert_eq!(
            packet,
            SubAck {
                pkid: 15,
                return_codes: vec![
                    SubscribeReturnCodes::Success(QoS::AtMostOnce),
                    SubscribeReturnCodes::Success(QoS::AtLeastOnce),
                    SubscribeReturnCodes::Failure,
                ],
            }
        );
    }

    #[test]
    fn suback_answers_subscribe_in_order() {
        let mut subscribe = Subscribe::new("a/b", QoS::AtMostOnce);
        subscribe.add("c/d", QoS::AtLeastOnce).add("e/#", QoS::ExactlyOnce).set_pkid(7);

        let stream = Bytes::from_static(&[0x90, 0x05, 0x00, 0x07, 0x00, 0x01, 0x80]);
        let (suback, _) = SubAck::decode(&stream).unwrap();
        assert_eq!(suback.pkid, subscribe.pkid);
        assert_eq!(suback.return_codes.len(), subscribe.topics.len());

        let granted: Vec<u8> = suback.return_codes.iter().map(|c| c.to_u8()).collect();
        assert_eq!(granted, vec![0x00, 0x01, 0x80]);
    }

    #[test]
    fn suback_return_codes_outside_the_legal_set_are_rejected() {
        let stream = Bytes::from_static(&[0x90, 0x04, 0x00, 0x01, 0x02, 0x03]);
        let err = SubAck::decode(&stream).unwrap_err();
        assert_eq!(err, Error::new(ErrorKind::InvalidReturnCode(3), 5));

        let stream = Bytes::from_static(&[0x90, 0x03, 0x00, 0x01, 0x81]);
        let err = SubAck::decode(&stream).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidReturnCode(0x81));
    }

    #[test]
    fn suback_is_encoded_as_expected() {
        let suback = SubAck::new(
            0x0102,
            vec![SubscribeReturnCodes::Success(QoS::ExactlyOnce), SubscribeReturnCodes::Failure],
        );

        let mut dst = vec![0u8; suback.len()];
        assert_eq!(suback.encode(&mut dst).unwrap(), 6);
        assert_eq!(dst, vec![0x90, 0x04, 0x01, 0x02, 0x02, 0x80]);
    }
}

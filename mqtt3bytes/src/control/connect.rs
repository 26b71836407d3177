use crate::{
    check_capacity, qos, read_mqtt_bytes, read_u16, read_u8, write_mqtt_bytes, write_u16, write_u8, Error,
    ErrorKind, FixedHeader, LastWill, PacketType, Protocol,
};
use bytes::Bytes;
use core::fmt;

/// Connection packet initiated by the client
#[derive(Clone, PartialEq)]
pub struct Connect {
    /// Mqtt protocol version
    pub protocol: Protocol,
    /// Mqtt keep alive time
    pub keep_alive: u16,
    /// Client Id
    pub client_id: Bytes,
    /// Clean session. Asks the broker to clear previous state
    pub clean_session: bool,
    /// Will that broker needs to publish when the client disconnects
    pub last_will: Option<LastWill>,
    /// Username of the client. Only ever set together with the password
    pub username: Option<Bytes>,
    /// Password of the client
    pub password: Option<Bytes>,
}

impl Connect {
    pub fn new<S: Into<Bytes>>(id: S) -> Connect {
        Connect {
            protocol: Protocol::V311,
            keep_alive: 60,
            client_id: id.into(),
            clean_session: true,
            last_will: None,
            username: None,
            password: None,
        }
    }

    pub fn set_will(&mut self, will: LastWill) -> &mut Self {
        self.last_will = Some(will);
        self
    }

    pub fn set_credentials<U: Into<Bytes>, P: Into<Bytes>>(&mut self, username: U, password: P) -> &mut Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Connect flags byte these fields encode to
    pub fn flags(&self) -> ConnectFlags {
        let (will, will_qos, will_retain) = match &self.last_will {
            Some(will) => (true, will.qos as u8, will.retain),
            None => (false, 0, false),
        };

        ConnectFlags {
            username: self.username.is_some(),
            password: self.password.is_some(),
            will_retain,
            will_qos,
            will,
            clean_session: self.clean_session,
            reserved: false,
        }
    }

    fn remaining_len(&self) -> usize {
        // protocol name, level, connect flags, keep alive
        let mut len = 2 + self.protocol.name().len() + 1 + 1 + 2;
        len += 2 + self.client_id.len();

        if let Some(will) = &self.last_will {
            len += 2 + will.topic.len() + 2 + will.message.len();
        }

        if let Some(username) = &self.username {
            len += 2 + username.len();
        }

        if let Some(password) = &self.password {
            len += 2 + password.len();
        }

        len
    }

    pub fn len(&self) -> usize {
        FixedHeader::new(PacketType::Connect, self.remaining_len()).frame_len()
    }

    /// Errors with `UnsupportedProtocolVersion` or `IdentifierRejected` kinds
    /// should be answered with a CONNACK. See `ErrorKind::connack_code`
    pub fn decode(src: &Bytes) -> Result<(Connect, usize), Error> {
        let (fixed_header, header_len) = FixedHeader::decode_as(src, PacketType::Connect)?;
        let end = header_len + fixed_header.remaining_len;
        let src = src.slice(..end);

        let mut total = header_len;
        let (protocol_name, n) = read_mqtt_bytes(&src, total)?;
        let name_offset = total;
        total += n;

        let level = read_u8(&src, total)?;
        let protocol = match Protocol::from_level(level) {
            Some(protocol) => protocol,
            None => return Err(ErrorKind::UnsupportedProtocolVersion.at(total)),
        };

        if protocol_name != protocol.name().as_bytes() {
            return Err(ErrorKind::UnsupportedProtocolVersion.at(name_offset));
        }
        total += 1;

        let flags_offset = total;
        let flags = ConnectFlags::from_byte(read_u8(&src, total)?);
        flags.validate().map_err(|e| e.at(flags_offset))?;
        total += 1;

        let keep_alive = read_u16(&src, total)?;
        total += 2;

        let (client_id, n) = read_mqtt_bytes(&src, total)?;
        if client_id.is_empty() && !flags.clean_session {
            return Err(ErrorKind::IdentifierRejected.at(total));
        }

        if !valid_client_id(protocol, &client_id) {
            return Err(ErrorKind::IdentifierRejected.at(total));
        }
        total += n;

        let mut last_will = None;
        if flags.will {
            let (topic, n) = read_mqtt_bytes(&src, total)?;
            total += n;
            let (message, n) = read_mqtt_bytes(&src, total)?;
            total += n;

            let qos = qos(flags.will_qos).map_err(|_| ErrorKind::ProtocolViolation.at(flags_offset))?;
            last_will = Some(LastWill {
                topic,
                message,
                qos,
                retain: flags.will_retain,
            });
        }

        // 3.1 clients may set the username and password flags and leave the
        // strings out
        let mut username = None;
        if flags.username {
            username = Some(Bytes::new());
            if total < end {
                let (value, n) = read_mqtt_bytes(&src, total)?;
                total += n;
                username = Some(value);
            }
        }

        let mut password = None;
        if flags.password {
            password = Some(Bytes::new());
            if total < end {
                let (value, n) = read_mqtt_bytes(&src, total)?;
                total += n;
                password = Some(value);
            }
        }

        if total != end {
            return Err(ErrorKind::IncorrectPacketFormat.at(total));
        }

        let connect = Connect {
            protocol,
            keep_alive,
            client_id,
            clean_session: flags.clean_session,
            last_will,
            username,
            password,
        };

        Ok((connect, end))
    }

    pub fn encode(&self, dst: &mut [u8]) -> Result<usize, Error> {
        let flags = self.flags();
        flags.validate().map_err(|e| e.at(0))?;

        if self.client_id.is_empty() && !self.clean_session {
            return Err(ErrorKind::IdentifierRejected.at(0));
        }

        if !valid_client_id(self.protocol, &self.client_id) {
            return Err(ErrorKind::IdentifierRejected.at(0));
        }

        let fixed_header = FixedHeader::new(PacketType::Connect, self.remaining_len());
        check_capacity(dst, fixed_header.frame_len())?;

        let mut total = fixed_header.encode(dst)?;
        total += write_mqtt_bytes(dst, total, self.protocol.name().as_bytes())?;
        total += write_u8(dst, total, self.protocol.level())?;
        total += write_u8(dst, total, flags.to_byte())?;
        total += write_u16(dst, total, self.keep_alive)?;
        total += write_mqtt_bytes(dst, total, &self.client_id)?;

        if let Some(will) = &self.last_will {
            total += write_mqtt_bytes(dst, total, &will.topic)?;
            total += write_mqtt_bytes(dst, total, &will.message)?;
        }

        if let Some(username) = &self.username {
            total += write_mqtt_bytes(dst, total, username)?;
        }

        if let Some(password) = &self.password {
            total += write_mqtt_bytes(dst, total, password)?;
        }

        Ok(total)
    }
}

impl fmt::Debug for Connect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Protocol = {:?}, Keep alive = {:?}, Client id = {:?}, Clean session = {}, Will = {:?}, Username = {:?}",
            self.protocol, self.keep_alive, self.client_id, self.clean_session, self.last_will, self.username,
        )
    }
}

/// ```text
///          7          6          5          4   3       2          1          0
///     +----------+----------+-------------+-----------+----------+---------------+----------+
///     | username | password | will retain |  will qos | will     | clean session | reserved |
///     +----------+----------+-------------+-----------+----------+---------------+----------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectFlags {
    pub username: bool,
    pub password: bool,
    pub will_retain: bool,
    pub will_qos: u8,
    pub will: bool,
    pub clean_session: bool,
    pub reserved: bool,
}

impl ConnectFlags {
    pub fn from_byte(byte: u8) -> ConnectFlags {
        ConnectFlags {
            username: byte & 0b1000_0000 != 0,
            password: byte & 0b0100_0000 != 0,
            will_retain: byte & 0b0010_0000 != 0,
            will_qos: (byte >> 3) & 0b11,
            will: byte & 0b0000_0100 != 0,
            clean_session: byte & 0b0000_0010 != 0,
            reserved: byte & 0b0000_0001 != 0,
        }
    }

    pub fn to_byte(&self) -> u8 {
        (self.username as u8) << 7
            | (self.password as u8) << 6
            | (self.will_retain as u8) << 5
            | (self.will_qos & 0b11) << 3
            | (self.will as u8) << 2
            | (self.clean_session as u8) << 1
            | self.reserved as u8
    }

    /// Consistency rules between the flags
    pub fn validate(&self) -> Result<(), ErrorKind> {
        if self.reserved || self.will_qos > 2 {
            return Err(ErrorKind::ProtocolViolation);
        }

        if !self.will && (self.will_qos != 0 || self.will_retain) {
            return Err(ErrorKind::ProtocolViolation);
        }

        // 3.1.1 allows a username without a password. 3.1 and most brokers
        // don't, so both travel together here
        if self.username != self.password {
            return Err(ErrorKind::ProtocolViolation);
        }

        Ok(())
    }
}

/// Level 4 (3.1.1) client identifiers are limited to `[0-9a-zA-Z _]`. Level 3
/// identifiers aren't checked
pub fn valid_client_id(protocol: Protocol, id: &[u8]) -> bool {
    match protocol {
        Protocol::V31 => true,
        Protocol::V311 => id
            .iter()
            .all(|c| c.is_ascii_alphanumeric() || *c == b' ' || *c == b'_'),
    }
}

#[cfg(test)]
mod test {
    use crate::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    fn connect_stream(level: u8, flags: u8, client_id: &[u8]) -> Bytes {
        let name: &[u8] = if level == 3 { b"MQIsdp" } else { b"MQTT" };
        let mut body = Vec::new();
        body.extend_from_slice(&(name.len() as u16).to_be_bytes());
        body.extend_from_slice(name);
        body.extend_from_slice(&[level, flags, 0x00, 0x0A]);
        body.extend_from_slice(&(client_id.len() as u16).to_be_bytes());
        body.extend_from_slice(client_id);

        let mut stream = vec![0x10, body.len() as u8];
        stream.extend_from_slice(&body);
        Bytes::from(stream)
    }

    #[test]
    fn connect_stitching_works_correctly() {
        let stream = &[
            0x10,
            39, // packet type, flags and remaining len
            0x00,
            0x04,
            b'M',
            b'Q',
            b'T',
            b'T',
            0x04,        // variable header
            0b1100_1110, // variable header. +username, +password, -will retain, will qos=1, +last_will, +clean_session
            0x00,
            0x0a, // variable header. keep alive = 10 sec
            0x00,
            0x04,
            b't',
            b'e',
            b's',
            b't', // payload. client_id
            0x00,
            0x02,
            b'/',
            b'a', // payload. will topic = '/a'
            0x00,
            0x07,
            b'o',
            b'f',
            b'f',
            b'l',
            b'i',
            b'n',
            b'e', // payload. variable header. will msg = 'offline'
            0x00,
            0x04,
            b'r',
            b'u',
            b'm',
            b'q', // payload. username = 'rumq'
            0x00,
            0x02,
            b'm',
            b'q', // payload. password = 'mq'
            0xDE,
            0xAD,
            0xBE,
            0xEF, // extra packets in the stream
        ];

        let stream = Bytes::from(&stream[..]);
        let (packet, consumed) = Connect::decode(&stream).unwrap();
        assert_eq!(consumed, 41);
        assert_eq!(
            packet,
            Connect {
                protocol: Protocol::V311,
                keep_alive: 10,
                client_id: Bytes::from_static(b"test"),
                clean_session: true,
                last_will: Some(LastWill::new("/a", "offline", QoS::AtLeastOnce, false)),
                username: Some(Bytes::from_static(b"rumq")),
                password: Some(Bytes::from_static(b"mq")),
            }
        );
    }

    #[test]
    fn connect_is_encoded_as_expected() {
        let connect = Connect::new("test");
        let mut dst = vec![0u8; connect.len()];
        let written = connect.encode(&mut dst).unwrap();

        assert_eq!(written, 18);
        assert_eq!(
            dst,
            vec![
                0x10, 0x10, 0x00, 0x04, 0x4D, 0x51, 0x54, 0x54, 0x04, 0x02, 0x00, 0x3C, 0x00, 0x04, 0x74, 0x65, 0x73,
                0x74
            ]
        );
    }

    #[test]
    fn client_id_charset_depends_on_level() {
        let (connect, _) = Connect::decode(&connect_stream(4, 0x02, b"client 1")).unwrap();
        assert_eq!(connect.client_id, Bytes::from_static(b"client 1"));

        let (connect, _) = Connect::decode(&connect_stream(4, 0x02, b"client_1")).unwrap();
        assert_eq!(connect.protocol, Protocol::V311);

        let err = Connect::decode(&connect_stream(4, 0x02, b"client!")).unwrap_err();
        assert_eq!(err, Error::new(ErrorKind::IdentifierRejected, 12));
        assert_eq!(err.kind.connack_code(), Some(ConnectReturnCode::RefusedIdentifierRejected));

        let (connect, _) = Connect::decode(&connect_stream(3, 0x02, b"client!")).unwrap();
        assert_eq!(connect.protocol, Protocol::V31);
        assert_eq!(connect.client_id, Bytes::from_static(b"client!"));
    }

    #[test]
    fn empty_client_id_needs_clean_session() {
        let (connect, _) = Connect::decode(&connect_stream(4, 0x02, b"")).unwrap();
        assert!(connect.client_id.is_empty());

        let err = Connect::decode(&connect_stream(4, 0x00, b"")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IdentifierRejected);

        let mut connect = Connect::new("");
        connect.clean_session = false;
        let mut dst = [0u8; 32];
        assert_eq!(connect.encode(&mut dst).unwrap_err().kind, ErrorKind::IdentifierRejected);
    }

    #[test]
    fn will_flags_must_be_consistent() {
        // will flag 0 with will qos 1
        let err = Connect::decode(&connect_stream(4, 0b0000_1010, b"id")).unwrap_err();
        assert_eq!(err, Error::new(ErrorKind::ProtocolViolation, 9));

        // will flag 0 with will retain
        let err = Connect::decode(&connect_stream(4, 0b0010_0010, b"id")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ProtocolViolation);

        // will qos 3
        let err = Connect::decode(&connect_stream(4, 0b0001_1110, b"id")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ProtocolViolation);

        // reserved bit
        let err = Connect::decode(&connect_stream(4, 0b0000_0011, b"id")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ProtocolViolation);
    }

    #[test]
    fn username_and_password_travel_together() {
        let err = Connect::decode(&connect_stream(4, 0b1000_0010, b"id")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ProtocolViolation);

        let err = Connect::decode(&connect_stream(4, 0b0100_0010, b"id")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ProtocolViolation);

        let mut connect = Connect::new("id");
        connect.username = Some(Bytes::from_static(b"user"));
        let mut dst = [0u8; 64];
        assert_eq!(connect.encode(&mut dst).unwrap_err().kind, ErrorKind::ProtocolViolation);
    }

    #[test]
    fn missing_credentials_of_31_clients_decode_as_empty() {
        let (connect, consumed) = Connect::decode(&connect_stream(3, 0b1100_0010, b"id")).unwrap();
        assert_eq!(consumed, 18);
        assert_eq!(connect.username, Some(Bytes::new()));
        assert_eq!(connect.password, Some(Bytes::new()));
    }

    #[test]
    fn protocol_name_must_match_level() {
        let mut stream = connect_stream(4, 0x02, b"id").to_vec();
        stream[8] = 0x03;
        let err = Connect::decode(&Bytes::from(stream)).unwrap_err();
        assert_eq!(err, Error::new(ErrorKind::UnsupportedProtocolVersion, 2));

        let mut stream = connect_stream(4, 0x02, b"id").to_vec();
        stream[8] = 0x05;
        let err = Connect::decode(&Bytes::from(stream)).unwrap_err();
        assert_eq!(err, Error::new(ErrorKind::UnsupportedProtocolVersion, 8));
        assert_eq!(err.kind.connack_code(), Some(ConnectReturnCode::RefusedProtocolVersion));
    }

    #[test]
    fn connect_with_will_and_credentials_survives_a_round_trip() {
        let mut connect = Connect::new("rumq client");
        connect.protocol = Protocol::V31;
        connect.keep_alive = 5;
        connect
            .set_will(LastWill::new("hello/will", "dead", QoS::ExactlyOnce, true))
            .set_credentials("user", "pass");
        assert_eq!(connect.flags().to_byte(), 0b1111_0110);

        let mut dst = vec![0u8; connect.len()];
        let written = connect.encode(&mut dst).unwrap();
        assert_eq!(written, connect.len());
        assert_eq!(&dst[2..10], &[0x00, 0x06, b'M', b'Q', b'I', b's', b'd', b'p']);

        let (decoded, consumed) = Connect::decode(&Bytes::from(dst)).unwrap();
        assert_eq!(consumed, written);
        assert_eq!(decoded, connect);
    }

    #[test]
    fn connect_flags_map_to_bits() {
        let flags = ConnectFlags::from_byte(0b1110_1100);
        assert!(flags.username && flags.password && flags.will_retain && flags.will);
        assert!(!flags.clean_session);
        assert_eq!(flags.will_qos, 1);
        assert_eq!(flags.to_byte(), 0b1110_1100);
        assert_eq!(flags.validate(), Ok(()));

        assert_eq!(ConnectFlags::from_byte(0x01).validate(), Err(ErrorKind::ProtocolViolation));
    }
}

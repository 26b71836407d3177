use crate::ConnectReturnCode;
use cfg_if::cfg_if;

// NOTE: Std is an exclusive or features. Won't work with all features enabled
cfg_if! {
    if #[cfg(feature = "std")] {
        /// What went wrong while decoding or encoding a packet
        #[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
        pub enum ErrorKind {
            #[error("Unsupported packet type `{0}`")]
            InvalidPacketType(u8),
            #[error("Invalid fixed header flags `{0:#06b}`")]
            InvalidFlags(u8),
            #[error("Malformed remaining length")]
            MalformedLength,
            #[error("EOF. Not enough data in buffer")]
            TruncatedBuffer,
            /// Size the whole destination buffer needs, not just the failing field
            #[error("Destination buffer too small. Need {0} bytes")]
            BufferTooSmall(usize),
            #[error("Topic name must not be empty or contain wildcards")]
            InvalidTopic,
            #[error("Empty topic list")]
            EmptyTopicList,
            #[error("Invalid return code `{0}`")]
            InvalidReturnCode(u8),
            #[error("Protocol violation")]
            ProtocolViolation,
            #[error("Client identifier rejected")]
            IdentifierRejected,
            #[error("Unsupported protocol name or level")]
            UnsupportedProtocolVersion,
            #[error("Invalid packet identifier = 0")]
            MissingPacketIdentifier,
            #[error("Incorrect packet format")]
            IncorrectPacketFormat,
            #[error("Unsupported QoS `{0}`")]
            InvalidQoS(u8),
            #[error("Payload too long")]
            PayloadTooLarge,
            #[error("Payload required")]
            PayloadRequired,
        }

        /// Codec failure along with the byte offset it was detected at
        #[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
        #[error("{kind} (offset {offset})")]
        pub struct Error {
            pub kind: ErrorKind,
            pub offset: usize,
        }
    } else {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum ErrorKind {
            InvalidPacketType(u8),
            InvalidFlags(u8),
            MalformedLength,
            TruncatedBuffer,
            BufferTooSmall(usize),
            InvalidTopic,
            EmptyTopicList,
            InvalidReturnCode(u8),
            ProtocolViolation,
            IdentifierRejected,
            UnsupportedProtocolVersion,
            MissingPacketIdentifier,
            IncorrectPacketFormat,
            InvalidQoS(u8),
            PayloadTooLarge,
            PayloadRequired,
        }

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct Error {
            pub kind: ErrorKind,
            pub offset: usize,
        }
    }
}

impl Error {
    pub fn new(kind: ErrorKind, offset: usize) -> Error {
        Error { kind, offset }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl ErrorKind {
    /// Return code a server should answer a failed CONNECT with. `None` means
    /// the failure is a plain malformed packet and the connection should be
    /// closed without a CONNACK
    pub fn connack_code(&self) -> Option<ConnectReturnCode> {
        match self {
            ErrorKind::UnsupportedProtocolVersion => Some(ConnectReturnCode::RefusedProtocolVersion),
            ErrorKind::IdentifierRejected => Some(ConnectReturnCode::RefusedIdentifierRejected),
            _ => None,
        }
    }

    /// Error with this kind at `offset`
    pub(crate) fn at(self, offset: usize) -> Error {
        Error::new(self, offset)
    }
}

#[cfg(test)]
mod test {
    use crate::{ConnectReturnCode, ErrorKind};

    #[test]
    fn connect_phase_errors_map_to_connack_codes() {
        assert_eq!(
            ErrorKind::IdentifierRejected.connack_code(),
            Some(ConnectReturnCode::RefusedIdentifierRejected)
        );
        assert_eq!(
            ErrorKind::UnsupportedProtocolVersion.connack_code(),
            Some(ConnectReturnCode::RefusedProtocolVersion)
        );
        assert_eq!(ErrorKind::ProtocolViolation.connack_code(), None);
        assert_eq!(ErrorKind::TruncatedBuffer.connack_code(), None);
    }
}

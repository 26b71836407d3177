#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
#[macro_use]
extern crate log;

#[cfg(feature = "std")]
mod codec;
mod control;
mod enums;
mod err;
mod header;
mod read;
mod returncodes;
mod topic;
mod will;
mod write;

#[cfg(feature = "std")]
pub use codec::*;
pub use control::*;
pub use enums::*;
pub use err::*;
pub use header::*;
pub use read::*;
pub use returncodes::*;
pub use topic::*;
pub use will::*;
pub use write::*;

/// Maps the upper nibble of the first header byte to a packet type.
/// 0 and 15 are reserved in MQTT 3.1.1
///
/// http://docs.oasis-open.org/mqtt/mqtt/v3.1.1/os/mqtt-v3.1.1-os.html#_Toc398718021
pub fn packet_type(num: u8) -> Result<PacketType, ErrorKind> {
    match num {
        1 => Ok(PacketType::Connect),
        2 => Ok(PacketType::ConnAck),
        3 => Ok(PacketType::Publish),
        4 => Ok(PacketType::PubAck),
        5 => Ok(PacketType::PubRec),
        6 => Ok(PacketType::PubRel),
        7 => Ok(PacketType::PubComp),
        8 => Ok(PacketType::Subscribe),
        9 => Ok(PacketType::SubAck),
        10 => Ok(PacketType::Unsubscribe),
        11 => Ok(PacketType::UnsubAck),
        12 => Ok(PacketType::PingReq),
        13 => Ok(PacketType::PingResp),
        14 => Ok(PacketType::Disconnect),
        _ => Err(ErrorKind::InvalidPacketType(num)),
    }
}

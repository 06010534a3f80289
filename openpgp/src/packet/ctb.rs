//! Cipher Type Byte.
//!
//! See [Section 4.2 of RFC 4880] for more details.
//!
//!   [Section 4.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.2

use std::convert::TryFrom;
use std::ops::Deref;

use crate::{Error, Result, Tag};

/// The fields common to both CTB formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CTBCommon {
    /// RFC4880 Packet tag
    tag: Tag,
}

impl CTBCommon {
    /// Returns the packet's tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }
}

/// The new CTB format.
///
/// See [Section 4.2 of RFC 4880] for more details.
///
///   [Section 4.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.2
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CTBNew {
    /// Packet CTB fields
    common: CTBCommon,
}

impl CTBNew {
    /// Constructs a new-style CTB.
    pub fn new(tag: Tag) -> Self {
        CTBNew {
            common: CTBCommon {
                tag,
            },
        }
    }
}

// Allow transparent access of common fields.
impl Deref for CTBNew {
    type Target = CTBCommon;

    fn deref(&self) -> &Self::Target {
        &self.common
    }
}

/// The PacketLengthType is used as part of the [old CTB], and is
/// partially used to determine the packet's size.
///
/// See [Section 4.2.1 of RFC 4880] for more details.
///
///   [Section 4.2.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.2.1
///   [old CTB]: struct.CTBOld.html
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacketLengthType {
    /// A one-octet Body Length header encodes a length of 0 to 191 octets.
    OneOctet,
    /// A two-octet Body Length header encodes a length of 192 to 8383 octets.
    TwoOctets,
    /// A four-octet Body Length header encodes a length of up to 4 GiB.
    FourOctets,
    /// The packet extends until the end of the input.
    Indeterminate,
}

impl From<u8> for PacketLengthType {
    /// Uses the two low bits of `u`.
    fn from(u: u8) -> Self {
        match u & 0b11 {
            0 => PacketLengthType::OneOctet,
            1 => PacketLengthType::TwoOctets,
            2 => PacketLengthType::FourOctets,
            _ => PacketLengthType::Indeterminate,
        }
    }
}

/// The old CTB format.
///
/// See [Section 4.2 of RFC 4880] for more details.
///
///   [Section 4.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.2
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CTBOld {
    /// Common CTB fields.
    common: CTBCommon,
    /// Type of length specifier.
    length_type: PacketLengthType,
}

impl CTBOld {
    /// Constructs an old-style CTB.
    ///
    /// Old-style CTBs only have room for tags 0 to 15.
    pub fn new(tag: Tag, length_type: PacketLengthType) -> Result<Self> {
        let n: u8 = tag.into();

        if n > 15 {
            return Err(Error::MalformedHeader(
                format!("Only tags 0-15 are supported, got: {}", n)).into());
        }

        Ok(CTBOld {
            common: CTBCommon {
                tag,
            },
            length_type,
        })
    }

    /// Returns the packet's length type.
    pub fn length_type(&self) -> PacketLengthType {
        self.length_type
    }
}

// Allow transparent access of common fields.
impl Deref for CTBOld {
    type Target = CTBCommon;

    fn deref(&self) -> &Self::Target {
        &self.common
    }
}

/// A sum type for the different CTB variants.
///
/// There are two CTB variants: the [old CTB format] and the [new CTB
/// format].
///
///   [old CTB format]: struct.CTBOld.html
///   [new CTB format]: struct.CTBNew.html
///
/// Note: CTB stands for Cipher Type Byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CTB {
    /// New (current) packet header format.
    New(CTBNew),
    /// Old PGP 2.6 header format.
    Old(CTBOld),
}

// Allow transparent access of common fields.
impl Deref for CTB {
    type Target = CTBCommon;

    fn deref(&self) -> &Self::Target {
        match self {
            CTB::New(ref ctb) => &ctb.common,
            CTB::Old(ref ctb) => &ctb.common,
        }
    }
}

impl TryFrom<u8> for CTB {
    type Error = anyhow::Error;

    /// Parses a CTB as described in [Section 4.2 of RFC 4880].
    ///
    ///   [Section 4.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.2
    fn try_from(ptag: u8) -> Result<CTB> {
        // The top bit of the ptag must be set.
        if ptag & 0b1000_0000 == 0 {
            return Err(
                Error::MalformedHeader(
                    format!("Malformed CTB: MSB of ptag ({:#010b}) not set.",
                            ptag)).into());
        }

        let new_format = ptag & 0b0100_0000 != 0;
        let ctb = if new_format {
            let tag = ptag & 0b0011_1111;
            CTB::New(CTBNew::new(tag.into()))
        } else {
            let tag = (ptag & 0b0011_1100) >> 2;
            CTB::Old(CTBOld::new(tag.into(), ptag.into())?)
        };

        Ok(ctb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctb() {
        // 0x99 = public key packet
        if let CTB::Old(ctb) = CTB::try_from(0x99).unwrap() {
            assert_eq!(ctb.tag(), Tag::PublicKey);
            assert_eq!(ctb.length_type(), PacketLengthType::TwoOctets);
        } else {
            panic!("Expected an old format packet.");
        }

        // 0xa3 = old compressed packet
        if let CTB::Old(ctb) = CTB::try_from(0xa3).unwrap() {
            assert_eq!(ctb.tag(), Tag::CompressedData);
            assert_eq!(ctb.length_type(), PacketLengthType::Indeterminate);
        } else {
            panic!("Expected an old format packet.");
        }

        // 0xcb: new literal
        match CTB::try_from(0xcb).unwrap() {
            CTB::New(ctb) => assert_eq!(ctb.tag(), Tag::Literal),
            CTB::Old(_) => panic!("Expected a new format packet."),
        }

        // Private tags only fit in the new format.
        assert_eq!(CTB::try_from(0xfd).unwrap().tag(), Tag::Private(61));
    }

    #[test]
    fn msb_not_set() {
        let err = CTB::try_from(0x3f).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(),
                         Some(Error::MalformedHeader(_))));
    }
}

//! OpenPGP Header.

use std::convert::TryFrom;

use crate::{Cursor, Error, Result, Tag};
use crate::packet::BodyLength;
use crate::packet::ctb::{CTB, PacketLengthType};

/// An OpenPGP packet's header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// The packet's CTB.
    ctb: CTB,
    /// The packet's length.
    length: BodyLength,
}

impl Header {
    /// Creates a new header.
    pub fn new(ctb: CTB, length: BodyLength) -> Self {
        Header { ctb, length }
    }

    /// Returns the packet's CTB.
    pub fn ctb(&self) -> &CTB {
        &self.ctb
    }

    /// Returns the packet's length.
    pub fn length(&self) -> &BodyLength {
        &self.length
    }

    /// Reads a packet header.
    pub fn parse(cursor: &mut Cursor) -> Result<Header> {
        let ctb = CTB::try_from(cursor.read_u8("packet tag")?)?;
        let length = match ctb {
            CTB::New(_) => BodyLength::parse_new_format(cursor)?,
            CTB::Old(ref ctb) =>
                BodyLength::parse_old_format(cursor, ctb.length_type())?,
        };
        Ok(Header::new(ctb, length))
    }

    /// Syntax checks the header.
    ///
    /// A header is considered invalid if the [length encoding] is
    /// invalid for the packet: partial and indeterminate lengths are
    /// only allowed for data packets, and the first partial chunk
    /// must be at least 512 octets.
    ///
    /// [length encoding]: https://tools.ietf.org/html/rfc4880#section-4.2.2.4
    ///
    /// This function does not check the packet's content.
    pub fn valid(&self) -> Result<()> {
        let tag = self.ctb.tag();

        let data_packet = matches!(tag, Tag::Literal | Tag::CompressedData
                                   | Tag::SED | Tag::SEIP | Tag::AED);
        match self.length {
            BodyLength::Full(_) => Ok(()),
            BodyLength::Partial(l) if data_packet => {
                if l < 512 {
                    Err(Error::MalformedHeader(
                        format!("Partial body length must be \
                                 at least 512 (got: {})", l)).into())
                } else {
                    Ok(())
                }
            }
            BodyLength::Indeterminate if data_packet => Ok(()),
            BodyLength::Partial(_) =>
                Err(Error::MalformedHeader(
                    format!("Partial Body Chunking not allowed \
                             for {} packets", tag)).into()),
            BodyLength::Indeterminate =>
                Err(Error::MalformedHeader(
                    format!("Indeterminate length encoding \
                             not allowed for {} packets", tag)).into()),
        }
    }
}

impl BodyLength {
    /// Decodes a new format body length as described in [Section
    /// 4.2.2 of RFC 4880].
    ///
    ///   [Section 4.2.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.2.2
    pub fn parse_new_format(cursor: &mut Cursor) -> Result<BodyLength> {
        let octet1 = cursor.read_u8("body length")?;
        match octet1 {
            0..=191 => // One octet.
                Ok(BodyLength::Full(octet1 as u32)),
            192..=223 => { // Two octets length.
                let octet2 = cursor.read_u8("body length")?;
                Ok(BodyLength::Full(((octet1 as u32 - 192) << 8)
                                    + octet2 as u32 + 192))
            },
            224..=254 => // Partial body length.
                Ok(BodyLength::Partial(1 << (octet1 & 0x1F))),
            255 => // Five octets.
                Ok(BodyLength::Full(cursor.read_be_u32("body length")?)),
        }
    }

    /// Decodes an old format body length as described in [Section
    /// 4.2.1 of RFC 4880].
    ///
    ///   [Section 4.2.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.2.1
    pub fn parse_old_format(cursor: &mut Cursor,
                            length_type: PacketLengthType)
                            -> Result<BodyLength>
    {
        match length_type {
            PacketLengthType::OneOctet =>
                Ok(BodyLength::Full(cursor.read_u8("body length")? as u32)),
            PacketLengthType::TwoOctets =>
                Ok(BodyLength::Full(
                    cursor.read_be_u16("body length")? as u32)),
            PacketLengthType::FourOctets =>
                Ok(BodyLength::Full(cursor.read_be_u32("body length")?)),
            PacketLengthType::Indeterminate =>
                Ok(BodyLength::Indeterminate),
        }
    }
}

//! Splits a byte stream into packets.

use log::{trace, warn};

use crate::{Cursor, Error, Result, Tag};
use crate::packet::{BodyLength, CTB, Header};

/// The header format a packet was framed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// PGP 2.6 style header.
    Old,
    /// RFC 4880 style header.
    New,
}

/// A framed packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    /// The packet's tag.
    pub tag: Tag,
    /// The packet's body.  Partial body chunks are concatenated.
    pub body: Vec<u8>,
    /// The header format.
    pub format: Format,
    /// Whether the body was encoded using partial body lengths.
    pub partial: bool,
    /// The size of the (first) header in bytes.
    pub header_len: usize,
}

/// Iterates over the packets in a byte stream.
///
/// Yields an error at most once; the iteration ends after it.
pub struct PacketFramer<'a> {
    cursor: Cursor<'a>,
    max_packet_size: usize,
    done: bool,
}

impl<'a> PacketFramer<'a> {
    /// Returns a framer for `data`.
    ///
    /// A body reassembled from partial chunks may not exceed
    /// `max_packet_size` bytes.
    pub fn new(data: &'a [u8], max_packet_size: usize) -> Self {
        PacketFramer {
            cursor: Cursor::new(data),
            max_packet_size,
            done: false,
        }
    }

    fn next_packet(&mut self) -> Result<Packet> {
        let start = self.cursor.position();
        let header = Header::parse(&mut self.cursor)?;
        let header_len = self.cursor.position() - start;
        let tag = header.ctb().tag();
        let format = match header.ctb() {
            CTB::New(_) => Format::New,
            CTB::Old(_) => Format::Old,
        };
        trace!("{:?} at offset {}: {:?}", tag, start, header.length());

        if let Err(e) = header.valid() {
            warn!("{} at offset {}: {}", tag, start, e);
        }

        let (body, partial) = match *header.length() {
            BodyLength::Full(l) =>
                (self.cursor.read_bytes("packet body", l as usize)?, false),
            BodyLength::Indeterminate => (self.cursor.read_to_end(), false),
            BodyLength::Partial(l) => (self.read_partial(l as usize)?, true),
        };

        Ok(Packet { tag, body, format, partial, header_len })
    }

    /// Reassembles a body from a chain of partial body chunks.
    fn read_partial(&mut self, first: usize) -> Result<Vec<u8>> {
        let mut body = self.cursor.read_bytes("partial body chunk", first)?;
        loop {
            let (len, last) =
                match BodyLength::parse_new_format(&mut self.cursor)? {
                    BodyLength::Full(l) => (l as usize, true),
                    BodyLength::Partial(l) => (l as usize, false),
                    BodyLength::Indeterminate =>
                        return Err(Error::MalformedHeader(
                            "indeterminate length in a partial body chain"
                                .into()).into()),
                };

            let chunk = self.cursor.read_bytes("partial body chunk", len)?;
            if body.len() + chunk.len() > self.max_packet_size {
                return Err(Error::MalformedHeader(
                    format!("packet too large: more than {} bytes",
                            self.max_packet_size)).into());
            }
            body.extend_from_slice(&chunk);

            if last {
                return Ok(body);
            }
        }
    }
}

impl<'a> Iterator for PacketFramer<'a> {
    type Item = Result<Packet>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor.rest() == 0 {
            return None;
        }

        let r = self.next_packet();
        if r.is_err() {
            self.done = true;
        }
        Some(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn frame(data: &[u8]) -> Result<Vec<Packet>> {
        PacketFramer::new(data, 1 << 20).collect()
    }

    #[test]
    fn formats() {
        let packets = frame(b"\xa8\x03PGP\xcd\x05Alice\xaf\x01\x02").unwrap();
        assert_eq!(packets.len(), 3);

        assert_eq!(packets[0].tag, Tag::Marker);
        assert_eq!(packets[0].format, Format::Old);
        assert_eq!(packets[0].body, b"PGP");
        assert_eq!(packets[0].header_len, 2);

        assert_eq!(packets[1].tag, Tag::UserID);
        assert_eq!(packets[1].format, Format::New);
        assert_eq!(packets[1].body, b"Alice");

        // Indeterminate length runs to the end.
        assert_eq!(packets[2].tag, Tag::Literal);
        assert_eq!(packets[2].format, Format::Old);
        assert_eq!(packets[2].body, vec![1, 2]);
    }

    #[test]
    fn empty() {
        assert!(frame(b"").unwrap().is_empty());
    }

    #[test]
    fn truncation() {
        for data in [&b"\xcd"[..], b"\xcd\x05Alic", b"\xcd\xff\x00\x00",
                     b"\xcb\xe1ab\xe1a"].iter()
        {
            let err = frame(data).unwrap_err();
            assert!(Error::is_truncated(&err), "{:?}: {}", data, err);
        }
    }

    #[test]
    fn bad_ctb() {
        let mut framer = PacketFramer::new(b"\xcd\x01A\x7f\x00", 1024);
        assert!(framer.next().unwrap().is_ok());
        let err = framer.next().unwrap().unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(),
                         Some(Error::MalformedHeader(_))));
        assert!(framer.next().is_none());
    }

    #[test]
    fn too_large() {
        let mut data = vec![0xcb, 0xe2];
        data.extend_from_slice(&[0; 4]);
        data.push(0xe2);
        data.extend_from_slice(&[0; 4]);
        data.push(0x01);
        data.push(0);
        assert_eq!(PacketFramer::new(&data, 9).count(), 1);
        let err = PacketFramer::new(&data, 8).next().unwrap().unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(),
                         Some(Error::MalformedHeader(_))));
        assert_eq!(frame(&data).unwrap()[0].body.len(), 9);
    }

    /// Splits `body` into a partial body chain.
    fn chunked(tag: u8, body: &[u8], power: u8) -> Vec<u8> {
        let chunk = 1usize << power;
        let mut out = vec![0xc0 | tag];
        let mut rest = body;
        while rest.len() >= chunk {
            out.push(0xe0 | power);
            out.extend_from_slice(&rest[..chunk]);
            rest = &rest[chunk..];
        }
        // The chunks are at most 8 bytes, so the final length always
        // fits in one octet.
        out.push(rest.len() as u8);
        out.extend_from_slice(rest);
        out
    }

    quickcheck! {
        fn partial_equals_whole(body: Vec<u8>, power: u8) -> bool {
            let power = power % 4;
            let chain = chunked(11, &body, power);
            let packets = frame(&chain).unwrap();
            packets.len() == 1
                && packets[0].body == body
                && packets[0].partial == (body.len() >= (1 << power))
        }
    }
}

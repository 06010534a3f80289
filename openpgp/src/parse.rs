//! Packet decoding.
//!
//! An OpenPGP stream is a sequence of packets, some of which contain
//! other packets.  The [`PacketFramer`] splits a stream into packets,
//! [`parse_packets`] hands every packet to the decoder for its tag
//! and collects the resulting [`Item`]s.
//!
//! Decoders never discard what they have decoded.  A decoder fills
//! the packet's item in place and returns an error when it hits
//! something it cannot handle; the error is then attached to the
//! item as an `Error` child, and decoding continues with the next
//! packet.  Only errors in the framing itself abort.
//!
//! Compressed data packets and embedded signatures recurse.  The
//! [`Context`] bounds the recursion depth.

use log::{debug, warn};

use crate::{Context, Cursor, Item, Result, Tag};

mod framer;
pub use self::framer::{Format, Packet, PacketFramer};
mod data;
mod key;
mod mpis;
mod session_key;
mod signature;
mod subpacket;
mod user;
mod values;

/// Decodes the body of a packet.
///
/// Returns the packet's item together with the outcome of the
/// decoding.  The item holds everything that was decoded before an
/// error occurred.
pub(crate) fn dispatch(tag: Tag, body: &[u8], ctx: &mut Context)
                       -> (Item, Result<()>)
{
    let mut item = Item::new(tag.to_string())
        .with_note(format!("{} bytes", body.len()))
        .with_dump(ctx.debug_dump(body));
    let mut cursor = Cursor::new(body);
    let c = &mut cursor;

    let r = match tag {
        Tag::PKESK => session_key::pkesk(&mut item, c, ctx),
        Tag::Signature => signature::signature(&mut item, c, ctx),
        Tag::SKESK => session_key::skesk(&mut item, c, ctx),
        Tag::OnePassSig => signature::one_pass_sig(&mut item, c, ctx),
        Tag::SecretKey | Tag::SecretSubkey =>
            key::secret_key(&mut item, c, ctx),
        Tag::PublicKey | Tag::PublicSubkey =>
            key::public_key(&mut item, c, ctx),
        Tag::CompressedData => data::compressed(&mut item, c, ctx),
        Tag::SED => data::sed(&mut item, c, ctx),
        Tag::Marker => data::marker(&mut item, c, ctx),
        Tag::Literal => data::literal(&mut item, c, ctx),
        Tag::Trust => data::trust(&mut item, c, ctx),
        Tag::UserID => user::user_id(&mut item, c, ctx),
        Tag::UserAttribute => user::user_attribute(&mut item, c, ctx),
        Tag::SEIP => data::seip(&mut item, c, ctx),
        Tag::MDC => data::mdc(&mut item, c, ctx),
        Tag::AED => data::aed(&mut item, c, ctx),
        Tag::Reserved | Tag::Unknown(_) | Tag::Private(_) => {
            item.set_dump(Some(ctx.dump(body)));
            Ok(())
        }
    };

    (item, r)
}

/// Decodes the packets in `data`, appending one item per packet to
/// `out`.
///
/// Errors while decoding a packet's body are recorded in the packet's
/// item.  Errors in the framing are returned; the items of the
/// packets framed before the error remain in `out`.
pub fn parse_packets(data: &[u8], ctx: &mut Context, out: &mut Vec<Item>)
                     -> Result<()>
{
    let max_packet_size = ctx.options().max_packet_size;
    for packet in PacketFramer::new(data, max_packet_size) {
        let packet = packet?;
        debug!("{}: {} bytes ({:?} format{})",
               packet.tag, packet.body.len(), packet.format,
               if packet.partial { ", partial body" } else { "" });

        let (mut item, r) = dispatch(packet.tag, &packet.body, ctx);
        if let Err(err) = r {
            warn!("{}: {:#}", packet.tag, err);
            item.push(Item::new("Error").with_value(format!("{:#}", err)));
        }
        out.push(item);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;
    use crate::{Error, Options};

    /// Options used by the rendering tests: everything is dumped,
    /// times are shown in UTC.
    pub(crate) fn verbose() -> Context {
        Context::new(Options {
            debug: true,
            integer_dump: true,
            marker_dump: true,
            literal_dump: true,
            private_dump: true,
            utc: true,
            ..Default::default()
        })
    }

    /// Parses a hex string, ignoring whitespace.
    pub(crate) fn hex(s: &str) -> Vec<u8> {
        let s: String = s.split_whitespace().collect();
        (0..s.len()).step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    /// Checks that every proper prefix of `body` fails to decode as a
    /// `tag` packet with [`Error::Truncated`].
    pub(crate) fn assert_prefixes_truncated(tag: Tag, body: &[u8]) {
        for n in 0..body.len() {
            let mut ctx = verbose();
            match dispatch(tag, &body[..n], &mut ctx) {
                (_, Err(err)) =>
                    assert!(Error::is_truncated(&err),
                            "{} of {} bytes: {}", tag, n, err),
                (item, Ok(())) =>
                    panic!("{} of {} bytes decoded:\n{}", tag, n, item),
            }
        }
    }

    quickcheck! {
        fn dispatch_never_panics(tag: u8, body: Vec<u8>) -> bool {
            let mut ctx = verbose();
            let (item, _) = dispatch(Tag::from(tag & 0x3f), &body, &mut ctx);
            item.note() == Some(format!("{} bytes", body.len()).as_str())
        }
    }

    #[test]
    fn unknown_tags_are_dumped() {
        for &tag in &[0u8, 15, 16, 21, 59, 60, 63] {
            let mut ctx = Context::new(Default::default());
            let (item, r) = dispatch(tag.into(), &[1, 2, 3], &mut ctx);
            assert!(r.is_ok());
            assert_eq!(item.note(), Some("3 bytes"));
            assert_eq!(item.dump().unwrap().to_string(), "01 02 03");
            assert!(item.children().is_empty());
        }
    }

    #[test]
    fn errors_are_annotated() {
        let mut ctx = Context::new(Default::default());
        let mut out = Vec::new();
        // A signature packet with an unknown version, then a user id.
        parse_packets(b"\xc2\x01\x09\xcd\x01A", &mut ctx, &mut out).unwrap();
        assert_eq!(out.len(), 2);

        let sig = &out[0];
        assert_eq!(sig.children()[0].name(), "Version");
        assert_eq!(sig.children()[0].value(), Some("9"));
        let error = sig.child("Error").unwrap();
        assert!(error.value().unwrap().starts_with("Unsupported structure"));

        assert_eq!(out[1].children()[0].value(), Some("A"));
    }

    #[test]
    fn short_bodies_are_annotated() {
        let mut ctx = Context::new(Default::default());
        let mut out = Vec::new();
        // A one-pass signature packet cut after the hash algorithm.
        parse_packets(b"\xc4\x03\x03\x00\x08", &mut ctx, &mut out).unwrap();
        let error = out[0].child("Error").unwrap();
        assert!(error.value().unwrap().starts_with("Unexpected end of data"));
        assert_eq!(out[0].children().len(), 4);
    }

    #[test]
    fn framing_errors_abort() {
        let mut ctx = Context::new(Default::default());
        let mut out = Vec::new();
        let err = parse_packets(b"\xcd\x01A\xcd\x05Al", &mut ctx, &mut out)
            .unwrap_err();
        assert!(Error::is_truncated(&err));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn partial_body_decodes_like_full_body() {
        let body = hex("62 05 68 65 6c 6c 6f 00 00 00 00 41 42 43 44");
        let mut full = vec![0xcb, body.len() as u8];
        full.extend_from_slice(&body);

        let mut partial = vec![0xcb, 0xe2];
        partial.extend_from_slice(&body[..4]);
        partial.push(0xe3);
        partial.extend_from_slice(&body[4..12]);
        partial.push((body.len() - 12) as u8);
        partial.extend_from_slice(&body[12..]);

        let mut a = Vec::new();
        parse_packets(&full, &mut verbose(), &mut a).unwrap();
        let mut b = Vec::new();
        parse_packets(&partial, &mut verbose(), &mut b).unwrap();
        assert_eq!(a, b);
        assert!(a[0].child("Error").is_none());
    }
}

//! Signature and user attribute subpackets.
//!
//! Both kinds share the framing described in [Section 5.2.3.1 of RFC
//! 4880]: a length, a type octet, and the body.  Only signature
//! subpackets have a critical bit.
//!
//!   [Section 5.2.3.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.1

use log::{trace, warn};

use crate::{
    Context,
    Cursor,
    Error,
    Item,
    Result,
    SubpacketTag,
    UserAttributeTag,
};
use crate::item::to_hex;
use crate::types::{self, Duration, Timestamp};
use super::{signature, values};

/// Which subpacket types apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Namespace {
    /// Subpackets in the hashed and unhashed areas of signatures.
    Signature,
    /// Subpackets of user attribute packets.
    UserAttribute,
}

/// Reads a subpacket area preceded by a two-octet length, adding it
/// as the group `name`.
pub(crate) fn region(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context,
                     name: &str)
                     -> Result<()>
{
    let len = cursor.read_be_u16("subpacket area length")? as usize;
    let data = cursor.read_bytes("subpacket area", len)?;

    let mut group = Item::new(name)
        .with_note(format!("{} bytes", len))
        .with_dump(ctx.debug_dump(&data));
    let (items, r) = parse_region(&data, Namespace::Signature, ctx);
    group.children_mut().extend(items);
    item.push(group);
    r
}

/// Decodes a sequence of subpackets.
///
/// Errors in a subpacket's body are recorded in its item, and
/// decoding continues with the next subpacket.  Errors in the framing
/// end the region; the items decoded so far are returned along with
/// the error.
pub(crate) fn parse_region(data: &[u8], ns: Namespace, ctx: &mut Context)
                           -> (Vec<Item>, Result<()>)
{
    let mut items = Vec::new();
    let mut cursor = Cursor::new(data);
    while cursor.rest() > 0 {
        match subpacket(&mut cursor, ns, ctx) {
            Ok(item) => items.push(item),
            Err(err) => return (items, Err(err)),
        }
    }
    (items, Ok(()))
}

/// Reads a subpacket length.
///
/// This is the new format length encoding without partial lengths:
/// first octets 192 to 254 all start a two-octet length.
fn length(cursor: &mut Cursor) -> Result<usize> {
    let octet1 = cursor.read_u8("subpacket length")?;
    let len = match octet1 {
        0..=191 => octet1 as usize,
        192..=254 => {
            let octet2 = cursor.read_u8("subpacket length")?;
            ((octet1 as usize - 192) << 8) + octet2 as usize + 192
        }
        255 => cursor.read_be_u32("subpacket length")? as usize,
    };
    Ok(len)
}

fn subpacket(cursor: &mut Cursor, ns: Namespace, ctx: &mut Context)
             -> Result<Item>
{
    let len = length(cursor)?;
    if len == 0 {
        return Err(Error::MalformedHeader(
            "subpacket with zero length".into()).into());
    }
    let body = cursor.read_bytes("subpacket", len)?;
    let data = &body[1..];

    let (label, critical) = match ns {
        Namespace::Signature =>
            (SubpacketTag::from(body[0] & 0x7f).to_string(),
             body[0] & 0x80 != 0),
        Namespace::UserAttribute =>
            (UserAttributeTag::from(body[0]).to_string(), false),
    };
    trace!("{}{}: {} bytes", label,
           if critical { " (critical)" } else { "" }, data.len());

    let name = if critical {
        format!("{} (critical)", label)
    } else {
        label
    };
    let mut item = Item::new(name)
        .with_note(format!("{} bytes", data.len()))
        .with_dump(ctx.debug_dump(data));

    let mut c = Cursor::new(data);
    let r = match ns {
        Namespace::Signature =>
            signature_subpacket(&mut item, &mut c, ctx,
                                SubpacketTag::from(body[0] & 0x7f)),
        Namespace::UserAttribute =>
            attribute_subpacket(&mut item, &mut c, ctx,
                                UserAttributeTag::from(body[0])),
    };
    if let Err(err) = r {
        warn!("{}: {:#}", item.name(), err);
        item.push(Item::new("Error").with_value(format!("{:#}", err)));
    }
    Ok(item)
}

/// Sets a scalar value.
///
/// The value replaces the length note.
fn scalar<V: Into<String>>(item: &mut Item, value: V) {
    item.set_value(value);
    item.set_note(None);
}

fn signature_subpacket(item: &mut Item, c: &mut Cursor, ctx: &mut Context,
                       tag: SubpacketTag)
                       -> Result<()>
{
    use SubpacketTag::*;
    match tag {
        SignatureCreationTime => {
            let t = Timestamp::from(c.read_be_u32("creation time")?);
            scalar(item, ctx.format_time(t));
            ctx.set_sig_creation_time(Some(t));
        }
        SignatureExpirationTime => {
            let d = Duration::from(c.read_be_u32("expiration time")?);
            values::expiration(item, ctx, ctx.sig_creation_time(), d);
        }
        KeyExpirationTime => {
            let d = Duration::from(c.read_be_u32("expiration time")?);
            values::expiration(item, ctx, ctx.key_creation_time(), d);
        }
        ExportableCertification => {
            let b = c.read_u8("exportable")?;
            scalar(item, if b == 0 { "Not exportable" } else { "Exportable" });
        }
        Revocable => {
            let b = c.read_u8("revocable")?;
            scalar(item, if b == 0 { "Not revocable" } else { "Revocable" });
        }
        PrimaryUserID => {
            let b = c.read_u8("primary")?;
            scalar(item, if b == 0 { "Not primary" } else { "Primary" });
        }
        TrustSignature => {
            let level = c.read_u8("trust level")?;
            let amount = c.read_u8("trust amount")?;
            item.push(Item::new("Level").with_value(level.to_string()));
            item.push(Item::new("Trust amount").with_value(amount.to_string())
                      .with_note(match amount {
                          0..=59 => "untrusted",
                          60..=119 => "partial trust",
                          _ => "complete trust",
                      }));
        }
        RegularExpression => {
            let re = c.read_to_end();
            let re = re.strip_suffix(&[0u8]).unwrap_or(&re[..]);
            scalar(item, values::text(re));
        }
        PreferredKeyServer | PolicyURI | SignersUserID =>
            scalar(item, values::text(&c.read_to_end())),
        PreferredSymmetricAlgorithms =>
            for id in c.read_to_end() {
                item.push(values::sym_algo(ctx, id));
            },
        PreferredHashAlgorithms =>
            for id in c.read_to_end() {
                item.push(values::hash_algo(ctx, id));
            },
        PreferredCompressionAlgorithms =>
            for id in c.read_to_end() {
                item.push(values::compression_algo(ctx, id));
            },
        PreferredAEADAlgorithms =>
            for id in c.read_to_end() {
                item.push(values::aead_algo(ctx, id));
            },
        RevocationKey => {
            let class = c.read_u8("revocation key class")?;
            let mut i = Item::new("Class")
                .with_value(format!("{:#04x}", class))
                .with_dump(ctx.debug_dump(&[class]));
            if class & 0x40 != 0 {
                i.set_note(Some("sensitive".into()));
            }
            item.push(i);
            item.push(values::pk_algo(ctx, c.read_u8("public key algorithm")?));
            let fp = c.read_bytes("fingerprint", 20)?;
            item.push(values::raw_data(ctx, "Fingerprint", &fp, true));
        }
        Issuer => {
            let id: [u8; 8] = c.read_array("issuer key id")?;
            scalar(item, format!("0x{}", to_hex(&id)));
            item.set_dump(None);
        }
        NotationData => notation(item, c, ctx)?,
        KeyServerPreferences =>
            item.children_mut().extend(
                types::expand(&c.read_to_end(), types::KEY_SERVER_PREFERENCES)),
        KeyFlags =>
            item.children_mut().extend(
                types::expand(&c.read_to_end(), types::KEY_FLAGS)),
        Features =>
            item.children_mut().extend(
                types::expand(&c.read_to_end(), types::FEATURES)),
        ReasonForRevocation => {
            let code = c.read_u8("reason for revocation")?;
            item.push(Item::new("Reason")
                      .with_value(format!("{} (rev {})",
                                          types::ReasonForRevocation::from(code),
                                          code))
                      .with_dump(ctx.debug_dump(&[code])));
            if c.rest() > 0 {
                item.push(Item::new("Additional information")
                          .with_value(values::text(&c.read_to_end())));
            }
        }
        SignatureTarget => {
            item.push(values::pk_algo(ctx, c.read_u8("public key algorithm")?));
            item.push(values::hash_algo(ctx, c.read_u8("hash algorithm")?));
            let hash = c.read_to_end();
            item.push(values::raw_data(ctx, "Hash", &hash, true));
        }
        EmbeddedSignature => {
            ctx.enter()?;
            let creation_time = ctx.sig_creation_time();
            let r = signature::signature(item, c, ctx);
            ctx.set_sig_creation_time(creation_time);
            ctx.leave();
            r?;
        }
        IssuerFingerprint | IntendedRecipient => fingerprint(item, c, ctx)?,
        PlaceholderForBackwardCompatibility | Reserved(_) | Unknown(_) =>
            item.set_dump(Some(ctx.dump(&c.read_to_end()))),
        Private(_) => {
            let dump = ctx.options().private_dump || ctx.options().debug;
            item.set_dump(ctx.dump_if(dump, &c.read_to_end()));
        }
    }
    values::trailing(item, c, ctx);
    Ok(())
}

fn notation(item: &mut Item, c: &mut Cursor, ctx: &Context) -> Result<()> {
    let flags: [u8; 4] = c.read_array("notation flags")?;
    let name_len = c.read_be_u16("notation name length")? as usize;
    let value_len = c.read_be_u16("notation value length")? as usize;

    item.children_mut().extend(types::expand(&flags, types::NOTATION_FLAGS));
    let name = c.read_bytes("notation name", name_len)?;
    item.push(Item::new("Name").with_value(values::text(&name)));

    let value = c.read_bytes("notation value", value_len)?;
    if flags[0] & 0x80 != 0 {
        item.push(Item::new("Value").with_value(values::text(&value)));
    } else {
        item.push(values::raw_data(ctx, "Value", &value, true));
    }
    Ok(())
}

fn fingerprint(item: &mut Item, c: &mut Cursor, ctx: &Context) -> Result<()> {
    let version = c.read_u8("fingerprint version")?;
    let note = match version {
        4 => "need 20 octets length",
        5 | 6 => "need 32 octets length",
        _ => "unknown",
    };
    item.push(Item::new("Version").with_value(version.to_string())
              .with_note(note));
    let fp = c.read_to_end();
    item.push(values::raw_data(ctx, "Fingerprint", &fp, true));
    Ok(())
}

fn attribute_subpacket(item: &mut Item, c: &mut Cursor, ctx: &mut Context,
                       tag: UserAttributeTag)
                       -> Result<()>
{
    match tag {
        UserAttributeTag::Image => image(item, c, ctx)?,
        UserAttributeTag::Private(_) => {
            let dump = ctx.options().private_dump || ctx.options().debug;
            item.set_dump(ctx.dump_if(dump, &c.read_to_end()));
        }
        UserAttributeTag::Unknown(_) =>
            item.set_dump(Some(ctx.dump(&c.read_to_end()))),
    }
    Ok(())
}

/// Decodes an image attribute, see [Section 5.12.1 of RFC 4880].
///
/// The header length is little-endian.
///
///   [Section 5.12.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.12.1
fn image(item: &mut Item, c: &mut Cursor, ctx: &Context) -> Result<()> {
    let raw: [u8; 2] = c.read_array("image header length")?;
    let header_len = u16::from_le_bytes(raw) as usize;
    item.push(Item::new("Image header length")
              .with_value(header_len.to_string())
              .with_dump(ctx.debug_dump(&raw)));

    let version = c.read_u8("image header version")?;
    item.push(Item::new("Version").with_value(version.to_string())
              .with_dump(ctx.debug_dump(&[version])));
    if version != 1 {
        return Err(Error::UnsupportedStructure(
            format!("unknown image header version {}", version)).into());
    }

    let encoding = c.read_u8("image encoding")?;
    item.push(Item::new("Encoding")
              .with_value(match encoding {
                  1 => format!("JPEG (enc {})", encoding),
                  100..=110 => format!("Private/Experimental (enc {})",
                                       encoding),
                  _ => format!("Unknown (enc {})", encoding),
              })
              .with_dump(ctx.debug_dump(&[encoding])));

    // The rest of the header is reserved.
    if header_len > 4 {
        c.read_bytes("image header", header_len - 4)?;
    }
    let image = c.read_to_end();
    item.push(values::raw_data(ctx, "Image data", &image, ctx.options().debug));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::tests::{hex, verbose};

    fn sig_region(ctx: &mut Context, data: &[u8]) -> (Vec<Item>, Result<()>) {
        parse_region(data, Namespace::Signature, ctx)
    }

    #[test]
    fn creation_time() {
        let mut ctx = verbose();
        let (items, r) = sig_region(&mut ctx, &hex("05 02 54 c3 08 df"));
        r.unwrap();
        assert_eq!(items[0].to_string(), "\
Signature Creation Time (sub 2): 2015-01-24T02:52:15Z
\t54 c3 08 df
");
        assert_eq!(ctx.sig_creation_time(), Some(Timestamp::from(0x54c308df)));
    }

    #[test]
    fn key_expiration() {
        let mut ctx = verbose();
        ctx.set_key_creation_time(Some(Timestamp::from(0x54c301bf)));
        let (items, r) = sig_region(&mut ctx, &hex("05 09 00 09 3a 80"));
        r.unwrap();
        assert_eq!(items[0].to_string(), "\
Key Expiration Time (sub 9): 2015-01-31T02:21:51Z (7 days after)
\t00 09 3a 80
");
    }

    #[test]
    fn critical() {
        let mut ctx = Context::new(Default::default());
        let (items, r) = sig_region(&mut ctx, &hex("02 9b 03"));
        r.unwrap();
        assert_eq!(items[0].name(), "Key Flags (sub 27) (critical)");
        assert_eq!(items[0].children().len(), 2);

        // No critical bit in user attributes.
        let (items, r) = parse_region(&hex("02 e5 00"),
                                      Namespace::UserAttribute, &mut ctx);
        r.unwrap();
        assert_eq!(items[0].name(), "Unknown (sub 229)");
    }

    #[test]
    fn framing() {
        let mut ctx = Context::new(Default::default());
        let (items, r) = sig_region(&mut ctx, &hex("02 07 01 00"));
        assert_eq!(items.len(), 1);
        assert!(matches!(r.unwrap_err().downcast_ref::<Error>(),
                         Some(Error::MalformedHeader(_))));

        let (items, r) = sig_region(&mut ctx, &hex("02 07 01 05 02 00"));
        assert_eq!(items.len(), 1);
        assert!(Error::is_truncated(&r.unwrap_err()));
    }

    #[test]
    fn body_errors_do_not_stop_the_region() {
        let mut ctx = Context::new(Default::default());
        let (items, r) = sig_region(&mut ctx, &hex("03 02 54 c3 02 19 01"));
        r.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].child("Error").is_some());
        assert_eq!(items[1].value(), Some("Primary"));
    }

    #[test]
    fn two_octet_lengths() {
        let mut ctx = Context::new(Default::default());
        let mut data = vec![0xc0, 0x00, 26];
        data.extend_from_slice(&[b'x'; 191]);
        let (items, r) = sig_region(&mut ctx, &data);
        r.unwrap();
        assert_eq!(items[0].value().map(str::len), Some(191));
    }

    #[test]
    fn issuer_fingerprint() {
        let mut ctx = verbose();
        let (items, r) = sig_region(&mut ctx, &hex(
            "16 21 04 1b 52 02 db 4a 3e c7 76 f1 e0 ad 18 b4 \
             da 3b ae 7e 20 b8 1c 09 10 b4 da 3b ae 7e 20 b8 1c"));
        r.unwrap();
        assert_eq!(items[0].to_string(), "\
Issuer Fingerprint (sub 33) (21 bytes)
\t04 1b 52 02 db 4a 3e c7 76 f1 e0 ad 18 b4 da 3b ae 7e 20 b8 1c
\tVersion: 4 (need 20 octets length)
\tFingerprint (20 bytes)
\t\t1b 52 02 db 4a 3e c7 76 f1 e0 ad 18 b4 da 3b ae 7e 20 b8 1c
");
        assert_eq!(items[1].to_string(),
                   "Issuer (sub 16): 0xb4da3bae7e20b81c\n");
    }

    #[test]
    fn notation() {
        let mut ctx = Context::new(Default::default());
        let mut data = hex("80 00 00 00 00 04 00 02");
        data.extend_from_slice(b"testhi");
        let mut body = vec![data.len() as u8 + 1, 20];
        body.extend(data);
        let (items, r) = sig_region(&mut ctx, &body);
        r.unwrap();
        assert_eq!(items[0].to_string(), "\
Notation Data (sub 20) (14 bytes)
\tFlag: Human-readable
\tName: test
\tValue: hi
");
    }

    #[test]
    fn private_subpackets() {
        let mut ctx = Context::new(Default::default());
        let (items, _) = sig_region(&mut ctx, &hex("03 65 01 02"));
        assert!(items[0].dump().is_none());

        let mut ctx = verbose();
        let (items, _) = sig_region(&mut ctx, &hex("03 65 01 02"));
        assert_eq!(items[0].dump().unwrap().to_string(), "01 02");
    }

    #[test]
    fn embedded_signature_restores_creation_time() {
        let mut ctx = Context::new(Default::default());
        ctx.set_sig_creation_time(Some(Timestamp::from(1)));
        // A v4 signature with a creation time subpacket and no MPIs
        // for an unknown algorithm.
        let sig = hex("04 00 63 08 00 06 05 02 00 00 00 02 00 00 aa bb");
        let mut data = vec![sig.len() as u8 + 1, 32];
        data.extend(sig);
        let (items, r) = sig_region(&mut ctx, &data);
        r.unwrap();
        assert!(items[0].child("Error").is_none());
        assert_eq!(items[0].children()[0].value(), Some("4"));
        assert_eq!(ctx.sig_creation_time(), Some(Timestamp::from(1)));
    }

    #[test]
    fn image_attribute() {
        let mut ctx = verbose();
        let mut data = hex("10 00 01 01");
        data.extend_from_slice(&[0; 12]);
        data.extend_from_slice(&[0xff, 0xd8]);
        let mut body = vec![data.len() as u8 + 1, 1];
        body.extend(data);
        let (items, r) = parse_region(&body, Namespace::UserAttribute,
                                      &mut ctx);
        r.unwrap();
        let image = &items[0];
        assert_eq!(image.name(), "Image Attribute (sub 1)");
        assert_eq!(image.child("Image header length").unwrap().value(),
                   Some("16"));
        assert_eq!(image.child("Encoding").unwrap().value(),
                   Some("JPEG (enc 1)"));
        assert_eq!(image.child("Image data").unwrap().note(),
                   Some("2 bytes"));
    }
}

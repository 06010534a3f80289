//! Items for the scalar fields shared by several packet types.

use crate::{Context, Cursor, Error, Item, Result};
use crate::item::to_hex;
use crate::s2k::{GnuMode, S2K};
use crate::types::{
    AEADAlgorithm,
    CompressionAlgorithm,
    Duration,
    HashAlgorithm,
    PublicKeyAlgorithm,
    SignatureType,
    SymmetricAlgorithm,
    Timestamp,
};

/// Reads a version octet and adds a `Version` item.
///
/// `known` maps the supported versions to a note.  Other versions
/// are added with the note `unknown` and are rejected with
/// [`Error::UnsupportedStructure`].
pub(crate) fn version(item: &mut Item, cursor: &mut Cursor, ctx: &Context,
                      known: &[(u8, &'static str)])
                      -> Result<u8>
{
    let v = cursor.read_u8("version")?;
    let note = known.iter().find(|(k, _)| *k == v).map(|(_, note)| *note);
    item.push(Item::new("Version")
              .with_value(v.to_string())
              .with_note(note.unwrap_or("unknown"))
              .with_dump(ctx.debug_dump(&[v])));

    if note.is_none() {
        return Err(Error::UnsupportedStructure(
            format!("unknown version {}", v)).into());
    }
    Ok(v)
}

pub(crate) fn pk_algo(ctx: &Context, id: u8) -> Item {
    Item::new("Public-key Algorithm")
        .with_value(format!("{} (pub {})", PublicKeyAlgorithm::from(id), id))
        .with_dump(ctx.debug_dump(&[id]))
}

pub(crate) fn hash_algo(ctx: &Context, id: u8) -> Item {
    Item::new("Hash Algorithm")
        .with_value(format!("{} (hash {})", HashAlgorithm::from(id), id))
        .with_dump(ctx.debug_dump(&[id]))
}

pub(crate) fn sym_algo(ctx: &Context, id: u8) -> Item {
    Item::new("Symmetric Algorithm")
        .with_value(format!("{} (sym {})", SymmetricAlgorithm::from(id), id))
        .with_dump(ctx.debug_dump(&[id]))
}

pub(crate) fn aead_algo(ctx: &Context, id: u8) -> Item {
    Item::new("AEAD Algorithm")
        .with_value(format!("{} (aead {})", AEADAlgorithm::from(id), id))
        .with_dump(ctx.debug_dump(&[id]))
}

pub(crate) fn compression_algo(ctx: &Context, id: u8) -> Item {
    Item::new("Compression Algorithm")
        .with_value(format!("{} (comp {})",
                            CompressionAlgorithm::from(id), id))
        .with_dump(ctx.debug_dump(&[id]))
}

pub(crate) fn sig_type(ctx: &Context, id: u8) -> Item {
    Item::new("Signature Type")
        .with_value(SignatureType::from(id).to_string())
        .with_note(format!("{:#04x}", id))
        .with_dump(ctx.debug_dump(&[id]))
}

/// Returns a time item for the four octets `raw`.
pub(crate) fn time(ctx: &Context, name: &str, raw: [u8; 4]) -> Item {
    let t = Timestamp::from(u32::from_be_bytes(raw));
    Item::new(name)
        .with_value(ctx.format_time(t))
        .with_dump(ctx.debug_dump(&raw))
}

/// Renders an expiration offset relative to `base`.
///
/// Sets `item`'s value to the absolute expiration time, and its note
/// to the offset.  Without a base time, the value is the offset.
pub(crate) fn expiration(item: &mut Item, ctx: &Context,
                         base: Option<Timestamp>, offset: Duration)
{
    if offset.as_secs() == 0 {
        item.set_value("Never expires");
        item.set_note(None);
        return;
    }

    match base.and_then(|b| b.checked_add(offset)) {
        Some(t) => {
            item.set_value(ctx.format_time(t));
            item.set_note(Some(format!("{} after", offset)));
        }
        None => {
            item.set_value(offset.to_string());
            item.set_note(None);
        }
    }
}

pub(crate) fn key_id(raw: &[u8]) -> Item {
    Item::new("Key ID").with_value(format!("0x{}", to_hex(raw)))
}

/// Returns an item for an opaque run of octets.
///
/// The note gives the length; the octets are dumped if `dump` holds.
pub(crate) fn raw_data(ctx: &Context, name: &str, data: &[u8], dump: bool)
                       -> Item
{
    Item::new(name)
        .with_note(format!("{} bytes", data.len()))
        .with_dump(ctx.dump_if(dump, data))
}

/// Adds an `Unknown data` item for anything left in `cursor`.
pub(crate) fn trailing(item: &mut Item, cursor: &mut Cursor, ctx: &Context) {
    if cursor.rest() > 0 {
        let rest = cursor.read_to_end();
        item.push(raw_data(ctx, "Unknown data", &rest, true));
    }
}

/// Reads an S2K specifier and adds its item.
pub(crate) fn s2k(item: &mut Item, cursor: &mut Cursor, ctx: &Context)
                  -> Result<S2K>
{
    let s2k = S2K::parse(cursor)?;
    let mut i = Item::new("String-to-Key (S2K) Algorithm")
        .with_value(s2k.to_string())
        .with_dump(ctx.debug_dump(&[s2k.id()]));

    match s2k {
        S2K::Simple { hash } => i.push(hash_algo(ctx, hash.into())),
        S2K::Salted { hash, ref salt } => {
            i.push(hash_algo(ctx, hash.into()));
            i.push(Item::new("Salt").with_dump(Some(ctx.dump(salt))));
        }
        S2K::Iterated { hash, ref salt, coded_count } => {
            i.push(hash_algo(ctx, hash.into()));
            i.push(Item::new("Salt").with_dump(Some(ctx.dump(salt))));
            i.push(Item::new("Count")
                   .with_value(S2K::decode_count(coded_count).to_string())
                   .with_note(format!("coded count {:#04x}", coded_count))
                   .with_dump(ctx.debug_dump(&[coded_count])));
        }
        S2K::Gnu { hash, ref mode } => {
            i.push(hash_algo(ctx, hash.into()));
            let mut m = Item::new("GnuPG extension mode")
                .with_value(mode.to_string());
            if let GnuMode::DivertToCard(serial) = mode {
                m.push(Item::new("Serial number")
                       .with_dump(Some(ctx.dump(serial))));
            }
            i.push(m);
        }
        S2K::Private(_) | S2K::Unknown(_) => (),
    }

    item.push(i);
    Ok(s2k)
}

/// Returns the text of a string field.
///
/// Invalid UTF-8 sequences are replaced.
pub(crate) fn text(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;

    fn utc() -> Context {
        Context::new(Options { utc: true, ..Default::default() })
    }

    #[test]
    fn versions() {
        let ctx = utc();
        let mut item = Item::new("p");
        let mut c = Cursor::new(&[4, 7][..]);
        assert_eq!(version(&mut item, &mut c, &ctx, &[(4, "current")])
                   .unwrap(), 4);
        let err = version(&mut item, &mut c, &ctx, &[(4, "current")])
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(),
                         Some(Error::UnsupportedStructure(_))));
        assert_eq!(item.to_string(),
                   "p\n\tVersion: 4 (current)\n\tVersion: 7 (unknown)\n");
    }

    #[test]
    fn algorithms() {
        let ctx = utc();
        assert_eq!(pk_algo(&ctx, 19).to_string(),
                   "Public-key Algorithm: ECDSA public key algorithm (pub 19)\n");
        assert_eq!(hash_algo(&ctx, 8).value(), Some("SHA2-256 (hash 8)"));
        assert_eq!(sym_algo(&ctx, 9).value(),
                   Some("AES with 256-bit key (sym 9)"));
        assert_eq!(sig_type(&ctx, 0x13).note(), Some("0x13"));
    }

    #[test]
    fn expirations() {
        let ctx = utc();
        let base = Some(Timestamp::from(0x54c301bf));
        let mut item = Item::new("e").with_note("4 bytes");

        expiration(&mut item, &ctx, base, Duration::from(0x00093a80));
        assert_eq!(item.value(), Some("2015-01-31T02:21:51Z"));
        assert_eq!(item.note(), Some("7 days after"));

        expiration(&mut item, &ctx, None, Duration::from(90));
        assert_eq!(item.value(), Some("90 seconds"));
        assert_eq!(item.note(), None);

        expiration(&mut item, &ctx, base, Duration::from(0));
        assert_eq!(item.value(), Some("Never expires"));
    }

    #[test]
    fn s2k_items() {
        let ctx = utc();
        let mut item = Item::new("k");
        let data = [3, 2, 1, 2, 3, 4, 5, 6, 7, 8, 0x60];
        s2k(&mut item, &mut Cursor::new(&data), &ctx).unwrap();
        assert_eq!(item.to_string(), "\
k
\tString-to-Key (S2K) Algorithm: Iterated and Salted S2K (s2k 3)
\t\tHash Algorithm: SHA-1 (hash 2)
\t\tSalt
\t\t\t01 02 03 04 05 06 07 08
\t\tCount: 65536 (coded count 0x60)
");
    }
}

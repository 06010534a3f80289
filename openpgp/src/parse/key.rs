//! Public and secret key packets.

use crate::{Context, Cursor, Item, Result};
use crate::s2k::S2K;
use crate::types::{
    AEADAlgorithm,
    Duration,
    PublicKeyAlgorithm,
    SymmetricAlgorithm,
    Timestamp,
};
use super::{mpis, values};

const VERSIONS: &[(u8, &str)] = &[
    (2, "old"),
    (3, "old"),
    (4, "current"),
    (5, "draft"),
];

/// Decodes a public key or public subkey packet body, see [Section
/// 5.5.2 of RFC 4880].
///
///   [Section 5.5.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.5.2
pub(crate) fn public_key(item: &mut Item, cursor: &mut Cursor,
                         ctx: &mut Context)
                         -> Result<()>
{
    let version = values::version(item, cursor, ctx, VERSIONS)?;
    public_fields(item, cursor, ctx, version)?;
    values::trailing(item, cursor, ctx);
    Ok(())
}

/// Decodes a secret key or secret subkey packet body, see [Section
/// 5.5.3 of RFC 4880].
///
/// The public part is grouped under `Public-Key`, the secret part
/// under `Secret-Key`.
///
///   [Section 5.5.3 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.5.3
pub(crate) fn secret_key(item: &mut Item, cursor: &mut Cursor,
                         ctx: &mut Context)
                         -> Result<()>
{
    let version = values::version(item, cursor, ctx, VERSIONS)?;

    let mut public = Item::new("Public-Key");
    let r = public_fields(&mut public, cursor, ctx, version);
    item.push(public);
    let algo = r?;

    let mut secret = Item::new("Secret-Key");
    let r = secret_fields(&mut secret, cursor, ctx, version, algo);
    item.push(secret);
    r?;

    values::trailing(item, cursor, ctx);
    Ok(())
}

/// Decodes the fields shared by public and secret keys.
///
/// Sets the key creation time in `ctx`.
fn public_fields(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context,
                 version: u8)
                 -> Result<PublicKeyAlgorithm>
{
    let raw: [u8; 4] = cursor.read_array("key creation time")?;
    let created = Timestamp::from(u32::from_be_bytes(raw));
    item.push(values::time(ctx, "Public key creation time", raw));
    ctx.set_key_creation_time(Some(created));

    if version < 4 {
        let days = cursor.read_be_u16("validity period")?;
        let mut valid = Item::new("Valid days")
            .with_dump(ctx.debug_dump(&days.to_be_bytes()));
        let offset = Duration::from(u32::from(days).saturating_mul(86400));
        values::expiration(&mut valid, ctx, Some(created), offset);
        item.push(valid);
    }

    let algo = cursor.read_u8("public key algorithm")?;
    item.push(values::pk_algo(ctx, algo));
    let algo = PublicKeyAlgorithm::from(algo);

    if version == 5 {
        let len = cursor.read_be_u32("key material length")?;
        let material = cursor.read_bytes("key material", len as usize)?;
        let mut c = Cursor::new(&material);
        mpis::public_key(item, &mut c, ctx, algo)?;
        values::trailing(item, &mut c, ctx);
    } else {
        mpis::public_key(item, cursor, ctx, algo)?;
    }
    Ok(algo)
}

fn secret_fields(item: &mut Item, cursor: &mut Cursor, ctx: &Context,
                 version: u8, algo: PublicKeyAlgorithm)
                 -> Result<()>
{
    let usage = cursor.read_u8("S2K usage")?;
    let note = match usage {
        0 => "the secret-key data is not encrypted.",
        253 => "the secret-key data is encrypted and AEAD protected.",
        254 => "the secret-key data is encrypted, followed by a SHA-1 hash.",
        255 => "the secret-key data is encrypted, followed by a checksum.",
        _ => "the secret-key data is encrypted by a legacy method.",
    };
    item.set_note(Some(note.into()));

    if usage == 0 {
        if version == 5 {
            cursor.read_be_u32("secret key material length")?;
        }
        mpis::secret_key(item, cursor, ctx, algo)?;
        let checksum: [u8; 2] = cursor.read_array("checksum")?;
        item.push(Item::new("Checksum").with_dump(Some(ctx.dump(&checksum))));
        return Ok(());
    }

    let (sym, aead) = match usage {
        253 | 254 | 255 => {
            if version == 5 {
                cursor.read_u8("S2K parameters length")?;
            }
            let sym = cursor.read_u8("symmetric algorithm")?;
            item.push(values::sym_algo(ctx, sym));
            let aead = if usage == 253 {
                let aead = cursor.read_u8("AEAD algorithm")?;
                item.push(values::aead_algo(ctx, aead));
                Some(AEADAlgorithm::from(aead))
            } else {
                None
            };

            match values::s2k(item, cursor, ctx)? {
                // No secret key material, or no known layout.
                S2K::Gnu { .. } => return Ok(()),
                S2K::Private(_) | S2K::Unknown(_) => {
                    encrypted(item, cursor, ctx);
                    return Ok(());
                }
                _ => (),
            }
            (SymmetricAlgorithm::from(sym), aead)
        }
        // Without an S2K specifier, the usage octet is the algorithm.
        _ => {
            item.push(values::sym_algo(ctx, usage));
            (SymmetricAlgorithm::from(usage), None)
        }
    };

    let iv_size = match aead {
        Some(aead) => aead.iv_size(),
        None => sym.block_size(),
    };
    if let Some(size) = iv_size {
        let iv = cursor.read_bytes("IV", size)?;
        item.push(Item::new("IV").with_dump(Some(ctx.dump(&iv))));
    }
    if version == 5 {
        cursor.read_be_u32("secret key material length")?;
    }
    encrypted(item, cursor, ctx);
    Ok(())
}

fn encrypted(item: &mut Item, cursor: &mut Cursor, ctx: &Context) {
    let data = cursor.read_to_end();
    item.push(values::raw_data(ctx, "Encrypted data", &data,
                               ctx.options().debug));
}

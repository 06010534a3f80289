//! Data carrying packets.
//!
//! Encrypted data is never decrypted; only the framing fields are
//! decoded.  Compressed data is decompressed when support for the
//! algorithm is compiled in, and the packets inside are decoded as
//! children of the compressed data packet.

use std::io::{self, Read};

use log::{trace, warn};

use crate::{AlgMode, Context, Cursor, Error, Item, Result};
use crate::types::{AEADAlgorithm, CompressionAlgorithm, DataFormat};
use super::{parse_packets, values};

/// Decodes a compressed data packet body, see [Section 5.6 of RFC
/// 4880].
///
///   [Section 5.6 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.6
pub(crate) fn compressed(item: &mut Item, cursor: &mut Cursor,
                         ctx: &mut Context)
                         -> Result<()>
{
    let algo = cursor.read_u8("compression algorithm")?;
    item.push(values::compression_algo(ctx, algo));
    let data = cursor.read_to_end();
    item.push(values::raw_data(ctx, "Compressed data", &data,
                               ctx.options().debug));

    let algo = CompressionAlgorithm::from(algo);
    let inner = match algo {
        CompressionAlgorithm::Uncompressed => data,
        _ => match inflate(algo, &data, ctx.options().max_packet_size)? {
            Some(inner) => inner,
            None => {
                trace!("Not decompressing {}", algo);
                return Ok(());
            }
        },
    };

    ctx.enter()?;
    let r = parse_packets(&inner, ctx, item.children_mut());
    ctx.leave();
    r
}

/// Decompresses `data`.
///
/// Returns `None` if the algorithm is not supported.  Fails if the
/// decompressed data exceeds `limit` bytes.
fn inflate(algo: CompressionAlgorithm, data: &[u8], limit: usize)
           -> Result<Option<Vec<u8>>>
{
    let reader: Box<dyn io::Read + '_> = match algo {
        #[cfg(feature = "compression-deflate")]
        CompressionAlgorithm::Zip =>
            Box::new(buffered_reader::Deflate::with_cookie(
                buffered_reader::Memory::with_cookie(data, ()), ())),
        #[cfg(feature = "compression-deflate")]
        CompressionAlgorithm::Zlib =>
            Box::new(buffered_reader::Zlib::with_cookie(
                buffered_reader::Memory::with_cookie(data, ()), ())),
        #[cfg(feature = "compression-bzip2")]
        CompressionAlgorithm::BZip2 =>
            Box::new(buffered_reader::Bzip::with_cookie(
                buffered_reader::Memory::with_cookie(data, ()), ())),
        _ => return Ok(None),
    };

    let mut inner = Vec::new();
    if let Err(err) = reader.take(limit as u64 + 1).read_to_end(&mut inner) {
        warn!("Decompressing {} data: {}", algo, err);
        return Err(anyhow::Error::from(err)
                   .context(format!("Decompressing {} data", algo)));
    }
    if inner.len() > limit {
        return Err(Error::MalformedHeader(
            format!("decompressed data exceeds {} bytes", limit)).into());
    }
    Ok(Some(inner))
}

/// The value of encrypted data items: where the symmetric algorithm
/// is specified.
fn sym_source(ctx: &Context) -> &'static str {
    match ctx.alg_mode() {
        AlgMode::SymmetricEncryption =>
            "sym alg is specified in sym-key encrypted session key",
        AlgMode::PublicKeyEncryption =>
            "sym alg is specified in pub-key encrypted session key",
        AlgMode::NotSpecified => "sym alg is IDEA, simple string-to-key",
    }
}

/// Decodes a symmetrically encrypted data packet body, see [Section
/// 5.7 of RFC 4880].
///
///   [Section 5.7 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.7
pub(crate) fn sed(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
                  -> Result<()>
{
    let data = cursor.read_to_end();
    item.push(values::raw_data(ctx, "Encrypted data", &data,
                               ctx.options().debug)
              .with_value(sym_source(ctx)));
    Ok(())
}

pub(crate) fn marker(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
                     -> Result<()>
{
    let data = cursor.read_to_end();
    item.push(values::raw_data(ctx, "Literal data", &data,
                               ctx.options().marker_dump)
              .with_value(values::text(&data)));
    Ok(())
}

/// Decodes a literal data packet body, see [Section 5.9 of RFC 4880].
///
///   [Section 5.9 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.9
pub(crate) fn literal(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
                      -> Result<()>
{
    let format = cursor.read_u8("literal data format")?;
    item.push(Item::new("Literal data format")
              .with_value(format!("{} ({})", DataFormat::from(format),
                                  (format as char).escape_default()))
              .with_dump(ctx.debug_dump(&[format])));

    let len = cursor.read_u8("file name length")?;
    let name = cursor.read_bytes("file name", len as usize)?;
    item.push(Item::new("File name")
              .with_value(values::text(&name))
              .with_dump(ctx.debug_dump(&name)));

    let raw: [u8; 4] = cursor.read_array("modification time")?;
    let mut time = values::time(ctx, "Modification time of a file", raw);
    if raw == [0; 4] {
        time.set_value("null");
    }
    item.push(time);

    let data = cursor.read_to_end();
    item.push(values::raw_data(ctx, "Literal data", &data,
                               ctx.options().literal_dump));
    Ok(())
}

pub(crate) fn trust(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
                    -> Result<()>
{
    let data = cursor.read_to_end();
    item.push(values::raw_data(ctx, "Trust", &data, true));
    Ok(())
}

/// Reads the chunk size octet of AEAD protected data.
fn chunk_size(item: &mut Item, cursor: &mut Cursor, ctx: &Context)
              -> Result<()>
{
    let c = cursor.read_u8("chunk size")?;
    let mut i = Item::new("Chunk size")
        .with_note(format!("chunk bits {}", c))
        .with_dump(ctx.debug_dump(&[c]));
    match 1u64.checked_shl(u32::from(c) + 6) {
        Some(size) if c <= 56 => i.set_value(format!("{} bytes", size)),
        _ => i.set_value("invalid"),
    }
    item.push(i);
    Ok(())
}

/// Decodes a symmetrically encrypted integrity protected data packet
/// body, see [Section 5.13 of RFC 4880].
///
///   [Section 5.13 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.13
pub(crate) fn seip(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
                   -> Result<()>
{
    let version = values::version(item, cursor, ctx, &[
        (1, "current"),
        (2, "draft"),
    ])?;

    if version == 1 {
        let data = cursor.read_to_end();
        item.push(values::raw_data(ctx, "Encrypted data", &data,
                                   ctx.options().debug)
                  .with_value(format!("{}; plain text + MDC SHA1(20 bytes)",
                                      sym_source(ctx))));
        return Ok(());
    }

    item.push(values::sym_algo(ctx, cursor.read_u8("symmetric algorithm")?));
    item.push(values::aead_algo(ctx, cursor.read_u8("AEAD algorithm")?));
    chunk_size(item, cursor, ctx)?;
    let salt = cursor.read_bytes("salt", 32)?;
    item.push(Item::new("Salt").with_dump(Some(ctx.dump(&salt))));
    let data = cursor.read_to_end();
    item.push(values::raw_data(ctx, "Encrypted data", &data,
                               ctx.options().debug));
    Ok(())
}

/// Decodes a modification detection code packet body, see [Section
/// 5.14 of RFC 4880].
///
///   [Section 5.14 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.14
pub(crate) fn mdc(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
                  -> Result<()>
{
    let digest: [u8; 20] = cursor.read_array("MDC")?;
    item.push(Item::new("MDC (SHA-1)")
              .with_note("20 bytes")
              .with_dump(Some(ctx.dump(&digest))));
    values::trailing(item, cursor, ctx);
    Ok(())
}

/// Decodes an AEAD encrypted data packet body, see [Section 5.16 of
/// RFC 4880bis].
///
///   [Section 5.16 of RFC 4880bis]: https://tools.ietf.org/html/draft-ietf-openpgp-rfc4880bis-10#section-5.16
pub(crate) fn aed(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
                  -> Result<()>
{
    values::version(item, cursor, ctx, &[(1, "current")])?;
    item.push(values::sym_algo(ctx, cursor.read_u8("symmetric algorithm")?));
    let aead = cursor.read_u8("AEAD algorithm")?;
    item.push(values::aead_algo(ctx, aead));
    chunk_size(item, cursor, ctx)?;

    if let Some(size) = AEADAlgorithm::from(aead).iv_size() {
        let iv = cursor.read_bytes("IV", size)?;
        item.push(Item::new("IV").with_dump(Some(ctx.dump(&iv))));
    }
    let data = cursor.read_to_end();
    item.push(values::raw_data(ctx, "Encrypted data", &data,
                               ctx.options().debug));
    Ok(())
}

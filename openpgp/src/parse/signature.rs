//! Signature and one-pass signature packets.

use crate::{Context, Cursor, Item, Result};
use crate::types::{PublicKeyAlgorithm, Timestamp};
use super::{mpis, subpacket, values};

/// Decodes a signature packet body, see [Section 5.2 of RFC 4880].
///
/// Also used for embedded signatures.
///
///   [Section 5.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2
pub(crate) fn signature(item: &mut Item, cursor: &mut Cursor,
                        ctx: &mut Context)
                        -> Result<()>
{
    let version = values::version(item, cursor, ctx, &[
        (2, "old"),
        (3, "old"),
        (4, "current"),
        (5, "draft"),
    ])?;
    ctx.set_sig_creation_time(None);

    let algo = if version < 4 {
        v3(item, cursor, ctx)?
    } else {
        v4(item, cursor, ctx)?
    };

    let left: [u8; 2] = cursor.read_array("hash prefix")?;
    item.push(Item::new("Hash left 2 bytes").with_dump(Some(ctx.dump(&left))));

    mpis::signature(item, cursor, ctx, algo)?;
    values::trailing(item, cursor, ctx);
    Ok(())
}

fn v3(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
      -> Result<PublicKeyAlgorithm>
{
    let len = cursor.read_u8("hashed material length")?;
    let hashed = cursor.read_bytes("hashed material", len as usize)?;

    let mut group = Item::new("Hashed material")
        .with_note(format!("{} bytes", len));
    let r = v3_hashed(&mut group, &mut Cursor::new(&hashed), ctx);
    item.push(group);
    r?;

    let key_id: [u8; 8] = cursor.read_array("key id")?;
    item.push(values::key_id(&key_id));

    let algo = cursor.read_u8("public key algorithm")?;
    item.push(values::pk_algo(ctx, algo));
    let hash = cursor.read_u8("hash algorithm")?;
    item.push(values::hash_algo(ctx, hash));
    Ok(algo.into())
}

fn v3_hashed(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
             -> Result<()>
{
    item.push(values::sig_type(ctx, cursor.read_u8("signature type")?));
    let created: [u8; 4] = cursor.read_array("signature creation time")?;
    item.push(values::time(ctx, "Signature creation time", created));
    ctx.set_sig_creation_time(
        Some(Timestamp::from(u32::from_be_bytes(created))));
    values::trailing(item, cursor, ctx);
    Ok(())
}

fn v4(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
      -> Result<PublicKeyAlgorithm>
{
    item.push(values::sig_type(ctx, cursor.read_u8("signature type")?));
    let algo = cursor.read_u8("public key algorithm")?;
    item.push(values::pk_algo(ctx, algo));
    let hash = cursor.read_u8("hash algorithm")?;
    item.push(values::hash_algo(ctx, hash));

    subpacket::region(item, cursor, ctx, "Hashed Subpacket")?;
    subpacket::region(item, cursor, ctx, "Unhashed Subpacket")?;
    Ok(algo.into())
}

/// Decodes a one-pass signature packet body, see [Section 5.4 of RFC
/// 4880].
///
///   [Section 5.4 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.4
pub(crate) fn one_pass_sig(item: &mut Item, cursor: &mut Cursor,
                           ctx: &mut Context)
                           -> Result<()>
{
    values::version(item, cursor, ctx, &[(3, "current")])?;
    item.push(values::sig_type(ctx, cursor.read_u8("signature type")?));
    item.push(values::hash_algo(ctx, cursor.read_u8("hash algorithm")?));
    item.push(values::pk_algo(ctx, cursor.read_u8("public key algorithm")?));
    let key_id: [u8; 8] = cursor.read_array("key id")?;
    item.push(values::key_id(&key_id));

    let nested = cursor.read_u8("nested flag")?;
    item.push(Item::new("Nested")
              .with_value(if nested == 0 {
                  "another one pass signature"
              } else {
                  "other than one pass signature"
              })
              .with_note(format!("flag {:#04x}", nested))
              .with_dump(ctx.debug_dump(&[nested])));

    values::trailing(item, cursor, ctx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tag;
    use crate::parse::dispatch;
    use crate::parse::tests::{assert_prefixes_truncated, hex, verbose};

    fn decode(tag: Tag, body: &[u8], ctx: &mut Context) -> Item {
        let (item, r) = dispatch(tag, body, ctx);
        r.unwrap();
        item
    }

    const ECDSA: &str = "
04 01 13 08 00 06 05 02 54 c3 08 df 00 0a 09 10 31 fb fd a9 5f bb fa 18
36 1f 01 00 ea 1d a2 14 5b 82 06 fd d5 ae c4 9f d8 14 44 41 a4 f5 4f 56
69 ad 9a b0 44 f3 a3 88 b2 60 f4 0c 00 fc 0a d3 c0 23 f3 ed cd af 9b 19
6f ee c4 65 44 b5 08 e8 27 6c 3a a8 6e 3b 52 9f 61 7a ea ee 27 48";

    #[test]
    fn ecdsa_signature() {
        let mut ctx = verbose();
        let item = decode(Tag::Signature, &hex(ECDSA), &mut ctx);
        assert_eq!(item.to_string(), "\
Signature Packet (tag 2) (94 bytes)
\t04 01 13 08 00 06 05 02 54 c3 08 df 00 0a 09 10 31 fb fd a9 5f bb fa 18 36 1f 01 00 ea 1d a2 14 5b 82 06 fd d5 ae c4 9f d8 14 44 41 a4 f5 4f 56 69 ad 9a b0 44 f3 a3 88 b2 60 f4 0c 00 fc 0a d3 c0 23 f3 ed cd af 9b 19 6f ee c4 65 44 b5 08 e8 27 6c 3a a8 6e 3b 52 9f 61 7a ea ee 27 48
\tVersion: 4 (current)
\t\t04
\tSignature Type: Signature of a canonical text document (0x01)
\t\t01
\tPublic-key Algorithm: ECDSA public key algorithm (pub 19)
\t\t13
\tHash Algorithm: SHA2-256 (hash 8)
\t\t08
\tHashed Subpacket (6 bytes)
\t\t05 02 54 c3 08 df
\t\tSignature Creation Time (sub 2): 2015-01-24T02:52:15Z
\t\t\t54 c3 08 df
\tUnhashed Subpacket (10 bytes)
\t\t09 10 31 fb fd a9 5f bb fa 18
\t\tIssuer (sub 16): 0x31fbfda95fbbfa18
\tHash left 2 bytes
\t\t36 1f
\tECDSA value r (256 bits)
\t\tea 1d a2 14 5b 82 06 fd d5 ae c4 9f d8 14 44 41 a4 f5 4f 56 69 ad 9a b0 44 f3 a3 88 b2 60 f4 0c
\tECDSA value s (252 bits)
\t\t0a d3 c0 23 f3 ed cd af 9b 19 6f ee c4 65 44 b5 08 e8 27 6c 3a a8 6e 3b 52 9f 61 7a ea ee 27 48
");
        assert_eq!(ctx.alg_mode(), crate::AlgMode::NotSpecified);
    }

    #[test]
    fn subkey_binding() {
        let mut ctx = verbose();
        ctx.set_key_creation_time(Some(Timestamp::from(0x54c301bf)));
        let item = decode(Tag::Signature, &hex("
04 18 13 08 00 0f 05 02 54 c3 01 bf 02 1b 0c 05 09 00 09 3a 80 00 0a 09
10 31 fb fd a9 5f bb fa 18 c6 27 01 00 c0 2f 76 5a 10 6d 1d 22 1e 62 c1
9b bc 62 d1 06 4a f1 3a 47 5a e9 0b f1 39 6c e3 67 a0 96 3c d2 01 00 8c
59 1c 3a 85 0e 1e d3 98 45 13 4d 30 e2 b9 a4 15 0e 1b 6d 66 1a a7 e7 d5
e2 51 07 95 60 87 91"), &mut ctx);

        let hashed = item.child("Hashed Subpacket").unwrap();
        assert_eq!(hashed.to_string(), "\
Hashed Subpacket (15 bytes)
\t05 02 54 c3 01 bf 02 1b 0c 05 09 00 09 3a 80
\tSignature Creation Time (sub 2): 2015-01-24T02:21:51Z
\t\t54 c3 01 bf
\tKey Flags (sub 27) (1 bytes)
\t\t0c
\t\tFlag: This key may be used to encrypt communications.
\t\tFlag: This key may be used to encrypt storage.
\tKey Expiration Time (sub 9): 2015-01-31T02:21:51Z (7 days after)
\t\t00 09 3a 80
");
        assert_eq!(item.child("Signature Type").unwrap().value(),
                   Some("Subkey Binding Signature"));
        assert_eq!(item.child("ECDSA value s").unwrap().note(),
                   Some("256 bits"));
    }

    #[test]
    fn v3_signature() {
        let mut ctx = Context::new(crate::Options {
            debug: true,
            utc: true,
            ..Default::default()
        });
        let item = decode(Tag::Signature, &hex("
03 05 00 36 5e ba 44 0f 64 8a 1c 9e 4f 74 4d 01 01 66 36 04 00 8f 8c 6b
45 a7 65 bd 37 f6 76 58 85 7c 39 66 7a c5 c1 48 f3 b8 85 69 7f 22 54 71
50 0e 97 b2 51 77 53 a2 22 d4 46 ec 0c 50 be ee e6 b0 c2 76 08 f0 6b 0e
6c fc e6 ef cd 10 3d 10 fd b3 87 40 20 55 6c 06 ae 41 c5 7c 0d 17 75 44
32 7d 08 41 45 95 da d6 57 74 58 38 72 6e f7 1f 63 ce d8 00 1b 25 37 23
b2 56 1a 02 9a ee 5a 57 f7 a3 ab 2d 89 20 85 1c c5 c0 ec 64 e9 2f 0b f5
4b 5f 2b 65 39"), &mut ctx);

        let rendered = item.to_string();
        let children: Vec<&str> = rendered.lines().skip(2).collect();
        assert_eq!(children, vec![
            "\tVersion: 3 (old)",
            "\t\t03",
            "\tHashed material (5 bytes)",
            "\t\tSignature Type: Signature of a binary document (0x00)",
            "\t\t\t00",
            "\t\tSignature creation time: 1998-11-27T14:42:12Z",
            "\t\t\t36 5e ba 44",
            "\tKey ID: 0x0f648a1c9e4f744d",
            "\tPublic-key Algorithm: RSA (Encrypt or Sign) (pub 1)",
            "\t\t01",
            "\tHash Algorithm: MD5 (hash 1)",
            "\t\t01",
            "\tHash left 2 bytes",
            "\t\t66 36",
            "\tRSA signature value m^d mod n (1024 bits)",
        ]);
    }

    const DSA: &str = "
04 00 11 08 00 1d 16 21 04 1b 52 02 db 4a 3e c7 76 f1 e0 ad 18 b4 da 3b
ae 7e 20 b8 1c 05 02 5a 19 0d e4 00 0a 09 10 b4 da 3b ae 7e 20 b8 1c 73
3c 01 00 84 ef ee ae 22 69 2e af 33 b3 85 e1 ee aa 5d 2f 7a d4 ae a3 92
d3 e8 73 d4 b0 00 3e c9 2b 80 f7 00 ff 7c cc b9 d2 06 48 b3 39 58 9b a8
99 c5 c2 53 62 bd 8f 16 49 73 e0 65 fe a6 f7 18 1a 78 ff 65 e6";

    #[test]
    fn dsa_signature_with_fingerprint() {
        let mut ctx = Context::new(Default::default());
        let item = decode(Tag::Signature, &hex(DSA), &mut ctx);
        let names: Vec<&str> =
            item.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec![
            "Version", "Signature Type", "Public-key Algorithm",
            "Hash Algorithm", "Hashed Subpacket", "Unhashed Subpacket",
            "Hash left 2 bytes", "DSA value r", "DSA value s",
        ]);
        let hashed = item.child("Hashed Subpacket").unwrap();
        assert_eq!(hashed.children()[0].name(), "Issuer Fingerprint (sub 33)");
        assert_eq!(item.child("DSA value s").unwrap().note(),
                   Some("255 bits"));
    }

    #[test]
    fn one_pass() {
        let mut ctx = verbose();
        let item = decode(Tag::OnePassSig,
                          &hex("03 00 08 11 b4 da 3b ae 7e 20 b8 1c 01"),
                          &mut ctx);
        assert_eq!(item.to_string(), "\
One-Pass Signature Packet (tag 4) (13 bytes)
\t03 00 08 11 b4 da 3b ae 7e 20 b8 1c 01
\tVersion: 3 (current)
\t\t03
\tSignature Type: Signature of a binary document (0x00)
\t\t00
\tHash Algorithm: SHA2-256 (hash 8)
\t\t08
\tPublic-key Algorithm: DSA (Digital Signature Algorithm) (pub 17)
\t\t11
\tKey ID: 0xb4da3bae7e20b81c
\tNested: other than one pass signature (flag 0x01)
\t\t01
");

        let item = decode(Tag::OnePassSig,
                          &hex("03 00 08 11 b4 da 3b ae 7e 20 b8 1c 00"),
                          &mut ctx);
        assert_eq!(item.child("Nested").unwrap().value(),
                   Some("another one pass signature"));
    }

    #[test]
    fn short_signatures_are_truncated() {
        assert_prefixes_truncated(Tag::Signature, &hex(ECDSA));
        assert_prefixes_truncated(Tag::Signature, &hex(DSA));
        assert_prefixes_truncated(
            Tag::OnePassSig, &hex("03 00 08 11 b4 da 3b ae 7e 20 b8 1c 01"));
    }
}

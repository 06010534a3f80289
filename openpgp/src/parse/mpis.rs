//! Algorithm-specific key material.
//!
//! Public keys, secret keys, signatures and encrypted session keys
//! carry multi-precision integers whose number and meaning depend on
//! the public key algorithm.  Elliptic curve algorithms add a curve
//! OID, an encoded point and, for ECDH, the KDF parameters.
//!
//! Material of algorithms without a known layout is added as one
//! opaque dump.

use log::trace;

use crate::{Context, Cursor, Error, Item, Result};
use crate::types::{Curve, PublicKeyAlgorithm};
use super::values;

/// Reads an MPI, returning its bit count and value.
fn read(cursor: &mut Cursor, name: &str) -> Result<(u16, Vec<u8>)> {
    let bits = cursor.read_be_u16(name)?;
    let value = cursor.read_bytes(name, (bits as usize + 7) / 8)?;

    if let Some(first) = value.first() {
        let used = 8 - ((8 * value.len()) - bits as usize);
        if used < 8 && first >> used != 0 {
            trace!("{}: {} bits declared, but the value is larger",
                   name, bits);
        }
    }
    Ok((bits, value))
}

/// Reads an MPI and adds it as `name`.
pub(crate) fn mpi(item: &mut Item, cursor: &mut Cursor, ctx: &Context,
                  name: &str)
                  -> Result<()>
{
    let (bits, value) = read(cursor, name)?;
    item.push(Item::new(name)
              .with_note(format!("{} bits", bits))
              .with_dump(ctx.integer_dump(&value)));
    Ok(())
}

fn mpis(item: &mut Item, cursor: &mut Cursor, ctx: &Context, names: &[&str])
        -> Result<()>
{
    for name in names {
        mpi(item, cursor, ctx, name)?;
    }
    Ok(())
}

/// Adds the rest of `cursor` as the material of an algorithm without
/// a known layout.
fn opaque(item: &mut Item, cursor: &mut Cursor, ctx: &Context,
          algo: PublicKeyAlgorithm)
{
    let label = match algo.short_name() {
        Some(name) => name.to_string(),
        None => format!("{} (pub {})", algo, u8::from(algo)),
    };
    let rest = cursor.read_to_end();
    item.push(values::raw_data(
        ctx, &format!("Multi-precision integers of {}", label), &rest, true));
}

/// Reads a curve OID.
fn curve(item: &mut Item, cursor: &mut Cursor, ctx: &Context)
         -> Result<Curve>
{
    let len = cursor.read_u8("curve OID length")?;
    if len == 0 || len == 0xff {
        return Err(Error::UnsupportedStructure(
            format!("reserved curve OID length {}", len)).into());
    }
    let oid = cursor.read_bytes("curve OID", len as usize)?;
    let curve = Curve::from_oid(&oid);

    let mut i = Item::new("ECC Curve OID")
        .with_value(curve.to_string())
        .with_dump(Some(ctx.dump(&oid)));
    if let Some(bits) = curve.bits() {
        i.set_note(Some(format!("{}bits key size", bits)));
    }
    item.push(i);
    Ok(curve)
}

/// Reads an EC point, which is encoded as an MPI.
///
/// The first octet of the point tells its format.
fn ec_point(item: &mut Item, cursor: &mut Cursor, ctx: &Context, algo: &str)
            -> Result<()>
{
    let (bits, value) = read(cursor, "EC point")?;
    let format = match value.first() {
        Some(0x04) => " (uncompressed format)",
        Some(0x40) => " (40 || compressed format)",
        Some(0x02) | Some(0x03) => " (compressed format)",
        _ => "",
    };
    item.push(Item::new(format!("{} EC point{}", algo, format))
              .with_note(format!("{} bits", bits))
              .with_dump(ctx.integer_dump(&value)));
    Ok(())
}

/// Reads the KDF parameters of an ECDH key.
fn kdf(item: &mut Item, cursor: &mut Cursor, ctx: &Context) -> Result<()> {
    let len = cursor.read_u8("KDF parameters length")?;
    let params = cursor.read_bytes("KDF parameters", len as usize)?;

    let mut group = values::raw_data(ctx, "KDF parameters", &params,
                                     ctx.options().debug);
    let mut c = Cursor::new(&params);
    let r = kdf_fields(&mut group, &mut c, ctx);
    item.push(group);
    r
}

fn kdf_fields(item: &mut Item, cursor: &mut Cursor, ctx: &Context)
              -> Result<()>
{
    // Reserved for future extensions, currently 1.
    let reserved = cursor.read_u8("KDF reserved octet")?;
    if reserved != 1 {
        trace!("KDF parameters: reserved octet is {}", reserved);
    }
    item.push(values::hash_algo(ctx, cursor.read_u8("KDF hash algorithm")?));
    item.push(values::sym_algo(ctx, cursor.read_u8("KEK algorithm")?));
    values::trailing(item, cursor, ctx);
    Ok(())
}

/// Adds the public key material of a key packet.
pub(crate) fn public_key(item: &mut Item, cursor: &mut Cursor, ctx: &Context,
                         algo: PublicKeyAlgorithm)
                         -> Result<()>
{
    use PublicKeyAlgorithm::*;
    match algo {
        RSAEncryptSign | RSAEncrypt | RSASign =>
            mpis(item, cursor, ctx, &["RSA public modulus n",
                                      "RSA public encryption exponent e"]),
        DSA =>
            mpis(item, cursor, ctx, &["DSA p",
                                      "DSA q (q is a prime divisor of p-1)",
                                      "DSA g",
                                      "DSA y (= g^x mod p where x is secret)"]),
        ElGamalEncrypt | ElGamalEncryptSign =>
            mpis(item, cursor, ctx, &["ElGamal p",
                                      "ElGamal g",
                                      "ElGamal y (= g^x mod p where x is secret)"]),
        ECDSA | EdDSA => {
            curve(item, cursor, ctx)?;
            let name = if algo == ECDSA { "ECDSA" } else { "EdDSA" };
            ec_point(item, cursor, ctx, name)
        }
        ECDH => {
            curve(item, cursor, ctx)?;
            ec_point(item, cursor, ctx, "ECDH")?;
            kdf(item, cursor, ctx)
        }
        Reserved(_) | Private(_) | Unknown(_) => {
            opaque(item, cursor, ctx, algo);
            Ok(())
        }
    }
}

/// Adds the secret key material of an unencrypted secret key.
pub(crate) fn secret_key(item: &mut Item, cursor: &mut Cursor, ctx: &Context,
                         algo: PublicKeyAlgorithm)
                         -> Result<()>
{
    use PublicKeyAlgorithm::*;
    match algo {
        RSAEncryptSign | RSAEncrypt | RSASign =>
            mpis(item, cursor, ctx, &[
                "RSA secret exponent d",
                "RSA secret prime value p",
                "RSA secret prime value q (p < q)",
                "RSA u, the multiplicative inverse of p, mod q",
            ]),
        DSA => mpi(item, cursor, ctx, "DSA secret exponent x"),
        ElGamalEncrypt | ElGamalEncryptSign =>
            mpi(item, cursor, ctx, "ElGamal secret exponent x"),
        ECDSA => mpi(item, cursor, ctx, "ECDSA secret key"),
        ECDH => mpi(item, cursor, ctx, "ECDH secret key"),
        EdDSA => mpi(item, cursor, ctx, "EdDSA secret key"),
        Reserved(_) | Private(_) | Unknown(_) => {
            opaque(item, cursor, ctx, algo);
            Ok(())
        }
    }
}

/// Adds the MPIs of a signature.
pub(crate) fn signature(item: &mut Item, cursor: &mut Cursor, ctx: &Context,
                        algo: PublicKeyAlgorithm)
                        -> Result<()>
{
    use PublicKeyAlgorithm::*;
    match algo {
        RSAEncryptSign | RSASign =>
            mpi(item, cursor, ctx, "RSA signature value m^d mod n"),
        DSA => mpis(item, cursor, ctx, &["DSA value r", "DSA value s"]),
        ECDSA => mpis(item, cursor, ctx, &["ECDSA value r", "ECDSA value s"]),
        EdDSA => mpis(item, cursor, ctx, &["EdDSA compressed value r",
                                           "EdDSA compressed value s"]),
        ElGamalEncryptSign =>
            mpis(item, cursor, ctx, &["ElGamal a = g^k mod p",
                                      "ElGamal b = (h - a*x)/k mod p - 1"]),
        _ => {
            opaque(item, cursor, ctx, algo);
            Ok(())
        }
    }
}

/// Adds an encrypted session key.
pub(crate) fn session_key(item: &mut Item, cursor: &mut Cursor, ctx: &Context,
                          algo: PublicKeyAlgorithm)
                          -> Result<()>
{
    use PublicKeyAlgorithm::*;
    match algo {
        RSAEncryptSign | RSAEncrypt =>
            mpi(item, cursor, ctx, "RSA m^e mod n"),
        ElGamalEncrypt | ElGamalEncryptSign =>
            mpis(item, cursor, ctx, &["ElGamal g^k mod p",
                                      "ElGamal m * y^k mod p"]),
        ECDH => {
            ec_point(item, cursor, ctx, "ECDH")?;
            let len = cursor.read_u8("encoded session key length")?;
            let key = cursor.read_bytes("encoded session key", len as usize)?;
            item.push(Item::new("symmetric key (encoded)")
                      .with_note(format!("{} bytes", key.len()))
                      .with_dump(ctx.integer_dump(&key)));
            Ok(())
        }
        _ => {
            opaque(item, cursor, ctx, algo);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::tests::{hex, verbose};

    fn session(data: &[u8]) -> (Item, Result<()>) {
        let ctx = verbose();
        let mut item = Item::new("k");
        let mut c = Cursor::new(&data[1..]);
        let r = session_key(&mut item, &mut c, &ctx, data[0].into());
        (item, r)
    }

    #[test]
    fn opaque_material() {
        let (item, r) = session(&[19, 2, 3, 4]);
        r.unwrap();
        assert_eq!(item.to_string(), "\
k
\tMulti-precision integers of ECDSA (3 bytes)
\t\t02 03 04
");

        let (item, r) = session(&[100, 2, 3, 4]);
        r.unwrap();
        assert_eq!(item.children()[0].name(),
                   "Multi-precision integers of \
                    Private/Experimental algorithm (pub 100)");
    }

    #[test]
    fn ecdh_session_key() {
        let mut data = vec![18];
        data.extend(hex("
02 03 04 c3 e7 d7 2b af 25 2a 19 f6 27 80 ea 7c 4f 6d ca 61 22 5a e3 ad
0c fb d9 a2 d5 a4 30 9a f3 ee 34 54 ae a8 f6 46 ac 8a ae 38 a6 4f f3 f2
ee 30 40 62 5b 07 e7 2b ee 9a 90 d4 6f 1e d7 c3 26 21 ab 30 4a fe 88 a2
9f 0e ab f3 be 7a 89 27 32 38 b8 06 75 fc ac 3c d4 ba 0f 49 64 15 aa 48
9a db c1 8a 7b 11 76 fb 2f ef ef b0 29 a9 24 75 6d 69 12 4d"));
        let (item, r) = session(&data);
        r.unwrap();

        let point = &item.children()[0];
        assert_eq!(point.name(), "ECDH EC point (uncompressed format)");
        assert_eq!(point.note(), Some("515 bits"));
        assert_eq!(point.dump().unwrap().as_bytes().len(), 65);

        let key = &item.children()[1];
        assert_eq!(key.name(), "symmetric key (encoded)");
        assert_eq!(key.note(), Some("48 bytes"));
        assert_eq!(key.dump().unwrap().as_bytes()[..2], [0x4a, 0xfe][..]);
    }

    #[test]
    fn truncated_material() {
        let (_, r) = session(&[18, 2, 3, 4]);
        assert!(crate::Error::is_truncated(&r.unwrap_err()));
    }

    #[test]
    fn elgamal_labels() {
        let (item, r) = session(&[16, 0, 9, 1, 0xff, 0, 1, 1]);
        r.unwrap();
        assert_eq!(item.to_string(), "\
k
\tElGamal g^k mod p (9 bits)
\t\t01 ff
\tElGamal m * y^k mod p (1 bits)
\t\t01
");
    }

    #[test]
    fn curves() {
        let ctx = verbose();
        let mut item = Item::new("k");
        let data = hex("09 2b 06 01 04 01 da 47 0f 01 00 09 40 aa");
        public_key(&mut item, &mut Cursor::new(&data), &ctx,
                   PublicKeyAlgorithm::EdDSA).unwrap();
        assert_eq!(item.to_string(), "\
k
\tECC Curve OID: ed25519 (256bits key size)
\t\t2b 06 01 04 01 da 47 0f 01
\tEdDSA EC point (40 || compressed format) (9 bits)
\t\t40 aa
");

        let mut item = Item::new("k");
        let err = public_key(&mut item, &mut Cursor::new(&[0xff]), &ctx,
                             PublicKeyAlgorithm::ECDSA).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(),
                         Some(Error::UnsupportedStructure(_))));
    }

    #[test]
    fn kdf_parameters() {
        let ctx = verbose();
        let mut item = Item::new("k");
        let data = hex("08 2a 86 48 ce 3d 03 01 07 00 03 04 03 01 08 07");
        public_key(&mut item, &mut Cursor::new(&data), &ctx,
                   PublicKeyAlgorithm::ECDH).unwrap();
        let kdf = item.child("KDF parameters").unwrap();
        assert_eq!(kdf.note(), Some("3 bytes"));
        assert_eq!(kdf.children()[0].value(), Some("SHA2-256 (hash 8)"));
        assert_eq!(kdf.children()[1].value(),
                   Some("AES with 128-bit key (sym 7)"));
    }
}

//! Session key packets.
//!
//! Both packets also determine how the encrypted data that follows
//! is keyed, which is recorded in the [`Context`].

use crate::{AlgMode, Context, Cursor, Item, Result};
use crate::types::{AEADAlgorithm, PublicKeyAlgorithm};
use super::{mpis, values};

/// Decodes a public-key encrypted session key packet body, see
/// [Section 5.1 of RFC 4880].
///
///   [Section 5.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.1
pub(crate) fn pkesk(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
                    -> Result<()>
{
    ctx.set_alg_mode(AlgMode::PublicKeyEncryption);
    values::version(item, cursor, ctx, &[(3, "current")])?;

    let key_id: [u8; 8] = cursor.read_array("key id")?;
    item.push(values::key_id(&key_id));
    let algo = cursor.read_u8("public key algorithm")?;
    item.push(values::pk_algo(ctx, algo));

    mpis::session_key(item, cursor, ctx, PublicKeyAlgorithm::from(algo))?;
    values::trailing(item, cursor, ctx);
    Ok(())
}

/// Decodes a symmetric-key encrypted session key packet body, see
/// [Section 5.3 of RFC 4880].
///
///   [Section 5.3 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.3
pub(crate) fn skesk(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
                    -> Result<()>
{
    ctx.set_alg_mode(AlgMode::SymmetricEncryption);
    let version = values::version(item, cursor, ctx, &[
        (4, "current"),
        (5, "draft"),
    ])?;

    item.push(values::sym_algo(ctx, cursor.read_u8("symmetric algorithm")?));
    if version == 4 {
        values::s2k(item, cursor, ctx)?;
        if cursor.rest() > 0 {
            let key = cursor.read_to_end();
            item.push(values::raw_data(ctx, "Encrypted session key", &key,
                                       ctx.options().debug));
        }
        return Ok(());
    }

    let aead = cursor.read_u8("AEAD algorithm")?;
    item.push(values::aead_algo(ctx, aead));
    values::s2k(item, cursor, ctx)?;
    if let Some(size) = AEADAlgorithm::from(aead).iv_size() {
        let iv = cursor.read_bytes("IV", size)?;
        item.push(Item::new("IV").with_dump(Some(ctx.dump(&iv))));
    }
    let key = cursor.read_to_end();
    item.push(values::raw_data(ctx, "Encrypted session key and AEAD tag",
                               &key, ctx.options().debug));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tag;
    use crate::parse::dispatch;
    use crate::parse::tests::{hex, verbose};

    #[test]
    fn opaque_pkesk() {
        let body = hex("03 01 02 03 04 05 06 07 08 13 02 03 04");
        let mut ctx = Context::new(Default::default());
        let (item, r) = dispatch(Tag::PKESK, &body, &mut ctx);
        r.unwrap();
        assert_eq!(ctx.alg_mode(), AlgMode::PublicKeyEncryption);
        assert_eq!(item.children()[1].value(), Some("0x0102030405060708"));

        let last = item.children().last().unwrap();
        assert_eq!(last.name(), "Multi-precision integers of ECDSA");
        assert_eq!(last.note(), Some("3 bytes"));
        assert_eq!(last.dump().unwrap().to_string(), "02 03 04");
    }

    #[test]
    fn rsa_pkesk() {
        let body = hex("03 01 02 03 04 05 06 07 08 01 00 09 01 ff");
        let mut ctx = verbose();
        let (item, r) = dispatch(Tag::PKESK, &body, &mut ctx);
        r.unwrap();
        let m = item.child("RSA m^e mod n").unwrap();
        assert_eq!(m.note(), Some("9 bits"));
        assert_eq!(m.dump().unwrap().to_string(), "01 ff");
    }

    #[test]
    fn skesk_v4() {
        // AES-128, salted S2K with SHA-256, no session key.
        let body = hex("04 07 01 08 01 02 03 04 05 06 07 08");
        let mut ctx = Context::new(Default::default());
        let (item, r) = dispatch(Tag::SKESK, &body, &mut ctx);
        r.unwrap();
        assert_eq!(ctx.alg_mode(), AlgMode::SymmetricEncryption);
        assert_eq!(item.children().len(), 3);
        assert_eq!(item.children()[2].value(), Some("Salted S2K (s2k 1)"));

        let mut body = body;
        body.extend(&[0xaa; 17]);
        let (item, r) = dispatch(Tag::SKESK, &body, &mut ctx);
        r.unwrap();
        assert_eq!(item.child("Encrypted session key").unwrap().note(),
                   Some("17 bytes"));
    }

    #[test]
    fn skesk_v5() {
        // AES-128, EAX, simple S2K with SHA-256.
        let mut body = hex("05 07 01 00 08");
        body.extend(&[0x11; 16]);
        body.extend(&[0x22; 32]);
        let mut ctx = Context::new(Default::default());
        let (item, r) = dispatch(Tag::SKESK, &body, &mut ctx);
        r.unwrap();
        assert_eq!(item.children()[2].value(), Some("EAX mode (aead 1)"));
        assert_eq!(item.child("IV").unwrap().dump().unwrap().as_bytes(),
                   &[0x11; 16][..]);
        assert_eq!(item.child("Encrypted session key and AEAD tag").unwrap()
                   .note(), Some("32 bytes"));
    }

    #[test]
    fn skesk_unknown_version() {
        let mut ctx = Context::new(Default::default());
        let (item, r) = dispatch(Tag::SKESK, &[6, 7], &mut ctx);
        assert!(r.is_err());
        assert_eq!(item.children().len(), 1);
        // The mode is set even if the body is not understood.
        assert_eq!(ctx.alg_mode(), AlgMode::SymmetricEncryption);
    }
}

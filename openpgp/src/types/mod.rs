//! Primitive types.
//!
//! This module provides the enumerations used in OpenPGP, like the
//! algorithm identifiers, together with their human readable names.
//! Every enumeration converts from the serialized `u8` (or OID) and
//! has an `Unknown` variant, so that any value can be represented.

use std::fmt;

mod flags;
pub(crate) use flags::{
    expand,
    FEATURES,
    KEY_FLAGS,
    KEY_SERVER_PREFERENCES,
    NOTATION_FLAGS,
};
mod timestamp;
pub use timestamp::{Timestamp, Duration};

/// The OpenPGP public key algorithms as defined in [Section 9.1 of
/// RFC 4880], and [Section 5 of RFC 6637].
///
///   [Section 9.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-9.1
///   [Section 5 of RFC 6637]: https://tools.ietf.org/html/rfc6637
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub enum PublicKeyAlgorithm {
    /// RSA (Encrypt or Sign)
    RSAEncryptSign,
    /// RSA Encrypt-Only
    RSAEncrypt,
    /// RSA Sign-Only
    RSASign,
    /// ElGamal (Encrypt-Only)
    ElGamalEncrypt,
    /// DSA (Digital Signature Algorithm)
    DSA,
    /// Elliptic curve DH
    ECDH,
    /// Elliptic curve DSA
    ECDSA,
    /// Formerly ElGamal (Encrypt or Sign)
    ElGamalEncryptSign,
    /// "Twisted" Edwards curve DSA
    EdDSA,
    /// Reserved algorithm identifier.
    Reserved(u8),
    /// Private algorithm identifier.
    Private(u8),
    /// Unknown algorithm identifier.
    Unknown(u8),
}

impl PublicKeyAlgorithm {
    /// Returns the short name used to label key material, e.g. `RSA`.
    ///
    /// Returns `None` for algorithms without defined key material.
    pub fn short_name(&self) -> Option<&'static str> {
        use self::PublicKeyAlgorithm::*;
        match self {
            RSAEncryptSign | RSAEncrypt | RSASign => Some("RSA"),
            ElGamalEncrypt | ElGamalEncryptSign => Some("ElGamal"),
            DSA => Some("DSA"),
            ECDH => Some("ECDH"),
            ECDSA => Some("ECDSA"),
            EdDSA => Some("EdDSA"),
            Reserved(_) | Private(_) | Unknown(_) => None,
        }
    }
}

impl From<u8> for PublicKeyAlgorithm {
    fn from(u: u8) -> Self {
        use self::PublicKeyAlgorithm::*;
        match u {
            1 => RSAEncryptSign,
            2 => RSAEncrypt,
            3 => RSASign,
            16 => ElGamalEncrypt,
            17 => DSA,
            18 => ECDH,
            19 => ECDSA,
            20 => ElGamalEncryptSign,
            22 => EdDSA,
            21 | 23 | 24 => Reserved(u),
            100..=110 => Private(u),
            u => Unknown(u),
        }
    }
}

impl From<PublicKeyAlgorithm> for u8 {
    fn from(p: PublicKeyAlgorithm) -> u8 {
        use self::PublicKeyAlgorithm::*;
        match p {
            RSAEncryptSign => 1,
            RSAEncrypt => 2,
            RSASign => 3,
            ElGamalEncrypt => 16,
            DSA => 17,
            ECDH => 18,
            ECDSA => 19,
            ElGamalEncryptSign => 20,
            EdDSA => 22,
            Reserved(u) | Private(u) | Unknown(u) => u,
        }
    }
}

impl fmt::Display for PublicKeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::PublicKeyAlgorithm::*;
        match *self {
            RSAEncryptSign => f.write_str("RSA (Encrypt or Sign)"),
            RSAEncrypt => f.write_str("RSA Encrypt-Only"),
            RSASign => f.write_str("RSA Sign-Only"),
            ElGamalEncrypt => f.write_str("Elgamal (Encrypt-Only)"),
            DSA => f.write_str("DSA (Digital Signature Algorithm)"),
            ECDH => f.write_str("ECDH public key algorithm"),
            ECDSA => f.write_str("ECDSA public key algorithm"),
            ElGamalEncryptSign =>
                f.write_str("Reserved (formerly Elgamal Encrypt or Sign)"),
            EdDSA => f.write_str("EdDSA"),
            Reserved(_) => f.write_str("Reserved"),
            Private(_) => f.write_str("Private/Experimental algorithm"),
            Unknown(_) => f.write_str("Unknown"),
        }
    }
}

/// Elliptic curves used in OpenPGP.
///
/// `PublicKeyAlgorithm` does not differentiate between elliptic
/// curves.  Instead, the curve is specified using an OID prepended to
/// the key material.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Curve {
    /// NIST curve P-256.
    NistP256,
    /// NIST curve P-384.
    NistP384,
    /// NIST curve P-521.
    NistP521,
    /// brainpoolP256r1.
    BrainpoolP256,
    /// brainpoolP384r1.
    BrainpoolP384,
    /// brainpoolP512r1.
    BrainpoolP512,
    /// D.J. Bernstein's "Twisted" Edwards curve Ed25519.
    Ed25519,
    /// Elliptic curve Diffie-Hellman using D.J. Bernstein's Curve25519.
    Cv25519,
    /// The Koblitz curve secp256k1.
    Secp256k1,
    /// Unknown curve.
    Unknown(Box<[u8]>),
}

const NIST_P256_OID: &[u8] = &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07];
const NIST_P384_OID: &[u8] = &[0x2B, 0x81, 0x04, 0x00, 0x22];
const NIST_P521_OID: &[u8] = &[0x2B, 0x81, 0x04, 0x00, 0x23];
const BRAINPOOL_P256_OID: &[u8] =
    &[0x2B, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x07];
const BRAINPOOL_P384_OID: &[u8] =
    &[0x2B, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x0B];
const BRAINPOOL_P512_OID: &[u8] =
    &[0x2B, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x0D];
const ED25519_OID: &[u8] =
    &[0x2B, 0x06, 0x01, 0x04, 0x01, 0xDA, 0x47, 0x0F, 0x01];
const CV25519_OID: &[u8] =
    &[0x2B, 0x06, 0x01, 0x04, 0x01, 0x97, 0x55, 0x01, 0x05, 0x01];
const SECP256K1_OID: &[u8] = &[0x2B, 0x81, 0x04, 0x00, 0x0A];

impl Curve {
    /// Parses the given OID.
    pub fn from_oid(oid: &[u8]) -> Curve {
        // Match on OIDs, see section 11 of RFC6637.
        match oid {
            NIST_P256_OID => Curve::NistP256,
            NIST_P384_OID => Curve::NistP384,
            NIST_P521_OID => Curve::NistP521,
            BRAINPOOL_P256_OID => Curve::BrainpoolP256,
            BRAINPOOL_P384_OID => Curve::BrainpoolP384,
            BRAINPOOL_P512_OID => Curve::BrainpoolP512,
            ED25519_OID => Curve::Ed25519,
            CV25519_OID => Curve::Cv25519,
            SECP256K1_OID => Curve::Secp256k1,
            oid => Curve::Unknown(Vec::from(oid).into_boxed_slice()),
        }
    }

    /// Returns the key size in bits.
    ///
    /// Returns `None` for unknown curves.
    pub fn bits(&self) -> Option<usize> {
        use self::Curve::*;
        match self {
            NistP256 | BrainpoolP256 | Ed25519 | Cv25519 | Secp256k1
                => Some(256),
            NistP384 | BrainpoolP384 => Some(384),
            NistP521 => Some(521),
            BrainpoolP512 => Some(512),
            Unknown(_) => None,
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Curve::*;
        match *self {
            NistP256 => f.write_str("nistp256"),
            NistP384 => f.write_str("nistp384"),
            NistP521 => f.write_str("nistp521"),
            BrainpoolP256 => f.write_str("brainpoolP256r1"),
            BrainpoolP384 => f.write_str("brainpoolP384r1"),
            BrainpoolP512 => f.write_str("brainpoolP512r1"),
            Ed25519 => f.write_str("ed25519"),
            Cv25519 => f.write_str("cv25519"),
            Secp256k1 => f.write_str("secp256k1"),
            Unknown(_) => f.write_str("Unknown"),
        }
    }
}

/// The symmetric-key algorithms as defined in [Section 9.2 of RFC 4880].
///
///   [Section 9.2 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-9.2
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub enum SymmetricAlgorithm {
    /// Null encryption.
    Unencrypted,
    /// IDEA block cipher.
    IDEA,
    /// 3-DES in EDE configuration.
    TripleDES,
    /// CAST5/CAST128 block cipher.
    CAST5,
    /// Schneier et.al. Blowfish block cipher.
    Blowfish,
    /// 10-round AES.
    AES128,
    /// 12-round AES.
    AES192,
    /// 14-round AES.
    AES256,
    /// Twofish block cipher.
    Twofish,
    /// 18 rounds of NESSIEs Camellia.
    Camellia128,
    /// 24 rounds of NESSIEs Camellia w/192 bit keys.
    Camellia192,
    /// 24 rounds of NESSIEs Camellia w/256 bit keys.
    Camellia256,
    /// Reserved algorithm identifier.
    Reserved(u8),
    /// Private algorithm identifier.
    Private(u8),
    /// Unknown algorithm identifier.
    Unknown(u8),
}

impl SymmetricAlgorithm {
    /// Returns the block size in bytes.
    ///
    /// Returns `None` if the algorithm is not a known block cipher.
    pub fn block_size(&self) -> Option<usize> {
        use self::SymmetricAlgorithm::*;
        match self {
            IDEA | TripleDES | CAST5 | Blowfish => Some(8),
            AES128 | AES192 | AES256 | Twofish
                | Camellia128 | Camellia192 | Camellia256 => Some(16),
            _ => None,
        }
    }
}

impl From<u8> for SymmetricAlgorithm {
    fn from(u: u8) -> Self {
        use self::SymmetricAlgorithm::*;
        match u {
            0 => Unencrypted,
            1 => IDEA,
            2 => TripleDES,
            3 => CAST5,
            4 => Blowfish,
            5 | 6 => Reserved(u),
            7 => AES128,
            8 => AES192,
            9 => AES256,
            10 => Twofish,
            11 => Camellia128,
            12 => Camellia192,
            13 => Camellia256,
            100..=110 => Private(u),
            u => Unknown(u),
        }
    }
}

impl From<SymmetricAlgorithm> for u8 {
    fn from(s: SymmetricAlgorithm) -> u8 {
        use self::SymmetricAlgorithm::*;
        match s {
            Unencrypted => 0,
            IDEA => 1,
            TripleDES => 2,
            CAST5 => 3,
            Blowfish => 4,
            AES128 => 7,
            AES192 => 8,
            AES256 => 9,
            Twofish => 10,
            Camellia128 => 11,
            Camellia192 => 12,
            Camellia256 => 13,
            Reserved(u) | Private(u) | Unknown(u) => u,
        }
    }
}

impl fmt::Display for SymmetricAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::SymmetricAlgorithm::*;
        match *self {
            Unencrypted => f.write_str("Plaintext or unencrypted data"),
            IDEA => f.write_str("IDEA"),
            TripleDES =>
                f.write_str("TripleDES (DES-EDE, 168 bit key derived from 192)"),
            CAST5 => f.write_str("CAST5 (128 bit key, as per [RFC2144])"),
            Blowfish => f.write_str("Blowfish (128 bit key, 16 rounds)"),
            AES128 => f.write_str("AES with 128-bit key"),
            AES192 => f.write_str("AES with 192-bit key"),
            AES256 => f.write_str("AES with 256-bit key"),
            Twofish => f.write_str("Twofish with 256-bit key"),
            Camellia128 => f.write_str("Camellia with 128-bit key"),
            Camellia192 => f.write_str("Camellia with 192-bit key"),
            Camellia256 => f.write_str("Camellia with 256-bit key"),
            Reserved(_) => f.write_str("Reserved"),
            Private(_) => f.write_str("Private/Experimental algorithm"),
            Unknown(_) => f.write_str("Unknown"),
        }
    }
}

/// The AEAD algorithms as defined in [Section 9.6 of RFC 4880bis].
///
///   [Section 9.6 of RFC 4880bis]: https://tools.ietf.org/html/draft-ietf-openpgp-rfc4880bis-05#section-9.6
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub enum AEADAlgorithm {
    /// EAX mode.
    EAX,
    /// OCB mode.
    OCB,
    /// GCM mode.
    GCM,
    /// Private algorithm identifier.
    Private(u8),
    /// Unknown algorithm identifier.
    Unknown(u8),
}

impl AEADAlgorithm {
    /// Returns the size of the initialization vector in bytes.
    ///
    /// Returns `None` for unknown modes.
    pub fn iv_size(&self) -> Option<usize> {
        match self {
            AEADAlgorithm::EAX => Some(16),
            AEADAlgorithm::OCB => Some(15),
            AEADAlgorithm::GCM => Some(12),
            _ => None,
        }
    }
}

impl From<u8> for AEADAlgorithm {
    fn from(u: u8) -> Self {
        match u {
            1 => AEADAlgorithm::EAX,
            2 => AEADAlgorithm::OCB,
            3 => AEADAlgorithm::GCM,
            100..=110 => AEADAlgorithm::Private(u),
            u => AEADAlgorithm::Unknown(u),
        }
    }
}

impl From<AEADAlgorithm> for u8 {
    fn from(a: AEADAlgorithm) -> u8 {
        match a {
            AEADAlgorithm::EAX => 1,
            AEADAlgorithm::OCB => 2,
            AEADAlgorithm::GCM => 3,
            AEADAlgorithm::Private(u) | AEADAlgorithm::Unknown(u) => u,
        }
    }
}

impl fmt::Display for AEADAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AEADAlgorithm::EAX => f.write_str("EAX mode"),
            AEADAlgorithm::OCB => f.write_str("OCB mode"),
            AEADAlgorithm::GCM => f.write_str("GCM mode"),
            AEADAlgorithm::Private(_) =>
                f.write_str("Private/Experimental algorithm"),
            AEADAlgorithm::Unknown(_) => f.write_str("Unknown"),
        }
    }
}

/// The OpenPGP compression algorithms as defined in [Section 9.3 of RFC 4880].
///
///   [Section 9.3 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-9.3
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub enum CompressionAlgorithm {
    /// Null compression.
    Uncompressed,
    /// DEFLATE Compressed Data.
    Zip,
    /// ZLIB Compressed Data.
    Zlib,
    /// bzip2
    BZip2,
    /// Private compression algorithm identifier.
    Private(u8),
    /// Unknown compression algorithm identifier.
    Unknown(u8),
}

impl From<u8> for CompressionAlgorithm {
    fn from(u: u8) -> Self {
        match u {
            0 => CompressionAlgorithm::Uncompressed,
            1 => CompressionAlgorithm::Zip,
            2 => CompressionAlgorithm::Zlib,
            3 => CompressionAlgorithm::BZip2,
            100..=110 => CompressionAlgorithm::Private(u),
            u => CompressionAlgorithm::Unknown(u),
        }
    }
}

impl From<CompressionAlgorithm> for u8 {
    fn from(c: CompressionAlgorithm) -> u8 {
        match c {
            CompressionAlgorithm::Uncompressed => 0,
            CompressionAlgorithm::Zip => 1,
            CompressionAlgorithm::Zlib => 2,
            CompressionAlgorithm::BZip2 => 3,
            CompressionAlgorithm::Private(u) => u,
            CompressionAlgorithm::Unknown(u) => u,
        }
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CompressionAlgorithm::Uncompressed => f.write_str("Uncompressed"),
            CompressionAlgorithm::Zip => f.write_str("ZIP <RFC1951>"),
            CompressionAlgorithm::Zlib => f.write_str("ZLIB <RFC1950>"),
            CompressionAlgorithm::BZip2 => f.write_str("BZip2"),
            CompressionAlgorithm::Private(_) =>
                f.write_str("Private/Experimental algorithm"),
            CompressionAlgorithm::Unknown(_) => f.write_str("Unknown"),
        }
    }
}

/// The OpenPGP hash algorithms as defined in [Section 9.4 of RFC 4880].
///
///   [Section 9.4 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-9.4
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub enum HashAlgorithm {
    /// Rivest et.al. message digest 5.
    MD5,
    /// NIST Secure Hash Algorithm (deprecated)
    SHA1,
    /// RIPEMD-160
    RipeMD,
    /// 256-bit version of SHA2
    SHA256,
    /// 384-bit version of SHA2
    SHA384,
    /// 512-bit version of SHA2
    SHA512,
    /// 224-bit version of SHA2
    SHA224,
    /// 256-bit version of SHA3
    SHA3_256,
    /// 512-bit version of SHA3
    SHA3_512,
    /// Reserved hash algorithm identifier.
    Reserved(u8),
    /// Private hash algorithm identifier.
    Private(u8),
    /// Unknown hash algorithm identifier.
    Unknown(u8),
}

impl From<u8> for HashAlgorithm {
    fn from(u: u8) -> Self {
        match u {
            1 => HashAlgorithm::MD5,
            2 => HashAlgorithm::SHA1,
            3 => HashAlgorithm::RipeMD,
            4..=7 | 13 => HashAlgorithm::Reserved(u),
            8 => HashAlgorithm::SHA256,
            9 => HashAlgorithm::SHA384,
            10 => HashAlgorithm::SHA512,
            11 => HashAlgorithm::SHA224,
            12 => HashAlgorithm::SHA3_256,
            14 => HashAlgorithm::SHA3_512,
            100..=110 => HashAlgorithm::Private(u),
            _ => HashAlgorithm::Unknown(u),
        }
    }
}

impl From<HashAlgorithm> for u8 {
    fn from(h: HashAlgorithm) -> u8 {
        match h {
            HashAlgorithm::MD5 => 1,
            HashAlgorithm::SHA1 => 2,
            HashAlgorithm::RipeMD => 3,
            HashAlgorithm::SHA256 => 8,
            HashAlgorithm::SHA384 => 9,
            HashAlgorithm::SHA512 => 10,
            HashAlgorithm::SHA224 => 11,
            HashAlgorithm::SHA3_256 => 12,
            HashAlgorithm::SHA3_512 => 14,
            HashAlgorithm::Reserved(u) => u,
            HashAlgorithm::Private(u) => u,
            HashAlgorithm::Unknown(u) => u,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            HashAlgorithm::MD5 => f.write_str("MD5"),
            HashAlgorithm::SHA1 => f.write_str("SHA-1"),
            HashAlgorithm::RipeMD => f.write_str("RIPE-MD/160"),
            HashAlgorithm::SHA256 => f.write_str("SHA2-256"),
            HashAlgorithm::SHA384 => f.write_str("SHA2-384"),
            HashAlgorithm::SHA512 => f.write_str("SHA2-512"),
            HashAlgorithm::SHA224 => f.write_str("SHA2-224"),
            HashAlgorithm::SHA3_256 => f.write_str("SHA3-256"),
            HashAlgorithm::SHA3_512 => f.write_str("SHA3-512"),
            HashAlgorithm::Reserved(_) => f.write_str("Reserved"),
            HashAlgorithm::Private(_) =>
                f.write_str("Private/Experimental algorithm"),
            HashAlgorithm::Unknown(_) => f.write_str("Unknown"),
        }
    }
}

/// Signature type as defined in [Section 5.2.1 of RFC 4880].
///
///   [Section 5.2.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.1
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub enum SignatureType {
    /// Signature over a binary document.
    Binary,
    /// Signature over a canonical text document.
    Text,
    /// Standalone signature.
    Standalone,

    /// Generic certification of a User ID and Public-Key packet.
    GenericCertification,
    /// Persona certification of a User ID and Public-Key packet.
    PersonaCertification,
    /// Casual certification of a User ID and Public-Key packet.
    CasualCertification,
    /// Positive certification of a User ID and Public-Key packet.
    PositiveCertification,

    /// Attested Key Signature.
    AttestationKey,
    /// Subkey Binding Signature
    SubkeyBinding,
    /// Primary Key Binding Signature
    PrimaryKeyBinding,
    /// Signature directly on a key
    DirectKey,

    /// Key revocation signature
    KeyRevocation,
    /// Subkey revocation signature
    SubkeyRevocation,
    /// Certification revocation signature
    CertificationRevocation,

    /// Timestamp signature.
    Timestamp,
    /// Third-Party Confirmation signature.
    Confirmation,

    /// Catchall.
    Unknown(u8),
}

impl From<u8> for SignatureType {
    fn from(u: u8) -> Self {
        match u {
            0x00 => SignatureType::Binary,
            0x01 => SignatureType::Text,
            0x02 => SignatureType::Standalone,
            0x10 => SignatureType::GenericCertification,
            0x11 => SignatureType::PersonaCertification,
            0x12 => SignatureType::CasualCertification,
            0x13 => SignatureType::PositiveCertification,
            0x16 => SignatureType::AttestationKey,
            0x18 => SignatureType::SubkeyBinding,
            0x19 => SignatureType::PrimaryKeyBinding,
            0x1f => SignatureType::DirectKey,
            0x20 => SignatureType::KeyRevocation,
            0x28 => SignatureType::SubkeyRevocation,
            0x30 => SignatureType::CertificationRevocation,
            0x40 => SignatureType::Timestamp,
            0x50 => SignatureType::Confirmation,
            _ => SignatureType::Unknown(u),
        }
    }
}

impl From<SignatureType> for u8 {
    fn from(t: SignatureType) -> Self {
        match t {
            SignatureType::Binary => 0x00,
            SignatureType::Text => 0x01,
            SignatureType::Standalone => 0x02,
            SignatureType::GenericCertification => 0x10,
            SignatureType::PersonaCertification => 0x11,
            SignatureType::CasualCertification => 0x12,
            SignatureType::PositiveCertification => 0x13,
            SignatureType::AttestationKey => 0x16,
            SignatureType::SubkeyBinding => 0x18,
            SignatureType::PrimaryKeyBinding => 0x19,
            SignatureType::DirectKey => 0x1f,
            SignatureType::KeyRevocation => 0x20,
            SignatureType::SubkeyRevocation => 0x28,
            SignatureType::CertificationRevocation => 0x30,
            SignatureType::Timestamp => 0x40,
            SignatureType::Confirmation => 0x50,
            SignatureType::Unknown(u) => u,
        }
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SignatureType::Binary =>
                f.write_str("Signature of a binary document"),
            SignatureType::Text =>
                f.write_str("Signature of a canonical text document"),
            SignatureType::Standalone =>
                f.write_str("Standalone signature"),
            SignatureType::GenericCertification =>
                f.write_str("Generic certification of a User ID and Public-Key packet"),
            SignatureType::PersonaCertification =>
                f.write_str("Persona certification of a User ID and Public-Key packet"),
            SignatureType::CasualCertification =>
                f.write_str("Casual certification of a User ID and Public-Key packet"),
            SignatureType::PositiveCertification =>
                f.write_str("Positive certification of a User ID and Public-Key packet"),
            SignatureType::AttestationKey =>
                f.write_str("Attested Key Signature"),
            SignatureType::SubkeyBinding =>
                f.write_str("Subkey Binding Signature"),
            SignatureType::PrimaryKeyBinding =>
                f.write_str("Primary Key Binding Signature"),
            SignatureType::DirectKey =>
                f.write_str("Signature directly on a key"),
            SignatureType::KeyRevocation =>
                f.write_str("Key revocation signature"),
            SignatureType::SubkeyRevocation =>
                f.write_str("Subkey revocation signature"),
            SignatureType::CertificationRevocation =>
                f.write_str("Certification revocation signature"),
            SignatureType::Timestamp =>
                f.write_str("Timestamp signature"),
            SignatureType::Confirmation =>
                f.write_str("Third-Party Confirmation signature"),
            SignatureType::Unknown(_) => f.write_str("Unknown"),
        }
    }
}

/// Describes the reason for a revocation.
///
/// See the description of revocation subpackets [Section 5.2.3.23 of RFC 4880].
///
///   [Section 5.2.3.23 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.23
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub enum ReasonForRevocation {
    /// No reason specified (key revocations or cert revocations)
    Unspecified,
    /// Key is superseded (key revocations)
    KeySuperseded,
    /// Key material has been compromised (key revocations)
    KeyCompromised,
    /// Key is retired and no longer used (key revocations)
    KeyRetired,
    /// User ID information is no longer valid (cert revocations)
    UIDRetired,
    /// Private reason identifier.
    Private(u8),
    /// Unknown reason identifier.
    Unknown(u8),
}

impl From<u8> for ReasonForRevocation {
    fn from(u: u8) -> Self {
        use self::ReasonForRevocation::*;
        match u {
            0 => Unspecified,
            1 => KeySuperseded,
            2 => KeyCompromised,
            3 => KeyRetired,
            32 => UIDRetired,
            100..=110 => Private(u),
            u => Unknown(u),
        }
    }
}

impl From<ReasonForRevocation> for u8 {
    fn from(r: ReasonForRevocation) -> u8 {
        use self::ReasonForRevocation::*;
        match r {
            Unspecified => 0,
            KeySuperseded => 1,
            KeyCompromised => 2,
            KeyRetired => 3,
            UIDRetired => 32,
            Private(u) => u,
            Unknown(u) => u,
        }
    }
}

impl fmt::Display for ReasonForRevocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::ReasonForRevocation::*;
        match *self {
            Unspecified =>
                f.write_str("No reason specified"),
            KeySuperseded =>
                f.write_str("Key is superseded"),
            KeyCompromised =>
                f.write_str("Key material has been compromised"),
            KeyRetired =>
                f.write_str("Key is retired and no longer used"),
            UIDRetired =>
                f.write_str("User ID information is no longer valid"),
            Private(_) =>
                f.write_str("Private/Experimental reason"),
            Unknown(_) =>
                f.write_str("Unknown"),
        }
    }
}

/// Describes the format of the body of a literal data packet.
///
/// See the description of literal data packets [Section 5.9 of RFC 4880].
///
///   [Section 5.9 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.9
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub enum DataFormat {
    /// Binary data.
    Binary,
    /// Text data.
    Text,
    /// Text data, encoded using UTF-8.
    Unicode,
    /// Local mode.  Both `l` and the RFC 1991 `1` are mapped here.
    Local,
    /// MIME message body part.
    MIME,
    /// Unknown format specifier.
    Unknown(u8),
}

impl From<u8> for DataFormat {
    fn from(u: u8) -> Self {
        use self::DataFormat::*;
        match u {
            b'b' => Binary,
            b't' => Text,
            b'u' => Unicode,
            b'l' | b'1' => Local,
            b'm' => MIME,
            c => Unknown(c),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::DataFormat::*;
        match *self {
            Binary => f.write_str("binary"),
            Text => f.write_str("text"),
            Unicode => f.write_str("UTF-8 text"),
            Local => f.write_str("local"),
            MIME => f.write_str("MIME message body part"),
            Unknown(_) => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    quickcheck! {
        fn pk_roundtrip(u: u8) -> bool {
            u8::from(PublicKeyAlgorithm::from(u)) == u
        }
    }

    quickcheck! {
        fn sym_roundtrip(u: u8) -> bool {
            u8::from(SymmetricAlgorithm::from(u)) == u
        }
    }

    quickcheck! {
        fn hash_roundtrip(u: u8) -> bool {
            u8::from(HashAlgorithm::from(u)) == u
        }
    }

    quickcheck! {
        fn sigtype_roundtrip(u: u8) -> bool {
            u8::from(SignatureType::from(u)) == u
        }
    }

    #[test]
    fn names() {
        assert_eq!(PublicKeyAlgorithm::from(19).to_string(),
                   "ECDSA public key algorithm");
        assert_eq!(PublicKeyAlgorithm::from(100).to_string(),
                   "Private/Experimental algorithm");
        assert_eq!(PublicKeyAlgorithm::from(200).to_string(), "Unknown");
        assert_eq!(PublicKeyAlgorithm::from(23).short_name(), None);
        assert_eq!(PublicKeyAlgorithm::from(3).short_name(), Some("RSA"));
        assert_eq!(HashAlgorithm::from(8).to_string(), "SHA2-256");
        assert_eq!(SymmetricAlgorithm::from(9).to_string(),
                   "AES with 256-bit key");
        assert_eq!(SymmetricAlgorithm::from(9).block_size(), Some(16));
        assert_eq!(SymmetricAlgorithm::from(3).block_size(), Some(8));
        assert_eq!(CompressionAlgorithm::from(2).to_string(),
                   "ZLIB <RFC1950>");
        assert_eq!(AEADAlgorithm::from(2).iv_size(), Some(15));
        assert_eq!(SignatureType::from(0x18).to_string(),
                   "Subkey Binding Signature");
        assert_eq!(SignatureType::from(0x17).to_string(), "Unknown");
        assert_eq!(DataFormat::from(b'1'), DataFormat::Local);
    }

    #[test]
    fn curves() {
        let c = Curve::from_oid(ED25519_OID);
        assert_eq!(c, Curve::Ed25519);
        assert_eq!(c.to_string(), "ed25519");
        assert_eq!(c.bits(), Some(256));
        assert_eq!(Curve::from_oid(NIST_P521_OID).bits(), Some(521));
        let u = Curve::from_oid(&[1, 2, 3]);
        assert_eq!(u.to_string(), "Unknown");
        assert_eq!(u.bits(), None);
    }
}

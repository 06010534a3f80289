use std::fmt;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

/// The OpenPGP packet tags as defined in [Section 4.3 of RFC 4880].
///
///   [Section 4.3 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-4.3
///
/// The values correspond to the serialized format.  The `Display`
/// implementation includes the numeric value, e.g. `Signature Packet
/// (tag 2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Reserved, a packet tag must not have this value.
    Reserved,
    /// Public-Key Encrypted Session Key Packet.
    PKESK,
    /// Signature Packet.
    Signature,
    /// Symmetric-Key Encrypted Session Key Packet.
    SKESK,
    /// One-Pass Signature Packet.
    OnePassSig,
    /// Secret-Key Packet.
    SecretKey,
    /// Public-Key Packet.
    PublicKey,
    /// Secret-Subkey Packet.
    SecretSubkey,
    /// Compressed Data Packet.
    CompressedData,
    /// Symmetrically Encrypted Data Packet.
    SED,
    /// Marker Packet.
    Marker,
    /// Literal Data Packet.
    Literal,
    /// Trust Packet.
    Trust,
    /// User ID Packet.
    UserID,
    /// Public-Subkey Packet.
    PublicSubkey,
    /// User Attribute Packet.
    UserAttribute,
    /// Sym. Encrypted and Integrity Protected Data Packet.
    SEIP,
    /// Modification Detection Code Packet.
    MDC,
    /// AEAD Encrypted Data Packet (RFC 4880bis).
    AED,
    /// Unassigned packets.
    Unknown(u8),
    /// Experimental packets.
    Private(u8),
}

impl From<u8> for Tag {
    fn from(u: u8) -> Self {
        use self::Tag::*;

        match u {
            0 => Reserved,
            1 => PKESK,
            2 => Signature,
            3 => SKESK,
            4 => OnePassSig,
            5 => SecretKey,
            6 => PublicKey,
            7 => SecretSubkey,
            8 => CompressedData,
            9 => SED,
            10 => Marker,
            11 => Literal,
            12 => Trust,
            13 => UserID,
            14 => PublicSubkey,
            17 => UserAttribute,
            18 => SEIP,
            19 => MDC,
            20 => AED,
            60..=63 => Private(u),
            _ => Unknown(u),
        }
    }
}

impl From<Tag> for u8 {
    fn from(t: Tag) -> u8 {
        match t {
            Tag::Reserved => 0,
            Tag::PKESK => 1,
            Tag::Signature => 2,
            Tag::SKESK => 3,
            Tag::OnePassSig => 4,
            Tag::SecretKey => 5,
            Tag::PublicKey => 6,
            Tag::SecretSubkey => 7,
            Tag::CompressedData => 8,
            Tag::SED => 9,
            Tag::Marker => 10,
            Tag::Literal => 11,
            Tag::Trust => 12,
            Tag::UserID => 13,
            Tag::PublicSubkey => 14,
            Tag::UserAttribute => 17,
            Tag::SEIP => 18,
            Tag::MDC => 19,
            Tag::AED => 20,
            Tag::Private(x) => x,
            Tag::Unknown(x) => x,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Tag::Reserved =>
                "Reserved - a packet tag MUST NOT have this value",
            Tag::PKESK => "Public-Key Encrypted Session Key Packet",
            Tag::Signature => "Signature Packet",
            Tag::SKESK => "Symmetric-Key Encrypted Session Key Packet",
            Tag::OnePassSig => "One-Pass Signature Packet",
            Tag::SecretKey => "Secret-Key Packet",
            Tag::PublicKey => "Public-Key Packet",
            Tag::SecretSubkey => "Secret-Subkey Packet",
            Tag::CompressedData => "Compressed Data Packet",
            Tag::SED => "Symmetrically Encrypted Data Packet",
            Tag::Marker => "Marker Packet",
            Tag::Literal => "Literal Data Packet",
            Tag::Trust => "Trust Packet",
            Tag::UserID => "User ID Packet",
            Tag::PublicSubkey => "Public-Subkey Packet",
            Tag::UserAttribute => "User Attribute Packet",
            Tag::SEIP => "Sym. Encrypted Integrity Protected Data Packet",
            Tag::MDC => "Modification Detection Code Packet",
            Tag::AED => "AEAD Encrypted Data Packet",
            Tag::Private(_) => "Private or Experimental Values",
            Tag::Unknown(_) => "Unknown",
        };
        write!(f, "{} (tag {})", name, u8::from(*self))
    }
}

#[cfg(test)]
impl Arbitrary for Tag {
    fn arbitrary(g: &mut Gen) -> Self {
        u8::arbitrary(g).into()
    }
}

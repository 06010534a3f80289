//! Subpacket identifiers.
//!
//! Signature subpackets are described in [Section 5.2.3.1 of RFC
//! 4880], user attribute subpackets in [Section 5.12 of RFC 4880].
//!
//!   [Section 5.2.3.1 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.1
//!   [Section 5.12 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.12

use std::fmt;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

/// The signature subpacket types.
///
/// The `Display` implementation includes the numeric value, e.g.
/// `Issuer (sub 16)`.  The critical bit is not part of the type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubpacketTag {
    /// The time the signature was made.
    SignatureCreationTime,
    /// The validity period of the signature.
    SignatureExpirationTime,
    /// This subpacket denotes whether a certification signature is
    /// "exportable", to be used by other users than the signature's issuer.
    ExportableCertification,
    /// Signer asserts that the key is not only valid but also trustworthy at
    /// the specified level.
    TrustSignature,
    /// Used in conjunction with trust Signature packets (of level > 0) to
    /// limit the scope of trust that is extended.
    RegularExpression,
    /// Signature's revocability status.
    Revocable,
    /// The validity period of the key.
    KeyExpirationTime,
    /// Deprecated
    PlaceholderForBackwardCompatibility,
    /// Symmetric algorithm numbers that indicate which algorithms the key
    /// holder prefers to use.
    PreferredSymmetricAlgorithms,
    /// Authorizes the specified key to issue revocation signatures for this
    /// key.
    RevocationKey,
    /// The OpenPGP Key ID of the key issuing the signature.
    Issuer,
    /// This subpacket describes a "notation" on the signature that the
    /// issuer wishes to make.
    NotationData,
    /// Message digest algorithm numbers that indicate which algorithms the
    /// key holder prefers to receive.
    PreferredHashAlgorithms,
    /// Compression algorithm numbers that indicate which algorithms the key
    /// holder prefers to use.
    PreferredCompressionAlgorithms,
    /// This is a list of one-bit flags that indicate preferences that the
    /// key holder has about how the key is handled on a key server.
    KeyServerPreferences,
    /// This is a URI of a key server that the key holder prefers be used for
    /// updates.
    PreferredKeyServer,
    /// This is a flag in a User ID's self-signature that states whether this
    /// User ID is the main User ID for this key.
    PrimaryUserID,
    /// This subpacket contains a URI of a document that describes the policy
    /// under which the signature was issued.
    PolicyURI,
    /// This subpacket contains a list of binary flags that hold information
    /// about a key.
    KeyFlags,
    /// This subpacket allows a keyholder to state which User ID is
    /// responsible for the signing.
    SignersUserID,
    /// This subpacket is used only in key revocation and certification
    /// revocation signatures.
    ReasonForRevocation,
    /// The Features subpacket denotes which advanced OpenPGP features a
    /// user's implementation supports.
    Features,
    /// This subpacket identifies a specific target signature to which a
    /// signature refers.
    SignatureTarget,
    /// This subpacket contains a complete Signature packet body
    EmbeddedSignature,
    /// Added in RFC 4880bis.
    IssuerFingerprint,
    /// Preferred AEAD Algorithms.
    PreferredAEADAlgorithms,
    /// Intended Recipient Fingerprint [proposed].
    IntendedRecipient,
    /// Reserved subpacket type.
    Reserved(u8),
    /// Private or experimental subpacket type.
    Private(u8),
    /// Unassigned subpacket type.
    Unknown(u8),
}

impl From<u8> for SubpacketTag {
    fn from(u: u8) -> Self {
        match u {
            2 => SubpacketTag::SignatureCreationTime,
            3 => SubpacketTag::SignatureExpirationTime,
            4 => SubpacketTag::ExportableCertification,
            5 => SubpacketTag::TrustSignature,
            6 => SubpacketTag::RegularExpression,
            7 => SubpacketTag::Revocable,
            9 => SubpacketTag::KeyExpirationTime,
            10 => SubpacketTag::PlaceholderForBackwardCompatibility,
            11 => SubpacketTag::PreferredSymmetricAlgorithms,
            12 => SubpacketTag::RevocationKey,
            16 => SubpacketTag::Issuer,
            20 => SubpacketTag::NotationData,
            21 => SubpacketTag::PreferredHashAlgorithms,
            22 => SubpacketTag::PreferredCompressionAlgorithms,
            23 => SubpacketTag::KeyServerPreferences,
            24 => SubpacketTag::PreferredKeyServer,
            25 => SubpacketTag::PrimaryUserID,
            26 => SubpacketTag::PolicyURI,
            27 => SubpacketTag::KeyFlags,
            28 => SubpacketTag::SignersUserID,
            29 => SubpacketTag::ReasonForRevocation,
            30 => SubpacketTag::Features,
            31 => SubpacketTag::SignatureTarget,
            32 => SubpacketTag::EmbeddedSignature,
            33 => SubpacketTag::IssuerFingerprint,
            34 => SubpacketTag::PreferredAEADAlgorithms,
            35 => SubpacketTag::IntendedRecipient,
            0 | 1 | 8 | 13 | 14 | 15 | 17 | 18 | 19 =>
                SubpacketTag::Reserved(u),
            100..=110 => SubpacketTag::Private(u),
            _ => SubpacketTag::Unknown(u),
        }
    }
}

impl From<SubpacketTag> for u8 {
    fn from(t: SubpacketTag) -> Self {
        match t {
            SubpacketTag::SignatureCreationTime => 2,
            SubpacketTag::SignatureExpirationTime => 3,
            SubpacketTag::ExportableCertification => 4,
            SubpacketTag::TrustSignature => 5,
            SubpacketTag::RegularExpression => 6,
            SubpacketTag::Revocable => 7,
            SubpacketTag::KeyExpirationTime => 9,
            SubpacketTag::PlaceholderForBackwardCompatibility => 10,
            SubpacketTag::PreferredSymmetricAlgorithms => 11,
            SubpacketTag::RevocationKey => 12,
            SubpacketTag::Issuer => 16,
            SubpacketTag::NotationData => 20,
            SubpacketTag::PreferredHashAlgorithms => 21,
            SubpacketTag::PreferredCompressionAlgorithms => 22,
            SubpacketTag::KeyServerPreferences => 23,
            SubpacketTag::PreferredKeyServer => 24,
            SubpacketTag::PrimaryUserID => 25,
            SubpacketTag::PolicyURI => 26,
            SubpacketTag::KeyFlags => 27,
            SubpacketTag::SignersUserID => 28,
            SubpacketTag::ReasonForRevocation => 29,
            SubpacketTag::Features => 30,
            SubpacketTag::SignatureTarget => 31,
            SubpacketTag::EmbeddedSignature => 32,
            SubpacketTag::IssuerFingerprint => 33,
            SubpacketTag::PreferredAEADAlgorithms => 34,
            SubpacketTag::IntendedRecipient => 35,
            SubpacketTag::Reserved(u) => u,
            SubpacketTag::Private(u) => u,
            SubpacketTag::Unknown(u) => u,
        }
    }
}

impl fmt::Display for SubpacketTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::SubpacketTag::*;
        let name = match *self {
            SignatureCreationTime => "Signature Creation Time",
            SignatureExpirationTime => "Signature Expiration Time",
            ExportableCertification => "Exportable Certification",
            TrustSignature => "Trust Signature",
            RegularExpression => "Regular Expression",
            Revocable => "Revocable",
            KeyExpirationTime => "Key Expiration Time",
            PlaceholderForBackwardCompatibility =>
                "Placeholder for backward compatibility",
            PreferredSymmetricAlgorithms => "Preferred Symmetric Algorithms",
            RevocationKey => "Revocation Key",
            Issuer => "Issuer",
            NotationData => "Notation Data",
            PreferredHashAlgorithms => "Preferred Hash Algorithms",
            PreferredCompressionAlgorithms =>
                "Preferred Compression Algorithms",
            KeyServerPreferences => "Key Server Preferences",
            PreferredKeyServer => "Preferred Key Server",
            PrimaryUserID => "Primary User ID",
            PolicyURI => "Policy URI",
            KeyFlags => "Key Flags",
            SignersUserID => "Signer's User ID",
            ReasonForRevocation => "Reason for Revocation",
            Features => "Features",
            SignatureTarget => "Signature Target",
            EmbeddedSignature => "Embedded Signature",
            IssuerFingerprint => "Issuer Fingerprint",
            PreferredAEADAlgorithms => "Preferred AEAD Algorithms",
            IntendedRecipient => "Intended Recipient Fingerprint",
            Reserved(_) => "Reserved",
            Private(_) => "Private or experimental",
            Unknown(_) => "Unknown",
        };
        write!(f, "{} (sub {})", name, u8::from(*self))
    }
}

/// The user attribute subpacket types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserAttributeTag {
    /// An image of the key holder.
    Image,
    /// Private or experimental subpacket type.
    Private(u8),
    /// Unassigned subpacket type.
    Unknown(u8),
}

impl From<u8> for UserAttributeTag {
    fn from(u: u8) -> Self {
        match u {
            1 => UserAttributeTag::Image,
            100..=110 => UserAttributeTag::Private(u),
            _ => UserAttributeTag::Unknown(u),
        }
    }
}

impl From<UserAttributeTag> for u8 {
    fn from(t: UserAttributeTag) -> Self {
        match t {
            UserAttributeTag::Image => 1,
            UserAttributeTag::Private(u) => u,
            UserAttributeTag::Unknown(u) => u,
        }
    }
}

impl fmt::Display for UserAttributeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            UserAttributeTag::Image => "Image Attribute",
            UserAttributeTag::Private(_) => "Private or experimental",
            UserAttributeTag::Unknown(_) => "Unknown",
        };
        write!(f, "{} (sub {})", name, u8::from(*self))
    }
}

#[cfg(test)]
impl Arbitrary for SubpacketTag {
    fn arbitrary(g: &mut Gen) -> Self {
        u8::arbitrary(g).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    quickcheck! {
        fn roundtrip(u: u8) -> bool {
            u8::from(SubpacketTag::from(u)) == u
                && u8::from(UserAttributeTag::from(u)) == u
        }
    }

    quickcheck! {
        fn display(tag: SubpacketTag) -> bool {
            tag.to_string().ends_with(&format!(" (sub {})", u8::from(tag)))
        }
    }

    #[test]
    fn names() {
        assert_eq!(SubpacketTag::from(16).to_string(), "Issuer (sub 16)");
        assert_eq!(SubpacketTag::from(8).to_string(), "Reserved (sub 8)");
        assert_eq!(SubpacketTag::from(101).to_string(),
                   "Private or experimental (sub 101)");
        assert_eq!(SubpacketTag::from(60).to_string(), "Unknown (sub 60)");
        assert_eq!(UserAttributeTag::from(1).to_string(),
                   "Image Attribute (sub 1)");
    }
}

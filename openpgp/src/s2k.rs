//! String-to-Key (S2K) specifiers.
//!
//! See [Section 3.7 of RFC 4880] and the GnuPG extensions described
//! in GnuPG's `doc/DETAILS`.
//!
//!   [Section 3.7 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-3.7

use std::fmt;

use crate::Cursor;
use crate::Result;
use crate::types::HashAlgorithm;

/// A String-to-Key specifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum S2K {
    /// Hashes the password.
    Simple {
        /// Hash used for key derivation.
        hash: HashAlgorithm,
    },
    /// Hashes the password with a salt.
    Salted {
        /// Hash used for key derivation.
        hash: HashAlgorithm,
        /// Public salt value mixed into the password.
        salt: [u8; 8],
    },
    /// Repeatedly hashes the password with a salt.
    Iterated {
        /// Hash used for key derivation.
        hash: HashAlgorithm,
        /// Public salt value mixed into the password.
        salt: [u8; 8],
        /// The coded number of bytes to hash.
        coded_count: u8,
    },
    /// GnuPG's extension: no or offloaded secret key material.
    Gnu {
        /// Hash used for key derivation.
        hash: HashAlgorithm,
        /// The protection mode.
        mode: GnuMode,
    },
    /// Private S2K algorithm.
    Private(u8),
    /// Reserved or unknown S2K algorithm.
    Unknown(u8),
}

/// The protection modes of GnuPG's S2K extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GnuMode {
    /// The secret key material is absent.
    Dummy,
    /// The secret key material is stored on the smartcard with the
    /// given serial number.
    DivertToCard(Vec<u8>),
    /// Unknown mode.
    Unknown(u8),
}

impl S2K {
    /// Returns the numeric S2K type.
    pub fn id(&self) -> u8 {
        match self {
            S2K::Simple { .. } => 0,
            S2K::Salted { .. } => 1,
            S2K::Iterated { .. } => 3,
            S2K::Gnu { .. } => 101,
            S2K::Private(u) | S2K::Unknown(u) => *u,
        }
    }

    /// Returns the number of bytes hashed for a coded count.
    pub fn decode_count(coded: u8) -> u32 {
        let c = coded as u32;
        (16 + (c & 15)) << ((c >> 4) + 6)
    }

    /// Reads an S2K specifier.
    ///
    /// Private and unknown types have no known layout; nothing
    /// beyond the type octet is consumed.
    pub fn parse(cursor: &mut Cursor) -> Result<S2K> {
        let s2k = cursor.read_u8("S2K type")?;
        let s2k = match s2k {
            0 => S2K::Simple {
                hash: cursor.read_u8("S2K hash algorithm")?.into(),
            },
            1 => S2K::Salted {
                hash: cursor.read_u8("S2K hash algorithm")?.into(),
                salt: cursor.read_array("S2K salt")?,
            },
            3 => S2K::Iterated {
                hash: cursor.read_u8("S2K hash algorithm")?.into(),
                salt: cursor.read_array("S2K salt")?,
                coded_count: cursor.read_u8("S2K count")?,
            },
            // The GnuPG extensions are marked by "GNU" after the hash
            // algorithm.  Anything else is left to the caller.
            101 if cursor.peek(4).map(|b| &b[1..]) == Some(&b"GNU"[..]) => {
                let hash = cursor.read_u8("S2K hash algorithm")?.into();
                cursor.read_array::<3>("S2K GNU marker")?;
                let mode = match cursor.read_u8("S2K GNU mode")? {
                    1 => GnuMode::Dummy,
                    2 => {
                        let len = cursor.read_u8("card serial length")?;
                        GnuMode::DivertToCard(
                            cursor.read_bytes("card serial", len as usize)?)
                    }
                    m => GnuMode::Unknown(m),
                };
                S2K::Gnu { hash, mode }
            }
            100..=110 => S2K::Private(s2k),
            u => S2K::Unknown(u),
        };
        Ok(s2k)
    }
}

impl fmt::Display for S2K {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            S2K::Simple { .. } => "Simple S2K",
            S2K::Salted { .. } => "Salted S2K",
            S2K::Iterated { .. } => "Iterated and Salted S2K",
            S2K::Gnu { .. } => "GnuPG extension",
            S2K::Private(_) => "Private/Experimental S2K",
            S2K::Unknown(2) => "Reserved value",
            S2K::Unknown(_) => "Unknown",
        };
        write!(f, "{} (s2k {})", name, self.id())
    }
}

impl fmt::Display for GnuMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GnuMode::Dummy => f.write_str("gnu-dummy"),
            GnuMode::DivertToCard(_) => f.write_str("gnu-divert-to-card"),
            GnuMode::Unknown(m) => write!(f, "unknown (mode {})", m),
        }
    }
}

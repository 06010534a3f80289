//! Bit flag fields.
//!
//! Key flags, features, key server preferences and notation flags are
//! all rendered the same way: one `Flag` item per known bit that is
//! set, followed by one item per octet collecting the set bits that
//! are not known.

use crate::Item;

/// A known bit of a flag field.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Flag {
    /// Index of the octet holding the bit.
    pub octet: usize,
    pub mask: u8,
    pub name: &'static str,
}

const fn flag(octet: usize, mask: u8, name: &'static str) -> Flag {
    Flag { octet, mask, name }
}

/// Key flags, see [Section 5.2.3.21 of RFC 4880].
///
///   [Section 5.2.3.21 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.21
pub(crate) const KEY_FLAGS: &[Flag] = &[
    flag(0, 0x01, "This key may be used to certify other keys."),
    flag(0, 0x02, "This key may be used to sign data."),
    flag(0, 0x04, "This key may be used to encrypt communications."),
    flag(0, 0x08, "This key may be used to encrypt storage."),
    flag(0, 0x10, "The private component of this key may have been split by a secret-sharing mechanism."),
    flag(0, 0x20, "This key may be used for authentication."),
    flag(0, 0x80, "The private component of this key may be in the possession of more than one person."),
    flag(1, 0x04, "This key may be used as an additional decryption subkey (ADSK)."),
    flag(1, 0x08, "This key may be used for timestamping."),
];

/// Features, see [Section 5.2.3.24 of RFC 4880].
///
///   [Section 5.2.3.24 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.2.3.24
pub(crate) const FEATURES: &[Flag] = &[
    flag(0, 0x01, "Modification Detection (packets 18 and 19)"),
    flag(0, 0x02, "AEAD Encrypted Data Packet (packet 20) and version 5 Symmetric-Key Encrypted Session Key Packets (packet 3)"),
    flag(0, 0x04, "Version 5 Public-Key Packet format and corresponding new fingerprint format"),
    flag(0, 0x08, "Version 2 Symmetrically Encrypted and Integrity Protected Data packet"),
];

pub(crate) const KEY_SERVER_PREFERENCES: &[Flag] = &[
    flag(0, 0x80, "No-modify"),
];

pub(crate) const NOTATION_FLAGS: &[Flag] = &[
    flag(0, 0x80, "Human-readable"),
];

/// Expands `data` into flag items using `table`.
///
/// Never fails: bits without an entry in `table` end up in an
/// `Unknown flagN` item, where `N` is the one-based octet index.
pub(crate) fn expand(data: &[u8], table: &[Flag]) -> Vec<Item> {
    let mut items = Vec::new();
    for (i, &octet) in data.iter().enumerate() {
        let mut known = 0u8;
        for f in table.iter().filter(|f| f.octet == i) {
            known |= f.mask;
            if octet & f.mask != 0 {
                items.push(Item::new("Flag").with_value(f.name));
            }
        }

        let unknown = octet & ! known;
        if unknown != 0 {
            items.push(Item::new("Flag").with_value(
                format!("Unknown flag{}({:#04x})", i + 1, unknown)));
        }
    }
    items
}

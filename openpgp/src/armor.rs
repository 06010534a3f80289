//! ASCII Armor.
//!
//! This module removes the ASCII Armor (see [RFC 4880, section 6])
//! from OpenPGP data.
//!
//! [RFC 4880, section 6]: https://tools.ietf.org/html/rfc4880#section-6
//!
//! # Scope
//!
//! Only the first armored block is decoded.  Multipart messages are
//! not supported.  The text of a cleartext signed message is
//! skipped; the signature block that follows it is decoded.

use base64::Engine;
use log::{debug, warn};

use crate::{Error, Result};

const CRC24_INIT: u32 = 0xB704CE;
const CRC24_POLY: u32 = 0x864CFB;

/// Computes the CRC-24 (see [RFC 4880, section 6.1]).
///
/// [RFC 4880, section 6.1]: https://tools.ietf.org/html/rfc4880#section-6.1
pub(crate) fn crc24(data: &[u8]) -> u32 {
    let mut n = CRC24_INIT;
    for octet in data {
        n ^= (*octet as u32) << 16;
        for _ in 0..8 {
            n <<= 1;
            if n & 0x1000000 > 0 {
                n ^= CRC24_POLY;
            }
        }
    }
    n & 0xFFFFFF
}

/// Specifies the type of data (see [RFC 4880, section 6.2]).
///
/// [RFC 4880, section 6.2]: https://tools.ietf.org/html/rfc4880#section-6.2
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Kind {
    /// A generic OpenPGP message.
    Message,
    /// A transferable public key.
    PublicKey,
    /// A transferable secret key.
    SecretKey,
    /// A detached signature.
    Signature,
    /// A generic file.  This is a GnuPG extension.
    File,
    /// The text of a cleartext signed message.
    SignedMessage,
    /// Anything else.
    Unknown,
}

impl Kind {
    /// Classifies an armor header line.
    ///
    /// Returns `None` if `line` is not an armor header line.
    fn detect(line: &[u8]) -> Option<Self> {
        let label = line.strip_prefix(b"-----BEGIN PGP ")?
            .strip_suffix(b"-----")?;
        Some(match label {
            b"MESSAGE" => Kind::Message,
            b"PUBLIC KEY BLOCK" => Kind::PublicKey,
            b"PRIVATE KEY BLOCK" | b"SECRET KEY BLOCK" => Kind::SecretKey,
            b"SIGNATURE" => Kind::Signature,
            b"ARMORED FILE" => Kind::File,
            b"SIGNED MESSAGE" => Kind::SignedMessage,
            _ => Kind::Unknown,
        })
    }
}

/// Returns the lines of `data` without line endings and trailing
/// whitespace.
fn lines(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    data.split(|&b| b == b'\n').map(|line| {
        let end = line.iter()
            .rposition(|b| ! b.is_ascii_whitespace())
            .map(|i| i + 1)
            .unwrap_or(0);
        &line[..end]
    })
}

/// Removes the ASCII armor from `data`.
///
/// Text before the armor header line is ignored.  Returns
/// [`Error::Truncated`] if there is no complete armored block, and
/// [`Error::MalformedArmor`] if the block is corrupt or its checksum
/// does not match.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    let mut lines = lines(data);

    // Find the header line.
    let mut kind = None;
    for line in &mut lines {
        match Kind::detect(line) {
            Some(Kind::SignedMessage) => {
                debug!("Skipping cleartext signed message");
            }
            Some(k) => {
                kind = Some(k);
                break;
            }
            None => (),
        }
    }
    let kind = kind.ok_or_else(
        || Error::Truncated("no armor header line".into()))?;
    debug!("Armored data of kind {:?}", kind);

    // Skip the armor headers.  A line that is not a header starts the
    // body, even without the separating blank line.
    let mut body = Vec::new();
    for line in &mut lines {
        if line.windows(2).any(|w| w == b": ") {
            continue;
        }
        body.extend_from_slice(line);
        break;
    }

    let mut checksum = None;
    let mut complete = false;
    for line in &mut lines {
        if line.starts_with(b"-----END PGP ") {
            complete = true;
            break;
        } else if let Some(crc) = line.strip_prefix(b"=") {
            checksum = Some(crc.to_vec());
        } else if checksum.is_none() {
            body.extend(line.iter().filter(|b| ! b.is_ascii_whitespace()));
        } else {
            warn!("Ignoring armored data after the checksum");
        }
    }
    if ! complete {
        return Err(Error::Truncated("no armor tail line".into()).into());
    }

    let engine = base64::engine::general_purpose::STANDARD;
    let binary = engine.decode(&body)
        .map_err(|e| Error::MalformedArmor(format!("{}", e)))?;

    if let Some(checksum) = checksum {
        let crc = engine.decode(&checksum)
            .map_err(|e| Error::MalformedArmor(
                format!("checksum: {}", e)))?;
        if crc.len() != 3 {
            return Err(Error::MalformedArmor(
                format!("checksum has {} bytes", crc.len())).into());
        }
        let expected = u32::from_be_bytes([0, crc[0], crc[1], crc[2]]);
        let actual = crc24(&binary);
        if expected != actual {
            return Err(Error::MalformedArmor(
                format!("CRC mismatch: expected {:06X}, got {:06X}",
                        expected, actual)).into());
        }
    }

    Ok(binary)
}

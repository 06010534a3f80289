//! Structural dumps of OpenPGP packet streams.
//!
//! This crate decodes OpenPGP data as defined by [RFC 4880] (and the
//! parts of [RFC 4880bis] that are seen in the wild) into a tree of
//! named, valued and annotated [`Item`]s.  It is an introspection
//! tool: nothing is verified, nothing is decrypted, and the structure
//! of the message is described but not validated.
//!
//! Input can be ASCII armored or binary.  [`parse`] first tries to
//! remove the armor and falls back to reading the data as binary
//! packets if no armor is found (see [`Options::armor_only`] to
//! disable the fallback).
//!
//! Malformed input never panics.  Packets that fail to decode keep
//! whatever was decoded before the error, together with an `Error`
//! item describing the problem.  Only errors in the packet framing
//! abort the parse, and even then the packets decoded up to that
//! point are returned alongside the error.
//!
//! # Examples
//!
//! ```
//! use sequoia_pgpdump::{parse, Options};
//!
//! // A User ID packet in the new packet format.
//! let data = b"\xcd\x10Alice <a@ex.org>";
//! let (report, result) = parse(&data[..], &Options::default());
//! result?;
//! let packet = &report.packets()[0];
//! assert_eq!(packet.name(), "User ID Packet (tag 13)");
//! assert_eq!(packet.children()[0].value(), Some("Alice <a@ex.org>"));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! [RFC 4880]: https://tools.ietf.org/html/rfc4880
//! [RFC 4880bis]: https://tools.ietf.org/html/draft-ietf-openpgp-rfc4880bis-10

#![warn(missing_docs)]

use log::debug;

pub mod armor;
pub mod context;
pub use context::{AlgMode, Context, Options};
mod cursor;
pub use cursor::Cursor;
mod item;
pub use item::{Dump, Item, Report};
pub mod packet;
pub mod parse;
pub mod s2k;
mod subpacket;
pub use subpacket::{SubpacketTag, UserAttributeTag};
mod tag;
pub use tag::Tag;
pub mod types;

/// Crate result specialization.
pub type Result<T> = ::std::result::Result<T, anyhow::Error>;

/// Errors returned by this crate.
///
/// Functions return [`anyhow::Error`]s.  Use `downcast_ref` to
/// recover one of these variants.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The data ended before a structure was complete.
    ///
    /// This is the only error that makes [`parse`] fall back from
    /// the armor interpretation to the binary one.
    #[error("Unexpected end of data: {0}")]
    Truncated(String),

    /// An invalid packet header, length encoding or version.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// A recognized but unsupported combination of fields.
    #[error("Unsupported structure: {0}")]
    UnsupportedStructure(String),

    /// The ASCII armor is present but corrupt.
    #[error("Malformed armor: {0}")]
    MalformedArmor(String),

    /// The data is not ASCII armored, but armor was required.
    #[error("Input is not ASCII armored")]
    NotArmored,
}

impl Error {
    /// Returns whether `err` is an [`Error::Truncated`].
    pub fn is_truncated(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<Error>(), Some(Error::Truncated(_)))
    }
}

/// Dumps `data`, which may be ASCII armored or binary.
///
/// The data is first interpreted as ASCII armor.  If that fails
/// because the data ended prematurely (in particular, when no armor
/// header line is found), the same bytes are parsed as binary packets,
/// unless `options.armor_only` is set, in which case
/// [`Error::NotArmored`] is returned.  All other errors are returned
/// as is.
///
/// The report is returned even if an error occurred.  It contains
/// every packet that was framed before the error.
pub fn parse(data: &[u8], options: &Options) -> (Report, Result<()>) {
    match parse_armored(data, options) {
        (_, Err(err)) if Error::is_truncated(&err) => {
            if options.armor_only {
                debug!("Not armored: {}", err);
                return (Report::default(), Err(Error::NotArmored.into()));
            }
            debug!("Not armored ({}), parsing as binary", err);
            parse_binary(data, options)
        }
        r => r,
    }
}

/// Dumps ASCII armored data.
pub fn parse_armored(data: &[u8], options: &Options) -> (Report, Result<()>) {
    match armor::decode(data) {
        Ok(binary) => parse_binary(&binary, options),
        Err(err) => (Report::default(), Err(err)),
    }
}

/// Dumps a binary packet stream.
///
/// If the framing breaks, the packets decoded so far are returned
/// together with the error.
pub fn parse_binary(data: &[u8], options: &Options) -> (Report, Result<()>) {
    let mut ctx = Context::new(options.clone());
    let mut packets = Vec::new();
    let r = parse::parse_packets(data, &mut ctx, &mut packets);
    (Report::new(packets), r)
}

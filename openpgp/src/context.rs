//! Decoding state.
//!
//! [`Options`] are set by the caller and do not change during a
//! parse.  A [`Context`] carries them through the recursive descent,
//! together with the state that later packets depend on: whether the
//! encrypted data is protected by a symmetric or a public key session
//! key, and the creation times needed to turn expiration offsets into
//! absolute times.

use std::fmt;

use crate::{Dump, Error, Result};
use crate::types::Timestamp;

/// Maximum nesting of compressed data packets and embedded
/// signatures.
const MAX_DEPTH: usize = 16;

/// Controls what is dumped and how.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Dump packet bodies and the raw bytes of every field.
    pub debug: bool,
    /// Dump multi-precision integers.
    pub integer_dump: bool,
    /// Dump the content of marker packets.
    pub marker_dump: bool,
    /// Dump the content of literal data packets.
    pub literal_dump: bool,
    /// Dump the content of private and experimental subpackets.
    pub private_dump: bool,
    /// Render dumps in rows of 16 bytes.
    pub grouped_dump: bool,
    /// Show times in UTC instead of the local time zone.
    pub utc: bool,
    /// Require ASCII armor, do not fall back to binary.
    pub armor_only: bool,
    /// Upper bound for a reassembled or decompressed packet body.
    pub max_packet_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            debug: false,
            integer_dump: false,
            marker_dump: false,
            literal_dump: false,
            private_dump: false,
            grouped_dump: false,
            utc: false,
            armor_only: false,
            max_packet_size: 64 * 1024 * 1024,
        }
    }
}

/// How the following encrypted data is keyed.
///
/// Set by the session key packets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgMode {
    /// No session key packet has been seen.
    NotSpecified,
    /// A symmetric-key encrypted session key packet has been seen.
    SymmetricEncryption,
    /// A public-key encrypted session key packet has been seen.
    PublicKeyEncryption,
}

impl Default for AlgMode {
    fn default() -> Self {
        AlgMode::NotSpecified
    }
}

impl fmt::Display for AlgMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlgMode::NotSpecified => f.write_str("Mode not Specified"),
            AlgMode::SymmetricEncryption =>
                f.write_str("Sym. Encryption Mode"),
            AlgMode::PublicKeyEncryption =>
                f.write_str("Pubkey Encryption Mode"),
        }
    }
}

/// State shared by the decoders of one parse.
#[derive(Debug)]
pub struct Context {
    options: Options,
    alg_mode: AlgMode,
    key_creation_time: Option<Timestamp>,
    sig_creation_time: Option<Timestamp>,
    depth: usize,
}

impl Context {
    /// Returns a fresh context.
    pub fn new(options: Options) -> Self {
        Context {
            options,
            alg_mode: AlgMode::NotSpecified,
            key_creation_time: None,
            sig_creation_time: None,
            depth: 0,
        }
    }

    /// Returns the options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the current algorithm mode.
    pub fn alg_mode(&self) -> AlgMode {
        self.alg_mode
    }

    /// Sets the algorithm mode.
    pub fn set_alg_mode(&mut self, mode: AlgMode) {
        self.alg_mode = mode;
    }

    /// Returns the creation time of the last key packet.
    pub fn key_creation_time(&self) -> Option<Timestamp> {
        self.key_creation_time
    }

    /// Sets the creation time of the current key.
    pub fn set_key_creation_time(&mut self, t: Option<Timestamp>) {
        self.key_creation_time = t;
    }

    /// Returns the creation time of the current signature.
    pub fn sig_creation_time(&self) -> Option<Timestamp> {
        self.sig_creation_time
    }

    /// Sets the creation time of the current signature.
    pub fn set_sig_creation_time(&mut self, t: Option<Timestamp>) {
        self.sig_creation_time = t;
    }

    /// Formats a timestamp according to the `utc` option.
    pub fn format_time(&self, t: Timestamp) -> String {
        t.format(self.options.utc)
    }

    /// Returns a dump of `data` in the configured style.
    pub fn dump(&self, data: &[u8]) -> Dump {
        if self.options.grouped_dump {
            Dump::grouped(data)
        } else {
            Dump::new(data)
        }
    }

    /// Returns a dump of `data` if `cond` holds.
    pub(crate) fn dump_if(&self, cond: bool, data: &[u8]) -> Option<Dump> {
        if cond {
            Some(self.dump(data))
        } else {
            None
        }
    }

    /// Returns a dump of `data` in debug mode.
    pub(crate) fn debug_dump(&self, data: &[u8]) -> Option<Dump> {
        self.dump_if(self.options.debug, data)
    }

    /// Returns a dump of a multi-precision integer, if requested.
    pub(crate) fn integer_dump(&self, data: &[u8]) -> Option<Dump> {
        self.dump_if(self.options.integer_dump, data)
    }

    /// Enters a nested packet sequence or embedded signature.
    ///
    /// Every successful call must be paired with a call to
    /// [`Context::leave`].
    pub(crate) fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::UnsupportedStructure(
                format!("nesting deeper than {} levels", MAX_DEPTH)).into());
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

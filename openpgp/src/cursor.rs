//! A bounds-checked reader over a byte slice.

use std::fmt;

use buffered_reader::{BufferedReader, Memory};

use crate::{Error, Result};

/// Reads fields from a packet body or a subpacket region.
///
/// Every read either consumes exactly the requested number of bytes
/// or fails with [`Error::Truncated`] and leaves the position
/// untouched.  The `name` argument of the read functions names the
/// field in the error message.
pub struct Cursor<'a> {
    reader: Memory<'a, ()>,
}

impl<'a> fmt::Debug for Cursor<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position())
            .field("rest", &self.rest())
            .finish()
    }
}

impl<'a> Cursor<'a> {
    /// Returns a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Cursor {
            reader: Memory::new(data),
        }
    }

    /// Returns the number of bytes that have not been read.
    pub fn rest(&self) -> usize {
        self.reader.buffer().len()
    }

    /// Returns the number of bytes that have been read.
    pub fn position(&self) -> usize {
        self.reader.total_out()
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        self.reader.buffer().first().cloned()
    }

    /// Returns the next `amount` bytes without consuming them, or
    /// `None` if fewer are left.
    pub fn peek(&self, amount: usize) -> Option<&[u8]> {
        self.reader.buffer().get(..amount)
    }

    fn need(&self, name: &str, amount: usize) -> Result<()> {
        if self.rest() < amount {
            Err(Error::Truncated(
                format!("{}: need {} bytes, {} left",
                        name, amount, self.rest())).into())
        } else {
            Ok(())
        }
    }

    /// Reads one byte.
    pub fn read_u8(&mut self, name: &str) -> Result<u8> {
        Ok(self.read_array::<1>(name)?[0])
    }

    /// Reads a big-endian `u16`.
    pub fn read_be_u16(&mut self, name: &str) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array(name)?))
    }

    /// Reads a big-endian `u32`.
    pub fn read_be_u32(&mut self, name: &str) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array(name)?))
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self, name: &str)
                                      -> Result<[u8; N]> {
        self.need(name, N)?;
        let mut a = [0u8; N];
        a.copy_from_slice(&self.reader.consume(N)[..N]);
        Ok(a)
    }

    /// Reads exactly `amount` bytes.
    pub fn read_bytes(&mut self, name: &str, amount: usize)
                      -> Result<Vec<u8>> {
        self.need(name, amount)?;
        Ok(self.reader.consume(amount)[..amount].to_vec())
    }

    /// Reads everything that is left.
    ///
    /// This never fails; at the end of the data, the result is empty.
    pub fn read_to_end(&mut self) -> Vec<u8> {
        let rest = self.reader.buffer().to_vec();
        self.reader.consume(rest.len());
        rest
    }
}

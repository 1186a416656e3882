//! Module for forward-only byte sources.

use crate::{limits, DecodeResult, Error};
use std::io::{self, Read};

const CHUNK: usize = 8 * 1024;

/// A forward-only source of module bytes.
///
/// Implementations track the absolute offset of the next byte so that
/// errors can report where decoding failed.
pub trait ByteSource {
    /// Gets the absolute offset of the next byte to be read.
    fn offset(&self) -> u64;

    /// Gets the number of bytes this source may still produce.
    ///
    /// Returns `None` when the source is not bounded.
    fn remaining(&self) -> Option<u64>;

    /// Reads up to `buf.len()` bytes into `buf`.
    ///
    /// Returns the number of bytes read; zero indicates end of input.
    fn read(&mut self, buf: &mut [u8], context: &'static str) -> DecodeResult<usize>;

    /// Reads exactly `buf.len()` bytes into `buf`.
    ///
    /// Fails with [`Error::UnexpectedEof`] if the input ends first.
    fn read_exact(&mut self, buf: &mut [u8], context: &'static str) -> DecodeResult<()> {
        let offset = self.offset();
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..], context)? {
                0 => return Err(Error::UnexpectedEof { context, offset }),
                n => filled += n,
            }
        }

        Ok(())
    }

    /// Reads a single byte.
    fn read_byte(&mut self, context: &'static str) -> DecodeResult<u8> {
        let mut byte = [0; 1];
        self.read_exact(&mut byte, context)?;
        Ok(byte[0])
    }

    /// Reads a single byte, returning `None` on a clean end of input.
    fn try_read_byte(&mut self, context: &'static str) -> DecodeResult<Option<u8>> {
        let mut byte = [0; 1];
        match self.read(&mut byte, context)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    /// Reads every remaining byte of the source into `out`.
    ///
    /// Reads are chunked so that a corrupt declared length cannot trigger
    /// an unbounded up-front allocation.
    fn read_remaining(&mut self, out: &mut Vec<u8>, context: &'static str) -> DecodeResult<()> {
        let mut chunk = [0; CHUNK];
        loop {
            match self.read(&mut chunk, context)? {
                0 => return Ok(()),
                n => out.extend_from_slice(&chunk[..n]),
            }
        }
    }
}

/// A byte source over any [`Read`] implementation.
///
/// The source is unbounded; it ends when the underlying reader does.
pub struct Source<R> {
    reader: R,
    offset: u64,
}

impl<R: Read> Source<R> {
    /// Creates a new source over the given reader.
    pub fn new(reader: R) -> Self {
        Self { reader, offset: 0 }
    }
}

impl<R: Read> ByteSource for Source<R> {
    fn offset(&self) -> u64 {
        self.offset
    }

    fn remaining(&self) -> Option<u64> {
        None
    }

    fn read(&mut self, buf: &mut [u8], context: &'static str) -> DecodeResult<usize> {
        loop {
            match self.reader.read(buf) {
                Ok(n) => {
                    self.offset += n as u64;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(Error::Io {
                        context,
                        offset: self.offset,
                        source,
                    })
                }
            }
        }
    }
}

/// A byte source capped at a declared number of bytes.
///
/// Once the cap is reached the source reports end of input even if the
/// underlying source has more bytes available, so a section or function
/// body decoder can never read past its declared boundary. The unconsumed
/// balance is observable via [`ByteSource::remaining`], which lets the
/// framing layer verify that a decoder consumed its region exactly.
pub struct Bounded<'a, S> {
    source: &'a mut S,
    remaining: u64,
}

impl<'a, S: ByteSource> Bounded<'a, S> {
    /// Creates a new bounded source capped at `len` bytes.
    pub fn new(source: &'a mut S, len: u64) -> Self {
        Self {
            source,
            remaining: len,
        }
    }
}

impl<S: ByteSource> ByteSource for Bounded<'_, S> {
    fn offset(&self) -> u64 {
        self.source.offset()
    }

    fn remaining(&self) -> Option<u64> {
        Some(self.remaining)
    }

    fn read(&mut self, buf: &mut [u8], context: &'static str) -> DecodeResult<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }

        let cap = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        let len = buf.len().min(cap);
        let n = self.source.read(&mut buf[..len], context)?;
        self.remaining -= n as u64;
        Ok(n)
    }
}

/// Reads a length-prefixed name: a byte vector that must be valid UTF-8.
pub(crate) fn read_name<S: ByteSource>(source: &mut S) -> DecodeResult<String> {
    let offset = source.offset();
    let len = crate::leb128::read_u32(source, "name length")?;
    if u64::from(len) > limits::MAX_NAME_BYTES {
        return Err(Error::LimitExceeded {
            kind: "name bytes",
            limit: limits::MAX_NAME_BYTES,
            offset,
        });
    }

    let offset = source.offset();
    let mut bytes = vec![0; len as usize];
    source.read_exact(&mut bytes, "name contents")?;
    String::from_utf8(bytes).map_err(|source| Error::InvalidUtf8 { offset, source })
}

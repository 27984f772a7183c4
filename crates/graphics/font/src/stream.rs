//! Bounds-checked big-endian reader over an in-memory font file.

use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("Unexpected end of buffer")]
    UnexpectedEOF,
}

/// A four byte table identifier, like `cmap` or `glyf`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(u32);

impl Tag {
    #[inline]
    #[must_use]
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(u32::from_be_bytes(*bytes))
    }

    #[inline]
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({self})")
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Stream<'a> {
    bytes: &'a [u8],
    ptr: usize,
}

impl<'a> Stream<'a> {
    #[inline]
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, ptr: 0 }
    }

    /// Create a stream that starts reading at `offset`.
    ///
    /// Fails if `offset` lies beyond the end of `bytes`.
    pub fn new_at(bytes: &'a [u8], offset: usize) -> Result<Self, StreamError> {
        let mut stream = Self::new(bytes);
        stream.seek(offset)?;
        Ok(stream)
    }

    pub fn read<T: Readable>(&mut self) -> Result<T, StreamError> {
        let bytes = self.take_bytes(T::SIZE)?;
        T::read(bytes)
    }

    /// Read a [Tag].
    pub fn read_tag(&mut self) -> Result<Tag, StreamError> {
        let bytes = self.take_bytes(4)?;
        Ok(Tag::new(&[bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Return the next `n` bytes and advance past them.
    pub fn take_bytes(&mut self, n: usize) -> Result<&'a [u8], StreamError> {
        let end = self.ptr.checked_add(n).ok_or(StreamError::UnexpectedEOF)?;
        let bytes = self
            .bytes
            .get(self.ptr..end)
            .ok_or(StreamError::UnexpectedEOF)?;
        self.ptr = end;
        Ok(bytes)
    }

    pub fn skip_bytes(&mut self, num_bytes: usize) -> Result<(), StreamError> {
        self.take_bytes(num_bytes).map(|_| ())
    }

    /// Move to an absolute position. Seeking to exactly the end of the buffer is allowed.
    pub fn seek(&mut self, position: usize) -> Result<(), StreamError> {
        if position > self.bytes.len() {
            return Err(StreamError::UnexpectedEOF);
        }
        self.ptr = position;
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.ptr
    }

    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.ptr
    }
}

/// Trait for things that can be read from a byte stream
pub trait Readable: Sized {
    const SIZE: usize = std::mem::size_of::<Self>();

    /// `bytes` is guaranteed to be exactly [Self::SIZE] bytes long.
    fn read(bytes: &[u8]) -> Result<Self, StreamError>;
}

macro_rules! impl_readable_for_int {
    ($($t: ty),*) => {
        $(
            impl Readable for $t {
                fn read(bytes: &[u8]) -> Result<Self, StreamError> {
                    let bytes = bytes.try_into().map_err(|_| StreamError::UnexpectedEOF)?;
                    Ok(<$t>::from_be_bytes(bytes))
                }
            }
        )*
    };
}

impl_readable_for_int!(u8, i8, u16, i16, u32, i32, i64);

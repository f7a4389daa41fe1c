// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decoding side of the codec: the [`Deserializable`] trait, the in-memory
//! [`Cursor`] it reads from, and the [`Error`] it can fail with.
use std::fmt;

/// Every way decoding a record can fail. There is no local recovery: the
/// caller decides whether a corrupt record is dropped or fetched again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Fewer bytes were available than the layout of the record requires.
    TruncatedInput,

    /// A boxed constructor did not match the one the layout requires, for
    /// example when reading a boolean or a boxed vector.
    UnexpectedConstructor {
        /// The constructor identifier found in the input.
        id: u32,
    },

    /// A tagged union carried a discriminant outside its closed set of
    /// variants. The whole containing record must be treated as corrupt.
    UnknownVariant {
        /// The discriminant found in the input.
        id: i32,
    },

    /// A presence bitmask had bits set beyond those the record declares.
    ///
    /// Records ignore unknown bits by default; this is only produced when
    /// a reader opts into [`crate::FlagReader::reject_unknown`].
    MalformedFlags {
        /// The complete flags word found in the input.
        flags: u32,
    },
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TruncatedInput => write!(f, "truncated input"),
            Self::UnexpectedConstructor { id } => write!(f, "unexpected constructor: {:08x}", id),
            Self::UnknownVariant { id } => write!(f, "unknown variant discriminant: {}", id),
            Self::MalformedFlags { flags } => write!(f, "malformed flags: {:032b}", flags),
        }
    }
}

/// A cursor over an in-memory buffer. Records are always fully materialized
/// before decoding, so the only I/O failure left is running out of bytes.
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn from_slice(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Amount of bytes consumed so far.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Amount of bytes left to consume.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = *self.buf.get(self.pos).ok_or(Error::TruncatedInput)?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.len() > self.remaining() {
            return Err(Error::TruncatedInput);
        }
        buf.copy_from_slice(&self.buf[self.pos..self.pos + buf.len()]);
        self.pos += buf.len();
        Ok(())
    }
}

pub type Buffer<'a, 'b> = &'a mut Cursor<'b>;
pub type Result<T> = std::result::Result<T, Error>;

/// This trait allows binary data produced by [`crate::Serializable`] to be
/// read back into concrete instances.
pub trait Deserializable {
    /// Deserializes an instance of the type from the given buffer,
    /// advancing it past the consumed bytes.
    fn deserialize(buf: Buffer) -> Result<Self>
    where
        Self: std::marker::Sized;

    /// Convenience function to deserialize an instance from a byte slice.
    /// Bytes left after the instance are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use tdent_codec::Deserializable;
    ///
    /// assert_eq!(bool::from_bytes(&[0x37, 0x97, 0x79, 0xbc]).unwrap(), false);
    /// ```
    fn from_bytes(buf: &[u8]) -> Result<Self>
    where
        Self: std::marker::Sized,
    {
        Self::deserialize(&mut Cursor::from_slice(buf))
    }
}

impl Deserializable for bool {
    /// # Examples
    ///
    /// ```
    /// use tdent_codec::Deserializable;
    /// use tdent_codec::deserialize::Error;
    ///
    /// assert_eq!(bool::from_bytes(&[0xb5, 0x75, 0x72, 0x99]).unwrap(), true);
    /// assert_eq!(
    ///     bool::from_bytes(&[1, 0, 0, 0]),
    ///     Err(Error::UnexpectedConstructor { id: 1 })
    /// );
    /// ```
    #[allow(clippy::unreadable_literal)]
    fn deserialize(buf: Buffer) -> Result<Self> {
        match u32::deserialize(buf)? {
            0x997275b5u32 => Ok(true),
            0xbc799737u32 => Ok(false),
            id => Err(Error::UnexpectedConstructor { id }),
        }
    }
}

impl Deserializable for i32 {
    /// # Examples
    ///
    /// ```
    /// use tdent_codec::Deserializable;
    /// use tdent_codec::deserialize::Error;
    ///
    /// assert_eq!(i32::from_bytes(&[0xff, 0xff, 0xff, 0x7f]).unwrap(), i32::MAX);
    /// assert_eq!(i32::from_bytes(&[0x01, 0x02]), Err(Error::TruncatedInput));
    /// ```
    fn deserialize(buf: Buffer) -> Result<Self> {
        let mut buffer = [0u8; 4];
        buf.read_exact(&mut buffer)?;
        Ok(Self::from_le_bytes(buffer))
    }
}

impl Deserializable for u32 {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let mut buffer = [0u8; 4];
        buf.read_exact(&mut buffer)?;
        Ok(Self::from_le_bytes(buffer))
    }
}

impl Deserializable for i64 {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let mut buffer = [0u8; 8];
        buf.read_exact(&mut buffer)?;
        Ok(Self::from_le_bytes(buffer))
    }
}

impl<T: Deserializable> Deserializable for Vec<T> {
    #[allow(clippy::unreadable_literal)]
    fn deserialize(buf: Buffer) -> Result<Self> {
        let id = u32::deserialize(buf)?;
        if id != 0x1cb5c415u32 {
            return Err(Error::UnexpectedConstructor { id });
        }
        let len = u32::deserialize(buf)?;
        (0..len).map(|_| T::deserialize(buf)).collect()
    }
}

impl Deserializable for String {
    fn deserialize(buf: Buffer) -> Result<Self> {
        Ok(String::from_utf8_lossy(&Vec::<u8>::deserialize(buf)?).into())
    }
}

impl Deserializable for Vec<u8> {
    /// # Examples
    ///
    /// ```
    /// use tdent_codec::Deserializable;
    ///
    /// assert_eq!(Vec::<u8>::from_bytes(&[0x03, 1, 2, 3]).unwrap(), vec![1, 2, 3]);
    /// ```
    fn deserialize(buf: Buffer) -> Result<Self> {
        let first_byte = buf.read_byte()?;
        let (len, written) = if first_byte == 254 {
            let mut header = [0u8; 3];
            buf.read_exact(&mut header)?;
            let len =
                (header[0] as usize) | ((header[1] as usize) << 8) | ((header[2] as usize) << 16);
            (len, len)
        } else {
            let len = first_byte as usize;
            (len, len + 1)
        };

        if len > buf.remaining() {
            return Err(Error::TruncatedInput);
        }
        let mut result = vec![0u8; len];
        buf.read_exact(&mut result)?;

        for _ in 0..(4 - (written % 4)) % 4 {
            buf.read_byte()?;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_tracks_position() {
        let mut cursor = Cursor::from_slice(&[1, 2, 3]);
        assert_eq!(cursor.read_byte(), Ok(1));
        assert_eq!(cursor.pos(), 1);
        assert_eq!(cursor.remaining(), 2);

        let mut rest = [0u8; 2];
        assert_eq!(cursor.read_exact(&mut rest), Ok(()));
        assert_eq!(rest, [2, 3]);
        assert_eq!(cursor.read_byte(), Err(Error::TruncatedInput));
    }

    #[test]
    fn failed_read_does_not_advance() {
        let mut cursor = Cursor::from_slice(&[1, 2]);
        let mut out = [0u8; 4];
        assert_eq!(cursor.read_exact(&mut out), Err(Error::TruncatedInput));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn huge_declared_length_is_truncated() {
        // 254-prefixed length of 0xffffff with no data behind it.
        let bytes = [254, 0xff, 0xff, 0xff];
        assert_eq!(Vec::<u8>::from_bytes(&bytes), Err(Error::TruncatedInput));
    }

    #[test]
    fn missing_padding_is_truncated() {
        assert_eq!(Vec::<u8>::from_bytes(&[0x01, 0x7f]), Err(Error::TruncatedInput));
    }

    #[test]
    fn vector_requires_boxed_constructor() {
        let bytes = [0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            Vec::<i32>::from_bytes(&bytes),
            Err(Error::UnexpectedConstructor { id: 0 })
        );
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(Error::TruncatedInput.to_string(), "truncated input");
        assert_eq!(
            Error::UnknownVariant { id: 7 }.to_string(),
            "unknown variant discriminant: 7"
        );
    }
}

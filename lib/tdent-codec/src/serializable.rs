// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// This trait allows for in-memory entities to be written as binary data
/// following the [Binary Data Serialization] conventions.
///
/// Serialization is infallible: every value of an implementing type must be
/// representable.
///
/// [Binary Data Serialization]: https://core.telegram.org/mtproto/serialize
pub trait Serializable {
    /// Appends the serialized form of the instance to the given buffer.
    fn serialize(&self, buf: &mut impl Extend<u8>);

    /// Convenience function to serialize the instance into a new buffer.
    /// Reusing a buffer with [`Serializable::serialize`] avoids the
    /// allocation.
    fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        self.serialize(&mut buffer);
        buffer
    }
}

impl Serializable for bool {
    /// Booleans are written as their boxed constructor:
    ///
    /// * `false` as `boolFalse#bc799737 = Bool;`.
    /// * `true` as `boolTrue#997275b5 = Bool;`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tdent_codec::Serializable;
    ///
    /// assert_eq!(true.to_bytes(), [0xb5, 0x75, 0x72, 0x99]);
    /// assert_eq!(false.to_bytes(), [0x37, 0x97, 0x79, 0xbc]);
    /// ```
    #[allow(clippy::unreadable_literal)]
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        if *self { 0x997275b5u32 } else { 0xbc799737u32 }.serialize(buf)
    }
}

impl Serializable for i32 {
    /// # Examples
    ///
    /// ```
    /// use tdent_codec::Serializable;
    ///
    /// assert_eq!(1i32.to_bytes(), [0x01, 0x00, 0x00, 0x00]);
    /// assert_eq!((-1i32).to_bytes(), [0xff, 0xff, 0xff, 0xff]);
    /// ```
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        buf.extend(self.to_le_bytes())
    }
}

impl Serializable for u32 {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        buf.extend(self.to_le_bytes())
    }
}

impl Serializable for i64 {
    /// # Examples
    ///
    /// ```
    /// use tdent_codec::Serializable;
    ///
    /// assert_eq!(42i64.to_bytes(), [42, 0, 0, 0, 0, 0, 0, 0]);
    /// ```
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        buf.extend(self.to_le_bytes())
    }
}

impl<T: Serializable> Serializable for Vec<T> {
    /// Vectors are boxed, `vector#1cb5c415 {t:Type} # [ t ] = Vector t;`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tdent_codec::Serializable;
    ///
    /// assert_eq!(Vec::<i32>::new().to_bytes(), [0x15, 0xc4, 0xb5, 0x1c, 0x0, 0x0, 0x0, 0x0]);
    /// ```
    #[allow(clippy::unreadable_literal)]
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        0x1cb5c415u32.serialize(buf);
        (self.len() as i32).serialize(buf);
        self.iter().for_each(|x| x.serialize(buf));
    }
}

impl Serializable for String {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.as_bytes().serialize(buf)
    }
}

impl Serializable for Vec<u8> {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        self.as_slice().serialize(buf)
    }
}

/// Longest byte string whose length can be stored.
pub const MAX_BYTES_LEN: usize = 0xff_ffff;

impl Serializable for &[u8] {
    /// Byte strings carry their length and are padded to a multiple of four:
    ///
    /// * Up to 253 bytes: one length byte, the data, then padding.
    /// * Otherwise: `254`, three little-endian length bytes, the data, then padding.
    ///
    /// The length must fit in those three bytes, so byte strings are limited
    /// to [`MAX_BYTES_LEN`] bytes. Longer input is a programming error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tdent_codec::Serializable;
    ///
    /// assert_eq!((&[0x7f_u8][..]).to_bytes(), [0x01, 0x7f, 0x00, 0x00]);
    /// assert_eq!((&[1_u8, 2, 3][..]).to_bytes(), [0x03, 1, 2, 3]);
    /// ```
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        let len = self.len();
        debug_assert!(
            len <= MAX_BYTES_LEN,
            "byte string of {} bytes does not fit its length header",
            len
        );
        let written = if len <= 253 {
            buf.extend([len as u8]);
            len + 1
        } else {
            buf.extend([
                254,
                (len & 0xff) as u8,
                ((len >> 8) & 0xff) as u8,
                ((len >> 16) & 0xff) as u8,
            ]);
            len
        };
        let padding = (4 - (written % 4)) % 4;

        buf.extend(self.iter().copied());
        buf.extend(std::iter::repeat_n(0u8, padding));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_byte_string_keeps_its_length() {
        let bytes = vec![7u8; MAX_BYTES_LEN];
        let encoded = bytes.to_bytes();
        assert_eq!(encoded[..4], [254, 0xff, 0xff, 0xff]);
        assert_eq!(encoded.len() % 4, 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not fit its length header")]
    fn oversized_byte_string_is_rejected() {
        vec![0u8; MAX_BYTES_LEN + 1].to_bytes();
    }
}

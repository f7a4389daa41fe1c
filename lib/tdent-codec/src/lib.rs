// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This library contains the building blocks used to persist Telegram
//! entities as compact binary records. Every entity implements
//! [`Serializable`] and [`Deserializable`], composing them from three
//! pieces:
//!
//! * Primitive field codecs (integers, booleans, byte strings and boxed
//!   vectors), laid out as in the [Binary Data Serialization].
//!
//! * A presence bitmask written before the fields it guards, built with
//!   [`FlagWriter`] and consumed with [`FlagReader`]. Absent optional fields
//!   cost zero bytes.
//!
//! * Tagged unions, encoded as a stable discriminant followed by the payload
//!   of the active [`Variant`] only.
//!
//! Encoding never fails. Decoding reports the errors in [`deserialize::Error`].
//!
//! # Examples
//!
//! ```
//! use tdent_codec::{Deserializable, FlagReader, FlagWriter, Serializable};
//!
//! // An optional count that is only stored when present.
//! struct Counter {
//!     name: String,
//!     count: Option<i32>,
//! }
//!
//! impl Serializable for Counter {
//!     fn serialize(&self, buf: &mut impl Extend<u8>) {
//!         FlagWriter::new().flag(self.count.is_some()).serialize(buf);
//!         self.name.serialize(buf);
//!         if let Some(count) = self.count {
//!             count.serialize(buf);
//!         }
//!     }
//! }
//!
//! impl Deserializable for Counter {
//!     fn deserialize(buf: tdent_codec::deserialize::Buffer) -> tdent_codec::deserialize::Result<Self> {
//!         let mut flags = FlagReader::deserialize(buf)?;
//!         let has_count = flags.flag();
//!         let name = String::deserialize(buf)?;
//!         let count = if has_count { Some(i32::deserialize(buf)?) } else { None };
//!         Ok(Counter { name, count })
//!     }
//! }
//!
//! let bytes = Counter { name: "a".into(), count: None }.to_bytes();
//! assert_eq!(bytes.len(), 8);
//! assert_eq!(Counter::from_bytes(&bytes).unwrap().count, None);
//! ```
//!
//! [Binary Data Serialization]: https://core.telegram.org/mtproto/serialize
#![deny(unsafe_code)]

pub mod deserialize;
pub mod errors;
pub mod flags;
mod serializable;
pub mod variant;

pub use deserialize::{Cursor, Deserializable};
pub use errors::InvalidVariantAccess;
pub use flags::{FlagReader, FlagWriter};
pub use serializable::{MAX_BYTES_LEN, Serializable};
pub use variant::Variant;

// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This library contains the entities a Telegram client persists between
//! restarts, along with the logic needed to build them from the records
//! received over the network.
//!
//! Every entity implements [`Serializable`] and [`Deserializable`] from the
//! [`tdent_codec`] crate, so that any of them can be turned into bytes and
//! back without loss:
//!
//! ```
//! use tdent::{DialogInviteLink, UserId};
//! use tdent::codec::{Deserializable, Serializable};
//!
//! let link = DialogInviteLink::new("https://t.me/+abc", UserId::new(42), 1000)
//!     .with_usage_limit(3);
//!
//! let bytes = link.to_bytes();
//! assert_eq!(DialogInviteLink::from_bytes(&bytes).unwrap(), link);
//! ```
//!
//! Entities never own file contents. They refer to them through [`FileId`]
//! handles, which are allocated by a [`FileManager`] during [`resolve`].
//!
//! The `impl-serde` feature additionally derives `serde` support for every
//! entity.
#![deny(unsafe_code)]

pub mod dialog_photo;
pub mod dimensions;
pub mod files;
pub mod ids;
pub mod invite_link;
pub mod minithumbnail;
pub mod photo;
pub mod photo_size;
pub mod photo_size_source;
pub mod raw;
pub mod resolve;
pub mod storage;
pub mod view;

pub use dialog_photo::{DialogPhoto, ProfilePhoto};
pub use dimensions::Dimensions;
pub use files::{FileId, FileManager, FileType, MemoryFileManager};
pub use ids::{DialogId, DialogKind, UserId};
pub use invite_link::DialogInviteLink;
pub use photo::Photo;
pub use photo_size::{PhotoSize, PhotoSizes};
pub use photo_size_source::PhotoSizeSource;
pub use storage::StorageError;
pub use tdent_codec as codec;
pub use tdent_codec::{Deserializable, Serializable};

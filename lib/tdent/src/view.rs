// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Read-only objects handed to client code.
//!
//! Views are a one-way copy of an entity, with absent values flattened and
//! user identifiers replaced by what the client needs to display them. They
//! can't be turned back into entities.
use crate::dialog_photo::{DialogPhoto, ProfilePhoto};
use crate::files::FileId;
use crate::ids::UserId;
use crate::invite_link::DialogInviteLink;
use crate::minithumbnail::{self, Minithumbnail};
use crate::photo::Photo;
use crate::photo_size::{PhotoSize, PhotoSizes};

/// What the client needs to show a user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayInfo {
    pub user_id: UserId,
    pub name: String,
}

/// The collaborator that knows about users.
pub trait ContactResolver {
    fn display_info_for(&self, user_id: UserId) -> DisplayInfo;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatInviteLinkView {
    pub invite_link: String,
    pub creator: DisplayInfo,
    pub date: i32,
    /// 0 if the link never expires by date.
    pub expire_date: i32,
    /// 0 if the link can be used any amount of times.
    pub member_limit: i32,
    pub member_count: i32,
    pub is_permanent: bool,
    pub is_revoked: bool,
}

impl ChatInviteLinkView {
    /// Returns `None` for invalid links, which must not be shown.
    pub fn new(link: &DialogInviteLink, contacts: &impl ContactResolver) -> Option<Self> {
        if !link.is_valid() {
            return None;
        }
        Some(Self {
            invite_link: link.invite_link().to_owned(),
            creator: contacts.display_info_for(link.administrator_user_id()),
            date: link.date(),
            expire_date: link.expire_date().unwrap_or(0),
            member_limit: link.usage_limit().unwrap_or(0),
            member_count: link.usage_count(),
            is_permanent: link.is_permanent(),
            is_revoked: link.is_revoked(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoSizeView {
    /// The size-class tag, as text.
    pub r#type: String,
    pub file_id: FileId,
    pub width: i32,
    pub height: i32,
}

impl From<&PhotoSize> for PhotoSizeView {
    fn from(size: &PhotoSize) -> Self {
        Self {
            r#type: size.type_char().map(String::from).unwrap_or_default(),
            file_id: size.file_id,
            width: i32::from(size.dimensions.width),
            height: i32::from(size.dimensions.height),
        }
    }
}

/// An inline preview, already restored into a displayable JPEG.
pub type MinithumbnailView = Minithumbnail;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoView {
    pub has_stickers: bool,
    pub minithumbnail: Option<MinithumbnailView>,
    /// Sizes from the smallest to the largest.
    pub sizes: Vec<PhotoSizeView>,
}

impl PhotoView {
    /// Returns `None` for empty photos.
    pub fn new(photo: &Photo) -> Option<Self> {
        if photo.is_empty() {
            return None;
        }
        Some(Self {
            has_stickers: photo.has_stickers,
            minithumbnail: minithumbnail::unpack(&photo.minithumbnail),
            sizes: photo.sizes.sorted().iter().map(PhotoSizeView::from).collect(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChatPhotoView {
    pub small: FileId,
    pub big: FileId,
}

impl ChatPhotoView {
    /// Returns `None` if there is no avatar.
    pub fn new(photo: &DialogPhoto) -> Option<Self> {
        photo.small_file_id.is_valid().then_some(Self {
            small: photo.small_file_id,
            big: photo.big_file_id,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfilePhotoView {
    pub id: i64,
    pub small: FileId,
    pub big: FileId,
}

impl ProfilePhotoView {
    /// Returns `None` if there is no avatar.
    pub fn new(photo: &ProfilePhoto) -> Option<Self> {
        ChatPhotoView::new(&photo.photo).map(|view| Self {
            id: photo.id,
            small: view.small,
            big: view.big,
        })
    }
}

// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion of [`raw`] network records into entities.
//!
//! Every file mentioned by a record is registered with a [`FileManager`],
//! which hands back the [`FileId`] stored in the resulting entity. Nothing
//! else is kept from the record: it is always safe to drop it afterwards.
use getrandom::getrandom;
use log::{debug, warn};

use crate::dialog_photo::{DialogPhoto, ProfilePhoto};
use crate::dimensions::Dimensions;
use crate::files::{DcId, FileDescriptor, FileId, FileManager, FileRegistration, FileType};
use crate::ids::{DialogId, UserId};
use crate::photo::Photo;
use crate::photo_size::{PhotoSize, PhotoSizes};
use crate::photo_size_source::PhotoSizeSource;
use crate::raw;

/// Size-class tags that are never kept as part of a [`Photo`].
const SKIPPED_PHOTO_TYPES: [u8; 3] = [0, b't', b'i'];

/// Encoding of the image files being registered, which determines the
/// extension of their suggested names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Webp,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
            Self::Png => "png",
        }
    }
}

/// The photo or document that the sizes being resolved belong to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemoteFile {
    pub id: i64,
    pub access_hash: i64,
    pub file_reference: Vec<u8>,
    pub dc_id: DcId,
    /// Conversation the file was seen in.
    pub owner: DialogId,
}

/// Outcome of resolving a single photo size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedSize {
    /// A size with a file behind it.
    Size(PhotoSize),
    /// An inline stripped preview, which has no file behind it.
    /// See [`crate::minithumbnail`].
    Minithumbnail(Vec<u8>),
}

fn register_photo(
    file_manager: &mut impl FileManager,
    source: PhotoSizeSource,
    remote: &RemoteFile,
    location: raw::FileLocation,
    expected_size: i32,
    format: ImageFormat,
) -> FileId {
    let suggested_name = format!(
        "{}_{}.{}",
        location.volume_id as u64,
        location.local_id,
        format.extension()
    );
    file_manager.resolve_or_allocate(FileRegistration {
        descriptor: FileDescriptor::Photo {
            source,
            id: remote.id,
            access_hash: remote.access_hash,
            file_reference: remote.file_reference.clone(),
            volume_id: location.volume_id,
            local_id: location.local_id,
            dc_id: remote.dc_id,
        },
        owner: remote.owner,
        expected_size,
        suggested_name,
    })
}

fn photo_size_type(r#type: &str) -> u8 {
    match r#type.as_bytes() {
        [ty] => *ty,
        _ => {
            warn!("wrong photo size type {:?}", r#type);
            0
        }
    }
}

/// Resolves one size of a photo, registering its file.
///
/// If `source` is a thumbnail, its type is filled in with the tag of the
/// size. Sizes whose content is sent inline hand it over to the
/// `file_manager`. Empty sizes resolve to an empty [`PhotoSize`].
pub fn get_photo_size(
    file_manager: &mut impl FileManager,
    mut source: PhotoSizeSource,
    remote: &RemoteFile,
    size: raw::PhotoSize,
    format: ImageFormat,
) -> ResolvedSize {
    let (r#type, location, dimensions, expected_size, content) = match size {
        raw::PhotoSize::Empty { .. } => return ResolvedSize::Size(PhotoSize::default()),
        raw::PhotoSize::Size {
            r#type,
            location,
            w,
            h,
            size,
        } => (r#type, location, Dimensions::new(w, h), size, None),
        raw::PhotoSize::Cached {
            r#type,
            location,
            w,
            h,
            bytes,
        } => {
            let size = bytes.len() as i32;
            (r#type, location, Dimensions::new(w, h), size, Some(bytes))
        }
        raw::PhotoSize::Stripped { bytes, .. } => return ResolvedSize::Minithumbnail(bytes),
    };

    let ty = photo_size_type(&r#type);
    if let Ok(thumbnail) = source.try_thumbnail_mut() {
        thumbnail.thumbnail_type = i32::from(ty);
    }

    let file_id = register_photo(file_manager, source, remote, location, expected_size, format);
    if let Some(content) = content {
        file_manager.set_content(file_id, content);
    }

    ResolvedSize::Size(PhotoSize {
        ty,
        dimensions,
        size: expected_size,
        file_id,
    })
}

/// Resolves a photo and every size it offers.
///
/// Sizes are resolved independently and kept in the order they were
/// received, except for those which can't be shown on their own.
pub fn get_photo(
    file_manager: &mut impl FileManager,
    photo: raw::MaybePhoto,
    owner: DialogId,
) -> Photo {
    let photo = match photo {
        raw::MaybePhoto::Empty { id } => {
            debug!("resolved empty photo {}", id);
            return Photo::default();
        }
        raw::MaybePhoto::Photo(photo) => photo,
    };

    let mut result = Photo::new(photo.id, photo.date);
    result.has_stickers = photo.has_stickers;
    if result.is_empty() {
        warn!("receive photo with reserved id {}", photo.id);
        result.id = -3;
    }

    let remote = RemoteFile {
        id: photo.id,
        access_hash: photo.access_hash,
        file_reference: photo.file_reference,
        dc_id: DcId::new(photo.dc_id),
        owner,
    };
    for size in photo.sizes {
        let source = PhotoSizeSource::thumbnail(FileType::Photo, 0);
        match get_photo_size(file_manager, source, &remote, size, ImageFormat::Jpeg) {
            ResolvedSize::Size(size) => {
                if SKIPPED_PHOTO_TYPES.contains(&size.ty) {
                    warn!("skip unallowed photo size {}", size);
                    continue;
                }
                result.sizes.push(size);
            }
            ResolvedSize::Minithumbnail(bytes) => result.minithumbnail = bytes,
        }
    }

    debug!("resolved photo {} with {} sizes", result.id, result.sizes.len());
    result
}

/// Registers the stickers attached to `photo`.
///
/// Ignored unless the photo declares it has stickers.
pub fn attach_sticker_files(
    file_manager: &mut impl FileManager,
    photo: &mut Photo,
    stickers: Vec<raw::Document>,
    owner: DialogId,
) {
    if !photo.has_stickers {
        if !stickers.is_empty() {
            warn!("ignoring {} stickers of photo {} without stickers", stickers.len(), photo.id);
        }
        return;
    }

    photo.sticker_file_ids = stickers
        .into_iter()
        .map(|document| {
            file_manager.resolve_or_allocate(FileRegistration {
                descriptor: FileDescriptor::Document {
                    file_type: FileType::Sticker,
                    id: document.id,
                    access_hash: document.access_hash,
                    file_reference: document.file_reference,
                    dc_id: DcId::new(document.dc_id),
                },
                owner,
                expected_size: document.size,
                suggested_name: String::new(),
            })
        })
        .collect();
}

/// Registers the thumbnail of a file received in a secret chat.
///
/// Such thumbnails have no remote location, so they are kept under a random
/// local one. Empty `bytes` resolve to an empty [`PhotoSize`].
///
/// # Panics
///
/// Panics if the system has no source of randomness.
pub fn get_secret_thumbnail_photo_size(
    file_manager: &mut impl FileManager,
    bytes: Vec<u8>,
    owner: DialogId,
    width: i32,
    height: i32,
) -> PhotoSize {
    if bytes.is_empty() {
        return PhotoSize::default();
    }

    let mut buffer = [0u8; 12];
    getrandom(&mut buffer).expect("failed to generate a random thumbnail location");
    let mut volume_id = [0u8; 8];
    let mut local_id = [0u8; 4];
    volume_id.copy_from_slice(&buffer[..8]);
    local_id.copy_from_slice(&buffer[8..]);
    let volume_id = i64::from_le_bytes(volume_id);
    let local_id = -(i32::from_le_bytes(local_id) & 0x7fffffff);

    let size = bytes.len() as i32;
    let file_id = file_manager.resolve_or_allocate(FileRegistration {
        descriptor: FileDescriptor::Local {
            file_type: FileType::EncryptedThumbnail,
            volume_id,
            local_id,
        },
        owner,
        expected_size: size,
        suggested_name: format!("{}_{}.jpg", volume_id as u64, local_id as u32),
    });
    file_manager.set_content(file_id, bytes);

    PhotoSize {
        ty: b't',
        dimensions: Dimensions::new(width, height),
        size,
        file_id,
    }
}

/// Resolves a photo received in a secret chat.
///
/// The encrypted file becomes the only full size, tagged `'i'`. The inline
/// thumbnail of the message, if any, comes before it.
pub fn get_encrypted_file_photo(
    file_manager: &mut impl FileManager,
    file: raw::EncryptedFile,
    photo: raw::DecryptedMediaPhoto,
    owner: DialogId,
) -> Photo {
    let file_id = file_manager.resolve_or_allocate(FileRegistration {
        descriptor: FileDescriptor::Encrypted {
            id: file.id,
            access_hash: file.access_hash,
            dc_id: DcId::new(file.dc_id),
            key: photo.key,
            iv: photo.iv,
        },
        owner,
        expected_size: photo.size,
        suggested_name: format!("{}.jpg", file.id as u64),
    });

    let mut result = Photo::new(0, 0);
    if !photo.thumb.is_empty() {
        result.sizes.push(get_secret_thumbnail_photo_size(
            file_manager,
            photo.thumb,
            owner,
            photo.thumb_w,
            photo.thumb_h,
        ));
    }
    result.sizes.push(PhotoSize {
        ty: b'i',
        dimensions: Dimensions::new(photo.w, photo.h),
        size: photo.size,
        file_id,
    });

    debug!("resolved encrypted photo {} with {} sizes", file.id, result.sizes.len());
    result
}

/// Registers an image hosted outside of Telegram.
///
/// Returns `None` if the document has no URL to fetch it from.
pub fn get_web_document_photo_size(
    file_manager: &mut impl FileManager,
    file_type: FileType,
    owner: DialogId,
    web_document: raw::WebDocument,
) -> Option<PhotoSize> {
    if web_document.url.is_empty() {
        warn!("receive web document without url");
        return None;
    }

    let mut dimensions = Dimensions::default();
    let mut file_name = String::new();
    for attribute in web_document.attributes {
        match attribute {
            raw::DocumentAttribute::ImageSize { w, h } => dimensions = Dimensions::new(w, h),
            raw::DocumentAttribute::Filename { file_name: name } => file_name = name,
        }
    }

    let file_id = file_manager.resolve_or_allocate(FileRegistration {
        descriptor: FileDescriptor::Web {
            file_type,
            url: web_document.url,
            access_hash: web_document.access_hash,
        },
        owner,
        expected_size: web_document.size,
        suggested_name: file_name,
    });

    Some(PhotoSize {
        ty: if file_type == FileType::Thumbnail {
            b't'
        } else {
            b'u'
        },
        dimensions,
        size: web_document.size,
        file_id,
    })
}

/// Resolves a web document into a photo with a single size, or an empty
/// photo if the document has no usable image.
pub fn get_web_document_photo(
    file_manager: &mut impl FileManager,
    web_document: raw::WebDocument,
    owner: DialogId,
) -> Photo {
    match get_web_document_photo_size(file_manager, FileType::Photo, owner, web_document) {
        Some(size) if !size.dimensions.is_unknown() => {
            let mut photo = Photo::new(0, 0);
            photo.sizes.push(size);
            photo
        }
        _ => Photo::default(),
    }
}

/// Resolves the current avatar of a group or channel.
pub fn get_dialog_photo(
    file_manager: &mut impl FileManager,
    dialog_id: DialogId,
    dialog_access_hash: i64,
    chat_photo: raw::ChatPhoto,
) -> DialogPhoto {
    match chat_photo {
        raw::ChatPhoto::Empty => DialogPhoto::default(),
        raw::ChatPhoto::Photo {
            photo_small,
            photo_big,
            dc_id,
        } => register_avatar(
            file_manager,
            dialog_id,
            dialog_access_hash,
            photo_small,
            photo_big,
            DcId::new(dc_id),
        ),
    }
}

/// Resolves the current avatar of a user.
pub fn get_profile_photo(
    file_manager: &mut impl FileManager,
    user_id: UserId,
    user_access_hash: i64,
    profile_photo: raw::UserProfilePhoto,
) -> ProfilePhoto {
    match profile_photo {
        raw::UserProfilePhoto::Empty => ProfilePhoto::default(),
        raw::UserProfilePhoto::Photo { .. } if !user_id.is_valid() => {
            warn!("receive profile photo of invalid {}", user_id);
            ProfilePhoto::default()
        }
        raw::UserProfilePhoto::Photo {
            photo_id,
            photo_small,
            photo_big,
            dc_id,
        } => ProfilePhoto {
            id: photo_id,
            photo: register_avatar(
                file_manager,
                DialogId::user(user_id),
                user_access_hash,
                photo_small,
                photo_big,
                DcId::new(dc_id),
            ),
        },
    }
}

fn register_avatar(
    file_manager: &mut impl FileManager,
    dialog_id: DialogId,
    dialog_access_hash: i64,
    photo_small: raw::FileLocation,
    photo_big: raw::FileLocation,
    dc_id: DcId,
) -> DialogPhoto {
    let remote = RemoteFile {
        dc_id,
        ..RemoteFile::default()
    };
    let mut register = |location: raw::FileLocation, is_big: bool| {
        let source = PhotoSizeSource::dialog_photo(dialog_id, dialog_access_hash, is_big);
        register_photo(file_manager, source, &remote, location, 0, ImageFormat::Jpeg)
    };
    DialogPhoto {
        small_file_id: register(photo_small, false),
        big_file_id: register(photo_big, true),
    }
}

/// Picks the avatar handles out of a photo: its smallest size becomes the
/// small avatar, and its largest the big one.
pub fn as_dialog_photo(photo: &Photo) -> DialogPhoto {
    if photo.is_empty() {
        return DialogPhoto::default();
    }
    match (photo.sizes.smallest(), photo.sizes.largest()) {
        (Some(small), Some(big)) => DialogPhoto {
            small_file_id: small.file_id,
            big_file_id: big.file_id,
        },
        _ => {
            warn!("failed to convert photo {} without sizes to chat photo", photo.id);
            DialogPhoto::default()
        }
    }
}

/// Builds the avatar record of a user out of a full photo, using its
/// `'a'` and `'c'` sizes.
pub fn convert_photo_to_profile_photo(photo: &raw::Photo) -> Option<raw::UserProfilePhoto> {
    let mut photo_small = None;
    let mut photo_big = None;
    for size in &photo.sizes {
        if let raw::PhotoSize::Size {
            r#type, location, ..
        } = size
        {
            match r#type.as_str() {
                "a" => photo_small = Some(*location),
                "c" => photo_big = Some(*location),
                _ => {}
            }
        }
    }
    Some(raw::UserProfilePhoto::Photo {
        photo_id: photo.id,
        photo_small: photo_small?,
        photo_big: photo_big?,
        dc_id: photo.dc_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::MemoryFileManager;

    fn location(local_id: i32) -> raw::FileLocation {
        raw::FileLocation {
            volume_id: 100,
            local_id,
        }
    }

    fn sized(r#type: &str, w: i32, h: i32, local_id: i32) -> raw::PhotoSize {
        raw::PhotoSize::Size {
            r#type: r#type.into(),
            location: location(local_id),
            w,
            h,
            size: w * h,
        }
    }

    fn remote() -> RemoteFile {
        RemoteFile {
            id: 1,
            access_hash: 2,
            file_reference: vec![3],
            dc_id: DcId::new(2),
            owner: DialogId::chat(9),
        }
    }

    #[test]
    fn thumbnail_source_learns_its_type() {
        let mut manager = MemoryFileManager::new();
        let source = PhotoSizeSource::thumbnail(FileType::Photo, 0);
        let ResolvedSize::Size(size) = get_photo_size(
            &mut manager,
            source,
            &remote(),
            sized("m", 320, 240, 5),
            ImageFormat::Webp,
        ) else {
            panic!("expected a sized photo");
        };

        assert_eq!(size.ty, b'm');
        assert_eq!(size.dimensions, Dimensions::new(320, 240));
        let registration = manager.registration(size.file_id).unwrap();
        assert_eq!(registration.suggested_name, "100_5.webp");
        match &registration.descriptor {
            FileDescriptor::Photo { source, .. } => {
                assert_eq!(source.try_thumbnail().unwrap().thumbnail_type, 'm' as i32)
            }
            other => panic!("unexpected descriptor {:?}", other),
        }
    }

    #[test]
    fn cached_content_is_handed_over() {
        let mut manager = MemoryFileManager::new();
        let size = raw::PhotoSize::Cached {
            r#type: "s".into(),
            location: location(1),
            w: 90,
            h: 90,
            bytes: vec![1, 2, 3],
        };
        let ResolvedSize::Size(size) = get_photo_size(
            &mut manager,
            PhotoSizeSource::thumbnail(FileType::Photo, 0),
            &remote(),
            size,
            ImageFormat::Jpeg,
        ) else {
            panic!("expected a sized photo");
        };
        assert_eq!(size.size, 3);
        assert_eq!(manager.content(size.file_id), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn stripped_size_is_returned_as_bytes() {
        let mut manager = MemoryFileManager::new();
        let resolved = get_photo_size(
            &mut manager,
            PhotoSizeSource::Empty,
            &remote(),
            raw::PhotoSize::Stripped {
                r#type: "i".into(),
                bytes: vec![1, 8, 8],
            },
            ImageFormat::Jpeg,
        );
        assert_eq!(resolved, ResolvedSize::Minithumbnail(vec![1, 8, 8]));
        assert!(manager.is_empty());
    }

    #[test]
    fn wrong_type_becomes_zero() {
        let mut manager = MemoryFileManager::new();
        let resolved = get_photo_size(
            &mut manager,
            PhotoSizeSource::Empty,
            &remote(),
            sized("xx", 10, 10, 1),
            ImageFormat::Jpeg,
        );
        match resolved {
            ResolvedSize::Size(size) => assert_eq!(size.ty, 0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn photo_skips_unallowed_sizes() {
        let mut manager = MemoryFileManager::new();
        let photo = get_photo(
            &mut manager,
            raw::Photo {
                has_stickers: false,
                id: 77,
                access_hash: 1,
                file_reference: Vec::new(),
                date: 1600000000,
                sizes: vec![
                    sized("s", 90, 90, 1),
                    sized("t", 10, 10, 2),
                    raw::PhotoSize::Empty { r#type: "m".into() },
                    raw::PhotoSize::Stripped {
                        r#type: "i".into(),
                        bytes: vec![1, 2, 2, 0],
                    },
                    sized("x", 800, 600, 3),
                ],
                dc_id: 2,
            }
            .into(),
            DialogId::chat(1),
        );

        assert_eq!(photo.id, 77);
        assert_eq!(
            photo.sizes.iter().map(|s| s.ty).collect::<Vec<_>>(),
            [b's', b'x']
        );
        assert_eq!(photo.minithumbnail, [1, 2, 2, 0]);
        // The skipped 't' size is still registered.
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn empty_photo_keeps_marker() {
        let mut manager = MemoryFileManager::new();
        let photo = get_photo(
            &mut manager,
            raw::MaybePhoto::Empty { id: 5 },
            DialogId::default(),
        );
        assert!(photo.is_empty());
    }

    #[test]
    fn stickers_need_the_flag() {
        let mut manager = MemoryFileManager::new();
        let sticker = raw::Document {
            id: 1,
            access_hash: 2,
            file_reference: Vec::new(),
            size: 10,
            dc_id: 2,
        };
        let mut photo = Photo::new(1, 1);
        attach_sticker_files(&mut manager, &mut photo, vec![sticker.clone()], DialogId::default());
        assert!(photo.sticker_file_ids.is_empty());

        photo.has_stickers = true;
        attach_sticker_files(&mut manager, &mut photo, vec![sticker], DialogId::default());
        assert_eq!(photo.sticker_file_ids.len(), 1);
        assert!(photo.sticker_file_ids[0].is_valid());
    }

    #[test]
    fn secret_thumbnail_keeps_content() {
        let mut manager = MemoryFileManager::new();
        let size =
            get_secret_thumbnail_photo_size(&mut manager, vec![9; 5], DialogId::default(), 90, 60);
        assert_eq!(size.ty, b't');
        assert_eq!(size.size, 5);
        assert_eq!(manager.content(size.file_id), Some(&[9; 5][..]));

        let empty =
            get_secret_thumbnail_photo_size(&mut manager, Vec::new(), DialogId::default(), 90, 60);
        assert_eq!(empty, PhotoSize::default());
    }

    #[test]
    fn encrypted_photo_has_thumbnail_then_full_size() {
        let mut manager = MemoryFileManager::new();
        let owner = DialogId::user(UserId::new(3));
        let file = raw::EncryptedFile {
            id: 10,
            access_hash: 11,
            size: 5000,
            dc_id: 2,
            key_fingerprint: 0,
        };
        let media = raw::DecryptedMediaPhoto {
            thumb: vec![1, 2, 3],
            thumb_w: 90,
            thumb_h: 60,
            w: 1280,
            h: 853,
            size: 5000,
            key: vec![4; 32],
            iv: vec![5; 32],
        };

        let photo = get_encrypted_file_photo(&mut manager, file.clone(), media.clone(), owner);
        assert_eq!(photo.id, 0);
        assert!(!photo.is_empty());
        assert_eq!(
            photo.sizes.iter().map(|s| s.ty).collect::<Vec<_>>(),
            [b't', b'i']
        );
        assert_eq!(manager.content(photo.sizes[0].file_id), Some(&[1, 2, 3][..]));

        let full = &photo.sizes[1];
        assert_eq!(full.dimensions, Dimensions::new(1280, 853));
        assert_eq!(full.size, 5000);
        let registration = manager.registration(full.file_id).unwrap();
        assert_eq!(registration.descriptor.file_type(), FileType::Encrypted);
        assert_eq!(registration.suggested_name, "10.jpg");
        assert_eq!(registration.owner, owner);

        let without_thumb = get_encrypted_file_photo(
            &mut manager,
            file,
            raw::DecryptedMediaPhoto {
                thumb: Vec::new(),
                ..media
            },
            owner,
        );
        assert_eq!(without_thumb.sizes.len(), 1);
        assert_eq!(without_thumb.sizes[0].file_id, full.file_id);
    }

    #[test]
    fn web_document_needs_url_and_dimensions() {
        let mut manager = MemoryFileManager::new();
        let document = raw::WebDocument {
            url: "https://example.com/a.jpg".into(),
            access_hash: 1,
            size: 1000,
            mime_type: "image/jpeg".into(),
            attributes: vec![raw::DocumentAttribute::ImageSize { w: 640, h: 480 }],
        };

        let photo = get_web_document_photo(&mut manager, document.clone(), DialogId::default());
        assert_eq!(photo.id, 0);
        assert_eq!(photo.sizes[0].ty, b'u');

        let no_size = raw::WebDocument {
            attributes: Vec::new(),
            ..document.clone()
        };
        assert!(get_web_document_photo(&mut manager, no_size, DialogId::default()).is_empty());

        let no_url = raw::WebDocument {
            url: String::new(),
            ..document
        };
        assert_eq!(
            get_web_document_photo_size(&mut manager, FileType::Thumbnail, DialogId::default(), no_url),
            None
        );
    }

    #[test]
    fn avatars_register_both_resolutions() {
        let mut manager = MemoryFileManager::new();
        let photo = get_dialog_photo(
            &mut manager,
            DialogId::channel(5),
            8,
            raw::ChatPhoto::Photo {
                photo_small: location(1),
                photo_big: location(2),
                dc_id: 4,
            },
        );
        assert_ne!(photo.small_file_id, photo.big_file_id);
        match &manager.registration(photo.big_file_id).unwrap().descriptor {
            FileDescriptor::Photo { source, .. } => {
                assert!(source.try_dialog_photo().unwrap().is_big)
            }
            other => panic!("unexpected descriptor {:?}", other),
        }

        let profile = get_profile_photo(
            &mut manager,
            UserId::new(0),
            0,
            raw::UserProfilePhoto::Photo {
                photo_id: 1,
                photo_small: location(3),
                photo_big: location(4),
                dc_id: 4,
            },
        );
        assert_eq!(profile, ProfilePhoto::default());
    }

    #[test]
    fn single_size_aliases_both_handles() {
        let mut photo = Photo::new(1, 1);
        photo.sizes.push(PhotoSize {
            ty: b'x',
            dimensions: Dimensions::new(10, 10),
            size: 0,
            file_id: FileId::new(4),
        });
        let dialog_photo = as_dialog_photo(&photo);
        assert_eq!(dialog_photo.small_file_id, FileId::new(4));
        assert_eq!(dialog_photo.big_file_id, FileId::new(4));
        assert_eq!(as_dialog_photo(&Photo::default()), DialogPhoto::default());
    }

    #[test]
    fn profile_photo_needs_both_crops() {
        let mut photo = raw::Photo {
            has_stickers: false,
            id: 3,
            access_hash: 0,
            file_reference: Vec::new(),
            date: 0,
            sizes: vec![sized("a", 160, 160, 1)],
            dc_id: 1,
        };
        assert_eq!(convert_photo_to_profile_photo(&photo), None);

        photo.sizes.push(sized("c", 640, 640, 2));
        assert_eq!(
            convert_photo_to_profile_photo(&photo),
            Some(raw::UserProfilePhoto::Photo {
                photo_id: 3,
                photo_small: location(1),
                photo_big: location(2),
                dc_id: 1,
            })
        );
    }
}

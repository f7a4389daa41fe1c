// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arbtest::arbtest;
use tdent_codec::deserialize::{Buffer, Error, Result};
use tdent_codec::{Deserializable, FlagReader, FlagWriter, Serializable};

#[derive(Clone, Debug, PartialEq)]
struct Record {
    title: String,
    limit: Option<i32>,
    owner: Option<i64>,
    note: Option<Vec<u8>>,
}

impl Serializable for Record {
    fn serialize(&self, buf: &mut impl Extend<u8>) {
        FlagWriter::new()
            .flag(self.limit.is_some())
            .flag(self.owner.is_some())
            .flag(self.note.is_some())
            .serialize(buf);
        self.title.serialize(buf);
        if let Some(limit) = self.limit {
            limit.serialize(buf);
        }
        if let Some(owner) = self.owner {
            owner.serialize(buf);
        }
        if let Some(ref note) = self.note {
            note.serialize(buf);
        }
    }
}

impl Deserializable for Record {
    fn deserialize(buf: Buffer) -> Result<Self> {
        let mut flags = FlagReader::deserialize(buf)?;
        let has_limit = flags.flag();
        let has_owner = flags.flag();
        let has_note = flags.flag();
        let title = String::deserialize(buf)?;
        let limit = if has_limit {
            Some(i32::deserialize(buf)?)
        } else {
            None
        };
        let owner = if has_owner {
            Some(i64::deserialize(buf)?)
        } else {
            None
        };
        let note = if has_note {
            Some(Vec::<u8>::deserialize(buf)?)
        } else {
            None
        };
        Ok(Self {
            title,
            limit,
            owner,
            note,
        })
    }
}

fn record(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Record> {
    Ok(Record {
        title: u.arbitrary()?,
        limit: u.arbitrary()?,
        owner: u.arbitrary()?,
        note: u.arbitrary()?,
    })
}

#[test]
fn record_survives_round_trip() {
    arbtest(|u| {
        let value = record(u)?;
        assert_eq!(Record::from_bytes(&value.to_bytes()), Ok(value));
        Ok(())
    });
}

#[test]
fn byte_strings_survive_round_trip() {
    arbtest(|u| {
        let data: Vec<u8> = u.arbitrary()?;
        let bytes = data.to_bytes();
        assert_eq!(bytes.len() % 4, 0, "byte strings must stay aligned");
        assert_eq!(Vec::<u8>::from_bytes(&bytes), Ok(data));
        Ok(())
    });
}

#[test]
fn long_byte_strings_use_extended_header() {
    let data = vec![7u8; 300];
    let bytes = data.to_bytes();
    assert_eq!(&bytes[..4], [254, 44, 1, 0]);
    assert_eq!(Vec::<u8>::from_bytes(&bytes), Ok(data));
}

#[test]
fn absent_fields_cost_nothing() {
    arbtest(|u| {
        let mut value = record(u)?;
        let full = value.to_bytes();
        let limit = value.limit.take();
        let without_limit = value.to_bytes();

        let expected = if limit.is_some() { 4 } else { 0 };
        assert_eq!(full.len() - without_limit.len(), expected);
        Ok(())
    });
}

#[test]
fn toggling_one_field_keeps_the_others() {
    let base = Record {
        title: "abc".into(),
        limit: None,
        owner: Some(-5),
        note: Some(vec![1, 2]),
    };
    let toggled = Record {
        limit: Some(10),
        ..base.clone()
    };

    let a = base.to_bytes();
    let b = toggled.to_bytes();

    // Only the flags word and the inserted field differ.
    assert_eq!(a[0] | 0b001, b[0]);
    assert_eq!(a[4..8], b[4..8]);
    assert_eq!(b[8..12], 10i32.to_le_bytes());
    assert_eq!(a[8..], b[12..]);
}

#[test]
fn truncation_anywhere_is_reported() {
    let value = Record {
        title: "title".into(),
        limit: Some(3),
        owner: Some(4),
        note: Some(vec![9; 10]),
    };
    let bytes = value.to_bytes();
    for len in 0..bytes.len() {
        assert_eq!(
            Record::from_bytes(&bytes[..len]),
            Err(Error::TruncatedInput),
            "prefix of {} bytes",
            len
        );
    }
}

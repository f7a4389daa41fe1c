// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decode a persisted entity from its base64 text form and print it.
//!
//! Usage: `tdent-dump [--json] <kind> <base64>`.
//!
//! If the text is "-", it is read from standard input instead. The log level
//! is taken from the `TDENT_LOG` environment variable.
use std::env;
use std::error::Error;
use std::fmt::Debug;
use std::io::{self, Read};

use log::{LevelFilter, debug};
use simple_logger::SimpleLogger;
use tdent::photo_size_source::PhotoSizeSource;
use tdent::storage::from_base64;
use tdent::{
    Deserializable, DialogInviteLink, DialogPhoto, Dimensions, Photo, PhotoSize, ProfilePhoto,
};

const STDIN_NAME: &str = "-";

const KINDS: &[&str] = &[
    "invite-link",
    "photo",
    "photo-size",
    "photo-size-source",
    "dimensions",
    "dialog-photo",
    "profile-photo",
];

fn dump<T>(text: &str, json: bool) -> Result<String, Box<dyn Error>>
where
    T: Deserializable + Debug + serde::Serialize,
{
    let value = from_base64::<T>(text)?;
    Ok(if json {
        serde_json::to_string_pretty(&value)?
    } else {
        format!("{:#?}", value)
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    let level = env::var("TDENT_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Warn);
    SimpleLogger::new().with_level(level).init()?;

    let mut json = false;
    let mut args = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            args.push(arg);
        }
    }

    let [kind, text] = args.as_slice() else {
        return Err(format!("usage: tdent-dump [--json] <{}> <base64>", KINDS.join("|")).into());
    };
    let text = if text == STDIN_NAME {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        text
    } else {
        text.clone()
    };
    debug!("decoding {} bytes of base64 text as {}", text.len(), kind);

    let output = match kind.as_str() {
        "invite-link" => dump::<DialogInviteLink>(&text, json)?,
        "photo" => dump::<Photo>(&text, json)?,
        "photo-size" => dump::<PhotoSize>(&text, json)?,
        "photo-size-source" => dump::<PhotoSizeSource>(&text, json)?,
        "dimensions" => dump::<Dimensions>(&text, json)?,
        "dialog-photo" => dump::<DialogPhoto>(&text, json)?,
        "profile-photo" => dump::<ProfilePhoto>(&text, json)?,
        other => {
            return Err(format!(
                "unknown kind {:?}, expected one of: {}",
                other,
                KINDS.join(", ")
            )
            .into());
        }
    };
    println!("{}", output);
    Ok(())
}

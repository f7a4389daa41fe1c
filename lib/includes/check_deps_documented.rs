// Copyright 2024 - developers of the `tdent` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::collections::BTreeSet;
use std::fs;
use toml::Table;

fn manifest_deps() -> BTreeSet<String> {
    let manifest = fs::read_to_string("Cargo.toml").expect("Cargo.toml must exist");
    let table: Table = manifest.parse().expect("Cargo.toml should not be malformed");

    ["dependencies", "build-dependencies", "dev-dependencies"]
        .iter()
        .filter_map(|key| table.get(*key).and_then(|section| section.as_table()))
        .flat_map(|section| section.keys().cloned())
        .collect()
}

fn documented_deps() -> BTreeSet<String> {
    let markdown = fs::read_to_string("DEPS.md").expect("DEPS.md must exist");
    markdown
        .lines()
        .filter_map(|line| line.strip_prefix("## "))
        .map(|dep| dep.trim().to_string())
        .collect()
}

#[test]
fn check_deps_documented() {
    let listed = manifest_deps();
    let documented = documented_deps();

    let undocumented = listed.difference(&documented).collect::<Vec<_>>();
    let stale = documented.difference(&listed).collect::<Vec<_>>();

    assert!(
        undocumented.is_empty(),
        "some Cargo.toml dependencies are not in DEPS.md: {:?}",
        undocumented
    );
    assert!(
        stale.is_empty(),
        "DEPS.md lists dependencies no longer present in Cargo.toml: {:?}",
        stale
    );
}

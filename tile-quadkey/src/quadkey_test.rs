//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::quadkey::*;
use std::collections::BTreeSet;

fn set(keys: &[&str]) -> BTreeSet<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

#[test]
fn test_children_parent() {
    assert_eq!(children(""), ["0", "1", "2", "3"]);
    assert_eq!(children("3113"), ["31130", "31131", "31132", "31133"]);
    for child in children("3113").iter() {
        assert_eq!(parent(child), Ok("3113"));
        assert_eq!(depth(child), 5);
    }
    assert_eq!(parent("3"), Ok(""));
    assert!(matches!(parent(""), Err(QuadKeyError::InvalidArgument(_))));
}

#[test]
fn test_validate() {
    assert!(is_valid(""));
    assert!(is_valid("0123"));
    assert!(!is_valid("0124"));
    assert_eq!(
        validate("31a"),
        Err(QuadKeyError::InvalidQuadKey("31a".to_string()))
    );
}

#[test]
fn test_intersects() {
    assert!(intersects("", "3113"));
    assert!(intersects("311", "311"));
    assert!(intersects("311", "31133322"));
    assert!(!intersects("311", "312"));
    assert!(!intersects("3113", "3112333"));

    let keys = ["", "0", "3", "31", "311", "3112", "2"];
    for a in keys.iter() {
        for b in keys.iter() {
            assert_eq!(intersects(a, b), intersects(b, a), "{} / {}", a, b);
        }
    }
}

#[test]
fn test_covering_percent() {
    let empty: Vec<&str> = Vec::new();
    assert_eq!(covering_percent("31", &empty), 0.0);
    assert_eq!(covering_percent("31", &["31"]), 1.0);
    assert_eq!(covering_percent("", &[""]), 1.0);
    // ancestor in index
    assert_eq!(covering_percent("3113", &["0", "31"]), 1.0);
    // disjoint index keys
    assert_eq!(covering_percent("31", &["30", "2", "3200"]), 0.0);
    // one child and one grandchild
    assert_eq!(covering_percent("31", &["310", "3111"]), 0.25 + 0.0625);
    // nested keys are counted once
    assert_eq!(covering_percent("31", &["310", "3101", "310"]), 0.25);
    // all children
    assert_eq!(covering_percent("31", &["310", "311", "312", "313"]), 1.0);
}

#[test]
fn test_covering_percent_clamped() {
    // Nested entries below a full quad add nothing
    let index = ["310", "311", "312", "313", "3130", "3131"];
    assert_eq!(covering_percent("31", &index), 1.0);
}

#[test]
fn test_simplify() {
    assert_eq!(simplify(vec!["310", "311", "312", "313"]), set(&["31"]));
    assert_eq!(
        simplify(vec!["310", "311", "312", "3130", "3131", "3132", "3133", "2"]),
        set(&["2", "31"])
    );
    assert_eq!(simplify(vec!["310", "311", "312"]), set(&["310", "311", "312"]));
    // duplicates collapse
    assert_eq!(simplify(vec!["2", "2", "2"]), set(&["2"]));
    let empty: Vec<String> = Vec::new();
    assert!(simplify(empty).is_empty());
}

#[test]
fn test_simplify_cascades() {
    // Level 4 merges into "3130", completing the level 3 quad of "313"
    let keys = vec![
        "3130", "3131", "3132", "31330", "31331", "31332", "31333", "310", "311", "312",
    ];
    assert_eq!(simplify(keys), set(&["31"]));
}

#[test]
fn test_simplify_keeps_root_children() {
    assert_eq!(simplify(vec!["0", "1", "2", "3"]), set(&["0", "1", "2", "3"]));
    assert_eq!(
        simplify(vec!["0", "1", "2", "30", "31", "32", "33"]),
        set(&["0", "1", "2", "3"])
    );
}

#[test]
fn test_simplify_idempotent() {
    let inputs = vec![
        vec!["0", "1", "2", "30", "31", "32", "33"],
        vec!["3110", "3111", "3112", "3113", "3120", "3121"],
        vec!["311333223202", "31133322322", "3113332222", "3113332223"],
    ];
    for keys in inputs {
        let once = simplify(keys);
        let twice = simplify(once.iter());
        assert_eq!(once, twice);
    }
}

#[test]
fn test_simplify_partition() {
    for key in ["3", "31", "0213", "31133322"].iter() {
        let quad = children(key);
        assert_eq!(simplify(quad.iter()), set(&[*key]));
    }
}

#[test]
fn test_remove_nested() {
    let keys = vec!["3113", "31", "312", "2", "31130", "0123", "0120"];
    assert_eq!(remove_nested(keys), vec!["2", "31", "0120", "0123"]);
    let keys = vec!["31", "31"];
    assert_eq!(remove_nested(keys), vec!["31"]);
}

//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Quadkey addressing
//!
//! A quadkey is a string over the digits `0`-`3`. Every digit selects one quadrant
//! of the parent cell, so the key length is the zoom level of the cell and the
//! empty key is the root covering the whole world.

use std::collections::BTreeSet;
use thiserror::Error;

/// Quadkey errors
#[derive(Error, PartialEq, Clone, Debug)]
pub enum QuadKeyError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid quadkey '{0}' (must contain only digits 0-3)")]
    InvalidQuadKey(String),
}

/// Check that a quadkey only consists of the digits `0`-`3`
pub fn is_valid(qk: &str) -> bool {
    qk.bytes().all(|b| (b'0'..=b'3').contains(&b))
}

pub fn validate(qk: &str) -> Result<(), QuadKeyError> {
    if is_valid(qk) {
        Ok(())
    } else {
        Err(QuadKeyError::InvalidQuadKey(qk.to_string()))
    }
}

/// Zoom level of a quadkey
pub fn depth(qk: &str) -> usize {
    qk.len()
}

/// The four children of `qk`, in digit order
pub fn children(qk: &str) -> [String; 4] {
    let child = |digit: char| {
        let mut key = String::with_capacity(qk.len() + 1);
        key.push_str(qk);
        key.push(digit);
        key
    };
    [child('0'), child('1'), child('2'), child('3')]
}

/// Parent of `qk`. The root has no parent.
pub fn parent(qk: &str) -> Result<&str, QuadKeyError> {
    match qk.char_indices().last() {
        Some((idx, _)) => Ok(&qk[..idx]),
        None => Err(QuadKeyError::InvalidArgument(
            "the root quadkey has no parent".to_string(),
        )),
    }
}

/// Two cells intersect iff one key is a prefix of the other
pub fn intersects(a: &str, b: &str) -> bool {
    a.starts_with(b) || b.starts_with(a)
}

/// Estimate which fraction of the cell `qk` is covered by the cells in `index`.
///
/// An index cell equal to or containing `qk` covers it completely. Smaller index
/// cells inside `qk` each contribute their share of the area, `4^-d` for a cell `d`
/// levels below `qk`. Cells nested inside an already counted cell are ignored.
pub fn covering_percent<S: AsRef<str>>(qk: &str, index: &[S]) -> f64 {
    let mut descendants: Vec<&str> = Vec::new();
    for key in index {
        let key = key.as_ref();
        if qk.starts_with(key) {
            return 1.0;
        }
        if key.starts_with(qk) {
            descendants.push(key);
        }
    }
    descendants.sort_by_key(|key| key.len());

    let mut counted: Vec<&str> = Vec::with_capacity(descendants.len());
    let mut percent = 0.0;
    for key in descendants {
        if counted.iter().any(|c| key.starts_with(c)) {
            continue;
        }
        percent += 0.25_f64.powi((key.len() - qk.len()) as i32);
        counted.push(key);
    }
    percent.min(1.0)
}

/// Merge every complete set of four siblings into their parent, deepest level first.
///
/// The root is never produced: four level 1 keys stay as they are.
pub fn simplify<I>(keys: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut keys: BTreeSet<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
    let max_depth = keys.iter().map(|k| depth(k)).max().unwrap_or(0);
    for level in (2..=max_depth).rev() {
        let parents: BTreeSet<String> = keys
            .iter()
            .filter(|k| depth(k) == level)
            .filter_map(|k| parent(k).ok())
            .map(|p| p.to_string())
            .collect();
        for parent in parents {
            let siblings = children(&parent);
            if siblings.iter().all(|c| keys.contains(c)) {
                for child in siblings.iter() {
                    keys.remove(child);
                }
                keys.insert(parent);
            }
        }
    }
    keys
}

/// Order keys biggest cell first (ties in lexical order) and drop every key whose
/// cell intersects a key retained before it.
pub fn remove_nested<I>(keys: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut sorted: Vec<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
    sorted.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    let mut retained: Vec<String> = Vec::with_capacity(sorted.len());
    for key in sorted {
        if !retained.iter().any(|r| intersects(r, &key)) {
            retained.push(key);
        }
    }
    retained
}

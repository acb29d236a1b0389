//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::io;
use thiserror::Error;
use tile_quadkey::QuadKeyError;

#[derive(Error, Debug)]
pub enum CoverError {
    /// Malformed input geometry
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    QuadKey(#[from] QuadKeyError),
}

impl From<serde_json::Error> for CoverError {
    fn from(err: serde_json::Error) -> Self {
        CoverError::Parse(err.to_string())
    }
}

pub type CoverResult<T> = Result<T, CoverError>;

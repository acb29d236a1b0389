//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Web Mercator tile math for quadkeys

use crate::quadkey::{validate, QuadKeyError};
use std::f64::consts;

/// Latitude limit of the Web Mercator world square
pub const MAX_LAT: f64 = 85.0511287798066;

/// Deepest quadkey with tile indices fitting into `u32`
pub const MAX_DEPTH: usize = 31;

const EARTH_RADIUS: f64 = 6378137.0;

/// Geographic extent
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Extent {
    /// Closed overlap test, touching extents intersect
    pub fn intersects(&self, other: &Extent) -> bool {
        self.minx <= other.maxx
            && other.minx <= self.maxx
            && self.miny <= other.maxy
            && other.miny <= self.maxy
    }
    pub fn center(&self) -> (f64, f64) {
        (
            (self.minx + self.maxx) / 2.0,
            (self.miny + self.maxy) / 2.0,
        )
    }
    /// Smallest extent containing both
    pub fn union(&self, other: &Extent) -> Extent {
        Extent {
            minx: self.minx.min(other.minx),
            miny: self.miny.min(other.miny),
            maxx: self.maxx.max(other.maxx),
            maxy: self.maxy.max(other.maxy),
        }
    }
}

/// Tile index `(x, y, z)` of a quadkey (origin top left)
pub fn quadkey_to_tile(qk: &str) -> Result<(u32, u32, u8), QuadKeyError> {
    validate(qk)?;
    if qk.len() > MAX_DEPTH {
        return Err(QuadKeyError::InvalidArgument(format!(
            "quadkey '{}' is deeper than {} levels",
            qk, MAX_DEPTH
        )));
    }
    let z = qk.len();
    let (mut x, mut y) = (0u32, 0u32);
    for (i, digit) in qk.bytes().enumerate() {
        let mask = 1u32 << (z - i - 1);
        match digit {
            b'1' => x |= mask,
            b'2' => y |= mask,
            b'3' => {
                x |= mask;
                y |= mask;
            }
            _ => {}
        }
    }
    Ok((x, y, z as u8))
}

/// Quadkey of tile `(x, y, z)` (origin top left)
pub fn tile_to_quadkey(x: u32, y: u32, z: u8) -> String {
    (1..=z)
        .rev()
        .map(|i| {
            let mask = 1u32.checked_shl(u32::from(i) - 1).unwrap_or(0);
            let mut digit = b'0';
            if x & mask != 0 {
                digit += 1;
            }
            if y & mask != 0 {
                digit += 2;
            }
            digit as char
        })
        .collect()
}

/// Cell extent in normalized Web Mercator coordinates.
///
/// The world square spans `0.0..1.0` in both axes, y grows southwards.
pub fn quadkey_merc_extent(qk: &str) -> Result<Extent, QuadKeyError> {
    let (x, y, z) = quadkey_to_tile(qk)?;
    let n = (z as f64).exp2();
    Ok(Extent {
        minx: x as f64 / n,
        miny: y as f64 / n,
        maxx: (x + 1) as f64 / n,
        maxy: (y + 1) as f64 / n,
    })
}

/// Cell extent in WGS84 degrees
pub fn quadkey_extent(qk: &str) -> Result<Extent, QuadKeyError> {
    let merc = quadkey_merc_extent(qk)?;
    let (minx, maxy) = world_to_lonlat(merc.minx, merc.miny);
    let (maxx, miny) = world_to_lonlat(merc.maxx, merc.maxy);
    Ok(Extent {
        minx,
        miny,
        maxx,
        maxy,
    })
}

/// Returns the Spherical Mercator (x, y) in meters
pub fn lonlat_to_merc(lon: f64, lat: f64) -> (f64, f64) {
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * ((consts::PI * 0.25) + (0.5 * lat.to_radians())).tan().ln();
    (x, y)
}

/// Normalized Web Mercator position of a WGS84 coordinate.
///
/// Latitudes beyond [`MAX_LAT`] are clamped to the world square.
pub fn lonlat_to_world(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.max(-MAX_LAT).min(MAX_LAT);
    let x = (lon + 180.0) / 360.0;
    let y = (1.0 - lat.to_radians().tan().asinh() / consts::PI) / 2.0;
    (x, y.max(0.0).min(1.0))
}

/// WGS84 coordinate of a normalized Web Mercator position
pub fn world_to_lonlat(x: f64, y: f64) -> (f64, f64) {
    let lon = x * 360.0 - 180.0;
    let lat = (consts::PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
    (lon, lat)
}

/// Web Mercator pixel width in meters at a zoom level
pub fn pixel_width(zoom: u8, tile_size: u32) -> f64 {
    2.0 * consts::PI * EARTH_RADIUS / tile_size as f64 / (zoom as f64).exp2()
}

/// Deepest zoom level (up to 30) whose pixels are not finer than `pixel_size` meters
pub fn zoom_for_pixel_size(pixel_size: f64, tile_size: u32) -> u8 {
    let mut zoom = 30;
    while zoom > 0 {
        if pixel_width(zoom, tile_size) >= pixel_size {
            break;
        }
        zoom -= 1;
    }
    zoom
}

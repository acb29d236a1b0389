//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Polygon validation, Web Mercator projection and dissolving

use crate::core::error::{CoverError, CoverResult};
use geo::{coord, BooleanOps, Coord, LineString, MapCoords, MultiPolygon, Polygon};
use std::iter;
use tile_quadkey::{lonlat_to_world, Extent};

// Projected coordinates are snapped to a 2^-40 grid, so that
// tile aligned input hits cell edges exactly
const SNAP_GRID: f64 = 1099511627776.0;

/// Check that `ring` is a closed linear ring with at least 4 positions
pub fn validate_ring(ring: &[Coord]) -> CoverResult<()> {
    if ring.len() < 4 {
        return Err(CoverError::Parse(format!(
            "Linear ring with {} positions (at least 4 required)",
            ring.len()
        )));
    }
    if ring.first() != ring.last() {
        return Err(CoverError::Parse("Linear ring is not closed".to_string()));
    }
    Ok(())
}

pub fn validate_polygon(polygon: &Polygon) -> CoverResult<()> {
    for ring in iter::once(polygon.exterior()).chain(polygon.interiors()) {
        validate_ring(&ring.0)?;
    }
    Ok(())
}

pub fn validate(mp: &MultiPolygon) -> CoverResult<()> {
    mp.0.iter().map(validate_polygon).collect()
}

/// Rectangle polygon of an extent, starting at the lower left corner
pub fn polygon_from_extent(e: &Extent) -> Polygon {
    Polygon::new(
        LineString::from(vec![
            (e.minx, e.miny),
            (e.minx, e.maxy),
            (e.maxx, e.maxy),
            (e.maxx, e.miny),
            (e.minx, e.miny),
        ]),
        vec![],
    )
}

fn snap(v: f64) -> f64 {
    (v * SNAP_GRID).round() / SNAP_GRID
}

/// Project WGS84 coordinates into normalized Web Mercator (0..1, y down)
pub fn project(polygon: &Polygon) -> Polygon {
    polygon.map_coords(|c| {
        let (x, y) = lonlat_to_world(c.x, c.y);
        coord! { x: snap(x), y: snap(y) }
    })
}

/// Union of possibly overlapping polygons
pub fn dissolve<'a, I>(polygons: I) -> MultiPolygon
where
    I: IntoIterator<Item = &'a Polygon>,
{
    polygons
        .into_iter()
        .fold(MultiPolygon::new(Vec::new()), |acc, polygon| {
            acc.union(&MultiPolygon::new(vec![polygon.clone()]))
        })
}

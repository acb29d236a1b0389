//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Quadkey cell sets covering polygonal geometries

use crate::core::error::CoverResult;
use crate::core::geojson::{Feature, GeoJson, Geometry};
use crate::core::geom::{dissolve, polygon_from_extent, project};
use geo::{coord, Area, BooleanOps, BoundingRect, Intersects, MultiPolygon, Polygon, Rect};
use serde_json::Map;
use tile_quadkey::{children, quadkey_extent, remove_nested, simplify, MAX_DEPTH};

// Overlaps below this fraction of a cell are treated as touching edges
const AREA_EPSILON: f64 = 1e-9;

/// Dissolved polygons in normalized Web Mercator coordinates
#[derive(Clone, Debug)]
pub struct CoverGeometry {
    area: MultiPolygon,
}

impl CoverGeometry {
    /// Project and dissolve WGS84 polygons
    pub fn new(mp: &MultiPolygon) -> CoverGeometry {
        let projected: Vec<_> = mp.0.iter().map(project).collect();
        CoverGeometry::from_projected(&projected)
    }
    pub fn from_projected<'a, I>(polygons: I) -> CoverGeometry
    where
        I: IntoIterator<Item = &'a Polygon>,
    {
        CoverGeometry {
            area: dissolve(polygons),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.area.0.is_empty()
    }
    /// Area shared with `mask`. An empty mask does not restrict.
    pub fn restrict(&self, mask: &CoverGeometry) -> CoverGeometry {
        if mask.is_empty() {
            return self.clone();
        }
        CoverGeometry {
            area: self.area.intersection(&mask.area),
        }
    }
    pub fn unsigned_area(&self) -> f64 {
        self.area.unsigned_area()
    }
}

impl Default for CoverGeometry {
    fn default() -> Self {
        CoverGeometry {
            area: MultiPolygon::new(Vec::new()),
        }
    }
}

struct IndexBuilder {
    max_depth: usize,
    found: Vec<String>,
}

impl IndexBuilder {
    /// `clipped` is the covered area inside the parent cell
    fn descend(&mut self, qk: String, cell: Rect, clipped: &MultiPolygon) {
        let touches = clipped
            .bounding_rect()
            .map_or(false, |bbox| bbox.intersects(&cell));
        if !touches {
            return;
        }
        let clipped = clipped.intersection(&MultiPolygon::new(vec![cell.to_polygon()]));
        let cell_area = cell.unsigned_area();
        let covered = clipped.unsigned_area();
        if covered <= cell_area * AREA_EPSILON {
            return;
        }
        if qk.len() >= self.max_depth || covered >= cell_area * (1.0 - AREA_EPSILON) {
            self.found.push(qk);
            return;
        }
        for (child, extent) in split(&qk, &cell) {
            self.descend(child, extent, &clipped);
        }
    }
}

/// The four children of `qk` with their world rectangles, `cell` being the rectangle of `qk`
fn split(qk: &str, cell: &Rect) -> Vec<(String, Rect)> {
    let (min, max) = (cell.min(), cell.max());
    let mid = cell.center();
    let [c0, c1, c2, c3] = children(qk);
    vec![
        (c0, Rect::new(min, mid)),
        (c1, Rect::new(coord! { x: mid.x, y: min.y }, coord! { x: max.x, y: mid.y })),
        (c2, Rect::new(coord! { x: min.x, y: mid.y }, coord! { x: mid.x, y: max.y })),
        (c3, Rect::new(mid, max)),
    ]
}

/// Minimal set of cells between depth 1 and `max_depth` sharing area with `geometry`.
///
/// Fully covered cells are emitted as soon as they are found, partially covered
/// cells are subdivided until `max_depth`. Cells only touching the geometry along
/// an edge are skipped. The result is sorted by depth, then lexicographically, and
/// contains no nested cells.
pub fn indexes(geometry: &CoverGeometry, max_depth: usize) -> Vec<String> {
    let mut builder = IndexBuilder {
        max_depth: max_depth.max(1).min(MAX_DEPTH),
        found: Vec::new(),
    };
    let world = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 });
    if !geometry.is_empty() {
        for (child, extent) in split("", &world) {
            builder.descend(child, extent, &geometry.area);
        }
    }
    remove_nested(simplify(builder.found))
}

/// WGS84 rectangle of every quadkey
pub fn to_multi_polygon<S: AsRef<str>>(keys: &[S]) -> CoverResult<MultiPolygon> {
    let mut polygons = Vec::with_capacity(keys.len());
    for qk in keys {
        polygons.push(polygon_from_extent(&quadkey_extent(qk.as_ref())?));
    }
    Ok(MultiPolygon::new(polygons))
}

/// FeatureCollection with one rectangle per quadkey, tagged with a `quadKey` property
pub fn to_geojson<S: AsRef<str>>(keys: &[S]) -> CoverResult<GeoJson> {
    let mut features = Vec::with_capacity(keys.len());
    for qk in keys {
        let qk = qk.as_ref();
        let polygon = polygon_from_extent(&quadkey_extent(qk)?);
        let mut properties = Map::new();
        properties.insert("quadKey".to_string(), json!(qk));
        features.push(Feature::new(Geometry::from(&polygon), properties));
    }
    Ok(GeoJson::FeatureCollection { features })
}

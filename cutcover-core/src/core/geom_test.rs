//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::CoverError;
use crate::core::geom::{
    dissolve, polygon_from_extent, project, validate, validate_polygon, validate_ring,
};
use geo::{coord, Area, BoundingRect, Coord, LineString, MultiPolygon, Polygon, Rect};
use tile_quadkey::{quadkey_extent, quadkey_merc_extent, Extent};

fn extent(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Extent {
    Extent {
        minx,
        miny,
        maxx,
        maxy,
    }
}

fn extent_rect(e: &Extent) -> Rect {
    Rect::new(coord! { x: e.minx, y: e.miny }, coord! { x: e.maxx, y: e.maxy })
}

fn ring(points: &[(f64, f64)]) -> Vec<Coord> {
    points.iter().map(|&(x, y)| coord! { x: x, y: y }).collect()
}

#[test]
fn test_validate_ring() {
    let square = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
    assert!(validate_ring(&square).is_ok());

    let short = ring(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
    match validate_ring(&short) {
        Err(CoverError::Parse(msg)) => {
            assert_eq!(msg, "Linear ring with 3 positions (at least 4 required)")
        }
        other => panic!("unexpected {:?}", other),
    }

    let open = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
    assert!(matches!(validate_ring(&open), Err(CoverError::Parse(_))));
}

#[test]
fn test_validate_polygon() {
    let square = polygon_from_extent(&extent(0.0, 0.0, 10.0, 10.0));
    assert!(validate_polygon(&square).is_ok());

    // closed by geo, but still too short
    let triangle = Polygon::new(LineString::from(vec![(0.0, 0.0), (0.0, 1.0)]), vec![]);
    assert!(validate_polygon(&triangle).is_err());

    let mp = MultiPolygon::new(vec![square.clone(), triangle]);
    assert!(validate(&mp).is_err());
    assert!(validate(&MultiPolygon::new(vec![square])).is_ok());
}

#[test]
fn test_polygon_from_extent() {
    let e = extent(1.0, 2.0, 3.0, 5.0);
    let polygon = polygon_from_extent(&e);
    assert_eq!(polygon.exterior().0[0], coord! { x: 1.0, y: 2.0 });
    assert_eq!(polygon.exterior().0[2], coord! { x: 3.0, y: 5.0 });
    assert_eq!(polygon.unsigned_area(), 6.0);
    assert_eq!(polygon.bounding_rect(), Some(extent_rect(&e)));
}

#[test]
fn test_project() {
    let polygon = Polygon::new(
        LineString::from(vec![(0.0, 0.0), (0.0, 10.0), (90.0, 10.0), (0.0, 0.0)]),
        vec![],
    );
    let projected = project(&polygon);
    assert_eq!(projected.exterior().0[0], coord! { x: 0.5, y: 0.5 });
    assert_eq!(projected.exterior().0[2].x, 0.75);
    // north is up in lon/lat and down in world coordinates
    assert!(projected.exterior().0[1].y < 0.5);

    // tile aligned input lands on exact tile edges
    for qk in &["3", "31133322", "311333220132"] {
        let lonlat = quadkey_extent(qk).unwrap();
        let projected = project(&polygon_from_extent(&lonlat));
        assert_eq!(
            projected.bounding_rect(),
            Some(extent_rect(&quadkey_merc_extent(qk).unwrap()))
        );
    }
}

#[test]
fn test_dissolve() {
    let a = polygon_from_extent(&extent(0.0, 0.0, 2.0, 2.0));
    let b = polygon_from_extent(&extent(1.0, 1.0, 3.0, 3.0));
    let c = polygon_from_extent(&extent(5.0, 5.0, 6.0, 6.0));
    let merged = dissolve(&[a, b, c]);
    assert_eq!(merged.0.len(), 2);
    assert!((merged.unsigned_area() - 8.0).abs() < 1e-9);

    let none: [Polygon; 0] = [];
    assert!(dissolve(&none).0.is_empty());
}

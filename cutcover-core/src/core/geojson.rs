//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! GeoJSON reading and writing for polygonal geometries

use crate::core::error::{CoverError, CoverResult};
use crate::core::geom::validate_ring;
use geo::{coord, LineString, MultiPolygon, Polygon};
use serde_json::{Map, Value};
use std::fs;
use std::iter;

/// GeoJSON position, altitude is accepted and dropped
pub type Position = Vec<f64>;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    /// Points, lines and collections, ignored when merging polygons
    #[serde(other)]
    Unsupported,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Copy, Debug)]
pub enum FeatureType {
    Feature,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

/// GeoJSON object with polygonal content
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(tag = "type")]
pub enum GeoJson {
    FeatureCollection {
        features: Vec<Feature>,
    },
    Feature {
        geometry: Option<Geometry>,
        #[serde(default)]
        properties: Option<Map<String, Value>>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
}

impl Feature {
    pub fn new(geometry: Geometry, properties: Map<String, Value>) -> Feature {
        Feature {
            kind: FeatureType::Feature,
            geometry: Some(geometry),
            properties: Some(properties),
        }
    }
}

impl Geometry {
    /// Append the polygons of this geometry to `polygons`
    fn collect_polygons(&self, polygons: &mut Vec<Polygon>) -> CoverResult<()> {
        match self {
            Geometry::Polygon { coordinates } => polygons.push(polygon_from_coords(coordinates)?),
            Geometry::MultiPolygon { coordinates } => {
                for coords in coordinates {
                    polygons.push(polygon_from_coords(coords)?);
                }
            }
            Geometry::Unsupported => {}
        }
        Ok(())
    }
}

impl From<&MultiPolygon> for Geometry {
    fn from(mp: &MultiPolygon) -> Geometry {
        Geometry::MultiPolygon {
            coordinates: mp.0.iter().map(polygon_coords).collect(),
        }
    }
}

impl From<&Polygon> for Geometry {
    fn from(polygon: &Polygon) -> Geometry {
        Geometry::Polygon {
            coordinates: polygon_coords(polygon),
        }
    }
}

impl GeoJson {
    /// Merge all polygonal geometries into one multi polygon, keeping their order
    pub fn to_multi_polygon(&self) -> CoverResult<MultiPolygon> {
        let mut polygons = Vec::new();
        match self {
            GeoJson::FeatureCollection { features } => {
                for geometry in features.iter().filter_map(|f| f.geometry.as_ref()) {
                    geometry.collect_polygons(&mut polygons)?;
                }
            }
            GeoJson::Feature { geometry, .. } => {
                if let Some(geometry) = geometry {
                    geometry.collect_polygons(&mut polygons)?;
                }
            }
            GeoJson::Polygon { coordinates } => polygons.push(polygon_from_coords(coordinates)?),
            GeoJson::MultiPolygon { coordinates } => {
                for coords in coordinates {
                    polygons.push(polygon_from_coords(coords)?);
                }
            }
        }
        Ok(MultiPolygon::new(polygons))
    }

    pub fn to_json(&self) -> CoverResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn polygon_from_coords(coords: &[Vec<Position>]) -> CoverResult<Polygon> {
    let mut rings = Vec::with_capacity(coords.len());
    for ring in coords {
        let mut points = Vec::with_capacity(ring.len());
        for pos in ring {
            if pos.len() < 2 {
                return Err(CoverError::Parse(format!(
                    "Position with {} values (at least 2 required)",
                    pos.len()
                )));
            }
            points.push(coord! { x: pos[0], y: pos[1] });
        }
        validate_ring(&points)?;
        rings.push(LineString::new(points));
    }
    let mut rings = rings.into_iter();
    let exterior = rings
        .next()
        .ok_or_else(|| CoverError::Parse("Polygon without rings".to_string()))?;
    Ok(Polygon::new(exterior, rings.collect()))
}

fn polygon_coords(polygon: &Polygon) -> Vec<Vec<Position>> {
    iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| ring.coords().map(|c| vec![c.x, c.y]).collect())
        .collect()
}

pub fn parse_geojson(json: &str) -> CoverResult<GeoJson> {
    Ok(serde_json::from_str(json)?)
}

/// Load a GeoJSON file
pub fn read_geojson(path: &str) -> CoverResult<GeoJson> {
    let json = fs::read_to_string(path).map_err(|source| CoverError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_geojson(&json)
}

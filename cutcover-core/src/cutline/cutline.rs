//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{ApplicationCfg, CoveringCfg};
use crate::core::error::{CoverError, CoverResult};
use crate::core::geojson::{parse_geojson, read_geojson, Feature, GeoJson, Geometry};
use crate::core::geom::{project, validate};
use crate::core::stats::Statistics;
use crate::core::Config;
use crate::cutline::source::SourceMetadata;
use crate::cutline::tile_cover::{indexes, CoverGeometry};
use geo::{BoundingRect, Intersects, MultiPolygon, Polygon, Rect};
use serde_json::Map;
use std::collections::BTreeSet;
use tile_quadkey::{children, covering_percent};

/// Cutline polygon with its WGS84 extent and projected shape
#[derive(Clone, Debug)]
pub struct CutlinePolygon {
    pub polygon: Polygon,
    pub extent: Rect,
    projected: Polygon,
}

impl CutlinePolygon {
    fn new(polygon: Polygon) -> CoverResult<CutlinePolygon> {
        let extent = polygon
            .bounding_rect()
            .ok_or_else(|| CoverError::Parse("Polygon without positions".to_string()))?;
        let projected = project(&polygon);
        Ok(CutlinePolygon {
            polygon,
            extent,
            projected,
        })
    }
}

/// Masking boundary restricting the tiles generated for imagery sources
#[derive(Clone, Debug, Default)]
pub struct Cutline {
    pub polygons: Vec<CutlinePolygon>,
    cfg: CoveringCfg,
}

/// Covering tiles with the figures collected while computing them
#[derive(Debug)]
pub struct CoveringReport {
    pub quad_keys: BTreeSet<String>,
    /// Index cells the refinement was measured against
    pub index: Vec<String>,
    /// Number of accepted tiles before merging
    pub tile_count: usize,
    /// `cover` and `depth` of every accepted tile
    pub stats: Statistics,
}

#[derive(PartialEq, Debug)]
enum Disposition {
    Rejected,
    Accepted,
    Refining,
}

struct Refinement<'a> {
    index: &'a [String],
    target_depth: i32,
    threshold: f64,
    accepted: Vec<String>,
    stats: Statistics,
    visited: usize,
}

impl<'a> Refinement<'a> {
    fn disposition(&self, qk: &str, percent: f64) -> Disposition {
        if percent == 0.0 {
            Disposition::Rejected
        } else if percent > self.threshold || qk.len() as i32 >= self.target_depth {
            Disposition::Accepted
        } else {
            Disposition::Refining
        }
    }
    fn refine(&mut self, parent: &str) {
        for child in children(parent).iter() {
            self.visited += 1;
            let percent = covering_percent(child, self.index);
            match self.disposition(child, percent) {
                Disposition::Rejected => {}
                Disposition::Accepted => {
                    self.stats.add("cover", percent);
                    self.stats.add("depth", child.len() as f64);
                    self.accepted.push(child.clone());
                }
                Disposition::Refining => self.refine(child),
            }
        }
    }
}

impl Cutline {
    /// Empty cutline, coverings are computed from source bounds alone
    pub fn new() -> Cutline {
        Cutline::default()
    }
    pub fn with_config(cfg: CoveringCfg) -> Cutline {
        Cutline {
            polygons: Vec::new(),
            cfg,
        }
    }
    pub fn from_multi_polygon(boundary: &MultiPolygon, cfg: CoveringCfg) -> CoverResult<Cutline> {
        validate(boundary)?;
        let polygons = boundary
            .0
            .iter()
            .cloned()
            .map(CutlinePolygon::new)
            .collect::<CoverResult<Vec<_>>>()?;
        Ok(Cutline { polygons, cfg })
    }
    pub fn from_geojson(json: &str) -> CoverResult<Cutline> {
        let boundary = parse_geojson(json)?.to_multi_polygon()?;
        Cutline::from_multi_polygon(&boundary, CoveringCfg::default())
    }
    /// Load the cutline from a GeoJSON file
    pub fn load(path: &str) -> CoverResult<Cutline> {
        let boundary = read_geojson(path)?.to_multi_polygon()?;
        let cutline = Cutline::from_multi_polygon(&boundary, CoveringCfg::default())?;
        info!("Cutline '{}' with {} polygons loaded", path, cutline.polygons.len());
        Ok(cutline)
    }
    pub fn cfg(&self) -> &CoveringCfg {
        &self.cfg
    }
    /// Remaining cutline polygons
    pub fn boundary(&self) -> MultiPolygon {
        MultiPolygon::new(self.polygons.iter().map(|p| p.polygon.clone()).collect())
    }
    pub fn to_geojson(&self) -> GeoJson {
        let geometry = Geometry::from(&self.boundary());
        GeoJson::FeatureCollection {
            features: vec![Feature::new(geometry, Map::new())],
        }
    }

    /// Drop all polygons whose extent does not overlap the extent of a source bounds polygon
    pub fn find_covering(&mut self, source: &SourceMetadata) {
        let bounds: Vec<Rect> = source
            .bounds
            .0
            .iter()
            .filter_map(|p| p.bounding_rect())
            .collect();
        let before = self.polygons.len();
        self.polygons
            .retain(|p| bounds.iter().any(|extent| extent.intersects(&p.extent)));
        debug!(
            "find_covering: {} of {} cutline polygons retained",
            self.polygons.len(),
            before
        );
    }

    /// Tiles covering the source bounds within the cutline at the source resolution
    pub fn optimize_covering(&self, source: &SourceMetadata) -> CoverResult<BTreeSet<String>> {
        Ok(self.optimize_covering_report(source)?.quad_keys)
    }

    pub fn optimize_covering_report(&self, source: &SourceMetadata) -> CoverResult<CoveringReport> {
        if source.resolution < 0 {
            return Err(CoverError::InvalidArgument(format!(
                "negative resolution {}",
                source.resolution
            )));
        }
        validate(&source.bounds)?;
        if source.bounds.0.is_empty() {
            warn!("optimize_covering: empty source bounds");
            return Ok(CoveringReport {
                quad_keys: BTreeSet::new(),
                index: Vec::new(),
                tile_count: 0,
                stats: Statistics::new(),
            });
        }

        let mask = CoverGeometry::from_projected(self.polygons.iter().map(|p| &p.projected));
        let area = CoverGeometry::new(&source.bounds).restrict(&mask);
        let index_depth = (source.resolution - self.cfg.index_margin as i32).max(1) as usize;
        let index = indexes(&area, index_depth);
        debug!(
            "optimize_covering: {} index tiles down to zoom {}",
            index.len(),
            index_depth
        );

        let mut refinement = Refinement {
            index: &index,
            target_depth: source.resolution - self.cfg.refine_margin as i32,
            threshold: self.cfg.threshold,
            accepted: Vec::new(),
            stats: Statistics::new(),
            visited: 0,
        };
        refinement.refine("");
        debug!("optimize_covering: {} tiles visited", refinement.visited);

        let tile_count = refinement.accepted.len();
        let quad_keys = tile_quadkey::simplify(&refinement.accepted);
        info!(
            "Covering for zoom {} (refinement depth {}): {} tiles, {} after simplify, average cover {:.3}",
            source.resolution,
            refinement.target_depth,
            tile_count,
            quad_keys.len(),
            refinement.stats.results("cover").mean
        );
        let stats = refinement.stats;
        Ok(CoveringReport {
            quad_keys,
            index,
            tile_count,
            stats,
        })
    }
}

impl<'a> Config<'a, ApplicationCfg> for Cutline {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        match config.cutline {
            Some(ref cfg) => {
                let boundary = read_geojson(&cfg.path)
                    .and_then(|geojson| geojson.to_multi_polygon())
                    .map_err(|e| e.to_string())?;
                Cutline::from_multi_polygon(&boundary, config.covering.clone())
                    .map_err(|e| format!("Cutline '{}': {}", cfg.path, e))
            }
            None => Ok(Cutline::with_config(config.covering.clone())),
        }
    }
    fn gen_config() -> String {
        let toml = r#"
[covering]
# Tiles covered above this fraction are accepted as a whole
threshold = 0.8
# Index tiles go down to zoom `resolution - index_margin`
index_margin = 2
# Coverings go down to zoom `resolution - refine_margin`
refine_margin = 5

#[cutline]
#path = "cutline.geojson"
"#;
        toml.to_string()
    }
}

//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::SourceCfg;
use crate::core::error::CoverResult;
use crate::core::geojson::read_geojson;
use crate::core::Config;
use geo::MultiPolygon;

/// Footprint and native zoom level of an imagery source
#[derive(Clone, Debug)]
pub struct SourceMetadata {
    /// WGS84 footprint
    pub bounds: MultiPolygon,
    pub resolution: i32,
}

impl SourceMetadata {
    pub fn new(bounds: MultiPolygon, resolution: i32) -> SourceMetadata {
        SourceMetadata { bounds, resolution }
    }
    /// Read the footprint from a GeoJSON file
    pub fn from_geojson(path: &str, resolution: i32) -> CoverResult<SourceMetadata> {
        let bounds = read_geojson(path)?.to_multi_polygon()?;
        Ok(SourceMetadata::new(bounds, resolution))
    }
}

impl<'a> Config<'a, SourceCfg> for SourceMetadata {
    fn from_config(cfg: &SourceCfg) -> Result<Self, String> {
        let resolution = cfg.resolution()?;
        SourceMetadata::from_geojson(&cfg.bounds, resolution)
            .map_err(|e| format!("Source '{}': {}", cfg.name, e))
    }
    fn gen_config() -> String {
        let toml = r#"
[[source]]
name = "aerial"
# Image footprint
bounds = "bounds.geojson"
# Zoom level of the imagery
resolution = 18
# Alternative to resolution: ground pixel size in meters
#pixel_size = 0.3
#tile_size = 256
"#;
        toml.to_string()
    }
}

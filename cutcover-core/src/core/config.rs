//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use tile_quadkey::zoom_for_pixel_size;
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    #[serde(default)]
    pub covering: CoveringCfg,
    pub cutline: Option<CutlineCfg>,
    #[serde(rename = "source", default)]
    pub sources: Vec<SourceCfg>,
    pub output: Option<OutputCfg>,
}

/// Calibration of the covering algorithm
#[derive(Deserialize, PartialEq, Clone, Debug)]
pub struct CoveringCfg {
    /// Cover fraction above which a tile is accepted without further refinement
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Index tiles are computed down to zoom level `resolution - index_margin`
    #[serde(default = "default_index_margin")]
    pub index_margin: u8,
    /// Refinement stops at zoom level `resolution - refine_margin`
    #[serde(default = "default_refine_margin")]
    pub refine_margin: u8,
}

pub fn default_threshold() -> f64 {
    0.8
}

pub fn default_index_margin() -> u8 {
    2
}

pub fn default_refine_margin() -> u8 {
    5
}

impl Default for CoveringCfg {
    fn default() -> Self {
        CoveringCfg {
            threshold: default_threshold(),
            index_margin: default_index_margin(),
            refine_margin: default_refine_margin(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct CutlineCfg {
    /// GeoJSON file with the cutline polygons
    pub path: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SourceCfg {
    pub name: String,
    /// GeoJSON file with the image footprint
    pub bounds: String,
    /// Zoom level of the source imagery
    pub resolution: Option<i32>,
    /// Ground pixel size in meters, used when `resolution` is missing
    pub pixel_size: Option<f64>,
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
}

pub fn default_tile_size() -> u32 {
    256
}

impl SourceCfg {
    pub fn resolution(&self) -> Result<i32, String> {
        match (self.resolution, self.pixel_size) {
            (Some(resolution), _) => Ok(resolution),
            (None, Some(pixel_size)) => Ok(zoom_for_pixel_size(pixel_size, self.tile_size) as i32),
            (None, None) => Err(format!(
                "Source '{}' requires either `resolution` or `pixel_size`",
                self.name
            )),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct OutputCfg {
    /// GeoJSON file receiving the covering tiles
    pub path: String,
}

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
///
/// The configuration is a template with access to environment variables, e.g. `{{env.DATA_DIR}}`.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let env: HashMap<String, String> = env::vars().collect();
    context.insert("env", &env);
    let toml = tera
        .render(path, &context)
        .map_err(|e| format!("Template error: {}", e))?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}

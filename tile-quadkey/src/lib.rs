//! A library for quadtree tile addressing
//!
//! ## Quadkeys
//!
//! ```rust
//! use tile_quadkey::{children, intersects, parent};
//!
//! assert_eq!(children("31"), ["310", "311", "312", "313"]);
//! assert_eq!(parent("313"), Ok("31"));
//! assert!(intersects("31", "3130"));
//! assert!(!intersects("31", "32"));
//! ```
//!
//! ## Coverage
//!
//! ```rust
//! use tile_quadkey::{covering_percent, simplify};
//!
//! let index = vec!["3110", "3111"];
//! assert_eq!(covering_percent("311", &index), 0.5);
//! assert_eq!(covering_percent("31100", &index), 1.0);
//!
//! let merged = simplify(vec!["3110", "3111", "3112", "3113", "302"]);
//! assert_eq!(merged.into_iter().collect::<Vec<_>>(), vec!["302", "311"]);
//! ```
//!
//! ## Tile math
//!
//! ```rust
//! use tile_quadkey::{quadkey_to_tile, tile_to_quadkey, quadkey_extent, Extent};
//!
//! assert_eq!(tile_to_quadkey(3, 5, 3), "213");
//! assert_eq!(quadkey_to_tile("213"), Ok((3, 5, 3)));
//! let extent = quadkey_extent("1").unwrap();
//! assert_eq!((extent.minx, extent.miny, extent.maxx), (0.0, 0.0, 180.0));
//! ```

mod quadkey;
#[cfg(test)]
mod quadkey_test;
mod tile;

pub use quadkey::{
    children, covering_percent, depth, intersects, is_valid, parent, remove_nested, simplify,
    validate, QuadKeyError,
};
pub use tile::{
    lonlat_to_merc, lonlat_to_world, pixel_width, quadkey_extent, quadkey_merc_extent,
    quadkey_to_tile, tile_to_quadkey, world_to_lonlat, zoom_for_pixel_size, Extent, MAX_DEPTH,
    MAX_LAT,
};

//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

mod cutline;
pub mod source;
pub mod tile_cover;

pub use self::cutline::{CoveringReport, Cutline, CutlinePolygon};
pub use self::source::SourceMetadata;

use crate::core::Config;

/// Configuration template
pub fn gen_config() -> String {
    let mut config = Cutline::gen_config();
    config.push_str(&SourceMetadata::gen_config());
    config.push_str(
        r#"
#[output]
#path = "covering.geojson"
"#,
    );
    config
}

//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, ArgMatches, SubCommand};
use cutcover_core::core::{read_config, ApplicationCfg, Config};
use cutcover_core::cutline::tile_cover::to_geojson;
use cutcover_core::cutline::{gen_config, Cutline, SourceMetadata};
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::io::Write;
use std::process;
use time;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log = match (args.value_of("loglevel"), env::var("RUST_LOG")) {
        (None, Ok(rust_log_env)) => rust_log_env,
        (loglevel, _) => loglevel.unwrap_or("info").to_string(),
    };
    builder.parse_filters(&rust_log);

    builder.init();
}

fn exit_with(msg: String) -> ! {
    error!("{}", msg);
    process::exit(1)
}

fn cover(args: &ArgMatches<'_>) {
    let config_path = args.value_of("config").unwrap_or("cutcover.toml");
    let config: ApplicationCfg = read_config(config_path).unwrap_or_else(|e| exit_with(e));
    let cutline = Cutline::from_config(&config).unwrap_or_else(|e| exit_with(e));
    if config.sources.is_empty() {
        warn!("No [[source]] configured in '{}'", config_path);
    }

    let mut all_keys = BTreeSet::new();
    for source_cfg in &config.sources {
        let source = SourceMetadata::from_config(source_cfg).unwrap_or_else(|e| exit_with(e));
        let mut source_cutline = cutline.clone();
        source_cutline.find_covering(&source);
        let report = source_cutline
            .optimize_covering_report(&source)
            .unwrap_or_else(|e| exit_with(format!("Source '{}': {}", source_cfg.name, e)));
        info!(
            "Source '{}' at zoom {}: {} cutline polygons, {} index tiles",
            source_cfg.name,
            source.resolution,
            source_cutline.polygons.len(),
            report.index.len()
        );
        debug!("{:?}", report.stats);
        let keys: Vec<&str> = report.quad_keys.iter().map(|k| k.as_str()).collect();
        println!("{}: {}", source_cfg.name, keys.join(" "));
        all_keys.extend(report.quad_keys);
    }

    let output = args
        .value_of("output")
        .map(|path| path.to_string())
        .or_else(|| config.output.as_ref().map(|o| o.path.clone()));
    if let Some(path) = output {
        let keys: Vec<String> = all_keys.into_iter().collect();
        let json = to_geojson(&keys)
            .and_then(|geojson| geojson.to_json())
            .unwrap_or_else(|e| exit_with(e.to_string()));
        fs::write(&path, json)
            .unwrap_or_else(|e| exit_with(format!("Error writing '{}': {}", path, e)));
        info!("{} tiles written to '{}'", keys.len(), path);
    }
}

fn main() {
    dotenv().ok();
    let mut app = App::new("cutcover")
        .version(crate_version!())
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("quadtree tile coverings of imagery footprints restricted by a cutline")
        .subcommand(SubCommand::with_name("cover")
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file (Default: cutcover.toml)'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              -o, --output=[FILE] 'Write covering tiles as GeoJSON'")
                        .about("Compute tile coverings for all configured sources"))
        .subcommand(SubCommand::with_name("genconfig")
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Generate configuration template"));

    match app.get_matches_from_safe_borrow(env::args()) {
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("cover", Some(sub_m)) => {
                init_logger(sub_m);
                cover(sub_m);
            }
            ("genconfig", Some(sub_m)) => {
                init_logger(sub_m);
                println!("{}", gen_config());
            }
            _ => {
                let _ = app.print_help();
                println!("");
            }
        },
    }
}

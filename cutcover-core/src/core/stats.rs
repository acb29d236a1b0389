//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Statistics collector

use stats::{MinMax, OnlineStats};
use std::collections::BTreeMap;
use std::fmt;

type MeasurementType = f64;

struct StatCollector {
    online: OnlineStats,
    minmax: MinMax<MeasurementType>,
}

pub struct StatResults {
    pub len: usize,
    pub min: MeasurementType,
    pub max: MeasurementType,
    pub mean: f64,
    pub stddev: f64,
}

/// Named series of measurements
#[derive(Default)]
pub struct Statistics(BTreeMap<String, StatCollector>);

impl Statistics {
    pub fn new() -> Statistics {
        Statistics(BTreeMap::new())
    }
    pub fn add(&mut self, key: &str, value: MeasurementType) {
        let collector = self
            .0
            .entry(key.to_string())
            .or_insert_with(|| StatCollector {
                online: OnlineStats::new(),
                minmax: MinMax::new(),
            });
        collector.online.add(value);
        collector.minmax.add(value);
    }
    /// Return the current results. Unknown keys report zero measurements.
    pub fn results(&self, key: &str) -> StatResults {
        match self.0.get(key) {
            Some(collector) => StatResults {
                len: collector.minmax.len(),
                min: *collector.minmax.min().unwrap_or(&0.0),
                max: *collector.minmax.max().unwrap_or(&0.0),
                mean: collector.online.mean(),
                stddev: collector.online.stddev(),
            },
            None => StatResults {
                len: 0,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                stddev: 0.0,
            },
        }
    }
}

impl fmt::Debug for StatResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#measurements: {}, min: {:.3}, max: {:.3}, mean: {:.3} +/- {:.3}",
            self.len, self.min, self.max, self.mean, self.stddev
        )
    }
}

impl fmt::Debug for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in self.0.keys() {
            writeln!(f, "{}: {:?}", key, self.results(key))?;
        }
        Ok(())
    }
}

#[test]
fn usage() {
    let mut stats = Statistics::new();
    stats.add("cover", 1.0);
    assert_eq!(stats.results("cover").mean, 1.0);
    stats.add("cover", 0.5);
    assert_eq!(stats.results("cover").mean, 0.75);
    stats.add("depth", 8.0);
    assert_eq!(stats.results("depth").mean, 8.0);
    stats.add("cover", 0.75);
    assert_eq!(stats.results("cover").mean, 0.75);
    assert_eq!(stats.results("cover").len, 3);
    assert_eq!(stats.results("cover").min, 0.5);
    assert_eq!(stats.results("cover").max, 1.0);

    assert_eq!(stats.results("unknown").len, 0);
    assert_eq!(stats.results("unknown").mean, 0.0);
}

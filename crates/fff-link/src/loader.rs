//! CSV link-table loader.
//!
//! # CSV format
//!
//! One row per physical link, upstream to downstream.  Each row gives either
//! a `width` in metres or an explicit `pseudo_lanes` count; when both are
//! present the lane count wins.
//!
//! ```csv
//! id,length,width,pseudo_lanes
//! main_st,240.0,2.3,
//! bridge,90.0,,2
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{LaneSpec, LinkError, LinkResult, PhysicalLink};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LinkRecord {
    id:           String,
    length:       f64,
    width:        Option<f64>,
    pseudo_lanes: Option<u32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load physical link definitions from a CSV file.
pub fn load_links_csv(path: &Path) -> LinkResult<Vec<PhysicalLink>> {
    let file = std::fs::File::open(path).map_err(LinkError::Io)?;
    load_links_reader(file)
}

/// Like [`load_links_csv`] but accepts any `Read` source.
pub fn load_links_reader<R: Read>(reader: R) -> LinkResult<Vec<PhysicalLink>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<LinkRecord>()
        .map(|result| {
            let row = result.map_err(|e| LinkError::Parse(e.to_string()))?;
            let lanes = match (row.pseudo_lanes, row.width) {
                (Some(psi), _) => LaneSpec::PseudoLanes(psi),
                (None, Some(width)) => LaneSpec::Width(width),
                (None, None) => {
                    return Err(LinkError::Parse(format!(
                        "link {:?}: expected a width or a pseudo_lanes count",
                        row.id
                    )));
                }
            };
            Ok(PhysicalLink::new(row.id, row.length, lanes))
        })
        .collect()
}

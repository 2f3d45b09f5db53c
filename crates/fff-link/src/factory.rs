//! Segment construction: from a width, from a lane count, and splitting long
//! links into chains.
//!
//! # Example
//!
//! ```
//! use fff_link::{Segment, split_into_chain};
//!
//! let seg = Segment::from_width("cph_1", 2.0, 50.0, 0.5, 0.5).unwrap();
//! assert_eq!(seg.number_of_pseudo_lanes(), 4);
//! assert_eq!(seg.total_lane_length(), 200.0);
//!
//! let chain = split_into_chain("cph_2", 2, 100.0, 30.0).unwrap();
//! assert_eq!(chain.len(), 4);
//! assert_eq!(chain[3].id(), "cph_2_part_4");
//! ```

use log::debug;

use fff_core::FffConfig;

use crate::{LinkError, LinkResult, Segment};

/// `Psi = 1 + floor((width - dead_space) / lane_width)`.
///
/// Errors if any input is out of range or the result is below one lane.
pub fn pseudo_lanes_for_width(width: f64, dead_space: f64, lane_width: f64) -> LinkResult<u32> {
    positive("width", width)?;
    positive("lane width", lane_width)?;
    if !dead_space.is_finite() || dead_space < 0.0 {
        return Err(LinkError::InvalidGeometry { what: "dead space", value: dead_space });
    }
    let psi = 1.0 + ((width - dead_space) / lane_width).floor();
    if psi < 1.0 || psi > u32::MAX as f64 {
        return Err(LinkError::ZeroPseudoLanes { id: format!("width {width}") });
    }
    Ok(psi as u32)
}

impl Segment {
    /// Build a segment whose lane count is derived from its physical width.
    pub fn from_width(
        id:         impl Into<String>,
        width:      f64,
        length:     f64,
        dead_space: f64,
        lane_width: f64,
    ) -> LinkResult<Segment> {
        let id = id.into();
        let psi = pseudo_lanes_for_width(width, dead_space, lane_width).map_err(|e| match e {
            LinkError::ZeroPseudoLanes { .. } => LinkError::ZeroPseudoLanes { id: id.clone() },
            other => other,
        })?;
        debug!("link {id}: width {width} m -> {psi} pseudolanes");
        Segment::from_pseudo_lane_count(id, psi, length)
    }

    /// Build a segment with an explicit number of pseudolanes.
    pub fn from_pseudo_lane_count(id: impl Into<String>, psi: u32, length: f64) -> LinkResult<Segment> {
        let id = id.into();
        positive("length", length)?;
        if psi == 0 {
            return Err(LinkError::ZeroPseudoLanes { id });
        }
        Ok(Segment::with_lanes(id, psi, length))
    }
}

/// Split a link of `length` metres into `N = ceil(length / max_segment_length)`
/// segments of `length / N`, named `<id>_part_1 … <id>_part_N` from upstream
/// to downstream.
///
/// Bounding segment length keeps each resident ordering small and lets
/// cyclists queue progressively along a long link instead of only at its end.
pub fn split_into_chain(
    id:                 &str,
    psi:                u32,
    length:             f64,
    max_segment_length: f64,
) -> LinkResult<Vec<Segment>> {
    positive("length", length)?;
    positive("max segment length", max_segment_length)?;
    if psi == 0 {
        return Err(LinkError::ZeroPseudoLanes { id: id.to_owned() });
    }

    let n = (length / max_segment_length).ceil().max(1.0) as usize;
    let part_length = length / n as f64;
    debug!("link {id}: {length} m split into {n} x {part_length} m, {psi} pseudolanes");

    (1..=n)
        .map(|i| Segment::from_pseudo_lane_count(format!("{id}_part_{i}"), psi, part_length))
        .collect()
}

// ── PhysicalLink ──────────────────────────────────────────────────────────────

/// How a physical link's cross-section is described.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LaneSpec {
    /// Physical width [m]; lane count derived from the config.
    Width(f64),
    /// Lane count known up front.
    PseudoLanes(u32),
}

/// A physical link as given by the network, before splitting.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalLink {
    pub id:       String,
    pub length_m: f64,
    pub lanes:    LaneSpec,
}

impl PhysicalLink {
    pub fn new(id: impl Into<String>, length_m: f64, lanes: LaneSpec) -> Self {
        Self { id: id.into(), length_m, lanes }
    }

    /// Resolve the lane count and split into a chain bounded by
    /// `config.max_segment_length_m`.
    pub fn build(&self, config: &FffConfig) -> LinkResult<Vec<Segment>> {
        config.validate()?;
        let psi = match self.lanes {
            LaneSpec::PseudoLanes(psi) => psi,
            LaneSpec::Width(width) => {
                pseudo_lanes_for_width(width, config.dead_space_m, config.efficient_lane_width_m)
                    .map_err(|e| match e {
                        LinkError::ZeroPseudoLanes { .. } => {
                            LinkError::ZeroPseudoLanes { id: self.id.clone() }
                        }
                        other => other,
                    })?
            }
        };
        split_into_chain(&self.id, psi, self.length_m, config.max_segment_length_m)
    }
}

fn positive(what: &'static str, value: f64) -> LinkResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LinkError::InvalidGeometry { what, value })
    }
}

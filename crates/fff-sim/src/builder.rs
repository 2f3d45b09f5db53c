//! Fluent builder for constructing a [`Corridor`].

use log::debug;

use fff_core::{FffConfig, SimClock, SimTime};
use fff_cyclist::{Cyclist, CyclistSampler, Kinematics};
use fff_link::{PhysicalLink, Segment};

use crate::{Corridor, EntryQueue, Location, SimError, SimResult};

/// Fluent builder for [`Corridor`].
///
/// The segment chain is assembled in call order: explicit `.segments(v)`
/// first, then every `.links(v)` split by `config.max_segment_length_m`.
///
/// | Method                   | Default                 |
/// |--------------------------|-------------------------|
/// | `.segments(v)`           | none                    |
/// | `.links(v)`              | none                    |
/// | `.cyclists(c, d)`        | empty population        |
/// | `.sampled_cyclists(s, d)`| empty population        |
///
/// At least one segment is required.
///
/// # Example
///
/// ```rust,ignore
/// let mut corridor = CorridorBuilder::new(FffConfig::default())
///     .links(vec![PhysicalLink::new("main", 240.0, LaneSpec::Width(2.5))])
///     .cyclists(cyclists, departures)
///     .build()?;
/// corridor.run(&mut NoopObserver);
/// ```
pub struct CorridorBuilder {
    config:     FffConfig,
    segments:   Vec<Segment>,
    links:      Vec<PhysicalLink>,
    cyclists:   Vec<Cyclist>,
    sampler:    Option<CyclistSampler>,
    departures: Vec<SimTime>,
}

impl CorridorBuilder {
    pub fn new(config: FffConfig) -> Self {
        Self {
            config,
            segments:   Vec::new(),
            links:      Vec::new(),
            cyclists:   Vec::new(),
            sampler:    None,
            departures: Vec::new(),
        }
    }

    /// Append pre-built segments to the chain.
    pub fn segments(mut self, segments: Vec<Segment>) -> Self {
        self.segments.extend(segments);
        self
    }

    /// Append physical links; each is split into segments at `build()`.
    pub fn links(mut self, links: Vec<PhysicalLink>) -> Self {
        self.links.extend(links);
        self
    }

    /// Supply the population and each cyclist's departure time.
    ///
    /// `cyclists[i]` must carry `CyclistId(i)` and `departures` must have the
    /// same length.
    pub fn cyclists(mut self, cyclists: Vec<Cyclist>, departures: Vec<SimTime>) -> Self {
        self.cyclists = cyclists;
        self.sampler = None;
        self.departures = departures;
        self
    }

    /// Sample one cyclist per departure time at `build()`, seeded with
    /// `config.seed`.  Replaces any population given to `.cyclists()`.
    pub fn sampled_cyclists(mut self, sampler: CyclistSampler, departures: Vec<SimTime>) -> Self {
        self.cyclists = Vec::new();
        self.sampler = Some(sampler);
        self.departures = departures;
        self
    }

    /// Validate inputs, split links, seed the entry queue, and return a
    /// ready-to-run [`Corridor`].
    pub fn build(self) -> SimResult<Corridor> {
        self.config.validate()?;

        let mut segments = self.segments;
        for link in &self.links {
            segments.extend(link.build(&self.config)?);
        }
        if segments.is_empty() {
            return Err(SimError::EmptyCorridor);
        }

        let mut cyclists = match &self.sampler {
            Some(sampler) => sampler.sample_population(self.departures.len(), self.config.seed)?,
            None => self.cyclists,
        };

        let count = cyclists.len();
        if self.departures.len() != count {
            return Err(SimError::CyclistCountMismatch {
                expected: count,
                got:      self.departures.len(),
                what:     "departure times",
            });
        }

        let mut entry_queue = EntryQueue::new();
        for (index, (cyclist, &departure)) in cyclists.iter_mut().zip(&self.departures).enumerate() {
            if cyclist.id().index() != index {
                return Err(SimError::CyclistIdMismatch { index, id: cyclist.id() });
            }
            cyclist.set_earliest_exit(departure);
            entry_queue.push(departure, cyclist.id());
        }

        debug!(
            "corridor built: {} segments, {} cyclists, {:.1} m",
            segments.len(),
            count,
            segments.iter().map(Segment::length).sum::<f64>(),
        );

        Ok(Corridor {
            clock: SimClock::new(self.config.step_secs),
            config: self.config,
            segments,
            cyclists,
            tokens: std::iter::repeat_with(|| None).take(count).collect(),
            locations: vec![Location::Waiting; count],
            entry_queue,
            arrived: 0,
        })
    }
}

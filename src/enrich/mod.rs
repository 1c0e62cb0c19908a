//! Record enrichment chain.
//!
//! After the base database read, a lookup result runs through an ordered
//! list of named steps that add derived fields (human-readable region name,
//! timezone). The chain is injected at construction; callers that want extra
//! derived fields implement [`EnrichStep`] and register their step, which
//! then receives the output of the previous one.

mod region_names;
mod timezones;

pub use region_names::RegionNameStep;
pub use timezones::TimezoneStep;

use crate::models::GeoRecord;

/// A single named enrichment step.
///
/// Steps receive the record produced by the previous step and return it with
/// their own fields added. A step must never remove or reset fields it did
/// not add, and must tolerate inputs it has no mapping for.
pub trait EnrichStep: Send + Sync {
    /// Stable name of the step, used in logs and for inspection.
    fn name(&self) -> &'static str;

    /// Applies the step to a present record.
    fn apply(&self, record: GeoRecord) -> GeoRecord;
}

/// An ordered chain of enrichment steps.
pub struct Enricher {
    steps: Vec<Box<dyn EnrichStep>>,
}

impl Enricher {
    /// Creates an empty chain with no steps.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Creates the default chain: region name, then timezone.
    pub fn with_defaults() -> Self {
        let mut enricher = Self::new();
        enricher.register(Box::new(RegionNameStep));
        enricher.register(Box::new(TimezoneStep));
        enricher
    }

    /// Appends a step to the end of the chain.
    pub fn register(&mut self, step: Box<dyn EnrichStep>) {
        log::debug!("Registered enrichment step: {}", step.name());
        self.steps.push(step);
    }

    /// Names of the registered steps, in application order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Runs the chain over a lookup result.
    ///
    /// Absent records bypass the chain entirely; steps only ever see a
    /// present record.
    pub fn apply(&self, record: Option<GeoRecord>) -> Option<GeoRecord> {
        record.map(|r| self.steps.iter().fold(r, |acc, step| step.apply(acc)))
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

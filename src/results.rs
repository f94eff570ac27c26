//! Samples collected per bucket.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::plan::TrialPlan;
use crate::types::{BucketKey, Timing};

/// Timing samples keyed by bucket.
///
/// Every bucket of the grid exists from construction on, even before any
/// sample lands in it. Samples keep their execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExperimentResults {
    work_units: Vec<u64>,
    repetitions: Vec<u64>,
    #[serde(serialize_with = "serialize_buckets")]
    buckets: BTreeMap<BucketKey, Vec<Timing>>,
}

impl ExperimentResults {
    /// Empty buckets for every grid point of `plan`, sized for its trial count.
    pub fn for_plan(plan: &TrialPlan) -> Self {
        let buckets = plan
            .buckets()
            .map(|key| (key, Vec::with_capacity(plan.trials_per_bucket())))
            .collect();
        Self {
            work_units: plan.work_units().to_vec(),
            repetitions: plan.repetitions().to_vec(),
            buckets,
        }
    }

    /// Append a sample to an existing bucket.
    pub fn record(&mut self, key: BucketKey, sample: Timing) -> Result<()> {
        self.buckets
            .get_mut(&key)
            .ok_or(Error::UnknownBucket(key))?
            .push(sample);
        Ok(())
    }

    /// Samples of one bucket, in execution order.
    pub fn samples(&self, key: &BucketKey) -> Option<&[Timing]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Work-unit axis, in report order.
    pub fn work_units(&self) -> &[u64] {
        &self.work_units
    }

    /// Repetitions axis, in report order.
    pub fn repetitions(&self) -> &[u64] {
        &self.repetitions
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total samples across all buckets.
    pub fn total_samples(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Iterate over buckets in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&BucketKey, &[Timing])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

#[derive(Serialize)]
struct BucketEntry<'a> {
    #[serde(flatten)]
    key: &'a BucketKey,
    samples: &'a [Timing],
}

// JSON object keys must be strings, so buckets serialize as a list.
fn serialize_buckets<S>(
    buckets: &BTreeMap<BucketKey, Vec<Timing>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(
        buckets
            .iter()
            .map(|(key, samples)| BucketEntry { key, samples }),
    )
}

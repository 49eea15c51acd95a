//! Batch execution: validate, multiply on independent lanes, then normalize
//! every result with one shared inversion.

use ecloop_curve::{Affine, Jacobian};
use log::{debug, trace};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::BatchConfig;
use crate::errors::{BatchError, ItemError};
use crate::item::{Submission, WorkItem};
use crate::lane::{lane_for, Lane};

pub struct BatchExecutor {
    config: BatchConfig,
    lane: Box<dyn Lane>,
    pool: Option<ThreadPool>,
}

impl BatchExecutor {
    /// Builds an executor running the lane selected by `config.method`.
    pub fn new(config: BatchConfig) -> Result<Self, BatchError> {
        let lane = lane_for(config.method);
        Self::with_lane(config, lane)
    }

    /// Builds an executor around a caller-supplied lane.
    pub fn with_lane(config: BatchConfig, lane: Box<dyn Lane>) -> Result<Self, BatchError> {
        config.validate()?;

        let pool = match config.threads {
            Some(threads) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("ecloop-lane-{i}"))
                    .build()
                    .map_err(|e| BatchError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        Ok(BatchExecutor { config, lane, pool })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn lane(&self) -> &dyn Lane {
        self.lane.as_ref()
    }

    /// Processes raw submissions. Result `i` belongs to submission `i`; a
    /// malformed submission yields its own error and the rest still run.
    pub fn run(&self, submissions: &[Submission]) -> Vec<Result<Affine, ItemError>> {
        let checked: Vec<Result<WorkItem, ItemError>> = submissions
            .iter()
            .enumerate()
            .map(|(index, submission)| WorkItem::try_from_submission(index, submission))
            .collect();

        let items: Vec<WorkItem> = checked.iter().filter_map(|c| c.as_ref().ok().copied()).collect();
        let rejected = checked.len() - items.len();
        for err in checked.iter().filter_map(|c| c.as_ref().err()) {
            trace!("rejected before dispatch: {err}");
        }
        debug!(
            "batch of {} submissions: {} accepted, {} rejected",
            submissions.len(),
            items.len(),
            rejected
        );

        let mut results = self.run_items(&items).into_iter();
        checked
            .into_iter()
            .map(|c| match c {
                Ok(_) => Ok(results.next().unwrap_or(Affine::INFINITY)),
                Err(err) => Err(err),
            })
            .collect()
    }

    /// Multiplies every validated item and returns the affine results in
    /// input order.
    pub fn run_items(&self, items: &[WorkItem]) -> Vec<Affine> {
        let mut out = vec![Jacobian::INFINITY; items.len()];
        let lane = self.lane.as_ref();

        if self.config.dispatch_parallel(items.len()) {
            debug!(
                "dispatching {} items in parallel on lane {}",
                items.len(),
                lane.name()
            );
            match &self.pool {
                Some(pool) => pool.install(|| dispatch_parallel(lane, &mut out, items)),
                None => dispatch_parallel(lane, &mut out, items),
            }
        } else {
            debug!(
                "dispatching {} items sequentially on lane {}",
                items.len(),
                lane.name()
            );
            dispatch_sequential(lane, &mut out, items);
        }

        // Every lane has finished here; the shared inversion needs all Z values.
        Jacobian::batch_normalize(&out)
    }

    /// Reference path: each item on its own, with its own inversion.
    pub fn run_sequential_items(&self, items: &[WorkItem]) -> Vec<Affine> {
        items
            .iter()
            .map(|item| {
                let mut out = Jacobian::INFINITY;
                self.lane.mul_reduce(&mut out, &item.point, &item.scalar);
                out.to_affine()
            })
            .collect()
    }
}

fn dispatch_sequential(lane: &dyn Lane, out: &mut [Jacobian], items: &[WorkItem]) {
    for (slot, item) in out.iter_mut().zip(items.iter()) {
        lane.mul(slot, &item.point, &item.scalar);
    }
}

fn dispatch_parallel(lane: &dyn Lane, out: &mut [Jacobian], items: &[WorkItem]) {
    out.par_iter_mut()
        .zip(items.par_iter())
        .for_each(|(slot, item)| lane.mul(slot, &item.point, &item.scalar));
}

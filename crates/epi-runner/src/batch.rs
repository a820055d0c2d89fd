//! Parallel execution of a batch of replications.

use log::info;
use rayon::prelude::*;

use epi_behavior::BehaviorModel;
use epi_core::{SimConfig, SimRng};
use epi_sim::{EpidemicParams, ReferenceData, ReplicationOutput, run_replication};

use crate::{RunnerError, RunnerResult, mean_series};

/// Every replication's output plus the averaged calibration series.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchOutput {
    /// In replication-index order.
    pub replications: Vec<ReplicationOutput>,
    /// Mean adjusted cumulative cases per 100k, one value per day.
    pub calibration_series: Vec<f64>,
}

/// Run `params.n_internal_runs` replications on a pool of
/// `config.num_threads` workers.
///
/// Replication `i` uses seed `SimRng::replication_seed(config.seed, i)`.
/// Any failing replication fails the whole batch.
pub fn run_batch<B: BehaviorModel>(
    config: &SimConfig,
    reference: &ReferenceData,
    params: &EpidemicParams,
    behavior: &B,
) -> RunnerResult<BatchOutput> {
    config.validate().map_err(epi_sim::SimError::from)?;
    reference.validate()?;
    params.validate(config, reference)?;

    let n = params.n_internal_runs;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_threads.unwrap_or(0))
        .build()?;
    info!(
        "running {n} replications of {} days on {} threads",
        config.n_days,
        pool.current_num_threads()
    );

    let replications = pool.install(|| {
        (0..n)
            .into_par_iter()
            .map(|index| {
                let seed = SimRng::replication_seed(config.seed, index);
                run_replication(config, reference, params, behavior, seed)
                    .map_err(|source| RunnerError::Replication { index, source })
            })
            .collect::<RunnerResult<Vec<_>>>()
    })?;

    let adjusted: Vec<Vec<f64>> = replications
        .iter()
        .map(|r| r.adjusted_per_100k(params.empirical_day0_per_100k))
        .collect();
    let calibration_series = mean_series(&adjusted)?;

    info!(
        "batch done: final mean {:.1} cases per 100k",
        calibration_series.last().copied().unwrap_or(0.0)
    );
    Ok(BatchOutput {
        replications,
        calibration_series,
    })
}

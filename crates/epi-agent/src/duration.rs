//! Log-normally distributed stage durations.
//!
//! Each stage is described by the arithmetic mean `m` and variance `v` of its
//! duration in days.  The underlying normal has
//!
//! ```text
//! mu    = ln(m^2 / sqrt(v + m^2))
//! sigma = sqrt(ln(v / m^2 + 1))
//! ```
//!
//! and a draw is `exp(Normal(mu, sigma)) * ticks_per_day`.

use rand_distr::{Distribution, LogNormal};

use epi_core::SimRng;

use crate::{AgentError, AgentResult};

/// Mean and variance of a duration in days.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeanVariance {
    pub mean: f64,
    pub variance: f64,
}

impl MeanVariance {
    pub const fn new(mean: f64, variance: f64) -> Self {
        Self { mean, variance }
    }

    fn distribution(self, stage: &'static str) -> AgentResult<LogNormal<f64>> {
        let invalid = AgentError::InvalidDuration {
            stage,
            mean: self.mean,
            variance: self.variance,
        };
        let (m, v) = (self.mean, self.variance);
        if !(m.is_finite() && v.is_finite() && m > 0.0 && v > 0.0) {
            return Err(invalid);
        }
        let mu = (m * m / (v + m * m).sqrt()).ln();
        let sigma = (v / (m * m) + 1.0).ln().sqrt();
        LogNormal::new(mu, sigma).map_err(|_| invalid)
    }
}

/// Stage duration parameters, in days.
///
/// `severe` and `critical` are carried for completeness; no transition
/// leads into those stages.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationParams {
    /// Exposure to infectiousness (incubation).
    pub exposed: MeanVariance,
    /// Infectious before symptom onset.
    pub presymptomatic: MeanVariance,
    /// Onset to recovery without symptoms.
    pub asymptomatic: MeanVariance,
    /// Onset to recovery with mild symptoms.
    pub mild: MeanVariance,
    pub severe: MeanVariance,
    pub critical: MeanVariance,
}

impl Default for DurationParams {
    fn default() -> Self {
        Self {
            exposed: MeanVariance::new(4.6, 4.8),
            presymptomatic: MeanVariance::new(1.0, 1.0),
            asymptomatic: MeanVariance::new(8.0, 2.0),
            mild: MeanVariance::new(8.0, 2.0),
            severe: MeanVariance::new(14.0, 2.4),
            critical: MeanVariance::new(14.0, 2.4),
        }
    }
}

/// One agent's frozen stage durations, in ticks.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StageDurations {
    pub exposed: f64,
    pub presymptomatic: f64,
    pub asymptomatic: f64,
    pub mild: f64,
}

/// Prepared distributions for drawing [`StageDurations`].
#[derive(Clone, Debug)]
pub struct DurationSampler {
    exposed: LogNormal<f64>,
    presymptomatic: LogNormal<f64>,
    asymptomatic: LogNormal<f64>,
    mild: LogNormal<f64>,
    ticks_per_day: f64,
}

impl DurationSampler {
    pub fn new(params: &DurationParams, ticks_per_day: u64) -> AgentResult<Self> {
        // Unused stages are validated too.
        params.severe.distribution("severe")?;
        params.critical.distribution("critical")?;
        Ok(Self {
            exposed: params.exposed.distribution("exposed")?,
            presymptomatic: params.presymptomatic.distribution("presymptomatic")?,
            asymptomatic: params.asymptomatic.distribution("asymptomatic")?,
            mild: params.mild.distribution("mild")?,
            ticks_per_day: ticks_per_day as f64,
        })
    }

    pub fn sample(&self, rng: &mut SimRng) -> StageDurations {
        let rng = rng.inner();
        StageDurations {
            exposed: self.exposed.sample(rng) * self.ticks_per_day,
            presymptomatic: self.presymptomatic.sample(rng) * self.ticks_per_day,
            asymptomatic: self.asymptomatic.sample(rng) * self.ticks_per_day,
            mild: self.mild.sample(rng) * self.ticks_per_day,
        }
    }
}

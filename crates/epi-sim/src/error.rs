use thiserror::Error;

use epi_agent::AgentError;
use epi_behavior::BehaviorError;
use epi_core::{CoreError, LocationKind};
use epi_population::PopulationError;
use epi_schedule::ScheduleError;
use epi_world::WorldError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid run parameters: {0}")]
    InvalidParams(String),

    #[error("{initial} initial infections exceed the population of {population}")]
    TooManyInitialInfections { initial: usize, population: usize },

    #[error("no {0} facility exists to assign")]
    MissingFacility(LocationKind),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Population(#[from] PopulationError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;

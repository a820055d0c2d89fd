//! The grid and the agents of one replication.

use epi_agent::AgentStore;
use epi_core::{AgentId, CellId};
use epi_world::Grid;

/// Owns every cell and agent of one replication.  Dropped at its end.
pub struct World {
    pub grid: Grid,
    pub agents: AgentStore,
}

impl World {
    pub fn new(grid: Grid, agents: AgentStore) -> Self {
        Self { grid, agents }
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.agents.len()
    }

    /// Move `agent` into `cell`, keeping both occupant lists in step.
    ///
    /// Returns `false` if the agent already stands there.
    pub fn relocate(&mut self, agent: AgentId, cell: CellId) -> bool {
        let a = self.agents.get_mut(agent);
        let from = a.position;
        if from == cell {
            return false;
        }
        a.position = cell;
        if from.is_valid() {
            self.grid.remove_occupant(from, agent);
        }
        self.grid.add_occupant(cell, agent);
        true
    }
}

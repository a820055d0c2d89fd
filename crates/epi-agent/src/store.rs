//! Arena of agents and households for one replication.
//!
//! `AgentId(i)` is the index of the agent in `agents`; `HouseholdId(h)` the
//! index of its member list in `households`.  Agents refer to their
//! household by id, so the household graph has no reference cycles.

use epi_core::{AgentId, HouseholdId, SimRng, Tick};

use crate::{Agent, AgentError, AgentResult};

pub struct AgentStore {
    agents: Vec<Agent>,
    households: Vec<Vec<AgentId>>,
    /// Processing order for the per-tick loop; reshuffled every day.
    order: Vec<AgentId>,
}

impl AgentStore {
    /// Take ownership of synthesized households, assigning agent and
    /// household ids in iteration order.
    pub fn from_households(households: Vec<Vec<Agent>>) -> AgentResult<Self> {
        let total = households.iter().map(Vec::len).sum();
        let mut agents = Vec::with_capacity(total);
        let mut members = Vec::with_capacity(households.len());

        for (h, household) in households.into_iter().enumerate() {
            if household.is_empty() {
                return Err(AgentError::EmptyHousehold(h));
            }
            let hid = HouseholdId(h as u32);
            let mut ids = Vec::with_capacity(household.len());
            for mut agent in household {
                let id = AgentId(agents.len() as u32);
                agent.id = id;
                agent.household = hid;
                ids.push(id);
                agents.push(agent);
            }
            members.push(ids);
        }

        let order = (0..agents.len() as u32).map(AgentId).collect();
        Ok(Self {
            agents,
            households: members,
            order,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len() as u32).map(AgentId)
    }

    // ── Households ────────────────────────────────────────────────────────

    #[inline]
    pub fn household_count(&self) -> usize {
        self.households.len()
    }

    /// Members of household `id`, including any agent asking for them.
    #[inline]
    pub fn household(&self, id: HouseholdId) -> &[AgentId] {
        &self.households[id.index()]
    }

    pub fn households(&self) -> impl Iterator<Item = (HouseholdId, &[AgentId])> {
        self.households
            .iter()
            .enumerate()
            .map(|(h, m)| (HouseholdId(h as u32), m.as_slice()))
    }

    /// Put every member of `agent`'s household into quarantine at `tick`.
    pub fn isolate_household(&mut self, agent: AgentId, tick: Tick) {
        let hid = self.agents[agent.index()].household;
        for &member in &self.households[hid.index()] {
            self.agents[member.index()].quarantine(tick);
        }
    }

    // ── Processing order ──────────────────────────────────────────────────

    #[inline]
    pub fn order(&self) -> &[AgentId] {
        &self.order
    }

    /// Agent processed at position `i` of the current order.
    #[inline]
    pub fn order_at(&self, i: usize) -> AgentId {
        self.order[i]
    }

    pub fn shuffle_order(&mut self, rng: &mut SimRng) {
        rng.shuffle(&mut self.order);
    }

    /// Number of agents exposed or infectious.
    pub fn active_infections(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| a.infection.is_active())
            .count()
    }
}

//! Scheduler: orders agent activation within a tick.
//!
//! Both policies shuffle the live agents once per tick with the
//! simulation's random source.
//!
//! - [`ActivationPolicy::SequentialRandom`] decides and applies each agent
//!   before the next one runs. An agent activated later in the tick sees
//!   every move, pickup, and removal made earlier in the same tick.
//! - [`ActivationPolicy::BatchApply`] first collects a decision from every
//!   agent while the habitat is untouched, then applies all decisions in
//!   the same shuffled order. No agent sees another agent's move from the
//!   same tick while deciding; competing pickups go to whichever ant is
//!   applied first.
//!
//! A recoverable error (a boxed-in ant) is absorbed and recorded. Any other
//! error aborts the pass immediately, leaving the remaining agents
//! unactivated.

use antfarm_agents::behavior::{self, Applied, PendingAction};
use antfarm_agents::{AgentError, Habitat};
use antfarm_types::{ActivationPolicy, AgentId};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::clock::ClockError;

/// Errors that abort a tick.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// An agent's activation failed in a way that leaves state suspect.
    #[error("agent error for {agent_id}: {source}")]
    Agent {
        /// The agent whose activation failed.
        agent_id: AgentId,
        /// The underlying agent error.
        source: AgentError,
    },

    /// Spawning new food at the end of the tick failed.
    #[error("spawn error: {source}")]
    Spawn {
        /// The underlying agent error.
        source: AgentError,
    },
}

/// What one scheduler pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Agents activated, including stalled ones.
    pub activated: usize,
    /// Agents that removed themselves, in activation order.
    pub despawned: Vec<AgentId>,
    /// Ants that could not move, in activation order.
    pub stalled: Vec<AgentId>,
}

impl PassReport {
    fn record(&mut self, id: AgentId, outcome: Result<Applied, AgentError>) -> Result<(), TickError> {
        match outcome {
            Ok(Applied::Updated) => Ok(()),
            Ok(Applied::Despawned) => {
                self.despawned.push(id);
                Ok(())
            }
            Err(err) if err.is_recoverable() => {
                debug!(agent = %id, error = %err, "activation skipped");
                self.stalled.push(id);
                Ok(())
            }
            Err(source) => {
                warn!(agent = %id, error = %source, "activation failed, aborting tick");
                Err(TickError::Agent {
                    agent_id: id,
                    source,
                })
            }
        }
    }
}

/// Drives one activation pass per tick under a fixed policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scheduler {
    /// How agents are ordered and what they see of each other.
    policy: ActivationPolicy,
}

impl Scheduler {
    /// Create a scheduler with the given activation policy.
    pub const fn new(policy: ActivationPolicy) -> Self {
        Self { policy }
    }

    /// The activation policy in use.
    pub const fn policy(&self) -> ActivationPolicy {
        self.policy
    }

    /// Activate every live agent once.
    ///
    /// Agents spawned during the pass are not activated until the next
    /// pass; agents removed before their turn are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Agent`] on the first non-recoverable failure.
    pub fn tick<R: Rng>(
        &self,
        habitat: &mut Habitat,
        rng: &mut R,
    ) -> Result<PassReport, TickError> {
        let mut order = habitat.registry.all();
        order.shuffle(rng);
        match self.policy {
            ActivationPolicy::SequentialRandom => run_sequential(habitat, &order, rng),
            ActivationPolicy::BatchApply => run_batch(habitat, &order, rng),
        }
    }
}

fn run_sequential<R: Rng>(
    habitat: &mut Habitat,
    order: &[AgentId],
    rng: &mut R,
) -> Result<PassReport, TickError> {
    let mut report = PassReport::default();
    for &id in order {
        if !habitat.registry.contains(id) {
            continue;
        }
        report.activated = report.activated.saturating_add(1);
        let outcome = behavior::step(habitat, id, rng);
        report.record(id, outcome)?;
    }
    Ok(report)
}

fn run_batch<R: Rng>(
    habitat: &mut Habitat,
    order: &[AgentId],
    rng: &mut R,
) -> Result<PassReport, TickError> {
    let mut report = PassReport::default();

    // Decide: the habitat is not touched until every decision is in.
    let mut pending: Vec<(AgentId, PendingAction)> = Vec::with_capacity(order.len());
    for &id in order {
        report.activated = report.activated.saturating_add(1);
        match behavior::decide(habitat, id, rng) {
            Ok(action) => pending.push((id, action)),
            Err(err) => report.record(id, Err(err))?,
        }
    }

    // Apply.
    for (id, action) in pending {
        let outcome = behavior::apply(habitat, id, action);
        report.record(id, outcome)?;
    }
    Ok(report)
}

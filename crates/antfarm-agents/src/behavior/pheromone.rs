//! Pheromone markers: passive, fading, removed at zero intensity.
//!
//! Nothing in the built-in behavior set lays or reinforces a trail; markers
//! are created through `Simulation::lay_pheromone`.

use antfarm_types::AgentId;

use super::Applied;
use crate::agent::Pheromone;
use crate::error::AgentError;
use crate::habitat::Habitat;

/// A pheromone's decision for the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PheromoneAction {
    /// Lose the habitat's per-tick decay.
    Fade,
    /// Intensity is gone; leave the grid and the registry.
    Evaporate,
}

/// A spent marker evaporates; any other marker fades.
pub const fn decide(pheromone: Pheromone) -> PheromoneAction {
    if pheromone.intensity == 0 {
        PheromoneAction::Evaporate
    } else {
        PheromoneAction::Fade
    }
}

/// Apply a pheromone decision.
///
/// # Errors
///
/// Returns [`AgentError::AgentNotFound`] or [`AgentError::WrongKind`] if
/// `id` is not a live pheromone when fading.
pub fn apply(
    habitat: &mut Habitat,
    id: AgentId,
    action: PheromoneAction,
) -> Result<Applied, AgentError> {
    match action {
        PheromoneAction::Fade => {
            let decay = habitat.pheromone_decay;
            let pheromone = habitat.registry.pheromone_mut(id)?;
            pheromone.intensity = pheromone.intensity.saturating_sub(decay);
            Ok(Applied::Updated)
        }
        PheromoneAction::Evaporate => {
            habitat.despawn(id);
            Ok(Applied::Despawned)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use antfarm_types::Position;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::super::step;
    use super::*;
    use crate::agent::AgentBody;

    #[test]
    fn fades_to_zero_then_evaporates() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut habitat = Habitat::new(4, 4, 2).unwrap();
        let id = habitat
            .spawn_at(
                AgentBody::Pheromone(Pheromone { intensity: 3 }),
                Position::new(2, 2),
            )
            .unwrap();

        assert_eq!(step(&mut habitat, id, &mut rng).unwrap(), Applied::Updated);
        assert_eq!(habitat.registry.pheromone_mut(id).unwrap().intensity, 1);
        assert_eq!(step(&mut habitat, id, &mut rng).unwrap(), Applied::Updated);
        assert_eq!(habitat.registry.pheromone_mut(id).unwrap().intensity, 0);
        assert_eq!(step(&mut habitat, id, &mut rng).unwrap(), Applied::Despawned);
        assert!(habitat.grid.is_empty(Position::new(2, 2)).unwrap());
    }
}

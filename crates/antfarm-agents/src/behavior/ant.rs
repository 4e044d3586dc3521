//! Ant behavior: a two-phase foraging state machine.
//!
//! # Searching
//!
//! 1. Split the eight neighbors into empty and busy cells.
//! 2. Pick a random empty neighbor to wander to. With none available the
//!    ant is boxed in and skips the tick ([`AgentError::NoAvailableMove`]).
//! 3. If any neighbor holds fresh food, pick one of those at random
//!    instead.
//! 4. After that move, look over the busy neighbors again in enumeration
//!    order; the first one holding fresh food wins and the ant moves there.
//! 5. If the cell the ant ends up on holds fresh food, it picks up the
//!    lowest-id item and turns for home.
//!
//! Food always makes its cell busy, so step 4 overrides step 3 whenever
//! food is adjacent. The food draw in step 3 only consumes randomness when
//! some neighbor holds food.
//!
//! # Returning
//!
//! At home the ant hands its load to the colony and resumes searching
//! without moving. Elsewhere it steps one cell towards home on each axis
//! at once, using the plain (non-wrapping) coordinate difference.

use antfarm_types::{AgentId, AntPhase, Position};
use antfarm_world::WorldError;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use super::Applied;
use crate::agent::Ant;
use crate::error::AgentError;
use crate::habitat::Habitat;

/// An ant's decision for the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntAction {
    /// Searching: move to `destination` and pick up `harvest` if it is
    /// still there and fresh on arrival.
    Forage {
        /// Cell the ant settles on.
        destination: Position,
        /// Food item lying at `destination` when the decision was made.
        harvest: Option<AgentId>,
    },
    /// Returning: one step towards home.
    StepHome {
        /// Next cell on the way home.
        destination: Position,
    },
    /// Returning and already home: deliver and start searching again.
    Deliver,
}

/// Decide an ant's action from the habitat as it stands.
///
/// # Errors
///
/// Returns [`AgentError::NoAvailableMove`] if a searching ant has no empty
/// neighbor, or [`AgentError::World`] if the ant is not on the grid.
pub fn decide<R: Rng>(
    habitat: &Habitat,
    id: AgentId,
    ant: Ant,
    rng: &mut R,
) -> Result<AntAction, AgentError> {
    let here = habitat
        .grid
        .position_of(id)
        .ok_or(WorldError::AgentNotPlaced(id))?;
    match ant.phase {
        AntPhase::Searching => decide_search(habitat, id, here, rng),
        AntPhase::Returning => Ok(decide_return(habitat, here)),
    }
}

fn decide_search<R: Rng>(
    habitat: &Habitat,
    id: AgentId,
    here: Position,
    rng: &mut R,
) -> Result<AntAction, AgentError> {
    let neighbors = habitat.grid.neighborhood(here, false);
    let empty_cells = habitat.grid.empty_cells();
    let (empty, busy): (Vec<Position>, Vec<Position>) = neighbors
        .iter()
        .partition(|&&pos| empty_cells.contains(pos));

    let Some(&wander) = empty.choose(rng) else {
        return Err(AgentError::NoAvailableMove {
            agent: id,
            position: here,
        });
    };

    let mut food_cells = Vec::new();
    for &pos in &neighbors {
        if habitat.holds_fresh_food(pos)? {
            food_cells.push(pos);
        }
    }
    let mut destination = food_cells.choose(rng).copied().unwrap_or(wander);

    for &pos in &busy {
        if habitat.holds_fresh_food(pos)? {
            destination = pos;
            break;
        }
    }

    let harvest = habitat.fresh_food_at(destination)?;
    debug!(ant = %id, from = %here, to = %destination, ?harvest, "searching");
    Ok(AntAction::Forage {
        destination,
        harvest,
    })
}

fn decide_return(habitat: &Habitat, here: Position) -> AntAction {
    let home = habitat.home;
    if here == home {
        return AntAction::Deliver;
    }
    let dx = i64::from(home.x).saturating_sub(i64::from(here.x)).signum();
    let dy = i64::from(home.y).saturating_sub(i64::from(here.y)).signum();
    AntAction::StepHome {
        destination: habitat.grid.offset(here, dx, dy),
    }
}

/// Apply an ant's decision.
///
/// A planned pickup only happens if the item is still live, fresh, and at
/// the destination; under batch activation another ant may have taken it
/// first, in which case this ant simply arrives and keeps searching.
///
/// # Errors
///
/// Returns a fatal error if the ant or colony is missing or unplaced, or
/// the colony store overflows.
pub fn apply(habitat: &mut Habitat, id: AgentId, action: AntAction) -> Result<Applied, AgentError> {
    match action {
        AntAction::Forage {
            destination,
            harvest,
        } => {
            habitat.grid.move_agent(id, destination)?;
            if let Some(food) = harvest {
                pick_up(habitat, id, food, destination)?;
            }
        }
        AntAction::StepHome { destination } => {
            habitat.grid.move_agent(id, destination)?;
            debug!(ant = %id, to = %destination, "returning");
        }
        AntAction::Deliver => deliver(habitat, id)?,
    }
    Ok(Applied::Updated)
}

fn pick_up(
    habitat: &mut Habitat,
    id: AgentId,
    food: AgentId,
    at: Position,
) -> Result<(), AgentError> {
    let still_there = habitat.grid.position_of(food) == Some(at)
        && habitat.registry.get(food).is_ok_and(|agent| agent.is_fresh_food());
    if !still_there {
        debug!(ant = %id, %food, "food gone before pickup");
        return Ok(());
    }
    habitat.registry.food_mut(food)?.harvested = true;
    let ant = habitat.registry.ant_mut(id)?;
    ant.phase = AntPhase::Returning;
    ant.carrying = Some(food);
    debug!(ant = %id, %food, %at, "picked up food");
    Ok(())
}

fn deliver(habitat: &mut Habitat, id: AgentId) -> Result<(), AgentError> {
    let ant = habitat.registry.ant_mut(id)?;
    let load = ant.carrying.take();
    ant.phase = AntPhase::Searching;

    let (Some(food), Some(colony)) = (load, habitat.colony) else {
        debug!(ant = %id, "home without a load");
        return Ok(());
    };
    let store = habitat.registry.colony_mut(colony)?;
    store.stored_food = store
        .stored_food
        .checked_add(1)
        .ok_or_else(|| AgentError::ArithmeticOverflow {
            context: format!("colony {colony} store"),
        })?;
    debug!(ant = %id, %food, stored = store.stored_food, "delivered food");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::super::{PendingAction, decide as decide_any, food, step};
    use super::*;
    use crate::agent::{AgentBody, Food, Pheromone};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn spawn(habitat: &mut Habitat, body: AgentBody, x: u32, y: u32) -> AgentId {
        habitat.spawn_at(body, Position::new(x, y)).unwrap()
    }

    fn marker() -> AgentBody {
        AgentBody::Pheromone(Pheromone { intensity: 100 })
    }

    /// Fill every neighbor of `center` except `keep` with pheromone markers.
    fn crowd(habitat: &mut Habitat, center: Position, keep: &[Position]) {
        for pos in habitat.grid.neighborhood(center, false) {
            if !keep.contains(&pos) {
                spawn(habitat, marker(), pos.x, pos.y);
            }
        }
    }

    fn phase(habitat: &mut Habitat, id: AgentId) -> AntPhase {
        habitat.registry.ant_mut(id).unwrap().phase
    }

    #[test]
    fn food_beats_random_empty_neighbor() {
        let mut habitat = Habitat::new(5, 5, 1).unwrap();
        let center = Position::new(2, 2);
        let ant = spawn(&mut habitat, AgentBody::Ant(Ant::new()), 2, 2);
        let food = spawn(&mut habitat, AgentBody::Food(Food::new(10)), 3, 2);
        crowd(
            &mut habitat,
            center,
            &[Position::new(1, 1), Position::new(3, 2)],
        );

        step(&mut habitat, ant, &mut rng()).unwrap();

        assert_eq!(habitat.grid.position_of(ant), Some(Position::new(3, 2)));
        assert_eq!(phase(&mut habitat, ant), AntPhase::Returning);
        assert!(habitat.registry.food_mut(food).unwrap().harvested);
        assert_eq!(
            habitat.registry.ant_mut(ant).unwrap().carrying,
            Some(food)
        );
    }

    #[test]
    fn harvested_food_leaves_grid_on_its_next_step() {
        let mut habitat = Habitat::new(5, 5, 1).unwrap();
        let ant = spawn(&mut habitat, AgentBody::Ant(Ant::new()), 2, 2);
        let food = spawn(&mut habitat, AgentBody::Food(Food::new(10)), 2, 3);
        let mut rng = rng();

        step(&mut habitat, ant, &mut rng).unwrap();
        assert!(habitat.registry.food_mut(food).unwrap().harvested);

        step(&mut habitat, food, &mut rng).unwrap();
        assert!(habitat.grid.position_of(food).is_none());
        assert!(!habitat.registry.contains(food));
    }

    #[test]
    fn first_busy_food_neighbor_wins() {
        let mut habitat = Habitat::new(5, 5, 1).unwrap();
        let ant = spawn(&mut habitat, AgentBody::Ant(Ant::new()), 2, 2);
        // Row-major order visits (3, 1) before (1, 3).
        spawn(&mut habitat, AgentBody::Food(Food::new(10)), 1, 3);
        spawn(&mut habitat, AgentBody::Food(Food::new(10)), 3, 1);

        for seed in 0..16 {
            let mut probe = habitat.clone();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let action = decide_any(&probe, ant, &mut rng).unwrap();
            let PendingAction::Ant(AntAction::Forage { destination, .. }) = action else {
                panic!("expected a forage action, got {action:?}");
            };
            assert_eq!(destination, Position::new(3, 1));
            step(&mut probe, ant, &mut rng).unwrap();
        }
    }

    #[test]
    fn harvested_food_does_not_attract() {
        let mut habitat = Habitat::new(5, 5, 1).unwrap();
        let center = Position::new(2, 2);
        let ant = spawn(&mut habitat, AgentBody::Ant(Ant::new()), 2, 2);
        let taken = spawn(
            &mut habitat,
            AgentBody::Food(Food {
                ttl: 5,
                harvested: true,
            }),
            3,
            2,
        );
        crowd(
            &mut habitat,
            center,
            &[Position::new(1, 1), Position::new(3, 2)],
        );

        step(&mut habitat, ant, &mut rng()).unwrap();

        assert_eq!(habitat.grid.position_of(ant), Some(Position::new(1, 1)));
        assert_eq!(phase(&mut habitat, ant), AntPhase::Searching);
        assert!(habitat.registry.contains(taken));
    }

    #[test]
    fn boxed_in_ant_stays_put() {
        let mut habitat = Habitat::new(5, 5, 1).unwrap();
        let center = Position::new(2, 2);
        let ant = spawn(&mut habitat, AgentBody::Ant(Ant::new()), 2, 2);
        crowd(&mut habitat, center, &[]);

        let err = step(&mut habitat, ant, &mut rng()).unwrap_err();
        assert_eq!(
            err,
            AgentError::NoAvailableMove {
                agent: ant,
                position: center
            }
        );
        assert!(err.is_recoverable());
        assert_eq!(habitat.grid.position_of(ant), Some(center));
    }

    #[test]
    fn wandering_ant_moves_to_an_adjacent_empty_cell() {
        let mut habitat = Habitat::new(6, 6, 1).unwrap();
        let start = Position::new(0, 0);
        let ant = spawn(&mut habitat, AgentBody::Ant(Ant::new()), 0, 0);
        let neighbors = habitat.grid.neighborhood(start, false);

        step(&mut habitat, ant, &mut rng()).unwrap();

        let now = habitat.grid.position_of(ant).unwrap();
        assert!(neighbors.contains(&now));
        assert_eq!(phase(&mut habitat, ant), AntPhase::Searching);
    }

    #[test]
    fn returning_ant_steps_diagonally_home() {
        let mut habitat = Habitat::new(15, 15, 1).unwrap();
        let ant = spawn(&mut habitat, AgentBody::Ant(Ant::returning(None)), 10, 3);

        step(&mut habitat, ant, &mut rng()).unwrap();

        assert_eq!(habitat.grid.position_of(ant), Some(Position::new(9, 4)));
        assert_eq!(phase(&mut habitat, ant), AntPhase::Returning);
    }

    #[test]
    fn returning_ant_does_not_take_the_short_way_round() {
        let mut habitat = Habitat::new(15, 15, 1).unwrap();
        // Wrapping would reach (7, 7) faster leftwards; the plain difference
        // says go right.
        let ant = spawn(&mut habitat, AgentBody::Ant(Ant::returning(None)), 0, 7);
        step(&mut habitat, ant, &mut rng()).unwrap();
        assert_eq!(habitat.grid.position_of(ant), Some(Position::new(1, 7)));
    }

    #[test]
    fn ant_at_home_resets_without_moving() {
        let mut habitat = Habitat::new(15, 15, 1).unwrap();
        let colony = habitat.found_colony().unwrap();
        let ant = spawn(
            &mut habitat,
            AgentBody::Ant(Ant::returning(Some(AgentId(99)))),
            7,
            7,
        );

        step(&mut habitat, ant, &mut rng()).unwrap();

        assert_eq!(habitat.grid.position_of(ant), Some(Position::new(7, 7)));
        let state = *habitat.registry.ant_mut(ant).unwrap();
        assert_eq!(state, Ant::new());
        assert_eq!(habitat.registry.colony_mut(colony).unwrap().stored_food, 1);
    }

    #[test]
    fn empty_handed_ant_adds_nothing_to_store() {
        let mut habitat = Habitat::new(15, 15, 1).unwrap();
        habitat.found_colony().unwrap();
        let ant = spawn(&mut habitat, AgentBody::Ant(Ant::returning(None)), 7, 7);

        step(&mut habitat, ant, &mut rng()).unwrap();

        assert_eq!(phase(&mut habitat, ant), AntPhase::Searching);
        assert_eq!(habitat.stored_food(), 0);
    }

    #[test]
    fn pickup_is_skipped_when_food_vanished() {
        let mut habitat = Habitat::new(5, 5, 1).unwrap();
        let ant = spawn(&mut habitat, AgentBody::Ant(Ant::new()), 2, 2);
        let food = spawn(&mut habitat, AgentBody::Food(Food::new(0)), 2, 3);
        let mut rng = rng();

        let action = decide_any(&habitat, ant, &mut rng).unwrap();
        // The food expires before the ant's decision is applied.
        let expire = decide_any(&habitat, food, &mut rng).unwrap();
        assert_eq!(
            expire,
            PendingAction::Food(food::FoodAction::Remove(food::Removal::Expired))
        );
        super::super::apply(&mut habitat, food, expire).unwrap();
        super::super::apply(&mut habitat, ant, action).unwrap();

        assert_eq!(habitat.grid.position_of(ant), Some(Position::new(2, 3)));
        assert_eq!(phase(&mut habitat, ant), AntPhase::Searching);
    }

    #[test]
    fn unplaced_ant_is_a_fatal_error() {
        let mut habitat = Habitat::new(5, 5, 1).unwrap();
        let ant = habitat.registry.spawn(AgentBody::Ant(Ant::new())).unwrap();
        let err = step(&mut habitat, ant, &mut rng()).unwrap_err();
        assert!(!err.is_recoverable());
        assert_eq!(
            err,
            AgentError::World {
                source: WorldError::AgentNotPlaced(ant)
            }
        );
    }
}

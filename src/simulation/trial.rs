//! Headless episode runs.
//!
//! A trial replays the same world for several lives with one agent, so the
//! agent's persistent knowledge carries from try to try.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::info;

use crate::simulation::agent::{Agent, PlanningAgent};
use crate::simulation::environment::{StepOutcome, WorldError, WumpusWorld};
use crate::simulation::error::AgentError;

/// Result of one life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpisodeReport {
    pub score: i64,
    pub moves: u32,
    pub outcome: StepOutcome,
}

/// Result of all tries on one world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrialSummary {
    pub episodes: Vec<EpisodeReport>,
}

impl TrialSummary {
    #[must_use]
    pub fn total_score(&self) -> i64 {
        self.episodes.iter().map(|e| e.score).sum()
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)] // episode counts are tiny
    pub fn average_score(&self) -> f64 {
        if self.episodes.is_empty() {
            0.0
        } else {
            self.total_score() as f64 / self.episodes.len() as f64
        }
    }

    /// Number of tries that ended by climbing out with the gold.
    #[must_use]
    pub fn wins(&self) -> usize {
        self.episodes
            .iter()
            .filter(|e| e.outcome == StepOutcome::Climbed { with_gold: true })
            .count()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrialError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error("agent failed after {moves} moves: {source}")]
    Agent {
        moves: u32,
        #[source]
        source: AgentError,
    },
}

/// Runs one life: resets the world, initializes the agent, then alternates
/// percept and action until the episode ends.
///
/// # Errors
/// Returns [`TrialError::Agent`] when the agent reports a failure.
pub fn run_episode<A: Agent + ?Sized>(
    world: &mut WumpusWorld,
    agent: &mut A,
) -> Result<EpisodeReport, TrialError> {
    world.reset();
    agent.initialize();
    loop {
        let percept = world.percept();
        let action = agent.process(&percept).map_err(|source| TrialError::Agent {
            moves: world.moves(),
            source,
        })?;
        let outcome = world.step(action);
        if outcome.is_terminal() {
            return Ok(EpisodeReport {
                score: world.score(),
                moves: world.moves(),
                outcome,
            });
        }
    }
}

/// Runs `tries` lives on the same world, then reports the average score to
/// the agent.
///
/// # Errors
/// Stops at the first failing episode.
pub fn run_trial<A: Agent + ?Sized>(
    world: &mut WumpusWorld,
    agent: &mut A,
    tries: u32,
) -> Result<TrialSummary, TrialError> {
    let mut episodes = Vec::with_capacity(tries as usize);
    for t in 1..=tries {
        let report = run_episode(world, agent)?;
        info!(try_number = t, score = report.score, outcome = ?report.outcome, "try finished");
        episodes.push(report);
    }
    let summary = TrialSummary { episodes };
    #[allow(clippy::cast_possible_truncation)]
    agent.game_over(summary.average_score().round() as i64);
    Ok(summary)
}

/// Evaluates a fresh planning agent on one random world per seed.
///
/// Worlds are independent, so they are run in parallel; each agent still
/// decides synchronously, one step at a time.
#[must_use]
pub fn evaluate_batch(
    seeds: &[u64],
    size: i32,
    tries: u32,
) -> Vec<(u64, Result<TrialSummary, TrialError>)> {
    seeds
        .par_iter()
        .map(|&seed| (seed, evaluate_seed(seed, size, tries)))
        .collect()
}

fn evaluate_seed(seed: u64, size: i32, tries: u32) -> Result<TrialSummary, TrialError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = WumpusWorld::random(size, &mut rng)?;
    let mut agent = PlanningAgent::new();
    run_trial(&mut world, &mut agent, tries)
}

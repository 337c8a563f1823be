//! Terminal view of a running trial.

pub mod field;
pub mod render;

use crate::simulation::agent::Agent;
use crate::simulation::environment::WumpusWorld;
use crate::simulation::percept::{Action, Percept};

/// A trial advanced one action per tick, for display.
pub struct Session {
    pub world: WumpusWorld,
    pub agent: Box<dyn Agent>,
    pub tries: u32,
    pub try_number: u32,
    pub scores: Vec<i64>,
    pub last_percept: Percept,
    pub last_action: Option<Action>,
    pub error: Option<String>,
    pub finished: bool,
}

impl Session {
    /// Starts the first try.
    pub fn new(mut world: WumpusWorld, mut agent: Box<dyn Agent>, tries: u32) -> Self {
        world.reset();
        agent.initialize();
        Self {
            last_percept: world.percept(),
            world,
            agent,
            tries,
            try_number: 1,
            scores: Vec::new(),
            last_action: None,
            error: None,
            finished: tries == 0,
        }
    }

    /// Advances by one action, or to the next try when the current one ended.
    pub fn tick(&mut self) {
        if self.finished {
            return;
        }
        if self.world.is_over() {
            self.scores.push(self.world.score());
            if self.try_number >= self.tries {
                #[allow(clippy::cast_possible_wrap)]
                let avg = self.scores.iter().sum::<i64>() / self.scores.len() as i64;
                self.agent.game_over(avg);
                self.finished = true;
                return;
            }
            self.world.reset();
            self.agent.initialize();
            self.try_number += 1;
            self.last_action = None;
            self.last_percept = self.world.percept();
            return;
        }

        let percept = self.world.percept();
        self.last_percept = percept;
        match self.agent.process(&percept) {
            Ok(action) => {
                self.last_action = Some(action);
                self.world.step(action);
            }
            Err(err) => {
                self.error = Some(err.to_string());
                self.finished = true;
            }
        }
    }

    /// One-line status for the top of the screen.
    #[must_use]
    pub fn hud(&self) -> String {
        let action = self
            .last_action
            .map_or_else(|| "-".to_string(), |a| a.to_string());
        let mut hud = format!(
            "Try {}/{} | Moves {} | Score {} | Percept {} | Action {} | {:?}",
            self.try_number,
            self.tries,
            self.world.moves(),
            self.world.score(),
            self.last_percept,
            action,
            self.world.outcome(),
        );
        if let Some(err) = &self.error {
            hud.push_str(" | Error: ");
            hud.push_str(err);
        } else if self.finished {
            hud.push_str(" | Done (q to quit)");
        }
        hud
    }
}

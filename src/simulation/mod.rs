pub mod agent;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod inference;
pub mod knowledge;
pub mod params;
pub mod percept;
pub mod planning;
pub mod reflex;
pub mod trial;

pub use agent::{Agent, Destination, PlanningAgent};
pub use error::AgentError;
pub use percept::{Action, Percept};

//! Signals the environment delivers and commands the agent returns.

use std::fmt;

/// Sensory bundle delivered once per step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Percept {
    pub stench: bool,
    pub breeze: bool,
    pub glitter: bool,
    pub bump: bool,
    pub scream: bool,
}

impl Percept {
    /// A percept with every signal off.
    #[must_use]
    pub const fn quiet() -> Self {
        Self {
            stench: false,
            breeze: false,
            glitter: false,
            bump: false,
            scream: false,
        }
    }

    #[must_use]
    pub const fn with_stench(mut self) -> Self {
        self.stench = true;
        self
    }

    #[must_use]
    pub const fn with_breeze(mut self) -> Self {
        self.breeze = true;
        self
    }

    #[must_use]
    pub const fn with_glitter(mut self) -> Self {
        self.glitter = true;
        self
    }

    #[must_use]
    pub const fn with_bump(mut self) -> Self {
        self.bump = true;
        self
    }

    #[must_use]
    pub const fn with_scream(mut self) -> Self {
        self.scream = true;
        self
    }

    /// True when neither hazard clue is present.
    #[must_use]
    pub const fn is_calm(&self) -> bool {
        !self.stench && !self.breeze
    }
}

impl fmt::Display for Percept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.stench, "Stench"),
            (self.breeze, "Breeze"),
            (self.glitter, "Glitter"),
            (self.bump, "Bump"),
            (self.scream, "Scream"),
        ];
        let on: Vec<&str> = flags.iter().filter(|(b, _)| *b).map(|(_, n)| *n).collect();
        if on.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", on.join(","))
        }
    }
}

/// Primitive commands accepted by the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    TurnLeft,
    TurnRight,
    MoveForward,
    Grab,
    Shoot,
    Climb,
}

impl Action {
    /// Only navigation actions may sit in a planned route.
    #[must_use]
    pub const fn is_navigation(self) -> bool {
        matches!(self, Self::TurnLeft | Self::TurnRight | Self::MoveForward)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TurnLeft => "TurnLeft",
            Self::TurnRight => "TurnRight",
            Self::MoveForward => "MoveForward",
            Self::Grab => "Grab",
            Self::Shoot => "Shoot",
            Self::Climb => "Climb",
        };
        f.write_str(name)
    }
}

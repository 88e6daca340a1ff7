//! Game configuration and input validation.
//!
//! A `GameConfig` is immutable once a game starts. It is built either
//! programmatically (`GameConfig::new`) or from the raw text a configuration
//! screen collects (`GameConfig::from_inputs`): a numeric target and a
//! comma-separated step list. Validation always runs before a game starts;
//! the table computation never sees an invalid configuration.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Allowed step values, in configured order.
///
/// Most games use two to four step sizes; `SmallVec` keeps them inline.
pub type Steps = SmallVec<[u32; 4]>;

/// Why a configuration was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Target is missing, non-numeric, or not positive.
    InvalidTarget,
    /// Step list is empty or contains a non-numeric or non-positive token.
    InvalidSteps,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidTarget => write!(f, "target must be a positive integer"),
            ConfigError::InvalidSteps => {
                write!(f, "steps must be a non-empty list of positive integers")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A validated game configuration.
///
/// ```
/// use dontsay::GameConfig;
///
/// let config = GameConfig::new(21, [1, 2, 3], false).unwrap();
/// assert_eq!(config.target(), 21);
/// assert_eq!(config.steps(), &[1, 2, 3]);
/// assert!(!config.last_move_wins());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameConfig {
    target: u32,
    steps: Steps,
    last_move_wins: bool,
}

impl GameConfig {
    /// Validate and build a configuration.
    ///
    /// Step order is preserved: the automated player and any presentation
    /// layer scan steps in this order. Duplicates are permitted (they are
    /// merely redundant). A configuration whose every step exceeds `target`
    /// is accepted but has no legal opening move; such a game never
    /// terminates, matching the reference behavior.
    ///
    /// # Errors
    ///
    /// `InvalidTarget` when `target` is zero; `InvalidSteps` when `steps` is
    /// empty or contains a zero.
    pub fn new(
        target: u32,
        steps: impl IntoIterator<Item = u32>,
        last_move_wins: bool,
    ) -> Result<Self, ConfigError> {
        if target == 0 {
            return Err(ConfigError::InvalidTarget);
        }

        let steps: Steps = steps.into_iter().collect();
        if steps.is_empty() || steps.iter().any(|&step| step == 0) {
            return Err(ConfigError::InvalidSteps);
        }

        Ok(Self {
            target,
            steps,
            last_move_wins,
        })
    }

    /// Parse and validate the raw text a configuration screen collects.
    ///
    /// `steps_input` is split on commas and each token parsed as a positive
    /// integer; surrounding whitespace is tolerated. The variant flag
    /// defaults to off — chain `with_last_move_wins` for the checkbox.
    ///
    /// # Errors
    ///
    /// `InvalidTarget` when `target_input` does not parse to a positive
    /// integer; `InvalidSteps` when any token is empty, non-numeric, or
    /// non-positive.
    pub fn from_inputs(target_input: &str, steps_input: &str) -> Result<Self, ConfigError> {
        let target: u32 = target_input
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidTarget)?;

        let mut steps = Steps::new();
        for token in steps_input.split(',') {
            let step: u32 = token
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidSteps)?;
            steps.push(step);
        }

        Self::new(target, steps, false)
    }

    /// Set the win-condition variant.
    #[must_use]
    pub fn with_last_move_wins(mut self, last_move_wins: bool) -> Self {
        self.last_move_wins = last_move_wins;
        self
    }

    // === Accessors ===

    /// The total that ends the game.
    #[must_use]
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Allowed step values, in configured order.
    #[must_use]
    pub fn steps(&self) -> &[u32] {
        &self.steps
    }

    /// Whether the player who reaches the target wins rather than loses.
    #[must_use]
    pub fn last_move_wins(&self) -> bool {
        self.last_move_wins
    }
}

impl Default for GameConfig {
    /// The classic parlor setup: race to 13 with steps 1 and 2, reaching the
    /// target loses.
    fn default() -> Self {
        Self {
            target: 13,
            steps: Steps::from_slice(&[1, 2]),
            last_move_wins: false,
        }
    }
}

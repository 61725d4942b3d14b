use std::{num::NonZeroU32, time::Duration};

use pipes_core::{ConfigError, PipeColor, Thickness, TurnChance};

const DEFAULT_PIPE_COUNT: u32 = 1;
const DEFAULT_RESET_INTERVAL: u32 = 2_000;
const DEFAULT_TICK_SPEED: Duration = Duration::from_millis(20);
const DEFAULT_TURN_CHANCE: u32 = 10;

/// Validated parameters for a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pipe_count: NonZeroU32,
    reset_interval: NonZeroU32,
    tick_speed: Duration,
    color: Option<PipeColor>,
    thickness: Thickness,
    turn_chance: TurnChance,
}

impl Config {
    /// Validates and assembles a configuration.
    ///
    /// `tick_speed_secs` is the pause between ticks in seconds and must be
    /// positive and finite. Zero counts and denominators are rejected rather
    /// than clamped.
    pub fn new(
        pipe_count: u32,
        reset_interval: u32,
        tick_speed_secs: f64,
        color: Option<PipeColor>,
        thickness: Thickness,
        turn_chance_denominator: u32,
    ) -> Result<Self, ConfigError> {
        let pipe_count = NonZeroU32::new(pipe_count).ok_or(ConfigError::ZeroPipeCount)?;
        let reset_interval =
            NonZeroU32::new(reset_interval).ok_or(ConfigError::ZeroResetInterval)?;
        let tick_speed = tick_speed(tick_speed_secs)?;
        let turn_chance = TurnChance::one_in(turn_chance_denominator)?;

        Ok(Self {
            pipe_count,
            reset_interval,
            tick_speed,
            color,
            thickness,
            turn_chance,
        })
    }

    /// Number of pipes kept on the canvas.
    #[must_use]
    pub const fn pipe_count(&self) -> u32 {
        self.pipe_count.get()
    }

    /// Ticks between full canvas resets.
    #[must_use]
    pub const fn reset_interval(&self) -> u32 {
        self.reset_interval.get()
    }

    /// Pause between ticks.
    #[must_use]
    pub const fn tick_speed(&self) -> Duration {
        self.tick_speed
    }

    /// Colour forced onto every pipe, if any.
    #[must_use]
    pub const fn color(&self) -> Option<PipeColor> {
        self.color
    }

    /// Glyph weight shared by every pipe.
    #[must_use]
    pub const fn thickness(&self) -> Thickness {
        self.thickness
    }

    /// One-in-N chance that a pipe turns on a step.
    #[must_use]
    pub const fn turn_chance(&self) -> TurnChance {
        self.turn_chance
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipe_count: NonZeroU32::new(DEFAULT_PIPE_COUNT).unwrap_or(NonZeroU32::MIN),
            reset_interval: NonZeroU32::new(DEFAULT_RESET_INTERVAL).unwrap_or(NonZeroU32::MIN),
            tick_speed: DEFAULT_TICK_SPEED,
            color: None,
            thickness: Thickness::Bold,
            turn_chance: TurnChance::one_in(DEFAULT_TURN_CHANCE).unwrap_or_default(),
        }
    }
}

fn tick_speed(seconds: f64) -> Result<Duration, ConfigError> {
    let invalid = ConfigError::InvalidTickSpeed { seconds };
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(invalid);
    }
    match Duration::try_from_secs_f64(seconds) {
        Ok(duration) if !duration.is_zero() => Ok(duration),
        _ => Err(invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.pipe_count(), 1);
        assert_eq!(config.reset_interval(), 2_000);
        assert_eq!(config.tick_speed(), Duration::from_millis(20));
        assert_eq!(config.color(), None);
        assert_eq!(config.thickness(), Thickness::Bold);
        assert_eq!(config.turn_chance().denominator(), 10);
    }

    #[test]
    fn accepts_valid_parameters() {
        let config = Config::new(4, 100, 0.05, Some(PipeColor::Cyan), Thickness::Thin, 3)
            .expect("valid configuration");
        assert_eq!(config.pipe_count(), 4);
        assert_eq!(config.tick_speed(), Duration::from_millis(50));
        assert_eq!(config.color(), Some(PipeColor::Cyan));
        assert_eq!(config.turn_chance().denominator(), 3);
    }

    #[test]
    fn rejects_zero_counts() {
        assert_eq!(
            Config::new(0, 10, 0.02, None, Thickness::Bold, 10),
            Err(ConfigError::ZeroPipeCount)
        );
        assert_eq!(
            Config::new(1, 0, 0.02, None, Thickness::Bold, 10),
            Err(ConfigError::ZeroResetInterval)
        );
        assert_eq!(
            Config::new(1, 10, 0.02, None, Thickness::Bold, 0),
            Err(ConfigError::ZeroTurnChance)
        );
    }

    #[test]
    fn rejects_non_positive_tick_speed() {
        for seconds in [0.0, -0.5, f64::NAN, f64::INFINITY, 1e-12] {
            let result = Config::new(1, 10, seconds, None, Thickness::Bold, 10);
            assert!(
                matches!(result, Err(ConfigError::InvalidTickSpeed { .. })),
                "{seconds} accepted"
            );
        }
    }
}

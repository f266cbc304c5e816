//! Session settings shared by the game and the front end.

use thiserror::Error;

/// Narrowest well the spawn templates fit in (they reach column 7).
pub const MIN_WIDTH: u16 = 7;
/// Shortest well that still leaves room below the tallest spawn template.
pub const MIN_HEIGHT: u16 = 4;
/// Widest well the front end lays out; keeps terminal-cell sizes well inside `u16`.
pub const MAX_WIDTH: u16 = 1000;
/// Tallest well the front end lays out.
pub const MAX_HEIGHT: u16 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("well width {0} is too narrow (minimum {min})", min = MIN_WIDTH)]
    TooNarrow(u16),
    #[error("well height {0} is too short (minimum {min})", min = MIN_HEIGHT)]
    TooShort(u16),
    #[error("well width {0} is too wide (maximum {max})", max = MAX_WIDTH)]
    TooWide(u16),
    #[error("well height {0} is too tall (maximum {max})", max = MAX_HEIGHT)]
    TooTall(u16),
    #[error("frame sample must be at least 1")]
    ZeroFrameSample,
}

/// Options that shape one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Interior columns (W).
    pub width: u16,
    /// Interior rows (H).
    pub height: u16,
    /// The piece falls on every Nth frame; smaller is faster.
    pub frame_sample: u64,
    /// Seed for shape selection; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            frame_sample: 12,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WIDTH {
            return Err(ConfigError::TooNarrow(self.width));
        }
        if self.height < MIN_HEIGHT {
            return Err(ConfigError::TooShort(self.height));
        }
        if self.width > MAX_WIDTH {
            return Err(ConfigError::TooWide(self.width));
        }
        if self.height > MAX_HEIGHT {
            return Err(ConfigError::TooTall(self.height));
        }
        if self.frame_sample == 0 {
            return Err(ConfigError::ZeroFrameSample);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_oversized_wells() {
        let wide = GameConfig {
            width: 32767,
            ..GameConfig::default()
        };
        assert_eq!(wide.validate(), Err(ConfigError::TooWide(32767)));
        let tall = GameConfig {
            height: u16::MAX,
            ..GameConfig::default()
        };
        assert_eq!(tall.validate(), Err(ConfigError::TooTall(u16::MAX)));
        let largest = GameConfig {
            width: MAX_WIDTH,
            height: MAX_HEIGHT,
            ..GameConfig::default()
        };
        assert_eq!(largest.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let narrow = GameConfig {
            width: 6,
            ..GameConfig::default()
        };
        assert_eq!(narrow.validate(), Err(ConfigError::TooNarrow(6)));
        let short = GameConfig {
            height: 3,
            ..GameConfig::default()
        };
        assert_eq!(short.validate(), Err(ConfigError::TooShort(3)));
        let frozen = GameConfig {
            frame_sample: 0,
            ..GameConfig::default()
        };
        assert_eq!(frozen.validate(), Err(ConfigError::ZeroFrameSample));
    }
}

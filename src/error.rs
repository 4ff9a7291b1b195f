use std::fmt;

/// Rejected `GameConfig` values.  Gameplay itself never fails; only a
/// session that could not be laid out is refused.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    ArenaTooSmall {
        width: f32,
        height: f32,
        min_width: f32,
        min_height: f32,
    },
    ZeroSpawnInterval,
    ZeroFrameRate,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArenaTooSmall {
                width,
                height,
                min_width,
                min_height,
            } => write!(
                f,
                "arena too small: {width}x{height} (need at least {min_width}x{min_height})"
            ),
            Self::ZeroSpawnInterval => write!(f, "spawn interval must be greater than zero"),
            Self::ZeroFrameRate => write!(f, "frame rate must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

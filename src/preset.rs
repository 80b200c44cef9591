use std::{
    fmt::{self, Display, Formatter},
    num::ParseIntError,
    str::FromStr,
};

use rand::random_range;
use thiserror::Error;

use crate::misc::strip_prefix_token;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetError {
    #[error("unknown preset `{0}`, expected `standard`, `empty`, or `chess960 [id]`")]
    Unknown(Box<str>),
    #[error("chess960 ids range from 0 to 959, found {0}")]
    OutOfRange(u16),
    #[error(transparent)]
    Int(#[from] ParseIntError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Standard,
    Empty,
    /// Chess960 start by Scharnagl number; 518 is the standard layout.
    Chess960(u16),
}
impl Preset {
    pub fn chess960(id: u16) -> Result<Self, PresetError> {
        if id < 960 {
            Ok(Preset::Chess960(id))
        } else {
            Err(PresetError::OutOfRange(id))
        }
    }
    pub fn random_chess960() -> Self {
        Preset::Chess960(random_range(0..960))
    }
}
impl Display for Preset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Standard => write!(f, "standard")?,
            Preset::Empty => write!(f, "empty")?,
            Preset::Chess960(id) => write!(f, "chess960 {id}")?,
        }
        Ok(())
    }
}
impl FromStr for Preset {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "standard" => Ok(Preset::Standard),
            "empty" => Ok(Preset::Empty),
            "chess960" => Ok(Preset::random_chess960()),
            s => match strip_prefix_token(s, "chess960") {
                Some(id) => Preset::chess960(id.parse()?),
                None => Err(PresetError::Unknown(s.into())),
            },
        }
    }
}

//! Battlefield terrain types
//!
//! Terrain is a battle-wide setting; it shifts unit bonuses but owns no state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::WargamesError;

/// Terrain a battle is fought on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Terrain {
    Plains, // Open ground, cavalry charges land hardest
    Forest, // Cramped, breaks cavalry cover and archer sightlines
    Hill,   // High ground for archers
}

impl Terrain {
    pub const ALL: [Terrain; 3] = [Terrain::Plains, Terrain::Forest, Terrain::Hill];

    pub fn name(&self) -> &'static str {
        match self {
            Terrain::Plains => "Plains",
            Terrain::Forest => "Forest",
            Terrain::Hill => "Hill",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Terrain {
    type Err = WargamesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Terrain::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| WargamesError::UnknownTerrain(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("forest".parse::<Terrain>().unwrap(), Terrain::Forest);
        assert_eq!(" HILL ".parse::<Terrain>().unwrap(), Terrain::Hill);
    }

    #[test]
    fn test_unknown_terrain_rejected() {
        assert!(matches!(
            "swamp".parse::<Terrain>(),
            Err(WargamesError::UnknownTerrain(name)) if name == "swamp"
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for terrain in Terrain::ALL {
            assert_eq!(terrain.to_string().parse::<Terrain>().unwrap(), terrain);
        }
    }
}

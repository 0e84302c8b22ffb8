use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// Topic tag shared by indexed documents and user queries.
///
/// The same value drives the store filter at search time and the choice of
/// answer template at composition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hebergement,
    Restauration,
    Transport,
    Prix,
    Periode,
    Activites,
    SiteTouristique,
    General,
    Pratique,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Self::Hebergement,
        Self::Restauration,
        Self::Transport,
        Self::Prix,
        Self::Periode,
        Self::Activites,
        Self::SiteTouristique,
        Self::General,
        Self::Pratique,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hebergement => "hebergement",
            Self::Restauration => "restauration",
            Self::Transport => "transport",
            Self::Prix => "prix",
            Self::Periode => "periode",
            Self::Activites => "activites",
            Self::SiteTouristique => "site_touristique",
            Self::General => "general",
            Self::Pratique => "pratique",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown category: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!("hotel".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case_tags() {
        let json = serde_json::to_string(&Category::SiteTouristique).unwrap();
        assert_eq!(json, "\"site_touristique\"");
    }
}

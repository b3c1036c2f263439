use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dining persona attached to a user profile. Stored as a two-letter
/// code, accepted by name or code on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Escapist,
    Learner,
    Planner,
    Dreamer,
}

impl Persona {
    pub const ALL: [Persona; 4] = [
        Persona::Escapist,
        Persona::Learner,
        Persona::Planner,
        Persona::Dreamer,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Persona::Escapist => "ES",
            Persona::Learner => "LR",
            Persona::Planner => "PL",
            Persona::Dreamer => "DR",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::Escapist => "Escapist",
            Persona::Learner => "Learner",
            Persona::Planner => "Planner",
            Persona::Dreamer => "Dreamer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Persona::Escapist => "Seeks adventurous, out-of-the-ordinary dining",
            Persona::Learner => "Drawn to culturally significant food",
            Persona::Planner => "Values reliable, well-organized spots",
            Persona::Dreamer => "Chases photogenic, share-worthy places",
        }
    }

    /// Filter and ordering applied to persona recommendations. Single
    /// source of truth for every call site that ranks by persona.
    pub fn policy(&self) -> PersonaPolicy {
        match self {
            Persona::Escapist => PersonaPolicy {
                filter: PersonaFilter::MinAdventureRating(7),
                sort: PersonaSort::AdventureThenRating,
            },
            Persona::Learner => PersonaPolicy {
                filter: PersonaFilter::None,
                sort: PersonaSort::CulturalThenRating,
            },
            Persona::Planner => PersonaPolicy {
                filter: PersonaFilter::PlanningFriendly,
                sort: PersonaSort::RatingThenPrice,
            },
            Persona::Dreamer => PersonaPolicy {
                filter: PersonaFilter::InstagramWorthy,
                sort: PersonaSort::InstagramThenRating,
            },
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Persona {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ES" | "ESCAPIST" => Ok(Persona::Escapist),
            "LR" | "LEARNER" => Ok(Persona::Learner),
            "PL" | "PLANNER" => Ok(Persona::Planner),
            "DR" | "DREAMER" => Ok(Persona::Dreamer),
            _ => Err(()),
        }
    }
}

/// Extra narrowing predicate a persona imposes on recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaFilter {
    None,
    MinAdventureRating(i32),
    PlanningFriendly,
    InstagramWorthy,
}

/// Ordering a persona imposes on recommendations. Rating descends with
/// nulls last in every variant; the leading key is persona-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaSort {
    AdventureThenRating,
    CulturalThenRating,
    RatingThenPrice,
    InstagramThenRating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonaPolicy {
    pub filter: PersonaFilter,
    pub sort: PersonaSort,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_names() {
        assert_eq!("ES".parse(), Ok(Persona::Escapist));
        assert_eq!("escapist".parse(), Ok(Persona::Escapist));
        assert_eq!("lr".parse(), Ok(Persona::Learner));
        assert_eq!("Planner".parse(), Ok(Persona::Planner));
        assert_eq!(" DR ".parse(), Ok(Persona::Dreamer));
        assert_eq!("chef".parse::<Persona>(), Err(()));
    }

    #[test]
    fn codes_round_trip() {
        for persona in Persona::ALL {
            assert_eq!(persona.code().parse(), Ok(persona));
        }
    }

    #[test]
    fn every_persona_is_described() {
        for persona in Persona::ALL {
            assert!(!persona.description().is_empty());
        }
    }

    #[test]
    fn escapist_requires_high_adventure() {
        let policy = Persona::Escapist.policy();
        assert_eq!(policy.filter, PersonaFilter::MinAdventureRating(7));
        assert_eq!(policy.sort, PersonaSort::AdventureThenRating);
    }

    #[test]
    fn learner_ranks_without_narrowing() {
        let policy = Persona::Learner.policy();
        assert_eq!(policy.filter, PersonaFilter::None);
        assert_eq!(policy.sort, PersonaSort::CulturalThenRating);
    }

    #[test]
    fn planner_and_dreamer_use_flag_filters() {
        assert_eq!(Persona::Planner.policy().filter, PersonaFilter::PlanningFriendly);
        assert_eq!(Persona::Dreamer.policy().filter, PersonaFilter::InstagramWorthy);
    }
}

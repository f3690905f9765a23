use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The eighteen elemental types. Upstream data spells them in lowercase
/// (`"fire"`), puzzle criteria usually capitalise them (`"Fire"`); both parse.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    /// Parse an upstream or user-supplied type name, ignoring case and
    /// surrounding whitespace. Returns `None` for names outside the closed
    /// set (the API also knows `unknown` and `shadow`, which never appear on
    /// a playable species).
    pub fn from_name(name: &str) -> Option<PokemonType> {
        name.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(PokemonType::from_name("Fire"), Some(PokemonType::Fire));
        assert_eq!(PokemonType::from_name(" fairy "), Some(PokemonType::Fairy));
        assert_eq!(PokemonType::from_name("STEEL"), Some(PokemonType::Steel));
        assert_eq!(PokemonType::from_name("shadow"), None);
    }

    #[test]
    fn test_display_matches_upstream_spelling() {
        for ty in PokemonType::iter() {
            let rendered = ty.to_string();
            assert_eq!(rendered, rendered.to_lowercase());
            assert_eq!(PokemonType::from_name(&rendered), Some(ty));
        }
        assert_eq!(PokemonType::iter().count(), 18);
    }
}

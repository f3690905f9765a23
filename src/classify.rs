//! Form and category classification of a normalized key.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use schema::{FormTag, PokemonType, SpecialCategory};
use serde::{Deserialize, Serialize};

use crate::names::{base_form_name, normalize};
use crate::tables::SpeciesTables;

static REGIONAL_PATTERNS: LazyLock<Vec<(Regex, FormTag)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"-alola(-|$)").expect("static pattern"), FormTag::RegionalAlola),
        (Regex::new(r"-galar(-|$)").expect("static pattern"), FormTag::RegionalGalar),
        (Regex::new(r"-hisui(-|$)").expect("static pattern"), FormTag::RegionalHisui),
        (Regex::new(r"-paldea(-|$)").expect("static pattern"), FormTag::RegionalPaldea),
    ]
});

// Mega X/Y before plain mega so the more specific tag wins.
static BATTLE_PATTERNS: LazyLock<Vec<(Regex, FormTag)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"-mega-x(-|$)").expect("static pattern"), FormTag::MegaX),
        (Regex::new(r"-mega-y(-|$)").expect("static pattern"), FormTag::MegaY),
        (Regex::new(r"-mega(-|$)").expect("static pattern"), FormTag::Mega),
        (Regex::new(r"-(gmax|gigantamax)(-|$)").expect("static pattern"), FormTag::Gigantamax),
        (Regex::new(r"-primal(-|$)").expect("static pattern"), FormTag::Primal),
        (Regex::new(r"-totem(-|$)").expect("static pattern"), FormTag::Totem),
    ]
});

/// Flags carried on the upstream species record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesFlags {
    pub is_legendary: bool,
    pub is_mythical: bool,
    pub is_baby: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub key: String,
    pub base_name: String,
    pub regional_form: Option<FormTag>,
    pub battle_form: Option<FormTag>,
    pub categories: BTreeSet<SpecialCategory>,
    pub type_override: Option<Vec<PokemonType>>,
    pub evolution_override: Option<String>,
}

impl Classification {
    /// The degraded answer: no form, `normal`, no overrides.
    pub fn degraded(key: &str) -> Self {
        Self {
            key: key.to_string(),
            base_name: key.to_string(),
            regional_form: None,
            battle_form: None,
            categories: BTreeSet::from([SpecialCategory::Normal]),
            type_override: None,
            evolution_override: None,
        }
    }

    /// Battle form if present, else the regional form.
    pub fn form_tag(&self) -> FormTag {
        self.battle_form
            .or(self.regional_form)
            .unwrap_or(FormTag::None)
    }

    pub fn has_category(&self, category: SpecialCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Status strings shown next to a species, forms first.
    pub fn status_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = [self.regional_form, self.battle_form]
            .into_iter()
            .flatten()
            .filter_map(FormTag::status_label)
            .map(str::to_string)
            .collect();
        labels.extend(
            self.categories
                .iter()
                .filter(|category| **category != SpecialCategory::Normal)
                .map(ToString::to_string),
        );
        labels
    }
}

pub fn regional_form(key: &str) -> Option<FormTag> {
    first_match(&REGIONAL_PATTERNS, key)
}

pub fn battle_form(key: &str) -> Option<FormTag> {
    first_match(&BATTLE_PATTERNS, key)
}

fn first_match(patterns: &[(Regex, FormTag)], key: &str) -> Option<FormTag> {
    patterns
        .iter()
        .find(|(pattern, _)| pattern.is_match(key))
        .map(|(_, tag)| *tag)
}

/// Classify a normalized key. A key that is empty or not in canonical form
/// degrades to [`Classification::degraded`].
pub fn classify(key: &str, flags: SpeciesFlags, tables: &SpeciesTables) -> Classification {
    if key.is_empty() || normalize(key) != key {
        log::warn!("Classification degraded for non-canonical key '{key}'");
        return Classification::degraded(key);
    }

    let base = base_form_name(key, tables);
    let mut categories = BTreeSet::new();

    if tables.is_fossil(&base) {
        categories.insert(SpecialCategory::Fossil);
    }
    if tables.is_ultra_beast(&base) {
        categories.insert(SpecialCategory::UltraBeast);
    }
    if tables.is_paradox(&base) {
        categories.insert(SpecialCategory::Paradox);
    }
    if tables.is_starter(&base) {
        categories.insert(SpecialCategory::Starter);
    }
    if tables.is_baby(&base) || flags.is_baby {
        categories.insert(SpecialCategory::Baby);
    }
    if flags.is_legendary {
        categories.insert(SpecialCategory::Legendary);
    }
    if flags.is_mythical {
        categories.insert(SpecialCategory::Mythical);
    }
    if categories.is_empty() {
        categories.insert(SpecialCategory::Normal);
    }

    let classification = Classification {
        key: key.to_string(),
        regional_form: regional_form(key),
        battle_form: battle_form(key),
        categories,
        type_override: tables.type_override(key).map(<[PokemonType]>::to_vec),
        evolution_override: tables.evolution_override(key).map(str::to_string),
        base_name: base,
    };
    log::debug!(
        "Classified '{}' as {} {:?}",
        key,
        classification.form_tag(),
        classification.categories
    );
    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn classify_plain(key: &str) -> Classification {
        classify(key, SpeciesFlags::default(), SpeciesTables::builtin())
    }

    #[rstest]
    #[case("raichu-alola", FormTag::RegionalAlola)]
    #[case("charizard-mega-x", FormTag::MegaX)]
    #[case("gengar-mega", FormTag::Mega)]
    #[case("pikachu-gmax", FormTag::Gigantamax)]
    #[case("urshifu-rapid-strike-gigantamax", FormTag::Gigantamax)]
    #[case("groudon-primal", FormTag::Primal)]
    #[case("raticate-totem-alola", FormTag::Totem)]
    #[case("tauros-paldea-aqua", FormTag::RegionalPaldea)]
    #[case("pikachu", FormTag::None)]
    #[case("meganium", FormTag::None)]
    fn test_form_tag(#[case] key: &str, #[case] expected: FormTag) {
        assert_eq!(classify_plain(key).form_tag(), expected);
    }

    #[test]
    fn test_regional_and_battle_forms_are_independent() {
        let classification = classify_plain("raticate-totem-alola");
        assert_eq!(classification.regional_form, Some(FormTag::RegionalAlola));
        assert_eq!(classification.battle_form, Some(FormTag::Totem));
    }

    #[test]
    fn test_categories_use_base_form() {
        let classification = classify_plain("aerodactyl-mega");
        assert!(classification.has_category(SpecialCategory::Fossil));
        assert!(!classification.has_category(SpecialCategory::Normal));

        let classification = classify_plain("cubone-alola");
        assert_eq!(
            classification.categories,
            BTreeSet::from([SpecialCategory::Normal])
        );
    }

    #[test]
    fn test_legendary_flags_are_ored_in() {
        let flags = SpeciesFlags {
            is_legendary: true,
            ..SpeciesFlags::default()
        };
        let classification = classify("mewtwo-mega-x", flags, SpeciesTables::builtin());
        assert_eq!(
            classification.categories,
            BTreeSet::from([SpecialCategory::Legendary])
        );

        // The name alone does not make a legendary.
        assert!(classify_plain("mewtwo").has_category(SpecialCategory::Normal));
    }

    #[rstest]
    #[case("charmander", SpecialCategory::Starter)]
    #[case("decidueye-hisui", SpecialCategory::Starter)]
    #[case("pichu", SpecialCategory::Baby)]
    #[case("nihilego", SpecialCategory::UltraBeast)]
    #[case("iron-hands", SpecialCategory::Paradox)]
    #[case("dracovish", SpecialCategory::Fossil)]
    fn test_membership_categories(#[case] key: &str, #[case] expected: SpecialCategory) {
        assert!(classify_plain(key).has_category(expected));
    }

    #[test]
    fn test_overrides() {
        let classification = classify_plain("vulpix-alola");
        assert_eq!(classification.type_override, Some(vec![PokemonType::Ice]));
        assert_eq!(classify_plain("vulpix").type_override, None);

        assert_eq!(
            classify_plain("alcremie").evolution_override.as_deref(),
            Some("Evolves from Milcery with sweet item + spin")
        );
        assert_eq!(classify_plain("eevee").evolution_override, None);
    }

    #[rstest]
    #[case("")]
    #[case("Mr. Mime")]
    #[case("-pikachu-")]
    fn test_malformed_keys_degrade(#[case] key: &str) {
        assert_eq!(classify_plain(key), Classification::degraded(key));
    }

    #[test]
    fn test_status_labels() {
        let classification = classify_plain("charizard-mega-x");
        assert_eq!(
            classification.status_labels(),
            vec!["mega-evolution".to_string(), "starter".to_string()]
        );
        assert_eq!(
            classify_plain("raichu-alola").status_labels(),
            vec!["alolan-form".to_string()]
        );
        assert!(classify_plain("eevee").status_labels().is_empty());
    }
}

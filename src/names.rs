//! Canonical name keys.
//!
//! Every lookup in the crate goes through [`normalize`]: lowercase ASCII,
//! hyphen-delimited, no leading, trailing or doubled hyphens. The other
//! functions here are pure functions of such a key.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::errors::{NameError, NameResult};
use crate::tables::SpeciesTables;

/// Longest name the lookup guard accepts.
pub const MAX_LOOKUP_NAME_LEN: usize = 50;

const SPRITE_BASE_URL: &str = "https://img.pokemondb.net/sprites/home/normal";

/// Form suffixes in priority order. [`base_form_name`] strips only the first
/// one that matches.
const FORM_SUFFIXES: &[&str] = &[
    // Regional and battle forms
    "-alola",
    "-galar",
    "-hisui",
    "-paldea",
    "-mega",
    "-mega-x",
    "-mega-y",
    "-gmax",
    "-gigantamax",
    "-primal",
    "-ash",
    "-totem",
    // Riders, masks and tera forms
    "-ice-rider",
    "-shadow-rider",
    "-wellspring",
    "-hearthflame",
    "-cornerstone",
    "-stellar",
    "-terastal",
    // Battle, size and cosmetic forms
    "-plant",
    "-sandy",
    "-trash",
    "-land",
    "-sky",
    "-standard",
    "-zen",
    "-incarnate",
    "-therian",
    "-origin",
    "-altered",
    "-ordinary",
    "-resolute",
    "-aria",
    "-pirouette",
    "-male",
    "-female",
    "-shield",
    "-blade",
    "-average",
    "-small",
    "-large",
    "-super",
    "-baile",
    "-pom-pom",
    "-pompom",
    "-pau",
    "-sensu",
    "-midday",
    "-midnight",
    "-dusk",
    "-solo",
    "-school",
    "-red",
    "-orange",
    "-yellow",
    "-green",
    "-blue",
    "-indigo",
    "-violet",
    "-disguised",
    "-busted",
    "-amped",
    "-low-key",
    "-lowkey",
    "-noice",
    "-full-belly",
    "-fullbelly",
    "-hangry",
    "-crowned",
    "-eternamax",
    "-rapid-strike",
    "-single-strike",
    "-complete",
    "-10",
    "-50",
];

const SPRITE_REGIONAL_SUFFIXES: [(&str, &str); 4] = [
    ("-alola", "-alolan"),
    ("-galar", "-galarian"),
    ("-hisui", "-hisuian"),
    ("-paldea", "-paldean"),
];

static LOOKUP_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("static pattern"));

/// Canonicalize a raw species or form name. Empty input yields an empty key.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut spelled = String::with_capacity(lowered.len());

    for ch in lowered.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        match ch {
            '♀' => spelled.push_str("-f"),
            '♂' => spelled.push_str("-m"),
            c if c.is_whitespace() => spelled.push('-'),
            c if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' => spelled.push(c),
            // Apostrophes, periods, colons and anything else non-ASCII
            _ => {}
        }
    }

    collapse_hyphens(&spelled)
}

fn collapse_hyphens(text: &str) -> String {
    text.split('-')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Strip the first matching form suffix. Allow-listed multi-word species are
/// returned unchanged.
pub fn base_form_name(key: &str, tables: &SpeciesTables) -> String {
    if key.is_empty() || tables.is_multi_word(key) {
        return key.to_string();
    }
    FORM_SUFFIXES
        .iter()
        .find_map(|suffix| key.strip_suffix(suffix))
        .filter(|base| !base.is_empty())
        .unwrap_or(key)
        .to_string()
}

/// Name used by the image host for this form.
pub fn sprite_safe_name(key: &str, tables: &SpeciesTables) -> String {
    if let Some(exception) = tables.sprite_exception(key) {
        return exception.to_string();
    }
    if tables.is_multi_word(key) {
        return key.to_string();
    }

    let mut sprite = key.to_string();
    for (from, to) in SPRITE_REGIONAL_SUFFIXES {
        if let Some(stem) = sprite.strip_suffix(from) {
            sprite = format!("{stem}{to}");
            break;
        }
    }
    if let Some(stem) = sprite.strip_suffix("-gmax") {
        sprite = format!("{stem}-gigantamax");
    }
    if let Some(stripped) = remove_segment(&sprite, "-standard") {
        sprite = stripped;
    }
    for cosmetic in ["-male", "-female"] {
        if let Some(stem) = sprite.strip_suffix(cosmetic) {
            sprite = stem.to_string();
        }
    }
    sprite
}

pub fn sprite_url(key: &str, tables: &SpeciesTables) -> String {
    format!("{SPRITE_BASE_URL}/{}.png", sprite_safe_name(key, tables))
}

/// Human label for a key, e.g. `"Mega Charizard X"` or `"Raichu (Alolan)"`.
pub fn display_name(key: &str, tables: &SpeciesTables) -> String {
    if key.is_empty() {
        return String::new();
    }
    if let Some(base) = remove_segment(key, "-mega-x") {
        return format!("Mega {} X", title_case(&base, tables));
    }
    if let Some(base) = remove_segment(key, "-mega-y") {
        return format!("Mega {} Y", title_case(&base, tables));
    }
    if let Some(base) = remove_segment(key, "-mega") {
        return format!("Mega {}", title_case(&base, tables));
    }
    if let Some(base) = remove_segment(key, "-primal") {
        return format!("Primal {}", title_case(&base, tables));
    }

    const QUALIFIED: [(&str, &str); 7] = [
        ("-gmax", "Gigantamax"),
        ("-gigantamax", "Gigantamax"),
        ("-alola", "Alolan"),
        ("-galar", "Galarian"),
        ("-hisui", "Hisuian"),
        ("-paldea", "Paldean"),
        ("-ash", "Ash"),
    ];
    for (marker, label) in QUALIFIED {
        if let Some(base) = remove_segment(key, marker) {
            return format!("{} ({label})", title_case(&base, tables));
        }
    }
    title_case(key, tables)
}

fn title_case(key: &str, tables: &SpeciesTables) -> String {
    let separator = if tables.is_multi_word(key) { "-" } else { " " };
    key.split('-')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(separator)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Remove one whole-segment occurrence of `marker` (e.g. `-paldea` in
/// `tauros-paldea-aqua`), or `None` when it does not occur on a boundary.
fn remove_segment(key: &str, marker: &str) -> Option<String> {
    let mut search_from = 0;
    while let Some(offset) = key[search_from..].find(marker) {
        let start = search_from + offset;
        let end = start + marker.len();
        if end == key.len() || key[end..].starts_with('-') {
            return Some(format!("{}{}", &key[..start], &key[end..]));
        }
        search_from = start + 1;
    }
    None
}

/// Input guard applied before any lookup: trimmed, lowercased, 1..=50
/// characters of `[a-z0-9-]`.
pub fn validate_lookup_name(raw: &str) -> NameResult<String> {
    let clean = raw.trim().to_lowercase();
    if clean.is_empty() {
        return Err(NameError::Empty);
    }
    let len = clean.chars().count();
    if len > MAX_LOOKUP_NAME_LEN {
        return Err(NameError::TooLong {
            len,
            max: MAX_LOOKUP_NAME_LEN,
        });
    }
    if !LOOKUP_NAME.is_match(&clean) {
        return Err(NameError::InvalidCharacters(clean));
    }
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn tables() -> &'static SpeciesTables {
        SpeciesTables::builtin()
    }

    #[rstest]
    #[case("Pikachu", "pikachu")]
    #[case("  Mr. Mime ", "mr-mime")]
    #[case("Farfetch'd", "farfetchd")]
    #[case("Farfetch’d", "farfetchd")]
    #[case("Type: Null", "type-null")]
    #[case("Nidoran♀", "nidoran-f")]
    #[case("Nidoran ♂", "nidoran-m")]
    #[case("Flabébé", "flabebe")]
    #[case("Charizard  Mega   X", "charizard-mega-x")]
    #[case("--ho--oh--", "ho-oh")]
    #[case("", "")]
    #[case("   ", "")]
    #[case("★☆", "")]
    fn test_normalize(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize(raw), expected);
    }

    #[rstest]
    #[case("mr-mime")]
    #[case("ho-oh")]
    #[case("type-null")]
    #[case("jangmo-o")]
    #[case("hakamo-o")]
    #[case("kommo-o")]
    #[case("porygon-z")]
    fn test_multi_word_species_round_trip(#[case] name: &str) {
        assert_eq!(normalize(name), name);
        assert_eq!(base_form_name(name, tables()), name);
    }

    #[rstest]
    #[case("raichu-alola", "raichu")]
    #[case("charizard-mega-x", "charizard")]
    #[case("aerodactyl-mega", "aerodactyl")]
    #[case("venusaur-gmax", "venusaur")]
    #[case("kyogre-primal", "kyogre")]
    #[case("lycanroc-midnight", "lycanroc")]
    #[case("oricorio-pom-pom", "oricorio")]
    #[case("pikachu", "pikachu")]
    #[case("iron-hands", "iron-hands")]
    fn test_base_form_name(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(base_form_name(key, tables()), expected);
    }

    #[test]
    fn test_base_form_name_is_single_pass() {
        // Only the first matching suffix is removed.
        assert_eq!(base_form_name("darmanitan-galar-zen", tables()), "darmanitan-galar");
    }

    #[rstest]
    #[case("raichu-alola", "raichu-alolan")]
    #[case("charizard-gmax", "charizard-gigantamax")]
    #[case("tauros-paldea", "tauros-paldean-combat")]
    #[case("minior-red", "minior-red-meteor")]
    #[case("pikachu", "pikachu")]
    #[case("charizard-mega-x", "charizard-mega-x")]
    #[case("darmanitan-standard", "darmanitan")]
    #[case("meowstic-female", "meowstic")]
    #[case("calyrex-ice", "calyrex-ice-rider")]
    #[case("mr-mime", "mr-mime")]
    fn test_sprite_safe_name(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(sprite_safe_name(key, tables()), expected);
    }

    #[test]
    fn test_sprite_url() {
        assert_eq!(
            sprite_url("raichu-alola", tables()),
            "https://img.pokemondb.net/sprites/home/normal/raichu-alolan.png"
        );
    }

    #[rstest]
    #[case("charizard-mega-x", "Mega Charizard X")]
    #[case("gengar-mega", "Mega Gengar")]
    #[case("kyogre-primal", "Primal Kyogre")]
    #[case("pikachu-gmax", "Pikachu (Gigantamax)")]
    #[case("raichu-alola", "Raichu (Alolan)")]
    #[case("tauros-paldea-aqua", "Tauros Aqua (Paldean)")]
    #[case("greninja-ash", "Greninja (Ash)")]
    #[case("ho-oh", "Ho-Oh")]
    #[case("iron-hands", "Iron-Hands")]
    #[case("pikachu", "Pikachu")]
    #[case("ashen-thing", "Ashen Thing")]
    fn test_display_name(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(display_name(key, tables()), expected);
    }

    #[test]
    fn test_validate_lookup_name() {
        assert_eq!(validate_lookup_name(" Pikachu "), Ok("pikachu".to_string()));
        assert_eq!(validate_lookup_name("   "), Err(NameError::Empty));
        assert_eq!(
            validate_lookup_name("mr. mime"),
            Err(NameError::InvalidCharacters("mr. mime".to_string()))
        );
        assert!(matches!(
            validate_lookup_name(&"a".repeat(51)),
            Err(NameError::TooLong { len: 51, max: 50 })
        ));
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(raw in "\\PC{0,40}") {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once.clone());
        }

        #[test]
        fn prop_normalized_keys_are_canonical(raw in "\\PC{0,40}") {
            let key = normalize(&raw);
            prop_assert!(key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!key.starts_with('-'));
            prop_assert!(!key.ends_with('-'));
            prop_assert!(!key.contains("--"));
        }
    }
}

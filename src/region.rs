use schema::{FormTag, Region};

use crate::classify::{battle_form, regional_form};
use crate::names::base_form_name;
use crate::tables::SpeciesTables;

/// Resolve the region a normalized key belongs to.
///
/// The checks run in a fixed order and the first hit wins:
///
/// 1. regional-form suffix on the key
/// 2. fossil table (base form)
/// 3. legendary/mythical debut table (base form)
/// 4. paradox list (base form) is Paldea
/// 5. ultra-beast list (base form) is Alola
/// 6. mega, primal and gigantamax forms resolve as their base form, once
/// 7. hand-pinned per-species overrides (base form)
/// 8. the generation slug, else `Unknown`
pub fn resolve_region(key: &str, generation_slug: Option<&str>, tables: &SpeciesTables) -> Region {
    resolve(key, generation_slug, tables, true)
}

fn resolve(
    key: &str,
    generation_slug: Option<&str>,
    tables: &SpeciesTables,
    follow_battle_form: bool,
) -> Region {
    if let Some(region) = regional_form(key).and_then(regional_region) {
        return region;
    }

    let base = base_form_name(key, tables);

    if let Some(region) = tables.fossil_region(&base) {
        return region;
    }
    if let Some(region) = tables.legendary_region(&base) {
        return region;
    }
    if tables.is_paradox(&base) {
        return Region::Paldea;
    }
    if tables.is_ultra_beast(&base) {
        return Region::Alola;
    }

    let transforms_in_battle = battle_form(key)
        .is_some_and(|tag| tag.is_mega() || matches!(tag, FormTag::Primal | FormTag::Gigantamax));
    if follow_battle_form && transforms_in_battle {
        log::debug!("Resolving region of '{key}' through base form '{base}'");
        return resolve(&base, generation_slug, tables, false);
    }

    if let Some(region) = tables.region_override(&base) {
        return region;
    }

    Region::from_generation_slug(generation_slug)
}

fn regional_region(tag: FormTag) -> Option<Region> {
    match tag {
        FormTag::RegionalAlola => Some(Region::Alola),
        FormTag::RegionalGalar => Some(Region::Galar),
        FormTag::RegionalHisui => Some(Region::Hisui),
        FormTag::RegionalPaldea => Some(Region::Paldea),
        _ => None,
    }
}

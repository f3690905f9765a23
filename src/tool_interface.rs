//! Report functions shared by the CLI and the MCP server.
//!
//! Each function takes raw text or JSON as a tool caller supplies it, runs the
//! input guard, calls into the library and renders the answer as text or
//! pretty-printed JSON.

use serde::Serialize;
use serde_json::Value;

use crate::classify::classify;
use crate::criteria::{Criterion, GuessVerdict};
use crate::errors::PokedokuResult;
use crate::evolution::{
    count_species, depth, simplify, validate, ChainValidation, EvolutionChain, SimplifiedNode,
};
use crate::names::{
    base_form_name, display_name, normalize, sprite_safe_name, sprite_url, validate_lookup_name,
};
use crate::resolve::SpeciesRecord;
use crate::service::PokedexService;

#[derive(Debug, Serialize)]
struct ChainDebugReport {
    species_count: usize,
    depth: usize,
    validation: ChainValidation,
    simplified: Vec<SimplifiedNode>,
}

#[derive(Debug, Serialize)]
struct GuessReport<'a> {
    pokemon: &'a str,
    #[serde(flatten)]
    verdict: GuessVerdict,
}

/// Guarded, normalized lookup key for a raw name.
fn lookup_key(raw: &str) -> PokedokuResult<String> {
    Ok(validate_lookup_name(&normalize(raw))?)
}

fn parse_json(text: &str) -> PokedokuResult<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Returns the normalized key and the names derived from it.
pub fn normalize_report(service: &PokedexService, name: &str) -> String {
    let tables = service.tables();
    let key = normalize(name);
    if key.is_empty() {
        return format!("'{name}' normalizes to an empty key");
    }

    let classification = classify(&key, Default::default(), tables);
    let mut output = String::new();
    output.push_str(&format!("Input:       {name}\n"));
    output.push_str(&format!("Key:         {key}\n"));
    output.push_str(&format!("Base form:   {}\n", base_form_name(&key, tables)));
    output.push_str(&format!("Display:     {}\n", display_name(&key, tables)));
    output.push_str(&format!("Sprite name: {}\n", sprite_safe_name(&key, tables)));
    output.push_str(&format!("Sprite URL:  {}\n", sprite_url(&key, tables)));
    output.push_str(&format!("Form:        {}\n", classification.form_tag()));
    output
}

/// Resolves a bare name (optionally with its generation slug) and renders the
/// record as JSON.
pub fn classify_report(
    service: &PokedexService,
    name: &str,
    generation: Option<&str>,
) -> PokedokuResult<String> {
    let key = lookup_key(name)?;
    let record = SpeciesRecord::new(&key, &[], generation);
    let pokemon = service.resolve(&record, None);
    Ok(serde_json::to_string_pretty(&pokemon)?)
}

/// Analyzes `target` within a chain payload in any supported shape.
pub fn analyze_report(
    service: &PokedexService,
    chain_json: &str,
    target: &str,
) -> PokedokuResult<String> {
    let key = lookup_key(target)?;
    let payload = parse_json(chain_json)?;
    let chain = EvolutionChain::from_json(&payload);
    let analysis = service.analyze_evolution(chain.as_ref(), &key);
    Ok(serde_json::to_string_pretty(&analysis)?)
}

/// Flattened view, size, depth and validation of a chain payload.
pub fn debug_chain_report(chain_json: &str) -> PokedokuResult<String> {
    let payload = parse_json(chain_json)?;
    let chain = EvolutionChain::try_from_json(&payload)?;
    let report = ChainDebugReport {
        species_count: count_species(&chain),
        depth: depth(&chain),
        validation: validate(&chain),
        simplified: simplify(&chain),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Checks a species record against one row and one column criterion. The
/// chain payload is optional; stage and evolution criteria need it.
pub fn validate_guess_report(
    service: &PokedexService,
    record_json: &str,
    row_json: &str,
    col_json: &str,
    chain_json: Option<&str>,
) -> PokedokuResult<String> {
    let record: SpeciesRecord = serde_json::from_str(record_json)?;
    let key = lookup_key(&record.name)?;
    let row: Criterion = serde_json::from_str(row_json)?;
    let col: Criterion = serde_json::from_str(col_json)?;
    let chain = match chain_json {
        Some(text) => EvolutionChain::from_json(&parse_json(text)?),
        None => None,
    };

    let verdict = service.validate_guess(&record, chain.as_ref(), &row, &col);
    let report = GuessReport {
        pokemon: &key,
        verdict,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Hit/miss counters of the service caches.
pub fn cache_stats_report(service: &PokedexService) -> PokedokuResult<String> {
    Ok(serde_json::to_string_pretty(&service.cache_stats())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{NameError, PokedokuError};
    use pretty_assertions::assert_eq;

    const BULBASAUR_CHAIN: &str = r#"{
        "chain": {
            "species": {"name": "bulbasaur"},
            "evolves_to": [{
                "species": {"name": "ivysaur"},
                "evolution_details": [{"trigger": {"name": "level-up"}, "min_level": 16}],
                "evolves_to": [{
                    "species": {"name": "venusaur"},
                    "evolution_details": [{"trigger": {"name": "level-up"}, "min_level": 32}],
                    "evolves_to": []
                }]
            }]
        }
    }"#;

    #[test]
    fn test_normalize_report() {
        let service = PokedexService::default();
        let report = normalize_report(&service, "Charizard Mega X");
        assert!(report.contains("Key:         charizard-mega-x"));
        assert!(report.contains("Base form:   charizard"));
        assert!(report.contains("Display:     Mega Charizard X"));
        assert!(report.contains("Form:        mega-x"));
        assert_eq!(normalize_report(&service, "!!"), "'!!' normalizes to an empty key");
    }

    #[test]
    fn test_classify_report() {
        let service = PokedexService::default();
        let report = classify_report(&service, "Aerodactyl-Mega", Some("generation-i")).unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();
        assert_eq!(json["key"], "aerodactyl-mega");
        assert_eq!(json["region"], "Kanto");
        assert_eq!(json["categories"], serde_json::json!(["fossil"]));
        assert_eq!(json["form_tag"], "mega");
    }

    #[test]
    fn test_lookup_guard() {
        let service = PokedexService::default();
        let result = classify_report(&service, "...", None);
        assert!(matches!(result, Err(PokedokuError::Name(NameError::Empty))));
        let result = classify_report(&service, &"a".repeat(60), None);
        assert!(matches!(
            result,
            Err(PokedokuError::Name(NameError::TooLong { .. }))
        ));
    }

    #[test]
    fn test_analyze_report() {
        let service = PokedexService::default();
        let report = analyze_report(&service, BULBASAUR_CHAIN, "Ivysaur").unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();
        assert_eq!(json["stage"], "Middle Stage");
        assert_eq!(json["evolved_by"], "Level 16");
        assert_eq!(json["validated"], true);
        assert_eq!(json["chain_stats"]["species_count"], 3);
    }

    #[test]
    fn test_analyze_report_unrecognized_chain() {
        let service = PokedexService::default();
        let report = analyze_report(&service, r#"{"nothing": true}"#, "ivysaur").unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();
        assert_eq!(json["stage"], "Unknown");
        assert_eq!(json["validated"], false);
    }

    #[test]
    fn test_debug_chain_report() {
        let report = debug_chain_report(BULBASAUR_CHAIN).unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();
        assert_eq!(json["species_count"], 3);
        assert_eq!(json["depth"], 2);
        assert_eq!(json["validation"]["is_valid"], true);
        assert_eq!(json["simplified"][2]["species"], "venusaur");

        assert!(matches!(
            debug_chain_report("[]"),
            Err(PokedokuError::Chain(_))
        ));
        assert!(matches!(
            debug_chain_report("{not json"),
            Err(PokedokuError::Payload(_))
        ));
    }

    #[test]
    fn test_validate_guess_report() {
        let service = PokedexService::default();
        let record = r#"{"name": "venusaur", "types": ["grass", "poison"], "generation": "generation-i"}"#;
        let report = validate_guess_report(
            &service,
            record,
            r#"{"kind": "stage", "value": "final"}"#,
            r#"{"type": "dualtype", "value": "grass/poison"}"#,
            Some(BULBASAUR_CHAIN),
        )
        .unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"pokemon": "venusaur", "row": true, "col": true, "is_valid": true})
        );
    }
}

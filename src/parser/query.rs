//! Query string ⇄ configuration mapping.
//!
//! A shareable link is the only persisted form of a configuration. Reading
//! one never fails: absent keys take the family default, garbled values
//! are logged and replaced by the default, and out-of-range numbers are
//! left for `normalize_config` to clamp.
//!
//! Keys: `width`, `height`, `depth`, `plintHeight` (families with a
//! plinth), `columns`, `color` (legacy alias `colors`), `colCfg`,
//! `wardrobeCfg`, `openingType`.

use crate::models::{FamilyConstraints, FurnitureConfig, OpeningType, RgbColor};
use crate::parser::column_codec::{decode_column_configurations, encode_column_configurations};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tracing::warn;

/// Query parameter bag, sorted by key.
pub type QueryParams = BTreeMap<String, String>;

/// Query keys.
pub mod keys {
    /// Total width (cm)
    pub const WIDTH: &str = "width";
    /// Total height (cm)
    pub const HEIGHT: &str = "height";
    /// Depth (cm)
    pub const DEPTH: &str = "depth";
    /// Plinth height (cm)
    pub const PLINTH: &str = "plintHeight";
    /// Column count
    pub const COLUMNS: &str = "columns";
    /// Finish color
    pub const COLOR: &str = "color";
    /// Finish color, legacy spelling (read only)
    pub const COLOR_LEGACY: &str = "colors";
    /// Compact column configurations
    pub const COLUMN_CONFIG: &str = "colCfg";
    /// Opaque wardrobe column encoding
    pub const WARDROBE_CONFIG: &str = "wardrobeCfg";
    /// Opening mechanism
    pub const OPENING_TYPE: &str = "openingType";
}

/// Parses a URL query string into a parameter bag.
///
/// A leading `?` is ignored; on repeated keys the last one wins. An
/// undecodable string yields an empty bag (and a warning), which reads as
/// "all family defaults".
#[must_use]
pub fn parse_query_string(query: &str) -> QueryParams {
    let query = query.trim();
    let query = query.strip_prefix('?').unwrap_or(query);
    match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Ok(pairs) => pairs.into_iter().collect(),
        Err(err) => {
            warn!("Ignoring undecodable query string: {err}");
            QueryParams::new()
        }
    }
}

/// Renders a parameter bag as a URL query string (without `?`).
///
/// # Errors
///
/// Returns an error if the encoder rejects the bag.
pub fn to_query_string(params: &QueryParams) -> Result<String> {
    serde_urlencoded::to_string(params).context("Failed to encode query string")
}

/// Reads a centimetre value.
///
/// Integers and decimals are accepted (decimals round half away from zero);
/// negative values saturate to 0.
fn parse_number(params: &QueryParams, key: &str, default: u32) -> u32 {
    let Some(raw) = params.get(key) else {
        return default;
    };
    let value = raw.trim();
    if value.is_empty() {
        return default;
    }

    if let Ok(n) = value.parse::<i64>() {
        return u32::try_from(n.max(0)).unwrap_or(u32::MAX);
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => n.round().clamp(0.0, f64::from(u32::MAX)) as u32,
        _ => {
            warn!("Ignoring non-numeric {key}='{raw}', using {default}");
            default
        }
    }
}

fn parse_color(params: &QueryParams, default: RgbColor) -> RgbColor {
    let Some(raw) = params
        .get(keys::COLOR)
        .or_else(|| params.get(keys::COLOR_LEGACY))
    else {
        return default;
    };
    RgbColor::from_hex(raw).unwrap_or_else(|err| {
        warn!("Ignoring color '{raw}': {err}");
        default
    })
}

fn parse_opening_type(params: &QueryParams) -> OpeningType {
    let Some(raw) = params.get(keys::OPENING_TYPE) else {
        return OpeningType::default();
    };
    OpeningType::from_query(raw).unwrap_or_else(|| {
        warn!("Unknown {}='{raw}', using push", keys::OPENING_TYPE);
        OpeningType::default()
    })
}

/// Configuration read from a query, with the `colCfg` tokens that were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Configuration built from the parameters and family defaults
    pub config: FurnitureConfig,
    /// Unknown `colCfg` tokens, in input order
    pub skipped: Vec<String>,
}

/// Builds a configuration from query parameters and family defaults.
///
/// `colCfg` is decoded exactly once, so each unknown token is logged once.
/// The result is not normalized yet; pass `config` through `normalize_config`.
#[must_use]
pub fn parse_query(params: &QueryParams, constraints: &FamilyConstraints) -> ParsedQuery {
    let report = params
        .get(keys::COLUMN_CONFIG)
        .map(|encoded| decode_column_configurations(encoded))
        .unwrap_or_default();

    let config = FurnitureConfig {
        family: constraints.family,
        width: parse_number(params, keys::WIDTH, constraints.width.default),
        height: parse_number(params, keys::HEIGHT, constraints.height.default),
        depth: parse_number(params, keys::DEPTH, constraints.depth.default),
        plinth_height: constraints
            .plinth
            .map(|plinth| parse_number(params, keys::PLINTH, plinth.default)),
        columns: parse_number(params, keys::COLUMNS, constraints.columns.default),
        color: parse_color(params, constraints.default_color),
        column_configurations: report.configurations,
        wardrobe_cfg: params
            .get(keys::WARDROBE_CONFIG)
            .filter(|value| !value.is_empty())
            .cloned(),
        opening_type: parse_opening_type(params),
    };

    ParsedQuery {
        config,
        skipped: report.skipped,
    }
}

/// Builds a configuration from query parameters and family defaults.
///
/// The result is not normalized yet; pass it through `normalize_config`.
#[must_use]
pub fn parse_query_to_config(params: &QueryParams, constraints: &FamilyConstraints) -> FurnitureConfig {
    parse_query(params, constraints).config
}

/// Clamps and step-snaps every numeric field; clamps the column count.
///
/// Idempotent: normalizing a normalized configuration changes nothing.
#[must_use]
pub fn normalize_config(config: &FurnitureConfig, constraints: &FamilyConstraints) -> FurnitureConfig {
    FurnitureConfig {
        family: constraints.family,
        width: constraints.width.normalize(config.width),
        height: constraints.height.normalize(config.height),
        depth: constraints.depth.normalize(config.depth),
        plinth_height: constraints
            .plinth
            .map(|plinth| plinth.normalize(config.plinth_height.unwrap_or(plinth.default))),
        columns: constraints.columns.clamp(config.columns),
        ..config.clone()
    }
}

/// Serializes a configuration, omitting values equal to the family default.
///
/// `color` is always written. `colCfg` and `wardrobeCfg` are written when
/// non-empty, `openingType` when it is not `push`.
#[must_use]
pub fn config_to_query(config: &FurnitureConfig, constraints: &FamilyConstraints) -> QueryParams {
    let mut params = QueryParams::new();
    let mut put_if_changed = |key: &str, value: u32, default: u32| {
        if value != default {
            params.insert(key.to_string(), value.to_string());
        }
    };

    put_if_changed(keys::WIDTH, config.width, constraints.width.default);
    put_if_changed(keys::HEIGHT, config.height, constraints.height.default);
    put_if_changed(keys::DEPTH, config.depth, constraints.depth.default);
    if let (Some(plinth), Some(value)) = (constraints.plinth, config.plinth_height) {
        put_if_changed(keys::PLINTH, value, plinth.default);
    }
    put_if_changed(keys::COLUMNS, config.columns, constraints.columns.default);

    params.insert(keys::COLOR.to_string(), config.color.to_hex());
    if !config.column_configurations.is_empty() {
        params.insert(
            keys::COLUMN_CONFIG.to_string(),
            encode_column_configurations(&config.column_configurations),
        );
    }
    if let Some(wardrobe) = config.wardrobe_cfg.as_ref().filter(|w| !w.is_empty()) {
        params.insert(keys::WARDROBE_CONFIG.to_string(), wardrobe.clone());
    }
    if config.opening_type != OpeningType::Push {
        params.insert(
            keys::OPENING_TYPE.to_string(),
            config.opening_type.as_str().to_string(),
        );
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{ColumnConfiguration, DoorSide, Family, ItemCount};

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn stand() -> FamilyConstraints {
        Catalog::load().unwrap().family(Family::Stand).clone()
    }

    #[test]
    fn test_end_to_end_stand_link() {
        let stand = stand();
        let input = params(&[
            ("width", "150"),
            ("height", "90"),
            ("depth", "45"),
            ("plintHeight", "12"),
            ("columns", "3"),
            ("color", "#abc123"),
            ("colCfg", "D1SL,DR3,D2SR"),
            ("openingType", "handle"),
        ]);

        let config = normalize_config(&parse_query_to_config(&input, &stand), &stand);
        assert_eq!(config.opening_type, OpeningType::Round);
        assert_eq!(
            config.column_configurations,
            vec![
                ColumnConfiguration::Door {
                    shelves: ItemCount::One,
                    side: DoorSide::Left
                },
                ColumnConfiguration::Drawers(ItemCount::Three),
                ColumnConfiguration::Door {
                    shelves: ItemCount::Two,
                    side: DoorSide::Right
                },
            ]
        );

        let mut expected = input.clone();
        expected.insert("openingType".to_string(), "round".to_string());
        assert_eq!(config_to_query(&config, &stand), expected);
    }

    #[test]
    fn test_defaults_when_empty() {
        let stand = stand();
        let config = parse_query_to_config(&QueryParams::new(), &stand);
        assert_eq!(config, FurnitureConfig::defaults(&stand));
    }

    #[test]
    fn test_default_config_only_emits_color() {
        let catalog = Catalog::load().unwrap();
        for constraints in catalog.families() {
            let query = config_to_query(&FurnitureConfig::defaults(constraints), constraints);
            assert_eq!(query.len(), 1, "{}", constraints.family);
            assert_eq!(query.get("color"), Some(&constraints.default_color.to_hex()));
        }
    }

    #[test]
    fn test_number_parsing() {
        let stand = stand();
        let p = params(&[
            ("width", " 154.5 "),
            ("height", "-20"),
            ("depth", "deep"),
            ("columns", "2.5"),
        ]);
        let config = parse_query_to_config(&p, &stand);
        assert_eq!(config.width, 155);
        assert_eq!(config.height, 0);
        assert_eq!(config.depth, stand.depth.default);
        assert_eq!(config.columns, 3);
    }

    #[test]
    fn test_normalize_clamps_and_snaps() {
        let stand = stand();
        let p = params(&[
            ("width", "155"),
            ("height", "0"),
            ("depth", "999"),
            ("plintHeight", "30"),
            ("columns", "7"),
        ]);
        let config = normalize_config(&parse_query_to_config(&p, &stand), &stand);
        assert_eq!(config.width, 160);
        assert_eq!(config.height, 40);
        assert_eq!(config.depth, 50);
        assert_eq!(config.plinth_height, Some(20));
        assert_eq!(config.columns, 4);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let catalog = Catalog::load().unwrap();
        for constraints in catalog.families() {
            for width in (0..400).step_by(7) {
                let mut config = FurnitureConfig::defaults(constraints);
                config.width = width;
                config.height = width / 2 + 13;
                config.depth = width / 5;
                config.columns = width % 6;
                let once = normalize_config(&config, constraints);
                assert_eq!(normalize_config(&once, constraints), once);
            }
        }
    }

    #[test]
    fn test_color_handling() {
        let stand = stand();
        let legacy = parse_query_to_config(&params(&[("colors", "ABCDEF")]), &stand);
        assert_eq!(legacy.color.to_hex(), "#abcdef");

        let both = parse_query_to_config(
            &params(&[("color", "#112233"), ("colors", "#445566")]),
            &stand,
        );
        assert_eq!(both.color.to_hex(), "#112233");

        let garbled = parse_query_to_config(&params(&[("color", "blue")]), &stand);
        assert_eq!(garbled.color, stand.default_color);
    }

    #[test]
    fn test_plinth_only_for_families_that_have_one() {
        let catalog = Catalog::load().unwrap();
        let rack = catalog.family(Family::Rack);
        let config = parse_query_to_config(&params(&[("plintHeight", "12")]), rack);
        assert_eq!(config.plinth_height, None);
        assert!(!config_to_query(&config, rack).contains_key("plintHeight"));
    }

    #[test]
    fn test_opening_type_and_passthrough() {
        let catalog = Catalog::load().unwrap();
        let wardrobe = catalog.family(Family::Wardrobe);
        let config = parse_query_to_config(
            &params(&[("openingType", "lever"), ("wardrobeCfg", "a1,b0")]),
            wardrobe,
        );
        assert_eq!(config.opening_type, OpeningType::Push);
        assert_eq!(config.wardrobe_cfg.as_deref(), Some("a1,b0"));

        let query = config_to_query(&config, wardrobe);
        assert_eq!(query.get("wardrobeCfg").map(String::as_str), Some("a1,b0"));
        assert!(!query.contains_key("openingType"));
    }

    #[test]
    fn test_query_string_round_trip() {
        let parsed = parse_query_string("?width=150&colCfg=D1SL%2CDR3&color=%23abc123");
        assert_eq!(parsed.get("width").map(String::as_str), Some("150"));
        assert_eq!(parsed.get("colCfg").map(String::as_str), Some("D1SL,DR3"));
        assert_eq!(parsed.get("color").map(String::as_str), Some("#abc123"));

        let rendered = to_query_string(&parsed).unwrap();
        assert_eq!(parse_query_string(&rendered), parsed);
    }

    #[test]
    fn test_parse_query_reports_skipped_codes() {
        let stand = stand();
        let parsed = parse_query(&params(&[("colCfg", "DR3,INVALID,D1SL,BADCODE")]), &stand);
        assert_eq!(parsed.skipped, vec!["INVALID", "BADCODE"]);
        assert_eq!(
            parsed.config.column_configurations,
            vec![
                ColumnConfiguration::Drawers(ItemCount::Three),
                ColumnConfiguration::Door {
                    shelves: ItemCount::One,
                    side: DoorSide::Left,
                },
            ]
        );

        let clean = parse_query(&params(&[("width", "150")]), &stand);
        assert!(clean.skipped.is_empty());
        assert!(clean.config.column_configurations.is_empty());
    }

    #[test]
    fn test_unencoded_commas_survive() {
        let parsed = parse_query_string("colCfg=D1SL,DR3,D2SR&width=150");
        assert_eq!(parsed.get("colCfg").map(String::as_str), Some("D1SL,DR3,D2SR"));
    }
}

//! Compact codec for column configuration arrays.
//!
//! Each column becomes a short code (`DR3`, `D1S`, `DD2S`), single doors
//! followed by their opening side (`L`/`R`), joined with commas:
//!
//! ```text
//! D1SL,DR3,D2SR
//! ```
//!
//! Decoding is lenient because links come from the outside world: unknown
//! tokens are skipped and reported, never fatal.

use crate::models::configuration::split_side_suffix;
use crate::models::{ColumnConfiguration, ConfigurationType, DoorSide};
use serde::Serialize;
use tracing::warn;

/// Token separator.
pub const SEPARATOR: char = ',';

/// Outcome of decoding a code string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    /// Decoded configurations, in input order
    pub configurations: Vec<ColumnConfiguration>,
    /// Tokens that matched no configuration type, in input order
    pub skipped: Vec<String>,
}

/// Encodes configurations into their compact form.
///
/// # Examples
///
/// ```
/// use furnicfg::models::{ColumnConfiguration, DoorSide, ItemCount};
/// use furnicfg::parser::column_codec::encode_column_configurations;
///
/// let configs = [
///     ColumnConfiguration::Door { shelves: ItemCount::One, side: DoorSide::Left },
///     ColumnConfiguration::Drawers(ItemCount::Three),
/// ];
/// assert_eq!(encode_column_configurations(&configs), "D1SL,DR3");
/// ```
#[must_use]
pub fn encode_column_configurations(configurations: &[ColumnConfiguration]) -> String {
    configurations
        .iter()
        .map(ColumnConfiguration::code)
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

/// Decodes one trimmed, non-empty token.
///
/// Returns `None` for an unknown base code. A single door without a side
/// opens left; a side on anything else is dropped. Both are logged.
#[must_use]
pub fn decode_token(token: &str) -> Option<ColumnConfiguration> {
    let (base, side) = split_side_suffix(token);
    let ty = ConfigurationType::from_code(base)?;

    match (ty.has_single_door(), side) {
        (true, Some(side)) => Some(ty.with_side(side)),
        (true, None) => {
            warn!("Column code '{token}' has no opening side, assuming left");
            Some(ty.with_side(DoorSide::Left))
        }
        (false, Some(_)) => {
            warn!("Column code '{token}' has no single door, ignoring its side");
            Some(ty.with_side(DoorSide::Left))
        }
        (false, None) => Some(ty.with_side(DoorSide::Left)),
    }
}

/// Decodes a compact string, skipping unknown tokens.
///
/// Tokens are trimmed and empty ones ignored, so `" DR3 ,, D1SL "` reads
/// the same as `"DR3,D1SL"`. Each skipped token is logged once and listed
/// in the report.
#[must_use]
pub fn decode_column_configurations(encoded: &str) -> DecodeReport {
    let mut report = DecodeReport::default();

    for token in encoded.split(SEPARATOR).map(str::trim) {
        if token.is_empty() {
            continue;
        }
        match decode_token(token) {
            Some(config) => report.configurations.push(config),
            None => {
                warn!("Skipping unknown column code '{token}'");
                report.skipped.push(token.to_string());
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemCount;

    fn door(shelves: ItemCount, side: DoorSide) -> ColumnConfiguration {
        ColumnConfiguration::Door { shelves, side }
    }

    #[test]
    fn test_encode() {
        let configs = [
            door(ItemCount::One, DoorSide::Left),
            ColumnConfiguration::Drawers(ItemCount::Three),
            door(ItemCount::Two, DoorSide::Right),
            ColumnConfiguration::SplitDoor {
                shelves: ItemCount::Four,
            },
        ];
        assert_eq!(encode_column_configurations(&configs), "D1SL,DR3,D2SR,DD4S");
        assert_eq!(encode_column_configurations(&[]), "");
    }

    #[test]
    fn test_decode_skips_unknown_tokens() {
        let report = decode_column_configurations("DR3,INVALID,D1SL,BADCODE");
        assert_eq!(
            report.configurations,
            vec![
                ColumnConfiguration::Drawers(ItemCount::Three),
                door(ItemCount::One, DoorSide::Left),
            ]
        );
        assert_eq!(report.skipped, vec!["INVALID", "BADCODE"]);
    }

    #[test]
    fn test_decode_round_trips_every_type_and_side() {
        let mut configs = Vec::new();
        for ty in ConfigurationType::ALL {
            configs.push(ty.with_side(DoorSide::Left));
            if ty.has_single_door() {
                configs.push(ty.with_side(DoorSide::Right));
            }
        }
        let report = decode_column_configurations(&encode_column_configurations(&configs));
        assert_eq!(report.configurations, configs);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_decode_trims_and_ignores_empty_tokens() {
        let report = decode_column_configurations(" DR3 ,, D1SR ,");
        assert_eq!(
            report.configurations,
            vec![
                ColumnConfiguration::Drawers(ItemCount::Three),
                door(ItemCount::One, DoorSide::Right),
            ]
        );
        assert!(decode_column_configurations("").configurations.is_empty());
    }

    #[test]
    fn test_missing_side_defaults_left() {
        assert_eq!(decode_token("D3S"), Some(door(ItemCount::Three, DoorSide::Left)));
    }

    #[test]
    fn test_side_on_non_single_door_is_dropped() {
        assert_eq!(
            decode_token("DR3L"),
            Some(ColumnConfiguration::Drawers(ItemCount::Three))
        );
        assert_eq!(
            decode_token("DD2SR"),
            Some(ColumnConfiguration::SplitDoor {
                shelves: ItemCount::Two
            })
        );
    }

    #[test]
    fn test_decode_is_case_sensitive() {
        let report = decode_column_configurations("dr3,d1sl");
        assert!(report.configurations.is_empty());
        assert_eq!(report.skipped.len(), 2);
    }
}

// ABOUTME: Pure weight and distance unit conversion with fixed factors
// ABOUTME: Supports kg/lbs and km/miles, rounding results to one decimal place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

//! # Unit Conversion
//!
//! Pure, stateless conversion between the two unit families the sync
//! engine understands: weight (kg/lbs) and distance (km/miles). Unit
//! strings are case-insensitive. Converting between units of different
//! families, or to any unrecognized unit, is a
//! [`ConversionError::UnsupportedUnit`] — that signals a configuration
//! defect, not a data condition, so it is propagated rather than absorbed.

use crate::errors::ConversionError;

/// Weight and distance conversions.
pub struct UnitConverter;

impl UnitConverter {
    /// Kilograms to pounds.
    pub const KG_TO_LBS: f64 = 2.20462;
    /// Pounds to kilograms.
    pub const LBS_TO_KG: f64 = 0.453_592;
    /// Kilometers to miles.
    pub const KM_TO_MILES: f64 = 0.621_371;
    /// Miles to kilometers.
    pub const MILES_TO_KM: f64 = 1.60934;

    /// Convert a weight between kg and lbs.
    ///
    /// Identity (unrounded) when the units match; otherwise the result is
    /// rounded to one decimal place.
    ///
    /// # Errors
    ///
    /// [`ConversionError::UnsupportedUnit`] for any pair outside {kg, lbs}.
    pub fn convert_weight(value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        let from_unit = from.to_lowercase();
        let to_unit = to.to_lowercase();

        if from_unit == to_unit {
            return Ok(value);
        }

        match (from_unit.as_str(), to_unit.as_str()) {
            ("kg", "lbs") => Ok(round1(value * Self::KG_TO_LBS)),
            ("lbs", "kg") => Ok(round1(value * Self::LBS_TO_KG)),
            _ => Err(ConversionError::UnsupportedUnit {
                quantity: "weight",
                from: from_unit,
                to: to_unit,
            }),
        }
    }

    /// Convert a distance between km and miles.
    ///
    /// Identity (unrounded) when the units match; otherwise the result is
    /// rounded to one decimal place.
    ///
    /// # Errors
    ///
    /// [`ConversionError::UnsupportedUnit`] for any pair outside {km, miles}.
    pub fn convert_distance(value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        let from_unit = from.to_lowercase();
        let to_unit = to.to_lowercase();

        if from_unit == to_unit {
            return Ok(value);
        }

        match (from_unit.as_str(), to_unit.as_str()) {
            ("km", "miles") => Ok(round1(value * Self::KM_TO_MILES)),
            ("miles", "km") => Ok(round1(value * Self::MILES_TO_KM)),
            _ => Err(ConversionError::UnsupportedUnit {
                quantity: "distance",
                from: from_unit,
                to: to_unit,
            }),
        }
    }

    /// Normalize a weight to kilograms.
    ///
    /// # Errors
    ///
    /// [`ConversionError::UnsupportedUnit`] when `unit` is not kg or lbs.
    pub fn normalize_weight(value: f64, unit: &str) -> Result<f64, ConversionError> {
        Self::convert_weight(value, unit, "kg")
    }

    /// Normalize a distance to kilometers.
    ///
    /// # Errors
    ///
    /// [`ConversionError::UnsupportedUnit`] when `unit` is not km or miles.
    pub fn normalize_distance(value: f64, unit: &str) -> Result<f64, ConversionError> {
        Self::convert_distance(value, unit, "km")
    }
}

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_kg_to_lbs() {
        assert_eq!(UnitConverter::convert_weight(10.0, "kg", "lbs").unwrap(), 22.0);
        assert_eq!(UnitConverter::convert_weight(100.0, "kg", "lbs").unwrap(), 220.5);
    }

    #[test]
    fn test_weight_lbs_to_kg() {
        assert_eq!(UnitConverter::convert_weight(22.0, "lbs", "kg").unwrap(), 10.0);
    }

    #[test]
    fn test_weight_identity() {
        assert_eq!(UnitConverter::convert_weight(73.25, "kg", "kg").unwrap(), 73.25);
        assert_eq!(UnitConverter::convert_weight(161.5, "lbs", "lbs").unwrap(), 161.5);
    }

    #[test]
    fn test_weight_case_insensitive() {
        assert_eq!(UnitConverter::convert_weight(10.0, "KG", "Lbs").unwrap(), 22.0);
    }

    #[test]
    fn test_weight_unsupported_pair() {
        let err = UnitConverter::convert_weight(10.0, "kg", "stones").unwrap_err();
        assert!(matches!(
            err,
            ConversionError::UnsupportedUnit { quantity: "weight", .. }
        ));
    }

    #[test]
    fn test_distance_km_to_miles() {
        assert_eq!(UnitConverter::convert_distance(10.0, "km", "miles").unwrap(), 6.2);
    }

    #[test]
    fn test_distance_miles_to_km() {
        assert_eq!(UnitConverter::convert_distance(10.0, "miles", "km").unwrap(), 16.1);
    }

    #[test]
    fn test_distance_identity() {
        assert_eq!(UnitConverter::convert_distance(5.5, "km", "km").unwrap(), 5.5);
    }

    #[test]
    fn test_distance_unsupported_pair() {
        assert!(UnitConverter::convert_distance(10.0, "km", "furlongs").is_err());
        assert!(UnitConverter::convert_distance(10.0, "kg", "lbs").is_err());
    }

    #[test]
    fn test_normalize_defaults() {
        assert_eq!(UnitConverter::normalize_weight(22.0, "lbs").unwrap(), 10.0);
        assert_eq!(UnitConverter::normalize_weight(80.0, "kg").unwrap(), 80.0);
        assert_eq!(UnitConverter::normalize_distance(10.0, "miles").unwrap(), 16.1);
        assert_eq!(UnitConverter::normalize_distance(12.3, "km").unwrap(), 12.3);
    }
}

#![deny(warnings)]

//! Core domain types for the store calculator.
//!
//! This crate defines the serializable records shared across the workspace:
//! the city-tier presets, the operating-parameter snapshot the engine
//! consumes, and the free-form input boundary that turns raw text fields
//! into a validated record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced at the input boundary.
///
/// These are the only two failure modes in the workspace. Numerically
/// degenerate parameters (zero sales, zero business days, a cost ratio
/// above 1) are never errors; the engine answers them with guarded zero
/// defaults.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    /// No preset bundle exists for the requested tier.
    #[error("no preset defined for city tier '{0}'")]
    UnknownTier(String),
    /// A free-form field could not be parsed as a number.
    #[error("field '{field}' is not a valid number: '{value}'")]
    InvalidNumericInput { field: &'static str, value: String },
}

/// City category used to select a preset parameter bundle.
///
/// Advisory only: it records where the defaults came from and does not
/// constrain later overrides to the individual fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityTier {
    Tier1,
    Tier2,
    Tier3,
    /// Parameters entered without consulting a preset.
    Custom,
}

impl fmt::Display for CityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CityTier::Tier1 => "tier1",
            CityTier::Tier2 => "tier2",
            CityTier::Tier3 => "tier3",
            CityTier::Custom => "custom",
        };
        f.write_str(label)
    }
}

impl FromStr for CityTier {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, ParamError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tier1" => Ok(CityTier::Tier1),
            "tier2" => Ok(CityTier::Tier2),
            "tier3" => Ok(CityTier::Tier3),
            "custom" => Ok(CityTier::Custom),
            _ => Err(ParamError::UnknownTier(s.to_string())),
        }
    }
}

/// Immutable bundle of default cost and volume figures for a city tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityPreset {
    pub monthly_rent: Decimal,
    pub monthly_staff_cost: Decimal,
    pub monthly_utility_cost: Decimal,
    /// Fraction of revenue treated as cost of goods.
    pub direct_cost_ratio: Decimal,
    pub avg_unit_price: Decimal,
    pub avg_daily_orders: u64,
}

/// Business days assumed per month when no override is given.
pub const DEFAULT_BUSINESS_DAYS: u32 = 30;

/// Default per-order variable cost. Presets do not cover this field.
pub fn default_variable_cost() -> Decimal {
    Decimal::new(3, 0)
}

/// Look up the preset bundle for a tier. Pure, no side effects.
///
/// Fails for [`CityTier::Custom`]: there is no custom-preset mechanism,
/// custom parameters start from the plain form defaults instead.
pub fn resolve_preset(tier: CityTier) -> Result<CityPreset, ParamError> {
    match tier {
        CityTier::Tier1 => Ok(CityPreset {
            monthly_rent: Decimal::new(30_000, 0),
            monthly_staff_cost: Decimal::new(40_000, 0),
            monthly_utility_cost: Decimal::new(8_000, 0),
            direct_cost_ratio: Decimal::new(45, 2),
            avg_unit_price: Decimal::new(35, 0),
            avg_daily_orders: 150,
        }),
        CityTier::Tier2 => Ok(CityPreset {
            monthly_rent: Decimal::new(15_000, 0),
            monthly_staff_cost: Decimal::new(24_000, 0),
            monthly_utility_cost: Decimal::new(4_500, 0),
            direct_cost_ratio: Decimal::new(40, 2),
            avg_unit_price: Decimal::new(25, 0),
            avg_daily_orders: 100,
        }),
        CityTier::Tier3 => Ok(CityPreset {
            monthly_rent: Decimal::new(8_000, 0),
            monthly_staff_cost: Decimal::new(15_000, 0),
            monthly_utility_cost: Decimal::new(2_000, 0),
            direct_cost_ratio: Decimal::new(35, 2),
            avg_unit_price: Decimal::new(18, 0),
            avg_daily_orders: 80,
        }),
        CityTier::Custom => Err(ParamError::UnknownTier(tier.to_string())),
    }
}

/// A complete, immutable snapshot of the shop's operating parameters.
///
/// Serde field names match the persisted history format. The direct cost
/// ratio is stored as a fraction; out-of-range values pass through
/// unvalidated and surface as negative direct cost or margins above 100%.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperatingParameters {
    pub city: CityTier,
    /// Revenue per order.
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    #[serde(rename = "orders")]
    pub daily_orders: u64,
    /// Typically kept in [1, 31] by callers; not enforced.
    #[serde(rename = "days")]
    pub business_days: u32,
    #[serde(rename = "rent")]
    pub monthly_rent: Decimal,
    #[serde(rename = "staff")]
    pub monthly_staff_cost: Decimal,
    #[serde(rename = "utility")]
    pub monthly_utility_cost: Decimal,
    #[serde(rename = "cost_rate")]
    pub direct_cost_ratio: Decimal,
    #[serde(rename = "var_cost")]
    pub variable_cost_per_order: Decimal,
}

impl OperatingParameters {
    /// Expand a preset into an editable parameter record.
    ///
    /// The preset fully overwrites the fields it covers; business days and
    /// the per-order variable cost take the form defaults.
    pub fn from_preset(tier: CityTier, preset: &CityPreset) -> Self {
        Self {
            city: tier,
            unit_price: preset.avg_unit_price,
            daily_orders: preset.avg_daily_orders,
            business_days: DEFAULT_BUSINESS_DAYS,
            monthly_rent: preset.monthly_rent,
            monthly_staff_cost: preset.monthly_staff_cost,
            monthly_utility_cost: preset.monthly_utility_cost,
            direct_cost_ratio: preset.direct_cost_ratio,
            variable_cost_per_order: default_variable_cost(),
        }
    }
}

impl Default for OperatingParameters {
    /// The initial form contents. These happen to coincide with the tier2
    /// figures but are fixed independently of the preset table.
    fn default() -> Self {
        Self {
            city: CityTier::Tier2,
            unit_price: Decimal::new(25, 0),
            daily_orders: 100,
            business_days: DEFAULT_BUSINESS_DAYS,
            monthly_rent: Decimal::new(15_000, 0),
            monthly_staff_cost: Decimal::new(24_000, 0),
            monthly_utility_cost: Decimal::new(4_500, 0),
            direct_cost_ratio: Decimal::new(40, 2),
            variable_cost_per_order: Decimal::new(3, 0),
        }
    }
}

/// Raw free-form field contents, one slot per numeric input.
///
/// Slots hold exactly what the caller typed; parsing happens in one place,
/// [`ParameterOverrides::resolve`], so a bad field aborts before any
/// arithmetic runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterOverrides {
    pub unit_price: Option<String>,
    pub daily_orders: Option<String>,
    pub business_days: Option<String>,
    pub monthly_rent: Option<String>,
    pub monthly_staff_cost: Option<String>,
    pub monthly_utility_cost: Option<String>,
    /// Entered as a percentage, e.g. "40" for a 0.40 ratio.
    pub direct_cost_pct: Option<String>,
    pub variable_cost_per_order: Option<String>,
}

impl ParameterOverrides {
    /// Store a raw value under its short field key.
    ///
    /// Returns false when the key names no known field; the caller decides
    /// whether that is an error.
    pub fn set(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "price" => &mut self.unit_price,
            "orders" => &mut self.daily_orders,
            "days" => &mut self.business_days,
            "rent" => &mut self.monthly_rent,
            "staff" => &mut self.monthly_staff_cost,
            "utility" => &mut self.monthly_utility_cost,
            "cost_rate" => &mut self.direct_cost_pct,
            "var_cost" => &mut self.variable_cost_per_order,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Resolve the overrides against a tier's defaults.
    ///
    /// Starts from the preset expansion (or the plain form defaults for
    /// [`CityTier::Custom`]) and applies every present field in turn. The
    /// cost rate is divided by 100 here. No record is produced if any
    /// field fails to parse.
    pub fn resolve(&self, tier: CityTier) -> Result<OperatingParameters, ParamError> {
        let mut params = match resolve_preset(tier) {
            Ok(preset) => OperatingParameters::from_preset(tier, &preset),
            Err(_) => OperatingParameters {
                city: CityTier::Custom,
                ..OperatingParameters::default()
            },
        };
        if let Some(raw) = &self.unit_price {
            params.unit_price = parse_field("price", raw)?;
        }
        if let Some(raw) = &self.daily_orders {
            params.daily_orders = parse_field("orders", raw)?;
        }
        if let Some(raw) = &self.business_days {
            params.business_days = parse_field("days", raw)?;
        }
        if let Some(raw) = &self.monthly_rent {
            params.monthly_rent = parse_field("rent", raw)?;
        }
        if let Some(raw) = &self.monthly_staff_cost {
            params.monthly_staff_cost = parse_field("staff", raw)?;
        }
        if let Some(raw) = &self.monthly_utility_cost {
            params.monthly_utility_cost = parse_field("utility", raw)?;
        }
        if let Some(raw) = &self.direct_cost_pct {
            let pct: Decimal = parse_field("cost_rate", raw)?;
            params.direct_cost_ratio = pct / Decimal::ONE_HUNDRED;
        }
        if let Some(raw) = &self.variable_cost_per_order {
            params.variable_cost_per_order = parse_field("var_cost", raw)?;
        }
        Ok(params)
    }
}

fn parse_field<T: FromStr>(field: &'static str, raw: &str) -> Result<T, ParamError> {
    raw.trim()
        .parse()
        .map_err(|_| ParamError::InvalidNumericInput {
            field,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn preset_lookup_matches_fixed_table() {
        let p1 = resolve_preset(CityTier::Tier1).unwrap();
        assert_eq!(p1.monthly_rent, Decimal::new(30_000, 0));
        assert_eq!(p1.direct_cost_ratio, Decimal::new(45, 2));
        assert_eq!(p1.avg_daily_orders, 150);

        let p2 = resolve_preset(CityTier::Tier2).unwrap();
        assert_eq!(p2.monthly_staff_cost, Decimal::new(24_000, 0));
        assert_eq!(p2.avg_unit_price, Decimal::new(25, 0));

        let p3 = resolve_preset(CityTier::Tier3).unwrap();
        assert_eq!(p3.monthly_utility_cost, Decimal::new(2_000, 0));
        assert_eq!(p3.avg_daily_orders, 80);
    }

    #[test]
    fn custom_tier_has_no_preset() {
        assert_eq!(
            resolve_preset(CityTier::Custom),
            Err(ParamError::UnknownTier("custom".to_string()))
        );
    }

    #[test]
    fn tier_parse_is_case_insensitive() {
        assert_eq!("Tier2".parse::<CityTier>().unwrap(), CityTier::Tier2);
        assert_eq!(" TIER3 ".parse::<CityTier>().unwrap(), CityTier::Tier3);
        assert_eq!("custom".parse::<CityTier>().unwrap(), CityTier::Custom);
    }

    #[test]
    fn unknown_tier_is_rejected() {
        assert_eq!(
            "tier9".parse::<CityTier>(),
            Err(ParamError::UnknownTier("tier9".to_string()))
        );
    }

    #[test]
    fn default_coincides_with_tier2_expansion() {
        let preset = resolve_preset(CityTier::Tier2).unwrap();
        let expanded = OperatingParameters::from_preset(CityTier::Tier2, &preset);
        assert_eq!(OperatingParameters::default(), expanded);
    }

    #[test]
    fn overrides_apply_over_preset_defaults() {
        let mut form = ParameterOverrides::default();
        assert!(form.set("price", "27.5".to_string()));
        assert!(form.set("orders", "120".to_string()));
        let params = form.resolve(CityTier::Tier2).unwrap();
        assert_eq!(params.unit_price, Decimal::new(275, 1));
        assert_eq!(params.daily_orders, 120);
        // untouched fields keep the preset values
        assert_eq!(params.monthly_rent, Decimal::new(15_000, 0));
        assert_eq!(params.city, CityTier::Tier2);
    }

    #[test]
    fn cost_rate_is_entered_as_a_percentage() {
        let mut form = ParameterOverrides::default();
        assert!(form.set("cost_rate", "45".to_string()));
        let params = form.resolve(CityTier::Tier2).unwrap();
        assert_eq!(params.direct_cost_ratio, Decimal::new(45, 2));
    }

    #[test]
    fn non_numeric_field_is_rejected_with_its_name() {
        let mut form = ParameterOverrides::default();
        assert!(form.set("price", "abc".to_string()));
        assert_eq!(
            form.resolve(CityTier::Tier2),
            Err(ParamError::InvalidNumericInput {
                field: "price",
                value: "abc".to_string(),
            })
        );
    }

    #[test]
    fn fractional_order_count_is_rejected() {
        let mut form = ParameterOverrides::default();
        assert!(form.set("orders", "12.5".to_string()));
        assert!(matches!(
            form.resolve(CityTier::Tier2),
            Err(ParamError::InvalidNumericInput { field: "orders", .. })
        ));
    }

    #[test]
    fn unknown_field_key_is_reported() {
        let mut form = ParameterOverrides::default();
        assert!(!form.set("salary", "100".to_string()));
    }

    #[test]
    fn custom_tier_resolves_from_form_defaults() {
        let params = ParameterOverrides::default()
            .resolve(CityTier::Custom)
            .unwrap();
        assert_eq!(params.city, CityTier::Custom);
        assert_eq!(params.unit_price, Decimal::new(25, 0));
        assert_eq!(params.business_days, DEFAULT_BUSINESS_DAYS);
    }

    #[test]
    fn serde_uses_the_short_history_field_names() {
        let params = OperatingParameters::default();
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"price\""));
        assert!(json.contains("\"cost_rate\""));
        assert!(json.contains("\"city\":\"tier2\""));
        let back: OperatingParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    proptest! {
        #[test]
        fn typed_fields_roundtrip_through_the_form(cents in 0i64..10_000_000, orders in 0u64..1_000_000) {
            let price = Decimal::new(cents, 2);
            let mut form = ParameterOverrides::default();
            form.set("price", price.to_string());
            form.set("orders", orders.to_string());
            let params = form.resolve(CityTier::Tier3).unwrap();
            prop_assert_eq!(params.unit_price, price);
            prop_assert_eq!(params.daily_orders, orders);
        }

        #[test]
        fn percentage_entry_scales_down_by_one_hundred(pct in 0u32..=200) {
            let mut form = ParameterOverrides::default();
            form.set("cost_rate", pct.to_string());
            let params = form.resolve(CityTier::Tier1).unwrap();
            prop_assert_eq!(params.direct_cost_ratio * Decimal::ONE_HUNDRED, Decimal::from(pct));
        }
    }
}

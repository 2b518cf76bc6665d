//! Adjustment parameters and the slider ranges the UI layer applies to them

use serde::{Deserialize, Serialize};

/// Sales decline rate treated as "no change" by the scenario model
pub const NEUTRAL_SALES_DECLINE: i32 = 15;

/// The three user-supplied percentages
///
/// The model accepts any values. Its formula is meaningful for
/// `sales_decline <= 115`, `mileage_change >= -100` and
/// `survival_boost >= -100`; past those edges the matching factor is held
/// at zero. Slider ranges belong to whoever owns the input controls (see
/// `SliderBounds`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdjustmentParams {
    /// Yearly decline in new diesel sales, percent
    pub sales_decline: i32,
    /// Yearly change in miles driven per vehicle, percent (signed)
    pub mileage_change: i32,
    /// Flat change in fleet survival, percent (signed)
    pub survival_boost: i32,
}

impl AdjustmentParams {
    /// Parameters that reproduce the base series exactly
    pub const NEUTRAL: AdjustmentParams = AdjustmentParams {
        sales_decline: NEUTRAL_SALES_DECLINE,
        mileage_change: 0,
        survival_boost: 0,
    };

    pub fn new(sales_decline: i32, mileage_change: i32, survival_boost: i32) -> Self {
        Self {
            sales_decline,
            mileage_change,
            survival_boost,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Inclusive integer range with a default position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

impl ParamRange {
    pub const fn new(min: i32, max: i32, default: i32) -> Self {
        Self { min, max, default }
    }

    /// Clamp a requested value into the range.
    ///
    /// A range whose bounds are swapped is read as `[max, min]` so this
    /// never panics on a bad config.
    pub fn clamp(&self, value: i32) -> i32 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        value.clamp(lo, hi)
    }

    pub fn contains(&self, value: i32) -> bool {
        self.clamp(value) == value
    }
}

/// Slider ranges for the three adjustment inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderBounds {
    pub sales_decline: ParamRange,
    pub mileage_change: ParamRange,
    pub survival_boost: ParamRange,
}

impl SliderBounds {
    pub fn defaults(&self) -> AdjustmentParams {
        AdjustmentParams {
            sales_decline: self.sales_decline.clamp(self.sales_decline.default),
            mileage_change: self.mileage_change.clamp(self.mileage_change.default),
            survival_boost: self.survival_boost.clamp(self.survival_boost.default),
        }
    }

    /// Clamp every field of `params` into its slider range
    pub fn clamp(&self, params: AdjustmentParams) -> AdjustmentParams {
        AdjustmentParams {
            sales_decline: self.sales_decline.clamp(params.sales_decline),
            mileage_change: self.mileage_change.clamp(params.mileage_change),
            survival_boost: self.survival_boost.clamp(params.survival_boost),
        }
    }
}

impl Default for SliderBounds {
    fn default() -> Self {
        Self {
            sales_decline: ParamRange::new(0, 40, NEUTRAL_SALES_DECLINE),
            mileage_change: ParamRange::new(-10, 10, 0),
            survival_boost: ParamRange::new(-20, 20, 0),
        }
    }
}

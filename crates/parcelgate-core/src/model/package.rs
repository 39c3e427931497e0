// ── Package domain type ──
//
// Weight and dimensions are stored in grams and centimetres whatever unit
// system the caller used; `units` remembers that system because the rate
// request quotes in the same one.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const GRAMS_PER_OUNCE: f64 = 28.349_523_125;
const GRAMS_PER_POUND: f64 = 453.592_37;
const CENTIMETRES_PER_INCH: f64 = 2.54;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// Ounces and inches.
    Imperial,
    /// Grams and centimetres.
    #[default]
    Metric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Length,
    Width,
    Height,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Length, Axis::Width, Axis::Height];

    fn index(self) -> usize {
        match self {
            Self::Length => 0,
            Self::Width => 1,
            Self::Height => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageOptions {
    /// Dry ice packed inside this parcel, in grams.
    pub dry_ice_grams: Option<f64>,
}

/// A physical parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    grams: f64,
    /// Length, width, height in centimetres.
    centimetres: [f64; 3],
    units: UnitSystem,
    /// Declared value in minor currency units.
    pub value: Option<i64>,
    pub currency: Option<String>,
    #[serde(default)]
    pub options: PackageOptions,
}

impl Package {
    /// Create a package from a weight and `[length, width, height]` in the
    /// given unit system (ounces + inches, or grams + centimetres).
    pub fn new(weight: f64, dimensions: [f64; 3], units: UnitSystem) -> Result<Self, CoreError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(CoreError::validation(
                "weight",
                format!("must be a non-negative number, got {weight}"),
            ));
        }
        if dimensions.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(CoreError::validation(
                "dimensions",
                format!("must be non-negative numbers, got {dimensions:?}"),
            ));
        }

        let (grams, centimetres) = match units {
            UnitSystem::Imperial => (
                weight * GRAMS_PER_OUNCE,
                dimensions.map(|d| d * CENTIMETRES_PER_INCH),
            ),
            UnitSystem::Metric => (weight, dimensions),
        };

        Ok(Self {
            grams,
            centimetres,
            units,
            value: None,
            currency: None,
            options: PackageOptions::default(),
        })
    }

    pub fn with_value(mut self, value: i64, currency: impl Into<String>) -> Self {
        self.value = Some(value);
        self.currency = Some(currency.into());
        self
    }

    /// Dry ice weight, given in the package's own unit system.
    pub fn with_dry_ice(mut self, weight: f64) -> Self {
        let grams = match self.units {
            UnitSystem::Imperial => weight * GRAMS_PER_OUNCE,
            UnitSystem::Metric => weight,
        };
        self.options.dry_ice_grams = Some(grams);
        self
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn is_imperial(&self) -> bool {
        self.units == UnitSystem::Imperial
    }

    pub fn grams(&self) -> f64 {
        self.grams
    }

    pub fn kilograms(&self) -> f64 {
        self.grams / 1000.0
    }

    pub fn pounds(&self) -> f64 {
        self.grams / GRAMS_PER_POUND
    }

    pub fn centimetres(&self, axis: Axis) -> f64 {
        self.centimetres[axis.index()]
    }

    pub fn inches(&self, axis: Axis) -> f64 {
        self.centimetres[axis.index()] / CENTIMETRES_PER_INCH
    }

    /// Dry ice weight in kilograms, if any.
    pub fn dry_ice_kilograms(&self) -> Option<f64> {
        self.options.dry_ice_grams.map(|g| g / 1000.0)
    }
}

//! Shared nutrition data structure
//!
//! Used by extracted product rows, scaled calculator items, and totals.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::nutrient::{Nutrient, NUTRIENT_COUNT};

/// One value per [`Nutrient`], per 100 g unless scaled
///
/// Serializes as a flat map keyed by the `_100g` nutrient keys, in
/// [`Nutrient::ALL`] order. Keys missing on input read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NutrientValues {
    values: [f64; NUTRIENT_COUNT],
}

impl NutrientValues {
    /// Create a new set with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.values[nutrient.index()]
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        self.values[nutrient.index()] = value;
    }

    #[cfg(test)]
    pub(crate) fn with(mut self, nutrient: Nutrient, value: f64) -> Self {
        self.set(nutrient, value);
        self
    }

    /// Iterate `(nutrient, value)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL.iter().map(move |n| (*n, self.get(*n)))
    }

    /// Scale every value by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        let mut values = self.values;
        for v in values.iter_mut() {
            *v *= multiplier;
        }
        Self { values }
    }

    /// Add another set to this one, key by key
    pub fn add(&self, other: &NutrientValues) -> Self {
        let mut values = self.values;
        for (v, o) in values.iter_mut().zip(other.values.iter()) {
            *v += o;
        }
        Self { values }
    }

    /// Round every value to two decimal places for display
    pub fn rounded(&self) -> Self {
        let mut values = self.values;
        for v in values.iter_mut() {
            *v = round2(*v);
        }
        Self { values }
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl std::ops::Add for NutrientValues {
    type Output = NutrientValues;

    fn add(self, other: NutrientValues) -> NutrientValues {
        NutrientValues::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for NutrientValues {
    type Output = NutrientValues;

    fn mul(self, multiplier: f64) -> NutrientValues {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for NutrientValues {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientValues::zero(), |acc, n| acc + n)
    }
}

impl Serialize for NutrientValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(NUTRIENT_COUNT))?;
        for (nutrient, value) in self.iter() {
            map.serialize_entry(nutrient.key(), &value)?;
        }
        map.end()
    }
}

struct NutrientValuesVisitor;

impl<'de> Visitor<'de> for NutrientValuesVisitor {
    type Value = NutrientValues;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of nutrient keys to numbers")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut values = NutrientValues::zero();
        while let Some(key) = access.next_key::<String>()? {
            match Nutrient::from_key(&key) {
                Some(nutrient) => {
                    let value: Option<f64> = access.next_value()?;
                    values.set(nutrient, value.unwrap_or(0.0));
                }
                None => {
                    access.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(values)
    }
}

impl<'de> Deserialize<'de> for NutrientValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NutrientValuesVisitor)
    }
}

//! Build-time configuration: load factor and default return value.

use crate::error::{Error, Result};
use crate::primitive::Primitive;

/// Ratio of entries to slots used to size the table. Always in `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadFactor(f32);

impl LoadFactor {
    pub const DEFAULT: LoadFactor = LoadFactor(0.75);
    pub const FAST: LoadFactor = LoadFactor(0.5);
    pub const VERY_FAST: LoadFactor = LoadFactor(0.25);

    /// Validates `f`; NaN and the closed ends of the interval are rejected.
    pub fn new(f: f32) -> Result<Self> {
        if f > 0.0 && f < 1.0 {
            Ok(LoadFactor(f))
        } else {
            Err(Error::LoadFactor(f))
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for LoadFactor {
    fn default() -> Self {
        LoadFactor::DEFAULT
    }
}

impl TryFrom<f32> for LoadFactor {
    type Error = Error;

    fn try_from(f: f32) -> Result<Self> {
        LoadFactor::new(f)
    }
}

/// Options applied when building a map.
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions<V> {
    pub load_factor: LoadFactor,
    /// Value `get` returns for absent keys.
    pub default_value: V,
}

impl<V: Primitive> BuildOptions<V> {
    pub fn new() -> Self {
        Self {
            load_factor: LoadFactor::DEFAULT,
            default_value: V::ZERO,
        }
    }

    pub fn load_factor(mut self, load_factor: LoadFactor) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn default_value(mut self, value: V) -> Self {
        self.default_value = value;
        self
    }
}

impl<V: Primitive> Default for BuildOptions<V> {
    fn default() -> Self {
        Self::new()
    }
}

// Copyright (c) 2026 Adrian Robinson. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Configuration for tables and benchmark sweeps.
//!
//! Every struct deserializes from JSON with per-field defaults, so a config
//! file only needs to name the values it overrides.

use crate::traits::StructureError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the path of a JSON [`BenchConfig`].
pub const CONFIG_ENV_VAR: &str = "STRUCTURE_BENCH_CONFIG";

/// Default maximum load factor for the open-addressed table.
pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 2.0 / 3.0;

/// Construction parameters for the hash tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub max_load_factor: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), StructureError> {
        if self.initial_capacity == 0 {
            return Err(StructureError::InvalidCapacity(
                "initial capacity must be at least 1".to_string(),
            ));
        }
        validate_load_factor(self.max_load_factor)
    }
}

/// Checks that a load factor threshold lies in (0, 1].
pub fn validate_load_factor(value: f32) -> Result<(), StructureError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(StructureError::InvalidLoadFactor(value))
    }
}

/// One quantitative benchmark axis.
///
/// A linear axis advances by adding `step`, a logarithmic one by
/// multiplying with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sweep {
    pub min: usize,
    pub max: usize,
    pub step: usize,
    #[serde(default)]
    pub log: bool,
}

impl Sweep {
    pub const fn linear(min: usize, max: usize, step: usize) -> Self {
        Self {
            min,
            max,
            step,
            log: false,
        }
    }

    pub const fn log(min: usize, max: usize, factor: usize) -> Self {
        Self {
            min,
            max,
            step: factor,
            log: true,
        }
    }

    pub fn validate(&self) -> Result<(), StructureError> {
        if self.step == 0 {
            return Err(StructureError::InvalidInput("sweep step must be non-zero".into()));
        }
        if self.min > self.max {
            return Err(StructureError::InvalidInput(format!(
                "sweep min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if self.log && (self.min == 0 || self.step < 2) {
            return Err(StructureError::InvalidInput(
                "log sweep needs min >= 1 and factor >= 2".into(),
            ));
        }
        Ok(())
    }

    /// All points on the axis, in increasing order.
    ///
    /// An invalid sweep yields no points.
    pub fn points(&self) -> Vec<usize> {
        if self.validate().is_err() {
            return Vec::new();
        }
        let mut points = Vec::new();
        let mut current = self.min;
        while current <= self.max {
            points.push(current);
            let next = if self.log {
                current.checked_mul(self.step)
            } else {
                current.checked_add(self.step)
            };
            match next {
                Some(n) => current = n,
                None => break,
            }
        }
        points
    }
}

/// Sweeps and seed for every benchmark group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub hashtable: Sweep,
    pub charset: Sweep,
    pub matrix: Sweep,
    pub graph: Sweep,
    pub queue: Sweep,
    pub table: TableConfig,
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            hashtable: Sweep::linear(1000, 10000, 1000),
            charset: Sweep::linear(1000, 10000, 1000),
            matrix: Sweep::linear(10, 100, 10),
            graph: Sweep::log(1024, 4096, 4),
            queue: Sweep::log(4, 2000, 4),
            table: TableConfig::default(),
            seed: 0x5eed,
        }
    }
}

impl BenchConfig {
    pub fn from_json_str(json: &str) -> Result<Self, StructureError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| StructureError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StructureError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            StructureError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when unset.
    pub fn from_env() -> Result<Self, StructureError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                tracing::debug!(path = ?path, "loading bench config");
                Self::from_path(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), StructureError> {
        for sweep in [
            &self.hashtable,
            &self.charset,
            &self.matrix,
            &self.graph,
            &self.queue,
        ] {
            sweep.validate()?;
        }
        self.table.validate()
    }
}

// Copyright 2024 Mikael Lund
//
// Licensed under the Apache license, version 2.0 (the "license");
// you may not use this file except in compliance with the license.
// You may obtain a copy of the license at
//
//     http://www.apache.org/licenses/license-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the license is distributed on an "as is" basis,
// without warranties or conditions of any kind, either express or implied.
// See the license for the specific language governing permissions and
// limitations under the license.

//! ## Twobody interactions
//!
//! Pair potentials that depend only on the distance between two particles.
//!
//! - [`Potential`] is implemented by every pair potential.
//! - [`RangeSeparated`] is implemented, in addition, by potentials that can be split
//!   into a short-ranged and a long-ranged part, 𝑉(𝑟) = 𝑉ₛᵣ(𝑟) + 𝑉ₗᵣ(𝑟).

use dyn_clone::DynClone;
use ndarray::{Array1, ArrayView1};
#[cfg(feature = "serde")]
use serde::Serialize;
use std::fmt::Debug;

mod powerlaw;
pub use self::powerlaw::InversePowerLaw;

/// Errors from evaluating a pair potential
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PotentialError {
    /// The potential does not provide the requested evaluator
    #[error("`{operation}` is not implemented for {potential}")]
    NotImplemented {
        operation: &'static str,
        potential: &'static str,
    },
}

impl PotentialError {
    fn not_implemented<T: ?Sized>(operation: &'static str) -> Self {
        Self::NotImplemented {
            operation,
            potential: std::any::type_name::<T>(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PotentialError>;

/// Potential energy between a pair of particles, 𝑉(𝑟)
///
/// Implementors override [`Potential::from_distance`] and optionally
/// [`Potential::from_distance_squared`] if a direct formula in 𝑟² exists.
/// A potential that overrides neither fails with [`PotentialError::NotImplemented`].
pub trait Potential: DynClone + Debug + Send + Sync {
    /// Pair potential at distance 𝑟
    fn from_distance(&self, _distance: f64) -> Result<f64> {
        Err(PotentialError::not_implemented::<Self>("from_distance"))
    }

    /// Pair potential at squared distance 𝑟²
    ///
    /// The default implementation takes the square root and calls [`Potential::from_distance`].
    fn from_distance_squared(&self, distance_squared: f64) -> Result<f64> {
        self.from_distance(distance_squared.sqrt())
    }

    /// Pair potential for each distance in `distances`
    fn evaluate_by_distance(&self, distances: ArrayView1<f64>) -> Result<Array1<f64>> {
        distances.iter().map(|&r| self.from_distance(r)).collect()
    }

    /// Pair potential for each squared distance in `distances_squared`
    fn evaluate_by_squared_distance(
        &self,
        distances_squared: ArrayView1<f64>,
    ) -> Result<Array1<f64>> {
        distances_squared
            .iter()
            .map(|&r2| self.from_distance_squared(r2))
            .collect()
    }
}

dyn_clone::clone_trait_object!(Potential);

/// Pair potential split into short- and long-ranged parts, 𝑉(𝑟) = 𝑉ₛᵣ(𝑟) + 𝑉ₗᵣ(𝑟)
///
/// The short-ranged part is summed directly in real space while the long-ranged part
/// is handled in reciprocal space via its Fourier transform, 𝑉ₗᵣ(𝑘²).
/// The real-space long-ranged part is used to subtract interior contributions.
///
/// Implementing the split does not define the full potential: the [`Potential`]
/// methods keep their defaults and return [`PotentialError::NotImplemented`].
/// Either wrap the type in [`SplitSum`], or let [`Potential::from_distance`]
/// delegate to [`RangeSeparated::split_sum_from_distance`] when there is no
/// fused formula for the full potential.
pub trait RangeSeparated: Potential {
    /// Short-ranged part at distance 𝑟
    fn short_range_from_distance(&self, _distance: f64) -> Result<f64> {
        Err(PotentialError::not_implemented::<Self>(
            "short_range_from_distance",
        ))
    }

    /// Long-ranged part at distance 𝑟
    fn long_range_from_distance(&self, _distance: f64) -> Result<f64> {
        Err(PotentialError::not_implemented::<Self>(
            "long_range_from_distance",
        ))
    }

    /// Fourier transform of the long-ranged part at squared wave-vector length 𝑘²
    fn long_range_from_k_squared(&self, _k_squared: f64) -> Result<f64> {
        Err(PotentialError::not_implemented::<Self>(
            "long_range_from_k_squared",
        ))
    }

    /// Full potential recovered from the split, 𝑉ₛᵣ(𝑟) + 𝑉ₗᵣ(𝑟)
    fn split_sum_from_distance(&self, distance: f64) -> Result<f64> {
        Ok(self.short_range_from_distance(distance)? + self.long_range_from_distance(distance)?)
    }

    /// Short-ranged part for each distance in `distances`
    fn short_range_by_distance(&self, distances: ArrayView1<f64>) -> Result<Array1<f64>> {
        distances
            .iter()
            .map(|&r| self.short_range_from_distance(r))
            .collect()
    }

    /// Long-ranged part for each distance in `distances`
    fn long_range_by_distance(&self, distances: ArrayView1<f64>) -> Result<Array1<f64>> {
        distances
            .iter()
            .map(|&r| self.long_range_from_distance(r))
            .collect()
    }

    /// Fourier-transformed long-ranged part for each squared wave-vector length
    fn long_range_by_squared_wavevector(
        &self,
        k_squared: ArrayView1<f64>,
    ) -> Result<Array1<f64>> {
        k_squared
            .iter()
            .map(|&k2| self.long_range_from_k_squared(k2))
            .collect()
    }
}

dyn_clone::clone_trait_object!(RangeSeparated);

/// Full potential of a range-separated potential taken as the sum of its parts
///
/// Use this for range-separated potentials that have no fused expression for the
/// full interaction.
///
/// # Examples
/// ~~~
/// use rangesplit::twobody::*;
/// let ipl = InversePowerLaw::new(2.0, 0.8);
/// let split = SplitSum::new(ipl.clone());
/// let (direct, summed) = (ipl.from_distance(1.3).unwrap(), split.from_distance(1.3).unwrap());
/// assert!((direct - summed).abs() < 1e-12);
/// ~~~
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SplitSum<T>(T);

impl<T: RangeSeparated + Clone> SplitSum<T> {
    pub fn new(potential: T) -> Self {
        Self(potential)
    }
    /// The wrapped range-separated potential
    pub fn inner(&self) -> &T {
        &self.0
    }
}

impl<T: RangeSeparated + Clone> Potential for SplitSum<T> {
    fn from_distance(&self, distance: f64) -> Result<f64> {
        self.0.split_sum_from_distance(distance)
    }
    fn from_distance_squared(&self, distance_squared: f64) -> Result<f64> {
        self.0.split_sum_from_distance(distance_squared.sqrt())
    }
}

/// Sum of two pair potentials
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Combined<T, U>(T, U);

impl<T: Potential + Clone, U: Potential + Clone> Combined<T, U> {
    pub fn new(t: T, u: U) -> Self {
        Self(t, u)
    }
}

impl<T: Potential + Clone, U: Potential + Clone> Potential for Combined<T, U> {
    #[inline]
    fn from_distance(&self, distance: f64) -> Result<f64> {
        Ok(self.0.from_distance(distance)? + self.1.from_distance(distance)?)
    }
    #[inline]
    fn from_distance_squared(&self, distance_squared: f64) -> Result<f64> {
        Ok(self.0.from_distance_squared(distance_squared)?
            + self.1.from_distance_squared(distance_squared)?)
    }
}

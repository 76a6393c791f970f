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

//! # Rangesplit
//!
//! Range-separated pair potentials for Ewald-type summation.
//!
//! The central object is the inverse power-law potential, $1/r^p$, split at a
//! length scale $\sigma$ into a short-ranged part evaluated in real space and a
//! long-ranged part whose Fourier transform is handed to a reciprocal-space solver:
//!
//! $$ \frac{1}{r^p} = V_{\mathrm{SR}}(r) + V_{\mathrm{LR}}(r) $$
//!
//! ## Examples
//! ~~~
//! use rangesplit::twobody::*;
//! use ndarray::array;
//! let coulomb = InversePowerLaw::new(1.0, 1.0);
//! let r = array![1.0];
//! let full = coulomb.evaluate_by_distance(r.view()).unwrap();
//! let sr = coulomb.short_range_by_distance(r.view()).unwrap();
//! let lr = coulomb.long_range_by_distance(r.view()).unwrap();
//! assert_eq!(full[0], 1.0);
//! assert!((sr[0] + lr[0] - full[0]).abs() < 1e-12);
//! ~~~
//!
//! Before any evaluation, user supplied arrays can be checked for consistent shape,
//! precision, and device with the [`validation`] gate.

#[cfg(test)]
extern crate approx;

/// A point in 3D space
pub type Vector3 = nalgebra::Vector3<f64>;
/// A stack-allocated 3x3 square matrix
pub type Matrix3 = nalgebra::Matrix3<f64>;

pub mod kspace;
pub mod math;
pub mod twobody;
pub mod validation;

pub use kspace::{KSpaceFilter, KSpaceKernel, MeshInterpolator, WaveVectorGenerator};
pub use twobody::{InversePowerLaw, Potential, PotentialError, RangeSeparated};
pub use validation::{validate_parameters, Device, Dtype, Tensor, ValidationError};

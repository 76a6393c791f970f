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

//! # Reciprocal space
//!
//! Interfaces to the parts of a mesh-based Ewald solver that surround the pair
//! potential: wave-vector generation, filtering of a density in reciprocal space, and
//! interpolation between particles and a regular mesh.
//! The only link to the potentials is [`KSpaceKernel`], which every
//! [`RangeSeparated`] potential implements through its Fourier-transformed
//! long-ranged part.

use crate::twobody::{RangeSeparated, Result};
use crate::Matrix3;
use ndarray::{Array1, Array2, Array4, ArrayView1, ArrayView2, ArrayView4, ArrayViewMut1};

/// Generates the wave vectors of a reciprocal-space sum
pub trait WaveVectorGenerator {
    /// Squared lengths, |𝒌|², of the wave vectors for the given cell.
    ///
    /// The cell vectors are the rows of `cell`. The 𝒌 = 0 term may be included.
    fn squared_wavevectors(&self, cell: &Matrix3) -> Array1<f64>;
}

/// Reciprocal-space kernel used to filter a density
pub trait KSpaceKernel {
    /// Kernel value for each squared wave-vector length, 𝑘²
    fn kernel_from_k_squared(&self, k_squared: ArrayView1<f64>) -> Result<Array1<f64>>;
}

/// Any range-separated potential filters with its long-ranged part
impl<T: RangeSeparated + ?Sized> KSpaceKernel for T {
    fn kernel_from_k_squared(&self, k_squared: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.long_range_by_squared_wavevector(k_squared)
    }
}

/// Applies a [`KSpaceKernel`] to a density given in reciprocal space
pub trait KSpaceFilter {
    /// Scale `density` in place; element `i` belongs to the wave vector with
    /// squared length `k_squared[i]`.
    fn apply(
        &self,
        kernel: &dyn KSpaceKernel,
        k_squared: ArrayView1<f64>,
        density: ArrayViewMut1<f64>,
    ) -> Result<()>;
}

/// Maps point charges onto a regular mesh and mesh values back onto points
pub trait MeshInterpolator {
    /// Spread `charges` ([n_atoms, n_channels]) located at `positions`
    /// ([n_atoms, 3]) onto a mesh of shape [n_channels, nx, ny, nz].
    fn points_to_mesh(&self, positions: ArrayView2<f64>, charges: ArrayView2<f64>) -> Array4<f64>;

    /// Interpolate `mesh` ([n_channels, nx, ny, nz]) at `positions`, giving
    /// [n_atoms, n_channels].
    fn mesh_to_points(&self, positions: ArrayView2<f64>, mesh: ArrayView4<f64>) -> Array2<f64>;
}

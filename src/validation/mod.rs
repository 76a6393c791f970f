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

//! # Input validation
//!
//! Checks shape, precision, and device of the arrays entering a calculation
//! before any numerical work is done. All arrays of a calculation must share the
//! precision and device declared by the caller; nothing is converted implicitly.
//!
//! ## Examples
//! ~~~
//! use rangesplit::validation::*;
//! use ndarray::{array, Array2};
//! let positions = Tensor::from(array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
//! let charges = Tensor::from(array![[1.0], [-1.0]]);
//! let cell = Tensor::from(Array2::<f64>::eye(3) * 10.0);
//! let neighbor_indices = Tensor::from(array![[0i64, 1]]);
//! let neighbor_distances = Tensor::from(array![1.0]);
//! let context = ValidationContext {
//!     charges: &charges,
//!     cell: &cell,
//!     positions: &positions,
//!     neighbor_indices: &neighbor_indices,
//!     neighbor_distances: &neighbor_distances,
//!     dtype: Dtype::Float64,
//!     device: Device::Cpu,
//! };
//! assert!(context.validate(Some(1.0)).is_ok());
//! ~~~

mod tensor;
pub use tensor::{Device, Dtype, Element, Tensor, TensorData};

/// Classified violations of the input contract
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Precision differs from the declared precision
    #[error("type of `{name}` ({found}) must be same as the class type ({expected})")]
    TypeMismatch {
        name: &'static str,
        found: Dtype,
        expected: Dtype,
    },
    /// Array lives on another device than the declared one
    #[error("device of `{name}` ({found}) must be same as the class device ({expected})")]
    DeviceMismatch {
        name: &'static str,
        found: Device,
        expected: Device,
    },
    /// Rank or shape violates the documented layout
    #[error("`{name}` must be a tensor with shape {expected}, got tensor with shape {found:?}")]
    Shape {
        name: &'static str,
        expected: String,
        found: Vec<usize>,
    },
    /// Non-invertible cell while a smearing is requested
    #[error("provided `cell` has a determinant of 0 and therefore is not valid for periodic calculation")]
    DegenerateCell,
    #[error("unknown device `{0}`")]
    UnknownDevice(String),
}

/// Declared precision, falling back to the default (`float64`)
pub fn resolve_dtype(dtype: Option<Dtype>) -> Dtype {
    dtype.unwrap_or_default()
}

/// Declared device, falling back to the CPU
///
/// A bare `"cuda"` resolves to the first GPU, `cuda:0`.
pub fn resolve_device(device: Option<&str>) -> Result<Device, ValidationError> {
    device.map_or(Ok(Device::default()), str::parse)
}

/// Arrays entering a single calculation, plus the declared precision and device
#[derive(Clone, Copy, Debug)]
pub struct ValidationContext<'a> {
    /// Per-atom charges, [n_atoms, n_channels]
    pub charges: &'a Tensor,
    /// Unit cell, [3, 3]
    pub cell: &'a Tensor,
    /// Atom positions, [n_atoms, 3]
    pub positions: &'a Tensor,
    /// Atom index pairs, [n_neighbors, 2]
    pub neighbor_indices: &'a Tensor,
    /// Pair distances, [n_neighbors]
    pub neighbor_distances: &'a Tensor,
    pub dtype: Dtype,
    pub device: Device,
}

impl ValidationContext<'_> {
    /// Check all arrays; the first violated rule is returned.
    ///
    /// If a `smearing` is given, the cell must also be invertible as the range
    /// separation is meaningless for a degenerate cell.
    pub fn validate(&self, smearing: Option<f64>) -> Result<(), ValidationError> {
        log::trace!(
            "validating {} atoms and {} neighbor pairs ({}, {})",
            self.positions.shape().first().copied().unwrap_or_default(),
            self.neighbor_distances.shape().first().copied().unwrap_or_default(),
            self.dtype,
            self.device
        );
        self.check_positions()?;
        log::trace!("positions ok");
        self.check_cell(smearing)?;
        log::trace!("cell ok");
        self.check_charges()?;
        log::trace!("charges ok");
        self.check_neighbors()?;
        log::debug!("input validation passed");
        Ok(())
    }

    fn check_dtype(&self, name: &'static str, tensor: &Tensor) -> Result<(), ValidationError> {
        if tensor.dtype() != self.dtype {
            return Err(ValidationError::TypeMismatch {
                name,
                found: tensor.dtype(),
                expected: self.dtype,
            });
        }
        Ok(())
    }

    fn check_device(&self, name: &'static str, tensor: &Tensor) -> Result<(), ValidationError> {
        if tensor.device() != self.device {
            return Err(ValidationError::DeviceMismatch {
                name,
                found: tensor.device(),
                expected: self.device,
            });
        }
        Ok(())
    }

    fn check_positions(&self) -> Result<(), ValidationError> {
        self.check_dtype("positions", self.positions)?;
        self.check_device("positions", self.positions)?;
        if !matches!(self.positions.shape(), [_, 3]) {
            return Err(shape_error("positions", "[n_atoms, 3]", self.positions));
        }
        Ok(())
    }

    fn check_cell(&self, smearing: Option<f64>) -> Result<(), ValidationError> {
        if self.cell.shape() != [3, 3] {
            return Err(shape_error("cell", "[3, 3]", self.cell));
        }
        self.check_dtype("cell", self.cell)?;
        self.check_device("cell", self.cell)?;
        if smearing.is_some() {
            let determinant = self.cell.to_matrix3().map(|cell| cell.determinant());
            if determinant == Some(0.0) {
                return Err(ValidationError::DegenerateCell);
            }
        }
        Ok(())
    }

    fn check_charges(&self) -> Result<(), ValidationError> {
        let num_atoms = self.positions.shape()[0];
        match self.charges.shape() {
            [n, _] if *n == num_atoms => {}
            [_, _] => {
                let expected = format!("[n_atoms, n_channels] with n_atoms = {num_atoms}");
                return Err(shape_error("charges", expected, self.charges));
            }
            _ => return Err(shape_error("charges", "[n_atoms, n_channels]", self.charges)),
        }
        self.check_dtype("charges", self.charges)?;
        self.check_device("charges", self.charges)?;
        Ok(())
    }

    fn check_neighbors(&self) -> Result<(), ValidationError> {
        let num_neighbors = match self.neighbor_indices.shape() {
            [m, 2] => *m,
            _ => {
                return Err(shape_error(
                    "neighbor_indices",
                    "[n_neighbors, 2]",
                    self.neighbor_indices,
                ))
            }
        };
        self.check_device("neighbor_indices", self.neighbor_indices)?;
        if self.neighbor_distances.shape() != [num_neighbors] {
            let expected = format!("[n_neighbors] with n_neighbors = {num_neighbors}");
            return Err(shape_error(
                "neighbor_distances",
                expected,
                self.neighbor_distances,
            ));
        }
        self.check_device("neighbor_distances", self.neighbor_distances)?;
        self.check_dtype("neighbor_distances", self.neighbor_distances)?;
        Ok(())
    }
}

fn shape_error(
    name: &'static str,
    expected: impl Into<String>,
    tensor: &Tensor,
) -> ValidationError {
    ValidationError::Shape {
        name,
        expected: expected.into(),
        found: tensor.shape().to_vec(),
    }
}

/// Check the inputs of a calculation; see [`ValidationContext::validate`].
#[allow(clippy::too_many_arguments)]
pub fn validate_parameters(
    charges: &Tensor,
    cell: &Tensor,
    positions: &Tensor,
    neighbor_indices: &Tensor,
    neighbor_distances: &Tensor,
    smearing: Option<f64>,
    dtype: Dtype,
    device: Device,
) -> Result<(), ValidationError> {
    ValidationContext {
        charges,
        cell,
        positions,
        neighbor_indices,
        neighbor_distances,
        dtype,
        device,
    }
    .validate(smearing)
}

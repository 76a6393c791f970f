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

//! Arrays tagged with element precision and execution device.

use super::ValidationError;
use crate::Matrix3;
use ndarray::{Array, ArrayD, Dimension};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Numeric precision of the elements of a [`Tensor`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "lowercase")
)]
pub enum Dtype {
    Float32,
    /// Default precision
    #[default]
    Float64,
    Int32,
    Int64,
}

impl Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
        };
        write!(f, "{name}")
    }
}

/// Memory space where the elements of a [`Tensor`] live
///
/// A bare `"cuda"` is parsed as the first GPU so that it compares equal to
/// tensors placed on `"cuda:0"`.
///
/// # Examples
/// ~~~
/// use rangesplit::validation::Device;
/// assert_eq!("cuda".parse::<Device>().unwrap(), Device::Cuda(0));
/// assert_eq!("cuda:2".parse::<Device>().unwrap(), Device::Cuda(2));
/// assert_eq!("cpu".parse::<Device>().unwrap(), Device::Cpu);
/// assert!("tpu".parse::<Device>().is_err());
/// ~~~
///
/// (De)serialized with the same spelling, e.g. `"cuda:0"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(into = "String", try_from = "String")
)]
pub enum Device {
    #[default]
    Cpu,
    /// GPU with the given index
    Cuda(usize),
}

impl Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda(index) => write!(f, "cuda:{index}"),
        }
    }
}

impl From<Device> for String {
    fn from(device: Device) -> Self {
        device.to_string()
    }
}

impl TryFrom<String> for Device {
    type Error = ValidationError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Device {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ValidationError::UnknownDevice(s.to_string());
        match s.trim().to_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "cuda" => Ok(Self::Cuda(0)),
            other => other
                .strip_prefix("cuda:")
                .and_then(|index| index.parse().ok())
                .map(Self::Cuda)
                .ok_or_else(unknown),
        }
    }
}

/// Element storage of a [`Tensor`], one variant per [`Dtype`]
#[derive(Clone, Debug, PartialEq)]
pub enum TensorData {
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
}

/// Element types that can be stored in a [`Tensor`]
pub trait Element: Clone + 'static {
    const DTYPE: Dtype;
    /// Wrap an array of this element type
    fn into_data(array: ArrayD<Self>) -> TensorData;
}

macro_rules! impl_element {
    ($type:ty, $variant:ident) => {
        impl Element for $type {
            const DTYPE: Dtype = Dtype::$variant;
            fn into_data(array: ArrayD<Self>) -> TensorData {
                TensorData::$variant(array)
            }
        }
    };
}

impl_element!(f32, Float32);
impl_element!(f64, Float64);
impl_element!(i32, Int32);
impl_element!(i64, Int64);

/// An n-dimensional array together with its precision and device
///
/// # Examples
/// ~~~
/// use rangesplit::validation::{Device, Dtype, Tensor};
/// use ndarray::array;
/// let positions = Tensor::from(array![[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0]]);
/// assert_eq!(positions.shape(), &[2, 3]);
/// assert_eq!(positions.dtype(), Dtype::Float32);
/// assert_eq!(positions.to_device(Device::Cuda(1)).device(), Device::Cuda(1));
/// ~~~
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    data: TensorData,
    device: Device,
}

impl Tensor {
    /// Tensor on the CPU
    pub fn new(data: TensorData) -> Self {
        Self {
            data,
            device: Device::Cpu,
        }
    }

    /// Same elements, tagged as living on `device`
    pub fn to_device(self, device: Device) -> Self {
        Self { device, ..self }
    }

    pub const fn data(&self) -> &TensorData {
        &self.data
    }

    pub fn shape(&self) -> &[usize] {
        match &self.data {
            TensorData::Float32(a) => a.shape(),
            TensorData::Float64(a) => a.shape(),
            TensorData::Int32(a) => a.shape(),
            TensorData::Int64(a) => a.shape(),
        }
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub const fn dtype(&self) -> Dtype {
        match self.data {
            TensorData::Float32(_) => Dtype::Float32,
            TensorData::Float64(_) => Dtype::Float64,
            TensorData::Int32(_) => Dtype::Int32,
            TensorData::Int64(_) => Dtype::Int64,
        }
    }

    pub const fn device(&self) -> Device {
        self.device
    }

    /// Elements in logical (row-major) order, widened to `f64`
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match &self.data {
            TensorData::Float32(a) => a.iter().map(|&x| f64::from(x)).collect(),
            TensorData::Float64(a) => a.iter().copied().collect(),
            TensorData::Int32(a) => a.iter().map(|&x| f64::from(x)).collect(),
            TensorData::Int64(a) => a.iter().map(|&x| x as f64).collect(),
        }
    }

    /// Interpret a 3×3 tensor as a matrix; `None` for any other shape
    pub fn to_matrix3(&self) -> Option<Matrix3> {
        (self.shape() == [3, 3]).then(|| Matrix3::from_row_slice(&self.to_f64_vec()))
    }
}

impl From<TensorData> for Tensor {
    fn from(data: TensorData) -> Self {
        Self::new(data)
    }
}

impl<A: Element, D: Dimension> From<Array<A, D>> for Tensor {
    fn from(array: Array<A, D>) -> Self {
        Self::new(A::into_data(array.into_dyn()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    #[test]
    fn test_dtype() {
        assert_eq!(Dtype::default(), Dtype::Float64);
        assert_eq!(Tensor::from(array![1i64, 2]).dtype(), Dtype::Int64);
        assert_eq!(Tensor::from(array![1i32]).dtype(), Dtype::Int32);
        assert_eq!(Tensor::from(array![[1.0f32]]).dtype(), Dtype::Float32);
        assert_eq!(Dtype::Float32.to_string(), "float32");
    }

    #[test]
    fn test_device() {
        assert_eq!(Device::default(), Device::Cpu);
        assert_eq!(Device::Cuda(0).to_string(), "cuda:0");
        assert_eq!(" CUDA:3 ".parse::<Device>().unwrap(), Device::Cuda(3));
        assert_eq!(
            "cuda:x".parse::<Device>(),
            Err(ValidationError::UnknownDevice("cuda:x".to_string()))
        );
        let tensor = Tensor::from(array![0.0]);
        assert_eq!(tensor.device(), Device::Cpu);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_device() {
        assert_eq!(serde_json::to_string(&Device::Cuda(1)).unwrap(), "\"cuda:1\"");
        assert_eq!(serde_json::to_string(&Device::Cpu).unwrap(), "\"cpu\"");
        let device: Device = serde_json::from_str("\"cuda\"").unwrap();
        assert_eq!(device, Device::Cuda(0));
        assert!(serde_json::from_str::<Device>("\"tpu\"").is_err());
        assert!(serde_json::from_str::<Device>("{\"Cuda\":0}").is_err());
        let dtype: Dtype = serde_json::from_str("\"float32\"").unwrap();
        assert_eq!(dtype, Dtype::Float32);
    }

    #[test]
    fn test_shape() {
        let tensor = Tensor::from(Array2::<f64>::zeros((5, 3)));
        assert_eq!(tensor.shape(), &[5, 3]);
        assert_eq!(tensor.ndim(), 2);
        assert_eq!(Tensor::from(ndarray::arr0(1.0)).ndim(), 0);
    }

    #[test]
    fn test_matrix3() {
        let cell = Tensor::from(array![[2, 1, 0], [0, 3, 0], [0, 0, 4]]);
        let matrix = cell.to_matrix3().unwrap();
        assert_eq!(matrix[(0, 1)], 1.0);
        assert_relative_eq!(matrix.determinant(), 24.0, epsilon = 1e-12);
        assert!(Tensor::from(Array2::<f64>::eye(2)).to_matrix3().is_none());
    }
}

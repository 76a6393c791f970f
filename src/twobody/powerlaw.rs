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

//! Range-separated inverse power-law potential.

use super::{Potential, RangeSeparated, Result};
use crate::math::{gamma, gamma_lr, gamma_ur};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Inverse power-law potential, $1/r^p$, split into short- and long-ranged parts
///
/// With the reduced distance $x = r^2 / 2\sigma^2$ and $a = p/2$, the split is
/// $$ V_{\mathrm{SR}}(r) = \frac{Q(a, x)}{(2\sigma^2)^a x^a}, \quad
///    V_{\mathrm{LR}}(r) = \frac{P(a, x)}{(2\sigma^2)^a x^a} $$
/// where $P$ and $Q$ are the lower and upper regularized incomplete Gamma functions.
/// Since $P + Q = 1$ the two parts add up to $1/r^p$ for any smearing, σ.
/// For the Coulomb potential ($p = 1$) this is the familiar erfc/erf split and
/// σ is the width of the Gaussian charge distribution.
///
/// The Fourier transform of the long-ranged part is, with $a' = (3 - p)/2$ and
/// $x = \sigma^2 k^2 / 2$,
/// $$ V_{\mathrm{LR}}(k^2) = \frac{\pi^{3/2}}{\Gamma(p/2)} (2\sigma^2)^{a'}
///    \frac{Q(a', x)\,\Gamma(a')}{x^{a'}} $$
/// and is set to zero at $k = 0$ which corresponds to a neutralizing background.
///
/// # Examples
/// ~~~
/// use rangesplit::twobody::*;
/// let (r, sigma) = (2.0, 1.0);
/// let coulomb = InversePowerLaw::new(1.0, sigma);
/// let u_sr = coulomb.short_range_from_distance(r).unwrap();
/// let u_lr = coulomb.long_range_from_distance(r).unwrap();
/// assert!((u_sr + u_lr - 0.5).abs() < 1e-12);
/// assert_eq!(coulomb.long_range_from_k_squared(0.0).unwrap(), 0.0);
/// ~~~
#[derive(Clone, Debug, PartialEq, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(try_from = "InversePowerLawBuilder")
)]
pub struct InversePowerLaw {
    /// Exponent, 𝑝
    exponent: f64,
    /// Smearing length, σ
    smearing: f64,
}

/// Unchecked parameters of an [`InversePowerLaw`], as read from input
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InversePowerLawBuilder {
    #[serde(alias = "p")]
    exponent: f64,
    #[serde(alias = "sigma", alias = "σ")]
    smearing: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<InversePowerLawBuilder> for InversePowerLaw {
    type Error = String;
    fn try_from(builder: InversePowerLawBuilder) -> core::result::Result<Self, Self::Error> {
        if !is_valid_smearing(builder.smearing) {
            return Err(format!(
                "smearing must be positive and finite, got {}",
                builder.smearing
            ));
        }
        Ok(Self::new(builder.exponent, builder.smearing))
    }
}

fn is_valid_smearing(smearing: f64) -> bool {
    smearing.is_finite() && smearing > 0.0
}

impl InversePowerLaw {
    /// Create a new 1/rᵖ potential split at the length scale `smearing`.
    ///
    /// # Panics
    /// If the smearing is not strictly positive and finite.
    pub fn new(exponent: f64, smearing: f64) -> Self {
        assert!(
            is_valid_smearing(smearing),
            "smearing must be positive and finite"
        );
        log::debug!("inverse power-law potential with p = {exponent}, σ = {smearing}");
        Self { exponent, smearing }
    }

    /// Plain Coulomb potential, 1/𝑟
    pub fn coulomb(smearing: f64) -> Self {
        Self::new(1.0, smearing)
    }

    /// Exponent, 𝑝
    pub const fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Smearing length, σ
    pub const fn smearing(&self) -> f64 {
        self.smearing
    }

    /// Twice the squared smearing, 2σ²
    #[inline(always)]
    fn two_sigma_squared(&self) -> f64 {
        2.0 * self.smearing * self.smearing
    }

    /// Reduced squared distance 𝑥 = 𝑟²/2σ² and real-space prefactor (2σ²)⁻ᵃ
    #[inline(always)]
    fn real_space_terms(&self, distance: f64) -> (f64, f64) {
        let two_sigma_squared = self.two_sigma_squared();
        let x = distance * distance / two_sigma_squared;
        let prefactor = two_sigma_squared.powf(-0.5 * self.exponent);
        (x, prefactor)
    }

    /// Radial force of the full potential, 𝐹(𝑟) = -d𝑉/d𝑟
    pub fn force(&self, distance: f64) -> f64 {
        self.exponent * distance.powf(-self.exponent - 1.0)
    }

    /// Radial force of the short-ranged part, -d𝑉ₛᵣ/d𝑟
    ///
    /// Using d𝑄(𝑎, 𝑥)/d𝑥 = -𝑥ᵃ⁻¹𝑒⁻ˣ/Γ(𝑎), the force has one term from the
    /// power law and one from the incomplete Gamma function.
    pub fn short_range_force(&self, distance: f64) -> f64 {
        let a = 0.5 * self.exponent;
        let x = distance * distance / self.two_sigma_squared();
        let power_law = distance.powf(-self.exponent);
        let gaussian = x.powf(a - 1.0) * (-x).exp() / gamma(a);
        self.force(distance) * gamma_ur(a, x)
            + power_law * gaussian * distance / (self.smearing * self.smearing)
    }

    /// Radial force of the long-ranged part, -d𝑉ₗᵣ/d𝑟
    pub fn long_range_force(&self, distance: f64) -> f64 {
        self.force(distance) - self.short_range_force(distance)
    }

    /// Derivative of the short-ranged part with respect to the smearing, d𝑉ₛᵣ/dσ
    ///
    /// Only 𝑄(𝑎, 𝑥) depends on σ and d𝑥/dσ = -2𝑥/σ, giving
    /// 2𝑟⁻ᵖ𝑥ᵃ𝑒⁻ˣ / (σΓ(𝑎)).
    pub fn short_range_smearing_derivative(&self, distance: f64) -> f64 {
        let a = 0.5 * self.exponent;
        let x = distance * distance / self.two_sigma_squared();
        2.0 * distance.powf(-self.exponent) * x.powf(a) * (-x).exp()
            / (self.smearing * gamma(a))
    }

    /// Derivative of the long-ranged part with respect to the smearing, d𝑉ₗᵣ/dσ
    ///
    /// The full potential is independent of σ so this is -d𝑉ₛᵣ/dσ.
    pub fn long_range_smearing_derivative(&self, distance: f64) -> f64 {
        -self.short_range_smearing_derivative(distance)
    }

    /// Prefactor π^(3/2)/Γ(𝑝/2) · (4/𝑘²)^𝑎' of the reciprocal-space part and 𝑥 = σ²𝑘²/2
    #[inline(always)]
    fn reciprocal_terms(&self, k_squared: f64) -> (f64, f64) {
        let a = 0.5 * (3.0 - self.exponent);
        let prefactor = PI.powf(1.5) / gamma(0.5 * self.exponent) * (4.0 / k_squared).powf(a);
        (0.5 * self.smearing * self.smearing * k_squared, prefactor)
    }

    /// Derivative of the reciprocal-space long-ranged part with respect to the
    /// smearing, d𝑉ₗᵣ(𝑘²)/dσ; zero at 𝑘 = 0
    pub fn long_range_k_squared_smearing_derivative(&self, k_squared: f64) -> f64 {
        if k_squared == 0.0 {
            return 0.0;
        }
        let a = 0.5 * (3.0 - self.exponent);
        let (x, prefactor) = self.reciprocal_terms(k_squared);
        -2.0 * prefactor * x.powf(a) * (-x).exp() / self.smearing
    }

    /// Derivative of the reciprocal-space long-ranged part with respect to the
    /// squared wave vector, d𝑉ₗᵣ(𝑘²)/d𝑘²; zero at 𝑘 = 0
    pub fn long_range_k_squared_derivative(&self, k_squared: f64) -> f64 {
        if k_squared == 0.0 {
            return 0.0;
        }
        let a = 0.5 * (3.0 - self.exponent);
        let (x, prefactor) = self.reciprocal_terms(k_squared);
        -prefactor / k_squared * (a * gamma_ur(a, x) * gamma(a) + x.powf(a) * (-x).exp())
    }
}

impl core::fmt::Display for InversePowerLaw {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "1/r^{}, σ = {}", self.exponent, self.smearing)
    }
}

impl Potential for InversePowerLaw {
    #[inline]
    fn from_distance(&self, distance: f64) -> Result<f64> {
        Ok(distance.powf(-self.exponent))
    }
    /// Direct evaluation as (𝑟²)^(-𝑝/2), avoiding the square root
    #[inline]
    fn from_distance_squared(&self, distance_squared: f64) -> Result<f64> {
        Ok(distance_squared.powf(-0.5 * self.exponent))
    }
}

impl RangeSeparated for InversePowerLaw {
    fn short_range_from_distance(&self, distance: f64) -> Result<f64> {
        let a = 0.5 * self.exponent;
        let (x, prefactor) = self.real_space_terms(distance);
        Ok(prefactor * gamma_ur(a, x) / x.powf(a))
    }

    fn long_range_from_distance(&self, distance: f64) -> Result<f64> {
        let a = 0.5 * self.exponent;
        let (x, prefactor) = self.real_space_terms(distance);
        Ok(prefactor * gamma_lr(a, x) / x.powf(a))
    }

    fn long_range_from_k_squared(&self, k_squared: f64) -> Result<f64> {
        // Zero also for p > 3 where the k → 0 limit is finite
        if k_squared == 0.0 {
            return Ok(0.0);
        }
        let a = 0.5 * (3.0 - self.exponent);
        let (x, prefactor) = self.reciprocal_terms(k_squared);
        Ok(prefactor * gamma_ur(a, x) * gamma(a))
    }
}

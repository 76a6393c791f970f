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

//! Gamma function primitives.
//!
//! Thin wrappers around [`statrs::function::gamma`] that never panic: arguments outside
//! the domain evaluate to NaN, which is left for the caller to deal with.

use statrs::function::gamma::{checked_gamma_lr, checked_gamma_ur};

/// Natural logarithm of the Gamma function, ln Γ(x)
#[inline]
pub fn ln_gamma(x: f64) -> f64 {
    statrs::function::gamma::ln_gamma(x)
}

/// Complete Gamma function, Γ(x) = exp(ln Γ(x))
///
/// Only valid for positive `x` where Γ(x) > 0 which is all that is needed for
/// the range-separated potentials.
///
/// # Examples
/// ~~~
/// use rangesplit::math::gamma;
/// assert!((gamma(5.0) - 24.0).abs() < 1e-10);
/// assert!((gamma(0.5) - std::f64::consts::PI.sqrt()).abs() < 1e-12);
/// ~~~
#[inline]
pub fn gamma(x: f64) -> f64 {
    ln_gamma(x).exp()
}

/// Lower regularized incomplete Gamma function, P(a, x) = γ(a, x) / Γ(a)
///
/// P(a, 0) = 0 and P + Q = 1, see [`gamma_ur`].
pub fn gamma_lr(a: f64, x: f64) -> f64 {
    if x == 0.0 && a > 0.0 {
        return 0.0;
    }
    if x < 0.0 {
        return f64::NAN;
    }
    checked_gamma_lr(a, x).unwrap_or(f64::NAN)
}

/// Upper regularized incomplete Gamma function, Q(a, x) = Γ(a, x) / Γ(a)
pub fn gamma_ur(a: f64, x: f64) -> f64 {
    if x == 0.0 && a > 0.0 {
        return 1.0;
    }
    if x < 0.0 {
        return f64::NAN;
    }
    checked_gamma_ur(a, x).unwrap_or(f64::NAN)
}

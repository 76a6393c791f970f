use approx::relative_eq;
use ndarray::{array, Array1};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rangesplit::twobody::{InversePowerLaw, Potential, RangeSeparated, SplitSum};
use statrs::function::erf::{erf, erfc};
use std::f64::consts::{PI, SQRT_2};

/// Map raw integers onto an exponent in (0, 6.25], a smearing in [0.1, 3.1], and a
/// distance in [0.05, 10.05]
fn parameters(p: u8, sigma: u8, r: u16) -> (f64, f64, f64) {
    let p = 0.25 + 6.0 * f64::from(p) / 255.0;
    let sigma = 0.1 + 3.0 * f64::from(sigma) / 255.0;
    let r = 0.05 + 10.0 * f64::from(r) / f64::from(u16::MAX);
    (p, sigma, r)
}

#[quickcheck]
fn split_adds_up_to_full_potential(p: u8, sigma: u8, r: u16) -> bool {
    let (p, sigma, r) = parameters(p, sigma, r);
    let ipl = InversePowerLaw::new(p, sigma);
    let sum = ipl.short_range_from_distance(r).unwrap() + ipl.long_range_from_distance(r).unwrap();
    relative_eq!(sum, ipl.from_distance(r).unwrap(), max_relative = 1e-9)
}

#[quickcheck]
fn squared_distance_matches_distance(p: u8, sigma: u8, r: u16) -> bool {
    let (p, sigma, r) = parameters(p, sigma, r);
    let ipl = InversePowerLaw::new(p, sigma);
    let split = SplitSum::new(ipl);
    relative_eq!(
        ipl.from_distance_squared(r * r).unwrap(),
        ipl.from_distance(r).unwrap(),
        max_relative = 1e-12
    ) && relative_eq!(
        split.from_distance_squared(r * r).unwrap(),
        split.from_distance(r).unwrap(),
        max_relative = 1e-12
    )
}

#[quickcheck]
fn zero_wavevector_is_zero(p: u8, sigma: u8) -> bool {
    let (p, sigma, _) = parameters(p, sigma, 0);
    InversePowerLaw::new(p, sigma)
        .long_range_from_k_squared(0.0)
        .unwrap()
        == 0.0
}

#[quickcheck]
fn coulomb_split_is_erfc_and_erf(sigma: u8, r: u16) -> TestResult {
    let (_, sigma, r) = parameters(0, sigma, r);
    let coulomb = InversePowerLaw::coulomb(sigma);
    let sr = coulomb.short_range_from_distance(r).unwrap();
    let lr = coulomb.long_range_from_distance(r).unwrap();
    let expected_sr = erfc(r / (SQRT_2 * sigma)) / r;
    if expected_sr < 1e-200 {
        return TestResult::discard();
    }
    TestResult::from_bool(
        relative_eq!(sr, expected_sr, max_relative = 1e-8)
            && relative_eq!(lr, erf(r / (SQRT_2 * sigma)) / r, max_relative = 1e-8),
    )
}

#[quickcheck]
fn coulomb_fourier_is_gaussian(sigma: u8, k: u16) -> TestResult {
    let (_, sigma, k) = parameters(0, sigma, k);
    let k_squared = k * k;
    let expected = 4.0 * PI * (-0.5 * sigma * sigma * k_squared).exp() / k_squared;
    if expected < 1e-200 {
        return TestResult::discard();
    }
    let fourier = InversePowerLaw::coulomb(sigma)
        .long_range_from_k_squared(k_squared)
        .unwrap();
    TestResult::from_bool(relative_eq!(fourier, expected, max_relative = 1e-8))
}

/// Bit patterns, so that NaN compares equal to itself
fn bits(values: Array1<f64>) -> Vec<u64> {
    values.iter().map(|x| x.to_bits()).collect()
}

#[quickcheck]
fn evaluation_is_repeatable(p: u8, sigma: u8, r: u16) -> bool {
    let (p, sigma, r) = parameters(p, sigma, r);
    let ipl = InversePowerLaw::new(p, sigma);
    let distances = array![r, 2.0 * r, 0.5 * r];
    let k_squared = distances.mapv(|x| x * x);
    let evaluate = || {
        [
            bits(ipl.short_range_by_distance(distances.view()).unwrap()),
            bits(ipl.long_range_by_distance(distances.view()).unwrap()),
            bits(ipl.long_range_by_squared_wavevector(k_squared.view()).unwrap()),
        ]
    };
    evaluate() == evaluate()
}

/// Output order mirrors input order
#[test]
fn order_is_preserved() {
    let ipl = InversePowerLaw::new(3.5, 1.2);
    let distances = Array1::linspace(0.2, 4.0, 17);
    let reversed: Array1<f64> = distances.iter().rev().copied().collect();
    let forward = ipl.short_range_by_distance(distances.view()).unwrap();
    let backward = ipl.short_range_by_distance(reversed.view()).unwrap();
    for (a, b) in forward.iter().zip(backward.iter().rev()) {
        assert_eq!(a, b);
    }
}

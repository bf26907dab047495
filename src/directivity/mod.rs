// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Directivity of radiation patterns.
//!
//! There are two estimators. [`linear_directivity`] is the closed-form result
//! for a uniform linear array of isotropic elements, and only needs the
//! element weights and spacing. [`numerical_directivity`] integrates any power
//! pattern sampled on a regular (theta, phi) grid.

mod error;

pub use error::DirectivityError;

use std::f64::consts::PI;

use log::debug;
use ndarray::prelude::*;

use crate::{c64, constants::GRID_SPACING_RTOL, math::*};

/// The directivity of a uniform linear array of isotropic elements with
/// (complex) tapering weights `weights` and element spacing `d`
/// \[wavelengths\]:
///
/// `D = |sum_i w_i|^2 / sum_{i,k} w_i conj(w_k) sinc(2 d (i - k))`
///
/// The denominator pairs each weight with the conjugate of the other, i.e. it
/// is the Hermitian form `w^H S w` of the sinc matrix `S`. For real weights
/// this is the same as `sum_{i,k} w_i w_k sinc(...)`; complex tapers give the
/// power-normalised result rather than the unconjugated product.
///
/// A single element always has a directivity of 1, whatever the spacing.
pub fn linear_directivity(weights: &[c64], d: f64) -> Result<f64, DirectivityError> {
    let n = weights.len();
    match n {
        0 => return Err(DirectivityError::NoWeights),
        1 => return Ok(1.0),
        _ => (),
    }
    if !(d.is_finite() && d > 0.0) {
        return Err(DirectivityError::BadSpacing(d));
    }

    let numerator = weights.iter().sum::<c64>().norm_sqr();

    // Element index differences; antisymmetric about the diagonal.
    let index_diffs = Array2::from_shape_fn((n, n), |(i, k)| i as f64 - k as f64);
    let denominator: f64 = index_diffs
        .indexed_iter()
        .map(|((i, k), &diff)| (weights[i] * weights[k].conj()).re * sinc(2.0 * d * diff))
        .sum();
    if denominator.is_nan() || denominator <= 0.0 {
        return Err(DirectivityError::NoPower(denominator));
    }

    Ok(numerator / denominator)
}

/// Get the theta and phi steps of a power pattern's grid, checking that the
/// pattern's shape matches the grid.
fn grid_steps(
    pattern: ArrayView2<f64>,
    theta: &[f64],
    phi: &[f64],
) -> Result<(f64, f64), DirectivityError> {
    let (rows, cols) = pattern.dim();
    if rows != phi.len() || cols != theta.len() {
        return Err(DirectivityError::ShapeMismatch {
            rows,
            cols,
            num_phi: phi.len(),
            num_theta: theta.len(),
        });
    }

    let mut steps = [0.0; 2];
    for (step, (axis, values)) in steps.iter_mut().zip([("theta", theta), ("phi", phi)]) {
        if values.len() < 2 {
            return Err(DirectivityError::TooFewSamples {
                axis,
                num: values.len(),
            });
        }
        *step = uniform_step(values, GRID_SPACING_RTOL)
            .ok_or(DirectivityError::NonUniformGrid { axis })?
            .abs();
    }
    Ok((steps[0], steps[1]))
}

/// Numerically integrate the total power radiated by a far-field power
/// pattern. `pattern` has phi along its rows and theta along its columns, i.e.
/// it has shape `[phi.len(), theta.len()]`; both angle axes \[radians\] must be
/// evenly spaced. The rectangle rule is used.
pub fn radiated_power(
    pattern: ArrayView2<f64>,
    theta: &[f64],
    phi: &[f64],
) -> Result<f64, DirectivityError> {
    let (d_theta, d_phi) = grid_steps(pattern, theta, phi)?;

    let sin_theta = Array1::from_iter(theta.iter().map(|t| t.sin()));
    let power = pattern
        .outer_iter()
        .map(|row| row.dot(&sin_theta) * d_theta)
        .sum::<f64>()
        * d_phi;
    Ok(power)
}

/// Numerically evaluate the directivity of a far-field power pattern, i.e.
/// `4 pi max(pattern) / P_rad`. See [`radiated_power`] for the expected
/// layout of `pattern`.
pub fn numerical_directivity(
    pattern: ArrayView2<f64>,
    theta: &[f64],
    phi: &[f64],
) -> Result<f64, DirectivityError> {
    let power = radiated_power(pattern, theta, phi)?;
    if !(power.is_finite() && power > 0.0) {
        return Err(DirectivityError::NoPower(power));
    }
    let max = pattern.fold(f64::NEG_INFINITY, |acc, &p| acc.max(p));
    debug!("Pattern maximum {max:e}, radiated power {power:e}");

    Ok(4.0 * PI * max / power)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Steered array factors.
//!
//! Every function here evaluates the same kernel: for a source direction `s`
//! and a steering direction `s0` (both as direction cosines),
//!
//! `AF(s0, s) = sum_j exp(i 2 pi p_j . (s - s0))`
//!
//! where `p_j` is the position of element j in wavelengths. This is the array
//! manifold evaluated at the difference between the source and steering
//! directions, summed over elements. The variants only differ in how the
//! directions are supplied.
//!
//! A single steering direction is just the one-row case of
//! [`steered_array_factor`]; nothing relies on broadcasting.

mod error;

pub use error::ArrayFactorError;

use std::f64::consts::TAU;

use log::trace;
use ndarray::{parallel::prelude::*, prelude::*};

use crate::{
    c64,
    directions::{lms_from_angles, lms_from_cosines, lms_from_pixels, theta_phi_grid, Lm},
    healpix::Nside,
    Positions,
};

fn check_directions(sources: &[Lm], steers: &[Lm]) -> Result<(), ArrayFactorError> {
    if sources.is_empty() {
        return Err(ArrayFactorError::NoSources);
    }
    if steers.is_empty() {
        return Err(ArrayFactorError::NoSteeringDirections);
    }
    Ok(())
}

/// Fill one steering direction's array factors, one per source direction.
fn steer_into(mut afs: ArrayViewMut1<c64>, sources: &[Lm], steer: Lm, positions: ArrayView2<f64>) {
    afs.iter_mut().zip(sources).for_each(|(af, &source)| {
        let Lm { l: dl, m: dm } = source - steer;
        *af = positions
            .outer_iter()
            .map(|p| c64::cis(TAU * (p[0] * dl + p[1] * dm)))
            .sum();
    });
}

/// Get the array factors for every pair of steering direction and source
/// direction. The result has shape `[steers.len(), sources.len()]`; each row
/// is the pattern of the array steered towards one direction.
///
/// The work is O(J * sources * steers) with only the output allocated.
pub fn steered_array_factor(
    sources: &[Lm],
    steers: &[Lm],
    positions: &Positions,
) -> Result<Array2<c64>, ArrayFactorError> {
    check_directions(sources, steers)?;
    trace!(
        "Array factor for {} steering directions, {} source directions, {} elements",
        steers.len(),
        sources.len(),
        positions.len()
    );

    let mut afs = Array2::zeros((steers.len(), sources.len()));
    afs.outer_iter_mut()
        .zip(steers)
        .for_each(|(afs, &steer)| steer_into(afs, sources, steer, positions.view()));
    Ok(afs)
}

/// The same as [`steered_array_factor`], but steering directions are handled
/// in parallel.
pub fn steered_array_factor_par(
    sources: &[Lm],
    steers: &[Lm],
    positions: &Positions,
) -> Result<Array2<c64>, ArrayFactorError> {
    check_directions(sources, steers)?;

    let mut afs = Array2::zeros((steers.len(), sources.len()));
    afs.axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(steers.par_iter())
        .for_each(|(afs, &steer)| steer_into(afs, sources, steer, positions.view()));
    Ok(afs)
}

/// Get the array factor steered towards a single direction, with complex
/// tapering weights applied to each element:
///
/// `AF(s) = sum_j w_j exp(i 2 pi p_j . (s - s0))`
///
/// Unit weights give the same result as a single row of
/// [`steered_array_factor`].
pub fn weighted_array_factor(
    sources: &[Lm],
    steer: Lm,
    weights: &[c64],
    positions: &Positions,
) -> Result<Array1<c64>, ArrayFactorError> {
    if weights.len() != positions.len() {
        return Err(ArrayFactorError::WeightsMismatch {
            weights: weights.len(),
            elements: positions.len(),
        });
    }
    check_directions(sources, &[steer])?;

    let afs = sources
        .iter()
        .map(|&source| {
            let Lm { l: dl, m: dm } = source - steer;
            positions
                .view()
                .outer_iter()
                .zip(weights)
                .map(|(p, &w)| w * c64::cis(TAU * (p[0] * dl + p[1] * dm)))
                .sum::<c64>()
        })
        .collect();
    Ok(afs)
}

/// Get the array factor over HEALPix pixels, steered towards the centre of
/// `scan_pixel`. The output has one value per source pixel.
pub fn array_factor_pixels(
    nside: Nside,
    source_pixels: &[u64],
    scan_pixel: u64,
    positions: &Positions,
) -> Result<Array1<c64>, ArrayFactorError> {
    let afs = array_factor_pixels_matrix(nside, source_pixels, &[scan_pixel], positions)?;
    Ok(afs.index_axis_move(Axis(0), 0))
}

/// Get the array factor over HEALPix pixels for many steering directions at
/// once. Row `i` of the `[scan_pixels.len(), source_pixels.len()]` output is
/// the pattern steered towards the centre of `scan_pixels[i]`, and is
/// identical to calling [`array_factor_pixels`] with that pixel.
pub fn array_factor_pixels_matrix(
    nside: Nside,
    source_pixels: &[u64],
    scan_pixels: &[u64],
    positions: &Positions,
) -> Result<Array2<c64>, ArrayFactorError> {
    let sources = lms_from_pixels(nside, source_pixels)?;
    let steers = lms_from_pixels(nside, scan_pixels)?;
    steered_array_factor(&sources, &steers, positions)
}

/// Get the array factor on flattened `theta` and `phi` directions \[radians\],
/// steered towards (`theta0`, `phi0`).
pub fn array_factor_angles(
    theta: &[f64],
    phi: &[f64],
    theta0: f64,
    phi0: f64,
    positions: &Positions,
) -> Result<Array1<c64>, ArrayFactorError> {
    let sources = lms_from_angles(theta, phi)?;
    let steer = lms_from_angles(&[theta0], &[phi0])?;
    let afs = steered_array_factor(&sources, &steer, positions)?;
    Ok(afs.index_axis_move(Axis(0), 0))
}

/// Get the array factor on a regular (theta, phi) grid \[radians\], steered
/// towards (`theta0`, `phi0`). The output has shape `[phi.len(),
/// theta.len()]`, which is the layout expected by
/// [`crate::directivity::radiated_power`].
pub fn array_factor_grid(
    theta: &[f64],
    phi: &[f64],
    theta0: f64,
    phi0: f64,
    positions: &Positions,
) -> Result<Array2<c64>, ArrayFactorError> {
    let (flat_theta, flat_phi) = theta_phi_grid(theta, phi);
    let afs = array_factor_angles(&flat_theta, &flat_phi, theta0, phi0, positions)?;
    // The flattened grid has theta varying fastest.
    let afs = afs
        .into_shape_with_order((phi.len(), theta.len()))
        .expect("grid has phi.len() * theta.len() directions");
    Ok(afs)
}

/// Get the array factor on flattened direction cosines `l` and `m`, steered
/// towards (`l0`, `m0`). All direction cosines must be on or above the
/// horizon (`l^2 + m^2 <= 1`).
pub fn array_factor_lm(
    l: &[f64],
    m: &[f64],
    l0: f64,
    m0: f64,
    positions: &Positions,
) -> Result<Array1<c64>, ArrayFactorError> {
    let sources = lms_from_cosines(l, m)?;
    let steer = lms_from_cosines(&[l0], &[m0])?;
    let afs = steered_array_factor(&sources, &steer, positions)?;
    Ok(afs.index_axis_move(Axis(0), 0))
}

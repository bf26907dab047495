// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Directions on the unit sphere.
//!
//! Directions can be given as direction cosines (l, m), as angles (theta,
//! phi) or as HEALPix pixels. Everything ends up as an [`Lm`]; the third
//! direction cosine (n) is implied. Theta is measured from the array's
//! boresight (zenith) and phi is the azimuth from the x axis towards the y
//! axis, so `l = sin(theta) cos(phi)` and `m = sin(theta) sin(phi)`.


use itertools::Itertools;
use thiserror::Error;

use crate::{
    constants::DIRECTION_COSINE_TOLERANCE,
    healpix::{HealpixError, Nside},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DirectionError {
    #[error("Direction coordinates must come in pairs, but got {first} and {second} values")]
    LengthMismatch { first: usize, second: usize },

    #[error("Direction {index} (l = {l}, m = {m}) is below the horizon; l^2 + m^2 must not exceed 1")]
    BelowHorizon { index: usize, l: f64, m: f64 },

    #[error("Direction {index} is not finite")]
    NonFinite { index: usize },

    #[error(transparent)]
    Healpix(#[from] HealpixError),
}

/// (l,m) direction cosines. There are no units (i.e. dimensionless).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Lm {
    /// l coordinate \[dimensionless\]
    pub l: f64,
    /// m coordinate \[dimensionless\]
    pub m: f64,
}

impl Lm {
    pub fn new(l: f64, m: f64) -> Lm {
        Lm { l, m }
    }

    /// The direction cosines of the direction (theta, phi) \[radians\].
    pub fn from_theta_phi(theta: f64, phi: f64) -> Lm {
        let sin_theta = theta.sin();
        let (sin_phi, cos_phi) = phi.sin_cos();
        Lm {
            l: sin_theta * cos_phi,
            m: sin_theta * sin_phi,
        }
    }

    /// Drop the z component of a unit vector.
    pub fn from_unit_vector(v: [f64; 3]) -> Lm {
        Lm { l: v[0], m: v[1] }
    }

    /// Is this direction on or above the horizon?
    pub fn is_visible(self) -> bool {
        self.l * self.l + self.m * self.m <= 1.0 + DIRECTION_COSINE_TOLERANCE
    }

    /// The implied third direction cosine. This is `None` for directions below
    /// the horizon.
    pub fn n(self) -> Option<f64> {
        if self.is_visible() {
            Some((1.0 - self.l * self.l - self.m * self.m).max(0.0).sqrt())
        } else {
            None
        }
    }
}

impl std::ops::Sub for Lm {
    type Output = Lm;

    fn sub(self, rhs: Lm) -> Lm {
        Lm {
            l: self.l - rhs.l,
            m: self.m - rhs.m,
        }
    }
}

fn check_lengths(first: &[f64], second: &[f64]) -> Result<(), DirectionError> {
    if first.len() != second.len() {
        return Err(DirectionError::LengthMismatch {
            first: first.len(),
            second: second.len(),
        });
    }
    Ok(())
}

/// Pair up direction cosines, checking that every direction is finite and not
/// below the horizon.
pub fn lms_from_cosines(l: &[f64], m: &[f64]) -> Result<Vec<Lm>, DirectionError> {
    check_lengths(l, m)?;
    l.iter()
        .zip(m)
        .enumerate()
        .map(|(index, (&l, &m))| {
            let lm = Lm { l, m };
            if !(l.is_finite() && m.is_finite()) {
                Err(DirectionError::NonFinite { index })
            } else if !lm.is_visible() {
                Err(DirectionError::BelowHorizon { index, l, m })
            } else {
                Ok(lm)
            }
        })
        .collect()
}

/// Pair up direction cosines without checking that they describe physical
/// directions.
pub fn lms_from_cosines_unchecked(l: &[f64], m: &[f64]) -> Result<Vec<Lm>, DirectionError> {
    check_lengths(l, m)?;
    Ok(l.iter().zip(m).map(|(&l, &m)| Lm { l, m }).collect())
}

/// Convert (theta, phi) pairs \[radians\] to direction cosines.
pub fn lms_from_angles(theta: &[f64], phi: &[f64]) -> Result<Vec<Lm>, DirectionError> {
    check_lengths(theta, phi)?;
    theta
        .iter()
        .zip(phi)
        .enumerate()
        .map(|(index, (&theta, &phi))| {
            if theta.is_finite() && phi.is_finite() {
                Ok(Lm::from_theta_phi(theta, phi))
            } else {
                Err(DirectionError::NonFinite { index })
            }
        })
        .collect()
}

/// Get the direction cosines of the centres of HEALPix pixels.
pub fn lms_from_pixels(nside: Nside, pixels: &[u64]) -> Result<Vec<Lm>, DirectionError> {
    pixels
        .iter()
        .map(|&pixel| Ok(Lm::from_unit_vector(nside.pix2vec(pixel)?)))
        .collect()
}

/// A square grid of `n` by `n` direction cosines spanning `[-1, 1]` in both l
/// and m, flattened with l varying fastest. Many of these directions are below
/// the horizon; see [`visible`] to discard them.
pub fn lm_grid(n: usize) -> (Vec<f64>, Vec<f64>) {
    let axis: Vec<f64> = match n {
        0 => vec![],
        1 => vec![0.0],
        _ => (0..n)
            .map(|i| -1.0 + 2.0 * i as f64 / (n - 1) as f64)
            .collect(),
    };
    meshgrid(&axis, &axis)
}

/// Flatten a (theta, phi) grid, with theta varying fastest. A pattern
/// evaluated on these directions reshapes to `[phi.len(), theta.len()]`.
pub fn theta_phi_grid(theta: &[f64], phi: &[f64]) -> (Vec<f64>, Vec<f64>) {
    meshgrid(theta, phi)
}

fn meshgrid(fast: &[f64], slow: &[f64]) -> (Vec<f64>, Vec<f64>) {
    slow.iter()
        .cartesian_product(fast)
        .map(|(&s, &f)| (f, s))
        .unzip()
}

/// Keep only the directions that are on or above the horizon, along with
/// their original indices.
pub fn visible(l: &[f64], m: &[f64]) -> Result<(Vec<usize>, Vec<Lm>), DirectionError> {
    Ok(lms_from_cosines_unchecked(l, m)?
        .into_iter()
        .enumerate()
        .filter(|(_, lm)| lm.is_visible())
        .unzip())
}

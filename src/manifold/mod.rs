// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Array manifolds.


use std::f64::consts::TAU;

use ndarray::prelude::*;
use thiserror::Error;

use crate::{c64, Positions};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ManifoldError {
    #[error("Got {l} l direction cosines but {m} m direction cosines")]
    LengthMismatch { l: usize, m: usize },
}

/// Compute the array manifold for the directions given by the direction
/// cosines `l` and `m`. The result has shape `[J, P]`, where J is the number
/// of elements and P the number of directions; element `(j, p)` is
/// `exp(i 2 pi (x_j l_p + y_j m_p))`.
///
/// `l` and `m` are flat; a 2D sampling grid must be flattened before calling
/// this function. The direction cosines are not checked to be physical (see
/// [`crate::directions::lms_from_cosines`] for that).
pub fn manifold(l: &[f64], m: &[f64], positions: &Positions) -> Result<Array2<c64>, ManifoldError> {
    if l.len() != m.len() {
        return Err(ManifoldError::LengthMismatch {
            l: l.len(),
            m: m.len(),
        });
    }

    let mut a = Array2::zeros((positions.len(), l.len()));
    a.outer_iter_mut()
        .zip(positions.view().outer_iter())
        .for_each(|(mut a_j, pos)| {
            let (x, y) = (pos[0], pos[1]);
            a_j.iter_mut()
                .zip(l.iter().zip(m))
                .for_each(|(a_jp, (&l, &m))| *a_jp = c64::cis(TAU * (x * l + y * m)));
        });
    Ok(a)
}

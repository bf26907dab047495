// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Array element geometries.
//!
//! All positions are two-dimensional and in units of wavelength (i.e. they're
//! "electrical" positions). A geometry is stored as a `[J, 2]` array; the
//! first column is x and the second is y.


use log::debug;
use ndarray::{concatenate, prelude::*};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("A geometry needs at least one element, but {nx} x {ny} elements were requested")]
    NoElements { nx: usize, ny: usize },

    #[error("Element spacing must be a positive, finite number of wavelengths; got {0}")]
    BadSpacing(f64),

    #[error("No element positions were supplied")]
    NoPositions,

    #[error("Element positions must have 2 columns (x, y); got {0}")]
    BadNumColumns(usize),

    #[error("Element position {index} is not finite")]
    NonFinitePosition { index: usize },
}

/// The positions of array elements \[wavelengths\]. There is always at least
/// one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Positions(Array2<f64>);

impl Positions {
    /// Wrap a `[J, 2]` array of element positions. All positions must be
    /// finite and there must be at least one.
    pub fn new(positions: Array2<f64>) -> Result<Positions, GeometryError> {
        let (num_elements, num_cols) = positions.dim();
        if num_cols != 2 {
            return Err(GeometryError::BadNumColumns(num_cols));
        }
        if num_elements == 0 {
            return Err(GeometryError::NoPositions);
        }
        if let Some(index) = positions
            .outer_iter()
            .position(|p| !(p[0].is_finite() && p[1].is_finite()))
        {
            return Err(GeometryError::NonFinitePosition { index });
        }
        Ok(Positions(positions))
    }

    /// The number of elements (J).
    pub fn len(&self) -> usize {
        self.0.len_of(Axis(0))
    }

    /// Always false; a geometry can't be empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn view(&self) -> ArrayView2<f64> {
        self.0.view()
    }

    pub fn x(&self) -> ArrayView1<f64> {
        self.0.column(0)
    }

    pub fn y(&self) -> ArrayView1<f64> {
        self.0.column(1)
    }

    /// The mean element position.
    pub fn centroid(&self) -> (f64, f64) {
        let n = self.len() as f64;
        (self.x().sum() / n, self.y().sum() / n)
    }

    /// Get a copy of these positions translated so that their centroid is at
    /// the origin. Array-factor magnitudes don't change with a translation,
    /// only their phases do.
    pub fn centred(&self) -> Positions {
        let (cx, cy) = self.centroid();
        let mut centred = self.0.clone();
        centred.column_mut(0).mapv_inplace(|x| x - cx);
        centred.column_mut(1).mapv_inplace(|y| y - cy);
        Positions(centred)
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.0
    }
}

fn check_spacing(d: f64) -> Result<(), GeometryError> {
    if d.is_finite() && d > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::BadSpacing(d))
    }
}

/// Fill a uniform rectangular grid, without any checks. Rows are ordered with
/// x varying fastest, i.e. element `i + j * nx` is at `(i * dx, j * dy)`.
fn rectangular_grid(nx: usize, ny: usize, dx: f64, dy: f64) -> Array2<f64> {
    let mut grid = Array2::zeros((nx * ny, 2));
    grid.outer_iter_mut()
        .enumerate()
        .for_each(|(i_elem, mut pos)| {
            pos[0] = (i_elem % nx) as f64 * dx;
            pos[1] = (i_elem / nx) as f64 * dy;
        });
    grid
}

/// Element positions for a uniform rectangular grid of `nx` by `ny`
/// elements, with spacings `dx` and `dy` \[wavelengths\]. Element `i + j * nx`
/// is at `(i * dx, j * dy)`.
pub fn rectangular_lattice(
    nx: usize,
    ny: usize,
    dx: f64,
    dy: f64,
) -> Result<Positions, GeometryError> {
    if nx == 0 || ny == 0 {
        return Err(GeometryError::NoElements { nx, ny });
    }
    check_spacing(dx)?;
    check_spacing(dy)?;

    Ok(Positions(rectangular_grid(nx, ny, dx, dy)))
}

/// The number of rows in a hexagonal lattice with `nx` elements per row. This
/// is chosen so that the aperture is roughly square.
pub fn hexagonal_num_rows(nx: usize) -> usize {
    (nx as f64 / 3.0_f64.sqrt()).round() as usize
}

/// Element positions for a regular hexagonal grid with `nx` elements along
/// the x axis spaced by `dx` \[wavelengths\].
///
/// The lattice is made of two interleaved rectangular grids. The row spacing
/// is `dx * sqrt(3)` and the number of rows is `round(nx / sqrt(3))` (see
/// [`hexagonal_num_rows`]). The first grid is `nx` by `ny`; the second is
/// `nx - 1` by `ny - 1` and is offset by half a spacing in each direction.
/// The first grid's elements come first in the output.
pub fn hexagonal_lattice(nx: usize, dx: f64) -> Result<Positions, GeometryError> {
    check_spacing(dx)?;
    let ny = hexagonal_num_rows(nx);
    if nx == 0 || ny == 0 {
        return Err(GeometryError::NoElements { nx, ny });
    }
    let dy = dx * 3.0_f64.sqrt();

    let outer = rectangular_grid(nx, ny, dx, dy);
    let mut inner = rectangular_grid(nx - 1, ny - 1, dx, dy);
    inner.column_mut(0).mapv_inplace(|x| x + dx / 2.0);
    inner.column_mut(1).mapv_inplace(|y| y + dy / 2.0);
    debug!(
        "Hexagonal lattice: {nx} x {ny} + {} x {} elements",
        nx - 1,
        ny - 1
    );

    let positions = concatenate![Axis(0), outer, inner];
    Ok(Positions(positions))
}

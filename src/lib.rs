// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Far-field radiation patterns of phased antenna arrays.

Element geometries are generated in units of wavelength ([`geometry`]),
directions are expressed as direction cosines, angles or HEALPix pixels
([`directions`], [`healpix`]), and the steered array response is evaluated by
[`array_factor`]. Figures of merit come from [`directivity`], and power
patterns and images from [`pattern`].
 */

pub mod array_factor;
mod cli;
pub mod constants;
pub mod directions;
pub mod directivity;
pub mod geometry;
pub mod healpix;
pub mod manifold;
pub(crate) mod math;
pub mod pattern;

// Re-exports.
pub use array_factor::{
    array_factor_angles, array_factor_grid, array_factor_lm, array_factor_pixels, array_factor_pixels_matrix,
    steered_array_factor, steered_array_factor_par, weighted_array_factor, ArrayFactorError,
};
pub use cli::{Farfield, FarfieldError};
pub use directions::{DirectionError, Lm};
pub use directivity::{linear_directivity, numerical_directivity, radiated_power, DirectivityError};
pub use geometry::{hexagonal_lattice, rectangular_lattice, GeometryError, Positions};
pub use manifold::{manifold, ManifoldError};
pub use pattern::{apparent_sky, dirty_image, power_pattern, to_db, PatternError};

use crossbeam_utils::atomic::AtomicCell;

/// Complex double-precision float.
#[allow(non_camel_case_types)]
pub type c64 = num_complex::Complex<f64>;

/// Are progress bars being drawn? This should only ever be enabled by CLI
/// code.
pub(crate) static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. All element positions are in units
of wavelength, so no physical constants (e.g. the speed of light) are needed
here.
 */

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// The HEALPix resolution used when one isn't specified.
pub const DEFAULT_NSIDE: u32 = 64;

/// The angular radius of the "visible" sky used when one isn't specified
/// \[degrees\]. 90 degrees is the full hemisphere above the array.
pub const DEFAULT_SKY_FOV_DEG: f64 = 90.0;

/// The angular radius of the region the beam is scanned over when imaging
/// \[degrees\].
pub const DEFAULT_SCAN_FOV_DEG: f64 = 30.0;

/// Element spacing used when one isn't specified \[wavelengths\].
pub const DEFAULT_SPACING: f64 = 0.5;

/// Direction cosines with `l^2 + m^2` exceeding 1 by more than this amount
/// are below the horizon.
pub const DIRECTION_COSINE_TOLERANCE: f64 = 1e-12;

/// The relative amount that any step of an angular grid may differ from the
/// first step before the grid is considered non-uniform.
pub const GRID_SPACING_RTOL: f64 = 1e-6;

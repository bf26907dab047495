// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with HEALPix pixelisation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HealpixError {
    #[error("nside must be between 1 and 2^29; got {0}")]
    BadNside(u32),

    #[error("{0} is not a valid number of HEALPix pixels (12 * nside^2)")]
    BadNpix(u64),

    #[error("Pixel {pixel} is out of range for a HEALPix map with {npix} pixels")]
    BadPixel { pixel: u64, npix: u64 },

    #[error("theta must be between 0 and pi radians; got {0}")]
    BadTheta(f64),

    #[error("Cannot get the direction of a zero-length or non-finite vector")]
    BadVector,
}

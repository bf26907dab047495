// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all farfield-related errors. This should be the *only* error
//! enum that is publicly visible.

use thiserror::Error;

use super::{
    common::{ArrayArgsError, TextArrayError},
    directivity::DirectivityArgsError,
    image::ImageArgsError,
    pattern::PatternArgsError,
};
use crate::{
    healpix::HealpixError, ArrayFactorError, DirectionError, DirectivityError, GeometryError,
    PatternError,
};

/// The *only* publicly visible error from the farfield binary. Where it helps,
/// messages carry a hint on how to fix the problem.
#[derive(Error, Debug)]
pub enum FarfieldError {
    /// An error related to the array layout.
    #[error("{0}\n\nArrays are described with --layout, --nx, --ny, --dx and --dy (all spacings in wavelengths)")]
    Array(String),

    /// An error related to HEALPix maps or pixels.
    #[error("{0}\n\nHEALPix maps must be RING ordered and have 12 * nside^2 values")]
    Healpix(String),

    /// An error related to evaluating array factors or power patterns.
    #[error("{0}")]
    Pattern(String),

    /// An error related to directivity.
    #[error("{0}")]
    Directivity(String),

    /// An error related to dirty imaging.
    #[error("{0}")]
    Image(String),

    /// An error related to reading plain-text arrays.
    #[error("{0}\n\nText arrays are whitespace separated numbers, one row per line, e.g. from numpy.savetxt")]
    TextArray(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// A generic error that can't be clarified further with documentation, e.g.
    /// IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

// Binary sub-command errors.

impl From<ArrayArgsError> for FarfieldError {
    fn from(e: ArrayArgsError) -> Self {
        Self::Array(e.to_string())
    }
}

impl From<PatternArgsError> for FarfieldError {
    fn from(e: PatternArgsError) -> Self {
        Self::Pattern(e.to_string())
    }
}

impl From<DirectivityArgsError> for FarfieldError {
    fn from(e: DirectivityArgsError) -> Self {
        Self::Directivity(e.to_string())
    }
}

impl From<ImageArgsError> for FarfieldError {
    fn from(e: ImageArgsError) -> Self {
        Self::Image(e.to_string())
    }
}

impl From<TextArrayError> for FarfieldError {
    fn from(e: TextArrayError) -> Self {
        Self::TextArray(e.to_string())
    }
}

// Library code errors.

impl From<GeometryError> for FarfieldError {
    fn from(e: GeometryError) -> Self {
        Self::Array(e.to_string())
    }
}

impl From<HealpixError> for FarfieldError {
    fn from(e: HealpixError) -> Self {
        Self::Healpix(e.to_string())
    }
}

impl From<DirectionError> for FarfieldError {
    fn from(e: DirectionError) -> Self {
        match e {
            DirectionError::Healpix(e) => Self::from(e),
            DirectionError::LengthMismatch { .. }
            | DirectionError::BelowHorizon { .. }
            | DirectionError::NonFinite { .. } => Self::Pattern(e.to_string()),
        }
    }
}

impl From<ArrayFactorError> for FarfieldError {
    fn from(e: ArrayFactorError) -> Self {
        match e {
            ArrayFactorError::Direction(e) => Self::from(e),
            ArrayFactorError::NoSources
            | ArrayFactorError::NoSteeringDirections
            | ArrayFactorError::WeightsMismatch { .. } => Self::Pattern(e.to_string()),
        }
    }
}

impl From<DirectivityError> for FarfieldError {
    fn from(e: DirectivityError) -> Self {
        Self::Directivity(e.to_string())
    }
}

impl From<PatternError> for FarfieldError {
    fn from(e: PatternError) -> Self {
        match e {
            PatternError::ArrayFactor(e) => Self::from(e),
            PatternError::Direction(e) => Self::from(e),
            PatternError::SkyMismatch { .. } | PatternError::NoScanPixels => {
                Self::Image(e.to_string())
            }
            PatternError::ElementPatternMismatch { .. } | PatternError::NoPositiveValues(_) => {
                Self::Pattern(e.to_string())
            }
        }
    }
}

// External crate errors.

impl From<std::io::Error> for FarfieldError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<toml::ser::Error> for FarfieldError {
    fn from(e: toml::ser::Error) -> Self {
        Self::ArgFile(e.to_string())
    }
}

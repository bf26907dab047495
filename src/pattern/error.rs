// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::{ArrayFactorError, DirectionError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    #[error("The array factor has shape {afs:?}, but the element pattern has shape {element:?}")]
    ElementPatternMismatch {
        afs: Vec<usize>,
        element: Vec<usize>,
    },

    #[error("There are {sky} sky brightness values, but {pixels} sky pixels")]
    SkyMismatch { sky: usize, pixels: usize },

    #[error("No scan pixels were supplied")]
    NoScanPixels,

    #[error("The pattern's maximum ({0}) is not positive; cannot normalise to decibels")]
    NoPositiveValues(f64),

    #[error(transparent)]
    ArrayFactor(#[from] ArrayFactorError),

    #[error(transparent)]
    Direction(#[from] DirectionError),
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with directivity calculations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DirectivityError {
    #[error("No element weights were supplied")]
    NoWeights,

    #[error("Element spacing must be a positive, finite number of wavelengths; got {0}")]
    BadSpacing(f64),

    #[error("The power pattern has shape ({rows}, {cols}), but there are {num_phi} phi values and {num_theta} theta values; expected shape ({num_phi}, {num_theta})")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        num_phi: usize,
        num_theta: usize,
    },

    #[error("At least 2 {axis} samples are needed to integrate a power pattern; got {num}")]
    TooFewSamples { axis: &'static str, num: usize },

    #[error("The {axis} samples are not evenly spaced; numerical integration needs a uniform grid")]
    NonUniformGrid { axis: &'static str },

    #[error("The total radiated power is not positive ({0}); the directivity is undefined")]
    NoPower(f64),
}

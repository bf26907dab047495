// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with array-factor calculations.

use thiserror::Error;

use crate::directions::DirectionError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArrayFactorError {
    #[error("No source directions were supplied")]
    NoSources,

    #[error("No steering directions were supplied")]
    NoSteeringDirections,

    #[error("Got {weights} element weights, but the array has {elements} elements")]
    WeightsMismatch { weights: usize, elements: usize },

    #[error("{0}")]
    Direction(#[from] DirectionError),
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Directivity of uniform linear arrays and of tabulated power patterns.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{angle_axis, read_text_array, ARG_FILE_HELP};
use crate::{
    c64,
    constants::DEFAULT_SPACING,
    directions::{lms_from_angles, theta_phi_grid, Lm},
    linear_directivity, numerical_directivity, rectangular_lattice, weighted_array_factor,
    FarfieldError,
};

const DEFAULT_NUM_ELEMENTS: usize = 8;
const DEFAULT_STEP_DEG: f64 = 1.0;

lazy_static::lazy_static! {
    static ref NUM_ELEMENTS_HELP: String =
        format!("The number of uniformly weighted elements in the linear array. Default: {DEFAULT_NUM_ELEMENTS}");

    static ref SPACING_HELP: String =
        format!("The element spacing of the linear array [wavelengths]. Default: {DEFAULT_SPACING}");

    static ref STEP_HELP: String =
        format!("The theta and phi step of grids for numerical integration [degrees]. Default: {DEFAULT_STEP_DEG}");
}

#[derive(Error, Debug)]
pub(super) enum DirectivityArgsError {
    #[error("The linear array must have at least one element")]
    NoElements,

    #[error("The angular step must be positive and finite; got {0} degrees")]
    BadStep(f64),

    #[error("The power pattern file has a {rows}x{cols} matrix, but a {step}° grid over the sphere needs {expected_rows}x{expected_cols} (a row per phi, a column per theta)")]
    PatternShape {
        rows: usize,
        cols: usize,
        step: f64,
        expected_rows: usize,
        expected_cols: usize,
    },
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct DirectivityCliArgs {
    #[clap(short, long, help = NUM_ELEMENTS_HELP.as_str(), help_heading = "LINEAR ARRAY")]
    pub(super) num_elements: Option<usize>,

    /// Real tapering weights for each element of the linear array. If given,
    /// these determine the number of elements. e.g. 0.5 1 1 0.5
    #[clap(
        short,
        long,
        multiple_values(true),
        allow_hyphen_values = true,
        help_heading = "LINEAR ARRAY"
    )]
    pub(super) weights: Option<Vec<f64>>,

    #[clap(short = 'd', long, help = SPACING_HELP.as_str(), help_heading = "LINEAR ARRAY")]
    pub(super) spacing: Option<f64>,

    /// Also integrate the linear array's pattern numerically over the whole
    /// sphere, as a check on the analytical result.
    #[clap(long, help_heading = "LINEAR ARRAY")]
    #[serde(default)]
    pub(super) numerical: bool,

    /// Instead of a linear array, get the directivity of this tabulated power
    /// pattern. It must cover the whole sphere, with a row per phi (0 up to
    /// 360 degrees, exclusive) and a column per theta (0 to 180 degrees,
    /// inclusive), both with the same step.
    #[clap(short, long, help_heading = "INPUT FILES")]
    pub(super) pattern_file: Option<PathBuf>,

    #[clap(long, help = STEP_HELP.as_str())]
    pub(super) step: Option<f64>,
}

impl DirectivityCliArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            num_elements: self.num_elements.or(other.num_elements),
            weights: self.weights.or(other.weights),
            spacing: self.spacing.or(other.spacing),
            numerical: self.numerical || other.numerical,
            pattern_file: self.pattern_file.or(other.pattern_file),
            step: self.step.or(other.step),
        }
    }
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct DirectivityArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "directivity")]
    #[serde(default)]
    pub(super) directivity_args: DirectivityCliArgs,
}

impl DirectivityArgs {
    /// Merge the command-line arguments with those in the argument file, if
    /// any, preferring those on the command line.
    pub(super) fn merge(self) -> Result<DirectivityArgs, FarfieldError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let DirectivityArgs {
                args_file: _,
                directivity_args,
            } = unpack_arg_file!(arg_file);

            Ok(DirectivityArgs {
                args_file: None,
                directivity_args: cli_args.directivity_args.merge(directivity_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), FarfieldError> {
        debug!("{:#?}", self);

        let DirectivityArgs {
            args_file: _,
            directivity_args:
                DirectivityCliArgs {
                    num_elements,
                    weights,
                    spacing,
                    numerical,
                    pattern_file,
                    step,
                },
        } = self;

        let step = step.unwrap_or(DEFAULT_STEP_DEG);
        if !(step.is_finite() && step > 0.0) {
            return Err(DirectivityArgsError::BadStep(step).into());
        }
        let theta = angle_axis(step, 180.0, true);
        let phi = angle_axis(step, 360.0, false);

        if let Some(pattern_file) = pattern_file {
            let pattern = read_text_array(&pattern_file)?;
            if pattern.dim() != (phi.len(), theta.len()) {
                return Err(DirectivityArgsError::PatternShape {
                    rows: pattern.nrows(),
                    cols: pattern.ncols(),
                    step,
                    expected_rows: phi.len(),
                    expected_cols: theta.len(),
                }
                .into());
            }
            if dry_run {
                info!("Dry run -- exiting now.");
                return Ok(());
            }

            let d = numerical_directivity(pattern.view(), &theta, &phi)?;
            info!(
                "Numerical directivity of {}: {d:.6} ({:.3} dBi)",
                pattern_file.display(),
                10.0 * d.log10()
            );
            return Ok(());
        }

        let weights: Vec<c64> = match weights {
            Some(w) => w.into_iter().map(|w| c64::new(w, 0.0)).collect(),
            None => vec![c64::new(1.0, 0.0); num_elements.unwrap_or(DEFAULT_NUM_ELEMENTS)],
        };
        if weights.is_empty() {
            return Err(DirectivityArgsError::NoElements.into());
        }
        let spacing = spacing.unwrap_or(DEFAULT_SPACING);
        info!(
            "Linear array of {} elements spaced {spacing} wavelengths apart",
            weights.len()
        );
        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let d = linear_directivity(&weights, spacing)?;
        info!("Analytical directivity: {d:.6} ({:.3} dBi)", 10.0 * d.log10());

        if numerical {
            let positions = rectangular_lattice(weights.len(), 1, spacing, spacing)?;
            let (flat_theta, flat_phi) = theta_phi_grid(&theta, &phi);
            let sources = lms_from_angles(&flat_theta, &flat_phi)?;
            let afs = weighted_array_factor(&sources, Lm::default(), &weights, &positions)?;
            let pattern = afs
                .mapv(|af| af.norm_sqr())
                .into_shape_with_order((phi.len(), theta.len()))
                .map_err(|e| FarfieldError::Generic(e.to_string()))?;

            let d = numerical_directivity(pattern.view(), &theta, &phi)?;
            info!(
                "Numerical directivity ({step}° grid): {d:.6} ({:.3} dBi)",
                10.0 * d.log10()
            );
        }

        Ok(())
    }
}

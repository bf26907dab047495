// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Evaluate steered array patterns over a grid of directions.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};

use clap::Parser;
use itertools::Itertools;
use log::{debug, info};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use super::common::{angle_axis, read_text_array, ArrayArgs, ARG_FILE_HELP};
use crate::{
    array_factor::{array_factor_grid, array_factor_lm, array_factor_pixels},
    constants::{DEFAULT_NSIDE, DEFAULT_SKY_FOV_DEG},
    directions::{lm_grid, visible, Lm},
    healpix::Nside,
    power_pattern, to_db, FarfieldError, Positions,
};

const DEFAULT_NUM_LM: usize = 201;
const DEFAULT_STEP_DEG: f64 = 1.0;
const DEFAULT_MAX_THETA_DEG: f64 = 90.0;
const DEFAULT_OUTPUT_FILENAME: &str = "pattern.tsv";

lazy_static::lazy_static! {
    static ref GRIDS_COMMA_SEPARATED: String = PatternGrid::iter().join(", ");

    static ref GRID_HELP: String =
        format!("The directions to evaluate the pattern at. Supported grids: {}. Default: {}", *GRIDS_COMMA_SEPARATED, PatternGrid::Lm);

    static ref NUM_LM_HELP: String =
        format!("The number of l and m samples across [-1, 1] for the lm grid. Default: {DEFAULT_NUM_LM}");

    static ref STEP_HELP: String =
        format!("The theta and phi step for the theta-phi grid [degrees]. Default: {DEFAULT_STEP_DEG}");

    static ref MAX_THETA_HELP: String =
        format!("The largest zenith angle of the theta-phi grid [degrees]. Default: {DEFAULT_MAX_THETA_DEG}");

    static ref NSIDE_HELP: String =
        format!("The HEALPix nside of the healpix grid. Default: {DEFAULT_NSIDE}");

    static ref FOV_HELP: String =
        format!("The radius of the disc of HEALPix pixels about zenith [degrees]. Default: {DEFAULT_SKY_FOV_DEG}");

    static ref OUTPUT_HELP: String =
        format!("The file to write the pattern to. The file is tab-separated; each line holds the direction (l and m for the lm grid, theta and phi [radians] for the theta-phi grid, and the pixel, theta and phi [radians] for the healpix grid) followed by the power. Default: {DEFAULT_OUTPUT_FILENAME}");
}

#[derive(Debug, Display, EnumIter, EnumString, Clone, Copy, PartialEq)]
#[strum(ascii_case_insensitive)]
pub(crate) enum PatternGrid {
    #[strum(serialize = "lm")]
    Lm,

    #[strum(serialize = "theta-phi")]
    ThetaPhi,

    #[strum(serialize = "healpix")]
    Healpix,
}

#[derive(Error, Debug)]
pub(super) enum PatternArgsError {
    #[error("Unrecognised pattern grid '{0}'. Supported grids: {}", *GRIDS_COMMA_SEPARATED)]
    UnknownGrid(String),

    #[error("Element patterns can't be used with the lm grid; use the theta-phi or healpix grid")]
    ElementPatternWithLm,

    #[error("The angular step must be positive and finite; got {0} degrees")]
    BadStep(f64),

    #[error("At least 2 samples are needed along l and m; got {0}")]
    TooFewLmSamples(usize),

    #[error("The element pattern has {got} values, but the HEALPix map at nside {nside} needs {expected}")]
    ElementPatternLength {
        nside: u32,
        expected: u64,
        got: usize,
    },
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PatternCliArgs {
    #[clap(short, long, help = GRID_HELP.as_str(), help_heading = "DIRECTIONS")]
    pub(super) grid: Option<String>,

    #[clap(long, help = NUM_LM_HELP.as_str(), help_heading = "DIRECTIONS")]
    pub(super) num_lm: Option<usize>,

    #[clap(long, help = STEP_HELP.as_str(), help_heading = "DIRECTIONS")]
    pub(super) step: Option<f64>,

    #[clap(long, help = MAX_THETA_HELP.as_str(), help_heading = "DIRECTIONS")]
    pub(super) max_theta: Option<f64>,

    #[clap(long, help = NSIDE_HELP.as_str(), help_heading = "DIRECTIONS")]
    pub(super) nside: Option<u32>,

    #[clap(long, help = FOV_HELP.as_str(), help_heading = "DIRECTIONS")]
    pub(super) fov: Option<f64>,

    /// The zenith angle to steer the array towards [degrees]. Default: 0
    #[clap(long, allow_hyphen_values = true, help_heading = "STEERING")]
    pub(super) theta0: Option<f64>,

    /// The azimuth to steer the array towards, measured from the x axis
    /// towards the y axis [degrees]. Default: 0
    #[clap(long, allow_hyphen_values = true, help_heading = "STEERING")]
    pub(super) phi0: Option<f64>,

    /// An element (field) pattern to multiply the array factor by. For the
    /// theta-phi grid this is a matrix with a row per phi and a column per
    /// theta; for the healpix grid it has a value for every pixel of the map.
    #[clap(short, long, help_heading = "INPUT FILES")]
    pub(super) element_pattern: Option<PathBuf>,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,

    /// Write the power normalised to its peak in decibels, rather than linear
    /// power.
    #[clap(long, help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) db: bool,
}

impl PatternCliArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            grid: self.grid.or(other.grid),
            num_lm: self.num_lm.or(other.num_lm),
            step: self.step.or(other.step),
            max_theta: self.max_theta.or(other.max_theta),
            nside: self.nside.or(other.nside),
            fov: self.fov.or(other.fov),
            theta0: self.theta0.or(other.theta0),
            phi0: self.phi0.or(other.phi0),
            element_pattern: self.element_pattern.or(other.element_pattern),
            output: self.output.or(other.output),
            db: self.db || other.db,
        }
    }
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PatternArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "array")]
    #[serde(default)]
    pub(super) array_args: ArrayArgs,

    #[clap(flatten)]
    #[serde(rename = "pattern")]
    #[serde(default)]
    pub(super) pattern_args: PatternCliArgs,
}

/// The directions and power of an evaluated pattern, ready to be written out.
struct Evaluated {
    /// The leading columns of each output line.
    directions: Vec<String>,
    power: Array1<f64>,
}

impl PatternArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<PatternArgs, FarfieldError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let PatternArgs {
                args_file: _,
                array_args,
                pattern_args,
            } = unpack_arg_file!(arg_file);

            Ok(PatternArgs {
                args_file: None,
                array_args: cli_args.array_args.merge(array_args),
                pattern_args: cli_args.pattern_args.merge(pattern_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), FarfieldError> {
        debug!("{:#?}", self);

        let PatternArgs {
            args_file: _,
            array_args,
            pattern_args:
                PatternCliArgs {
                    grid,
                    num_lm,
                    step,
                    max_theta,
                    nside,
                    fov,
                    theta0,
                    phi0,
                    element_pattern,
                    output,
                    db,
                },
        } = self;

        let positions = array_args.parse()?;
        let grid = match grid {
            Some(g) => PatternGrid::from_str(&g).map_err(|_| PatternArgsError::UnknownGrid(g))?,
            None => PatternGrid::Lm,
        };
        let theta0 = theta0.unwrap_or_default().to_radians();
        let phi0 = phi0.unwrap_or_default().to_radians();
        info!(
            "Evaluating the {grid} pattern steered towards theta = {:.4}°, phi = {:.4}°",
            theta0.to_degrees(),
            phi0.to_degrees()
        );
        if grid == PatternGrid::Lm && element_pattern.is_some() {
            return Err(PatternArgsError::ElementPatternWithLm.into());
        }
        let step = step.unwrap_or(DEFAULT_STEP_DEG);
        if !(step.is_finite() && step > 0.0) {
            return Err(PatternArgsError::BadStep(step).into());
        }
        let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILENAME));

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let Evaluated {
            directions,
            mut power,
        } = match grid {
            PatternGrid::Lm => lm_pattern(
                &positions,
                num_lm.unwrap_or(DEFAULT_NUM_LM),
                Lm::from_theta_phi(theta0, phi0),
            )?,
            PatternGrid::ThetaPhi => theta_phi_pattern(
                &positions,
                step,
                max_theta.unwrap_or(DEFAULT_MAX_THETA_DEG),
                (theta0, phi0),
                element_pattern,
            )?,
            PatternGrid::Healpix => healpix_pattern(
                &positions,
                Nside::new(nside.unwrap_or(DEFAULT_NSIDE))?,
                fov.unwrap_or(DEFAULT_SKY_FOV_DEG).to_radians(),
                (theta0, phi0),
                element_pattern,
            )?,
        };
        if db {
            power = to_db(power.view())?;
        }

        let mut out = BufWriter::new(File::create(&output)?);
        for (direction, power) in directions.iter().zip(power.iter()) {
            writeln!(&mut out, "{direction}\t{power:e}")?;
        }
        out.flush()?;
        info!("Wrote {} directions to {}", power.len(), output.display());

        Ok(())
    }
}

fn lm_pattern(positions: &Positions, num_lm: usize, steer: Lm) -> Result<Evaluated, FarfieldError> {
    if num_lm < 2 {
        return Err(PatternArgsError::TooFewLmSamples(num_lm).into());
    }
    let (l, m) = lm_grid(num_lm);
    // Only directions above the horizon are evaluated.
    let (_, lms) = visible(&l, &m)?;
    let (l, m): (Vec<f64>, Vec<f64>) = lms.iter().map(|lm| (lm.l, lm.m)).unzip();
    debug!("{} of {} lm directions are visible", l.len(), num_lm * num_lm);

    let afs = array_factor_lm(&l, &m, steer.l, steer.m, positions)?;
    Ok(Evaluated {
        directions: l.iter().zip(&m).map(|(l, m)| format!("{l}\t{m}")).collect(),
        power: power_pattern(afs.view(), None)?,
    })
}

fn theta_phi_pattern(
    positions: &Positions,
    step: f64,
    max_theta: f64,
    (theta0, phi0): (f64, f64),
    element_pattern: Option<PathBuf>,
) -> Result<Evaluated, FarfieldError> {
    let theta = angle_axis(step, max_theta, true);
    let phi = angle_axis(step, 360.0, false);
    debug!("theta-phi grid: {} x {}", theta.len(), phi.len());

    let afs = array_factor_grid(&theta, &phi, theta0, phi0, positions)?;
    let element_pattern = element_pattern
        .map(|f| read_text_array(&f))
        .transpose()?;
    let power = power_pattern(afs.view(), element_pattern.as_ref().map(|e| e.view()))?;

    let directions = phi
        .iter()
        .flat_map(|phi| theta.iter().map(move |theta| format!("{theta}\t{phi}")))
        .collect();
    Ok(Evaluated {
        directions,
        power: Array1::from_iter(power.iter().copied()),
    })
}

fn healpix_pattern(
    positions: &Positions,
    nside: Nside,
    fov: f64,
    (theta0, phi0): (f64, f64),
    element_pattern: Option<PathBuf>,
) -> Result<Evaluated, FarfieldError> {
    let pixels = nside.query_disc([0.0, 0.0, 1.0], fov)?;
    // The array is steered towards the centre of the pixel containing the
    // requested direction.
    let scan_pixel = nside.ang2pix(theta0, phi0)?;
    debug!(
        "{} pixels within {:.2}° of zenith; steering towards pixel {scan_pixel}",
        pixels.len(),
        fov.to_degrees()
    );

    let afs = array_factor_pixels(nside, &pixels, scan_pixel, positions)?;
    let element_pattern = match element_pattern {
        Some(f) => {
            let map = read_text_array(&f)?;
            if map.len() as u64 != nside.npix() {
                return Err(PatternArgsError::ElementPatternLength {
                    nside: nside.get(),
                    expected: nside.npix(),
                    got: map.len(),
                }
                .into());
            }
            let map = Array1::from_iter(map.iter().copied());
            Some(Array1::from_iter(pixels.iter().map(|&p| map[p as usize])))
        }
        None => None,
    };
    let power = power_pattern(afs.view(), element_pattern.as_ref().map(|e| e.view()))?;

    let directions = pixels
        .iter()
        .map(|&pixel| {
            let (theta, phi) = nside.pix2ang(pixel)?;
            Ok(format!("{pixel}\t{theta}\t{phi}"))
        })
        .collect::<Result<_, FarfieldError>>()?;
    Ok(Evaluated { directions, power })
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Form a dirty image by scanning an array's beam over a HEALPix sky.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use log::{debug, info};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{read_text_array, ArrayArgs, ARG_FILE_HELP};
use crate::{
    apparent_sky,
    constants::{DEFAULT_SCAN_FOV_DEG, DEFAULT_SKY_FOV_DEG},
    dirty_image,
    healpix::Nside,
    to_db, FarfieldError,
};

const DEFAULT_OUTPUT_FILENAME: &str = "dirty_image.tsv";

lazy_static::lazy_static! {
    static ref SKY_FOV_HELP: String =
        format!("The radius of the visible sky about zenith [degrees]. Only sky pixels within this disc contribute to the image. Default: {DEFAULT_SKY_FOV_DEG}");

    static ref SCAN_FOV_HELP: String =
        format!("The radius of the imaged region about zenith [degrees]. The beam is steered towards every pixel in this disc. Default: {DEFAULT_SCAN_FOV_DEG}");

    static ref OUTPUT_HELP: String =
        format!("The file to write the dirty image to. The file is tab-separated, with each line holding the pixel, its u and v direction cosines, and the image value. Default: {DEFAULT_OUTPUT_FILENAME}");
}

#[derive(Error, Debug)]
pub(super) enum ImageArgsError {
    #[error("No sky map was supplied")]
    NoSky,

    #[error("The element pattern has {got} values, but the sky map has {expected}")]
    ElementPatternLength { expected: usize, got: usize },

    #[error("The field of view must be positive and finite; got {0} degrees")]
    BadFov(f64),
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ImageCliArgs {
    /// The true sky brightness: a RING-ordered HEALPix map with one value per
    /// pixel. The nside is inferred from the number of values.
    #[clap(short, long, help_heading = "INPUT FILES")]
    pub(super) sky: Option<PathBuf>,

    /// An element pattern to weight the sky by, as a HEALPix map with the
    /// same nside as the sky.
    #[clap(short, long, help_heading = "INPUT FILES")]
    pub(super) element_pattern: Option<PathBuf>,

    #[clap(long, help = SKY_FOV_HELP.as_str(), help_heading = "IMAGING")]
    pub(super) sky_fov: Option<f64>,

    #[clap(long, help = SCAN_FOV_HELP.as_str(), help_heading = "IMAGING")]
    pub(super) scan_fov: Option<f64>,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,

    /// Write the image normalised to its peak in decibels.
    #[clap(long, help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) db: bool,
}

impl ImageCliArgs {
    fn merge(self, other: Self) -> Self {
        Self {
            sky: self.sky.or(other.sky),
            element_pattern: self.element_pattern.or(other.element_pattern),
            sky_fov: self.sky_fov.or(other.sky_fov),
            scan_fov: self.scan_fov.or(other.scan_fov),
            output: self.output.or(other.output),
            db: self.db || other.db,
        }
    }
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ImageArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "array")]
    #[serde(default)]
    pub(super) array_args: ArrayArgs,

    #[clap(flatten)]
    #[serde(rename = "image")]
    #[serde(default)]
    pub(super) image_args: ImageCliArgs,
}

impl ImageArgs {
    /// Merge the command-line arguments with those in the argument file, if
    /// any, preferring those on the command line.
    pub(super) fn merge(self) -> Result<ImageArgs, FarfieldError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let ImageArgs {
                args_file: _,
                array_args,
                image_args,
            } = unpack_arg_file!(arg_file);

            Ok(ImageArgs {
                args_file: None,
                array_args: cli_args.array_args.merge(array_args),
                image_args: cli_args.image_args.merge(image_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), FarfieldError> {
        debug!("{:#?}", self);

        let ImageArgs {
            args_file: _,
            array_args,
            image_args:
                ImageCliArgs {
                    sky,
                    element_pattern,
                    sky_fov,
                    scan_fov,
                    output,
                    db,
                },
        } = self;

        let positions = array_args.parse()?;
        let sky_fov = sky_fov.unwrap_or(DEFAULT_SKY_FOV_DEG);
        let scan_fov = scan_fov.unwrap_or(DEFAULT_SCAN_FOV_DEG);
        for fov in [sky_fov, scan_fov] {
            if !(fov.is_finite() && fov > 0.0) {
                return Err(ImageArgsError::BadFov(fov).into());
            }
        }
        let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILENAME));

        let sky_map = read_text_array(&sky.ok_or(ImageArgsError::NoSky)?)?;
        let sky_map = Array1::from_iter(sky_map.iter().copied());
        let nside = Nside::from_npix(sky_map.len() as u64)?;
        let element_pattern = match element_pattern {
            Some(f) => {
                let map = read_text_array(&f)?;
                if map.len() != sky_map.len() {
                    return Err(ImageArgsError::ElementPatternLength {
                        expected: sky_map.len(),
                        got: map.len(),
                    }
                    .into());
                }
                Some(Array1::from_iter(map.iter().copied()))
            }
            None => None,
        };

        let zenith = [0.0, 0.0, 1.0];
        let sky_pixels = nside.query_disc(zenith, sky_fov.to_radians())?;
        let scan_pixels = nside.query_disc(zenith, scan_fov.to_radians())?;
        info!(
            "Imaging {} pixels (nside {}) from {} sky pixels with {} elements",
            scan_pixels.len(),
            nside.get(),
            sky_pixels.len(),
            positions.len()
        );
        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let sky = Array1::from_iter(sky_pixels.iter().map(|&p| sky_map[p as usize]));
        let sky = match element_pattern {
            Some(e) => {
                let e = Array1::from_iter(sky_pixels.iter().map(|&p| e[p as usize]));
                apparent_sky(e.view(), sky.view())?
            }
            None => sky,
        };

        let mut image = dirty_image(nside, &sky_pixels, &scan_pixels, &positions, sky.view())?;
        if db {
            image = to_db(image.view())?;
        }

        let mut out = BufWriter::new(File::create(&output)?);
        for (&pixel, value) in scan_pixels.iter().zip(image.iter()) {
            let [u, v, _] = nside.pix2vec(pixel)?;
            writeln!(&mut out, "{pixel}\t{u}\t{v}\t{value:e}")?;
        }
        out.flush()?;
        info!("Wrote the dirty image to {}", output.display());

        Ok(())
    }
}

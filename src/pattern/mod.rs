// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turning array factors into power patterns and images.

mod error;

pub use error::PatternError;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::debug;
use ndarray::{parallel::prelude::*, prelude::*, Zip};
use rayon::prelude::*;

use crate::{
    array_factor::steered_array_factor, c64, directions::lms_from_pixels, healpix::Nside,
    Positions, PROGRESS_BARS,
};

/// The number of scan pixels handled by each parallel work item when forming a
/// dirty image.
const SCAN_CHUNK_SIZE: usize = 64;

/// Get the power pattern `|AF|^2`, optionally multiplied by the square of an
/// element (field) pattern. The element pattern must have the same shape as
/// the array factors.
pub fn power_pattern<D: Dimension>(
    afs: ArrayView<c64, D>,
    element_pattern: Option<ArrayView<f64, D>>,
) -> Result<Array<f64, D>, PatternError> {
    let mut power = afs.mapv(|af| af.norm_sqr());
    if let Some(e) = element_pattern {
        if e.shape() != afs.shape() {
            return Err(PatternError::ElementPatternMismatch {
                afs: afs.shape().to_vec(),
                element: e.shape().to_vec(),
            });
        }
        Zip::from(&mut power).and(&e).for_each(|p, &e| *p *= e * e);
    }
    Ok(power)
}

/// Normalise a pattern to its maximum and convert it to decibels, i.e.
/// `10 log10(v / max(v))`. Zeros become negative infinity.
pub fn to_db<D: Dimension>(values: ArrayView<f64, D>) -> Result<Array<f64, D>, PatternError> {
    let max = values.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    if max.is_nan() || max <= 0.0 {
        return Err(PatternError::NoPositiveValues(max));
    }
    Ok(values.mapv(|v| 10.0 * (v / max).log10()))
}

/// The sky as seen through an element: the sky brightness of each pixel
/// multiplied by the element pattern in that pixel.
pub fn apparent_sky(
    element_pattern: ArrayView1<f64>,
    sky: ArrayView1<f64>,
) -> Result<Array1<f64>, PatternError> {
    if element_pattern.len() != sky.len() {
        return Err(PatternError::ElementPatternMismatch {
            afs: sky.shape().to_vec(),
            element: element_pattern.shape().to_vec(),
        });
    }
    Ok(&element_pattern * &sky)
}

/// Form a dirty image by scanning the array's power beam over `scan_pixels`.
/// For each scan pixel, the value is
///
/// `sum_s |AF(scan, s)|^2 sky[s]`
///
/// where `s` runs over `sky_pixels` and `sky` holds the (apparent) sky
/// brightness of each of those pixels. Scan pixels are handled in parallel.
pub fn dirty_image(
    nside: Nside,
    sky_pixels: &[u64],
    scan_pixels: &[u64],
    positions: &Positions,
    sky: ArrayView1<f64>,
) -> Result<Array1<f64>, PatternError> {
    if sky.len() != sky_pixels.len() {
        return Err(PatternError::SkyMismatch {
            sky: sky.len(),
            pixels: sky_pixels.len(),
        });
    }
    if scan_pixels.is_empty() {
        return Err(PatternError::NoScanPixels);
    }
    let sources = lms_from_pixels(nside, sky_pixels)?;
    let steers = lms_from_pixels(nside, scan_pixels)?;
    debug!(
        "Forming a dirty image of {} pixels from {} sky pixels and {} elements",
        steers.len(),
        sources.len(),
        positions.len()
    );

    let progress_bar = ProgressBar::with_draw_target(
        Some(steers.len() as _),
        if PROGRESS_BARS.load() {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        },
    )
    .with_style(
        ProgressStyle::default_bar()
            .template("{msg:17}: [{wide_bar:.blue}] {pos:2}/{len:2} pixels ({elapsed_precise}<{eta_precise})")
            .unwrap()
            .progress_chars("=> "),
    )
    .with_position(0)
    .with_message("Imaging");

    let mut image = Array1::zeros(steers.len());
    image
        .axis_chunks_iter_mut(Axis(0), SCAN_CHUNK_SIZE)
        .into_par_iter()
        .zip(steers.par_chunks(SCAN_CHUNK_SIZE))
        .try_for_each(|(mut image, steers)| {
            let afs = steered_array_factor(&sources, steers, positions)?;
            Zip::from(&mut image)
                .and(afs.rows())
                .for_each(|pixel, afs| {
                    *pixel = afs
                        .iter()
                        .zip(sky.iter())
                        .map(|(af, &s)| af.norm_sqr() * s)
                        .sum();
                });
            progress_bar.inc(steers.len() as _);
            Ok::<(), PatternError>(())
        })?;
    progress_bar.abandon_with_message("Finished imaging");

    Ok(image)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! End-to-end use of the library, following the usual design-study workflow:
//! lay out an array, look at its beam, and get figures of merit.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::prelude::*;

use farfield::{
    array_factor_grid, array_factor_lm, array_factor_pixels_matrix, c64,
    directions::{lm_grid, lms_from_angles, theta_phi_grid, visible},
    dirty_image,
    healpix::Nside,
    hexagonal_lattice, linear_directivity, numerical_directivity, power_pattern,
    rectangular_lattice, to_db, weighted_array_factor, Lm,
};

#[test]
fn hexagonal_beam_on_an_lm_grid() {
    let positions = hexagonal_lattice(5, 0.9).unwrap();
    assert_eq!(positions.len(), 23);

    let (l, m) = lm_grid(101);
    let (_, lms) = visible(&l, &m).unwrap();
    let (l, m): (Vec<f64>, Vec<f64>) = lms.iter().map(|lm| (lm.l, lm.m)).unzip();
    let afs = array_factor_lm(&l, &m, 0.0, 0.0, &positions).unwrap();
    let db = to_db(power_pattern(afs.view(), None).unwrap().view()).unwrap();

    let i_peak = db
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .unwrap()
        .0;
    assert_abs_diff_eq!(l[i_peak], 0.0, epsilon = 0.02);
    assert_abs_diff_eq!(m[i_peak], 0.0, epsilon = 0.02);
    assert_abs_diff_eq!(db[i_peak], 0.0);
}

#[test]
fn tapered_linear_array_directivity() {
    let weights: Vec<c64> = [0.3, 0.7, 1.0, 1.0, 0.7, 0.3]
        .iter()
        .map(|&w| c64::new(w, 0.0))
        .collect();
    let analytical = linear_directivity(&weights, 0.5).unwrap();
    // Half-wave spacing: (sum w)^2 / sum w^2.
    let sum: f64 = weights.iter().map(|w| w.re).sum();
    let sum_sq: f64 = weights.iter().map(|w| w.re * w.re).sum();
    assert_relative_eq!(analytical, sum * sum / sum_sq, max_relative = 1e-12);

    // The same array, integrated numerically.
    let positions = rectangular_lattice(6, 1, 0.5, 0.5).unwrap();
    let theta: Vec<f64> = (0..=180).map(|i| (i as f64).to_radians()).collect();
    let phi: Vec<f64> = (0..360).map(|i| (i as f64).to_radians()).collect();
    let (flat_theta, flat_phi) = theta_phi_grid(&theta, &phi);
    let sources = lms_from_angles(&flat_theta, &flat_phi).unwrap();
    let afs = weighted_array_factor(&sources, Lm::default(), &weights, &positions)
        .unwrap()
        .into_shape_with_order((phi.len(), theta.len()))
        .unwrap();
    let pattern = power_pattern(afs.view(), None).unwrap();
    let numerical = numerical_directivity(pattern.view(), &theta, &phi).unwrap();
    assert_relative_eq!(numerical, analytical, max_relative = 0.01);

    // Unweighted grids agree with the weighted result for unit weights.
    let afs = array_factor_grid(&theta, &phi, 0.0, 0.0, &positions).unwrap();
    let d = numerical_directivity(afs.mapv(|af| af.norm_sqr()).view(), &theta, &phi).unwrap();
    assert_relative_eq!(d, 6.0, max_relative = 0.01);
}

#[test]
fn dirty_image_of_a_point_source() {
    let nside = Nside::new(8).unwrap();
    let positions = hexagonal_lattice(5, 0.9).unwrap();
    let sky_pixels = nside.query_disc([0.0, 0.0, 1.0], 90_f64.to_radians()).unwrap();
    let scan_pixels = nside.query_disc([0.0, 0.0, 1.0], 30_f64.to_radians()).unwrap();

    // A single source at one of the scan pixels.
    let source_pixel = scan_pixels[scan_pixels.len() / 2];
    let sky = Array1::from_iter(
        sky_pixels
            .iter()
            .map(|&p| if p == source_pixel { 1.0 } else { 0.0 }),
    );

    let image = dirty_image(nside, &sky_pixels, &scan_pixels, &positions, sky.view()).unwrap();
    let i_peak = image
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .unwrap()
        .0;
    assert_eq!(scan_pixels[i_peak], source_pixel);
    assert_abs_diff_eq!(image[i_peak], 23.0 * 23.0, epsilon = 1e-9);

    // The image is the batched array factor's power times the sky.
    let afs = array_factor_pixels_matrix(nside, &sky_pixels, &scan_pixels, &positions).unwrap();
    let expected = afs.mapv(|af| af.norm_sqr()).dot(&sky);
    assert_abs_diff_eq!(image, expected, epsilon = 1e-9);
}

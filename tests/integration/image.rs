// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use crate::{farfield, get_cmd_output, read_tsv, write_column};

#[test]
fn test_point_source_image() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("image.tsv");
    // nside 4, with a single bright pixel next to the north pole.
    let mut sky = vec![0.0; 192];
    sky[0] = 1.0;
    let sky = write_column("sky.txt", tmp_dir.path(), &sky);

    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "image",
            "--no-progress-bars",
            "--sky", &format!("{}", sky.display()),
            "--scan-fov", "30",
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "image failed: {}", get_cmd_output(cmd).1);

    let image = read_tsv(&output);
    assert!(!image.is_empty());
    // Pixels are written in ascending order, with u and v in [-1, 1].
    assert_eq!(image[0][0], 0.0);
    for row in &image {
        assert_eq!(row.len(), 4);
        assert!(row[1].abs() <= 1.0 && row[2].abs() <= 1.0);
    }
    // Steering at the bright pixel gives the full coherent gain of the default
    // 4x4 array, and nothing is brighter.
    assert_abs_diff_eq!(image[0][3], 256.0, epsilon = 1e-9);
    assert!(image.iter().all(|row| row[3] <= 256.0 + 1e-9));
}

#[test]
fn test_element_pattern_weights_the_sky() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("image.tsv");
    let mut sky = vec![0.0; 48];
    sky[0] = 1.0;
    let sky = write_column("sky.txt", tmp_dir.path(), &sky);
    let element = write_column("element.txt", tmp_dir.path(), &[0.25; 48]);

    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "image",
            "--sky", &format!("{}", sky.display()),
            "--element-pattern", &format!("{}", element.display()),
            "--nx", "2",
            "--ny", "2",
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "image failed: {}", get_cmd_output(cmd).1);

    let image = read_tsv(&output);
    // 4 elements: 16 * 0.25.
    assert_abs_diff_eq!(image[0][3], 4.0, epsilon = 1e-9);
}

#[test]
fn test_dry_run_writes_nothing() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("image.tsv");
    let sky = write_column("sky.txt", tmp_dir.path(), &[1.0; 48]);

    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "image",
            "--dry-run",
            "--sky", &format!("{}", sky.display()),
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "image failed: {}", get_cmd_output(cmd).1);
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run"), "{stdout}");
    assert!(!output.exists());
}

#[test]
fn test_bad_sky_maps() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let sky = write_column("sky.txt", tmp_dir.path(), &[1.0; 10]);

    let cmd = farfield()
        .args(["image", "--sky", &format!("{}", sky.display())])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("HEALPix"), "{stderr}");

    let cmd = farfield().args(["image"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("No sky map"), "{stderr}");
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use approx::assert_abs_diff_eq;
use indoc::indoc;
use tempfile::TempDir;

use crate::{farfield, get_cmd_output, make_file_in_dir, read_tsv, write_column};

#[test]
fn test_lm_pattern_peaks_at_broadside() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("pattern.tsv");

    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "pattern",
            "--no-progress-bars",
            "--nx", "4",
            "--num-lm", "21",
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "pattern failed: {}", get_cmd_output(cmd).1);

    let pattern = read_tsv(&output);
    assert!(!pattern.is_empty());
    // Only directions above the horizon are written.
    assert!(pattern
        .iter()
        .all(|row| row[0] * row[0] + row[1] * row[1] <= 1.0 + 1e-12));
    let peak = pattern
        .iter()
        .max_by(|a, b| a[2].total_cmp(&b[2]))
        .unwrap();
    // 16 elements, coherently summed.
    assert_abs_diff_eq!(peak[0], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(peak[1], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(peak[2], 256.0, epsilon = 1e-9);
}

#[test]
fn test_theta_phi_pattern_in_db() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("pattern.tsv");

    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "pattern",
            "--grid", "theta-phi",
            "--step", "5",
            "--nx", "3",
            "--theta0", "20",
            "--phi0", "0",
            "--db",
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "pattern failed: {}", get_cmd_output(cmd).1);

    let pattern = read_tsv(&output);
    // theta 0 to 90 inclusive, phi 0 to 355.
    assert_eq!(pattern.len(), 19 * 72);
    let peak = pattern
        .iter()
        .max_by(|a, b| a[2].total_cmp(&b[2]))
        .unwrap();
    assert_abs_diff_eq!(peak[2], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(peak[0], 20_f64.to_radians(), epsilon = 1e-12);
    assert_abs_diff_eq!(peak[1], 0.0, epsilon = 1e-12);
    assert!(pattern.iter().all(|row| row[2] <= 0.0));
}

#[test]
fn test_healpix_pattern_with_element_pattern() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("pattern.tsv");
    // nside 2; every pixel has an element field of 0.5.
    let element = write_column("element.txt", tmp_dir.path(), &[0.5; 48]);

    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "pattern",
            "--grid", "healpix",
            "--nside", "2",
            "--nx", "2",
            "--ny", "1",
            "-e", &format!("{}", element.display()),
            "-o", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "pattern failed: {}", get_cmd_output(cmd).1);

    let pattern = read_tsv(&output);
    // The 3 northern rings at nside 2; the equator is exactly 90 degrees away,
    // which is just beyond cos(pi / 2) in floating point.
    assert_eq!(pattern.len(), 20);
    for row in &pattern {
        assert_eq!(row.len(), 4);
        assert!(row[1] <= std::f64::consts::FRAC_PI_2 + 1e-12);
        // A 2 element array has a power of at most 4; the element pattern
        // scales that by 0.25.
        assert!(row[3] <= 1.0 + 1e-12);
    }
}

#[test]
fn test_element_pattern_errors() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let element = write_column("element.txt", tmp_dir.path(), &[1.0; 10]);

    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "pattern",
            "--grid", "healpix",
            "--nside", "2",
            "-e", &format!("{}", element.display()),
            "-o", &format!("{}", tmp_dir.path().join("p.tsv").display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("needs 48"), "{stderr}");

    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "pattern",
            "-e", &format!("{}", element.display()),
            "-o", &format!("{}", tmp_dir.path().join("p.tsv").display()),
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("lm grid"), "{stderr}");
}

#[test]
fn test_pattern_arg_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("pattern.tsv");
    let saved = tmp_dir.path().join("saved.toml");
    let (args_file, mut f) = make_file_in_dir("args.toml", tmp_dir.path());
    write!(
        f,
        indoc! {r#"
            [array]
            layout = "hex"
            nx = 3
            dx = 0.9

            [pattern]
            grid = "lm"
            num_lm = 11
            output = "{}"
        "#},
        output.display()
    )
    .unwrap();

    // The CLI's nx wins over the file's.
    #[rustfmt::skip]
    let cmd = farfield()
        .args([
            "pattern",
            &format!("{}", args_file.display()),
            "--nx", "2",
            "--save-toml", &format!("{}", saved.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "pattern failed: {}", get_cmd_output(cmd).1);

    let pattern = read_tsv(&output);
    let peak = pattern
        .iter()
        .map(|row| row[2])
        .fold(f64::NEG_INFINITY, f64::max);
    // nx = 2 gives a hexagonal array of 2 elements.
    assert_abs_diff_eq!(peak, 4.0, epsilon = 1e-9);

    let saved = std::fs::read_to_string(saved).unwrap();
    assert!(saved.contains("[array]"), "{saved}");
    assert!(saved.contains("nx = 2"), "{saved}");
    assert!(saved.contains("layout = \"hex\""), "{saved}");
}

#[test]
fn test_bad_arg_file_extension() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let (args_file, _) = make_file_in_dir("args.yaml", tmp_dir.path());

    let cmd = farfield()
        .args(["pattern", &format!("{}", args_file.display())])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("recognised file extension"), "{stderr}");
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics.


use std::f64::consts::PI;

/// The normalised sinc function, `sin(pi x) / (pi x)`. `sinc(0) == 1`.
///
/// # Examples
///
/// `assert_abs_diff_eq!(sinc(0.5), 2.0 / PI);`
#[inline]
pub(crate) fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let pi_x = PI * x;
        pi_x.sin() / pi_x
    }
}

/// If the supplied values are evenly spaced, return the spacing between them.
/// Every step is compared against the first step; a step differing by more
/// than `rtol` (relative to the first step) fails the check. Fewer than two
/// values have no spacing.
pub(crate) fn uniform_step(values: &[f64], rtol: f64) -> Option<f64> {
    let step = match values {
        [first, second, ..] => second - first,
        _ => return None,
    };
    if !step.is_finite() || step == 0.0 {
        return None;
    }

    let tol = step.abs() * rtol;
    let uniform = values
        .windows(2)
        .all(|pair| ((pair[1] - pair[0]) - step).abs() <= tol);
    if uniform {
        Some(step)
    } else {
        None
    }
}

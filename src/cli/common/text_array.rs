// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plain-text numeric arrays, as written by e.g. `numpy.savetxt`.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use log::debug;
use ndarray::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum TextArrayError {
    #[error("{file}:{line}: couldn't parse '{value}' as a number")]
    Parse {
        file: PathBuf,
        line: usize,
        value: String,
    },

    #[error("{file}:{line}: expected {expected} values, like the first row, but got {got}")]
    Ragged {
        file: PathBuf,
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("{0} contains no numbers")]
    Empty(PathBuf),

    #[error("Couldn't read {file}: {err}")]
    IO {
        file: PathBuf,
        err: std::io::Error,
    },
}

/// Read a whitespace-separated array of numbers. Each non-empty line is a row;
/// lines starting with '#' are comments. A single column of values gives a
/// `[N, 1]` array.
pub(crate) fn read_text_array(file: &Path) -> Result<Array2<f64>, TextArrayError> {
    let io_err = |err| TextArrayError::IO {
        file: file.to_path_buf(),
        err,
    };
    let reader = BufReader::new(File::open(file).map_err(io_err)?);

    let mut values = vec![];
    let mut num_cols = None;
    let mut num_rows = 0;
    for (i_line, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err)?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row_start = values.len();
        for value in line.split_whitespace() {
            values.push(value.parse::<f64>().map_err(|_| TextArrayError::Parse {
                file: file.to_path_buf(),
                line: i_line + 1,
                value: value.to_string(),
            })?);
        }
        let got = values.len() - row_start;
        match num_cols {
            None => num_cols = Some(got),
            Some(expected) if expected != got => {
                return Err(TextArrayError::Ragged {
                    file: file.to_path_buf(),
                    line: i_line + 1,
                    expected,
                    got,
                })
            }
            Some(_) => (),
        }
        num_rows += 1;
    }

    let num_cols = num_cols.ok_or_else(|| TextArrayError::Empty(file.to_path_buf()))?;
    debug!(
        "Read a {num_rows}x{num_cols} array from {}",
        file.display()
    );
    Ok(Array2::from_shape_vec((num_rows, num_cols), values)
        .expect("every row has num_cols values"))
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Write out array element positions.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use log::info;

use super::common::ArrayArgs;
use crate::FarfieldError;

/// Generate array element positions.
#[derive(Parser, Debug)]
pub(super) struct GeometryArgs {
    #[clap(flatten)]
    array_args: ArrayArgs,

    /// The file to write the positions to. The file is tab-separated, with
    /// each line holding the x and y position of an element [wavelengths].
    #[clap(short, long, default_value = "positions.tsv")]
    output: PathBuf,
}

impl GeometryArgs {
    pub(super) fn run(self, dry_run: bool) -> Result<(), FarfieldError> {
        let GeometryArgs { array_args, output } = self;
        let positions = array_args.parse()?;
        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let mut out = BufWriter::new(File::create(&output)?);
        for (x, y) in positions.x().iter().zip(positions.y().iter()) {
            writeln!(&mut out, "{x}\t{y}")?;
        }
        out.flush()?;
        info!("Wrote {} positions to {}", positions.len(), output.display());

        Ok(())
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use clap::Parser;
use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::{
    constants::DEFAULT_SPACING, hexagonal_lattice, rectangular_lattice, GeometryError, Positions,
};

const DEFAULT_NX: usize = 4;

lazy_static::lazy_static! {
    static ref ARRAY_LAYOUTS_COMMA_SEPARATED: String = ArrayLayout::iter().join(", ");

    static ref LAYOUT_HELP: String =
        format!("The layout of the array elements. Supported layouts: {}. Default: {}", *ARRAY_LAYOUTS_COMMA_SEPARATED, ArrayLayout::Rectangular);

    static ref NX_HELP: String =
        format!("The number of elements along x. Default: {DEFAULT_NX}");

    static ref DX_HELP: String =
        format!("The element spacing along x [wavelengths]. Default: {DEFAULT_SPACING}");
}

#[derive(Debug, Display, EnumIter, EnumString, Clone, Copy, PartialEq)]
#[strum(ascii_case_insensitive)]
pub(crate) enum ArrayLayout {
    #[strum(serialize = "rectangular", serialize = "rect")]
    Rectangular,

    #[strum(serialize = "hexagonal", serialize = "hex")]
    Hexagonal,
}

#[derive(Error, Debug)]
pub(crate) enum ArrayArgsError {
    #[error("Unrecognised array layout '{0}'. Supported layouts: {}", *ARRAY_LAYOUTS_COMMA_SEPARATED)]
    UnknownLayout(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ArrayArgs {
    #[clap(short, long, help = LAYOUT_HELP.as_str(), help_heading = "ARRAY")]
    pub(crate) layout: Option<String>,

    #[clap(long, help = NX_HELP.as_str(), help_heading = "ARRAY")]
    pub(crate) nx: Option<usize>,

    /// The number of elements along y. Ignored for hexagonal arrays, where
    /// this is derived from nx. Default: nx
    #[clap(long, help_heading = "ARRAY")]
    pub(crate) ny: Option<usize>,

    #[clap(long, help = DX_HELP.as_str(), help_heading = "ARRAY")]
    pub(crate) dx: Option<f64>,

    /// The element spacing along y [wavelengths]. Ignored for hexagonal
    /// arrays, where this is dx * sqrt(3). Default: dx
    #[clap(long, help_heading = "ARRAY")]
    pub(crate) dy: Option<f64>,

    /// Translate the array so that its centroid is at the origin. This changes
    /// the phase of array factors, but not their magnitudes.
    #[clap(long, help_heading = "ARRAY")]
    #[serde(default)]
    pub(crate) centre: bool,
}

impl ArrayArgs {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            layout: self.layout.or(other.layout),
            nx: self.nx.or(other.nx),
            ny: self.ny.or(other.ny),
            dx: self.dx.or(other.dx),
            dy: self.dy.or(other.dy),
            centre: self.centre || other.centre,
        }
    }

    pub(crate) fn parse(self) -> Result<Positions, ArrayArgsError> {
        let Self {
            layout,
            nx,
            ny,
            dx,
            dy,
            centre,
        } = self;

        let layout = match layout {
            Some(l) => {
                ArrayLayout::from_str(&l).map_err(|_| ArrayArgsError::UnknownLayout(l))?
            }
            None => ArrayLayout::Rectangular,
        };
        let nx = nx.unwrap_or(DEFAULT_NX);
        let dx = dx.unwrap_or(DEFAULT_SPACING);
        debug!("Array layout: {layout}");

        let positions = match layout {
            ArrayLayout::Rectangular => {
                rectangular_lattice(nx, ny.unwrap_or(nx), dx, dy.unwrap_or(dx))?
            }
            ArrayLayout::Hexagonal => {
                if ny.is_some() || dy.is_some() {
                    warn!("ny and dy are derived for hexagonal arrays; ignoring the supplied values");
                }
                hexagonal_lattice(nx, dx)?
            }
        };
        info!(
            "Using a {layout} array of {} elements (nx = {nx}, dx = {dx} wavelengths)",
            positions.len()
        );

        Ok(if centre {
            positions.centred()
        } else {
            positions
        })
    }
}

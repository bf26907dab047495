// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! HEALPix pixelisation of the sphere, RING ordering only.
//!
//! The pixel arithmetic is done by `scorus`; this module checks its inputs so
//! that bad resolutions, pixels or directions become errors rather than
//! garbage. Angles are (theta, phi) in radians; theta is measured from the
//! north pole (+z) and phi is the azimuth from +x towards +y. Results match
//! the default (RING) behaviour of `healpy`.
//!
//! For array pointing, the north pole is the array's boresight (zenith), so
//! the x and y components of a pixel's unit vector are that pixel's direction
//! cosines.

mod error;

pub use error::HealpixError;

use std::f64::consts::PI;

use scorus::{
    coordinates::vec3d::Vec3d,
    healpix::{
        pix::{pix2ang_ring, pix2vec_ring, vec2pix_ring},
        utils::{npix2nside as scorus_npix2nside, nside2npix as scorus_nside2npix},
    },
};

/// The largest nside representable with 64-bit pixel indices.
const MAX_NSIDE: u32 = 1 << 29;

/// A validated HEALPix resolution parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nside(u32);

impl Nside {
    pub fn new(nside: u32) -> Result<Nside, HealpixError> {
        if nside == 0 || nside > MAX_NSIDE {
            return Err(HealpixError::BadNside(nside));
        }
        Ok(Nside(nside))
    }

    /// Get the nside corresponding to a number of pixels.
    pub fn from_npix(npix: u64) -> Result<Nside, HealpixError> {
        // Only hand scorus pixel counts that are 12 * nside^2.
        let root = ((npix / 12) as f64).sqrt().round() as u64;
        if npix == 0 || root > MAX_NSIDE as u64 || root * root * 12 != npix {
            return Err(HealpixError::BadNpix(npix));
        }
        Nside::new(scorus_npix2nside(npix as usize) as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The number of pixels on the sphere, `12 * nside^2`.
    pub fn npix(self) -> u64 {
        scorus_nside2npix(self.n()) as u64
    }

    /// The solid angle of every pixel \[steradians\].
    pub fn pixel_area(self) -> f64 {
        4.0 * PI / self.npix() as f64
    }

    #[inline]
    fn n(self) -> usize {
        self.0 as usize
    }

    fn check_pixel(self, pixel: u64) -> Result<(), HealpixError> {
        let npix = self.npix();
        if pixel >= npix {
            return Err(HealpixError::BadPixel { pixel, npix });
        }
        Ok(())
    }

    /// Get the (theta, phi) of a pixel's centre \[radians\].
    pub fn pix2ang(self, pixel: u64) -> Result<(f64, f64), HealpixError> {
        self.check_pixel(pixel)?;
        let ang = pix2ang_ring::<f64>(self.n(), pixel as usize);
        Ok((ang.pol, ang.az))
    }

    /// Get the unit vector pointing at a pixel's centre.
    pub fn pix2vec(self, pixel: u64) -> Result<[f64; 3], HealpixError> {
        self.check_pixel(pixel)?;
        let v = pix2vec_ring::<f64>(self.n(), pixel as usize);
        Ok([v.x, v.y, v.z])
    }

    /// Get the pixel containing the direction (theta, phi) \[radians\].
    pub fn ang2pix(self, theta: f64, phi: f64) -> Result<u64, HealpixError> {
        if !(0.0..=PI).contains(&theta) {
            return Err(HealpixError::BadTheta(theta));
        }
        self.vec2pix(ang2vec(theta, phi))
    }

    /// Get the pixel containing the direction of a vector. The vector need
    /// not be normalised.
    pub fn vec2pix(self, v: [f64; 3]) -> Result<u64, HealpixError> {
        let [x, y, z] = normalise(v)?;
        Ok(vec2pix_ring(self.n(), &Vec3d::new(x, y, z)) as u64)
    }

    /// Get all pixels whose centres lie within `radius` radians of the
    /// direction `v`. The pixels are in ascending order. This is equivalent
    /// to `healpy.query_disc` with `inclusive=False`.
    pub fn query_disc(self, v: [f64; 3], radius: f64) -> Result<Vec<u64>, HealpixError> {
        let centre = normalise(v)?;
        if radius >= PI {
            return Ok((0..self.npix()).collect());
        }
        let cos_radius = radius.cos();

        let mut pixels = vec![];
        for pixel in 0..self.npix() {
            let p = self.pix2vec(pixel)?;
            let dot = p[0] * centre[0] + p[1] * centre[1] + p[2] * centre[2];
            if dot >= cos_radius {
                pixels.push(pixel);
            }
        }
        Ok(pixels)
    }
}

fn normalise(v: [f64; 3]) -> Result<[f64; 3], HealpixError> {
    let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if !norm.is_normal() {
        return Err(HealpixError::BadVector);
    }
    Ok([v[0] / norm, v[1] / norm, v[2] / norm])
}

/// The number of pixels on a HEALPix sphere with resolution `nside`.
pub fn nside2npix(nside: u32) -> Result<u64, HealpixError> {
    Ok(Nside::new(nside)?.npix())
}

/// The nside of a HEALPix sphere with `npix` pixels.
pub fn npix2nside(npix: u64) -> Result<u32, HealpixError> {
    Ok(Nside::from_npix(npix)?.get())
}

/// Get the unit vector of a direction (theta, phi) \[radians\].
pub fn ang2vec(theta: f64, phi: f64) -> [f64; 3] {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    [sin_theta * cos_phi, sin_theta * sin_phi, cos_theta]
}

//! Plot data for the rotated solid: the 3D surface mesh, its rotation animation and
//! the cross-section animation. Nothing here draws; see `Utils::plots`.
use crate::numerical::disk_method::{SampleSet, linspace};
use nalgebra::{DMatrix, DVector};
use std::f64::consts::PI;

pub const DEFAULT_THETA_POINTS: usize = 100;
pub const DEFAULT_FRAMES: usize = 50;

/// Sweep angle of frame `i` out of `frames`: 0 for the first frame, 2π for the last.
pub fn sweep_angle(i: usize, frames: usize) -> f64 {
    if frames <= 1 {
        return 2.0 * PI;
    }
    (i as f64) / ((frames - 1) as f64) * 2.0 * PI
}

/// Surface of revolution on a (samples × theta_points) grid.
///
/// Row i follows the sample xᵢ, column j the angle θⱼ:
/// x = xᵢ, y = f(xᵢ)·cos θⱼ, z = f(xᵢ)·sin θⱼ.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidSurface {
    pub x: DMatrix<f64>,
    pub y: DMatrix<f64>,
    pub z: DMatrix<f64>,
}

impl SolidSurface {
    /// full turn, θ ∈ [0, 2π]
    pub fn new(samples: &SampleSet, theta_points: usize) -> Self {
        Self::swept(samples, theta_points, 2.0 * PI)
    }

    /// partial turn, θ ∈ [0, sweep]
    pub fn swept(samples: &SampleSet, theta_points: usize, sweep: f64) -> Self {
        let theta = linspace(0.0, sweep, theta_points);
        let n = samples.len();
        let m = theta.len();
        let x = DMatrix::from_fn(n, m, |i, _| samples.x[i]);
        let y = DMatrix::from_fn(n, m, |i, j| samples.y[i] * theta[j].cos());
        let z = DMatrix::from_fn(n, m, |i, j| samples.y[i] * theta[j].sin());
        SolidSurface { x, y, z }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    fn point(&self, i: usize, j: usize) -> (f64, f64, f64) {
        (self.x[(i, j)], self.y[(i, j)], self.z[(i, j)])
    }

    /// Grid cells as quadrilaterals; cells with a non-finite corner are skipped.
    pub fn quads(&self) -> Vec<[(f64, f64, f64); 4]> {
        let (rows, cols) = self.shape();
        let mut quads = Vec::with_capacity(rows.saturating_sub(1) * cols.saturating_sub(1));
        for i in 0..rows.saturating_sub(1) {
            for j in 0..cols.saturating_sub(1) {
                let quad = [
                    self.point(i, j),
                    self.point(i + 1, j),
                    self.point(i + 1, j + 1),
                    self.point(i, j + 1),
                ];
                if quad
                    .iter()
                    .all(|(x, y, z)| x.is_finite() && y.is_finite() && z.is_finite())
                {
                    quads.push(quad);
                }
            }
        }
        quads
    }
}

/// One surface per frame, frame i sweeping θ ∈ [0, i/(frames−1)·2π].
pub fn solid_frames(samples: &SampleSet, theta_points: usize, frames: usize) -> Vec<SolidSurface> {
    (0..frames)
        .map(|i| SolidSurface::swept(samples, theta_points, sweep_angle(i, frames)))
        .collect()
}

/// The curve and its mirror image as seen after rotating by `angle`.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSectionFrame {
    pub angle: f64,
    pub x: DVector<f64>,
    /// f(x)·cos(angle)
    pub upper: DVector<f64>,
    /// −f(x)·cos(angle)
    pub lower: DVector<f64>,
    /// rgba, alpha in [0, 1]
    pub fill: (u8, u8, u8, f64),
}

pub fn cross_section_frames(samples: &SampleSet, frames: usize) -> Vec<CrossSectionFrame> {
    (0..frames)
        .map(|i| {
            let angle = sweep_angle(i, frames);
            let upper = samples.y.map(|y| y * angle.cos());
            let lower = upper.map(|v| -v);
            let green = (255 * i / frames) as u8;
            CrossSectionFrame {
                angle,
                x: samples.x.clone(),
                upper,
                lower,
                fill: (0, green, 255, 0.5),
            }
        })
        .collect()
}

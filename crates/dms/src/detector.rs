//! Facial landmark input
//!
//! Face and landmark detection is done by an external model. This module
//! defines the seam it plugs into and adapts its output to the eye
//! landmark sets the EAR estimator consumes.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::ear::{EyeLandmarks, Point};
use crate::DmsError;

/// MediaPipe Face Mesh indices for the six EAR points of each eye
pub mod mesh_indices {
    /// Subject's left eye (image right when not mirrored)
    pub const LEFT_EYE: [usize; 6] = [362, 385, 387, 263, 373, 380];
    /// Subject's right eye
    pub const RIGHT_EYE: [usize; 6] = [33, 160, 158, 133, 153, 144];
}

/// Which eye
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// Face Mesh indices of this eye's EAR points
    pub fn mesh_indices(self) -> &'static [usize; 6] {
        match self {
            Eye::Left => &mesh_indices::LEFT_EYE,
            Eye::Right => &mesh_indices::RIGHT_EYE,
        }
    }
}

/// Eye landmarks of one detected face, normalized to [0, 1] per frame axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmarks {
    pub left: EyeLandmarks,
    pub right: EyeLandmarks,
}

impl FaceLandmarks {
    pub fn new(left: EyeLandmarks, right: EyeLandmarks) -> Self {
        Self { left, right }
    }

    /// Pick the twelve EAR points out of a full Face Mesh result
    pub fn from_mesh(mesh: &[Point]) -> Result<Self, DmsError> {
        Ok(Self {
            left: eye_from_mesh(mesh, Eye::Left)?,
            right: eye_from_mesh(mesh, Eye::Right)?,
        })
    }

    /// Normalized landmarks for one eye
    pub fn eye(&self, eye: Eye) -> &EyeLandmarks {
        match eye {
            Eye::Left => &self.left,
            Eye::Right => &self.right,
        }
    }

    /// One eye's landmarks in frame pixels
    pub fn eye_in_pixels(&self, eye: Eye, width: u32, height: u32) -> EyeLandmarks {
        self.eye(eye).scaled(width, height)
    }
}

fn eye_from_mesh(mesh: &[Point], eye: Eye) -> Result<EyeLandmarks, DmsError> {
    let indices = eye.mesh_indices();
    let mut points = [Point::default(); 6];
    for (slot, &idx) in points.iter_mut().zip(indices.iter()) {
        *slot = *mesh.get(idx).ok_or(DmsError::KeypointsMissing {
            required: idx + 1,
            found: mesh.len(),
        })?;
    }
    Ok(EyeLandmarks::new(points))
}

/// External face landmark model.
///
/// Returns `None` when no face is found; at most one face is reported.
pub trait LandmarkDetector {
    fn detect(&mut self, frame: &RgbImage) -> Result<Option<FaceLandmarks>, DmsError>;
}

impl<D: LandmarkDetector + ?Sized> LandmarkDetector for Box<D> {
    fn detect(&mut self, frame: &RgbImage) -> Result<Option<FaceLandmarks>, DmsError> {
        (**self).detect(frame)
    }
}

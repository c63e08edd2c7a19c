use crate::camera::{FacingMode, MediaDevices, MediaStream};
use crate::errors::CameraError;
use image::RgbImage;
use std::collections::HashMap;
use std::path::Path;

/// File-backed virtual camera: each facing mode serves a fixed frame.
#[derive(Debug, Clone, Default)]
pub struct StillFrameDevices {
    frames: HashMap<FacingMode, RgbImage>,
}

impl StillFrameDevices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame(mut self, facing: FacingMode, frame: RgbImage) -> Self {
        self.frames.insert(facing, frame);
        self
    }

    pub fn with_file(self, facing: FacingMode, path: impl AsRef<Path>) -> image::ImageResult<Self> {
        let frame = image::open(path)?.to_rgb8();
        Ok(self.with_frame(facing, frame))
    }
}

impl MediaDevices for StillFrameDevices {
    type Stream = StillFrameStream;

    fn get_user_media(&self, facing: FacingMode) -> Result<StillFrameStream, CameraError> {
        let frame = self
            .frames
            .get(&facing)
            .cloned()
            .ok_or(CameraError::Unavailable(facing))?;

        Ok(StillFrameStream { frame, live: true })
    }
}

pub struct StillFrameStream {
    frame: RgbImage,
    live: bool,
}

impl MediaStream for StillFrameStream {
    fn active_tracks(&self) -> usize {
        usize::from(self.live)
    }

    fn grab_frame(&mut self) -> Result<RgbImage, CameraError> {
        if !self.live {
            return Err(CameraError::Inactive);
        }
        Ok(self.frame.clone())
    }

    fn stop(&mut self) {
        self.live = false;
    }
}

use crate::{errors::CameraError, media::ImageData};
use image::RgbImage;
use std::fmt;

/// Which physical camera a video stream is sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacingMode {
    User,
    Environment,
}

impl FacingMode {
    pub fn opposite(self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

impl fmt::Display for FacingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Mobile,
    Desktop,
}

const MOBILE_MARKERS: [&str; 8] = [
    "android",
    "iphone",
    "ipad",
    "ipod",
    "mobile",
    "webos",
    "blackberry",
    "opera mini",
];

impl DeviceKind {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let user_agent = user_agent.to_lowercase();
        if MOBILE_MARKERS.iter().any(|m| user_agent.contains(m)) {
            DeviceKind::Mobile
        } else {
            DeviceKind::Desktop
        }
    }

    /// Rear camera on phones and tablets, front camera elsewhere.
    pub fn preferred_facing(&self) -> FacingMode {
        match self {
            DeviceKind::Mobile => FacingMode::Environment,
            DeviceKind::Desktop => FacingMode::User,
        }
    }
}

/// A live video stream holding one or more media tracks.
pub trait MediaStream {
    fn active_tracks(&self) -> usize;

    fn grab_frame(&mut self) -> Result<RgbImage, CameraError>;

    /// Stop every track. Must be idempotent.
    fn stop(&mut self);
}

/// Source of camera streams, keyed by facing mode.
pub trait MediaDevices {
    type Stream: MediaStream;

    fn get_user_media(&self, facing: FacingMode) -> Result<Self::Stream, CameraError>;
}

/// Exclusive owner of the camera stream. Tracks are stopped on every exit
/// path: `stop`, a switch, or drop.
pub struct CameraSession<S: MediaStream> {
    stream: Option<S>,
    facing: FacingMode,
}

impl<S: MediaStream> CameraSession<S> {
    /// Open the preferred camera, falling back to the front camera.
    pub fn open<D>(devices: &D, preferred: FacingMode) -> Result<Self, CameraError>
    where
        D: MediaDevices<Stream = S>,
    {
        match devices.get_user_media(preferred) {
            Ok(stream) => {
                tracing::info!(facing = %preferred, "Camera started");
                Ok(Self::active(stream, preferred))
            }
            Err(e) if preferred != FacingMode::User => {
                tracing::warn!(
                    error = %e,
                    facing = %preferred,
                    "Preferred camera unavailable, falling back to front camera"
                );
                let stream = devices.get_user_media(FacingMode::User)?;
                tracing::info!(facing = %FacingMode::User, "Camera started");
                Ok(Self::active(stream, FacingMode::User))
            }
            Err(e) => Err(e),
        }
    }

    fn active(stream: S, facing: FacingMode) -> Self {
        Self {
            stream: Some(stream),
            facing,
        }
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    pub fn active_tracks(&self) -> usize {
        self.stream.as_ref().map_or(0, |s| s.active_tracks())
    }

    /// Tear down the current stream and request the opposite facing mode.
    ///
    /// If that camera is unavailable the previous one is reacquired and its
    /// facing mode returned. The session is left closed only when neither
    /// camera can be opened.
    pub fn switch<D>(&mut self, devices: &D) -> Result<FacingMode, CameraError>
    where
        D: MediaDevices<Stream = S>,
    {
        let previous = self.facing;
        let requested = previous.opposite();
        self.stop();

        match devices.get_user_media(requested) {
            Ok(stream) => {
                tracing::info!(from = %previous, to = %requested, "Camera switched");
                self.stream = Some(stream);
                self.facing = requested;
                Ok(requested)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    facing = %requested,
                    "Requested camera unavailable, restoring previous camera"
                );
                let stream = devices.get_user_media(previous)?;
                self.stream = Some(stream);
                Ok(previous)
            }
        }
    }

    /// Snapshot the current frame as a JPEG still.
    pub fn capture(&mut self) -> Result<ImageData, CameraError> {
        let stream = self.stream.as_mut().ok_or(CameraError::Inactive)?;
        let frame = stream.grab_frame()?;

        tracing::debug!(
            width = frame.width(),
            height = frame.height(),
            facing = %self.facing,
            "Frame captured"
        );

        ImageData::from_rgb_frame(&frame).map_err(|e| CameraError::Device(e.to_string()))
    }

    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!(facing = %self.facing, "Camera tracks stopped");
        }
    }
}

impl<S: MediaStream> Drop for CameraSession<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

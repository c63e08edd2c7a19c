pub mod analysis;
pub mod camera;
pub mod client;
pub mod config;
pub mod errors;
pub mod logging;
pub mod media;
pub mod object_url;
pub mod page;
pub mod render;
pub mod still;

pub use analysis::{AnalysisSession, AnalysisTicket};
pub use camera::{CameraSession, DeviceKind, FacingMode, MediaDevices, MediaStream};
pub use client::{DetectClient, HttpDetectClient};
pub use errors::{AnalysisError, CameraError};
pub use media::ImageData;
pub use object_url::{ImageHandle, ObjectUrlRegistry};
pub use page::{CompletedAnalysis, InspectionPage, PageConfig, PendingAnalysis};
pub use render::{OverlayBox, ResultRow, RowStyle, Verdict};
pub use still::StillFrameDevices;

use crate::{
    analysis::{AnalysisSession, AnalysisTicket, DEFAULT_SCAN_LINGER},
    camera::{CameraSession, DeviceKind, FacingMode, MediaDevices},
    client::DetectClient,
    errors::{AnalysisError, CameraError},
    media::ImageData,
    object_url::ObjectUrlRegistry,
    render::{
        self, DEFAULT_DEFECT_MARKER, OverlayBox, ResultRow, Verdict, Viewport, fit_to_viewport,
    },
};
use schema::{ImageDimensions, Prediction};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub defect_marker: String,
    pub scan_linger: Duration,
    pub show_overlay: bool,
    pub device_kind: DeviceKind,
    pub viewport: Viewport,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            defect_marker: DEFAULT_DEFECT_MARKER.to_string(),
            scan_linger: DEFAULT_SCAN_LINGER,
            show_overlay: false,
            device_kind: DeviceKind::Desktop,
            viewport: Viewport {
                width: 800.0,
                height: 600.0,
            },
        }
    }
}

/// An analysis request that has been issued but not yet sent.
pub struct PendingAnalysis<C> {
    ticket: AnalysisTicket,
    image: ImageData,
    client: Arc<C>,
}

impl<C: DetectClient> PendingAnalysis<C> {
    pub fn ticket(&self) -> AnalysisTicket {
        self.ticket
    }

    /// Send the image on the blocking pool.
    pub async fn run(self) -> CompletedAnalysis {
        let ticket = self.ticket;
        let client = self.client;
        let image = self.image;

        let result = tokio::task::spawn_blocking(move || client.detect(&image))
            .await
            .unwrap_or_else(|e| Err(AnalysisError::Task(e.to_string())));

        CompletedAnalysis { ticket, result }
    }
}

#[derive(Debug)]
pub struct CompletedAnalysis {
    ticket: AnalysisTicket,
    result: Result<Vec<Prediction>, AnalysisError>,
}

impl CompletedAnalysis {
    pub fn new(ticket: AnalysisTicket, result: Result<Vec<Prediction>, AnalysisError>) -> Self {
        Self { ticket, result }
    }

    pub fn ticket(&self) -> AnalysisTicket {
        self.ticket
    }
}

/// State of the inspection page: the image under analysis, its results and
/// the camera view.
///
/// Dropping the page stops any camera tracks and releases every object URL
/// it created.
pub struct InspectionPage<C, D: MediaDevices> {
    client: Arc<C>,
    devices: D,
    urls: ObjectUrlRegistry,
    session: AnalysisSession,
    camera: Option<CameraSession<D::Stream>>,
    camera_error: Option<String>,
    config: PageConfig,
}

impl<C: DetectClient, D: MediaDevices> InspectionPage<C, D> {
    pub fn new(client: C, devices: D, config: PageConfig) -> Self {
        Self {
            client: Arc::new(client),
            devices,
            urls: ObjectUrlRegistry::new(),
            session: AnalysisSession::new(config.scan_linger),
            camera: None,
            camera_error: None,
            config,
        }
    }

    /// Show `image` and start analysing it, superseding the current image.
    pub fn upload(&mut self, image: ImageData) -> PendingAnalysis<C> {
        let handle = self.urls.create(image.clone());
        let ticket = self.session.begin(handle);
        self.refresh_dimensions();

        PendingAnalysis {
            ticket,
            image,
            client: self.client.clone(),
        }
    }

    pub fn apply(&mut self, completed: CompletedAnalysis) -> bool {
        self.apply_at(completed, Instant::now())
    }

    pub fn apply_at(&mut self, completed: CompletedAnalysis, now: Instant) -> bool {
        self.session
            .complete(completed.ticket, completed.result, now)
    }

    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        self.config.viewport = Viewport { width, height };
        self.refresh_dimensions();
    }

    fn refresh_dimensions(&mut self) {
        let natural = self
            .session
            .image()
            .and_then(|handle| handle.image().natural_size());

        if let Some((natural_width, natural_height)) = natural {
            let dimensions = fit_to_viewport(natural_width, natural_height, self.config.viewport);
            self.session.set_dimensions(dimensions);
        }
    }

    pub fn start_camera(&mut self) -> Result<FacingMode, CameraError> {
        self.stop_camera();
        self.camera_error = None;

        let preferred = self.config.device_kind.preferred_facing();
        match CameraSession::open(&self.devices, preferred) {
            Ok(session) => {
                let facing = session.facing();
                self.camera = Some(session);
                Ok(facing)
            }
            Err(e) => Err(self.camera_failed(e)),
        }
    }

    pub fn switch_camera(&mut self) -> Result<FacingMode, CameraError> {
        let Some(session) = self.camera.as_mut() else {
            return Err(CameraError::Inactive);
        };

        match session.switch(&self.devices) {
            Ok(facing) => Ok(facing),
            Err(e) => Err(self.camera_failed(e)),
        }
    }

    pub fn stop_camera(&mut self) {
        if let Some(mut session) = self.camera.take() {
            session.stop();
        }
    }

    /// Snapshot the camera, close the camera view and analyse the still.
    pub fn capture(&mut self) -> Result<PendingAnalysis<C>, CameraError> {
        let captured = match self.camera.as_mut() {
            Some(session) => session.capture(),
            None => return Err(CameraError::Inactive),
        };

        match captured {
            Ok(image) => {
                self.stop_camera();
                Ok(self.upload(image))
            }
            Err(e) => Err(self.camera_failed(e)),
        }
    }

    fn camera_failed(&mut self, error: CameraError) -> CameraError {
        tracing::error!(error = %error, "Camera failure");
        self.stop_camera();
        self.camera_error = Some(error.user_message().to_string());
        error
    }

    /// Overall verdict for the current image, once it has a result.
    pub fn verdict(&self) -> Option<Verdict> {
        self.session
            .has_result()
            .then(|| render::verdict(self.session.predictions(), &self.config.defect_marker))
    }

    pub fn result_rows(&self) -> Vec<ResultRow> {
        render::result_rows(self.session.predictions(), &self.config.defect_marker)
    }

    /// Boxes to draw over the image. Empty unless the overlay is enabled.
    pub fn overlay(&self) -> Vec<OverlayBox> {
        match (self.config.show_overlay, self.session.dimensions()) {
            (true, Some(dimensions)) => render::overlay_boxes(
                self.session.predictions(),
                &dimensions,
                &self.config.defect_marker,
            ),
            _ => Vec::new(),
        }
    }

    pub fn predictions(&self) -> &[Prediction] {
        self.session.predictions()
    }

    pub fn dimensions(&self) -> Option<ImageDimensions> {
        self.session.dimensions()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.session.image().map(|handle| handle.url())
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn is_scanning(&self) -> bool {
        self.session.is_scanning(Instant::now())
    }

    pub fn is_scanning_at(&self, now: Instant) -> bool {
        self.session.is_scanning(now)
    }

    pub fn error(&self) -> Option<&str> {
        self.session.error()
    }

    pub fn camera_error(&self) -> Option<&str> {
        self.camera_error.as_deref()
    }

    pub fn is_camera_active(&self) -> bool {
        self.camera.as_ref().is_some_and(|c| c.is_active())
    }

    pub fn camera_facing(&self) -> Option<FacingMode> {
        self.camera.as_ref().map(|c| c.facing())
    }

    pub fn camera_tracks(&self) -> usize {
        self.camera.as_ref().map_or(0, |c| c.active_tracks())
    }

    pub fn object_urls(&self) -> &ObjectUrlRegistry {
        &self.urls
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }
}

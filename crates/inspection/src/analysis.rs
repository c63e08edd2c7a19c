use crate::{errors::AnalysisError, object_url::ImageHandle};
use schema::{ImageDimensions, Prediction};
use std::time::{Duration, Instant};

pub const DEFAULT_SCAN_LINGER: Duration = Duration::from_millis(1500);

/// Identifies one analysis request. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnalysisTicket(u64);

/// The page's current image and what is known about it.
///
/// Introducing a new image resets everything at once, so an overlay or
/// result list from a previous image is never shown against a new one.
/// Responses carrying an outdated ticket are discarded.
#[derive(Debug)]
pub struct AnalysisSession {
    image: Option<ImageHandle>,
    predictions: Vec<Prediction>,
    dimensions: Option<ImageDimensions>,
    loading: bool,
    has_result: bool,
    error: Option<String>,
    scanning_until: Option<Instant>,
    scan_linger: Duration,
    latest: u64,
}

impl AnalysisSession {
    pub fn new(scan_linger: Duration) -> Self {
        Self {
            image: None,
            predictions: Vec::new(),
            dimensions: None,
            loading: false,
            has_result: false,
            error: None,
            scanning_until: None,
            scan_linger,
            latest: 0,
        }
    }

    /// Start analysing `image`. The previous image handle is dropped here.
    pub fn begin(&mut self, image: ImageHandle) -> AnalysisTicket {
        self.latest += 1;
        self.image = Some(image);
        self.predictions.clear();
        self.dimensions = None;
        self.has_result = false;
        self.error = None;
        self.loading = true;
        self.scanning_until = None;

        tracing::debug!(ticket = self.latest, "Analysis started");
        AnalysisTicket(self.latest)
    }

    /// Record the outcome of `ticket`. Returns false if a newer analysis has
    /// started since, in which case nothing changes.
    pub fn complete(
        &mut self,
        ticket: AnalysisTicket,
        result: Result<Vec<Prediction>, AnalysisError>,
        now: Instant,
    ) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "Discarding stale analysis result"
            );
            return false;
        }

        match result {
            Ok(predictions) => {
                tracing::info!(detections = predictions.len(), "Analysis complete");
                self.predictions = predictions;
                self.has_result = true;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Analysis failed");
                self.error = Some(e.user_message());
            }
        }

        self.loading = false;
        self.scanning_until = Some(now + self.scan_linger);
        true
    }

    pub fn set_dimensions(&mut self, dimensions: ImageDimensions) {
        self.dimensions = Some(dimensions);
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    pub fn dimensions(&self) -> Option<ImageDimensions> {
        self.dimensions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True once the current image has a successful result.
    pub fn has_result(&self) -> bool {
        self.has_result
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The scanning animation runs while loading and for a short while after.
    pub fn is_scanning(&self, now: Instant) -> bool {
        self.loading || self.scanning_until.is_some_and(|until| now < until)
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_LINGER)
    }
}

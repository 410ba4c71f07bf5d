//! Caller-side state of one try-on screen
//!
//! A session holds the two image slots, the chosen category, and the outcome
//! of the last generation. Generating borrows the session mutably, so at most
//! one generation per session can be outstanding.

use tryon_core::{Category, ImageAsset, TryOnRequest};

use crate::{
    client::TryOnClient,
    error::{Result, TryOnClientError},
};

/// Where a session is in its generate cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Nothing outstanding
    #[default]
    Idle,
    /// A generation is awaiting the gateway
    InFlight,
    /// The last generation produced an image
    Succeeded,
    /// The last generation failed
    Failed,
}

/// Inputs and outcome of a try-on session
#[derive(Debug, Clone, Default)]
pub struct GenerationSession {
    subject: Option<ImageAsset>,
    item: Option<ImageAsset>,
    category: Category,
    phase: Phase,
    result: Option<String>,
    error: Option<String>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_subject(&mut self, asset: ImageAsset) {
        self.subject = Some(asset);
    }

    pub fn set_item(&mut self, asset: ImageAsset) {
        self.item = Some(asset);
    }

    pub fn clear_subject(&mut self) {
        self.subject = None;
    }

    pub fn clear_item(&mut self) {
        self.item = None;
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Return every slot, the category, and the outcome to their defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn subject(&self) -> Option<&ImageAsset> {
        self.subject.as_ref()
    }

    pub fn item(&self) -> Option<&ImageAsset> {
        self.item.as_ref()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Data URL of the last successful generation
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Message of the last failed generation
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::InFlight
    }

    /// Whether both images are present and nothing is outstanding
    pub fn can_generate(&self) -> bool {
        self.subject.is_some() && self.item.is_some() && !self.is_busy()
    }

    /// Submit the current inputs and record the outcome
    ///
    /// A failure keeps the previous successful result. If the returned future
    /// is dropped before completing, the session returns to [`Phase::Idle`]
    /// with its previous outcome intact.
    ///
    /// # Errors
    ///
    /// Returns an error if an image slot is empty or the client fails
    pub async fn generate(&mut self, client: &TryOnClient) -> Result<&str> {
        let request = match TryOnRequest::from_slots(self.subject.clone(), self.item.clone(), self.category) {
            Ok(request) => request,
            Err(missing) => {
                let err = TryOnClientError::from(missing);
                self.phase = Phase::Failed;
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        let in_flight = InFlight::begin(&mut self.phase);
        let outcome = client.submit(&request).await;

        match outcome {
            Ok(url) => {
                in_flight.settle(Phase::Succeeded);
                self.error = None;
                Ok(self.result.insert(url).as_str())
            }
            Err(err) => {
                in_flight.settle(Phase::Failed);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

/// Marks a session in flight until settled; an unsettled drop means the
/// generation was abandoned and the session goes back to idle
struct InFlight<'a> {
    phase: &'a mut Phase,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn begin(phase: &'a mut Phase) -> Self {
        *phase = Phase::InFlight;
        Self { phase, settled: false }
    }

    fn settle(mut self, phase: Phase) {
        *self.phase = phase;
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.phase = Phase::Idle;
        }
    }
}

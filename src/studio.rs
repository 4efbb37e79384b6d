//! Session state for the furniture design studio
//!
//! Models the form fields and the request lifecycle. The lifecycle is one
//! tagged state, so loading, error, and result can never coexist.

use crate::gateway::GenerateService;
use crate::models::{FurnitureType, GenerationRequest};
use crate::prompts;

/// Sample description a fresh session starts with.
pub const DEFAULT_DESCRIPTION: &str = "Una mesa de centro minimalista con una cubierta de madera \
     de roble gruesa y patas de acero negro mate en forma de X.";

/// Lifecycle of the single in-flight generation request.
///
/// `Success` holds a displayable data URI; `Failed` holds the message shown
/// in place of the result pane. There is no reset back to `Idle` — the next
/// round goes straight to `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Success { image: String },
    Failed { message: String },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// One user's form fields plus the request lifecycle.
pub struct StudioSession {
    furniture_type: FurnitureType,
    description: String,
    state: ViewState,
}

impl StudioSession {
    pub fn new() -> Self {
        Self {
            furniture_type: FurnitureType::Table,
            description: DEFAULT_DESCRIPTION.to_string(),
            state: ViewState::Idle,
        }
    }

    pub fn furniture_type(&self) -> FurnitureType {
        self.furniture_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    // Field edits are plain updates, legal in any state.

    pub fn set_furniture_type(&mut self, furniture_type: FurnitureType) {
        self.furniture_type = furniture_type;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Start a generation round.
    ///
    /// Returns the prompt to submit, or `None` when a request is already in
    /// flight. Entering `Loading` drops any prior image or error.
    pub fn begin_generate(&mut self) -> Option<String> {
        if self.state.is_loading() {
            return None;
        }

        self.state = ViewState::Loading;

        let request = GenerationRequest {
            furniture_type: self.furniture_type,
            description: self.description.clone(),
        };
        Some(prompts::build_furniture_prompt(&request))
    }

    /// Apply the outcome of the round started by [`begin_generate`].
    pub fn complete(&mut self, outcome: crate::Result<String>) {
        self.state = match outcome {
            Ok(image_data) => ViewState::Success {
                image: format!("data:image/jpeg;base64,{}", image_data),
            },
            Err(e) => ViewState::Failed {
                message: e.to_string(),
            },
        };
    }

    /// Run one full generation round against `gateway` and return the
    /// resulting state. Does nothing while a request is in flight.
    pub async fn generate(&mut self, gateway: &dyn GenerateService) -> &ViewState {
        if let Some(prompt) = self.begin_generate() {
            let outcome = gateway.generate(&prompt).await;
            self.complete(outcome);
        }
        &self.state
    }
}

impl Default for StudioSession {
    fn default() -> Self {
        Self::new()
    }
}

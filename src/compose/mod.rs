pub mod draft;
pub mod health;
pub mod orchestrator;
pub mod outcome;
pub mod recipients;
pub mod session;
pub mod state;
pub mod validate;

pub use draft::{DraftStore, EmailDraft};
pub use health::{HealthProbe, HealthStatus};
pub use orchestrator::{SendOrchestrator, prepare_send};
pub use outcome::SendOutcome;
pub use recipients::RecipientSet;
pub use session::{ComposeSession, Completion, RequestToken};
pub use state::ComposeState;

#![forbid(unsafe_code)]

//! Boundary to the generative-language service: prompt construction,
//! validation of untyped replies, and the fallbacks used when the service
//! is slow, down, or talking nonsense.

pub mod catalog;
pub mod chat;
pub mod error;
pub mod guards;
pub mod pipeline;
pub mod prompts;
pub mod types;

pub use catalog::{fallback_advice, REDUCTION_TIPS, SUSTAINABILITY_FACTS};
pub use chat::ChatSession;
pub use error::{AdviceError, ModelError};
pub use pipeline::{AdviceConfig, AdvicePipeline, GenerativeModel};
pub use types::{
    AdviceTip, BillScanOutcome, ChatRole, ChatTurn, CollaboratorReply, GenerationRequest,
    InlineAttachment, ResponseFormat, RoadmapStep,
};

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use ecotrack_core::{CarbonState, CarbonStore, ElectricityInput, EmissionSummary, SnapshotStore};
use tracing::{info, warn};

use crate::catalog::fallback_advice;
use crate::error::{AdviceError, ModelError};
use crate::guards::{parse_advice, parse_bill_scan, parse_roadmap};
use crate::prompts::{advice_prompt, roadmap_prompt, BILL_SCAN_INSTRUCTION};
use crate::types::{
    AdviceTip, BillScanOutcome, CollaboratorReply, GenerationRequest, InlineAttachment,
    ResponseFormat, RoadmapStep,
};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Generative-language service seam. Adapters own transport and auth.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError>;
}

#[async_trait]
impl<T: GenerativeModel + ?Sized> GenerativeModel for &T {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError> {
        (**self).generate(request).await
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdviceConfig {
    pub model: String,
    pub request_timeout: Duration,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        AdviceConfig {
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl AdviceConfig {
    /// `ECOTRACK_MODEL`, `ECOTRACK_ADVICE_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let model = env::var("ECOTRACK_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let timeout_ms = env::var("ECOTRACK_ADVICE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        AdviceConfig {
            model,
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

/// Sends numeric summaries to the model and validates what comes back.
///
/// Emission figures never wait on this: callers compute them from the
/// store first and only hand the results over here.
pub struct AdvicePipeline<M: GenerativeModel> {
    model: M,
    config: AdviceConfig,
}

impl<M: GenerativeModel> AdvicePipeline<M> {
    pub fn new(model: M, config: AdviceConfig) -> Self {
        AdvicePipeline { model, config }
    }

    pub fn config(&self) -> &AdviceConfig {
        &self.config
    }

    pub(crate) async fn call(&self, request: GenerationRequest) -> Result<String, AdviceError> {
        let timeout = self.config.request_timeout;
        match tokio::time::timeout(timeout, self.model.generate(&request)).await {
            Ok(Ok(raw)) => Ok(raw),
            Ok(Err(e)) => Err(AdviceError::Model(e)),
            Err(_) => Err(AdviceError::Timeout(timeout)),
        }
    }

    /// Never fails: errors, timeouts and malformed replies all yield the
    /// fixed fallback pair.
    pub async fn personalized_advice(&self, summary: &EmissionSummary) -> Vec<AdviceTip> {
        let request = GenerationRequest::prompt(
            &self.config.model,
            advice_prompt(summary),
            ResponseFormat::AdviceList,
        );
        match self.call(request).await {
            Ok(raw) => match parse_advice(&raw) {
                CollaboratorReply::Parsed(tips) => tips,
                CollaboratorReply::Malformed(raw) => {
                    warn!(reply_len = raw.len(), "malformed advice reply, using fallback tips");
                    fallback_advice()
                }
            },
            Err(e) => {
                warn!(error = %e, "advice service failed, using fallback tips");
                fallback_advice()
            }
        }
    }

    pub async fn impact_roadmap(
        &self,
        state: &CarbonState,
        summary: &EmissionSummary,
    ) -> Result<Vec<RoadmapStep>, AdviceError> {
        let request = GenerationRequest::prompt(
            &self.config.model,
            roadmap_prompt(state, summary),
            ResponseFormat::Roadmap,
        );
        let raw = self.call(request).await?;
        match parse_roadmap(&raw) {
            CollaboratorReply::Parsed(steps) => Ok(steps),
            CollaboratorReply::Malformed(raw) => Err(AdviceError::Malformed(raw)),
        }
    }

    pub async fn scan_bill(
        &self,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<BillScanOutcome, AdviceError> {
        let mut request = GenerationRequest::prompt(
            &self.config.model,
            BILL_SCAN_INSTRUCTION.to_string(),
            ResponseFormat::BillScan,
        );
        request.attachment = Some(InlineAttachment::from_bytes(mime_type, bytes));
        let raw = self.call(request).await?;
        match parse_bill_scan(&raw) {
            CollaboratorReply::Parsed(outcome) => Ok(outcome),
            CollaboratorReply::Malformed(raw) => Err(AdviceError::Malformed(raw)),
        }
    }

    /// Scans the bill and, on a reading, replaces the electricity input.
    pub async fn scan_bill_into<S: SnapshotStore>(
        &self,
        store: &mut CarbonStore<S>,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<BillScanOutcome, AdviceError> {
        let outcome = self.scan_bill(mime_type, bytes).await?;
        if let BillScanOutcome::Reading(kwh) = outcome {
            store.patch(ElectricityInput { monthly_kwh: kwh })?;
            info!(kwh, "electricity updated from scanned bill");
        }
        Ok(outcome)
    }
}

//! Boundary to the external advice generator.
//!
//! The calculation path never depends on this module. A generator is anything that turns an
//! [`AdviceRequest`] into text; every failure on that side is converted to a fixed,
//! user-readable message by [`request_advice`].

pub mod prompt;
pub mod sequencer;

use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

use crate::amortization::{calculate_loan, CalculationResult, LoanInput};
use crate::types::{with_metadata, ComputationOutput};
use crate::MortgageCalcResult;

pub use prompt::build_prompt;
pub use sequencer::{RequestSequencer, Ticket};

pub const API_KEY_VAR: &str = "API_KEY";
pub const MODEL_VAR: &str = "ADVISOR_MODEL";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Template values shipped in sample env files.
const PLACEHOLDER_MARKERS: [&str; 2] = ["YOUR_API_KEY", "본인의_GEMINI_API_KEY"];

pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "API 키가 설정되지 않았습니다. 환경 변수 API_KEY를 설정해주세요.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "조언을 생성할 수 없습니다.";
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "AI 조언을 가져오는 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

#[derive(Debug, Error, PartialEq)]
pub enum AdviceError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Generator returned an empty response")]
    EmptyResponse,

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Everything a generator needs to produce one piece of advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub system_instruction: String,
    pub prompt: String,
}

pub trait AdviceGenerator {
    fn generate(&self, request: &AdviceRequest) -> Result<String, AdviceError>;
}

impl<F> AdviceGenerator for F
where
    F: Fn(&AdviceRequest) -> Result<String, AdviceError>,
{
    fn generate(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        self(request)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let model = lookup(MODEL_VAR)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        AdvisorConfig {
            api_key: lookup(API_KEY_VAR),
            model,
        }
    }

    /// Usable key, or `None` when missing, blank or still a template placeholder.
    pub fn credential(&self) -> Option<&str> {
        let key = self.api_key.as_deref()?.trim();
        if key.is_empty() || PLACEHOLDER_MARKERS.iter().any(|m| key.contains(m)) {
            return None;
        }
        Some(key)
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }
}

/// Build the request that would be sent, if a credential is configured.
pub fn advice_request(
    config: &AdvisorConfig,
    input: &LoanInput,
    result: &CalculationResult,
) -> Option<AdviceRequest> {
    let api_key = config.credential()?;
    Some(AdviceRequest {
        model: config.model.clone(),
        api_key: api_key.to_string(),
        system_instruction: prompt::SYSTEM_INSTRUCTION.to_string(),
        prompt: build_prompt(input, result),
    })
}

/// What would be sent to the generator for this loan, without sending it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvicePreview {
    pub model: String,
    pub credential_configured: bool,
    pub system_instruction: String,
    pub prompt: String,
}

pub fn preview_advice(
    config: &AdvisorConfig,
    input: &LoanInput,
) -> MortgageCalcResult<ComputationOutput<AdvicePreview>> {
    let start = Instant::now();
    let result = calculate_loan(input)?.result;

    let mut warnings = Vec::new();
    if !config.has_credential() {
        warnings.push(MISSING_CREDENTIAL_MESSAGE.to_string());
    }

    let preview = AdvicePreview {
        model: config.model.clone(),
        credential_configured: config.has_credential(),
        system_instruction: prompt::SYSTEM_INSTRUCTION.to_string(),
        prompt: build_prompt(input, &result),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Advisory Prompt Preview",
        input,
        warnings,
        elapsed,
        preview,
    ))
}

/// Ask the generator for advice; always returns displayable text.
pub fn request_advice<G: AdviceGenerator + ?Sized>(
    generator: &G,
    config: &AdvisorConfig,
    input: &LoanInput,
    result: &CalculationResult,
) -> String {
    let Some(request) = advice_request(config, input, result) else {
        log::warn!("advice requested without a usable {API_KEY_VAR}");
        return MISSING_CREDENTIAL_MESSAGE.to_string();
    };

    match generator.generate(&request) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) | Err(AdviceError::EmptyResponse) => EMPTY_RESPONSE_MESSAGE.to_string(),
        Err(e) => {
            log::warn!("advice generator failed: {e}");
            TRANSPORT_FAILURE_MESSAGE.to_string()
        }
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Generative text services behind one narrow capability.

pub mod advice;
pub mod gemini;
pub mod parse;

pub use advice::{AdviceGuard, AdviceRequest, AdviceResponse, AdviceTicket};
pub use gemini::GeminiClient;
pub use parse::ParsedTransaction;

use crate::error::ServiceError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A prompt plus the JSON schema the answer must conform to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredRequest {
    pub prompt: String,
    pub schema: serde_json::Value,
}

pub trait StructuredService {
    /// Raw JSON text produced for `request`.
    fn complete(&self, request: &StructuredRequest) -> Result<String, ServiceError>;

    fn generate_structured<T: DeserializeOwned>(
        &self,
        request: &StructuredRequest,
    ) -> Result<T, ServiceError>
    where
        Self: Sized,
    {
        let text = self.complete(request)?;
        let text = strip_code_fence(text.trim());
        if text.is_empty() {
            return Err(ServiceError::Empty);
        }
        Ok(serde_json::from_str(text)?)
    }
}

// Models sometimes wrap JSON in ```json fences even when asked not to.
fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_are_removed() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
    }
}

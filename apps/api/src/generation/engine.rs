//! The four task entry points: generate, optimize, ATS check, cover letter.
//!
//! Flow per task: Prompt Builder builds the instruction string, the Model
//! Gateway executes it, the Response Interpreter extracts the structured
//! result. On `ModelUnavailable` or `ParseFailure` the engine takes exactly
//! one of two explicit branches: serve the Fallback Synthesizer result when
//! fallback mode is enabled, or surface `GenerationFailed` to the caller.
//! A caller with fallback disabled never receives synthetic data.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::fallback::{
    synthesize_ats, synthesize_optimization, synthesize_resume, FALLBACK_COVER_LETTER,
};
use crate::generation::interpret::{
    interpret_ats, interpret_optimization, interpret_resume, interpret_text, ParseFailure,
};
use crate::generation::prompts::{
    build_ats_prompt, build_cover_letter_prompt, build_generate_prompt, build_optimize_prompt,
    ATS_SYSTEM, COVER_LETTER_SYSTEM, GENERATE_SYSTEM, OPTIMIZE_SYSTEM,
};
use crate::llm_client::{GenerationParams, ModelUnavailable, TextModel};
use crate::models::resume::{AtsReport, OptimizationResult, ResumeFields, ResumePayload};

const COVER_LETTER_PARAMS: GenerationParams = GenerationParams {
    max_tokens: 2048,
    temperature: 0.7,
};

/// Stateless task engine. Safe for unlimited parallel invocation; the only
/// shared state is the (internally synchronized) HTTP client in the model.
pub struct Engine {
    model: Option<Arc<dyn TextModel>>,
    fallback_enabled: bool,
}

impl Engine {
    pub fn new(model: Option<Arc<dyn TextModel>>, fallback_enabled: bool) -> Self {
        Self {
            model,
            fallback_enabled,
        }
    }

    async fn call_model(
        &self,
        prompt: &str,
        system: &str,
        params: GenerationParams,
    ) -> Result<String, ModelUnavailable> {
        match &self.model {
            Some(model) => model.generate(prompt, system, params).await,
            None => Err(ModelUnavailable::new("no model credential configured")),
        }
    }

    /// Resolves a failed model call or unusable output: fallback when enabled,
    /// terminal `GenerationFailed` otherwise.
    fn recover<T>(&self, task: &str, cause: String, synthesize: impl FnOnce() -> T) -> Result<T, AppError> {
        if self.fallback_enabled {
            warn!("{task}: serving fallback output ({cause})");
            Ok(synthesize())
        } else {
            Err(AppError::GenerationFailed(format!("{task}: {cause}")))
        }
    }

    pub async fn generate_resume(&self, fields: &ResumeFields) -> Result<ResumePayload, AppError> {
        let prompt = build_generate_prompt(fields);
        match self
            .call_model(&prompt, GENERATE_SYSTEM, GenerationParams::default())
            .await
        {
            Ok(text) => match interpret_resume(&text) {
                Ok(payload) => {
                    info!("generate: structured resume produced by model");
                    Ok(payload)
                }
                Err(ParseFailure { reason }) => {
                    self.recover("generate", reason, || synthesize_resume(fields))
                }
            },
            Err(ModelUnavailable { reason }) => {
                self.recover("generate", reason, || synthesize_resume(fields))
            }
        }
    }

    pub async fn optimize_resume(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<OptimizationResult, AppError> {
        let prompt = build_optimize_prompt(resume_text, job_description);
        match self
            .call_model(&prompt, OPTIMIZE_SYSTEM, GenerationParams::default())
            .await
        {
            Ok(text) => match interpret_optimization(&text) {
                Ok(result) => Ok(result),
                Err(ParseFailure { reason }) => {
                    self.recover("optimize", reason, || synthesize_optimization(resume_text))
                }
            },
            Err(ModelUnavailable { reason }) => {
                self.recover("optimize", reason, || synthesize_optimization(resume_text))
            }
        }
    }

    pub async fn check_ats(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AtsReport, AppError> {
        let prompt = build_ats_prompt(resume_text, job_description);
        match self
            .call_model(&prompt, ATS_SYSTEM, GenerationParams::default())
            .await
        {
            Ok(text) => match interpret_ats(&text) {
                Ok(report) => Ok(report),
                Err(ParseFailure { reason }) => self.recover("ats_check", reason, synthesize_ats),
            },
            Err(ModelUnavailable { reason }) => {
                self.recover("ats_check", reason, synthesize_ats)
            }
        }
    }

    pub async fn generate_cover_letter(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<String, AppError> {
        let prompt = build_cover_letter_prompt(resume_text, job_description);
        match self
            .call_model(&prompt, COVER_LETTER_SYSTEM, COVER_LETTER_PARAMS)
            .await
        {
            Ok(text) => match interpret_text(&text) {
                Ok(letter) => Ok(letter),
                Err(ParseFailure { reason }) => self.recover("cover_letter", reason, || {
                    FALLBACK_COVER_LETTER.to_string()
                }),
            },
            Err(ModelUnavailable { reason }) => self.recover("cover_letter", reason, || {
                FALLBACK_COVER_LETTER.to_string()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Always returns the same canned text.
    struct CannedModel(&'static str);

    #[async_trait]
    impl TextModel for CannedModel {
        async fn generate(
            &self,
            _prompt: &str,
            _system: &str,
            _params: GenerationParams,
        ) -> Result<String, ModelUnavailable> {
            Ok(self.0.to_string())
        }
    }

    /// Always fails at the transport layer.
    struct DownModel;

    #[async_trait]
    impl TextModel for DownModel {
        async fn generate(
            &self,
            _prompt: &str,
            _system: &str,
            _params: GenerationParams,
        ) -> Result<String, ModelUnavailable> {
            Err(ModelUnavailable::new("connection refused"))
        }
    }

    fn engine_with(model: Arc<dyn TextModel>, fallback_enabled: bool) -> Engine {
        Engine::new(Some(model), fallback_enabled)
    }

    fn ava_fields() -> ResumeFields {
        ResumeFields {
            name: "Ava Lin".to_string(),
            skills: "Go, SQL, Docker".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generate_decodes_json_wrapped_in_prose() {
        let model = Arc::new(CannedModel(
            r#"Here is the resume you asked for:
            {"name": "Ava Lin", "summary": "Backend engineer.", "skills": ["Go", "SQL"]}
            Good luck with the application!"#,
        ));
        let engine = engine_with(model, false);
        let payload = engine.generate_resume(&ava_fields()).await.unwrap();
        assert_eq!(payload.name, "Ava Lin");
        assert_eq!(payload.summary, "Backend engineer.");
        assert_eq!(payload.skills, vec!["Go", "SQL"]);
    }

    #[tokio::test]
    async fn test_generate_model_down_fallback_disabled_fails() {
        let engine = engine_with(Arc::new(DownModel), false);
        let err = engine.generate_resume(&ava_fields()).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_generate_unparsable_output_fallback_disabled_fails() {
        let engine = engine_with(Arc::new(CannedModel("I cannot produce a resume.")), false);
        let err = engine.generate_resume(&ava_fields()).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_generate_model_down_fallback_enabled_synthesizes() {
        let engine = engine_with(Arc::new(DownModel), true);
        let payload = engine.generate_resume(&ava_fields()).await.unwrap();
        assert_eq!(payload.skills, vec!["Go", "SQL", "Docker"]);
        assert!(payload.summary.contains("Go, SQL, Docker"));
    }

    #[tokio::test]
    async fn test_generate_without_model_fallback_enabled_synthesizes() {
        let engine = Engine::new(None, true);
        let payload = engine.generate_resume(&ava_fields()).await.unwrap();
        assert_eq!(payload.name, "Ava Lin");
        assert_eq!(payload.skills, vec!["Go", "SQL", "Docker"]);
    }

    #[tokio::test]
    async fn test_optimize_unparsable_output_fallback_echoes_resume() {
        let engine = engine_with(Arc::new(CannedModel("not json")), true);
        let result = engine
            .optimize_resume("my resume text", "the jd")
            .await
            .unwrap();
        assert_eq!(result.optimized_resume, "my resume text");
        assert_eq!(result.ats_score, Some(78));
    }

    #[tokio::test]
    async fn test_ats_check_happy_path() {
        let engine = engine_with(
            Arc::new(CannedModel(
                r#"{"score": 88, "overall_feedback": "Strong match."}"#,
            )),
            false,
        );
        let report = engine.check_ats("resume", "jd").await.unwrap();
        assert_eq!(report.score, 88);
        assert_eq!(report.overall_feedback, "Strong match.");
    }

    #[tokio::test]
    async fn test_ats_check_model_down_fallback_disabled_fails() {
        let engine = engine_with(Arc::new(DownModel), false);
        let err = engine.check_ats("resume", "jd").await.unwrap_err();
        assert!(matches!(err, AppError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_cover_letter_trims_model_output() {
        let engine = engine_with(Arc::new(CannedModel("  Dear Team,\n\nLetter body.\n  ")), false);
        let letter = engine.generate_cover_letter("resume", "jd").await.unwrap();
        assert_eq!(letter, "Dear Team,\n\nLetter body.");
    }

    #[tokio::test]
    async fn test_cover_letter_model_down_fallback_returns_template() {
        let engine = engine_with(Arc::new(DownModel), true);
        let letter = engine.generate_cover_letter("resume", "jd").await.unwrap();
        assert!(letter.starts_with("Dear Hiring Manager,"));
        assert!(letter.ends_with("[Your Name]"));
    }
}

//! Mentor dialogue acquisition: fetch from the generative endpoint when
//! configured, fall back to fixed scripts otherwise. Callers never see an
//! error from this module; degraded calls are logged and replaced.

mod scripts;
mod wire;

use std::env;

use reqwest::Client;
use tracing::warn;

use mentor_core::model::{
    CareerGoal, DialoguePhase, DialogueScript, LearningPath, Lesson, MentorshipProfile, Mission,
    Proficiency,
};

use crate::error::MentorError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_DIALOGUE_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_CHAT_MODEL: &str = "gemini-3-pro-preview";

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct MentorConfig {
    pub base_url: String,
    pub api_key: String,
    pub dialogue_model: String,
    pub chat_model: String,
}

impl MentorConfig {
    /// Read `GEMINI_API_KEY` (required) and `GEMINI_BASE_URL` (optional).
    /// `None` means generation is disabled and every call falls back.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("GEMINI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Some(Self {
            base_url,
            api_key,
            dialogue_model: DEFAULT_DIALOGUE_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
        })
    }

    fn generate_endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

pub struct MentorService {
    client: Client,
    config: Option<MentorConfig>,
}

impl MentorService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(MentorConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<MentorConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Acquire the mentor dialogue for a lesson phase. Infallible: the very
    /// first lesson uses the scripted onboarding conversation, and any
    /// generation failure degrades to a single-turn fallback.
    pub async fn dialogue(
        &self,
        profile: &MentorshipProfile,
        mission: &Mission,
        lesson: &Lesson,
        phase: DialoguePhase,
        nickname: &str,
    ) -> DialogueScript {
        if mission.id.as_str() == "1-1"
            && lesson.id.as_str() == "1-1-1"
            && phase == DialoguePhase::Intro
        {
            return scripts::flagship_intro(nickname);
        }

        match self
            .generate_dialogue(profile, lesson, phase, nickname)
            .await
        {
            Ok(script) => script,
            Err(err) => {
                warn!(lesson = %lesson.id, error = %err, "dialogue generation failed, using fallback");
                scripts::fallback(nickname)
            }
        }
    }

    async fn generate_dialogue(
        &self,
        profile: &MentorshipProfile,
        lesson: &Lesson,
        phase: DialoguePhase,
        nickname: &str,
    ) -> Result<DialogueScript, MentorError> {
        let config = self.config.as_ref().ok_or(MentorError::Disabled)?;
        let prompt = dialogue_prompt(profile, lesson, phase, nickname);

        let text = self
            .generate(
                config,
                &config.dialogue_model,
                scripts::PERSONA.to_string(),
                prompt,
                Some(wire::dialogue_schema()),
            )
            .await?;
        let envelope: wire::DialogueEnvelope =
            serde_json::from_str(&text).map_err(|e| MentorError::Malformed(e.to_string()))?;

        DialogueScript::new(envelope.dialogues).ok_or(MentorError::EmptyScript)
    }

    /// Free-form mentor Q&A. Infallible: failures degrade to fixed replies.
    pub async fn ask(&self, message: &str) -> String {
        let result = async {
            let config = self.config.as_ref().ok_or(MentorError::Disabled)?;
            self.generate(
                config,
                &config.chat_model,
                format!("{}{}", scripts::PERSONA, scripts::ASK_STYLE_SUFFIX),
                message.to_string(),
                None,
            )
            .await
        }
        .await;

        match result {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => scripts::ASK_EMPTY_REPLY.to_string(),
            Err(err) => {
                warn!(error = %err, "mentor chat failed");
                scripts::ASK_CONNECTION_ERROR.to_string()
            }
        }
    }

    /// Static roadmap recommendation; deliberately not a generative call.
    #[must_use]
    pub fn learning_path(&self, proficiency: Proficiency, goal: CareerGoal) -> LearningPath {
        LearningPath {
            proficiency,
            goal,
            recommended_mission_ids: vec!["1-1".into(), "2-1".into()],
            custom_plan: "데이터 기반 의사결정 역량 강화 경로".to_string(),
        }
    }

    async fn generate(
        &self,
        config: &MentorConfig,
        model: &str,
        system_instruction: String,
        prompt: String,
        response_schema: Option<serde_json::Value>,
    ) -> Result<String, MentorError> {
        let payload = wire::GenerateRequest {
            system_instruction: wire::Content::text(system_instruction),
            contents: vec![wire::Content::text(prompt)],
            generation_config: response_schema.map(|schema| wire::GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };

        let response = self
            .client
            .post(config.generate_endpoint(model))
            .header("x-goog-api-key", &config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MentorError::HttpStatus(response.status()));
        }

        let body: wire::GenerateResponse = response.json().await?;
        body.into_text().ok_or(MentorError::EmptyResponse)
    }
}

fn dialogue_prompt(
    profile: &MentorshipProfile,
    lesson: &Lesson,
    phase: DialoguePhase,
    nickname: &str,
) -> String {
    let phase_label = match phase {
        DialoguePhase::Intro => "업무 시작 전 브리핑",
        DialoguePhase::Outro => "업무 완료 후 피드백",
    };
    format!(
        "현재 페이즈: {phase_label}\n\
         사용자 목표: {industry} 산업의 {role} 지망\n\
         레슨 주제: {title}\n\n\
         위 맥락에 맞춰 {nickname} 사원에게 줄 **최소 10개 이상의 주고받는 대화문**을 생성해 주세요. \n\
         단순한 정보 전달이 아니라, 실무에서 시니어와 주니어가 메신저로 대화하는 듯한 현장감을 살려주세요.\n\
         사용자의 턴(isUserTurn: true)도 적절히 섞어 자연스러운 대화 흐름을 만드세요.",
        industry = profile.industry,
        role = profile.role,
        title = lesson.title,
    )
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::MissionId;

/// Industry the learner is aiming for; embedded verbatim into mentor prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetIndustry {
    #[default]
    Commerce,
    Fashion,
    Fintech,
    Beauty,
    Mobility,
    GeneralIt,
}

impl TargetIndustry {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetIndustry::Commerce => "커머스 (쿠팡, 11번가, 네이버쇼핑 등)",
            TargetIndustry::Fashion => "패션/라이프스타일 (지그재그, 무신사, 에이블리 등)",
            TargetIndustry::Fintech => "금융/핀테크 (토스, 카카오뱅크, 뱅크샐러드 등)",
            TargetIndustry::Beauty => "뷰티 (올리브영, 화해, 컬리 뷰티 등)",
            TargetIndustry::Mobility => "모빌리티/제조 (현대자동차, 쏘카, 타다 등)",
            TargetIndustry::GeneralIt => "기타 일반 IT (당근, 배달의민족 등)",
        }
    }
}

impl fmt::Display for TargetIndustry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role the learner is training toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetRole {
    #[default]
    DataAnalyst,
    BiEngineer,
    ServicePlanner,
    GrowthMarketer,
}

impl TargetRole {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetRole::DataAnalyst => "데이터 분석가",
            TargetRole::BiEngineer => "BI 엔지니어",
            TargetRole::ServicePlanner => "서비스 기획자",
            TargetRole::GrowthMarketer => "그로스 마케터",
        }
    }
}

impl fmt::Display for TargetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mentorship context captured during profile setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MentorshipProfile {
    pub industry: TargetIndustry,
    pub role: TargetRole,
}

/// Self-assessed starting point for roadmap recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
}

impl Proficiency {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Beginner => "입문자",
            Proficiency::Intermediate => "중급자",
            Proficiency::Advanced => "숙련자",
        }
    }
}

/// Career destination driving the recommended mission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareerGoal {
    BiEngineer,
    DataAnalyst,
    ProductManager,
    BusinessAnalyst,
    GrowthMarketer,
}

impl CareerGoal {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CareerGoal::BiEngineer => "BI 엔지니어",
            CareerGoal::DataAnalyst => "데이터 분석가",
            CareerGoal::ProductManager => "PM/PO",
            CareerGoal::BusinessAnalyst => "비즈니스 애널리스트",
            CareerGoal::GrowthMarketer => "그로스 마케터",
        }
    }
}

/// Personalized roadmap shown on the "my path" view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    pub proficiency: Proficiency,
    pub goal: CareerGoal,
    pub recommended_mission_ids: Vec<MissionId>,
    pub custom_plan: String,
}

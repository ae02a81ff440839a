use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use crate::models::recommendation::Recommendation;

/// Maturity score in the closed range 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct MaturityScore(u8);

impl MaturityScore {
    pub const MIN: MaturityScore = MaturityScore(0);
    pub const MAX: MaturityScore = MaturityScore(100);

    /// Builds a score, saturating anything outside 0..=100.
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(0, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn bracket(self) -> MaturityBracket {
        MaturityBracket::for_score(self)
    }
}

impl TryFrom<i64> for MaturityScore {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(format!("maturity score out of range: {value}"))
        }
    }
}

impl From<MaturityScore> for u8 {
    fn from(score: MaturityScore) -> Self {
        score.0
    }
}

impl fmt::Display for MaturityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contiguous score ranges: [0,25), [25,50), [50,75), [75,100].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MaturityBracket {
    Foundational,
    Developing,
    Advanced,
    Leading,
}

impl MaturityBracket {
    pub const ALL: [MaturityBracket; 4] = [
        MaturityBracket::Foundational,
        MaturityBracket::Developing,
        MaturityBracket::Advanced,
        MaturityBracket::Leading,
    ];

    pub fn for_score(score: MaturityScore) -> Self {
        match score.value() {
            0..=24 => MaturityBracket::Foundational,
            25..=49 => MaturityBracket::Developing,
            50..=74 => MaturityBracket::Advanced,
            _ => MaturityBracket::Leading,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaturityBracket::Foundational => "foundational",
            MaturityBracket::Developing => "developing",
            MaturityBracket::Advanced => "advanced",
            MaturityBracket::Leading => "leading",
        }
    }
}

impl fmt::Display for MaturityBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MaturityBracket {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "foundational" => Ok(MaturityBracket::Foundational),
            "developing" => Ok(MaturityBracket::Developing),
            "advanced" => Ok(MaturityBracket::Advanced),
            "leading" => Ok(MaturityBracket::Leading),
            other => Err(format!("unsupported maturity bracket: {other}")),
        }
    }
}

impl FromStr for MaturityBracket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Answers to `ai_tools_usage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiToolsUsage {
    None,
    BasicTools,
    AdvancedAi,
    CustomAiSolutions,
}

impl AiToolsUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiToolsUsage::None => "None",
            AiToolsUsage::BasicTools => "Basic tools",
            AiToolsUsage::AdvancedAi => "Advanced AI",
            AiToolsUsage::CustomAiSolutions => "Custom AI solutions",
        }
    }

    pub fn sub_score(&self) -> u32 {
        match self {
            AiToolsUsage::None => 0,
            AiToolsUsage::BasicTools => 33,
            AiToolsUsage::AdvancedAi => 67,
            AiToolsUsage::CustomAiSolutions => 100,
        }
    }
}

impl TryFrom<&str> for AiToolsUsage {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "None" => Ok(AiToolsUsage::None),
            "Basic tools" => Ok(AiToolsUsage::BasicTools),
            "Advanced AI" => Ok(AiToolsUsage::AdvancedAi),
            "Custom AI solutions" => Ok(AiToolsUsage::CustomAiSolutions),
            other => Err(format!("unsupported ai_tools_usage answer: {other}")),
        }
    }
}

/// Answers to `data_management`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataManagement {
    Spreadsheets,
    BasicDatabases,
    AdvancedAnalytics,
    AiDrivenInsights,
}

impl DataManagement {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataManagement::Spreadsheets => "Spreadsheets",
            DataManagement::BasicDatabases => "Basic databases",
            DataManagement::AdvancedAnalytics => "Advanced analytics",
            DataManagement::AiDrivenInsights => "AI-driven insights",
        }
    }

    pub fn sub_score(&self) -> u32 {
        match self {
            DataManagement::Spreadsheets => 25,
            DataManagement::BasicDatabases => 50,
            DataManagement::AdvancedAnalytics => 75,
            DataManagement::AiDrivenInsights => 100,
        }
    }
}

impl TryFrom<&str> for DataManagement {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Spreadsheets" => Ok(DataManagement::Spreadsheets),
            "Basic databases" => Ok(DataManagement::BasicDatabases),
            "Advanced analytics" => Ok(DataManagement::AdvancedAnalytics),
            "AI-driven insights" => Ok(DataManagement::AiDrivenInsights),
            other => Err(format!("unsupported data_management answer: {other}")),
        }
    }
}

/// Questionnaire answers keyed by question. Every key is optional and
/// unknown keys are ignored. Enum answers keep the submitted text verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResponses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_infrastructure: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_tools_usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_management: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_readiness: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_automation: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_strategy: Option<String>,
}

impl AssessmentResponses {
    /// Integer-scale questions paired with their key.
    pub fn scale_answers(&self) -> [(&'static str, Option<i64>); 3] {
        [
            ("tech_infrastructure", self.tech_infrastructure),
            ("team_readiness", self.team_readiness),
            ("process_automation", self.process_automation),
        ]
    }
}

impl From<AssessmentResponses> for JsonValue {
    fn from(responses: AssessmentResponses) -> Self {
        json!({
            "tech_infrastructure": responses.tech_infrastructure,
            "ai_tools_usage": responses.ai_tools_usage,
            "data_management": responses.data_management,
            "team_readiness": responses.team_readiness,
            "process_automation": responses.process_automation,
            "ai_strategy": responses.ai_strategy,
        })
    }
}

/// Contact details as submitted; nothing is required at this stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfoInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
}

/// Validated contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentSubmissionRequest {
    #[serde(default)]
    pub user_info: Option<UserInfoInput>,
    /// Raw answers. Kept untyped so a mistyped answer surfaces as a field
    /// validation error from the handler, not a deserialization failure.
    #[serde(default)]
    pub responses: Option<JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSubmissionResponse {
    pub success: bool,
    pub assessment_id: String,
    pub maturity_score: MaturityScore,
    pub recommendations: Vec<Recommendation>,
    pub message: String,
    pub timestamp: String,
}

/// Immutable record of one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: String,
    pub user_info: UserInfo,
    pub responses: AssessmentResponses,
    pub maturity_score: MaturityScore,
    pub recommendations: Vec<Recommendation>,
    pub submitted_at: String,
}

impl AssessmentRecord {
    pub fn bracket(&self) -> MaturityBracket {
        self.maturity_score.bracket()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub maturity_score: MaturityScore,
    pub bracket: MaturityBracket,
    pub submitted_at: String,
}

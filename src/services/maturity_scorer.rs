use serde::Serialize;

use crate::models::assessment::{
    AiToolsUsage, AssessmentResponses, DataManagement, MaturityScore,
};

const SCALE_MULTIPLIER: i64 = 20;
const MAX_SUB_SCORE: u32 = 100;

/// Anything that turns questionnaire answers into a maturity score.
///
/// `MaturityScorer` is the only production implementation; tests swap in
/// fixed-score doubles through this trait.
pub trait MaturityScoring: Send + Sync {
    fn score(&self, responses: &AssessmentResponses) -> MaturityScore;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaturityScorer;

impl MaturityScoring for MaturityScorer {
    fn score(&self, responses: &AssessmentResponses) -> MaturityScore {
        calculate_maturity_score(responses).score
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionScore {
    pub question: &'static str,
    pub sub_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub sub_scores: Vec<QuestionScore>,
    pub score: MaturityScore,
}

impl ScoreBreakdown {
    pub fn counted(&self) -> usize {
        self.sub_scores.len()
    }
}

/// Averages the normalized 0-100 sub-score of every answered question.
///
/// `ai_strategy` always counts toward the average, answered or not; an
/// unanswered strategy contributes 0.
pub fn calculate_maturity_score(responses: &AssessmentResponses) -> ScoreBreakdown {
    let mut sub_scores = Vec::with_capacity(6);

    for (question, answer) in responses.scale_answers() {
        if let Some(raw) = answer {
            sub_scores.push(QuestionScore {
                question,
                sub_score: scale_sub_score(raw),
            });
        }
    }

    if let Some(answer) = responses.ai_tools_usage.as_deref() {
        sub_scores.push(QuestionScore {
            question: "ai_tools_usage",
            sub_score: AiToolsUsage::try_from(answer.trim()).map_or(0, |usage| usage.sub_score()),
        });
    }

    if let Some(answer) = responses.data_management.as_deref() {
        sub_scores.push(QuestionScore {
            question: "data_management",
            sub_score: DataManagement::try_from(answer.trim())
                .map_or(0, |management| management.sub_score()),
        });
    }

    sub_scores.push(QuestionScore {
        question: "ai_strategy",
        sub_score: strategy_sub_score(responses.ai_strategy.as_deref()),
    });

    let score = average(&sub_scores);
    ScoreBreakdown { sub_scores, score }
}

fn scale_sub_score(raw: i64) -> u32 {
    raw.saturating_mul(SCALE_MULTIPLIER)
        .clamp(0, MAX_SUB_SCORE as i64) as u32
}

fn strategy_sub_score(answer: Option<&str>) -> u32 {
    match answer {
        Some(value) if value.trim().eq_ignore_ascii_case("yes") => MAX_SUB_SCORE,
        _ => 0,
    }
}

fn average(sub_scores: &[QuestionScore]) -> MaturityScore {
    if sub_scores.is_empty() {
        return MaturityScore::MIN;
    }
    let total: u32 = sub_scores.iter().map(|entry| entry.sub_score).sum();
    let mean = f64::from(total) / sub_scores.len() as f64;
    MaturityScore::saturating(mean.round() as i64)
}

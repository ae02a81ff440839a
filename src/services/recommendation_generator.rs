use crate::models::assessment::{MaturityBracket, MaturityScore};
use crate::models::recommendation::{Recommendation, RecommendationPriority};

struct RecommendationTemplate {
    title: &'static str,
    description: &'static str,
    priority: RecommendationPriority,
    timeline: &'static str,
    category: &'static str,
}

impl RecommendationTemplate {
    fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            title: self.title.to_string(),
            description: self.description.to_string(),
            priority: self.priority,
            timeline: self.timeline.to_string(),
            category: self.category.to_string(),
        }
    }
}

static FOUNDATIONAL: [RecommendationTemplate; 2] = [
    RecommendationTemplate {
        title: "AI Foundation Building",
        description: "Build baseline AI literacy across leadership and pick one or two low-risk pilot use cases with measurable outcomes.",
        priority: RecommendationPriority::High,
        timeline: "1-3 months",
        category: "Strategy",
    },
    RecommendationTemplate {
        title: "Data Infrastructure Setup",
        description: "Consolidate scattered spreadsheets into a structured, governed data store so future AI work has reliable inputs.",
        priority: RecommendationPriority::High,
        timeline: "2-4 months",
        category: "Data",
    },
];

static DEVELOPING: [RecommendationTemplate; 2] = [
    RecommendationTemplate {
        title: "Process Automation Implementation",
        description: "Automate repetitive, rules-based workflows to free team capacity and create early wins that fund further AI investment.",
        priority: RecommendationPriority::High,
        timeline: "2-3 months",
        category: "Automation",
    },
    RecommendationTemplate {
        title: "Team AI Training Program",
        description: "Run hands-on training on practical AI tools and appoint internal champions to drive adoption in each department.",
        priority: RecommendationPriority::Medium,
        timeline: "1-2 months",
        category: "People",
    },
];

static ADVANCED: [RecommendationTemplate; 2] = [
    RecommendationTemplate {
        title: "Advanced AI Integration",
        description: "Embed machine learning models into core business processes such as forecasting, personalization and decision support.",
        priority: RecommendationPriority::High,
        timeline: "3-6 months",
        category: "Technology",
    },
    RecommendationTemplate {
        title: "AI Governance Framework",
        description: "Define policies for responsible AI use, model monitoring, data privacy and accountability before scaling further.",
        priority: RecommendationPriority::Medium,
        timeline: "2-3 months",
        category: "Governance",
    },
];

static LEADING: [RecommendationTemplate; 2] = [
    RecommendationTemplate {
        title: "AI Innovation Leadership",
        description: "Develop proprietary AI capabilities and explore AI-native products or services that differentiate the business.",
        priority: RecommendationPriority::Strategic,
        timeline: "6-12 months",
        category: "Innovation",
    },
    RecommendationTemplate {
        title: "AI Center of Excellence",
        description: "Stand up a dedicated team that owns AI standards, shares reusable assets and scales proven practices company-wide.",
        priority: RecommendationPriority::Medium,
        timeline: "3-6 months",
        category: "Organization",
    },
];

fn templates_for(bracket: MaturityBracket) -> &'static [RecommendationTemplate; 2] {
    match bracket {
        MaturityBracket::Foundational => &FOUNDATIONAL,
        MaturityBracket::Developing => &DEVELOPING,
        MaturityBracket::Advanced => &ADVANCED,
        MaturityBracket::Leading => &LEADING,
    }
}

/// Returns the fixed recommendation pair for the score's bracket.
pub fn generate_recommendations(score: MaturityScore) -> Vec<Recommendation> {
    recommendations_for_bracket(score.bracket())
}

pub fn recommendations_for_bracket(bracket: MaturityBracket) -> Vec<Recommendation> {
    templates_for(bracket)
        .iter()
        .map(RecommendationTemplate::to_recommendation)
        .collect()
}

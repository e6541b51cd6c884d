use serde::{Deserialize, Serialize};

use super::domain::{AssessmentRecord, Intensity, LifestyleFactor};

/// Discrete care levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareTier {
    Baseline,
    Enhanced,
    Comprehensive,
}

impl CareTier {
    pub const fn label(self) -> &'static str {
        match self {
            CareTier::Baseline => "Preventive Wellness",
            CareTier::Enhanced => "Targeted Support",
            CareTier::Comprehensive => "Comprehensive Care",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            CareTier::Comprehensive => {
                "Based on your symptoms and stress indicators, we recommend our Comprehensive \
                 Care Package: a full hormone and metabolic panel, a provider consultation, and \
                 ongoing lifestyle coaching."
            }
            CareTier::Enhanced => {
                "Your responses point to specific areas worth addressing. We recommend our \
                 Targeted Support Plan with focused lab work and a follow-up consultation."
            }
            CareTier::Baseline => {
                "You're in a good place. We recommend our Preventive Wellness Plan with an \
                 annual baseline panel to keep tracking your health."
            }
        }
    }
}

/// Trigger constants for the tier rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub symptom_threshold: usize,
    pub lifestyle_triggers: Vec<LifestyleFactor>,
    pub intensity_trigger: Intensity,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            symptom_threshold: 3,
            lifestyle_triggers: vec![LifestyleFactor::HighStress, LifestyleFactor::PoorSleep],
            intensity_trigger: Intensity::High,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub tier: CareTier,
    pub message: String,
    /// Signals that matched, in evaluation order.
    pub rationale: Vec<String>,
}

#[derive(Debug, Default)]
pub(crate) struct RecommendationSignals {
    pub symptom_burden: bool,
    pub lifestyle_concern: bool,
    pub mental_health_concern: bool,
}

impl RecommendationSignals {
    fn collect(record: &AssessmentRecord, config: &RecommendationConfig) -> Self {
        let mental = &record.mental_health;
        Self {
            symptom_burden: record.symptoms.len() >= config.symptom_threshold,
            lifestyle_concern: config
                .lifestyle_triggers
                .iter()
                .any(|trigger| record.lifestyle_factors.contains(trigger)),
            mental_health_concern: mental.stress_level == Some(config.intensity_trigger)
                || mental.anxiety_level == Some(config.intensity_trigger),
        }
    }

    fn any_concern(&self) -> bool {
        self.lifestyle_concern || self.mental_health_concern
    }
}

pub(crate) struct TierRule {
    pub tier: CareTier,
    pub applies: fn(&RecommendationSignals) -> bool,
}

fn comprehensive(signals: &RecommendationSignals) -> bool {
    signals.symptom_burden && signals.any_concern()
}

fn enhanced(signals: &RecommendationSignals) -> bool {
    signals.symptom_burden || signals.any_concern()
}

fn baseline(_: &RecommendationSignals) -> bool {
    true
}

/// Evaluated top-down; the first matching rule wins.
pub(crate) const TIER_RULES: [TierRule; 3] = [
    TierRule {
        tier: CareTier::Comprehensive,
        applies: comprehensive,
    },
    TierRule {
        tier: CareTier::Enhanced,
        applies: enhanced,
    },
    TierRule {
        tier: CareTier::Baseline,
        applies: baseline,
    },
];

/// Stateless rule matcher over a finished record.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    pub fn recommend(&self, record: &AssessmentRecord) -> Recommendation {
        let signals = RecommendationSignals::collect(record, &self.config);
        let tier = TIER_RULES
            .iter()
            .find(|rule| (rule.applies)(&signals))
            .map(|rule| rule.tier)
            .unwrap_or(CareTier::Baseline);

        Recommendation {
            tier,
            message: tier.message().to_string(),
            rationale: self.rationale(record, &signals),
        }
    }

    fn rationale(&self, record: &AssessmentRecord, signals: &RecommendationSignals) -> Vec<String> {
        let mut reasons = Vec::new();
        if signals.symptom_burden {
            reasons.push(format!(
                "{} symptoms reported (threshold {})",
                record.symptoms.len(),
                self.config.symptom_threshold
            ));
        }
        if signals.lifestyle_concern {
            let matched: Vec<&str> = self
                .config
                .lifestyle_triggers
                .iter()
                .filter(|trigger| record.lifestyle_factors.contains(*trigger))
                .map(|trigger| trigger.label())
                .collect();
            reasons.push(format!("lifestyle concern: {}", matched.join(", ")));
        }
        if signals.mental_health_concern {
            reasons.push(format!(
                "{:?} stress or anxiety reported",
                self.config.intensity_trigger
            ));
        }
        reasons
    }
}

/// Recommend with the stock thresholds.
pub fn recommend(record: &AssessmentRecord) -> Recommendation {
    RecommendationEngine::default().recommend(record)
}

use serde::{Deserialize, Serialize};

use super::domain::{is_provided, AssessmentRecord};

/// Points awarded per answered item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub per_symptom: f64,
    pub per_lifestyle_factor: f64,
    pub per_goal: f64,
    pub per_physical_answer: f64,
    pub per_mental_answer: f64,
    pub per_body_measurement: f64,
    pub per_cardio_measurement: f64,
    pub max_score: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            per_symptom: 2.0,
            per_lifestyle_factor: 1.0,
            per_goal: 1.5,
            per_physical_answer: 5.0,
            per_mental_answer: 5.0,
            per_body_measurement: 2.0,
            per_cardio_measurement: 3.0,
            max_score: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Symptoms,
    LifestyleFactors,
    Goals,
    PhysicalHealth,
    MentalHealth,
    BodyMeasurements,
    CardioMeasurements,
}

/// One line of the score audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementScore {
    /// Clamped, rounded total in `0..=100`.
    pub total: u8,
    /// Unclamped sum of every component.
    pub raw: f64,
    pub components: Vec<ScoreComponent>,
}

/// Weighted additive scorer; stateless apart from its weights.
#[derive(Debug, Clone, Default)]
pub struct EngagementScorer {
    weights: ScoringWeights,
}

impl EngagementScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(&self, record: &AssessmentRecord) -> u8 {
        self.breakdown(record).total
    }

    pub fn breakdown(&self, record: &AssessmentRecord) -> EngagementScore {
        let weights = &self.weights;
        let body_measurements = [&record.vitals_input.weight, &record.vitals_input.height]
            .into_iter()
            .filter(|value| is_provided(value))
            .count();
        let cardio_measurements = [
            &record.vitals_input.blood_pressure,
            &record.vitals_input.resting_heart_rate,
        ]
        .into_iter()
        .filter(|value| is_provided(value))
        .count();

        let counts = [
            (ScoreFactor::Symptoms, record.symptoms.len(), weights.per_symptom, "symptom(s) selected"),
            (
                ScoreFactor::LifestyleFactors,
                record.lifestyle_factors.len(),
                weights.per_lifestyle_factor,
                "lifestyle factor(s) selected",
            ),
            (ScoreFactor::Goals, record.goals.len(), weights.per_goal, "goal(s) selected"),
            (
                ScoreFactor::PhysicalHealth,
                record.physical_health.answered(),
                weights.per_physical_answer,
                "physical health question(s) answered",
            ),
            (
                ScoreFactor::MentalHealth,
                record.mental_health.answered(),
                weights.per_mental_answer,
                "mental health question(s) answered",
            ),
            (
                ScoreFactor::BodyMeasurements,
                body_measurements,
                weights.per_body_measurement,
                "of weight/height provided",
            ),
            (
                ScoreFactor::CardioMeasurements,
                cardio_measurements,
                weights.per_cardio_measurement,
                "of blood pressure/resting heart rate provided",
            ),
        ];

        let components: Vec<ScoreComponent> = counts
            .into_iter()
            .filter(|(_, count, _, _)| *count > 0)
            .map(|(factor, count, weight, label)| ScoreComponent {
                factor,
                points: count as f64 * weight,
                notes: format!("{count} {label}"),
            })
            .collect();

        let raw: f64 = components.iter().map(|component| component.points).sum();
        let total = raw.clamp(0.0, weights.max_score.clamp(0.0, 100.0)).round() as u8;

        EngagementScore {
            total,
            raw,
            components,
        }
    }
}

/// Score a record with the default weights.
pub fn score(record: &AssessmentRecord) -> u8 {
    EngagementScorer::default().score(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::domain::{
        Frequency, Goal, Intensity, LifestyleFactor, Quality, Symptom,
    };

    #[test]
    fn empty_record_scores_zero() {
        let breakdown = EngagementScorer::default().breakdown(&AssessmentRecord::empty());
        assert_eq!(breakdown.total, 0);
        assert!(breakdown.components.is_empty());
    }

    #[test]
    fn weights_each_answer_group() {
        let mut record = AssessmentRecord::empty();
        record.symptoms.extend([Symptom::Fatigue, Symptom::BrainFog]);
        record.lifestyle_factors.insert(LifestyleFactor::Smoking);
        record.goals.extend([Goal::Longevity, Goal::BetterSleep]);
        record.physical_health.exercise_frequency = Some(Frequency::Daily);
        record.mental_health.stress_level = Some(Intensity::Low);
        record.mental_health.mood_stability = Some(Quality::Good);
        record.vitals_input.weight = "72".to_string();
        record.vitals_input.resting_heart_rate = "64".to_string();

        let breakdown = EngagementScorer::default().breakdown(&record);

        // 4 + 1 + 3 + 5 + 10 + 2 + 3
        assert_eq!(breakdown.raw, 28.0);
        assert_eq!(breakdown.total, 28);
        assert_eq!(breakdown.components.len(), 7);
    }

    #[test]
    fn half_points_round_up() {
        let mut record = AssessmentRecord::empty();
        record.goals.insert(Goal::Longevity);
        assert_eq!(score(&record), 2);
    }

    #[test]
    fn blank_vitals_strings_are_not_counted() {
        let mut record = AssessmentRecord::empty();
        record.vitals_input.weight = "   ".to_string();
        record.vitals_input.blood_pressure = "120/80".to_string();
        assert_eq!(score(&record), 3);
    }

    #[test]
    fn fully_answered_record_is_capped_at_one_hundred() {
        let mut record = AssessmentRecord::empty();
        record.symptoms.extend(Symptom::ALL);
        record.lifestyle_factors.extend(LifestyleFactor::ALL);
        record.goals.extend(Goal::ALL);
        record.physical_health.exercise_frequency = Some(Frequency::Never);
        record.physical_health.sleep_quality = Some(Quality::Poor);
        record.physical_health.energy_level = Some(Quality::Poor);
        record.mental_health.stress_level = Some(Intensity::High);
        record.mental_health.mood_stability = Some(Quality::Fair);
        record.mental_health.anxiety_level = Some(Intensity::High);
        record.vitals_input.weight = "80".to_string();
        record.vitals_input.height = "180".to_string();
        record.vitals_input.blood_pressure = "130/85".to_string();
        record.vitals_input.resting_heart_rate = "70".to_string();

        // 22 + 7 + 10.5 + 15 + 15 + 4 + 6 = 79.5 with the stock vocabulary.
        assert_eq!(score(&record), 80);

        let generous = EngagementScorer::new(ScoringWeights {
            per_symptom: 50.0,
            ..ScoringWeights::default()
        });
        let breakdown = generous.breakdown(&record);
        assert!(breakdown.raw > 100.0);
        assert_eq!(breakdown.total, 100);
    }

    #[test]
    fn score_never_decreases_as_answers_are_added() {
        let mut record = AssessmentRecord::empty();
        let mut previous = score(&record);

        let mut steps: Vec<Box<dyn Fn(&mut AssessmentRecord)>> = Vec::new();
        for symptom in Symptom::ALL {
            steps.push(Box::new(move |r| {
                r.symptoms.insert(symptom);
            }));
        }
        for goal in Goal::ALL {
            steps.push(Box::new(move |r| {
                r.goals.insert(goal);
            }));
        }
        steps.push(Box::new(|r| r.physical_health.sleep_quality = Some(Quality::Good)));
        steps.push(Box::new(|r| r.mental_health.anxiety_level = Some(Intensity::Minimal)));
        steps.push(Box::new(|r| r.vitals_input.height = "170".to_string()));

        for step in steps {
            step(&mut record);
            let current = score(&record);
            assert!(current >= previous, "{current} < {previous}");
            previous = current;
        }
    }
}

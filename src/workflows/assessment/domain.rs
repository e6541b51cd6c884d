use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Symptom tags offered on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symptom {
    Fatigue,
    #[serde(rename = "Brain Fog")]
    BrainFog,
    #[serde(rename = "Weight Gain")]
    WeightGain,
    #[serde(rename = "Low Libido")]
    LowLibido,
    #[serde(rename = "Mood Swings")]
    MoodSwings,
    #[serde(rename = "Hot Flashes")]
    HotFlashes,
    #[serde(rename = "Joint Pain")]
    JointPain,
    #[serde(rename = "Digestive Issues")]
    DigestiveIssues,
    Headaches,
    #[serde(rename = "Hair Loss")]
    HairLoss,
    Insomnia,
}

impl Symptom {
    pub const ALL: [Self; 11] = [
        Self::Fatigue,
        Self::BrainFog,
        Self::WeightGain,
        Self::LowLibido,
        Self::MoodSwings,
        Self::HotFlashes,
        Self::JointPain,
        Self::DigestiveIssues,
        Self::Headaches,
        Self::HairLoss,
        Self::Insomnia,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fatigue => "Fatigue",
            Self::BrainFog => "Brain Fog",
            Self::WeightGain => "Weight Gain",
            Self::LowLibido => "Low Libido",
            Self::MoodSwings => "Mood Swings",
            Self::HotFlashes => "Hot Flashes",
            Self::JointPain => "Joint Pain",
            Self::DigestiveIssues => "Digestive Issues",
            Self::Headaches => "Headaches",
            Self::HairLoss => "Hair Loss",
            Self::Insomnia => "Insomnia",
        }
    }
}

/// Lifestyle tags. `HighStress` and `PoorSleep` drive the recommendation tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LifestyleFactor {
    #[serde(rename = "High Stress")]
    HighStress,
    #[serde(rename = "Poor Sleep")]
    PoorSleep,
    #[serde(rename = "Sedentary Lifestyle")]
    Sedentary,
    #[serde(rename = "Poor Diet")]
    PoorDiet,
    Smoking,
    #[serde(rename = "Frequent Alcohol")]
    FrequentAlcohol,
    #[serde(rename = "Irregular Schedule")]
    IrregularSchedule,
}

impl LifestyleFactor {
    pub const ALL: [Self; 7] = [
        Self::HighStress,
        Self::PoorSleep,
        Self::Sedentary,
        Self::PoorDiet,
        Self::Smoking,
        Self::FrequentAlcohol,
        Self::IrregularSchedule,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::HighStress => "High Stress",
            Self::PoorSleep => "Poor Sleep",
            Self::Sedentary => "Sedentary Lifestyle",
            Self::PoorDiet => "Poor Diet",
            Self::Smoking => "Smoking",
            Self::FrequentAlcohol => "Frequent Alcohol",
            Self::IrregularSchedule => "Irregular Schedule",
        }
    }
}

/// Health goals a patient can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Weight Management")]
    WeightManagement,
    #[serde(rename = "Increased Energy")]
    IncreasedEnergy,
    #[serde(rename = "Better Sleep")]
    BetterSleep,
    #[serde(rename = "Stress Reduction")]
    StressReduction,
    #[serde(rename = "Hormone Balance")]
    HormoneBalance,
    #[serde(rename = "Improved Fitness")]
    ImprovedFitness,
    Longevity,
}

impl Goal {
    pub const ALL: [Self; 7] = [
        Self::WeightManagement,
        Self::IncreasedEnergy,
        Self::BetterSleep,
        Self::StressReduction,
        Self::HormoneBalance,
        Self::ImprovedFitness,
        Self::Longevity,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::WeightManagement => "Weight Management",
            Self::IncreasedEnergy => "Increased Energy",
            Self::BetterSleep => "Better Sleep",
            Self::StressReduction => "Stress Reduction",
            Self::HormoneBalance => "Hormone Balance",
            Self::ImprovedFitness => "Improved Fitness",
            Self::Longevity => "Longevity",
        }
    }
}

/// Four-level answer for how often the patient exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Never,
    Occasionally,
    Regularly,
    Daily,
}

/// Four-level answer for sleep quality, energy level and mood stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    Poor,
    Fair,
    Good,
    Excellent,
}

/// Four-level answer for stress and anxiety. `High` is the recommendation trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    Minimal,
    Low,
    Moderate,
    High,
}

/// Physical health answers; `None` means unanswered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicalHealth {
    pub exercise_frequency: Option<Frequency>,
    pub sleep_quality: Option<Quality>,
    pub energy_level: Option<Quality>,
}

impl PhysicalHealth {
    pub fn answered(&self) -> usize {
        [
            self.exercise_frequency.is_some(),
            self.sleep_quality.is_some(),
            self.energy_level.is_some(),
        ]
        .into_iter()
        .filter(|answered| *answered)
        .count()
    }
}

/// Mental health answers; `None` means unanswered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MentalHealth {
    pub stress_level: Option<Intensity>,
    pub mood_stability: Option<Quality>,
    pub anxiety_level: Option<Intensity>,
}

impl MentalHealth {
    pub fn answered(&self) -> usize {
        [
            self.stress_level.is_some(),
            self.mood_stability.is_some(),
            self.anxiety_level.is_some(),
        ]
        .into_iter()
        .filter(|answered| *answered)
        .count()
    }
}

/// Self-reported vitals captured as free text. Blank strings are unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VitalsInput {
    pub weight: String,
    pub height: String,
    pub blood_pressure: String,
    pub resting_heart_rate: String,
}

/// Contact details collected only by the lead-capture flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Normalized self-assessment. Every field defaults to its empty form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentRecord {
    pub symptoms: BTreeSet<Symptom>,
    pub lifestyle_factors: BTreeSet<LifestyleFactor>,
    pub goals: BTreeSet<Goal>,
    pub physical_health: PhysicalHealth,
    pub mental_health: MentalHealth,
    pub vitals_input: VitalsInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
}

impl AssessmentRecord {
    /// Blank draft with every set empty and every answer unset.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Blank draft for the lead-capture flow, which also collects contact details.
    pub fn empty_with_contact() -> Self {
        Self {
            personal_info: Some(PersonalInfo::default()),
            ..Self::default()
        }
    }
}

pub(crate) fn is_provided(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Add `tag` when absent, remove it when present.
pub fn toggle_tag<T: Ord + Copy>(set: &BTreeSet<T>, tag: T) -> BTreeSet<T> {
    if set.contains(&tag) {
        set.iter().copied().filter(|member| *member != tag).collect()
    } else {
        let mut toggled = set.clone();
        toggled.insert(tag);
        toggled
    }
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{errors::RelayError, pace_model::PaceModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaceStatus {
    Setup,
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegStatus {
    Upcoming,
    Active,
    Completed,
}

/// Standard race distances a runner can report a personal record for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrDistance {
    #[serde(rename = "5k")]
    FiveK,
    #[serde(rename = "10k")]
    TenK,
    #[serde(rename = "half")]
    Half,
    #[serde(rename = "marathon")]
    Marathon,
}

impl PrDistance {
    pub fn miles(&self) -> f64 {
        match self {
            PrDistance::FiveK => 3.10686,
            PrDistance::TenK => 6.21371,
            PrDistance::Half => 13.1094,
            PrDistance::Marathon => 26.2188,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrDistance::FiveK => "5K",
            PrDistance::TenK => "10K",
            PrDistance::Half => "Half Marathon",
            PrDistance::Marathon => "Marathon",
        }
    }
}

/// Terrain category of a leg.
///
/// Unrecognized values from the wire land in `Unknown` instead of failing
/// the whole snapshot; they are priced as flat terrain and written back
/// exactly as they were read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    ExtraHard,
    Unknown(String),
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::ExtraHard => "extra hard",
            Difficulty::Unknown(raw) => raw,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            "extra hard" | "extra-hard" | "extra_hard" => Difficulty::ExtraHard,
            _ => Difficulty::Unknown(s.to_string()),
        }
    }
}

impl From<String> for Difficulty {
    fn from(s: String) -> Self {
        Difficulty::parse(&s)
    }
}

impl From<Difficulty> for String {
    fn from(d: Difficulty) -> Self {
        match d {
            Difficulty::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Display label for a fatigue level on the 1-5 scale.
pub fn fatigue_label(level: u8) -> &'static str {
    match level {
        0 | 1 => "Fresh",
        2 => "Good",
        3 => "Moderate",
        4 => "Tired",
        _ => "Exhausted",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing)]
    pub edit_pin: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    pub status: RaceStatus,
    #[serde(default)]
    pub current_leg_index: u32,
}

impl Race {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            edit_pin: String::new(),
            start_time: None,
            status: RaceStatus::Setup,
            current_leg_index: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    pub id: Uuid,
    pub name: String,
    pub pr_distance: PrDistance,
    pub pr_time_seconds: f64,
    /// Pre-race relay pace in minutes per mile, derived once from the PR.
    pub estimated_pace: f64,
    #[serde(default)]
    pub sort_order: u32,
}

impl Runner {
    /// Creates a runner, deriving `estimated_pace` from the personal record.
    pub fn from_pr(
        name: String,
        pr_distance: PrDistance,
        pr_time_seconds: f64,
        sort_order: u32,
        model: &PaceModel,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            pr_distance,
            pr_time_seconds,
            estimated_pace: model.pr_to_relay_pace(pr_distance, pr_time_seconds),
            sort_order,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    pub id: Uuid,
    pub leg_number: u32,
    /// Miles.
    pub distance: f64,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub runner_id: Option<Uuid>,
    pub status: LegStatus,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
    /// Minutes per mile, recorded on completion.
    #[serde(default)]
    pub actual_pace: Option<f64>,
    #[serde(default)]
    pub fatigue_level: Option<u8>,
    #[serde(default)]
    pub system_suggested_fatigue: Option<u8>,
}

impl Leg {
    pub fn new(leg_number: u32, distance: f64, difficulty: Difficulty) -> Self {
        Self {
            id: Uuid::new_v4(),
            leg_number,
            distance,
            difficulty,
            runner_id: None,
            status: LegStatus::Upcoming,
            start_time: None,
            end_time: None,
            actual_pace: None,
            fatigue_level: None,
            system_suggested_fatigue: None,
        }
    }

    pub fn with_runner(mut self, runner_id: Uuid) -> Self {
        self.runner_id = Some(runner_id);
        self
    }
}

/// Everything the engine needs to know about one race at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub race: Race,
    #[serde(default)]
    pub runners: Vec<Runner>,
    #[serde(default)]
    pub legs: Vec<Leg>,
}

impl RaceSnapshot {
    pub fn from_json_str(s: &str) -> Result<Self, RelayError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, RelayError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn runner(&self, id: Uuid) -> Option<&Runner> {
        self.runners.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_wire_names() {
        let d: Difficulty = serde_json::from_str("\"extra hard\"").unwrap();
        assert_eq!(d, Difficulty::ExtraHard);
        let d: Difficulty = serde_json::from_str("\"extra-hard\"").unwrap();
        assert_eq!(d, Difficulty::ExtraHard);
        assert_eq!(
            serde_json::to_string(&Difficulty::ExtraHard).unwrap(),
            "\"extra hard\""
        );
    }

    #[test]
    fn test_unrecognized_difficulty_is_unknown() {
        let d: Difficulty = serde_json::from_str("\"vertical\"").unwrap();
        assert_eq!(d, Difficulty::Unknown("vertical".into()));
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"vertical\"");
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "race": {
                "id": "7f9c24e8-3b12-4fef-91e0-7d2a3c6b0d11",
                "name": "Hood to Coast",
                "start_time": "2025-08-22T06:00:00Z",
                "status": "active"
            },
            "runners": [{
                "id": "0b7e7a36-5d55-4a0e-b2c5-9c1f8c5a0e01",
                "name": "Sam",
                "pr_distance": "10k",
                "pr_time_seconds": 2700,
                "estimated_pace": 7.97
            }],
            "legs": [{
                "id": "5a0e3c1d-95e4-4b6e-8f3d-2c4e2d8b1a02",
                "leg_number": 1,
                "distance": 5.6,
                "difficulty": "hard",
                "runner_id": "0b7e7a36-5d55-4a0e-b2c5-9c1f8c5a0e01",
                "status": "active",
                "start_time": "2025-08-22T06:00:00Z"
            }]
        }"#;

        let snapshot = RaceSnapshot::from_json_str(json).unwrap();
        assert_eq!(snapshot.race.status, RaceStatus::Active);
        assert!(snapshot.race.start_time.is_some());
        assert_eq!(snapshot.runners[0].pr_distance, PrDistance::TenK);
        assert_eq!(snapshot.legs[0].difficulty, Difficulty::Hard);
        assert!(snapshot.legs[0].end_time.is_none());
        assert!(snapshot.legs[0].actual_pace.is_none());
    }

    #[test]
    fn test_fatigue_labels() {
        assert_eq!(fatigue_label(1), "Fresh");
        assert_eq!(fatigue_label(3), "Moderate");
        assert_eq!(fatigue_label(5), "Exhausted");
    }
}

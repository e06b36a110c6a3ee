//! Race lifecycle transitions applied to an in-memory snapshot.
//!
//! These produce the ground-truth facts the projector consumes: start and
//! end timestamps, recorded paces and the fatigue suggested at handoff.

use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    errors::RelayError,
    models::{Leg, LegStatus, RaceSnapshot, RaceStatus},
    pace_model::{MAX_FATIGUE, MIN_FATIGUE},
    pace_predictor::suggest_fatigue,
};

/// What a completed handoff recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct LegCompletion {
    pub leg_number: u32,
    /// Minutes per mile, rounded to hundredths.
    pub actual_pace: f64,
    pub system_suggested_fatigue: u8,
    pub next_leg_number: Option<u32>,
    pub race_finished: bool,
}

impl RaceSnapshot {
    /// Starts the race clock and puts the first leg on the course.
    pub fn start_race(&mut self, now: OffsetDateTime) -> Result<(), RelayError> {
        if self.race.status != RaceStatus::Setup {
            warn!(race = %self.race.id, status = ?self.race.status, "race already started");
            return Err(RelayError::RaceNotInSetup);
        }

        self.race.status = RaceStatus::Active;
        self.race.start_time = Some(now);
        self.race.current_leg_index = 0;

        if let Some(first) = self.legs.iter_mut().min_by_key(|l| l.leg_number) {
            first.status = LegStatus::Active;
            first.start_time = Some(now);
        }

        info!(race = %self.race.id, name = %self.race.name, "race started");
        Ok(())
    }

    /// Completes the active leg `leg_id` at `now` and hands off to the next leg.
    ///
    /// `fatigue_level` is what the runner reported, clamped to 1..=5. The
    /// system suggestion for the same handoff is recorded alongside it.
    pub fn complete_leg(
        &mut self,
        leg_id: Uuid,
        fatigue_level: Option<i32>,
        now: OffsetDateTime,
    ) -> Result<LegCompletion, RelayError> {
        let idx = self
            .legs
            .iter()
            .position(|l| l.id == leg_id)
            .ok_or(RelayError::LegNotFound(leg_id))?;

        let leg = &self.legs[idx];
        if leg.status != LegStatus::Active {
            warn!(leg = leg.leg_number, status = ?leg.status, "cannot complete leg");
            return Err(RelayError::LegNotActive(leg.leg_number));
        }
        let start = leg
            .start_time
            .ok_or(RelayError::MissingStartTime(leg.leg_number))?;

        let duration_minutes = (now - start).as_seconds_f64() / 60.0;
        let actual_pace = (duration_minutes / leg.distance * 100.0).round() / 100.0;

        let prior_completed = match leg.runner_id {
            Some(runner_id) => self
                .legs
                .iter()
                .filter(|l| l.runner_id == Some(runner_id) && l.status == LegStatus::Completed)
                .count(),
            None => 0,
        };
        let suggested = suggest_fatigue(prior_completed, Some(now));

        let leg_number = leg.leg_number;
        let leg = &mut self.legs[idx];
        leg.status = LegStatus::Completed;
        leg.end_time = Some(now);
        leg.actual_pace = Some(actual_pace);
        leg.fatigue_level = fatigue_level.map(|f| f.clamp(MIN_FATIGUE, MAX_FATIGUE) as u8);
        leg.system_suggested_fatigue = Some(suggested);

        let next = self
            .legs
            .iter_mut()
            .find(|l| l.leg_number == leg_number + 1);
        let next_leg_number = match next {
            Some(next) => {
                next.status = LegStatus::Active;
                next.start_time = Some(now);
                self.race.current_leg_index = leg_number;
                Some(next.leg_number)
            }
            None => {
                self.race.status = RaceStatus::Finished;
                None
            }
        };

        info!(
            leg = leg_number,
            actual_pace,
            suggested_fatigue = suggested,
            next = ?next_leg_number,
            "leg completed"
        );

        Ok(LegCompletion {
            leg_number,
            actual_pace,
            system_suggested_fatigue: suggested,
            next_leg_number,
            race_finished: next_leg_number.is_none(),
        })
    }

    /// The leg currently on the course, if any.
    pub fn active_leg(&self) -> Option<&Leg> {
        self.legs.iter().find(|l| l.status == LegStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, PrDistance, Race, Runner};
    use crate::pace_model::PaceModel;
    use time::macros::datetime;

    fn make_snapshot() -> RaceSnapshot {
        let model = PaceModel::default();
        let runner = Runner::from_pr("Drew".into(), PrDistance::Half, 5700.0, 0, &model);
        let legs = vec![
            Leg::new(1, 5.0, Difficulty::Medium).with_runner(runner.id),
            Leg::new(2, 4.0, Difficulty::Hard).with_runner(runner.id),
        ];
        RaceSnapshot {
            race: Race::new("Cascade Relay".into()),
            runners: vec![runner],
            legs,
        }
    }

    #[test]
    fn test_start_race() {
        let mut snapshot = make_snapshot();
        let now = datetime!(2025-08-22 06:00 UTC);
        snapshot.start_race(now).unwrap();

        assert_eq!(snapshot.race.status, RaceStatus::Active);
        assert_eq!(snapshot.race.start_time, Some(now));
        assert_eq!(snapshot.legs[0].status, LegStatus::Active);
        assert_eq!(snapshot.legs[0].start_time, Some(now));
        assert_eq!(snapshot.legs[1].status, LegStatus::Upcoming);
    }

    #[test]
    fn test_start_race_twice_rejected() {
        let mut snapshot = make_snapshot();
        snapshot.start_race(datetime!(2025-08-22 06:00 UTC)).unwrap();
        assert!(matches!(
            snapshot.start_race(datetime!(2025-08-22 06:05 UTC)),
            Err(RelayError::RaceNotInSetup)
        ));
    }

    #[test]
    fn test_complete_legs_through_finish() {
        let mut snapshot = make_snapshot();
        snapshot.start_race(datetime!(2025-08-22 06:00 UTC)).unwrap();
        let first_id = snapshot.legs[0].id;
        let second_id = snapshot.legs[1].id;

        let done = snapshot
            .complete_leg(first_id, Some(2), datetime!(2025-08-22 06:41 UTC))
            .unwrap();
        assert_eq!(done.actual_pace, 8.2);
        assert_eq!(done.system_suggested_fatigue, 1);
        assert_eq!(done.next_leg_number, Some(2));
        assert!(!done.race_finished);
        assert_eq!(snapshot.legs[0].fatigue_level, Some(2));
        assert_eq!(snapshot.legs[1].status, LegStatus::Active);
        assert_eq!(snapshot.legs[1].start_time, Some(datetime!(2025-08-22 06:41 UTC)));
        assert_eq!(snapshot.race.current_leg_index, 1);

        // Second leg for the same runner, finishing after 22:00.
        let done = snapshot
            .complete_leg(second_id, None, datetime!(2025-08-22 22:41 UTC))
            .unwrap();
        assert_eq!(done.system_suggested_fatigue, 4);
        assert!(done.race_finished);
        assert_eq!(snapshot.legs[1].fatigue_level, None);
        assert_eq!(snapshot.race.status, RaceStatus::Finished);
        assert!(snapshot.active_leg().is_none());
    }

    #[test]
    fn test_actual_pace_rounded_to_hundredths() {
        let mut snapshot = make_snapshot();
        snapshot.start_race(datetime!(2025-08-22 06:00 UTC)).unwrap();
        let id = snapshot.legs[0].id;

        // 41:07 over 5 miles = 8.2233.. min/mile
        let done = snapshot
            .complete_leg(id, Some(9), datetime!(2025-08-22 06:41:07 UTC))
            .unwrap();
        assert_eq!(done.actual_pace, 8.22);
        assert_eq!(snapshot.legs[0].fatigue_level, Some(5));
    }

    #[test]
    fn test_complete_upcoming_leg_rejected() {
        let mut snapshot = make_snapshot();
        snapshot.start_race(datetime!(2025-08-22 06:00 UTC)).unwrap();
        let id = snapshot.legs[1].id;
        assert!(matches!(
            snapshot.complete_leg(id, None, datetime!(2025-08-22 06:30 UTC)),
            Err(RelayError::LegNotActive(2))
        ));
    }

    #[test]
    fn test_complete_unknown_leg() {
        let mut snapshot = make_snapshot();
        let id = Uuid::new_v4();
        assert!(matches!(
            snapshot.complete_leg(id, None, datetime!(2025-08-22 06:30 UTC)),
            Err(RelayError::LegNotFound(missing)) if missing == id
        ));
    }
}

//! Pure state layer for a live workout session: set completion, progress
//! counts and the rest countdown. No DOM or timer calls here; the workout
//! page owns the `gloo_timers` intervals and drives this state through
//! `toggle_set` / `tick_rest`.

use crate::types::{SetEntry, WorkoutSummary};

/// Fixed increment applied by the "+30 s" button on the rest panel.
pub const REST_EXTEND_SECS: u32 = 30;

#[derive(Clone, Debug, PartialEq)]
pub struct SessionSet {
    pub entry: SetEntry,
    pub completed: bool,
}

/// Active rest countdown between consecutive sets of the same exercise.
#[derive(Clone, Debug, PartialEq)]
pub struct RestTimer {
    pub remaining: u32,
    /// Label of the set coming up after the rest, when there is one.
    pub next_up: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RestTick {
    Running,
    Finished,
    Idle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub routine_id: i64,
    pub sets: Vec<SessionSet>,
    pub rest: Option<RestTimer>,
}

impl SessionState {
    pub fn new(routine_id: i64, sets: Vec<SetEntry>) -> Self {
        Self {
            routine_id,
            sets: sets
                .into_iter()
                .map(|entry| SessionSet { entry, completed: false })
                .collect(),
            rest: None,
        }
    }

    pub fn get(&self, set_id: i64) -> Option<&SessionSet> {
        self.sets.iter().find(|s| s.entry.id == set_id)
    }

    /// Toggle a set's completed flag. Checking a set that is not the last of
    /// its exercise starts a rest countdown seeded from the set's configured
    /// rest duration. Returns true when a countdown was started.
    pub fn toggle_set(&mut self, set_id: i64) -> bool {
        let Some(idx) = self.sets.iter().position(|s| s.entry.id == set_id) else {
            return false;
        };

        let now_completed = !self.sets[idx].completed;
        self.sets[idx].completed = now_completed;
        if !now_completed {
            return false;
        }

        // Position within the exercise decides whether rest starts; sequence
        // numbers carry no gap guarantee, so go by group order.
        let exercise_id = self.sets[idx].entry.exercise_id;
        let group: Vec<usize> = self
            .sets
            .iter()
            .enumerate()
            .filter(|(_, s)| s.entry.exercise_id == exercise_id)
            .map(|(i, _)| i)
            .collect();
        let pos = group.iter().position(|&i| i == idx).unwrap_or(0);

        match group.get(pos + 1) {
            Some(&next_idx) => {
                let next = &self.sets[next_idx].entry;
                self.rest = Some(RestTimer {
                    remaining: self.sets[idx].entry.rest_or_default(),
                    next_up: Some(format!("{} - Serie {}", next.exercise_name, next.set_number)),
                });
                true
            }
            // Last set of its exercise: no rest.
            None => false,
        }
    }

    /// One second of rest elapsed. At zero the countdown clears itself and
    /// the caller plays the audible cue.
    pub fn tick_rest(&mut self) -> RestTick {
        match &mut self.rest {
            Some(rest) if rest.remaining > 1 => {
                rest.remaining -= 1;
                RestTick::Running
            }
            Some(_) => {
                self.rest = None;
                RestTick::Finished
            }
            None => RestTick::Idle,
        }
    }

    /// Hide the countdown immediately, whatever is left on it.
    pub fn skip_rest(&mut self) {
        self.rest = None;
    }

    pub fn extend_rest(&mut self, secs: u32) {
        if let Some(rest) = &mut self.rest {
            rest.remaining += secs;
        }
    }

    /// In-session edit of a set's reps/weight. Local only, the original
    /// runner never writes these back to the server.
    pub fn update_set_values(&mut self, set_id: i64, reps: u32, weight: Option<f64>) {
        if let Some(set) = self.sets.iter_mut().find(|s| s.entry.id == set_id) {
            set.entry.reps = reps;
            set.entry.weight = weight;
        }
    }

    pub fn progress(&self) -> (usize, usize) {
        let completed = self.sets.iter().filter(|s| s.completed).count();
        (completed, self.sets.len())
    }

    /// An exercise is complete when every one of its sets is checked.
    pub fn exercise_complete(&self, exercise_id: i64) -> bool {
        let mut any = false;
        for set in self.sets.iter().filter(|s| s.entry.exercise_id == exercise_id) {
            if !set.completed {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn finish(&mut self, finished_at: String, duration_secs: i64) -> WorkoutSummary {
        self.rest = None;
        let (completed_sets, total_sets) = self.progress();
        WorkoutSummary {
            routine_id: self.routine_id,
            finished_at,
            duration_secs,
            completed_sets,
            total_sets,
        }
    }
}

/// Where finished summaries (and, eventually, per-set history) go. The
/// backend contract for these endpoints does not exist yet, so the default
/// sink only logs; swap in a real implementation once the API grows one.
pub trait SummarySink {
    fn record(&self, summary: &WorkoutSummary);
}

pub struct ConsoleSink;

impl SummarySink for ConsoleSink {
    fn record(&self, summary: &WorkoutSummary) {
        if let Ok(json) = serde_json::to_string(summary) {
            web_sys::console::log_1(&format!("Workout finalizado: {}", json).into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_REST_SECS;

    fn entry(id: i64, exercise_id: i64, number: u32, rest: Option<u32>) -> SetEntry {
        SetEntry {
            id,
            exercise_id,
            exercise_name: format!("Ejercicio {}", exercise_id),
            muscle_group: None,
            set_number: number,
            reps: 10,
            weight: None,
            rest_secs: rest,
        }
    }

    /// Exercise A with two sets, exercise B with one.
    fn two_exercise_session() -> SessionState {
        SessionState::new(
            1,
            vec![
                entry(1, 10, 1, Some(60)),
                entry(2, 10, 2, Some(60)),
                entry(3, 20, 1, None),
            ],
        )
    }

    #[test]
    fn checking_mid_exercise_set_starts_rest_with_its_duration() {
        let mut s = SessionState::new(1, vec![entry(1, 10, 1, Some(90)), entry(2, 10, 2, None)]);
        assert!(s.toggle_set(1));
        let rest = s.rest.as_ref().expect("rest running");
        assert_eq!(rest.remaining, 90);
        assert_eq!(rest.next_up.as_deref(), Some("Ejercicio 10 - Serie 2"));
    }

    #[test]
    fn last_set_of_exercise_starts_no_rest() {
        let mut s = two_exercise_session();
        assert!(!s.toggle_set(2));
        assert!(s.rest.is_none());
        assert!(!s.toggle_set(3));
        assert!(s.rest.is_none());
    }

    #[test]
    fn rest_defaults_to_sixty_and_expires_after_sixty_ticks() {
        let mut s = SessionState::new(1, vec![entry(1, 10, 1, None), entry(2, 10, 2, None)]);
        assert!(s.toggle_set(1));
        assert_eq!(s.rest.as_ref().map(|r| r.remaining), Some(DEFAULT_REST_SECS));

        for _ in 0..59 {
            assert_eq!(s.tick_rest(), RestTick::Running);
        }
        assert_eq!(s.tick_rest(), RestTick::Finished);
        assert!(s.rest.is_none());
        assert_eq!(s.tick_rest(), RestTick::Idle);
    }

    #[test]
    fn skip_clears_rest_regardless_of_remaining() {
        let mut s = two_exercise_session();
        s.toggle_set(1);
        assert!(s.rest.is_some());
        s.skip_rest();
        assert!(s.rest.is_none());
        assert_eq!(s.tick_rest(), RestTick::Idle);
    }

    #[test]
    fn extend_adds_fixed_increment() {
        let mut s = two_exercise_session();
        s.toggle_set(1);
        s.extend_rest(REST_EXTEND_SECS);
        assert_eq!(s.rest.as_ref().map(|r| r.remaining), Some(60 + REST_EXTEND_SECS));

        // No countdown, nothing to extend.
        s.skip_rest();
        s.extend_rest(REST_EXTEND_SECS);
        assert!(s.rest.is_none());
    }

    #[test]
    fn exercise_complete_tracks_all_sets_and_reverses() {
        let mut s = two_exercise_session();
        s.toggle_set(1);
        assert!(!s.exercise_complete(10));
        s.toggle_set(2);
        assert!(s.exercise_complete(10));

        // Unchecking any one clears the mark.
        s.toggle_set(1);
        assert!(!s.exercise_complete(10));
        assert_eq!(s.progress(), (1, 3));
    }

    #[test]
    fn completing_all_sets_yields_full_progress() {
        let mut s = two_exercise_session();
        s.toggle_set(1);
        s.toggle_set(2);
        s.toggle_set(3);
        assert_eq!(s.progress(), (3, 3));

        let summary = s.finish("2026-08-25T10:00:00Z".to_string(), 1800);
        assert_eq!(summary.completed_sets, 3);
        assert_eq!(summary.total_sets, 3);
        assert_eq!(summary.duration_secs, 1800);
        assert_eq!(summary.routine_id, 1);
        assert!(s.rest.is_none());
    }

    #[test]
    fn in_session_edits_touch_only_the_target_set() {
        let mut s = two_exercise_session();
        s.update_set_values(2, 12, Some(40.0));
        assert_eq!(s.get(2).map(|x| x.entry.reps), Some(12));
        assert_eq!(s.get(2).and_then(|x| x.entry.weight), Some(40.0));
        assert_eq!(s.get(1).map(|x| x.entry.reps), Some(10));
    }
}

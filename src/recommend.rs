//! Recommendation and recovery-progress heuristics.
//!
//! Pure functions over historical progress records owned by the storage
//! collaborator. Nothing here holds state; the random jitter used for
//! recommendation variety comes from an injected source so callers (and
//! tests) control determinism.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analyzer::ExerciseType;

/// Jitter added to recommendation scores for variety
const SCORE_JITTER: f32 = 0.3;

/// Weight of a matching target area in the recommendation score
const AREA_MATCH_WEIGHT: f32 = 2.0;

/// Safety buffer applied to recovery estimates
const RECOVERY_TIME_BUFFER: f32 = 1.25;

/// Estimate multiplier for patients reporting pain above 5/10
const PAIN_PENALTY: f32 = 1.3;

/// Pain level above which the penalty applies
const PAIN_PENALTY_THRESHOLD: u8 = 5;

/// One persisted weekly progress record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Week number within the treatment, ascending
    pub week: u32,
    /// Measured range of motion in degrees
    pub range_of_motion: f32,
    /// Posture quality score in [0, 100]
    pub posture_quality: f32,
    /// Self-reported pain on a 0-10 scale
    pub pain_level: u8,
}

/// Catalog entry for a prescribable exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseInfo {
    /// Display name
    pub name: String,
    /// Tracked exercise type
    pub exercise_type: ExerciseType,
    /// Body area the exercise targets, e.g. "shoulder"
    pub target_area: String,
    /// Difficulty band, 1 (easiest) to 5
    pub difficulty: u8,
}

/// What the patient needs and can handle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Body area under treatment
    pub target_area: String,
    /// Difficulty band the therapist considers appropriate, 1 to 5
    pub preferred_difficulty: u8,
}

/// A scored recommendation
#[derive(Debug, Clone)]
pub struct RankedExercise {
    /// The recommended exercise
    pub exercise: ExerciseInfo,
    /// Composite score; higher ranks earlier
    pub score: f32,
}

/// Score and rank catalog exercises for a patient, best first.
///
/// The score is a weighted sum of target-area match and closeness to the
/// preferred difficulty band, plus a small random jitter so equally-suited
/// exercises rotate between sessions.
pub fn recommend_exercises<R: Rng>(
    catalog: &[ExerciseInfo],
    profile: &PatientProfile,
    rng: &mut R,
    top_n: usize,
) -> Vec<RankedExercise> {
    let mut ranked: Vec<RankedExercise> = catalog
        .iter()
        .map(|exercise| {
            let area_match = if exercise.target_area.eq_ignore_ascii_case(&profile.target_area) {
                AREA_MATCH_WEIGHT
            } else {
                0.0
            };
            let difficulty_gap = (f32::from(exercise.difficulty) - f32::from(profile.preferred_difficulty)).abs();
            let difficulty_score = 1.0 - difficulty_gap / 4.0;
            let jitter = rng.gen_range(0.0..SCORE_JITTER);

            RankedExercise {
                exercise: exercise.clone(),
                score: area_match + difficulty_score + jitter,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top_n);
    ranked
}

/// Estimate weeks until the target range of motion is reached.
///
/// Linear extrapolation of the most recent week-over-week improvement, with
/// a safety buffer, scaled up for patients in significant pain. Records must
/// be ordered by week ascending.
///
/// Returns `None` when fewer than two records exist or the recent trend is
/// flat or regressing, since extrapolating those would promise a recovery
/// the data does not support. Returns `Some(0.0)` when the target is
/// already met.
#[must_use]
pub fn estimate_recovery_weeks(records: &[ProgressRecord], target_rom: f32, pain_level: u8) -> Option<f32> {
    let n = records.len();
    if n < 2 {
        return None;
    }

    let last = &records[n - 1];
    let prev = &records[n - 2];
    if last.range_of_motion >= target_rom {
        return Some(0.0);
    }

    let weeks_between = last.week.saturating_sub(prev.week).max(1) as f32;
    let rate = (last.range_of_motion - prev.range_of_motion) / weeks_between;
    if rate <= 0.0 {
        return None;
    }

    let mut weeks = (target_rom - last.range_of_motion) / rate * RECOVERY_TIME_BUFFER;
    if pain_level > PAIN_PENALTY_THRESHOLD {
        weeks *= PAIN_PENALTY;
    }
    Some(weeks)
}

/// Confidence in the recovery trend, clamped to [0.5, 0.95].
///
/// More samples and consistent week-over-week improvement push the score
/// up; regressions pull it down toward the floor.
#[must_use]
pub fn progress_confidence(records: &[ProgressRecord]) -> f32 {
    if records.len() < 2 {
        return 0.5;
    }

    let transitions = (records.len() - 1) as f32;
    let improvements = records
        .windows(2)
        .filter(|pair| pair[1].range_of_motion > pair[0].range_of_motion)
        .count() as f32;
    let improvement_ratio = improvements / transitions;

    let sample_bonus = 0.05 * (records.len() as f32 - 2.0).min(6.0);
    let trend = 0.3 * improvement_ratio - 0.15 * (1.0 - improvement_ratio);

    (0.5 + sample_bonus + trend).clamp(0.5, 0.95)
}

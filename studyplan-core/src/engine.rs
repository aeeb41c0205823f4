//! Scheduling engine: one pure pass from inputs to a [`ScheduleResult`].
//!
//! validate -> analyze -> order -> generate slots -> place -> score
//!
//! Each call owns all of its working state; the scheduler itself only holds
//! the clock and the timezone, so repeated calls with the same inputs (and the
//! same clock reading) produce identical results.

use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::analyzer::analyze_tasks;
use crate::availability::AvailabilityGenerator;
use crate::confidence::optimization_score;
use crate::error::{Result, ScheduleError};
use crate::interval::BusyInterval;
use crate::ordering::order_tasks;
use crate::placement::PlacementEngine;
use crate::preferences::Preferences;
use crate::session::ScheduleResult;
use crate::task::Task;
use crate::time::Clock;

#[derive(Debug, Clone)]
pub struct StudyScheduler<C: Clock> {
    clock: C,
    tz: Tz,
}

impl<C: Clock> StudyScheduler<C> {
    pub fn new(clock: C, tz: Tz) -> Self {
        Self { clock, tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Build a schedule for `tasks` around `busy`.
    ///
    /// Returns `Err` only for malformed input (empty task id, bad effort,
    /// inverted busy interval). Invalid preferences, an empty task list and a
    /// lack of free time all come back as `Ok` with zero sessions and
    /// diagnostics. Completed or deselected tasks are ignored.
    pub fn generate(
        &self,
        tasks: &[Task],
        busy: &[BusyInterval],
        prefs: &Preferences,
    ) -> Result<ScheduleResult> {
        for task in tasks {
            task.validate()?;
        }
        for interval in busy {
            interval.validate()?;
        }

        let eligible: Vec<Task> = tasks.iter().filter(|t| t.is_eligible()).cloned().collect();
        debug!(
            total = tasks.len(),
            eligible = eligible.len(),
            "filtered tasks"
        );
        if eligible.is_empty() {
            warn!("no eligible tasks to schedule");
            return Ok(ScheduleResult::rejected(&ScheduleError::NoTasks));
        }

        if let Err(err) = prefs.validate() {
            warn!(error = %err, "rejecting preferences");
            return Ok(ScheduleResult::rejected(&err));
        }

        let now = self.clock.now();
        let analyzed = analyze_tasks(&eligible, now);
        let ordered = order_tasks(analyzed, prefs.algorithm);

        let slots = AvailabilityGenerator::new(prefs, busy, self.tz).generate(now);
        if slots.is_empty() {
            warn!(busy = busy.len(), "no candidate slots");
            return Ok(ScheduleResult::rejected(&ScheduleError::NoAvailability));
        }

        let placement = PlacementEngine::new(prefs, busy, self.tz).place(&ordered, &slots, now);
        let result = ScheduleResult {
            optimization_score: optimization_score(&placement.sessions),
            sessions: placement.sessions,
            diagnostics: placement.diagnostics,
        };

        info!(
            algorithm = %prefs.algorithm,
            tasks = eligible.len(),
            slots = slots.len(),
            sessions = result.sessions.len(),
            fallbacks = result.fallback_count(),
            score = result.optimization_score,
            "schedule generated"
        );

        Ok(result)
    }
}

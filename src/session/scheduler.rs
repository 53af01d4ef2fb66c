use std::time::{Duration, Instant};

use crate::models::PrayerName;
use crate::session::state::Session;

pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);
pub const STATUS_PERIOD: Duration = Duration::from_secs(60);
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Clock,
    Status,
    Countdown,
}

/// Returned by [`Scheduler::schedule`]; pass it to [`Scheduler::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Task {
    handle: TaskHandle,
    kind: TaskKind,
    period: Duration,
    next_due: Instant,
}

/// Repeating tasks driven by an external clock. Nothing runs on its own:
/// the owner polls [`Scheduler::due`] from its event loop, and dropping the
/// scheduler drops every task with it.
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<Task>,
    next_handle: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// First run is one `period` after `now`.
    pub fn schedule(&mut self, kind: TaskKind, period: Duration, now: Instant) -> TaskHandle {
        self.next_handle += 1;
        let handle = TaskHandle(self.next_handle);
        self.tasks.push(Task {
            handle,
            kind,
            period,
            next_due: now + period,
        });
        handle
    }

    /// Returns false if the handle was already cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.handle != handle);
        self.tasks.len() != before
    }

    #[cfg(test)]
    pub fn is_active(&self, handle: TaskHandle) -> bool {
        self.tasks.iter().any(|t| t.handle == handle)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Kinds whose deadline has passed, each reported once per poll even if
    /// several periods were missed. Deadlines move forward past `now`.
    pub fn due(&mut self, now: Instant) -> Vec<TaskKind> {
        let mut fired = Vec::new();
        for task in &mut self.tasks {
            if task.next_due <= now {
                fired.push(task.kind);
                while task.next_due <= now {
                    task.next_due += task.period;
                }
            }
        }
        fired
    }

    /// Time until the earliest deadline, if any task is scheduled.
    #[cfg(test)]
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.tasks
            .iter()
            .map(|t| t.next_due.saturating_duration_since(now))
            .min()
    }
}

/// The three view timers and what each is tied to.
///
/// - clock: always on, every second
/// - status: every minute, recreated whenever the snapshot changes
/// - countdown: every second while a next prayer is known, recreated whenever
///   that next prayer changes
#[derive(Debug)]
pub struct Timers {
    scheduler: Scheduler,
    status: Option<(TaskHandle, u64)>,
    countdown: Option<(TaskHandle, PrayerName)>,
}

impl Timers {
    pub fn new(now: Instant) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(TaskKind::Clock, CLOCK_PERIOD, now);
        Self {
            scheduler,
            status: None,
            countdown: None,
        }
    }

    /// Bring the task set in line with the session.
    pub fn sync(&mut self, session: &Session, now: Instant) {
        let generation = session.generation();
        let has_times = session.snapshot.is_some();
        match self.status {
            Some((_, g)) if g == generation && has_times => {}
            _ => {
                if let Some((handle, _)) = self.status.take() {
                    self.scheduler.cancel(handle);
                }
                if has_times {
                    let handle = self.scheduler.schedule(TaskKind::Status, STATUS_PERIOD, now);
                    self.status = Some((handle, generation));
                }
            }
        }

        let next = session.status.map(|s| s.next);
        let tracked = self.countdown.map(|(_, name)| name);
        if next != tracked {
            if let Some((handle, _)) = self.countdown.take() {
                self.scheduler.cancel(handle);
            }
            if let Some(name) = next {
                let handle = self
                    .scheduler
                    .schedule(TaskKind::Countdown, COUNTDOWN_PERIOD, now);
                self.countdown = Some((handle, name));
            }
        }
    }

    pub fn due(&mut self, now: Instant) -> Vec<TaskKind> {
        self.scheduler.due(now)
    }

    #[cfg(test)]
    pub fn status_active(&self) -> bool {
        self.status.is_some()
    }

    #[cfg(test)]
    pub fn countdown_target(&self) -> Option<PrayerName> {
        self.countdown.map(|(_, name)| name)
    }

    #[cfg(test)]
    pub fn task_count(&self) -> usize {
        self.scheduler.len()
    }
}

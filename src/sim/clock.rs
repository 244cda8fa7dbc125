//! Millisecond clock and fixed-delay timers
//!
//! Timers never run code themselves. Each one carries a [`TimerTask`] value
//! describing what should happen, and [`Clock::advance`] hands the due tasks
//! back to the driver, which executes them between ticks.

/// Opaque handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u32);

/// Work a timer requests when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Spawn one enemy on a world edge
    SpawnEnemy,
    /// Fire one projectile at the nearest enemy
    AutoFire,
}

/// Timer scheduling contract consumed by the simulation
pub trait Scheduler {
    /// Current clock time in milliseconds
    fn now(&self) -> f64;
    /// Schedule `task` after `delay_ms`, repeating every `delay_ms` if `repeat`
    fn schedule(&mut self, delay_ms: f64, repeat: bool, task: TimerTask) -> TimerHandle;
    /// Remove a timer permanently. Unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
    /// Freeze a timer's countdown
    fn pause(&mut self, handle: TimerHandle);
    /// Continue a paused countdown from where it stopped
    fn resume(&mut self, handle: TimerHandle);
}

/// Smallest allowed delay; a zero-delay repeating timer would never yield
pub const MIN_TIMER_DELAY_MS: f64 = 1.0;

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    task: TimerTask,
    delay_ms: f64,
    remaining_ms: f64,
    repeat: bool,
    paused: bool,
}

/// Reference scheduler driven by explicit time steps
#[derive(Debug, Clone, Default)]
pub struct Clock {
    now_ms: f64,
    timers: Vec<Timer>,
    next_handle: u32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance time and collect every task that came due, in firing order
    pub fn advance(&mut self, dt_ms: f64) -> Vec<(TimerHandle, TimerTask)> {
        let start = self.now_ms;
        self.now_ms += dt_ms.max(0.0);

        // (fire time, schedule order, handle, task)
        let mut due: Vec<(f64, usize, TimerHandle, TimerTask)> = Vec::new();
        for (order, timer) in self.timers.iter_mut().enumerate() {
            if timer.paused {
                continue;
            }
            let mut elapsed = dt_ms.max(0.0);
            while elapsed >= timer.remaining_ms {
                elapsed -= timer.remaining_ms;
                let fire_at = self.now_ms - elapsed;
                due.push((fire_at.max(start), order, timer.handle, timer.task));
                if !timer.repeat {
                    timer.remaining_ms = f64::INFINITY;
                    break;
                }
                timer.remaining_ms = timer.delay_ms;
            }
            if timer.remaining_ms.is_finite() {
                timer.remaining_ms -= elapsed;
            }
        }
        self.timers.retain(|t| t.remaining_ms.is_finite());

        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, h, task)| (h, task)).collect()
    }

    /// Whether the handle refers to a live (possibly paused) timer
    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    pub fn is_paused(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle && t.paused)
    }

    /// Milliseconds until the timer next fires
    pub fn remaining(&self, handle: TimerHandle) -> Option<f64> {
        self.timers
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.remaining_ms)
    }

    /// Number of live timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    fn find_mut(&mut self, handle: TimerHandle) -> Option<&mut Timer> {
        self.timers.iter_mut().find(|t| t.handle == handle)
    }
}

impl Scheduler for Clock {
    fn now(&self) -> f64 {
        self.now_ms
    }

    fn schedule(&mut self, delay_ms: f64, repeat: bool, task: TimerTask) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let delay_ms = delay_ms.max(MIN_TIMER_DELAY_MS);
        self.timers.push(Timer {
            handle,
            task,
            delay_ms,
            remaining_ms: delay_ms,
            repeat,
            paused: false,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }

    fn pause(&mut self, handle: TimerHandle) {
        if let Some(timer) = self.find_mut(handle) {
            timer.paused = true;
        }
    }

    fn resume(&mut self, handle: TimerHandle) {
        if let Some(timer) = self.find_mut(handle) {
            timer.paused = false;
        }
    }
}

//! Frame budget monitoring for the realtime runner
//!
//! Tracks how much of each fixed step's wall-clock budget the simulation
//! uses, so the runner can tell when it is falling behind the tick rate.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Performance status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceStatus {
    /// Comfortably inside the frame budget
    Healthy,
    /// Using most of the budget; a slow host may start dropping frames
    Strained,
    /// Ticks take longer than the budget, the simulation runs slower than real time
    Overrun,
}

impl PerformanceStatus {
    pub fn keeps_up(&self) -> bool {
        !matches!(self, PerformanceStatus::Overrun)
    }
}

/// Rolling window of tick durations measured against the frame budget
pub struct PerformanceMonitor {
    tick_durations: VecDeque<Duration>,
    max_samples: usize,
    /// Wall-clock time one fixed step may take
    target_tick_duration: Duration,
    /// Fraction of budget above which status is Strained
    strained_threshold: f32,
    /// Fraction of budget above which status is Overrun
    overrun_threshold: f32,
    status: PerformanceStatus,
    tick_start: Option<Instant>,
    ticks_measured: u64,
}

impl PerformanceMonitor {
    pub fn new(tick_rate: u32) -> Self {
        let target_tick_duration = Duration::from_secs_f32(1.0 / tick_rate.max(1) as f32);

        Self {
            tick_durations: VecDeque::with_capacity(120), // ~2 seconds at 60Hz
            max_samples: 120,
            target_tick_duration,
            strained_threshold: 0.7,
            overrun_threshold: 1.0,
            status: PerformanceStatus::Healthy,
            tick_start: None,
            ticks_measured: 0,
        }
    }

    /// Start timing a tick
    pub fn tick_start(&mut self) {
        self.tick_start = Some(Instant::now());
    }

    /// End timing a tick and record the duration
    pub fn tick_end(&mut self) {
        if let Some(start) = self.tick_start.take() {
            self.record_tick(start.elapsed());
        }
    }

    fn record_tick(&mut self, duration: Duration) {
        self.tick_durations.push_back(duration);
        while self.tick_durations.len() > self.max_samples {
            self.tick_durations.pop_front();
        }
        self.ticks_measured += 1;
        self.update_status();
    }

    fn update_status(&mut self) {
        if self.tick_durations.len() < 10 {
            // Not enough data yet
            return;
        }

        let ratio = self.budget_usage_percent() / 100.0;

        self.status = if ratio < self.strained_threshold {
            PerformanceStatus::Healthy
        } else if ratio < self.overrun_threshold {
            PerformanceStatus::Strained
        } else {
            PerformanceStatus::Overrun
        };
    }

    pub fn average_tick_duration(&self) -> Duration {
        if self.tick_durations.is_empty() {
            return Duration::ZERO;
        }
        let sum: Duration = self.tick_durations.iter().sum();
        sum / self.tick_durations.len() as u32
    }

    /// 95th percentile tick duration over the window
    pub fn p95_tick_duration(&self) -> Duration {
        let mut sorted: Vec<_> = self.tick_durations.iter().copied().collect();
        sorted.sort();
        let idx = (sorted.len() as f32 * 0.95) as usize;
        sorted
            .get(idx.min(sorted.len().saturating_sub(1)))
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    pub fn status(&self) -> PerformanceStatus {
        self.status
    }

    pub fn target_tick_duration(&self) -> Duration {
        self.target_tick_duration
    }

    pub fn ticks_measured(&self) -> u64 {
        self.ticks_measured
    }

    /// Budget usage as percentage (0-100+)
    pub fn budget_usage_percent(&self) -> f32 {
        let avg = self.average_tick_duration();
        (avg.as_secs_f32() / self.target_tick_duration.as_secs_f32()) * 100.0
    }

    /// Human-readable status line
    pub fn status_message(&self) -> String {
        format!(
            "{:?} - {:.1}% budget, p95 {:?}",
            self.status,
            self.budget_usage_percent(),
            self.p95_tick_duration()
        )
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(60)
    }
}

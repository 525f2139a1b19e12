use serde::Serialize;

use crate::profile::WorkerProfile;

pub const HOURS_PER_DAY: u32 = 8;

/// Cost estimate shown before confirming a hire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HireQuote {
    pub worker_id: String,
    pub worker_name: String,
    pub hourly_rate: f64,
    pub days: u32,
}

impl HireQuote {
    /// Starts at one day.
    pub fn new(worker: &WorkerProfile) -> Self {
        Self {
            worker_id: worker.id.clone(),
            worker_name: worker.name.clone(),
            hourly_rate: worker.hourly_rate,
            days: 1,
        }
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days.max(1);
        self
    }

    pub fn add_day(&mut self) {
        self.days = self.days.saturating_add(1);
    }

    /// Never goes below one day.
    pub fn remove_day(&mut self) {
        self.days = self.days.saturating_sub(1).max(1);
    }

    /// Rate × 8 hours × days.
    pub fn total_cost(&self) -> f64 {
        self.hourly_rate * f64::from(HOURS_PER_DAY) * f64::from(self.days)
    }

    pub fn days_label(&self) -> String {
        let plural = if self.days > 1 { "s" } else { "" };
        format!("{} Day{plural}", self.days)
    }

    pub fn breakdown(&self) -> String {
        format!(
            "({} × {HOURS_PER_DAY} hours × {} days)",
            self.hourly_rate, self.days
        )
    }

    pub fn confirmation_message(&self) -> String {
        format!(
            "Hiring {} for {} days at {}",
            self.worker_name,
            self.days,
            self.total_cost()
        )
    }
}

use chrono::{DateTime, Local, TimeDelta};
use serde::Serialize;

/// Wall-clock bounds of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunTiming {
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl RunTiming {
    pub fn start() -> RunStart {
        RunStart {
            started_at: Local::now(),
        }
    }

    pub fn duration(&self) -> TimeDelta {
        self.finished_at - self.started_at
    }

    /// `H:MM:SS.mmm`
    pub fn duration_display(&self) -> String {
        let millis = self.duration().num_milliseconds().max(0);
        let seconds = millis / 1000;
        format!(
            "{}:{:02}:{:02}.{:03}",
            seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60,
            millis % 1000
        )
    }
}

/// A run that has started but not finished.
#[derive(Debug, Clone, Copy)]
pub struct RunStart {
    pub started_at: DateTime<Local>,
}

impl RunStart {
    pub fn finish(self) -> RunTiming {
        RunTiming {
            started_at: self.started_at,
            finished_at: Local::now(),
        }
    }
}

// file: src/utils/telemetry.rs
// description: component probes and query timing for the assistant
// reference: internal observability helpers

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::info;

/// Condition of one probed component, ordered from best to worst so the
/// report condition is just the maximum across probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Condition {
    Ok,
    Impaired,
    Down,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Ok => "ok",
            Condition::Impaired => "impaired",
            Condition::Down => "down",
        }
    }
}

/// Outcome of probing one external collaborator, such as the vector index
/// or the embedding endpoint.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub target: String,
    pub condition: Condition,
    pub detail: Option<String>,
    pub elapsed_ms: u128,
}

impl ProbeResult {
    pub fn ok(target: &str, elapsed: Duration) -> Self {
        Self {
            target: target.to_string(),
            condition: Condition::Ok,
            detail: None,
            elapsed_ms: elapsed.as_millis(),
        }
    }

    pub fn impaired(target: &str, detail: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            target: target.to_string(),
            condition: Condition::Impaired,
            detail: Some(detail.into()),
            elapsed_ms: elapsed.as_millis(),
        }
    }

    pub fn down(target: &str, detail: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            target: target.to_string(),
            condition: Condition::Down,
            detail: Some(detail.into()),
            elapsed_ms: elapsed.as_millis(),
        }
    }
}

/// Probe results for every component the assistant depends on. The report
/// condition is the worst condition observed.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub condition: Condition,
    pub probes: Vec<ProbeResult>,
    pub generated_at: DateTime<Utc>,
}

impl StatusReport {
    pub fn from_probes(probes: Vec<ProbeResult>) -> Self {
        let condition = probes
            .iter()
            .map(|probe| probe.condition)
            .max()
            .unwrap_or(Condition::Ok);

        Self {
            condition,
            probes,
            generated_at: Utc::now(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "Status: {} ({} components, checked {})\n",
            self.condition.label(),
            self.probes.len(),
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );

        for probe in &self.probes {
            out.push_str(&format!(
                "  {:<18} {:<9} {} ms",
                probe.target,
                probe.condition.label(),
                probe.elapsed_ms
            ));

            if let Some(detail) = &probe.detail {
                out.push_str(&format!("  {}", detail));
            }

            out.push('\n');
        }

        out
    }
}

/// Times one question round trip and logs the latency when stopped.
pub struct QueryTimer {
    started: Instant,
}

impl QueryTimer {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn stop(self) -> Duration {
        let elapsed = self.elapsed();
        info!("Answered in {} ms", elapsed.as_millis());
        elapsed
    }
}

use serde::Serialize;

/// Result of handling a single scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneOutcome {
    Processed(String),
    Skipped(String),
    Failed(String),
}

impl SceneOutcome {
    pub fn message(&self) -> &str {
        match self {
            SceneOutcome::Processed(message)
            | SceneOutcome::Skipped(message)
            | SceneOutcome::Failed(message) => message,
        }
    }
}

/// Counters accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &SceneOutcome) {
        match outcome {
            SceneOutcome::Processed(_) => self.processed += 1,
            SceneOutcome::Skipped(_) => self.skipped += 1,
            SceneOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub installed: bool,
    pub message: String,
}

impl InstallReport {
    pub fn installed(message: impl Into<String>) -> Self {
        Self {
            installed: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportOutput {
    Summary(RunSummary),
    Install(InstallReport),
}

/// The single JSON object written to standard output.
///
/// Serializes as `{"output": ...}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Report {
    Output(ReportOutput),
    Error(String),
}

impl Report {
    pub fn summary(summary: RunSummary) -> Self {
        Report::Output(ReportOutput::Summary(summary))
    }

    pub fn install(report: InstallReport) -> Self {
        Report::Output(ReportOutput::Install(report))
    }

    pub fn error(message: impl ToString) -> Self {
        Report::Error(message.to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Report::Error(_))
    }

    pub fn to_json_line(&self) -> String {
        match serde_json::to_string(self) {
            Ok(line) => line,
            // Only reachable if a message fails to serialize; keep stdout valid JSON.
            Err(err) => serde_json::json!({ "error": err.to_string() }).to_string(),
        }
    }
}

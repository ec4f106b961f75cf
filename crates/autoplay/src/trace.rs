use crate::AutoplayError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tapout_core::{Action, PlayerId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunStatus {
    TurnLimit,
    MaxSteps,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepRecord {
    pub step: u32,
    pub turn: u32,
    pub player: PlayerId,
    pub phase_before: String,
    pub action: Action,
    pub action_label: String,
    pub phase_after: String,
    pub event_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSummary {
    pub name: String,
    pub library: usize,
    pub hand: usize,
    pub board: usize,
    pub graveyard: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalState {
    pub turn: u32,
    pub turn_holder: PlayerId,
    pub phase: String,
    pub pending_spells: usize,
    pub seats: Vec<SeatSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    pub steps: u32,
    pub events: usize,
    pub wall_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoplayResult {
    pub seed: u64,
    pub status: RunStatus,
    pub final_state: FinalState,
    pub steps: Vec<StepRecord>,
    pub summary: SummaryStats,
}

impl AutoplayResult {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!("status: {}", run_status_label(&self.status)),
            format!("seed: {}", self.seed),
            format!(
                "final: turn {} held by player {} in {} ({} pending spells)",
                self.final_state.turn,
                self.final_state.turn_holder,
                self.final_state.phase,
                self.final_state.pending_spells
            ),
        ];
        for seat in &self.final_state.seats {
            lines.push(format!(
                "  {}: library={} hand={} board={} graveyard={}",
                seat.name, seat.library, seat.hand, seat.board, seat.graveyard
            ));
        }
        lines.push(format!(
            "summary: steps={} events={} wall_ms={}",
            self.summary.steps, self.summary.events, self.summary.wall_time_ms
        ));
        lines.push(String::new());
        lines.push("steps:".to_string());
        for step in &self.steps {
            lines.push(format!(
                "  step {:>4} | turn {:>3} | player {} | {}",
                step.step, step.turn, step.player, step.action_label
            ));
            lines.push(format!(
                "    {} -> {} ({} events)",
                step.phase_before, step.phase_after, step.event_count
            ));
        }
        lines.join("\n")
    }

    pub fn save_trace(&self, path: &Path) -> Result<(), AutoplayError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body)?;
        Ok(())
    }

    pub fn save_report(&self, path: &Path) -> Result<(), AutoplayError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_text_report())?;
        Ok(())
    }
}

fn run_status_label(status: &RunStatus) -> &'static str {
    match status {
        RunStatus::TurnLimit => "TurnLimit",
        RunStatus::MaxSteps => "MaxSteps",
    }
}

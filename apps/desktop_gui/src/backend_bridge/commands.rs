//! Backend commands queued from UI to backend worker.

use shared::domain::{EntityId, Outcome};

#[derive(Debug, Clone)]
pub enum BackendCommand {
    Toggle { entity: EntityId, outcome: Outcome },
    Randomize,
    Evaluate,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Toggle { .. } => "toggle",
            BackendCommand::Randomize => "randomize",
            BackendCommand::Evaluate => "evaluate",
        }
    }
}

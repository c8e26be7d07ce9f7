//! TanOS module domain entity
//!
//! The five copilot modules Nomad can operate as. Each one maps to a prompt
//! directory under the prompts root and a system prompt file inside it.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TanosModule {
    /// Persona and operational state
    CaptainsLog,
    /// Planning
    ChartRoom,
    /// Execution and conceptual tools
    Workshop,
    /// Reflection
    PhilosophersPorch,
    /// Sensory input and health metrics
    CrowsNest,
}

impl TanosModule {
    pub const ALL: [TanosModule; 5] = [
        TanosModule::CaptainsLog,
        TanosModule::ChartRoom,
        TanosModule::Workshop,
        TanosModule::PhilosophersPorch,
        TanosModule::CrowsNest,
    ];

    /// Directory name under the prompts root
    pub fn dir_name(&self) -> &'static str {
        match self {
            TanosModule::CaptainsLog => "CaptainsLog",
            TanosModule::ChartRoom => "ChartRoom",
            TanosModule::Workshop => "Workshop",
            TanosModule::PhilosophersPorch => "PhilosophersPorch",
            TanosModule::CrowsNest => "CrowsNest",
        }
    }

    /// File holding the module's system prompt
    pub fn system_prompt_file(&self) -> &'static str {
        match self {
            TanosModule::CaptainsLog => "Nomad_Core_Persona_and_State.txt",
            TanosModule::ChartRoom => "Planning_Module_Prompt.txt",
            TanosModule::Workshop => "Execution_Module_Prompt.txt",
            TanosModule::PhilosophersPorch => "Reflection_Module_Prompt.txt",
            TanosModule::CrowsNest => "Sensory_Input_Module_Prompt.txt",
        }
    }

    /// Short description of the module's role
    pub fn role(&self) -> &'static str {
        match self {
            TanosModule::CaptainsLog => "persona and operational state",
            TanosModule::ChartRoom => "planning",
            TanosModule::Workshop => "execution",
            TanosModule::PhilosophersPorch => "reflection",
            TanosModule::CrowsNest => "sensory input and health tracking",
        }
    }

    /// Follow-up the orchestrator records after the module has answered
    pub fn post_interaction_note(&self) -> Option<&'static str> {
        match self {
            TanosModule::CaptainsLog => None,
            TanosModule::CrowsNest => Some(
                "parse the response to update Captain's Log state (mood, flags) and trigger other modules if thresholds are met",
            ),
            TanosModule::ChartRoom => Some(
                "parse the response for plans and tasks, update Captain's Log projects, and pass tasks to Workshop",
            ),
            TanosModule::Workshop => Some(
                "tool use simulated and outcome logged; ChartRoom needs this outcome to determine the next step",
            ),
            TanosModule::PhilosophersPorch => Some(
                "session complete; review insights for MEMORIES/prompt updates and a changelog entry",
            ),
        }
    }
}

impl std::fmt::Display for TanosModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

impl std::str::FromStr for TanosModule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "captainslog" => Ok(TanosModule::CaptainsLog),
            "chartroom" => Ok(TanosModule::ChartRoom),
            "workshop" => Ok(TanosModule::Workshop),
            "philosophersporch" => Ok(TanosModule::PhilosophersPorch),
            "crowsnest" => Ok(TanosModule::CrowsNest),
            _ => Err(ParseError::UnknownModule(s.to_string())),
        }
    }
}

//! Core simulation state: agents and the game they play.

pub mod agent;
pub mod game;

pub use agent::{Agent, AgentError, AgentId, AgentParams, LedgerError, RutThreshold};
pub use game::PayoffTable;

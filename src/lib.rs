pub mod agent;
pub mod cards;
pub mod equity;
pub mod evaluator;
pub mod game;
pub mod opponent;
pub mod policy;

pub use agent::{Agent, AgentConfig, AgentError};
pub use game::{Action, Bot, GameState, RoundState, TerminalState};
pub use policy::{DecisionPolicy, PolicyConfig, StrategyVariant};

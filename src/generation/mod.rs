pub mod generator;
pub mod instructions;
pub mod orchestrator;
pub mod schema;
pub mod validate;

pub use generator::{GenerationSettings, PromptGenerator};
pub use orchestrator::{merge, PromptOrchestrator, FAN_OUT};
pub use validate::PayloadShape;

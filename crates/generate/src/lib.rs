//! Outline synthesis and section content generation.
//!
//! Every component takes its [`TextBackend`] at construction, so tests can
//! substitute a deterministic fake. Backend calls are blocking and are moved
//! onto tokio's blocking pool; sections of one document are generated
//! strictly one after another.

pub mod backend;
pub mod orchestrator;
pub mod outline;
pub mod prompt;
pub mod refine;
pub mod section;

pub use backend::{CommandBackend, TextBackend};
pub use orchestrator::{GenerationContext, GenerationOrchestrator, RunSummary};
pub use outline::OutlineSynthesizer;
pub use refine::Refiner;
pub use section::SectionContentGenerator;

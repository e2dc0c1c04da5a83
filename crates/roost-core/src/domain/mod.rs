// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Roost.
//!
//! Pure business logic: answers in, [`AppConfig`] and [`ScaffoldPlan`] out.
//! Nothing here touches the filesystem, spawns processes or logs. All I/O is
//! behind the ports in the application layer.
//!
//! ## Pipeline
//!
//! ```text
//! Wizard ──▶ RawAnswers ──▶ resolve() ──▶ AppConfig ──▶ plan() ──▶ ScaffoldPlan
//!                              │
//!                              └── assemble(): dependencies, statics, symlinks
//! ```
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network or process calls
//! - **Few crates**: std, thiserror, serde and serde_json for manifest values
// Public API - what the world sees
pub mod assembler;
pub mod entities;
pub mod error;
pub mod manifest;
pub mod planner;
pub mod resolver;
pub mod slug;
pub mod value_objects;
pub mod wizard;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::*;

pub use error::{DomainError, ErrorCategory, PlanError, ValidationError};

pub use value_objects::{
    CompilerSelection, ConfigMode, CssCompiler, JsCompiler, KeyFormat, QuestionId,
    TemplateFamily,
};

pub use assembler::{Assembly, Selections, assemble};
pub use planner::{TEMPLATE_IDS, plan};
pub use resolver::{MAX_VIEW_ENGINES, resolve};
pub use slug::slugify;
pub use validation::DomainValidator;
pub use wizard::{
    Condition, Question, QuestionBatch, QuestionKind, Stage, Step, Validator, Wizard,
};

//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "write this plan to disk" or "list templates".

pub mod scaffold_service;
pub mod template_service;

pub use scaffold_service::{ExecutionReport, ScaffoldService};
pub use template_service::{TemplateInfo, TemplateService};

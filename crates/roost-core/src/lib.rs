//! Roost Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Roost
//! app generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            roost-cli (CLI)              │
//! │   (prompts, answers files, installer)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ScaffoldService, TemplateService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Store, Renderer, Filesystem, Certs)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     roost-adapters (Infrastructure)     │
//! │ (InMemoryStore, LocalFilesystem, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Wizard, resolve, assemble, plan)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use roost_core::domain::{Defaults, QuestionId, RawAnswers, plan, resolve};
//!
//! let answers = RawAnswers::new().with(QuestionId::AppName, "My App");
//! let config = resolve(&answers, &Defaults::default()).unwrap();
//! let plan = plan(&config).unwrap();
//! assert_eq!(plan.destination().to_slash(), "my-app");
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ExecutionReport, ScaffoldService, TemplateInfo, TemplateService,
        ports::{CertificateGenerator, Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        AppConfig, Defaults, QuestionId, RawAnswers, RenderContext, ScaffoldPlan, Step,
        TemplateEntry, TemplateId, Wizard, plan, resolve,
    };
    pub use crate::error::{RoostError, RoostResult};
}

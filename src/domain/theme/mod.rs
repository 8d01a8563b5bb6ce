// ============================================================================
// Theme Domain - Business Logic for Theme Aggregate
// ============================================================================
//
// This module contains ALL Theme-specific code:
// - Value objects (RgbaColor, HeaderRule, LogoRule, ThemeState)
// - Events (ThemeCreated, LogoPositionChanged, etc.)
// - Commands (Activate)
// - Errors (ThemeError enum)
// - Aggregate (Theme projection and command rules)
// - Service (ThemeService: load -> command -> commit)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod service;

// Re-export for convenience
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use service::*;

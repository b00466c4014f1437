//! Atomic CSS compilation engine.
//!
//! Strata turns lists of utility class names into a deduplicated, sorted
//! stylesheet. It provides:
//!
//! - **Candidate parsing**: `hover:bg-red-500/50`, arbitrary values
//!   (`w-[32px]`), negatives, fractions, and the `!` important flag
//! - **Theme tokens**: namespaced custom properties, loaded from `@theme`
//!   blocks or seeded programmatically
//! - **Registries**: static, functional, and compound utilities/variants,
//!   extensible through plugins
//! - **Deterministic output**: natural ordering, deduplication, and
//!   `@property` synthesis for engine-owned custom properties
//!
//! # Example
//!
//! ```ignore
//! use strata::prelude::*;
//!
//! let compiler = compile(
//!     "@theme { --color-mint-500: oklch(0.72 0.11 178); }",
//!     Options::default(),
//! )?;
//!
//! let css = compiler.build(&["flex", "hover:bg-mint-500/50", "p-4"]);
//! ```

pub mod builtins;
pub mod candidate;
pub mod compile;
pub mod css;
pub mod registry;
pub mod segment;
pub mod theme;
pub mod value;

pub mod plugin;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::candidate::{parse_candidate, Candidate, Modifier, UtilityRef, Value, Variant};
    pub use crate::compile::{
        compare, compile, compile_candidate, escape, unescape, CompileStats, CompiledRule,
        Compiler, Layer, Options,
    };
    pub use crate::css::{CssNode, Declaration};
    pub use crate::plugin::{apply_plugins, Plugin, PluginApi, PluginEntry, PluginOptions};
    pub use crate::registry::{
        CustomProperty, FunctionalUtility, UtilityRegistry, ValueDef, VariantRegistry, Wrapper,
    };
    pub use crate::segment::segment;
    pub use crate::theme::Theme;
    pub use crate::value::DataType;
    pub use crate::{Error, Result};
}

//! Production-friendly observability hooks for completion calls and chat sessions.
//!
//! ```rust
//! use dobserve::{MetricsObservabilityHooks, SafeCompletionHooks, TracingObservabilityHooks};
//!
//! let _completion_hooks = SafeCompletionHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeCompletionHooks, SafeSessionHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeCompletionHooks, SafeSessionHooks,
        TracingObservabilityHooks,
    };
}

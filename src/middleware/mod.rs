//! Request pipeline stages that wrap every route.

mod method_override;
mod panic;
mod presenter;

pub use method_override::{overridden_method, MethodOverride, MethodOverrideLayer, METHOD_OVERRIDE_PARAM};
pub use panic::catch_panic_layer;
pub use presenter::{not_found, present_errors};

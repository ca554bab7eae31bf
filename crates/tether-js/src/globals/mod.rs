//! JavaScript global objects.
//!
//! Plugin scripts run in a bare global environment. The only host object
//! added on top of the language built-ins is `console`, so plugins have
//! somewhere to report to.

mod console;

use boa_engine::{Context, JsResult};

/// Register all host globals on the context.
///
/// Called once, when a bridge creates its context.
pub fn register_globals(context: &mut Context) -> JsResult<()> {
    console::register_console(context)
}

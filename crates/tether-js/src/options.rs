//! Bridge construction options.

use boa_engine::{Context, vm::RuntimeLimits};
use tether_common::warning::warn_once;

use crate::{COMPONENT, globals};

/// Options applied when an [`EngineBridge`](crate::EngineBridge) creates
/// its context.
///
/// ```ignore
/// let options = BridgeOptions::default()
///     .with_plugin_name("plugin")
///     .with_loop_iteration_limit(1_000_000);
/// let bridge = EngineBridge::with_options(Some(script), &options);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeOptions {
    console: bool,
    plugin_name: Option<String>,
    loop_iteration_limit: Option<u64>,
    recursion_limit: Option<usize>,
    stack_size_limit: Option<usize>,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            console: true,
            plugin_name: None,
            loop_iteration_limit: None,
            recursion_limit: None,
            stack_size_limit: None,
        }
    }
}

impl BridgeOptions {
    /// Install the `console` global (on by default).
    #[must_use]
    pub const fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Also expose the engine plugin as a global property with this name,
    /// so scripts evaluated later can reach it.
    #[must_use]
    pub fn with_plugin_name(mut self, name: impl Into<String>) -> Self {
        self.plugin_name = Some(name.into());
        self
    }

    /// Abort any single loop after this many iterations.
    #[must_use]
    pub const fn with_loop_iteration_limit(mut self, limit: u64) -> Self {
        self.loop_iteration_limit = Some(limit);
        self
    }

    /// Abort calls nested deeper than this.
    #[must_use]
    pub const fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Abort when the VM stack grows past this many values.
    #[must_use]
    pub const fn with_stack_size_limit(mut self, limit: usize) -> Self {
        self.stack_size_limit = Some(limit);
        self
    }

    /// Whether the `console` global is installed.
    #[must_use]
    pub const fn console(&self) -> bool {
        self.console
    }

    /// Global name the plugin is exposed under, if any.
    #[must_use]
    pub fn plugin_name(&self) -> Option<&str> {
        self.plugin_name.as_deref()
    }

    /// Create a fresh context configured by these options.
    pub(crate) fn build_context(&self) -> Context {
        let mut context = Context::default();

        if self.has_limits() {
            let mut limits = RuntimeLimits::default();
            if let Some(limit) = self.loop_iteration_limit {
                limits.set_loop_iteration_limit(limit);
            }
            if let Some(limit) = self.recursion_limit {
                limits.set_recursion_limit(limit);
            }
            if let Some(limit) = self.stack_size_limit {
                limits.set_stack_size_limit(limit);
            }
            context.set_runtime_limits(limits);
        }

        let installed = if self.console {
            globals::register_globals(&mut context)
        } else {
            Ok(())
        };
        if let Err(err) = installed {
            warn_once(COMPONENT, &format!("failed to install globals: {err}"));
        }

        context
    }

    const fn has_limits(&self) -> bool {
        self.loop_iteration_limit.is_some()
            || self.recursion_limit.is_some()
            || self.stack_size_limit.is_some()
    }
}

//! JavaScript engine-plugin bridge.
//!
//! Uses [Boa](https://boajs.dev/) as the JavaScript engine.
//!
//! An [`EngineBridge`] owns one JavaScript global context. It loads a
//! script whose completion value is an object (the *engine plugin*), then
//! lets Rust call functions on that object, hand it native callbacks, and
//! move strings across the boundary.
//!
//! # Example
//!
//! ```ignore
//! use tether_js::EngineBridge;
//!
//! let mut bridge = EngineBridge::new(Some("({ greet: function (n) { return 'Hello, ' + n; } })"));
//! let value = bridge.call_with_strings("greet", None, ["World"])?;
//! assert_eq!(bridge.string_from_value(&value)?, "Hello, World");
//! ```
//!
//! # Call target resolution
//!
//! Every call names a function and optionally a target object. The function
//! is looked up on the explicit target if given, otherwise on the engine
//! plugin, otherwise on the global object. Whichever object the lookup ran
//! against is also the `this` value of the invocation.
//!
//! # Failures
//!
//! Calls return [`CallError`]: either the name did not resolve to a
//! function, or the function threw. A thrown value is also kept as the
//! bridge's pending exception ([`EngineBridge::exception`]) until the next
//! call attempt replaces it.

mod call;
mod callback;
mod convert;
mod globals;
mod options;

pub use call::CallError;
pub use callback::NativeCallback;
pub use options::BridgeOptions;

pub use boa_engine::{Context, JsObject, JsResult, JsString, JsValue, NativeFunction};

use std::fmt;

use boa_engine::{JsError, JsNativeErrorKind, Source, property::Attribute};
use tether_common::warning::warn_once;

/// Component tag used for bridge warnings.
const COMPONENT: &str = "JS";

/// A JavaScript global context plus the engine plugin loaded into it.
///
/// The bridge is the sole owner of its [`Context`]. Objects handed out by
/// the bridge belong to that context and must not be used with another one.
pub struct EngineBridge {
    /// The Boa JavaScript context.
    context: Context,

    /// Object produced by the plugin script, if it produced one.
    engine_plugin: Option<JsObject>,

    /// Value thrown by initialization or the most recent call attempt.
    exception: Option<JsValue>,
}

impl EngineBridge {
    /// Create a bridge with default options and optionally load a plugin
    /// script into it.
    ///
    /// Construction never fails. If the script cannot be parsed or throws,
    /// the thrown value is available from [`exception`](Self::exception)
    /// and there is no engine plugin.
    #[must_use]
    pub fn new(script: Option<&str>) -> Self {
        Self::with_options(script, &BridgeOptions::default())
    }

    /// Create a bridge with explicit options.
    ///
    /// A `None` or blank script leaves the bridge without a plugin and
    /// without an exception.
    #[must_use]
    pub fn with_options(script: Option<&str>, options: &BridgeOptions) -> Self {
        let mut bridge = Self {
            context: options.build_context(),
            engine_plugin: None,
            exception: None,
        };

        if let Some(source) = script.filter(|s| !s.trim().is_empty()) {
            bridge.load_plugin(source, options.plugin_name());
        }

        bridge
    }

    /// Evaluate the plugin script and keep its completion value.
    fn load_plugin(&mut self, source: &str, plugin_name: Option<&str>) {
        let value = match self.context.eval(Source::from_bytes(source)) {
            Ok(value) => value,
            Err(err) => {
                warn_once(COMPONENT, &format!("plugin script failed: {err}"));
                self.exception = Some(thrown_value(&err, &mut self.context));
                return;
            }
        };

        let Some(plugin) = value.as_object().cloned() else {
            warn_once(
                COMPONENT,
                &format!("plugin script evaluated to {}, not an object", value.display()),
            );
            return;
        };

        if let Some(name) = plugin_name {
            let registered = self.context.register_global_property(
                JsString::from(name),
                plugin.clone(),
                Attribute::all(),
            );
            if let Err(err) = registered {
                warn_once(
                    COMPONENT,
                    &format!("could not expose plugin as global '{name}': {err}"),
                );
            }
        }

        self.engine_plugin = Some(plugin);
    }

    /// Execute additional JavaScript source in the bridge's context.
    ///
    /// The engine plugin is left untouched. Like a call, this replaces the
    /// pending exception.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Threw`] if the source contains syntax errors or
    /// throws an uncaught exception.
    pub fn evaluate(&mut self, source: &str) -> Result<JsValue, CallError> {
        self.exception = None;
        let result = self
            .context
            .eval(Source::from_bytes(source))
            .map_err(|err| CallError::Threw(thrown_value(&err, &mut self.context)));
        self.record(result)
    }

    /// Keep a thrown value as the pending exception.
    fn record(&mut self, result: Result<JsValue, CallError>) -> Result<JsValue, CallError> {
        if let Err(CallError::Threw(value)) = &result {
            self.exception = Some(value.clone());
        }
        result
    }

    /// The engine plugin object, if the script produced one.
    #[must_use]
    pub const fn engine_plugin(&self) -> Option<&JsObject> {
        self.engine_plugin.as_ref()
    }

    /// The value thrown by initialization or by the most recent call.
    #[must_use]
    pub const fn exception(&self) -> Option<&JsValue> {
        self.exception.as_ref()
    }

    /// The global object of the bridge's context.
    #[must_use]
    pub fn global_object(&self) -> JsObject {
        self.context.global_object()
    }

    /// The bridge's execution context.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Mutable access to the execution context, e.g. to build argument
    /// values or inspect an exception object.
    pub const fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }
}

impl fmt::Debug for EngineBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineBridge")
            .field("engine_plugin", &self.engine_plugin.is_some())
            .field(
                "exception",
                &self.exception.as_ref().map(|e| e.display().to_string()),
            )
            .finish_non_exhaustive()
    }
}

/// Turn an engine error into the JavaScript value it represents.
///
/// Runtime limit errors cannot be caught by scripts and have no object
/// form; they are reported as their message string.
pub(crate) fn thrown_value(err: &JsError, context: &mut Context) -> JsValue {
    match err.as_native() {
        Some(native) if matches!(native.kind, JsNativeErrorKind::RuntimeLimit) => {
            JsValue::from(JsString::from(native.to_string().as_str()))
        }
        _ => err.to_opaque(context),
    }
}

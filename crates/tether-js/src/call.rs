//! Function invocation on the engine plugin.
//!
//! All call shapes end up in [`EngineBridge::call_function`], which takes a
//! prepared argument slice. The other methods only build that slice.

use boa_engine::{Context, JsObject, JsString, JsValue};
use tether_common::warning::warn_once;
use thiserror::Error;

use crate::{COMPONENT, EngineBridge, NativeCallback, callback, thrown_value};

/// Why a call produced no value.
#[derive(Debug, Clone, Error)]
pub enum CallError {
    /// The name did not resolve to a function on the call target. No
    /// exception is recorded for this case.
    #[error("'{name}' is not a callable property of the call target")]
    NotCallable {
        /// The function name that was looked up.
        name: String,
    },

    /// Evaluation, property lookup, or the function itself threw.
    #[error("uncaught JavaScript exception: {}", .0.display())]
    Threw(JsValue),
}

impl CallError {
    /// The thrown value, if the failure was an exception.
    #[must_use]
    pub const fn exception(&self) -> Option<&JsValue> {
        match self {
            Self::Threw(value) => Some(value),
            Self::NotCallable { .. } => None,
        }
    }
}

impl EngineBridge {
    /// Call a function with at most one JavaScript argument.
    ///
    /// # Errors
    ///
    /// See [`call_function`](Self::call_function).
    pub fn call(
        &mut self,
        name: &str,
        target: Option<&JsObject>,
        argument: Option<JsValue>,
    ) -> Result<JsValue, CallError> {
        self.call_function(name, target, argument.as_slice())
    }

    /// Call a function, passing each native string as a JavaScript string
    /// argument, in order.
    ///
    /// # Errors
    ///
    /// See [`call_function`](Self::call_function).
    pub fn call_with_strings<I, S>(
        &mut self,
        name: &str,
        target: Option<&JsObject>,
        strings: I,
    ) -> Result<JsValue, CallError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<JsValue> = strings
            .into_iter()
            .map(|s| JsValue::from(Self::js_string(s.as_ref())))
            .collect();
        self.call_function(name, target, &args)
    }

    /// Call a function, passing a native callback as its only argument.
    ///
    /// Typically used to hand the plugin a completion or response handler.
    ///
    /// # Errors
    ///
    /// See [`call_function`](Self::call_function).
    pub fn call_with_callback(
        &mut self,
        name: &str,
        target: Option<&JsObject>,
        callback: NativeCallback,
    ) -> Result<JsValue, CallError> {
        let function = callback::function_object("", callback, &mut self.context);
        self.call_function(name, target, &[JsValue::from(function)])
    }

    /// Resolve `name` on the call target and invoke it with `args`.
    ///
    /// The target is `target` if given, else the engine plugin, else the
    /// global object. The function runs with that same object as `this`.
    /// The pending exception is cleared first and set again only if this
    /// call throws.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::NotCallable`] if the property is missing or not
    /// a function, and [`CallError::Threw`] if looking it up or calling it
    /// throws.
    pub fn call_function(
        &mut self,
        name: &str,
        target: Option<&JsObject>,
        args: &[JsValue],
    ) -> Result<JsValue, CallError> {
        self.exception = None;
        let receiver = self.resolve_target(target);
        let result = invoke(&receiver, name, args, &mut self.context);

        if let Err(err @ CallError::NotCallable { .. }) = &result {
            warn_once(COMPONENT, &err.to_string());
        }
        self.record(result)
    }

    /// Explicit target, then the engine plugin, then the global object.
    pub(crate) fn resolve_target(&self, target: Option<&JsObject>) -> JsObject {
        target
            .or(self.engine_plugin.as_ref())
            .cloned()
            .unwrap_or_else(|| self.context.global_object())
    }
}

/// Look up `name` on `receiver` and call it with `receiver` as `this`.
fn invoke(
    receiver: &JsObject,
    name: &str,
    args: &[JsValue],
    context: &mut Context,
) -> Result<JsValue, CallError> {
    let property = receiver
        .get(JsString::from(name), context)
        .map_err(|err| CallError::Threw(thrown_value(&err, context)))?;

    let Some(function) = property.as_callable() else {
        return Err(CallError::NotCallable {
            name: name.to_owned(),
        });
    };

    function
        .call(&JsValue::from(receiver.clone()), args, context)
        .map_err(|err| CallError::Threw(thrown_value(&err, context)))
}

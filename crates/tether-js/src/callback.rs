//! Native callbacks exposed to JavaScript.

use boa_engine::{
    Context, JsObject, JsResult, JsString, JsValue, NativeFunction,
    object::{FunctionObjectBuilder, builtins::JsFunction},
};

use crate::{CallError, EngineBridge, thrown_value};

/// Signature of a native function callable from JavaScript.
///
/// This is the engine's own calling convention: the receiver (`this`), the
/// arguments (their count is the slice length), and the context the call
/// runs in. Returning `Err` throws the error into the calling script.
///
/// Strings arriving here belong to the calling context; convert them with
/// [`EngineBridge::string_from_value_in`].
pub type NativeCallback = fn(&JsValue, &[JsValue], &mut Context) -> JsResult<JsValue>;

/// Wrap a native callback in a JavaScript function object.
pub(crate) fn function_object(
    name: &str,
    callback: NativeCallback,
    context: &mut Context,
) -> JsFunction {
    native_function_object(name, NativeFunction::from_fn_ptr(callback), context)
}

fn native_function_object(
    name: &str,
    function: NativeFunction,
    context: &mut Context,
) -> JsFunction {
    FunctionObjectBuilder::new(context.realm(), function)
        .name(JsString::from(name))
        .length(0)
        .constructor(false)
        .build()
}

impl EngineBridge {
    /// Install a native callback as a named function property of `target`.
    ///
    /// Without a target the property goes on the engine plugin, or on the
    /// global object when there is no plugin. The property is writable,
    /// enumerable and configurable, and afterwards resolves like any other
    /// function through [`call_function`](Self::call_function).
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Threw`] with the engine's `TypeError` if the
    /// target refuses new properties (e.g. it is frozen).
    pub fn add_function_property(
        &mut self,
        name: &str,
        target: Option<&JsObject>,
        callback: NativeCallback,
    ) -> Result<(), CallError> {
        self.add_native_function(name, target, NativeFunction::from_fn_ptr(callback))
    }

    /// Like [`add_function_property`](Self::add_function_property), for any
    /// [`NativeFunction`], including copy closures.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Threw`] if the property cannot be defined.
    pub fn add_native_function(
        &mut self,
        name: &str,
        target: Option<&JsObject>,
        function: NativeFunction,
    ) -> Result<(), CallError> {
        let holder = self.resolve_target(target);
        let function = native_function_object(name, function, &mut self.context);

        holder
            .create_data_property_or_throw(JsString::from(name), function, &mut self.context)
            .map(|_| ())
            .map_err(|err| CallError::Threw(thrown_value(&err, &mut self.context)))
    }
}

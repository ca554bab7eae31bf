//! String marshaling between Rust and JavaScript.

use boa_engine::{Context, JsResult, JsString, JsValue};

use crate::EngineBridge;

impl EngineBridge {
    /// Convert a JavaScript value to a native string using the bridge's own
    /// context.
    ///
    /// # Errors
    ///
    /// See [`string_from_value_in`](Self::string_from_value_in).
    pub fn string_from_value(&mut self, value: &JsValue) -> JsResult<String> {
        Self::string_from_value_in(value, &mut self.context)
    }

    /// Convert a JavaScript value to a native string using `context`.
    ///
    /// Use this inside native callbacks, where values belong to the context
    /// passed to the callback rather than to a bridge. String values convert
    /// directly. Anything else goes through the language's `ToString`
    /// conversion first, which may run user code (e.g. a `toString` method).
    ///
    /// # Errors
    ///
    /// Returns the thrown error if `ToString` throws; for a `Symbol` it
    /// always does.
    pub fn string_from_value_in(value: &JsValue, context: &mut Context) -> JsResult<String> {
        if let Some(string) = value.as_string() {
            return Ok(Self::string_from_js_string(string));
        }
        let string = value.to_string(context)?;
        Ok(Self::string_from_js_string(&string))
    }

    /// Convert a JavaScript string primitive to a native string. Needs no
    /// context.
    ///
    /// Unpaired surrogates, which have no UTF-8 form, come out as `\uXXXX`
    /// escapes.
    #[must_use]
    pub fn string_from_js_string(string: &JsString) -> String {
        string
            .to_std_string()
            .unwrap_or_else(|_| string.to_std_string_escaped())
    }

    /// Convert a native string to a JavaScript string primitive.
    #[must_use]
    pub fn js_string(string: &str) -> JsString {
        JsString::from(string)
    }
}

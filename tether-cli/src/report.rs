//! Outcome of a command-line call, printable as text or JSON.

use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value;
use tether_js::{CallError, EngineBridge, JsValue};

/// What happened when the CLI called a plugin function.
#[derive(Debug, Serialize)]
pub struct CallReport {
    /// Name of the function that was called.
    pub function: String,

    /// String arguments, in the order they were passed.
    pub arguments: Vec<String>,

    /// Whether the call returned a value.
    pub ok: bool,

    /// Returned value as JSON, when the call succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error description, when the call failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallReport {
    /// Build a report, converting the returned value in the bridge's context.
    pub fn new(
        bridge: &mut EngineBridge,
        function: &str,
        arguments: &[String],
        outcome: Result<JsValue, CallError>,
    ) -> Self {
        let (result, error) = match outcome {
            Ok(value) => (Some(json_value(bridge, &value)), None),
            Err(err) => (None, Some(err.to_string())),
        };

        Self {
            function: function.to_string(),
            arguments: arguments.to_vec(),
            ok: error.is_none(),
            result,
            error,
        }
    }

    /// Print the report for a terminal.
    pub fn print(&self) {
        match (&self.result, &self.error) {
            (Some(Value::String(text)), _) => println!("{text}"),
            (Some(value), _) => println!("{value}"),
            (None, Some(error)) => eprintln!("{} {error}", "Call failed:".red()),
            (None, None) => {}
        }
    }
}

/// Convert a returned value to JSON.
///
/// `undefined` becomes `null`; values JSON cannot represent (functions,
/// symbols, cycles) fall back to their display string.
fn json_value(bridge: &mut EngineBridge, value: &JsValue) -> Value {
    if value.is_undefined() {
        return Value::Null;
    }
    value
        .to_json(bridge.context_mut())
        .unwrap_or_else(|_| Value::String(value.display().to_string()))
}

//! Console API for plugin scripts.
//!
//! [Console Standard](https://console.spec.whatwg.org/)
//!
//! `log`, `info` and `debug` write to stdout, `warn` writes to stdout with a
//! prefix, and `error` writes to stderr. Grouping, counting and timing are
//! not provided.

use boa_engine::{
    Context, JsResult, JsValue, NativeFunction, js_string, object::ObjectInitializer,
    property::Attribute,
};

/// Register the `console` global object on the context.
///
/// [§ 1.1 Logging](https://console.spec.whatwg.org/#logging)
pub fn register_console(context: &mut Context) -> JsResult<()> {
    let console = ObjectInitializer::new(context)
        .function(NativeFunction::from_copy_closure(console_log), js_string!("log"), 0)
        .function(NativeFunction::from_copy_closure(console_log), js_string!("info"), 0)
        .function(NativeFunction::from_copy_closure(console_log), js_string!("debug"), 0)
        .function(NativeFunction::from_copy_closure(console_warn), js_string!("warn"), 0)
        .function(NativeFunction::from_copy_closure(console_error), js_string!("error"), 0)
        .build();

    context.register_global_property(js_string!("console"), console, Attribute::all())
}

/// [§ 1.1.6 log](https://console.spec.whatwg.org/#log)
fn console_log(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let output = format_console_args(args, context)?;
    println!("[JS] {output}");
    Ok(JsValue::undefined())
}

/// [§ 1.1.9 warn](https://console.spec.whatwg.org/#warn)
fn console_warn(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let output = format_console_args(args, context)?;
    println!("[JS WARN] {output}");
    Ok(JsValue::undefined())
}

/// [§ 1.1.5 error](https://console.spec.whatwg.org/#error)
fn console_error(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let output = format_console_args(args, context)?;
    eprintln!("[JS ERROR] {output}");
    Ok(JsValue::undefined())
}

/// Converts each argument to a string and joins them with spaces.
///
/// [§ 2.1 Formatter](https://console.spec.whatwg.org/#formatter)
fn format_console_args(args: &[JsValue], context: &mut Context) -> JsResult<String> {
    let strings: JsResult<Vec<String>> = args
        .iter()
        .map(|arg| arg.to_string(context).map(|s| s.to_std_string_escaped()))
        .collect();

    Ok(strings?.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boa_engine::Source;

    #[test]
    fn test_console_methods_are_functions() {
        let mut context = Context::default();
        register_console(&mut context).unwrap();

        for method in ["log", "info", "debug", "warn", "error"] {
            let source = format!("typeof console.{method}");
            let kind = context.eval(Source::from_bytes(&source)).unwrap();
            assert_eq!(kind.as_string().unwrap().to_std_string_escaped(), "function");
        }
    }

    #[test]
    fn test_format_joins_with_spaces() {
        let mut context = Context::default();
        let args = [JsValue::from(js_string!("a")), JsValue::from(1), JsValue::null()];
        assert_eq!(format_console_args(&args, &mut context).unwrap(), "a 1 null");
    }
}

//! Tests for native callbacks: registration as properties and passing them
//! as call arguments.

use boa_engine::{JsArgs, JsNativeError};
use tether_js::{
    BridgeOptions, CallError, Context, EngineBridge, JsResult, JsString, JsValue, NativeFunction,
};

const PLUGIN: &str = r"
    ({
        request: function (onResponse) { return onResponse('done', 200); },
        requestTwice: function (onResponse) {
            return onResponse('a') + '+' + onResponse('b');
        },
        guarded: function (cb) {
            try { cb(); return 'no error'; } catch (e) { return 'caught: ' + e.message; }
        }
    })
";

/// Joins all arguments with `|`, converting each in the callback's context.
fn join_args(_this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let parts = args
        .iter()
        .map(|arg| EngineBridge::string_from_value_in(arg, context))
        .collect::<JsResult<Vec<_>>>()?;
    Ok(JsValue::from(EngineBridge::js_string(&parts.join("|"))))
}

/// Returns the number of arguments it was called with.
#[allow(clippy::unnecessary_wraps)]
fn arg_count(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::from(i32::try_from(args.len()).unwrap_or(i32::MAX)))
}

/// Echoes its first argument back.
#[allow(clippy::unnecessary_wraps)]
fn echo(_this: &JsValue, args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(args.get_or_undefined(0).clone())
}

/// Always throws a `TypeError`.
fn reject(_this: &JsValue, _args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Err(JsNativeError::typ().with_message("rejected by host").into())
}

fn as_text(bridge: &mut EngineBridge, value: &JsValue) -> String {
    bridge.string_from_value(value).unwrap()
}

// ========== add_function_property ==========

#[test]
fn test_registered_function_is_callable_on_plugin() {
    let mut bridge = EngineBridge::new(Some(PLUGIN));
    bridge.add_function_property("nativeJoin", None, join_args).unwrap();

    let value = bridge
        .call_with_strings("nativeJoin", None, ["a", "b", "c"])
        .unwrap();
    assert_eq!(as_text(&mut bridge, &value), "a|b|c");
}

#[test]
fn test_registered_function_on_explicit_target() {
    let mut bridge = EngineBridge::new(Some(PLUGIN));
    let target = bridge
        .evaluate("({})")
        .unwrap()
        .as_object()
        .unwrap()
        .clone();

    bridge.add_function_property("count", Some(&target), arg_count).unwrap();

    let value = bridge.call_with_strings("count", Some(&target), ["x", "y"]).unwrap();
    assert_eq!(value.as_number(), Some(2.0));

    // Not installed on the plugin.
    let err = bridge.call("count", None, None).unwrap_err();
    assert!(matches!(err, CallError::NotCallable { .. }));
}

#[test]
fn test_registered_function_without_plugin_goes_global() {
    let mut bridge = EngineBridge::new(None);
    bridge.add_function_property("hostEcho", None, echo).unwrap();

    let value = bridge.evaluate("hostEcho('from script')").unwrap();
    assert_eq!(as_text(&mut bridge, &value), "from script");
}

#[test]
fn test_script_can_call_registered_function() {
    let options = BridgeOptions::default().with_plugin_name("plugin");
    let mut bridge = EngineBridge::with_options(Some(PLUGIN), &options);
    bridge.add_function_property("nativeJoin", None, join_args).unwrap();

    let value = bridge.evaluate("plugin.nativeJoin('x', 1, true)").unwrap();
    assert_eq!(as_text(&mut bridge, &value), "x|1|true");
}

#[test]
fn test_registered_function_replaces_existing() {
    let mut bridge = EngineBridge::new(Some(PLUGIN));
    bridge.add_function_property("request", None, arg_count).unwrap();

    let value = bridge.call_with_strings("request", None, ["1", "2", "3"]).unwrap();
    assert_eq!(value.as_number(), Some(3.0));
}

#[test]
fn test_frozen_target_rejects_property() {
    let mut bridge = EngineBridge::new(Some(PLUGIN));
    let frozen = bridge
        .evaluate("Object.freeze({})")
        .unwrap()
        .as_object()
        .unwrap()
        .clone();

    let err = bridge
        .add_function_property("late", Some(&frozen), echo)
        .unwrap_err();
    assert!(matches!(err, CallError::Threw(_)));
}

#[test]
fn test_closure_registration() {
    let mut bridge = EngineBridge::new(Some(PLUGIN));
    let function = NativeFunction::from_copy_closure(|_this, args, _context| {
        Ok(JsValue::from(i32::try_from(args.len()).unwrap_or(i32::MAX) * 10))
    });
    bridge.add_native_function("tens", None, function).unwrap();

    let value = bridge.call_with_strings("tens", None, ["a", "b"]).unwrap();
    assert_eq!(value.as_number(), Some(20.0));
}

#[test]
fn test_native_error_becomes_exception() {
    let mut bridge = EngineBridge::new(Some(PLUGIN));
    bridge.add_function_property("reject", None, reject).unwrap();

    let err = bridge.call("reject", None, None).unwrap_err();
    assert!(matches!(err, CallError::Threw(_)));

    let exception = bridge.exception().cloned().unwrap();
    let message = exception
        .as_object()
        .unwrap()
        .clone()
        .get(JsString::from("message"), bridge.context_mut())
        .unwrap();
    assert_eq!(as_text(&mut bridge, &message), "rejected by host");
}

// ========== call_with_callback ==========

#[test]
fn test_callback_argument_receives_values() {
    let mut bridge = EngineBridge::new(Some(PLUGIN));
    let value = bridge.call_with_callback("request", None, join_args).unwrap();
    assert_eq!(as_text(&mut bridge, &value), "done|200");
}

#[test]
fn test_callback_argument_called_repeatedly() {
    let mut bridge = EngineBridge::new(Some(PLUGIN));
    let value = bridge.call_with_callback("requestTwice", None, echo).unwrap();
    assert_eq!(as_text(&mut bridge, &value), "a+b");
}

#[test]
fn test_script_catches_callback_error() {
    let mut bridge = EngineBridge::new(Some(PLUGIN));
    let value = bridge.call_with_callback("guarded", None, reject).unwrap();
    assert_eq!(as_text(&mut bridge, &value), "caught: rejected by host");
    assert!(bridge.exception().is_none());
}

#[test]
fn test_uncaught_callback_error_propagates() {
    let mut bridge = EngineBridge::new(Some(PLUGIN));
    let err = bridge.call_with_callback("request", None, reject).unwrap_err();
    assert!(matches!(err, CallError::Threw(_)));
}

//! Runtime values and their renderings.
//!
//! Three renderings matter and they are not the same:
//! - string coercion (`"a" + x`, `[1,2].join`), via [`Value::to_display_string`]
//! - log-line formatting (structured values as indented JSON), via
//!   [`format_log_args`]
//! - `JSON.stringify`, via [`to_json`]

use std::cell::RefCell;
use std::rc::Rc;

use super::interp::Function;

#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Array(Rc<RefCell<Vec<Value>>>),
    /// Insertion-ordered, like JS objects.
    Object(Rc<RefCell<Vec<(String, Value)>>>),
    Function(Rc<Function>),
    Native(NativeFn),
    Error(Rc<ErrorValue>),
}

/// The built-in functions exposed to snippets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeFn {
    ConsoleLog,
    MathFloor,
    MathCeil,
    MathRound,
    MathAbs,
    MathMin,
    MathMax,
    MathSqrt,
    MathPow,
    MathRandom,
    JsonStringify,
    ObjectKeys,
}

impl NativeFn {
    pub fn name(self) -> &'static str {
        match self {
            NativeFn::ConsoleLog => "log",
            NativeFn::MathFloor => "floor",
            NativeFn::MathCeil => "ceil",
            NativeFn::MathRound => "round",
            NativeFn::MathAbs => "abs",
            NativeFn::MathMin => "min",
            NativeFn::MathMax => "max",
            NativeFn::MathSqrt => "sqrt",
            NativeFn::MathPow => "pow",
            NativeFn::MathRandom => "random",
            NativeFn::JsonStringify => "stringify",
            NativeFn::ObjectKeys => "keys",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    pub name: String,
    pub message: String,
}

/// A thrown value travelling up the interpreter. Runtime faults synthesize an
/// `Error` value so `catch (e) { e.message }` works for both kinds.
#[derive(Debug, Clone)]
pub struct Exception {
    pub value: Value,
}

impl Exception {
    pub fn fault(message: impl Into<String>) -> Self {
        Self {
            value: Value::Error(Rc::new(ErrorValue {
                name: "Error".into(),
                message: message.into(),
            })),
        }
    }

    pub fn thrown(value: Value) -> Self {
        Self { value }
    }

    /// The `message` the original runner prints after its error marker:
    /// `error.message`, or `undefined` when the thrown value has none.
    pub fn message(&self) -> String {
        match &self.value {
            Value::Error(err) => err.message.clone(),
            Value::Object(entries) => entries
                .borrow()
                .iter()
                .find(|(key, _)| key == "message")
                .map(|(_, value)| value.to_display_string())
                .unwrap_or_else(|| "undefined".into()),
            _ => "undefined".into(),
        }
    }
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn object(entries: Vec<(String, Value)>) -> Self {
        Value::Object(Rc::new(RefCell::new(entries)))
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Array(_)
            | Value::Object(_)
            | Value::Function(_)
            | Value::Native(_)
            | Value::Error(_) => true,
        }
    }

    /// Strict (`===`) equality; `==` behaves identically in this subset.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Numeric coercion; mirrors `Number(x)` closely enough for arithmetic.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(true) => 1.0,
            Value::Bool(false) | Value::Null => 0.0,
            Value::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            Value::Undefined
            | Value::Array(_)
            | Value::Object(_)
            | Value::Function(_)
            | Value::Native(_)
            | Value::Error(_) => f64::NAN,
        }
    }

    /// `String(x)` coercion.
    pub fn to_display_string(&self) -> String {
        let mut seen = Vec::new();
        self.display_with_seen(&mut seen)
    }

    fn display_with_seen(&self, seen: &mut Vec<*const ()>) -> String {
        match self {
            Value::Undefined => "undefined".into(),
            Value::Null => "null".into(),
            Value::Bool(flag) => flag.to_string(),
            Value::Number(n) => js_number_string(*n),
            Value::Str(s) => s.clone(),
            Value::Array(items) => {
                let ptr = Rc::as_ptr(items) as *const ();
                if seen.contains(&ptr) {
                    return String::new(); // cycles render as empty, like Array.prototype.join
                }
                seen.push(ptr);
                let joined = items
                    .borrow()
                    .iter()
                    .map(|item| match item {
                        Value::Undefined | Value::Null => String::new(),
                        other => other.display_with_seen(seen),
                    })
                    .collect::<Vec<_>>()
                    .join(",");
                seen.pop();
                joined
            }
            Value::Object(_) => "[object Object]".into(),
            Value::Function(function) => match &function.name {
                Some(name) => format!("[Function: {name}]"),
                None => "[Function (anonymous)]".into(),
            },
            Value::Native(native) => format!("[Function: {}]", native.name()),
            Value::Error(err) => format!("{}: {}", err.name, err.message),
        }
    }
}

/// Render one line of `console.log` output: structured values become 2-space
/// indented JSON, everything else its plain string form, joined by single
/// spaces. Circular structures fail the same way `JSON.stringify` does.
pub fn format_log_args(args: &[Value]) -> Result<String, Exception> {
    let mut parts = Vec::with_capacity(args.len());
    for arg in args {
        let rendered = match arg {
            Value::Array(_) | Value::Object(_) => {
                let mut seen = Vec::new();
                let json = to_json(arg, &mut seen)?.unwrap_or(serde_json::Value::Null);
                serde_json::to_string_pretty(&json)
                    .map_err(|err| Exception::fault(err.to_string()))?
            }
            other => other.to_display_string(),
        };
        parts.push(rendered);
    }
    Ok(parts.join(" "))
}

/// Convert a runtime value to a JSON tree. `None` means the value has no JSON
/// representation (`undefined` / functions), which callers omit or null out
/// depending on position, as `JSON.stringify` does.
pub fn to_json(
    value: &Value,
    seen: &mut Vec<*const ()>,
) -> Result<Option<serde_json::Value>, Exception> {
    match value {
        Value::Undefined | Value::Function(_) | Value::Native(_) => Ok(None),
        Value::Null => Ok(Some(serde_json::Value::Null)),
        Value::Bool(flag) => Ok(Some(serde_json::Value::Bool(*flag))),
        Value::Number(n) => {
            // Integer-valued floats serialize without a decimal point, as
            // JSON.stringify renders them.
            let json = if n.fract() == 0.0 && n.is_finite() && n.abs() <= 9e15 {
                Some(serde_json::Value::Number(serde_json::Number::from(*n as i64)))
            } else {
                serde_json::Number::from_f64(*n).map(serde_json::Value::Number)
            };
            Ok(Some(json.unwrap_or(serde_json::Value::Null)))
        }
        Value::Str(s) => Ok(Some(serde_json::Value::String(s.clone()))),
        Value::Error(_) => Ok(Some(serde_json::Value::Object(serde_json::Map::new()))),
        Value::Array(items) => {
            let ptr = Rc::as_ptr(items) as *const ();
            if seen.contains(&ptr) {
                return Err(Exception::fault("Converting circular structure to JSON"));
            }
            seen.push(ptr);
            let mut out = Vec::new();
            for item in items.borrow().iter() {
                out.push(to_json(item, seen)?.unwrap_or(serde_json::Value::Null));
            }
            seen.pop();
            Ok(Some(serde_json::Value::Array(out)))
        }
        Value::Object(entries) => {
            let ptr = Rc::as_ptr(entries) as *const ();
            if seen.contains(&ptr) {
                return Err(Exception::fault("Converting circular structure to JSON"));
            }
            seen.push(ptr);
            let mut map = serde_json::Map::new();
            for (key, entry) in entries.borrow().iter() {
                if let Some(json) = to_json(entry, seen)? {
                    map.insert(key.clone(), json);
                }
            }
            seen.pop();
            Ok(Some(serde_json::Value::Object(map)))
        }
    }
}

/// Number rendering matching `String(n)` for everything snippets plausibly
/// produce: integers drop the decimal point, `-0` prints as `0`.
pub fn js_number_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if n == 0.0 {
        return "0".into();
    }
    if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_strings_match_js() {
        assert_eq!(js_number_string(1.0), "1");
        assert_eq!(js_number_string(1.5), "1.5");
        assert_eq!(js_number_string(-0.0), "0");
        assert_eq!(js_number_string(f64::NAN), "NaN");
        assert_eq!(js_number_string(1e20), "100000000000000000000");
    }

    #[test]
    fn display_string_flattens_arrays() {
        let value = Value::array(vec![
            Value::Number(1.0),
            Value::Null,
            Value::Str("two".into()),
        ]);
        assert_eq!(value.to_display_string(), "1,,two");
    }

    #[test]
    fn log_formatting_pretty_prints_objects() {
        let value = Value::object(vec![
            ("name".into(), Value::Str("Ada".into())),
            ("age".into(), Value::Number(36.0)),
        ]);
        let line = format_log_args(&[value]).unwrap();
        assert_eq!(line, "{\n  \"name\": \"Ada\",\n  \"age\": 36\n}");
    }

    #[test]
    fn log_formatting_joins_with_single_spaces() {
        let line = format_log_args(&[
            Value::Str("count:".into()),
            Value::Number(3.0),
            Value::Bool(true),
        ])
        .unwrap();
        assert_eq!(line, "count: 3 true");
    }

    #[test]
    fn circular_structures_fail_like_stringify() {
        let inner = Rc::new(RefCell::new(Vec::new()));
        let value = Value::Array(inner.clone());
        inner.borrow_mut().push(Value::Array(inner.clone()));

        let err = format_log_args(&[value]).unwrap_err();
        assert_eq!(err.message(), "Converting circular structure to JSON");
    }

    #[test]
    fn strict_equality_is_by_reference_for_objects() {
        let a = Value::object(vec![]);
        let b = Value::object(vec![]);
        assert!(!a.strict_equals(&b));
        assert!(a.strict_equals(&a.clone()));
        assert!(!Value::Number(f64::NAN).strict_equals(&Value::Number(f64::NAN)));
    }
}

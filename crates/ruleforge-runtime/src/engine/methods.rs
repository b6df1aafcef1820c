//! Built-in methods callable on values (`#name.length()`, `#tags.contains('x')`)

use super::operators::values_equal;
use crate::error::{Result, RuntimeError};
use ruleforge_core::{Value, ValueKind};

/// Invoke `method` on `target` with already evaluated arguments
pub(crate) fn call_method(target: &Value, method: &str, args: &[Value]) -> Result<Value> {
    // Available on every value
    if method == "equals" {
        let other = single_arg(method, args)?;
        return Ok(Value::Bool(values_equal(target, other)));
    }

    match target {
        Value::String(s) => call_string_method(s, method, args),
        Value::Array(items) => call_array_method(items, method, args),
        Value::Object(map) => match method {
            "size" | "length" => {
                no_args(method, args)?;
                Ok(Value::Number(map.len() as f64))
            }
            "isEmpty" => {
                no_args(method, args)?;
                Ok(Value::Bool(map.is_empty()))
            }
            "containsKey" | "contains" => {
                let key = string_arg(method, single_arg(method, args)?)?;
                Ok(Value::Bool(map.contains_key(key)))
            }
            _ => Err(unknown(method, target)),
        },
        Value::Null => Err(RuntimeError::TypeError(format!(
            "Method {}() cannot be called on null",
            method
        ))),
        _ => Err(unknown(method, target)),
    }
}

fn call_string_method(s: &str, method: &str, args: &[Value]) -> Result<Value> {
    match method {
        "length" | "size" => {
            no_args(method, args)?;
            Ok(Value::Number(s.chars().count() as f64))
        }
        "isEmpty" => {
            no_args(method, args)?;
            Ok(Value::Bool(s.is_empty()))
        }
        "contains" => {
            let needle = string_arg(method, single_arg(method, args)?)?;
            Ok(Value::Bool(s.contains(needle)))
        }
        "startsWith" => {
            let prefix = string_arg(method, single_arg(method, args)?)?;
            Ok(Value::Bool(s.starts_with(prefix)))
        }
        "endsWith" => {
            let suffix = string_arg(method, single_arg(method, args)?)?;
            Ok(Value::Bool(s.ends_with(suffix)))
        }
        "toUpperCase" => {
            no_args(method, args)?;
            Ok(Value::String(s.to_uppercase()))
        }
        "toLowerCase" => {
            no_args(method, args)?;
            Ok(Value::String(s.to_lowercase()))
        }
        "trim" => {
            no_args(method, args)?;
            Ok(Value::String(s.trim().to_string()))
        }
        "equalsIgnoreCase" => match single_arg(method, args)? {
            Value::String(other) => Ok(Value::Bool(s.to_lowercase() == other.to_lowercase())),
            _ => Ok(Value::Bool(false)),
        },
        "indexOf" => {
            let needle = string_arg(method, single_arg(method, args)?)?;
            let index = s
                .find(needle)
                .map(|byte| s[..byte].chars().count() as f64)
                .unwrap_or(-1.0);
            Ok(Value::Number(index))
        }
        "substring" => substring(s, args),
        _ => Err(RuntimeError::UnknownMethod {
            method: method.to_string(),
            target: ValueKind::String,
        }),
    }
}

fn call_array_method(items: &[Value], method: &str, args: &[Value]) -> Result<Value> {
    match method {
        "size" | "length" => {
            no_args(method, args)?;
            Ok(Value::Number(items.len() as f64))
        }
        "isEmpty" => {
            no_args(method, args)?;
            Ok(Value::Bool(items.is_empty()))
        }
        "contains" => {
            let needle = single_arg(method, args)?;
            Ok(Value::Bool(items.iter().any(|v| values_equal(v, needle))))
        }
        "indexOf" => {
            let needle = single_arg(method, args)?;
            let index = items
                .iter()
                .position(|v| values_equal(v, needle))
                .map(|i| i as f64)
                .unwrap_or(-1.0);
            Ok(Value::Number(index))
        }
        _ => Err(RuntimeError::UnknownMethod {
            method: method.to_string(),
            target: ValueKind::Array,
        }),
    }
}

/// `substring(begin)` or `substring(begin, end)`, character indexed
fn substring(s: &str, args: &[Value]) -> Result<Value> {
    let chars: Vec<char> = s.chars().collect();
    let (begin, end) = match args {
        [begin] => (index_arg(begin)?, chars.len()),
        [begin, end] => (index_arg(begin)?, index_arg(end)?),
        _ => {
            return Err(RuntimeError::InvalidOperation(format!(
                "substring() takes 1 or 2 arguments, got {}",
                args.len()
            )))
        }
    };

    if begin > end || end > chars.len() {
        return Err(RuntimeError::InvalidOperation(format!(
            "substring({}, {}) out of range for length {}",
            begin,
            end,
            chars.len()
        )));
    }

    Ok(Value::String(chars[begin..end].iter().collect()))
}

fn unknown(method: &str, target: &Value) -> RuntimeError {
    RuntimeError::UnknownMethod {
        method: method.to_string(),
        target: target.kind(),
    }
}

fn no_args(method: &str, args: &[Value]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(RuntimeError::InvalidOperation(format!(
            "{}() takes no arguments, got {}",
            method,
            args.len()
        )))
    }
}

fn single_arg<'a>(method: &str, args: &'a [Value]) -> Result<&'a Value> {
    match args {
        [arg] => Ok(arg),
        _ => Err(RuntimeError::InvalidOperation(format!(
            "{}() takes 1 argument, got {}",
            method,
            args.len()
        ))),
    }
}

fn string_arg<'a>(method: &str, arg: &'a Value) -> Result<&'a str> {
    arg.as_str().ok_or_else(|| {
        RuntimeError::TypeError(format!(
            "{}() expects a string argument, got {}",
            method,
            arg.kind()
        ))
    })
}

fn index_arg(arg: &Value) -> Result<usize> {
    match arg {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Ok(*n as usize),
        other => Err(RuntimeError::TypeError(format!(
            "expected a non-negative integer index, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Value {
        Value::from(text)
    }

    #[test]
    fn test_string_methods() {
        let name = s("  Alice ");
        assert_eq!(call_method(&name, "trim", &[]).unwrap(), s("Alice"));
        assert_eq!(call_method(&s("Alice"), "length", &[]).unwrap(), Value::Number(5.0));
        assert_eq!(call_method(&s("Alice"), "toUpperCase", &[]).unwrap(), s("ALICE"));
        assert_eq!(
            call_method(&s("Alice"), "startsWith", &[s("Al")]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            call_method(&s("Alice"), "equalsIgnoreCase", &[s("ALICE")]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            call_method(&s("Alice"), "indexOf", &[s("ice")]).unwrap(),
            Value::Number(2.0)
        );
    }

    #[test]
    fn test_substring() {
        let word = s("transform");
        assert_eq!(
            call_method(&word, "substring", &[Value::Number(5.0)]).unwrap(),
            s("form")
        );
        assert_eq!(
            call_method(&word, "substring", &[Value::Number(0.0), Value::Number(5.0)]).unwrap(),
            s("trans")
        );
        assert!(call_method(&word, "substring", &[Value::Number(20.0)]).is_err());
    }

    #[test]
    fn test_array_methods() {
        let tags = Value::Array(vec![s("vip"), s("eu")]);
        assert_eq!(call_method(&tags, "size", &[]).unwrap(), Value::Number(2.0));
        assert_eq!(call_method(&tags, "contains", &[s("eu")]).unwrap(), Value::Bool(true));
        assert_eq!(call_method(&tags, "isEmpty", &[]).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_equals_any_value() {
        assert_eq!(
            call_method(&Value::Number(1.0), "equals", &[Value::Number(1.0)]).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_unknown_method() {
        let result = call_method(&Value::Number(1.0), "length", &[]);
        assert!(matches!(
            result,
            Err(RuntimeError::UnknownMethod { target: ValueKind::Number, .. })
        ));
    }

    #[test]
    fn test_method_on_null() {
        assert!(matches!(
            call_method(&Value::Null, "length", &[]),
            Err(RuntimeError::TypeError(_))
        ));
    }
}

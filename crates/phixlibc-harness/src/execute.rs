//! Fixture execution: dispatch one case to `phixlibc-core`.
//!
//! Every function renders its result as a string so that cases compare with
//! a plain equality check against `expected_output`:
//!
//! | function | inputs | output |
//! |----------|--------|--------|
//! | `is_digit` | `c` | `true` / `false` |
//! | `to_upper`, `to_lower` | `c` | resulting byte, decimal |
//! | `digit_value` | `c` | value, or `none` for a strict non-digit |
//! | `int_to_decimal` | `value` | rendered text |
//! | `decimal_to_int` | `text` | parsed value |
//! | `unsigned_to_hex` | `value` | rendered text |
//! | `format` | `fmt`, `args` | emitted text, or `error:<message>` |
//! | `read_line` | `keys`, `capacity`, `echo` | line, plus `\|echo=<escaped>` with echo |
//! | `strtok` | `text`, `delims` | tokens joined with `\|` |
//!
//! A byte input `c` is a number or a one-character string. Byte-string inputs
//! are strings or arrays of numbers.

use std::collections::VecDeque;

use phixlibc_core::CompatLevel;
use phixlibc_core::ctype;
use phixlibc_core::stdio::{self, CARRIAGE_RETURN, CharSink, FormatArg, KeySource};
use phixlibc_core::stdlib::{self, NumBuf};
use phixlibc_core::string::Tokenizer;
use serde_json::Value;

use crate::error::HarnessError;

/// Functions [`execute_fixture_case`] knows how to run.
pub const SUPPORTED_FUNCTIONS: &[&str] = &[
    "is_digit",
    "to_upper",
    "to_lower",
    "digit_value",
    "int_to_decimal",
    "decimal_to_int",
    "unsigned_to_hex",
    "format",
    "read_line",
    "strtok",
];

/// Result of running one fixture case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Rendered result, compared against the expected output.
    pub output: String,
    /// Extra detail for reports (status codes, byte counts, buffer state).
    pub note: Option<String>,
}

impl Execution {
    fn plain(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            note: None,
        }
    }

    fn with_note(output: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            note: Some(note.into()),
        }
    }
}

/// Run `function` on `inputs` at compatibility level `level`.
pub fn execute_fixture_case(
    function: &str,
    inputs: &Value,
    level: CompatLevel,
) -> Result<Execution, HarnessError> {
    match function {
        "is_digit" => {
            let c = byte_input(function, inputs, "c")?;
            Ok(Execution::plain(ctype::is_digit(c).to_string()))
        }
        "to_upper" => {
            let c = byte_input(function, inputs, "c")?;
            Ok(Execution::plain(ctype::to_upper(c).to_string()))
        }
        "to_lower" => {
            let c = byte_input(function, inputs, "c")?;
            Ok(Execution::plain(ctype::to_lower(c).to_string()))
        }
        "digit_value" => {
            let c = byte_input(function, inputs, "c")?;
            let output = if level.reproduces_quirks() {
                ctype::digit_value(c).to_string()
            } else {
                ctype::checked_digit_value(c).map_or_else(|| "none".to_string(), |v| v.to_string())
            };
            Ok(Execution::plain(output))
        }
        "int_to_decimal" => {
            let value = int_input(function, inputs, "value")?;
            let value = i32::try_from(value)
                .map_err(|_| HarnessError::input(function, format!("{value} does not fit i32")))?;
            let mut num = NumBuf::new();
            Ok(Execution::plain(lossy(num.format_decimal(value))))
        }
        "decimal_to_int" => {
            let text = bytes_input(function, inputs, "text")?;
            let (value, status) = stdlib::decimal_to_int_status(&text, level);
            Ok(Execution::with_note(value.to_string(), format!("{status:?}")))
        }
        "unsigned_to_hex" => {
            let value = int_input(function, inputs, "value")?;
            let value = u32::try_from(value)
                .map_err(|_| HarnessError::input(function, format!("{value} does not fit u32")))?;
            let mut num = NumBuf::new();
            Ok(Execution::plain(lossy(num.format_hex(value, level))))
        }
        "format" => run_format(function, inputs, level),
        "read_line" => run_read_line(function, inputs),
        "strtok" => run_strtok(function, inputs),
        other => Err(HarnessError::UnsupportedFunction(other.to_string())),
    }
}

fn run_format(function: &str, inputs: &Value, level: CompatLevel) -> Result<Execution, HarnessError> {
    let fmt = bytes_input(function, inputs, "fmt")?;
    let args = match inputs.get("args") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| format_arg(function, item))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(HarnessError::input(function, "'args' must be an array")),
    };

    let mut out = Capture::default();
    match stdio::format(&mut out, &fmt, &args, level) {
        Ok(written) => Ok(Execution::with_note(lossy(&out.0), format!("{written} bytes"))),
        Err(err) => Ok(Execution::plain(format!("error:{err}"))),
    }
}

fn run_read_line(function: &str, inputs: &Value) -> Result<Execution, HarnessError> {
    let keys = bytes_input(function, inputs, "keys")?;
    let capacity = int_input(function, inputs, "capacity")?;
    let capacity = usize::try_from(capacity)
        .map_err(|_| HarnessError::input(function, "'capacity' must be non-negative"))?;
    let echo = inputs.get("echo").and_then(Value::as_bool).unwrap_or(false);

    let mut source = ScriptedKeys::new(&keys);
    let mut screen = Capture::default();
    let mut buf = vec![0u8; capacity];
    let line = match stdio::read_line(&mut source, &mut screen, &mut buf, echo) {
        Ok(len) => lossy(&buf[..len]),
        Err(err) => return Ok(Execution::plain(format!("error:{err}"))),
    };

    let mut output = line;
    if echo {
        output.push_str("|echo=");
        output.push_str(&screen.0.escape_ascii().to_string());
    }
    let note = if source.exhausted {
        Some("key script exhausted; line ended early".to_string())
    } else {
        None
    };
    Ok(Execution { output, note })
}

fn run_strtok(function: &str, inputs: &Value) -> Result<Execution, HarnessError> {
    let mut buf = bytes_input(function, inputs, "text")?;
    buf.push(0);
    let delims = bytes_input(function, inputs, "delims")?;

    let tokens: Vec<String> = Tokenizer::new(&mut buf).tokens(&delims).map(lossy).collect();
    Ok(Execution::with_note(
        tokens.join("|"),
        format!("buffer after scan: {}", buf.escape_ascii()),
    ))
}

/// Parse a `printf` argument given on the command line.
///
/// `i:<n>`, `u:<n>`, `c:<char>` and `s:<text>` pick the variant explicitly;
/// a bare integer is a signed integer and anything else a string.
pub fn parse_cli_arg(raw: &str) -> Result<FormatArg<'_>, HarnessError> {
    let bad = |message: String| HarnessError::input("printf", message);
    if let Some(n) = raw.strip_prefix("i:") {
        return n
            .parse()
            .map(FormatArg::Int)
            .map_err(|e| bad(format!("'{n}': {e}")));
    }
    if let Some(n) = raw.strip_prefix("u:") {
        return n
            .parse()
            .map(FormatArg::Unsigned)
            .map_err(|e| bad(format!("'{n}': {e}")));
    }
    if let Some(c) = raw.strip_prefix("c:") {
        return match c.as_bytes() {
            [b] => Ok(FormatArg::Char(*b)),
            _ => Err(bad(format!("'{c}' is not a single byte"))),
        };
    }
    if let Some(s) = raw.strip_prefix("s:") {
        return Ok(FormatArg::Str(s.as_bytes()));
    }
    Ok(raw
        .parse()
        .map_or(FormatArg::Str(raw.as_bytes()), FormatArg::Int))
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Capture(Vec<u8>);

impl CharSink for Capture {
    fn put_char(&mut self, c: u8) {
        self.0.push(c);
    }
}

/// Replays keystrokes; once the script runs out every poll yields a carriage
/// return so the line reader terminates.
struct ScriptedKeys {
    keys: VecDeque<u8>,
    exhausted: bool,
}

impl ScriptedKeys {
    fn new(keys: &[u8]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            exhausted: false,
        }
    }
}

impl KeySource for ScriptedKeys {
    fn raw_read_key(&mut self) -> i32 {
        match self.keys.pop_front() {
            // A scripted 0 is an empty poll.
            Some(k) => i32::from(k),
            None => {
                self.exhausted = true;
                i32::from(CARRIAGE_RETURN)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Input decoding
// ---------------------------------------------------------------------------

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn field<'v>(function: &str, inputs: &'v Value, key: &str) -> Result<&'v Value, HarnessError> {
    inputs
        .get(key)
        .ok_or_else(|| HarnessError::input(function, format!("missing input '{key}'")))
}

fn int_input(function: &str, inputs: &Value, key: &str) -> Result<i64, HarnessError> {
    field(function, inputs, key)?
        .as_i64()
        .ok_or_else(|| HarnessError::input(function, format!("'{key}' must be an integer")))
}

fn byte_value(function: &str, value: &Value) -> Result<u8, HarnessError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| HarnessError::input(function, format!("{n} is not a byte"))),
        Value::String(s) if s.len() == 1 => Ok(s.as_bytes()[0]),
        other => Err(HarnessError::input(function, format!("{other} is not a byte"))),
    }
}

fn byte_input(function: &str, inputs: &Value, key: &str) -> Result<u8, HarnessError> {
    byte_value(function, field(function, inputs, key)?)
}

fn bytes_input(function: &str, inputs: &Value, key: &str) -> Result<Vec<u8>, HarnessError> {
    match field(function, inputs, key)? {
        Value::String(s) => Ok(s.as_bytes().to_vec()),
        Value::Array(items) => items.iter().map(|v| byte_value(function, v)).collect(),
        _ => Err(HarnessError::input(
            function,
            format!("'{key}' must be a string or byte array"),
        )),
    }
}

fn format_arg<'v>(function: &str, value: &'v Value) -> Result<FormatArg<'v>, HarnessError> {
    let int = |v: &Value| {
        v.as_i64()
            .ok_or_else(|| HarnessError::input(function, format!("{v} is not an integer")))
    };
    match value {
        Value::Number(_) => {
            let n = int(value)?;
            i32::try_from(n)
                .map(FormatArg::Int)
                .map_err(|_| HarnessError::input(function, format!("{n} does not fit i32")))
        }
        Value::String(s) => Ok(FormatArg::Str(s.as_bytes())),
        Value::Object(map) if map.len() == 1 => {
            let (kind, inner) = map
                .iter()
                .next()
                .ok_or_else(|| HarnessError::input(function, "empty argument object"))?;
            match (kind.as_str(), inner) {
                ("str", Value::String(s)) => Ok(FormatArg::Str(s.as_bytes())),
                ("char", v) => byte_value(function, v).map(FormatArg::Char),
                ("int", v) => {
                    let n = int(v)?;
                    i32::try_from(n)
                        .map(FormatArg::Int)
                        .map_err(|_| HarnessError::input(function, format!("{n} does not fit i32")))
                }
                ("unsigned", v) => {
                    let n = int(v)?;
                    u32::try_from(n)
                        .map(FormatArg::Unsigned)
                        .map_err(|_| HarnessError::input(function, format!("{n} does not fit u32")))
                }
                _ => Err(HarnessError::input(
                    function,
                    format!("unknown argument {value}; expected int|char|str|unsigned"),
                )),
            }
        }
        other => Err(HarnessError::input(function, format!("unsupported argument {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(function: &str, inputs: Value, level: CompatLevel) -> String {
        execute_fixture_case(function, &inputs, level).unwrap().output
    }

    #[test]
    fn ctype_functions() {
        assert_eq!(run("is_digit", json!({"c": "7"}), CompatLevel::Strict), "true");
        assert_eq!(run("to_upper", json!({"c": 97}), CompatLevel::Strict), "65");
        assert_eq!(run("digit_value", json!({"c": "x"}), CompatLevel::Strict), "none");
        assert_eq!(run("digit_value", json!({"c": "x"}), CompatLevel::Reference), "120");
    }

    #[test]
    fn numeric_conversions_follow_level() {
        assert_eq!(run("unsigned_to_hex", json!({"value": 0}), CompatLevel::Strict), "0");
        assert_eq!(run("unsigned_to_hex", json!({"value": 0}), CompatLevel::Reference), "");
        assert_eq!(run("decimal_to_int", json!({"text": "-7"}), CompatLevel::Strict), "-7");
        let exec =
            execute_fixture_case("decimal_to_int", &json!({"text": "9x"}), CompatLevel::Strict)
                .unwrap();
        assert_eq!(exec.output, "0");
        assert_eq!(exec.note.as_deref(), Some("InvalidDigit"));
    }

    #[test]
    fn format_with_tagged_arguments() {
        let inputs = json!({"fmt": "%d-%s! %c %p", "args": [-7, "ok", {"char": "z"}, {"unsigned": 26}]});
        assert_eq!(run("format", inputs, CompatLevel::Strict), "-7-ok! z 0X1A");
    }

    #[test]
    fn format_reports_mismatch() {
        let inputs = json!({"fmt": "%s", "args": [5]});
        assert_eq!(
            run("format", inputs, CompatLevel::Strict),
            "error:conversion %s cannot format argument 0, a signed integer"
        );
    }

    #[test]
    fn read_line_with_echo() {
        let inputs = json!({"keys": [65, 66, 8, 67, 13], "capacity": 8, "echo": true});
        assert_eq!(run("read_line", inputs, CompatLevel::Strict), "AC|echo=AB\\x08C");
    }

    #[test]
    fn read_line_notes_exhausted_script() {
        let exec = execute_fixture_case(
            "read_line",
            &json!({"keys": "ab", "capacity": 8}),
            CompatLevel::Strict,
        )
        .unwrap();
        assert_eq!(exec.output, "ab");
        assert!(exec.note.is_some());
    }

    #[test]
    fn strtok_joins_tokens() {
        let exec = execute_fixture_case(
            "strtok",
            &json!({"text": "a, b,,c", "delims": " ,"}),
            CompatLevel::Strict,
        )
        .unwrap();
        assert_eq!(exec.output, "a|b|c");
        assert_eq!(exec.note.as_deref(), Some("buffer after scan: a\\x00 b\\x00,c\\x00"));
    }

    #[test]
    fn unsupported_function_is_an_error() {
        let err = execute_fixture_case("sprintf", &json!({}), CompatLevel::Strict).unwrap_err();
        assert!(matches!(err, HarnessError::UnsupportedFunction(name) if name == "sprintf"));
    }

    #[test]
    fn missing_input_is_reported() {
        let err = execute_fixture_case("is_digit", &json!({}), CompatLevel::Strict).unwrap_err();
        assert_eq!(err.to_string(), "is_digit: missing input 'c'");
    }

    #[test]
    fn cli_arguments() {
        assert_eq!(parse_cli_arg("-7").unwrap(), FormatArg::Int(-7));
        assert_eq!(parse_cli_arg("u:26").unwrap(), FormatArg::Unsigned(26));
        assert_eq!(parse_cli_arg("c:x").unwrap(), FormatArg::Char(b'x'));
        assert_eq!(parse_cli_arg("s:12").unwrap(), FormatArg::Str(b"12"));
        assert_eq!(parse_cli_arg("ok").unwrap(), FormatArg::Str(b"ok"));
        assert!(parse_cli_arg("c:xy").is_err());
        assert!(parse_cli_arg("i:nope").is_err());
    }
}

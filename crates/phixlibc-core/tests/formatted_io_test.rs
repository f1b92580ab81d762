use std::collections::VecDeque;

use phixlibc_core::CompatLevel;
use phixlibc_core::stdio::{
    BACKSPACE, CARRIAGE_RETURN, CharSink, FormatArg, KeySource, format, read_line,
};
use phixlibc_core::stdlib::{NumBuf, decimal_to_int, int_to_decimal, unsigned_to_hex};
use phixlibc_core::string::Tokenizer;

struct Keys(VecDeque<i32>);

impl Keys {
    fn typed(keys: &[u8]) -> Self {
        Self(keys.iter().map(|&k| i32::from(k)).collect())
    }
}

impl KeySource for Keys {
    fn raw_read_key(&mut self) -> i32 {
        self.0.pop_front().unwrap_or_else(|| panic!("read past end of key script"))
    }
}

#[derive(Default)]
struct Screen(Vec<u8>);

impl CharSink for Screen {
    fn put_char(&mut self, c: u8) {
        self.0.push(c);
    }
}

fn sample_values() -> impl Iterator<Item = i32> {
    let edges = [0, 1, -1, 9, 10, -10, 99, 100, i32::MAX, i32::MIN + 1, 1_000_000_000];
    let sweep = (i32::MIN + 1..=i32::MAX).step_by(7_919_113);
    edges.into_iter().chain(sweep)
}

#[test]
fn decimal_round_trip_except_minimum() {
    let mut buf = [0u8; 12];
    for v in sample_values() {
        let text = int_to_decimal(v, &mut buf).to_vec();
        assert_eq!(decimal_to_int(&text, CompatLevel::Strict), v, "value {v}");
    }
}

#[test]
fn zero_renderings() {
    let mut buf = [0u8; 12];
    assert_eq!(int_to_decimal(0, &mut buf), b"0");
    assert_eq!(unsigned_to_hex(0, CompatLevel::Reference, &mut buf), b"");
    // The fixed renderer prints a digit.
    assert_eq!(unsigned_to_hex(0, CompatLevel::Strict, &mut buf), b"0");
}

#[test]
fn hex_renderings() {
    let mut num = NumBuf::new();
    for level in [CompatLevel::Strict, CompatLevel::Reference] {
        assert_eq!(num.format_hex(255, level), b"FF");
        assert_eq!(num.format_hex(16, level), b"10");
    }
}

#[test]
fn read_line_backspace_scenario() {
    let mut keys = Keys::typed(&[b'A', b'B', BACKSPACE, b'C', CARRIAGE_RETURN]);
    let mut screen = Screen::default();
    let mut buf = [0u8; 8];
    let len = read_line(&mut keys, &mut screen, &mut buf, true).unwrap();
    assert_eq!(&buf[..=len], b"AC\0");
    assert_eq!(screen.0, [b'A', b'B', BACKSPACE, b'C']);
}

#[test]
fn read_line_capacity_scenario() {
    let mut keys = Keys::typed(b"XYZ");
    let mut buf = [0u8; 3];
    let len = read_line(&mut keys, &mut Screen::default(), &mut buf, false).unwrap();
    assert_eq!(len, 2);
    assert_eq!(&buf, b"XY\0");
}

#[test]
fn format_scenarios() {
    let mut screen = Screen::default();
    let n = format(
        &mut screen,
        b"%d-%s!",
        &[FormatArg::Int(-7), FormatArg::from("ok")],
        CompatLevel::Reference,
    )
    .unwrap();
    assert_eq!(screen.0, b"-7-ok!");
    assert_eq!(n, 6);

    let mut screen = Screen::default();
    format(&mut screen, b"%p", &[FormatArg::Int(26)], CompatLevel::Reference).unwrap();
    assert_eq!(screen.0, b"0X1A");
}

#[test]
fn tokenizer_scenario() {
    let mut buf = *b"a, b,,c\0";
    let mut scan = Tokenizer::new(&mut buf);
    assert_eq!(scan.next_token(b" ,"), Some(&b"a"[..]));
    assert_eq!(scan.next_token(b" ,"), Some(&b"b"[..]));
    assert_eq!(scan.next_token(b" ,"), Some(&b"c"[..]));
    assert_eq!(scan.next_token(b" ,"), None);
    // The delimiters that ended "a" and "b" are now terminators.
    assert_eq!(buf[1], 0);
    assert_eq!(buf[4], 0);
}

#[test]
fn new_scan_discards_previous_state() {
    let mut first = *b"one two three\0";
    let mut second = *b"x y\0";
    let mut scan = Tokenizer::new(&mut first);
    assert_eq!(scan.next_token(b" "), Some(&b"one"[..]));
    scan = Tokenizer::new(&mut second);
    assert_eq!(scan.next_token(b" "), Some(&b"x"[..]));
    assert_eq!(scan.next_token(b" "), Some(&b"y"[..]));
    assert_eq!(scan.next_token(b" "), None);
}

#![no_main]
use libfuzzer_sys::fuzz_target;
use phixlibc_core::CompatLevel;
use phixlibc_core::stdio::{CharSink, Conversion, FormatArg, FormatSegment, format, parse_format_string};

struct Collect(Vec<u8>);

impl CharSink for Collect {
    fn put_char(&mut self, c: u8) {
        self.0.push(c);
    }
}

// Input layout: [level byte][format bytes][0xFF][argument seed bytes].
fuzz_target!(|data: &[u8]| {
    let Some((&level, rest)) = data.split_first() else {
        return;
    };
    let level = if level & 1 == 0 {
        CompatLevel::Strict
    } else {
        CompatLevel::Reference
    };
    let (fmt, seed) = match rest.iter().position(|&b| b == 0xFF) {
        Some(i) => (&rest[..i], &rest[i + 1..]),
        None => (rest, &[][..]),
    };

    // Build one well-typed argument per conversion.
    let mut seeds = seed.iter().copied().cycle();
    let mut args = Vec::new();
    for segment in parse_format_string(fmt) {
        if let FormatSegment::Conversion(conv) = segment {
            let s = seeds.next().unwrap_or(0);
            args.push(match conv {
                Conversion::Decimal => FormatArg::Int(i32::from(s as i8).wrapping_mul(16_777_259)),
                Conversion::Char => FormatArg::Char(s),
                Conversion::Str => FormatArg::Str(&seed[..usize::from(s) % (seed.len() + 1)]),
                Conversion::Hex => FormatArg::Unsigned(u32::from(s).wrapping_mul(0x0101_0101)),
            });
        }
    }

    let mut out = Collect(Vec::new());
    let written = format(&mut out, fmt, &args, level).expect("well-typed arguments format");
    assert_eq!(written, out.0.len());

    // Dropping the last argument must fail before anything is emitted.
    if args.pop().is_some() {
        let mut short = Collect(Vec::new());
        assert!(format(&mut short, fmt, &args, level).is_err());
        assert!(short.0.is_empty());
    }
});

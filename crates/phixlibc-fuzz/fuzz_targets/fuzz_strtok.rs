#![no_main]
use libfuzzer_sys::fuzz_target;
use phixlibc_core::string::{Tokenizer, strtok_r};

// Input layout: [delimiter count][delimiters][text].
fuzz_target!(|data: &[u8]| {
    let Some((&n, rest)) = data.split_first() else {
        return;
    };
    let n = usize::from(n % 8).min(rest.len());
    let (delims, text) = rest.split_at(n);

    let mut scan_buf = text.to_vec();
    scan_buf.push(0);
    let mut index_buf = scan_buf.clone();

    let tokens: Vec<Vec<u8>> = Tokenizer::new(&mut scan_buf)
        .tokens(delims)
        .map(<[u8]>::to_vec)
        .collect();

    let mut save = 0;
    let mut indexed = Vec::new();
    while let Some((start, len, next)) = strtok_r(&mut index_buf, delims, save) {
        assert!(next > save);
        indexed.push(index_buf[start..start + len].to_vec());
        save = next;
    }

    assert_eq!(tokens, indexed);
    assert_eq!(scan_buf, index_buf);
    let live: Vec<u8> = delims.iter().copied().take_while(|&d| d != 0).collect();
    for token in &tokens {
        assert!(!token.is_empty());
        assert!(token.iter().all(|b| *b != 0 && !live.contains(b)));
    }
});

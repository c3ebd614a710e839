#![no_main]

use goinspect_parser::lexer::{Lexer, Tok};
use libfuzzer_sys::fuzz_target;

// Writing every injected `;` out explicitly, one space between tokens,
// must not change the token stream.
fuzz_target!(|data: &[u8]| {
    let Ok(src) = std::str::from_utf8(data) else {
        return;
    };

    let mut lx = Lexer::new(src);
    let toks: Vec<_> = lx.by_ref().collect();
    if !lx.take_diags().is_empty() {
        return;
    }

    let spelled: Vec<&str> = toks
        .iter()
        .map(|&(s, tok, e)| match tok {
            Tok::Semi if s == e => ";",
            _ => &src[s..e],
        })
        .collect();
    let spelled = spelled.join(" ");

    let again: Vec<Tok<'_>> = Lexer::new(&spelled).map(|(_, tok, _)| tok).collect();
    let before: Vec<Tok<'_>> = toks.iter().map(|&(_, tok, _)| tok).collect();
    assert_eq!(before, again, "{src:?} respelled as {spelled:?}");
});

use goinspect_parser::lexer::{Lexer, Tok};
use proptest::prelude::*;

/// Declaration lines that all end in a token allowing `;` insertion.
fn decl_line() -> impl Strategy<Value = String> {
    let name = "[A-Z][a-z0-9]{0,4}";
    let ty = prop_oneof![
        Just("int".to_string()),
        Just("[]byte".to_string()),
        Just("map[string]List[T]".to_string()),
        Just("func() (int, error)".to_string()),
        Just("<-chan struct{}".to_string()),
    ];
    prop_oneof![
        (name, ty.clone()).prop_map(|(n, t)| format!("type {n} {t}")),
        (name, ty.clone()).prop_map(|(n, t)| format!("var {n} {t}")),
        (name, 0u32..1000).prop_map(|(n, v)| format!("const {n} = {v}")),
        (name, ty).prop_map(|(n, t)| format!("func {n}(x {t}) {{ return }}")),
        name.prop_map(|n| format!("type {n} struct {{ ID int `json:\"id\"` }}")),
    ]
}

fn tokens(src: &str) -> Vec<Tok<'_>> {
    Lexer::new(src).map(|(_, tok, _)| tok).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn newlines_separate_declarations_like_semicolons(
        lines in prop::collection::vec(decl_line(), 1..6),
        crlf in any::<bool>(),
    ) {
        let eol = if crlf { "\r\n" } else { "\n" };
        let by_newline = format!("package p{eol}{}", lines.join(eol));
        let by_semi = format!("package p; {}", lines.join("; "));
        prop_assert_eq!(tokens(&by_newline), tokens(&by_semi));
    }

    #[test]
    fn spans_are_ordered_and_in_bounds(s in ".*") {
        let toks: Vec<_> = Lexer::new(&s).collect();
        prop_assert!(toks.len() <= s.len() + 1, "{} tokens for {s:?}", toks.len());

        let mut frontier = 0usize;
        for &(start, tok, end) in &toks {
            prop_assert!(start <= end && end <= s.len(), "({start},{end}) in {s:?}");
            prop_assert!(start >= frontier, "{tok:?} at {start} behind {frontier} in {s:?}");
            if let Some(text) = tok.text() {
                prop_assert_eq!(text, &s[start..end]);
            }
            frontier = end;
        }
    }
}

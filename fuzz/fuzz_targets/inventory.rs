#![no_main]

use goinspect::{declarations, project_fields, type_string, Declaration, Tag};
use goinspect_parser::parse_source;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let file = match parse_source(&s) {
        Ok(file) => file,
        Err(failure) => {
            assert!(!failure.diags.is_empty());
            for d in &failure.diags {
                assert!(d.span.start <= d.span.end && d.span.end as usize <= s.len());
            }
            return;
        }
    };

    for decl in declarations(&file) {
        let Declaration::Type { name, .. } = decl else {
            continue;
        };
        for field in project_fields(&file, &decl, name) {
            // Unsupported forms are an error, never a panic.
            let _ = type_string(&file.arena, field.type_expr);
            let tag = Tag::parse(&field.raw_tag);
            for (key, _) in tag.iter() {
                assert!(!key.is_empty());
            }
        }
    }
});

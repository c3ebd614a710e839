//! Struct tag micro-parser.
//!
//! A tag is a space-separated list of `key:"value"` entries, where the value
//! is a double-quoted Go string. Scanning stops silently at the first
//! structurally malformed entry; everything before it stays usable.

/// Parsed tag: ordered entries with their values unescaped.
///
/// An entry whose value has a bad escape is kept but has no value, so it
/// hides later entries with the same key and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    entries: Vec<(String, Option<String>)>,
}

impl Tag {
    /// Parse every well-formed entry up to the first malformed one.
    pub fn parse(raw: &str) -> Self {
        let entries = Entries::new(raw)
            .map(|(key, quoted)| (key.to_owned(), unquote(quoted)))
            .collect();
        Tag { entries }
    }

    /// Value of the leftmost entry named `key`, if it unescapes.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Entries whose values unescape, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .filter_map(|(k, v)| Some((k.as_str(), v.as_deref()?)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// `Tag::parse(raw).get(key)`, owned.
pub fn lookup(raw: &str, key: &str) -> Option<String> {
    Tag::parse(raw).get(key).map(str::to_owned)
}

/// Lazy scan over `key:"quoted value"` entries; values keep their quotes.
struct Entries<'a> {
    rest: &'a str,
}

impl<'a> Entries<'a> {
    fn new(raw: &'a str) -> Self {
        Self { rest: raw }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.rest.trim_start_matches(' ');
        let bytes = tag.as_bytes();

        // Key: no spaces, control bytes, colons or quotes.
        let key_len = bytes
            .iter()
            .position(|&b| b <= b' ' || b == b':' || b == b'"' || b == 0x7f)
            .unwrap_or(bytes.len());
        if key_len == 0
            || bytes.get(key_len) != Some(&b':')
            || bytes.get(key_len + 1) != Some(&b'"')
        {
            self.rest = "";
            return None;
        }

        let open = key_len + 1;
        let mut i = open + 1;
        while i < bytes.len() && bytes[i] != b'"' {
            if bytes[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= bytes.len() {
            self.rest = "";
            return None;
        }

        self.rest = &tag[i + 1..];
        Some((&tag[..key_len], &tag[open..=i]))
    }
}

/// Decode a double-quoted Go string literal, quotes included.
pub(crate) fn unquote(lit: &str) -> Option<String> {
    let body = lit.strip_prefix('"')?.strip_suffix('"')?;
    if !body.contains('\\') {
        if body.contains(['"', '\n']) {
            return None;
        }
        return Some(body.to_owned());
    }

    let bytes = body.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\n' => return None,
            b'\\' => {
                let esc = *bytes.get(i + 1)?;
                i += 2;
                match esc {
                    b'a' => out.push(0x07),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0c),
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'v' => out.push(0x0b),
                    b'\\' => out.push(b'\\'),
                    b'"' => out.push(b'"'),
                    b'0'..=b'7' => {
                        let digits = bytes.get(i - 1..i + 2)?;
                        if !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
                            return None;
                        }
                        let value = digits
                            .iter()
                            .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
                        out.push(u8::try_from(value).ok()?);
                        i += 2;
                    }
                    b'x' => {
                        let value = hex_value(bytes.get(i..i + 2)?)?;
                        out.push(u8::try_from(value).ok()?);
                        i += 2;
                    }
                    b'u' | b'U' => {
                        let width = if esc == b'u' { 4 } else { 8 };
                        let ch = char::from_u32(hex_value(bytes.get(i..i + width)?)?)?;
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                        i += width;
                    }
                    _ => return None,
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).ok()
}

fn hex_value(digits: &[u8]) -> Option<u32> {
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let text = std::str::from_utf8(digits).ok()?;
    u32::from_str_radix(text, 16).ok()
}

use crate::error::{Diag, LexError, LexErrorKind, Span};
use logos::{Lexer as LogosLexer, Logos};
use memchr::{memchr, memchr2, memchr3};
use std::ops::Range;

// =============================================================================
// 1. Manual scanners (comments, strings, numbers)
// =============================================================================

#[inline(always)]
fn first_newline_offset(s: &str) -> Option<usize> {
    memchr2(b'\n', b'\r', s.as_bytes())
}

#[inline]
fn lex_line_comment(lex: &mut LogosLexer<'_, RawTok>) {
    let rem = lex.remainder().as_bytes();
    let len = memchr2(b'\n', b'\r', rem).unwrap_or(rem.len());
    lex.bump(len);
}

#[inline]
fn lex_block_comment(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    let rem = lex.remainder().as_bytes();
    let mut search_start = 0;

    while let Some(star_pos) = memchr(b'*', &rem[search_start..]) {
        let abs_pos = search_start + star_pos;
        if rem.get(abs_pos + 1) == Some(&b'/') {
            lex.bump(abs_pos + 2);
            return Ok(());
        }
        search_start = abs_pos + 1;
    }

    lex.bump(rem.len());
    Err(LexErrorKind::UnterminatedComment)
}

/// Scans the body of a quoted literal after its opening `quote`.
///
/// Escapes are skipped, not validated: `\` always consumes the next byte.
/// A newline or end of input before the closing quote is an error.
#[inline]
fn scan_quoted(
    lex: &mut LogosLexer<'_, RawTok>,
    quote: u8,
    unterminated: LexErrorKind,
) -> Result<(), LexErrorKind> {
    let rem = lex.remainder().as_bytes();
    let mut i = 0;

    while let Some(off) = memchr3(quote, b'\\', b'\n', &rem[i..]) {
        let at = i + off;
        match rem[at] {
            b'\\' if at + 1 < rem.len() && rem[at + 1] != b'\n' => i = at + 2,
            b'\\' => {
                lex.bump(at + 1);
                return Err(unterminated);
            }
            b'\n' => {
                lex.bump(at);
                return Err(unterminated);
            }
            _ => {
                lex.bump(at + 1);
                return Ok(());
            }
        }
        if i >= rem.len() {
            break;
        }
    }

    lex.bump(rem.len());
    Err(unterminated)
}

fn lex_interpreted_string(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    scan_quoted(lex, b'"', LexErrorKind::UnterminatedString)
}

fn lex_rune(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    scan_quoted(lex, b'\'', LexErrorKind::UnterminatedRune)?;
    if lex.slice().len() <= 2 {
        return Err(LexErrorKind::InvalidToken);
    }
    Ok(())
}

fn lex_raw_string(lex: &mut LogosLexer<'_, RawTok>) -> Result<(), LexErrorKind> {
    let rem = lex.remainder().as_bytes();
    match memchr(b'`', rem) {
        Some(end) => {
            lex.bump(end + 1);
            Ok(())
        }
        None => {
            lex.bump(rem.len());
            Err(LexErrorKind::UnterminatedString)
        }
    }
}

/// Maximal munch over number-ish bytes, including signed exponents.
fn munch_number(b: &[u8]) -> usize {
    let hex = b.len() > 1 && b[0] == b'0' && matches!(b[1], b'x' | b'X');
    let mut i = 0;

    while i < b.len() {
        let c = b[i];
        let is_exp = if hex {
            matches!(c, b'p' | b'P')
        } else {
            matches!(c, b'e' | b'E')
        };
        if is_exp && matches!(b.get(i + 1), Some(b'+' | b'-')) {
            i += 2;
            continue;
        }
        if c.is_ascii_alphanumeric() || c == b'_' || c == b'.' {
            i += 1;
        } else {
            break;
        }
    }

    i
}

fn lex_number(lex: &mut LogosLexer<'_, RawTok>) {
    let start = lex.span().start;
    let end = munch_number(&lex.source().as_bytes()[start..]);
    let matched = lex.slice().len();
    if end > matched {
        lex.bump(end - matched);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumKind {
    Int,
    Float,
    Imag,
}

/// Go number literal classification (radix prefixes, `_` separators,
/// decimal `e` / hex `p` exponents, `i` suffix).
fn classify_number(text: &str) -> Result<NumKind, LexErrorKind> {
    let (body, imag) = match text.strip_suffix('i') {
        Some(body) => (body, true),
        None => (text, false),
    };
    let lower = body.to_ascii_lowercase();
    let (digits, radix) = if let Some(rest) = lower.strip_prefix("0x") {
        (rest, 16)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (rest, 2)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (rest, 8)
    } else {
        (lower.as_str(), 10)
    };

    let b = digits.as_bytes();
    let (mut seen_digit, mut seen_dot, mut seen_exp, mut exp_digits) = (false, false, false, false);
    let mut i = 0;

    while i < b.len() {
        let c = b[i];
        match c {
            b'_' => {}
            b'.' if !seen_dot && !seen_exp && (radix == 10 || radix == 16) => seen_dot = true,
            b'e' if radix == 10 && !seen_exp => {
                seen_exp = true;
                if matches!(b.get(i + 1), Some(b'+' | b'-')) {
                    i += 1;
                }
            }
            b'p' if radix == 16 && !seen_exp => {
                seen_exp = true;
                if matches!(b.get(i + 1), Some(b'+' | b'-')) {
                    i += 1;
                }
            }
            _ if seen_exp => {
                if !c.is_ascii_digit() {
                    return Err(LexErrorKind::InvalidNumber);
                }
                exp_digits = true;
            }
            _ if (c as char).is_digit(radix) => seen_digit = true,
            _ => return Err(LexErrorKind::InvalidNumber),
        }
        i += 1;
    }

    if !seen_digit || (seen_exp && !exp_digits) || (radix == 16 && seen_dot && !seen_exp) {
        return Err(LexErrorKind::InvalidNumber);
    }

    Ok(if imag {
        NumKind::Imag
    } else if seen_dot || seen_exp {
        NumKind::Float
    } else {
        NumKind::Int
    })
}

// =============================================================================
// 2. Raw token definition (Logos)
// =============================================================================

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t]+")]
#[rustfmt::skip]
enum RawTok {
    #[token("\u{FEFF}")] Bom,

    // Trivia
    #[regex(r"\r\n|\n|\r")] Newline,
    #[token("//", lex_line_comment)] LineComment,
    #[token("/*", lex_block_comment)] BlockComment,

    // Keywords
    #[token("break")] KwBreak,
    #[token("case")] KwCase,
    #[token("chan")] KwChan,
    #[token("const")] KwConst,
    #[token("continue")] KwContinue,
    #[token("default")] KwDefault,
    #[token("defer")] KwDefer,
    #[token("else")] KwElse,
    #[token("fallthrough")] KwFallthrough,
    #[token("for")] KwFor,
    #[token("func")] KwFunc,
    #[token("go")] KwGo,
    #[token("goto")] KwGoto,
    #[token("if")] KwIf,
    #[token("import")] KwImport,
    #[token("interface")] KwInterface,
    #[token("map")] KwMap,
    #[token("package")] KwPackage,
    #[token("range")] KwRange,
    #[token("return")] KwReturn,
    #[token("select")] KwSelect,
    #[token("struct")] KwStruct,
    #[token("switch")] KwSwitch,
    #[token("type")] KwType,
    #[token("var")] KwVar,

    // Identifiers & literals
    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")] Ident,
    #[regex(r"[0-9]", lex_number)]
    #[regex(r"\.[0-9]", lex_number)]
    Number,
    #[token("\"", lex_interpreted_string)] String,
    #[token("`", lex_raw_string)] RawString,
    #[token("'", lex_rune)] Rune,

    // Operators
    #[token("...")] Ellipsis,
    #[token("<<=")] ShlAssign,
    #[token(">>=")] ShrAssign,
    #[token("&^=")] AndNotAssign,
    #[token("+=")] AddAssign,
    #[token("-=")] SubAssign,
    #[token("*=")] MulAssign,
    #[token("/=")] DivAssign,
    #[token("%=")] ModAssign,
    #[token("&=")] AndAssign,
    #[token("|=")] OrAssign,
    #[token("^=")] XorAssign,
    #[token("<<")] Shl,
    #[token(">>")] Shr,
    #[token("&^")] AndNot,
    #[token("&&")] LAnd,
    #[token("||")] LOr,
    #[token("==")] EqEq,
    #[token("!=")] NotEq,
    #[token("<=")] Le,
    #[token(">=")] Ge,
    #[token("++")] Inc,
    #[token("--")] Dec,
    #[token(":=")] Define,
    #[token("<-")] Arrow,
    #[token("=")] Assign,
    #[token("+")] Plus,
    #[token("-")] Minus,
    #[token("*")] Star,
    #[token("/")] Slash,
    #[token("%")] Percent,
    #[token("&")] Amp,
    #[token("|")] Pipe,
    #[token("^")] Caret,
    #[token("~")] Tilde,
    #[token("!")] Bang,
    #[token("<")] Lt,
    #[token(">")] Gt,

    // Delimiters
    #[token("(")] LParen,
    #[token(")")] RParen,
    #[token("[")] LBrack,
    #[token("]")] RBrack,
    #[token("{")] LBrace,
    #[token("}")] RBrace,
    #[token(",")] Comma,
    #[token(";")] Semi,
    #[token(":")] Colon,
    #[token(".")] Dot,
}

impl RawTok {
    /// A newline after one of these tokens becomes a `;`.
    #[inline]
    const fn can_insert_semicolon(self) -> bool {
        matches!(
            self,
            RawTok::Ident
                | RawTok::Number
                | RawTok::Rune
                | RawTok::String
                | RawTok::RawString
                | RawTok::KwBreak
                | RawTok::KwContinue
                | RawTok::KwFallthrough
                | RawTok::KwReturn
                | RawTok::Inc
                | RawTok::Dec
                | RawTok::RParen
                | RawTok::RBrack
                | RawTok::RBrace
        )
    }

    fn to_token(self, slice: &str) -> Tok<'_> {
        match self {
            RawTok::Ident => Tok::Ident(slice),
            RawTok::String => Tok::StringLit(slice),
            RawTok::RawString => Tok::RawStringLit(slice),
            RawTok::Rune => Tok::RuneLit(slice),

            RawTok::KwBreak => Tok::KwBreak,
            RawTok::KwCase => Tok::KwCase,
            RawTok::KwChan => Tok::KwChan,
            RawTok::KwConst => Tok::KwConst,
            RawTok::KwContinue => Tok::KwContinue,
            RawTok::KwDefault => Tok::KwDefault,
            RawTok::KwDefer => Tok::KwDefer,
            RawTok::KwElse => Tok::KwElse,
            RawTok::KwFallthrough => Tok::KwFallthrough,
            RawTok::KwFor => Tok::KwFor,
            RawTok::KwFunc => Tok::KwFunc,
            RawTok::KwGo => Tok::KwGo,
            RawTok::KwGoto => Tok::KwGoto,
            RawTok::KwIf => Tok::KwIf,
            RawTok::KwImport => Tok::KwImport,
            RawTok::KwInterface => Tok::KwInterface,
            RawTok::KwMap => Tok::KwMap,
            RawTok::KwPackage => Tok::KwPackage,
            RawTok::KwRange => Tok::KwRange,
            RawTok::KwReturn => Tok::KwReturn,
            RawTok::KwSelect => Tok::KwSelect,
            RawTok::KwStruct => Tok::KwStruct,
            RawTok::KwSwitch => Tok::KwSwitch,
            RawTok::KwType => Tok::KwType,
            RawTok::KwVar => Tok::KwVar,

            RawTok::Ellipsis => Tok::Ellipsis,
            RawTok::ShlAssign => Tok::ShlAssign,
            RawTok::ShrAssign => Tok::ShrAssign,
            RawTok::AndNotAssign => Tok::AndNotAssign,
            RawTok::AddAssign => Tok::AddAssign,
            RawTok::SubAssign => Tok::SubAssign,
            RawTok::MulAssign => Tok::MulAssign,
            RawTok::DivAssign => Tok::DivAssign,
            RawTok::ModAssign => Tok::ModAssign,
            RawTok::AndAssign => Tok::AndAssign,
            RawTok::OrAssign => Tok::OrAssign,
            RawTok::XorAssign => Tok::XorAssign,
            RawTok::Shl => Tok::Shl,
            RawTok::Shr => Tok::Shr,
            RawTok::AndNot => Tok::AndNot,
            RawTok::LAnd => Tok::LAnd,
            RawTok::LOr => Tok::LOr,
            RawTok::EqEq => Tok::EqEq,
            RawTok::NotEq => Tok::NotEq,
            RawTok::Le => Tok::Le,
            RawTok::Ge => Tok::Ge,
            RawTok::Inc => Tok::Inc,
            RawTok::Dec => Tok::Dec,
            RawTok::Define => Tok::Define,
            RawTok::Arrow => Tok::Arrow,
            RawTok::Assign => Tok::Assign,
            RawTok::Plus => Tok::Plus,
            RawTok::Minus => Tok::Minus,
            RawTok::Star => Tok::Star,
            RawTok::Slash => Tok::Slash,
            RawTok::Percent => Tok::Percent,
            RawTok::Amp => Tok::Amp,
            RawTok::Pipe => Tok::Pipe,
            RawTok::Caret => Tok::Caret,
            RawTok::Tilde => Tok::Tilde,
            RawTok::Bang => Tok::Bang,
            RawTok::Lt => Tok::Lt,
            RawTok::Gt => Tok::Gt,

            RawTok::LParen => Tok::LParen,
            RawTok::RParen => Tok::RParen,
            RawTok::LBrack => Tok::LBrack,
            RawTok::RBrack => Tok::RBrack,
            RawTok::LBrace => Tok::LBrace,
            RawTok::RBrace => Tok::RBrace,
            RawTok::Comma => Tok::Comma,
            RawTok::Semi => Tok::Semi,
            RawTok::Colon => Tok::Colon,
            RawTok::Dot => Tok::Dot,

            // Numbers need classification and trivia never reaches here;
            // the wrapper handles both before calling `to_token`.
            RawTok::Number
            | RawTok::Bom
            | RawTok::Newline
            | RawTok::LineComment
            | RawTok::BlockComment => Tok::Error,
        }
    }
}

// =============================================================================
// 3. Public token definition (zero-copy)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tok<'input> {
    Ident(&'input str),
    IntLit(&'input str),
    FloatLit(&'input str),
    ImagLit(&'input str),
    RuneLit(&'input str),
    StringLit(&'input str),
    RawStringLit(&'input str),

    // Keywords
    KwBreak,
    KwCase,
    KwChan,
    KwConst,
    KwContinue,
    KwDefault,
    KwDefer,
    KwElse,
    KwFallthrough,
    KwFor,
    KwFunc,
    KwGo,
    KwGoto,
    KwIf,
    KwImport,
    KwInterface,
    KwMap,
    KwPackage,
    KwRange,
    KwReturn,
    KwSelect,
    KwStruct,
    KwSwitch,
    KwType,
    KwVar,

    // Operators / Delimiters
    Ellipsis,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    Shl,
    Shr,
    AndNot,
    LAnd,
    LOr,
    EqEq,
    NotEq,
    Le,
    Ge,
    Inc,
    Dec,
    Define,
    Arrow,
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Bang,
    Lt,
    Gt,
    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,
    Comma,
    Semi,
    Colon,
    Dot,

    Error,
}

impl<'input> Tok<'input> {
    /// Source text carried by literal and identifier tokens.
    pub fn text(&self) -> Option<&'input str> {
        match *self {
            Tok::Ident(s)
            | Tok::IntLit(s)
            | Tok::FloatLit(s)
            | Tok::ImagLit(s)
            | Tok::RuneLit(s)
            | Tok::StringLit(s)
            | Tok::RawStringLit(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tok<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(s) => write!(f, "{s:?}"),
            None => write!(f, "{self:?}"),
        }
    }
}

// =============================================================================
// 4. Lexer wrapper: semicolon insertion + number classification + diags
// =============================================================================

pub type Spanned<'src> = (usize, Tok<'src>, usize);

pub struct Lexer<'src> {
    logos: LogosLexer<'src, RawTok>,
    pending: Option<Spanned<'src>>,
    diags: Vec<Diag>,
    last_can_insert_semi: bool,
    src_len: usize,
    eof_done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src str) -> Self {
        Self {
            logos: RawTok::lexer(input),
            pending: None,
            diags: Vec::new(),
            last_can_insert_semi: false,
            src_len: input.len(),
            eof_done: false,
        }
    }

    pub fn take_diags(&mut self) -> Vec<Diag> {
        std::mem::take(&mut self.diags)
    }

    #[inline]
    fn push_lex_diag(&mut self, kind: LexErrorKind, span: Range<usize>) {
        let span = Span::from_range(span);
        self.diags.push(LexError { kind, span }.diag());
    }

    #[inline]
    fn error_token(&mut self, kind: LexErrorKind, span: Range<usize>) -> Spanned<'src> {
        self.push_lex_diag(kind, span.clone());
        self.last_can_insert_semi = false;
        (span.start, Tok::Error, span.end)
    }

    /// Returns `true` when the raw token was trivia (possibly queueing a `;`).
    #[inline]
    fn handle_trivia(&mut self, raw: RawTok, span: &Range<usize>, slice: &str) -> bool {
        match raw {
            RawTok::Newline => {
                if self.last_can_insert_semi {
                    self.last_can_insert_semi = false;
                    self.pending = Some((span.start, Tok::Semi, span.start));
                }
                true
            }
            RawTok::BlockComment => {
                if self.last_can_insert_semi {
                    if let Some(off) = first_newline_offset(slice) {
                        self.last_can_insert_semi = false;
                        let at = span.start + off;
                        self.pending = Some((at, Tok::Semi, at));
                    }
                }
                true
            }
            RawTok::LineComment => true,
            _ => false,
        }
    }

    fn number_token(&mut self, span: Range<usize>, slice: &'src str) -> Spanned<'src> {
        match classify_number(slice) {
            Ok(kind) => {
                self.last_can_insert_semi = true;
                let tok = match kind {
                    NumKind::Int => Tok::IntLit(slice),
                    NumKind::Float => Tok::FloatLit(slice),
                    NumKind::Imag => Tok::ImagLit(slice),
                };
                (span.start, tok, span.end)
            }
            Err(kind) => self.error_token(kind, span),
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Spanned<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(tok) = self.pending.take() {
                return Some(tok);
            }
            if self.eof_done {
                return None;
            }

            let raw = match self.logos.next() {
                None => {
                    // Flush a trailing `;` on the next turn of the loop.
                    self.eof_done = true;
                    if self.last_can_insert_semi {
                        self.last_can_insert_semi = false;
                        self.pending = Some((self.src_len, Tok::Semi, self.src_len));
                    }
                    continue;
                }
                Some(Err(kind)) => {
                    let span = self.logos.span();
                    return Some(self.error_token(kind, span));
                }
                Some(Ok(raw)) => raw,
            };

            let span = self.logos.span();
            let slice = self.logos.slice();

            if raw == RawTok::Bom {
                if span.start == 0 {
                    continue;
                }
                return Some(self.error_token(LexErrorKind::InvalidToken, span));
            }
            if self.handle_trivia(raw, &span, slice) {
                continue;
            }
            if raw == RawTok::Number {
                return Some(self.number_token(span, slice));
            }

            self.last_can_insert_semi = raw.can_insert_semicolon();
            return Some((span.start, raw.to_token(slice), span.end));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_go_number_forms() {
        assert_eq!(classify_number("42"), Ok(NumKind::Int));
        assert_eq!(classify_number("1_000"), Ok(NumKind::Int));
        assert_eq!(classify_number("0x1F"), Ok(NumKind::Int));
        assert_eq!(classify_number("0b1010"), Ok(NumKind::Int));
        assert_eq!(classify_number("0o17"), Ok(NumKind::Int));
        assert_eq!(classify_number("3.14"), Ok(NumKind::Float));
        assert_eq!(classify_number(".5"), Ok(NumKind::Float));
        assert_eq!(classify_number("1e-9"), Ok(NumKind::Float));
        assert_eq!(classify_number("0x1p-2"), Ok(NumKind::Float));
        assert_eq!(classify_number("2i"), Ok(NumKind::Imag));
        assert!(classify_number("0x1.8").is_err());
        assert!(classify_number("1e").is_err());
        assert!(classify_number("0b102").is_err());
        assert!(classify_number("12abc").is_err());
    }

    #[test]
    fn munch_keeps_signed_exponent() {
        assert_eq!(munch_number(b"1e+5)"), 4);
        assert_eq!(munch_number(b"0x1p-2;"), 6);
        assert_eq!(munch_number(b"1+2"), 1);
    }
}

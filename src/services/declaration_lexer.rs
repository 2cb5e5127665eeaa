// 宣言ファイル字句解析
//
// TypeScript の型宣言テキストをトークン列に変換します。
// コメントは読み飛ばし、各トークンに行番号と直前の改行有無を記録します。

use crate::core::error::DeclarationError;

/// トークンの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// 識別子・キーワード
    Ident(String),
    /// 文字列リテラル（クォートを除いた中身）
    Str(String),
    /// テンプレートリテラル（中身は保持しない）
    Template,
    /// 数値リテラル
    Number(String),
    /// 記号（`=>`, `...`, `?.` は1トークン、`>` は常に単独）
    Punct(&'static str),
}

/// トークン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1始まりの行番号
    pub line: usize,
    /// 直前に改行があったか
    pub newline_before: bool,
}

impl Token {
    /// 指定した識別子（キーワード）かどうか
    pub fn is_ident(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(name) if name == word)
    }

    /// 指定した記号かどうか
    pub fn is_punct(&self, punct: &str) -> bool {
        matches!(self.kind, TokenKind::Punct(p) if p == punct)
    }

    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }
}

const MULTI_CHAR_PUNCTS: [&str; 3] = ["...", "=>", "?."];

const SINGLE_CHAR_PUNCTS: [&str; 26] = [
    "{", "}", "(", ")", "[", "]", "<", ">", ";", ",", ":", "?", ".", "=", "|", "&", "*", "+",
    "-", "!", "@", "#", "/", "%", "^", "~",
];

/// 宣言テキストをトークン列に変換
pub fn tokenize(source: &str) -> Result<Vec<Token>, DeclarationError> {
    Lexer::new(source).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    newline_before: bool,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.trim_start_matches('\u{FEFF}').chars().collect(),
            pos: 0,
            line: 1,
            newline_before: true,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, DeclarationError> {
        while let Some(c) = self.peek(0) {
            match c {
                '\n' => {
                    self.line += 1;
                    self.newline_before = true;
                    self.pos += 1;
                }
                c if c.is_whitespace() => self.pos += 1,
                '/' if self.peek(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek(1) == Some('*') => self.skip_block_comment()?,
                '"' | '\'' => {
                    let line = self.line;
                    let value = self.read_string(c)?;
                    self.push(TokenKind::Str(value), line);
                }
                '`' => {
                    let line = self.line;
                    self.skip_template()?;
                    self.push(TokenKind::Template, line);
                }
                c if c.is_ascii_digit() => {
                    let line = self.line;
                    let value = self.read_number();
                    self.push(TokenKind::Number(value), line);
                }
                c if is_ident_start(c) => {
                    let line = self.line;
                    let value = self.read_ident();
                    self.push(TokenKind::Ident(value), line);
                }
                _ => {
                    let line = self.line;
                    let punct = self.read_punct().ok_or_else(|| {
                        DeclarationError::syntax_at(format!("Unexpected character '{}'", c), line)
                    })?;
                    self.push(TokenKind::Punct(punct), line);
                }
            }
        }
        Ok(self.tokens)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn push(&mut self, kind: TokenKind, line: usize) {
        self.tokens.push(Token {
            kind,
            line,
            newline_before: self.newline_before,
        });
        self.newline_before = false;
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), DeclarationError> {
        let start_line = self.line;
        self.pos += 2;
        loop {
            match self.peek(0) {
                Some('*') if self.peek(1) == Some('/') => {
                    self.pos += 2;
                    return Ok(());
                }
                Some('\n') => {
                    self.line += 1;
                    self.newline_before = true;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
                None => {
                    return Err(DeclarationError::syntax_at(
                        "Unterminated block comment",
                        start_line,
                    ))
                }
            }
        }
    }

    fn read_string(&mut self, quote: char) -> Result<String, DeclarationError> {
        let start_line = self.line;
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.peek(0) {
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok(value);
                }
                Some('\\') => {
                    if let Some(escaped) = self.peek(1) {
                        if escaped == '\n' {
                            self.line += 1;
                        }
                        value.push(escaped);
                    }
                    self.pos += 2;
                }
                Some('\n') | None => {
                    return Err(DeclarationError::syntax_at(
                        "Unterminated string literal",
                        start_line,
                    ))
                }
                Some(c) => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    /// テンプレートリテラルを読み飛ばす（`${ ... }` の入れ子に対応）
    fn skip_template(&mut self) -> Result<(), DeclarationError> {
        let start_line = self.line;
        self.pos += 1;
        // `${` の入れ子ごとに、内側の `{` の深さを積む
        let mut substitutions: Vec<usize> = Vec::new();
        loop {
            let Some(c) = self.peek(0) else {
                return Err(DeclarationError::syntax_at(
                    "Unterminated template literal",
                    start_line,
                ));
            };
            if c == '\n' {
                self.line += 1;
            }

            match substitutions.last_mut() {
                None => match c {
                    '`' => {
                        self.pos += 1;
                        return Ok(());
                    }
                    '\\' => {
                        if self.peek(1) == Some('\n') {
                            self.line += 1;
                        }
                        self.pos += 2;
                    }
                    '$' if self.peek(1) == Some('{') => {
                        substitutions.push(0);
                        self.pos += 2;
                    }
                    _ => self.pos += 1,
                },
                Some(depth) => match c {
                    '{' => {
                        *depth += 1;
                        self.pos += 1;
                    }
                    '}' if *depth == 0 => {
                        substitutions.pop();
                        self.pos += 1;
                    }
                    '}' => {
                        *depth -= 1;
                        self.pos += 1;
                    }
                    '"' | '\'' => {
                        self.read_string(c)?;
                    }
                    '`' => self.skip_template()?,
                    _ => self.pos += 1,
                },
            }
        }
    }

    fn read_number(&mut self) -> String {
        let mut value = String::new();
        while let Some(c) = self.peek(0) {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
                value.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        value
    }

    fn read_ident(&mut self) -> String {
        let mut value = String::new();
        while let Some(c) = self.peek(0) {
            if is_ident_part(c) {
                value.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        value
    }

    fn read_punct(&mut self) -> Option<&'static str> {
        for punct in MULTI_CHAR_PUNCTS {
            if punct.chars().enumerate().all(|(i, c)| self.peek(i) == Some(c)) {
                // `?.5` は `?` と数値
                if punct == "?." && self.peek(2).is_some_and(|c| c.is_ascii_digit()) {
                    continue;
                }
                self.pos += punct.chars().count();
                return Some(punct);
            }
        }
        let c = self.peek(0)?;
        let punct = SINGLE_CHAR_PUNCTS
            .iter()
            .find(|p| p.starts_with(c))
            .copied()?;
        self.pos += 1;
        Some(punct)
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_ident_part(c: char) -> bool {
    is_ident_start(c) || c.is_numeric() || c == '\u{200C}' || c == '\u{200D}'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_interface_header() {
        assert_eq!(
            kinds("interface A<T> extends B.C {"),
            vec![
                TokenKind::Ident("interface".to_string()),
                TokenKind::Ident("A".to_string()),
                TokenKind::Punct("<"),
                TokenKind::Ident("T".to_string()),
                TokenKind::Punct(">"),
                TokenKind::Ident("extends".to_string()),
                TokenKind::Ident("B".to_string()),
                TokenKind::Punct("."),
                TokenKind::Ident("C".to_string()),
                TokenKind::Punct("{"),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped_and_lines_counted() {
        let tokens = tokenize("// header\n/** doc\n * more\n */\nfoo: string;").unwrap();

        assert!(tokens[0].is_ident("foo"));
        assert_eq!(tokens[0].line, 5);
        assert!(tokens[0].newline_before);
        assert!(tokens[1].is_punct(":"));
        assert!(!tokens[1].newline_before);
    }

    #[test]
    fn test_nested_generics_close_separately() {
        let tokens = kinds("Array<Set<T>>");
        let closers = tokens
            .iter()
            .filter(|k| **k == TokenKind::Punct(">"))
            .count();
        assert_eq!(closers, 2);
    }

    #[test]
    fn test_strings_and_arrows() {
        assert_eq!(
            kinds(r#"'aria-label'?: "a\"b"; f: (...a) => void"#),
            vec![
                TokenKind::Str("aria-label".to_string()),
                TokenKind::Punct("?"),
                TokenKind::Punct(":"),
                TokenKind::Str("a\"b".to_string()),
                TokenKind::Punct(";"),
                TokenKind::Ident("f".to_string()),
                TokenKind::Punct(":"),
                TokenKind::Punct("("),
                TokenKind::Punct("..."),
                TokenKind::Ident("a".to_string()),
                TokenKind::Punct(")"),
                TokenKind::Punct("=>"),
                TokenKind::Ident("void".to_string()),
            ]
        );
    }

    #[test]
    fn test_template_literal_with_substitution() {
        let tokens = kinds("type T = `on${Capitalize<`x${'}'}`>}`; next");
        assert!(tokens.contains(&TokenKind::Template));
        assert_eq!(tokens.last(), Some(&TokenKind::Ident("next".to_string())));
    }

    #[test]
    fn test_escaped_newline_in_template_counts_line() {
        let tokens = tokenize("type T = `a\\\nb`;\nnext").unwrap();
        let next = tokens.last().unwrap();
        assert!(next.is_ident("next"));
        assert_eq!(next.line, 3);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let error = tokenize("a: 'oops\nb: string;").unwrap_err();
        assert!(error.is_syntax());
        assert_eq!(error.location().and_then(|l| l.line), Some(1));
    }

    #[test]
    fn test_unterminated_comment_is_error() {
        let error = tokenize("/* never closed").unwrap_err();
        assert!(error.to_string().contains("Unterminated block comment"));
    }
}

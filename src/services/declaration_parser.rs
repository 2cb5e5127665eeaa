// 宣言ファイルパーサーサービス
//
// 型宣言ファイル（.d.ts）の読み込みと構文解析を行うサービス。
// interface / namespace / module / global 宣言を宣言ツリーに変換し、
// それ以外の文は括弧の対応を追って読み飛ばします。

use crate::core::declaration::{
    DeclarationNode, HeritageRef, InterfaceDeclaration, Member, MemberKind, MemberName,
    ModuleDeclaration, ModuleName, SourceFile,
};
use crate::core::error::{DeclarationError, IoError};
use crate::services::declaration_lexer::{tokenize, Token, TokenKind};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// 宣言ファイルパーサーサービス
#[derive(Debug, Clone, Default)]
pub struct DeclarationParserService {}

impl DeclarationParserService {
    /// 新しいDeclarationParserServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// 宣言ファイルを読み込んで解析する
    ///
    /// # Errors
    ///
    /// - ファイルが存在しない場合
    /// - ファイルの読み込みに失敗した場合
    /// - 構文解析に失敗した場合
    pub fn parse_file(&self, file_path: &Path) -> Result<SourceFile> {
        if !file_path.exists() {
            return Err(IoError::FileNotFound {
                path: file_path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(file_path).map_err(|e| IoError::FileRead {
            path: file_path.display().to_string(),
            cause: e.to_string(),
        })?;

        let source = self
            .parse_source(file_path, &content)
            .with_context(|| format!("Failed to parse declaration file: {:?}", file_path))?;

        debug!(
            path = %file_path.display(),
            statements = source.statements.len(),
            "Parsed declaration file"
        );

        Ok(source)
    }

    /// 宣言テキストを解析する
    pub fn parse_source(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<SourceFile, DeclarationError> {
        let tokens = tokenize(content)?;
        let statements = Parser::new(tokens).parse_source_statements()?;
        Ok(SourceFile::new(path, statements))
    }
}

/// 文の開始とみなすキーワード（改行直後に現れた場合）
const STATEMENT_KEYWORDS: [&str; 15] = [
    "export",
    "declare",
    "interface",
    "type",
    "namespace",
    "module",
    "function",
    "class",
    "abstract",
    "const",
    "let",
    "var",
    "enum",
    "import",
    "global",
];

/// 直後に改行があっても型・式が続く記号
const CONTINUATION_PUNCTS: [&str; 9] = [":", "|", "&", "=>", ".", "?", "=", ",", "?."];

/// 直後に改行があっても型・式が続くキーワード
const CONTINUATION_KEYWORDS: [&str; 9] = [
    "extends", "keyof", "typeof", "infer", "is", "as", "readonly", "unique", "asserts",
];

/// 行頭に現れたとき前の行に続くトークン
const LEADING_CONTINUATIONS: [&str; 6] = ["|", "&", "=>", ".", "?", ":"];

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_punct(&self, punct: &str) -> bool {
        self.peek().is_some_and(|t| t.is_punct(punct))
    }

    fn at_ident(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_ident(word))
    }

    fn current_line(&self) -> usize {
        self.peek()
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn expect_punct(&mut self, punct: &str) -> Result<(), DeclarationError> {
        if self.at_punct(punct) {
            self.pos += 1;
            Ok(())
        } else {
            Err(DeclarationError::syntax_at(
                format!("Expected '{}'{}", punct, self.describe_current()),
                self.current_line(),
            ))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, DeclarationError> {
        match self.peek().and_then(Token::ident) {
            Some(name) => {
                let name = name.to_string();
                self.pos += 1;
                Ok(name)
            }
            None => Err(DeclarationError::syntax_at(
                format!("Expected {}{}", what, self.describe_current()),
                self.current_line(),
            )),
        }
    }

    fn describe_current(&self) -> String {
        match self.peek().map(|t| &t.kind) {
            None => ", found end of file".to_string(),
            Some(TokenKind::Ident(name)) => format!(", found '{}'", name),
            Some(TokenKind::Punct(p)) => format!(", found '{}'", p),
            Some(TokenKind::Str(s)) => format!(", found string \"{}\"", s),
            Some(TokenKind::Number(n)) => format!(", found number {}", n),
            Some(TokenKind::Template) => ", found template literal".to_string(),
        }
    }

    /// トップレベルの文を解析
    fn parse_source_statements(&mut self) -> Result<Vec<DeclarationNode>, DeclarationError> {
        let mut statements = Vec::new();
        while let Some(token) = self.peek() {
            if token.is_punct(";") {
                self.pos += 1;
                continue;
            }
            if token.is_punct("}") {
                return Err(DeclarationError::syntax_at(
                    "Unexpected '}' at top level",
                    token.line,
                ));
            }
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    /// `{` の直後からモジュール本体を解析し、対応する `}` を消費する
    fn parse_block_statements(
        &mut self,
        open_line: usize,
    ) -> Result<Vec<DeclarationNode>, DeclarationError> {
        let mut statements = Vec::new();
        loop {
            let Some(token) = self.peek() else {
                return Err(DeclarationError::syntax_at(
                    "Unterminated module block",
                    open_line,
                ));
            };
            if token.is_punct("}") {
                self.pos += 1;
                return Ok(statements);
            }
            if token.is_punct(";") {
                self.pos += 1;
                continue;
            }
            statements.push(self.parse_statement()?);
        }
    }

    fn parse_statement(&mut self) -> Result<DeclarationNode, DeclarationError> {
        // 修飾子を読み飛ばす
        while self.at_ident("export") || self.at_ident("declare") || self.at_ident("default") {
            self.pos += 1;
        }

        let next = self.peek_at(1).map(|t| t.kind.clone());
        if self.at_ident("interface") && matches!(next, Some(TokenKind::Ident(_))) {
            return self.parse_interface().map(DeclarationNode::Interface);
        }
        if self.at_ident("namespace") && matches!(next, Some(TokenKind::Ident(_))) {
            self.pos += 1;
            return self.parse_module();
        }
        if self.at_ident("module")
            && matches!(next, Some(TokenKind::Ident(_)) | Some(TokenKind::Str(_)))
        {
            self.pos += 1;
            return self.parse_module();
        }
        if self.at_ident("global") && matches!(next, Some(TokenKind::Punct("{"))) {
            self.pos += 1;
            let body = self.parse_module_body()?;
            return Ok(DeclarationNode::Module(ModuleDeclaration {
                name: ModuleName::Global,
                body,
            }));
        }

        self.skip_statement()?;
        Ok(DeclarationNode::Other)
    }

    fn parse_interface(&mut self) -> Result<InterfaceDeclaration, DeclarationError> {
        let line = self.current_line();
        self.pos += 1; // interface
        let mut declaration = InterfaceDeclaration::new(self.expect_ident("interface name")?);
        declaration.line = line;

        self.parse_interface_rest(&mut declaration)
            .map_err(|e| e.in_interface(&declaration.name))?;
        Ok(declaration)
    }

    /// 型パラメータ、extends 句、本体を解析する
    fn parse_interface_rest(
        &mut self,
        declaration: &mut InterfaceDeclaration,
    ) -> Result<(), DeclarationError> {
        if self.at_punct("<") {
            self.skip_balanced()?;
        }

        if self.at_ident("extends") {
            self.pos += 1;
            loop {
                declaration.heritage.push(self.parse_heritage_ref()?);
                if self.at_punct(",") {
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }

        self.expect_punct("{")?;
        declaration.members = self.parse_members(declaration.line)?;
        Ok(())
    }

    fn parse_heritage_ref(&mut self) -> Result<HeritageRef, DeclarationError> {
        let mut segments = vec![self.expect_ident("base interface name")?];
        while self.at_punct(".") {
            self.pos += 1;
            segments.push(self.expect_ident("qualified name segment")?);
        }
        if self.at_punct("<") {
            self.skip_balanced()?;
        }
        Ok(HeritageRef::new(segments))
    }

    /// `namespace` / `module` キーワードの直後から解析する
    fn parse_module(&mut self) -> Result<DeclarationNode, DeclarationError> {
        let mut names = Vec::new();
        match self.peek().map(|t| t.kind.clone()) {
            Some(TokenKind::Str(name)) => {
                self.pos += 1;
                names.push(ModuleName::StringLiteral(name));
            }
            _ => {
                names.push(ModuleName::Identifier(self.expect_ident("module name")?));
                while self.at_punct(".") {
                    self.pos += 1;
                    names.push(ModuleName::Identifier(self.expect_ident("module name")?));
                }
            }
        }

        let body = self.parse_module_body()?;
        // `namespace A.B {}` は A の本体に B を持つ入れ子として表現する
        let mut names = names.into_iter().rev();
        let Some(innermost) = names.next() else {
            return Err(DeclarationError::syntax_at(
                "Missing module name",
                self.current_line(),
            ));
        };
        let mut node = DeclarationNode::Module(ModuleDeclaration {
            name: innermost,
            body,
        });
        for name in names {
            node = DeclarationNode::Module(ModuleDeclaration {
                name,
                body: Some(Box::new(node)),
            });
        }
        Ok(node)
    }

    fn parse_module_body(&mut self) -> Result<Option<Box<DeclarationNode>>, DeclarationError> {
        if self.at_punct("{") {
            let open_line = self.current_line();
            self.pos += 1;
            let statements = self.parse_block_statements(open_line)?;
            return Ok(Some(Box::new(DeclarationNode::ModuleBlock(statements))));
        }
        // `declare module "foo";` の省略形
        if self.at_punct(";") {
            self.pos += 1;
        }
        Ok(None)
    }

    /// `{` の直後からメンバーを解析し、対応する `}` を消費する
    fn parse_members(&mut self, open_line: usize) -> Result<Vec<Member>, DeclarationError> {
        let mut members = Vec::new();
        loop {
            let Some(token) = self.peek() else {
                return Err(DeclarationError::syntax_at(
                    "Unterminated interface body",
                    open_line,
                ));
            };
            if token.is_punct("}") {
                self.pos += 1;
                return Ok(members);
            }
            if token.is_punct(";") || token.is_punct(",") {
                self.pos += 1;
                continue;
            }
            members.push(self.parse_member()?);
        }
    }

    fn parse_member(&mut self) -> Result<Member, DeclarationError> {
        let mut accessor = None;

        if self.at_ident("readonly") && self.next_starts_member_name() {
            self.pos += 1;
        }
        if (self.at_ident("get") || self.at_ident("set")) && self.next_starts_member_name() {
            accessor = Some(if self.at_ident("get") {
                MemberKind::GetAccessor
            } else {
                MemberKind::SetAccessor
            });
            self.pos += 1;
        }

        let line = self.current_line();
        let token = self.peek().cloned().ok_or_else(|| {
            DeclarationError::syntax_at("Unexpected end of interface body", line)
        })?;

        // 名前のないシグネチャ
        if accessor.is_none() {
            if token.is_punct("(") || token.is_punct("<") {
                self.skip_member_rest()?;
                return Ok(Member::signature(MemberKind::CallSignature));
            }
            if token.is_ident("new")
                && self
                    .peek_at(1)
                    .is_some_and(|t| t.is_punct("(") || t.is_punct("<"))
            {
                self.pos += 1;
                self.skip_member_rest()?;
                return Ok(Member::signature(MemberKind::ConstructSignature));
            }
            if token.is_punct("[") && self.is_index_signature() {
                self.skip_member_rest()?;
                return Ok(Member::signature(MemberKind::IndexSignature));
            }
        }

        let name = match &token.kind {
            TokenKind::Ident(name) => {
                self.pos += 1;
                MemberName::Identifier(name.clone())
            }
            TokenKind::Str(name) => {
                self.pos += 1;
                MemberName::StringLiteral(name.clone())
            }
            TokenKind::Number(value) => {
                self.pos += 1;
                MemberName::Numeric(value.clone())
            }
            TokenKind::Punct("[") => MemberName::Computed(self.read_computed_name()?),
            _ => {
                return Err(DeclarationError::syntax_at(
                    format!("Unexpected token in interface body{}", self.describe_current()),
                    line,
                ))
            }
        };

        if self.at_punct("?") || self.at_punct("!") {
            self.pos += 1;
        }

        let kind = match accessor {
            Some(kind) => kind,
            None if self.at_punct("(") || self.at_punct("<") => MemberKind::Method,
            None => MemberKind::Property,
        };

        self.skip_member_rest()?;

        Ok(Member::named(name, kind))
    }

    fn next_starts_member_name(&self) -> bool {
        matches!(
            self.peek_at(1).map(|t| &t.kind),
            Some(TokenKind::Ident(_))
                | Some(TokenKind::Str(_))
                | Some(TokenKind::Number(_))
                | Some(TokenKind::Punct("["))
        )
    }

    /// `[key: string]` 形式かどうか
    fn is_index_signature(&self) -> bool {
        matches!(self.peek_at(1).map(|t| &t.kind), Some(TokenKind::Ident(_)))
            && self.peek_at(2).is_some_and(|t| t.is_punct(":"))
    }

    /// `[Symbol.iterator]` の括弧内テキストを読む
    fn read_computed_name(&mut self) -> Result<String, DeclarationError> {
        let start = self.pos;
        self.skip_balanced()?;
        let text = self.tokens[start + 1..self.pos - 1]
            .iter()
            .map(|t| match &t.kind {
                TokenKind::Ident(s) | TokenKind::Number(s) => s.clone(),
                TokenKind::Str(s) => format!("\"{}\"", s),
                TokenKind::Punct(p) => p.to_string(),
                TokenKind::Template => "`…`".to_string(),
            })
            .collect::<String>();
        Ok(text)
    }

    /// 対応する閉じ括弧まで読み飛ばす（現在位置は開き括弧）
    fn skip_balanced(&mut self) -> Result<(), DeclarationError> {
        let open_line = self.current_line();
        let mut stack: Vec<&'static str> = Vec::new();
        loop {
            let Some(token) = self.advance() else {
                return Err(DeclarationError::syntax_at(
                    "Unbalanced brackets",
                    open_line,
                ));
            };
            let line = token.line;
            if let TokenKind::Punct(p) = token.kind {
                match p {
                    "(" | "[" | "{" | "<" => stack.push(p),
                    ")" | "]" | "}" | ">" => {
                        if p == ">" && stack.last() != Some(&"<") {
                            continue;
                        }
                        match stack.pop() {
                            Some(open) if closes(open, p) => {}
                            _ => {
                                return Err(DeclarationError::syntax_at(
                                    format!("Mismatched '{}'", p),
                                    line,
                                ))
                            }
                        }
                    }
                    _ => {}
                }
            }
            if stack.is_empty() {
                return Ok(());
            }
        }
    }

    /// メンバーの残り（型注釈やパラメータリスト）を読み飛ばす
    ///
    /// 終端の `;` / `,` / `}` は消費しない。
    fn skip_member_rest(&mut self) -> Result<(), DeclarationError> {
        let start = self.pos;
        while let Some(token) = self.peek() {
            if token.is_punct(";") || token.is_punct(",") || token.is_punct("}") {
                return Ok(());
            }
            if self.pos > start && token.newline_before && !self.continues_previous_line() {
                return Ok(());
            }
            match &token.kind {
                TokenKind::Punct("(" | "[" | "{" | "<") => self.skip_balanced()?,
                TokenKind::Punct(p @ (")" | "]" | ">")) => {
                    return Err(DeclarationError::syntax_at(
                        format!("Unexpected '{}' in interface body", p),
                        token.line,
                    ))
                }
                _ => self.pos += 1,
            }
        }
        Ok(())
    }

    /// interface / namespace 以外の文を読み飛ばす
    fn skip_statement(&mut self) -> Result<(), DeclarationError> {
        let start = self.pos;
        while let Some(token) = self.peek() {
            if token.is_punct(";") {
                self.pos += 1;
                return Ok(());
            }
            if token.is_punct("}") {
                // 外側のモジュール本体の終端
                return Ok(());
            }
            if self.pos > start
                && token.newline_before
                && !self.continues_previous_line()
                && token.ident().is_some_and(|w| STATEMENT_KEYWORDS.contains(&w))
            {
                return Ok(());
            }

            match &token.kind {
                TokenKind::Punct("{") => {
                    self.skip_balanced()?;
                    // クラス・列挙型などのブロックで文が終わる
                    match self.peek() {
                        Some(next) if next.is_punct(";") => {
                            self.pos += 1;
                            return Ok(());
                        }
                        Some(next)
                            if LEADING_CONTINUATIONS.iter().any(|p| next.is_punct(p))
                                || next.is_punct("[")
                                || next.is_punct(",") =>
                        {
                            continue
                        }
                        _ => return Ok(()),
                    }
                }
                TokenKind::Punct("(" | "[" | "<") => self.skip_balanced()?,
                TokenKind::Punct(p @ (")" | "]")) => {
                    return Err(DeclarationError::syntax_at(
                        format!("Unexpected '{}'", p),
                        token.line,
                    ))
                }
                _ => self.pos += 1,
            }
        }
        Ok(())
    }

    /// 現在のトークンが前の行の続きかどうか
    fn continues_previous_line(&self) -> bool {
        let previous = self.pos.checked_sub(1).and_then(|i| self.tokens.get(i));
        let previous_continues = previous.is_some_and(|t| match &t.kind {
            TokenKind::Punct(p) => CONTINUATION_PUNCTS.contains(p),
            TokenKind::Ident(w) => CONTINUATION_KEYWORDS.contains(&w.as_str()),
            _ => false,
        });
        let current_continues = self.peek().is_some_and(|t| match &t.kind {
            TokenKind::Punct(p) => LEADING_CONTINUATIONS.contains(p),
            TokenKind::Ident(w) => matches!(w.as_str(), "extends" | "is" | "as"),
            _ => false,
        });
        previous_continues || current_continues
    }
}

fn closes(open: &str, close: &str) -> bool {
    matches!(
        (open, close),
        ("(", ")") | ("[", "]") | ("{", "}") | ("<", ">")
    )
}

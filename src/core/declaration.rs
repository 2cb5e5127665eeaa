// 宣言ツリー
//
// 型宣言ファイルを解析した結果のノード表現と、汎用的な走査処理を提供します。
// 特定のパーサーのノード型には依存しません。

use std::ops::ControlFlow;
use std::path::PathBuf;

/// 解析済みの宣言ファイル
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// 読み込み元のパス
    pub path: PathBuf,
    /// トップレベルの文
    pub statements: Vec<DeclarationNode>,
}

impl SourceFile {
    /// 新しいSourceFileを作成
    pub fn new(path: impl Into<PathBuf>, statements: Vec<DeclarationNode>) -> Self {
        Self {
            path: path.into(),
            statements,
        }
    }

    /// エラーメッセージ用の表示名
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }

    /// すべてのノードを走査（ソース順）
    pub fn walk<'a, B, F>(&'a self, visitor: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&'a DeclarationNode, &[String]) -> ControlFlow<B>,
    {
        let mut scope = Vec::new();
        walk_nodes(&self.statements, &mut scope, visitor)
    }
}

/// 宣言ノード
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationNode {
    /// interface 宣言
    Interface(InterfaceDeclaration),
    /// namespace / module / global 宣言
    Module(ModuleDeclaration),
    /// モジュール本体（`{ ... }`）
    ModuleBlock(Vec<DeclarationNode>),
    /// それ以外の文（型エイリアス、関数、変数、クラスなど）
    Other,
}

/// interface 宣言
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDeclaration {
    pub name: String,
    /// extends 句
    pub heritage: Vec<HeritageRef>,
    pub members: Vec<Member>,
    /// 宣言開始行
    pub line: usize,
}

impl InterfaceDeclaration {
    /// 新しいInterfaceDeclarationを作成
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            heritage: Vec::new(),
            members: Vec::new(),
            line: 0,
        }
    }
}

/// extends 句の参照（型引数は保持しない）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeritageRef {
    /// 修飾名の各セグメント（`React.DOMAttributes` → ["React", "DOMAttributes"]）
    pub segments: Vec<String>,
}

impl HeritageRef {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// 単一識別子からHeritageRefを作成
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// ドット区切りの表示名
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

/// module / namespace 宣言
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDeclaration {
    pub name: ModuleName,
    /// 本体。`namespace A.B {}` では A の本体が B の Module ノードになる
    pub body: Option<Box<DeclarationNode>>,
}

/// モジュール名
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleName {
    /// `namespace React` / `module Foo`
    Identifier(String),
    /// `declare module "react"`
    StringLiteral(String),
    /// `declare global`
    Global,
}

impl ModuleName {
    /// スコープパスに積む名前。global の本体はトップレベルのスコープに属する
    pub fn scope_segment(&self) -> Option<&str> {
        match self {
            ModuleName::Identifier(name) | ModuleName::StringLiteral(name) => Some(name),
            ModuleName::Global => None,
        }
    }
}

/// interface のメンバー
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// シグネチャには名前がない
    pub name: Option<MemberName>,
    pub kind: MemberKind,
}

impl Member {
    /// 名前付きメンバーを作成
    pub fn named(name: MemberName, kind: MemberKind) -> Self {
        Self {
            name: Some(name),
            kind,
        }
    }

    /// 名前のないシグネチャを作成
    pub fn signature(kind: MemberKind) -> Self {
        Self {
            name: None,
            kind,
        }
    }

    /// 単純な識別子名を持つプロパティかどうか
    pub fn is_simple_property(&self) -> bool {
        self.kind == MemberKind::Property
            && matches!(self.name, Some(MemberName::Identifier(_)))
    }

    /// 解決済みプロパティ集合に含まれる名前（計算プロパティ名やシグネチャは除外）
    pub fn property_name(&self) -> Option<&str> {
        if !self.kind.is_property_like() {
            return None;
        }
        match &self.name {
            Some(MemberName::Identifier(name))
            | Some(MemberName::StringLiteral(name))
            | Some(MemberName::Numeric(name)) => Some(name),
            Some(MemberName::Computed(_)) | None => None,
        }
    }
}

/// メンバーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Property,
    Method,
    GetAccessor,
    SetAccessor,
    IndexSignature,
    CallSignature,
    ConstructSignature,
}

impl MemberKind {
    /// 型のプロパティとして現れる種類か
    pub fn is_property_like(&self) -> bool {
        matches!(
            self,
            MemberKind::Property
                | MemberKind::Method
                | MemberKind::GetAccessor
                | MemberKind::SetAccessor
        )
    }
}

/// メンバー名
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberName {
    Identifier(String),
    StringLiteral(String),
    Numeric(String),
    /// `[Symbol.iterator]` など。式のテキストを保持
    Computed(String),
}

fn walk_nodes<'a, B, F>(
    nodes: &'a [DeclarationNode],
    scope: &mut Vec<String>,
    visitor: &mut F,
) -> ControlFlow<B>
where
    F: FnMut(&'a DeclarationNode, &[String]) -> ControlFlow<B>,
{
    for node in nodes {
        walk_node(node, scope, visitor)?;
    }
    ControlFlow::Continue(())
}

fn walk_node<'a, B, F>(
    node: &'a DeclarationNode,
    scope: &mut Vec<String>,
    visitor: &mut F,
) -> ControlFlow<B>
where
    F: FnMut(&'a DeclarationNode, &[String]) -> ControlFlow<B>,
{
    visitor(node, scope)?;

    match node {
        DeclarationNode::Module(module) => {
            if let Some(body) = &module.body {
                let flow = match module.name.scope_segment() {
                    Some(segment) => {
                        scope.push(segment.to_string());
                        let flow = walk_node(body, scope, visitor);
                        scope.pop();
                        flow
                    }
                    None => {
                        let outer = std::mem::take(scope);
                        let flow = walk_node(body, scope, visitor);
                        *scope = outer;
                        flow
                    }
                };
                flow?;
            }
        }
        DeclarationNode::ModuleBlock(children) => {
            walk_nodes(children, scope, visitor)?;
        }
        DeclarationNode::Interface(_) | DeclarationNode::Other => {}
    }

    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(name: ModuleName, children: Vec<DeclarationNode>) -> DeclarationNode {
        DeclarationNode::Module(ModuleDeclaration {
            name,
            body: Some(Box::new(DeclarationNode::ModuleBlock(children))),
        })
    }

    fn interface(name: &str) -> DeclarationNode {
        DeclarationNode::Interface(InterfaceDeclaration::new(name))
    }

    #[test]
    fn test_walk_visits_nested_interfaces_with_scope() {
        let file = SourceFile::new(
            "test.d.ts",
            vec![
                interface("Top"),
                DeclarationNode::Other,
                module(
                    ModuleName::Identifier("React".to_string()),
                    vec![
                        interface("HTMLAttributes"),
                        module(ModuleName::Identifier("JSX".to_string()), vec![interface("Element")]),
                    ],
                ),
                module(ModuleName::Global, vec![interface("Window")]),
            ],
        );

        let mut seen = Vec::new();
        let flow: ControlFlow<()> = file.walk(&mut |node, scope| {
            if let DeclarationNode::Interface(decl) = node {
                seen.push(format!("{}{}", scope.iter().map(|s| format!("{}.", s)).collect::<String>(), decl.name));
            }
            ControlFlow::Continue(())
        });

        assert!(flow.is_continue());
        assert_eq!(
            seen,
            vec!["Top", "React.HTMLAttributes", "React.JSX.Element", "Window"]
        );
    }

    #[test]
    fn test_walk_global_inside_module_uses_top_level_scope() {
        let file = SourceFile::new(
            "test.d.ts",
            vec![module(
                ModuleName::StringLiteral("x".to_string()),
                vec![
                    module(ModuleName::Global, vec![interface("Window")]),
                    interface("Local"),
                ],
            )],
        );

        let mut seen = Vec::new();
        let _: ControlFlow<()> = file.walk(&mut |node, scope| {
            if let DeclarationNode::Interface(decl) = node {
                seen.push((scope.to_vec(), decl.name.clone()));
            }
            ControlFlow::Continue(())
        });

        assert_eq!(
            seen,
            vec![
                (Vec::<String>::new(), "Window".to_string()),
                (vec!["x".to_string()], "Local".to_string()),
            ]
        );
    }

    #[test]
    fn test_walk_stops_on_break() {
        let file = SourceFile::new("test.d.ts", vec![interface("A"), interface("B")]);

        let mut visited = 0;
        let flow = file.walk(&mut |node, _| {
            visited += 1;
            match node {
                DeclarationNode::Interface(decl) if decl.name == "A" => ControlFlow::Break(decl.name.clone()),
                _ => ControlFlow::Continue(()),
            }
        });

        assert_eq!(flow, ControlFlow::Break("A".to_string()));
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_member_property_name_filters_signatures() {
        let prop = Member::named(MemberName::Identifier("id".to_string()), MemberKind::Property);
        let method = Member::named(MemberName::Identifier("focus".to_string()), MemberKind::Method);
        let quoted = Member::named(MemberName::StringLiteral("aria-label".to_string()), MemberKind::Property);
        let computed = Member::named(MemberName::Computed("Symbol.iterator".to_string()), MemberKind::Method);
        let index = Member::signature(MemberKind::IndexSignature);

        assert!(prop.is_simple_property());
        assert!(!method.is_simple_property());
        assert!(!quoted.is_simple_property());

        assert_eq!(prop.property_name(), Some("id"));
        assert_eq!(method.property_name(), Some("focus"));
        assert_eq!(quoted.property_name(), Some("aria-label"));
        assert_eq!(computed.property_name(), None);
        assert_eq!(index.property_name(), None);
    }
}

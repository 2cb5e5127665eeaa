// 型解決サービス
//
// 同名 interface 宣言のマージと extends チェーンの解決を行い、
// 型から参照可能なすべてのプロパティ名を求めます。

use crate::core::declaration::{DeclarationNode, HeritageRef, InterfaceDeclaration, SourceFile};
use crate::core::property_set::NamedPropertySet;
use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;
use tracing::{debug, warn};

/// 修飾名（スコープ + interface 名）
pub type QualifiedName = Vec<String>;

/// 宣言ファイル単位の型解決器
#[derive(Debug)]
pub struct TypeResolver<'a> {
    /// 修飾名ごとの宣言（宣言マージのためソース順で複数保持）
    declarations: HashMap<QualifiedName, Vec<&'a InterfaceDeclaration>>,
}

impl<'a> TypeResolver<'a> {
    /// ファイル内のすべての interface 宣言を索引化する
    pub fn new(file: &'a SourceFile) -> Self {
        let mut declarations: HashMap<QualifiedName, Vec<&'a InterfaceDeclaration>> =
            HashMap::new();

        let _ = file.walk::<(), _>(&mut |node, scope| {
            if let DeclarationNode::Interface(declaration) = node {
                let mut qualified = scope.to_vec();
                qualified.push(declaration.name.clone());
                declarations.entry(qualified).or_default().push(declaration);
            }
            ControlFlow::Continue(())
        });

        debug!(
            path = %file.path.display(),
            interfaces = declarations.len(),
            "Indexed interface declarations"
        );

        Self { declarations }
    }

    /// 指定した修飾名の宣言数（宣言マージされた個数）
    pub fn declaration_count(&self, qualified: &[String]) -> usize {
        self.declarations.get(qualified).map_or(0, Vec::len)
    }

    /// 継承メンバーを含むすべてのプロパティ名を求める
    ///
    /// 自身の宣言（マージ済み）のメンバーを先に、続いて extends 先を宣言順に辿ります。
    /// 循環する extends は一度だけ辿ります。
    pub fn resolve_properties(&self, qualified: &[String]) -> NamedPropertySet {
        let mut properties = NamedPropertySet::new();
        let mut visited: HashSet<QualifiedName> = HashSet::new();
        self.collect(qualified, &mut properties, &mut visited);
        properties
    }

    fn collect(
        &self,
        qualified: &[String],
        properties: &mut NamedPropertySet,
        visited: &mut HashSet<QualifiedName>,
    ) {
        if !visited.insert(qualified.to_vec()) {
            return;
        }
        let Some(declarations) = self.declarations.get(qualified) else {
            return;
        };
        let scope = &qualified[..qualified.len().saturating_sub(1)];

        for declaration in declarations {
            for name in declaration.members.iter().filter_map(|m| m.property_name()) {
                properties.insert(name);
            }
        }

        for declaration in declarations {
            for heritage in &declaration.heritage {
                match self.lookup(scope, heritage) {
                    Some(base) => self.collect(&base, properties, visited),
                    None => warn!(
                        interface = %declaration.name,
                        line = declaration.line,
                        base = %heritage.dotted(),
                        "Unresolved base interface; its members are not included"
                    ),
                }
            }
        }
    }

    /// extends 句の名前を字句スコープで解決する
    ///
    /// 内側のスコープから順に外側へ探し、最後にグローバルスコープを探します。
    pub fn lookup(&self, scope: &[String], reference: &HeritageRef) -> Option<QualifiedName> {
        (0..=scope.len()).rev().find_map(|depth| {
            let mut candidate = scope[..depth].to_vec();
            candidate.extend(reference.segments.iter().cloned());
            self.declarations
                .contains_key(&candidate)
                .then_some(candidate)
        })
    }
}

// インターフェース検索サービス
//
// 宣言ツリーを再帰的に走査し、名前が完全一致する interface 宣言を探します。
// namespace / module の本体内に宣言されたものも同じ検索で見つかります。

use crate::core::declaration::{DeclarationNode, InterfaceDeclaration, Member, SourceFile};
use crate::core::error::DeclarationError;
use crate::core::property_set::NamedPropertySet;
use std::ops::ControlFlow;

/// 見つかった interface 宣言とその所属スコープ
#[derive(Debug, Clone)]
pub struct LocatedInterface<'a> {
    pub declaration: &'a InterfaceDeclaration,
    /// 外側の namespace / module 名（トップレベルなら空）
    pub scope: Vec<String>,
}

impl LocatedInterface<'_> {
    /// スコープを含む修飾名
    pub fn qualified_name(&self) -> Vec<String> {
        let mut qualified = self.scope.clone();
        qualified.push(self.declaration.name.clone());
        qualified
    }
}

/// 名前が完全一致する最初の interface 宣言を探す（ソース順）
///
/// # Errors
///
/// 見つからない場合は `DeclarationError::NotFound`
pub fn find_interface<'a>(
    file: &'a SourceFile,
    name: &str,
) -> Result<LocatedInterface<'a>, DeclarationError> {
    let flow = file.walk(&mut |node, scope| match node {
        DeclarationNode::Interface(declaration) if declaration.name == name => {
            ControlFlow::Break(LocatedInterface {
                declaration,
                scope: scope.to_vec(),
            })
        }
        _ => ControlFlow::Continue(()),
    });

    match flow {
        ControlFlow::Break(located) => Ok(located),
        ControlFlow::Continue(()) => Err(DeclarationError::not_found(name, file.display_name())),
    }
}

/// 単純な識別子名を持つプロパティメンバーの名前を集める（ソース順）
///
/// インデックスシグネチャ、呼び出しシグネチャ、メソッドは含みません。
pub fn declared_property_names(declaration: &InterfaceDeclaration) -> NamedPropertySet {
    declaration
        .members
        .iter()
        .filter(|member| member.is_simple_property())
        .filter_map(Member::property_name)
        .map(str::to_string)
        .collect()
}

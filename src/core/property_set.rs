// 名前付きプロパティ集合
//
// 挿入順を保持する重複なしの属性名集合。
// 計算時は順序を持たない集合として扱い、表示時のみソートします。

use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// 属性名（インターフェースの宣言メンバー名）
pub type AttributeName = String;

/// 大文字小文字を区別しない照合用の集合（表示には使わない）
pub type CaseInsensitiveLookup = HashSet<String>;

/// 名前付きプロパティ集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedPropertySet {
    order: Vec<AttributeName>,
    members: HashSet<AttributeName>,
}

impl NamedPropertySet {
    /// 空の集合を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 名前を追加。既に存在する場合は false
    pub fn insert(&mut self, name: impl Into<AttributeName>) -> bool {
        let name = name.into();
        if self.members.contains(&name) {
            return false;
        }
        self.members.insert(name.clone());
        self.order.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 挿入順で走査
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `self - other`（self の挿入順を保持）
    pub fn difference(&self, other: &NamedPropertySet) -> NamedPropertySet {
        self.iter()
            .filter(|name| !other.contains(name))
            .map(str::to_string)
            .collect()
    }

    /// 表示用にソートしたリスト
    pub fn sorted(&self) -> Vec<AttributeName> {
        let mut names = self.order.clone();
        names.sort();
        names
    }

    /// 小文字化した照合用集合を作成
    pub fn lowercase_lookup(&self) -> CaseInsensitiveLookup {
        self.order.iter().map(|name| name.to_lowercase()).collect()
    }

    /// 小文字化した名前が照合用集合に含まれるメンバーのみを残す（挿入順を保持）
    pub fn filter_case_insensitive(&self, lookup: &CaseInsensitiveLookup) -> NamedPropertySet {
        self.iter()
            .filter(|name| lookup.contains(&name.to_lowercase()))
            .map(str::to_string)
            .collect()
    }
}

impl FromIterator<AttributeName> for NamedPropertySet {
    fn from_iter<I: IntoIterator<Item = AttributeName>>(iter: I) -> Self {
        let mut set = NamedPropertySet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl Serialize for NamedPropertySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}

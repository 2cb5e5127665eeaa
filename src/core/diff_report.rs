// 差分レポート
//
// 属性集合の差分計算結果を表現します。JSONとして出力されます。

use crate::core::property_set::{AttributeName, NamedPropertySet};
use serde::Serialize;

/// 差分レポート
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffReport {
    /// 各集合のサイズ。detailモードの有無に依存しない
    pub counts: DiffCounts,
    /// onlyInA のうち基底エンティティのプロパティと一致するもの（診断用）
    pub element_props_target: NamedPropertySet,
    /// onlyInA のうち派生エンティティのプロパティと一致するもの
    pub svg_element_props_target: NamedPropertySet,
    /// detailモードの場合のみ出力
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DiffDetail>,
}

/// 集合サイズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffCounts {
    pub interface_a_props: usize,
    pub interface_b_props: usize,
    pub only_in_a: usize,
    pub base_entity_props: usize,
    pub derived_entity_props: usize,
    pub element_props_target: usize,
    pub svg_element_props_target: usize,
}

/// 中間集合のソート済みリスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffDetail {
    pub interface_a_props: Vec<AttributeName>,
    pub interface_b_props: Vec<AttributeName>,
    pub only_in_a: Vec<AttributeName>,
    pub base_entity_props: Vec<AttributeName>,
    pub derived_entity_props: Vec<AttributeName>,
}

/// 差分計算の中間集合
#[derive(Debug, Clone, Default)]
pub struct DiffSets {
    pub props_a: NamedPropertySet,
    pub props_b: NamedPropertySet,
    pub only_in_a: NamedPropertySet,
    pub base_props: NamedPropertySet,
    pub derived_props: NamedPropertySet,
    pub target_from_base: NamedPropertySet,
    pub target_from_derived: NamedPropertySet,
}

impl DiffSets {
    /// 集合サイズを集計
    pub fn counts(&self) -> DiffCounts {
        DiffCounts {
            interface_a_props: self.props_a.len(),
            interface_b_props: self.props_b.len(),
            only_in_a: self.only_in_a.len(),
            base_entity_props: self.base_props.len(),
            derived_entity_props: self.derived_props.len(),
            element_props_target: self.target_from_base.len(),
            svg_element_props_target: self.target_from_derived.len(),
        }
    }

    /// ソート済みの中間集合
    pub fn detail(&self) -> DiffDetail {
        DiffDetail {
            interface_a_props: self.props_a.sorted(),
            interface_b_props: self.props_b.sorted(),
            only_in_a: self.only_in_a.sorted(),
            base_entity_props: self.base_props.sorted(),
            derived_entity_props: self.derived_props.sorted(),
        }
    }

    /// レポートに変換
    pub fn into_report(self, detail: bool) -> DiffReport {
        let counts = self.counts();
        let detail = detail.then(|| self.detail());
        DiffReport {
            counts,
            element_props_target: self.target_from_base,
            svg_element_props_target: self.target_from_derived,
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sets() -> DiffSets {
        let names = |list: &[&str]| list.iter().map(|n| n.to_string()).collect::<NamedPropertySet>();
        DiffSets {
            props_a: names(&["slot", "autoFocus", "nonce"]),
            props_b: names(&["slot"]),
            only_in_a: names(&["autoFocus", "nonce"]),
            base_props: names(&["slot", "id"]),
            derived_props: names(&["nonce", "autofocus"]),
            target_from_base: names(&[]),
            target_from_derived: names(&["autoFocus", "nonce"]),
        }
    }

    #[test]
    fn test_report_json_shape() {
        let report = sample_sets().into_report(false);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["counts"]["interfaceAProps"], 3);
        assert_eq!(value["counts"]["onlyInA"], 2);
        assert_eq!(value["counts"]["svgElementPropsTarget"], 2);
        assert_eq!(value["svgElementPropsTarget"][0], "autoFocus");
        assert!(value["elementPropsTarget"].as_array().unwrap().is_empty());
        assert!(value.get("detail").is_none());
    }

    #[test]
    fn test_detail_is_additive() {
        let plain = sample_sets().into_report(false);
        let detailed = sample_sets().into_report(true);

        assert_eq!(plain.counts, detailed.counts);
        let detail = detailed.detail.unwrap();
        assert_eq!(detail.interface_a_props, vec!["autoFocus", "nonce", "slot"]);
        assert_eq!(detail.base_entity_props, vec!["id", "slot"]);
    }
}

// 属性集合差分サービス
//
// 2つの宣言ファイルから属性名集合を取り出し、差分と
// 大文字小文字を区別しない照合によって対象属性を求めます。

use crate::core::config::{DiffConfig, InterfaceNames};
use crate::core::declaration::SourceFile;
use crate::core::diff_report::{DiffReport, DiffSets};
use crate::core::property_set::NamedPropertySet;
use crate::services::declaration_parser::DeclarationParserService;
use crate::services::interface_locator::{declared_property_names, find_interface};
use crate::services::type_resolver::TypeResolver;
use anyhow::Result;
use tracing::{debug, info};

/// 属性集合差分サービス
#[derive(Debug, Clone, Default)]
pub struct AttributeDiffService {
    parser: DeclarationParserService,
}

impl AttributeDiffService {
    /// 新しいAttributeDiffServiceを作成
    pub fn new() -> Self {
        Self {
            parser: DeclarationParserService::new(),
        }
    }

    /// 設定に従って両ファイルを読み込み、差分レポートを作成する
    ///
    /// # Errors
    ///
    /// - 宣言ファイルが読み込めない場合
    /// - 宣言ファイルの構文解析に失敗した場合
    /// - 指定したインターフェースが見つからない場合
    pub fn run(&self, config: &DiffConfig) -> Result<DiffReport> {
        info!(
            attributes = %config.attributes_path.display(),
            entities = %config.entities_path.display(),
            "Loading declaration files"
        );

        let attributes = self.parser.parse_file(&config.attributes_path)?;
        let entities = self.parser.parse_file(&config.entities_path)?;

        let sets = self.compute(&attributes, &entities, &config.names)?;
        Ok(sets.into_report(config.detail))
    }

    /// 解析済みの宣言から中間集合をすべて計算する
    pub fn compute(
        &self,
        attributes: &SourceFile,
        entities: &SourceFile,
        names: &InterfaceNames,
    ) -> Result<DiffSets> {
        let props_a = declared_props(attributes, &names.interface_a)?;
        let props_b = declared_props(attributes, &names.interface_b)?;
        let only_in_a = props_a.difference(&props_b);
        debug!(
            interface_a = %names.interface_a,
            interface_b = %names.interface_b,
            props_a = props_a.len(),
            props_b = props_b.len(),
            only_in_a = only_in_a.len(),
            "Computed declared member difference"
        );

        let resolver = TypeResolver::new(entities);
        let base_props = resolved_props(entities, &resolver, &names.base_entity)?;
        let derived_props = resolved_props(entities, &resolver, &names.derived_entity)?;
        debug!(
            base_entity = %names.base_entity,
            derived_entity = %names.derived_entity,
            base_props = base_props.len(),
            derived_props = derived_props.len(),
            "Resolved entity properties"
        );

        let base_lookup = base_props.lowercase_lookup();
        let derived_lookup = derived_props.lowercase_lookup();
        let target_from_base = only_in_a.filter_case_insensitive(&base_lookup);
        let target_from_derived = only_in_a.filter_case_insensitive(&derived_lookup);
        debug!(
            element_props_target = target_from_base.len(),
            svg_element_props_target = target_from_derived.len(),
            "Matched attribute targets"
        );

        Ok(DiffSets {
            props_a,
            props_b,
            only_in_a,
            base_props,
            derived_props,
            target_from_base,
            target_from_derived,
        })
    }
}

fn declared_props(file: &SourceFile, name: &str) -> Result<NamedPropertySet> {
    let located = find_interface(file, name)?;
    debug!(
        interface = %located.qualified_name().join("."),
        line = located.declaration.line,
        "Located declared interface"
    );
    Ok(declared_property_names(located.declaration))
}

fn resolved_props(
    file: &SourceFile,
    resolver: &TypeResolver<'_>,
    name: &str,
) -> Result<NamedPropertySet> {
    let located = find_interface(file, name)?;
    let qualified = located.qualified_name();
    let props = resolver.resolve_properties(&qualified);
    debug!(
        interface = %qualified.join("."),
        declarations = resolver.declaration_count(&qualified),
        properties = props.len(),
        "Resolved interface"
    );
    Ok(props)
}

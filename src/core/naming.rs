// 命名ポリシー
//
// 設定ファイル名と既定値の単一ソースを提供します。

/// 既定の設定ファイル名
pub const CONFIG_FILE: &str = "propdiff.yaml";

/// 既定の属性宣言ファイル（InterfaceA / InterfaceB を含む）
pub const DEFAULT_ATTRIBUTES_PATH: &str = "node_modules/@types/react/index.d.ts";

/// 既定のエンティティ宣言ファイル（BaseEntity / DerivedEntity を含む）
pub const DEFAULT_ENTITIES_PATH: &str = "node_modules/typescript/lib/lib.dom.d.ts";

pub const DEFAULT_INTERFACE_A: &str = "HTMLAttributes";
pub const DEFAULT_INTERFACE_B: &str = "SVGAttributes";
pub const DEFAULT_BASE_ENTITY: &str = "Element";
pub const DEFAULT_DERIVED_ENTITY: &str = "SVGElement";

// テスト共通ヘルパー
//
// テスト全体で共有される宣言ファイルのフィクスチャとユーティリティを集約する。
// テストファイルから `mod common;` で利用可能。

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// React の型定義を模したフィクスチャ
pub const REACT_DECLARATIONS: &str = r#"// Type definitions for React (fixture)
/// <reference path="global.d.ts" />

export = React;
export as namespace React;

declare namespace React {
    type Booleanish = boolean | "true" | "false";
    type ReactNode = string | number | null | undefined;

    interface DOMAttributes<T> {
        children?: ReactNode | undefined;
        onClick?: ((event: MouseEvent) => void) | undefined;
    }

    interface AriaAttributes {
        /** Indicates whether the element is exposed to an accessibility API. */
        "aria-hidden"?: Booleanish | undefined;
    }

    interface HTMLAttributes<T> extends AriaAttributes, DOMAttributes<T> {
        // Standard HTML Attributes
        accessKey?: string | undefined;
        autoFocus?: boolean | undefined;
        className?: string | undefined;
        contentEditable?: Booleanish | "inherit" | undefined;
        hidden?: boolean | undefined;
        id?: string | undefined;
        nonce?: string | undefined;
        slot?: string | undefined;
        spellCheck?: Booleanish | undefined;
        style?: { [property: string]: string } | undefined;
        tabIndex?: number | undefined;
        title?: string | undefined;

        // Non-standard Attributes
        inputMode?:
            | "none"
            | "text"
            | undefined;
        is?: string | undefined;
    }

    interface SVGAttributes<T> extends AriaAttributes, DOMAttributes<T> {
        className?: string | undefined;
        color?: string | undefined;
        id?: string | undefined;
        lang?: string | undefined;
        tabIndex?: number | undefined;
        style?: { [property: string]: string } | undefined;
        [key: string]: unknown;
    }

    class Component<P, S> {
        constructor(props: P);
        render(): ReactNode;
    }
}
"#;

/// lib.dom.d.ts を模したフィクスチャ
pub const DOM_DECLARATIONS: &str = r#"/// <reference no-default-lib="true"/>

interface EventTarget {
    addEventListener(type: string, callback: EventListener | null): void;
}

interface Node extends EventTarget {
    readonly nodeName: string;
    textContent: string | null;
}

interface Slottable {
    readonly assignedSlot: HTMLSlotElement | null;
}

interface ARIAMixin {
    ariaHidden: string | null;
}

/** Element is the most general base class from which all objects in a Document inherit. */
interface Element extends Node, ARIAMixin, Slottable {
    readonly attributes: NamedNodeMap;
    className: string;
    id: string;
    readonly part: DOMTokenList;
    slot: string;
    getAttribute(qualifiedName: string): string | null;
}

declare var Element: {
    prototype: Element;
    new(): Element;
};

interface HTMLOrSVGElement {
    autofocus: boolean;
    readonly dataset: DOMStringMap;
    nonce?: string;
    tabIndex: number;
    blur(): void;
    focus(options?: FocusOptions): void;
}

interface ElementCSSInlineStyle {
    readonly style: CSSStyleDeclaration;
}

interface SVGElement extends Element, ElementCSSInlineStyle, HTMLOrSVGElement {
    /** @deprecated */
    readonly className: any;
    readonly ownerSVGElement: SVGSVGElement | null;
    readonly viewportElement: SVGElement | null;
}

declare var SVGElement: {
    prototype: SVGElement;
    new(): SVGElement;
};

interface HTMLElement extends Element, ElementCSSInlineStyle, HTMLOrSVGElement {
    accessKey: string;
    contentEditable: string;
    hidden: boolean;
    inputMode: string;
    spellcheck: boolean;
    title: string;
}
"#;

/// 既定パス（node_modules 配下）にフィクスチャを配置したプロジェクトを作成
#[allow(dead_code)]
pub fn setup_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_file(
        temp_dir.path(),
        "node_modules/@types/react/index.d.ts",
        REACT_DECLARATIONS,
    );
    write_file(
        temp_dir.path(),
        "node_modules/typescript/lib/lib.dom.d.ts",
        DOM_DECLARATIONS,
    );
    temp_dir
}

/// 親ディレクトリを作成してファイルを書き込む
#[allow(dead_code)]
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

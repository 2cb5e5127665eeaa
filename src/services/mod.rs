// Services Layer
// ドメインロジックを実行するサービス層

pub mod attribute_diff;
pub mod declaration_lexer;
pub mod declaration_parser;
pub mod interface_locator;
pub mod type_resolver;

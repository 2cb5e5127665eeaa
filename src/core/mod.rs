// Core Domain
// 宣言ツリー、属性集合、差分レポートなどの純粋なドメイン型

pub mod config;
pub mod declaration;
pub mod diff_report;
pub mod error;
pub mod naming;
pub mod property_set;

//! 覆盖选择器

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::module::permission::WILDCARD_TOKEN;

/// 覆盖选择器
///
/// 存在时完全替代角色默认权限的判断，不与之合并。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSelector", into = "RawSelector")]
pub enum OverrideSelector {
    /// 可见所有模块
    Wildcard,
    /// 仅可见列出的模块 (空集合表示不可见任何模块)
    Modules(BTreeSet<String>),
}

impl OverrideSelector {
    pub fn modules<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: BTreeSet<String> = ids.into_iter().map(Into::into).collect();
        if ids.contains(WILDCARD_TOKEN) {
            return OverrideSelector::Wildcard;
        }
        OverrideSelector::Modules(ids)
    }

    pub fn none() -> Self {
        OverrideSelector::Modules(BTreeSet::new())
    }

    pub fn allows(&self, module_id: &str) -> bool {
        match self {
            OverrideSelector::Wildcard => true,
            OverrideSelector::Modules(ids) => ids.contains(module_id),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, OverrideSelector::Wildcard)
    }

    fn from_text(text: &str) -> Self {
        if text.trim() == WILDCARD_TOKEN {
            return OverrideSelector::Wildcard;
        }
        OverrideSelector::modules(text.split(',').map(str::trim).filter(|id| !id.is_empty()))
    }
}

/// 解析管理端输入: `*` 或逗号分隔的模块 ID 列表
impl std::str::FromStr for OverrideSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OverrideSelector::from_text(s))
    }
}

impl std::fmt::Display for OverrideSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverrideSelector::Wildcard => f.write_str(WILDCARD_TOKEN),
            OverrideSelector::Modules(ids) => {
                let joined: Vec<&str> = ids.iter().map(String::as_str).collect();
                f.write_str(&joined.join(","))
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSelector {
    Token(String),
    List(Vec<String>),
}

impl From<RawSelector> for OverrideSelector {
    fn from(raw: RawSelector) -> Self {
        match raw {
            RawSelector::Token(token) => OverrideSelector::from_text(&token),
            RawSelector::List(ids) => OverrideSelector::modules(ids),
        }
    }
}

impl From<OverrideSelector> for RawSelector {
    fn from(selector: OverrideSelector) -> Self {
        match selector {
            OverrideSelector::Wildcard => RawSelector::Token(WILDCARD_TOKEN.to_string()),
            OverrideSelector::Modules(ids) => RawSelector::List(ids.into_iter().collect()),
        }
    }
}

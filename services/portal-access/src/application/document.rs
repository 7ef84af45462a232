//! 配置导入/导出文档

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use sig_common::IdentityId;

use crate::domain::{Module, OverrideSelector, PresentationSettings};
use crate::error::{AccessError, AccessResult};

/// 当前文档版本
pub const CURRENT_DOCUMENT_VERSION: u32 = 1;

/// 门户配置文档
///
/// `modules` 的顺序即导入后的注册顺序。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalConfigDocument {
    pub version: u32,
    pub modules: Vec<Module>,
    #[serde(default)]
    pub overrides: BTreeMap<String, OverrideSelector>,
    #[serde(default)]
    pub presentation_css: String,
    #[serde(default)]
    pub presentation_js: String,
}

/// 通过校验、可直接写入各存储的文档内容
#[derive(Debug, Clone)]
pub struct ValidatedDocument {
    pub modules: Vec<Module>,
    pub overrides: Vec<(IdentityId, OverrideSelector)>,
    pub presentation: PresentationSettings,
}

impl PortalConfigDocument {
    pub fn new(
        modules: Vec<Module>,
        overrides: BTreeMap<String, OverrideSelector>,
        presentation: PresentationSettings,
    ) -> Self {
        Self {
            version: CURRENT_DOCUMENT_VERSION,
            modules,
            overrides,
            presentation_css: presentation.css,
            presentation_js: presentation.js,
        }
    }

    pub fn from_json(raw: &str) -> AccessResult<Self> {
        let document: Self =
            serde_json::from_str(raw).map_err(|e| AccessError::InvalidDocument(e.to_string()))?;
        document.check_version()?;
        Ok(document)
    }

    pub fn to_json_pretty(&self) -> AccessResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AccessError::InvalidDocument(e.to_string()))
    }

    fn check_version(&self) -> AccessResult<()> {
        if self.version == 0 || self.version > CURRENT_DOCUMENT_VERSION {
            return Err(AccessError::UnsupportedDocumentVersion {
                found: self.version,
                supported: CURRENT_DOCUMENT_VERSION,
            });
        }
        Ok(())
    }

    /// 校验整个文档，任何问题都不会产生部分写入
    ///
    /// 覆盖规则的键按凭证规则归一化，归一化后冲突的键视为无效文档。
    pub fn validate(&self) -> AccessResult<ValidatedDocument> {
        self.check_version()?;

        let mut seen = HashSet::with_capacity(self.modules.len());
        for module in &self.modules {
            if !seen.insert(module.id.as_str()) {
                return Err(AccessError::DuplicateModuleId(module.id.clone()));
            }
        }

        let mut overrides: Vec<(IdentityId, OverrideSelector)> =
            Vec::with_capacity(self.overrides.len());
        for (raw_id, selector) in &self.overrides {
            let id = IdentityId::normalize(raw_id)?;
            if overrides.iter().any(|(existing, _)| existing == &id) {
                return Err(AccessError::InvalidDocument(format!(
                    "override key {:?} collides with another key after normalization",
                    raw_id
                )));
            }
            overrides.push((id, selector.clone()));
        }

        Ok(ValidatedDocument {
            modules: self.modules.clone(),
            overrides,
            presentation: PresentationSettings {
                css: self.presentation_css.clone(),
                js: self.presentation_js.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Permission;
    use sig_auth_core::Role;

    const SAMPLE: &str = r#"{
        "version": 1,
        "modules": [
            { "id": "home", "title": "Início", "group": "Geral", "icon": "🏠", "permissions": "*" },
            { "id": "iptu", "title": "Consulta IPTU", "group": "Tributos", "icon": "🏢",
              "permissions": ["CITIZEN", "STAFF_TAX", "MASTER"] }
        ],
        "overrides": { "12345678903": ["home"], "000.000.000-00": "*" },
        "presentationCss": ".sig-card { border: 0; }",
        "presentationJs": "console.log('hi')"
    }"#;

    #[test]
    fn test_parse_and_validate() {
        let doc = PortalConfigDocument::from_json(SAMPLE).unwrap();
        assert_eq!(doc.modules.len(), 2);
        assert_eq!(doc.modules[0].id, "home");
        assert!(doc.modules[1].permissions.permits(Role::StaffTax));

        let validated = doc.validate().unwrap();
        let keys: Vec<&str> = validated.overrides.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"00000000000"));
        assert!(keys.contains(&"12345678903"));
        assert_eq!(validated.presentation.js, "console.log('hi')");
    }

    #[test]
    fn test_optional_sections_default() {
        let doc = PortalConfigDocument::from_json(r#"{"version":1,"modules":[]}"#).unwrap();
        assert!(doc.overrides.is_empty());
        assert_eq!(doc.presentation_css, "");
    }

    #[test]
    fn test_rejects_future_version() {
        let err = PortalConfigDocument::from_json(r#"{"version":2,"modules":[]}"#).unwrap_err();
        assert!(matches!(
            err,
            AccessError::UnsupportedDocumentVersion { found: 2, supported: 1 }
        ));
    }

    #[test]
    fn test_rejects_empty_role_set() {
        let raw = r#"{"version":1,"modules":[
            {"id":"x","title":"X","group":"G","icon":"","permissions":[]}
        ]}"#;
        assert!(matches!(
            PortalConfigDocument::from_json(raw),
            Err(AccessError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let module = Module::new("home", "Início", "Geral", "🏠", Permission::Wildcard);
        let doc = PortalConfigDocument::new(
            vec![module.clone(), module],
            BTreeMap::new(),
            PresentationSettings::default(),
        );
        assert!(matches!(
            doc.validate(),
            Err(AccessError::DuplicateModuleId(ref id)) if id == "home"
        ));
    }

    #[test]
    fn test_validate_rejects_colliding_override_keys() {
        let mut overrides = BTreeMap::new();
        overrides.insert("123".to_string(), OverrideSelector::Wildcard);
        overrides.insert("1-2-3".to_string(), OverrideSelector::none());
        let doc = PortalConfigDocument::new(vec![], overrides, PresentationSettings::default());

        assert!(matches!(doc.validate(), Err(AccessError::InvalidDocument(_))));
    }

    #[test]
    fn test_validate_rejects_keys_without_digits() {
        let mut overrides = BTreeMap::new();
        overrides.insert("abc".to_string(), OverrideSelector::Wildcard);
        let doc = PortalConfigDocument::new(vec![], overrides, PresentationSettings::default());

        assert!(matches!(doc.validate(), Err(AccessError::InvalidIdentityId(_))));
    }

    #[test]
    fn test_json_uses_wire_field_names() {
        let doc = PortalConfigDocument::new(
            vec![Module::new("home", "Início", "Geral", "🏠", Permission::Wildcard)],
            BTreeMap::new(),
            PresentationSettings {
                css: "a{}".to_string(),
                js: String::new(),
            },
        );
        let json: serde_json::Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["presentationCss"], "a{}");
        assert_eq!(json["modules"][0]["permissions"], "*");
    }
}

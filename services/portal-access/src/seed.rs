//! 内置模块目录

use std::collections::{BTreeMap, BTreeSet};

use sig_auth_core::Role;

use crate::application::PortalConfigDocument;
use crate::domain::{Module, Permission, PresentationSettings};

fn roles<const N: usize>(roles: [Role; N]) -> Permission {
    Permission::Roles(BTreeSet::from(roles))
}

/// 门户默认模块，按展示顺序排列
pub fn default_modules() -> Vec<Module> {
    vec![
        Module::new("home", "Início", "Geral", "🏠", Permission::Wildcard).with_route("#/home"),
        Module::new(
            "iptu",
            "Consulta IPTU",
            "Tributos",
            "🏢",
            roles([Role::Citizen, Role::StaffTax, Role::Master]),
        )
        .with_route("#/tributos/iptu"),
        Module::new(
            "protocolos",
            "Protocolos",
            "Atendimento",
            "📄",
            roles([Role::StaffService, Role::Master]),
        )
        .with_route("#/protocolos"),
        Module::new(
            "rh",
            "Contracheque",
            "RH",
            "💵",
            roles([Role::StaffHr, Role::Master]),
        )
        .with_route("#/rh/contracheque"),
    ]
}

/// 只包含默认模块的配置文档
pub fn stock_document() -> PortalConfigDocument {
    PortalConfigDocument::new(
        default_modules(),
        BTreeMap::new(),
        PresentationSettings::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_document_is_valid() {
        let validated = stock_document().validate().unwrap();
        let ids: Vec<&str> = validated.modules.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["home", "iptu", "protocolos", "rh"]);
        assert!(validated.overrides.is_empty());
    }

    #[test]
    fn test_every_module_is_visible_to_master() {
        for module in default_modules() {
            assert!(module.permissions.permits(Role::Master), "{}", module.id);
            assert!(module.route.is_some());
        }
    }
}

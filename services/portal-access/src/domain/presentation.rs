//! 外观定制槽位
//!
//! CSS 与脚本文本按原样存取，不做解析、校验或执行。

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationSettings {
    pub css: String,
    pub js: String,
}

#[derive(Debug, Default)]
pub struct PresentationStore {
    settings: RwLock<PresentationSettings>,
}

impl PresentationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn css(&self) -> String {
        self.settings.read().css.clone()
    }

    pub fn js(&self) -> String {
        self.settings.read().js.clone()
    }

    pub fn set_css(&self, css: String) {
        self.settings.write().css = css;
    }

    pub fn set_js(&self, js: String) {
        self.settings.write().js = js;
    }

    pub fn snapshot(&self) -> PresentationSettings {
        self.settings.read().clone()
    }

    pub fn replace(&self, settings: PresentationSettings) {
        *self.settings.write() = settings;
    }
}

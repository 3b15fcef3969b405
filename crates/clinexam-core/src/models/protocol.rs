use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A bundle of recommended actions activated by a clinical pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Protocol {
    pub name: String,
    pub active: bool,
    pub severity_label: String,
    pub actions: Vec<String>,
    pub timeline: String,
}

impl Protocol {
    /// An inactive protocol carries only its name.
    pub fn inactive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: false,
            severity_label: String::new(),
            actions: Vec::new(),
            timeline: String::new(),
        }
    }
}

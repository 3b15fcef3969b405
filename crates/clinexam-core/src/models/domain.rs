use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Medical domain an examination section, scale or rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Domain {
    Gastroenterology,
    Hematology,
    Infectiology,
    Neurology,
    Rheumatology,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Gastroenterology,
        Domain::Hematology,
        Domain::Infectiology,
        Domain::Neurology,
        Domain::Rheumatology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Gastroenterology => "gastroenterology",
            Domain::Hematology => "hematology",
            Domain::Infectiology => "infectiology",
            Domain::Neurology => "neurology",
            Domain::Rheumatology => "rheumatology",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown domain: {s}"))
    }
}

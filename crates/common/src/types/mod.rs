use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// JSON body returned on request failures: `{"error": "..."}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

/// Acknowledgement body: `{"ok": true}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OkBody {
    pub ok: bool,
}

impl Default for OkBody {
    fn default() -> Self {
        Self { ok: true }
    }
}

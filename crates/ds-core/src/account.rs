use serde::{Deserialize, Serialize};

/// Server/user session the provisioning flow operates under.
///
/// 首次配置流程所使用的账户上下文。
///
/// Supplied at construction and never mutated by the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub server_url: String,
    pub email: String,
}

impl Account {
    pub fn new(server_url: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            email: email.into(),
        }
    }
}

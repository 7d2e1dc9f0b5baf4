use std::env;

/// Process-wide runtime configuration.
///
/// Read from the environment once at startup and passed into constructors;
/// never reloaded. Agent id and alias stay optional here so a misdeployed
/// process can still answer requests with a clear configuration error
/// instead of failing to boot.
#[derive(Clone, Debug)]
pub struct NoviConfig {
    /// Deployment region, informational for logs
    pub region: String,
    /// Agent resource id
    pub agent_id: Option<String>,
    /// Agent alias id
    pub agent_alias_id: Option<String>,
    /// Base URL of the agent runtime API
    pub agent_endpoint: String,
    /// PQR record store table name
    pub table_name: String,
}

impl NoviConfig {
    pub fn from_env() -> Self {
        Self {
            region: env::var("NOVI_REGION").unwrap_or_else(|_| "us-west-2".to_string()),
            agent_id: env::var("NOVI_AGENT_ID").ok().filter(|v| !v.is_empty()),
            agent_alias_id: env::var("NOVI_AGENT_ALIAS_ID")
                .ok()
                .filter(|v| !v.is_empty()),
            agent_endpoint: env::var("NOVI_AGENT_ENDPOINT")
                .unwrap_or_else(|_| "http://127.0.0.1:9400".to_string()),
            table_name: env::var("NOVI_PQR_TABLE").unwrap_or_else(|_| "novi-pqr-table".to_string()),
        }
    }

    /// Agent identity, present only when both halves are configured.
    pub fn agent_identity(&self) -> Option<(&str, &str)> {
        match (self.agent_id.as_deref(), self.agent_alias_id.as_deref()) {
            (Some(id), Some(alias)) => Some((id, alias)),
            _ => None,
        }
    }
}

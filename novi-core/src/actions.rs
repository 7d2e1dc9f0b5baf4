use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::pqr::{check_pqr, create_pqr, NewPqr, PqrError, PqrStore};

/// A tool-call event from the agent's action group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionInvocation {
    #[serde(default)]
    pub action_group: String,
    #[serde(default)]
    pub api_path: String,
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub parameters: Vec<ActionParameter>,
    #[serde(default)]
    pub request_body: Option<ActionRequestBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionParameter {
    pub name: String,
    pub value: String,
}

/// Request body nested as content -> {content-type -> properties}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequestBody {
    #[serde(default)]
    pub content: HashMap<String, ActionContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionContent {
    #[serde(default)]
    pub properties: Vec<ActionParameter>,
}

impl ActionInvocation {
    /// Flatten path/query parameters and body properties into one map.
    /// Body properties win on name collision.
    pub fn collect_parameters(&self) -> HashMap<String, String> {
        let mut params: HashMap<String, String> = self
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect();

        if let Some(body) = &self.request_body {
            for content in body.content.values() {
                for prop in &content.properties {
                    params.insert(prop.name.clone(), prop.value.clone());
                }
            }
        }

        params
    }
}

/// Reply wrapper the agent provider expects from an action-group call.
/// The outcome status is embedded; the transport answer is always 200.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub message_version: String,
    pub response: ActionResult,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    pub http_status_code: u16,
    pub response_body: HashMap<String, ActionBody>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionBody {
    pub body: String,
}

impl ActionResponse {
    fn new(invocation: &ActionInvocation, status: u16, body: &serde_json::Value) -> Self {
        let mut response_body = HashMap::new();
        response_body.insert(
            "application/json".to_string(),
            ActionBody {
                body: body.to_string(),
            },
        );
        Self {
            message_version: "1.0".to_string(),
            response: ActionResult {
                action_group: invocation.action_group.clone(),
                api_path: invocation.api_path.clone(),
                http_method: invocation.http_method.clone(),
                http_status_code: status,
                response_body,
            },
        }
    }
}

/// Route an action-group invocation to the matching PQR operation.
///
/// Validation problems and unknown operations come back as an error body
/// with embedded status 200, matching what the agent can interpret; only a
/// store fault embeds a 500. Nothing here ever fails the transport.
pub async fn dispatch(store: &dyn PqrStore, invocation: &ActionInvocation) -> ActionResponse {
    info!(
        "Action group call: {} {} ({})",
        invocation.http_method, invocation.api_path, invocation.action_group
    );

    let params = invocation.collect_parameters();

    let result = match (invocation.api_path.as_str(), invocation.http_method.as_str()) {
        ("/createPQR", "POST") => action_create(store, &params).await,
        ("/checkPQR", "POST") => action_check(store, &params).await,
        (path, method) => Ok(json!({
            "error": format!("unsupported operation: {method} {path}")
        })),
    };

    match result {
        Ok(body) => ActionResponse::new(invocation, 200, &body),
        Err(e) => {
            error!("Action group dispatch failed: {e}");
            ActionResponse::new(invocation, 500, &json!({ "error": e.to_string() }))
        }
    }
}

async fn action_create(
    store: &dyn PqrStore,
    params: &HashMap<String, String>,
) -> Result<serde_json::Value, PqrError> {
    // The action schema declares all four fields required.
    for field in ["customer_email", "description", "priority", "category"] {
        match params.get(field) {
            Some(value) if !value.is_empty() => {}
            _ => return Ok(json!({ "error": format!("required field missing: {field}") })),
        }
    }

    let new = NewPqr {
        customer_email: params["customer_email"].clone(),
        description: params["description"].clone(),
        priority: params.get("priority").cloned(),
        category: params.get("category").cloned(),
    };

    let record = create_pqr(store, new).await?;
    Ok(json!({
        "pqr_id": record.pqr_id,
        "status": record.status,
        "message": "PQR created",
    }))
}

async fn action_check(
    store: &dyn PqrStore,
    params: &HashMap<String, String>,
) -> Result<serde_json::Value, PqrError> {
    let pqr_id = match params.get("pqr_id") {
        Some(id) if !id.is_empty() => id,
        _ => return Ok(json!({ "error": "required field missing: pqr_id" })),
    };

    match check_pqr(store, pqr_id).await {
        Ok(record) => Ok(json!({
            "pqr_id": record.pqr_id,
            "customer_email": record.customer_email,
            "description": record.description,
            "status": record.status,
            "created_at": record.created_at,
        })),
        Err(PqrError::NotFound(_)) => Ok(json!({ "error": "PQR not found" })),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pqr::MemoryPqrStore;

    fn invocation(api_path: &str, props: &[(&str, &str)]) -> ActionInvocation {
        let mut content = HashMap::new();
        content.insert(
            "application/json".to_string(),
            ActionContent {
                properties: props
                    .iter()
                    .map(|(name, value)| ActionParameter {
                        name: name.to_string(),
                        value: value.to_string(),
                    })
                    .collect(),
            },
        );
        ActionInvocation {
            action_group: "pqr-actions".to_string(),
            api_path: api_path.to_string(),
            http_method: "POST".to_string(),
            parameters: vec![],
            request_body: Some(ActionRequestBody { content }),
        }
    }

    fn body_json(response: &ActionResponse) -> serde_json::Value {
        serde_json::from_str(&response.response.response_body["application/json"].body).unwrap()
    }

    #[test]
    fn body_properties_override_parameters() {
        let mut inv = invocation("/createPQR", &[("pqr_id", "from-body")]);
        inv.parameters.push(ActionParameter {
            name: "pqr_id".to_string(),
            value: "from-params".to_string(),
        });
        assert_eq!(inv.collect_parameters()["pqr_id"], "from-body");
    }

    #[tokio::test]
    async fn create_and_check_through_the_router() {
        let store = MemoryPqrStore::new();
        let create = invocation(
            "/createPQR",
            &[
                ("customer_email", "test@example.com"),
                ("description", "broken invoice"),
                ("priority", "HIGH"),
                ("category", "BILLING"),
            ],
        );
        let response = dispatch(&store, &create).await;
        assert_eq!(response.message_version, "1.0");
        assert_eq!(response.response.http_status_code, 200);
        let body = body_json(&response);
        let pqr_id = body["pqr_id"].as_str().unwrap().to_string();

        let check = invocation("/checkPQR", &[("pqr_id", &pqr_id)]);
        let response = dispatch(&store, &check).await;
        let body = body_json(&response);
        assert_eq!(body["customer_email"], "test@example.com");
        assert_eq!(body["status"], "CREATED");
    }

    #[tokio::test]
    async fn create_requires_all_four_fields() {
        let store = MemoryPqrStore::new();
        let create = invocation(
            "/createPQR",
            &[
                ("customer_email", "test@example.com"),
                ("description", "broken invoice"),
            ],
        );
        let body = body_json(&dispatch(&store, &create).await);
        assert_eq!(body["error"], "required field missing: priority");
    }

    #[tokio::test]
    async fn unsupported_operation_reports_method_and_path() {
        let store = MemoryPqrStore::new();
        let mut inv = invocation("/deletePQR", &[]);
        inv.http_method = "DELETE".to_string();
        let body = body_json(&dispatch(&store, &inv).await);
        assert_eq!(body["error"], "unsupported operation: DELETE /deletePQR");
    }

    #[tokio::test]
    async fn check_unknown_id_reports_not_found_in_body() {
        let store = MemoryPqrStore::new();
        let check = invocation("/checkPQR", &[("pqr_id", "nope")]);
        let response = dispatch(&store, &check).await;
        assert_eq!(response.response.http_status_code, 200);
        assert_eq!(body_json(&response)["error"], "PQR not found");
    }
}

//! MCP tool handlers for the contact manager.
//!
//! This module implements the contact tools using the rmcp SDK's
//! tool_router pattern. It is the transport collaborator around the core:
//! it decodes inbound payloads into the service input shapes and maps the
//! error taxonomy onto protocol error codes.

use crate::broadcast::ChangeBroadcaster;
use crate::domain::ContactId;
use crate::error::{ContactError, ContactResult};
use crate::models::SaveContactRequest;
use crate::repositories::ContactRepository;
use crate::services::{ContactServiceImpl, QueryServiceImpl};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

/// The MCP server that exposes the contact management tools.
#[derive(Clone)]
pub struct ContactManagerServer {
    contact_service: Arc<dyn crate::services::ContactService>,
    query_service: Arc<dyn crate::services::QueryService>,
    request_timeout: Duration,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for ContactManagerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "contact-manager-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Contact management server - create, edit, list, and delete contacts with their email and postal addresses. Connected clients receive a change signal after every successful mutation; re-fetch on receipt.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct ContactIdParams {
    contact_id: String,
}

/// Map the service error taxonomy onto MCP error codes: missing resource,
/// malformed input, and internal failure stay distinguishable for callers.
fn to_mcp_error(e: &ContactError) -> McpError {
    let code = match e {
        ContactError::NotFound(_) => ErrorCode::RESOURCE_NOT_FOUND,
        ContactError::Validation(_) => ErrorCode::INVALID_PARAMS,
        ContactError::Persistence(_) | ContactError::Timeout(_) => ErrorCode::INTERNAL_ERROR,
    };
    McpError {
        code,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_content<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

// Tool router implementation
#[tool_router]
impl ContactManagerServer {
    /// Create a new contact manager server.
    pub fn new(
        repository: Arc<dyn ContactRepository>,
        broadcaster: Arc<ChangeBroadcaster>,
        request_timeout: Duration,
    ) -> Self {
        let contact_service = Arc::new(ContactServiceImpl::new(repository.clone(), broadcaster))
            as Arc<dyn crate::services::ContactService>;
        let query_service =
            Arc::new(QueryServiceImpl::new(repository)) as Arc<dyn crate::services::QueryService>;

        Self {
            contact_service,
            query_service,
            request_timeout,
            tool_router: Self::tool_router(),
        }
    }

    /// Wrap a mutation in the caller-supplied deadline. On expiry nothing is
    /// assumed about whether the commit applied; the repository stays the
    /// source of truth and the caller should re-query.
    async fn bounded<T>(
        &self,
        operation: impl Future<Output = ContactResult<T>>,
    ) -> ContactResult<T> {
        match tokio::time::timeout(self.request_timeout, operation).await {
            Ok(result) => result,
            Err(_) => Err(ContactError::Timeout(self.request_timeout.as_secs())),
        }
    }

    fn parse_id(raw: &str) -> Result<ContactId, McpError> {
        ContactId::parse(raw).map_err(|e| McpError {
            code: ErrorCode::INVALID_PARAMS,
            message: Cow::from(e.to_string()),
            data: None,
        })
    }

    /// List all contacts ordered by first name.
    #[tool(
        description = "List all contacts ordered by first name, each with its email and postal addresses"
    )]
    async fn list_contacts(&self) -> Result<CallToolResult, McpError> {
        let contacts = self
            .query_service
            .list_contacts()
            .await
            .map_err(|e| to_mcp_error(&e))?;

        json_content(&serde_json::json!({
            "count": contacts.len(),
            "contacts": contacts,
        }))
    }

    /// Retrieve one contact by id.
    #[tool(description = "Retrieve one contact by id, with its email and postal addresses")]
    async fn get_contact(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = Self::parse_id(&params.0.contact_id)?;

        let contact = self
            .query_service
            .get_contact(&id)
            .await
            .map_err(|e| to_mcp_error(&e))?;

        json_content(&contact)
    }

    /// Create a new contact or update an existing one.
    #[tool(
        description = "Create a new contact (omit contact_id) or update an existing one. The submitted email and address lists replace the stored ones wholesale; submitting empty lists clears them."
    )]
    async fn save_contact(
        &self,
        params: Parameters<SaveContactRequest>,
    ) -> Result<CallToolResult, McpError> {
        let saved = self
            .bounded(self.contact_service.save_contact(params.0))
            .await
            .map_err(|e| {
                error!("save_contact failed: {}", e);
                to_mcp_error(&e)
            })?;

        json_content(&saved)
    }

    /// Delete a contact and everything it owns.
    #[tool(
        description = "Delete a contact together with all of its email and postal addresses"
    )]
    async fn delete_contact(
        &self,
        params: Parameters<ContactIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = Self::parse_id(&params.0.contact_id)?;

        self.bounded(self.contact_service.delete_contact(&id))
            .await
            .map_err(|e| {
                error!("delete_contact failed: {}", e);
                to_mcp_error(&e)
            })?;

        json_content(&serde_json::json!({ "deleted": id }))
    }
}

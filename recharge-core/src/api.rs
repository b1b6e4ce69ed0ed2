//! API gateway: builds requests against the configured base URL and
//! interprets replies into typed results.
//!
//! Every call is a single awaited request. The gateway never retries and never
//! caches; read fallbacks and write aborts are decided by the callers in
//! [`crate::storefront`].
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::constants::{PATH_HISTORY, PATH_LOGIN, PATH_PLANS, PATH_RECHARGE, PATH_REGISTER};
use crate::error::ApiError;
use crate::history::RechargeRecord;
use crate::numbers::de_lenient_text;
use crate::plan::{Plan, PlanDraft};
use crate::session::{CurrentUser, Role};
use crate::transport::{ApiRequest, HttpReply, HttpTransport, Method};
use crate::validation::{Credentials, Registration};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AckResponse {
    success: bool,
    #[serde(deserialize_with = "de_lenient_text")]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlansResponse {
    success: bool,
    #[serde(deserialize_with = "de_lenient_text")]
    message: String,
    plans: Option<Vec<Plan>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HistoryResponse {
    success: bool,
    #[serde(deserialize_with = "de_lenient_text")]
    message: String,
    history: Option<Vec<RechargeRecord>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RechargeResponse {
    success: Option<bool>,
    #[serde(deserialize_with = "de_lenient_text")]
    message: String,
}

/// User block of a login reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginUser {
    #[serde(rename = "_id", alias = "id", deserialize_with = "de_lenient_text")]
    pub id: String,
    #[serde(deserialize_with = "de_lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "de_lenient_text")]
    pub email: String,
    pub role: Option<String>,
}

/// Successful login reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(deserialize_with = "de_lenient_text")]
    pub message: String,
    pub token: Option<String>,
    pub role: Option<String>,
    pub user: Option<LoginUser>,
}

impl LoginResponse {
    /// Role from the top-level field, then the user block, then `user`.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .or_else(|| {
                self.user
                    .as_ref()
                    .and_then(|u| u.role.as_deref())
                    .filter(|r| !r.trim().is_empty())
            })
            .map_or(Role::User, Role::parse)
    }

    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.user.as_ref().map(|u| CurrentUser {
            id: u.id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.as_deref().map_or(Role::User, Role::parse),
        })
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    user_type: &'a str,
}

/// Plan snapshot sent with a recharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetails {
    pub mock_api_id: String,
    pub validity: String,
    pub data: String,
    pub call: String,
    #[serde(rename = "type")]
    pub category: Option<String>,
}

/// Body of `POST /api/recharge`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Catalog plans are not server documents, so no plan reference is sent.
    pub plan_id: Option<String>,
    pub phone_number: String,
    pub operator: String,
    pub amount: i64,
    pub plan_details: PlanDetails,
}

impl RechargeRequest {
    #[must_use]
    pub fn for_plan(
        plan: &Plan,
        user_id: Option<&str>,
        phone_number: &str,
        default_operator: &str,
    ) -> Self {
        Self {
            user_id: user_id.map(ToString::to_string),
            plan_id: None,
            phone_number: phone_number.to_string(),
            operator: plan.operator_or(default_operator).to_string(),
            amount: plan.price,
            plan_details: PlanDetails {
                mock_api_id: plan.id.clone(),
                validity: plan.validity.clone(),
                data: plan.data.clone(),
                call: plan.call.clone(),
                category: plan.category.clone(),
            },
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|err| ApiError::Malformed(err.to_string()))
}

fn parse_body<T: DeserializeOwned>(reply: &HttpReply) -> Result<T, ApiError> {
    serde_json::from_str(&reply.body).map_err(|err| ApiError::Malformed(err.to_string()))
}

fn first_message(candidates: [&str; 2], fallback: &str) -> String {
    candidates
        .into_iter()
        .find(|m| !m.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Typed client for the remote storefront API.
#[derive(Debug, Clone)]
pub struct ApiClient<T: HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl<T: HttpTransport> ApiClient<T> {
    pub const fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> ApiRequest {
        ApiRequest::new(method, self.config.endpoint(path)).bearer(token)
    }

    async fn send(&self, request: ApiRequest) -> Result<HttpReply, ApiError> {
        log::debug!("{} {}", request.method, request.url);
        self.transport
            .send(request)
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))
    }

    /// Interpret a `{ success, message }` acknowledgement.
    fn ack(reply: &HttpReply, fallback: &str) -> Result<String, ApiError> {
        let body: AckResponse = parse_body(reply).unwrap_or_default();
        if reply.ok() && body.success {
            return Ok(body.message);
        }
        if reply.ok() {
            Err(ApiError::Rejected(first_message([body.message.as_str(), ""], fallback)))
        } else {
            Err(ApiError::Status {
                status: reply.status,
                message: first_message([body.message.as_str(), reply.status_text.as_str()], fallback),
            })
        }
    }

    /// `GET /api/plans`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success statuses, an unreadable body
    /// or a `success: false` reply. A reply without a `plans` array is an
    /// empty catalog.
    pub async fn list_plans(&self) -> Result<Vec<Plan>, ApiError> {
        let reply = self.send(self.request(Method::Get, PATH_PLANS, None)).await?;
        if !reply.ok() {
            return Err(ApiError::Status {
                status: reply.status,
                message: first_message([reply.status_text.as_str(), ""], "Failed to load plans"),
            });
        }
        let body: PlansResponse = parse_body(&reply)?;
        if !body.success {
            return Err(ApiError::Rejected(first_message(
                [body.message.as_str(), ""],
                "Failed to load plans",
            )));
        }
        Ok(body.plans.unwrap_or_default())
    }

    /// `POST /api/plans`. Returns the server message.
    ///
    /// # Errors
    ///
    /// Fails unless the server acknowledges with `success: true`.
    pub async fn create_plan(&self, token: Option<&str>, draft: &PlanDraft) -> Result<String, ApiError> {
        let request = self
            .request(Method::Post, PATH_PLANS, token)
            .json_body(to_json(draft)?);
        let reply = self.send(request).await?;
        Self::ack(&reply, "Failed to add plan")
    }

    /// `PUT /api/plans/{id}`.
    ///
    /// # Errors
    ///
    /// Fails unless the server acknowledges with `success: true`.
    pub async fn update_plan(
        &self,
        token: Option<&str>,
        id: &str,
        draft: &PlanDraft,
    ) -> Result<String, ApiError> {
        let path = format!("{PATH_PLANS}/{id}");
        let request = self
            .request(Method::Put, &path, token)
            .json_body(to_json(draft)?);
        let reply = self.send(request).await?;
        Self::ack(&reply, "Failed to update plan")
    }

    /// `DELETE /api/plans/{id}`.
    ///
    /// # Errors
    ///
    /// Fails unless the server acknowledges with `success: true`.
    pub async fn delete_plan(&self, token: Option<&str>, id: &str) -> Result<String, ApiError> {
        let path = format!("{PATH_PLANS}/{id}");
        let reply = self.send(self.request(Method::Delete, &path, token)).await?;
        Self::ack(&reply, "Failed to delete plan")
    }

    /// `POST /api/auth/login`.
    ///
    /// # Errors
    ///
    /// Fails unless the reply is a success status with `success: true`; the
    /// error carries the server message or `Login failed`.
    pub async fn login(&self, creds: &Credentials) -> Result<LoginResponse, ApiError> {
        let body = to_json(&LoginRequest {
            email: creds.email.trim(),
            password: &creds.password,
        })?;
        let request = self.request(Method::Post, PATH_LOGIN, None).json_body(body);
        let reply = self.send(request).await?;
        let body: LoginResponse = parse_body(&reply)?;
        if reply.ok() && body.success {
            Ok(body)
        } else {
            Err(ApiError::Rejected(first_message(
                [body.message.as_str(), ""],
                "Login failed",
            )))
        }
    }

    /// `POST /api/auth/register`. Returns the server message.
    ///
    /// # Errors
    ///
    /// Any non-success status fails before the body is read.
    pub async fn register(&self, form: &Registration) -> Result<String, ApiError> {
        let body = to_json(&RegisterRequest {
            name: form.name.trim(),
            email: form.email.trim(),
            password: &form.password,
            user_type: form.user_type.as_str(),
        })?;
        let request = self.request(Method::Post, PATH_REGISTER, None).json_body(body);
        let reply = self.send(request).await?;
        if !reply.ok() {
            return Err(ApiError::Status {
                status: reply.status,
                message: format!("HTTP error! status: {}", reply.status),
            });
        }
        let body: AckResponse = parse_body(&reply)?;
        if body.success {
            Ok(body.message)
        } else {
            Err(ApiError::Rejected(first_message(
                [body.message.as_str(), ""],
                "Registration failed. Please try again.",
            )))
        }
    }

    /// `POST /api/recharge`. Returns the server message, if any.
    ///
    /// A success status commits unless the body says `success: false`, even
    /// when the body is not JSON.
    ///
    /// # Errors
    ///
    /// Non-success statuses and explicit rejections carry the server message,
    /// else the status text, else a generic message.
    pub async fn submit_recharge(
        &self,
        token: Option<&str>,
        recharge: &RechargeRequest,
    ) -> Result<String, ApiError> {
        let request = self
            .request(Method::Post, PATH_RECHARGE, token)
            .json_body(to_json(recharge)?);
        let reply = self.send(request).await?;
        let fallback = "Unknown error while saving the recharge";
        if !reply.ok() {
            let body: RechargeResponse = parse_body(&reply).unwrap_or_default();
            return Err(ApiError::Status {
                status: reply.status,
                message: first_message([body.message.as_str(), reply.status_text.as_str()], fallback),
            });
        }
        // An empty success body commits; anything else must be readable JSON.
        let body: RechargeResponse = if reply.body.trim().is_empty() {
            RechargeResponse::default()
        } else {
            parse_body(&reply)?
        };
        if body.success == Some(false) {
            return Err(ApiError::Rejected(first_message(
                [body.message.as_str(), reply.status_text.as_str()],
                fallback,
            )));
        }
        Ok(body.message)
    }

    /// `GET /api/recharge/history/{user_id}`.
    ///
    /// # Errors
    ///
    /// Fails unless the reply is a success status with `success: true` and a
    /// `history` array.
    pub async fn user_history(
        &self,
        token: Option<&str>,
        user_id: &str,
    ) -> Result<Vec<RechargeRecord>, ApiError> {
        let path = format!("{PATH_HISTORY}/{user_id}");
        let reply = self.send(self.request(Method::Get, &path, token)).await?;
        Self::history_from(&reply)
    }

    /// `GET /api/recharge/history` across all users.
    ///
    /// # Errors
    ///
    /// Same acceptance rule as [`Self::user_history`].
    pub async fn all_history(&self, token: Option<&str>) -> Result<Vec<RechargeRecord>, ApiError> {
        let reply = self
            .send(self.request(Method::Get, PATH_HISTORY, token))
            .await?;
        Self::history_from(&reply)
    }

    fn history_from(reply: &HttpReply) -> Result<Vec<RechargeRecord>, ApiError> {
        if !reply.ok() {
            return Err(ApiError::Status {
                status: reply.status,
                message: first_message([reply.status_text.as_str(), ""], "Failed to fetch history"),
            });
        }
        let body: HistoryResponse = parse_body(reply)?;
        match (body.success, body.history) {
            (true, Some(history)) => Ok(history),
            (true, None) => Err(ApiError::Malformed("missing history array".to_string())),
            (false, _) => Err(ApiError::Rejected(first_message(
                [body.message.as_str(), ""],
                "Failed to fetch history",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ScriptedTransport;
    use futures::executor::block_on;

    fn client() -> (ApiClient<ScriptedTransport>, ScriptedTransport) {
        let transport = ScriptedTransport::new();
        let config = ClientConfig::default().with_base_url("http://api.test");
        (ApiClient::new(config, transport.clone()), transport)
    }

    fn plan() -> Plan {
        Plan {
            id: "p-49".to_string(),
            price: 49,
            validity: "1 Day".to_string(),
            data: "6GB".to_string(),
            call: "No Calls".to_string(),
            ..Plan::default()
        }
    }

    #[test]
    fn list_plans_reads_catalog_and_tolerates_missing_array() {
        let (api, transport) = client();
        transport
            .push_reply(200, r#"{"success":true,"plans":[{"_id":"a","price":"199"}]}"#)
            .push_reply(200, r#"{"success":true}"#);
        let plans = block_on(api.list_plans()).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].price, 199);
        assert!(block_on(api.list_plans()).unwrap().is_empty());

        let sent = transport.sent();
        assert_eq!(sent[0].url, "http://api.test/api/plans");
        assert!(sent[0].header_value("Authorization").is_none());
    }

    #[test]
    fn recharge_request_shape() {
        let request = RechargeRequest::for_plan(&plan(), Some("u1"), "9876543210", "BSNL");
        let json = serde_json::to_value(request).unwrap();
        assert_eq!(json["userId"], "u1");
        assert!(json["planId"].is_null());
        assert_eq!(json["operator"], "BSNL");
        assert_eq!(json["amount"], 49);
        assert_eq!(json["planDetails"]["mockApiId"], "p-49");
        assert_eq!(json["planDetails"]["validity"], "1 Day");
    }

    #[test]
    fn recharge_commits_on_success_status_without_explicit_flag() {
        let (api, transport) = client();
        transport.push_reply(201, "").push_reply(200, r#"{"message":"Saved"}"#);
        let request = RechargeRequest::for_plan(&plan(), None, "0000000000", "Airtel");
        assert_eq!(block_on(api.submit_recharge(Some("tok"), &request)), Ok(String::new()));
        assert_eq!(
            block_on(api.submit_recharge(Some("tok"), &request)),
            Ok("Saved".to_string())
        );
        let sent = transport.sent();
        assert_eq!(sent[0].header_value("Authorization"), Some("Bearer tok"));
        assert_eq!(sent[0].method, Method::Post);
    }

    #[test]
    fn recharge_success_status_with_unreadable_body_is_malformed() {
        let (api, transport) = client();
        transport.push_reply(200, "<html>proxy error page</html>");
        let request = RechargeRequest::for_plan(&plan(), None, "0000000000", "Airtel");
        assert!(matches!(
            block_on(api.submit_recharge(Some("tok"), &request)),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn recharge_rejection_prefers_server_message() {
        let (api, transport) = client();
        transport
            .push_reply(200, r#"{"success":false,"message":"Plan expired"}"#)
            .push_reply(500, "");
        let request = RechargeRequest::for_plan(&plan(), None, "0000000000", "Airtel");
        assert_eq!(
            block_on(api.submit_recharge(Some("tok"), &request)),
            Err(ApiError::Rejected("Plan expired".to_string()))
        );
        assert_eq!(
            block_on(api.submit_recharge(Some("tok"), &request)),
            Err(ApiError::Status {
                status: 500,
                message: "Internal Server Error".to_string()
            })
        );
    }

    #[test]
    fn login_role_falls_back_through_user_block() {
        let (api, transport) = client();
        transport.push_reply(
            200,
            r#"{"success":true,"token":"t","user":{"_id":"u1","name":"Root","email":"root@x.io","role":"admin"}}"#,
        );
        let creds = Credentials {
            email: "root@x.io".to_string(),
            password: "secret1".to_string(),
        };
        let reply = block_on(api.login(&creds)).unwrap();
        assert_eq!(reply.role(), Role::Admin);
        assert_eq!(reply.current_user().unwrap().id, "u1");
        assert_eq!(LoginResponse::default().role(), Role::User);
    }

    #[test]
    fn login_failure_uses_message_or_default() {
        let (api, transport) = client();
        transport
            .push_reply(401, r#"{"success":false,"message":"Invalid credentials"}"#)
            .push_reply(200, r#"{"success":false}"#);
        let creds = Credentials::default();
        assert_eq!(
            block_on(api.login(&creds)).unwrap_err(),
            ApiError::Rejected("Invalid credentials".to_string())
        );
        assert_eq!(
            block_on(api.login(&creds)).unwrap_err(),
            ApiError::Rejected("Login failed".to_string())
        );
    }

    #[test]
    fn register_sends_user_type_and_checks_status_first() {
        let (api, transport) = client();
        transport
            .push_reply(409, r#"{"success":false,"message":"exists"}"#)
            .push_reply(200, r#"{"success":true,"message":"ok"}"#);
        let form = Registration {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret1".to_string(),
            ..Registration::default()
        };
        assert!(matches!(
            block_on(api.register(&form)),
            Err(ApiError::Status { status: 409, .. })
        ));
        assert_eq!(block_on(api.register(&form)).unwrap(), "ok");
        let body: serde_json::Value =
            serde_json::from_str(transport.sent()[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["userType"], "user");
        assert!(body.get("mobile").is_none());
    }

    #[test]
    fn history_requires_success_and_array() {
        let (api, transport) = client();
        transport
            .push_reply(200, r#"{"success":true,"history":[{"amount":199}]}"#)
            .push_reply(200, r#"{"success":true}"#)
            .push_reply(200, r#"{"success":false,"message":"nope"}"#);
        assert_eq!(block_on(api.user_history(Some("t"), "u1")).unwrap().len(), 1);
        assert!(block_on(api.user_history(Some("t"), "u1")).is_err());
        assert!(block_on(api.all_history(Some("t"))).is_err());
        assert_eq!(
            transport.sent()[0].url,
            "http://api.test/api/recharge/history/u1"
        );
        assert_eq!(transport.sent()[2].url, "http://api.test/api/recharge/history");
    }

    #[test]
    fn plan_writes_surface_server_message() {
        let (api, transport) = client();
        transport
            .push_reply(200, r#"{"success":true,"message":"Plan updated"}"#)
            .push_reply(200, r#"{"success":false}"#)
            .push_failure("connection refused");
        let draft = PlanDraft::default();
        assert_eq!(
            block_on(api.update_plan(Some("t"), "abc", &draft)).unwrap(),
            "Plan updated"
        );
        assert_eq!(
            block_on(api.delete_plan(Some("t"), "abc")).unwrap_err(),
            ApiError::Rejected("Failed to delete plan".to_string())
        );
        assert!(matches!(
            block_on(api.create_plan(Some("t"), &draft)),
            Err(ApiError::Transport(_))
        ));
        let sent = transport.sent();
        assert_eq!(sent[0].method, Method::Put);
        assert_eq!(sent[0].url, "http://api.test/api/plans/abc");
        assert_eq!(sent[1].method, Method::Delete);
    }
}

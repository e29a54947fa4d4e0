use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result, Session};
use carnet_config::Store;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Credentials {
	pub email: String,
	pub password: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthUser {
	pub id: String,
	pub email: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AuthSession {
	pub token: String,
	pub user: AuthUser,
	/// Expiry as a unix timestamp, when the store reports one.
	#[serde(default)]
	pub exp: Option<i64>,
}

/// Exchanges credentials for a token and stores it in the session.
pub async fn login(
	cfg: &Store,
	session: &Session,
	credentials: &Credentials,
) -> Result<AuthSession> {
	let client = crate::http_client(cfg)?;
	let res = client
		.post(format!("{}/users/login", cfg.api_base))
		.headers(crate::auth_headers(session, &cfg.default_headers)?)
		.json(credentials)
		.send()
		.await?;
	let json: Value = crate::guard(res, session).await?.json().await?;
	let auth = parse_login_response(json)?;

	session.authenticate(auth.token.clone());
	tracing::info!(user = %auth.user.email, "Authenticated against the store.");

	Ok(auth)
}

/// Current user for the session token, or `None` when the store does not
/// recognize one.
pub async fn me(cfg: &Store, session: &Session) -> Result<Option<AuthUser>> {
	let client = crate::http_client(cfg)?;
	let res = client
		.get(format!("{}/users/me", cfg.api_base))
		.headers(crate::auth_headers(session, &cfg.default_headers)?)
		.send()
		.await?;
	let json: Value = crate::guard(res, session).await?.json().await?;

	Ok(parse_me_response(&json))
}

/// Trades the current token for a fresh one when the store offers it.
pub async fn refresh(cfg: &Store, session: &Session) -> Result<Option<String>> {
	let client = crate::http_client(cfg)?;
	let res = client
		.post(format!("{}/users/refresh-token", cfg.api_base))
		.headers(crate::auth_headers(session, &cfg.default_headers)?)
		.send()
		.await?;
	let json: Value = crate::guard(res, session).await?.json().await?;
	let token = parse_refresh_response(&json);

	if let Some(token) = &token {
		session.authenticate(token.clone());
	}

	Ok(token)
}

pub fn logout(session: &Session) {
	session.clear();
}

fn parse_login_response(json: Value) -> Result<AuthSession> {
	if json.get("token").and_then(Value::as_str).is_none() {
		return Err(Error::InvalidResponse {
			message: "Login response is missing a token.".to_string(),
		});
	}

	Ok(serde_json::from_value(json)?)
}

fn parse_me_response(json: &Value) -> Option<AuthUser> {
	json.get("user").cloned().and_then(|user| serde_json::from_value(user).ok())
}

fn parse_refresh_response(json: &Value) -> Option<String> {
	json.get("refreshedToken")
		.or_else(|| json.get("token"))
		.and_then(Value::as_str)
		.map(ToString::to_string)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn login_response_parses_token_user_and_exp() {
		let auth = parse_login_response(json!({
			"message": "Auth passed.",
			"token": "jwt-token",
			"exp": 1717000000,
			"user": { "id": "u1", "email": "reporter@example.org" }
		}))
		.expect("Login response must parse.");

		assert_eq!(auth.token, "jwt-token");
		assert_eq!(auth.user.email, "reporter@example.org");
		assert_eq!(auth.exp, Some(1717000000));
	}

	#[test]
	fn login_response_without_token_is_rejected() {
		let err = parse_login_response(json!({ "message": "No token here." }))
			.expect_err("Missing token must be rejected.");

		assert!(matches!(err, Error::InvalidResponse { .. }));
	}

	#[test]
	fn me_response_with_null_user_is_anonymous() {
		assert!(parse_me_response(&json!({ "user": null })).is_none());
		assert_eq!(
			parse_me_response(&json!({ "user": { "id": "u1", "email": "a@b.c" } }))
				.map(|user| user.id),
			Some("u1".to_string()),
		);
	}

	#[test]
	fn refresh_response_accepts_either_token_key() {
		assert_eq!(
			parse_refresh_response(&json!({ "refreshedToken": "next" })).as_deref(),
			Some("next"),
		);
		assert_eq!(parse_refresh_response(&json!({ "token": "next" })).as_deref(), Some("next"));
		assert_eq!(parse_refresh_response(&json!({ "message": "nope" })), None);
	}
}

//! Authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::{Actor, RepositoryProvider, UserRole};
use crate::infrastructure::crypto::{verify_token, JwtConfig, TokenClaims};
use crate::interfaces::http::common::{ApiResponse, EmptyData};

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    InsufficientPermissions,
    Unavailable,
}

/// Authentication state: the JWT config plus the store the role is read from
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub repos: Arc<dyn RepositoryProvider>,
}

/// Caller identity taken from a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// The `role` claim is informational; the caller's role comes from the
    /// admin set at request time.
    pub fn from_claims(claims: TokenClaims, role: UserRole) -> Self {
        Self {
            role,
            user_id: claims.sub,
            email: claims.email,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id.clone(), &self.email, self.role)
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }
            let role = match auth_state.repos.admins().is_admin(&claims.sub).await {
                Ok(true) => UserRole::Admin,
                Ok(false) => UserRole::Employee,
                Err(e) => {
                    tracing::error!(user_id = %claims.sub, error = %e, "Failed to resolve role");
                    return auth_error_response(AuthError::Unavailable);
                }
            };
            if claims.role != role.as_str() {
                tracing::debug!(
                    user_id = %claims.sub,
                    token_role = %claims.role,
                    role = %role,
                    "Role changed since token was issued"
                );
            }
            let user = AuthenticatedUser::from_claims(claims, role);
            tracing::debug!(user_id = %user.user_id, role = %user.role, "Authenticated request");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    auth_error_response(AuthError::ExpiredToken)
                }
                _ => auth_error_response(AuthError::InvalidToken),
            }
        }
    }
}

/// Admin-only gate. Must run after `auth_middleware`.
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(_) => auth_error_response(AuthError::InsufficientPermissions),
        None => auth_error_response(AuthError::MissingToken),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
        AuthError::InsufficientPermissions => {
            (StatusCode::FORBIDDEN, "Administrator access required")
        }
        AuthError::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Unable to verify access right now",
        ),
    };

    (status, Json(ApiResponse::<EmptyData>::error(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::{middleware, Extension, Router};
    use tower::ServiceExt;

    use crate::infrastructure::crypto::create_token;
    use crate::infrastructure::InMemoryRepositoryProvider;

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        format!("{}:{}", user.email, user.role)
    }

    fn app(repos: Arc<dyn RepositoryProvider>) -> Router {
        let state = AuthState {
            jwt_config: JwtConfig::default(),
            repos,
        };
        let admin_only = Router::new()
            .route("/admin", get(whoami))
            .layer(middleware::from_fn(admin_middleware));

        Router::new()
            .route("/me", get(whoami))
            .merge(admin_only)
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn call(
        repos: &Arc<dyn RepositoryProvider>,
        path: &str,
        auth: Option<String>,
    ) -> StatusCode {
        let mut req = Request::builder().uri(path);
        if let Some(auth) = auth {
            req = req.header(header::AUTHORIZATION, auth);
        }
        app(repos.clone())
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    fn bearer(role: &str) -> String {
        let token = create_token("u1", "a@corp.com", role, &JwtConfig::default()).unwrap();
        format!("Bearer {}", token)
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_token("Basic abc"), None);
        assert_eq!(extract_token("Bearer "), None);
    }

    #[tokio::test]
    async fn missing_or_bad_token_is_unauthorized() {
        let repos = InMemoryRepositoryProvider::shared();
        assert_eq!(call(&repos, "/me", None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            call(&repos, "/me", Some("Bearer nonsense".into())).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(call(&repos, "/me", Some(bearer("employee"))).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_gate_ignores_role_claim() {
        let repos = InMemoryRepositoryProvider::shared();
        assert_eq!(
            call(&repos, "/admin", Some(bearer("admin"))).await,
            StatusCode::FORBIDDEN
        );

        repos.admins().grant("u1").await.unwrap();
        assert_eq!(
            call(&repos, "/admin", Some(bearer("employee"))).await,
            StatusCode::OK
        );

        repos.admins().revoke("u1").await.unwrap();
        assert_eq!(
            call(&repos, "/admin", Some(bearer("admin"))).await,
            StatusCode::FORBIDDEN
        );
    }
}

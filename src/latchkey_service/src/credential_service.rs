use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, request},
    middleware,
    routing::{get, post},
};
use latchkey_adapters::AllowedOrigins;
use latchkey_application::CredentialOperations;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    admin_auth::{AdminCredentials, require_admin},
    routes::{
        alive, create_user, delete_user, get_user, login, password_reset, password_reset_request,
        refresh, update_user,
    },
    tracing::{make_span_with_request_id, on_request, on_response},
};

/// HTTP front of a credential provider.
pub struct CredentialService {
    router: Router,
}

impl CredentialService {
    /// Builds the `/v1` routes over `provider`.
    ///
    /// The admin user routes are only mounted when `admin` is given, and
    /// every request to them must carry matching HTTP Basic credentials.
    pub fn new<P>(provider: P, admin: Option<AdminCredentials>) -> Self
    where
        P: CredentialOperations + 'static,
    {
        let provider = Arc::new(provider);

        let mut router = Router::new()
            .route("/v1/internal/alive", get(alive))
            .route("/v1/auth/login", post(login::<P>))
            .route("/v1/auth/refresh", post(refresh::<P>))
            .route(
                "/v1/auth/password-reset-request",
                post(password_reset_request::<P>),
            )
            .route("/v1/auth/password-reset", post(password_reset::<P>))
            .with_state(provider.clone());

        if let Some(admin) = admin {
            let admin_router = Router::new()
                .route("/v1/admin/users", post(create_user::<P>))
                .route(
                    "/v1/admin/users/{email}",
                    get(get_user::<P>)
                        .put(update_user::<P>)
                        .delete(delete_user::<P>),
                )
                .route_layer(middleware::from_fn_with_state(
                    Arc::new(admin),
                    require_admin,
                ))
                .with_state(provider);

            router = router.merge(admin_router);
        }

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted on another router
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Serve on `listener` until the server fails.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Credential service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

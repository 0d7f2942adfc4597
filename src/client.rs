//! HTTP client for the finance backend's REST API.
//!
//! Provides both async and blocking client variants behind feature flags.
//! Every call is a single authenticated request; there is no retry or
//! backoff, and failures are returned to the caller as-is.

/// Base URL used when none is configured (local development backend).
const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Movements resource.
const MOVEMENTS_PATH: &str = "/movimientos";

/// Savings goals resource.
const GOALS_PATH: &str = "/metas";

/// Expense categories resource.
const CATEGORIES_PATH: &str = "/categorias";

/// Income sources resource.
const INCOME_SOURCES_PATH: &str = "/fuentes-ingreso";

/// Financial context resource.
const FINANCIAL_CONTEXTS_PATH: &str = "/contextos-financieros";

/// Liveness endpoint hit by keep-alive pings.
const HEALTH_PATH: &str = "/health";

/// Path of a single record inside a collection.
fn record_path<T: core::fmt::Display>(collection: &str, id: T) -> String {
    format!("{collection}/{id}")
}

/// Generates a finance API client (async or blocking) with builder,
/// resource methods, and tests.
macro_rules! define_client {
    (
        client_name: $client:ident,
        builder_name: $builder:ident,
        http_type: $http_type:ty,
        response_type: $resp_type:ty,
        client_doc: $client_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
        $(send_bound: $send_bound:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug)]
        pub struct $builder {
            /// Bearer token for API authentication.
            token: Option<SecretString>,
            /// Base URL override.
            base_url: Option<String>,
        }

        impl $builder {
            /// Sets the bearer token for API authentication.
            #[inline]
            #[must_use]
            pub fn token<T: Into<String>>(mut self, token: T) -> Self {
                self.token = Some(SecretString::from(token.into()));
                self
            }

            /// Overrides the base URL (another deployment, or a mock server
            /// in tests).
            #[inline]
            #[must_use]
            pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
                self.base_url = Some(url.into());
                self
            }

            /// Builds the client.
            ///
            /// # Errors
            ///
            /// Returns [`FinanzasError::MissingToken`] if no token was provided.
            /// Returns [`FinanzasError::Http`] if the HTTP client fails to build.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub fn build(self) -> Result<$client> {
                let token = self.token.ok_or(FinanzasError::MissingToken)?;
                let base_url = self
                    .base_url
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
                    .trim_end_matches('/')
                    .to_owned();
                tracing::debug!(base_url = %base_url, "building client");
                let http = <$http_type>::builder().build()?;

                Ok($client {
                    http,
                    token,
                    base_url,
                })
            }
        }

        #[doc = $client_doc]
        #[derive(Debug)]
        pub struct $client {
            /// Underlying HTTP client.
            http: $http_type,
            /// Bearer access token.
            token: SecretString,
            /// API base URL, without trailing slash.
            base_url: String,
        }

        impl $client {
            /// Creates a new builder for configuring the client.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder {
                    token: None,
                    base_url: None,
                }
            }

            /// Returns the configured base URL.
            #[inline]
            #[must_use]
            pub fn base_url(&self) -> &str {
                &self.base_url
            }

            // ── Movements ────────────────────────────────────────────

            /// Lists movements via `GET /movimientos`.
            ///
            /// The filter is forwarded as query parameters; report
            /// functions still scope by month themselves, so an empty
            /// filter is the usual choice before aggregating.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn movements(&self, filter: &MovementFilter) -> Result<Vec<Movement>> {
                let movements: Vec<Movement> = self
                    .get_json(MOVEMENTS_PATH, &filter.query_pairs())
                    $( .$await_ext )? ?;
                tracing::debug!(count = movements.len(), "fetched movements");
                Ok(movements)
            }

            /// Creates a movement via `POST /movimientos`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            pub $($async_kw)? fn create_movement(&self, movement: &NewMovement) -> Result<Movement> {
                self.send_json(Method::POST, MOVEMENTS_PATH, movement) $( .$await_ext )?
            }

            /// Replaces a movement via `PUT /movimientos/{id}`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            pub $($async_kw)? fn update_movement(
                &self,
                id: MovementId,
                movement: &NewMovement,
            ) -> Result<Movement> {
                self.send_json(Method::PUT, &record_path(MOVEMENTS_PATH, id), movement)
                    $( .$await_ext )?
            }

            /// Deletes a movement via `DELETE /movimientos/{id}`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails or the server returns
            /// a non-success status.
            #[inline]
            pub $($async_kw)? fn delete_movement(&self, id: MovementId) -> Result<()> {
                self.delete_path(&record_path(MOVEMENTS_PATH, id)) $( .$await_ext )?
            }

            // ── Goals ────────────────────────────────────────────────

            /// Lists savings goals via `GET /metas`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            pub $($async_kw)? fn goals(&self) -> Result<Vec<Goal>> {
                self.get_json(GOALS_PATH, &[]) $( .$await_ext )?
            }

            /// Creates a goal via `POST /metas`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            pub $($async_kw)? fn create_goal(&self, goal: &NewGoal) -> Result<Goal> {
                self.send_json(Method::POST, GOALS_PATH, goal) $( .$await_ext )?
            }

            /// Replaces a goal via `PUT /metas/{id}`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            pub $($async_kw)? fn update_goal(&self, id: GoalId, goal: &NewGoal) -> Result<Goal> {
                self.send_json(Method::PUT, &record_path(GOALS_PATH, id), goal) $( .$await_ext )?
            }

            /// Deletes a goal via `DELETE /metas/{id}`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails or the server returns
            /// a non-success status.
            #[inline]
            pub $($async_kw)? fn delete_goal(&self, id: GoalId) -> Result<()> {
                self.delete_path(&record_path(GOALS_PATH, id)) $( .$await_ext )?
            }

            // ── Categories ───────────────────────────────────────────

            /// Lists expense categories via `GET /categorias`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            pub $($async_kw)? fn categories(&self) -> Result<Vec<Category>> {
                self.get_json(CATEGORIES_PATH, &[]) $( .$await_ext )?
            }

            /// Creates a category via `POST /categorias`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            pub $($async_kw)? fn create_category(&self, category: &NewCategory) -> Result<Category> {
                self.send_json(Method::POST, CATEGORIES_PATH, category) $( .$await_ext )?
            }

            /// Replaces a category via `PUT /categorias/{id}`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            pub $($async_kw)? fn update_category(
                &self,
                id: CategoryId,
                category: &NewCategory,
            ) -> Result<Category> {
                self.send_json(Method::PUT, &record_path(CATEGORIES_PATH, id), category)
                    $( .$await_ext )?
            }

            /// Deletes a category via `DELETE /categorias/{id}`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails or the server returns
            /// a non-success status.
            #[inline]
            pub $($async_kw)? fn delete_category(&self, id: CategoryId) -> Result<()> {
                self.delete_path(&record_path(CATEGORIES_PATH, id)) $( .$await_ext )?
            }

            // ── Income sources ───────────────────────────────────────

            /// Lists income sources via `GET /fuentes-ingreso`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            pub $($async_kw)? fn income_sources(&self) -> Result<Vec<IncomeSource>> {
                self.get_json(INCOME_SOURCES_PATH, &[]) $( .$await_ext )?
            }

            /// Creates an income source via `POST /fuentes-ingreso`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            pub $($async_kw)? fn create_income_source(
                &self,
                source: &NewIncomeSource,
            ) -> Result<IncomeSource> {
                self.send_json(Method::POST, INCOME_SOURCES_PATH, source) $( .$await_ext )?
            }

            /// Deletes an income source via `DELETE /fuentes-ingreso/{id}`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails or the server returns
            /// a non-success status.
            #[inline]
            pub $($async_kw)? fn delete_income_source(&self, id: IncomeSourceId) -> Result<()> {
                self.delete_path(&record_path(INCOME_SOURCES_PATH, id)) $( .$await_ext )?
            }

            // ── Financial context ────────────────────────────────────

            /// Fetches the user's financial context, if one exists.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn financial_context(&self) -> Result<Option<FinancialContext>> {
                let contexts: Vec<FinancialContext> = self
                    .get_json(FINANCIAL_CONTEXTS_PATH, &[])
                    $( .$await_ext )? ?;
                tracing::debug!(count = contexts.len(), "fetched financial contexts");
                Ok(contexts.into_iter().next())
            }

            /// Updates a financial context via `PUT /contextos-financieros/{id}`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            pub $($async_kw)? fn update_financial_context(
                &self,
                id: FinancialContextId,
                update: &FinancialContextUpdate,
            ) -> Result<FinancialContext> {
                self.send_json(Method::PUT, &record_path(FINANCIAL_CONTEXTS_PATH, id), update)
                    $( .$await_ext )?
            }

            /// Desired savings rate from the financial context, or 20% when
            /// the user has none.
            ///
            /// # Errors
            ///
            /// Returns an error if fetching the financial context fails.
            pub $($async_kw)? fn savings_rate(&self) -> Result<Decimal> {
                let context = self.financial_context() $( .$await_ext )? ?;
                Ok(context.map_or(DEFAULT_SAVINGS_RATE, |ctx| ctx.savings_rate_or_default()))
            }

            // ── Reports & health ─────────────────────────────────────

            /// Fetches every movement and aggregates it into a [`Report`].
            ///
            /// # Errors
            ///
            /// Returns an error if fetching movements fails; aggregation
            /// itself cannot fail.
            pub $($async_kw)? fn report(&self, params: &ReportParams) -> Result<Report> {
                let movements = self.movements(&MovementFilter::new()) $( .$await_ext )? ?;
                Ok(Report::build(&movements, params))
            }

            /// Pings the backend's health endpoint.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails or the server returns
            /// a non-success status.
            #[inline]
            pub $($async_kw)? fn ping(&self) -> Result<()> {
                let response: $resp_type = self
                    .http
                    .get(self.endpoint(HEALTH_PATH, &[])?)
                    .send()
                    $( .$await_ext )?
                    ?;
                Self::expect_success(response) $( .$await_ext )?
            }

            // ── Transport helpers ────────────────────────────────────

            /// Joins the base URL, a path and query pairs.
            fn endpoint(&self, path: &str, query: &[(&'static str, String)]) -> Result<Url> {
                let mut url = Url::parse(&format!("{}{path}", self.base_url))?;
                if !query.is_empty() {
                    _ = url.query_pairs_mut().extend_pairs(query);
                }
                Ok(url)
            }

            /// Sends an authenticated GET request and deserializes the
            /// response.
            #[tracing::instrument(skip_all, fields(path = %path))]
            $($async_kw)? fn get_json<Resp: serde::de::DeserializeOwned>(
                &self,
                path: &str,
                query: &[(&'static str, String)],
            ) -> Result<Resp> {
                let url = self.endpoint(path, query)?;
                tracing::trace!(url = %url, "sending GET request");
                let response: $resp_type = self
                    .http
                    .get(url)
                    .header(AUTHORIZATION, format!("Bearer {}", self.token.expose_secret()))
                    .send()
                    $( .$await_ext )?
                    ?;
                Self::parse_response(response) $( .$await_ext )?
            }

            /// Sends an authenticated JSON request with a body and
            /// deserializes the response.
            #[tracing::instrument(skip_all, fields(method = %method, path = %path))]
            $($async_kw)? fn send_json<
                Req: serde::Serialize $(+ $send_bound)?,
                Resp: serde::de::DeserializeOwned,
            >(
                &self,
                method: Method,
                path: &str,
                body: &Req,
            ) -> Result<Resp> {
                let url = self.endpoint(path, &[])?;
                tracing::trace!(url = %url, "sending JSON request");
                let response: $resp_type = self
                    .http
                    .request(method, url)
                    .header(AUTHORIZATION, format!("Bearer {}", self.token.expose_secret()))
                    .header(CONTENT_TYPE, "application/json")
                    .json(body)
                    .send()
                    $( .$await_ext )?
                    ?;
                Self::parse_response(response) $( .$await_ext )?
            }

            /// Sends an authenticated DELETE request, ignoring any body.
            #[tracing::instrument(skip_all, fields(path = %path))]
            $($async_kw)? fn delete_path(&self, path: &str) -> Result<()> {
                let url = self.endpoint(path, &[])?;
                tracing::trace!(url = %url, "sending DELETE request");
                let response: $resp_type = self
                    .http
                    .delete(url)
                    .header(AUTHORIZATION, format!("Bearer {}", self.token.expose_secret()))
                    .send()
                    $( .$await_ext )?
                    ?;
                Self::expect_success(response) $( .$await_ext )?
            }

            /// Checks the status and deserializes a successful body.
            $($async_kw)? fn parse_response<T: serde::de::DeserializeOwned>(
                response: $resp_type,
            ) -> Result<T> {
                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status.is_success() {
                    let body = response.text() $( .$await_ext )? ?;
                    tracing::trace!(body_len = body.len(), "parsing response body");
                    serde_json::from_str(&body).map_err(FinanzasError::from)
                } else {
                    Err(Self::api_error(response) $( .$await_ext )?)
                }
            }

            /// Checks the status of a response whose body is not needed.
            $($async_kw)? fn expect_success(response: $resp_type) -> Result<()> {
                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status.is_success() {
                    Ok(())
                } else {
                    Err(Self::api_error(response) $( .$await_ext )?)
                }
            }

            /// Turns a non-success response into [`FinanzasError::Api`].
            $($async_kw)? fn api_error(response: $resp_type) -> FinanzasError {
                let status = response.status().as_u16();
                let message = response
                    .text()
                    $( .$await_ext )?
                    .unwrap_or_else(|_| "unknown error".to_owned());
                tracing::debug!(status, message = %message, "API error");
                FinanzasError::Api { status, message }
            }
        }

    };
}

#[cfg(feature = "async")]
mod async_client {
    //! Async HTTP client for the finance API.

    use reqwest::Method;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use rust_decimal::Decimal;
    use secrecy::{ExposeSecret as _, SecretString};
    use url::Url;

    use super::{
        CATEGORIES_PATH, DEFAULT_BASE_URL, FINANCIAL_CONTEXTS_PATH, GOALS_PATH, HEALTH_PATH,
        INCOME_SOURCES_PATH, MOVEMENTS_PATH, record_path,
    };
    use crate::error::{FinanzasError, Result};
    use crate::models::{
        Category, CategoryId, FinancialContext, FinancialContextId, FinancialContextUpdate, Goal,
        GoalId, IncomeSource, IncomeSourceId, Movement, MovementFilter, MovementId, NewCategory,
        NewGoal, NewIncomeSource, NewMovement,
    };
    use crate::report::{DEFAULT_SAVINGS_RATE, Report, ReportParams};

    define_client! {
        client_name: FinanzasClient,
        builder_name: FinanzasClientBuilder,
        http_type: reqwest::Client,
        response_type: reqwest::Response,
        client_doc: "Async client for the finance API.\n\nUse [`FinanzasClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`FinanzasClient`].",
        async_kw: async,
        await_kw: await,
        send_bound: Sync,
    }
}

#[cfg(feature = "blocking")]
mod blocking_client {
    //! Blocking (synchronous) HTTP client for the finance API.

    use reqwest::Method;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use rust_decimal::Decimal;
    use secrecy::{ExposeSecret as _, SecretString};
    use url::Url;

    use super::{
        CATEGORIES_PATH, DEFAULT_BASE_URL, FINANCIAL_CONTEXTS_PATH, GOALS_PATH, HEALTH_PATH,
        INCOME_SOURCES_PATH, MOVEMENTS_PATH, record_path,
    };
    use crate::error::{FinanzasError, Result};
    use crate::models::{
        Category, CategoryId, FinancialContext, FinancialContextId, FinancialContextUpdate, Goal,
        GoalId, IncomeSource, IncomeSourceId, Movement, MovementFilter, MovementId, NewCategory,
        NewGoal, NewIncomeSource, NewMovement,
    };
    use crate::report::{DEFAULT_SAVINGS_RATE, Report, ReportParams};

    define_client! {
        client_name: FinanzasBlockingClient,
        builder_name: FinanzasBlockingClientBuilder,
        http_type: reqwest::blocking::Client,
        response_type: reqwest::blocking::Response,
        client_doc: "Blocking (synchronous) client for the finance API.\n\nUse [`FinanzasBlockingClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`FinanzasBlockingClient`].",
    }
}

#[cfg(feature = "async")]
pub use async_client::{FinanzasClient, FinanzasClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{FinanzasBlockingClient, FinanzasBlockingClientBuilder};

//! Request dispatch.
//!
//! The API surface is a pair of explicit name → operation tables built
//! from the compiled lists. Every store call made while resolving runs
//! under the request's cancellation token and optional timeout.

use crate::{
    error::{RequestError, StoreError},
    list::List,
    list_set::ListSet,
};
use derive_more::Display;
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue, json};
use std::{fmt, future::Future, sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

///
/// RequestKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum RequestKind {
    #[display("query")]
    Query,

    #[display("mutation")]
    Mutation,
}

impl RequestKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

///
/// OperationKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum OperationKind {
    ListItems,
    Item,
    Create,
    Update,
    Delete,
}

///
/// Operation
///
/// One resolver: what to do, and which list to do it on.
///

#[derive(Clone)]
pub struct Operation {
    pub kind: OperationKind,
    pub list: Arc<List>,
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("kind", &self.kind)
            .field("list", &self.list.key())
            .finish()
    }
}

impl Operation {
    #[must_use]
    pub const fn new(kind: OperationKind, list: Arc<List>) -> Self {
        Self { kind, list }
    }

    pub async fn resolve(
        &self,
        args: &Map<String, JsonValue>,
        ctx: &RequestContext,
    ) -> Result<JsonValue, RequestError> {
        debug!(list = %self.list.key(), op = %self.kind, "resolving");

        match self.kind {
            OperationKind::ListItems => self.list.list_items(args, ctx).await,
            OperationKind::Item => self.list.item(args, ctx).await,
            OperationKind::Create => self.list.create(args, ctx).await,
            OperationKind::Update => self.list.update(args, ctx).await,
            OperationKind::Delete => self.list.delete(args, ctx).await,
        }
    }
}

///
/// RequestContext
///

#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    timeout: Option<Duration>,
}

impl RequestContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Await a store call, giving up on cancellation or timeout.
    pub async fn run<T, F>(&self, call: F) -> Result<T, RequestError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let guarded = async {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => Err(RequestError::Cancelled),
                res = call => res.map_err(RequestError::from),
            }
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, guarded)
                .await
                .map_err(|_| RequestError::Timeout {
                    millis: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                })?,
            None => guarded.await,
        }
    }
}

///
/// Api
///

#[derive(Clone, Debug, Default)]
pub struct Api {
    queries: IndexMap<String, Operation>,
    mutations: IndexMap<String, Operation>,
    timeout: Option<Duration>,
}

impl Api {
    #[must_use]
    pub fn new(lists: &ListSet) -> Self {
        Self {
            queries: lists.query_resolvers().into_iter().collect(),
            mutations: lists.mutation_resolvers().into_iter().collect(),
            timeout: None,
        }
    }

    /// Default timeout applied by [`Api::request_context`].
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fresh context with this API's default timeout.
    #[must_use]
    pub fn request_context(&self) -> RequestContext {
        RequestContext::new().with_timeout(self.timeout)
    }

    #[must_use]
    pub const fn queries(&self) -> &IndexMap<String, Operation> {
        &self.queries
    }

    #[must_use]
    pub const fn mutations(&self) -> &IndexMap<String, Operation> {
        &self.mutations
    }

    #[must_use]
    pub fn operation(&self, kind: RequestKind, name: &str) -> Option<&Operation> {
        match kind {
            RequestKind::Query => self.queries.get(name),
            RequestKind::Mutation => self.mutations.get(name),
        }
    }

    pub async fn execute(
        &self,
        kind: RequestKind,
        name: &str,
        args: &Map<String, JsonValue>,
        ctx: &RequestContext,
    ) -> Result<JsonValue, RequestError> {
        let operation =
            self.operation(kind, name)
                .ok_or_else(|| RequestError::UnknownOperation {
                    kind: kind.as_str(),
                    name: name.to_string(),
                })?;

        operation.resolve(args, ctx).await
    }

    /// Execute and wrap the outcome in a GraphQL response envelope.
    pub async fn respond(
        &self,
        kind: RequestKind,
        name: &str,
        args: &Map<String, JsonValue>,
        ctx: &RequestContext,
    ) -> JsonValue {
        match self.execute(kind, name, args, ctx).await {
            Ok(value) => json!({ "data": { name: value } }),
            Err(err) => {
                warn!(%kind, operation = %name, code = err.code(), error = %err, "request rejected");

                json!({
                    "data": { name: JsonValue::Null },
                    "errors": [err.to_graphql_error()],
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future;

    #[tokio::test]
    async fn run_passes_through_results() {
        let ctx = RequestContext::new();
        let value = ctx.run(async { Ok::<_, StoreError>(7) }).await.unwrap();

        assert_eq!(value, 7);

        let err = ctx
            .run(async { Err::<(), _>(StoreError::Backend("down".into())) })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
    }

    #[tokio::test]
    async fn run_observes_cancellation() {
        let ctx = RequestContext::new();
        ctx.cancel_token().cancel();

        let err = ctx
            .run(future::pending::<Result<(), StoreError>>())
            .await
            .unwrap_err();

        assert_eq!(err, RequestError::Cancelled);
    }

    #[tokio::test]
    async fn run_times_out() {
        let ctx = RequestContext::new().with_timeout(Some(Duration::from_millis(10)));

        let err = ctx
            .run(future::pending::<Result<(), StoreError>>())
            .await
            .unwrap_err();

        assert_eq!(err, RequestError::Timeout { millis: 10 });
    }

    #[tokio::test]
    async fn unknown_operation_is_reported() {
        let api = Api::default();
        let ctx = api.request_context();

        let err = api
            .execute(RequestKind::Query, "allNothing", &Map::new(), &ctx)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RequestError::UnknownOperation {
                kind: "query",
                name: "allNothing".into()
            }
        );

        let response = api
            .respond(RequestKind::Mutation, "createNothing", &Map::new(), &ctx)
            .await;
        assert_eq!(response["data"]["createNothing"], JsonValue::Null);
        assert_eq!(
            response["errors"][0]["extensions"]["code"],
            "GRAPHQL_VALIDATION_FAILED"
        );
    }
}

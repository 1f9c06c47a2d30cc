//! Route definitions and their documentation metadata.

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use log::error;
use serde::Serialize;

use crate::parser::{HttpRequest, Method};
use crate::router::error::Error;
use crate::router::handler::{handler_fn, HandlerFn};
use crate::router::middleware::{compose, Middleware};
use crate::router::pattern::Pattern;
use crate::server::HttpResponse;

/// How a route is matched against request paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// The request path must equal the route source.
    Exact,
    /// The route source is evaluated as a regular expression.
    Pattern,
}

impl FromStr for MatchKind {
    type Err = String;

    /// Accepts `exact`/`equality` and `pattern`/`regex`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" | "equality" => Ok(MatchKind::Exact),
            "pattern" | "regex" => Ok(MatchKind::Pattern),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Exact => f.write_str("exact"),
            MatchKind::Pattern => f.write_str("pattern"),
        }
    }
}

/// A documented request or response value: a name plus an example.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpArgument {
    pub name: String,
    pub example: serde_json::Value,
    /// Unqualified Rust type name of the example value.
    pub type_name: String,
}

impl HttpArgument {
    /// Describe an argument by example.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonError`] if `example` cannot be represented as JSON.
    pub fn new<T: Serialize>(name: impl Into<String>, example: &T) -> Result<Self, Error> {
        Ok(Self {
            name: name.into(),
            example: serde_json::to_value(example)?,
            type_name: short_type_name::<T>(),
        })
    }
}

/// `alloc::vec::Vec<my_crate::User>` becomes `Vec<User>`.
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();

    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            segment.push(c);
        } else {
            out.push_str(segment.rsplit("::").next().unwrap_or_default());
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(segment.rsplit("::").next().unwrap_or_default());
    out
}

/// A documented query string parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParameter(pub HttpArgument);

impl QueryParameter {
    pub fn new<T: Serialize>(name: impl Into<String>, example: &T) -> Result<Self, Error> {
        HttpArgument::new(name, example).map(Self)
    }
}

/// A documented path argument, usually backed by a named capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathArgument(pub HttpArgument);

impl PathArgument {
    pub fn new<T: Serialize>(name: impl Into<String>, example: &T) -> Result<Self, Error> {
        HttpArgument::new(name, example).map(Self)
    }
}

/// A documented request or response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    pub content_type: String,
    pub argument: HttpArgument,
}

impl Body {
    pub fn new<T: Serialize>(
        content_type: impl Into<String>,
        name: impl Into<String>,
        example: &T,
    ) -> Result<Self, Error> {
        Ok(Self {
            content_type: content_type.into(),
            argument: HttpArgument::new(name, example)?,
        })
    }

    /// Same as [`Body::new`]; reads better when describing a response.
    pub fn response<T: Serialize>(
        content_type: impl Into<String>,
        name: impl Into<String>,
        example: &T,
    ) -> Result<Self, Error> {
        Self::new(content_type, name, example)
    }
}

/// A single registered endpoint.
///
/// Routes are built with a chain of `set_*`/`add_*` calls and handed to
/// [`Router::add`](crate::router::Router::add). The match kind and pattern are
/// fixed at construction.
///
/// ```
/// use microroute_rs::{Method, Route, HttpResponse, StatusCode};
///
/// let route = Route::pattern(r"^/users/(?P<id>[0-9]+)$")?
///     .set_method(Method::GET)
///     .set_tag("Users")
///     .set_description("Fetch a single user")
///     .set_handler(|req| async move {
///         let id = req.param("id").unwrap_or_default().to_string();
///         Ok(HttpResponse::new(StatusCode::Ok).with_body_string(id))
///     });
/// # Ok::<(), microroute_rs::RouterError>(())
/// ```
pub struct Route {
    /// The declared kind token when it wasn't recognized.
    match_kind: Result<MatchKind, String>,
    pattern: Pattern,
    method: Method,
    handler: Option<HandlerFn>,
    middleware: Vec<Arc<dyn Middleware>>,
    tag: String,
    description: String,
    request_body: Option<Body>,
    response: Option<Body>,
    query_parameters: Vec<QueryParameter>,
    path_arguments: Vec<PathArgument>,
}

impl Route {
    fn build(match_kind: Result<MatchKind, String>, source: &str) -> Result<Self, Error> {
        Ok(Self {
            match_kind,
            pattern: Pattern::compile(source)?,
            method: Method::GET,
            handler: None,
            middleware: Vec::new(),
            tag: String::new(),
            description: String::new(),
            request_body: None,
            response: None,
            query_parameters: Vec::new(),
            path_arguments: Vec::new(),
        })
    }

    /// A route matched by literal path equality.
    ///
    /// # Errors
    ///
    /// The source is still compiled, so it must be a valid expression.
    pub fn exact(path: &str) -> Result<Self, Error> {
        Self::build(Ok(MatchKind::Exact), path)
    }

    /// A route matched by evaluating `source` as a regular expression.
    pub fn pattern(source: &str) -> Result<Self, Error> {
        Self::build(Ok(MatchKind::Pattern), source)
    }

    /// A route whose kind comes from a textual declaration, e.g. a route file.
    ///
    /// An unknown `kind` is not rejected here; [`Router::add`](crate::router::Router::add)
    /// refuses the route with [`Error::InvalidMatchKind`].
    pub fn declared(kind: &str, source: &str) -> Result<Self, Error> {
        Self::build(kind.parse(), source)
    }

    pub fn set_handler<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
    {
        self.handler = Some(handler_fn(handler));
        self
    }

    /// Use an already boxed handler, e.g. one shared between routes.
    pub fn set_handler_fn(mut self, handler: HandlerFn) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn set_method(mut self, method: Method) -> Self {
        self.method = method.normalized();
        self
    }

    pub fn set_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a layer; layers run in the order they were added.
    pub fn add_middleware(self, middleware: impl Middleware + 'static) -> Self {
        self.add_shared_middleware(Arc::new(middleware))
    }

    pub fn add_shared_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn add_query_parameter(mut self, parameter: QueryParameter) -> Self {
        self.query_parameters.push(parameter);
        self
    }

    pub fn add_path_argument(mut self, argument: PathArgument) -> Self {
        self.path_arguments.push(argument);
        self
    }

    pub fn set_request_body(mut self, body: Body) -> Self {
        self.request_body = Some(body);
        self
    }

    pub fn set_response(mut self, body: Body) -> Self {
        self.response = Some(body);
        self
    }

    /// `None` when the route was declared with an unrecognized kind.
    pub fn match_kind(&self) -> Option<MatchKind> {
        self.match_kind.as_ref().ok().copied()
    }

    pub(crate) fn checked_match_kind(&self) -> Result<MatchKind, Error> {
        self.match_kind.clone().map_err(|kind| Error::InvalidMatchKind {
            kind,
            pattern: self.source().to_string(),
        })
    }

    /// The compiled pattern.
    pub fn matcher(&self) -> &Pattern {
        &self.pattern
    }

    /// The pattern source, which for exact routes is the literal path.
    pub fn source(&self) -> &str {
        self.pattern.source()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn middleware(&self) -> &[Arc<dyn Middleware>] {
        &self.middleware
    }

    pub fn query_parameters(&self) -> &[QueryParameter] {
        &self.query_parameters
    }

    pub fn path_arguments(&self) -> &[PathArgument] {
        &self.path_arguments
    }

    pub fn request_body(&self) -> Option<&Body> {
        self.request_body.as_ref()
    }

    pub fn response(&self) -> Option<&Body> {
        self.response.as_ref()
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Run the middleware chain and terminal handler for `request`.
    ///
    /// Errors from the chain are returned unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::MissingHandler`] if no handler was ever set; no middleware runs
    /// in that case.
    pub async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        let Some(handler) = self.handler.clone() else {
            error!("Route {} {} has no handler", self.method, self.source());
            return Err(Error::MissingHandler {
                method: self.method.clone(),
                pattern: self.source().to_string(),
            });
        };

        if self.middleware.is_empty() {
            return handler(request).await;
        }

        let chain = compose(handler, &self.middleware);
        chain(request).await
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("match_kind", &self.match_kind)
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("tag", &self.tag)
            .field("description", &self.description)
            .field("middleware", &self.middleware)
            .field("has_handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}

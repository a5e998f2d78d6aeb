//! HTTP client for the MedSupply storefront API.
//!
//! Every endpoint answers with a `{ success, data, message }` envelope. The client
//! builds requests against a base URL and hands them to a [`Transport`], which does
//! the actual exchange. On `wasm32` targets [`SpinTransport`] sends through Spin's
//! outbound HTTP; elsewhere callers plug in their own transport.
//!
//! # Example
//!
//! ```rust,ignore
//! use medsupply_api::{FetchClient, SpinTransport};
//!
//! let client = FetchClient::new(SpinTransport).with_base_url("https://api.example.com");
//! let categories: Vec<Category> = client.get("/categories").send()?.into_data()?;
//! ```

mod error;
mod request;
mod response;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::{ApiEnvelope, Response};

use std::collections::HashMap;

/// Performs a single HTTP exchange.
pub trait Transport {
    fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
        (**self).send(request)
    }
}

/// HTTP client for making outbound requests.
pub struct FetchClient<T> {
    transport: T,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl<T: Transport> FetchClient<T> {
    /// Create a new HTTP client over a transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: HashMap::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Get, url)
    }

    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Post, url)
    }

    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Put, url)
    }

    pub fn patch(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Patch, url)
    }

    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_, T> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a, T> {
    client: &'a FetchClient<T>,
    builder: RequestBuilder,
}

impl<'a, T: Transport> ClientRequestBuilder<'a, T> {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<B: serde::Serialize>(mut self, value: &B) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Send the request and return the raw response.
    pub fn send(self) -> Result<Response, FetchError> {
        tracing::debug!(
            method = self.builder.method.as_str(),
            url = %self.builder.url,
            "sending api request"
        );
        let response = self.client.transport.send(&self.builder)?;
        if !response.is_success() {
            tracing::warn!(
                status = response.status,
                url = %self.builder.url,
                "api request failed"
            );
        }
        Ok(response)
    }

    /// Send the request and unwrap the envelope's `data`.
    pub fn send_envelope<D: serde::de::DeserializeOwned>(self) -> Result<D, FetchError> {
        self.send()?.into_data()
    }
}

/// Transport backed by Spin's outbound HTTP.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinTransport;

#[cfg(target_arch = "wasm32")]
impl Transport for SpinTransport {
    fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
        use spin_sdk::http::{Method as SpinMethod, Request};

        let method = match request.method {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
            Method::Put => SpinMethod::Put,
            Method::Patch => SpinMethod::Patch,
            Method::Delete => SpinMethod::Delete,
        };

        let mut outbound = Request::builder();
        outbound.method(method);
        outbound.uri(&request.url);
        for (key, value) in &request.headers {
            outbound.header(key.as_str(), value.as_str());
        }
        let outbound = match &request.body {
            Some(body) => outbound.body(body.clone()).build(),
            None => outbound.build(),
        };

        let response: spin_sdk::http::Response =
            spin_sdk::http::run(spin_sdk::http::send(outbound))
                .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = *response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
            .collect();
        Ok(Response::new(status, headers, response.into_body()))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiEnvelope, FetchClient, FetchError, Method, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Echo {
        seen: RefCell<Vec<RequestBuilder>>,
    }

    impl Transport for Echo {
        fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
            self.seen.borrow_mut().push(request.clone());
            Response::json_body(200, &ApiEnvelope::ok(request.url().to_string()))
        }
    }

    fn client() -> FetchClient<Echo> {
        FetchClient::new(Echo {
            seen: RefCell::new(Vec::new()),
        })
        .with_base_url("https://api.example.com/")
        .with_default_header("X-Client", "storefront")
    }

    #[test]
    fn test_base_url_joined() {
        let client = client();
        let url: String = client.get("/orders").send_envelope().unwrap();
        assert_eq!(url, "https://api.example.com/orders");
    }

    #[test]
    fn test_absolute_url_kept() {
        let client = client();
        let url: String = client
            .get("https://cdn.example.com/a.png")
            .send_envelope()
            .unwrap();
        assert_eq!(url, "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_default_headers_applied() {
        let client = client();
        client.delete("/brands/b-1").send().unwrap();
        let seen = client.transport().seen.borrow();
        assert_eq!(seen[0].method(), Method::Delete);
        assert_eq!(seen[0].headers().get("X-Client").unwrap(), "storefront");
    }
}

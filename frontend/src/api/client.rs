use std::{cell::RefCell, rc::Rc};

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    api::types::ApiError,
    config,
    utils::storage::{LocalStorageTokenStore, TokenStore},
};

/// Raised by the client, consumed by whoever owns the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The server answered 401: the stored token is no longer good.
    Invalidated,
}

type Listener = Rc<dyn Fn(SessionEvent)>;

#[derive(Clone, Default)]
pub struct SessionEvents {
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl SessionEvents {
    pub fn subscribe(&self, listener: impl Fn(SessionEvent) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn emit(&self, event: SessionEvent) {
        // Snapshot so a listener may subscribe without a re-borrow.
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(event);
        }
    }
}

struct ClientInner {
    client: Client,
    base_url: Option<String>,
    tokens: Rc<dyn TokenStore>,
    events: SessionEvents,
}

/// The one configured HTTP client of the app.
///
/// Every request carries `Authorization: Bearer <token>` when a token is
/// stored. Every 401 emits [`SessionEvent::Invalidated`] before the error
/// reaches the caller.
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<ClientInner>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Browser client: token in `localStorage`, base URL from runtime config.
    pub fn new() -> Self {
        Self::build(None, Rc::new(LocalStorageTokenStore))
    }

    pub fn new_with_base_url(base_url: impl Into<String>, tokens: Rc<dyn TokenStore>) -> Self {
        let base_url = base_url.into();
        Self::build(config::normalize_base_url(&base_url), tokens)
    }

    fn build(base_url: Option<String>, tokens: Rc<dyn TokenStore>) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                client: Client::new(),
                base_url,
                tokens,
                events: SessionEvents::default(),
            }),
        }
    }

    pub fn events(&self) -> &SessionEvents {
        &self.inner.events
    }

    pub fn token_store(&self) -> Rc<dyn TokenStore> {
        Rc::clone(&self.inner.tokens)
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.inner.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.inner.tokens.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.resolved_base_url().await, path);
        let builder = self
            .inner
            .client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");
        self.authorize(builder)
    }

    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("request rejected with 401, invalidating session");
            self.inner.events.emit(SessionEvent::Invalidated);
            return Err(ApiError::Unauthorized);
        }
        if status.is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        self.send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send(builder).await.map(|_| ())
    }

    pub(crate) async fn send_bytes(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        self.send(builder)
            .await?
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

async fn error_from_response(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ApiError::Http {
        status,
        message: server_message(&body),
    }
}

/// The `message` field of a JSON error body, if any.
pub(crate) fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn server_message_reads_message_field_only() {
        assert_eq!(
            server_message(r#"{"message":"Cédula duplicada"}"#).as_deref(),
            Some("Cédula duplicada")
        );
        assert!(server_message(r#"{"error":"x"}"#).is_none());
        assert!(server_message(r#"{"message":"  "}"#).is_none());
        assert!(server_message("plain text").is_none());
        assert!(server_message("").is_none());
    }

    #[test]
    fn session_events_reach_every_listener() {
        let events = SessionEvents::default();
        let hits = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let hits = Rc::clone(&hits);
            events.subscribe(move |event| {
                assert_eq!(event, SessionEvent::Invalidated);
                hits.set(hits.get() + 1);
            });
        }
        events.emit(SessionEvent::Invalidated);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn listener_may_subscribe_during_emit() {
        let events = SessionEvents::default();
        let inner = events.clone();
        events.subscribe(move |_| inner.subscribe(|_| {}));
        events.emit(SessionEvent::Invalidated);
        assert_eq!(events.listeners.borrow().len(), 2);
    }
}

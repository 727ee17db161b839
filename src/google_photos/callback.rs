//! One-shot HTTP listener that receives the OAuth redirect on localhost.

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::{
    net::TcpListener,
    sync::{mpsc, oneshot},
};

use super::AuthError;

const SUCCESS_MESSAGE: &str = "The authentication flow has completed. You may close this window.";
const WAITING_MESSAGE: &str = "Waiting for the authorization response.";

#[derive(Debug, Default, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

impl CallbackParams {
    fn into_code(self, expected_state: &str) -> Result<String, AuthError> {
        if let Some(error) = self.error {
            return Err(AuthError::Denied(error));
        }

        if self.state.as_deref() != Some(expected_state) {
            return Err(AuthError::StateMismatch);
        }

        self.code
            .ok_or_else(|| AuthError::Denied("no authorization code in response".into()))
    }
}

pub async fn bind(port: u16) -> Result<TcpListener, AuthError> {
    TcpListener::bind(("127.0.0.1", port))
        .await
        .map_err(AuthError::Callback)
}

/// Serves the redirect target until one authorization response arrives, then
/// shuts the listener down and returns the authorization code.
pub async fn wait_for_code(listener: TcpListener, expected_state: &str) -> Result<String, AuthError> {
    let (tx, mut rx) = mpsc::channel::<CallbackParams>(1);
    let (done_tx, done_rx) = oneshot::channel();

    let app = Router::new().route("/", get(redirect)).with_state(tx);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = done_tx.send(rx.recv().await);
        })
        .await
        .map_err(AuthError::Callback)?;

    let params = done_rx
        .await
        .ok()
        .flatten()
        .ok_or(AuthError::CallbackClosed)?;

    params.into_code(expected_state)
}

async fn redirect(
    State(tx): State<mpsc::Sender<CallbackParams>>,
    Query(params): Query<CallbackParams>,
) -> Html<&'static str> {
    if params.code.is_none() && params.error.is_none() {
        return Html(WAITING_MESSAGE);
    }

    // only the first response is used, later ones are dropped
    let _ = tx.try_send(params);
    Html(SUCCESS_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn redirect_with(query: &str) -> (Result<String, AuthError>, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let browser = async {
            reqwest::get(format!("http://{addr}/?{query}"))
                .await
                .unwrap()
                .text()
                .await
                .unwrap()
        };

        tokio::join!(wait_for_code(listener, "xyz"), browser)
    }

    #[tokio::test]
    async fn returns_code_for_matching_state() {
        let (code, page) = redirect_with("state=xyz&code=4%2F0Adeu5&scope=photos").await;

        assert_eq!(code.unwrap(), "4/0Adeu5");
        assert_eq!(page, SUCCESS_MESSAGE);
    }

    #[tokio::test]
    async fn rejects_mismatched_state() {
        let (code, _) = redirect_with("state=other&code=abc").await;

        assert!(matches!(code, Err(AuthError::StateMismatch)));
    }

    #[tokio::test]
    async fn reports_denied_consent() {
        let (code, _) = redirect_with("state=xyz&error=access_denied").await;

        assert!(matches!(code, Err(AuthError::Denied(e)) if e == "access_denied"));
    }
}

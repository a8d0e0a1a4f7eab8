//! Transport layer for RPC communication

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::subscription::Subscription;
use crate::SdkError;

/// Transport trait for RPC communication (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an RPC request and get JSON response
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError>;

    /// Send an RPC request whose result is a hex string
    async fn invoke(&self, method: &str, params: Vec<Value>) -> Result<String, SdkError> {
        match self.request_json(method, params).await? {
            Value::String(s) => Ok(s),
            other => Err(SdkError::InvalidResponse(format!(
                "{} returned {} instead of a hex string",
                method, other
            ))),
        }
    }

    /// Open a stream of hex push payloads
    async fn subscribe(&self, method: &str, _params: Vec<Value>) -> Result<Subscription, SdkError> {
        Err(SdkError::Unsupported(format!("subscription to {}", method)))
    }
}

/// A request seen by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// RPC method
    pub method: String,
    /// Positional params
    pub params: Vec<Value>,
}

/// Mock transport for testing
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Value>>>,
    default_responses: Arc<Mutex<HashMap<String, Value>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    subscriptions: Arc<Mutex<HashMap<String, mpsc::Receiver<String>>>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let mut defaults = HashMap::new();

        defaults.insert("eth_call".to_string(), Value::String("0x".to_string()));
        defaults.insert(
            "eth_sendTransaction".to_string(),
            Value::String(
                "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b".to_string(),
            ),
        );

        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_responses: Arc::new(Mutex::new(defaults)),
            requests: Arc::new(Mutex::new(Vec::new())),
            subscriptions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Set a mock response for a specific method
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (only possible if another thread panicked while holding the lock).
    pub fn set_response(&self, method: &str, response: Value) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), response);
    }

    /// Clear custom responses
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn clear_responses(&self) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .clear();
    }

    /// Requests received so far, oldest first
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("MockTransport mutex poisoned")
            .clone()
    }

    /// Create the payload channel handed out by the next `subscribe(method)`.
    ///
    /// Dropping the returned sender closes the subscription.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn push_channel(&self, method: &str, capacity: usize) -> mpsc::Sender<String> {
        let (tx, rx) = mpsc::channel(capacity);
        self.subscriptions
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), rx);
        tx
    }

    fn record(&self, method: &str, params: &[Value]) -> Result<(), SdkError> {
        self.requests
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .push(RecordedRequest {
                method: method.to_string(),
                params: params.to_vec(),
            });
        Ok(())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError> {
        self.record(method, &params)?;

        // Check custom responses first
        let custom_response = self
            .responses
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(method)
            .cloned();

        if let Some(response) = custom_response {
            return Ok(response);
        }

        // Fall back to defaults
        let default_response = self
            .default_responses
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(method)
            .cloned();

        if let Some(response) = default_response {
            return Ok(response);
        }

        Err(SdkError::Rpc {
            code: -32601,
            message: format!("Method not found: {}", method),
        })
    }

    async fn subscribe(&self, method: &str, params: Vec<Value>) -> Result<Subscription, SdkError> {
        self.record(method, &params)?;
        let receiver = self
            .subscriptions
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .remove(method)
            .ok_or_else(|| SdkError::Rpc {
                code: -32601,
                message: format!("No push channel for: {}", method),
            })?;
        Ok(Subscription::new(receiver))
    }
}

/// HTTP transport for real RPC communication
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError> {
        let id = self.next_id();
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::debug!(method, id, url = %self.url, "rpc request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| SdkError::Rpc {
            code: -32603,
            message: "No result in response".to_string(),
        })
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transport_default_responses() {
        let transport = MockTransport::new();

        let result = transport.request_json("eth_call", vec![]).await.unwrap();
        assert_eq!(result, Value::String("0x".to_string()));

        let result = transport.invoke("eth_call", vec![]).await.unwrap();
        assert_eq!(result, "0x");
    }

    #[tokio::test]
    async fn test_mock_transport_custom_response() {
        let transport = MockTransport::new();
        transport.set_response("eth_call", Value::String("0x01".to_string()));

        let result = transport.invoke("eth_call", vec![]).await.unwrap();
        assert_eq!(result, "0x01");

        transport.clear_responses();
        assert_eq!(transport.invoke("eth_call", vec![]).await.unwrap(), "0x");
    }

    #[tokio::test]
    async fn test_mock_transport_unknown_method() {
        let transport = MockTransport::new();
        let result = transport.request_json("unknown_method", vec![]).await;
        assert!(matches!(result, Err(SdkError::Rpc { code: -32601, .. })));
    }

    #[tokio::test]
    async fn test_invoke_rejects_non_string() {
        let transport = MockTransport::new();
        transport.set_response("eth_call", serde_json::json!({"x": 1}));
        assert!(matches!(
            transport.invoke("eth_call", vec![]).await,
            Err(SdkError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_requests_recorded() {
        let transport = MockTransport::new();
        transport
            .request_json("eth_call", vec![Value::Bool(true)])
            .await
            .unwrap();
        assert_eq!(
            transport.requests(),
            vec![RecordedRequest {
                method: "eth_call".to_string(),
                params: vec![Value::Bool(true)],
            }]
        );
    }

    #[tokio::test]
    async fn test_mock_subscribe() {
        let transport = MockTransport::new();
        assert!(transport.subscribe("logs", vec![]).await.is_err());

        let tx = transport.push_channel("logs", 4);
        let mut sub = transport.subscribe("logs", vec![]).await.unwrap();
        tx.send("0xabcd".to_string()).await.unwrap();
        drop(tx);

        assert_eq!(sub.next_payload().await.as_deref(), Some("0xabcd"));
        assert!(sub.next_payload().await.is_none());
    }
}

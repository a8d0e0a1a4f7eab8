//! Contract client integration tests for bach-sdk
//!
//! Tests call encoding through the mock transport, deployments and push
//! payload subscriptions.

use std::sync::Arc;

use bach_sdk::contract::{erc20, ERC20_INTERFACE};
use bach_sdk::types::{BlockId, TransactionParams};
use bach_sdk::{
    Address, ContractClient, DescriptorTable, MockTransport, SdkError, Transport, Value, U256,
};
use serde_json::json;

const STORE_ABI: &str = r#"[
    {"type":"constructor","inputs":[{"name":"initial","type":"string"}]},
    {"type":"function","name":"get","inputs":[],"outputs":[
        {"name":"","type":"uint256"},{"name":"","type":"string"}],"stateMutability":"view"},
    {"type":"function","name":"set","inputs":[{"name":"v","type":"string"}],"outputs":[]},
    {"type":"event","name":"Changed","inputs":[
        {"name":"who","type":"address","indexed":true},
        {"name":"v","type":"string","indexed":false}]}
]"#;

fn token() -> Address {
    Address::from_hex("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48").unwrap()
}

fn owner() -> Address {
    Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap()
}

fn word(value: u64) -> String {
    format!("{:064x}", value)
}

// ==================== Call Tests ====================

#[tokio::test]
async fn test_call_returns_chunks() {
    let transport = MockTransport::new();
    transport.set_response("eth_call", json!(format!("0x{}", word(1_000))));
    let client = erc20(transport, token()).unwrap();

    let chunks = client
        .call(
            TransactionParams::from(owner()),
            "balanceOf",
            0,
            &[Value::Address(owner())],
        )
        .await
        .unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks.decode_uint(0).unwrap(), U256::from(1_000));
}

#[tokio::test]
async fn test_call_sends_encoded_params() {
    let table = Arc::new(DescriptorTable::from_json(ERC20_INTERFACE).unwrap());
    let transport = Arc::new(MockTransport::new());
    let client = ContractClient::new(table, SharedMock(transport.clone()))
        .at(token())
        .with_block(BlockId::Number(16));

    client
        .call(
            TransactionParams {
                from: Some(owner()),
                data: Some("0xstale".to_string()),
                ..Default::default()
            },
            "balanceOf",
            0,
            &[Value::Address(owner())],
        )
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "eth_call");

    let params = &requests[0].params;
    assert_eq!(params[0]["to"], token().to_hex());
    assert_eq!(params[0]["from"], owner().to_hex());
    assert_eq!(
        params[0]["data"],
        format!("0x70a08231{}", owner().to_word().to_hex_digits())
    );
    assert_eq!(params[1], "0x10");
}

#[tokio::test]
async fn test_call_decoded_uses_outputs() {
    let transport = MockTransport::new();
    transport.set_response(
        "eth_call",
        json!(format!(
            "0x{}{}{}{:0<64}",
            word(7),
            word(64),
            word(3),
            hex::encode("abc")
        )),
    );
    let table = Arc::new(DescriptorTable::from_json(STORE_ABI).unwrap());
    let client = ContractClient::new(table, transport).at(token());

    let values = client
        .call_decoded(TransactionParams::default(), "get", 0, &[])
        .await
        .unwrap();
    assert_eq!(values, vec![Value::uint(7), Value::string("abc")]);
}

#[tokio::test]
async fn test_call_without_address_fails() {
    let table = Arc::new(DescriptorTable::from_json(STORE_ABI).unwrap());
    let client = ContractClient::new(table, MockTransport::new());
    let result = client
        .call(TransactionParams::default(), "get", 0, &[])
        .await;
    assert!(matches!(result, Err(SdkError::MissingField(_))));
}

#[tokio::test]
async fn test_call_codec_error_surfaces() {
    let client = erc20(MockTransport::new(), token()).unwrap();
    let result = client
        .call(TransactionParams::default(), "balanceOf", 0, &[])
        .await;
    assert!(matches!(result, Err(SdkError::Abi(_))));
}

// ==================== Transaction Tests ====================

#[tokio::test]
async fn test_send_returns_hash() {
    let client = erc20(MockTransport::new(), token()).unwrap();
    let hash = client
        .send(
            TransactionParams::from(owner()),
            "transfer",
            0,
            &[Value::Address(owner()), Value::uint(5)],
        )
        .await
        .unwrap();
    assert!(hash.starts_with("0x"));
    assert_eq!(hash.len(), 66);
}

#[tokio::test]
async fn test_deploy_appends_constructor_args() {
    let table = Arc::new(DescriptorTable::from_json(STORE_ABI).unwrap());
    let transport = Arc::new(MockTransport::new());
    let client = ContractClient::new(table, SharedMock(transport.clone()));

    client
        .deploy(
            TransactionParams {
                from: Some(owner()),
                to: Some(token()),
                ..Default::default()
            },
            "0x6080\n",
            &[Value::string("hi")],
        )
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].method, "eth_sendTransaction");
    let params = &requests[0].params[0];
    assert!(params.get("to").is_none());
    assert_eq!(
        params["data"],
        format!("0x6080{}{}{:0<64}", word(32), word(2), hex::encode("hi"))
    );
}

#[tokio::test]
async fn test_rpc_error_propagates() {
    let transport = MockTransport::new();
    let table = Arc::new(DescriptorTable::from_json(STORE_ABI).unwrap());
    // No default response for this method
    let result = transport.invoke("eth_unknown", vec![]).await;
    assert!(matches!(result, Err(SdkError::Rpc { .. })));

    let client = ContractClient::new(table, transport).at(token());
    assert!(client.transport().invoke("eth_call", vec![]).await.is_ok());
}

// ==================== Subscription Tests ====================

#[tokio::test]
async fn test_subscription_decodes_events() {
    let transport = MockTransport::new();
    let sender = transport.push_channel("eth_subscribe", 8);
    let table = DescriptorTable::from_json(STORE_ABI).unwrap();

    let mut sub = transport
        .subscribe("eth_subscribe", vec![json!("logs")])
        .await
        .unwrap();

    let payload = format!("0x{}{}{:0<64}", word(32), word(5), hex::encode("hello"));
    tokio::spawn(async move {
        sender.send(payload).await.unwrap();
    });

    let chunks = sub.next_chunks().await.unwrap().unwrap();
    assert_eq!(chunks.decode_string(1).unwrap(), "hello");
    assert!(sub.next_chunks().await.is_none());

    let hex: String = chunks.iter().map(|w| w.to_hex_digits()).collect();
    assert_eq!(
        table.decode_event("Changed", 0, &hex).unwrap(),
        vec![Value::string("hello")]
    );
}

/// Lets a test keep a handle on the mock after giving it to a client
struct SharedMock(Arc<MockTransport>);

#[async_trait::async_trait]
impl Transport for SharedMock {
    async fn request_json(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, SdkError> {
        self.0.request_json(method, params).await
    }
}

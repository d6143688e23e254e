//! HTTP node tests against a mock server.

use bytes::Bytes;
use cedra_tx_core::AccountAddress;
use cedra_tx_node::http::{CLIENT_HEADER, CLIENT_NAME, SIGNED_TRANSACTION_CONTENT_TYPE};
use cedra_tx_node::{HttpNode, NodeClient, NodeError};
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn node(server: &MockServer) -> HttpNode {
    HttpNode::new(&format!("{}/v1", server.uri())).unwrap()
}

#[tokio::test]
async fn test_sequence_number() {
    let server = MockServer::start().await;
    let addr = AccountAddress::from_bytes([0xAB; 32]);

    Mock::given(method("GET"))
        .and(path(format!("/v1/accounts/0x{}", "ab".repeat(32))))
        .and(header(CLIENT_HEADER, CLIENT_NAME))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sequence_number": "17",
            "authentication_key": format!("0x{}", "ab".repeat(32)),
        })))
        .mount(&server)
        .await;

    assert_eq!(node(&server).sequence_number(&addr).await.unwrap(), 17);
}

#[tokio::test]
async fn test_unknown_account_is_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("account_not_found"))
        .mount(&server)
        .await;

    let err = node(&server)
        .sequence_number(&AccountAddress::ONE)
        .await
        .unwrap_err();
    match err {
        NodeError::Status { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("account_not_found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_estimate_gas_price() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/estimate_gas_price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "gas_estimate": 100,
            "prioritized_gas_estimate": 150,
            "deprioritized_gas_estimate": 100,
        })))
        .mount(&server)
        .await;

    let est = node(&server).estimate_gas_price().await.unwrap();
    assert_eq!(est.gas_estimate, 100);
    assert_eq!(est.prioritized_gas_estimate, Some(150));
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/estimate_gas_price"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert!(matches!(
        node(&server).estimate_gas_price().await,
        Err(NodeError::Json(_))
    ));
}

#[tokio::test]
async fn test_submit_posts_bcs_body() {
    let server = MockServer::start().await;
    let signed = Bytes::from_static(&[1, 2, 3, 4]);

    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .and(header("content-type", SIGNED_TRANSACTION_CONTENT_TYPE))
        .and(header(CLIENT_HEADER, CLIENT_NAME))
        .and(body_bytes(vec![1, 2, 3, 4]))
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
            "hash": "0xfeed",
            "sender": "0x1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pending = node(&server).submit_transaction(signed).await.unwrap();
    assert_eq!(pending.hash, "0xfeed");
}

#[tokio::test]
async fn test_submit_rejection_keeps_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("SEQUENCE_NUMBER_TOO_OLD"),
        )
        .mount(&server)
        .await;

    let err = node(&server)
        .submit_transaction(Bytes::from_static(&[0]))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("SEQUENCE_NUMBER_TOO_OLD"));
}

#[tokio::test]
async fn test_wait_by_hash() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/transactions/wait_by_hash/0xfeed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hash": "0xfeed",
            "type": "user_transaction",
            "vm_status": "Executed successfully",
            "success": true,
        })))
        .mount(&server)
        .await;

    let status = node(&server).wait_by_hash("0xfeed").await.unwrap();
    assert!(status.is_executed());
}

#[tokio::test]
async fn test_base_url_with_trailing_slash() {
    let server = MockServer::start().await;
    let with_slash = HttpNode::new(&format!("{}/v1/", server.uri())).unwrap();
    let without = node(&server);
    assert_eq!(with_slash.base_url(), without.base_url());
}

#[test]
fn test_invalid_url() {
    assert!(matches!(HttpNode::new("not a url"), Err(NodeError::Url(_))));
}

use async_trait::async_trait;
use bazaar_api::{ApiClient, ApiError, CreateOfferInput, GraphQlTransport, OfferPriceInput};
use bazaar_core::OfferKind;
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// A transport that records every request and replays a canned response.
struct MockTransport {
    requests: Mutex<Vec<(String, Value)>>,
    response: Result<Value, Vec<String>>,
}

impl MockTransport {
    fn replying(response: Value) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: Ok(response),
        })
    }

    fn failing(messages: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response: Err(messages.into_iter().map(String::from).collect()),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GraphQlTransport for MockTransport {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push((query.to_string(), variables));
        match &self.response {
            Ok(data) => Ok(data.clone()),
            Err(messages) => Err(ApiError::GraphQl(messages.clone())),
        }
    }
}

fn sale_input() -> CreateOfferInput {
    CreateOfferInput {
        token_id: "77".to_string(),
        contract_address: "0xabc".to_string(),
        kind: OfferKind::Sale,
        price: OfferPriceInput {
            currency: "ETH".to_string(),
            amount: "1500000000000000000".to_string(),
        },
        supply: 1,
        start_time: Utc::now(),
        end_time: None,
        signature: Some("0xsig".to_string()),
        blockchain_id: "7:V2".to_string(),
        voucher: None,
    }
}

#[tokio::test]
async fn create_offer_deserializes_record() -> anyhow::Result<()> {
    let transport = MockTransport::replying(json!({
        "createOfferForItems": {
            "id": "offer-1",
            "type": "SALE",
            "blockchainId": "7:V2",
            "supply": 1
        }
    }));
    let client = ApiClient::with_transport(transport.clone());

    let record = client.create_offer(sale_input()).await?;
    assert_eq!(record.id, "offer-1");
    assert_eq!(record.kind, OfferKind::Sale);
    assert_eq!(transport.request_count(), 1);

    let (query, variables) = transport.requests.lock().unwrap()[0].clone();
    assert!(query.contains("createOfferForItems"));
    assert_eq!(
        variables["input"]["price"]["amount"],
        json!("1500000000000000000")
    );
    Ok(())
}

#[tokio::test]
async fn graphql_errors_surface_without_retry() {
    let transport = MockTransport::failing(vec!["offer already exists"]);
    let client = ApiClient::with_transport(transport.clone());

    let err = client.create_offer(sale_input()).await.unwrap_err();
    assert!(matches!(err, ApiError::GraphQl(ref msgs) if msgs[0] == "offer already exists"));
    // one attempt only
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn missing_root_field_is_an_error() {
    let transport = MockTransport::replying(json!({ "somethingElse": true }));
    let client = ApiClient::with_transport(transport);

    let err = client.cancel_offer("offer-1").await.unwrap_err();
    assert!(matches!(err, ApiError::MissingField(ref f) if f == "cancelOffer"));
}

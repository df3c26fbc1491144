use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use bazaar_api::{ApiClient, ApiError, GraphQlTransport};
use bazaar_core::{ChainId, Error as CoreError, ItemDescriptor, OfferKind, Price, TokenType};
use bazaar_evm::contracts::{IAuction, IErc1155, IErc721, ISaleNonceHolder};
use bazaar_evm::sale::sale_params_hash;
use bazaar_evm::{
    BuyParams, ContractKind, ContractRegistry, EvmClient, EvmError, EvmNft, EvmProvider,
    PutForSaleParams,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

const ACCOUNT: Address = Address::repeat_byte(0xAA);
const TOKEN: Address = Address::repeat_byte(0x11);
const PROXY: Address = Address::repeat_byte(0x22);
const NONCE_HOLDER: Address = Address::repeat_byte(0x33);
const SALE: Address = Address::repeat_byte(0x44);
const AUCTION: Address = Address::repeat_byte(0x55);
const AIRDROP: Address = Address::repeat_byte(0x66);

/// A provider that scripts read results and records everything.
struct MockProvider {
    approved: bool,
    nonce: u64,
    calls: Mutex<Vec<(Address, Vec<u8>)>>,
    sends: Mutex<Vec<(Address, Vec<u8>, U256)>>,
    signed: Mutex<Vec<Vec<u8>>>,
}

impl MockProvider {
    fn new(approved: bool, nonce: u64) -> Arc<Self> {
        Arc::new(Self {
            approved,
            nonce,
            calls: Mutex::new(Vec::new()),
            sends: Mutex::new(Vec::new()),
            signed: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl EvmProvider for MockProvider {
    fn address(&self) -> Address {
        ACCOUNT
    }

    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>, EvmError> {
        self.calls.lock().unwrap().push((to, data.clone()));
        let selector: [u8; 4] = data[..4].try_into().unwrap();
        if selector == IErc1155::isApprovedForAllCall::SELECTOR {
            Ok(self.approved.abi_encode())
        } else if selector == ISaleNonceHolder::getNonceCall::SELECTOR {
            Ok(U256::from(self.nonce).abi_encode())
        } else if selector == IAuction::getAuctionIdCall::SELECTOR {
            Ok(U256::from(9u64).abi_encode())
        } else {
            Err(EvmError::Rpc("unexpected call".to_string()))
        }
    }

    async fn send(&self, to: Address, data: Vec<u8>, value: U256) -> Result<B256, EvmError> {
        self.sends.lock().unwrap().push((to, data, value));
        Ok(B256::repeat_byte(0x42))
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, EvmError> {
        self.signed.lock().unwrap().push(message.to_vec());
        // legacy recovery byte; the client must rewrite it to 27
        let mut sig = vec![0x01u8; 64];
        sig.push(0);
        Ok(sig)
    }
}

struct MockTransport {
    requests: Mutex<Vec<(String, Value)>>,
    response: Value,
}

impl MockTransport {
    fn replying(response: Value) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response,
        })
    }
}

#[async_trait]
impl GraphQlTransport for MockTransport {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push((query.to_string(), variables));
        Ok(self.response.clone())
    }
}

fn registry() -> ContractRegistry {
    ContractRegistry::new()
        .with(ContractKind::TransferProxy, PROXY)
        .with(ContractKind::Erc1155Sale, SALE)
        .with(ContractKind::Erc1155SaleNonceHolder, NONCE_HOLDER)
        .with(ContractKind::Erc1155Auction, AUCTION)
        .with(ContractKind::Erc1155Airdrop, AIRDROP)
        .with(ContractKind::Erc721Sale, SALE)
        .with(ContractKind::Erc721SaleNonceHolder, NONCE_HOLDER)
        .with(ContractKind::Erc721Auction, AUCTION)
        .with(ContractKind::Erc721Airdrop, AIRDROP)
}

fn sale_response() -> Value {
    json!({
        "createOfferForItems": {
            "id": "offer-1",
            "type": "SALE",
            "blockchainId": "7:V2",
            "supply": 1
        }
    })
}

fn item() -> ItemDescriptor {
    ItemDescriptor::new(TOKEN.to_string(), ChainId::ETHEREUM, "7").with_supply(1, 10)
}

#[tokio::test]
async fn put_for_sale_end_to_end() -> anyhow::Result<()> {
    let provider = MockProvider::new(false, 6);
    let transport = MockTransport::replying(sale_response());
    let client = EvmClient::new(
        provider.clone(),
        ApiClient::with_transport(transport.clone()),
        registry(),
    );

    let nft = client.create_nft(TokenType::Erc1155, item())?;
    let offer = nft
        .put_for_sale(PutForSaleParams {
            price: Price::new("ETH", 1.5),
            supply: 1,
            start_time: None,
            end_time: None,
        })
        .await?;

    // (a) the approval state was checked, and being unapproved, one
    // setApprovalForAll transaction went to the token contract
    let calls = provider.calls.lock().unwrap();
    let approval_checks = calls
        .iter()
        .filter(|(to, data)| {
            *to == TOKEN && data[..4] == IErc1155::isApprovedForAllCall::SELECTOR
        })
        .count();
    assert_eq!(approval_checks, 1);
    let sends = provider.sends.lock().unwrap();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].0, TOKEN);
    assert_eq!(sends[0].1[..4], IErc1155::setApprovalForAllCall::SELECTOR);

    // (b) the signed message is the deterministic sale-parameters hash
    let expected = sale_params_hash(
        TOKEN,
        U256::from(7),
        Address::ZERO,
        U256::from(1_500_000_000_000_000_000u128),
        1,
        6,
    );
    let signed = provider.signed.lock().unwrap();
    assert_eq!(signed.len(), 1);
    assert_eq!(signed[0], expected.to_vec());

    // (c) exactly one API mutation, amount in the smallest unit, and the
    // composite id derived from nonce + 1
    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let input = &requests[0].1["input"];
    assert_eq!(input["price"]["amount"], json!("1500000000000000000"));
    assert_eq!(input["price"]["currency"], json!("ETH"));
    assert_eq!(input["supply"], json!(1));
    assert_eq!(input["blockchainId"], json!("7:V2"));
    // the normalized signature ends on 1b, not 00
    let signature = input["signature"].as_str().unwrap();
    assert!(signature.ends_with("1b"));

    // (d) the returned offer is a Sale
    assert_eq!(offer.record.kind, OfferKind::Sale);
    assert_eq!(offer.id(), "offer-1");
    Ok(())
}

#[tokio::test]
async fn approval_is_skipped_when_already_granted() -> anyhow::Result<()> {
    let provider = MockProvider::new(true, 6);
    let transport = MockTransport::replying(sale_response());
    let client = EvmClient::new(
        provider.clone(),
        ApiClient::with_transport(transport),
        registry(),
    );

    let nft = client.create_nft(TokenType::Erc1155, item())?;
    nft.put_for_sale(PutForSaleParams {
        price: Price::new("ETH", 1.5),
        supply: 1,
        start_time: None,
        end_time: None,
    })
    .await?;

    // no setApprovalForAll transaction this time
    assert!(provider.sends.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_token_type_is_not_dispatched() {
    let provider = MockProvider::new(false, 0);
    let transport = MockTransport::replying(json!({}));
    let client = EvmClient::new(provider, ApiClient::with_transport(transport), registry());

    let err = client.create_nft(TokenType::Spl, item()).unwrap_err();
    assert!(matches!(
        err,
        EvmError::Core(CoreError::UnsupportedTokenType(TokenType::Spl))
    ));
}

#[tokio::test]
async fn unknown_chain_fails_at_construction() {
    let provider = MockProvider::new(false, 0);
    let transport = MockTransport::replying(json!({}));
    let client = EvmClient::new(provider, ApiClient::with_transport(transport), registry());

    let mut bad_item = item();
    bad_item.chain_id = ChainId(424_242);
    let err = client.create_nft(TokenType::Erc1155, bad_item).unwrap_err();
    assert!(matches!(
        err,
        EvmError::Core(CoreError::UnsupportedChain(ChainId(424_242)))
    ));
}

#[tokio::test]
async fn operations_without_an_item_fail() -> anyhow::Result<()> {
    let provider = MockProvider::new(false, 0);
    let transport = MockTransport::replying(json!({}));
    let client = EvmClient::new(provider, ApiClient::with_transport(transport), registry());

    let nft = bazaar_evm::Erc1155Nft::detached(Arc::clone(&client), ChainId::ETHEREUM)?;
    let err = nft
        .put_for_sale(PutForSaleParams {
            price: Price::new("ETH", 1.0),
            supply: 1,
            start_time: None,
            end_time: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EvmError::Core(CoreError::MissingItem)));
    Ok(())
}

#[tokio::test]
async fn buy_rejects_malformed_blockchain_ids() -> anyhow::Result<()> {
    let provider = MockProvider::new(true, 6);
    let transport = MockTransport::replying(json!({}));
    let client = EvmClient::new(provider, ApiClient::with_transport(transport), registry());

    let nft = client.create_nft(TokenType::Erc1155, item())?;
    let err = nft
        .buy(BuyParams {
            blockchain_id: "not-a-sale-id".to_string(),
            signature: vec![0u8; 65],
            price: Price::new("ETH", 1.0),
            owner: Address::repeat_byte(0x99),
            supply: 1,
            amount: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EvmError::Core(CoreError::InvalidSaleId(_))));
    Ok(())
}

#[tokio::test]
async fn native_buy_attaches_value() -> anyhow::Result<()> {
    let provider = MockProvider::new(true, 6);
    let transport = MockTransport::replying(json!({}));
    let client = EvmClient::new(
        provider.clone(),
        ApiClient::with_transport(transport),
        registry(),
    );

    let nft = client.create_nft(TokenType::Erc1155, item())?;
    nft.buy(BuyParams {
        blockchain_id: "7:V2".to_string(),
        signature: vec![0u8; 65],
        price: Price::new("ETH", 0.5),
        owner: Address::repeat_byte(0x99),
        supply: 1,
        amount: Some(2),
    })
    .await?;

    let sends = provider.sends.lock().unwrap();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].0, SALE);
    // two editions at 0.5 ETH each
    assert_eq!(sends[0].2, U256::from(1_000_000_000_000_000_000u128));
    Ok(())
}

#[tokio::test]
async fn put_for_auction_submits_chain_call_then_mutation() -> anyhow::Result<()> {
    let provider = MockProvider::new(true, 6);
    let transport = MockTransport::replying(json!({
        "createOfferForItems": {
            "id": "offer-2",
            "type": "AUCTION",
            "blockchainId": "9:V2"
        }
    }));
    let client = EvmClient::new(
        provider.clone(),
        ApiClient::with_transport(transport.clone()),
        registry(),
    );

    let nft = client.create_nft(TokenType::Erc1155, item())?;
    let start = chrono::Utc::now();
    let (tx, offer) = nft
        .put_for_auction(bazaar_evm::PutForAuctionParams {
            price: Price::new("ETH", 2.0),
            start_time: start,
            end_time: start + chrono::Duration::days(3),
        })
        .await?;

    assert_eq!(tx.hash(), B256::repeat_byte(0x42));
    assert_eq!(offer.record.kind, OfferKind::Auction);
    // on-chain auction id 9 round-trips through the composite id
    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1["input"]["blockchainId"], json!("9:V2"));
    Ok(())
}

#[tokio::test]
async fn erc721_transfer_uses_transfer_from() -> anyhow::Result<()> {
    let provider = MockProvider::new(true, 6);
    let transport = MockTransport::replying(json!({}));
    let client = EvmClient::new(
        provider.clone(),
        ApiClient::with_transport(transport),
        registry(),
    );

    let nft = client.create_nft(TokenType::Erc721, item())?;
    let recipient = Address::repeat_byte(0x77);
    nft.transfer(ACCOUNT, recipient, 5).await?;

    let sends = provider.sends.lock().unwrap();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].0, TOKEN);
    let call = IErc721::transferFromCall::abi_decode(&sends[0].1, true)?;
    assert_eq!(call.from, ACCOUNT);
    assert_eq!(call.to, recipient);
    assert_eq!(call.tokenId, U256::from(7));
    Ok(())
}

#[tokio::test]
async fn erc721_burn_targets_only_the_token_id() -> anyhow::Result<()> {
    let provider = MockProvider::new(true, 6);
    let transport = MockTransport::replying(json!({}));
    let client = EvmClient::new(
        provider.clone(),
        ApiClient::with_transport(transport),
        registry(),
    );

    let nft = client.create_nft(TokenType::Erc721, item())?;
    nft.burn(5, Address::repeat_byte(0x99)).await?;

    let sends = provider.sends.lock().unwrap();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].0, TOKEN);
    // burn(uint256) carries no owner or amount for a single edition
    let call = IErc721::burnCall::abi_decode(&sends[0].1, true)?;
    assert_eq!(call.tokenId, U256::from(7));
    Ok(())
}

#[tokio::test]
async fn erc721_sale_is_hashed_with_a_single_edition() -> anyhow::Result<()> {
    let provider = MockProvider::new(true, 6);
    let transport = MockTransport::replying(sale_response());
    let client = EvmClient::new(
        provider.clone(),
        ApiClient::with_transport(transport.clone()),
        registry(),
    );

    let nft = client.create_nft(TokenType::Erc721, item())?;
    nft.put_for_sale(PutForSaleParams {
        price: Price::new("ETH", 1.5),
        supply: 5,
        start_time: None,
        end_time: None,
    })
    .await?;

    // supply 5 in the params is forced down to 1, in the signed hash and
    // in the mutation alike
    let expected = sale_params_hash(
        TOKEN,
        U256::from(7),
        Address::ZERO,
        U256::from(1_500_000_000_000_000_000u128),
        1,
        6,
    );
    let signed = provider.signed.lock().unwrap();
    assert_eq!(signed.len(), 1);
    assert_eq!(signed[0], expected.to_vec());

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests[0].1["input"]["supply"], json!(1));
    Ok(())
}

use bazaar_core::{chain, ChainId, Error, OfferKind, OfferRecord};

#[test]
fn registry_knows_builtin_chains() {
    for id in [
        ChainId::ETHEREUM,
        ChainId::BSC,
        ChainId::POLYGON,
        ChainId::SOLANA_MAINNET,
    ] {
        let config = chain::chain_config(id).expect("builtin chain missing");
        assert_eq!(config.chain_id, id);
        assert!(!config.supported_currencies.is_empty());
    }
}

#[test]
fn unknown_chain_is_rejected() {
    let bogus = ChainId(999_999);
    assert!(chain::chain_config(bogus).is_none());
    assert!(matches!(
        chain::require_chain(bogus),
        Err(Error::UnsupportedChain(id)) if id == bogus
    ));
}

#[test]
fn currency_lookup_by_symbol() {
    let eth = chain::require_chain(ChainId::ETHEREUM).unwrap();
    let native = eth.currency("ETH").unwrap();
    assert!(native.native);
    assert_eq!(native.decimals, 18);
    assert!(native.address.is_empty());

    let usdc = eth.currency("USDC").unwrap();
    assert!(!usdc.native);
    assert_eq!(usdc.decimals, 6);

    assert!(matches!(
        eth.currency("DOGE"),
        Err(Error::UnsupportedCurrency(s)) if s == "DOGE"
    ));
    assert_eq!(eth.is_native_currency("ETH").unwrap(), true);
    assert_eq!(eth.is_native_currency("USDC").unwrap(), false);
}

#[test]
fn offer_record_deserializes_from_api_shape() {
    let json = r#"{
        "id": "offer-1",
        "type": "SALE",
        "blockchainId": "7:V2",
        "price": { "currency": "ETH", "amount": "1500000000000000000" },
        "supply": 1
    }"#;
    let record: OfferRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.kind, OfferKind::Sale);
    assert_eq!(record.blockchain_id.as_deref(), Some("7:V2"));
    assert_eq!(record.price.unwrap().amount, "1500000000000000000");
}

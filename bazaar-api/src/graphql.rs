pub const CREATE_OFFER: &str = r#"
mutation createOfferForItems($input: CreateOfferInput!) {
  createOfferForItems(input: $input) {
    id
    type
    blockchainId
    price {
      currency
      amount
    }
    supply
    startTime
    endTime
    signature
  }
}
"#;

pub const REFRESH_METADATA: &str = r#"
mutation refreshMetadata($input: RefreshMetadataInput!) {
  refreshMetadata(input: $input)
}
"#;

pub const CANCEL_OFFER: &str = r#"
mutation cancelOffer($id: ID!) {
  cancelOffer(id: $id)
}
"#;

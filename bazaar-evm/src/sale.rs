use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::SolValue;

/// Computes the hash the seller signs over when listing.
///
/// The packing order (token, tokenId, payToken, amount, supply, nonce)
/// must match what the sale contract reconstructs at purchase time.
pub fn sale_params_hash(
    token: Address,
    token_id: U256,
    pay_token: Address,
    amount: U256,
    supply: u64,
    nonce: u64,
) -> B256 {
    let packed = (
        token,
        token_id,
        pay_token,
        amount,
        U256::from(supply),
        U256::from(nonce),
    )
        .abi_encode_packed();
    keccak256(packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_and_input_sensitive() {
        let token = Address::repeat_byte(0x11);
        let pay = Address::ZERO;
        let a = sale_params_hash(token, U256::from(7), pay, U256::from(100), 1, 3);
        let b = sale_params_hash(token, U256::from(7), pay, U256::from(100), 1, 3);
        assert_eq!(a, b);

        let c = sale_params_hash(token, U256::from(7), pay, U256::from(100), 1, 4);
        assert_ne!(a, c);
    }
}

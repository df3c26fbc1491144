//! Marketplace contract interfaces and the address registry.
//!
//! The interfaces are versioned external contracts; only the entry points
//! the SDK actually calls are declared. Addresses differ per deployment,
//! so the registry is populated by the caller at client construction.

use crate::error::EvmError;
use alloy_primitives::Address;
use alloy_sol_types::sol;
use std::collections::HashMap;
use std::fmt;

sol! {
    /// The subset of ERC-20 used for non-native auction bids.
    interface IErc20 {
        function approve(address spender, uint256 amount) external returns (bool ok);
    }

    /// The subset of ERC-721 the handlers call. Approval entry points are
    /// shared with ERC-1155 (identical signatures and selectors).
    interface IErc721 {
        function isApprovedForAll(address owner, address operator) external view returns (bool approved);
        function setApprovalForAll(address operator, bool approved) external;
        function transferFrom(address from, address to, uint256 tokenId) external;
        function burn(uint256 tokenId) external;
    }

    /// The subset of ERC-1155 the handlers call.
    interface IErc1155 {
        function isApprovedForAll(address account, address operator) external view returns (bool approved);
        function setApprovalForAll(address operator, bool approved) external;
        function safeTransferFrom(address from, address to, uint256 id, uint256 amount, bytes data) external;
        function burn(address account, uint256 id, uint256 amount) external;
    }

    /// The fixed-price sale contract.
    interface ISale {
        function buy(
            address token,
            uint256 tokenId,
            address payToken,
            uint256 amount,
            uint256 selling,
            address owner,
            bytes signature
        ) external payable;
        function buyWithVoucher(
            address token,
            uint256 tokenId,
            address payToken,
            uint256 amount,
            uint256 selling,
            address owner,
            bytes signature,
            bytes voucher
        ) external payable;
        function cancel(address token, uint256 tokenId) external;
    }

    /// Tracks per-(token, tokenId, owner) sale nonces; the next nonce is
    /// the raw id of the next sale.
    interface ISaleNonceHolder {
        function getNonce(address token, uint256 tokenId, address owner) external view returns (uint256 nonce);
    }

    /// The auction contract.
    interface IAuction {
        function createAuction(
            address token,
            uint256 tokenId,
            address payToken,
            uint256 minBid,
            uint256 startTime,
            uint256 endTime
        ) external;
        function getAuctionId(address token, uint256 tokenId, address owner) external view returns (uint256 auctionId);
        function placeBid(uint256 auctionId, uint256 amount) external payable;
        function cancelAuction(uint256 auctionId) external;
        function endAuction(uint256 auctionId) external;
    }

    /// Batch distribution of editions to a recipient list.
    interface IAirdrop {
        function airdrop(address token, uint256[] tokenIds, address[] recipients) external;
    }
}

/// The marketplace contract roles a deployment provides per chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Erc721Sale,
    Erc1155Sale,
    Erc721SaleNonceHolder,
    Erc1155SaleNonceHolder,
    Erc721Auction,
    Erc1155Auction,
    Erc721Airdrop,
    Erc1155Airdrop,
    TransferProxy,
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContractKind::Erc721Sale => "ERC721_SALE",
            ContractKind::Erc1155Sale => "ERC1155_SALE",
            ContractKind::Erc721SaleNonceHolder => "ERC721_SALE_NONCE_HOLDER",
            ContractKind::Erc1155SaleNonceHolder => "ERC1155_SALE_NONCE_HOLDER",
            ContractKind::Erc721Auction => "ERC721_AUCTION",
            ContractKind::Erc1155Auction => "ERC1155_AUCTION",
            ContractKind::Erc721Airdrop => "ERC721_AIRDROP",
            ContractKind::Erc1155Airdrop => "ERC1155_AIRDROP",
            ContractKind::TransferProxy => "TRANSFER_PROXY",
        };
        write!(f, "{s}")
    }
}

/// The deployment's contract addresses, keyed by role.
///
/// Built once at client construction; lookups for unregistered roles fail
/// with [`EvmError::MissingContract`].
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    addresses: HashMap<ContractKind, Address>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: ContractKind, address: Address) -> Self {
        self.addresses.insert(kind, address);
        self
    }

    pub fn address(&self, kind: ContractKind) -> Result<Address, EvmError> {
        self.addresses
            .get(&kind)
            .copied()
            .ok_or(EvmError::MissingContract(kind))
    }
}

//! In-memory wallet and contract doubles for session tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use eth_rpc_client::{ContractReader, WalletProvider};
use eth_tx::{encode_uint256, TxRequest};
use minter_core::{Address, RpcError, TxHash, WalletError};

pub const ACCOUNT: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
pub const CONTRACT: &str = "0x2222222222222222222222222222222222222222";

pub fn good_hash(byte: u8) -> String {
    format!("0x{}", hex::encode([byte; 32]))
}

pub enum SendOutcome {
    Hash(String),
    Reject,
    Timeout,
}

pub struct FakeWallet {
    present: bool,
    accounts: Vec<Address>,
    reject_accounts: bool,
    authorized: bool,
    outcomes: Mutex<VecDeque<SendOutcome>>,
    sent: Mutex<Vec<TxRequest>>,
    prompts: AtomicUsize,
}

impl FakeWallet {
    pub fn with_accounts(accounts: Vec<Address>) -> Self {
        Self {
            present: true,
            accounts,
            reject_accounts: false,
            authorized: false,
            outcomes: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn with_account() -> Self {
        Self::with_accounts(vec![Address::new(ACCOUNT)])
    }

    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::with_accounts(vec![])
        }
    }

    pub fn rejecting_accounts() -> Self {
        Self {
            reject_accounts: true,
            ..Self::with_account()
        }
    }

    pub fn authorized(mut self, authorized: bool) -> Self {
        self.authorized = authorized;
        self
    }

    /// Queue results for successive `send_transaction` calls
    pub fn sending(self, outcomes: Vec<SendOutcome>) -> Self {
        *self.outcomes.lock().unwrap() = outcomes.into();
        self
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<TxRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl WalletProvider for FakeWallet {
    fn is_present(&self) -> bool {
        self.present
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        if self.reject_accounts {
            return Err(WalletError::Rejected {
                message: "User rejected the request.".to_string(),
            });
        }
        Ok(self.accounts.clone())
    }

    async fn authorized_accounts(&self) -> Result<Vec<Address>, WalletError> {
        if self.authorized {
            Ok(self.accounts.clone())
        } else {
            Ok(vec![])
        }
    }

    async fn send_transaction(&self, tx: &TxRequest) -> Result<TxHash, WalletError> {
        self.sent.lock().unwrap().push(tx.clone());
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(SendOutcome::Hash(good_hash(0xab)));

        match outcome {
            SendOutcome::Hash(h) => Ok(TxHash::new(h)),
            SendOutcome::Reject => Err(WalletError::Rejected {
                message: "MetaMask Tx Signature: User denied transaction signature.".to_string(),
            }),
            SendOutcome::Timeout => Err(WalletError::Transport(RpcError::Timeout { secs: 30 })),
        }
    }
}

pub struct FakeReader {
    contract: Address,
    words: Mutex<HashMap<&'static str, u128>>,
}

impl FakeReader {
    /// Contract reporting the given counters
    pub fn new(total: u64, max: u64, free: u64, price: u128) -> Self {
        let words = [
            (nft_mint::constants::TOTAL_SUPPLY, total as u128),
            (nft_mint::constants::MAX_SUPPLY, max as u128),
            (nft_mint::constants::FREE_MINT_AMOUNT, free as u128),
            (nft_mint::constants::MINT_PRICE, price),
        ]
        .into_iter()
        .collect();

        Self {
            contract: Address::new(CONTRACT),
            words: Mutex::new(words),
        }
    }

    /// Contract that reverts every call
    pub fn broken() -> Self {
        Self {
            contract: Address::new(CONTRACT),
            words: Mutex::new(HashMap::new()),
        }
    }

    /// Simulate other mints landing on chain
    pub fn set_total_supply(&self, total: u64) {
        self.words
            .lock()
            .unwrap()
            .insert(nft_mint::constants::TOTAL_SUPPLY, total as u128);
    }
}

impl ContractReader for FakeReader {
    fn contract(&self) -> &Address {
        &self.contract
    }

    async fn call(&self, signature: &str, _args: &[u128]) -> Result<Vec<u8>, RpcError> {
        self.words
            .lock()
            .unwrap()
            .get(signature)
            .map(|w| encode_uint256(*w).to_vec())
            .ok_or_else(|| RpcError::ApiError {
                code: 3,
                message: "execution reverted".to_string(),
            })
    }
}

//! Balances, allowances and total supply of a single token.
//!
//! Every mutating operation validates all of its preconditions before it
//! writes anything, so a refused operation leaves the ledger exactly as it
//! was. Amounts only ever change through checked arithmetic.
//!
//! The ledger keeps `total_supply == Σ balances` at all times: it starts
//! out empty or is rebuilt from a snapshot whose supply is recomputed from
//! its balances, and only `mint`/`burn` move supply, together with exactly
//! one balance.
use compute_sdk::{Address, Amount};
use log::trace;
use serde::{Deserialize, Serialize};
use state::{Access, InMemoryStore};

use crate::error::{LedgerError, RestoreError};
use crate::event::Event;

pub const DEFAULT_DECIMALS: u8 = 18;

/// Whether `approve` accepts the zero address as owner or spender.
///
/// `transfer`, `mint` and `burn` always refuse the zero address. Approving on
/// its behalf moves no tokens, so a deployment may choose to allow it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalPolicy {
    #[default]
    RejectZeroAddress,
    AllowZeroAddress,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenMetadata {
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals: DEFAULT_DECIMALS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ledger {
    metadata: TokenMetadata,
    total_supply: Amount,
    /// Only non-zero balances are stored.
    balances: InMemoryStore<Address, Amount>,
    /// Keyed by `(owner, spender)`. Only non-zero allowances are stored.
    allowances: InMemoryStore<(Address, Address), Amount>,
    approval_policy: ApprovalPolicy,
    events: Vec<Event>,
}

impl Ledger {
    /// An empty ledger with [`DEFAULT_DECIMALS`] decimals.
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self::with_metadata(TokenMetadata::new(name, symbol))
    }

    #[must_use]
    pub fn with_metadata(metadata: TokenMetadata) -> Self {
        Self {
            metadata,
            total_supply: Amount::ZERO,
            balances: InMemoryStore::new(),
            allowances: InMemoryStore::new(),
            approval_policy: ApprovalPolicy::default(),
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.metadata.decimals = decimals;
        self
    }

    #[must_use]
    pub fn with_approval_policy(mut self, approval_policy: ApprovalPolicy) -> Self {
        self.approval_policy = approval_policy;
        self
    }

    /// Rebuilds a ledger from previously exported state.
    ///
    /// The total supply is recomputed from `balances`; `declared_supply`, if
    /// given, must agree with it. Zero entries are dropped.
    ///
    /// # Errors
    ///
    /// Errors if a balance belongs to the zero address, if the zero address
    /// appears in an allowance while `approval_policy` rejects it, if the
    /// balances overflow when summed, or if the declared supply disagrees.
    pub fn restore(
        metadata: TokenMetadata,
        approval_policy: ApprovalPolicy,
        declared_supply: Option<Amount>,
        balances: impl IntoIterator<Item = (Address, Amount)>,
        allowances: impl IntoIterator<Item = ((Address, Address), Amount)>,
    ) -> Result<Self, RestoreError> {
        let mut ledger = Self::with_metadata(metadata).with_approval_policy(approval_policy);

        for (account, balance) in balances {
            if account.is_zero() {
                return Err(RestoreError::ZeroAddress("a balance"));
            }
            ledger.total_supply = ledger
                .total_supply
                .checked_add(balance)
                .ok_or(RestoreError::Overflow)?;
            ledger.write_balance(account, balance);
        }

        for ((owner, spender), allowance) in allowances {
            if approval_policy == ApprovalPolicy::RejectZeroAddress
                && (owner.is_zero() || spender.is_zero())
            {
                return Err(RestoreError::ZeroAddress("an allowance"));
            }
            ledger.write_allowance(owner, spender, allowance);
        }

        match declared_supply {
            Some(declared) if declared != ledger.total_supply =>
                Err(RestoreError::SupplyMismatch {
                    declared,
                    computed: ledger.total_supply,
                }),
            _ => Ok(ledger),
        }
    }

    #[must_use]
    pub fn metadata(&self) -> &TokenMetadata { &self.metadata }

    #[must_use]
    pub fn name(&self) -> &str { &self.metadata.name }

    #[must_use]
    pub fn symbol(&self) -> &str { &self.metadata.symbol }

    #[must_use]
    pub fn decimals(&self) -> u8 { self.metadata.decimals }

    #[must_use]
    pub fn approval_policy(&self) -> ApprovalPolicy { self.approval_policy }

    #[must_use]
    pub fn total_supply(&self) -> Amount { self.total_supply }

    /// Zero for any account without an entry.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Zero unless `owner` has approved `spender`.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Non-zero balances, in no particular order.
    pub fn balances(&self) -> impl Iterator<Item = (Address, Amount)> + '_ {
        self.balances.iter().map(|(account, balance)| (*account, *balance))
    }

    /// Non-zero allowances as `((owner, spender), allowance)`, in no
    /// particular order.
    pub fn allowances(&self) -> impl Iterator<Item = ((Address, Address), Amount)> + '_ {
        self.allowances.iter().map(|(key, allowance)| (*key, *allowance))
    }

    /// Events emitted so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Event] { &self.events }

    pub fn take_events(&mut self) -> Vec<Event> { std::mem::take(&mut self.events) }

    /// Creates `value` tokens owned by `account`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidAccount`] for the zero address,
    /// [`LedgerError::Overflow`] if the supply would exceed the amount range.
    pub fn mint(&mut self, account: Address, value: Amount) -> Result<(), LedgerError> {
        if account.is_zero() {
            return Err(LedgerError::InvalidAccount);
        }
        self.update(Address::ZERO, account, value)
    }

    /// Destroys `value` of the tokens owned by `account`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidAccount`] for the zero address,
    /// [`LedgerError::InsufficientBalance`] if `account` holds less than
    /// `value`.
    pub fn burn(&mut self, account: Address, value: Amount) -> Result<(), LedgerError> {
        if account.is_zero() {
            return Err(LedgerError::InvalidAccount);
        }
        self.update(account, Address::ZERO, value)
    }

    /// Moves `value` tokens from `sender` to `to`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidSender`]/[`LedgerError::InvalidReceiver`] for
    /// the zero address, [`LedgerError::InsufficientBalance`] if `sender`
    /// holds less than `value`.
    pub fn transfer(
        &mut self,
        sender: Address,
        to: Address,
        value: Amount,
    ) -> Result<bool, LedgerError> {
        Self::ensure_transfer_parties(sender, to)?;
        self.update(sender, to, value)?;
        Ok(true)
    }

    /// Sets the allowance of `spender` over `owner`'s tokens to `value`,
    /// replacing any previous allowance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidAccount`] if either party is the zero address
    /// and the ledger's [`ApprovalPolicy`] rejects it.
    pub fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        value: Amount,
    ) -> Result<bool, LedgerError> {
        if self.approval_policy == ApprovalPolicy::RejectZeroAddress
            && (owner.is_zero() || spender.is_zero())
        {
            return Err(LedgerError::InvalidAccount);
        }
        self.write_allowance(owner, spender, value);
        self.emit(Event::Approval {
            owner,
            spender,
            value,
        });
        Ok(true)
    }

    /// Moves `value` tokens from `from` to `to` on behalf of `spender`,
    /// decreasing `spender`'s allowance by `value`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidSender`]/[`LedgerError::InvalidReceiver`] for
    /// the zero address, then [`LedgerError::InsufficientBalance`] if `from`
    /// holds less than `value`, then [`LedgerError::InsufficientAllowance`]
    /// if `spender` may not move that much.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<bool, LedgerError> {
        Self::ensure_transfer_parties(from, to)?;

        let balance = self.balance_of(&from);
        if balance < value {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                balance,
                needed: value,
            });
        }

        let allowance = self.allowance(&from, &spender);
        let remaining = allowance
            .checked_sub(value)
            .ok_or(LedgerError::InsufficientAllowance {
                owner: from,
                spender,
                allowance,
                needed: value,
            })?;

        self.update(from, to, value)?;
        self.write_allowance(from, spender, remaining);
        Ok(true)
    }

    fn ensure_transfer_parties(from: Address, to: Address) -> Result<(), LedgerError> {
        if from.is_zero() {
            return Err(LedgerError::InvalidSender);
        }
        if to.is_zero() {
            return Err(LedgerError::InvalidReceiver);
        }
        Ok(())
    }

    /// Moves `value` from `from` to `to`, where the zero address on either
    /// side stands for minting or burning. Computes every new value first
    /// and writes only once all of them are known to be valid.
    fn update(&mut self, from: Address, to: Address, value: Amount) -> Result<(), LedgerError> {
        let mut supply = self.total_supply;

        let debited = if from.is_zero() {
            supply = supply.checked_add(value).ok_or(LedgerError::Overflow)?;
            None
        } else {
            let balance = self.balance_of(&from);
            let remaining = balance
                .checked_sub(value)
                .ok_or(LedgerError::InsufficientBalance {
                    account: from,
                    balance,
                    needed: value,
                })?;
            Some(remaining)
        };

        let credited = if to.is_zero() {
            // value <= balance(from) <= supply
            supply = supply.checked_sub(value).ok_or(LedgerError::Overflow)?;
            None
        } else {
            let current = match debited {
                Some(remaining) if to == from => remaining,
                _ => self.balance_of(&to),
            };
            Some(current.checked_add(value).ok_or(LedgerError::Overflow)?)
        };

        if let Some(remaining) = debited {
            self.write_balance(from, remaining);
        }
        if let Some(balance) = credited {
            self.write_balance(to, balance);
        }
        self.total_supply = supply;

        self.emit(Event::Transfer { from, to, value });
        Ok(())
    }

    fn write_balance(&mut self, account: Address, balance: Amount) {
        if balance.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.set(account, balance);
        }
    }

    fn write_allowance(&mut self, owner: Address, spender: Address, allowance: Amount) {
        if allowance.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.set((owner, spender), allowance);
        }
    }

    fn emit(&mut self, event: Event) {
        trace!("{event:?}");
        self.events.push(event);
    }
}

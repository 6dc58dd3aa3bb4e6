//! The offer ledger.
//!
//! [`Dotc`] owns the canonical offer table, the asset bank, and the escrow
//! vault bound to it. Makers and takers identify themselves by address on
//! every call; the ledger is the vault's only authorized caller.
//!
//! ## Take flow
//!
//! ```text
//! 1. offer live? pricing mode matches? taker admitted? not expired?
//! 2. rate  = fixed snapshot | live price sources
//! 3. paid  = withdrawal_amount (0 = everything outstanding)
//!    out   = deposit released for `paid` at `rate`
//! 4. fee   = on the withdrawal side if fungible, else on the deposit side
//! 5. preflight: vault holds `out`, taker holds `paid`
//! 6. taker → maker (+ fee receiver, affiliate); vault → taker (+ fees)
//! 7. offer amounts and validity updated, OfferTaken emitted
//! ```
//!
//! Steps 1 to 5 move nothing, so a rejected take leaves all state
//! untouched.

use std::{collections::HashMap, sync::Arc};

use dotc_escrow::{AssetBank, EscrowVault};
use dotc_pricing::{
    calculate_fees, deposit_for_withdrawal, withdrawal_for_deposit, FeeSplit, PriceSource,
    PriceSourceRegistry, PricingEngine,
};
use dotc_types::{
    constants, Address, Asset, AssetKey, DotcError, DotcEvent, EscrowRecord, ManagerConfig,
    Offer, OfferId, OfferTerms, OfferUpdate, OfferValidity, PricingMode, Result, TakingMode, U256,
};

use crate::{
    authorization::{AuthorizationRegistry, TakerAuthorization},
    clock::Clock,
    conservation::{CustodyFlows, SupplyAudit},
    reentrancy::ReentrancyLock,
    validation,
};

/// Which leg of a take carries the protocol fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeSide {
    /// Cut from the taker's payment before it reaches the maker.
    Withdrawal,
    /// Cut from the released deposit before it reaches the taker.
    Deposit,
    /// NFT for NFT swaps carry no fee.
    None,
}

/// What a successful take moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakeOutcome {
    /// Deposit released from escrow, fee included.
    pub deposit_released: U256,
    /// Withdrawal asset paid by the taker, fee included.
    pub withdrawal_paid: U256,
    /// Unit price the take settled at.
    pub unit_price: U256,
    pub fee: FeeSplit,
    pub fee_side: FeeSide,
    pub validity: OfferValidity,
}

/// The OTC offer ledger.
pub struct Dotc<B: AssetBank> {
    config: ManagerConfig,
    bank: B,
    vault: EscrowVault,
    clock: Arc<dyn Clock>,
    price_sources: PriceSourceRegistry,
    authorizations: AuthorizationRegistry,
    /// Offers indexed by id; id `n` lives at position `n`.
    offers: Vec<Offer>,
    /// Offer ids per maker, in creation order.
    offers_by_maker: HashMap<Address, Vec<OfferId>>,
    events: Vec<DotcEvent>,
    audit: SupplyAudit,
    lock: ReentrancyLock,
}

impl<B: AssetBank> Dotc<B> {
    /// Create a ledger over `bank`, with a fresh vault at
    /// `config.vault_address` bound to `config.ledger_address`.
    ///
    /// # Errors
    /// `InvalidConfig` if the config fails validation.
    pub fn new(config: ManagerConfig, bank: B, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let vault = EscrowVault::new(config.vault_address, config.ledger_address);
        tracing::info!(
            ledger = %config.ledger_address,
            vault = %config.vault_address,
            fee_receiver = %config.fee_receiver,
            fee_rate_bps = config.fee_rate_bps,
            "Offer ledger initialized"
        );
        Ok(Self {
            config,
            bank,
            vault,
            clock,
            price_sources: PriceSourceRegistry::new(),
            authorizations: AuthorizationRegistry::new(),
            offers: Vec::new(),
            offers_by_maker: HashMap::new(),
            events: Vec::new(),
            audit: SupplyAudit::new(),
            lock: ReentrancyLock::new(),
        })
    }

    pub fn register_price_source(&mut self, address: Address, source: Arc<dyn PriceSource>) {
        self.price_sources.register(address, source);
    }

    pub fn register_authorization(
        &mut self,
        address: Address,
        contract: Arc<dyn TakerAuthorization>,
    ) {
        self.authorizations.register(address, contract);
    }

    /// Replace the manager config (fees, receiver, price age).
    ///
    /// # Errors
    /// `InvalidConfig` if it fails validation or moves the vault or ledger
    /// address, which are fixed for the life of the ledger.
    pub fn set_manager_config(&mut self, config: ManagerConfig) -> Result<()> {
        config.validate()?;
        if config.vault_address != self.config.vault_address
            || config.ledger_address != self.config.ledger_address
        {
            return Err(DotcError::InvalidConfig {
                reason: "vault and ledger addresses cannot change".to_string(),
            });
        }
        tracing::info!(
            fee_receiver = %config.fee_receiver,
            fee_rate_bps = config.fee_rate_bps,
            affiliate_share_bps = config.affiliate_share_bps,
            "Manager config updated"
        );
        self.config = config;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------

    /// Create an offer and pull `deposit` from `maker` into escrow.
    ///
    /// Fixed offers snapshot their unit price here. Dynamic offers derive
    /// the withdrawal amount from the live rate, replacing the amount the
    /// maker supplied.
    ///
    /// # Errors
    /// Any validation, pricing, or bank error. On error no offer exists and
    /// the id counter is unchanged.
    pub fn make_offer(
        &mut self,
        maker: Address,
        deposit: Asset,
        withdrawal: Asset,
        terms: OfferTerms,
    ) -> Result<OfferId> {
        self.guarded(move |dotc| dotc.make_offer_inner(maker, deposit, withdrawal, terms))
    }

    /// Take a fixed-price offer. `withdrawal_amount == 0` takes everything
    /// outstanding.
    pub fn take_offer_fixed(
        &mut self,
        taker: Address,
        id: OfferId,
        withdrawal_amount: U256,
        affiliate: Option<Address>,
    ) -> Result<TakeOutcome> {
        self.guarded(move |dotc| {
            dotc.take_inner(
                taker,
                id,
                withdrawal_amount,
                PricingMode::Fixed,
                None,
                affiliate,
            )
        })
    }

    /// Take a dynamic-price offer at the live rate.
    ///
    /// `max_rate` bounds the unit price the taker accepts.
    ///
    /// # Errors
    /// As [`Self::take_offer_fixed`], plus `IncorrectPriceSource` and
    /// `DepositToWithdrawalRateOverflow`.
    pub fn take_offer_dynamic(
        &mut self,
        taker: Address,
        id: OfferId,
        withdrawal_amount: U256,
        max_rate: Option<U256>,
        affiliate: Option<Address>,
    ) -> Result<TakeOutcome> {
        self.guarded(move |dotc| {
            dotc.take_inner(
                taker,
                id,
                withdrawal_amount,
                PricingMode::Dynamic,
                max_rate,
                affiliate,
            )
        })
    }

    /// Cancel an offer and return its remaining deposit to the maker.
    ///
    /// # Errors
    /// `OfferNotFound`, `OnlyMaker`, `OfferInvalid`, `OfferInTimelock`.
    pub fn cancel_offer(&mut self, caller: Address, id: OfferId) -> Result<U256> {
        self.guarded(move |dotc| dotc.cancel_inner(caller, id))
    }

    /// Change an offer's mutable terms. Emits one event per changed group.
    ///
    /// # Errors
    /// `OfferNotFound`, `OnlyMaker`, `OfferInvalid`, `OfferInTimelock`,
    /// `EmptyOfferUpdate`, and term validation errors.
    pub fn update_offer(
        &mut self,
        caller: Address,
        id: OfferId,
        update: OfferUpdate,
    ) -> Result<()> {
        self.guarded(move |dotc| dotc.update_inner(caller, id, update))
    }

    // -----------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------

    /// The id the next offer will receive.
    #[must_use]
    pub fn current_offer_id(&self) -> OfferId {
        OfferId(u64::try_from(self.offers.len()).unwrap_or(u64::MAX))
    }

    #[must_use]
    pub fn offer(&self, id: OfferId) -> Option<&Offer> {
        usize::try_from(id.0).ok().and_then(|i| self.offers.get(i))
    }

    /// Every offer, in id order.
    #[must_use]
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Ids of `maker`'s offers, in creation order.
    #[must_use]
    pub fn offers_from_address(&self, maker: Address) -> &[OfferId] {
        self.offers_by_maker
            .get(&maker)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn escrow(&self, id: OfferId) -> Option<&EscrowRecord> {
        self.vault.escrow(id)
    }

    #[must_use]
    pub fn events(&self) -> &[DotcEvent] {
        &self.events
    }

    /// Drain the ledger event log.
    pub fn take_events(&mut self) -> Vec<DotcEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    #[must_use]
    pub fn vault(&self) -> &EscrowVault {
        &self.vault
    }

    /// Drain the vault's custody event log.
    pub fn take_vault_events(&mut self) -> Vec<dotc_types::EscrowEvent> {
        self.vault.take_events()
    }

    #[must_use]
    pub fn bank(&self) -> &B {
        &self.bank
    }

    /// Mutable access to the bank, for funding participants.
    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    /// Where offer `id`'s deposit has gone so far.
    #[must_use]
    pub fn custody_flows(&self, id: OfferId) -> CustodyFlows {
        self.audit.flows(id)
    }

    /// Check custody conservation across every offer: flows against vault
    /// records, vault records against bank balances, and each live offer's
    /// deposit against its escrow.
    pub fn verify_conservation(&self) -> Result<()> {
        self.audit.verify(&self.vault, &self.bank)?;
        for offer in self.offers.iter().filter(|offer| !offer.is_terminal()) {
            let escrowed = self
                .vault
                .escrow(offer.id)
                .map(|record| record.amount)
                .ok_or(DotcError::EscrowNotFound(offer.id))?;
            if escrowed != offer.deposit_asset.amount() {
                return Err(DotcError::EscrowInvariantViolation {
                    reason: format!(
                        "offer {}: deposit {} != escrow {escrowed}",
                        offer.id,
                        offer.deposit_asset.amount()
                    ),
                });
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn guarded<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.lock.enter()?;
        let result = op(self);
        self.lock.exit();
        result
    }

    fn engine(&self, now: u64) -> PricingEngine<'_> {
        PricingEngine::new(&self.price_sources, now, self.config.max_price_age_secs)
    }

    fn decimals_of(&self, asset: &Asset) -> Result<u8> {
        if asset.is_fungible() {
            self.bank.decimals(asset.token())
        } else {
            Ok(constants::NFT_DECIMALS)
        }
    }

    fn live_offer(&self, id: OfferId) -> Result<&Offer> {
        let offer = self.offer(id).ok_or(DotcError::OfferNotFound(id))?;
        if offer.is_terminal() {
            return Err(DotcError::OfferInvalid {
                id,
                validity: offer.validity,
            });
        }
        Ok(offer)
    }

    fn offer_mut(&mut self, id: OfferId) -> Result<&mut Offer> {
        usize::try_from(id.0)
            .ok()
            .and_then(|i| self.offers.get_mut(i))
            .ok_or(DotcError::OfferNotFound(id))
    }

    fn make_offer_inner(
        &mut self,
        maker: Address,
        deposit: Asset,
        withdrawal: Asset,
        terms: OfferTerms,
    ) -> Result<OfferId> {
        if maker.is_zero() {
            return Err(DotcError::AddressIsZero);
        }
        let now = self.clock.now();
        validation::validate_creation(&deposit, &withdrawal, &terms, now)?;

        let deposit_decimals = self.decimals_of(&deposit)?;
        let withdrawal_decimals = self.decimals_of(&withdrawal)?;

        let (withdrawal, unit_price) = match terms.pricing_mode {
            PricingMode::Fixed => {
                let price = dotc_pricing::unit_price(
                    deposit.amount(),
                    deposit_decimals,
                    withdrawal.amount(),
                    withdrawal_decimals,
                )?;
                (withdrawal, price)
            }
            PricingMode::Dynamic => {
                let rate = self
                    .engine(now)
                    .dynamic_unit_price(&terms.deposit_price, &terms.withdrawal_price)?;
                let owed = withdrawal_for_deposit(
                    deposit.amount(),
                    deposit_decimals,
                    rate,
                    withdrawal_decimals,
                )?;
                if owed.is_zero() {
                    return Err(DotcError::AssetAmountZero);
                }
                (withdrawal.with_amount(owed)?, rate)
            }
        };

        let id = self.current_offer_id();
        self.vault
            .set_deposit(self.config.ledger_address, &mut self.bank, id, maker, deposit)?;
        self.audit.record_deposit(id, deposit.amount());

        self.events.push(DotcEvent::OfferCreated {
            id,
            maker,
            deposit_asset: deposit,
            withdrawal_asset: withdrawal,
            unit_price,
            taking_mode: terms.taking_mode,
            pricing_mode: terms.pricing_mode,
        });
        tracing::info!(
            offer = %id,
            maker = %maker,
            deposit = %deposit,
            withdrawal = %withdrawal,
            unit_price = %unit_price,
            "Offer created"
        );

        self.offers.push(Offer {
            id,
            maker,
            validity: OfferValidity::NotTaken,
            deposit_asset: deposit,
            withdrawal_asset: withdrawal,
            unit_price,
            terms,
            created_at: now,
        });
        self.offers_by_maker.entry(maker).or_default().push(id);
        Ok(id)
    }

    fn take_inner(
        &mut self,
        taker: Address,
        id: OfferId,
        withdrawal_amount: U256,
        mode: PricingMode,
        max_rate: Option<U256>,
        affiliate: Option<Address>,
    ) -> Result<TakeOutcome> {
        let now = self.clock.now();
        let affiliate = affiliate.filter(|a| !a.is_zero());
        let offer = self.live_offer(id)?.clone();

        // --- 1. Admission --------------------------------------------
        if offer.terms.pricing_mode != mode {
            return Err(DotcError::IncorrectPricingMode {
                expected: mode,
                actual: offer.terms.pricing_mode,
            });
        }
        if taker == offer.maker {
            return Err(DotcError::MakerCannotTakeOwnOffer);
        }
        validation::validate_not_expired(&offer, now)?;
        if let Err(err) = validation::validate_taker(&offer, taker, &self.authorizations) {
            tracing::warn!(offer = %id, taker = %taker, error = %err, "Take rejected");
            return Err(err);
        }

        // --- 2-3. Pricing ----------------------------------------------
        let deposit_decimals = self.decimals_of(&offer.deposit_asset)?;
        let withdrawal_decimals = self.decimals_of(&offer.withdrawal_asset)?;
        let rate = self.engine(now).current_rate(&offer)?;
        if let Some(max) = max_rate.filter(|m| !m.is_zero()) {
            if rate > max {
                return Err(DotcError::DepositToWithdrawalRateOverflow { rate, max });
            }
        }

        let in_custody = self
            .vault
            .escrow(id)
            .map(|record| record.amount)
            .ok_or(DotcError::EscrowNotFound(id))?;
        let outstanding = match mode {
            PricingMode::Fixed => offer.withdrawal_asset.amount(),
            PricingMode::Dynamic => {
                withdrawal_for_deposit(in_custody, deposit_decimals, rate, withdrawal_decimals)?
            }
        };
        let paid = if withdrawal_amount.is_zero() {
            outstanding
        } else {
            withdrawal_amount
        };
        match offer.terms.taking_mode {
            TakingMode::Full if paid != outstanding => {
                return Err(DotcError::FullOfferMustBePaidFully(withdrawal_amount));
            }
            TakingMode::Partial if paid > outstanding => {
                return Err(DotcError::WithdrawalAmountExceedsOffer {
                    requested: paid,
                    available: outstanding,
                });
            }
            _ => {}
        }
        if paid.is_zero() {
            return Err(DotcError::WithdrawAmountZero);
        }
        let released = if paid == outstanding {
            in_custody
        } else {
            // A slice that would drain custody while payment is still owed
            // leaves the maker short; only the whole outstanding amount may.
            let slice = deposit_for_withdrawal(paid, withdrawal_decimals, rate, deposit_decimals)?;
            if slice >= in_custody {
                return Err(DotcError::WithdrawalAmountExceedsOffer {
                    requested: paid,
                    available: outstanding,
                });
            }
            slice
        };

        // --- 4. Fees ---------------------------------------------------
        let (fee_side, fee) = self.fees_for(&offer, paid, released, affiliate.is_some())?;
        let to_maker = match fee_side {
            FeeSide::Withdrawal => paid - fee.total,
            FeeSide::Deposit | FeeSide::None => paid,
        };
        let to_taker = match fee_side {
            FeeSide::Deposit => released - fee.total,
            FeeSide::Withdrawal | FeeSide::None => released,
        };
        tracing::debug!(
            offer = %id,
            rate = %rate,
            paid = %paid,
            released = %released,
            fee = %fee.total,
            fee_side = ?fee_side,
            "Take priced"
        );

        let validity = if released == in_custody {
            OfferValidity::FullyTaken
        } else {
            OfferValidity::PartiallyTaken
        };
        let next_deposit = remaining_asset(&offer.deposit_asset, in_custody - released)?;
        let next_withdrawal = remaining_asset(&offer.withdrawal_asset, outstanding - paid)?;

        // --- 5. Preflight ----------------------------------------------
        self.vault.check_withdrawable(id, released)?;
        if to_taker.is_zero() {
            return Err(DotcError::WithdrawAmountZero);
        }
        let payment_key = offer.withdrawal_asset.key();
        let taker_balance = self.bank.balance_of(payment_key, taker);
        if taker_balance < paid {
            return Err(DotcError::InsufficientBalance {
                holder: taker,
                needed: paid,
                available: taker_balance,
            });
        }

        // --- 6. Settlement ---------------------------------------------
        self.bank.transfer(payment_key, taker, offer.maker, to_maker)?;
        if fee_side == FeeSide::Withdrawal {
            self.pay_fees_from_taker(payment_key, taker, fee, affiliate)?;
        }

        let ledger = self.config.ledger_address;
        self.vault
            .withdraw_deposit(ledger, &mut self.bank, id, to_taker, taker)?;
        self.audit.record_release(id, to_taker);
        if fee_side == FeeSide::Deposit {
            self.pay_fees_from_escrow(id, fee, affiliate)?;
        }

        // --- 7. Record -------------------------------------------------
        let record = self.offer_mut(id)?;
        record.deposit_asset = next_deposit;
        record.withdrawal_asset = next_withdrawal;
        if mode == PricingMode::Dynamic {
            record.unit_price = rate;
        }
        record.transition_to(validity)?;

        self.events.push(DotcEvent::OfferTaken {
            id,
            taker,
            validity,
            deposit_amount: released,
            withdrawal_amount: paid,
            affiliate,
        });
        tracing::info!(
            offer = %id,
            taker = %taker,
            validity = %validity,
            deposit = %released,
            withdrawal = %paid,
            "Offer taken"
        );

        Ok(TakeOutcome {
            deposit_released: released,
            withdrawal_paid: paid,
            unit_price: rate,
            fee,
            fee_side,
            validity,
        })
    }

    fn fees_for(
        &self,
        offer: &Offer,
        paid: U256,
        released: U256,
        has_affiliate: bool,
    ) -> Result<(FeeSide, FeeSplit)> {
        let (side, base) = if offer.withdrawal_asset.is_fungible() {
            (FeeSide::Withdrawal, paid)
        } else if offer.deposit_asset.is_fungible() {
            (FeeSide::Deposit, released)
        } else {
            return Ok((FeeSide::None, FeeSplit::default()));
        };
        let fee = calculate_fees(
            base,
            self.config.fee_rate_bps,
            self.config.affiliate_share_bps,
            has_affiliate,
        )?;
        Ok((side, fee))
    }

    fn pay_fees_from_taker(
        &mut self,
        key: AssetKey,
        taker: Address,
        fee: FeeSplit,
        affiliate: Option<Address>,
    ) -> Result<()> {
        if !fee.to_receiver.is_zero() {
            self.bank
                .transfer(key, taker, self.config.fee_receiver, fee.to_receiver)?;
        }
        if let Some(affiliate) = affiliate {
            if !fee.to_affiliate.is_zero() {
                self.bank.transfer(key, taker, affiliate, fee.to_affiliate)?;
            }
        }
        Ok(())
    }

    fn pay_fees_from_escrow(
        &mut self,
        id: OfferId,
        fee: FeeSplit,
        affiliate: Option<Address>,
    ) -> Result<()> {
        let ledger = self.config.ledger_address;
        let payouts = [
            (Some(self.config.fee_receiver), fee.to_receiver),
            (affiliate, fee.to_affiliate),
        ];
        for (to, amount) in payouts {
            let Some(to) = to else { continue };
            if amount.is_zero() {
                continue;
            }
            self.vault
                .withdraw_fees(ledger, &mut self.bank, id, amount, to)?;
            self.audit.record_fees(id, amount);
        }
        Ok(())
    }

    fn cancel_inner(&mut self, caller: Address, id: OfferId) -> Result<U256> {
        let now = self.clock.now();
        let maker = {
            let offer = self.offer(id).ok_or(DotcError::OfferNotFound(id))?;
            if caller != offer.maker {
                return Err(DotcError::OnlyMaker(caller));
            }
            let offer = self.live_offer(id)?;
            validation::validate_timelock_elapsed(offer, now)?;
            offer.maker
        };

        let returned =
            self.vault
                .cancel_deposit(self.config.ledger_address, &mut self.bank, id, maker)?;
        self.audit.record_return(id, returned);
        self.offer_mut(id)?.transition_to(OfferValidity::Cancelled)?;

        self.events.push(DotcEvent::OfferCanceled {
            id,
            maker,
            amount_returned: returned,
        });
        tracing::info!(offer = %id, maker = %maker, returned = %returned, "Offer cancelled");
        Ok(returned)
    }

    fn update_inner(&mut self, caller: Address, id: OfferId, update: OfferUpdate) -> Result<()> {
        let now = self.clock.now();
        {
            let offer = self.offer(id).ok_or(DotcError::OfferNotFound(id))?;
            if caller != offer.maker {
                return Err(DotcError::OnlyMaker(caller));
            }
            let offer = self.live_offer(id)?;
            validation::validate_timelock_elapsed(offer, now)?;
            validation::validate_update(offer, &update, now)?;
        }

        let offer = self.offer_mut(id)?;
        let mut events = Vec::new();
        if let Some(expiry_time) = update.expiry_time {
            offer.terms.expiry_time = expiry_time;
            events.push(DotcEvent::OfferExpiryUpdated { id, expiry_time });
        }
        if let Some(timelock_until) = update.timelock_until {
            offer.terms.timelock_until = timelock_until;
            events.push(DotcEvent::OfferTimelockUpdated { id, timelock_until });
        }
        if let Some(links) = update.links {
            offer.terms.terms.clone_from(&links.terms);
            offer.terms.comms_link.clone_from(&links.comms_link);
            events.push(DotcEvent::OfferLinksUpdated {
                id,
                terms: links.terms,
                comms_link: links.comms_link,
            });
        }
        if let Some(special_addresses) = update.special_addresses {
            offer.terms.special_addresses.clone_from(&special_addresses);
            events.push(DotcEvent::OfferSpecialAddressesUpdated {
                id,
                special_addresses,
            });
        }
        if let Some(authorization_contracts) = update.authorization_contracts {
            offer
                .terms
                .authorization_contracts
                .clone_from(&authorization_contracts);
            events.push(DotcEvent::OfferAuthorizationContractsUpdated {
                id,
                authorization_contracts,
            });
        }

        tracing::info!(offer = %id, changes = events.len(), "Offer updated");
        self.events.extend(events);
        Ok(())
    }
}

impl<B: AssetBank> std::fmt::Debug for Dotc<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dotc")
            .field("config", &self.config)
            .field("offers", &self.offers.len())
            .field("vault", &self.vault.address())
            .finish_non_exhaustive()
    }
}

/// `asset` restated with `amount` left. A unique NFT keeps its descriptor.
fn remaining_asset(asset: &Asset, amount: U256) -> Result<Asset> {
    match asset {
        Asset::NftUnique { .. } => Ok(*asset),
        Asset::Erc20 { .. } | Asset::NftFungible { .. } => asset.with_amount(amount),
    }
}

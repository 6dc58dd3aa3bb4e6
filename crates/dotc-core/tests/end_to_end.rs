//! End-to-end swap flows through the public ledger API.

use std::sync::Arc;

use dotc_core::{AllowListAuthorization, Dotc, FeeSide, ManualClock};
use dotc_escrow::{AssetBank, TokenBank};
use dotc_pricing::MockPriceSource;
use dotc_types::{
    Address, Asset, AssetKey, DotcError, DotcEvent, EscrowEvent, EscrowStatus, ManagerConfig,
    OfferId, OfferTerms, OfferValidity, PriceSpec, TakingMode, U256,
};
use proptest::prelude::*;

const NOW: u64 = 1_700_000_000;
const DAY: u64 = 86_400;

fn e(n: usize) -> U256 {
    U256::exp10(n)
}

fn key(token: Address) -> AssetKey {
    AssetKey {
        token,
        token_id: U256::zero(),
    }
}

struct Pipeline {
    dotc: Dotc<TokenBank>,
    clock: ManualClock,
    maker: Address,
    taker: Address,
    /// 18-decimal token.
    x: Address,
    /// 6-decimal token.
    y: Address,
    x_feed: Arc<MockPriceSource>,
    y_feed: Arc<MockPriceSource>,
    x_feed_addr: Address,
    y_feed_addr: Address,
}

impl Pipeline {
    fn new() -> Self {
        let x = Address::from_low_u64(0x18);
        let y = Address::from_low_u64(0x06);
        let maker = Address::from_low_u64(0xa11ce);
        let taker = Address::from_low_u64(0xb0b);

        let mut bank = TokenBank::new();
        bank.register_token(x, 18);
        bank.register_token(y, 6);
        bank.mint(key(x), maker, U256::from(1_000) * e(18)).unwrap();
        bank.mint(key(y), taker, U256::from(100_000) * e(6)).unwrap();

        let config = ManagerConfig::new(
            Address::from_low_u64(0xfee),
            Address::from_low_u64(0xe5c),
            Address::from_low_u64(0xd07c),
        );
        let clock = ManualClock::new(NOW);
        let mut dotc = Dotc::new(config, bank, Arc::new(clock.clone())).unwrap();

        // X trades at 2000 USD, Y at 1 USD, both with 8-decimal answers.
        let x_feed = Arc::new(MockPriceSource::new(2_000 * 100_000_000, 8, NOW));
        let y_feed = Arc::new(MockPriceSource::new(100_000_000, 8, NOW));
        let x_feed_addr = Address::from_low_u64(0xf00d_0018);
        let y_feed_addr = Address::from_low_u64(0xf00d_0006);
        dotc.register_price_source(x_feed_addr, x_feed.clone());
        dotc.register_price_source(y_feed_addr, y_feed.clone());

        Self {
            dotc,
            clock,
            maker,
            taker,
            x,
            y,
            x_feed,
            y_feed,
            x_feed_addr,
            y_feed_addr,
        }
    }

    fn balance(&self, token: Address, holder: Address) -> U256 {
        self.dotc.bank().balance_of(key(token), holder)
    }

    fn vault_address(&self) -> Address {
        self.dotc.vault().address()
    }

    fn fee_receiver(&self) -> Address {
        self.dotc.config().fee_receiver
    }

    /// 43 X for 104 Y at a fixed price.
    fn make_fixed(&mut self, taking_mode: TakingMode) -> OfferId {
        self.make_fixed_with(OfferTerms::fixed(taking_mode, NOW + DAY))
    }

    fn make_fixed_with(&mut self, terms: OfferTerms) -> OfferId {
        self.dotc
            .make_offer(
                self.maker,
                Asset::erc20(self.x, U256::from(43) * e(18)),
                Asset::erc20(self.y, U256::from(104) * e(6)),
                terms,
            )
            .unwrap()
    }

    fn dynamic_terms(&self, taking_mode: TakingMode) -> OfferTerms {
        OfferTerms::dynamic(
            taking_mode,
            NOW + DAY,
            PriceSpec::from_source(self.x_feed_addr),
            PriceSpec::from_source(self.y_feed_addr),
        )
    }

    /// 5 X for Y at the live rate.
    fn make_dynamic(&mut self, terms: OfferTerms) -> Result<OfferId, DotcError> {
        self.dotc.make_offer(
            self.maker,
            Asset::erc20(self.x, U256::from(5) * e(18)),
            Asset::erc20(self.y, U256::one()),
            terms,
        )
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_a_full_fixed_take() {
    let mut p = Pipeline::new();
    let id = p.make_fixed(TakingMode::Full);
    let taker_y_before = p.balance(p.y, p.taker);

    let outcome = p
        .dotc
        .take_offer_fixed(p.taker, id, U256::zero(), None)
        .unwrap();

    let fee = U256::from(260_000);
    assert_eq!(outcome.fee.total, fee);
    assert_eq!(p.balance(p.x, p.taker), U256::from(43) * e(18));
    assert_eq!(p.balance(p.y, p.maker), U256::from(104) * e(6) - fee);
    assert_eq!(p.balance(p.y, p.fee_receiver()), fee);
    assert_eq!(p.balance(p.y, p.taker), taker_y_before - U256::from(104) * e(6));
    assert_eq!(p.balance(p.x, p.vault_address()), U256::zero());

    let offer = p.dotc.offer(id).unwrap();
    assert_eq!(offer.validity, OfferValidity::FullyTaken);
    assert_eq!(
        p.dotc.escrow(id).unwrap().status,
        EscrowStatus::FullyWithdrawn
    );
    p.dotc.verify_conservation().unwrap();
}

#[test]
fn scenario_b_partial_fixed_take() {
    let mut p = Pipeline::new();
    let id = p.make_fixed(TakingMode::Partial);
    let unit_price = p.dotc.offer(id).unwrap().unit_price;
    assert_eq!(unit_price, U256::from(2_418_604_651_162_790_697u64));

    let outcome = p
        .dotc
        .take_offer_fixed(p.taker, id, U256::from(54) * e(6), None)
        .unwrap();

    let released = U256::from_dec_str("22326923076923076929").unwrap();
    let remaining = U256::from(43) * e(18) - released;
    assert_eq!(outcome.deposit_released, released);
    assert_eq!(outcome.validity, OfferValidity::PartiallyTaken);

    let offer = p.dotc.offer(id).unwrap();
    assert_eq!(offer.validity, OfferValidity::PartiallyTaken);
    assert_eq!(offer.withdrawal_asset.amount(), U256::from(50) * e(6));
    assert_eq!(offer.deposit_asset.amount(), remaining);
    assert_eq!(offer.unit_price, unit_price);
    assert_eq!(p.dotc.escrow(id).unwrap().amount, remaining);
    assert_eq!(p.balance(p.x, p.vault_address()), remaining);
    assert_eq!(p.balance(p.x, p.taker), released);

    // Taking the rest releases everything left, rounding dust included.
    let rest = p
        .dotc
        .take_offer_fixed(p.taker, id, U256::zero(), None)
        .unwrap();
    assert_eq!(rest.deposit_released, remaining);
    assert_eq!(rest.withdrawal_paid, U256::from(50) * e(6));
    assert_eq!(rest.validity, OfferValidity::FullyTaken);
    assert_eq!(p.balance(p.x, p.vault_address()), U256::zero());
    p.dotc.verify_conservation().unwrap();
}

#[test]
fn scenario_c_cancel_respects_timelock() {
    let mut p = Pipeline::new();
    let mut terms = OfferTerms::fixed(TakingMode::Full, NOW + DAY);
    terms.timelock_until = NOW + 3_600;
    let id = p.make_fixed_with(terms);

    assert_eq!(
        p.dotc.cancel_offer(p.maker, id),
        Err(DotcError::OfferInTimelock {
            until: NOW + 3_600,
            now: NOW,
        })
    );

    p.clock.advance(3_600);
    let returned = p.dotc.cancel_offer(p.maker, id).unwrap();
    assert_eq!(returned, U256::from(43) * e(18));
    assert_eq!(p.balance(p.x, p.maker), U256::from(1_000) * e(18));
    assert_eq!(p.dotc.offer(id).unwrap().validity, OfferValidity::Cancelled);
    assert_eq!(p.dotc.escrow(id).unwrap().status, EscrowStatus::Cancelled);
    assert!(matches!(
        p.dotc.events().last(),
        Some(DotcEvent::OfferCanceled { amount_returned, .. }) if *amount_returned == returned
    ));
    p.dotc.verify_conservation().unwrap();
}

#[test]
fn scenario_d_special_addresses_gate_takers() {
    let mut p = Pipeline::new();
    let mut terms = OfferTerms::fixed(TakingMode::Full, NOW + DAY);
    terms.special_addresses = vec![p.taker];
    let id = p.make_fixed_with(terms);

    let outsider = Address::from_low_u64(0x0075_1de7);
    p.dotc
        .bank_mut()
        .mint(key(p.y), outsider, U256::from(1_000) * e(6))
        .unwrap();
    assert_eq!(
        p.dotc.take_offer_fixed(outsider, id, U256::zero(), None),
        Err(DotcError::NotSpecialAddress(outsider))
    );
    assert_eq!(p.dotc.offer(id).unwrap().validity, OfferValidity::NotTaken);

    p.dotc
        .take_offer_fixed(p.taker, id, U256::zero(), None)
        .unwrap();
    assert_eq!(p.dotc.offer(id).unwrap().validity, OfferValidity::FullyTaken);
}

#[test]
fn scenario_e_non_positive_price_rejected() {
    let mut p = Pipeline::new();
    p.x_feed.set_answer(0, NOW);
    let terms = p.dynamic_terms(TakingMode::Full);
    assert_eq!(
        p.make_dynamic(terms.clone()),
        Err(DotcError::IncorrectPriceSource(p.x_feed_addr))
    );
    assert_eq!(p.dotc.current_offer_id(), OfferId(0));

    // Healthy at creation, broken at take.
    p.x_feed.set_answer(2_000 * 100_000_000, NOW);
    let id = p.make_dynamic(terms).unwrap();
    p.y_feed.set_answer(-1, NOW);
    assert_eq!(
        p.dotc
            .take_offer_dynamic(p.taker, id, U256::zero(), None, None),
        Err(DotcError::IncorrectPriceSource(p.y_feed_addr))
    );
}

// ---------------------------------------------------------------------------
// Dynamic pricing
// ---------------------------------------------------------------------------

#[test]
fn dynamic_make_derives_withdrawal_amount() {
    let mut p = Pipeline::new();
    let terms = p.dynamic_terms(TakingMode::Full);
    let id = p.make_dynamic(terms).unwrap();

    let offer = p.dotc.offer(id).unwrap();
    assert_eq!(offer.unit_price, U256::from(2_000) * e(18));
    assert_eq!(offer.withdrawal_asset.amount(), U256::from(10_000) * e(6));
}

#[test]
fn dynamic_take_follows_live_price() {
    let mut p = Pipeline::new();
    let terms = p.dynamic_terms(TakingMode::Full);
    let id = p.make_dynamic(terms).unwrap();

    p.clock.advance(60);
    p.x_feed.set_answer(2_100 * 100_000_000, NOW + 60);
    p.y_feed.set_answer(100_000_000, NOW + 60);
    let outcome = p
        .dotc
        .take_offer_dynamic(p.taker, id, U256::zero(), None, None)
        .unwrap();

    assert_eq!(outcome.unit_price, U256::from(2_100) * e(18));
    assert_eq!(outcome.withdrawal_paid, U256::from(10_500) * e(6));
    assert_eq!(outcome.deposit_released, U256::from(5) * e(18));
    assert_eq!(p.dotc.offer(id).unwrap().unit_price, outcome.unit_price);
}

#[test]
fn dynamic_max_clamps_side_price() {
    let mut p = Pipeline::new();
    let mut terms = p.dynamic_terms(TakingMode::Full);
    terms.deposit_price = PriceSpec {
        source: Some(p.x_feed_addr),
        min: U256::zero(),
        max: U256::from(1_900u64 * 100_000_000),
        buffer_bps: 100,
    };
    let id = p.make_dynamic(terms).unwrap();

    // 2000 + 1% buffer = 2020, capped at 1900.
    let offer = p.dotc.offer(id).unwrap();
    assert_eq!(offer.unit_price, U256::from(1_900) * e(18));
    assert_eq!(offer.withdrawal_asset.amount(), U256::from(9_500) * e(6));
}

#[test]
fn dynamic_slippage_guard() {
    let mut p = Pipeline::new();
    let terms = p.dynamic_terms(TakingMode::Partial);
    let id = p.make_dynamic(terms).unwrap();

    let max = U256::from(1_999) * e(18);
    assert_eq!(
        p.dotc
            .take_offer_dynamic(p.taker, id, U256::zero(), Some(max), None),
        Err(DotcError::DepositToWithdrawalRateOverflow {
            rate: U256::from(2_000) * e(18),
            max,
        })
    );

    let outcome = p
        .dotc
        .take_offer_dynamic(
            p.taker,
            id,
            U256::from(4_000) * e(6),
            Some(U256::from(2_000) * e(18)),
            None,
        )
        .unwrap();
    assert_eq!(outcome.deposit_released, U256::from(2) * e(18));
    assert_eq!(outcome.validity, OfferValidity::PartiallyTaken);
    assert_eq!(
        p.dotc.offer(id).unwrap().withdrawal_asset.amount(),
        U256::from(6_000) * e(6)
    );
    p.dotc.verify_conservation().unwrap();
}

#[test]
fn stale_price_rejected_at_take() {
    let mut p = Pipeline::new();
    let terms = p.dynamic_terms(TakingMode::Full);
    let id = p.make_dynamic(terms).unwrap();

    p.clock.advance(p.dotc.config().max_price_age_secs + 1);
    assert_eq!(
        p.dotc
            .take_offer_dynamic(p.taker, id, U256::zero(), None, None),
        Err(DotcError::IncorrectPriceSource(p.x_feed_addr))
    );
}

// ---------------------------------------------------------------------------
// Fees, authorization, events
// ---------------------------------------------------------------------------

#[test]
fn affiliate_receives_its_share() {
    let mut p = Pipeline::new();
    let id = p.make_fixed(TakingMode::Full);
    let affiliate = Address::from_low_u64(0xaff);

    let outcome = p
        .dotc
        .take_offer_fixed(p.taker, id, U256::zero(), Some(affiliate))
        .unwrap();
    assert_eq!(outcome.fee_side, FeeSide::Withdrawal);
    assert_eq!(p.balance(p.y, affiliate), U256::from(208_000));
    assert_eq!(p.balance(p.y, p.fee_receiver()), U256::from(52_000));
    assert!(matches!(
        p.dotc.events().last(),
        Some(DotcEvent::OfferTaken { affiliate: Some(a), .. }) if *a == affiliate
    ));
}

#[test]
fn zero_affiliate_is_ignored() {
    let mut p = Pipeline::new();
    let id = p.make_fixed(TakingMode::Full);
    let outcome = p
        .dotc
        .take_offer_fixed(p.taker, id, U256::zero(), Some(Address::ZERO))
        .unwrap();
    assert_eq!(outcome.fee.to_affiliate, U256::zero());
    assert_eq!(p.balance(p.y, p.fee_receiver()), U256::from(260_000));
}

#[test]
fn nft_for_nft_swap_is_fee_free() {
    let mut p = Pipeline::new();
    let art = Address::from_low_u64(0x0a27);
    let game = Address::from_low_u64(0x6a3e);
    let art_key = AssetKey {
        token: art,
        token_id: U256::from(1),
    };
    let game_key = AssetKey {
        token: game,
        token_id: U256::from(42),
    };
    let bank = p.dotc.bank_mut();
    bank.mint(art_key, p.maker, U256::one()).unwrap();
    bank.mint(game_key, p.taker, U256::from(10)).unwrap();

    let id = p
        .dotc
        .make_offer(
            p.maker,
            Asset::nft_unique(art, U256::from(1)),
            Asset::nft_fungible(game, U256::from(42), U256::from(3)),
            OfferTerms::fixed(TakingMode::Full, NOW + DAY),
        )
        .unwrap();
    let outcome = p
        .dotc
        .take_offer_fixed(p.taker, id, U256::zero(), None)
        .unwrap();

    assert_eq!(outcome.fee_side, FeeSide::None);
    assert_eq!(outcome.fee.total, U256::zero());
    assert_eq!(p.dotc.bank().balance_of(art_key, p.taker), U256::one());
    assert_eq!(p.dotc.bank().balance_of(game_key, p.maker), U256::from(3));
    p.dotc.verify_conservation().unwrap();
}

#[test]
fn authorization_contract_admits_listed_takers() {
    let mut p = Pipeline::new();
    let kyc = Address::from_low_u64(0x0c7c);
    p.dotc
        .register_authorization(kyc, Arc::new(AllowListAuthorization::new([p.taker])));
    let mut terms = OfferTerms::fixed(TakingMode::Full, NOW + DAY);
    terms.authorization_contracts = vec![kyc];
    let id = p.make_fixed_with(terms);

    let stranger = Address::random();
    assert_eq!(
        p.dotc.take_offer_fixed(stranger, id, U256::zero(), None),
        Err(DotcError::NotAuthorized(stranger))
    );
    p.dotc
        .take_offer_fixed(p.taker, id, U256::zero(), None)
        .unwrap();
}

#[test]
fn vault_events_mirror_custody() {
    let mut p = Pipeline::new();
    let id = p.make_fixed(TakingMode::Partial);
    p.dotc
        .take_offer_fixed(p.taker, id, U256::from(54) * e(6), None)
        .unwrap();
    p.dotc.cancel_offer(p.maker, id).unwrap();

    let events = p.dotc.take_vault_events();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], EscrowEvent::Deposited { from, .. } if from == p.maker));
    assert!(matches!(events[1], EscrowEvent::Withdrawn { to, .. } if to == p.taker));
    assert!(matches!(events[2], EscrowEvent::Cancelled { to, .. } if to == p.maker));

    let flows = p.dotc.custody_flows(id);
    assert_eq!(flows.deposited, U256::from(43) * e(18));
    assert_eq!(flows.released + flows.returned, flows.deposited);
    p.dotc.verify_conservation().unwrap();
}

#[test]
fn ledger_events_in_order() {
    let mut p = Pipeline::new();
    let id = p.make_fixed(TakingMode::Full);
    p.dotc
        .take_offer_fixed(p.taker, id, U256::zero(), None)
        .unwrap();

    let events = p.dotc.take_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], DotcEvent::OfferCreated { id: created, .. } if created == id));
    assert!(matches!(
        events[1],
        DotcEvent::OfferTaken { validity: OfferValidity::FullyTaken, .. }
    ));
    assert!(events.iter().all(|event| event.offer_id() == id));
    assert!(p.dotc.events().is_empty());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// However a partial offer is sliced, custody is conserved, the fixed
    /// unit price never moves, and the taker never receives more than was
    /// deposited.
    #[test]
    fn partial_takes_conserve_custody(slices in prop::collection::vec(1u64..40_000_000, 1..8)) {
        let mut p = Pipeline::new();
        let id = p.make_fixed(TakingMode::Partial);
        let unit_price = p.dotc.offer(id).unwrap().unit_price;

        for slice in slices {
            let offer = p.dotc.offer(id).unwrap();
            if offer.validity == OfferValidity::FullyTaken {
                break;
            }
            let outstanding = offer.withdrawal_asset.amount();
            let amount = U256::from(slice).min(outstanding);
            match p.dotc.take_offer_fixed(p.taker, id, amount, None) {
                Ok(_)
                | Err(
                    DotcError::WithdrawAmountZero
                    | DotcError::WithdrawalAmountExceedsOffer { .. },
                ) => {}
                Err(err) => prop_assert!(false, "unexpected error: {err}"),
            }
            prop_assert_eq!(p.dotc.offer(id).unwrap().unit_price, unit_price);
            prop_assert!(p.dotc.verify_conservation().is_ok());
        }

        let flows = p.dotc.custody_flows(id);
        let in_vault = p.balance(p.x, p.vault_address());
        prop_assert_eq!(flows.released + in_vault, U256::from(43) * e(18));
        prop_assert_eq!(p.balance(p.x, p.taker), flows.released);
    }

    /// Terminal offers refuse every mutating call.
    #[test]
    fn terminal_offers_are_frozen(cancel in any::<bool>()) {
        let mut p = Pipeline::new();
        let id = p.make_fixed(TakingMode::Partial);
        if cancel {
            p.dotc.cancel_offer(p.maker, id).unwrap();
        } else {
            p.dotc.take_offer_fixed(p.taker, id, U256::zero(), None).unwrap();
        }
        let before = p.dotc.offer(id).unwrap().clone();

        prop_assert!(p.dotc.take_offer_fixed(p.taker, id, U256::one(), None).is_err());
        prop_assert!(p.dotc.cancel_offer(p.maker, id).is_err());
        let update = dotc_types::OfferUpdate { expiry_time: Some(NOW + 2 * DAY), ..Default::default() };
        prop_assert!(p.dotc.update_offer(p.maker, id, update).is_err());
        prop_assert_eq!(p.dotc.offer(id).unwrap(), &before);
    }
}

#![allow(dead_code)]

use crowdsale::{CrowdsaleContract, CrowdsaleContractClient, CurrencyDecimals, SaleKind, SaleSetup};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, vec, Address, Env, Vec,
};

pub const E18: i128 = 1_000_000_000_000_000_000;
pub const E6: i128 = 1_000_000;
pub const DAY: u64 = 86_400;
pub const START: u64 = 1_700_000_000;
pub const APPROVAL_LEDGER: u32 = 1_000;

pub struct Asset<'a> {
    pub address: Address,
    pub client: token::Client<'a>,
    pub admin: token::StellarAssetClient<'a>,
}

pub fn create_asset<'a>(env: &'a Env) -> Asset<'a> {
    let issuer = Address::generate(env);
    let address = env.register_stellar_asset_contract_v2(issuer).address();
    Asset {
        client: token::Client::new(env, &address),
        admin: token::StellarAssetClient::new(env, &address),
        address,
    }
}

pub struct SaleTest<'a> {
    pub env: &'a Env,
    pub client: CrowdsaleContractClient<'a>,
    pub sale: Address,
    pub owner: Address,
    pub kind: SaleKind,
    pub token: Asset<'a>,
    pub native: Asset<'a>,
    pub currency_a: Asset<'a>,
    pub currency_b: Asset<'a>,
    pub opening_time: u64,
    pub closing_time: u64,
}

/// Deploys a sale whose window opens 10s from now and lasts ten days. The owner
/// holds `owner_supply` sale tokens, nothing approved yet.
pub fn setup_sale<'a>(env: &'a Env, kind: SaleKind, owner_supply: i128) -> SaleTest<'a> {
    env.mock_all_auths();
    env.ledger().with_mut(|l| l.timestamp = START);

    let owner = Address::generate(env);
    let token = create_asset(env);
    let native = create_asset(env);
    let currency_a = create_asset(env);
    let currency_b = create_asset(env);

    let opening_time = START + 10;
    let closing_time = opening_time + 10 * DAY;

    let sale = env.register_contract(None, CrowdsaleContract);
    let client = CrowdsaleContractClient::new(env, &sale);
    client.initialize(
        &owner,
        &SaleSetup {
            kind,
            opening_time,
            closing_time,
            token: token.address.clone(),
            native_asset: native.address.clone(),
            currency_a: currency_a.address.clone(),
            currency_b: currency_b.address.clone(),
            decimals: CurrencyDecimals {
                native: 18,
                currency_a: 18,
                currency_b: 6,
                token: 18,
            },
        },
    );

    if owner_supply > 0 {
        token.admin.mint(&owner, &owner_supply);
    }

    SaleTest {
        env,
        client,
        sale,
        owner,
        kind,
        token,
        native,
        currency_a,
        currency_b,
        opening_time,
        closing_time,
    }
}

/// Runs `test` once against a fresh pre-ICO and once against a fresh pre-sale.
pub fn for_each_kind(owner_supply: i128, test: impl Fn(&SaleTest<'_>)) {
    for kind in [SaleKind::PreIco, SaleKind::PreSale] {
        let env = Env::default();
        let t = setup_sale(&env, kind, owner_supply);
        test(&t);
    }
}

pub struct Prices {
    pub native: u64,
    pub token: u64,
    pub currency_a: u64,
    pub currency_b: u64,
    pub min_contribution: i128,
}

impl<'a> SaleTest<'a> {
    pub fn warp(&self, timestamp: u64) {
        self.env.ledger().with_mut(|l| l.timestamp = timestamp);
    }

    pub fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    pub fn approve(&self, asset: &Asset, from: &Address, amount: i128) {
        asset.client.approve(from, &self.sale, &amount, &APPROVAL_LEDGER);
    }

    /// Tiers at opening + 1 day, opening + 2 days and closing time.
    pub fn default_tiers(&self) -> (Vec<u64>, Vec<u32>) {
        (
            vec![
                self.env,
                self.opening_time + DAY,
                self.opening_time + 2 * DAY,
                self.closing_time,
            ],
            vec![self.env, 20u32, 40, 50],
        )
    }

    /// Approves `allocation` sale tokens from the owner and initializes the sale.
    pub fn initialize_sale(&self, allocation: i128, prices: &Prices) {
        if allocation > 0 {
            self.approve(&self.token, &self.owner, allocation);
        }
        let (timestamps, percentages) = self.default_tiers();
        self.client.initialize_sale(
            &self.owner,
            &prices.native,
            &prices.token,
            &prices.currency_a,
            &prices.currency_b,
            &prices.min_contribution,
            &timestamps,
            &percentages,
        );
    }

    pub fn whitelisted(&self) -> Address {
        let who = Address::generate(self.env);
        self.client.add_whitelist(&self.owner, &who);
        who
    }

    pub fn fund(&self, asset: &Asset, who: &Address, amount: i128) {
        asset.admin.mint(who, &amount);
    }

    pub fn open(&self) {
        self.warp(self.opening_time + 10);
    }
}

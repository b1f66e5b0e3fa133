use crate::oracle::create_mock_feed;
use crate::token::create_token;
use crate::vaults::{create_vaults, default_params};
use mock_debt_notifier::{MockDebtNotifier, MockDebtNotifierClient};
use sep_40_oracle::testutils::{Asset as MockAsset, MockPriceOracleClient};
use sep_40_oracle::Asset;
use sep_41_token::testutils::MockTokenClient;
use soroban_sdk::testutils::{Address as _, Ledger, LedgerInfo};
use soroban_sdk::{vec, Address, Env, Symbol};
use vaults::{PriceFeedConfig, VaultsClient};

pub const SCALAR_7: i128 = 1_0000000;
pub const SCALAR_18: i128 = 1_000_000_000_000_000_000;

pub struct TestFixture<'a> {
    pub env: Env,
    pub bombadil: Address,
    pub users: std::vec::Vec<Address>,
    pub vaults: VaultsClient<'a>,
    pub collateral: MockTokenClient<'a>,
    pub stable: MockTokenClient<'a>,
    pub collateral_feed: MockPriceOracleClient<'a>,
    pub reference_feed: MockPriceOracleClient<'a>,
    pub notifier: MockDebtNotifierClient<'a>,
}

impl TestFixture<'_> {
    /// Create a new TestFixture for the vaults contract
    ///
    /// Deploys a collateral token with the requested decimals, an 18 decimal
    /// stable token administered by the vaults contract, a mock feed pair
    /// quoting the collateral at 2000 and the reference currency at 1, and a
    /// mock debt notifier wired into the vaults contract.
    pub fn create<'a>(collateral_decimals: u32) -> TestFixture<'a> {
        let e = Env::default();
        e.mock_all_auths();
        e.budget().reset_unlimited();

        let bombadil = Address::generate(&e);

        e.ledger().set(LedgerInfo {
            timestamp: 1700000000,
            protocol_version: 20,
            sequence_number: 100,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 2000000,
        });

        // deploy contracts
        let (vaults_id, vaults_client) = create_vaults(&e);
        let (collateral_id, collateral_client) =
            create_token(&e, &bombadil, collateral_decimals, "COL");
        let (stable_id, stable_client) = create_token(&e, &vaults_id, 18, "sEUR");
        let (collateral_feed_id, collateral_feed_client) = create_mock_feed(&e);
        let (reference_feed_id, reference_feed_client) = create_mock_feed(&e);

        let notifier_id = Address::generate(&e);
        e.register_contract(&notifier_id, MockDebtNotifier {});
        let notifier_client = MockDebtNotifierClient::new(&e, &notifier_id);

        // set up feeds
        collateral_feed_client.set_data(
            &bombadil,
            &MockAsset::Other(Symbol::new(&e, "USD")),
            &vec![&e, MockAsset::Stellar(collateral_id.clone())],
            &7,
            &300,
        );
        collateral_feed_client.set_price(&vec![&e, 2000_0000000], &e.ledger().timestamp());

        reference_feed_client.set_data(
            &bombadil,
            &MockAsset::Other(Symbol::new(&e, "USD")),
            &vec![&e, MockAsset::Other(Symbol::new(&e, "EUR"))],
            &7,
            &300,
        );
        reference_feed_client.set_price(&vec![&e, 1_0000000], &e.ledger().timestamp());

        // initialize the vaults contract
        vaults_client.initialize(
            &bombadil,
            &collateral_id,
            &collateral_decimals,
            &stable_id,
            &PriceFeedConfig {
                collateral_feed: collateral_feed_id,
                collateral_asset: Asset::Stellar(collateral_id.clone()),
                reference_feed: reference_feed_id,
                reference_asset: Asset::Other(Symbol::new(&e, "EUR")),
                staleness_window: 24 * 60 * 60,
            },
            &default_params(),
        );
        vaults_client.set_debt_notifier(&notifier_id);

        TestFixture {
            env: e,
            bombadil,
            users: std::vec![],
            vaults: vaults_client,
            collateral: collateral_client,
            stable: stable_client,
            collateral_feed: collateral_feed_client,
            reference_feed: reference_feed_client,
            notifier: notifier_client,
        }
    }

    /// Re-stamp the collateral feed with a new price at the current ledger
    /// time, quoted with 7 decimals
    pub fn set_collateral_price(&self, price: i128) {
        self.collateral_feed
            .set_price(&vec![&self.env, price], &self.env.ledger().timestamp());
    }

    /// Re-stamp the reference feed with a new price at the current ledger
    /// time, quoted with 7 decimals
    pub fn set_reference_price(&self, price: i128) {
        self.reference_feed
            .set_price(&vec![&self.env, price], &self.env.ledger().timestamp());
    }

    /********** Chain Helpers ***********/

    pub fn jump(&self, time: u64) {
        let blocks = time / 5;
        self.env.ledger().set(LedgerInfo {
            timestamp: self.env.ledger().timestamp() + time,
            protocol_version: 20,
            sequence_number: self.env.ledger().sequence() + (blocks as u32),
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 2000000,
        });
    }
}

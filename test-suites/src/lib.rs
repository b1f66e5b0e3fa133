pub mod assertions;
pub mod oracle;
pub mod setup;
pub mod test_fixture;
pub mod token;
pub mod vaults;

pub use setup::create_fixture_with_data;

pub mod db;
pub mod orderdb;
pub mod referraldb;
pub mod subscriptiondb;
pub mod userdb;
pub mod withdrawaldb;

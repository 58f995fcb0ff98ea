pub mod ordermodel;
pub mod referralmodel;
pub mod subscriptionmodel;
pub mod usermodel;
pub mod withdrawalmodel;

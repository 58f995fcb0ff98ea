pub mod orderdtos;
pub mod referraldtos;
pub mod subscriptiondtos;
pub mod userdtos;
pub mod withdrawaldtos;

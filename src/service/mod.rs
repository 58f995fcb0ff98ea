pub mod error;
pub mod ocr;
pub mod order_service;
pub mod referral_service;
pub mod subscription_service;
pub mod verification_service;
pub mod withdrawal_service;

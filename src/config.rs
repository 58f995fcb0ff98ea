#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    // Marketplace business knobs. Amounts are in cents, rates in basis points.
    pub commission_rate_bps: i64,
    pub min_order_amount: i64,
    pub fee_bps: i64,
    pub min_withdrawal: i64,
    pub subscription_reward: i64,
    // Bank detail encryption
    pub encryption_secret: String,
    pub encryption_salt: String,
    // OCR capability
    pub ocr_api_url: String,
    pub ocr_timeout_secs: u64,
    // Email service
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub smtp_from: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let jwt_maxage = std::env::var("JWT_MAXAGE").expect("JWT_MAXAGE must be set");
        let app_url = std::env::var("APP_URL").expect("APP_URL must be set");

        let encryption_secret =
            std::env::var("ENCRYPTION_SECRET").expect("ENCRYPTION_SECRET must be set");
        let encryption_salt =
            std::env::var("ENCRYPTION_SALT").expect("ENCRYPTION_SALT must be set");

        // Referral / withdrawal configuration (with defaults)
        let commission_rate_bps = std::env::var("COMMISSION_RATE_BPS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100); // 1%
        let min_order_amount = std::env::var("MIN_ORDER_AMOUNT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000); // 100.00
        let fee_bps = std::env::var("TRANSACTION_FEE_BPS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(250); // 2.5%
        let min_withdrawal = std::env::var("MIN_WITHDRAWAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100_000); // 1000.00
        let subscription_reward = std::env::var("SUBSCRIPTION_REWARD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1_000); // +10.00 per verified subscription

        // OCR service configuration
        let ocr_api_url = std::env::var("OCR_API_URL")
            .unwrap_or_else(|_| "http://localhost:9400/extract".to_string());
        let ocr_timeout_secs = std::env::var("OCR_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);

        // Email service configuration (with defaults)
        let smtp_host = std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let smtp_username = std::env::var("SMTP_USERNAME").unwrap_or_else(|_| "".to_string());
        let smtp_password = std::env::var("SMTP_PASSWORD").unwrap_or_else(|_| "".to_string());
        let smtp_from =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| "Noko <noreply@noko.app>".to_string());

        Config {
            database_url,
            app_url,
            jwt_secret,
            jwt_maxage: jwt_maxage.parse::<i64>().unwrap(),
            port: 8000,
            commission_rate_bps,
            min_order_amount,
            fee_bps,
            min_withdrawal,
            subscription_reward,
            encryption_secret,
            encryption_salt,
            ocr_api_url,
            ocr_timeout_secs,
            smtp_host,
            smtp_username,
            smtp_password,
            smtp_from,
        }
    }
}

// In crates/app-config/src/types.rs

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// The active trading account.
    pub account: AccountSettings,
    /// Where the journal export lives.
    pub journal: JournalSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AccountSettings {
    /// The account balance used as the drawdown baseline and for deriving
    /// risk amounts on legacy records.
    pub balance: Decimal,
    /// The display currency (e.g., "USD").
    pub currency: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct JournalSettings {
    /// Path to the JSON journal export file.
    pub path: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Market snapshot returned to dashboard clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    pub asset: String,
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub price_change_24h: f64,
    pub price_change_percentage_24h: f64,
    pub volume_24h: f64,
    pub volume_change_24h: f64,
    pub market_cap: f64,
    pub rank: u32,
    pub timestamp: DateTime<Utc>,
}

// CoinGecko `/coins/markets` row, only the fields we map.
// Nulls show up for thinly traded coins, hence the Options.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoMarketData {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub total_volume: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinGeckoMarketData {
    pub fn into_market_data(self, timestamp: DateTime<Utc>) -> MarketData {
        MarketData {
            asset: self.id,
            symbol: self.symbol.to_uppercase(),
            name: self.name,
            price: self.current_price.unwrap_or_default(),
            price_change_24h: self.price_change_24h.unwrap_or_default(),
            price_change_percentage_24h: self.price_change_percentage_24h.unwrap_or_default(),
            volume_24h: self.total_volume.unwrap_or_default(),
            // not provided upstream
            volume_change_24h: 0.0,
            market_cap: self.market_cap.unwrap_or_default(),
            rank: self.market_cap_rank.unwrap_or_default(),
            timestamp,
        }
    }
}

// CoinGecko `/search/trending`
#[derive(Debug, Deserialize)]
pub struct TrendingResponse {
    pub coins: Vec<TrendingCoin>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingCoin {
    pub item: TrendingItem,
}

#[derive(Debug, Deserialize)]
pub struct TrendingItem {
    pub id: String,
}

// `[timestamp_ms, price]` pairs from `/coins/{id}/market_chart`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinHistory {
    pub prices: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub asset: String,
    pub quantity: f64,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Buy,
    Sell,
    Transfer,
}

// One position in a user's portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub portfolio_id: String,
    pub user_id: String,
    pub asset: String,
    pub symbol: String,
    pub quantity: f64,
    pub average_buy_price: f64,
    pub current_price: f64,
    pub total_value: f64,
    pub pnl: f64,
    pub pnl_percentage: f64,
    pub transactions: Vec<Transaction>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub portfolio_id: String,
    pub user_id: String,
    pub asset: String,
    pub quantity: f64,
    pub average_buy_price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCondition {
    PriceAbove,
    PriceBelow,
    VolumeSpike,
    NewsMention,
}

impl AlertCondition {
    pub const ALL: [AlertCondition; 4] = [
        AlertCondition::PriceAbove,
        AlertCondition::PriceBelow,
        AlertCondition::VolumeSpike,
        AlertCondition::NewsMention,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PriceAbove => "price_above",
            Self::PriceBelow => "price_below",
            Self::VolumeSpike => "volume_spike",
            Self::NewsMention => "news_mention",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Triggered,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub alert_id: String,
    pub user_id: String,
    pub asset: String,
    pub symbol: String,
    pub condition_type: AlertCondition,
    pub value: f64,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub source: NewsSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSource {
    pub name: String,
}

// Request bodies. Every field is optional so missing ones become a 400
// with our own message instead of a serde rejection.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertRequest {
    pub user_id: Option<String>,
    pub asset: Option<String>,
    pub symbol: Option<String>,
    pub condition_type: Option<String>,
    pub value: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioItemRequest {
    pub user_id: Option<String>,
    pub asset: Option<String>,
    pub quantity: Option<f64>,
    pub average_buy_price: Option<f64>,
}

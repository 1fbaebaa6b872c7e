// Canned portfolio, alert and news data, there is no persistence

use chrono::Utc;
use serde::Serialize;

use crate::models::{Alert, AlertCondition, AlertStatus, Holding, NewsItem, NewsSource};

pub fn portfolio_for(user_id: &str) -> Vec<Holding> {
    let now = Utc::now();
    let holding = |id: &str, asset: &str, symbol: &str, quantity: f64, avg: f64, price: f64, pnl_pct: f64| Holding {
        portfolio_id: id.to_string(),
        user_id: user_id.to_string(),
        asset: asset.to_string(),
        symbol: symbol.to_string(),
        quantity,
        average_buy_price: avg,
        current_price: price,
        total_value: quantity * price,
        pnl: quantity * (price - avg),
        pnl_percentage: pnl_pct,
        transactions: Vec::new(),
        last_updated: now,
    };

    vec![
        holding("1", "bitcoin", "BTC", 0.5, 45_000.0, 50_000.0, 11.11),
        holding("2", "ethereum", "ETH", 10.0, 3_000.0, 3_200.0, 6.67),
    ]
}

pub fn alerts_for(user_id: &str) -> Vec<Alert> {
    let now = Utc::now();
    let alert = |id: &str, asset: &str, symbol: &str, condition_type: AlertCondition, value: f64| Alert {
        alert_id: id.to_string(),
        user_id: user_id.to_string(),
        asset: asset.to_string(),
        symbol: symbol.to_string(),
        condition_type,
        value,
        status: AlertStatus::Active,
        created_at: now,
        triggered_at: None,
        message: None,
    };

    vec![
        alert("1", "bitcoin", "BTC", AlertCondition::PriceAbove, 55_000.0),
        alert("2", "ethereum", "ETH", AlertCondition::PriceBelow, 3_000.0),
    ]
}

pub fn crypto_news() -> Vec<NewsItem> {
    let now = Utc::now();
    let item = |title: &str, description: &str, source: &str| NewsItem {
        title: title.to_string(),
        description: description.to_string(),
        url: "#".to_string(),
        published_at: now,
        source: NewsSource {
            name: source.to_string(),
        },
    };

    vec![
        item(
            "Bitcoin Reaches New All-Time High",
            "Bitcoin surpasses previous records amid institutional adoption.",
            "CryptoNews",
        ),
        item(
            "Ethereum 2.0 Upgrade Shows Promise",
            "The latest Ethereum upgrade demonstrates improved scalability.",
            "BlockchainToday",
        ),
    ]
}

// percentage is measured against cost basis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_pnl: f64,
    pub total_pnl_percentage: f64,
    pub holdings: usize,
}

impl PortfolioSummary {
    pub fn from_holdings(holdings: &[Holding]) -> Self {
        let total_value: f64 = holdings.iter().map(|h| h.total_value).sum();
        let total_pnl: f64 = holdings.iter().map(|h| h.pnl).sum();

        // a book made entirely of profit has no cost basis to divide by
        let cost_basis = total_value - total_pnl;
        let total_pnl_percentage = if total_value > 0.0 && cost_basis != 0.0 {
            total_pnl / cost_basis * 100.0
        } else {
            0.0
        };

        Self {
            total_value,
            total_pnl,
            total_pnl_percentage,
            holdings: holdings.len(),
        }
    }
}

// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::lenient;

// Total do mês corrente (entradas ou distribuições)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_amount: Decimal,
    #[serde(deserialize_with = "lenient::int")]
    pub month: i64,
    #[serde(deserialize_with = "lenient::int")]
    pub year: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTotal {
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub current_stock: Decimal,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub last_updated: Option<String>,
}

// Os três cards do topo do dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub inputs_month: MonthlyTotal,
    pub distributions_month: MonthlyTotal,
    pub stock: StockTotal,
}

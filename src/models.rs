//! Core data models for the financial dashboard
//!
//! Wire shapes follow the aggregation backend (camelCase JSON). The
//! snapshot types are immutable once fetched; the only operations on them
//! are pure presentational transforms (totals, grouping by attribute tag).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Money =================
//

/// Amount represented as integer major units plus fractional nanos, with a
/// currency code. `units` arrives as a string on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonetaryAmount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nanos: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
}

impl MonetaryAmount {
    pub fn new(units: i64, nanos: i64, currency_code: &str) -> Self {
        Self {
            units: Some(units.to_string()),
            nanos: Some(nanos),
            currency_code: Some(currency_code.to_string()),
        }
    }

    /// Total value as `units + nanos / 1e9`.
    ///
    /// Absent or malformed units yield `None`; missing nanos default to 0.
    pub fn total(&self) -> Option<f64> {
        let units: f64 = self.units.as_deref()?.trim().parse().ok()?;
        let nanos = self.nanos.unwrap_or(0) as f64;
        Some(units + nanos / 1e9)
    }
}

/// Renders "Not Available" for absent or malformed amounts; never panics.
impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total() {
            Some(total) => {
                let symbol = match self.currency_code.as_deref() {
                    Some("INR") | None => "₹",
                    Some(code) => return write!(f, "{} {:.2}", code, total),
                };
                write!(f, "{}{:.2}", symbol, total)
            }
            None => write!(f, "Not Available"),
        }
    }
}

//
// ================= Net Worth =================
//

/// One asset or liability line: a typed attribute tag plus its amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeValue {
    #[serde(rename = "netWorthAttribute")]
    pub attribute_tag: String,
    #[serde(default)]
    pub value: MonetaryAmount,
}

impl AttributeValue {
    /// Human label for the attribute tag, e.g. `ASSET_TYPE_MUTUAL_FUND`
    /// becomes "Mutual Fund".
    pub fn label(&self) -> String {
        humanize_tag(&self.attribute_tag)
    }
}

/// Point-in-time net worth: fetched once per session, immutable client-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_net_worth_value: Option<MonetaryAmount>,
    #[serde(default)]
    pub asset_values: Vec<AttributeValue>,
    #[serde(default)]
    pub liability_values: Vec<AttributeValue>,
}

impl NetWorthSnapshot {
    /// Sum of all asset amounts, skipping malformed entries.
    pub fn total_assets(&self) -> f64 {
        sum_values(&self.asset_values)
    }

    /// Sum of all liability amounts, skipping malformed entries.
    pub fn total_liabilities(&self) -> f64 {
        sum_values(&self.liability_values)
    }

    /// `(label, amount)` pairs for the assets-vs-liabilities breakdown,
    /// assets first, in wire order.
    pub fn grouped(&self) -> Vec<(String, f64)> {
        self.asset_values
            .iter()
            .chain(self.liability_values.iter())
            .filter_map(|entry| Some((entry.label(), entry.value.total()?)))
            .collect()
    }
}

fn sum_values(entries: &[AttributeValue]) -> f64 {
    entries.iter().filter_map(|e| e.value.total()).sum()
}

/// `ASSET_TYPE_SAVINGS_ACCOUNTS` -> "Savings Accounts"
fn humanize_tag(tag: &str) -> String {
    let stripped = tag
        .strip_prefix("ASSET_TYPE_")
        .or_else(|| tag.strip_prefix("LIABILITY_TYPE_"))
        .unwrap_or(tag);

    stripped
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

//
// ================= Financial Summary =================
//

/// Full `/getFinancialSummary` response.
///
/// `net_worth` is fully typed since every computed transform reads it; the
/// credit, EPF and mutual-fund sections are provider-shaped nested documents
/// carried as raw JSON with accessors for the fields the dashboard reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    #[serde(default)]
    pub net_worth: NetWorthSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_report: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epf_details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mf_transactions: Option<serde_json::Value>,
}

impl FinancialSummary {
    /// Bureau score from the credit report, if present.
    pub fn credit_score(&self) -> Option<String> {
        let score = self
            .credit_report
            .as_ref()?
            .pointer("/creditReports/0/creditReportData/score/bureauScore")?;
        match score {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Rows backing the mutual-fund performance table, in wire order.
    pub fn mf_rows(&self) -> &[serde_json::Value] {
        self.mf_transactions
            .as_ref()
            .and_then(|v| v.as_array())
            .map(|a| a.as_slice())
            .unwrap_or(&[])
    }
}

//
// ================= Chat =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Agent,
    System,
}

impl fmt::Display for MessageSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageSender::User => "user",
            MessageSender::Agent => "agent",
            MessageSender::System => "system",
        };
        write!(f, "{}", s)
    }
}

/// One line of the chat transcript. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: MessageSender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: MessageSender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// `/chat` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

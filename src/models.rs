// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Money in the smallest currency unit (whole won).
pub type Money = i64;

static LIST_SEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[,/|·]\s*").unwrap());
static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+(\.\d+)?$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRecord {
    pub id: i64,
    pub year: i32,
    pub month: u32,
    pub platform: String,
    pub channel_name: Option<String>,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: i64,
    pub year: i32,
    pub month: u32,
    pub name: Option<String>,
    pub category: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub date: Option<NaiveDate>,
    pub memo: Option<String>,
}

impl ExpenseRecord {
    pub fn amount(&self) -> Money {
        self.quantity.max(0).saturating_mul(self.unit_price.max(0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Planning,
    Producing,
    Editing,
    Reviewing,
    Done,
    Published,
}

impl ContentStatus {
    pub const ALL: [ContentStatus; 6] = [
        ContentStatus::Planning,
        ContentStatus::Producing,
        ContentStatus::Editing,
        ContentStatus::Reviewing,
        ContentStatus::Done,
        ContentStatus::Published,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Planning => "planning",
            ContentStatus::Producing => "producing",
            ContentStatus::Editing => "editing",
            ContentStatus::Reviewing => "reviewing",
            ContentStatus::Done => "done",
            ContentStatus::Published => "published",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let status = match s.trim().to_lowercase().as_str() {
            "planning" | "기획중" => ContentStatus::Planning,
            "producing" | "제작중" => ContentStatus::Producing,
            "editing" | "편집중" => ContentStatus::Editing,
            "reviewing" | "검수중" => ContentStatus::Reviewing,
            "done" | "완료" => ContentStatus::Done,
            "published" | "업로드완료" => ContentStatus::Published,
            other => {
                return Err(anyhow::anyhow!(
                    "Unknown content status '{}', expected one of planning|producing|editing|reviewing|done|published",
                    other
                ));
            }
        };
        Ok(status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub id: i64,
    pub brand: String,
    pub main_platform: String,
    pub distribute_platforms: Vec<String>,
    pub status: ContentStatus,
    pub upload_year: i32,
    pub upload_month: u32,
    pub upload_day: Option<u32>,
    pub title: Option<String>,
    pub topic: Option<String>,
    pub editor: Option<String>,
    pub memo: Option<String>,
}

impl ContentRecord {
    /// Distinct platforms this content lands on, main platform first.
    pub fn upload_platforms(&self) -> Vec<&str> {
        let main = self.main_platform.trim();
        let mut out: Vec<&str> = vec![main];
        for p in &self.distribute_platforms {
            let p = p.trim();
            if !p.is_empty() && !out.contains(&p) {
                out.push(p);
            }
        }
        out
    }

    /// One for the main platform plus one per extra distinct distribution target.
    pub fn upload_count(&self) -> usize {
        self.upload_platforms().len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRecord {
    pub id: i64,
    pub brand: String,
    pub brand_color: Option<String>,
    pub platform: String,
    pub channel_name: String,
    #[serde(skip_serializing, default)]
    pub credentials: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Freelancer {
    pub id: i64,
    pub name: String,
    pub contact: Option<String>,
    pub assigned_channel: Option<String>,
    pub weekly_assigned: i64,
    pub completed_count: i64,
    pub price_per_video: Money,
    pub edit_program: Option<String>,
    pub memo: Option<String>,
}

/// Ordered, de-duplicated list of the platforms an account publishes on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCatalog(Vec<String>);

impl PlatformCatalog {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for n in names {
            let n = n.as_ref().trim();
            if !n.is_empty() && !out.iter().any(|e| e == n) {
                out.push(n.to_string());
            }
        }
        PlatformCatalog(out)
    }

    pub fn contains(&self, platform: &str) -> bool {
        self.0.iter().any(|p| p == platform)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Splits a free-form platform list ("YouTube, TikTok / Instagram").
pub fn split_platforms(raw: &str) -> Vec<String> {
    LIST_SEP
        .split(raw.trim())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

// Boundary coercion for rows coming from the remote ledger store. Numbers may
// arrive as JSON numbers or strings; anything unusable degrades to a default.

fn field<'a>(v: &'a Value, key: &str) -> Option<&'a Value> {
    v.get(key).filter(|x| !x.is_null())
}

fn parse_number(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_start_matches('₩')
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect();
            if !NUMERIC.is_match(&cleaned) {
                return None;
            }
            cleaned
                .parse::<i64>()
                .ok()
                .or_else(|| cleaned.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        Value::Bool(_) | Value::Array(_) | Value::Object(_) | Value::Null => None,
    }
}

fn int_or(v: &Value, key: &str, default: i64) -> i64 {
    match field(v, key) {
        None => default,
        Some(Value::String(s)) if s.trim().is_empty() => default,
        Some(x) => parse_number(x).unwrap_or(0),
    }
}

fn money(v: &Value, key: &str) -> Money {
    int_or(v, key, 0).max(0)
}

fn month_of(v: &Value, key: &str) -> u32 {
    u32::try_from(int_or(v, key, 0)).unwrap_or(0)
}

fn year_of(v: &Value, key: &str) -> i32 {
    i32::try_from(int_or(v, key, 0)).unwrap_or(0)
}

fn text(v: &Value, key: &str) -> Option<String> {
    let s = match field(v, key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() { None } else { Some(s) }
}

impl RevenueRecord {
    pub fn from_json(v: &Value) -> Self {
        RevenueRecord {
            id: int_or(v, "id", 0),
            year: year_of(v, "year"),
            month: month_of(v, "month"),
            platform: text(v, "platform").unwrap_or_default(),
            channel_name: text(v, "channelName"),
            amount: money(v, "amount"),
        }
    }
}

impl ExpenseRecord {
    pub fn from_json(v: &Value) -> Self {
        let date = text(v, "date").and_then(|s| {
            let day = s.get(..10).unwrap_or(&s);
            NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
        });
        ExpenseRecord {
            id: int_or(v, "id", 0),
            year: year_of(v, "year"),
            month: month_of(v, "month"),
            name: text(v, "name"),
            category: text(v, "category").unwrap_or_default(),
            quantity: int_or(v, "quantity", 1).max(0),
            unit_price: money(v, "unitPrice"),
            date,
            memo: text(v, "memo"),
        }
    }
}

impl ContentRecord {
    pub fn from_json(v: &Value) -> Self {
        let distribute_platforms = match field(v, "distributePlatforms") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|i| i.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => split_platforms(s),
            _ => Vec::new(),
        };
        let day = int_or(v, "uploadDay", 0);
        ContentRecord {
            id: int_or(v, "id", 0),
            brand: text(v, "brand").unwrap_or_default(),
            main_platform: text(v, "mainPlatform").unwrap_or_default(),
            distribute_platforms,
            status: text(v, "status")
                .and_then(|s| s.parse().ok())
                .unwrap_or(ContentStatus::Planning),
            upload_year: year_of(v, "uploadYear"),
            upload_month: month_of(v, "uploadMonth"),
            upload_day: u32::try_from(day).ok().filter(|d| (1..=31).contains(d)),
            title: text(v, "title"),
            topic: text(v, "topic"),
            editor: text(v, "editor"),
            memo: text(v, "memo"),
        }
    }
}

impl ChannelRecord {
    pub fn from_json(v: &Value) -> Self {
        ChannelRecord {
            id: int_or(v, "id", 0),
            brand: text(v, "brand").unwrap_or_default(),
            brand_color: text(v, "brandColor"),
            platform: text(v, "platform").unwrap_or_default(),
            channel_name: text(v, "channelName").unwrap_or_default(),
            credentials: text(v, "credentials"),
        }
    }

    /// Brands in first-seen order, carrying the first color recorded for each.
    pub fn brands(channels: &[ChannelRecord]) -> Vec<Brand> {
        let mut out: Vec<Brand> = Vec::new();
        for ch in channels {
            if ch.brand.is_empty() || out.iter().any(|b| b.name == ch.brand) {
                continue;
            }
            out.push(Brand {
                name: ch.brand.clone(),
                color: ch.brand_color.clone(),
            });
        }
        out
    }
}

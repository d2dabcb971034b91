// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::month_slot;
use crate::models::{ChannelRecord, Money, PlatformCatalog, RevenueRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Channel key used for revenue recorded without a channel name.
pub const UNNAMED_CHANNEL: &str = "(unnamed)";

/// Platform -> channel -> month lookup over one year of revenue.
///
/// A cell that was never entered is absent from `revenue_data`; a cell holding
/// an explicit zero is present. Renderers show the former as `-`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformChannelMatrix {
    pub year: i32,
    pub platforms: Vec<String>,
    pub channels_by_platform: BTreeMap<String, Vec<String>>,
    pub revenue_data: BTreeMap<String, BTreeMap<String, BTreeMap<u32, Money>>>,
    pub platform_totals: BTreeMap<String, BTreeMap<u32, Money>>,
}

impl PlatformChannelMatrix {
    pub fn cell(&self, platform: &str, channel: &str, month: u32) -> Option<Money> {
        self.revenue_data
            .get(platform)?
            .get(channel)?
            .get(&month)
            .copied()
    }

    pub fn platform_total(&self, platform: &str, month: u32) -> Money {
        self.platform_totals
            .get(platform)
            .and_then(|m| m.get(&month))
            .copied()
            .unwrap_or(0)
    }

    /// Column total across all catalog platforms.
    pub fn month_total(&self, month: u32) -> Money {
        self.platforms
            .iter()
            .fold(0i64, |acc, p| acc.saturating_add(self.platform_total(p, month)))
    }

    pub fn channels_for(&self, platform: &str) -> &[String] {
        self.channels_by_platform
            .get(platform)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Registered channels, then any channel that only shows up in revenue.
    pub fn grid_channels(&self, platform: &str) -> Vec<String> {
        let mut out: Vec<String> = self.channels_for(platform).to_vec();
        if let Some(cells) = self.revenue_data.get(platform) {
            for ch in cells.keys() {
                if !out.contains(ch) {
                    out.push(ch.clone());
                }
            }
        }
        out
    }
}

pub fn platform_channel_matrix(
    revenues: &[RevenueRecord],
    catalog: &PlatformCatalog,
    channels: &[ChannelRecord],
    year: i32,
) -> PlatformChannelMatrix {
    let mut channels_by_platform: BTreeMap<String, Vec<String>> = catalog
        .iter()
        .map(|p| (p.to_string(), Vec::new()))
        .collect();
    for ch in channels {
        let name = ch.channel_name.trim();
        if let Some(list) = channels_by_platform.get_mut(ch.platform.trim()) {
            if !name.is_empty() && !list.iter().any(|c| c == name) {
                list.push(name.to_string());
            }
        }
    }

    let mut revenue_data: BTreeMap<String, BTreeMap<String, BTreeMap<u32, Money>>> =
        BTreeMap::new();
    let mut platform_totals: BTreeMap<String, BTreeMap<u32, Money>> = BTreeMap::new();

    for r in revenues.iter().filter(|r| r.year == year) {
        if month_slot(r.month).is_none() || !catalog.contains(&r.platform) {
            continue;
        }
        let channel = r
            .channel_name
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNNAMED_CHANNEL);
        let amount = r.amount.max(0);

        let cell = revenue_data
            .entry(r.platform.clone())
            .or_default()
            .entry(channel.to_string())
            .or_default()
            .entry(r.month)
            .or_insert(0);
        *cell = cell.saturating_add(amount);

        let total = platform_totals
            .entry(r.platform.clone())
            .or_default()
            .entry(r.month)
            .or_insert(0);
        *total = total.saturating_add(amount);
    }

    PlatformChannelMatrix {
        year,
        platforms: catalog.names().to_vec(),
        channels_by_platform,
        revenue_data,
        platform_totals,
    }
}

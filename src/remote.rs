// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client for the spreadsheet-backed ledger endpoint.
//!
//! Every call is a GET on one URL: `?action=<name>` plus the call parameters.
//! Object and array parameters travel JSON-encoded. Replies are either
//! `{"success": true, ...payload}` or `{"success": false, "error": "..."}`.

use reqwest::Url;
use rusqlite::Connection;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{ExpenseRecord, RevenueRecord};
use crate::utils::{get_setting, http_client};

pub const ENDPOINT_KEY: &str = "endpoint";
pub const SPREADSHEET_KEY: &str = "spreadsheet_id";

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("ledger endpoint is not configured (run `config set --key endpoint --value <url>`)")]
    NotConfigured,
    #[error("invalid endpoint url '{url}': {reason}")]
    BadEndpoint { url: String, reason: String },
    #[error("request for '{action}' failed: {source}")]
    Http {
        action: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend rejected '{action}': {message}")]
    Backend { action: String, message: String },
    #[error("reply to '{action}' has no '{field}' array")]
    MissingPayload { action: String, field: String },
    #[error("could not encode payload for '{action}': {source}")]
    Encode {
        action: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Record families the remote ledger can save and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Revenue,
    Expense,
    Channel,
    Content,
    Freelancer,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Revenue,
        RecordKind::Expense,
        RecordKind::Channel,
        RecordKind::Content,
        RecordKind::Freelancer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Revenue => "revenue",
            RecordKind::Expense => "expense",
            RecordKind::Channel => "channel",
            RecordKind::Content => "content",
            RecordKind::Freelancer => "freelancer",
        }
    }

    pub fn save_action(&self) -> &'static str {
        match self {
            RecordKind::Revenue => "saveRevenue",
            RecordKind::Expense => "saveExpense",
            RecordKind::Channel => "saveChannel",
            RecordKind::Content => "saveContent",
            RecordKind::Freelancer => "saveFreelancer",
        }
    }

    pub fn delete_action(&self) -> &'static str {
        match self {
            RecordKind::Revenue => "deleteRevenue",
            RecordKind::Expense => "deleteExpense",
            RecordKind::Channel => "deleteChannel",
            RecordKind::Content => "deleteContent",
            RecordKind::Freelancer => "deleteFreelancer",
        }
    }

    pub fn data_param(&self) -> &'static str {
        match self {
            RecordKind::Revenue => "revenueData",
            RecordKind::Expense => "expenseData",
            RecordKind::Channel => "channelData",
            RecordKind::Content => "contentData",
            RecordKind::Freelancer => "freelancerData",
        }
    }

    pub fn id_param(&self) -> &'static str {
        match self {
            RecordKind::Revenue => "revenueId",
            RecordKind::Expense => "expenseId",
            RecordKind::Channel => "channelId",
            RecordKind::Content => "contentId",
            RecordKind::Freelancer => "freelancerId",
        }
    }
}

impl std::str::FromStr for RecordKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        RecordKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown record kind '{}', expected revenue|expense|channel|content|freelancer",
                    s
                )
            })
    }
}

pub struct LedgerClient {
    endpoint: Url,
    spreadsheet_id: Option<String>,
    http: reqwest::blocking::Client,
}

impl LedgerClient {
    pub fn new(endpoint: &str, spreadsheet_id: Option<String>) -> anyhow::Result<Self> {
        let endpoint = Url::parse(endpoint.trim()).map_err(|e| RemoteError::BadEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(LedgerClient {
            endpoint,
            spreadsheet_id,
            http: http_client()?,
        })
    }

    /// Builds a client from the `endpoint` and `spreadsheet_id` settings.
    pub fn from_settings(conn: &Connection) -> anyhow::Result<Self> {
        let endpoint = get_setting(conn, ENDPOINT_KEY)?.ok_or(RemoteError::NotConfigured)?;
        let sheet = get_setting(conn, SPREADSHEET_KEY)?;
        Self::new(&endpoint, sheet)
    }

    pub fn request_url(&self, action: &str, params: &[(&str, Value)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("action", action);
            if let Some(sheet) = &self.spreadsheet_id {
                q.append_pair("spreadsheetId", sheet);
            }
            for (key, value) in params {
                let encoded = match value {
                    Value::String(s) => s.clone(),
                    Value::Object(_) | Value::Array(_) => value.to_string(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                q.append_pair(key, &encoded);
            }
        }
        url
    }

    /// `save*` request carrying the record JSON-encoded under `<kind>Data`.
    pub fn save_url<T: Serialize>(&self, kind: RecordKind, record: &T) -> Result<Url, RemoteError> {
        let data = serde_json::to_value(record).map_err(|source| RemoteError::Encode {
            action: kind.save_action().to_string(),
            source,
        })?;
        Ok(self.request_url(kind.save_action(), &[(kind.data_param(), data)]))
    }

    pub fn delete_url(&self, kind: RecordKind, remote_id: i64) -> Url {
        self.request_url(kind.delete_action(), &[(kind.id_param(), Value::from(remote_id))])
    }

    pub fn call(&self, action: &str, params: &[(&str, Value)]) -> Result<Value, RemoteError> {
        let url = self.request_url(action, params);
        self.fetch(action, url)
    }

    fn fetch(&self, action: &str, url: Url) -> Result<Value, RemoteError> {
        tracing::info!(action, "calling ledger endpoint");
        let http_err = |source| RemoteError::Http {
            action: action.to_string(),
            source,
        };
        let reply: Value = self
            .http
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(http_err)?;
        unwrap_envelope(action, reply)
    }

    /// Saves one record and returns the id the backend reports for it, if any.
    pub fn save<T: Serialize>(&self, kind: RecordKind, record: &T) -> Result<Option<i64>, RemoteError> {
        let url = self.save_url(kind, record)?;
        let reply = self.fetch(kind.save_action(), url)?;
        Ok(reply.get("id").and_then(Value::as_i64).filter(|id| *id > 0))
    }

    pub fn delete(&self, kind: RecordKind, remote_id: i64) -> Result<(), RemoteError> {
        let url = self.delete_url(kind, remote_id);
        self.fetch(kind.delete_action(), url)?;
        Ok(())
    }

    pub fn revenues(&self, year: i32) -> Result<Vec<RevenueRecord>, RemoteError> {
        let reply = self.call("getRevenues", &[("year", Value::from(year))])?;
        let rows = payload_array(&reply, "getRevenues", "revenues")?;
        Ok(rows.iter().map(RevenueRecord::from_json).collect())
    }

    pub fn expenses(&self, year: i32) -> Result<Vec<ExpenseRecord>, RemoteError> {
        let reply = self.call("getExpenses", &[("year", Value::from(year))])?;
        let rows = payload_array(&reply, "getExpenses", "expenses")?;
        Ok(rows.iter().map(ExpenseRecord::from_json).collect())
    }
}

/// Checks the `success` flag and hands back the reply on success.
pub fn unwrap_envelope(action: &str, reply: Value) -> Result<Value, RemoteError> {
    if reply.get("success").and_then(Value::as_bool) == Some(true) {
        return Ok(reply);
    }
    let message = reply
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    Err(RemoteError::Backend {
        action: action.to_string(),
        message,
    })
}

/// A missing payload array is tolerated as empty only when the key is absent;
/// a present non-array value is rejected.
pub fn payload_array<'a>(
    reply: &'a Value,
    action: &str,
    field: &str,
) -> Result<&'a [Value], RemoteError> {
    match reply.get(field) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(RemoteError::MissingPayload {
            action: action.to_string(),
            field: field.to_string(),
        }),
    }
}

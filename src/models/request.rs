use serde::{Deserialize, Serialize};

/// Lifecycle of an asset request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum RequestType {
    #[serde(rename = "returnable")]
    Returnable,
    #[serde(rename = "non-returnable")]
    NonReturnable,
}

impl RequestType {
    pub const ALL: [RequestType; 2] = [RequestType::Returnable, RequestType::NonReturnable];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Returnable => "returnable",
            RequestType::NonReturnable => "non-returnable",
        }
    }
}

/// Body of `PATCH /request/approve/{id}` and `PATCH /request/reject`
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequestBody {
    #[serde(default)]
    pub approve_date: Option<String>,
}

/// One bar of the HR dashboard chart
#[derive(Debug, Serialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartEntry {
    pub reqs_type: RequestType,
    pub quantity: u64,
}

/// One row of the "top requested assets" report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct TopRequestedAsset {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub request_type: Option<String>,
    pub count: i64,
}

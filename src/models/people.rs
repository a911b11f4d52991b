use serde::Deserialize;

/// Body of `PATCH /hr/limit/{email}`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageUpdateBody {
    pub package_name: String,
}

/// Body of `PATCH /quantity/update/{id}`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct QuantityUpdateBody {
    pub quantity: i64,
}

/// `?query=` parameter shared by search and delete routes
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QueryParam {
    pub query: String,
}

/// Value written to `paymentStatus` once an HR account has paid.
pub const PAYMENT_STATUS_PAID: &str = "paid";

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QueryParameters {
    /// 1-based page number, defaults to 1.
    pub page: Option<i64>,
    /// Rows per page, defaults to the configured page size.
    pub per_page: Option<i64>,
}

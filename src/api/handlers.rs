//! API handlers
//!
//! Every handler answers with the `{success, data, error}` envelope.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::{canonical, Expense};
use crate::reports::{CategoryPeriodReport, ComparisonResult, ALL_CATEGORIES};
use crate::services::report::reference_date;
use crate::services::{CategoryService, ExpenseService, ReportService};

use super::{ApiError, ApiResponse, AppState};

type ApiResult<T> = Result<T, ApiError>;

/// Query parameters for listing expenses
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

/// Body of `POST /api/expenses`
#[derive(Debug, Deserialize)]
pub struct NewExpense {
    pub category: String,
    pub amount: f64,
    pub date: String,
}

/// Body of `POST /api/categories`
#[derive(Debug, Deserialize)]
pub struct NewCategory {
    #[serde(alias = "category")]
    pub name: String,
}

/// An expense as returned by the API, with its date in canonical form
///
/// `normalizedDate` is `null` when the stored literal cannot be read.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseView {
    #[serde(flatten)]
    pub expense: Expense,
    pub normalized_date: Option<String>,
}

impl From<Expense> for ExpenseView {
    fn from(expense: Expense) -> Self {
        let normalized_date = expense.normalized_date().ok().map(canonical);
        Self {
            expense,
            normalized_date,
        }
    }
}

/// Body of `POST /api/reports`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// "category" (default), "month-comparison" or "year-comparison"
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    #[serde(alias = "categoryId")]
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub as_of: Option<String>,
}

/// Query parameters for the comparison endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonQuery {
    pub as_of: Option<String>,
}

/// Either kind of report
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ReportData {
    Category(CategoryPeriodReport),
    Comparison(ComparisonResult),
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// GET /api/health
pub async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpenseQuery>,
) -> ApiResult<impl IntoResponse> {
    let expenses: Vec<ExpenseView> = ExpenseService::new(&state.storage)
        .list(query.category.as_deref(), query.limit)?
        .into_iter()
        .map(ExpenseView::from)
        .collect();
    Ok(Json(ApiResponse::ok(expenses)))
}

/// POST /api/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<NewExpense>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let input = body(payload)?;
    let expense =
        ExpenseService::new(&state.storage).add(&input.category, input.amount, &input.date)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(ExpenseView::from(expense)))))
}

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let categories = CategoryService::new(&state.storage).list()?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let input = body(payload)?;
    let name = CategoryService::new(&state.storage).add(&input.name)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(name))))
}

/// DELETE /api/categories/:name
pub async fn delete_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<impl IntoResponse> {
    CategoryService::new(&state.storage).remove(&name)?;
    Ok(Json(ApiResponse::ok(name)))
}

/// POST /api/reports
pub async fn create_report(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let request = body(payload)?;
    let service =
        ReportService::new(&state.storage).with_strict_categories(state.settings.strict_categories);

    let data = match request.report_type.as_deref().unwrap_or("category") {
        "category" => {
            let category = request
                .category
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or(ALL_CATEGORIES);
            let start = request
                .start_date
                .as_deref()
                .ok_or_else(|| ApiError::bad_request("startDate is required"))?;
            let end = request
                .end_date
                .as_deref()
                .ok_or_else(|| ApiError::bad_request("endDate is required"))?;

            ReportData::Category(service.build_category_period_report(category, start, end)?)
        }
        "month-comparison" => {
            let now = reference_date(request.as_of.as_deref())?;
            ReportData::Comparison(service.build_month_comparison(now)?)
        }
        "year-comparison" => {
            let now = reference_date(request.as_of.as_deref())?;
            ReportData::Comparison(service.build_year_comparison(now)?)
        }
        other => {
            return Err(ApiError::bad_request(format!(
                "Invalid report type: {}",
                other
            )))
        }
    };

    Ok(Json(ApiResponse::ok(data)))
}

/// GET /api/reports/month-comparison
pub async fn month_comparison(
    State(state): State<AppState>,
    Query(query): Query<ComparisonQuery>,
) -> ApiResult<impl IntoResponse> {
    let now = reference_date(query.as_of.as_deref())?;
    let result = ReportService::new(&state.storage).build_month_comparison(now)?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/reports/year-comparison
pub async fn year_comparison(
    State(state): State<AppState>,
    Query(query): Query<ComparisonQuery>,
) -> ApiResult<impl IntoResponse> {
    let now = reference_date(query.as_of.as_deref())?;
    let result = ReportService::new(&state.storage).build_year_comparison(now)?;
    Ok(Json(ApiResponse::ok(result)))
}

use std::sync::Arc;

use axum::extract::Query;
use axum::{Extension, Json};
use tracing::field::Empty;

use super::{ApiJson, page_request};
use crate::api::rest::dto::{
    BoycottedDto, Envelope, ErrorBody, KeywordMatchDto, KeywordRequest, PageDto, PageQuery,
    PagedEnvelope,
};
use crate::api::rest::error::ApiResult;
use crate::domain::service::AppServices;

/// Merged company + brand feed for a name substring.
#[utoipa::path(
    post,
    path = "/api/v1/brands/boycotted",
    tag = "Boycott feed",
    request_body = KeywordRequest,
    params(
        ("page" = Option<i64>, Query, description = "1-based page, default 1"),
        ("limit" = Option<i64>, Query, description = "Page size, default 10"),
    ),
    responses(
        (status = 200, body = PagedEnvelope<BoycottedDto>),
        (status = 400, body = ErrorBody),
    )
)]
#[tracing::instrument(skip(svc, query, req), fields(keyword = %req.keyword, request_id = Empty))]
pub async fn boycott_feed(
    Extension(svc): Extension<Arc<AppServices>>,
    Query(query): Query<PageQuery>,
    ApiJson(req): ApiJson<KeywordRequest>,
) -> ApiResult<Json<PagedEnvelope<BoycottedDto>>> {
    let page = svc.feed.feed(&req.keyword, page_request(&query)).await?;

    Ok(Json(PagedEnvelope {
        message: "Boycott list loaded".to_owned(),
        page: PageDto::from(page.pages),
        data: page.items.into_iter().map(BoycottedDto::from).collect(),
    }))
}

/// Exact name lookup: matching companies, or failing that, matching brands.
#[utoipa::path(
    post,
    path = "/api/v1/brands/search",
    tag = "Boycott feed",
    request_body = KeywordRequest,
    responses(
        (status = 200, body = Envelope<KeywordMatchDto>),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    )
)]
#[tracing::instrument(skip(svc, req), fields(keyword = %req.keyword, request_id = Empty))]
pub async fn search_by_keyword(
    Extension(svc): Extension<Arc<AppServices>>,
    ApiJson(req): ApiJson<KeywordRequest>,
) -> ApiResult<Json<Envelope<KeywordMatchDto>>> {
    let found = svc.feed.find_by_keyword(&req.keyword).await?;
    Ok(Json(Envelope::new(
        "Boycott list loaded",
        KeywordMatchDto::from(found),
    )))
}

use std::sync::Arc;

use axum::extract::Query;
use axum::{Extension, Json};
use buycut_sdk::{CompanyPatch, NewCompany};
use http::StatusCode;
use tracing::field::Empty;

use super::{ApiMultipart, ApiPath, page_request};
use crate::api::rest::auth::AuthUser;
use crate::api::rest::dto::{
    CompanyDto, CompanyForm, CompanyUpdateForm, Envelope, ErrorBody, PageDto, PageQuery,
    PagedEnvelope,
};
use crate::api::rest::error::ApiResult;
use crate::api::rest::form::FormFields;
use crate::domain::service::AppServices;

/// List companies, optionally filtered by a name substring.
#[utoipa::path(
    get,
    path = "/api/v1/companies",
    tag = "Companies",
    params(
        ("keyword" = Option<String>, Query, description = "Case-insensitive name substring"),
        ("page" = Option<i64>, Query, description = "1-based page, default 1"),
        ("limit" = Option<i64>, Query, description = "Page size, default 10"),
    ),
    responses(
        (status = 200, body = PagedEnvelope<CompanyDto>),
        (status = 500, body = ErrorBody),
    )
)]
#[tracing::instrument(skip(svc, query), fields(request_id = Empty))]
pub async fn list_companies(
    Extension(svc): Extension<Arc<AppServices>>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<PagedEnvelope<CompanyDto>>> {
    let page = svc
        .companies
        .list(query.keyword.as_deref(), page_request(&query))
        .await?;

    Ok(Json(PagedEnvelope {
        message: "Boycotted companies loaded".to_owned(),
        page: PageDto::from(page.pages),
        data: page.items.into_iter().map(CompanyDto::from).collect(),
    }))
}

/// Get a company with its brands.
#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    tag = "Companies",
    params(("id" = i32, Path, description = "Company id")),
    responses(
        (status = 200, body = Envelope<CompanyDto>),
        (status = 404, body = ErrorBody),
    )
)]
#[tracing::instrument(skip(svc), fields(company.id = id, request_id = Empty))]
pub async fn get_company(
    Extension(svc): Extension<Arc<AppServices>>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Envelope<CompanyDto>>> {
    let company = svc.companies.get(id).await?;
    Ok(Json(Envelope::new(
        "This company is on the boycott list",
        CompanyDto::from(company),
    )))
}

/// Create a company from a multipart form with a required logo.
#[utoipa::path(
    post,
    path = "/api/v1/companies",
    tag = "Companies",
    request_body(content = CompanyForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, body = Envelope<CompanyDto>),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody),
        (status = 409, body = ErrorBody),
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(svc, multipart), fields(user.id = user.id, request_id = Empty))]
pub async fn create_company(
    Extension(svc): Extension<Arc<AppServices>>,
    Extension(user): Extension<AuthUser>,
    ApiMultipart(multipart): ApiMultipart,
) -> ApiResult<(StatusCode, Json<Envelope<CompanyDto>>)> {
    let mut form = FormFields::read(multipart).await?;
    let image = form.require_image()?;
    let new = NewCompany {
        name: form.text("name").unwrap_or_default().to_owned(),
        description: form.text("description").unwrap_or_default().to_owned(),
        proof: form.list("proof").unwrap_or_default(),
    };

    let company = svc.companies.create(new, image).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(
            "Company added to the boycott list",
            CompanyDto::from(company),
        )),
    ))
}

/// Partially update a company; the id travels in the form as `company_id`.
#[utoipa::path(
    put,
    path = "/api/v1/companies",
    tag = "Companies",
    request_body(content = CompanyUpdateForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = Envelope<CompanyDto>),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody),
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(svc, multipart), fields(user.id = user.id, request_id = Empty))]
pub async fn update_company(
    Extension(svc): Extension<Arc<AppServices>>,
    Extension(user): Extension<AuthUser>,
    ApiMultipart(multipart): ApiMultipart,
) -> ApiResult<Json<Envelope<CompanyDto>>> {
    let mut form = FormFields::read(multipart).await?;
    let id = form.required_int("company_id")?;
    let patch = CompanyPatch {
        name: form.text("name").map(ToOwned::to_owned),
        description: form.text("description").map(ToOwned::to_owned),
        proof: form.list("proof"),
    };

    let company = svc
        .companies
        .update(id, patch, form.take_image())
        .await?;
    Ok(Json(Envelope::new(
        "Company updated",
        CompanyDto::from(company),
    )))
}

/// Delete a company, its brands and its stored images.
#[utoipa::path(
    delete,
    path = "/api/v1/companies/{id}",
    tag = "Companies",
    params(("id" = i32, Path, description = "Company id")),
    responses(
        (status = 200, body = Envelope<Option<String>>),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(svc), fields(company.id = id, user.id = user.id, request_id = Empty))]
pub async fn delete_company(
    Extension(svc): Extension<Arc<AppServices>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Envelope<Option<String>>>> {
    svc.companies.delete(id).await?;
    Ok(Json(Envelope::new(
        "Company removed from the boycott list",
        None,
    )))
}

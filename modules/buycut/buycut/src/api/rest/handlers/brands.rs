use std::sync::Arc;

use axum::{Extension, Json};
use buycut_sdk::{BrandPatch, NewBrand};
use http::StatusCode;
use tracing::field::Empty;

use super::{ApiMultipart, ApiPath};
use crate::api::rest::auth::AuthUser;
use crate::api::rest::dto::{BrandDto, BrandForm, BrandUpdateForm, Envelope, ErrorBody};
use crate::api::rest::error::ApiResult;
use crate::api::rest::form::FormFields;
use crate::domain::service::AppServices;

/// Add a brand to an existing company.
#[utoipa::path(
    post,
    path = "/api/v1/brands",
    tag = "Brands",
    request_body(content = BrandForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, body = Envelope<BrandDto>),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody),
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(svc, multipart), fields(user.id = user.id, request_id = Empty))]
pub async fn create_brand(
    Extension(svc): Extension<Arc<AppServices>>,
    Extension(user): Extension<AuthUser>,
    ApiMultipart(multipart): ApiMultipart,
) -> ApiResult<(StatusCode, Json<Envelope<BrandDto>>)> {
    let mut form = FormFields::read(multipart).await?;
    let company_id = form.required_int("company_id")?;
    let image = form.require_image()?;
    let new = NewBrand {
        name: form.text("name").unwrap_or_default().to_owned(),
        company_id,
    };

    let brand = svc.brands.create(new, image).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(
            "Brand added to the boycott list",
            BrandDto::from(brand),
        )),
    ))
}

/// Rename, move or re-image a brand.
#[utoipa::path(
    put,
    path = "/api/v1/brands/{id}",
    tag = "Brands",
    params(("id" = i32, Path, description = "Brand id")),
    request_body(content = BrandUpdateForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = Envelope<BrandDto>),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody),
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(svc, multipart), fields(brand.id = id, user.id = user.id, request_id = Empty))]
pub async fn update_brand(
    Extension(svc): Extension<Arc<AppServices>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
    ApiMultipart(multipart): ApiMultipart,
) -> ApiResult<Json<Envelope<BrandDto>>> {
    let mut form = FormFields::read(multipart).await?;
    let patch = BrandPatch {
        name: form.text("name").map(ToOwned::to_owned),
        company_id: form.int("company_id")?,
    };

    let brand = svc.brands.update(id, patch, form.take_image()).await?;
    Ok(Json(Envelope::new("Brand updated", BrandDto::from(brand))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/brands/{id}",
    tag = "Brands",
    params(("id" = i32, Path, description = "Brand id")),
    responses(
        (status = 200, body = Envelope<Option<String>>),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(svc), fields(brand.id = id, user.id = user.id, request_id = Empty))]
pub async fn delete_brand(
    Extension(svc): Extension<Arc<AppServices>>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<Envelope<Option<String>>>> {
    svc.brands.delete(id).await?;
    Ok(Json(Envelope::new(
        "Brand removed from the boycott list",
        None,
    )))
}

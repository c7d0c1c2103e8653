//! Items API handlers.
//!
//! ```text
//! POST /api/v1/items {"code":"sa4123","title":"my-title",...}
//! GET  /api/v1/items/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::ItemRepositoryError;
use crate::domain::{
    Error, ItemDraft, ItemType, ItemValidationError, ItemWorkflowError, StoredItem,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, parse_item_id, require, require_text,
};

const CODE: FieldName = FieldName::new("code");
const TITLE: FieldName = FieldName::new("title");
const DESCRIPTION: FieldName = FieldName::new("description");
const PRICE: FieldName = FieldName::new("price");
const STOCK: FieldName = FieldName::new("stock");
const ITEM_TYPE: FieldName = FieldName::new("itemType");
const LEADER_LEVEL: FieldName = FieldName::new("leaderLevel");
const PHOTOS: FieldName = FieldName::new("photos");
const ID: FieldName = FieldName::new("id");

/// Request body for `POST /api/v1/items`.
///
/// Required fields are optional here so a missing field is reported by name
/// rather than as a generic deserialisation failure.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    /// Listing code; must be unused.
    #[schema(example = "sa4123")]
    pub code: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Price in minor currency units.
    pub price: Option<i64>,
    /// Units on hand.
    pub stock: Option<i64>,
    /// `OWN` or `SELLER`.
    #[schema(example = "SELLER")]
    pub item_type: Option<String>,
    /// Leader flag for seller listings.
    #[serde(default)]
    pub leader: bool,
    /// `BASIC`, `GOLD`, or `PLATINUM`; checked for leader seller listings.
    #[serde(default)]
    pub leader_level: String,
    /// Photo references; at least one is required.
    #[serde(default)]
    pub photos: Vec<String>,
}

impl CreateItemRequest {
    fn into_draft(self) -> Result<ItemDraft, Error> {
        let code = require_text(self.code, CODE)?;
        let title = require_text(self.title, TITLE)?;
        let description = require_text(self.description, DESCRIPTION)?;
        let price = require(self.price, PRICE)?;
        let stock = require(self.stock, STOCK)?;
        let raw_type = require_text(self.item_type, ITEM_TYPE)?;
        let item_type = raw_type
            .parse::<ItemType>()
            .map_err(|_| invalid_value_error(ITEM_TYPE, &raw_type, "OWN, SELLER"))?;

        Ok(ItemDraft {
            code,
            title,
            description,
            price,
            stock,
            item_type,
            leader: self.leader,
            leader_level: self.leader_level,
            photos: self.photos,
        })
    }
}

/// Item as returned by the API.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    /// Store-assigned identifier.
    pub id: i64,
    /// Unique listing code.
    pub code: String,
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Price in minor currency units.
    pub price: i64,
    /// Units on hand.
    pub stock: i64,
    /// `OWN` or `SELLER`.
    #[schema(example = "SELLER")]
    pub item_type: String,
    /// Leader flag.
    pub leader: bool,
    /// Stored tier; empty for non-leader sellers.
    pub leader_level: String,
    /// `ACTIVE` when stock is positive, otherwise `INACTIVE`.
    #[schema(example = "ACTIVE")]
    pub status: String,
    /// Photo references in submission order.
    pub photos: Vec<String>,
    /// First write, RFC 3339.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    /// Last write, RFC 3339.
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<StoredItem> for ItemResponse {
    fn from(stored: StoredItem) -> Self {
        let id = stored.id().get();
        let created_at = stored.created_at();
        let updated_at = stored.updated_at();
        let item = stored.into_item();
        Self {
            id,
            code: item.code().to_owned(),
            title: item.title().to_owned(),
            description: item.description().to_owned(),
            price: item.price(),
            stock: item.stock(),
            item_type: item.item_type().as_str().to_owned(),
            leader: item.leader(),
            leader_level: item.leader_level().to_owned(),
            status: item.status().as_str().to_owned(),
            photos: item.photos().to_vec(),
            created_at,
            updated_at,
        }
    }
}

/// Translate a workflow outcome into the HTTP error envelope.
pub(crate) fn map_item_error(err: ItemWorkflowError) -> Error {
    match err {
        ItemWorkflowError::Validation(reason) => {
            let field = match &reason {
                ItemValidationError::InvalidLeaderLevel { .. } => LEADER_LEVEL,
                ItemValidationError::MissingPhotos => PHOTOS,
            };
            Error::invalid_request(reason.to_string())
                .with_details(json!({ "field": field.as_str(), "code": "rule_violation" }))
        }
        ItemWorkflowError::DuplicateCode { code } => {
            Error::conflict("the item code must be unique")
                .with_details(json!({ "field": CODE.as_str(), "value": code }))
        }
        ItemWorkflowError::NotFound { id } => Error::not_found(format!("item {id} not found")),
        ItemWorkflowError::Storage(
            cause @ (ItemRepositoryError::Connection { .. } | ItemRepositoryError::Timeout { .. }),
        ) => Error::service_unavailable(format!("item storage unavailable: {cause}")),
        ItemWorkflowError::Storage(cause) => Error::internal(format!("item storage failed: {cause}")),
    }
}

/// Create an item.
#[utoipa::path(
    post,
    path = "/api/v1/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemResponse,
            headers(("Location" = String, description = "URL of the new item"))),
        (status = 400, description = "Invalid request or business rule violation", body = Error),
        (status = 409, description = "Item code already in use", body = Error),
        (status = 503, description = "Item storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["items"],
    operation_id = "createItem"
)]
#[post("/items")]
pub async fn create_item(
    state: web::Data<HttpState>,
    payload: web::Json<CreateItemRequest>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft()?;
    let stored = state.items.create_item(draft).await.map_err(map_item_error)?;
    let location = format!("/api/v1/items/{}", stored.id());

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(ItemResponse::from(stored)))
}

/// Fetch an item with its photos.
#[utoipa::path(
    get,
    path = "/api/v1/items/{id}",
    params(("id" = i64, Path, description = "Positive item identifier")),
    responses(
        (status = 200, description = "Item", body = ItemResponse),
        (status = 400, description = "Identifier is not a positive integer", body = Error),
        (status = 404, description = "No such item", body = Error),
        (status = 503, description = "Item storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["items"],
    operation_id = "getItem"
)]
#[get("/items/{id}")]
pub async fn get_item(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ItemResponse>> {
    let id = parse_item_id(&path, ID)?;
    let stored = state.items_query.get_item(id).await.map_err(map_item_error)?;
    Ok(web::Json(ItemResponse::from(stored)))
}

#[cfg(test)]
#[path = "items_tests.rs"]
mod tests;

//! HTTP handlers for `/api/books` and `/api/search`.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use playground_http::{ApiJson, AppError};
use serde::Deserialize;
use serde_json::{json, Value};

use super::models::BookFields;
use crate::store::{ListQuery, Record, SearchQuery, SharedStore, StoreError};
use crate::{modules::books::models::Book, utils};

/// Routes served by the books module, relative to `/api`.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book)
                .put(replace_book)
                .patch(update_book)
                .delete(delete_book),
        )
        .route("/search", get(search_books))
        .with_state(store)
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub genre: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub min_year: Option<String>,
    pub max_year: Option<String>,
    pub author: Option<String>,
}

async fn list_books(
    State(store): State<SharedStore>,
    Query(params): Query<ListParams>,
) -> Json<Value> {
    let query = ListQuery {
        filter: utils::non_blank(params.genre).map(|genre| ("genre".to_string(), genre)),
        sort: utils::non_blank(params.sort),
        limit: utils::parse_number(params.limit.as_deref()),
    };

    let books = store.read().await.list_books(&query);
    Json(json!({
        "success": true,
        "count": books.len(),
        "data": books,
    }))
}

async fn get_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = utils::parse_id(&id, Book::KIND)?;
    let book = store.read().await.get_book(id)?;
    Ok(Json(json!({ "success": true, "data": book })))
}

async fn create_book(
    State(store): State<SharedStore>,
    ApiJson(fields): ApiJson<BookFields>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let book = store.write().await.create_book(fields)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Book created successfully",
            "data": book,
        })),
    ))
}

async fn replace_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    ApiJson(fields): ApiJson<BookFields>,
) -> Result<Json<Value>, AppError> {
    let id = utils::parse_id(&id, Book::KIND)?;
    let book = store
        .write()
        .await
        .replace_book(id, fields)
        .map_err(|err| match err {
            StoreError::Validation { .. } => AppError::from(err).with_tip(
                "PUT replaces the whole book: send title, author, year and genre, \
                 or use PATCH to change only some fields",
            ),
            StoreError::NotFound { .. } => AppError::from(err),
        })?;

    Ok(Json(json!({
        "success": true,
        "message": "Book replaced successfully",
        "data": book,
    })))
}

async fn update_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let id = utils::parse_id(&id, Book::KIND)?;
    let mut store = store.write().await;
    store.get_book(id)?;
    let fields = patch_fields(&body)?;
    let outcome = store.update_book(id, fields)?;

    Ok(Json(json!({
        "success": true,
        "message": "Book updated successfully",
        "before": outcome.before,
        "data": outcome.after,
        "changedFields": outcome.changed_fields,
    })))
}

/// Parse a PATCH body. Any subset of fields is valid, including none, so an
/// empty body is an empty patch.
fn patch_fields(body: &[u8]) -> Result<BookFields, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(BookFields::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        AppError::bad_request(format!("Invalid JSON body: {err}"))
            .with_tip("Send a JSON object with any of title, author, year and genre")
    })
}

async fn delete_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = utils::parse_id(&id, Book::KIND)?;
    let removed = store.write().await.delete_book(id)?;

    Ok(Json(json!({
        "success": true,
        "message": "Book deleted successfully",
        "data": removed,
    })))
}

async fn search_books(
    State(store): State<SharedStore>,
    Query(params): Query<SearchParams>,
) -> Json<Value> {
    let query = SearchQuery {
        text: utils::non_blank(params.q),
        min_year: utils::parse_number(params.min_year.as_deref()),
        max_year: utils::parse_number(params.max_year.as_deref()),
        author: utils::non_blank(params.author),
    };

    let books = store.read().await.search_books(&query);
    Json(json!({
        "success": true,
        "filters": {
            "q": query.text,
            "minYear": query.min_year,
            "maxYear": query.max_year,
            "author": query.author,
        },
        "count": books.len(),
        "data": books,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_body_is_an_empty_patch() {
        assert_eq!(patch_fields(b"").unwrap(), BookFields::default());
        assert_eq!(patch_fields(b" \n").unwrap(), BookFields::default());
        assert_eq!(patch_fields(b"{}").unwrap(), BookFields::default());
    }

    #[test]
    fn patch_body_must_be_json_when_present() {
        let fields = patch_fields(br#"{"genre": "Classics"}"#).unwrap();
        assert_eq!(fields.supplied(), vec!["genre"]);

        let error = patch_fields(b"genre=Classics").unwrap_err();
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }
}

//! Todo Form Extractor
//!
//! Create and update accept either `multipart/form-data` (`title`, `done`,
//! optional `photo` file) or a JSON body `{ "title": ..., "done": ... }`.
//! Any owner field is ignored; the owner always comes from the token.

use axum::Json;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use serde::Deserialize;

use crate::application::TodoInput;
use crate::domain::storage::PhotoUpload;
use crate::error::TodoError;

/// Parsed create/update body
#[derive(Debug, Default)]
pub struct TodoForm {
    pub title: String,
    pub done: bool,
    pub photo: Option<PhotoUpload>,
}

impl From<TodoForm> for TodoInput {
    fn from(form: TodoForm) -> Self {
        TodoInput {
            title: form.title,
            done: form.done,
            photo: form.photo,
        }
    }
}

#[derive(Deserialize)]
struct TodoJson {
    #[serde(default)]
    title: String,
    #[serde(default)]
    done: bool,
}

/// `true` (any case) or `1`; everything else is false
pub fn parse_done(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

impl<S> FromRequest<S> for TodoForm
where
    S: Send + Sync,
{
    type Rejection = TodoError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state).await?;
            read_multipart(multipart).await
        } else if content_type.starts_with("application/json") {
            let Json(body) = Json::<TodoJson>::from_request(req, state).await?;
            Ok(TodoForm {
                title: body.title,
                done: body.done,
                photo: None,
            })
        } else {
            Err(TodoError::UnsupportedMediaType(content_type))
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<TodoForm, TodoError> {
    let mut form = TodoForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "title" => form.title = field.text().await?,
            "done" => form.done = parse_done(&field.text().await?),
            "photo" => {
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field.bytes().await?;
                // Browsers send an empty part when no file is chosen
                if !bytes.is_empty() {
                    form.photo = Some(PhotoUpload::new(file_name, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

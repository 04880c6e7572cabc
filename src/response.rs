use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failed,
}

/// Body shape shared by every endpoint: `{status, message, data?}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Envelope {
            status: Status::Success,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn failed(message: impl Into<String>) -> Self {
        Envelope {
            status: Status::Failed,
            message: message.into(),
            data: None,
        }
    }
}

pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::success(message, data))
}

pub fn created<T: Serialize>(message: impl Into<String>, data: T) -> HttpResponse {
    HttpResponse::Created().json(Envelope::success(message, data))
}

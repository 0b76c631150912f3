// client/src/lib.rs

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use models::reservation::Reservation;

/// The response envelope of the enrollment endpoint.
#[derive(Debug, Deserialize)]
pub struct SubmitEnvelope {
    pub ok: bool,
    pub application_id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The endpoint answered, but refused the submission (non-success
    /// status or `ok: false`); carries the envelope's error message.
    #[error("{0}")]
    Rejected(String),
    /// Transport or response-decoding failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// The seam between the application core and the network: anything that can
/// carry a reservation to the enrollment endpoint and come back with an
/// application id.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, reservation: &Reservation) -> Result<String, SubmitError>;
}

/// HTTP submitter posting to `{base}/api/enroll`. Best effort: no retry, no
/// caller-imposed deadline.
pub struct EnrollmentClient {
    base_url: String,
    http: reqwest::Client,
}

impl EnrollmentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn enroll_url(&self) -> String {
        format!("{}/api/enroll", self.base_url)
    }
}

#[async_trait]
impl Submitter for EnrollmentClient {
    async fn submit(&self, reservation: &Reservation) -> Result<String, SubmitError> {
        let url = self.enroll_url();
        debug!("Submitting reservation for LRN '{}' to {}", reservation.lrn, url);

        let response = self.http.post(&url).json(reservation).send().await?;
        let status = response.status();
        let envelope: SubmitEnvelope = response.json().await?;

        if status.is_success() && envelope.ok {
            Ok(envelope.application_id.unwrap_or_default())
        } else {
            Err(SubmitError::Rejected(
                envelope.error.unwrap_or_else(|| "Submit failed".to_string()),
            ))
        }
    }
}

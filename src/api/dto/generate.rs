/*
 * Responsibility
 * - Response DTO for POST /generate
 */
use serde::Serialize;

use crate::services::storage::JobId;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub job_id: JobId,
    pub model_url: String,
}

impl GenerateResponse {
    pub fn for_job(job_id: JobId) -> Self {
        Self {
            job_id,
            model_url: format!("/asset/{job_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_job_id_as_plain_string() {
        let job_id = JobId::new();
        let value = serde_json::to_value(GenerateResponse::for_job(job_id)).unwrap();

        assert_eq!(value["job_id"], job_id.to_string());
        assert_eq!(value["model_url"], format!("/asset/{job_id}"));
    }
}

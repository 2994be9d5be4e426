use gloo::net::http::Request;
use shared::{
    CheckAuthResponse, CreateIncomeLessonRequest, CreateIncomeLessonResponse, ScheduleEntry,
    ScheduleResponse,
};

/// API client for communicating with the tutoring site backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against the same origin the page was served
    /// from (all endpoints are relative `/api/...` paths).
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// Fetch the full weekly schedule for the tutor
    pub async fn get_schedule(&self) -> Result<Vec<ScheduleEntry>, String> {
        let url = format!("{}/api/schedule", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<ScheduleResponse>().await {
                        Ok(data) => Ok(data.schedule),
                        Err(e) => Err(format!("Failed to parse schedule: {}", e)),
                    }
                } else {
                    Err(format!(
                        "Schedule request failed with status {}",
                        response.status()
                    ))
                }
            }
            Err(e) => Err(format!("Failed to fetch schedule: {}", e)),
        }
    }

    /// Check whether the tutor session is still authenticated
    pub async fn check_auth(&self) -> Result<bool, String> {
        let url = format!("{}/api/check-auth", self.base_url);

        match Request::get(&url).send().await {
            Ok(response) => match response.json::<CheckAuthResponse>().await {
                Ok(data) => Ok(data.authenticated),
                Err(e) => Err(format!("Failed to parse auth response: {}", e)),
            },
            Err(e) => Err(format!("Auth check failed: {}", e)),
        }
    }

    /// Mirror a completed lesson to the income ledger. Best effort: callers
    /// only log the outcome, local state never depends on it.
    pub async fn create_income_lesson(
        &self,
        request: CreateIncomeLessonRequest,
    ) -> Result<CreateIncomeLessonResponse, String> {
        let url = format!("{}/api/income-lessons", self.base_url);

        match Request::post(&url)
            .json(&request)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
        {
            Ok(response) => {
                if response.ok() {
                    match response.json::<CreateIncomeLessonResponse>().await {
                        Ok(data) => Ok(data),
                        Err(e) => Err(format!("Failed to parse response: {}", e)),
                    }
                } else {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    Err(error_text)
                }
            }
            Err(e) => Err(format!("Network error: {}", e)),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

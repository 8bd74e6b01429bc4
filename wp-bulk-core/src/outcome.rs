use crate::ids::RecordId;
use serde::{Deserialize, Serialize};

/// Classification of a single delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The endpoint answered 200
    Deleted { status: u16, body: String },
    /// The endpoint answered with any other status
    Rejected { status: u16, body: String },
    /// The request hit the configured timeout
    TimedOut,
    /// Connection, protocol or worker failure
    Failed,
}

impl DeleteOutcome {
    pub fn from_response(status: u16, body: String) -> Self {
        if status == 200 {
            DeleteOutcome::Deleted { status, body }
        } else {
            DeleteOutcome::Rejected { status, body }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted { .. })
    }

    fn message(&self, id: &RecordId) -> String {
        match self {
            DeleteOutcome::Deleted { .. } => format!("Post {id} deleted successfully."),
            DeleteOutcome::Rejected { .. } => format!("Failed to delete post {id}."),
            DeleteOutcome::TimedOut => format!("Timeout while trying to delete post {id}."),
            DeleteOutcome::Failed => format!("Exception while trying to delete post {id}."),
        }
    }
}

/// One line of the status file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub id: RecordId,
    pub status_code: Option<u16>,
    pub post_url: String,
    pub response: Option<String>,
    pub message: String,
}

impl StatusRecord {
    pub fn new(id: RecordId, post_url: String, outcome: DeleteOutcome) -> Self {
        let message = outcome.message(&id);
        let (status_code, response) = match outcome {
            DeleteOutcome::Deleted { status, body } | DeleteOutcome::Rejected { status, body } => {
                (Some(status), Some(body))
            }
            DeleteOutcome::TimedOut | DeleteOutcome::Failed => (None, None),
        };

        Self {
            id,
            status_code,
            post_url,
            response,
            message,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == Some(200)
    }
}

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{AnimeResponse, CommentResponse, RatingResponse, UserResponse};

// Success envelopes: `{ success, data, count? }`. Error responses render the
// matching `{ success: false, error }` shape via `ApiError`.

#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub success: bool,
    pub data: UserResponse,
}

impl UserEnvelope {
    pub fn new(data: UserResponse) -> Self {
        UserEnvelope {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnimeEnvelope {
    pub success: bool,
    pub data: AnimeResponse,
}

impl AnimeEnvelope {
    pub fn new(data: AnimeResponse) -> Self {
        AnimeEnvelope {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnimeListEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: Vec<AnimeResponse>,
}

impl AnimeListEnvelope {
    pub fn new(data: Vec<AnimeResponse>) -> Self {
        AnimeListEnvelope {
            success: true,
            count: None,
            data,
        }
    }

    pub fn with_count(data: Vec<AnimeResponse>) -> Self {
        AnimeListEnvelope {
            success: true,
            count: Some(data.len()),
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentEnvelope {
    pub success: bool,
    pub data: CommentResponse,
}

impl CommentEnvelope {
    pub fn new(data: CommentResponse) -> Self {
        CommentEnvelope {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentListEnvelope {
    pub success: bool,
    pub count: usize,
    pub data: Vec<CommentResponse>,
}

impl CommentListEnvelope {
    pub fn with_count(data: Vec<CommentResponse>) -> Self {
        CommentListEnvelope {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingEnvelope {
    pub success: bool,
    pub data: RatingResponse,
}

impl RatingEnvelope {
    pub fn new(data: RatingResponse) -> Self {
        RatingEnvelope {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingListEnvelope {
    pub success: bool,
    pub count: usize,
    pub data: Vec<RatingResponse>,
}

impl RatingListEnvelope {
    pub fn with_count(data: Vec<RatingResponse>) -> Self {
        RatingListEnvelope {
            success: true,
            count: data.len(),
            data,
        }
    }
}

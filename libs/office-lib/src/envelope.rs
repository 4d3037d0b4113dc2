use serde::{Deserialize, Serialize};

pub const SUCCESS_CODE: i32 = 0;
pub const VALIDATION_FAILED_CODE: i32 = 401;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub code: i32,
    pub message: String,
}

/// Status header plus an optional body.
///
/// The body is present exactly when the header carries `SUCCESS_CODE`. The
/// constructors are the only way to build one; deserialization rejects any
/// other shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(
    try_from = "RawEnvelope<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct ResponseEnvelope<T> {
    header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<T>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct RawEnvelope<T> {
    header: Header,
    #[serde(default)]
    body: Option<T>,
}

impl<T> TryFrom<RawEnvelope<T>> for ResponseEnvelope<T> {
    type Error = String;

    fn try_from(raw: RawEnvelope<T>) -> Result<Self, Self::Error> {
        match (raw.header.code == SUCCESS_CODE, raw.body) {
            (true, Some(body)) => Ok(Self {
                header: raw.header,
                body: Some(body),
            }),
            (false, None) => Ok(Self {
                header: raw.header,
                body: None,
            }),
            (true, None) => Err("success envelope without a body".to_string()),
            (false, Some(_)) => Err(format!(
                "failure envelope (code {}) must not carry a body",
                raw.header.code
            )),
        }
    }
}

impl<T> ResponseEnvelope<T> {
    pub fn ok(body: T) -> Self {
        Self {
            header: Header {
                code: SUCCESS_CODE,
                message: String::new(),
            },
            body: Some(body),
        }
    }

    /// A failure carrying `code`. A zero code is promoted to
    /// `VALIDATION_FAILED_CODE` so a failure is never mistaken for success.
    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        let code = if code == SUCCESS_CODE {
            VALIDATION_FAILED_CODE
        } else {
            code
        };
        Self {
            header: Header {
                code,
                message: message.into(),
            },
            body: None,
        }
    }

    pub fn code(&self) -> i32 {
        self.header.code
    }

    pub fn message(&self) -> &str {
        &self.header.message
    }

    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    pub fn into_body(self) -> Option<T> {
        self.body
    }

    pub fn is_success(&self) -> bool {
        self.header.code == SUCCESS_CODE
    }
}

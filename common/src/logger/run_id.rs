use uuid::Uuid;

/// Correlation ID that follows one analysis run or monitor session
/// through every log line it produces.
#[derive(Clone, Debug)]
pub struct RunId(Uuid);

impl RunId {
    pub fn as_str(&self) -> &str {
        // safe: UUID lives as long as self
        self.0.as_hyphenated().to_string().leak()
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self(Uuid::new_v4())
    }
}

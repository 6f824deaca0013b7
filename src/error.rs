pub type ZoomResult<T> = Result<T, ZoomError>;

#[derive(thiserror::Error, Debug)]
pub enum ZoomError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("calibration error: {0}")]
    Calibration(String),

    #[error("fit error: {0}")]
    Fit(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ZoomError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn calibration(msg: impl Into<String>) -> Self {
        Self::Calibration(msg.into())
    }

    pub fn fit(msg: impl Into<String>) -> Self {
        Self::Fit(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ZoomError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            ZoomError::calibration("x")
                .to_string()
                .contains("calibration error:")
        );
        assert!(ZoomError::fit("x").to_string().contains("fit error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ZoomError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}

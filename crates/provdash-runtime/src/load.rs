use provdash_client::{ApiError, ApiResult};

/// Lifecycle of one independently fetched slice of view data.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Load<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(ApiError),
}

impl<T> Load<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Load::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Load::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Load::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn settle(&mut self, result: ApiResult<T>) {
        *self = match result {
            Ok(value) => Load::Ready(value),
            Err(err) => Load::Failed(err),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_transitions() {
        let mut slot: Load<u32> = Load::Loading;
        assert!(slot.is_loading());

        slot.settle(Ok(3));
        assert_eq!(slot.ready(), Some(&3));

        slot.settle(Err(ApiError::RateLimited));
        assert_eq!(slot.error(), Some(&ApiError::RateLimited));
        assert_eq!(slot.ready(), None);
    }
}

use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
  #[error("failed to {operation}: {source}")]
  Gateway {
    operation: &'static str,
    #[source]
    source:    GatewayError
  },

  #[error("cleared {deleted} of {total} tasks before a delete failed: {source}")]
  ClearIncomplete {
    deleted: usize,
    total:   usize,
    #[source]
    source:  GatewayError
  }
}

impl DispatchError {
  pub(crate) fn gateway(
    operation: &'static str
  ) -> impl FnOnce(GatewayError) -> Self {
    move |source| Self::Gateway {
      operation,
      source
    }
  }
}

use crate::error::{CoreError, Severity};

pub fn log_core_error(err: &CoreError) {
    match err.severity {
        Severity::Info => tracing::info!(domain = ?err.domain, kind = ?err.kind, "{err}"),
        Severity::Warn => tracing::warn!(domain = ?err.domain, kind = ?err.kind, "{err}"),
        Severity::Error => tracing::error!(domain = ?err.domain, kind = ?err.kind, "{err}"),
    }
}

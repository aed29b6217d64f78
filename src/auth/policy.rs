use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

/// Per-route role requirements, evaluated after token validation. The
/// reference deployment runs with an empty table (authentication required,
/// no role gating), but the policy point is explicit so gating a route is a
/// one-line configuration change rather than a code change.
#[derive(Clone, Debug, Default)]
pub struct RoutePolicy {
    rules: Vec<(String, String)>, // (path prefix, required role name)
}

impl RoutePolicy {
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn require(mut self, path_prefix: &str, role: &str) -> Self {
        self.rules.push((path_prefix.to_string(), role.to_string()));
        self
    }

    /// Longest matching prefix wins, so a narrow rule can override a broad one.
    pub fn required_role(&self, path: &str) -> Option<&str> {
        self.rules
            .iter()
            .filter(|(prefix, _)| path.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, role)| role.as_str())
    }

    pub fn check(&self, path: &str, claims: &Claims) -> AppResult<()> {
        match self.required_role(path) {
            Some(required) if claims.role != required => Err(AppError::Unauthorized(format!(
                "Route requires role '{}'",
                required
            ))),
            _ => Ok(()),
        }
    }
}

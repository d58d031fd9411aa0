const LOCAL_API_BASE_URL: &str = "http://127.0.0.1:8000";
const REMOTE_API_BASE_URL: &str = "http://api.example.com:8000";

// Provided at the app root through a ContextProvider so every page talks
// to the same resolved endpoint.
#[derive(Clone, PartialEq)]
pub struct Config {
    pub api_base_url: &'static str,
}

impl Config {
    pub fn from_build_env() -> Self {
        Self {
            api_base_url: resolve_api_base_url(option_env!("APP_ENV")),
        }
    }
}

// APP_ENV is baked in at compile time; wasm has no process environment.
// Unset, empty or "development" selects the local API, anything else the
// deployed one.
pub fn resolve_api_base_url(app_env: Option<&str>) -> &'static str {
    match app_env {
        None | Some("") | Some("development") => LOCAL_API_BASE_URL,
        Some(_) => REMOTE_API_BASE_URL,
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_api_base_url;

    #[test]
    fn test_unset_env_targets_local_api() {
        assert_eq!(resolve_api_base_url(None), "http://127.0.0.1:8000");
        assert_eq!(resolve_api_base_url(Some("")), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_development_env_targets_local_api() {
        assert_eq!(resolve_api_base_url(Some("development")), "http://127.0.0.1:8000");
    }

    #[test]
    fn test_other_envs_target_deployed_api() {
        assert_eq!(resolve_api_base_url(Some("production")), "http://api.example.com:8000");
        assert_eq!(resolve_api_base_url(Some("staging")), "http://api.example.com:8000");
    }
}

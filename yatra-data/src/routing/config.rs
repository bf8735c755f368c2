//! Configuration consumed by the HTTP route providers.
//!
//! Credentials are optional: a provider whose credential is absent (or blank)
//! is left out of the fallback chain and refuses requests without touching
//! the network.

use std::time::Duration;

use yatra_core::ProviderId;

/// Default user agent for routing requests.
pub const DEFAULT_USER_AGENT: &str = "yatra-routing/0.1";

/// Default public OSRM endpoint.
pub const DEFAULT_OSRM_BASE_URL: &str = "https://router.project-osrm.org";
/// Default GraphHopper endpoint.
pub const DEFAULT_GRAPHHOPPER_BASE_URL: &str = "https://graphhopper.com/api/1";
/// Default Mapbox endpoint.
pub const DEFAULT_MAPBOX_BASE_URL: &str = "https://api.mapbox.com";

const DEFAULT_OSRM_PROFILE: &str = "foot";
const DEFAULT_GRAPHHOPPER_PROFILE: &str = "foot";
const DEFAULT_MAPBOX_PROFILE: &str = "walking";

const DEFAULT_OSRM_TIMEOUT_MS: u64 = 4_500;
const DEFAULT_GRAPHHOPPER_TIMEOUT_MS: u64 = 4_000;
const DEFAULT_MAPBOX_TIMEOUT_MS: u64 = 3_000;

/// Per-provider time budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderTimeouts {
    /// Budget for the keyless OSRM provider.
    pub osrm: Duration,
    /// Budget for GraphHopper.
    pub graphhopper: Duration,
    /// Budget for Mapbox.
    pub mapbox: Duration,
}

impl Default for ProviderTimeouts {
    fn default() -> Self {
        Self {
            osrm: Duration::from_millis(DEFAULT_OSRM_TIMEOUT_MS),
            graphhopper: Duration::from_millis(DEFAULT_GRAPHHOPPER_TIMEOUT_MS),
            mapbox: Duration::from_millis(DEFAULT_MAPBOX_TIMEOUT_MS),
        }
    }
}

impl ProviderTimeouts {
    /// Budget for `provider`.
    #[must_use]
    pub const fn get(&self, provider: ProviderId) -> Duration {
        match provider {
            ProviderId::Osrm => self.osrm,
            ProviderId::GraphHopper => self.graphhopper,
            ProviderId::Mapbox => self.mapbox,
        }
    }
}

/// Base URLs for each provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    /// OSRM base URL (e.g. `"https://router.project-osrm.org"`).
    pub osrm: String,
    /// GraphHopper base URL (e.g. `"https://graphhopper.com/api/1"`).
    pub graphhopper: String,
    /// Mapbox base URL (e.g. `"https://api.mapbox.com"`).
    pub mapbox: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            osrm: DEFAULT_OSRM_BASE_URL.to_owned(),
            graphhopper: DEFAULT_GRAPHHOPPER_BASE_URL.to_owned(),
            mapbox: DEFAULT_MAPBOX_BASE_URL.to_owned(),
        }
    }
}

impl ProviderEndpoints {
    /// Base URL for `provider`.
    #[must_use]
    pub fn get(&self, provider: ProviderId) -> &str {
        match provider {
            ProviderId::Osrm => &self.osrm,
            ProviderId::GraphHopper => &self.graphhopper,
            ProviderId::Mapbox => &self.mapbox,
        }
    }
}

/// Configuration for the HTTP route providers.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use yatra_core::ProviderId;
/// use yatra_data::routing::RoutingConfig;
///
/// let config = RoutingConfig::default()
///     .with_mapbox_token("pk.test")
///     .with_osrm_profile("driving")
///     .with_timeout(ProviderId::Mapbox, Duration::from_secs(2));
///
/// assert_eq!(config.provider_order(), vec![ProviderId::Mapbox, ProviderId::Osrm]);
/// assert_eq!(config.timeouts.mapbox, Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingConfig {
    /// GraphHopper API key; `None` disables GraphHopper.
    pub graphhopper_key: Option<String>,
    /// Mapbox access token; `None` disables Mapbox.
    pub mapbox_token: Option<String>,
    /// OSRM routing profile used in the request path.
    pub osrm_profile: String,
    /// GraphHopper profile query parameter.
    pub graphhopper_profile: String,
    /// Mapbox Directions profile (without the `mapbox/` prefix).
    pub mapbox_profile: String,
    /// Per-provider time budgets.
    pub timeouts: ProviderTimeouts,
    /// Per-provider base URLs.
    pub endpoints: ProviderEndpoints,
    /// Order in which credentialed providers are tried.
    ///
    /// OSRM is always tried last regardless of this list.
    pub priority: Vec<ProviderId>,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            graphhopper_key: None,
            mapbox_token: None,
            osrm_profile: DEFAULT_OSRM_PROFILE.to_owned(),
            graphhopper_profile: DEFAULT_GRAPHHOPPER_PROFILE.to_owned(),
            mapbox_profile: DEFAULT_MAPBOX_PROFILE.to_owned(),
            timeouts: ProviderTimeouts::default(),
            endpoints: ProviderEndpoints::default(),
            priority: vec![ProviderId::GraphHopper, ProviderId::Mapbox],
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl RoutingConfig {
    /// Set the GraphHopper API key.
    #[must_use]
    pub fn with_graphhopper_key(mut self, key: impl Into<String>) -> Self {
        self.graphhopper_key = Some(key.into());
        self
    }

    /// Set the Mapbox access token.
    #[must_use]
    pub fn with_mapbox_token(mut self, token: impl Into<String>) -> Self {
        self.mapbox_token = Some(token.into());
        self
    }

    /// Set the OSRM routing profile.
    #[must_use]
    pub fn with_osrm_profile(mut self, profile: impl Into<String>) -> Self {
        self.osrm_profile = profile.into();
        self
    }

    /// Set the GraphHopper profile.
    #[must_use]
    pub fn with_graphhopper_profile(mut self, profile: impl Into<String>) -> Self {
        self.graphhopper_profile = profile.into();
        self
    }

    /// Set the Mapbox profile.
    #[must_use]
    pub fn with_mapbox_profile(mut self, profile: impl Into<String>) -> Self {
        self.mapbox_profile = profile.into();
        self
    }

    /// Set the time budget of one provider.
    #[must_use]
    pub fn with_timeout(mut self, provider: ProviderId, timeout: Duration) -> Self {
        match provider {
            ProviderId::Osrm => self.timeouts.osrm = timeout,
            ProviderId::GraphHopper => self.timeouts.graphhopper = timeout,
            ProviderId::Mapbox => self.timeouts.mapbox = timeout,
        }
        self
    }

    /// Set the base URL of one provider.
    #[must_use]
    pub fn with_endpoint(mut self, provider: ProviderId, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        match provider {
            ProviderId::Osrm => self.endpoints.osrm = base_url,
            ProviderId::GraphHopper => self.endpoints.graphhopper = base_url,
            ProviderId::Mapbox => self.endpoints.mapbox = base_url,
        }
        self
    }

    /// Set the order in which credentialed providers are tried.
    #[must_use]
    pub fn with_priority(mut self, priority: Vec<ProviderId>) -> Self {
        self.priority = priority;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Credential for `provider`, ignoring blank values.
    ///
    /// Always `None` for providers that need no credential.
    #[must_use]
    pub fn credential(&self, provider: ProviderId) -> Option<&str> {
        let value = match provider {
            ProviderId::Osrm => None,
            ProviderId::GraphHopper => self.graphhopper_key.as_deref(),
            ProviderId::Mapbox => self.mapbox_token.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    /// Return `true` when `provider` can be attempted.
    #[must_use]
    pub fn is_enabled(&self, provider: ProviderId) -> bool {
        !provider.requires_credential() || self.credential(provider).is_some()
    }

    /// Routing profile for `provider`.
    #[must_use]
    pub fn profile(&self, provider: ProviderId) -> &str {
        match provider {
            ProviderId::Osrm => &self.osrm_profile,
            ProviderId::GraphHopper => &self.graphhopper_profile,
            ProviderId::Mapbox => &self.mapbox_profile,
        }
    }

    /// Providers in the order they will be tried.
    ///
    /// Configured credentialed providers come first in [`Self::priority`]
    /// order; duplicates and keyless entries are skipped. OSRM is appended
    /// last as the universal fallback.
    #[must_use]
    pub fn provider_order(&self) -> Vec<ProviderId> {
        let mut order: Vec<ProviderId> = Vec::with_capacity(ProviderId::ALL.len());
        for &provider in &self.priority {
            if provider.requires_credential()
                && self.is_enabled(provider)
                && !order.contains(&provider)
            {
                order.push(provider);
            }
        }
        order.push(ProviderId::Osrm);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_only_enable_osrm() {
        let config = RoutingConfig::default();
        assert_eq!(config.provider_order(), vec![ProviderId::Osrm]);
        assert_eq!(config.osrm_profile, "foot");
        assert_eq!(config.timeouts.osrm, Duration::from_millis(4_500));
    }

    #[rstest]
    fn credentialed_providers_precede_osrm() {
        let config = RoutingConfig::default()
            .with_graphhopper_key("gh")
            .with_mapbox_token("pk");
        assert_eq!(
            config.provider_order(),
            vec![ProviderId::GraphHopper, ProviderId::Mapbox, ProviderId::Osrm]
        );
    }

    #[rstest]
    fn priority_reorders_credentialed_providers() {
        let config = RoutingConfig::default()
            .with_graphhopper_key("gh")
            .with_mapbox_token("pk")
            .with_priority(vec![ProviderId::Mapbox, ProviderId::GraphHopper]);
        assert_eq!(
            config.provider_order(),
            vec![ProviderId::Mapbox, ProviderId::GraphHopper, ProviderId::Osrm]
        );
    }

    #[rstest]
    fn priority_ignores_duplicates_and_keyless_entries() {
        let config = RoutingConfig::default()
            .with_mapbox_token("pk")
            .with_priority(vec![
                ProviderId::Osrm,
                ProviderId::Mapbox,
                ProviderId::Mapbox,
            ]);
        assert_eq!(
            config.provider_order(),
            vec![ProviderId::Mapbox, ProviderId::Osrm]
        );
    }

    #[rstest]
    fn providers_missing_from_priority_are_not_tried() {
        let config = RoutingConfig::default()
            .with_graphhopper_key("gh")
            .with_mapbox_token("pk")
            .with_priority(vec![ProviderId::Mapbox]);
        assert_eq!(
            config.provider_order(),
            vec![ProviderId::Mapbox, ProviderId::Osrm]
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_credentials_disable_provider(#[case] key: &str) {
        let config = RoutingConfig::default().with_graphhopper_key(key);
        assert_eq!(config.credential(ProviderId::GraphHopper), None);
        assert!(!config.is_enabled(ProviderId::GraphHopper));
        assert_eq!(config.provider_order(), vec![ProviderId::Osrm]);
    }

    #[rstest]
    fn credentials_are_trimmed() {
        let config = RoutingConfig::default().with_mapbox_token(" pk.abc \n");
        assert_eq!(config.credential(ProviderId::Mapbox), Some("pk.abc"));
    }

    #[rstest]
    fn builder_sets_endpoints_and_timeouts() {
        let config = RoutingConfig::default()
            .with_endpoint(ProviderId::Osrm, "http://localhost:5000")
            .with_timeout(ProviderId::GraphHopper, Duration::from_millis(250))
            .with_user_agent("test-agent/1.0");
        assert_eq!(config.endpoints.get(ProviderId::Osrm), "http://localhost:5000");
        assert_eq!(
            config.timeouts.get(ProviderId::GraphHopper),
            Duration::from_millis(250)
        );
        assert_eq!(config.user_agent, "test-agent/1.0");
    }
}

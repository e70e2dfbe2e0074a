// Measurement API HTTP client
//
// Wraps `reqwest::Client` with endpoint URL construction for the three
// entity kinds and their composites. All methods return raw wire bodies;
// normalization happens in `netmeter-core`.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{RawFixedBody, RawInfoBody, RawListBody, RawSeriesBody};
use crate::params::{DateRange, TimeAggregation};
use crate::transport::TransportConfig;

/// Which top-level entity family an endpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Location,
    ClientIsp,
    TransitIsp,
}

impl EntityKind {
    /// URL path segment for this entity family.
    pub fn segment(self) -> &'static str {
        match self {
            Self::Location => "locations",
            Self::ClientIsp => "clientisps",
            Self::TransitIsp => "transitisps",
        }
    }
}

/// Typed endpoint path for an entity or entity combination.
///
/// Composite paths nest in the fixed order location → client ISP →
/// transit ISP, mirroring the composite cache-key convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityPath {
    Location(String),
    ClientIsp(String),
    TransitIsp(String),
    LocationClientIsp(String, String),
    LocationTransitIsp(String, String),
    ClientIspTransitIsp(String, String),
    LocationClientIspTransitIsp(String, String, String),
}

impl EntityPath {
    /// Render the path segments for this entity, in nesting order.
    fn segments(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Location(l) => vec![("locations", l)],
            Self::ClientIsp(c) => vec![("clientisps", c)],
            Self::TransitIsp(t) => vec![("transitisps", t)],
            Self::LocationClientIsp(l, c) => vec![("locations", l), ("clientisps", c)],
            Self::LocationTransitIsp(l, t) => vec![("locations", l), ("transitisps", t)],
            Self::ClientIspTransitIsp(c, t) => vec![("clientisps", c), ("transitisps", t)],
            Self::LocationClientIspTransitIsp(l, c, t) => {
                vec![("locations", l), ("clientisps", c), ("transitisps", t)]
            }
        }
    }
}

/// HTTP client for the measurement API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client from a base URL and transport config.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: transport.build_client()?,
            base_url,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL by appending path segments to the base URL.
    fn url(&self, parts: &[&str]) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/{}", parts.join("/"));
        Ok(Url::parse(&full)?)
    }

    /// Build the URL for an entity sub-resource (`info`, `metrics`, …).
    fn entity_url(&self, entity: &EntityPath, suffix: &[&str]) -> Result<Url, Error> {
        let mut parts: Vec<&str> = Vec::new();
        for (segment, id) in entity.segments() {
            parts.push(segment);
            parts.push(id);
        }
        parts.extend_from_slice(suffix);
        self.url(&parts)
    }

    // ── Entity sub-resources ─────────────────────────────────────────

    /// `GET {entity}/info`
    pub async fn info(&self, entity: &EntityPath) -> Result<RawInfoBody, Error> {
        let url = self.entity_url(entity, &["info"])?;
        self.get(url).await
    }

    /// `GET {entity}/time/{agg}/metrics`
    pub async fn time_series(
        &self,
        aggregation: TimeAggregation,
        entity: &EntityPath,
        range: DateRange,
    ) -> Result<RawSeriesBody, Error> {
        let mut url = self.entity_url(entity, &["time", aggregation.as_str(), "metrics"])?;
        range.apply(&mut url, aggregation);
        self.get(url).await
    }

    /// `GET {entity}/time/{agg}_hour/metrics`
    pub async fn hourly(
        &self,
        aggregation: TimeAggregation,
        entity: &EntityPath,
        range: DateRange,
    ) -> Result<RawSeriesBody, Error> {
        let mut url = self.entity_url(entity, &["time", aggregation.hourly_segment(), "metrics"])?;
        range.apply(&mut url, aggregation);
        self.get(url).await
    }

    /// `GET {entity}/metrics` — fixed trailing-window summary.
    pub async fn fixed(&self, entity: &EntityPath) -> Result<RawFixedBody, Error> {
        let url = self.entity_url(entity, &["metrics"])?;
        self.get(url).await
    }

    /// `GET locations/{id}/clientisps` — client ISPs serving a location.
    pub async fn location_client_isps(&self, location_id: &str) -> Result<RawListBody, Error> {
        let url = self.url(&["locations", location_id, "clientisps"])?;
        self.get(url).await
    }

    // ── Search & top-N listings ──────────────────────────────────────

    /// `GET {kind}/search/{query}`
    pub async fn search(&self, kind: EntityKind, query: &str) -> Result<RawListBody, Error> {
        let url = self.url(&[kind.segment(), "search", query])?;
        self.get(url).await
    }

    /// `GET {kind}/top?{filter}={ids}` — top entities, optionally narrowed
    /// by a comma-separated id list of the filtering entity kind.
    pub async fn top(
        &self,
        kind: EntityKind,
        filter: Option<(EntityKind, &[String])>,
    ) -> Result<RawListBody, Error> {
        let mut url = self.url(&[kind.segment(), "top"])?;
        if let Some((filter_kind, ids)) = filter {
            if !ids.is_empty() {
                url.query_pairs_mut()
                    .append_pair(filter_kind.segment(), &ids.join(","));
            }
        }
        self.get(url).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                message: body[..body.len().min(200)].to_owned(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

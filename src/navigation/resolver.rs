//! The router resolver.
//!
//! # Responsibilities
//! - Follow redirect routes until a path settles (bounded hop count)
//! - Run the loaders of the matched chain before rendering
//! - Render the page, or the nearest error element on failure
//! - Commit location + view to the navigation state unless superseded
//!
//! # Design Decisions
//! - Redirects never render; only the settled location is committed
//! - Loaders of one navigation run concurrently, each with a timeout
//! - A failure renders at the nearest error element at or above the
//!   failing route; routes above the boundary still render around it
//! - Superseded navigations are discarded after their loaders settle

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use tracing::Instrument;

use crate::config::schema::NavigationConfig;
use crate::loaders::{LoaderData, LoaderError};
use crate::navigation::error::NavigationError;
use crate::navigation::history::NavigationState;
use crate::navigation::outcome::{Committed, NavigationOutcome, NavigationStatus};
use crate::navigation::request::NavigationRequest;
use crate::observability::metrics;
use crate::render::{RenderContext, View};
use crate::routing::matcher::{MatchedChain, Resolution};
use crate::routing::params::Params;
use crate::routing::pattern::normalize_path;
use crate::routing::route::{Route, RouteLoader};
use crate::routing::RouteTree;

/// A path after all redirects were followed.
enum Settled<'t> {
    Matched(MatchedChain<'t>),
    NotFound(String),
}

struct Followed<'t> {
    settled: Settled<'t>,
    /// History entries to record (see `History::record`).
    entries: Vec<String>,
    redirects: Vec<String>,
}

/// Resolves navigation requests against a shared, immutable route tree.
#[derive(Debug, Clone)]
pub struct Resolver {
    tree: Arc<RouteTree>,
    max_redirect_hops: usize,
    loader_timeout_ms: u64,
}

impl Resolver {
    pub fn new(tree: Arc<RouteTree>, config: &NavigationConfig) -> Self {
        Self {
            tree,
            max_redirect_hops: config.max_redirect_hops,
            loader_timeout_ms: config.loader_timeout_ms,
        }
    }

    pub fn tree(&self) -> &Arc<RouteTree> {
        &self.tree
    }

    /// Navigate `state` to `request.path`.
    ///
    /// Redirects are followed and the generation is taken when this is
    /// called, not when the returned future is first polled, so issue order
    /// decides which navigation may commit. A misconfigured redirect takes no
    /// generation and leaves an in-flight navigation untouched.
    ///
    /// Resolves to `Err` only for [`NavigationError::MisconfiguredRedirect`];
    /// unmatched paths and loader failures are committed with an error view.
    pub fn navigate<'a>(
        &'a self,
        state: &'a NavigationState,
        request: NavigationRequest,
    ) -> impl Future<Output = Result<NavigationOutcome, NavigationError>> + 'a {
        let span = tracing::info_span!(
            "navigation",
            request_id = %request.id,
            path = %request.path
        );
        let start = Instant::now();
        let issued = span.in_scope(|| self.issue(state, &request.path, start));

        async move {
            let (generation, followed) = issued?;
            self.run(state, request, generation, followed, start).await
        }
        .instrument(span)
    }

    /// Step back one history entry. `Ok(None)` when already at the start.
    pub fn back<'a>(
        &'a self,
        state: &'a NavigationState,
    ) -> impl Future<Output = Result<Option<NavigationOutcome>, NavigationError>> + 'a {
        let index = state.snapshot().history.back_index();
        self.go(state, index)
    }

    /// Step forward one history entry. `Ok(None)` when already at the end.
    pub fn forward<'a>(
        &'a self,
        state: &'a NavigationState,
    ) -> impl Future<Output = Result<Option<NavigationOutcome>, NavigationError>> + 'a {
        let index = state.snapshot().history.forward_index();
        self.go(state, index)
    }

    fn go<'a>(
        &'a self,
        state: &'a NavigationState,
        index: Option<usize>,
    ) -> impl Future<Output = Result<Option<NavigationOutcome>, NavigationError>> + 'a {
        let snapshot = state.snapshot();
        let pending = index.and_then(|index| {
            let path = snapshot.history.entry(index)?;
            Some(self.navigate(state, NavigationRequest::pop(path, index)))
        });

        async move {
            match pending {
                Some(navigation) => navigation.await.map(Some),
                None => Ok(None),
            }
        }
    }

    fn issue(
        &self,
        state: &NavigationState,
        path: &str,
        start: Instant,
    ) -> Result<(u64, Followed<'_>), NavigationError> {
        match self.follow_redirects(path) {
            Ok(followed) => Ok((state.begin(), followed)),
            Err(err) => {
                tracing::error!(error = %err, "Navigation aborted");
                metrics::record_navigation("misconfigured_redirect", start);
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        state: &NavigationState,
        request: NavigationRequest,
        generation: u64,
        followed: Followed<'_>,
        start: Instant,
    ) -> Result<NavigationOutcome, NavigationError> {
        let (location, status, view) = match followed.settled {
            Settled::Matched(chain) => {
                let (status, view) = self.load_and_render(&chain).await;
                (chain.location, status, view)
            }
            Settled::NotFound(location) => {
                tracing::warn!(location = %location, "No route matched");
                let view = self.render_not_found(&location);
                (location, NavigationStatus::NotFound, view)
            }
        };

        if !state.is_current(generation) {
            return Ok(self.superseded(request, start));
        }

        let committed = Committed {
            request_id: request.id,
            location,
            status,
            view,
            redirects: followed.redirects,
        };
        let applied = state.commit(generation, |snapshot| {
            snapshot.history.record(request.kind, &followed.entries);
            snapshot.view = committed.view.clone();
            snapshot.status = Some(committed.status.clone());
        });
        if !applied {
            return Ok(self.superseded(request, start));
        }

        let outcome = NavigationOutcome::Committed(committed);
        tracing::info!(
            outcome = outcome.label(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Navigation committed"
        );
        metrics::record_navigation(outcome.label(), start);
        Ok(outcome)
    }

    fn superseded(&self, request: NavigationRequest, start: Instant) -> NavigationOutcome {
        tracing::debug!("Navigation superseded, discarding result");
        metrics::record_navigation("superseded", start);
        NavigationOutcome::Superseded {
            request_id: request.id,
            path: request.path,
        }
    }

    fn follow_redirects(&self, path: &str) -> Result<Followed<'_>, NavigationError> {
        let mut target = normalize_path(path);
        let mut entries = vec![target.clone()];
        let mut redirects = Vec::new();

        loop {
            let settled = match self.tree.resolve(&target) {
                Resolution::Matched(chain) => Settled::Matched(chain),
                Resolution::NotFound { location } => Settled::NotFound(location),
                Resolution::Redirect { location, redirect } => {
                    let next = normalize_path(&redirect.to);
                    redirects.push(location);
                    if redirects.len() > self.max_redirect_hops {
                        redirects.push(next);
                        return Err(NavigationError::MisconfiguredRedirect {
                            limit: self.max_redirect_hops,
                            trail: redirects,
                        });
                    }

                    tracing::debug!(to = %next, replace = redirect.replace, "Following redirect");
                    metrics::record_redirect();
                    if redirect.replace {
                        if let Some(last) = entries.last_mut() {
                            last.clone_from(&next);
                        }
                    } else {
                        entries.push(next.clone());
                    }
                    target = next;
                    continue;
                }
            };

            return Ok(Followed {
                settled,
                entries,
                redirects,
            });
        }
    }

    async fn load_and_render(&self, chain: &MatchedChain<'_>) -> (NavigationStatus, Option<View>) {
        let pending = chain
            .routes
            .iter()
            .enumerate()
            .filter_map(|(i, route)| route.loader().map(|loader| (i, *route, loader)));

        let results = join_all(pending.map(|(i, route, loader)| async move {
            (i, self.run_loader(route, loader, &chain.params).await)
        }))
        .await;

        let mut data: Vec<Option<LoaderData>> = vec![None; chain.routes.len()];
        let mut failure: Option<(usize, LoaderError)> = None;
        for (i, result) in results {
            match result {
                Ok(value) => data[i] = Some(value),
                Err(err) => {
                    if failure.as_ref().map_or(true, |(failed, _)| i < *failed) {
                        failure = Some((i, err));
                    }
                }
            }
        }

        let Some((failed, source)) = failure else {
            let view = wrap(&chain.routes, None, &chain.params, &data, &chain.location);
            return (NavigationStatus::Rendered, view);
        };

        let route = chain.routes[failed];
        let loader = route.loader().map(|l| l.name.clone()).unwrap_or_default();
        let error = NavigationError::LoaderFailure {
            route: route.id().to_string(),
            loader: loader.clone(),
            source: source.clone(),
        };
        let boundary = chain.routes[..=failed]
            .iter()
            .rposition(|r| r.error_element().is_some());
        let view = self.render_error(
            &chain.routes,
            boundary,
            &chain.params,
            &data,
            &error,
            &chain.location,
        );

        (
            NavigationStatus::LoaderFailed {
                route: route.id().to_string(),
                loader,
                error: source,
            },
            view,
        )
    }

    async fn run_loader(
        &self,
        route: &Route,
        loader: &RouteLoader,
        params: &Params,
    ) -> Result<LoaderData, LoaderError> {
        let start = Instant::now();
        let timeout = Duration::from_millis(self.loader_timeout_ms);

        let result = match tokio::time::timeout(timeout, loader.loader.load(params)).await {
            Ok(result) => result,
            Err(_) => Err(LoaderError::Timeout(self.loader_timeout_ms)),
        };

        metrics::record_loader(&loader.name, result.is_ok(), start);
        match &result {
            Ok(_) => tracing::debug!(
                route = %route.id(),
                loader = %loader.name,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Loader settled"
            ),
            Err(err) => tracing::warn!(
                route = %route.id(),
                loader = %loader.name,
                error = %err,
                "Loader failed"
            ),
        }
        result
    }

    fn render_not_found(&self, location: &str) -> Option<View> {
        let shell = self.tree.shell();
        let boundary = shell.iter().rposition(|r| r.error_element().is_some());
        let error = NavigationError::NoMatch {
            path: location.to_string(),
        };
        self.render_error(&shell, boundary, &Params::new(), &[], &error, location)
    }

    /// Render the error element of `routes[boundary]` wrapped by the routes
    /// above it, or the root-level fallback when there is no boundary.
    fn render_error(
        &self,
        routes: &[&Route],
        boundary: Option<usize>,
        params: &Params,
        data: &[Option<LoaderData>],
        error: &NavigationError,
        location: &str,
    ) -> Option<View> {
        let ctx = RenderContext {
            location,
            params,
            data: None,
            error: Some(error),
        };

        let Some((b, element)) =
            boundary.and_then(|b| routes[b].error_element().map(|element| (b, element)))
        else {
            return Some(self.tree.not_found().render(&ctx, None));
        };

        let inner = element.render(&ctx, None);
        wrap(&routes[..b], Some(inner), params, data, location)
    }
}

/// Render `routes` innermost-first, each component wrapping the view so far.
fn wrap(
    routes: &[&Route],
    mut view: Option<View>,
    params: &Params,
    data: &[Option<LoaderData>],
    location: &str,
) -> Option<View> {
    for (i, route) in routes.iter().enumerate().rev() {
        if let Some(component) = route.component() {
            let ctx = RenderContext {
                location,
                params,
                data: data.get(i).and_then(Option::as_ref),
                error: None,
            };
            view = Some(component.render(&ctx, view));
        }
    }
    view
}

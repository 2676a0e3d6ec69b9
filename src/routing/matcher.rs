//! Route matching logic.
//!
//! # Responsibilities
//! - Walk the route tree depth-first in declaration order
//! - Consume path segments left-to-right (literal or `:param`)
//! - Report a matched chain, a redirect, or an explicit no-match
//!
//! # Design Decisions
//! - Pure function of (routes, path): no rendering, no loaders
//! - First structural match wins, with backtracking across siblings
//! - Index routes match only when no segments remain
//! - A route with a path matches terminally once the path is consumed,
//!   even if none of its children match (empty outlet)
//! - Pathless routes only match through a child

use crate::routing::params::Params;
use crate::routing::pattern::{normalize_path, split_path};
use crate::routing::route::{Redirect, Route, RoutePath};

/// Routes matched for a path, outermost first.
#[derive(Debug, Clone)]
pub struct MatchedChain<'t> {
    pub routes: Vec<&'t Route>,
    pub params: Params,
    /// Normalized path that was matched.
    pub location: String,
}

impl MatchedChain<'_> {
    /// The innermost matched route.
    pub fn leaf(&self) -> Option<&Route> {
        self.routes.last().copied()
    }
}

/// Outcome of resolving one path.
#[derive(Debug, Clone)]
pub enum Resolution<'t> {
    Matched(MatchedChain<'t>),
    /// The matched chain contains a `Navigate` element.
    Redirect {
        location: String,
        redirect: Redirect,
    },
    NotFound {
        location: String,
    },
}

/// Resolve `path` against `routes`.
pub fn resolve<'t>(routes: &'t [Route], path: &str) -> Resolution<'t> {
    let location = normalize_path(path);
    let segments = split_path(path);
    let mut params = Params::new();
    let mut chain = Vec::new();

    if !match_level(routes, &segments, &mut params, &mut chain) {
        return Resolution::NotFound { location };
    }

    if let Some(redirect) = chain.iter().find_map(|route| route.redirect()) {
        return Resolution::Redirect {
            location,
            redirect: redirect.clone(),
        };
    }

    Resolution::Matched(MatchedChain {
        routes: chain,
        params,
        location,
    })
}

fn match_level<'t>(
    routes: &'t [Route],
    segments: &[&str],
    params: &mut Params,
    chain: &mut Vec<&'t Route>,
) -> bool {
    for route in routes {
        let params_mark = params.len();
        let chain_mark = chain.len();
        chain.push(route);

        let matched = match route.path() {
            RoutePath::Index => segments.is_empty(),
            RoutePath::Pathless => match_level(route.children(), segments, params, chain),
            RoutePath::Pattern(pattern) => match pattern.consume(segments, params) {
                Some(rest) => {
                    match_level(route.children(), rest, params, chain) || rest.is_empty()
                }
                None => false,
            },
        };

        if matched {
            return true;
        }
        params.truncate(params_mark);
        chain.truncate(chain_mark);
    }
    false
}

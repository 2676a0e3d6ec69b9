mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{app_with_loaders, default_app, GatedLoader, RecordingLoader};
use resume_router::config::{validate_config, RouteConfig, RouterConfig, ValidationError};
use resume_router::cta::{Activation, EXTERNAL_REL, EXTERNAL_TARGET};
use resume_router::loaders::{loader_fn, LoaderError, LoaderRegistry};
use resume_router::navigation::{NavigationError, NavigationStatus};
use resume_router::render::ComponentRegistry;
use resume_router::routing::RedirectIssue;
use resume_router::{NavigationRequest, NavigationState, Resolver, RouteTree};

async fn visit(app: &resume_router::App, path: &str) -> resume_router::navigation::Committed {
    let state = app.new_state();
    app.resolver()
        .navigate(&state, NavigationRequest::push(path))
        .await
        .unwrap()
        .into_committed()
        .unwrap()
}

#[tokio::test]
async fn test_literal_paths_render_layout_and_page() {
    let app = default_app();

    let cases: &[(&str, &[&str])] = &[
        ("/", &["providers", "home-layout", "home"]),
        ("/dashboard/resumes", &["providers", "dashboard-layout", "resumes"]),
        ("/dashboard/settings", &["providers", "dashboard-layout", "settings"]),
        ("/builder/abc123", &["providers", "builder-layout", "builder"]),
        ("/alice/my-resume", &["providers", "public-resume"]),
    ];

    for (path, components) in cases {
        let committed = visit(&app, path).await;
        assert_eq!(committed.status, NavigationStatus::Rendered, "{path}");
        assert_eq!(committed.location, *path);
        assert_eq!(committed.components(), *components, "{path}");
    }
}

#[tokio::test]
async fn test_index_routes_match_explicit_target() {
    let app = default_app();
    let explicit = visit(&app, "/dashboard/resumes").await;

    for path in ["/dashboard", "/builder", "/dashboard/", "/builder/"] {
        let redirected = visit(&app, path).await;
        assert_eq!(redirected.location, explicit.location, "{path}");
        assert_eq!(redirected.view, explicit.view, "{path}");
        assert_eq!(redirected.redirects.len(), 1);
    }
}

#[tokio::test]
async fn test_builder_loader_called_once_with_id() {
    let loader = RecordingLoader::ok();
    let app = app_with_loaders(|registry| {
        registry.register("builder", loader.clone());
    });

    let committed = visit(&app, "/builder/abc123").await;

    assert!(committed.is_rendered());
    assert_eq!(loader.call_count(), 1);
    assert_eq!(loader.calls()[0].get("id"), Some("abc123"));
    let page = committed.view.as_ref().unwrap().innermost();
    assert_eq!(page.data.as_ref().unwrap()["loaded"], true);
}

#[tokio::test]
async fn test_public_loader_receives_username_and_slug() {
    let loader = RecordingLoader::ok();
    let app = app_with_loaders(|registry| {
        registry.register("public", loader.clone());
    });

    visit(&app, "/alice/my-resume").await;

    let calls = loader.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].get("username"), Some("alice"));
    assert_eq!(calls[0].get("slug"), Some("my-resume"));
}

#[tokio::test]
async fn test_percent_encoded_params_are_decoded() {
    let loader = RecordingLoader::ok();
    let app = app_with_loaders(|registry| {
        registry.register("public", loader.clone());
    });

    visit(&app, "/j%C3%BCrgen/cv%202024").await;

    assert_eq!(loader.calls()[0].get("username"), Some("jürgen"));
    assert_eq!(loader.calls()[0].get("slug"), Some("cv 2024"));
}

#[tokio::test]
async fn test_loader_rejection_renders_error_view() {
    let app = app_with_loaders(|registry| {
        registry.register(
            "builder",
            RecordingLoader::failing(LoaderError::Failed("backend down".into())),
        );
    });
    let state = app.new_state();

    let committed = app
        .resolver()
        .navigate(&state, NavigationRequest::push("/builder/abc123"))
        .await
        .unwrap()
        .into_committed()
        .unwrap();

    assert!(matches!(committed.status, NavigationStatus::LoaderFailed { .. }));
    let view = committed.view.as_ref().unwrap();
    assert!(!view.contains("builder"));
    assert_eq!(view.components(), ["providers", "error-page"]);
    assert!(view.innermost().error.as_deref().unwrap().contains("backend down"));
    assert_eq!(state.location().as_deref(), Some("/builder/abc123"));
}

#[tokio::test]
async fn test_unknown_resume_is_not_found_failure() {
    let app = default_app();

    let committed = visit(&app, "/builder/zzz999").await;
    assert_eq!(
        committed.status,
        NavigationStatus::LoaderFailed {
            route: "0.0.2.0.0".into(),
            loader: "builder".into(),
            error: LoaderError::NotFound("zzz999".into()),
        }
    );

    let committed = visit(&app, "/bob/draft").await;
    assert!(matches!(
        committed.status,
        NavigationStatus::LoaderFailed { error: LoaderError::NotPublic(_), .. }
    ));
}

#[tokio::test]
async fn test_unmatched_path_renders_top_level_error() {
    let app = default_app();
    let state = app.new_state();

    let committed = app
        .resolver()
        .navigate(&state, NavigationRequest::push("/does/not/exist/at/all"))
        .await
        .unwrap()
        .into_committed()
        .unwrap();

    assert_eq!(committed.status, NavigationStatus::NotFound);
    assert_eq!(committed.components(), ["providers", "error-page"]);
    assert_eq!(state.location().as_deref(), Some("/does/not/exist/at/all"));
}

#[tokio::test]
async fn test_later_navigation_supersedes_pending_one() {
    let gated = GatedLoader::new();
    let app = app_with_loaders(|registry| {
        registry.register("builder", gated.clone());
    });
    let state = Arc::new(NavigationState::new());

    let first = tokio::spawn({
        let resolver = app.resolver().clone();
        let state = state.clone();
        async move {
            resolver
                .navigate(&state, NavigationRequest::push("/builder/abc123"))
                .await
        }
    });
    gated.started().await;

    let second = app
        .resolver()
        .navigate(&state, NavigationRequest::push("/dashboard/settings"))
        .await
        .unwrap();
    assert!(second.committed().unwrap().is_rendered());

    gated.release();
    let first = first.await.unwrap().unwrap();

    assert!(first.is_superseded());
    assert_eq!(gated.call_count(), 1);
    let snapshot = state.snapshot();
    assert_eq!(snapshot.location(), Some("/dashboard/settings"));
    assert_eq!(snapshot.history.entries(), ["/dashboard/settings"]);
    assert!(snapshot.view.as_ref().unwrap().contains("settings"));
}

#[tokio::test]
async fn test_issue_order_decides_winner_regardless_of_polling() {
    let app = app_with_loaders(|registry| {
        registry.register(
            "builder",
            loader_fn(|_| async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(serde_json::json!({}))
            }),
        );
    });
    let state = NavigationState::new();
    let resolver = app.resolver();

    let first = resolver.navigate(&state, NavigationRequest::push("/builder/abc123"));
    let second = resolver.navigate(&state, NavigationRequest::push("/dashboard/settings"));
    // The later navigation is polled first and settles before the earlier one.
    let (second, first) = tokio::join!(second, first);

    assert!(first.unwrap().is_superseded());
    assert!(!second.unwrap().is_superseded());
    let snapshot = state.snapshot();
    assert_eq!(snapshot.location(), Some("/dashboard/settings"));
    assert_eq!(snapshot.history.entries(), ["/dashboard/settings"]);
}

fn cyclic_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::page("/", "home"),
        RouteConfig {
            redirect: Some(resume_router::config::RedirectConfig {
                to: "/b".into(),
                replace: true,
            }),
            ..RouteConfig::segment("a", Vec::new())
        },
        RouteConfig {
            redirect: Some(resume_router::config::RedirectConfig {
                to: "/a".into(),
                replace: false,
            }),
            ..RouteConfig::segment("b", Vec::new())
        },
    ]
}

#[tokio::test]
async fn test_redirect_cycle_rejected_and_contained() {
    let config = RouterConfig {
        routes: cyclic_routes(),
        ..RouterConfig::default()
    };
    let errors = validate_config(&config).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::Redirect(RedirectIssue::Cycle { .. }))));

    let tree = RouteTree::from_config(
        &config.routes,
        &ComponentRegistry::with_defaults(),
        &LoaderRegistry::new(),
        &config.navigation.not_found_element,
    )
    .unwrap();
    let resolver = Resolver::new(Arc::new(tree), &config.navigation);
    let state = NavigationState::new();
    resolver
        .navigate(&state, NavigationRequest::push("/"))
        .await
        .unwrap();
    let before = state.snapshot();

    let err = resolver
        .navigate(&state, NavigationRequest::push("/a"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        NavigationError::MisconfiguredRedirect { limit: 8, .. }
    ));
    let after = state.snapshot();
    assert_eq!(after.history, before.history);
    assert_eq!(after.view, before.view);
}

#[tokio::test]
async fn test_cta_actions() {
    let app = default_app();
    let state = app.new_state();
    let cta = app.cta();

    let html = cta.learn_more().to_html();
    assert!(html.contains(r#"target="_blank""#));
    assert!(html.contains(r#"rel="noopener noreferrer nofollow""#));

    match cta.learn_more().activate(app.resolver(), &state).await.unwrap() {
        Activation::OpenExternal { href, target, rel } => {
            assert_eq!(href.as_str(), "https://freeresumebuilder.co/docs");
            assert_eq!(target, EXTERNAL_TARGET);
            assert_eq!(rel, EXTERNAL_REL);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(state.location().is_none());

    match cta.get_started().activate(app.resolver(), &state).await.unwrap() {
        Activation::Navigated(outcome) => {
            assert_eq!(outcome.committed().unwrap().location, "/dashboard/resumes");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(state.location().as_deref(), Some("/dashboard/resumes"));
}

#[tokio::test]
async fn test_history_across_navigations() {
    let app = default_app();
    let state = app.new_state();
    let resolver = app.resolver();

    resolver.navigate(&state, NavigationRequest::push("/")).await.unwrap();
    resolver
        .navigate(&state, NavigationRequest::push("/dashboard"))
        .await
        .unwrap();
    resolver
        .navigate(&state, NavigationRequest::replace("/dashboard/settings"))
        .await
        .unwrap();

    let history = state.snapshot().history.clone();
    assert_eq!(history.entries(), ["/", "/dashboard/settings"]);

    let back = resolver.back(&state).await.unwrap().unwrap();
    assert_eq!(back.committed().unwrap().location, "/");
    assert_eq!(state.snapshot().history.entries(), history.entries());
}

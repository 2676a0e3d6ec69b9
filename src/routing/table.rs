//! The application route table.
//!
//! ```text
//! providers
//! └── (error boundary: error-page)
//!     ├── home-layout
//!     │   └── /                      home
//!     ├── dashboard
//!     │   └── dashboard-layout
//!     │       ├── resumes            resumes
//!     │       ├── settings           settings
//!     │       └── (index)            → /dashboard/resumes
//!     ├── builder
//!     │   └── builder-layout
//!     │       ├── :id                builder        [loader: builder]
//!     │       └── (index)            → /dashboard/resumes
//!     └── :username
//!         └── :slug                  public-resume  [loader: public]
//! ```

use crate::config::schema::{ResumeConfig, RouteConfig};

/// Where both index redirects land.
pub const RESUMES_PATH: &str = "/dashboard/resumes";

pub fn default_routes() -> Vec<RouteConfig> {
    let boundary = RouteConfig {
        error_element: Some("error-page".to_string()),
        children: vec![
            RouteConfig::layout("home-layout", vec![RouteConfig::page("/", "home")]),
            RouteConfig::segment(
                "dashboard",
                vec![RouteConfig::layout(
                    "dashboard-layout",
                    vec![
                        RouteConfig::page("resumes", "resumes"),
                        RouteConfig::page("settings", "settings"),
                        RouteConfig::index_redirect(RESUMES_PATH),
                    ],
                )],
            ),
            RouteConfig::segment(
                "builder",
                vec![RouteConfig::layout(
                    "builder-layout",
                    vec![
                        RouteConfig::page(":id", "builder").with_loader("builder"),
                        RouteConfig::index_redirect(RESUMES_PATH),
                    ],
                )],
            ),
            RouteConfig::segment(
                ":username",
                vec![RouteConfig::page(":slug", "public-resume").with_loader("public")],
            ),
        ],
        ..RouteConfig::default()
    };

    vec![RouteConfig::layout("providers", vec![boundary])]
}

/// Resumes the store is seeded with when the configuration names none.
pub fn sample_resumes() -> Vec<ResumeConfig> {
    vec![
        ResumeConfig {
            id: "abc123".to_string(),
            username: "alice".to_string(),
            slug: "my-resume".to_string(),
            title: "Alice Liddell - Software Engineer".to_string(),
            public: true,
        },
        ResumeConfig {
            id: "def456".to_string(),
            username: "bob".to_string(),
            slug: "draft".to_string(),
            title: "Bob Builder - Draft".to_string(),
            public: false,
        },
    ]
}

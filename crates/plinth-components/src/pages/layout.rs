//! Page shell shared by every top-level page.

use async_trait::async_trait;
use minijinja::context;
use serde::Serialize;

use crate::component::{Component, ComponentError, ComponentType, Param};
use crate::renderer::RenderScope;
use crate::value::{ParamKind, ParamValue, Parameters};

/// Site name shown in the title and navigation.
pub const SITE_TITLE: &str = "Diffusion";

/// Navigation entries as (title, route).
const NAV_LINKS: &[(&str, &str)] = &[("Home", "/"), ("Create", "/create")];

/// Document shell: head, navigation and the page body.
#[derive(Debug, Default)]
pub struct MainLayout {
    title: String,
    active: String,
    child_content: String,
}

#[async_trait]
impl Component for MainLayout {
    async fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), ComponentError> {
        let nav = scope
            .render_child::<NavMenu>(
                Parameters::new().with("Active", ParamValue::String(self.active.clone())),
            )
            .await?;

        let ctx = scope.context();
        let base_href = ctx.base_url().to_string();
        let canonical = ctx.page_url();
        let stylesheet = ctx.resolve_url("/css/app.css");

        scope.write_template(
            "layout.html",
            context! {
                base_href => base_href,
                title => &self.title,
                site_title => SITE_TITLE,
                canonical => canonical,
                stylesheet => stylesheet,
                nav => nav,
                body => &self.child_content,
            },
        )
    }
}

impl ComponentType for MainLayout {
    const NAME: &'static str = "MainLayout";
    const QUALIFIED_NAME: &'static str = concat!(module_path!(), "::MainLayout");

    fn params() -> &'static [Param<Self>] {
        static PARAMS: &[Param<MainLayout>] = &[
            Param {
                name: "Title",
                kind: ParamKind::String,
                set: |c, v| {
                    if let Some(s) = v.as_str() {
                        c.title = s.to_string();
                    }
                },
            },
            Param {
                name: "Active",
                kind: ParamKind::String,
                set: |c, v| {
                    if let Some(s) = v.as_str() {
                        c.active = s.to_string();
                    }
                },
            },
            Param {
                name: "ChildContent",
                kind: ParamKind::Fragment,
                set: |c, v| {
                    if let Some(markup) = v.as_fragment() {
                        c.child_content = markup.to_string();
                    }
                },
            },
        ];
        PARAMS
    }
}

#[derive(Serialize)]
struct NavLink {
    title: &'static str,
    href: String,
    active: bool,
}

/// Top navigation with the current route highlighted.
#[derive(Debug, Default)]
pub struct NavMenu {
    active: String,
}

#[async_trait]
impl Component for NavMenu {
    async fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), ComponentError> {
        let ctx = scope.context();
        let items: Vec<NavLink> = NAV_LINKS
            .iter()
            .map(|&(title, route)| NavLink {
                title,
                href: ctx.resolve_url(route),
                active: route == self.active,
            })
            .collect();
        let home = ctx.resolve_url("/");

        scope.write_template(
            "nav.html",
            context! { home => home, site_title => SITE_TITLE, items => items },
        )
    }
}

impl ComponentType for NavMenu {
    const NAME: &'static str = "NavMenu";
    const QUALIFIED_NAME: &'static str = concat!(module_path!(), "::NavMenu");

    fn params() -> &'static [Param<Self>] {
        static PARAMS: &[Param<NavMenu>] = &[Param {
            name: "Active",
            kind: ParamKind::String,
            set: |c, v| {
                if let Some(s) = v.as_str() {
                    c.active = s.to_string();
                }
            },
        }];
        PARAMS
    }
}

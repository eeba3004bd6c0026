//! Home page and its gallery.

use async_trait::async_trait;
use minijinja::context;
use serde::Serialize;

use super::layout::MainLayout;
use crate::component::{Component, ComponentError, ComponentType, Param};
use crate::renderer::RenderScope;
use crate::value::{ParamKind, ParamValue, Parameters};

/// Allowed gallery column counts.
const COLUMNS: std::ops::RangeInclusive<i64> = 1..=12;

/// Featured categories as (title, slug).
const FEATURED: &[(&str, &str)] = &[
    ("Landscapes", "landscapes"),
    ("Portraits", "portraits"),
    ("Architecture", "architecture"),
    ("Abstract", "abstract"),
    ("Animals", "animals"),
    ("Fantasy", "fantasy"),
];

/// The home page.
///
/// With `LazyLoad` set the gallery is left as a placeholder for the client to
/// fill in; prerendering passes `false` so the grid is in the static markup.
#[derive(Debug)]
pub struct Index {
    lazy_load: bool,
    columns: i64,
    title: String,
}

impl Default for Index {
    fn default() -> Self {
        Self {
            lazy_load: true,
            columns: 4,
            title: "Gallery".to_string(),
        }
    }
}

#[async_trait]
impl Component for Index {
    async fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), ComponentError> {
        let gallery = scope
            .render_child::<Gallery>(
                Parameters::new()
                    .with("LazyLoad", ParamValue::Boolean(self.lazy_load))
                    .with("Columns", ParamValue::Integer(self.columns)),
            )
            .await?;

        let body = scope.render_template(
            "index.html",
            context! { title => &self.title, gallery => gallery },
        )?;

        let page = scope
            .render_child::<MainLayout>(
                Parameters::new()
                    .with("Title", ParamValue::String(self.title.clone()))
                    .with("Active", ParamValue::String("/".to_string()))
                    .with("ChildContent", ParamValue::Fragment(body)),
            )
            .await?;

        scope.write_raw(&page);
        Ok(())
    }
}

impl ComponentType for Index {
    const NAME: &'static str = "Index";
    const QUALIFIED_NAME: &'static str = concat!(module_path!(), "::Index");

    fn params() -> &'static [Param<Self>] {
        static PARAMS: &[Param<Index>] = &[
            Param {
                name: "LazyLoad",
                kind: ParamKind::Boolean,
                set: |c, v| {
                    if let Some(b) = v.as_bool() {
                        c.lazy_load = b;
                    }
                },
            },
            Param {
                name: "Columns",
                kind: ParamKind::Integer,
                set: |c, v| {
                    if let Some(n) = v.as_i64() {
                        c.columns = n;
                    }
                },
            },
            Param {
                name: "Title",
                kind: ParamKind::String,
                set: |c, v| {
                    if let Some(s) = v.as_str() {
                        c.title = s.to_string();
                    }
                },
            },
        ];
        PARAMS
    }
}

#[derive(Serialize)]
struct Tile {
    title: &'static str,
    href: String,
}

/// Featured gallery grid, or a placeholder when lazily loaded.
#[derive(Debug)]
pub struct Gallery {
    lazy_load: bool,
    columns: i64,
}

impl Default for Gallery {
    fn default() -> Self {
        Self {
            lazy_load: true,
            columns: 4,
        }
    }
}

#[async_trait]
impl Component for Gallery {
    async fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), ComponentError> {
        if !COLUMNS.contains(&self.columns) {
            return Err(format!(
                "Columns must be between {} and {}, got {}",
                COLUMNS.start(),
                COLUMNS.end(),
                self.columns
            )
            .into());
        }

        let ctx = scope.context();
        let tiles: Vec<Tile> = FEATURED
            .iter()
            .map(|&(title, slug)| Tile {
                title,
                href: ctx.resolve_url(&format!("/?category={slug}")),
            })
            .collect();

        scope.write_template(
            "gallery.html",
            context! {
                lazy => self.lazy_load,
                columns => self.columns,
                tiles => tiles,
            },
        )
    }
}

impl ComponentType for Gallery {
    const NAME: &'static str = "Gallery";
    const QUALIFIED_NAME: &'static str = concat!(module_path!(), "::Gallery");

    fn params() -> &'static [Param<Self>] {
        static PARAMS: &[Param<Gallery>] = &[
            Param {
                name: "LazyLoad",
                kind: ParamKind::Boolean,
                set: |c, v| {
                    if let Some(b) = v.as_bool() {
                        c.lazy_load = b;
                    }
                },
            },
            Param {
                name: "Columns",
                kind: ParamKind::Integer,
                set: |c, v| {
                    if let Some(n) = v.as_i64() {
                        c.columns = n;
                    }
                },
            },
        ];
        PARAMS
    }
}

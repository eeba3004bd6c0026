//! Image creation page.

use async_trait::async_trait;
use minijinja::context;
use serde::Serialize;

use super::layout::MainLayout;
use crate::component::{Component, ComponentError, ComponentType, Param};
use crate::renderer::RenderScope;
use crate::value::{ParamKind, ParamValue, Parameters};

/// Output sizes offered by the create form.
pub const SIZES: &[&str] = &["Square", "Portrait", "Landscape"];

#[derive(Serialize)]
struct SizeOption {
    value: &'static str,
    selected: bool,
}

/// Prompt form for creating new images.
#[derive(Debug)]
pub struct Create {
    prompt: String,
    size: &'static str,
    error: String,
}

impl Default for Create {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            size: SIZES[0],
            error: String::new(),
        }
    }
}

#[async_trait]
impl Component for Create {
    async fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), ComponentError> {
        let error_summary = scope
            .render_child::<ErrorSummary>(
                Parameters::new()
                    .with("Message", ParamValue::String(self.error.clone()))
                    .with("Class", ParamValue::String("mb-4".to_string())),
            )
            .await?;

        let sizes: Vec<SizeOption> = SIZES
            .iter()
            .map(|&value| SizeOption {
                value,
                selected: value == self.size,
            })
            .collect();
        let action = scope.context().resolve_url("/create");

        let body = scope.render_template(
            "create.html",
            context! {
                error_summary => error_summary,
                action => action,
                prompt => &self.prompt,
                sizes => sizes,
            },
        )?;

        let page = scope
            .render_child::<MainLayout>(
                Parameters::new()
                    .with("Title", ParamValue::String("Create".to_string()))
                    .with("Active", ParamValue::String("/create".to_string()))
                    .with("ChildContent", ParamValue::Fragment(body)),
            )
            .await?;

        scope.write_raw(&page);
        Ok(())
    }
}

impl ComponentType for Create {
    const NAME: &'static str = "Create";
    const QUALIFIED_NAME: &'static str = concat!(module_path!(), "::Create");

    fn params() -> &'static [Param<Self>] {
        static PARAMS: &[Param<Create>] = &[
            Param {
                name: "Prompt",
                kind: ParamKind::String,
                set: |c, v| {
                    if let Some(s) = v.as_str() {
                        c.prompt = s.to_string();
                    }
                },
            },
            Param {
                name: "Size",
                kind: ParamKind::Enum(SIZES),
                set: |c, v| {
                    if let Some(size) = v.as_variant() {
                        c.size = size;
                    }
                },
            },
            Param {
                name: "Error",
                kind: ParamKind::String,
                set: |c, v| {
                    if let Some(s) = v.as_str() {
                        c.error = s.to_string();
                    }
                },
            },
        ];
        PARAMS
    }
}

/// Alert box summarising a failed request. Renders nothing without a message.
#[derive(Debug, Default)]
pub struct ErrorSummary {
    message: String,
    class: String,
}

#[async_trait]
impl Component for ErrorSummary {
    async fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), ComponentError> {
        let message = self.message.trim();
        if message.is_empty() {
            return Ok(());
        }

        scope.write_template(
            "error_summary.html",
            context! { message => message, class => &self.class },
        )
    }
}

impl ComponentType for ErrorSummary {
    const NAME: &'static str = "ErrorSummary";
    const QUALIFIED_NAME: &'static str = concat!(module_path!(), "::ErrorSummary");

    fn params() -> &'static [Param<Self>] {
        static PARAMS: &[Param<ErrorSummary>] = &[
            Param {
                name: "Message",
                kind: ParamKind::String,
                set: |c, v| {
                    if let Some(s) = v.as_str() {
                        c.message = s.to_string();
                    }
                },
            },
            Param {
                name: "Class",
                kind: ParamKind::String,
                set: |c, v| {
                    if let Some(s) = v.as_str() {
                        c.class = s.to_string();
                    }
                },
            },
        ];
        PARAMS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::catalog::ComponentCatalog;
    use crate::context::RenderContext;
    use crate::renderer::ComponentRenderer;
    use crate::value::{Args, RawValue};

    fn renderer() -> ComponentRenderer {
        ComponentRenderer::new(Arc::new(ComponentCatalog::builtin()))
    }

    fn context() -> RenderContext {
        RenderContext::from_base_url("http://localhost:5000/").unwrap()
    }

    #[tokio::test]
    async fn renders_form_with_default_size_selected() {
        let html = renderer()
            .render_type::<Create>(&context(), None)
            .await
            .unwrap();

        assert!(html.contains(r#"action="http://localhost:5000/create""#));
        assert!(html.contains(r#"value="Square" checked"#));
        assert!(!html.contains("error-summary"));
        assert!(html.contains(r#"aria-current="page">Create</a>"#));
    }

    #[tokio::test]
    async fn prefills_prompt_and_selects_size() {
        let mut args = Args::new();
        args.insert("Prompt".to_string(), RawValue::from("a <lighthouse> at dusk"));
        args.insert("Size".to_string(), RawValue::from("landscape"));

        let html = renderer()
            .render_type::<Create>(&context(), Some(&args))
            .await
            .unwrap();

        assert!(html.contains("a &lt;lighthouse&gt; at dusk"));
        assert!(html.contains(r#"value="Landscape" checked"#));
        assert!(!html.contains(r#"value="Square" checked"#));
    }

    #[tokio::test]
    async fn shows_error_summary_when_error_given() {
        let mut args = Args::new();
        args.insert("Error".to_string(), RawValue::from("Prompt is required"));

        let html = renderer()
            .render_type::<Create>(&context(), Some(&args))
            .await
            .unwrap();

        assert!(html.contains(r#"<div class="error-summary mb-4" role="alert">"#));
        assert!(html.contains("Prompt is required"));
    }

    #[tokio::test]
    async fn empty_error_summary_renders_nothing() {
        let mut args = Args::new();
        args.insert("Message".to_string(), RawValue::from("   "));

        let html = renderer()
            .render_named("ErrorSummary", &context(), Some(&args))
            .await
            .unwrap();

        assert_eq!(html, "");
    }
}
